use axum::{http::StatusCode, response::Json};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tutorlink_auth::JwtService;
use tutorlink_common::ApiResponse;
use tutorlink_database::{create_pool, MigrationRunner};
use tutorlink_lessons::{config::LessonsConfig, email::EmailService, routes, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tutorlink_lessons=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = LessonsConfig::from_env();

    // Create database connection pool
    let db_pool = create_pool(&config.database).await?;

    // Run migrations
    MigrationRunner::new(db_pool.clone()).run_all_migrations().await?;

    let jwt_service = JwtService::new(&config.jwt.secret);
    let email_service = EmailService::new(&config.email);

    let app_state = AppState {
        config: config.clone(),
        db_pool,
        jwt_service,
        email_service,
    };

    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any);

    let app = routes::create_routes(app_state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
        .fallback(handler_404);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))
            .await?;

    tracing::info!(
        "Lessons service listening on {}:{}",
        config.server.host,
        config.server.port
    );

    axum::serve(listener, app).await?;

    Ok(())
}

async fn handler_404() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error("Endpoint not found".to_string())),
    )
}
