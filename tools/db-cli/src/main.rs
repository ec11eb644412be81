use anyhow::Context;
use clap::{Parser, Subcommand};

use tutorlink_common::DatabaseConfig;
use tutorlink_database::{create_pool, schema_report, ColumnProber, MigrationRunner};

#[derive(Parser)]
#[command(name = "db-cli")]
#[command(about = "TutorLink database CLI tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Check migration status
    Status,
    /// Seed sample data for local development
    Seed,
    /// Probe the live schema and report drift
    Check,
    /// Apply an ad-hoc SQL file statement by statement, tolerating
    /// per-statement errors
    Apply {
        /// Path to the .sql file
        file: std::path::PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = DatabaseConfig::from_env();

    match cli.command {
        Commands::Migrate => {
            let pool = create_pool(&config).await?;
            let runner = MigrationRunner::new(pool);

            runner.run_all_migrations().await?;

            println!("✅ Migrations completed successfully");
        }
        Commands::Status => {
            let pool = create_pool(&config).await?;
            let runner = MigrationRunner::new(pool);

            let status = runner.check_migration_status().await?;
            println!("📊 {}", status);

            if status.is_up_to_date {
                println!("✅ Database is up to date");
            } else {
                println!("⚠️  Database needs migration");
            }
        }
        Commands::Seed => {
            let pool = create_pool(&config).await?;
            let runner = MigrationRunner::new(pool);

            runner.seed_sample_data().await?;
            println!("✅ Sample data seeded successfully");
        }
        Commands::Check => {
            let pool = create_pool(&config).await?;
            let report = schema_report(&ColumnProber::new(pool)).await?;

            print!("{}", report);
            let drifted = !report.missing_tables().is_empty()
                || !report.missing_columns().is_empty()
                || !report.legacy_columns().is_empty();
            if drifted {
                println!("⚠️  Schema drift detected");
            } else {
                println!("✅ Schema matches the expected shape");
            }
        }
        Commands::Apply { file } => {
            // Setup failures (unreadable file, unreachable database) are
            // fatal; per-statement failures are not.
            let sql = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let pool = create_pool(&config).await?;

            let statements = split_statements(&sql);
            let total = statements.len();
            let mut failed = 0usize;

            for (index, statement) in statements.iter().enumerate() {
                match sqlx::query(statement).execute(&pool).await {
                    Ok(_) => {}
                    Err(err) => {
                        failed += 1;
                        println!("⚠️  Statement {}/{} failed: {}", index + 1, total, err);
                    }
                }
            }

            println!("📊 Applied {}/{} statements from {}", total - failed, total, file.display());
            if failed == 0 {
                println!("✅ All statements applied");
            }
        }
    }

    Ok(())
}

/// Naive statement splitter for ad-hoc fix scripts: splits on `;`, drops
/// blanks and comment-only chunks. Not a SQL parser; files with semicolons
/// inside string literals or function bodies need `migrate` instead.
fn split_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(str::trim)
        .filter(|chunk| {
            !chunk.is_empty() && chunk.lines().any(|line| !line.trim().is_empty() && !line.trim().starts_with("--"))
        })
        .map(str::to_string)
        .collect()
}
