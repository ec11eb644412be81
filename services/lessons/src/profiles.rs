use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use tutorlink_common::AppError;
use tutorlink_database::models::DisplayProfileRow;
use tutorlink_database::FallbackReport;

#[derive(Debug, Clone, Default)]
pub struct DisplayProfile {
    pub name: Option<String>,
    pub avatar: Option<String>,
}

/// Resolves display names and avatars for a batch of user ids in one round
/// trip per strategy: the `get_profile_info` function first, the profile
/// view second, raw base tables with manual name concatenation last. All
/// three failing yields an empty map; the mappers substitute placeholders.
pub async fn fetch_display_profiles(
    pool: &PgPool,
    user_ids: &[Uuid],
    report: &mut FallbackReport,
) -> HashMap<Uuid, DisplayProfile> {
    let mut ids: Vec<Uuid> = user_ids.to_vec();
    ids.sort();
    ids.dedup();
    if ids.is_empty() {
        return HashMap::new();
    }

    match profile_rpc(pool, &ids).await {
        Ok(rows) => return into_map(rows),
        Err(err) => report.record("profile_rpc", &err),
    }

    match profile_view(pool, &ids).await {
        Ok(rows) => return into_map(rows),
        Err(err) => report.record("profile_view", &err),
    }

    match base_tables(pool, &ids).await {
        Ok(rows) => into_map(rows),
        Err(err) => {
            report.record("profile_base_tables", &err);
            HashMap::new()
        }
    }
}

async fn profile_rpc(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<DisplayProfileRow>, AppError> {
    sqlx::query_as::<_, DisplayProfileRow>(
        "SELECT user_id, display_name, avatar_url FROM get_profile_info($1)",
    )
    .bind(ids)
    .fetch_all(pool)
    .await
    .map_err(AppError::Database)
}

async fn profile_view(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<DisplayProfileRow>, AppError> {
    sqlx::query_as::<_, DisplayProfileRow>(
        "SELECT user_id, display_name, avatar_url FROM user_profiles_view WHERE user_id = ANY($1)",
    )
    .bind(ids)
    .fetch_all(pool)
    .await
    .map_err(AppError::Database)
}

async fn base_tables(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<DisplayProfileRow>, AppError> {
    sqlx::query_as::<_, DisplayProfileRow>(
        r#"
        SELECT
            u.user_id,
            NULLIF(TRIM(CONCAT(p.first_name, ' ', p.last_name)), '') AS display_name,
            p.avatar_url
        FROM users u
        LEFT JOIN profiles p ON p.user_id = u.user_id
        WHERE u.user_id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await
    .map_err(AppError::Database)
}

fn into_map(rows: Vec<DisplayProfileRow>) -> HashMap<Uuid, DisplayProfile> {
    rows.into_iter()
        .map(|row| {
            (
                row.user_id,
                DisplayProfile {
                    name: row.display_name,
                    avatar: row.avatar_url,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_map_keys_by_user_id() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let rows = vec![
            DisplayProfileRow {
                user_id: a,
                display_name: Some("Maria Alvarez".to_string()),
                avatar_url: None,
            },
            DisplayProfileRow {
                user_id: b,
                display_name: None,
                avatar_url: Some("https://cdn.example/s.png".to_string()),
            },
        ];
        let map = into_map(rows);
        assert_eq!(map.len(), 2);
        assert_eq!(map[&a].name.as_deref(), Some("Maria Alvarez"));
        assert_eq!(map[&b].name, None);
        assert_eq!(map[&b].avatar.as_deref(), Some("https://cdn.example/s.png"));
    }
}
