//! User Repository

use super::{RepoError, RepoResult};
use shared::models::{User, UserSummary};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, username, password_hash, openai_key, main_menu_page, created_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM user WHERE id = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM user WHERE username = ? LIMIT 1");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<UserSummary>> {
    let users = sqlx::query_as::<_, UserSummary>(
        "SELECT id, username, created_at FROM user ORDER BY created_at, id",
    )
    .fetch_all(pool)
    .await?;
    Ok(users)
}

/// Insert a user; a taken username surfaces as [`RepoError::Duplicate`]
pub async fn create(pool: &SqlitePool, username: &str, password_hash: &str) -> RepoResult<User> {
    let id = snowflake_id();
    sqlx::query("INSERT INTO user (id, username, password_hash, created_at) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(username)
        .bind(password_hash)
        .bind(now_millis())
        .execute(pool)
        .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn set_openai_key(pool: &SqlitePool, id: i64, key: &str) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE user SET openai_key = ? WHERE id = ?")
        .bind(key)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    Ok(())
}

/// Set or clear (`None`) the landing page name
pub async fn set_main_menu_page(pool: &SqlitePool, id: i64, page: Option<&str>) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE user SET main_menu_page = ? WHERE id = ?")
        .bind(page)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;

    #[tokio::test]
    async fn test_create_and_lookup() {
        let pool = test_pool().await;
        let user = create(&pool, "alice", "phc-hash").await.unwrap();
        assert_eq!(user.username, "alice");
        assert!(user.openai_key.is_none());

        let found = find_by_username(&pool, "alice").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(find_by_username(&pool, "bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_settings_updates() {
        let pool = test_pool().await;
        let user = create(&pool, "alice", "phc-hash").await.unwrap();

        set_openai_key(&pool, user.id, "sk-test-1234").await.unwrap();
        set_main_menu_page(&pool, user.id, Some("menu")).await.unwrap();
        let found = find_by_id(&pool, user.id).await.unwrap().unwrap();
        assert_eq!(found.openai_key.as_deref(), Some("sk-test-1234"));
        assert_eq!(found.main_menu_page.as_deref(), Some("menu"));

        set_main_menu_page(&pool, user.id, None).await.unwrap();
        let found = find_by_id(&pool, user.id).await.unwrap().unwrap();
        assert!(found.main_menu_page.is_none());

        let err = set_openai_key(&pool, 42, "k").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_find_all_has_no_secrets() {
        let pool = test_pool().await;
        create(&pool, "alice", "h").await.unwrap();
        create(&pool, "bob", "h").await.unwrap();
        let users = find_all(&pool).await.unwrap();
        assert_eq!(users.len(), 2);
        let json = serde_json::to_string(&users).unwrap();
        assert!(!json.contains("password"));
    }
}
