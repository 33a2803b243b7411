//! HTML Page Repository

use super::RepoResult;
use shared::models::{HtmlPage, HtmlPageSummary};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

/// Create or replace the page `name` of `user_id`; returns the page id
pub async fn upsert(pool: &SqlitePool, user_id: i64, name: &str, content: &str) -> RepoResult<i64> {
    let now = now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO html_page (id, user_id, name, content, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5) \
         ON CONFLICT(user_id, name) DO UPDATE SET content = excluded.content, updated_at = excluded.updated_at \
         RETURNING id",
    )
    .bind(snowflake_id())
    .bind(user_id)
    .bind(name)
    .bind(content)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn find(pool: &SqlitePool, user_id: i64, name: &str) -> RepoResult<Option<HtmlPage>> {
    let page = sqlx::query_as::<_, HtmlPage>(
        "SELECT id, user_id, name, content, created_at, updated_at FROM html_page WHERE user_id = ? AND name = ?",
    )
    .bind(user_id)
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(page)
}

pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<HtmlPageSummary>> {
    let pages = sqlx::query_as::<_, HtmlPageSummary>(
        "SELECT id, name, created_at, updated_at FROM html_page WHERE user_id = ? ORDER BY name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(pages)
}

pub async fn delete(pool: &SqlitePool, user_id: i64, name: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM html_page WHERE user_id = ? AND name = ?")
        .bind(user_id)
        .bind(name)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::{seed_user, test_pool};

    #[tokio::test]
    async fn test_upsert_replaces_content_per_owner() {
        let pool = test_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let bob = seed_user(&pool, "bob").await;

        let first = upsert(&pool, alice.id, "menu", "<h1>v1</h1>").await.unwrap();
        let second = upsert(&pool, alice.id, "menu", "<h1>v2</h1>").await.unwrap();
        assert_eq!(first, second);

        let other = upsert(&pool, bob.id, "menu", "<h1>bob</h1>").await.unwrap();
        assert_ne!(first, other);

        let page = find(&pool, alice.id, "menu").await.unwrap().unwrap();
        assert_eq!(page.content, "<h1>v2</h1>");
        assert_eq!(find_by_user(&pool, alice.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_scoped_by_owner() {
        let pool = test_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let bob = seed_user(&pool, "bob").await;
        upsert(&pool, alice.id, "menu", "x").await.unwrap();

        assert!(!delete(&pool, bob.id, "menu").await.unwrap());
        assert!(delete(&pool, alice.id, "menu").await.unwrap());
        assert!(find(&pool, alice.id, "menu").await.unwrap().is_none());
    }
}
