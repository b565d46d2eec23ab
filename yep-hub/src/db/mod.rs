//! Read-side store queries for the Interview Hub
//!
//! The hub only reads; every write path (application submission, slot
//! scheduling, gate management) lives in other services. Queries return
//! assembled records for the builders rather than raw rows.

use sqlx::SqlitePool;
use yep_common::db::models::UserRecord;
use yep_common::Result;

pub mod hiring;
pub mod readiness;

/// Directory lookup by user id
pub async fn find_user(pool: &SqlitePool, user_id: &str) -> Result<Option<UserRecord>> {
    let row: Option<(String, String, Option<String>)> =
        sqlx::query_as("SELECT guid, display_name, chapter_id FROM users WHERE guid = ?")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    Ok(row.map(|(guid, display_name, chapter_id)| UserRecord {
        guid,
        display_name,
        chapter_id,
    }))
}

/// Roles granted to a user, as stored in the directory
pub async fn load_user_roles(pool: &SqlitePool, user_id: &str) -> Result<Vec<String>> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT role FROM user_roles WHERE user_guid = ? ORDER BY role")
            .bind(user_id)
            .fetch_all(pool)
            .await?;

    Ok(rows.into_iter().map(|(role,)| role).collect())
}
