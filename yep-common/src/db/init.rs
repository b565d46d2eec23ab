//! Database initialization
//!
//! Creates the portal schema on first run and is safe to call on every
//! startup (all statements are idempotent).

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL mode allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    // Run schema creation (idempotent - safe to call multiple times)
    create_settings_table(&pool).await?;
    create_chapters_table(&pool).await?;
    create_users_table(&pool).await?;
    create_user_roles_table(&pool).await?;

    // Hiring workflow tables
    create_positions_table(&pool).await?;
    create_applications_table(&pool).await?;
    create_interview_slots_table(&pool).await?;
    create_interview_notes_table(&pool).await?;
    create_decisions_table(&pool).await?;

    // Instructor readiness workflow tables
    create_readiness_gates_table(&pool).await?;
    create_gate_slots_table(&pool).await?;
    create_availability_requests_table(&pool).await?;

    // Initialize default settings
    init_default_settings(&pool).await?;

    Ok(pool)
}

async fn create_settings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_chapters_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS chapters (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            guid TEXT PRIMARY KEY,
            display_name TEXT NOT NULL,
            chapter_id TEXT REFERENCES chapters(guid),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_user_roles_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_roles (
            user_guid TEXT NOT NULL REFERENCES users(guid),
            role TEXT NOT NULL,
            PRIMARY KEY (user_guid, role)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_positions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS positions (
            guid TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            chapter_id TEXT REFERENCES chapters(guid),
            requires_interview INTEGER NOT NULL DEFAULT 1,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_applications_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS applications (
            guid TEXT PRIMARY KEY,
            applicant_id TEXT NOT NULL REFERENCES users(guid),
            position_id TEXT NOT NULL REFERENCES positions(guid),
            submitted_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_interview_slots_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS interview_slots (
            guid TEXT PRIMARY KEY,
            application_id TEXT NOT NULL REFERENCES applications(guid),
            status TEXT NOT NULL DEFAULT 'PROPOSED',
            scheduled_at TIMESTAMP,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_interview_notes_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS interview_notes (
            guid TEXT PRIMARY KEY,
            application_id TEXT NOT NULL REFERENCES applications(guid),
            author_id TEXT NOT NULL REFERENCES users(guid),
            body TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_decisions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS decisions (
            guid TEXT PRIMARY KEY,
            application_id TEXT NOT NULL UNIQUE REFERENCES applications(guid),
            outcome TEXT NOT NULL,
            decided_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_readiness_gates_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS readiness_gates (
            guid TEXT PRIMARY KEY,
            instructor_id TEXT NOT NULL UNIQUE REFERENCES users(guid),
            status TEXT NOT NULL DEFAULT 'REQUIRED',
            outcome TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            completed_at TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_gate_slots_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS gate_slots (
            guid TEXT PRIMARY KEY,
            gate_id TEXT NOT NULL REFERENCES readiness_gates(guid),
            status TEXT NOT NULL DEFAULT 'PROPOSED',
            scheduled_at TIMESTAMP,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_availability_requests_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS availability_requests (
            guid TEXT PRIMARY KEY,
            gate_id TEXT NOT NULL REFERENCES readiness_gates(guid),
            status TEXT NOT NULL DEFAULT 'PENDING',
            requested_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Seed default settings without overwriting operator changes
async fn init_default_settings(pool: &SqlitePool) -> Result<()> {
    let defaults: &[(&str, &str)] = &[
        // Stage shown to an applicant whose application is waiting on the
        // other party: "blocked" or "needs_action"
        ("hub_applicant_waiting_stage", "blocked"),
    ];

    for (key, value) in defaults {
        sqlx::query("INSERT OR IGNORE INTO settings (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(pool)
            .await?;
    }

    Ok(())
}

/// Read a setting, falling back to the provided default when absent
pub async fn load_setting(pool: &SqlitePool, key: &str, default: &str) -> Result<String> {
    let value: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    Ok(value.map(|(v,)| v).unwrap_or_else(|| default.to_string()))
}
