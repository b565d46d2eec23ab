//! Hiring-domain queries: applications with their interview context

use sqlx::SqlitePool;
use tracing::warn;

use crate::interviews::capabilities::ViewerCapabilities;
use crate::interviews::filters::TaskView;
use crate::interviews::hiring::{DecisionRecord, HiringRecord};
use crate::interviews::slots::SlotRecord;
use yep_common::db::models::{SlotStatus, UserRecord};
use yep_common::time::parse_timestamp_opt;
use yep_common::Result;

const APPLICATIONS_BASE: &str = "\
    SELECT a.guid, a.applicant_id, u.display_name, p.title, p.requires_interview, c.name, a.submitted_at
    FROM applications a
    JOIN users u ON u.guid = a.applicant_id
    JOIN positions p ON p.guid = a.position_id
    LEFT JOIN chapters c ON c.guid = p.chapter_id";

type ApplicationRow = (
    String,
    String,
    String,
    String,
    i64,
    Option<String>,
    Option<String>,
);

/// Fetch the applications in scope for this view, each with its slots,
/// decision, and note count.
///
/// Mine = the viewer's own applications. Team = everything for admins;
/// chapter leads see their own chapter plus chapter-unscoped positions.
pub async fn fetch_hiring(
    pool: &SqlitePool,
    view: TaskView,
    caps: &ViewerCapabilities,
    viewer: &UserRecord,
) -> Result<Vec<HiringRecord>> {
    let rows: Vec<ApplicationRow> = match view {
        TaskView::Mine => {
            let sql = format!("{APPLICATIONS_BASE} WHERE a.applicant_id = ? ORDER BY a.submitted_at DESC");
            sqlx::query_as(&sql).bind(&viewer.guid).fetch_all(pool).await?
        }
        TaskView::Team if caps.is_admin => {
            let sql = format!("{APPLICATIONS_BASE} ORDER BY a.submitted_at DESC");
            sqlx::query_as(&sql).fetch_all(pool).await?
        }
        TaskView::Team => {
            let sql = format!(
                "{APPLICATIONS_BASE} WHERE (p.chapter_id = ? OR p.chapter_id IS NULL) ORDER BY a.submitted_at DESC"
            );
            sqlx::query_as(&sql)
                .bind(&viewer.chapter_id)
                .fetch_all(pool)
                .await?
        }
    };

    let mut records = Vec::with_capacity(rows.len());
    for (application_id, applicant_id, applicant_name, position_title, requires_interview, chapter_name, submitted_at) in
        rows
    {
        let slots = fetch_slots(pool, &application_id).await?;
        let decision = fetch_decision(pool, &application_id).await?;
        let note_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM interview_notes WHERE application_id = ?")
                .bind(&application_id)
                .fetch_one(pool)
                .await?;

        records.push(HiringRecord {
            application_id,
            applicant_id,
            applicant_name,
            position_title,
            chapter_name,
            requires_interview: requires_interview != 0,
            submitted_at: parse_timestamp_opt(submitted_at.as_deref()),
            slots,
            decision,
            note_count,
        });
    }

    Ok(records)
}

async fn fetch_slots(pool: &SqlitePool, application_id: &str) -> Result<Vec<SlotRecord>> {
    let rows: Vec<(String, Option<String>)> = sqlx::query_as(
        "SELECT status, scheduled_at FROM interview_slots WHERE application_id = ? ORDER BY scheduled_at",
    )
    .bind(application_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(status, scheduled_at)| match SlotStatus::parse(&status) {
            Some(status) => Some(SlotRecord {
                status,
                scheduled_at: parse_timestamp_opt(scheduled_at.as_deref()),
            }),
            None => {
                warn!(
                    "Skipping interview slot with unknown status '{}' (application {})",
                    status, application_id
                );
                None
            }
        })
        .collect())
}

async fn fetch_decision(pool: &SqlitePool, application_id: &str) -> Result<Option<DecisionRecord>> {
    let row: Option<(String, Option<String>)> =
        sqlx::query_as("SELECT outcome, decided_at FROM decisions WHERE application_id = ?")
            .bind(application_id)
            .fetch_optional(pool)
            .await?;

    Ok(row.map(|(outcome, decided_at)| DecisionRecord {
        outcome,
        decided_at: parse_timestamp_opt(decided_at.as_deref()),
    }))
}
