//! Readiness-domain queries: instructors and their certification gates

use sqlx::SqlitePool;
use tracing::warn;

use crate::interviews::capabilities::ViewerCapabilities;
use crate::interviews::filters::TaskView;
use crate::interviews::readiness::{GateRecord, ReadinessSource};
use crate::interviews::slots::SlotRecord;
use yep_common::db::models::{GateOutcome, GateStatus, SlotStatus, UserRecord};
use yep_common::time::parse_timestamp_opt;
use yep_common::Result;

const INSTRUCTORS_BASE: &str = "\
    SELECT u.guid, u.display_name, c.name
    FROM users u
    JOIN user_roles r ON r.user_guid = u.guid AND r.role = 'INSTRUCTOR'
    LEFT JOIN chapters c ON c.guid = u.chapter_id";

/// Fetch the readiness sources in scope for this view: one per instructor,
/// persisted when a gate row exists and virtual otherwise.
///
/// Mine = the viewer themselves (when they hold the instructor role).
/// Team = all instructors for admins, own-chapter instructors for chapter
/// leads.
pub async fn fetch_readiness(
    pool: &SqlitePool,
    view: TaskView,
    caps: &ViewerCapabilities,
    viewer: &UserRecord,
) -> Result<Vec<ReadinessSource>> {
    let instructors: Vec<(String, String, Option<String>)> = match view {
        TaskView::Mine => {
            let sql = format!("{INSTRUCTORS_BASE} WHERE u.guid = ?");
            sqlx::query_as(&sql).bind(&viewer.guid).fetch_all(pool).await?
        }
        TaskView::Team if caps.is_admin => {
            let sql = format!("{INSTRUCTORS_BASE} ORDER BY u.display_name");
            sqlx::query_as(&sql).fetch_all(pool).await?
        }
        TaskView::Team => {
            let sql = format!("{INSTRUCTORS_BASE} WHERE u.chapter_id = ? ORDER BY u.display_name");
            sqlx::query_as(&sql)
                .bind(&viewer.chapter_id)
                .fetch_all(pool)
                .await?
        }
    };

    let mut sources = Vec::with_capacity(instructors.len());
    for (instructor_id, instructor_name, chapter_name) in instructors {
        let gate: Option<(String, String, Option<String>, Option<String>, Option<String>)> =
            sqlx::query_as(
                "SELECT guid, status, outcome, created_at, completed_at
                 FROM readiness_gates WHERE instructor_id = ?",
            )
            .bind(&instructor_id)
            .fetch_optional(pool)
            .await?;

        let source = match gate {
            None => ReadinessSource::Virtual {
                instructor_id,
                instructor_name,
                chapter_name,
            },
            Some((gate_id, status_raw, outcome_raw, created_at, completed_at)) => {
                let status = GateStatus::parse(&status_raw).unwrap_or_else(|| {
                    warn!(
                        "Treating readiness gate {} with unknown status '{}' as REQUIRED",
                        gate_id, status_raw
                    );
                    GateStatus::Required
                });

                let outcome = outcome_raw.as_deref().and_then(|raw| {
                    let parsed = GateOutcome::parse(raw);
                    if parsed.is_none() {
                        warn!(
                            "Ignoring unknown outcome '{}' on readiness gate {}",
                            raw, gate_id
                        );
                    }
                    parsed
                });

                let slots = fetch_gate_slots(pool, &gate_id).await?;
                let pending_requests: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM availability_requests WHERE gate_id = ? AND status = 'PENDING'",
                )
                .bind(&gate_id)
                .fetch_one(pool)
                .await?;

                ReadinessSource::Persisted(GateRecord {
                    gate_id,
                    instructor_id,
                    instructor_name,
                    chapter_name,
                    status,
                    outcome,
                    created_at: parse_timestamp_opt(created_at.as_deref()),
                    completed_at: parse_timestamp_opt(completed_at.as_deref()),
                    slots,
                    pending_requests,
                })
            }
        };

        sources.push(source);
    }

    Ok(sources)
}

async fn fetch_gate_slots(pool: &SqlitePool, gate_id: &str) -> Result<Vec<SlotRecord>> {
    let rows: Vec<(String, Option<String>)> = sqlx::query_as(
        "SELECT status, scheduled_at FROM gate_slots WHERE gate_id = ? ORDER BY scheduled_at",
    )
    .bind(gate_id)
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
                    "Skipping gate slot with unknown status '{}' (gate {})",
                    status, gate_id
                );
                None
            }
        })
        .collect())
}
