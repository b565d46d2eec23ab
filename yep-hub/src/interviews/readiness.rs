//! Readiness-domain task builder
//!
//! Maps one instructor readiness gate (or the absence of one) into an
//! `InterviewTask`. An instructor who is in scope but has no gate row yet
//! still surfaces as an actionable task through the `Virtual` variant, so a
//! missing record never becomes an invisible obligation.

use chrono::{DateTime, Utc};

use super::filters::TaskView;
use super::slots::{has_active_future_slot, relevant_slot_time, SlotRecord};
use super::task::{Audience, InterviewTask, TaskDomain, TaskStage, ViewerRole};
use yep_common::db::models::{GateOutcome, GateStatus};

/// One persisted readiness gate with its scheduling context
#[derive(Debug, Clone, PartialEq)]
pub struct GateRecord {
    pub gate_id: String,
    pub instructor_id: String,
    pub instructor_name: String,
    pub chapter_name: Option<String>,
    pub status: GateStatus,
    pub outcome: Option<GateOutcome>,
    pub created_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub slots: Vec<SlotRecord>,
    /// Availability requests still waiting on the scheduler
    pub pending_requests: i64,
}

/// Source of a readiness task: a real gate row, or a synthesized stand-in
/// for an instructor whose readiness workflow has not started.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadinessSource {
    Persisted(GateRecord),
    Virtual {
        instructor_id: String,
        instructor_name: String,
        chapter_name: Option<String>,
    },
}

fn chapter_label(chapter_name: Option<&str>) -> String {
    chapter_name
        .map(str::to_string)
        .unwrap_or_else(|| "No chapter".to_string())
}

/// Build the normalized task for one readiness source under the given view.
///
/// For persisted gates, first match wins:
/// 1. outcome recorded, or gate completed/waived -> COMPLETED
/// 2. live future slot -> SCHEDULED
/// 3. availability requested, nothing scheduled yet -> the instructor is
///    waiting on the scheduler (BLOCKED from their own view) while the
///    reviewer has scheduling to do (NEEDS_ACTION)
/// 4. otherwise -> NEEDS_ACTION for both audiences
pub fn build_readiness_task(
    source: &ReadinessSource,
    view: TaskView,
    now: DateTime<Utc>,
) -> InterviewTask {
    let (audience, viewer_role) = match view {
        TaskView::Team => (Audience::Team, ViewerRole::Reviewer),
        TaskView::Mine => (Audience::Mine, ViewerRole::Instructor),
    };

    match source {
        ReadinessSource::Virtual {
            instructor_id,
            instructor_name,
            chapter_name,
        } => InterviewTask {
            id: format!("virtual-{instructor_id}"),
            domain: TaskDomain::Readiness,
            stage: TaskStage::NeedsAction,
            audience,
            viewer_role,
            person_name: instructor_name.clone(),
            position_title: None,
            chapter_name: chapter_label(chapter_name.as_deref()),
            note_count: 0,
            submitted_at: None,
            scheduled_at: None,
            completed_at: None,
        },

        ReadinessSource::Persisted(gate) => {
            let stage = if gate.outcome.is_some() || gate.status.is_resolved() {
                TaskStage::Completed
            } else if has_active_future_slot(&gate.slots, now) {
                TaskStage::Scheduled
            } else if gate.pending_requests > 0 {
                match view {
                    TaskView::Mine => TaskStage::Blocked,
                    TaskView::Team => TaskStage::NeedsAction,
                }
            } else {
                TaskStage::NeedsAction
            };

            InterviewTask {
                id: gate.gate_id.clone(),
                domain: TaskDomain::Readiness,
                stage,
                audience,
                viewer_role,
                person_name: gate.instructor_name.clone(),
                position_title: None,
                chapter_name: chapter_label(gate.chapter_name.as_deref()),
                note_count: 0,
                submitted_at: gate.created_at,
                scheduled_at: relevant_slot_time(&gate.slots, now),
                completed_at: gate.completed_at,
            }
        }
    }
}
