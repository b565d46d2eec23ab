//! Hiring-domain task builder
//!
//! Maps one job-application record (with its interview slots, notes, and
//! final decision) into an `InterviewTask`. The mapping is a pure function;
//! the store layer assembles `HiringRecord` values and hands them in.

use chrono::{DateTime, Utc};

use super::filters::TaskView;
use super::slots::{has_active_future_slot, relevant_slot_time, SlotRecord};
use super::task::{Audience, InterviewTask, TaskDomain, TaskStage, ViewerRole};
use yep_common::db::models::SlotStatus;

/// Final decision recorded for an application
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionRecord {
    pub outcome: String,
    pub decided_at: Option<DateTime<Utc>>,
}

/// One application with everything the stage derivation needs
#[derive(Debug, Clone, PartialEq)]
pub struct HiringRecord {
    pub application_id: String,
    pub applicant_id: String,
    pub applicant_name: String,
    pub position_title: String,
    /// None for chapter-unscoped ("Global") positions
    pub chapter_name: Option<String>,
    pub requires_interview: bool,
    pub submitted_at: Option<DateTime<Utc>>,
    pub slots: Vec<SlotRecord>,
    pub decision: Option<DecisionRecord>,
    pub note_count: i64,
}

/// Stage shown to an applicant whose application is waiting on the other
/// party. Product treats this boundary as policy, not as a fixed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HiringPolicy {
    pub applicant_waiting_stage: TaskStage,
}

impl Default for HiringPolicy {
    fn default() -> Self {
        Self {
            applicant_waiting_stage: TaskStage::Blocked,
        }
    }
}

impl HiringPolicy {
    /// Parse the `hub_applicant_waiting_stage` setting value
    pub fn from_setting(raw: &str) -> Self {
        let applicant_waiting_stage = match raw {
            "needs_action" => TaskStage::NeedsAction,
            _ => TaskStage::Blocked,
        };
        Self {
            applicant_waiting_stage,
        }
    }
}

/// Build the normalized task for one application under the given view.
///
/// Stage derivation, first match wins:
/// 1. final decision exists -> COMPLETED
/// 2. any slot completed -> COMPLETED
/// 3. position interviews: live future slot -> SCHEDULED for reviewers;
///    applicants see CONFIRMED as SCHEDULED but a POSTED slot as
///    NEEDS_ACTION (it is theirs to confirm)
/// 4. otherwise the reviewer must move the application forward
///    (NEEDS_ACTION) while the applicant is waiting on the other party
///    (policy stage, BLOCKED by default)
pub fn build_hiring_task(
    record: &HiringRecord,
    view: TaskView,
    policy: &HiringPolicy,
    now: DateTime<Utc>,
) -> InterviewTask {
    let (audience, viewer_role) = match view {
        TaskView::Team => (Audience::Team, ViewerRole::Reviewer),
        TaskView::Mine => (Audience::Mine, ViewerRole::Applicant),
    };

    let completed_slot = record
        .slots
        .iter()
        .find(|s| s.status == SlotStatus::Completed);

    let (stage, completed_at) = if let Some(decision) = &record.decision {
        (TaskStage::Completed, decision.decided_at)
    } else if let Some(slot) = completed_slot {
        (TaskStage::Completed, slot.scheduled_at)
    } else if !record.requires_interview {
        // Nothing to schedule: the only step left is the decision
        let stage = match view {
            TaskView::Team => TaskStage::NeedsAction,
            TaskView::Mine => policy.applicant_waiting_stage,
        };
        (stage, None)
    } else {
        let stage = match view {
            TaskView::Team => {
                if has_active_future_slot(&record.slots, now) {
                    TaskStage::Scheduled
                } else {
                    TaskStage::NeedsAction
                }
            }
            TaskView::Mine => {
                let confirmed_future = record.slots.iter().any(|s| {
                    s.status == SlotStatus::Confirmed && s.scheduled_at.is_some_and(|t| t > now)
                });
                let posted_future = record.slots.iter().any(|s| {
                    s.status == SlotStatus::Posted && s.scheduled_at.is_some_and(|t| t > now)
                });

                if confirmed_future {
                    TaskStage::Scheduled
                } else if posted_future {
                    // A posted slot is waiting on the applicant to confirm
                    TaskStage::NeedsAction
                } else {
                    policy.applicant_waiting_stage
                }
            }
        };
        (stage, None)
    };

    InterviewTask {
        id: record.application_id.clone(),
        domain: TaskDomain::Hiring,
        stage,
        audience,
        viewer_role,
        person_name: record.applicant_name.clone(),
        position_title: Some(record.position_title.clone()),
        chapter_name: record
            .chapter_name
            .clone()
            .unwrap_or_else(|| "Global".to_string()),
        note_count: record.note_count,
        submitted_at: record.submitted_at,
        scheduled_at: relevant_slot_time(&record.slots, now),
        completed_at,
    }
}
