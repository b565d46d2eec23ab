//! Normalized interview task representation
//!
//! One `InterviewTask` stands for one interview obligation regardless of
//! which workflow it came from. The hiring and readiness builders each map
//! their own source records into this shape; everything downstream (sort,
//! filter, sections) only sees this type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Originating workflow of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskDomain {
    Hiring,
    Readiness,
}

/// Normalized lifecycle state. Every task has exactly one stage, and the
/// stage alone decides which output section the task lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStage {
    NeedsAction,
    Scheduled,
    Completed,
    Blocked,
}

impl TaskStage {
    /// Sort rank: action-requiring items surface first
    pub fn rank(&self) -> u8 {
        match self {
            Self::NeedsAction => 0,
            Self::Blocked => 1,
            Self::Scheduled => 2,
            Self::Completed => 3,
        }
    }
}

/// Whether the task belongs to the viewer personally or to a team view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Mine,
    Team,
}

/// Role lens the task was built under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerRole {
    Applicant,
    Reviewer,
    Instructor,
}

/// One interview obligation, normalized across workflows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewTask {
    /// Underlying record id; `virtual-<instructorId>` for instructors whose
    /// readiness workflow has no gate row yet
    pub id: String,
    pub domain: TaskDomain,
    pub stage: TaskStage,
    pub audience: Audience,
    pub viewer_role: ViewerRole,
    /// Applicant or instructor name
    pub person_name: String,
    /// Position title (hiring tasks only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_title: Option<String>,
    pub chapter_name: String,
    /// Interview notes recorded so far (hiring tasks; zero for readiness)
    pub note_count: i64,
    pub submitted_at: Option<DateTime<Utc>>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl InterviewTask {
    /// Recency key for ordering within a stage rank: the most recent of the
    /// three timestamps. Tasks with no timestamp at all sort last.
    pub fn sort_timestamp(&self) -> Option<DateTime<Utc>> {
        [self.scheduled_at, self.submitted_at, self.completed_at]
            .into_iter()
            .flatten()
            .max()
    }
}
