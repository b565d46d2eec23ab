//! Filter normalization
//!
//! Raw `scope`/`view`/`state` query inputs are untrusted strings. Each one
//! is validated by its own small pure function against an enumerated
//! allow-list; malformed or missing values fall back to a safe default and
//! never produce an error. Capability narrowing runs before input parsing,
//! so a viewer can never select a scope or view their roles do not permit.

use serde::{Deserialize, Serialize};

use super::capabilities::ViewerCapabilities;
use super::task::TaskStage;

/// Which task domain(s) a query should include
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskScope {
    All,
    Hiring,
    Readiness,
}

impl TaskScope {
    pub fn includes_hiring(&self) -> bool {
        matches!(self, Self::All | Self::Hiring)
    }

    pub fn includes_readiness(&self) -> bool {
        matches!(self, Self::All | Self::Readiness)
    }
}

/// Personal tasks vs everything the reviewer oversees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskView {
    Mine,
    Team,
}

/// Lifecycle-state filter applied after sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateFilter {
    All,
    NeedsAction,
    Scheduled,
    Completed,
    Blocked,
}

impl StateFilter {
    /// Whether a task with the given stage passes this filter
    pub fn admits(&self, stage: TaskStage) -> bool {
        match self {
            Self::All => true,
            Self::NeedsAction => stage == TaskStage::NeedsAction,
            Self::Scheduled => stage == TaskStage::Scheduled,
            Self::Completed => stage == TaskStage::Completed,
            Self::Blocked => stage == TaskStage::Blocked,
        }
    }
}

/// Validate the requested scope against the viewer's capabilities.
///
/// A viewer lacking one domain is pinned to the other regardless of input;
/// only a viewer with both capabilities gets a choice.
pub fn normalize_scope(raw: Option<&str>, caps: &ViewerCapabilities) -> TaskScope {
    if !caps.can_readiness {
        return TaskScope::Hiring;
    }
    if !caps.can_hiring {
        return TaskScope::Readiness;
    }

    match raw {
        Some("all") => TaskScope::All,
        Some("hiring") => TaskScope::Hiring,
        Some("readiness") => TaskScope::Readiness,
        _ => TaskScope::All,
    }
}

/// Validate the requested view; non-reviewers are pinned to "mine"
pub fn normalize_view(raw: Option<&str>, caps: &ViewerCapabilities) -> TaskView {
    if !caps.can_team_view {
        return TaskView::Mine;
    }

    match raw {
        Some("mine") => TaskView::Mine,
        Some("team") => TaskView::Team,
        _ => TaskView::Team,
    }
}

/// Validate the requested state filter; unrecognized input means "all"
pub fn normalize_state(raw: Option<&str>) -> StateFilter {
    match raw.map(|s| s.to_ascii_lowercase()).as_deref() {
        Some("needs_action") => StateFilter::NeedsAction,
        Some("scheduled") => StateFilter::Scheduled,
        Some("completed") => StateFilter::Completed,
        Some("blocked") => StateFilter::Blocked,
        _ => StateFilter::All,
    }
}

/// The validated, normalized request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewHubFilters {
    pub scope: TaskScope,
    pub view: TaskView,
    pub state: StateFilter,
}

impl InterviewHubFilters {
    pub fn normalize(
        scope: Option<&str>,
        view: Option<&str>,
        state: Option<&str>,
        caps: &ViewerCapabilities,
    ) -> Self {
        Self {
            scope: normalize_scope(scope, caps),
            view: normalize_view(view, caps),
            state: normalize_state(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviewer() -> ViewerCapabilities {
        ViewerCapabilities::from_roles(&["ADMIN"])
    }

    fn applicant() -> ViewerCapabilities {
        ViewerCapabilities::from_roles(&["APPLICANT"])
    }

    fn instructor() -> ViewerCapabilities {
        ViewerCapabilities::from_roles(&["INSTRUCTOR"])
    }

    #[test]
    fn test_scope_passthrough_with_full_capability() {
        let caps = reviewer();
        assert_eq!(normalize_scope(Some("hiring"), &caps), TaskScope::Hiring);
        assert_eq!(normalize_scope(Some("readiness"), &caps), TaskScope::Readiness);
        assert_eq!(normalize_scope(Some("all"), &caps), TaskScope::All);
    }

    #[test]
    fn test_scope_defaults_to_all() {
        let caps = reviewer();
        assert_eq!(normalize_scope(None, &caps), TaskScope::All);
        assert_eq!(normalize_scope(Some("bogus"), &caps), TaskScope::All);
    }

    #[test]
    fn test_scope_narrowed_without_readiness_capability() {
        let caps = applicant();
        assert_eq!(normalize_scope(Some("readiness"), &caps), TaskScope::Hiring);
        assert_eq!(normalize_scope(Some("all"), &caps), TaskScope::Hiring);
        assert_eq!(normalize_scope(None, &caps), TaskScope::Hiring);
    }

    #[test]
    fn test_scope_narrowed_without_hiring_capability() {
        let caps = instructor();
        assert_eq!(normalize_scope(Some("hiring"), &caps), TaskScope::Readiness);
        assert_eq!(normalize_scope(Some("all"), &caps), TaskScope::Readiness);
    }

    #[test]
    fn test_scope_fallback_with_no_capability_at_all() {
        let caps = ViewerCapabilities::from_roles(&["MENTOR"]);
        assert_eq!(normalize_scope(Some("all"), &caps), TaskScope::Hiring);
    }

    #[test]
    fn test_view_pinned_to_mine_for_non_reviewers() {
        let caps = applicant();
        assert_eq!(normalize_view(Some("team"), &caps), TaskView::Mine);
        assert_eq!(normalize_view(None, &caps), TaskView::Mine);
    }

    #[test]
    fn test_view_defaults_to_team_for_reviewers() {
        let caps = reviewer();
        assert_eq!(normalize_view(None, &caps), TaskView::Team);
        assert_eq!(normalize_view(Some("bogus"), &caps), TaskView::Team);
        assert_eq!(normalize_view(Some("mine"), &caps), TaskView::Mine);
    }

    #[test]
    fn test_state_parses_known_tokens() {
        assert_eq!(normalize_state(Some("needs_action")), StateFilter::NeedsAction);
        assert_eq!(normalize_state(Some("scheduled")), StateFilter::Scheduled);
        assert_eq!(normalize_state(Some("completed")), StateFilter::Completed);
        assert_eq!(normalize_state(Some("blocked")), StateFilter::Blocked);
        assert_eq!(normalize_state(Some("all")), StateFilter::All);
    }

    #[test]
    fn test_state_is_case_insensitive() {
        assert_eq!(normalize_state(Some("SCHEDULED")), StateFilter::Scheduled);
        assert_eq!(normalize_state(Some("Needs_Action")), StateFilter::NeedsAction);
    }

    #[test]
    fn test_state_unknown_token_behaves_like_omitted() {
        assert_eq!(normalize_state(Some("not-a-real-state")), normalize_state(None));
        assert_eq!(normalize_state(Some("not-a-real-state")), StateFilter::All);
    }

    #[test]
    fn test_state_filter_admits() {
        assert!(StateFilter::All.admits(TaskStage::Blocked));
        assert!(StateFilter::Scheduled.admits(TaskStage::Scheduled));
        assert!(!StateFilter::Scheduled.admits(TaskStage::Completed));
    }

    #[test]
    fn test_normalize_bundles_all_three() {
        let caps = reviewer();
        let filters =
            InterviewHubFilters::normalize(Some("hiring"), Some("mine"), Some("blocked"), &caps);
        assert_eq!(filters.scope, TaskScope::Hiring);
        assert_eq!(filters.view, TaskView::Mine);
        assert_eq!(filters.state, StateFilter::Blocked);
    }
}
