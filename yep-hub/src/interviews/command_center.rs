//! Interview command center aggregation
//!
//! Collects interview obligations from the hiring and readiness workflows,
//! normalizes them into `InterviewTask`s, and produces one sorted, filtered,
//! bucketed result. Stateless: each call recomputes the view from the
//! current store contents, so identical calls against unchanged data return
//! identical output.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db;
use yep_common::db::models::UserRecord;
use yep_common::{time, Error, Result};

use super::capabilities::ViewerCapabilities;
use super::filters::{InterviewHubFilters, StateFilter, TaskScope, TaskView};
use super::hiring::{build_hiring_task, HiringPolicy, HiringRecord};
use super::readiness::{build_readiness_task, ReadinessSource};
use super::task::{InterviewTask, TaskStage};

/// The raw aggregation request, scope/view/state still unvalidated
#[derive(Debug, Clone)]
pub struct CommandCenterRequest {
    pub user_id: String,
    pub roles: Vec<String>,
    pub scope: Option<String>,
    pub view: Option<String>,
    pub state: Option<String>,
}

/// Echo of the resolved viewer identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerContext {
    pub user_id: String,
    pub chapter_id: Option<String>,
    pub roles: Vec<String>,
    pub can_team_view: bool,
}

/// Tasks partitioned by stage, preserving sort order within each section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskSections {
    pub needs_action: Vec<InterviewTask>,
    pub scheduled: Vec<InterviewTask>,
    pub completed: Vec<InterviewTask>,
    pub blocked: Vec<InterviewTask>,
}

/// Full aggregation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandCenterData {
    pub filters: InterviewHubFilters,
    pub tasks: Vec<InterviewTask>,
    pub sections: TaskSections,
    pub viewer: ViewerContext,
}

/// Sort, filter, and bucket the merged task list.
///
/// Sort key: stage rank ascending (action first), then most recent activity
/// first; tasks with no timestamp sort last within their rank. The state
/// filter is applied after sorting, and the sections are a stable partition
/// of the surviving list.
pub fn assemble(mut tasks: Vec<InterviewTask>, state: StateFilter) -> (Vec<InterviewTask>, TaskSections) {
    tasks.sort_by(|a, b| {
        a.stage
            .rank()
            .cmp(&b.stage.rank())
            .then_with(|| match (a.sort_timestamp(), b.sort_timestamp()) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
    });

    tasks.retain(|t| state.admits(t.stage));

    let mut sections = TaskSections::default();
    for task in &tasks {
        match task.stage {
            TaskStage::NeedsAction => sections.needs_action.push(task.clone()),
            TaskStage::Scheduled => sections.scheduled.push(task.clone()),
            TaskStage::Completed => sections.completed.push(task.clone()),
            TaskStage::Blocked => sections.blocked.push(task.clone()),
        }
    }

    (tasks, sections)
}

/// Resolve the viewer, query both workflows, and assemble the result.
///
/// The only hard failure is an acting user id that does not resolve; every
/// other anomalous input degrades to a default instead of erroring.
pub async fn command_center_data(
    pool: &SqlitePool,
    request: CommandCenterRequest,
    policy: &HiringPolicy,
) -> Result<CommandCenterData> {
    let viewer = db::find_user(pool, &request.user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    let caps = ViewerCapabilities::from_roles(&request.roles);
    let filters = InterviewHubFilters::normalize(
        request.scope.as_deref(),
        request.view.as_deref(),
        request.state.as_deref(),
        &caps,
    );

    let now = time::now();

    // The two workflow queries are independent; run them concurrently and
    // merge once both are in.
    let (hiring, readiness) = tokio::join!(
        hiring_in_scope(pool, filters.scope, filters.view, &caps, &viewer),
        readiness_in_scope(pool, filters.scope, filters.view, &caps, &viewer),
    );
    let hiring = hiring?;
    let readiness = readiness?;

    let mut tasks: Vec<InterviewTask> = hiring
        .iter()
        .map(|record| build_hiring_task(record, filters.view, policy, now))
        .collect();
    tasks.extend(
        readiness
            .iter()
            .map(|source| build_readiness_task(source, filters.view, now)),
    );

    let (tasks, sections) = assemble(tasks, filters.state);

    Ok(CommandCenterData {
        filters,
        tasks,
        sections,
        viewer: ViewerContext {
            user_id: viewer.guid,
            chapter_id: viewer.chapter_id,
            roles: request.roles,
            can_team_view: caps.can_team_view,
        },
    })
}

async fn hiring_in_scope(
    pool: &SqlitePool,
    scope: TaskScope,
    view: TaskView,
    caps: &ViewerCapabilities,
    viewer: &UserRecord,
) -> Result<Vec<HiringRecord>> {
    if !scope.includes_hiring() {
        return Ok(Vec::new());
    }
    db::hiring::fetch_hiring(pool, view, caps, viewer).await
}

async fn readiness_in_scope(
    pool: &SqlitePool,
    scope: TaskScope,
    view: TaskView,
    caps: &ViewerCapabilities,
    viewer: &UserRecord,
) -> Result<Vec<ReadinessSource>> {
    if !scope.includes_readiness() {
        return Ok(Vec::new());
    }
    db::readiness::fetch_readiness(pool, view, caps, viewer).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interviews::task::{Audience, TaskDomain, ViewerRole};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, day, hour, 0, 0).unwrap()
    }

    fn task(id: &str, stage: TaskStage, submitted: Option<DateTime<Utc>>) -> InterviewTask {
        InterviewTask {
            id: id.to_string(),
            domain: TaskDomain::Hiring,
            stage,
            audience: Audience::Team,
            viewer_role: ViewerRole::Reviewer,
            person_name: "Person".to_string(),
            position_title: None,
            chapter_name: "Global".to_string(),
            note_count: 0,
            submitted_at: submitted,
            scheduled_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn test_sort_stage_rank_first() {
        let tasks = vec![
            task("done", TaskStage::Completed, Some(at(20, 9))),
            task("sched", TaskStage::Scheduled, Some(at(19, 9))),
            task("act", TaskStage::NeedsAction, Some(at(1, 9))),
            task("blocked", TaskStage::Blocked, Some(at(18, 9))),
        ];

        let (sorted, _) = assemble(tasks, StateFilter::All);
        let ids: Vec<&str> = sorted.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["act", "blocked", "sched", "done"]);
    }

    #[test]
    fn test_sort_recency_breaks_ties() {
        let tasks = vec![
            task("older", TaskStage::NeedsAction, Some(at(2, 9))),
            task("newer", TaskStage::NeedsAction, Some(at(9, 9))),
            task("undated", TaskStage::NeedsAction, None),
        ];

        let (sorted, _) = assemble(tasks, StateFilter::All);
        let ids: Vec<&str> = sorted.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["newer", "older", "undated"]);
    }

    #[test]
    fn test_sort_invariant_over_mixed_list() {
        let tasks = vec![
            task("a", TaskStage::Completed, None),
            task("b", TaskStage::NeedsAction, Some(at(3, 9))),
            task("c", TaskStage::Blocked, Some(at(7, 9))),
            task("d", TaskStage::NeedsAction, None),
            task("e", TaskStage::Scheduled, Some(at(5, 9))),
            task("f", TaskStage::Completed, Some(at(6, 9))),
        ];

        let (sorted, _) = assemble(tasks, StateFilter::All);
        for pair in sorted.windows(2) {
            let (first, second) = (&pair[0], &pair[1]);
            let rank_ok = first.stage.rank() < second.stage.rank();
            let tie_ok = first.stage.rank() == second.stage.rank()
                && match (first.sort_timestamp(), second.sort_timestamp()) {
                    (Some(x), Some(y)) => x >= y,
                    (None, Some(_)) => false,
                    _ => true,
                };
            assert!(rank_ok || tie_ok, "order violated at {} -> {}", first.id, second.id);
        }
    }

    #[test]
    fn test_sections_partition_the_task_list() {
        let tasks = vec![
            task("a", TaskStage::NeedsAction, Some(at(1, 9))),
            task("b", TaskStage::Scheduled, Some(at(2, 9))),
            task("c", TaskStage::Completed, Some(at(3, 9))),
            task("d", TaskStage::Blocked, Some(at(4, 9))),
            task("e", TaskStage::NeedsAction, None),
        ];

        let (sorted, sections) = assemble(tasks, StateFilter::All);

        let total = sections.needs_action.len()
            + sections.scheduled.len()
            + sections.completed.len()
            + sections.blocked.len();
        assert_eq!(total, sorted.len());

        // Every task appears in exactly the section its stage names
        for t in &sections.needs_action {
            assert_eq!(t.stage, TaskStage::NeedsAction);
        }
        for t in &sections.scheduled {
            assert_eq!(t.stage, TaskStage::Scheduled);
        }
        for t in &sections.completed {
            assert_eq!(t.stage, TaskStage::Completed);
        }
        for t in &sections.blocked {
            assert_eq!(t.stage, TaskStage::Blocked);
        }

        let mut partitioned: Vec<&InterviewTask> = sections
            .needs_action
            .iter()
            .chain(&sections.scheduled)
            .chain(&sections.completed)
            .chain(&sections.blocked)
            .collect();
        partitioned.sort_by(|a, b| a.id.cmp(&b.id));
        let mut flat: Vec<&InterviewTask> = sorted.iter().collect();
        flat.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(partitioned, flat);
    }

    #[test]
    fn test_state_filter_keeps_only_matching_stage() {
        let tasks = vec![
            task("a", TaskStage::NeedsAction, Some(at(1, 9))),
            task("b", TaskStage::Scheduled, Some(at(2, 9))),
            task("c", TaskStage::Completed, Some(at(3, 9))),
        ];

        let (filtered, sections) = assemble(tasks, StateFilter::Scheduled);
        assert_eq!(filtered.len(), 1);
        assert!(filtered.iter().all(|t| t.stage == TaskStage::Scheduled));
        assert!(sections.needs_action.is_empty());
        assert!(sections.completed.is_empty());
        assert!(sections.blocked.is_empty());
        assert_eq!(sections.scheduled.len(), 1);
    }

    #[test]
    fn test_assemble_empty_input() {
        let (tasks, sections) = assemble(Vec::new(), StateFilter::All);
        assert!(tasks.is_empty());
        assert_eq!(sections, TaskSections::default());
    }
}
