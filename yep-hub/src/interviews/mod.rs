//! Interview command center
//!
//! The aggregation core of the hub: capability resolution, filter
//! normalization, the two domain task builders, and the merge/sort/bucket
//! step that produces the unified task list.

pub mod capabilities;
pub mod command_center;
pub mod filters;
pub mod hiring;
pub mod readiness;
pub mod slots;
pub mod task;

pub use capabilities::ViewerCapabilities;
pub use command_center::{
    command_center_data, CommandCenterData, CommandCenterRequest, TaskSections, ViewerContext,
};
pub use filters::{InterviewHubFilters, StateFilter, TaskScope, TaskView};
pub use hiring::{HiringPolicy, HiringRecord};
pub use readiness::ReadinessSource;
pub use task::{InterviewTask, TaskDomain, TaskStage};
