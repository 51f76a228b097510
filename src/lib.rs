pub mod calendar;
pub mod project;
pub mod report;
pub mod resource;
pub mod task;
pub mod workplan;

pub use calendar::{CalendarError, DayInfo, MonthSpan, WorkCalendar, month_spans};
pub use project::{Project, ProjectConfig, ProjectError, TaskSortKey};
pub use report::WorkPlanReport;
pub use resource::Resource;
pub use task::Task;
pub use workplan::{Assignment, SplitDirective, WorkPlan, build_workplan};
