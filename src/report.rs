use crate::workplan::{AssignedTask, Assignment, WorkPlan};
use chrono::NaiveDate;
use serde::Serialize;

/// The work-plan record consumed by external renderers (text, HTML).
#[derive(Debug, Clone, Serialize)]
pub struct WorkPlanReport {
    pub project: ProjectReport,
    pub resources: Vec<ResourceReport>,
    pub tasks: Vec<TaskReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectReport {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration: i64,
    pub holidays_region: Option<String>,
    /// Holidays falling between the plan start and end dates.
    pub holidays: Vec<NaiveDate>,
    pub average_utilization: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceReport {
    pub id: String,
    pub name: String,
    pub assigned: Vec<Assignment>,
    pub assigned_tasks: Vec<AssignedTask>,
    pub duration: i64,
    pub end: Option<NaiveDate>,
    pub utilization: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskReport {
    pub id: String,
    pub title: String,
    pub duration: i64,
    pub priority: i32,
    pub max_splits: u32,
}

impl WorkPlanReport {
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl WorkPlan {
    /// Snapshot the plan into the serializable report record.
    pub fn report(&self) -> WorkPlanReport {
        let project = self.project();
        let start = project.start_date;
        let end = self.end_date();
        WorkPlanReport {
            project: ProjectReport {
                name: project.name.clone(),
                start,
                end,
                duration: self.total_duration(),
                holidays_region: project.holiday_region.clone(),
                holidays: project.calendar.holidays_in_range(start, end),
                average_utilization: self.average_utilization_pct(),
            },
            resources: self
                .resources()
                .iter()
                .map(|resource| ResourceReport {
                    id: resource.resource.id.clone(),
                    name: resource.resource.name.clone(),
                    assigned: resource.assigned.clone(),
                    assigned_tasks: resource.assigned_tasks.clone(),
                    duration: resource.total_days,
                    end: resource.end_date,
                    utilization: resource.utilization_pct,
                })
                .collect(),
            tasks: self
                .tasks()
                .iter()
                .map(|task| TaskReport {
                    id: task.task.id.clone(),
                    title: task.task.title.clone(),
                    duration: task.task.duration,
                    priority: task.task.priority,
                    max_splits: task.task.max_splits,
                })
                .collect(),
        }
    }
}
