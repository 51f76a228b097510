use crate::calendar::{CalendarError, WorkCalendar};
use crate::resource::Resource;
use crate::task::{DEFAULT_MAX_SPLITS, DEFAULT_PRIORITY, Task};
use chrono::{Datelike, Local, NaiveDate};
use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug)]
pub enum ProjectError {
    /// A required configuration key is absent.
    MissingField(String),
    NoResources,
    NoTasks,
    UnknownHolidayRegion(String),
    Parse(serde_json::Error),
}

impl fmt::Display for ProjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectError::MissingField(field) => write!(f, "missing field \"{field}\""),
            ProjectError::NoResources => write!(f, "at least one resource is required"),
            ProjectError::NoTasks => write!(f, "at least one task is required"),
            ProjectError::UnknownHolidayRegion(region) => {
                write!(f, "unknown holiday region \"{region}\"")
            }
            ProjectError::Parse(err) => write!(f, "invalid project configuration: {err}"),
        }
    }
}

impl std::error::Error for ProjectError {}

impl From<serde_json::Error> for ProjectError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<CalendarError> for ProjectError {
    fn from(value: CalendarError) -> Self {
        match value {
            CalendarError::UnknownRegion(region) => Self::UnknownHolidayRegion(region),
        }
    }
}

/// Input configuration record, as supplied by an external config loader.
/// Merging partial configuration sources is the loader's job, not ours.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    pub project: Option<ProjectSection>,
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
    #[serde(default)]
    pub tasks: Vec<TaskConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectSection {
    pub name: Option<String>,
    pub start: Option<NaiveDate>,
    /// Country code selecting the public-holiday calendar.
    pub holidays: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceConfig {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskConfig {
    pub id: Option<String>,
    pub title: Option<String>,
    pub duration: Option<f64>,
    pub priority: Option<i32>,
    pub max_resources: Option<u32>,
}

/// Sort keys accepted by [`Project::sorted_tasks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSortKey {
    Priority,
    Duration,
}

/// Validated scheduling input: a start date, a holiday calendar, and
/// non-empty resource and task lists. Immutable once constructed; work plans
/// clone it so candidate schedules never interfere.
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub start_date: NaiveDate,
    pub holiday_region: Option<String>,
    pub calendar: WorkCalendar,
    pub resources: Vec<Resource>,
    pub tasks: Vec<Task>,
}

impl Project {
    pub fn from_config(config: ProjectConfig) -> Result<Self, ProjectError> {
        let section = config
            .project
            .ok_or_else(|| ProjectError::MissingField("project".to_string()))?;
        let name = section
            .name
            .ok_or_else(|| ProjectError::MissingField("project.name".to_string()))?;
        let start = section
            .start
            .unwrap_or_else(|| Local::now().date_naive());

        let calendar = match &section.holidays {
            Some(region) => WorkCalendar::from_region(region, start.year())?,
            None => WorkCalendar::new(),
        };
        // A project can never start on a week-end or holiday.
        let start_date = if calendar.is_business_day(start) {
            start
        } else {
            calendar.add_business_days(start, 1)
        };

        let mut resources = Vec::with_capacity(config.resources.len());
        for resource in config.resources {
            let id = resource
                .id
                .ok_or_else(|| ProjectError::MissingField("resource.id".to_string()))?;
            let name = resource
                .name
                .ok_or_else(|| ProjectError::MissingField("resource.name".to_string()))?;
            resources.push(Resource::new(id, name));
        }
        if resources.is_empty() {
            return Err(ProjectError::NoResources);
        }

        let mut tasks = Vec::with_capacity(config.tasks.len());
        for task in config.tasks {
            let id = task
                .id
                .ok_or_else(|| ProjectError::MissingField("task.id".to_string()))?;
            let duration = task
                .duration
                .ok_or_else(|| ProjectError::MissingField("task.duration".to_string()))?;
            let title = task.title.unwrap_or_else(|| id.clone());
            let task = Task::new(
                id,
                title,
                duration,
                task.priority.unwrap_or(DEFAULT_PRIORITY),
                task.max_resources.unwrap_or(DEFAULT_MAX_SPLITS),
            );
            // Tasks without at least one whole day contribute nothing.
            if task.duration > 0 {
                tasks.push(task);
            }
        }
        if tasks.is_empty() {
            return Err(ProjectError::NoTasks);
        }

        Ok(Self {
            name,
            start_date,
            holiday_region: section.holidays,
            calendar,
            resources,
            tasks,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ProjectError> {
        let config: ProjectConfig = serde_json::from_str(json)?;
        Self::from_config(config)
    }

    /// Tasks ordered by the given keys, descending when `reverse` is set.
    /// The sort is stable: ties keep the declared task order, which seeds
    /// the greedy assignment order.
    pub fn sorted_tasks(&self, keys: &[TaskSortKey], reverse: bool) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().collect();
        tasks.sort_by(|a, b| {
            let mut order = Ordering::Equal;
            for key in keys {
                order = order.then_with(|| match key {
                    TaskSortKey::Priority => a.priority.cmp(&b.priority),
                    TaskSortKey::Duration => a.duration.cmp(&b.duration),
                });
            }
            if reverse { order.reverse() } else { order }
        });
        tasks
    }
}
