use crate::project::{Project, TaskSortKey};
use crate::resource::Resource;
use crate::task::Task;
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

/// Requested split counts, keyed by task id. Ids not present, and counts
/// outside `(1, max_splits]`, are ignored.
pub type SplitDirective = HashMap<String, u32>;

/// A contiguous block of days given to one resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub task_id: String,
    pub days: i64,
}

/// A task (or task part) carried out by a resource, in assignment order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignedTask {
    pub id: String,
    pub title: String,
}

/// A task of the working list, with the days not yet assigned.
#[derive(Debug, Clone)]
pub struct PlanTask {
    pub task: Task,
    pub remaining: i64,
}

/// A resource with its accumulated scheduling state.
#[derive(Debug, Clone)]
pub struct PlanResource {
    pub resource: Resource,
    pub assigned: Vec<Assignment>,
    pub assigned_tasks: Vec<AssignedTask>,
    pub total_days: i64,
    pub end_date: Option<NaiveDate>,
    pub utilization_pct: f64,
}

impl PlanResource {
    fn new(resource: Resource) -> Self {
        Self {
            resource,
            assigned: Vec::new(),
            assigned_tasks: Vec::new(),
            total_days: 0,
            end_date: None,
            utilization_pct: 0.0,
        }
    }
}

/// A resource-leveled schedule for one project snapshot.
///
/// Construction clones the project, applies the optional split directive,
/// runs the single greedy leveling pass to completion, and the plan is
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct WorkPlan {
    project: Project,
    tasks: Vec<PlanTask>,
    resources: Vec<PlanResource>,
    total_duration: i64,
    end_date: NaiveDate,
    remaining: i64,
    average_utilization_pct: f64,
}

impl WorkPlan {
    pub fn new(project: &Project) -> Self {
        Self::new_with_splits(project, &SplitDirective::new())
    }

    pub fn new_with_splits(project: &Project, splits: &SplitDirective) -> Self {
        let project = project.clone();
        let mut tasks: Vec<PlanTask> = Vec::new();
        for task in &project.tasks {
            let parts = match splits.get(&task.id) {
                Some(&count) => task.split(count),
                None => vec![task.clone()],
            };
            for part in parts {
                tasks.push(PlanTask {
                    remaining: part.duration,
                    task: part,
                });
            }
        }
        let resources = project
            .resources
            .iter()
            .map(|resource| PlanResource::new(resource.clone()))
            .collect();
        let remaining = tasks.iter().map(|task| task.remaining).sum();
        let mut plan = Self {
            end_date: project.start_date,
            project,
            tasks,
            resources,
            total_duration: 0,
            remaining,
            average_utilization_pct: 0.0,
        };
        plan.schedule();
        plan
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// The working task list, after splitting.
    pub fn tasks(&self) -> &[PlanTask] {
        &self.tasks
    }

    pub fn resources(&self) -> &[PlanResource] {
        &self.resources
    }

    /// The makespan: the largest accumulated day count across resources.
    pub fn total_duration(&self) -> i64 {
        self.total_duration
    }

    /// The latest resource end date.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Unassigned task days. Zero once scheduling has run.
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    pub fn average_utilization_pct(&self) -> f64 {
        self.average_utilization_pct
    }

    /// Task indices in greedy assignment order: priority first, then
    /// duration, both descending; ties keep the working-list order.
    fn scheduling_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.tasks.len()).collect();
        order.sort_by(|&a, &b| {
            let task_a = &self.tasks[a].task;
            let task_b = &self.tasks[b].task;
            task_b
                .priority
                .cmp(&task_a.priority)
                .then(task_b.duration.cmp(&task_a.duration))
        });
        order
    }

    /// The least-loaded resource. An idle resource wins immediately, in
    /// declaration order; among loaded resources the first one with the
    /// lowest accumulated days wins.
    fn best_resource_index(&self) -> usize {
        let mut best: Option<(usize, i64)> = None;
        for (index, resource) in self.resources.iter().enumerate() {
            if resource.total_days == 0 {
                return index;
            }
            match best {
                Some((_, lowest)) if resource.total_days >= lowest => {}
                _ => best = Some((index, resource.total_days)),
            }
        }
        best.map(|(index, _)| index).unwrap_or(0)
    }

    /// Give `days` of a task to a resource as one contiguous block.
    fn assign(&mut self, task_index: usize, resource_index: usize, days: i64) {
        let task = &mut self.tasks[task_index];
        let resource = &mut self.resources[resource_index];
        resource.assigned.push(Assignment {
            task_id: task.task.id.clone(),
            days,
        });
        resource.assigned_tasks.push(AssignedTask {
            id: task.task.id.clone(),
            title: task.task.title.clone(),
        });
        resource.total_days += days;
        if resource.total_days > self.total_duration {
            self.total_duration = resource.total_days;
        }
        task.remaining -= days;
        self.remaining -= days;
    }

    /// One deterministic pass of greedy resource leveling, then date and
    /// utilization accounting.
    fn schedule(&mut self) {
        for task_index in self.scheduling_order() {
            let days = self.tasks[task_index].remaining;
            let resource_index = self.best_resource_index();
            self.assign(task_index, resource_index, days);
        }

        let start = self.project.start_date;
        let mut usage_sum = 0.0;
        for index in 0..self.resources.len() {
            let total_days = self.resources[index].total_days;
            if total_days > 0 {
                let end = self
                    .project
                    .calendar
                    .add_business_days(start, total_days - 1);
                self.resources[index].end_date = Some(end);
                if end > self.end_date {
                    self.end_date = end;
                }
            }
            let utilization = (total_days * 100) as f64 / self.total_duration as f64;
            self.resources[index].utilization_pct = utilization;
            usage_sum += utilization;
        }
        self.average_utilization_pct = usage_sum / self.resources.len() as f64;
    }
}

/// Search for the split directive giving the smallest makespan.
///
/// The search is a widening prefix walk: tasks longer than one day are
/// ordered by duration descending, and for each prefix of that list a
/// candidate plan splits every task in the prefix into exactly two parts.
/// The first candidate strictly shorter than the unsplit baseline (and every
/// later strict improvement) wins, so the baseline is returned when no split
/// helps. Candidates are independent plans over the same project snapshot
/// and are evaluated in parallel, then compared in candidate order.
pub fn build_workplan(project: &Project) -> WorkPlan {
    let candidate_ids: Vec<String> = project
        .sorted_tasks(&[TaskSortKey::Duration], true)
        .into_iter()
        .filter(|task| task.duration > 1)
        .map(|task| task.id.clone())
        .collect();

    let candidates: Vec<WorkPlan> = (0..candidate_ids.len())
        .into_par_iter()
        .map(|index| {
            let splits: SplitDirective = candidate_ids[..=index]
                .iter()
                .map(|id| (id.clone(), 2))
                .collect();
            WorkPlan::new_with_splits(project, &splits)
        })
        .collect();

    let mut best = WorkPlan::new(project);
    for candidate in candidates {
        if candidate.total_duration < best.total_duration {
            best = candidate;
        }
    }
    best
}
