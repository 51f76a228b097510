use serde::Serialize;

pub const DEFAULT_PRIORITY: i32 = 0;
pub const DEFAULT_MAX_SPLITS: u32 = 2;

/// A unit of work to assign to a resource.
///
/// Durations are whole business days; fractional input durations are rounded
/// up at construction. `max_splits` bounds how many parallel parts the task
/// may be divided into.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub duration: i64,
    pub priority: i32,
    pub max_splits: u32,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        duration: f64,
        priority: i32,
        max_splits: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration: duration.ceil() as i64,
            priority,
            max_splits,
        }
    }

    /// Divide the task into `count` independent parts that can run in
    /// parallel on different resources.
    ///
    /// Parts are nearly equal and sum to the original duration: the first
    /// `duration % count` parts get the larger share. Zero-length parts are
    /// discarded, so fewer than `count` parts come back when `count` exceeds
    /// the duration. Counts outside `(1, max_splits]` leave the task whole.
    pub fn split(&self, count: u32) -> Vec<Task> {
        if count <= 1 || count > self.max_splits {
            return vec![self.clone()];
        }
        let count = count as i64;
        let durations: Vec<i64> = (0..count)
            .map(|part| {
                self.duration / count + if part < self.duration % count { 1 } else { 0 }
            })
            .filter(|days| *days > 0)
            .collect();
        let total = durations.len();
        durations
            .into_iter()
            .enumerate()
            .map(|(index, duration)| Task {
                id: self.id.clone(),
                title: format!("{} ({}/{})", self.title, index + 1, total),
                duration,
                priority: self.priority,
                max_splits: self.max_splits,
            })
            .collect()
    }
}
