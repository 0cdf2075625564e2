//! Task list derivations: the status filter chips and overdue detection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Task;

/// The list screen's status filters, keyed by completion percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskFilter {
    All,
    InProgress,
    Completed,
    NotStarted,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Completed => task.completion_percentage == 100,
            TaskFilter::InProgress => {
                task.completion_percentage > 0 && task.completion_percentage < 100
            }
            TaskFilter::NotStarted => task.completion_percentage == 0,
        }
    }

    /// Filter a snapshot, preserving store order.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Overdue: the end date is strictly in the past and the task is not done.
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    task.end_date < now && task.completion_percentage < 100
}
