//! Reports screen derivations: monthly completion, priority distribution,
//! and collaboration statistics.

use chrono::NaiveDate;
use serde::Serialize;

use super::calendar::month_days;
use crate::model::{Priority, Task};

/// Count of tasks per priority over the three fixed categories. Zero-task
/// categories are still present with count 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityDistribution {
    pub urgent: usize,
    pub medium: usize,
    pub normal: usize,
}

impl PriorityDistribution {
    pub fn of(tasks: &[Task]) -> Self {
        let mut dist = Self::default();
        for task in tasks {
            match task.priority {
                Priority::Urgent => dist.urgent += 1,
                Priority::Medium => dist.medium += 1,
                Priority::Normal => dist.normal += 1,
            }
        }
        dist
    }

    pub fn count(&self, priority: Priority) -> usize {
        match priority {
            Priority::Urgent => self.urgent,
            Priority::Medium => self.medium,
            Priority::Normal => self.normal,
        }
    }
}

/// The monthly overview the reports screen renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    /// Completed-task count ÷ total × 100. Display convention is one
    /// decimal place; 0 tasks yields 0.0.
    pub completion_rate: f64,
    pub priority_distribution: PriorityDistribution,
    /// Mean partner-list length per task; 0.0 for an empty store, never NaN.
    pub average_collaborators: f64,
    pub total_tasks: usize,
    /// `completion_percentage == 100` exactly.
    pub completed_tasks: usize,
    /// `completion_percentage < 100`.
    pub in_progress_tasks: usize,
    pub days_in_month: usize,
}

/// Completed means `completion_percentage == 100` exactly.
pub fn completion_rate(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let completed = tasks
        .iter()
        .filter(|t| t.completion_percentage == 100)
        .count();
    completed as f64 / tasks.len() as f64 * 100.0
}

/// Mean partner-list length. The denominator floors at 1 so an empty store
/// reports 0 rather than NaN.
pub fn average_collaborators(tasks: &[Task]) -> f64 {
    let total: usize = tasks.iter().map(|t| t.partners.len()).sum();
    total as f64 / tasks.len().max(1) as f64
}

/// Aggregate the monthly overview for the month containing `today`.
pub fn monthly_stats(tasks: &[Task], today: NaiveDate) -> MonthlyStats {
    let completed = tasks
        .iter()
        .filter(|t| t.completion_percentage == 100)
        .count();
    MonthlyStats {
        completion_rate: completion_rate(tasks),
        priority_distribution: PriorityDistribution::of(tasks),
        average_collaborators: average_collaborators(tasks),
        total_tasks: tasks.len(),
        completed_tasks: completed,
        in_progress_tasks: tasks.len() - completed,
        days_in_month: month_days(today).len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{new_id, ModificationAction, ModificationEntry, Partner, UserIdentity};
    use chrono::Utc;

    fn make_task(priority: Priority, pct: u8, partner_count: usize) -> Task {
        let now = Utc::now();
        let actor = UserIdentity::current_user();
        Task {
            id: new_id(),
            title: "t".to_string(),
            description: None,
            start_date: now,
            end_date: now,
            priority,
            partners: (0..partner_count)
                .map(|i| Partner {
                    id: format!("p{}", i),
                    name: format!("Partner {}", i),
                    color: "#96CEB4".to_string(),
                    is_complete: None,
                })
                .collect(),
            completion_percentage: pct,
            notes: None,
            attachments: None,
            subtasks: None,
            comments: None,
            created_at: now,
            updated_at: now,
            created_by: actor.id.clone(),
            modification_log: vec![ModificationEntry {
                timestamp: now,
                user_id: actor.id,
                user_name: actor.name,
                action: ModificationAction::Create,
                changes: vec![],
            }],
        }
    }

    #[test]
    fn test_completion_rate_empty_is_zero() {
        assert_eq!(completion_rate(&[]), 0.0);
    }

    #[test]
    fn test_completion_rate_one_of_three() {
        let tasks = vec![
            make_task(Priority::Normal, 100, 0),
            make_task(Priority::Normal, 50, 0),
            make_task(Priority::Normal, 0, 0),
        ];
        let rate = completion_rate(&tasks);
        // One decimal per display convention.
        assert_eq!((rate * 10.0).round() / 10.0, 33.3);
    }

    #[test]
    fn test_priority_distribution_reports_empty_categories() {
        let tasks = vec![
            make_task(Priority::Urgent, 0, 0),
            make_task(Priority::Urgent, 0, 0),
            make_task(Priority::Normal, 0, 0),
        ];
        let dist = PriorityDistribution::of(&tasks);
        assert_eq!(dist.urgent, 2);
        assert_eq!(dist.medium, 0);
        assert_eq!(dist.normal, 1);
        assert_eq!(dist.count(Priority::Medium), 0);
    }

    #[test]
    fn test_distribution_totals_across_all_categories() {
        let tasks = vec![
            make_task(Priority::Urgent, 0, 0),
            make_task(Priority::Normal, 0, 0),
        ];
        let dist = PriorityDistribution::of(&tasks);
        let total: usize = Priority::ALL.iter().map(|p| dist.count(*p)).sum();
        assert_eq!(total, tasks.len());
    }

    #[test]
    fn test_average_collaborators() {
        assert_eq!(average_collaborators(&[]), 0.0);
        let tasks = vec![
            make_task(Priority::Normal, 0, 3),
            make_task(Priority::Normal, 0, 1),
        ];
        assert_eq!(average_collaborators(&tasks), 2.0);
    }

    #[test]
    fn test_monthly_stats_summary_counts() {
        let tasks = vec![
            make_task(Priority::Urgent, 100, 2),
            make_task(Priority::Medium, 60, 1),
            make_task(Priority::Normal, 0, 0),
        ];
        let stats = monthly_stats(&tasks, chrono::NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.completed_tasks, 1);
        assert_eq!(stats.in_progress_tasks, 2);
        assert_eq!(stats.days_in_month, 28);
        assert_eq!(stats.average_collaborators, 1.0);
    }
}
