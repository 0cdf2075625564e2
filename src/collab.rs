//! Collaboration actions from the task detail screen.
//!
//! Each action builds a [`TaskPatch`] from a current task snapshot; the
//! screen writes it back through `TaskStore::update_task` as a single
//! update, which keeps the audit log at one entry per user action.

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{new_id, Comment, Partner, Subtask, Task, UserIdentity};
use crate::patch::TaskPatch;

static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@[\w-]+").unwrap());

/// `@name` tokens in `text`, `@` stripped, in order of appearance.
pub fn extract_mentions(text: &str) -> Vec<String> {
    MENTION_RE
        .find_iter(text)
        .map(|m| m.as_str()[1..].to_string())
        .collect()
}

/// Flip one partner's completion flag and recompute the task's completion
/// percentage as `round(100 × completed ÷ total)` over the updated list.
///
/// Both fields go back in one patch so the log shows a single entry per
/// toggle. An empty partner list yields 0.
pub fn partner_progress(task: &Task, partner_id: &str, is_complete: bool) -> TaskPatch {
    let partners: Vec<Partner> = task
        .partners
        .iter()
        .cloned()
        .map(|mut p| {
            if p.id == partner_id {
                p.is_complete = Some(is_complete);
            }
            p
        })
        .collect();

    let total = partners.len();
    let completed = partners.iter().filter(|p| p.is_done()).count();
    let completion_percentage = if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as u8
    };

    TaskPatch {
        partners: Some(partners),
        completion_percentage: Some(completion_percentage),
        ..Default::default()
    }
}

/// Append a comment authored by `author`, with mentions extracted from
/// `text`. Empty-text rejection is the screen's job, not done here.
pub fn add_comment(task: &Task, author: &UserIdentity, text: &str) -> TaskPatch {
    let mut comments = task.comments.clone().unwrap_or_default();
    comments.push(Comment {
        id: new_id(),
        user_id: author.id.clone(),
        user_name: author.name.clone(),
        text: text.to_string(),
        timestamp: Utc::now(),
        mentions: extract_mentions(text),
    });
    TaskPatch {
        comments: Some(comments),
        ..Default::default()
    }
}

/// Append a new incomplete subtask titled `title`.
pub fn add_subtask(task: &Task, title: &str) -> TaskPatch {
    let mut subtasks = task.subtasks.clone().unwrap_or_default();
    subtasks.push(Subtask {
        id: new_id(),
        title: title.to_string(),
        is_complete: false,
    });
    TaskPatch {
        subtasks: Some(subtasks),
        ..Default::default()
    }
}

/// Flip one subtask's completion flag. An unknown id rewrites the list
/// unchanged, matching the screen's map-over-list behavior.
pub fn toggle_subtask(task: &Task, subtask_id: &str) -> TaskPatch {
    let subtasks: Vec<Subtask> = task
        .subtasks
        .clone()
        .unwrap_or_default()
        .into_iter()
        .map(|mut st| {
            if st.id == subtask_id {
                st.is_complete = !st.is_complete;
            }
            st
        })
        .collect();
    TaskPatch {
        subtasks: Some(subtasks),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModificationAction, ModificationEntry, Priority};

    fn make_task_with_partners(names: &[&str]) -> Task {
        let now = Utc::now();
        let actor = UserIdentity::current_user();
        Task {
            id: new_id(),
            title: "Shared task".to_string(),
            description: None,
            start_date: now,
            end_date: now,
            priority: Priority::Medium,
            partners: names
                .iter()
                .map(|n| Partner {
                    id: n.to_lowercase(),
                    name: n.to_string(),
                    color: "#45B7D1".to_string(),
                    is_complete: None,
                })
                .collect(),
            completion_percentage: 0,
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
    fn test_extract_mentions() {
        assert_eq!(
            extract_mentions("ping @ada and @grace-h about this"),
            vec!["ada", "grace-h"]
        );
        assert!(extract_mentions("no mentions here").is_empty());
    }

    #[test]
    fn test_partner_progress_one_of_four() {
        let task = make_task_with_partners(&["Ada", "Grace", "Edsger", "Barbara"]);
        let patch = partner_progress(&task, "ada", true);

        assert_eq!(patch.completion_percentage, Some(25));
        let partners = patch.partners.unwrap();
        assert_eq!(partners.iter().filter(|p| p.is_done()).count(), 1);
    }

    #[test]
    fn test_partner_progress_untoggle() {
        let mut task = make_task_with_partners(&["Ada", "Grace"]);
        task.partners[0].is_complete = Some(true);
        task.partners[1].is_complete = Some(true);

        let patch = partner_progress(&task, "grace", false);
        assert_eq!(patch.completion_percentage, Some(50));
    }

    #[test]
    fn test_partner_progress_rounds_to_nearest() {
        // 2 of 3 complete → round(66.67) = 67.
        let mut task = make_task_with_partners(&["Ada", "Grace", "Edsger"]);
        task.partners[0].is_complete = Some(true);
        let patch = partner_progress(&task, "grace", true);
        assert_eq!(patch.completion_percentage, Some(67));
    }

    #[test]
    fn test_partner_progress_no_partners() {
        let task = make_task_with_partners(&[]);
        let patch = partner_progress(&task, "nobody", true);
        assert_eq!(patch.completion_percentage, Some(0));
        assert_eq!(patch.partners, Some(vec![]));
    }

    #[test]
    fn test_add_comment_extracts_mentions() {
        let task = make_task_with_partners(&["Ada"]);
        let author = UserIdentity::current_user();
        let patch = add_comment(&task, &author, "looks good @ada");

        let comments = patch.comments.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "looks good @ada");
        assert_eq!(comments[0].mentions, vec!["ada"]);
        assert_eq!(comments[0].user_id, "current-user");
    }

    #[test]
    fn test_add_and_toggle_subtask() {
        let task = make_task_with_partners(&[]);
        let patch = add_subtask(&task, "outline");
        let subtasks = patch.subtasks.clone().unwrap();
        assert_eq!(subtasks.len(), 1);
        assert!(!subtasks[0].is_complete);

        let mut task = task;
        task.subtasks = Some(subtasks.clone());
        let toggled = toggle_subtask(&task, &subtasks[0].id);
        assert!(toggled.subtasks.unwrap()[0].is_complete);
    }

    #[test]
    fn test_toggle_unknown_subtask_leaves_list_unchanged() {
        let mut task = make_task_with_partners(&[]);
        task.subtasks = Some(vec![Subtask {
            id: "st-1".to_string(),
            title: "outline".to_string(),
            is_complete: false,
        }]);
        let patch = toggle_subtask(&task, "st-404");
        assert_eq!(patch.subtasks, task.subtasks);
    }
}
