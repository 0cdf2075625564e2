// patch.rs — Partial task updates with field-level audit deltas.
//
// updateTask accepts an arbitrary subset of fields. TaskPatch keeps that
// shape type-safe: one optional slot per updatable schema field, and applying
// a patch yields one FieldChange per populated slot for the modification log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Comment, FieldChange, Partner, Priority, Subtask, Task, TaskField};

/// A partial update over a task's editable fields. `None` slots are left
/// untouched. Optional task fields (description, notes, ...) can be set but
/// not cleared back to absent; the screens never clear them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partners: Option<Vec<Partner>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_percentage: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<Subtask>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
}

impl TaskPatch {
    /// Merge this patch into `task`, overwriting exactly the populated slots.
    ///
    /// Returns one delta per populated slot, in schema order, carrying the
    /// prior and new value. A delta is recorded even when the new value
    /// equals the old one — the log mirrors what the caller sent, not what
    /// effectively changed.
    pub fn apply(self, task: &mut Task) -> Vec<FieldChange> {
        let mut changes = Vec::new();

        if let Some(title) = self.title {
            changes.push(FieldChange::new(TaskField::Title, &task.title, &title));
            task.title = title;
        }
        if let Some(description) = self.description {
            let new = Some(description);
            changes.push(FieldChange::new(TaskField::Description, &task.description, &new));
            task.description = new;
        }
        if let Some(start_date) = self.start_date {
            changes.push(FieldChange::new(TaskField::StartDate, &task.start_date, &start_date));
            task.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            changes.push(FieldChange::new(TaskField::EndDate, &task.end_date, &end_date));
            task.end_date = end_date;
        }
        if let Some(priority) = self.priority {
            changes.push(FieldChange::new(TaskField::Priority, &task.priority, &priority));
            task.priority = priority;
        }
        if let Some(partners) = self.partners {
            changes.push(FieldChange::new(TaskField::Partners, &task.partners, &partners));
            task.partners = partners;
        }
        if let Some(pct) = self.completion_percentage {
            changes.push(FieldChange::new(
                TaskField::CompletionPercentage,
                &task.completion_percentage,
                &pct,
            ));
            task.completion_percentage = pct;
        }
        if let Some(notes) = self.notes {
            let new = Some(notes);
            changes.push(FieldChange::new(TaskField::Notes, &task.notes, &new));
            task.notes = new;
        }
        if let Some(attachments) = self.attachments {
            let new = Some(attachments);
            changes.push(FieldChange::new(TaskField::Attachments, &task.attachments, &new));
            task.attachments = new;
        }
        if let Some(subtasks) = self.subtasks {
            let new = Some(subtasks);
            changes.push(FieldChange::new(TaskField::Subtasks, &task.subtasks, &new));
            task.subtasks = new;
        }
        if let Some(comments) = self.comments {
            let new = Some(comments);
            changes.push(FieldChange::new(TaskField::Comments, &task.comments, &new));
            task.comments = new;
        }

        changes
    }
}
