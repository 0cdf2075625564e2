//! Task data model types.
//!
//! Serialized shapes use camelCase field names, matching the JSON the
//! TaskFlow clients exchange (`startDate`, `isComplete`, ...).

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generate a new entity id (UUID v4). Used for tasks, subtasks, comments
/// and partners alike; ids are never shared or deduplicated across tasks.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// The local calendar day containing a stored UTC instant.
///
/// All day bucketing — the store's date query and the calendar's interval
/// membership — happens in the device's local timezone, matching how the
/// screens present dates.
pub fn local_day(ts: DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&Local).date_naive()
}

/// Task priority. Exactly these three categories; reports always cover all
/// three even when a count is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    Medium,
    Normal,
}

impl Priority {
    /// The fixed categories, in display order.
    pub const ALL: [Priority; 3] = [Priority::Urgent, Priority::Medium, Priority::Normal];
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(String::from))
            .unwrap_or_else(|| format!("{:?}", self));
        write!(f, "{}", s)
    }
}

/// A collaborator attached to a task, with an individual completion flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: String,
    pub name: String,
    /// Avatar color. Presentation-only; carried through untouched.
    pub color: String,
    /// Absent means not complete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_complete: Option<bool>,
}

impl Partner {
    pub fn is_done(&self) -> bool {
        self.is_complete.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    pub id: String,
    pub title: String,
    pub is_complete: bool,
}

/// A comment on a task. `mentions` holds the `@`-mention identifiers
/// extracted from `text` at creation time, `@` stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub mentions: Vec<String>,
}

/// The acting user attributed in modification log entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub name: String,
}

impl UserIdentity {
    /// The fixed placeholder identity until real accounts land.
    pub fn current_user() -> Self {
        Self {
            id: "current-user".to_string(),
            name: "Current User".to_string(),
        }
    }
}

/// The unit of trackable work: a time range, a priority, a collaborator set
/// and an append-only audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub priority: Priority,
    pub partners: Vec<Partner>,
    /// 0–100. Derived from partner flags on the partner-progress path, but
    /// otherwise free-standing — the store accepts whatever callers set.
    pub completion_percentage: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<Subtask>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    pub modification_log: Vec<ModificationEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModificationAction {
    Create,
    Update,
    Delete,
}

/// The updatable task schema fields, as recorded in audit deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskField {
    Title,
    Description,
    StartDate,
    EndDate,
    Priority,
    Partners,
    CompletionPercentage,
    Notes,
    Attachments,
    Subtasks,
    Comments,
}

impl std::fmt::Display for TaskField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(String::from))
            .unwrap_or_else(|| format!("{:?}", self));
        write!(f, "{}", s)
    }
}

/// One field-level delta inside an update log entry. Values are JSON
/// snapshots of the field before and after the merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    pub field: TaskField,
    pub old_value: Value,
    pub new_value: Value,
}

impl FieldChange {
    pub fn new<O: Serialize, N: Serialize>(field: TaskField, old: &O, new: &N) -> Self {
        Self {
            field,
            old_value: serde_json::to_value(old).unwrap_or(Value::Null),
            new_value: serde_json::to_value(new).unwrap_or(Value::Null),
        }
    }
}

/// A single immutable entry in a task's modification log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificationEntry {
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    pub user_name: String,
    pub action: ModificationAction,
    /// Empty for `create` entries; one delta per patched field for `update`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<FieldChange>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::Urgent).unwrap(), "\"urgent\"");
        assert_eq!(Priority::Normal.to_string(), "normal");
    }

    #[test]
    fn test_task_field_display_camel_case() {
        assert_eq!(TaskField::CompletionPercentage.to_string(), "completionPercentage");
        assert_eq!(TaskField::StartDate.to_string(), "startDate");
    }

    #[test]
    fn test_partner_completion_defaults_to_false() {
        let partner: Partner = serde_json::from_str(
            r##"{"id":"p1","name":"Ada","color":"#FF6B6B"}"##,
        )
        .unwrap();
        assert_eq!(partner.is_complete, None);
        assert!(!partner.is_done());
    }

    #[test]
    fn test_new_ids_are_unique() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
    }
}
