//! The task store — single source of truth for the task collection within
//! one running instance.
//!
//! An owned, insertion-ordered `Vec<Task>` with linear-scan queries. Reads
//! return clones (snapshot semantics: mutating a returned task never touches
//! the store). Mutations take `&mut self`, which gives the single-writer
//! discipline for free; callers wanting shared multi-threaded access wrap
//! the store themselves.
//!
//! Subscribers are notified synchronously on every mutation over a broadcast
//! channel — no batching, no debouncing, and a lagging or absent subscriber
//! never fails the mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::model::{
    local_day, new_id, Comment, FieldChange, ModificationAction, ModificationEntry, Partner,
    Priority, Subtask, Task, UserIdentity,
};
use crate::patch::TaskPatch;

/// Everything needed to create a task. The id, timestamps and the
/// modification log are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub priority: Priority,
    pub partners: Vec<Partner>,
    /// By screen convention this is 0 at creation; the store does not
    /// enforce it.
    pub completion_percentage: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<Subtask>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
    pub created_by: String,
}

/// Notification sent to subscribers on each mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    TaskAdded { task: Task },
    TaskUpdated { id: String, changes: Vec<FieldChange> },
    TaskDeleted { id: String },
}

pub struct TaskStore {
    tasks: Vec<Task>,
    actor: UserIdentity,
    events: broadcast::Sender<StoreEvent>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self::with_actor(UserIdentity::current_user())
    }

    /// A store whose log entries are attributed to `actor`.
    pub fn with_actor(actor: UserIdentity) -> Self {
        let (events, _) = broadcast::channel(256);
        Self {
            tasks: Vec::new(),
            actor,
            events,
        }
    }

    /// Subscribe to mutation notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    fn notify(&self, event: StoreEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    /// Create a task: fresh id, `created_at = updated_at = now`, one
    /// `create` log entry, inserted at the end of the collection.
    ///
    /// No field validation happens here — empty titles, inverted date ranges
    /// and out-of-range percentages are stored as given. Returns a clone of
    /// the stored task.
    pub fn add_task(&mut self, new: NewTask) -> Task {
        let now = Utc::now();
        let task = Task {
            id: new_id(),
            title: new.title,
            description: new.description,
            start_date: new.start_date,
            end_date: new.end_date,
            priority: new.priority,
            partners: new.partners,
            completion_percentage: new.completion_percentage,
            notes: new.notes,
            attachments: new.attachments,
            subtasks: new.subtasks,
            comments: new.comments,
            created_at: now,
            updated_at: now,
            created_by: new.created_by,
            modification_log: vec![ModificationEntry {
                timestamp: now,
                user_id: self.actor.id.clone(),
                user_name: self.actor.name.clone(),
                action: ModificationAction::Create,
                changes: Vec::new(),
            }],
        };
        debug!(task_id = %task.id, title = %task.title, "task created");
        self.tasks.push(task.clone());
        self.notify(StoreEvent::TaskAdded { task: task.clone() });
        task
    }

    /// Merge `patch` into the task with `id`, bump `updated_at`, and append
    /// one `update` log entry recording old/new for exactly the patched
    /// fields. Missing ids are a silent no-op by contract.
    pub fn update_task(&mut self, id: &str, patch: TaskPatch) {
        let now = Utc::now();
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            warn!(task_id = %id, "update for unknown task ignored");
            return;
        };

        let changes = patch.apply(task);
        task.updated_at = now;
        task.modification_log.push(ModificationEntry {
            timestamp: now,
            user_id: self.actor.id.clone(),
            user_name: self.actor.name.clone(),
            action: ModificationAction::Update,
            changes: changes.clone(),
        });
        debug!(task_id = %id, fields = changes.len(), "task updated");
        self.notify(StoreEvent::TaskUpdated {
            id: id.to_string(),
            changes,
        });
    }

    /// Remove the task with `id`. Missing ids are a silent no-op.
    ///
    /// No `delete` log entry is written: the log lives on the task being
    /// removed, so the entry would vanish with it. Observers get the
    /// `TaskDeleted` broadcast instead.
    pub fn delete_task(&mut self, id: &str) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            warn!(task_id = %id, "delete for unknown task ignored");
            return;
        }
        debug!(task_id = %id, "task deleted");
        self.notify(StoreEvent::TaskDeleted { id: id.to_string() });
    }

    /// First task with `id`, or `None`. Never panics.
    pub fn task_by_id(&self, id: &str) -> Option<Task> {
        self.tasks.iter().find(|t| t.id == id).cloned()
    }

    /// Tasks whose **start date** falls within the local calendar day
    /// containing `date` (00:00:00.000 through 23:59:59.999 local).
    ///
    /// Start date only — the calendar screen applies its own closed-interval
    /// membership rule ([`crate::views::calendar::occurs_on`]) and the two
    /// are intentionally distinct.
    pub fn tasks_on_date(&self, date: DateTime<Utc>) -> Vec<Task> {
        let day = local_day(date);
        self.tasks
            .iter()
            .filter(|t| local_day(t.start_date) == day)
            .cloned()
            .collect()
    }

    /// Tasks whose partner list contains a partner with `partner_id`.
    pub fn tasks_by_partner(&self, partner_id: &str) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| t.partners.iter().any(|p| p.id == partner_id))
            .cloned()
            .collect()
    }

    /// Tasks with exactly this priority.
    pub fn tasks_by_priority(&self, priority: Priority) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| t.priority == priority)
            .cloned()
            .collect()
    }

    /// Full snapshot of the collection, oldest task first.
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
