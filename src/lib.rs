//! TaskFlow core — the in-memory task store and the view derivations the
//! screens are built on.
//!
//! The store ([`store::TaskStore`]) is the single source of truth for the
//! task collection within one running instance: an owned, insertion-ordered
//! collection with linear-scan queries and snapshot-returning reads. Every
//! mutation of a task appends one entry to its modification log and notifies
//! subscribers synchronously.
//!
//! Screens never hold state of their own; they derive projections from store
//! snapshots ([`views`]) and issue mutations back as [`patch::TaskPatch`]es,
//! built either directly or through the collaboration actions in [`collab`].

pub mod collab;
pub mod model;
pub mod patch;
pub mod store;
pub mod views;

pub use model::{
    Comment, FieldChange, ModificationAction, ModificationEntry, Partner, Priority, Subtask, Task,
    TaskField, UserIdentity,
};
pub use patch::TaskPatch;
pub use store::{NewTask, StoreEvent, TaskStore};
