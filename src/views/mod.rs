//! View derivations — the projections screens compute from store snapshots.
//!
//! These live outside the store on purpose: several encode business rules
//! (interval membership, zero-task guards) that consumers must reproduce
//! identically, and one — calendar day membership — intentionally diverges
//! from the store's own date query. See `calendar::occurs_on`.

pub mod calendar;
pub mod list;
pub mod reports;
