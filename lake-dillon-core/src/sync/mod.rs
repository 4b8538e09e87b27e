//! Keeping the local timeline and the stored document in step.
//!
//! A [`TimelineSync`] owns the in-memory timeline for one trip. It loads
//! the document once (seeding the store when the document is missing),
//! then turns every mutation into exactly one whole-document write. Store
//! failures never propagate: they are logged, recorded in
//! [`TimelineSync::error`] and the caller gets `false` back.

mod error;
mod policy;
mod timeline;

pub use error::SyncError;
pub use policy::{Optimistic, RollbackOnFailure, SavePolicy};
pub use timeline::{AddOutcome, LoadOutcome, SyncStatus, TimelineSync};
