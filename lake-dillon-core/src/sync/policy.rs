//! What happens to local state when a save fails.

/// Decides whether a change that failed to persist stays visible locally.
pub trait SavePolicy {
    fn keep_unsaved(&self) -> bool;
}

/// Local state takes the change whether or not the save succeeds. The next
/// successful save persists it; a reload discards it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Optimistic;

impl SavePolicy for Optimistic {
    fn keep_unsaved(&self) -> bool {
        true
    }
}

/// Local state only changes once the document has been written.
#[derive(Debug, Clone, Copy, Default)]
pub struct RollbackOnFailure;

impl SavePolicy for RollbackOnFailure {
    fn keep_unsaved(&self) -> bool {
        false
    }
}
