//! Lake Dillon Core Library
//!
//! Trip timeline model, pure mutations and the document-store synchronizer
//! shared by the Lake Dillon CLI and server.

pub mod gallery;
pub mod models;
pub mod objects;
pub mod packing_lists;
pub mod store;
pub mod sync;
pub mod timeline;

pub use gallery::{collect_photos, export_filename, export_photos, unique_dates, PhotoFilter};
pub use models::{
    ActivityInstance, ActivityUpdate, CustomMeal, Day, FamilyMember, MealInstance, MealType,
    MealUpdate, NewMeal, PackingCategory, PackingItem, Photo, PhotoLocation, TimeSlot,
    TimeSlotType, TripPhase,
};
pub use objects::{
    validate_upload, FileObjectStore, HttpObjectStore, ObjectStore, PhotoFile, PhotoUploader,
    UploadError, UploadTarget, MAX_UPLOAD_BYTES,
};
pub use packing_lists::{PackingList, PackingLists};
pub use store::{
    DocumentPath, DocumentStore, FileDocumentStore, HttpDocumentStore, MemoryDocumentStore,
    StoreError,
};
pub use sync::{
    AddOutcome, LoadOutcome, Optimistic, RollbackOnFailure, SavePolicy, SyncError, SyncStatus,
    TimelineSync,
};
pub use timeline::{default_timeline, Timeline, TRIP_ID};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
