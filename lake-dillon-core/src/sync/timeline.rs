use chrono::{NaiveDate, Utc};

use super::error::SyncError;
use super::policy::{Optimistic, SavePolicy};
use crate::models::{ActivityInstance, ActivityUpdate, MealUpdate, NewMeal, Photo, TimeSlotType};
use crate::store::{DocumentPath, DocumentStore, StoreError};
use crate::timeline::{default_timeline, mutations, Timeline};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    Loading,
    Ready,
}

/// How [`TimelineSync::load`] obtained its timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The stored document was read.
    Loaded,
    /// No document existed; the seed was written.
    Seeded,
    /// The read failed; the seed is used locally and nothing was written.
    Fallback,
}

/// Result of an add operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// New instance id, or `None` when the date is not on the trip.
    pub id: Option<String>,
    pub saved: bool,
}

/// Owns the local timeline of one trip and persists every change to a
/// [`DocumentStore`].
///
/// Writes go through `&mut self`, so one synchronizer never has two saves
/// in flight. Separate synchronizers on the same document still overwrite
/// each other (last writer wins).
#[derive(Debug)]
pub struct TimelineSync<S, P = Optimistic> {
    store: S,
    policy: P,
    path: DocumentPath,
    timeline: Timeline,
    status: SyncStatus,
    error: Option<SyncError>,
}

impl<S: DocumentStore> TimelineSync<S, Optimistic> {
    pub fn new(store: S, trip_id: &str) -> Result<Self, StoreError> {
        Ok(Self {
            store,
            policy: Optimistic,
            path: DocumentPath::timeline(trip_id)?,
            timeline: default_timeline(),
            status: SyncStatus::Loading,
            error: None,
        })
    }
}

impl<S: DocumentStore, P: SavePolicy> TimelineSync<S, P> {
    /// Swaps the save policy.
    pub fn with_policy<Q: SavePolicy>(self, policy: Q) -> TimelineSync<S, Q> {
        TimelineSync {
            store: self.store,
            policy,
            path: self.path,
            timeline: self.timeline,
            status: self.status,
            error: self.error,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == SyncStatus::Ready
    }

    /// The most recent failure, cleared by the next successful load or save.
    pub fn error(&self) -> Option<&SyncError> {
        self.error.as_ref()
    }

    pub fn path(&self) -> &DocumentPath {
        &self.path
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the timeline document, seeding the store when it is missing.
    pub fn load(&mut self) -> LoadOutcome {
        self.status = SyncStatus::Loading;
        self.error = None;

        let outcome = match self.store.get(&self.path) {
            Ok(Some(doc)) => match serde_json::from_value::<Timeline>(doc) {
                Ok(timeline) => {
                    tracing::debug!(
                        document = %self.path,
                        days = timeline.days.len(),
                        "loaded timeline"
                    );
                    self.timeline = timeline;
                    LoadOutcome::Loaded
                }
                Err(e) => {
                    tracing::error!(
                        document = %self.path,
                        error = %e,
                        "stored timeline is malformed, using seed"
                    );
                    self.timeline = default_timeline();
                    self.error = Some(SyncError::Malformed(self.path.clone(), e.to_string()));
                    LoadOutcome::Fallback
                }
            },
            Ok(None) => {
                tracing::info!(document = %self.path, "no timeline stored, seeding");
                let seed = default_timeline();
                if let Err(e) = self.write(&seed) {
                    tracing::error!(
                        document = %self.path,
                        error = %e,
                        "failed to store seed timeline"
                    );
                    self.error = Some(SyncError::Save(self.path.clone(), e));
                }
                self.timeline = seed;
                LoadOutcome::Seeded
            }
            Err(e) => {
                tracing::error!(
                    document = %self.path,
                    error = %e,
                    "failed to load timeline, using seed"
                );
                self.timeline = default_timeline();
                self.error = Some(SyncError::Load(self.path.clone(), e));
                LoadOutcome::Fallback
            }
        };

        self.status = SyncStatus::Ready;
        outcome
    }

    fn write(&self, timeline: &Timeline) -> Result<(), StoreError> {
        let doc = serde_json::to_value(timeline).map_err(|e| StoreError::Malformed {
            path: self.path.to_string(),
            message: e.to_string(),
        })?;
        self.store.set(&self.path, &doc)
    }

    /// Overwrites the stored document with `timeline`.
    ///
    /// Returns whether the write succeeded. On failure the save policy
    /// decides whether local state still takes `timeline`.
    pub fn save(&mut self, timeline: Timeline) -> bool {
        match self.write(&timeline) {
            Ok(()) => {
                self.timeline = timeline;
                self.error = None;
                true
            }
            Err(e) => {
                tracing::error!(document = %self.path, error = %e, "failed to save timeline");
                self.error = Some(SyncError::Save(self.path.clone(), e));
                if self.policy.keep_unsaved() {
                    self.timeline = timeline;
                }
                false
            }
        }
    }

    pub fn add_activity(
        &mut self,
        date: NaiveDate,
        slot: TimeSlotType,
        activity_id: &str,
        notes: Option<String>,
    ) -> AddOutcome {
        let (next, id) = mutations::add_activity(
            &self.timeline,
            date,
            slot,
            activity_id,
            notes,
            now_ms(),
        );
        AddOutcome {
            id,
            saved: self.save(next),
        }
    }

    pub fn add_meal(&mut self, date: NaiveDate, slot: TimeSlotType, meal: NewMeal) -> AddOutcome {
        let (next, id) = mutations::add_meal(&self.timeline, date, slot, meal, now_ms());
        AddOutcome {
            id,
            saved: self.save(next),
        }
    }

    pub fn remove_activity(
        &mut self,
        date: NaiveDate,
        slot: TimeSlotType,
        instance_id: &str,
    ) -> bool {
        let next = mutations::remove_activity(&self.timeline, date, slot, instance_id);
        self.save(next)
    }

    pub fn remove_meal(&mut self, date: NaiveDate, slot: TimeSlotType, instance_id: &str) -> bool {
        let next = mutations::remove_meal(&self.timeline, date, slot, instance_id);
        self.save(next)
    }

    pub fn reorder_activities(
        &mut self,
        date: NaiveDate,
        slot: TimeSlotType,
        ordered: Vec<ActivityInstance>,
    ) -> bool {
        let next = mutations::reorder_activities(&self.timeline, date, slot, ordered);
        self.save(next)
    }

    pub fn update_activity(
        &mut self,
        date: NaiveDate,
        slot: TimeSlotType,
        instance_id: &str,
        update: &ActivityUpdate,
    ) -> bool {
        let next = mutations::update_activity(&self.timeline, date, slot, instance_id, update);
        self.save(next)
    }

    pub fn update_meal(
        &mut self,
        date: NaiveDate,
        slot: TimeSlotType,
        instance_id: &str,
        update: &MealUpdate,
    ) -> bool {
        let next = mutations::update_meal(&self.timeline, date, slot, instance_id, update);
        self.save(next)
    }

    pub fn add_photo_to_activity(
        &mut self,
        date: NaiveDate,
        slot: TimeSlotType,
        instance_id: &str,
        photo: &Photo,
    ) -> bool {
        let next = mutations::add_photo_to_activity(&self.timeline, date, slot, instance_id, photo);
        self.save(next)
    }

    pub fn add_photo_to_meal(
        &mut self,
        date: NaiveDate,
        slot: TimeSlotType,
        instance_id: &str,
        photo: &Photo,
    ) -> bool {
        let next = mutations::add_photo_to_meal(&self.timeline, date, slot, instance_id, photo);
        self.save(next)
    }

    pub fn remove_photo_from_activity(
        &mut self,
        date: NaiveDate,
        slot: TimeSlotType,
        instance_id: &str,
        url: &str,
    ) -> bool {
        let next =
            mutations::remove_photo_from_activity(&self.timeline, date, slot, instance_id, url);
        self.save(next)
    }

    pub fn remove_photo_from_meal(
        &mut self,
        date: NaiveDate,
        slot: TimeSlotType,
        instance_id: &str,
        url: &str,
    ) -> bool {
        let next = mutations::remove_photo_from_meal(&self.timeline, date, slot, instance_id, url);
        self.save(next)
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
