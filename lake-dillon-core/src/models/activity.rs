use serde::{Deserialize, Serialize};
use std::fmt;

use super::photo::Photo;

/// A catalog activity scheduled into one day and time slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityInstance {
    /// `<activityId>-<addedAt>`, unique across the timeline.
    pub id: String,
    /// Key into the static activity catalog.
    pub activity_id: String,
    /// Milliseconds since the Unix epoch.
    pub added_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_participants: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<Photo>>,
}

impl ActivityInstance {
    pub fn new(activity_id: impl Into<String>, added_at: i64) -> Self {
        let activity_id = activity_id.into();
        Self {
            id: format!("{}-{}", activity_id, added_at),
            activity_id,
            added_at,
            notes: None,
            confirmed_participants: None,
            start_time: None,
            photos: None,
        }
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    pub fn photos(&self) -> &[Photo] {
        self.photos.as_deref().unwrap_or_default()
    }
}

impl fmt::Display for ActivityInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.activity_id, self.id)?;
        if let Some(start) = &self.start_time {
            write!(f, " @ {}", start)?;
        }
        if let Some(notes) = &self.notes {
            write!(f, " - {}", notes)?;
        }
        let photos = self.photos().len();
        if photos > 0 {
            write!(f, " ({} photo(s))", photos)?;
        }
        Ok(())
    }
}

/// Partial update for an [`ActivityInstance`].
///
/// Only fields that are `Some` replace the stored value. Identity fields
/// (`id`, `activityId`, `addedAt`) cannot be patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityUpdate {
    pub notes: Option<String>,
    pub confirmed_participants: Option<Vec<String>>,
    pub start_time: Option<String>,
    pub photos: Option<Vec<Photo>>,
}

impl ActivityUpdate {
    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow-merges this patch over `activity`.
    pub fn apply(&self, activity: &ActivityInstance) -> ActivityInstance {
        let mut merged = activity.clone();
        if let Some(notes) = &self.notes {
            merged.notes = Some(notes.clone());
        }
        if let Some(participants) = &self.confirmed_participants {
            merged.confirmed_participants = Some(participants.clone());
        }
        if let Some(start) = &self.start_time {
            merged.start_time = Some(start.clone());
        }
        if let Some(photos) = &self.photos {
            merged.photos = Some(photos.clone());
        }
        merged
    }
}
