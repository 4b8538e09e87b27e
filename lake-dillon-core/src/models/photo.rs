use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::time_slot::TimeSlotType;

/// Where a photo was taken, as tagged by the uploader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_location: Option<String>,
}

impl PhotoLocation {
    pub fn activity(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            activity_id: Some(id.into()),
            activity_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn restaurant(name: impl Into<String>) -> Self {
        Self {
            restaurant_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn custom(location: impl Into<String>) -> Self {
        Self {
            custom_location: Some(location.into()),
            ..Self::default()
        }
    }

    /// Display name: activity, then restaurant, then custom location.
    pub fn name(&self) -> Option<&str> {
        self.activity_name
            .as_deref()
            .or(self.restaurant_name.as_deref())
            .or(self.custom_location.as_deref())
    }
}

/// Metadata for an uploaded picture.
///
/// `url` points into object storage; the timeline never owns the stored
/// object, so detaching a photo leaves the upload in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub url: String,
    /// Milliseconds since the Unix epoch.
    pub uploaded_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<PhotoLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<TimeSlotType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Photo {
    pub fn new(id: impl Into<String>, url: impl Into<String>, uploaded_at: i64) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            uploaded_at,
            uploaded_by: None,
            description: None,
            location: None,
            date: None,
            time_slot: None,
            tags: None,
        }
    }

    pub fn with_uploaded_by(mut self, member: impl Into<String>) -> Self {
        self.uploaded_by = Some(member.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: PhotoLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Records the day and slot the photo belongs to.
    pub fn taken_at(mut self, date: NaiveDate, slot: TimeSlotType) -> Self {
        self.date = Some(date);
        self.time_slot = Some(slot);
        self
    }

    /// Sets tags, dropping blanks. An empty result clears the tags.
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let tags: Vec<String> = tags
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        self.tags = if tags.is_empty() { None } else { Some(tags) };
        self
    }

    pub fn location_name(&self) -> Option<&str> {
        self.location.as_ref().and_then(PhotoLocation::name)
    }
}
