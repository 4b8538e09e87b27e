use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::activity::ActivityInstance;
use super::meal::MealInstance;

/// Subdivision of a trip day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlotType {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlotType {
    pub const ALL: [TimeSlotType; 3] = [
        TimeSlotType::Morning,
        TimeSlotType::Afternoon,
        TimeSlotType::Evening,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlotType::Morning => "morning",
            TimeSlotType::Afternoon => "afternoon",
            TimeSlotType::Evening => "evening",
        }
    }
}

impl fmt::Display for TimeSlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeSlotType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(TimeSlotType::Morning),
            "afternoon" => Ok(TimeSlotType::Afternoon),
            "evening" => Ok(TimeSlotType::Evening),
            _ => Err(format!(
                "Invalid time slot '{}'. Valid options: morning, afternoon, evening",
                s
            )),
        }
    }
}

/// Activities and meals planned for one part of a day.
///
/// Emptiness is always derived from the two lists. The stored document
/// carries an `isEmpty` field for compatibility; it is recomputed on every
/// write. On read it only matters for records without a `locked` field,
/// where `isEmpty: false` over empty lists marks a reserved slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TimeSlotRecord", into = "TimeSlotRecord")]
pub struct TimeSlot {
    pub activities: Vec<ActivityInstance>,
    pub meals: Vec<MealInstance>,
    /// Local wall-clock time, `HH:MM`.
    pub start_time: String,
    /// Reserved for travel, check-in or checkout; not plannable in the UI.
    pub locked: bool,
}

impl TimeSlot {
    pub fn new(start_time: impl Into<String>) -> Self {
        Self {
            activities: Vec::new(),
            meals: Vec::new(),
            start_time: start_time.into(),
            locked: false,
        }
    }

    pub fn locked(start_time: impl Into<String>) -> Self {
        Self {
            locked: true,
            ..Self::new(start_time)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty() && self.meals.is_empty()
    }

    pub fn activity(&self, instance_id: &str) -> Option<&ActivityInstance> {
        self.activities.iter().find(|a| a.id == instance_id)
    }

    pub fn meal(&self, instance_id: &str) -> Option<&MealInstance> {
        self.meals.iter().find(|m| m.id == instance_id)
    }

    /// Returns the slot's activities arranged in the order of `ids`.
    ///
    /// `None` unless `ids` is a permutation of the current instance ids.
    pub fn arrange_activities(&self, ids: &[String]) -> Option<Vec<ActivityInstance>> {
        if ids.len() != self.activities.len() {
            return None;
        }
        let mut remaining: Vec<&ActivityInstance> = self.activities.iter().collect();
        let mut ordered = Vec::with_capacity(ids.len());
        for id in ids {
            let pos = remaining.iter().position(|a| &a.id == id)?;
            ordered.push(remaining.remove(pos).clone());
        }
        Some(ordered)
    }
}

/// Wire shape of a time slot.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeSlotRecord {
    #[serde(default)]
    activities: Vec<ActivityInstance>,
    #[serde(default)]
    meals: Vec<MealInstance>,
    start_time: String,
    #[serde(default)]
    is_empty: Option<bool>,
    #[serde(default)]
    locked: Option<bool>,
}

impl From<TimeSlotRecord> for TimeSlot {
    fn from(record: TimeSlotRecord) -> Self {
        let holds_items = !record.activities.is_empty() || !record.meals.is_empty();
        let locked = record
            .locked
            .unwrap_or(record.is_empty == Some(false) && !holds_items);
        Self {
            activities: record.activities,
            meals: record.meals,
            start_time: record.start_time,
            locked,
        }
    }
}

impl From<TimeSlot> for TimeSlotRecord {
    fn from(slot: TimeSlot) -> Self {
        let is_empty = slot.is_empty();
        Self {
            activities: slot.activities,
            meals: slot.meals,
            start_time: slot.start_time,
            is_empty: Some(is_empty),
            locked: Some(slot.locked),
        }
    }
}
