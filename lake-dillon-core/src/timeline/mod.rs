//! The shared trip timeline.
//!
//! A [`Timeline`] is the ordered list of trip days and serializes exactly
//! as the stored document (`{ "days": [...] }`). It is treated as an
//! immutable value: every operation in [`mutations`] returns a new
//! timeline and leaves its input untouched.

pub mod mutations;
mod seed;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Day, TimeSlot, TimeSlotType};

pub use seed::{default_timeline, trip_dates, TRIP_ID};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub days: Vec<Day>,
}

impl Timeline {
    pub fn new(days: Vec<Day>) -> Self {
        Self { days }
    }

    pub fn day(&self, date: NaiveDate) -> Option<&Day> {
        self.days.iter().find(|d| d.date == date)
    }

    pub fn slot(&self, date: NaiveDate, slot: TimeSlotType) -> Option<&TimeSlot> {
        self.day(date).map(|d| d.slot(slot))
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.days.iter().map(|d| d.date).collect()
    }

    /// Total number of scheduled activities and meals.
    pub fn item_count(&self) -> usize {
        self.days
            .iter()
            .flat_map(|d| d.time_slots.iter())
            .map(|(_, slot)| slot.activities.len() + slot.meals.len())
            .sum()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        default_timeline()
    }
}
