use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::time_slot::{TimeSlot, TimeSlotType};

/// Classification of a trip day; decides which slots the seed locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripPhase {
    ArrivalDay,
    FullActivityDay,
    ThanksgivingDay,
    DepartureDay,
}

impl fmt::Display for TripPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripPhase::ArrivalDay => write!(f, "arrival"),
            TripPhase::FullActivityDay => write!(f, "full activity"),
            TripPhase::ThanksgivingDay => write!(f, "thanksgiving"),
            TripPhase::DepartureDay => write!(f, "departure"),
        }
    }
}

/// The three slots of a day, keyed by [`TimeSlotType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlots {
    pub morning: TimeSlot,
    pub afternoon: TimeSlot,
    pub evening: TimeSlot,
}

impl TimeSlots {
    pub fn get(&self, slot: TimeSlotType) -> &TimeSlot {
        match slot {
            TimeSlotType::Morning => &self.morning,
            TimeSlotType::Afternoon => &self.afternoon,
            TimeSlotType::Evening => &self.evening,
        }
    }

    /// Copy with one slot replaced.
    pub fn with_slot(&self, slot: TimeSlotType, replacement: TimeSlot) -> Self {
        let mut slots = self.clone();
        match slot {
            TimeSlotType::Morning => slots.morning = replacement,
            TimeSlotType::Afternoon => slots.afternoon = replacement,
            TimeSlotType::Evening => slots.evening = replacement,
        }
        slots
    }

    pub fn iter(&self) -> impl Iterator<Item = (TimeSlotType, &TimeSlot)> {
        TimeSlotType::ALL.into_iter().map(move |t| (t, self.get(t)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThanksgivingLocation {
    Restaurant,
    Cabin,
    Tbd,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThanksgivingMeal {
    pub time: String,
    pub location: ThanksgivingLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,
    #[serde(default)]
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub temp: f64,
    pub condition: String,
    pub precipitation: f64,
}

/// One calendar date of the trip.
///
/// Days are seeded once and never added or removed; only slot contents change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub date: NaiveDate,
    pub day_name: String,
    pub trip_phase: TripPhase,
    pub time_slots: TimeSlots,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_thanksgiving_day: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thanksgiving_meal: Option<ThanksgivingMeal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_summary: Option<WeatherSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Day {
    pub fn slot(&self, slot: TimeSlotType) -> &TimeSlot {
        self.time_slots.get(slot)
    }

    /// Copy of this day with one slot replaced.
    pub fn with_slot(&self, slot: TimeSlotType, replacement: TimeSlot) -> Self {
        Self {
            time_slots: self.time_slots.with_slot(slot, replacement),
            ..self.clone()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.time_slots.iter().all(|(_, slot)| slot.is_empty())
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!("{} {} ({})", self.day_name, self.date, self.trip_phase);
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "=".repeat(title.len()))?;

        if let Some(notes) = &self.notes {
            writeln!(f, "{}", notes)?;
        }
        if let Some(meal) = &self.thanksgiving_meal {
            writeln!(
                f,
                "Thanksgiving meal at {} ({:?}) for {}",
                meal.time,
                meal.location,
                meal.participants.join(", ")
            )?;
        }

        for (slot_type, slot) in self.time_slots.iter() {
            let lock = if slot.locked { " [locked]" } else { "" };
            writeln!(f, "\n{} {}{}", slot_type, slot.start_time, lock)?;
            if slot.is_empty() {
                writeln!(f, "  (nothing planned)")?;
                continue;
            }
            for activity in &slot.activities {
                writeln!(f, "  - {}", activity)?;
            }
            for meal in &slot.meals {
                writeln!(f, "  - {}", meal)?;
            }
        }

        Ok(())
    }
}
