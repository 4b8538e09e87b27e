//! The fixed eight-day trip the timeline is seeded with.

use chrono::NaiveDate;

use super::Timeline;
use crate::models::{Day, ThanksgivingLocation, ThanksgivingMeal, TimeSlot, TimeSlots, TripPhase};

/// Key of the single shared timeline document.
pub const TRIP_ID: &str = "lake-dillon-thanksgiving-2025";

const TRIP_START: (i32, u32, u32) = (2025, 11, 21);
const TRIP_DAYS: usize = 8;

/// Every calendar date of the trip, ascending.
pub fn trip_dates() -> Vec<NaiveDate> {
    let (y, m, d) = TRIP_START;
    NaiveDate::from_ymd_opt(y, m, d)
        .map(|start| start.iter_days().take(TRIP_DAYS).collect())
        .unwrap_or_default()
}

fn slots(morning: TimeSlot, afternoon: TimeSlot, evening: TimeSlot) -> TimeSlots {
    TimeSlots {
        morning,
        afternoon,
        evening,
    }
}

fn open_slots() -> TimeSlots {
    slots(
        TimeSlot::new("08:00"),
        TimeSlot::new("12:00"),
        TimeSlot::new("18:00"),
    )
}

fn day(date: NaiveDate, phase: TripPhase, time_slots: TimeSlots, notes: Option<&str>) -> Day {
    Day {
        date,
        day_name: date.format("%A").to_string(),
        trip_phase: phase,
        time_slots,
        is_thanksgiving_day: None,
        thanksgiving_meal: None,
        weather_summary: None,
        notes: notes.map(str::to_string),
    }
}

/// Builds the seeded timeline: the arrival day, six open days
/// (Thanksgiving included) and the departure day.
///
/// The arrival morning/afternoon and the whole departure day are locked.
pub fn default_timeline() -> Timeline {
    let dates = trip_dates();
    let mut days = Vec::with_capacity(dates.len());

    for (index, date) in dates.into_iter().enumerate() {
        let seeded = match index {
            0 => day(
                date,
                TripPhase::ArrivalDay,
                slots(
                    TimeSlot::locked("08:00"),
                    TimeSlot::locked("13:00"),
                    TimeSlot::new("18:00"),
                ),
                Some(
                    "ARRIVAL DAY: Overnight drive from Houston (left 3:00 PM the day before). \
                     Arrive 1:00 PM, check-in at Spinnaker. Evening is flexible.",
                ),
            ),
            5 => day(
                date,
                TripPhase::FullActivityDay,
                open_slots(),
                Some("Day before Thanksgiving - consider prep activities"),
            ),
            6 => Day {
                is_thanksgiving_day: Some(true),
                thanksgiving_meal: Some(ThanksgivingMeal {
                    time: "17:00".to_string(),
                    location: ThanksgivingLocation::Tbd,
                    restaurant_id: None,
                    participants: ["jason", "micah", "sam", "leah", "walker"]
                        .iter()
                        .map(|p| p.to_string())
                        .collect(),
                }),
                ..day(
                    date,
                    TripPhase::ThanksgivingDay,
                    open_slots(),
                    Some("THANKSGIVING DAY - Main celebration"),
                )
            },
            7 => day(
                date,
                TripPhase::DepartureDay,
                slots(
                    TimeSlot::locked("08:00"),
                    TimeSlot::locked("12:00"),
                    TimeSlot::locked("18:00"),
                ),
                Some("DEPARTURE DAY: Check out, drive back to Houston"),
            ),
            _ => day(date, TripPhase::FullActivityDay, open_slots(), None),
        };
        days.push(seeded);
    }

    Timeline::new(days)
}
