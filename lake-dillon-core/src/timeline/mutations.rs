//! Pure timeline transforms.
//!
//! Each operation locates a day by date and a slot by key, rewrites one
//! list inside that slot and returns a new [`Timeline`]. An unknown date
//! is not an error: the result is simply equal to the input. Callers that
//! persist the result do so separately (see [`crate::sync::TimelineSync`]).

use chrono::NaiveDate;

use super::Timeline;
use crate::models::{
    ActivityInstance, ActivityUpdate, MealInstance, MealUpdate, NewMeal, Photo, TimeSlot,
    TimeSlotType,
};

/// Rebuilds the timeline with `edit` applied to one slot of one day.
fn edit_slot<F>(timeline: &Timeline, date: NaiveDate, slot: TimeSlotType, edit: F) -> Timeline
where
    F: FnOnce(&TimeSlot) -> TimeSlot,
{
    let mut days = timeline.days.clone();
    if let Some(day) = days.iter_mut().find(|d| d.date == date) {
        *day = day.with_slot(slot, edit(day.slot(slot)));
    }
    Timeline::new(days)
}

fn edit_activities<F>(slot: &TimeSlot, edit: F) -> TimeSlot
where
    F: FnOnce(&[ActivityInstance]) -> Vec<ActivityInstance>,
{
    TimeSlot {
        activities: edit(&slot.activities),
        ..slot.clone()
    }
}

fn edit_meals<F>(slot: &TimeSlot, edit: F) -> TimeSlot
where
    F: FnOnce(&[MealInstance]) -> Vec<MealInstance>,
{
    TimeSlot {
        meals: edit(&slot.meals),
        ..slot.clone()
    }
}

fn map_activity<F>(
    activities: &[ActivityInstance],
    instance_id: &str,
    f: F,
) -> Vec<ActivityInstance>
where
    F: Fn(&ActivityInstance) -> ActivityInstance,
{
    activities
        .iter()
        .map(|a| if a.id == instance_id { f(a) } else { a.clone() })
        .collect()
}

fn map_meal<F>(meals: &[MealInstance], instance_id: &str, f: F) -> Vec<MealInstance>
where
    F: Fn(&MealInstance) -> MealInstance,
{
    meals
        .iter()
        .map(|m| if m.id == instance_id { f(m) } else { m.clone() })
        .collect()
}

fn appended(photos: &Option<Vec<Photo>>, photo: &Photo) -> Option<Vec<Photo>> {
    let mut list = photos.clone().unwrap_or_default();
    list.push(photo.clone());
    Some(list)
}

/// Drops every photo whose url matches, not just the first.
fn without_url(photos: &Option<Vec<Photo>>, url: &str) -> Option<Vec<Photo>> {
    Some(
        photos
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|p| p.url != url)
            .cloned()
            .collect(),
    )
}

/// Appends a new activity instance. Returns the new timeline and the
/// instance id, or `None` for the id when the date is not on the trip.
///
/// The id is `<activityId>-<now_ms>`; two adds of the same activity in the
/// same millisecond produce the same id.
pub fn add_activity(
    timeline: &Timeline,
    date: NaiveDate,
    slot: TimeSlotType,
    activity_id: &str,
    notes: Option<String>,
    now_ms: i64,
) -> (Timeline, Option<String>) {
    if timeline.day(date).is_none() {
        return (timeline.clone(), None);
    }
    let activity = ActivityInstance::new(activity_id, now_ms).with_notes(notes);
    let id = activity.id.clone();
    let updated = edit_slot(timeline, date, slot, |s| {
        edit_activities(s, |list| {
            let mut list = list.to_vec();
            list.push(activity);
            list
        })
    });
    (updated, Some(id))
}

/// Appends a new meal instance with id `meal-<now_ms>`.
pub fn add_meal(
    timeline: &Timeline,
    date: NaiveDate,
    slot: TimeSlotType,
    meal: NewMeal,
    now_ms: i64,
) -> (Timeline, Option<String>) {
    if timeline.day(date).is_none() {
        return (timeline.clone(), None);
    }
    let meal = meal.into_instance(format!("meal-{}", now_ms));
    let id = meal.id.clone();
    let updated = edit_slot(timeline, date, slot, |s| {
        edit_meals(s, |list| {
            let mut list = list.to_vec();
            list.push(meal);
            list
        })
    });
    (updated, Some(id))
}

pub fn remove_activity(
    timeline: &Timeline,
    date: NaiveDate,
    slot: TimeSlotType,
    instance_id: &str,
) -> Timeline {
    edit_slot(timeline, date, slot, |s| {
        edit_activities(s, |list| {
            list.iter().filter(|a| a.id != instance_id).cloned().collect()
        })
    })
}

pub fn remove_meal(
    timeline: &Timeline,
    date: NaiveDate,
    slot: TimeSlotType,
    instance_id: &str,
) -> Timeline {
    edit_slot(timeline, date, slot, |s| {
        edit_meals(s, |list| {
            list.iter().filter(|m| m.id != instance_id).cloned().collect()
        })
    })
}

/// Replaces the slot's activities with `ordered` as given.
///
/// The order itself comes from the caller; see
/// [`TimeSlot::arrange_activities`] for building it from ids.
pub fn reorder_activities(
    timeline: &Timeline,
    date: NaiveDate,
    slot: TimeSlotType,
    ordered: Vec<ActivityInstance>,
) -> Timeline {
    edit_slot(timeline, date, slot, |s| edit_activities(s, |_| ordered))
}

pub fn update_activity(
    timeline: &Timeline,
    date: NaiveDate,
    slot: TimeSlotType,
    instance_id: &str,
    update: &ActivityUpdate,
) -> Timeline {
    edit_slot(timeline, date, slot, |s| {
        edit_activities(s, |list| map_activity(list, instance_id, |a| update.apply(a)))
    })
}

pub fn update_meal(
    timeline: &Timeline,
    date: NaiveDate,
    slot: TimeSlotType,
    instance_id: &str,
    update: &MealUpdate,
) -> Timeline {
    edit_slot(timeline, date, slot, |s| {
        edit_meals(s, |list| map_meal(list, instance_id, |m| update.apply(m)))
    })
}

pub fn add_photo_to_activity(
    timeline: &Timeline,
    date: NaiveDate,
    slot: TimeSlotType,
    instance_id: &str,
    photo: &Photo,
) -> Timeline {
    edit_slot(timeline, date, slot, |s| {
        edit_activities(s, |list| {
            map_activity(list, instance_id, |a| ActivityInstance {
                photos: appended(&a.photos, photo),
                ..a.clone()
            })
        })
    })
}

pub fn add_photo_to_meal(
    timeline: &Timeline,
    date: NaiveDate,
    slot: TimeSlotType,
    instance_id: &str,
    photo: &Photo,
) -> Timeline {
    edit_slot(timeline, date, slot, |s| {
        edit_meals(s, |list| {
            map_meal(list, instance_id, |m| MealInstance {
                photos: appended(&m.photos, photo),
                ..m.clone()
            })
        })
    })
}

/// Detaches every photo with `url` from the activity. The stored object is
/// left alone.
pub fn remove_photo_from_activity(
    timeline: &Timeline,
    date: NaiveDate,
    slot: TimeSlotType,
    instance_id: &str,
    url: &str,
) -> Timeline {
    edit_slot(timeline, date, slot, |s| {
        edit_activities(s, |list| {
            map_activity(list, instance_id, |a| ActivityInstance {
                photos: without_url(&a.photos, url),
                ..a.clone()
            })
        })
    })
}

pub fn remove_photo_from_meal(
    timeline: &Timeline,
    date: NaiveDate,
    slot: TimeSlotType,
    instance_id: &str,
    url: &str,
) -> Timeline {
    edit_slot(timeline, date, slot, |s| {
        edit_meals(s, |list| {
            map_meal(list, instance_id, |m| MealInstance {
                photos: without_url(&m.photos, url),
                ..m.clone()
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CustomMeal, MealType};
    use crate::timeline::default_timeline;

    const NOW: i64 = 1_732_300_000_000;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, day).unwrap()
    }

    fn assert_empty_flags_consistent(timeline: &Timeline) {
        for day in &timeline.days {
            for (_, slot) in day.time_slots.iter() {
                let json = serde_json::to_value(slot).unwrap();
                let derived = slot.activities.is_empty() && slot.meals.is_empty();
                assert_eq!(json["isEmpty"], derived);
                assert_eq!(slot.is_empty(), derived);
            }
        }
    }

    /// Blanks out generated ids and timestamps so timelines can be compared.
    fn normalized(timeline: &Timeline) -> Timeline {
        let mut copy = timeline.clone();
        for day in &mut copy.days {
            for slot in [
                &mut day.time_slots.morning,
                &mut day.time_slots.afternoon,
                &mut day.time_slots.evening,
            ] {
                for activity in &mut slot.activities {
                    activity.id.clear();
                    activity.added_at = 0;
                }
                for meal in &mut slot.meals {
                    meal.id.clear();
                }
            }
        }
        copy
    }

    fn with_activities(ids: &[&str]) -> Timeline {
        let mut timeline = default_timeline();
        for (i, activity_id) in ids.iter().enumerate() {
            timeline = add_activity(
                &timeline,
                date(22),
                TimeSlotType::Morning,
                activity_id,
                None,
                NOW + i as i64,
            )
            .0;
        }
        timeline
    }

    #[test]
    fn test_add_activity_appends_and_returns_id() {
        let before = default_timeline();
        let (after, id) = add_activity(
            &before,
            date(22),
            TimeSlotType::Afternoon,
            "frisco-adventure-park",
            Some("tubing".into()),
            NOW,
        );

        let id = id.unwrap();
        assert_eq!(id, format!("frisco-adventure-park-{}", NOW));
        let slot = after.slot(date(22), TimeSlotType::Afternoon).unwrap();
        assert_eq!(slot.activities.len(), 1);
        assert_eq!(slot.activities[0].added_at, NOW);
        assert_eq!(slot.activities[0].notes.as_deref(), Some("tubing"));
        // input untouched
        assert_eq!(before, default_timeline());
        assert_empty_flags_consistent(&after);
    }

    #[test]
    fn test_add_activity_unknown_date_is_noop() {
        let before = default_timeline();
        let (after, id) = add_activity(&before, date(1), TimeSlotType::Morning, "x", None, NOW);
        assert!(id.is_none());
        assert_eq!(after, before);
    }

    #[test]
    fn test_add_then_remove_activity_restores_timeline() {
        let before = with_activities(&["gondola"]);
        let (added, id) = add_activity(
            &before,
            date(22),
            TimeSlotType::Morning,
            "sledding",
            None,
            NOW + 50,
        );
        let removed = remove_activity(&added, date(22), TimeSlotType::Morning, &id.unwrap());

        assert_eq!(normalized(&removed), normalized(&before));
        assert_empty_flags_consistent(&removed);
    }

    #[test]
    fn test_remove_missing_activity_is_noop() {
        let before = with_activities(&["gondola"]);
        let after = remove_activity(&before, date(22), TimeSlotType::Morning, "nope");
        assert_eq!(after, before);
    }

    #[test]
    fn test_mutation_leaves_other_days_and_slots_equal() {
        let before = with_activities(&["gondola"]);
        let (after, _) = add_meal(
            &before,
            date(22),
            TimeSlotType::Evening,
            NewMeal::at_restaurant(MealType::Dinner, "r1"),
            NOW,
        );

        for (old, new) in before.days.iter().zip(after.days.iter()) {
            if old.date != date(22) {
                assert_eq!(old, new);
            }
        }
        let old_day = before.day(date(22)).unwrap();
        let new_day = after.day(date(22)).unwrap();
        assert_eq!(old_day.time_slots.morning, new_day.time_slots.morning);
        assert_eq!(old_day.time_slots.afternoon, new_day.time_slots.afternoon);
        assert_eq!(new_day.time_slots.evening.meals.len(), 1);
    }

    #[test]
    fn test_add_meal_defaults_and_id() {
        let (after, id) = add_meal(
            &default_timeline(),
            date(23),
            TimeSlotType::Morning,
            NewMeal::default(),
            NOW,
        );
        assert_eq!(id.as_deref(), Some("meal-1732300000000"));
        let meal = &after.slot(date(23), TimeSlotType::Morning).unwrap().meals[0];
        assert_eq!(meal.meal_type, MealType::Snack);
        assert!(meal.participants.is_empty());
    }

    #[test]
    fn test_remove_meal() {
        let (added, id) = add_meal(
            &default_timeline(),
            date(23),
            TimeSlotType::Evening,
            NewMeal::custom(MealType::Dinner, CustomMeal::new("Tacos")),
            NOW,
        );
        let removed = remove_meal(&added, date(23), TimeSlotType::Evening, &id.unwrap());
        assert!(removed.slot(date(23), TimeSlotType::Evening).unwrap().is_empty());
        assert_empty_flags_consistent(&removed);
    }

    #[test]
    fn test_reorder_changes_order_not_membership() {
        let before = with_activities(&["a", "b", "c"]);
        let slot = before.slot(date(22), TimeSlotType::Morning).unwrap();
        let ids: Vec<String> = slot.activities.iter().rev().map(|a| a.id.clone()).collect();
        let ordered = slot.arrange_activities(&ids).unwrap();

        let after = reorder_activities(&before, date(22), TimeSlotType::Morning, ordered);
        let new_slot = after.slot(date(22), TimeSlotType::Morning).unwrap();

        let new_ids: Vec<String> = new_slot.activities.iter().map(|a| a.id.clone()).collect();
        assert_eq!(new_ids, ids);

        let mut old_sorted: Vec<&ActivityInstance> = slot.activities.iter().collect();
        let mut new_sorted: Vec<&ActivityInstance> = new_slot.activities.iter().collect();
        old_sorted.sort_by(|a, b| a.id.cmp(&b.id));
        new_sorted.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(old_sorted, new_sorted);
    }

    #[test]
    fn test_update_activity_shallow_merge() {
        let before = with_activities(&["gondola"]);
        let id = format!("gondola-{}", NOW);
        let update = ActivityUpdate {
            start_time: Some("09:15".into()),
            ..ActivityUpdate::default()
        };

        let after = update_activity(&before, date(22), TimeSlotType::Morning, &id, &update);
        let activity = after
            .slot(date(22), TimeSlotType::Morning)
            .unwrap()
            .activity(&id)
            .unwrap();
        assert_eq!(activity.start_time.as_deref(), Some("09:15"));
        assert_eq!(activity.activity_id, "gondola");
        assert_eq!(activity.added_at, NOW);
    }

    #[test]
    fn test_update_meal_shallow_merge() {
        let (before, id) = add_meal(
            &default_timeline(),
            date(24),
            TimeSlotType::Afternoon,
            NewMeal::at_restaurant(MealType::Lunch, "r1").with_participants(vec!["jason".into()]),
            NOW,
        );
        let id = id.unwrap();
        let update = MealUpdate {
            reservation_time: Some("12:30".into()),
            ..MealUpdate::default()
        };

        let after = update_meal(&before, date(24), TimeSlotType::Afternoon, &id, &update);
        let meal = after
            .slot(date(24), TimeSlotType::Afternoon)
            .unwrap()
            .meal(&id)
            .unwrap();
        assert_eq!(meal.reservation_time.as_deref(), Some("12:30"));
        assert_eq!(meal.participants, vec!["jason".to_string()]);
    }

    #[test]
    fn test_add_photo_creates_list() {
        let before = with_activities(&["gondola"]);
        let id = format!("gondola-{}", NOW);
        let photo = Photo::new("photo-1", "https://cdn/1.jpg", NOW);

        let after = add_photo_to_activity(&before, date(22), TimeSlotType::Morning, &id, &photo);
        let activity = after
            .slot(date(22), TimeSlotType::Morning)
            .unwrap()
            .activity(&id)
            .unwrap();
        assert_eq!(activity.photos(), &[photo]);
    }

    #[test]
    fn test_remove_photo_removes_all_matching_urls_only() {
        let before = with_activities(&["gondola"]);
        let id = format!("gondola-{}", NOW);
        let dup_a = Photo::new("photo-1", "https://cdn/dup.jpg", NOW);
        let keep = Photo::new("photo-2", "https://cdn/keep.jpg", NOW + 1);
        let dup_b = Photo::new("photo-3", "https://cdn/dup.jpg", NOW + 2);

        let mut timeline = before;
        for photo in [&dup_a, &keep, &dup_b] {
            timeline =
                add_photo_to_activity(&timeline, date(22), TimeSlotType::Morning, &id, photo);
        }

        let after = remove_photo_from_activity(
            &timeline,
            date(22),
            TimeSlotType::Morning,
            &id,
            "https://cdn/dup.jpg",
        );
        let activity = after
            .slot(date(22), TimeSlotType::Morning)
            .unwrap()
            .activity(&id)
            .unwrap();
        assert_eq!(activity.photos(), &[keep]);
    }

    #[test]
    fn test_meal_photos_round_trip() {
        let (before, id) = add_meal(
            &default_timeline(),
            date(25),
            TimeSlotType::Evening,
            NewMeal::at_restaurant(MealType::Dinner, "r2"),
            NOW,
        );
        let id = id.unwrap();
        let photo = Photo::new("photo-9", "https://cdn/9.jpg", NOW);

        let with_photo = add_photo_to_meal(&before, date(25), TimeSlotType::Evening, &id, &photo);
        let slot = with_photo.slot(date(25), TimeSlotType::Evening).unwrap();
        assert_eq!(slot.meal(&id).unwrap().photos().len(), 1);

        let without = remove_photo_from_meal(
            &with_photo,
            date(25),
            TimeSlotType::Evening,
            &id,
            "https://cdn/9.jpg",
        );
        let slot = without.slot(date(25), TimeSlotType::Evening).unwrap();
        assert!(slot.meal(&id).unwrap().photos().is_empty());
    }
}
