//! Photo gallery views over a timeline, plus the JSON export.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;

use crate::models::Photo;
use crate::timeline::Timeline;

/// Every photo attached anywhere in the timeline, newest upload first.
///
/// Photos without their own `date`/`timeSlot` inherit those of the day and
/// slot they are attached in.
pub fn collect_photos(timeline: &Timeline) -> Vec<Photo> {
    let mut photos = Vec::new();

    for day in &timeline.days {
        for (slot_type, slot) in day.time_slots.iter() {
            let attached = slot
                .activities
                .iter()
                .flat_map(|a| a.photos())
                .chain(slot.meals.iter().flat_map(|m| m.photos()));

            for photo in attached {
                let mut photo = photo.clone();
                photo.date = photo.date.or(Some(day.date));
                photo.time_slot = photo.time_slot.or(Some(slot_type));
                photos.push(photo);
            }
        }
    }

    photos.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
    photos
}

/// Gallery filter: exact date match plus a case-insensitive search over
/// description, location names and tags.
#[derive(Debug, Clone, Default)]
pub struct PhotoFilter {
    pub date: Option<NaiveDate>,
    pub search: Option<String>,
}

impl PhotoFilter {
    pub fn matches(&self, photo: &Photo) -> bool {
        if let Some(date) = self.date {
            if photo.date != Some(date) {
                return false;
            }
        }

        let needle = match self.search.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_lowercase(),
            _ => return true,
        };
        let hit = |text: Option<&str>| text.is_some_and(|t| t.to_lowercase().contains(&needle));

        let location = photo.location.as_ref();
        hit(photo.description.as_deref())
            || hit(location.and_then(|l| l.activity_name.as_deref()))
            || hit(location.and_then(|l| l.restaurant_name.as_deref()))
            || hit(location.and_then(|l| l.custom_location.as_deref()))
            || photo
                .tags
                .as_deref()
                .unwrap_or_default()
                .iter()
                .any(|t| hit(Some(t)))
    }

    pub fn apply<'a>(&self, photos: &'a [Photo]) -> Vec<&'a Photo> {
        photos.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Distinct photo dates, ascending.
pub fn unique_dates(photos: &[Photo]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = photos.iter().filter_map(|p| p.date).collect();
    dates.sort();
    dates.dedup();
    dates
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportedPhoto<'a> {
    url: &'a str,
    uploaded_at: String,
    description: &'a str,
    location: &'a str,
    date: String,
    time_slot: &'a str,
    tags: &'a [String],
}

const UNKNOWN: &str = "Unknown";

impl<'a> From<&'a Photo> for ExportedPhoto<'a> {
    fn from(photo: &'a Photo) -> Self {
        let uploaded_at = DateTime::<Utc>::from_timestamp_millis(photo.uploaded_at)
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_else(|| UNKNOWN.to_string());

        ExportedPhoto {
            url: &photo.url,
            uploaded_at,
            description: photo.description.as_deref().unwrap_or(""),
            location: photo.location_name().unwrap_or(UNKNOWN),
            date: photo
                .date
                .map(|d| d.format("%-m/%-d/%Y").to_string())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            time_slot: photo.time_slot.map(|s| s.as_str()).unwrap_or(UNKNOWN),
            tags: photo.tags.as_deref().unwrap_or_default(),
        }
    }
}

/// Pretty-printed JSON array describing each photo.
pub fn export_photos<'a, I>(photos: I) -> serde_json::Result<String>
where
    I: IntoIterator<Item = &'a Photo>,
{
    let rows: Vec<ExportedPhoto<'_>> = photos.into_iter().map(ExportedPhoto::from).collect();
    serde_json::to_string_pretty(&rows)
}

/// Suggested file name for an export made on `today`.
pub fn export_filename(today: NaiveDate) -> String {
    format!("lake-dillon-photos-{}.json", today.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealType, NewMeal, PhotoLocation, TimeSlotType};
    use crate::timeline::{default_timeline, mutations};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, day).unwrap()
    }

    fn timeline_with_photos() -> Timeline {
        let (t, activity) = mutations::add_activity(
            &default_timeline(),
            date(22),
            TimeSlotType::Morning,
            "ski-lesson",
            None,
            1,
        );
        let (t, meal) = mutations::add_meal(
            &t,
            date(23),
            TimeSlotType::Evening,
            NewMeal::at_restaurant(MealType::Dinner, "pug-ryans"),
            2,
        );
        let activity = activity.unwrap();
        let meal = meal.unwrap();

        let older = Photo::new("photo-100", "u/older.jpg", 100)
            .with_description("First run down the bunny hill")
            .with_location(PhotoLocation::activity("ski-lesson", "Ski Lesson"));
        let newer = Photo::new("photo-300", "u/newer.jpg", 300).with_tags(["Dinner", "family"]);
        let tagged = Photo::new("photo-200", "u/tagged.jpg", 200)
            .taken_at(date(21), TimeSlotType::Evening)
            .with_location(PhotoLocation::custom("Cabin deck"));

        let morning = TimeSlotType::Morning;
        let t = mutations::add_photo_to_activity(&t, date(22), morning, &activity, &older);
        let t = mutations::add_photo_to_activity(&t, date(22), morning, &activity, &tagged);
        mutations::add_photo_to_meal(&t, date(23), TimeSlotType::Evening, &meal, &newer)
    }

    #[test]
    fn test_collect_sorts_newest_first_and_fills_defaults() {
        let photos = collect_photos(&timeline_with_photos());
        let ids: Vec<&str> = photos.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["photo-300", "photo-200", "photo-100"]);

        assert_eq!(photos[0].date, Some(date(23)));
        assert_eq!(photos[0].time_slot, Some(TimeSlotType::Evening));
        // own date wins over the owner's
        assert_eq!(photos[1].date, Some(date(21)));
        assert_eq!(photos[2].time_slot, Some(TimeSlotType::Morning));
    }

    #[test]
    fn test_filter_by_date_and_search() {
        let photos = collect_photos(&timeline_with_photos());

        let by_date = PhotoFilter {
            date: Some(date(22)),
            search: None,
        };
        assert_eq!(by_date.apply(&photos).len(), 1);

        let search = |s: &str| PhotoFilter {
            date: None,
            search: Some(s.to_string()),
        };
        assert_eq!(search("BUNNY").apply(&photos)[0].id, "photo-100");
        assert_eq!(search("ski lesson").apply(&photos)[0].id, "photo-100");
        assert_eq!(search("deck").apply(&photos)[0].id, "photo-200");
        assert_eq!(search("dinner").apply(&photos)[0].id, "photo-300");
        assert!(search("gondola").apply(&photos).is_empty());
        assert_eq!(search("  ").apply(&photos).len(), 3);
    }

    #[test]
    fn test_unique_dates() {
        let photos = collect_photos(&timeline_with_photos());
        assert_eq!(unique_dates(&photos), vec![date(21), date(22), date(23)]);
    }

    #[test]
    fn test_export_format() {
        let bare = Photo::new("photo-1", "u/bare.jpg", 1_732_300_000_000);
        let dated = Photo::new("photo-2", "u/dated.jpg", 0)
            .taken_at(date(27), TimeSlotType::Afternoon)
            .with_location(PhotoLocation::restaurant("Arapahoe Cafe"));

        let json = export_photos([&bare, &dated]).unwrap();
        let rows: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(rows[0]["uploadedAt"], "2024-11-22T18:26:40.000Z");
        assert_eq!(rows[0]["description"], "");
        assert_eq!(rows[0]["location"], "Unknown");
        assert_eq!(rows[0]["date"], "Unknown");
        assert_eq!(rows[0]["timeSlot"], "Unknown");
        assert_eq!(rows[0]["tags"], serde_json::json!([]));

        assert_eq!(rows[1]["location"], "Arapahoe Cafe");
        assert_eq!(rows[1]["date"], "11/27/2025");
        assert_eq!(rows[1]["timeSlot"], "afternoon");
        assert!(json.contains("\n  "));
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename(date(28)), "lake-dillon-photos-2025-11-28.json");
    }
}
