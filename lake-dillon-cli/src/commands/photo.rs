use chrono::{Local, NaiveDate, Utc};
use clap::{Args, Subcommand};
use std::fs;
use std::path::PathBuf;

use lake_dillon_core::objects::content_type_for;
use lake_dillon_core::{
    collect_photos, export_filename, export_photos, validate_upload, Photo, PhotoFile,
    PhotoFilter, PhotoLocation, TimeSlotType, UploadTarget,
};

use super::{report_save, require_trip_date, OutputFormat};
use crate::app::App;

/// The scheduled item a photo belongs to.
#[derive(Args, Clone)]
#[group(required = true, multiple = false)]
pub struct ItemRef {
    /// Activity instance id
    #[arg(long)]
    activity: Option<String>,

    /// Meal instance id
    #[arg(long)]
    meal: Option<String>,
}

#[derive(Args)]
pub struct PhotoCommand {
    #[command(subcommand)]
    pub command: PhotoSubcommand,
}

#[derive(Subcommand)]
pub enum PhotoSubcommand {
    /// Upload an image and attach it to an activity or meal
    Upload {
        file: PathBuf,

        #[arg(long, short)]
        date: NaiveDate,

        #[arg(long, short)]
        slot: TimeSlotType,

        #[command(flatten)]
        item: ItemRef,

        /// Store under quick-photos/ instead of the item's folder
        #[arg(long)]
        quick: bool,

        #[arg(long)]
        description: Option<String>,

        /// Free-form location, overriding the item's
        #[arg(long)]
        location: Option<String>,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Detach every copy of a photo (by url) from an item
    Remove {
        url: String,

        #[arg(long, short)]
        date: NaiveDate,

        #[arg(long, short)]
        slot: TimeSlotType,

        #[command(flatten)]
        item: ItemRef,
    },

    /// List photos, newest first
    List {
        #[arg(long, short)]
        date: Option<NaiveDate>,

        /// Search description, location and tags
        #[arg(long)]
        search: Option<String>,

        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write the photo metadata export
    Export {
        #[arg(long, short)]
        date: Option<NaiveDate>,

        #[arg(long)]
        search: Option<String>,

        /// Output file (default: lake-dillon-photos-<today>.json)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

impl PhotoCommand {
    pub fn run(&self, app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            PhotoSubcommand::Upload {
                file,
                date,
                slot,
                item,
                quick,
                description,
                location,
                tags,
            } => {
                require_trip_date(*date)?;

                let filename = file
                    .file_name()
                    .and_then(|n| n.to_str())
                    .ok_or_else(|| format!("Invalid file name: {}", file.display()))?
                    .to_string();
                let content_type = content_type_for(&filename)
                    .ok_or_else(|| format!("Only image files are allowed: {}", filename))?;
                let size = fs::metadata(file)?.len();
                validate_upload(content_type, usize::try_from(size).unwrap_or(usize::MAX))?;

                // Resolve the item before uploading anything
                let item_location = {
                    let sync = app.timeline();
                    let slot_ref = sync
                        .timeline()
                        .slot(*date, *slot)
                        .ok_or_else(|| format!("No trip day on {}", date))?;
                    match (&item.activity, &item.meal) {
                        (Some(id), _) => slot_ref
                            .activity(id)
                            .map(|a| PhotoLocation::activity(&a.activity_id, &a.activity_id))
                            .ok_or_else(|| format!("Activity {} not found", id))?,
                        (_, Some(id)) => {
                            let meal = slot_ref
                                .meal(id)
                                .ok_or_else(|| format!("Meal {} not found", id))?;
                            PhotoLocation::restaurant(meal.label())
                        }
                        (None, None) => return Err("Pass --activity or --meal".into()),
                    }
                };

                let bytes = fs::read(file)?;
                let event_id = item.id().to_string();
                let target = if *quick {
                    UploadTarget::Quick
                } else {
                    UploadTarget::TimelineItem { event_id }
                };

                let upload = PhotoFile::new(filename, content_type, bytes);
                let mut photo = app
                    .uploader()
                    .upload(&target, &upload, Utc::now().timestamp_millis())?
                    .taken_at(*date, *slot)
                    .with_tags(tags)
                    .with_location(match location {
                        Some(custom) => PhotoLocation::custom(custom.as_str()),
                        None => item_location,
                    });
                if let Some(text) = description {
                    photo = photo.with_description(text.as_str());
                }

                let sync = app.timeline();
                let saved = match (&item.activity, &item.meal) {
                    (Some(id), _) => sync.add_photo_to_activity(*date, *slot, id, &photo),
                    (_, Some(id)) => sync.add_photo_to_meal(*date, *slot, id, &photo),
                    (None, None) => false,
                };
                report_save(sync, saved);
                println!("Uploaded {} -> {}", photo.id, photo.url);
                Ok(())
            }

            PhotoSubcommand::Remove {
                url,
                date,
                slot,
                item,
            } => {
                require_trip_date(*date)?;
                let sync = app.timeline();
                let saved = match (&item.activity, &item.meal) {
                    (Some(id), _) => sync.remove_photo_from_activity(*date, *slot, id, url),
                    (_, Some(id)) => sync.remove_photo_from_meal(*date, *slot, id, url),
                    (None, None) => return Err("Pass --activity or --meal".into()),
                };
                report_save(sync, saved);
                println!("Detached {} (stored file kept)", url);
                Ok(())
            }

            PhotoSubcommand::List {
                date,
                search,
                format,
            } => {
                let photos = collect_photos(app.timeline().timeline());
                let filter = PhotoFilter {
                    date: *date,
                    search: search.clone(),
                };
                let shown = filter.apply(&photos);

                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&shown)?),
                    OutputFormat::Text => {
                        if shown.is_empty() {
                            println!("No photos found");
                            return Ok(());
                        }
                        for photo in &shown {
                            print_photo(photo);
                        }
                        println!("\nTotal: {} photo(s)", shown.len());
                    }
                }
                Ok(())
            }

            PhotoSubcommand::Export {
                date,
                search,
                output,
            } => {
                let photos = collect_photos(app.timeline().timeline());
                let filter = PhotoFilter {
                    date: *date,
                    search: search.clone(),
                };
                let shown = filter.apply(&photos);
                let json = export_photos(shown.iter().copied())?;

                let path = output
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(export_filename(Local::now().date_naive())));
                fs::write(&path, json)?;
                println!("Exported {} photo(s) to {}", shown.len(), path.display());
                Ok(())
            }
        }
    }
}

impl ItemRef {
    fn id(&self) -> &str {
        self.activity
            .as_deref()
            .or(self.meal.as_deref())
            .unwrap_or_default()
    }
}

fn print_photo(photo: &Photo) {
    let when = photo
        .date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "unknown date".to_string());
    let slot = photo.time_slot.map(|s| s.as_str()).unwrap_or("-");
    println!("{} {:9} {}", when, slot, photo.url);
    if let Some(location) = photo.location_name() {
        println!("    at {}", location);
    }
    if let Some(text) = &photo.description {
        println!("    {}", text);
    }
    if let Some(tags) = &photo.tags {
        println!("    #{}", tags.join(" #"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::memory_app;
    use tempfile::tempdir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 23).unwrap()
    }

    fn scheduled_activity(app: &mut App) -> String {
        app.timeline()
            .add_activity(date(), TimeSlotType::Afternoon, "ice-skating", None)
            .id
            .unwrap()
    }

    fn activity_ref(id: &str) -> ItemRef {
        ItemRef {
            activity: Some(id.to_string()),
            meal: None,
        }
    }

    #[test]
    fn test_upload_attaches_photo() {
        let (mut app, _store, objects) = memory_app();
        let id = scheduled_activity(&mut app);
        let dir = tempdir().unwrap();
        let file = dir.path().join("rink.jpg");
        fs::write(&file, b"jpeg bytes").unwrap();

        PhotoCommand {
            command: PhotoSubcommand::Upload {
                file,
                date: date(),
                slot: TimeSlotType::Afternoon,
                item: activity_ref(&id),
                quick: false,
                description: Some("Leah on skates".into()),
                location: None,
                tags: vec!["skating".into()],
            },
        }
        .run(&mut app)
        .unwrap();

        let photos = collect_photos(app.timeline().timeline());
        assert_eq!(photos.len(), 1);
        let photo = &photos[0];
        assert_eq!(photo.uploaded_by.as_deref(), Some("jason"));
        assert_eq!(photo.location_name(), Some("ice-skating"));
        assert!(photo.url.contains(&format!("timeline-photos/{}/", id)));

        let stored = objects.path().join("timeline-photos").join(&id);
        assert_eq!(fs::read_dir(stored).unwrap().count(), 1);
    }

    #[test]
    fn test_upload_rejects_non_image_before_storing() {
        let (mut app, _store, objects) = memory_app();
        let id = scheduled_activity(&mut app);
        let dir = tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, b"text").unwrap();

        let result = PhotoCommand {
            command: PhotoSubcommand::Upload {
                file,
                date: date(),
                slot: TimeSlotType::Afternoon,
                item: activity_ref(&id),
                quick: true,
                description: None,
                location: None,
                tags: vec![],
            },
        }
        .run(&mut app);

        assert!(result.is_err());
        assert_eq!(fs::read_dir(objects.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_upload_rejects_oversized_file_before_reading() {
        let (mut app, store, objects) = memory_app();
        let id = scheduled_activity(&mut app);
        let dir = tempdir().unwrap();
        let file = dir.path().join("panorama.jpg");
        fs::File::create(&file)
            .unwrap()
            .set_len(lake_dillon_core::MAX_UPLOAD_BYTES as u64 + 1)
            .unwrap();
        let before = store.len();

        let result = PhotoCommand {
            command: PhotoSubcommand::Upload {
                file,
                date: date(),
                slot: TimeSlotType::Afternoon,
                item: activity_ref(&id),
                quick: false,
                description: None,
                location: None,
                tags: vec![],
            },
        }
        .run(&mut app);

        let err = result.unwrap_err();
        assert!(err.to_string().contains("limit"));
        assert_eq!(fs::read_dir(objects.path()).unwrap().count(), 0);
        assert!(collect_photos(app.timeline().timeline()).is_empty());
        assert_eq!(store.len(), before);
    }

    #[test]
    fn test_remove_detaches_by_url() {
        let (mut app, _store, _objects) = memory_app();
        let id = scheduled_activity(&mut app);
        let photo = Photo::new("photo-1", "file:///x.jpg", 1);
        let sync = app.timeline();
        sync.add_photo_to_activity(date(), TimeSlotType::Afternoon, &id, &photo);
        sync.add_photo_to_activity(date(), TimeSlotType::Afternoon, &id, &photo);

        PhotoCommand {
            command: PhotoSubcommand::Remove {
                url: "file:///x.jpg".into(),
                date: date(),
                slot: TimeSlotType::Afternoon,
                item: activity_ref(&id),
            },
        }
        .run(&mut app)
        .unwrap();

        assert!(collect_photos(app.timeline().timeline()).is_empty());
    }

    #[test]
    fn test_export_writes_file() {
        let (mut app, _store, _objects) = memory_app();
        let id = scheduled_activity(&mut app);
        let photo = Photo::new("photo-1", "file:///x.jpg", 1);
        app.timeline()
            .add_photo_to_activity(date(), TimeSlotType::Afternoon, &id, &photo);

        let dir = tempdir().unwrap();
        let output = dir.path().join("export.json");
        PhotoCommand {
            command: PhotoSubcommand::Export {
                date: None,
                search: None,
                output: Some(output.clone()),
            },
        }
        .run(&mut app)
        .unwrap();

        let rows: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(rows[0]["date"], "11/23/2025");
        assert_eq!(rows[0]["timeSlot"], "afternoon");
    }
}
