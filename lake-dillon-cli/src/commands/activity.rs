use chrono::NaiveDate;
use clap::{Args, Subcommand};
use lake_dillon_core::{ActivityUpdate, TimeSlotType};

use super::{report_save, require_trip_date, split_members};
use crate::app::App;

#[derive(Args)]
pub struct ActivityCommand {
    #[command(subcommand)]
    pub command: ActivitySubcommand,
}

#[derive(Subcommand)]
pub enum ActivitySubcommand {
    /// Schedule a catalog activity into a time slot
    Add {
        /// Catalog activity id (e.g. "frisco-adventure-park")
        activity_id: String,

        /// Day (YYYY-MM-DD)
        #[arg(long, short)]
        date: NaiveDate,

        /// Time slot (morning, afternoon, evening)
        #[arg(long, short)]
        slot: TimeSlotType,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Remove a scheduled activity
    Remove {
        /// Activity instance id
        id: String,

        #[arg(long, short)]
        date: NaiveDate,

        #[arg(long, short)]
        slot: TimeSlotType,
    },

    /// Change notes, start time or confirmed participants
    Update {
        /// Activity instance id
        id: String,

        #[arg(long, short)]
        date: NaiveDate,

        #[arg(long, short)]
        slot: TimeSlotType,

        #[arg(long)]
        notes: Option<String>,

        /// Start time (HH:MM)
        #[arg(long)]
        start_time: Option<String>,

        /// Comma-separated family member ids
        #[arg(long)]
        participants: Option<String>,
    },

    /// Put a slot's activities in a new order
    Reorder {
        /// Every activity instance id in the slot, in the new order
        #[arg(required = true)]
        ids: Vec<String>,

        #[arg(long, short)]
        date: NaiveDate,

        #[arg(long, short)]
        slot: TimeSlotType,
    },
}

impl ActivityCommand {
    pub fn run(&self, app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ActivitySubcommand::Add {
                activity_id,
                date,
                slot,
                notes,
            } => {
                require_trip_date(*date)?;
                let sync = app.timeline();
                if sync.timeline().slot(*date, *slot).is_some_and(|s| s.locked) {
                    eprintln!("Note: {} {} is reserved for travel", date, slot);
                }

                let outcome = sync.add_activity(*date, *slot, activity_id, notes.clone());
                report_save(sync, outcome.saved);
                if let Some(id) = outcome.id {
                    println!("Added {} to {} {}: {}", activity_id, date, slot, id);
                }
                Ok(())
            }

            ActivitySubcommand::Remove { id, date, slot } => {
                require_trip_date(*date)?;
                let sync = app.timeline();
                if sync.timeline().slot(*date, *slot).and_then(|s| s.activity(id)).is_none() {
                    return Err(format!("Activity {} not found in {} {}", id, date, slot).into());
                }
                let saved = sync.remove_activity(*date, *slot, id);
                report_save(sync, saved);
                println!("Removed activity {}", id);
                Ok(())
            }

            ActivitySubcommand::Update {
                id,
                date,
                slot,
                notes,
                start_time,
                participants,
            } => {
                require_trip_date(*date)?;
                let update = ActivityUpdate {
                    notes: notes.clone(),
                    start_time: start_time.clone(),
                    confirmed_participants: participants.as_deref().map(split_members),
                    photos: None,
                };
                if update.is_empty() {
                    return Err(
                        "Nothing to update. Pass --notes, --start-time or --participants".into(),
                    );
                }

                let sync = app.timeline();
                if sync.timeline().slot(*date, *slot).and_then(|s| s.activity(id)).is_none() {
                    return Err(format!("Activity {} not found in {} {}", id, date, slot).into());
                }
                let saved = sync.update_activity(*date, *slot, id, &update);
                report_save(sync, saved);

                let updated = sync.timeline().slot(*date, *slot).and_then(|s| s.activity(id));
                if let Some(activity) = updated {
                    println!("Updated: {}", activity);
                }
                Ok(())
            }

            ActivitySubcommand::Reorder { ids, date, slot } => {
                require_trip_date(*date)?;
                let sync = app.timeline();
                let ordered = sync
                    .timeline()
                    .slot(*date, *slot)
                    .and_then(|s| s.arrange_activities(ids))
                    .ok_or("Ids must list every activity in the slot exactly once")?;

                let saved = sync.reorder_activities(*date, *slot, ordered);
                report_save(sync, saved);
                println!("Reordered {} activities in {} {}", ids.len(), date, slot);
                Ok(())
            }
        }
    }
}
