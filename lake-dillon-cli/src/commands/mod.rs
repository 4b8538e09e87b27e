mod activity;
mod config_cmd;
mod family;
mod meal;
mod packing;
mod photo;
mod timeline;

pub use activity::ActivityCommand;
pub use config_cmd::ConfigCommand;
pub use family::FamilyCommand;
pub use meal::MealCommand;
pub use packing::PackingCommand;
pub use photo::PhotoCommand;
pub use timeline::TimelineCommand;

use chrono::NaiveDate;
use clap::ValueEnum;
use lake_dillon_core::{timeline::trip_dates, TimelineSync};

use crate::app::Documents;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Rejects dates outside the trip before anything is written.
fn require_trip_date(date: NaiveDate) -> Result<(), String> {
    let dates = trip_dates();
    if dates.contains(&date) {
        return Ok(());
    }
    match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => Err(format!(
            "{} is not a trip day ({} to {})",
            date, first, last
        )),
        _ => Err(format!("{} is not a trip day", date)),
    }
}

/// Prints a warning when the last save did not reach the store.
fn report_save(sync: &TimelineSync<Documents>, saved: bool) {
    if saved {
        return;
    }
    match sync.error() {
        Some(e) => eprintln!("Warning: change was not saved: {}", e),
        None => eprintln!("Warning: change was not saved"),
    }
}

/// Splits comma-separated member ids, dropping blanks.
fn split_members(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
