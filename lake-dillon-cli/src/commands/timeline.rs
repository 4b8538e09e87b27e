use chrono::NaiveDate;
use clap::{Args, Subcommand};

use super::OutputFormat;
use crate::app::App;

#[derive(Args)]
pub struct TimelineCommand {
    #[command(subcommand)]
    pub command: TimelineSubcommand,
}

#[derive(Subcommand)]
pub enum TimelineSubcommand {
    /// Show the trip day by day
    Show {
        /// Only show one day (YYYY-MM-DD)
        #[arg(long, short)]
        date: Option<NaiveDate>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl TimelineCommand {
    pub fn run(&self, app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            TimelineSubcommand::Show { date, format } => {
                let sync = app.timeline();
                let timeline = sync.timeline();

                let days: Vec<_> = match date {
                    Some(d) => timeline.day(*d).into_iter().collect(),
                    None => timeline.days.iter().collect(),
                };
                if days.is_empty() {
                    if let Some(d) = date {
                        return Err(format!("No trip day on {}", d).into());
                    }
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&days)?);
                    }
                    OutputFormat::Text => {
                        for (i, day) in days.iter().enumerate() {
                            if i > 0 {
                                println!();
                            }
                            print!("{}", day);
                        }
                        if date.is_none() {
                            println!(
                                "\n{} day(s), {} item(s) planned",
                                days.len(),
                                timeline.item_count()
                            );
                        }
                    }
                }
                Ok(())
            }
        }
    }
}
