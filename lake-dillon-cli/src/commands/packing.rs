use chrono::Utc;
use clap::{Args, Subcommand};
use lake_dillon_core::models::find_member;
use lake_dillon_core::PackingCategory;

use super::OutputFormat;
use crate::app::App;

#[derive(Args)]
pub struct PackingCommand {
    #[command(subcommand)]
    pub command: PackingSubcommand,
}

#[derive(Subcommand)]
pub enum PackingSubcommand {
    /// Show a member's packing list
    List {
        /// Family member id
        member: String,

        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add an item
    Add {
        member: String,

        name: String,

        /// clothing, toiletries, baby-gear, entertainment, food, documents, other
        #[arg(long, default_value = "other")]
        category: PackingCategory,
    },

    /// Mark an item packed (or unpacked)
    Toggle { member: String, id: String },

    /// Remove an item
    Remove { member: String, id: String },
}

fn require_member(id: &str) -> Result<(), String> {
    find_member(id)
        .map(|_| ())
        .ok_or_else(|| format!("Unknown family member: {}", id))
}

impl PackingCommand {
    pub fn run(&self, app: &App) -> Result<(), Box<dyn std::error::Error>> {
        let lists = app.packing();
        match &self.command {
            PackingSubcommand::List { member, format } => {
                require_member(member)?;
                let list = lists.load(member)?;
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&list)?),
                    OutputFormat::Text => {
                        if list.items.is_empty() {
                            println!("Nothing on {}'s list yet", member);
                            return Ok(());
                        }
                        for (category, items) in list.by_category() {
                            println!("{}", category.as_str());
                            for item in items {
                                println!("  {}", item);
                            }
                        }
                        let (packed, total) = list.progress();
                        println!("\nPacked {} of {}", packed, total);
                    }
                }
                Ok(())
            }

            PackingSubcommand::Add {
                member,
                name,
                category,
            } => {
                require_member(member)?;
                if name.trim().is_empty() {
                    return Err("Item name cannot be empty".into());
                }
                let list = lists.load(member)?;
                let (list, id) = list.add_item(name, *category, Utc::now().timestamp_millis());
                lists.save(&list)?;
                println!("Added {} [{}]", name.trim(), id);
                Ok(())
            }

            PackingSubcommand::Toggle { member, id } => {
                require_member(member)?;
                let list = lists.load(member)?;
                if list.item(id).is_none() {
                    return Err(format!("Item {} not found", id).into());
                }
                let list = list.toggle_packed(id);
                lists.save(&list)?;
                if let Some(item) = list.item(id) {
                    println!("{}", item);
                }
                Ok(())
            }

            PackingSubcommand::Remove { member, id } => {
                require_member(member)?;
                let list = lists.load(member)?;
                if list.item(id).is_none() {
                    return Err(format!("Item {} not found", id).into());
                }
                lists.save(&list.remove_item(id))?;
                println!("Removed item {}", id);
                Ok(())
            }
        }
    }
}
