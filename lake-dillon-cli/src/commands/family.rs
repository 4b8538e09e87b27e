use clap::Args;
use lake_dillon_core::models::family_members;

use super::OutputFormat;

/// List the travelling party
#[derive(Args)]
pub struct FamilyCommand {
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl FamilyCommand {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let members = family_members();
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&members)?),
            OutputFormat::Text => {
                for member in &members {
                    let mut flags = Vec::new();
                    if member.is_pregnant() {
                        flags.push("pregnant");
                    }
                    if member.is_toddler() {
                        flags.push("toddler");
                    }
                    if flags.is_empty() {
                        println!("{}", member);
                    } else {
                        println!("{} [{}]", member, flags.join(", "));
                    }
                }
            }
        }
        Ok(())
    }
}
