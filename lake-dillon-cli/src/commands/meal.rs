use chrono::NaiveDate;
use clap::{Args, Subcommand};
use lake_dillon_core::{CustomMeal, MealType, MealUpdate, NewMeal, TimeSlotType};

use super::{report_save, require_trip_date, split_members};
use crate::app::App;

#[derive(Args)]
pub struct MealCommand {
    #[command(subcommand)]
    pub command: MealSubcommand,
}

#[derive(Subcommand)]
pub enum MealSubcommand {
    /// Schedule a meal at a restaurant or a home-cooked meal
    Add {
        /// Day (YYYY-MM-DD)
        #[arg(long, short)]
        date: NaiveDate,

        /// Time slot (morning, afternoon, evening)
        #[arg(long, short)]
        slot: TimeSlotType,

        /// Meal type (breakfast, lunch, dinner, snack); defaults to snack
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        meal_type: Option<MealType>,

        /// Restaurant id
        #[arg(long, conflicts_with = "eating")]
        restaurant: Option<String>,

        /// What we're eating (home-cooked meal)
        #[arg(long)]
        eating: Option<String>,

        /// Comma-separated cooks, for home-cooked meals
        #[arg(long, requires = "eating")]
        cooks: Option<String>,

        /// Comma-separated family member ids
        #[arg(long)]
        participants: Option<String>,

        /// Reservation time (HH:MM)
        #[arg(long)]
        reservation: Option<String>,
    },

    /// Remove a scheduled meal
    Remove {
        /// Meal instance id
        id: String,

        #[arg(long, short)]
        date: NaiveDate,

        #[arg(long, short)]
        slot: TimeSlotType,
    },

    /// Change type, time, participants or reservation details
    Update {
        /// Meal instance id
        id: String,

        #[arg(long, short)]
        date: NaiveDate,

        #[arg(long, short)]
        slot: TimeSlotType,

        #[arg(long = "type", short = 't', value_name = "TYPE")]
        meal_type: Option<MealType>,

        /// Custom meal time (HH:MM)
        #[arg(long)]
        time: Option<String>,

        /// Comma-separated family member ids
        #[arg(long)]
        participants: Option<String>,

        /// Reservation time (HH:MM)
        #[arg(long)]
        reservation: Option<String>,

        /// Mark the reservation confirmed
        #[arg(long)]
        confirmed: bool,
    },
}

impl MealCommand {
    pub fn run(&self, app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            MealSubcommand::Add {
                date,
                slot,
                meal_type,
                restaurant,
                eating,
                cooks,
                participants,
                reservation,
            } => {
                require_trip_date(*date)?;
                let meal = NewMeal {
                    meal_type: *meal_type,
                    participants: participants.as_deref().map(split_members),
                    restaurant_id: restaurant.clone(),
                    custom_meal: eating.as_ref().map(|what| CustomMeal {
                        whos_cooking: cooks.as_deref().map(split_members),
                        ..CustomMeal::new(what.as_str())
                    }),
                    reservation_required: reservation.as_ref().map(|_| true),
                    reservation_time: reservation.clone(),
                    reservation_confirmed: None,
                };

                let sync = app.timeline();
                let outcome = sync.add_meal(*date, *slot, meal);
                report_save(sync, outcome.saved);
                if let Some(id) = outcome.id {
                    let added = sync.timeline().slot(*date, *slot).and_then(|s| s.meal(&id));
                    if let Some(meal) = added {
                        println!("Added to {} {}: {}", date, slot, meal);
                    }
                }
                Ok(())
            }

            MealSubcommand::Remove { id, date, slot } => {
                require_trip_date(*date)?;
                let sync = app.timeline();
                if sync.timeline().slot(*date, *slot).and_then(|s| s.meal(id)).is_none() {
                    return Err(format!("Meal {} not found in {} {}", id, date, slot).into());
                }
                let saved = sync.remove_meal(*date, *slot, id);
                report_save(sync, saved);
                println!("Removed meal {}", id);
                Ok(())
            }

            MealSubcommand::Update {
                id,
                date,
                slot,
                meal_type,
                time,
                participants,
                reservation,
                confirmed,
            } => {
                require_trip_date(*date)?;
                let update = MealUpdate {
                    meal_type: *meal_type,
                    custom_time: time.clone(),
                    participants: participants.as_deref().map(split_members),
                    reservation_required: reservation.as_ref().map(|_| true),
                    reservation_time: reservation.clone(),
                    reservation_confirmed: confirmed.then_some(true),
                    ..MealUpdate::default()
                };
                if update.is_empty() {
                    return Err("Nothing to update".into());
                }

                let sync = app.timeline();
                if sync.timeline().slot(*date, *slot).and_then(|s| s.meal(id)).is_none() {
                    return Err(format!("Meal {} not found in {} {}", id, date, slot).into());
                }
                let saved = sync.update_meal(*date, *slot, id, &update);
                report_save(sync, saved);
                if let Some(meal) = sync.timeline().slot(*date, *slot).and_then(|s| s.meal(id)) {
                    println!("Updated: {}", meal);
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::memory_app;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 27).unwrap()
    }

    fn add_command(eating: Option<&str>, restaurant: Option<&str>) -> MealCommand {
        MealCommand {
            command: MealSubcommand::Add {
                date: date(),
                slot: TimeSlotType::Evening,
                meal_type: Some(MealType::Dinner),
                restaurant: restaurant.map(str::to_string),
                eating: eating.map(str::to_string),
                cooks: eating.map(|_| "micah, sam".to_string()),
                participants: Some("jason,micah,sam,leah,walker".into()),
                reservation: None,
            },
        }
    }

    #[test]
    fn test_add_custom_meal() {
        let (mut app, _store, _objects) = memory_app();
        add_command(Some("Turkey and stuffing"), None)
            .run(&mut app)
            .unwrap();

        let slot = app
            .timeline()
            .timeline()
            .slot(date(), TimeSlotType::Evening)
            .unwrap()
            .clone();
        let meal = &slot.meals[0];
        assert_eq!(meal.label(), "Turkey and stuffing");
        assert_eq!(meal.participants.len(), 5);
        let cooks = meal.custom_meal.as_ref().unwrap().whos_cooking.clone();
        assert_eq!(cooks, Some(vec!["micah".to_string(), "sam".to_string()]));
    }

    #[test]
    fn test_update_confirms_reservation() {
        let (mut app, _store, _objects) = memory_app();
        add_command(None, Some("keystone-ranch")).run(&mut app).unwrap();
        let id = app
            .timeline()
            .timeline()
            .slot(date(), TimeSlotType::Evening)
            .unwrap()
            .meals[0]
            .id
            .clone();

        MealCommand {
            command: MealSubcommand::Update {
                id: id.clone(),
                date: date(),
                slot: TimeSlotType::Evening,
                meal_type: None,
                time: None,
                participants: None,
                reservation: Some("17:30".into()),
                confirmed: true,
            },
        }
        .run(&mut app)
        .unwrap();

        let sync = app.timeline();
        let meal = sync
            .timeline()
            .slot(date(), TimeSlotType::Evening)
            .unwrap()
            .meal(&id)
            .unwrap();
        assert_eq!(meal.reservation_time.as_deref(), Some("17:30"));
        assert_eq!(meal.reservation_confirmed, Some(true));
        assert_eq!(meal.restaurant_id.as_deref(), Some("keystone-ranch"));
    }

    #[test]
    fn test_remove_meal() {
        let (mut app, _store, _objects) = memory_app();
        add_command(None, Some("keystone-ranch")).run(&mut app).unwrap();
        let id = app
            .timeline()
            .timeline()
            .slot(date(), TimeSlotType::Evening)
            .unwrap()
            .meals[0]
            .id
            .clone();

        MealCommand {
            command: MealSubcommand::Remove {
                id,
                date: date(),
                slot: TimeSlotType::Evening,
            },
        }
        .run(&mut app)
        .unwrap();

        assert!(app
            .timeline()
            .timeline()
            .slot(date(), TimeSlotType::Evening)
            .unwrap()
            .is_empty());
    }
}
