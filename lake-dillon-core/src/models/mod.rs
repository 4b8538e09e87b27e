mod activity;
mod day;
mod family;
mod meal;
mod meal_type;
mod packing;
mod photo;
mod time_slot;

pub use activity::{ActivityInstance, ActivityUpdate};
pub use day::{Day, ThanksgivingLocation, ThanksgivingMeal, TimeSlots, TripPhase, WeatherSummary};
pub use family::{family_members, find_member, FamilyMember};
pub use meal::{CustomMeal, MealInstance, MealUpdate, NewMeal};
pub use meal_type::MealType;
pub use packing::{PackingCategory, PackingItem};
pub use photo::{Photo, PhotoLocation};
pub use time_slot::{TimeSlot, TimeSlotType};
