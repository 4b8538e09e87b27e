use serde::{Deserialize, Serialize};
use std::fmt;

use super::meal_type::MealType;
use super::photo::Photo;

/// A home-cooked (or otherwise off-catalog) meal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomMeal {
    pub what_were_eating: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whos_cooking: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CustomMeal {
    pub fn new(what_were_eating: impl Into<String>) -> Self {
        Self {
            what_were_eating: what_were_eating.into(),
            ..Self::default()
        }
    }
}

/// A meal scheduled into one day and time slot.
///
/// Either `restaurant_id` or `custom_meal` describes what is eaten; this is
/// not enforced at this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealInstance {
    pub id: String,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_meal: Option<CustomMeal>,
    /// Family member ids.
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_confirmed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<Photo>>,
}

impl MealInstance {
    pub fn photos(&self) -> &[Photo] {
        self.photos.as_deref().unwrap_or_default()
    }

    /// What the meal is: the custom description, else the restaurant id.
    pub fn label(&self) -> &str {
        match (&self.custom_meal, &self.restaurant_id) {
            (Some(custom), _) if !custom.what_were_eating.is_empty() => {
                custom.what_were_eating.as_str()
            }
            (Some(_), _) => "Custom Meal",
            (None, Some(restaurant)) => restaurant.as_str(),
            (None, None) => "Unplanned",
        }
    }
}

impl fmt::Display for MealInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.meal_type, self.label(), self.id)?;
        if !self.participants.is_empty() {
            write!(f, " with {}", self.participants.join(", "))?;
        }
        if let Some(time) = &self.reservation_time {
            let state = match self.reservation_confirmed {
                Some(true) => "confirmed",
                _ => "unconfirmed",
            };
            write!(f, " (reservation {} {})", time, state)?;
        }
        Ok(())
    }
}

/// Fields accepted when scheduling a new meal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewMeal {
    pub meal_type: Option<MealType>,
    pub participants: Option<Vec<String>>,
    pub restaurant_id: Option<String>,
    pub custom_meal: Option<CustomMeal>,
    pub reservation_required: Option<bool>,
    pub reservation_time: Option<String>,
    pub reservation_confirmed: Option<bool>,
}

impl NewMeal {
    pub fn at_restaurant(meal_type: MealType, restaurant_id: impl Into<String>) -> Self {
        Self {
            meal_type: Some(meal_type),
            restaurant_id: Some(restaurant_id.into()),
            ..Self::default()
        }
    }

    pub fn custom(meal_type: MealType, meal: CustomMeal) -> Self {
        Self {
            meal_type: Some(meal_type),
            custom_meal: Some(meal),
            ..Self::default()
        }
    }

    pub fn with_participants(mut self, participants: Vec<String>) -> Self {
        self.participants = Some(participants);
        self
    }

    /// Builds the instance, defaulting the type to snack and participants to none.
    pub fn into_instance(self, id: impl Into<String>) -> MealInstance {
        MealInstance {
            id: id.into(),
            meal_type: self.meal_type.unwrap_or_default(),
            custom_time: None,
            restaurant_id: self.restaurant_id,
            custom_meal: self.custom_meal,
            participants: self.participants.unwrap_or_default(),
            reservation_required: self.reservation_required,
            reservation_time: self.reservation_time,
            reservation_confirmed: self.reservation_confirmed,
            photos: None,
        }
    }
}

/// Partial update for a [`MealInstance`]; `Some` fields overwrite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealUpdate {
    pub meal_type: Option<MealType>,
    pub custom_time: Option<String>,
    pub restaurant_id: Option<String>,
    pub custom_meal: Option<CustomMeal>,
    pub participants: Option<Vec<String>>,
    pub reservation_required: Option<bool>,
    pub reservation_time: Option<String>,
    pub reservation_confirmed: Option<bool>,
    pub photos: Option<Vec<Photo>>,
}

impl MealUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, meal: &MealInstance) -> MealInstance {
        let mut merged = meal.clone();
        if let Some(meal_type) = self.meal_type {
            merged.meal_type = meal_type;
        }
        if let Some(time) = &self.custom_time {
            merged.custom_time = Some(time.clone());
        }
        if let Some(restaurant) = &self.restaurant_id {
            merged.restaurant_id = Some(restaurant.clone());
        }
        if let Some(custom) = &self.custom_meal {
            merged.custom_meal = Some(custom.clone());
        }
        if let Some(participants) = &self.participants {
            merged.participants = participants.clone();
        }
        if let Some(required) = self.reservation_required {
            merged.reservation_required = Some(required);
        }
        if let Some(time) = &self.reservation_time {
            merged.reservation_time = Some(time.clone());
        }
        if let Some(confirmed) = self.reservation_confirmed {
            merged.reservation_confirmed = Some(confirmed);
        }
        if let Some(photos) = &self.photos {
            merged.photos = Some(photos.clone());
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_meal_defaults() {
        let meal = NewMeal::default().into_instance("meal-1");
        assert_eq!(meal.meal_type, MealType::Snack);
        assert!(meal.participants.is_empty());
        assert!(meal.photos.is_none());
    }

    #[test]
    fn test_new_meal_keeps_reservation_fields() {
        let new_meal = NewMeal {
            reservation_required: Some(true),
            reservation_time: Some("18:30".into()),
            ..NewMeal::at_restaurant(MealType::Dinner, "mountain-lyon")
        };
        let meal = new_meal.into_instance("meal-2");
        assert_eq!(meal.restaurant_id.as_deref(), Some("mountain-lyon"));
        assert_eq!(meal.reservation_required, Some(true));
        assert_eq!(meal.reservation_time.as_deref(), Some("18:30"));
    }

    #[test]
    fn test_label() {
        let custom = NewMeal::custom(MealType::Dinner, CustomMeal::new("Chili")).into_instance("m");
        assert_eq!(custom.label(), "Chili");

        let restaurant = NewMeal::at_restaurant(MealType::Lunch, "r1").into_instance("m");
        assert_eq!(restaurant.label(), "r1");

        let blank = NewMeal::custom(MealType::Lunch, CustomMeal::default()).into_instance("m");
        assert_eq!(blank.label(), "Custom Meal");
    }

    #[test]
    fn test_meal_update_merges() {
        let meal = NewMeal::at_restaurant(MealType::Lunch, "r1")
            .with_participants(vec!["sam".into()])
            .into_instance("meal-3");
        let patch = MealUpdate {
            reservation_confirmed: Some(true),
            ..MealUpdate::default()
        };

        let merged = patch.apply(&meal);
        assert_eq!(merged.reservation_confirmed, Some(true));
        assert_eq!(merged.participants, vec!["sam".to_string()]);
        assert_eq!(merged.restaurant_id.as_deref(), Some("r1"));
    }

    #[test]
    fn test_meal_type_serializes_as_type() {
        let meal = NewMeal::at_restaurant(MealType::Lunch, "r1").into_instance("meal-4");
        let json = serde_json::to_value(&meal).unwrap();
        assert_eq!(json["type"], "lunch");
        assert_eq!(json["restaurantId"], "r1");
        assert_eq!(json["participants"], serde_json::json!([]));
    }
}
