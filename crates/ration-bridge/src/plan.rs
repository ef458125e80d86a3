use serde::{Deserialize, Serialize};

use crate::day::Day;

/// Slot a meal occupies within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mealtime {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// Nutritional content: kilocalories plus macros in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct Nutrition {
    pub calories: f32,
    pub protein: f32,
    pub fat: f32,
    pub carbohydrates: f32,
}

/// One meal entry of a day's plan. `checked` is client-side state: it
/// marks the meal as eaten and is never sent back to the backend.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Meal {
    pub id: u64,
    pub title: String,
    pub mealtime: Mealtime,
    pub checked: bool,
    pub nutrition: Nutrition,
}

/// Plan entry for a single day of week. The plan holds at most one entry
/// per [`Day`] value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DayPlan {
    pub day: Day,
    pub meals: Vec<Meal>,
}
