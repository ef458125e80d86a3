use serde::{Deserialize, Serialize};

use crate::plan::Nutrition;

/// Catalog ingredient, with nutritional attributes per 100 g.
///
/// The catalog is loaded once at startup and treated as read-mostly
/// reference data for the session's lifetime.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Ingredient {
    pub id: u64,
    pub name: String,
    pub nutrition: Nutrition,
}
