//! Wire DTOs and the transforms between them and the shared domain types.
//!
//! The backend speaks its own shapes: numeric body parameters, lowercase
//! enum names, flat plan rows. Everything crossing the boundary goes
//! through the mappers here so the rest of the application only ever sees
//! `ration-bridge` types.

use serde::{Deserialize, Serialize};

use ration_bridge::day::Day;
use ration_bridge::ingredient::Ingredient;
use ration_bridge::plan::{DayPlan, Meal, Mealtime, Nutrition};
use ration_bridge::user::{Gender, Goal, Profession, ProfileUpdate, RegistrationForm};

/// Credentials for the login operation.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResult {
    #[serde(default)]
    pub token: Option<String>,
}

/// Registration payload, shaped from the onboarding wizard's form.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<Goal>,
    /// Backend identifier of the chosen profession.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    pub weight: String,
    pub height: String,
    pub age: String,
}

impl RegisterRequest {
    pub fn from_form(form: &RegistrationForm) -> Self {
        Self {
            email: form.email.clone(),
            password: form.password.clone(),
            name: form.name.clone(),
            gender: form.gender,
            goal: form.goal,
            profession: form.profession.as_ref().map(|p| p.value.clone()),
            weight: form.weight.clone(),
            height: form.height.clone(),
            age: form.age.clone(),
        }
    }
}

/// Profile edit payload; only the fields the user actually changed are
/// serialized.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EditProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<Goal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
}

impl EditProfileRequest {
    pub fn from_update(update: &ProfileUpdate) -> Self {
        Self {
            email: update.email.clone(),
            name: update.name.clone(),
            gender: update.gender,
            goal: update.goal,
            profession: update.profession.as_ref().map(|p| p.value.clone()),
            weight: update.weight.clone(),
            height: update.height.clone(),
            age: update.age.clone(),
        }
    }
}

/// Backend view of the user profile. Body parameters arrive numeric.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileDto {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub profession: Option<ProfessionDto>,
    #[serde(default)]
    pub weight: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub age: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfessionDto {
    pub value: String,
    #[serde(default)]
    pub label: String,
}

/// Catalog row of the ingredient listing.
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientDto {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub calories: f32,
    #[serde(default)]
    pub protein: f32,
    #[serde(default)]
    pub fat: f32,
    #[serde(default)]
    pub carbohydrates: f32,
}

/// Plan row: one day of the weekly plan.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanDayDto {
    pub day: String,
    #[serde(default)]
    pub meals: Vec<MealDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MealDto {
    pub id: u64,
    pub title: String,
    pub mealtime: String,
    #[serde(default)]
    pub calories: f32,
    #[serde(default)]
    pub protein: f32,
    #[serde(default)]
    pub fat: f32,
    #[serde(default)]
    pub carbohydrates: f32,
}

/// Maps the backend profile onto a partial update of the in-memory one.
/// Numeric body parameters are carried as strings on the client.
pub fn map_profile(dto: &ProfileDto) -> ProfileUpdate {
    ProfileUpdate {
        id: dto.id,
        email: dto.email.clone(),
        name: dto.name.clone(),
        gender: dto.gender.as_deref().and_then(parse_gender),
        goal: dto.goal.as_deref().and_then(parse_goal),
        profession: dto.profession.as_ref().map(|p| Profession {
            value: p.value.clone(),
            label: p.label.clone(),
        }),
        weight: dto.weight.map(|value| value.to_string()),
        height: dto.height.map(|value| value.to_string()),
        age: dto.age.map(|value| value.to_string()),
    }
}

pub fn map_ingredients(rows: &[IngredientDto]) -> Vec<Ingredient> {
    rows.iter()
        .map(|row| Ingredient {
            id: row.id,
            name: row.name.clone(),
            nutrition: Nutrition {
                calories: row.calories,
                protein: row.protein,
                fat: row.fat,
                carbohydrates: row.carbohydrates,
            },
        })
        .collect()
}

/// Maps plan rows into the in-memory plan, keeping at most one entry per
/// day (the first occurrence wins). Meals with a mealtime outside the
/// known slots are dropped.
pub fn map_plan(rows: &[PlanDayDto]) -> Vec<DayPlan> {
    let mut plan: Vec<DayPlan> = Vec::with_capacity(rows.len());

    for row in rows {
        let day = Day::from_name(&row.day);
        if plan.iter().any(|entry| entry.day == day) {
            continue;
        }

        let meals = row
            .meals
            .iter()
            .filter_map(|meal| {
                Some(Meal {
                    id: meal.id,
                    title: meal.title.clone(),
                    mealtime: parse_mealtime(&meal.mealtime)?,
                    checked: false,
                    nutrition: Nutrition {
                        calories: meal.calories,
                        protein: meal.protein,
                        fat: meal.fat,
                        carbohydrates: meal.carbohydrates,
                    },
                })
            })
            .collect();

        plan.push(DayPlan { day, meals });
    }

    plan
}

fn parse_gender(name: &str) -> Option<Gender> {
    match name {
        "man" => Some(Gender::Man),
        "woman" => Some(Gender::Woman),
        _ => None,
    }
}

fn parse_goal(name: &str) -> Option<Goal> {
    match name {
        "weight_loss" => Some(Goal::WeightLoss),
        "keep" => Some(Goal::Keep),
        "training" => Some(Goal::Training),
        _ => None,
    }
}

fn parse_mealtime(name: &str) -> Option<Mealtime> {
    match name {
        "breakfast" => Some(Mealtime::Breakfast),
        "lunch" => Some(Mealtime::Lunch),
        "dinner" => Some(Mealtime::Dinner),
        "snack" => Some(Mealtime::Snack),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_numbers_become_strings() {
        let dto = ProfileDto {
            id: Some(7),
            email: Some("a@example.com".into()),
            name: Some("Anna".into()),
            gender: Some("woman".into()),
            goal: Some("weight_loss".into()),
            weight: Some(62.0),
            height: Some(170.5),
            age: Some(29),
            ..ProfileDto::default()
        };

        let update = map_profile(&dto);
        assert_eq!(update.weight.as_deref(), Some("62"));
        assert_eq!(update.height.as_deref(), Some("170.5"));
        assert_eq!(update.age.as_deref(), Some("29"));
        assert_eq!(update.gender, Some(Gender::Woman));
        assert_eq!(update.goal, Some(Goal::WeightLoss));
    }

    #[test]
    fn unknown_gender_and_goal_map_to_none() {
        let dto = ProfileDto {
            gender: Some("other".into()),
            goal: Some("bulk".into()),
            ..ProfileDto::default()
        };

        let update = map_profile(&dto);
        assert_eq!(update.gender, None);
        assert_eq!(update.goal, None);
    }

    #[test]
    fn plan_keeps_one_entry_per_day() {
        let rows = vec![
            PlanDayDto {
                day: "monday".into(),
                meals: vec![MealDto {
                    id: 1,
                    title: "Овсяная каша".into(),
                    mealtime: "breakfast".into(),
                    calories: 350.0,
                    protein: 12.0,
                    fat: 7.0,
                    carbohydrates: 55.0,
                }],
            },
            PlanDayDto {
                day: "monday".into(),
                meals: vec![],
            },
            PlanDayDto {
                day: "tuesday".into(),
                meals: vec![],
            },
        ];

        let plan = map_plan(&rows);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].day, Day::Monday);
        assert_eq!(plan[0].meals.len(), 1);
        assert_eq!(plan[1].day, Day::Tuesday);
    }

    #[test]
    fn plan_drops_unknown_mealtimes_and_coerces_unknown_days() {
        let rows = vec![PlanDayDto {
            day: "someday".into(),
            meals: vec![
                MealDto {
                    id: 1,
                    title: "Суп".into(),
                    mealtime: "lunch".into(),
                    calories: 0.0,
                    protein: 0.0,
                    fat: 0.0,
                    carbohydrates: 0.0,
                },
                MealDto {
                    id: 2,
                    title: "Кофе".into(),
                    mealtime: "brunch".into(),
                    calories: 0.0,
                    protein: 0.0,
                    fat: 0.0,
                    carbohydrates: 0.0,
                },
            ],
        }];

        let plan = map_plan(&rows);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].day, Day::Monday);
        assert_eq!(plan[0].meals.len(), 1);
        assert_eq!(plan[0].meals[0].mealtime, Mealtime::Lunch);
        assert!(!plan[0].meals[0].checked);
    }

    #[test]
    fn register_request_flattens_the_profession() {
        let form = RegistrationForm {
            email: "o@example.com".into(),
            password: "secret".into(),
            name: "Oleg".into(),
            gender: Some(Gender::Man),
            goal: Some(Goal::Keep),
            profession: Some(Profession {
                value: "office".into(),
                label: "Офисный работник".into(),
            }),
            weight: "80".into(),
            height: "182".into(),
            age: "31".into(),
        };

        let payload = RegisterRequest::from_form(&form);
        assert_eq!(payload.profession.as_deref(), Some("office"));
        assert_eq!(payload.email, "o@example.com");
    }
}
