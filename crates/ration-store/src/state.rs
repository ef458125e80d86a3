use ration_bridge::day::Day;
use ration_bridge::ingredient::Ingredient;
use ration_bridge::plan::{DayPlan, Meal, Mealtime};
use ration_bridge::user::{ProfileUpdate, UserProfile};

/// Busy flags for the tracked asynchronous operations.
///
/// The set of tracked operations is closed: [`State::set_loading`] refuses
/// names outside of it, so collaborators cannot grow the map at runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingState {
    pub auth: bool,
    pub user_info: bool,
    pub edit_user_info: bool,
    pub plan: bool,
    pub ingredients: bool,
}

/// Field-scoped validation messages; an empty string means no error.
/// Same closed-set contract as [`PendingState`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationState {
    pub auth: String,
}

/// The core application state: session, domain data caches, selection,
/// and the pending/validation trackers.
///
/// This struct contains all the data collaborators render from. It is
/// designed to be wrapped in thread-safe, async-friendly concurrency
/// primitives (see [`SharedState`]) to allow safe concurrent reads and
/// occasional writes from multiple tasks.
#[derive(Debug, Clone)]
pub struct State {
    /// The user profile as last loaded or edited.
    pub user_model: UserProfile,
    /// Transient store-wide error message; empty when nothing is shown.
    pub error: String,
    /// Whether a session token is believed to be valid.
    pub is_auth: bool,
    /// The session token, mirrored into local storage.
    pub token: Option<String>,
    /// The day of week the UI and plan derivation operate against.
    pub day: Day,
    /// Last-active UI tab, restored across runs.
    pub active_tab: Option<String>,
    /// Whether snack meals are hidden for the selected day.
    pub is_snacks_disabled: bool,
    /// Ingredient catalog, loaded once at startup.
    pub ingredients: Vec<Ingredient>,
    /// Weekly food plan, at most one entry per day of week.
    pub food: Vec<DayPlan>,
    pub validation: ValidationState,
    pub pending: PendingState,
}

impl State {
    pub fn new(day: Day) -> Self {
        Self {
            user_model: UserProfile::default(),
            error: String::new(),
            is_auth: false,
            token: None,
            day,
            active_tab: None,
            is_snacks_disabled: false,
            ingredients: Vec::new(),
            food: Vec::new(),
            validation: ValidationState::default(),
            pending: PendingState::default(),
        }
    }

    /// Flips the busy flag for a tracked operation. Returns `false` (and
    /// changes nothing) for names outside the tracked set.
    pub fn set_loading(&mut self, operation: &str, value: bool) -> bool {
        match operation {
            "auth" => self.pending.auth = value,
            "user_info" => self.pending.user_info = value,
            "edit_user_info" => self.pending.edit_user_info = value,
            "plan" => self.pending.plan = value,
            "ingredients" => self.pending.ingredients = value,
            _ => return false,
        }
        true
    }

    /// Sets the validation message for a tracked field. Returns `false`
    /// (and changes nothing) for names outside the tracked set.
    pub fn set_validation_error(&mut self, field: &str, message: &str) -> bool {
        match field {
            "auth" => self.validation.auth = message.to_string(),
            _ => return false,
        }
        true
    }

    /// Replaces the profile wholesale: the default template with `update`
    /// merged on top.
    pub fn set_user_model(&mut self, update: &ProfileUpdate) {
        self.user_model = UserProfile::from_update(update);
    }

    /// Patches the existing profile with the fields `update` carries.
    pub fn patch_user_model(&mut self, update: &ProfileUpdate) {
        self.user_model.merge(update);
    }

    /// Storage key of the snack-visibility flag for the selected day.
    pub fn snacks_storage_key(&self) -> String {
        format!("snacks_disabled_{}", self.day)
    }

    pub fn is_plan_loaded(&self) -> bool {
        !self.food.is_empty()
    }

    /// The selected day's meals, with snacks filtered out while they are
    /// disabled for that day. Empty when the plan has no entry for the
    /// day.
    pub fn meals_for_selected_day(&self) -> Vec<Meal> {
        let meals = self
            .food
            .iter()
            .find(|entry| entry.day == self.day)
            .map(|entry| entry.meals.as_slice())
            .unwrap_or(&[]);

        if self.is_snacks_disabled {
            meals
                .iter()
                .filter(|meal| meal.mealtime != Mealtime::Snack)
                .cloned()
                .collect()
        } else {
            meals.to_vec()
        }
    }

    /// Looks a meal up by id within the selected day's plan entry.
    pub fn meal_mut(&mut self, meal_id: u64) -> Option<&mut Meal> {
        let day = self.day;
        self.food
            .iter_mut()
            .find(|entry| entry.day == day)?
            .meals
            .iter_mut()
            .find(|meal| meal.id == meal_id)
    }
}

/// Thread-safe, async-friendly shared reference to the application
/// [`State`].
///
/// This is the recommended way to hand state to async handlers and
/// collaborators that need read access (and occasional write access).
pub type SharedState = std::sync::Arc<tokio::sync::RwLock<State>>;
