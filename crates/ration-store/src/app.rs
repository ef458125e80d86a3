//! Store context and command dispatching utilities.
//!
//! The context owns the shared state, the data service, the local storage
//! handle, and the event channel collaborators listen on. Synchronous
//! setters (day, snacks, tab, token) live here; operations that talk to
//! the data service live in the [`crate::services`] handler modules.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use ration_api::{ApiError, DataService};
use ration_bridge::day::Day;
use ration_bridge::user::UserProfile;
use ration_bridge::{ActionOutcome, StoreCommand, StoreEvent};
use tokio::sync::RwLock;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::task::JoinHandle;

use crate::persist::{self, LocalStore};
use crate::services;
use crate::state::{SharedState, State};

/// How long a transient error stays visible before it auto-clears.
const ERROR_VISIBILITY: Duration = Duration::from_secs(5);

/// Shared application context passed to services and command handlers.
pub struct StoreContext {
    /// Mutable runtime application state shared across handlers.
    pub state: SharedState,
    /// The remote data service all operations go through.
    pub service: Arc<dyn DataService>,
    /// Local persistent storage for the token and UI flags.
    pub local: Arc<dyn LocalStore>,
    /// Outbound channel to collaborators.
    tx: Sender<StoreEvent>,
    /// Auto-clear timer of the currently visible transient error.
    error_timer: Mutex<Option<JoinHandle<()>>>,
}

impl StoreContext {
    /// Builds a store around the given collaborator-facing event channel.
    /// The selected day starts at the real-world current day.
    pub fn new(
        service: Arc<dyn DataService>,
        local: Arc<dyn LocalStore>,
        tx: Sender<StoreEvent>,
    ) -> Arc<Self> {
        Arc::new(Self {
            state: Arc::new(RwLock::new(State::new(Day::today()))),
            service,
            local,
            tx,
            error_timer: Mutex::new(None),
        })
    }

    /// Brings the store up: restores the persisted tab and session, reads
    /// the snack flag for the current day, and loads the ingredient
    /// catalog.
    pub async fn initialize(self: &Arc<Self>) {
        if let Some(tab) = self.local.get(persist::ACTIVE_TAB_KEY) {
            let mut state = self.state.write().await;
            state.active_tab = Some(tab);
        }

        self.init_auth().await;
        self.update_snacks().await;

        services::ingredient_service::handle_load(self.clone()).await;
    }

    /// Restores the session from the persisted token. With no token the
    /// store stays unauthenticated and nothing else happens; with one, the
    /// profile load runs in the background.
    pub async fn init_auth(self: &Arc<Self>) {
        let Some(token) = self.local.get(persist::TOKEN_KEY) else {
            self.set_auth(false).await;
            return;
        };

        {
            let mut state = self.state.write().await;
            state.token = Some(token);
        }
        self.set_auth(true).await;

        let context = self.clone();
        tokio::spawn(async move {
            services::profile_service::handle_load(context).await;
        });
    }

    /// Read and dispatch collaborator commands until the channel closes.
    pub async fn consume_commands(self: &Arc<Self>, mut rx: Receiver<StoreCommand>) {
        while let Some(command) = rx.recv().await {
            log::debug!("Got a collaborator command: {command:?}");
            self.dispatch_command(command).await;
        }
    }

    /// Dispatches the received command down to individual service
    /// handlers and setters.
    async fn dispatch_command(self: &Arc<Self>, command: StoreCommand) {
        match command {
            StoreCommand::LogIn { login, password } => {
                services::auth_service::handle_login(self.clone(), login, password).await;
            }
            StoreCommand::Register(form) => {
                services::auth_service::handle_register(self.clone(), form).await;
            }
            StoreCommand::LogOut => self.unauthorise().await,
            StoreCommand::LoadProfile => {
                services::profile_service::handle_load(self.clone()).await;
            }
            StoreCommand::EditProfile(update) => {
                services::profile_service::handle_edit(self.clone(), update).await;
            }
            StoreCommand::LoadIngredients => {
                services::ingredient_service::handle_load(self.clone()).await;
            }
            StoreCommand::LoadPlan => {
                services::plan_service::handle_load_plan(self.clone()).await;
            }
            StoreCommand::GeneratePlan => {
                services::plan_service::handle_generate_plan(self.clone()).await;
            }
            StoreCommand::SetMealChecked { meal_id, checked } => {
                services::plan_service::handle_meal_checked(self.clone(), checked, meal_id).await;
            }
            StoreCommand::SelectDay(day) => self.set_day(day).await,
            StoreCommand::SetSnacksDisabled(disabled) => self.set_snacks_disabled(disabled).await,
            StoreCommand::SelectTab(tab) => self.set_active_tab(tab).await,
        }
    }

    /// Push an event to collaborators. Nobody listening is not an error:
    /// the store keeps working headless.
    pub async fn send(&self, event: StoreEvent) {
        if self.tx.send(event).await.is_err() {
            log::debug!("No collaborator is listening for store events");
        }
    }

    /// Flips a tracked busy flag and notifies collaborators. Names outside
    /// the tracked set are ignored.
    pub async fn set_loading(&self, operation: &str, value: bool) {
        let recognized = {
            let mut state = self.state.write().await;
            state.set_loading(operation, value)
        };

        if recognized {
            self.send(StoreEvent::PendingChanged {
                operation: operation.to_string(),
                active: value,
            })
            .await;
        }
    }

    /// Sets a tracked validation message and notifies collaborators. Names
    /// outside the tracked set are ignored.
    pub async fn set_validation_error(&self, field: &str, message: &str) {
        let recognized = {
            let mut state = self.state.write().await;
            state.set_validation_error(field, message)
        };

        if recognized {
            self.send(StoreEvent::ValidationChanged {
                field: field.to_string(),
                message: message.to_string(),
            })
            .await;
        }
    }

    /// Updates the in-memory token and mirrors the change into local
    /// storage: `Some` is written through, `None` deletes the persisted
    /// value.
    pub async fn set_token(&self, token: Option<String>) {
        {
            let mut state = self.state.write().await;
            state.token = token.clone();
        }

        match token {
            Some(token) => self.local.set(persist::TOKEN_KEY, &token),
            None => self.local.remove(persist::TOKEN_KEY),
        }
    }

    pub async fn set_auth(&self, authenticated: bool) {
        {
            let mut state = self.state.write().await;
            state.is_auth = authenticated;
        }
        self.send(StoreEvent::SessionChanged { authenticated }).await;
    }

    /// Drops the session: token gone from memory and storage, plan
    /// cleared, profile back to the default template. The ingredient
    /// catalog survives; it is not tied to a user.
    pub async fn unauthorise(&self) {
        self.set_token(None).await;

        {
            let mut state = self.state.write().await;
            state.is_auth = false;
            state.food.clear();
            state.user_model = UserProfile::default();
        }

        self.send(StoreEvent::SessionChanged {
            authenticated: false,
        })
        .await;
        self.send(StoreEvent::PlanChanged).await;
        self.send(StoreEvent::ProfileChanged).await;
    }

    /// Shows a transient store-wide error. A new message preempts the
    /// previous one's countdown; the message clears itself after
    /// [`ERROR_VISIBILITY`].
    pub async fn show_error(self: &Arc<Self>, message: impl Into<String>) {
        let message = message.into();

        if let Some(previous) = self
            .error_timer
            .lock()
            .expect("error timer lock poisoned")
            .take()
        {
            previous.abort();
        }

        {
            let mut state = self.state.write().await;
            state.error = message.clone();
        }
        self.send(StoreEvent::ErrorShown(message)).await;

        let context = self.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(ERROR_VISIBILITY).await;
            {
                let mut state = context.state.write().await;
                state.error.clear();
            }
            context.send(StoreEvent::ErrorCleared).await;
        });

        *self
            .error_timer
            .lock()
            .expect("error timer lock poisoned") = Some(timer);
    }

    /// Selects a day and re-reads its persisted snack-visibility flag.
    pub async fn set_day(&self, day: Day) {
        {
            let mut state = self.state.write().await;
            state.day = day;
        }
        self.send(StoreEvent::DayChanged(day)).await;
        self.update_snacks().await;
    }

    /// Untyped entry point for collaborators holding a day name; unknown
    /// names coerce to Monday.
    pub async fn set_day_by_name(&self, name: &str) {
        self.set_day(Day::from_name(name)).await;
    }

    /// Recomputes the snack-visibility flag from storage for the selected
    /// day.
    pub async fn update_snacks(&self) {
        let key = {
            let state = self.state.read().await;
            state.snacks_storage_key()
        };
        let disabled = self.local.get(&key).as_deref() == Some("true");

        {
            let mut state = self.state.write().await;
            state.is_snacks_disabled = disabled;
        }
        self.send(StoreEvent::SnacksVisibilityChanged { disabled })
            .await;
    }

    /// Toggles snack visibility for the selected day and persists the
    /// choice under that day's key.
    pub async fn set_snacks_disabled(&self, disabled: bool) {
        let key = {
            let mut state = self.state.write().await;
            state.is_snacks_disabled = disabled;
            state.snacks_storage_key()
        };
        self.local.set(&key, if disabled { "true" } else { "false" });

        self.send(StoreEvent::SnacksVisibilityChanged { disabled })
            .await;
    }

    /// Remembers the active UI tab across runs.
    pub async fn set_active_tab(&self, tab: String) {
        self.local.set(persist::ACTIVE_TAB_KEY, &tab);

        {
            let mut state = self.state.write().await;
            state.active_tab = Some(tab.clone());
        }
        self.send(StoreEvent::TabChanged(tab)).await;
    }

    /// Empties the plan cache, notifying collaborators.
    pub(crate) async fn clear_plan(&self) {
        {
            let mut state = self.state.write().await;
            state.food.clear();
        }
        self.send(StoreEvent::PlanChanged).await;
    }

    /// Folds a transport failure into an action outcome. A refused token
    /// additionally drops the session and tells collaborators to return
    /// to the authentication entry point.
    pub(crate) async fn fail_action(&self, operation: &str, error: ApiError) -> ActionOutcome {
        log::error!("{operation} failed: {error}");

        if matches!(error, ApiError::Unauthorized) {
            self.unauthorise().await;
            self.send(StoreEvent::SessionExpired).await;
        }

        ActionOutcome::Error(error.to_string())
    }
}

impl Drop for StoreContext {
    fn drop(&mut self) {
        if let Ok(mut timer) = self.error_timer.lock() {
            if let Some(timer) = timer.take() {
                timer.abort();
            }
        }
    }
}
