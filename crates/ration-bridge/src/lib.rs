//! Communication bridge between UI collaborators and the application store.
//!
//! This crate defines the types and protocols used to connect a graphical
//! frontend with the asynchronous store that owns session state, the user
//! profile, the ingredient catalog, and the weekly food plan.
//!
//! The design is deliberately lightweight and unidirectional:
//! - Collaborators send commands (e.g., log in, load the plan, toggle a
//!   meal).
//! - The store pushes events (state-change notifications, transient
//!   errors, session expiry).
//!
//! Communication happens over bounded [`tokio::sync::mpsc`] channels wrapped
//! in [`StoreChannels`], providing back-pressure, async compatibility, and
//! clean separation of concerns. Collaborators that need more than the
//! event payloads read a snapshot of the shared state the store exposes.

pub mod config;
pub mod day;
pub mod ingredient;
pub mod plan;
pub mod user;

use tokio::sync::mpsc::{self, Receiver, Sender};

use crate::day::Day;

/// Settled result of a store action.
///
/// Actions never panic and never propagate errors to the caller; every
/// code path folds into one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The operation completed and state was updated accordingly.
    Success,
    /// The backend rejected the operation; the reason mirrors the service
    /// description when one was provided.
    Failure(String),
    /// The operation died on a transport or internal error before the
    /// backend could answer.
    Error(String),
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Success)
    }
}

/// Events emitted by the store to inform collaborators of state updates.
///
/// Payloads are intentionally small: an event tells a collaborator *what*
/// changed, the shared state snapshot tells it the current values.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// The authentication flag flipped (login, logout, startup restore).
    SessionChanged { authenticated: bool },
    /// The backend refused the session token; collaborators should return
    /// to the authentication entry point.
    SessionExpired,
    ProfileChanged,
    IngredientsChanged,
    PlanChanged,
    /// A tracked operation started or settled.
    PendingChanged { operation: String, active: bool },
    /// A field-scoped validation message changed (empty string clears it).
    ValidationChanged { field: String, message: String },
    /// A transient store-wide error became visible.
    ErrorShown(String),
    /// The transient error auto-expired or was replaced.
    ErrorCleared,
    DayChanged(Day),
    SnacksVisibilityChanged { disabled: bool },
    TabChanged(String),
}

/// Commands issued by collaborators to drive the store.
#[derive(Debug, Clone)]
pub enum StoreCommand {
    LogIn { login: String, password: String },
    Register(user::RegistrationForm),
    LogOut,
    LoadProfile,
    EditProfile(user::ProfileUpdate),
    LoadIngredients,
    LoadPlan,
    GeneratePlan,
    SetMealChecked { meal_id: u64, checked: bool },
    SelectDay(Day),
    SetSnacksDisabled(bool),
    SelectTab(String),
}

/// Paired `tokio::mpsc` channels for bidirectional communication between
/// UI collaborators and the store.
pub struct StoreChannels {
    /// Receiver used by collaborators to get events from the store.
    pub ui_rx: Receiver<StoreEvent>,
    /// Sender used by collaborators to send commands to the store.
    pub ui_tx: Sender<StoreCommand>,

    /// Receiver used by the store to get commands from collaborators.
    pub store_rx: Receiver<StoreCommand>,
    /// Sender used by the store to push events to collaborators.
    pub store_tx: Sender<StoreEvent>,
}

impl StoreChannels {
    /// Creates a new pair of bridged channels with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (to_store_tx, to_store_rx) = mpsc::channel(buffer);
        let (to_ui_tx, to_ui_rx) = mpsc::channel(buffer);
        Self {
            ui_tx: to_store_tx,
            ui_rx: to_ui_rx,
            store_rx: to_store_rx,
            store_tx: to_ui_tx,
        }
    }
}

impl Default for StoreChannels {
    fn default() -> Self {
        Self::new(64)
    }
}
