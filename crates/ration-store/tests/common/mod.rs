//! Shared helpers for store integration tests: a scriptable data service
//! and a store wired to in-memory storage.

// Every test binary pulls this module in and uses its own subset.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use ration_api::wire::{
    EditProfileRequest, IngredientDto, LoginRequest, LoginResult, PlanDayDto, ProfileDto,
    RegisterRequest,
};
use ration_api::{ApiError, ApiResponse, ApiResult, DataService};
use ration_bridge::StoreEvent;
use ration_store::StoreContext;
use ration_store::persist::MemoryStore;
use tokio::sync::Semaphore;
use tokio::sync::mpsc::{self, Receiver};

/// Builds a response the way a scripted backend would answer.
pub fn envelope<T>(ok: bool, result: Option<T>, description: Option<&str>) -> ApiResponse<T> {
    ApiResponse {
        ok,
        result,
        description: description.map(str::to_string),
        error_code: None,
    }
}

pub type Script<T> = Box<dyn Fn() -> ApiResult<T> + Send + Sync>;

pub fn respond_ok<T: Send + 'static>(make: impl Fn() -> T + Send + Sync + 'static) -> Script<T> {
    Box::new(move || Ok(envelope(true, Some(make()), None)))
}

pub fn respond_ok_empty<T: Send + 'static>() -> Script<T> {
    Box::new(|| Ok(envelope(true, None, None)))
}

pub fn respond_fail<T: Send + 'static>(description: &str) -> Script<T> {
    let description = description.to_string();
    Box::new(move || Ok(envelope(false, None, Some(description.as_str()))))
}

pub fn respond_transport_error<T: Send + 'static>() -> Script<T> {
    Box::new(|| Err(ApiError::Transport("connection reset".to_string())))
}

pub fn respond_unauthorized<T: Send + 'static>() -> Script<T> {
    Box::new(|| Err(ApiError::Unauthorized))
}

/// Scripted stand-in for the remote data service. Every operation answers
/// from its script; call counters allow asserting how often the store
/// actually reached out.
pub struct MockService {
    pub login: Script<LoginResult>,
    pub register: Script<()>,
    pub profile: Script<ProfileDto>,
    pub edit_profile: Script<()>,
    pub ingredients: Script<Vec<IngredientDto>>,
    pub plan: Script<Vec<PlanDayDto>>,
    pub generate: Script<()>,

    pub login_calls: AtomicUsize,
    pub profile_calls: AtomicUsize,
    pub ingredient_calls: AtomicUsize,
    pub plan_calls: AtomicUsize,
    pub generate_calls: AtomicUsize,

    /// When set, `get_food_plan` consumes a permit before answering,
    /// letting a test hold a fetch in flight.
    pub plan_gate: Option<Arc<Semaphore>>,
}

impl Default for MockService {
    fn default() -> Self {
        Self {
            login: respond_ok(|| LoginResult {
                token: Some("token-1".to_string()),
            }),
            register: respond_ok_empty(),
            profile: respond_ok(ProfileDto::default),
            edit_profile: respond_ok_empty(),
            ingredients: respond_ok(Vec::new),
            plan: respond_ok(Vec::new),
            generate: respond_ok_empty(),
            login_calls: AtomicUsize::new(0),
            profile_calls: AtomicUsize::new(0),
            ingredient_calls: AtomicUsize::new(0),
            plan_calls: AtomicUsize::new(0),
            generate_calls: AtomicUsize::new(0),
            plan_gate: None,
        }
    }
}

#[async_trait]
impl DataService for MockService {
    async fn login(&self, _credentials: LoginRequest) -> ApiResult<LoginResult> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        (self.login)()
    }

    async fn register(&self, _payload: RegisterRequest) -> ApiResult<()> {
        (self.register)()
    }

    async fn get_profile(&self) -> ApiResult<ProfileDto> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        (self.profile)()
    }

    async fn edit_profile(&self, _payload: EditProfileRequest) -> ApiResult<()> {
        (self.edit_profile)()
    }

    async fn get_ingredients(&self) -> ApiResult<Vec<IngredientDto>> {
        self.ingredient_calls.fetch_add(1, Ordering::SeqCst);
        (self.ingredients)()
    }

    async fn get_food_plan(&self) -> ApiResult<Vec<PlanDayDto>> {
        self.plan_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.plan_gate {
            gate.acquire().await.expect("plan gate closed").forget();
        }
        (self.plan)()
    }

    async fn generate_food_plan(&self) -> ApiResult<()> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        (self.generate)()
    }
}

/// Wires a store to the given mock and in-memory storage. The mock stays
/// accessible for counter assertions.
pub fn make_store(
    service: MockService,
) -> (
    Arc<StoreContext>,
    Arc<MockService>,
    Arc<MemoryStore>,
    Receiver<StoreEvent>,
) {
    let (tx, rx) = mpsc::channel(256);
    let service = Arc::new(service);
    let local = Arc::new(MemoryStore::default());
    let context = StoreContext::new(service.clone(), local.clone(), tx);
    (context, service, local, rx)
}

/// Lets already-ready background tasks (spawned loads, fired timers) run
/// to completion on the current-thread test runtime.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Drains everything currently sitting in the event channel.
pub fn drain_events(rx: &mut Receiver<StoreEvent>) -> Vec<StoreEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
