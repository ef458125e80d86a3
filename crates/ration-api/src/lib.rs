//! Remote data service boundary.
//!
//! Every backend operation answers with the same envelope: an `ok` flag, an
//! optional `result` payload, and an optional human-readable `description`
//! explaining a refusal. A failed transport (connection error, non-success
//! status, undecodable body) never produces an envelope and surfaces as
//! [`ApiError`] instead, so callers can tell "the backend said no" apart
//! from "the backend never answered".

pub mod http;
pub mod wire;

use async_trait::async_trait;
use serde::Deserialize;

pub use crate::http::HttpDataService;
use crate::wire::{
    EditProfileRequest, IngredientDto, LoginRequest, LoginResult, PlanDayDto, ProfileDto,
    RegisterRequest,
};

/// Response envelope shared by all data-service operations.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub ok: bool,
    #[serde(default = "Option::default")]
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
    /// Application-level error code some backend responses embed in an
    /// otherwise successful HTTP exchange. `401` here means the session
    /// token was refused.
    #[serde(default)]
    pub error_code: Option<u16>,
}

/// Transport-level failure: the request never produced a usable envelope.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the connection died mid-flight.
    #[error("request failed: {0}")]
    Transport(String),
    /// The backend answered with a non-success HTTP status.
    #[error("unexpected status code {0}")]
    Status(u16),
    /// The body could not be decoded into the expected envelope.
    #[error("failed to decode response: {0}")]
    Decode(String),
    /// The backend refused the session token. The persisted token has
    /// already been dropped by the time this is returned.
    #[error("session is no longer authorized")]
    Unauthorized,
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        ApiError::Transport(error.without_url().to_string())
    }
}

/// Result of a single data-service call.
pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

/// Source of the persisted session token the transport attaches to
/// requests. Clearing happens when the backend refuses the token, so a
/// stale credential never outlives the session it belonged to.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
    fn clear_token(&self);
}

/// Operations the remote data service offers.
///
/// Implementations are expected to attach the bearer token whenever one is
/// present and to report a refused token as [`ApiError::Unauthorized`].
#[async_trait]
pub trait DataService: Send + Sync {
    async fn login(&self, credentials: LoginRequest) -> ApiResult<LoginResult>;

    async fn register(&self, payload: RegisterRequest) -> ApiResult<()>;

    async fn get_profile(&self) -> ApiResult<ProfileDto>;

    async fn edit_profile(&self, payload: EditProfileRequest) -> ApiResult<()>;

    async fn get_ingredients(&self) -> ApiResult<Vec<IngredientDto>>;

    async fn get_food_plan(&self) -> ApiResult<Vec<PlanDayDto>>;

    async fn generate_food_plan(&self) -> ApiResult<()>;
}
