//! `reqwest`-backed implementation of the data service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use ration_bridge::config::Config;

use crate::wire::{
    EditProfileRequest, IngredientDto, LoginRequest, LoginResult, PlanDayDto, ProfileDto,
    RegisterRequest,
};
use crate::{ApiError, ApiResponse, ApiResult, DataService, TokenProvider};

/// HTTP client for the remote data service.
///
/// A bearer token is attached to every request for which the token
/// provider currently holds one; login and registration simply run before
/// a token exists. A refused token (HTTP 401 or an embedded `error_code`
/// of 401) is dropped from the provider before the call returns, so the
/// next request already goes out unauthenticated.
pub struct HttpDataService {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpDataService {
    pub fn new(config: &Config, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.request_timeout_seconds),
            tokens,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.timeout(self.timeout);
        match self.tokens.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.apply_auth(self.http.get(self.url(path))).send().await?;
        self.check_response(response).await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self
            .apply_auth(self.http.post(self.url(path)).json(body))
            .send()
            .await?;
        self.check_response(response).await
    }

    async fn put_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self
            .apply_auth(self.http.put(self.url(path)).json(body))
            .send()
            .await?;
        self.check_response(response).await
    }

    /// Turns an HTTP exchange into an envelope, routing both flavors of
    /// "token refused" through [`ApiError::Unauthorized`].
    async fn check_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ApiResult<T> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.tokens.clear_token();
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|error| ApiError::Decode(error.without_url().to_string()))?;

        if envelope.error_code == Some(401) {
            self.tokens.clear_token();
            return Err(ApiError::Unauthorized);
        }

        Ok(envelope)
    }
}

#[async_trait]
impl DataService for HttpDataService {
    async fn login(&self, credentials: LoginRequest) -> ApiResult<LoginResult> {
        self.post_json("/auth/login", &credentials).await
    }

    async fn register(&self, payload: RegisterRequest) -> ApiResult<()> {
        self.post_json("/auth/register", &payload).await
    }

    async fn get_profile(&self) -> ApiResult<ProfileDto> {
        self.get_json("/user/info").await
    }

    async fn edit_profile(&self, payload: EditProfileRequest) -> ApiResult<()> {
        self.put_json("/user/info", &payload).await
    }

    async fn get_ingredients(&self) -> ApiResult<Vec<IngredientDto>> {
        self.get_json("/ingredients").await
    }

    async fn get_food_plan(&self) -> ApiResult<Vec<PlanDayDto>> {
        self.get_json("/food/plan").await
    }

    async fn generate_food_plan(&self) -> ApiResult<()> {
        self.post_json("/food/plan/generate", &()).await
    }
}
