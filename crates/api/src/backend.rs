use crate::error::ApiResult;
use crate::types::{CheckStatus, LoginRequest, SetupPayload};
use async_trait::async_trait;

/// The four server calls the client depends on. [`crate::ZenApi`] talks HTTP;
/// tests substitute their own implementation.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /api/check`
    async fn check(&self) -> ApiResult<CheckStatus>;

    /// `POST /api/login`. On success the session cookie is kept by the client.
    async fn login(&self, request: &LoginRequest) -> ApiResult<()>;

    /// `POST /api/logout`
    async fn logout(&self) -> ApiResult<()>;

    /// `POST /api/setup`
    async fn setup(&self, payload: &SetupPayload) -> ApiResult<()>;
}
