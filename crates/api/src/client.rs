use crate::backend::Backend;
use crate::error::{ApiError, ApiResult};
use crate::types::{CheckResponse, CheckStatus, ErrorBody, LoginRequest, SetupPayload};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// HTTP client for the installation's `/api` endpoints.
///
/// The client keeps a cookie store, so the session cookie set by a successful
/// login is sent with every later request, the way a browser would.
#[derive(Clone)]
pub struct ZenApi {
    http: Client,
    base_url: Url,
}

impl ZenApi {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        Self::with_timeouts(base_url, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeouts(
        base_url: &str,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> ApiResult<Self> {
        let http = Client::builder()
            .user_agent("zen/0.2")
            .cookie_store(true)
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()?;

        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base_url.join(path)?)
    }
}

fn transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Timeout(format!("Request timed out: {}", error))
    } else {
        ApiError::Network(error)
    }
}

async fn ensure_success(response: Response, fallback: &str) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.json::<ErrorBody>().await.unwrap_or_default();
    Err(ApiError::Rejected {
        status: status.as_u16(),
        message: body.into_message(fallback),
    })
}

#[async_trait]
impl Backend for ZenApi {
    async fn check(&self) -> ApiResult<CheckStatus> {
        let url = self.endpoint("api/check")?;
        debug!(%url, "Checking installation status");

        let response = self.http.get(url).send().await.map_err(transport_error)?;
        let response = ensure_success(response, "Status check failed").await?;
        let body = response.text().await.map_err(transport_error)?;

        let data: CheckResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        debug!(status = ?data.status, "Installation status received");
        Ok(data.status)
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<()> {
        let url = self.endpoint("api/login")?;
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response, "Login failed").await?;
        info!("Logged in");
        Ok(())
    }

    async fn logout(&self) -> ApiResult<()> {
        let url = self.endpoint("api/logout")?;
        let response = self.http.post(url).send().await.map_err(transport_error)?;

        ensure_success(response, "Logout failed").await?;
        info!("Logged out");
        Ok(())
    }

    async fn setup(&self, payload: &SetupPayload) -> ApiResult<()> {
        let url = self.endpoint("api/setup")?;
        debug!(apps = payload.apps.len(), "Submitting setup");

        let response = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response, "Setup failed").await?;
        info!("Setup accepted by server");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ZenApi;

    #[test]
    fn base_url_gains_trailing_slash() {
        let api = ZenApi::new("http://localhost:8888/zen").expect("build client");
        assert_eq!(
            api.endpoint("api/check").expect("join").as_str(),
            "http://localhost:8888/zen/api/check"
        );
    }

    #[test]
    fn rejects_malformed_base_url() {
        assert!(ZenApi::new("not a url").is_err());
    }
}
