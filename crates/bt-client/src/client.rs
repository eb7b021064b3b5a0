//! Core request machinery: token cache, login and the retry-on-expiry
//! send path every resource accessor goes through.

use std::time::Duration;

use parking_lot::Mutex;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::{BioTimeError, Result};

/// Connection settings for an upstream BioTime deployment.
#[derive(Debug, Clone)]
pub struct BioTimeConfig {
    /// Base URL, e.g. `http://biotime.example.com:8081`.
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl BioTimeConfig {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Client for the BioTime REST API.
///
/// Holds at most one token in process memory. The token is obtained
/// lazily on the first authenticated call and dropped whenever upstream
/// answers 401. Concurrent callers may both observe an expired token and
/// both log in again; any valid token is interchangeable, so the last
/// write wins and the only cost is a redundant login round trip.
pub struct BioTimeClient {
    http: reqwest::Client,
    config: BioTimeConfig,
    token: Mutex<Option<String>>,
}

impl BioTimeClient {
    pub fn new(config: BioTimeConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            config,
            token: Mutex::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Exchange the configured credentials for a fresh token and cache it.
    ///
    /// Overwrites whatever the cache held; re-login with the same
    /// credentials always yields a usable token.
    pub(crate) async fn login(&self) -> Result<String> {
        info!("Authenticating against BioTime");

        let response = self
            .http
            .post(self.url("jwt-api-token-auth/"))
            .json(&LoginRequest {
                username: &self.config.username,
                password: &self.config.password,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("BioTime login failed with status {}: {}", status, body);
            return Err(BioTimeError::Authentication {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let login: LoginResponse =
            serde_json::from_str(&body).map_err(|_| BioTimeError::Authentication {
                status: status.as_u16(),
                body: "empty or malformed login response".to_string(),
            })?;

        if login.token.is_empty() {
            return Err(BioTimeError::Authentication {
                status: status.as_u16(),
                body: "login response carried an empty token".to_string(),
            });
        }

        *self.token.lock() = Some(login.token.clone());
        info!("Authenticated against BioTime");
        Ok(login.token)
    }

    /// Current token, logging in first when none is cached.
    pub(crate) async fn token(&self) -> Result<String> {
        let cached = self.token.lock().clone();
        match cached {
            Some(token) => Ok(token),
            None => self.login().await,
        }
    }

    pub(crate) fn invalidate_token(&self) {
        *self.token.lock() = None;
    }

    /// Build and send one authenticated request. BioTime expects the
    /// `JWT` authorization scheme, not `Bearer`.
    pub(crate) async fn send_request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: &str,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self
            .http
            .request(method, self.url(path))
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("JWT {token}"));

        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    /// Send a request, retrying exactly once on 401.
    ///
    /// On 401 the cached token is discarded, a re-login happens
    /// unconditionally and the identical request is resent. A second 401
    /// is not retried again; it surfaces as `Upstream { 401, .. }`,
    /// bounding the loop to one extra round trip against a down or
    /// misconfigured auth endpoint.
    ///
    /// With `expect_json` set, a success response whose content type is
    /// present but not JSON is rejected before any parsing.
    pub(crate) async fn send_with_retry<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        expect_json: bool,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let token = self.token().await?;
        let mut response = self.send_request(method.clone(), path, body, &token).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("BioTime token expired, logging in again");
            self.invalidate_token();
            let token = self.login().await?;
            response = self.send_request(method, path, body, &token).await?;
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("BioTime responded {}: {}", status, body);
            return Err(BioTimeError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        if expect_json {
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string();

            if !content_type.is_empty() && !content_type.contains("json") {
                error!("BioTime returned non-JSON content ({}) for {}", content_type, path);
                return Err(BioTimeError::ContentType {
                    content_type,
                    url: path.to_string(),
                });
            }
        }

        Ok(response)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        expect_json: bool,
    ) -> Result<T> {
        let response = self
            .send_with_retry::<()>(Method::GET, path, None, expect_json)
            .await?;
        Self::read_json(response).await
    }

    /// Read a success response as text and parse it, so that a malformed
    /// body maps to `Deserialization` rather than a transport error.
    pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
