//! Common API types and utilities

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use bt_client::BioTimeError;

/// Standard error payload for upstream communication failures.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub error: String,
    pub detail: String,
}

/// Pagination parameters, mirrored to upstream verbatim.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

/// Maps client errors onto the local surface.
///
/// Every upstream communication failure is reported uniformly as 502,
/// with the original status and body preserved inside `detail` for
/// diagnostics. Upstream 404s map the same way: they are a failure to
/// serve the proxied resource, not a locally-missing route.
#[derive(Debug)]
pub struct GatewayError(pub BioTimeError);

impl From<BioTimeError> for GatewayError {
    fn from(err: BioTimeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let error = ApiError {
            error: "failed to communicate with BioTime".to_string(),
            detail: self.0.to_string(),
        };
        (StatusCode::BAD_GATEWAY, Json(error)).into_response()
    }
}
