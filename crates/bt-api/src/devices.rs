//! Devices BFF API
//!
//! Terminal reads and the two sync entry points. A not-found serial is
//! reported as a failed `SyncOutcome` with status 200, as data rather
//! than an error.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use bt_client::BioTimeClient;
use bt_common::{Paginated, SyncOutcome, Terminal};

use crate::common::{ApiError, GatewayError, PaginationParams};

/// Devices service state
#[derive(Clone)]
pub struct DevicesState {
    pub client: Arc<BioTimeClient>,
}

/// Response for a full terminal sync run.
#[derive(Debug, Serialize, ToSchema)]
pub struct SyncAllResponse {
    pub message: String,
    pub results: Vec<SyncOutcome>,
}

/// List terminals
#[utoipa::path(
    get,
    path = "/terminals",
    tag = "devices",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated terminals", body = Paginated<Terminal>),
        (status = 502, description = "Upstream communication failure", body = ApiError)
    )
)]
pub async fn list_terminals(
    State(state): State<DevicesState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<Terminal>>, GatewayError> {
    let page = state
        .client
        .list_terminals(params.page, params.page_size)
        .await?;
    Ok(Json(page))
}

/// Get terminal by id
#[utoipa::path(
    get,
    path = "/terminals/{id}",
    tag = "devices",
    responses(
        (status = 200, description = "Terminal", body = Terminal),
        (status = 502, description = "Upstream communication failure", body = ApiError)
    )
)]
pub async fn get_terminal(
    State(state): State<DevicesState>,
    Path(id): Path<i64>,
) -> Result<Json<Terminal>, GatewayError> {
    let terminal = state.client.get_terminal(id).await?;
    Ok(Json(terminal))
}

/// Sync all terminals
#[utoipa::path(
    post,
    path = "/sync",
    tag = "devices",
    responses(
        (status = 200, description = "Per-terminal outcomes", body = SyncAllResponse),
        (status = 502, description = "Upstream communication failure", body = ApiError)
    )
)]
pub async fn sync_all_terminals(
    State(state): State<DevicesState>,
) -> Result<Json<SyncAllResponse>, GatewayError> {
    let results = state.client.sync_all_terminals().await?;
    Ok(Json(SyncAllResponse {
        message: "sync finished".to_string(),
        results,
    }))
}

/// Sync one terminal by serial number
#[utoipa::path(
    post,
    path = "/sync/{sn}",
    tag = "devices",
    responses(
        (status = 200, description = "Sync outcome (not-found is a failed outcome)", body = SyncOutcome),
        (status = 502, description = "Upstream communication failure", body = ApiError)
    )
)]
pub async fn sync_terminal_by_sn(
    State(state): State<DevicesState>,
    Path(sn): Path<String>,
) -> Result<Json<SyncOutcome>, GatewayError> {
    let outcome = state.client.sync_terminal_by_sn(&sn).await?;
    Ok(Json(outcome))
}

pub fn devices_router(state: DevicesState) -> Router {
    Router::new()
        .route("/terminals", get(list_terminals))
        .route("/terminals/:id", get(get_terminal))
        .route("/sync", post(sync_all_terminals))
        .route("/sync/:sn", post(sync_terminal_by_sn))
        .with_state(state)
}
