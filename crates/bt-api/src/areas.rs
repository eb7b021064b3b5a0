//! Areas BFF API
//!
//! Proxies area CRUD to BioTime. Every write additionally triggers a
//! best-effort re-sync of all terminals; the sync result rides along in
//! the response and its failure never downgrades the write.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;
use utoipa::ToSchema;

use bt_client::BioTimeClient;
use bt_common::{Area, AreaInput, Paginated, SyncOutcome};

use crate::common::{ApiError, GatewayError, PaginationParams};

/// Areas service state
#[derive(Clone)]
pub struct AreasState {
    pub client: Arc<BioTimeClient>,
}

/// Response for area writes: the record as upstream stored it, plus the
/// outcome of the follow-up terminal sync (`null` when the sync step
/// itself failed).
#[derive(Debug, Serialize, ToSchema)]
pub struct AreaWriteResponse {
    pub data: Area,
    pub sync: Option<Vec<SyncOutcome>>,
}

/// List areas
#[utoipa::path(
    get,
    path = "",
    tag = "areas",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated areas", body = Paginated<Area>),
        (status = 502, description = "Upstream communication failure", body = ApiError)
    )
)]
pub async fn list_areas(
    State(state): State<AreasState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<Area>>, GatewayError> {
    let page = state.client.list_areas(params.page, params.page_size).await?;
    Ok(Json(page))
}

/// Get area by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "areas",
    responses(
        (status = 200, description = "Area", body = Area),
        (status = 502, description = "Upstream communication failure", body = ApiError)
    )
)]
pub async fn get_area(
    State(state): State<AreasState>,
    Path(id): Path<i64>,
) -> Result<Json<Area>, GatewayError> {
    let area = state.client.get_area(id).await?;
    Ok(Json(area))
}

/// Create an area and re-sync terminals
#[utoipa::path(
    post,
    path = "",
    tag = "areas",
    request_body = AreaInput,
    responses(
        (status = 201, description = "Area created", body = AreaWriteResponse),
        (status = 502, description = "Upstream communication failure", body = ApiError)
    )
)]
pub async fn create_area(
    State(state): State<AreasState>,
    Json(input): Json<AreaInput>,
) -> Result<(StatusCode, Json<AreaWriteResponse>), GatewayError> {
    let area = state.client.create_area(&input).await?;
    let sync = sync_after_write(&state.client).await;

    Ok((StatusCode::CREATED, Json(AreaWriteResponse { data: area, sync })))
}

/// Update an area and re-sync terminals
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "areas",
    request_body = AreaInput,
    responses(
        (status = 200, description = "Area updated", body = AreaWriteResponse),
        (status = 502, description = "Upstream communication failure", body = ApiError)
    )
)]
pub async fn update_area(
    State(state): State<AreasState>,
    Path(id): Path<i64>,
    Json(input): Json<AreaInput>,
) -> Result<Json<AreaWriteResponse>, GatewayError> {
    let area = state.client.update_area(id, &input).await?;
    let sync = sync_after_write(&state.client).await;

    Ok(Json(AreaWriteResponse { data: area, sync }))
}

/// Delete an area and re-sync terminals
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "areas",
    responses(
        (status = 204, description = "Area deleted"),
        (status = 502, description = "Upstream communication failure", body = ApiError)
    )
)]
pub async fn delete_area(
    State(state): State<AreasState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, GatewayError> {
    state.client.delete_area(id).await?;
    sync_after_write(&state.client).await;

    Ok(StatusCode::NO_CONTENT)
}

/// Best-effort terminal re-sync after a successful write.
///
/// Partial-failure semantics: the write already succeeded upstream, so a
/// sync failure degrades to a logged warning and a `null` sync report.
async fn sync_after_write(client: &BioTimeClient) -> Option<Vec<SyncOutcome>> {
    match client.sync_all_terminals().await {
        Ok(results) => Some(results),
        Err(e) => {
            warn!("Write succeeded but terminal sync failed: {}", e);
            None
        }
    }
}

pub fn areas_router(state: AreasState) -> Router {
    Router::new()
        .route("/", get(list_areas).post(create_area))
        .route("/:id", get(get_area).put(update_area).delete(delete_area))
        .with_state(state)
}
