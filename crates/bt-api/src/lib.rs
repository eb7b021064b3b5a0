//! API Layer
//!
//! REST surface mirroring the upstream resources under local route
//! prefixes. Handlers stay thin: build the call, hand the typed result
//! back, and let `GatewayError` map failures to 502.

use std::sync::Arc;

use axum::Router;

use bt_client::BioTimeClient;

pub mod areas;
pub mod common;
pub mod devices;
pub mod employees;
pub mod openapi;

pub use areas::{areas_router, AreasState};
pub use common::{ApiError, GatewayError, PaginationParams};
pub use devices::{devices_router, DevicesState};
pub use employees::{employees_router, EmployeesState};
pub use openapi::GatewayApiDoc;

/// Full gateway router with every resource nested under `/api`.
pub fn gateway_router(client: Arc<BioTimeClient>) -> Router {
    Router::new()
        .nest(
            "/api/areas",
            areas_router(AreasState {
                client: client.clone(),
            }),
        )
        .nest(
            "/api/employees",
            employees_router(EmployeesState {
                client: client.clone(),
            }),
        )
        .nest("/api/devices", devices_router(DevicesState { client }))
}
