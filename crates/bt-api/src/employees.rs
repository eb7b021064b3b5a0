//! Employees BFF API
//!
//! Plain CRUD passthrough; employee writes do not trigger a terminal
//! re-sync.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

use bt_client::BioTimeClient;
use bt_common::{Employee, EmployeeInput, Paginated};

use crate::common::{ApiError, GatewayError, PaginationParams};

/// Employees service state
#[derive(Clone)]
pub struct EmployeesState {
    pub client: Arc<BioTimeClient>,
}

/// List employees
#[utoipa::path(
    get,
    path = "",
    tag = "employees",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated employees", body = Paginated<Employee>),
        (status = 502, description = "Upstream communication failure", body = ApiError)
    )
)]
pub async fn list_employees(
    State(state): State<EmployeesState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<Employee>>, GatewayError> {
    let page = state
        .client
        .list_employees(params.page, params.page_size)
        .await?;
    Ok(Json(page))
}

/// Get employee by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "employees",
    responses(
        (status = 200, description = "Employee", body = Employee),
        (status = 502, description = "Upstream communication failure", body = ApiError)
    )
)]
pub async fn get_employee(
    State(state): State<EmployeesState>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, GatewayError> {
    let employee = state.client.get_employee(id).await?;
    Ok(Json(employee))
}

/// Create an employee
#[utoipa::path(
    post,
    path = "",
    tag = "employees",
    request_body = EmployeeInput,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 502, description = "Upstream communication failure", body = ApiError)
    )
)]
pub async fn create_employee(
    State(state): State<EmployeesState>,
    Json(input): Json<EmployeeInput>,
) -> Result<(StatusCode, Json<Employee>), GatewayError> {
    let employee = state.client.create_employee(&input).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Update an employee
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "employees",
    request_body = EmployeeInput,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 502, description = "Upstream communication failure", body = ApiError)
    )
)]
pub async fn update_employee(
    State(state): State<EmployeesState>,
    Path(id): Path<i64>,
    Json(input): Json<EmployeeInput>,
) -> Result<Json<Employee>, GatewayError> {
    let employee = state.client.update_employee(id, &input).await?;
    Ok(Json(employee))
}

/// Delete an employee
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "employees",
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 502, description = "Upstream communication failure", body = ApiError)
    )
)]
pub async fn delete_employee(
    State(state): State<EmployeesState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, GatewayError> {
    state.client.delete_employee(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn employees_router(state: EmployeesState) -> Router {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/:id",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .with_state(state)
}
