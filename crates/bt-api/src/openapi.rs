//! OpenAPI document for the gateway surface.

use utoipa::OpenApi;

use bt_common::{
    Area, AreaInput, Department, Employee, EmployeeInput, Paginated, ParentArea, Position,
    SyncOutcome, Terminal,
};

use crate::areas::AreaWriteResponse;
use crate::common::ApiError;
use crate::devices::SyncAllResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "BioTime Gateway API",
        description = "Local API proxying area, employee and terminal operations to BioTime"
    ),
    paths(
        crate::areas::list_areas,
        crate::areas::get_area,
        crate::areas::create_area,
        crate::areas::update_area,
        crate::areas::delete_area,
        crate::employees::list_employees,
        crate::employees::get_employee,
        crate::employees::create_employee,
        crate::employees::update_employee,
        crate::employees::delete_employee,
        crate::devices::list_terminals,
        crate::devices::get_terminal,
        crate::devices::sync_all_terminals,
        crate::devices::sync_terminal_by_sn,
    ),
    components(schemas(
        Area,
        ParentArea,
        AreaInput,
        AreaWriteResponse,
        Employee,
        Department,
        Position,
        EmployeeInput,
        Terminal,
        SyncOutcome,
        SyncAllResponse,
        ApiError,
        Paginated<Area>,
        Paginated<Employee>,
        Paginated<Terminal>,
    ))
)]
pub struct GatewayApiDoc;
