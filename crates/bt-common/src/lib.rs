//! Shared types for the BioTime gateway.
//!
//! Upstream-shaped records, the paginated collection wrapper and the
//! flexible-reference normalization used by both the client and the API
//! surface. All records here are owned and persisted by the upstream
//! BioTime platform; the gateway is stateless with respect to them.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

// ============================================================================
// Pagination
// ============================================================================

/// Paginated collection as returned by the BioTime REST API.
///
/// `next` and `previous` are opaque continuation URLs; `next` is present
/// iff a subsequent page exists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    #[serde(default)]
    pub data: Vec<T>,
}

// ============================================================================
// Flexible References
// ============================================================================

/// A reference field that BioTime returns either as a bare integer id or
/// as a full nested object, depending on endpoint and version.
///
/// Reads always normalize to the nested form; writes only ever send bare
/// ids (see the `*Input` payloads below).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlexibleRef<T> {
    Id(i64),
    Full(T),
}

/// Records that can stand in for a bare upstream id.
pub trait FromRefId {
    fn from_ref_id(id: i64) -> Self;
}

impl<T: FromRefId> FlexibleRef<T> {
    /// Canonical nested view: the id is always populated, remaining
    /// fields are defaulted when upstream sent only the id.
    pub fn normalize(self) -> T {
        match self {
            FlexibleRef::Id(id) => T::from_ref_id(id),
            FlexibleRef::Full(record) => record,
        }
    }
}

/// Deserialize an optional scalar-or-object reference into its canonical
/// nested form. Use with `#[serde(default, deserialize_with = ...)]`.
pub fn flexible_ref<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromRefId,
{
    let raw = Option::<FlexibleRef<T>>::deserialize(deserializer)?;
    Ok(raw.map(FlexibleRef::normalize))
}

// ============================================================================
// Areas
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Area {
    pub id: i64,
    pub area_code: String,
    pub area_name: String,
    #[serde(default, deserialize_with = "flexible_ref")]
    pub parent_area: Option<ParentArea>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ParentArea {
    pub id: i64,
    #[serde(default)]
    pub area_code: String,
    #[serde(default)]
    pub area_name: String,
    #[serde(default)]
    pub parent_area: Option<i64>,
}

impl FromRefId for ParentArea {
    fn from_ref_id(id: i64) -> Self {
        Self { id, ..Self::default() }
    }
}

/// Payload for creating or updating an area. Only bare ids are sent for
/// references; field names serialize lowercase-with-underscores, which is
/// what upstream expects.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AreaInput {
    pub area_code: String,
    pub area_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_area: Option<i64>,
}

// ============================================================================
// Employees
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Employee {
    pub id: i64,
    pub emp_code: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, deserialize_with = "flexible_ref")]
    pub department: Option<Department>,
    #[serde(default, deserialize_with = "flexible_ref")]
    pub position: Option<Position>,
    #[serde(default)]
    pub hire_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Department {
    pub id: i64,
    #[serde(default)]
    pub dept_code: String,
    #[serde(default)]
    pub dept_name: String,
}

impl FromRefId for Department {
    fn from_ref_id(id: i64) -> Self {
        Self { id, ..Self::default() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Position {
    pub id: i64,
    #[serde(default)]
    pub position_code: String,
    #[serde(default)]
    pub position_name: String,
}

impl FromRefId for Position {
    fn from_ref_id(id: i64) -> Self {
        Self { id, ..Self::default() }
    }
}

/// Payload for creating or updating an employee. References are bare ids.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmployeeInput {
    pub emp_code: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(default)]
    pub area: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<String>,
}

// ============================================================================
// Terminals
// ============================================================================

/// A physical attendance device. Read-only from the gateway's
/// perspective; sync operations target a terminal but never mutate it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Terminal {
    pub id: i64,
    /// Serial number, unique and human-assigned.
    pub sn: String,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub terminal_name: Option<String>,
    /// Shape varies between BioTime versions (bare id or nested object);
    /// passed through opaque.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub area: Option<serde_json::Value>,
}

// ============================================================================
// Sync Outcomes
// ============================================================================

/// Result of a per-terminal sync attempt. Produced per attempt, returned
/// to the caller and discarded; never stored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    pub success: bool,
    pub terminal_sn: String,
    pub message: String,
}

impl SyncOutcome {
    pub fn success(terminal_sn: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            terminal_sn: terminal_sn.into(),
            message: message.into(),
        }
    }

    pub fn failure(terminal_sn: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            terminal_sn: terminal_sn.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flexible_ref_from_bare_id() {
        let employee: Employee = serde_json::from_str(
            r#"{"id": 1, "emp_code": "E1", "first_name": "Ana", "last_name": "Diaz", "department": 7, "position": null}"#,
        )
        .unwrap();

        let department = employee.department.unwrap();
        assert_eq!(department.id, 7);
        assert_eq!(department.dept_code, "");
        assert!(employee.position.is_none());
    }

    #[test]
    fn flexible_ref_from_nested_object() {
        let employee: Employee = serde_json::from_str(
            r#"{"id": 1, "emp_code": "E1", "department": {"id": 7, "dept_code": "D7", "dept_name": "Ops"}}"#,
        )
        .unwrap();

        let department = employee.department.unwrap();
        assert_eq!(department.id, 7);
        assert_eq!(department.dept_name, "Ops");
    }

    #[test]
    fn flexible_ref_missing_field_is_none() {
        let area: Area =
            serde_json::from_str(r#"{"id": 2, "area_code": "A2", "area_name": "Plant"}"#).unwrap();
        assert!(area.parent_area.is_none());
    }

    #[test]
    fn area_parent_from_bare_id() {
        let area: Area = serde_json::from_str(
            r#"{"id": 2, "area_code": "A2", "area_name": "Plant", "parent_area": 1}"#,
        )
        .unwrap();
        assert_eq!(area.parent_area.unwrap().id, 1);
    }

    #[test]
    fn normalized_refs_serialize_as_nested_objects() {
        let employee: Employee = serde_json::from_str(
            r#"{"id": 1, "emp_code": "E1", "department": 7}"#,
        )
        .unwrap();

        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["department"]["id"], 7);
    }

    #[test]
    fn employee_input_sends_bare_ids_in_snake_case() {
        let input = EmployeeInput {
            emp_code: "E1".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Diaz".to_string(),
            department: Some(7),
            position: None,
            area: vec![1, 2],
            hire_date: None,
        };

        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["emp_code"], "E1");
        assert_eq!(json["department"], 7);
        assert_eq!(json["area"], serde_json::json!([1, 2]));
        // absent references are omitted entirely, not sent as null
        assert!(json.get("position").is_none());
    }

    #[test]
    fn terminal_area_passes_through_any_shape() {
        let by_id: Terminal =
            serde_json::from_str(r#"{"id": 1, "sn": "S1", "area": 3}"#).unwrap();
        assert_eq!(by_id.area.unwrap(), serde_json::json!(3));

        let nested: Terminal =
            serde_json::from_str(r#"{"id": 1, "sn": "S1", "area": {"id": 3}}"#).unwrap();
        assert_eq!(nested.area.unwrap()["id"], 3);
    }

    #[test]
    fn sync_outcome_uses_camel_case_on_the_wire() {
        let outcome = SyncOutcome::failure("S1", "no sync endpoint responded correctly");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["terminalSn"], "S1");
        assert_eq!(json["success"], false);
    }

    #[test]
    fn paginated_tolerates_missing_data() {
        let page: Paginated<Terminal> =
            serde_json::from_str(r#"{"count": 0, "next": null, "previous": null}"#).unwrap();
        assert!(page.data.is_empty());
        assert!(page.next.is_none());
    }
}
