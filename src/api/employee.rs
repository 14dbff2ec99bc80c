use crate::{
    error::{ApiError, ErrorResponse},
    model::employee::Employee,
    state::AppState,
};
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};
use utoipa::ToSchema;

/// Body of create (POST) and full replace (PUT). Both fields are required
/// and must be non-empty; they are optional here so the handler can report
/// a missing field itself.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct EmployeeInput {
    #[schema(example = "Ann")]
    pub name: Option<String>,
    #[schema(example = "Engineer")]
    pub role: Option<String>,
}

/// Body of PATCH. An absent or null field is left untouched; an empty
/// string still overwrites. Only used for the OpenAPI schema: PUT and PATCH
/// read their body after the employee lookup, see [`parse_fields`].
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateEmployee {
    #[schema(example = "Ann", nullable = true)]
    pub name: Option<String>,
    #[schema(example = "Manager", nullable = true)]
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteEmployeeResponse {
    #[schema(example = "Employee deleted successfully")]
    pub message: String,
    pub employee: Employee,
}

impl EmployeeInput {
    fn into_required(self) -> Option<(String, String)> {
        match (self.name, self.role) {
            (Some(name), Some(role)) if !name.is_empty() && !role.is_empty() => Some((name, role)),
            _ => None,
        }
    }
}

/// Parses a PUT/PATCH body into its top-level fields. An empty body counts
/// as `{}`, and so does any JSON value that is not an object.
fn parse_fields(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Ok(Map::new()),
        Err(e) => Err(ApiError::invalid_input(format!("Invalid JSON body: {e}"))),
    }
}

/// `None` when the field is absent or null.
fn string_field(fields: &mut Map<String, Value>, key: &str) -> Result<Option<String>, ApiError> {
    match fields.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(_) => Err(ApiError::invalid_input(format!("{key} must be a string"))),
    }
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = EmployeeInput,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "name or role missing", body = ErrorResponse, example = json!({
            "error": "name and role are required"
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    state: web::Data<AppState>,
    payload: web::Json<EmployeeInput>,
) -> Result<impl Responder, ApiError> {
    let Some((name, role)) = payload.into_inner().into_required() else {
        debug!("Rejected employee without name or role");
        return Err(ApiError::invalid_input("name and role are required"));
    };

    let employee = state.store()?.create_employee(name, role);
    info!(employee_id = employee.id, "Employee created");

    Ok(HttpResponse::Created().json(employee))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees in creation order", body = [Employee])
    ),
    tag = "Employee"
)]
pub async fn list_employees(state: web::Data<AppState>) -> Result<impl Responder, ApiError> {
    let store = state.store()?;
    Ok(HttpResponse::Ok().json(store.employees()))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(
        ("id" = u64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 400, description = "Non-numeric id", body = ErrorResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> Result<impl Responder, ApiError> {
    let employee_id = path.into_inner();
    let store = state.store()?;

    let employee = store
        .employee(employee_id)
        .ok_or_else(ApiError::employee_not_found)?;

    Ok(HttpResponse::Ok().json(employee))
}

/// Replace Employee
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(
        ("id" = u64, Path, description = "Employee ID")
    ),
    request_body = EmployeeInput,
    responses(
        (status = 200, description = "Employee replaced", body = Employee),
        (status = 400, description = "name or role missing", body = ErrorResponse, example = json!({
            "error": "Both name and role are required for PUT"
        })),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    ),
    tag = "Employee"
)]
pub async fn replace_employee(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    body: web::Bytes,
) -> Result<impl Responder, ApiError> {
    let employee_id = path.into_inner();
    let fields = parse_fields(&body);
    let mut store = state.store()?;

    // existence is checked before the body
    if !store.contains_employee(employee_id) {
        return Err(ApiError::employee_not_found());
    }

    let mut fields = fields?;
    let input = EmployeeInput {
        name: string_field(&mut fields, "name")?,
        role: string_field(&mut fields, "role")?,
    };
    let Some((name, role)) = input.into_required() else {
        debug!(employee_id, "Rejected PUT without name or role");
        return Err(ApiError::invalid_input(
            "Both name and role are required for PUT",
        ));
    };

    let employee = store
        .replace_employee(employee_id, name, role)
        .ok_or_else(ApiError::employee_not_found)?;
    info!(employee_id, "Employee replaced");

    Ok(HttpResponse::Ok().json(employee))
}

/// Update Employee
#[utoipa::path(
    patch,
    path = "/api/employees/{id}",
    params(
        ("id" = u64, Path, description = "Employee ID")
    ),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Malformed body or non-string field", body = ErrorResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    body: web::Bytes,
) -> Result<impl Responder, ApiError> {
    let employee_id = path.into_inner();
    let fields = parse_fields(&body);
    let mut store = state.store()?;

    if !store.contains_employee(employee_id) {
        return Err(ApiError::employee_not_found());
    }

    let mut fields = fields?;
    let name = string_field(&mut fields, "name")?;
    let role = string_field(&mut fields, "role")?;

    let employee = store
        .patch_employee(employee_id, name, role)
        .ok_or_else(ApiError::employee_not_found)?;
    info!(employee_id, "Employee updated");

    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee
///
/// Also removes every time log recorded for the employee.
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(
        ("id" = u64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee and its logs deleted", body = DeleteEmployeeResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> Result<impl Responder, ApiError> {
    let employee_id = path.into_inner();

    let (employee, removed_logs) = state
        .store()?
        .delete_employee(employee_id)
        .ok_or_else(ApiError::employee_not_found)?;
    info!(employee_id, removed_logs, "Employee deleted");

    Ok(HttpResponse::Ok().json(DeleteEmployeeResponse {
        message: "Employee deleted successfully".to_string(),
        employee,
    }))
}
