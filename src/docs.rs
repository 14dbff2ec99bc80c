use crate::api::employee::{DeleteEmployeeResponse, EmployeeInput, UpdateEmployee};
use crate::api::health::HealthResponse;
use crate::api::time_log::ClockRequest;
use crate::error::ErrorResponse;
use crate::model::employee::Employee;
use crate::model::log_entry::{LogEntry, LogType};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Logging API",
        version = "1.0.0",
        description = r#"
## Employee Logging API

Tracks employees and their clock-in / clock-out events.

### 🔹 Key Features
- **Employee Management**
  - Create, list, view, replace, patch and delete employees
  - Deleting an employee also deletes its time logs
- **Time Logs**
  - Clock in and clock out; events are appended unconditionally
  - List all logs or filter by employee

### 📦 Storage
All data lives in process memory and is lost on restart.

### 📦 Response Format
- JSON bodies; failures are `{"error": "<message>"}`

---
Built with **Rust**, **Actix Web** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::health::health,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::replace_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::time_log::clock_in,
        crate::api::time_log::clock_out,
        crate::api::time_log::list_logs
    ),
    components(
        schemas(
            HealthResponse,
            Employee,
            EmployeeInput,
            UpdateEmployee,
            DeleteEmployeeResponse,
            ClockRequest,
            LogEntry,
            LogType,
            ErrorResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Time Log", description = "Clock-in / clock-out APIs"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/health",
            "/api/employees",
            "/api/employees/{id}",
            "/api/clock-in",
            "/api/clock-out",
            "/api/logs",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "{expected} missing from OpenAPI document"
            );
        }
    }
}
