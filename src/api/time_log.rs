use crate::{
    error::{ApiError, ErrorResponse},
    model::log_entry::{LogEntry, LogType},
    state::AppState,
};
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClockRequest {
    /// Integer or numeric string
    #[schema(example = 1, value_type = u64)]
    pub employee_id: Option<Value>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LogQuery {
    /// Only return logs for this employee
    #[param(example = 1, value_type = Option<u64>)]
    pub employee_id: Option<String>,
}

/// Accepts `3`, `3.0` or `"3"`. Anything else is rejected.
fn parse_employee_id(value: Option<&Value>) -> Result<u64, ApiError> {
    let parsed = match value {
        None | Some(Value::Null) => return Err(ApiError::invalid_input("employeeId is required")),
        Some(Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        Some(_) => None,
    };

    parsed.ok_or_else(|| ApiError::invalid_input("employeeId must be a non-negative integer"))
}

async fn record_clock(
    state: web::Data<AppState>,
    payload: ClockRequest,
    kind: LogType,
) -> Result<HttpResponse, ApiError> {
    let employee_id = parse_employee_id(payload.employee_id.as_ref())?;

    let entry = state
        .store()?
        .record_clock(employee_id, kind)
        .ok_or_else(|| {
            debug!(employee_id, %kind, "Clock event for unknown employee");
            ApiError::employee_not_found()
        })?;
    info!(log_id = entry.id, employee_id, %kind, "Clock event recorded");

    Ok(HttpResponse::Created().json(entry))
}

/// Clock In
#[utoipa::path(
    post,
    path = "/api/clock-in",
    request_body = ClockRequest,
    responses(
        (status = 201, description = "IN entry recorded", body = LogEntry),
        (status = 400, description = "employeeId missing or not numeric", body = ErrorResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    ),
    tag = "Time Log"
)]
pub async fn clock_in(
    state: web::Data<AppState>,
    payload: web::Json<ClockRequest>,
) -> Result<impl Responder, ApiError> {
    record_clock(state, payload.into_inner(), LogType::In).await
}

/// Clock Out
#[utoipa::path(
    post,
    path = "/api/clock-out",
    request_body = ClockRequest,
    responses(
        (status = 201, description = "OUT entry recorded", body = LogEntry),
        (status = 400, description = "employeeId missing or not numeric", body = ErrorResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    ),
    tag = "Time Log"
)]
pub async fn clock_out(
    state: web::Data<AppState>,
    payload: web::Json<ClockRequest>,
) -> Result<impl Responder, ApiError> {
    record_clock(state, payload.into_inner(), LogType::Out).await
}

/// List Logs
#[utoipa::path(
    get,
    path = "/api/logs",
    params(LogQuery),
    responses(
        (status = 200, description = "Logs in creation order", body = [LogEntry]),
        (status = 400, description = "employeeId not numeric", body = ErrorResponse)
    ),
    tag = "Time Log"
)]
pub async fn list_logs(
    state: web::Data<AppState>,
    query: web::Query<LogQuery>,
) -> Result<impl Responder, ApiError> {
    // an empty filter means no filter
    let filter = match query.employee_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<u64>().map_err(|_| {
            ApiError::invalid_input("employeeId must be a non-negative integer")
        })?),
    };

    let logs = state.store()?.logs(filter);
    Ok(HttpResponse::Ok().json(logs))
}


#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use chrono::DateTime;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn clock_in_then_out_for_one_employee() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/employees")
            .set_json(json!({ "name": "Ann", "role": "Engineer" }))
            .to_request();
        test::call_service(&app, req).await;

        for (uri, kind) in [("/api/clock-in", "IN"), ("/api/clock-out", "OUT")] {
            let req = test::TestRequest::post()
                .uri(uri)
                .set_json(json!({ "employeeId": 1 }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
            let entry: Value = test::read_body_json(resp).await;
            assert_eq!(entry["type"], kind);
            assert_eq!(entry["employeeId"], 1);
        }

        let req = test::TestRequest::get()
            .uri("/api/logs?employeeId=1")
            .to_request();
        let logs: Value = test::call_and_read_body_json(&app, req).await;
        let logs = logs.as_array().unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0]["type"], "IN");
        assert_eq!(logs[1]["type"], "OUT");
        assert!(logs[0]["id"].as_u64() < logs[1]["id"].as_u64());
        for log in logs {
            let time = log["time"].as_str().unwrap();
            assert!(DateTime::parse_from_rfc3339(time).is_ok());
            assert!(time.ends_with('Z'));
        }
    }

    #[actix_web::test]
    async fn clock_for_unknown_employee_is_not_found() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/clock-in")
            .set_json(json!({ "employeeId": 99999 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let err: Value = test::read_body_json(resp).await;
        assert_eq!(err, json!({ "error": "Employee not found" }));

        let req = test::TestRequest::get().uri("/api/logs").to_request();
        let logs: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(logs, json!([]));
    }

    #[actix_web::test]
    async fn clock_accepts_numeric_string_and_rejects_garbage() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/employees")
            .set_json(json!({ "name": "Ann", "role": "Engineer" }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/clock-out")
            .set_json(json!({ "employeeId": "1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        // clock-out without a prior clock-in is allowed
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/api/clock-in")
            .set_json(json!({ "employeeId": "one" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn delete_cascades_and_unfiltered_list_spans_employees() {
        let app = test_app!();

        for name in ["Ann", "Bob"] {
            let req = test::TestRequest::post()
                .uri("/api/employees")
                .set_json(json!({ "name": name, "role": "Ops" }))
                .to_request();
            test::call_service(&app, req).await;
        }
        for (uri, id) in [
            ("/api/clock-in", 1),
            ("/api/clock-in", 2),
            ("/api/clock-in", 1),
            ("/api/clock-out", 2),
        ] {
            let req = test::TestRequest::post()
                .uri(uri)
                .set_json(json!({ "employeeId": id }))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get().uri("/api/logs").to_request();
        let all: Value = test::call_and_read_body_json(&app, req).await;
        let ids: Vec<u64> = all
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        let req = test::TestRequest::delete().uri("/api/employees/1").to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/api/logs").to_request();
        let remaining: Value = test::call_and_read_body_json(&app, req).await;
        let remaining = remaining.as_array().unwrap();
        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|l| l["employeeId"] == 2));

        let req = test::TestRequest::get()
            .uri("/api/logs?employeeId=1")
            .to_request();
        let for_deleted: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(for_deleted, json!([]));
    }

    #[actix_web::test]
    async fn log_filter_edge_cases() {
        let app = test_app!();

        let req = test::TestRequest::get().uri("/api/logs?employeeId=").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/logs?employeeId=42")
            .to_request();
        let none: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(none, json!([]));

        let req = test::TestRequest::get()
            .uri("/api/logs?employeeId=abc")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
