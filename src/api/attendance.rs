use crate::{contract::ApiContract, error::ApiError, storage::Storage};
use actix_web::{HttpResponse, web};
use serde_json::Value;

/// List attendance records
#[utoipa::path(
    get,
    path = "/api/attendance",
    responses(
        (status = 200, description = "All attendance records", body = [crate::model::attendance::AttendanceRecord]),
        (status = 500, description = "Internal server error", body = crate::contract::MessageBody)
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(storage: web::Data<dyn Storage>) -> Result<HttpResponse, ApiError> {
    let records = storage.list_attendance().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch attendance");
        ApiError::from(e)
    })?;

    Ok(HttpResponse::Ok().json(records))
}

/// Record attendance
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = crate::model::attendance::InsertAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = crate::model::attendance::AttendanceRecord),
        (status = 400, description = "Invalid payload", body = crate::contract::ValidationErrorBody, example = json!({
            "message": "Invalid date",
            "field": "date"
        })),
        (status = 500, description = "Internal server error", body = crate::contract::MessageBody)
    ),
    tag = "Attendance"
)]
pub async fn create_attendance(
    contract: web::Data<ApiContract>,
    storage: web::Data<dyn Storage>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let input = contract.attendance.create.parse(&payload)?;
    let employee_id = input.employee_id;

    let record = storage.create_attendance(input).await.map_err(|e| {
        tracing::error!(error = %e, employee_id, "Failed to record attendance");
        ApiError::from(e)
    })?;

    tracing::info!(record_id = record.id, employee_id, "Attendance recorded");
    Ok(HttpResponse::Created().json(record))
}
