use crate::{
    contract::{ApiContract, SuccessBody},
    error::ApiError,
    storage::Storage,
};
use actix_web::{HttpResponse, web};
use serde_json::Value;
use tracing::{debug, error, info};

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees", body = [crate::model::employee::Employee]),
        (status = 500, description = "Internal server error", body = crate::contract::MessageBody)
    ),
    tag = "Employee"
)]
pub async fn list_employees(storage: web::Data<dyn Storage>) -> Result<HttpResponse, ApiError> {
    let employees = storage.list_employees().await.map_err(|e| {
        error!(error = %e, "Failed to fetch employees");
        ApiError::from(e)
    })?;

    debug!(count = employees.len(), "Fetched employees");
    Ok(HttpResponse::Ok().json(employees))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = crate::model::employee::InsertEmployee,
    responses(
        (status = 201, description = "Employee created", body = crate::model::employee::Employee),
        (status = 400, description = "Invalid payload", body = crate::contract::ValidationErrorBody, example = json!({
            "message": "Required",
            "field": "email"
        })),
        (status = 500, description = "Internal server error", body = crate::contract::MessageBody)
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    contract: web::Data<ApiContract>,
    storage: web::Data<dyn Storage>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let input = contract.employees.create.parse(&payload).map_err(|e| {
        debug!(count = e.violations().len(), violations = %e, "Rejected employee payload");
        e
    })?;

    let employee = storage.create_employee(input).await.map_err(|e| {
        error!(error = %e, "Failed to create employee");
        ApiError::from(e)
    })?;

    info!(employee_id = employee.id, "Employee created");
    Ok(HttpResponse::Created().json(employee))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(
        ("id" = i32, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = crate::model::employee::Employee),
        (status = 404, description = "Employee not found", body = crate::contract::MessageBody, example = json!({
            "message": "Employee not found"
        })),
        (status = 500, description = "Internal server error", body = crate::contract::MessageBody)
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    storage: web::Data<dyn Storage>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let employee = storage.get_employee(employee_id).await.map_err(|e| {
        error!(error = %e, employee_id, "Failed to fetch employee");
        ApiError::from(e)
    })?;

    match employee {
        Some(emp) => Ok(HttpResponse::Ok().json(emp)),
        None => Err(ApiError::NotFound("Employee")),
    }
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(
        ("id" = i32, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = SuccessBody),
        (status = 404, description = "Employee not found", body = crate::contract::MessageBody, example = json!({
            "message": "Employee not found"
        })),
        (status = 500, description = "Internal server error", body = crate::contract::MessageBody)
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    storage: web::Data<dyn Storage>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let removed = storage.delete_employee(employee_id).await.map_err(|e| {
        error!(error = %e, employee_id, "Failed to delete employee");
        ApiError::from(e)
    })?;

    if !removed {
        return Err(ApiError::NotFound("Employee"));
    }

    info!(employee_id, "Employee deleted");
    Ok(HttpResponse::Ok().json(SuccessBody { success: true }))
}
