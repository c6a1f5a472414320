use crate::contract::{MessageBody, SuccessBody, ValidationErrorBody};
use crate::model::attendance::{AttendanceRecord, InsertAttendance};
use crate::model::employee::{Employee, InsertEmployee};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Records API",
        version = "0.1.0",
        description = r#"
## HR Records

Employee records and daily attendance entries.

- **Employees**: list, create, view and delete employee profiles
- **Attendance**: list and record attendance entries

Create endpoints answer `400 {message, field}` with the first rejected field.
Lookups by id answer `404 {message}` when the record does not exist.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::list_attendance,
        crate::api::attendance::create_attendance
    ),
    components(
        schemas(
            Employee,
            InsertEmployee,
            AttendanceRecord,
            InsertAttendance,
            ValidationErrorBody,
            MessageBody,
            SuccessBody
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance APIs"),
    )
)]
pub struct ApiDoc;
