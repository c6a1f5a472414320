use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::validation::{FieldReader, Insertable, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": 1,
        "firstName": "John",
        "lastName": "Doe",
        "email": "john@example.com",
        "position": "Software Engineer",
        "department": "Engineering",
        "joinDate": "2024-01-01T09:00:00Z"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i32,

    #[schema(example = "John")]
    pub first_name: String,

    #[schema(example = "Doe")]
    pub last_name: String,

    #[schema(example = "john@example.com")]
    pub email: String,

    #[schema(example = "Software Engineer")]
    pub position: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(
        example = "2024-01-01T09:00:00Z",
        value_type = String,
        format = "date-time",
        nullable = true
    )]
    pub join_date: Option<DateTime<Utc>>,
}

/// Fields a client may supply when creating an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertEmployee {
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = "john@example.com", format = "email")]
    pub email: String,
    #[schema(example = "Software Engineer")]
    pub position: String,
    #[schema(example = "Engineering")]
    pub department: String,
    /// Defaults to the creation time when omitted.
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub join_date: Option<DateTime<Utc>>,
}

impl Insertable for InsertEmployee {
    const SCHEMA: &'static str = "InsertEmployee";

    fn validate(raw: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = FieldReader::new(raw)?;
        let first_name = fields.required_string("firstName");
        let last_name = fields.required_string("lastName");
        let email = fields.required_string("email");
        let position = fields.required_string("position");
        let department = fields.required_string("department");
        let join_date = fields.optional_timestamp("joinDate");
        fields.finish()?;

        // every required field is Some once finish() succeeds
        Ok(Self {
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            position: position.unwrap_or_default(),
            department: department.unwrap_or_default(),
            join_date,
        })
    }
}
