use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::validation::{FieldReader, Insertable, ValidationErrors};

/// `employee_id` is not checked against the employees table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub employee_id: i32,
    #[schema(example = "2024-01-15T00:00:00Z", value_type = String, format = "date-time")]
    pub date: DateTime<Utc>,
    /// Usually one of Present, Absent or Leave.
    #[schema(example = "Present")]
    pub status: String,
    #[schema(example = "09:00")]
    pub check_in: Option<String>,
    #[schema(example = "17:30")]
    pub check_out: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertAttendance {
    #[schema(example = 1)]
    pub employee_id: i32,
    /// Any date-like value; normalized to a UTC timestamp.
    #[schema(example = "2024-01-15", value_type = String)]
    pub date: DateTime<Utc>,
    #[schema(example = "Present")]
    pub status: String,
    #[schema(example = "09:00")]
    pub check_in: Option<String>,
    #[schema(example = "17:30")]
    pub check_out: Option<String>,
}

impl Insertable for InsertAttendance {
    const SCHEMA: &'static str = "InsertAttendance";

    fn validate(raw: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = FieldReader::new(raw)?;
        let employee_id = fields.required_integer("employeeId");
        let date = fields.required_timestamp("date");
        let status = fields.required_string("status");
        let check_in = fields.optional_string("checkIn");
        let check_out = fields.optional_string("checkOut");
        fields.finish()?;

        Ok(Self {
            employee_id: employee_id.unwrap_or_default(),
            date: date.unwrap_or_default(),
            status: status.unwrap_or_default(),
            check_in,
            check_out,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_validate_normalizes_date() {
        let input = InsertAttendance::validate(&json!({
            "employeeId": 1,
            "date": "2024-01-15",
            "status": "Present",
            "checkIn": "09:00"
        }))
        .unwrap();
        assert_eq!(input.date, Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
        assert_eq!(input.check_in.as_deref(), Some("09:00"));
        assert!(input.check_out.is_none());
    }

    #[test]
    fn test_validate_accepts_free_text_status() {
        let input = InsertAttendance::validate(&json!({
            "employeeId": 4,
            "date": 1_705_276_800_000i64,
            "status": "Remote",
            "checkOut": null
        }))
        .unwrap();
        assert_eq!(input.status, "Remote");
        assert!(input.check_out.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let err = InsertAttendance::validate(&json!({
            "employeeId": "one",
            "date": "not a date",
            "checkIn": 900
        }))
        .unwrap_err();
        let seen: Vec<(String, &str)> = err
            .violations()
            .iter()
            .map(|v| (v.field(), v.message.as_str()))
            .collect();
        assert_eq!(
            seen,
            vec![
                ("employeeId".to_string(), "Expected number, received string"),
                ("date".to_string(), "Invalid date"),
                ("status".to_string(), "Required"),
                ("checkIn".to_string(), "Expected string, received number"),
            ]
        );
    }
}
