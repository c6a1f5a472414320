use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::debug;

use super::{Storage, StorageError};
use crate::model::attendance::{AttendanceRecord, InsertAttendance};
use crate::model::employee::{Employee, InsertEmployee};

const SCHEMA_SQL: &str = include_str!("schema.sql");

const EMPLOYEE_COLUMNS: &str =
    "id, first_name, last_name, email, position, department, join_date";
const ATTENDANCE_COLUMNS: &str = "id, employee_id, `date`, status, check_in, check_out";

#[derive(Clone)]
pub struct MySqlStorage {
    pool: MySqlPool,
}

impl MySqlStorage {
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = MySqlPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    /// Creates missing tables. Existing tables are left untouched.
    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        for statement in SCHEMA_SQL.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            debug!(sql = %statement, "Ensuring table");
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for MySqlStorage {
    async fn list_employees(&self) -> Result<Vec<Employee>, StorageError> {
        let sql = format!("SELECT {} FROM employees ORDER BY id", EMPLOYEE_COLUMNS);
        let rows = sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_employee(&self, id: i32) -> Result<Option<Employee>, StorageError> {
        let sql = format!("SELECT {} FROM employees WHERE id = ?", EMPLOYEE_COLUMNS);
        let row = sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create_employee(&self, input: InsertEmployee) -> Result<Employee, StorageError> {
        // insert and read back on one connection so the new id is ours
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO employees
            (first_name, last_name, email, position, department, join_date)
            VALUES (?, ?, ?, ?, ?, COALESCE(?, CURRENT_TIMESTAMP(3)))
            "#,
        )
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.position)
        .bind(&input.department)
        .bind(input.join_date)
        .execute(&mut *conn)
        .await?;

        let sql = format!("SELECT {} FROM employees WHERE id = ?", EMPLOYEE_COLUMNS);
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(result.last_insert_id())
            .fetch_one(&mut *conn)
            .await?;
        Ok(employee)
    }

    async fn delete_employee(&self, id: i32) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_attendance(&self) -> Result<Vec<AttendanceRecord>, StorageError> {
        let sql = format!("SELECT {} FROM attendance ORDER BY id", ATTENDANCE_COLUMNS);
        let rows = sqlx::query_as::<_, AttendanceRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_attendance(
        &self,
        input: InsertAttendance,
    ) -> Result<AttendanceRecord, StorageError> {
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO attendance (employee_id, `date`, status, check_in, check_out)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.employee_id)
        .bind(input.date)
        .bind(&input.status)
        .bind(&input.check_in)
        .bind(&input.check_out)
        .execute(&mut *conn)
        .await?;

        let sql = format!("SELECT {} FROM attendance WHERE id = ?", ATTENDANCE_COLUMNS);
        let record = sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(result.last_insert_id())
            .fetch_one(&mut *conn)
            .await?;
        Ok(record)
    }
}
