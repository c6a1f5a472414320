//! Row-level persistence for employees and attendance records.

use async_trait::async_trait;
use derive_more::Display;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::model::attendance::{AttendanceRecord, InsertAttendance};
use crate::model::employee::{Employee, InsertEmployee};

pub mod memory;
pub mod mysql;

pub use memory::MemoryStorage;
pub use mysql::MySqlStorage;

#[derive(Debug, Display)]
pub enum StorageError {
    /// A unique column already holds the value.
    #[display(fmt = "duplicate entry: {}", _0)]
    Duplicate(String),
    #[display(fmt = "database error: {}", _0)]
    Database(sqlx::Error),
}

impl std::error::Error for StorageError {}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.code().as_deref() == Some("23000") {
                return StorageError::Duplicate(db_err.message().to_string());
            }
        }
        StorageError::Database(e)
    }
}

#[async_trait]
pub trait Storage: Send + Sync {
    async fn list_employees(&self) -> Result<Vec<Employee>, StorageError>;

    /// `None` when no employee has this id.
    async fn get_employee(&self, id: i32) -> Result<Option<Employee>, StorageError>;

    /// Returns the stored row with its id and defaults filled in.
    async fn create_employee(&self, input: InsertEmployee) -> Result<Employee, StorageError>;

    /// `true` if a row was removed.
    async fn delete_employee(&self, id: i32) -> Result<bool, StorageError>;

    async fn list_attendance(&self) -> Result<Vec<AttendanceRecord>, StorageError>;

    async fn create_attendance(
        &self,
        input: InsertAttendance,
    ) -> Result<AttendanceRecord, StorageError>;
}

/// Opens the configured backend. Without a database URL the records live in
/// process memory and are lost on exit.
pub async fn connect(config: &Config) -> Result<Arc<dyn Storage>, StorageError> {
    match &config.database_url {
        Some(url) => {
            let storage = MySqlStorage::connect(url).await?;
            storage.ensure_schema().await?;
            info!("Using MySQL storage");
            Ok(Arc::new(storage))
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory storage");
            Ok(Arc::new(MemoryStorage::default()))
        }
    }
}
