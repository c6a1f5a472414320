use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::{Storage, StorageError};
use crate::model::attendance::{AttendanceRecord, InsertAttendance};
use crate::model::employee::{Employee, InsertEmployee};

#[derive(Default)]
struct Tables {
    employees: BTreeMap<i32, Employee>,
    attendance: BTreeMap<i32, AttendanceRecord>,
    // last assigned ids; never reused, like AUTO_INCREMENT
    employee_seq: i32,
    attendance_seq: i32,
}

/// Process-local store with the same row semantics as the MySQL tables.
#[derive(Default)]
pub struct MemoryStorage {
    tables: Mutex<Tables>,
}

impl MemoryStorage {
    fn lock(&self) -> MutexGuard<'_, Tables> {
        // a panic while holding the lock leaves plain data behind
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn list_employees(&self) -> Result<Vec<Employee>, StorageError> {
        Ok(self.lock().employees.values().cloned().collect())
    }

    async fn get_employee(&self, id: i32) -> Result<Option<Employee>, StorageError> {
        Ok(self.lock().employees.get(&id).cloned())
    }

    async fn create_employee(&self, input: InsertEmployee) -> Result<Employee, StorageError> {
        let mut tables = self.lock();
        if tables.employees.values().any(|e| e.email == input.email) {
            return Err(StorageError::Duplicate(format!(
                "email '{}' already exists",
                input.email
            )));
        }

        tables.employee_seq += 1;
        let employee = Employee {
            id: tables.employee_seq,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            position: input.position,
            department: input.department,
            join_date: Some(input.join_date.unwrap_or_else(Utc::now)),
        };
        tables.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn delete_employee(&self, id: i32) -> Result<bool, StorageError> {
        Ok(self.lock().employees.remove(&id).is_some())
    }

    async fn list_attendance(&self) -> Result<Vec<AttendanceRecord>, StorageError> {
        Ok(self.lock().attendance.values().cloned().collect())
    }

    async fn create_attendance(
        &self,
        input: InsertAttendance,
    ) -> Result<AttendanceRecord, StorageError> {
        let mut tables = self.lock();
        tables.attendance_seq += 1;
        let record = AttendanceRecord {
            id: tables.attendance_seq,
            employee_id: input.employee_id,
            date: input.date,
            status: input.status,
            check_in: input.check_in,
            check_out: input.check_out,
        };
        tables.attendance.insert(record.id, record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(email: &str) -> InsertEmployee {
        InsertEmployee {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: email.into(),
            position: "Engineer".into(),
            department: "Engineering".into(),
            join_date: None,
        }
    }

    #[actix_web::test]
    async fn test_create_assigns_increasing_ids_and_join_date() {
        let storage = MemoryStorage::default();
        let first = storage.create_employee(employee("a@example.com")).await.unwrap();
        let second = storage.create_employee(employee("b@example.com")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.join_date.is_some());
        assert_eq!(storage.list_employees().await.unwrap(), vec![first, second]);
    }

    #[actix_web::test]
    async fn test_duplicate_email_is_rejected() {
        let storage = MemoryStorage::default();
        storage.create_employee(employee("dup@example.com")).await.unwrap();
        let err = storage
            .create_employee(employee("dup@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Duplicate(_)));
        assert_eq!(storage.list_employees().await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_delete_reports_existence_and_ids_are_not_reused() {
        let storage = MemoryStorage::default();
        let created = storage.create_employee(employee("x@example.com")).await.unwrap();
        assert!(storage.delete_employee(created.id).await.unwrap());
        assert!(!storage.delete_employee(created.id).await.unwrap());
        assert!(storage.get_employee(created.id).await.unwrap().is_none());

        let next = storage.create_employee(employee("y@example.com")).await.unwrap();
        assert_eq!(next.id, created.id + 1);
    }

    #[actix_web::test]
    async fn test_attendance_keeps_unchecked_employee_id() {
        let storage = MemoryStorage::default();
        let record = storage
            .create_attendance(InsertAttendance {
                employee_id: 404,
                date: Utc::now(),
                status: "Absent".into(),
                check_in: None,
                check_out: None,
            })
            .await
            .unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.employee_id, 404);
        assert_eq!(storage.list_attendance().await.unwrap(), vec![record]);
    }
}
