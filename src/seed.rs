use tracing::info;

use crate::model::employee::InsertEmployee;
use crate::storage::{Storage, StorageError};

fn seed_employees() -> [InsertEmployee; 2] {
    [
        InsertEmployee {
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john@example.com".into(),
            position: "Software Engineer".into(),
            department: "Engineering".into(),
            join_date: None,
        },
        InsertEmployee {
            first_name: "Jane".into(),
            last_name: "Smith".into(),
            email: "jane@example.com".into(),
            position: "HR Manager".into(),
            department: "Human Resources".into(),
            join_date: None,
        },
    ]
}

/// Inserts the sample employees when the table is empty. Returns how many
/// rows were inserted. Not safe to run concurrently with itself.
pub async fn seed_if_empty(storage: &dyn Storage) -> Result<usize, StorageError> {
    if !storage.list_employees().await?.is_empty() {
        info!("Employees present, skipping seed");
        return Ok(0);
    }

    let mut inserted = 0;
    for employee in seed_employees() {
        storage.create_employee(employee).await?;
        inserted += 1;
    }
    info!(inserted, "Seeded employees");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[actix_web::test]
    async fn test_seed_runs_once() {
        let storage = MemoryStorage::default();
        assert_eq!(seed_if_empty(&storage).await.unwrap(), 2);
        assert_eq!(seed_if_empty(&storage).await.unwrap(), 0);

        let employees = storage.list_employees().await.unwrap();
        assert_eq!(employees.len(), 2);
        assert_eq!(employees[0].email, "john@example.com");
        assert_eq!(employees[1].department, "Human Resources");
    }

    #[actix_web::test]
    async fn test_seed_skips_populated_store() {
        let storage = MemoryStorage::default();
        let [_, jane] = seed_employees();
        storage.create_employee(jane).await.unwrap();
        assert_eq!(seed_if_empty(&storage).await.unwrap(), 0);
        assert_eq!(storage.list_employees().await.unwrap().len(), 1);
    }
}
