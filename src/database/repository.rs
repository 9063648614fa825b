use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::dataset::DatasetRow;
use crate::database::models::{Dataset, DatasetInput, DatasetPatch};

const SELECT_DATASETS: &str = r#"
    SELECT d.id, d.name, d.description, d.size, d.created, d.user_id,
           u.display_name AS user_display_name
    FROM datasets d
    LEFT JOIN users u ON u.id = d.user_id
"#;

/// Dataset persistence. Every read resolves the owner to a display-name projection.
#[derive(Clone)]
pub struct DatasetRepository {
    pool: SqlitePool,
}

impl DatasetRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Validate and insert a new dataset owned by `owner_id`.
    pub async fn create(&self, input: &DatasetInput, owner_id: Uuid) -> Result<Dataset, DatabaseError> {
        let valid = input.validate()?;
        let id = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO datasets (id, name, description, size, created, user_id)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(&valid.name)
        .bind(&valid.description)
        .bind(valid.size)
        .bind(Utc::now())
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        debug!("Created dataset {} for owner {}", id, owner_id);
        self.get_by_id(id).await
    }

    /// All datasets, newest first.
    pub async fn list(&self) -> Result<Vec<Dataset>, DatabaseError> {
        let sql = format!("{} ORDER BY d.created DESC, d.rowid DESC", SELECT_DATASETS);
        let rows = sqlx::query_as::<_, DatasetRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Dataset::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Dataset, DatabaseError> {
        let sql = format!("{} WHERE d.id = ?", SELECT_DATASETS);
        sqlx::query_as::<_, DatasetRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Dataset::from)
            .ok_or_else(|| DatabaseError::NotFound(format!("Dataset {}", id)))
    }

    /// Resolve a raw path segment. Malformed identifiers are reported as not found.
    pub async fn find_by_key(&self, key: &str) -> Result<Dataset, DatabaseError> {
        let id = Uuid::parse_str(key)
            .map_err(|_| DatabaseError::NotFound(format!("Dataset {}", key)))?;
        self.get_by_id(id).await
    }

    /// Merge the allow-listed fields of `patch` onto `dataset` and persist.
    pub async fn update(&self, dataset: &Dataset, patch: &DatasetPatch) -> Result<Dataset, DatabaseError> {
        let valid = dataset.merge(patch)?;

        let result = sqlx::query(
            "UPDATE datasets SET name = ?, description = ?, size = ? WHERE id = ?",
        )
        .bind(&valid.name)
        .bind(&valid.description)
        .bind(valid.size)
        .bind(dataset.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Dataset {}", dataset.id)));
        }

        Ok(Dataset {
            name: valid.name,
            description: valid.description,
            size: valid.size,
            ..dataset.clone()
        })
    }

    /// Delete permanently, returning the state the caller loaded.
    pub async fn remove(&self, dataset: &Dataset) -> Result<Dataset, DatabaseError> {
        let result = sqlx::query("DELETE FROM datasets WHERE id = ?")
            .bind(dataset.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Dataset {}", dataset.id)));
        }

        debug!("Removed dataset {}", dataset.id);
        Ok(dataset.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::users::{NewUser, UserRepository};
    use crate::database::DatabaseManager;
    use serde_json::json;

    async fn setup() -> (DatasetRepository, Uuid) {
        let db = DatabaseManager::in_memory().await.unwrap();
        let users = UserRepository::new(db.pool().clone());
        let owner = users
            .create(&NewUser {
                username: "username".to_string(),
                password: "password".to_string(),
                display_name: "Full Name".to_string(),
                email: Some("test@test.com".to_string()),
            })
            .await
            .unwrap();
        (DatasetRepository::new(db.pool().clone()), owner.id)
    }

    fn input(name: &str) -> DatasetInput {
        DatasetInput {
            name: Some(name.to_string()),
            description: Some("Dataset description".to_string()),
            size: None,
        }
    }

    #[tokio::test]
    async fn create_stamps_owner_and_resolves_display_name() {
        let (repo, owner) = setup().await;
        let dataset = repo.create(&input("  Dataset Name "), owner).await.unwrap();
        assert_eq!(dataset.name, "Dataset Name");
        assert_eq!(dataset.owner.id, owner);
        assert_eq!(dataset.owner.display_name.as_deref(), Some("Full Name"));
    }

    #[tokio::test]
    async fn create_without_name_persists_nothing() {
        let (repo, owner) = setup().await;
        let err = repo.create(&input(""), owner).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
        assert!(err.to_string().contains("Please fill Dataset name"));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let (repo, owner) = setup().await;
        for name in ["first", "second", "third"] {
            repo.create(&input(name), owner).await.unwrap();
        }
        let names: Vec<_> = repo.list().await.unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn malformed_and_unknown_ids_are_not_found() {
        let (repo, _) = setup().await;
        assert!(matches!(
            repo.find_by_key("525a8422f6d0f87f0e407a33").await,
            Err(DatabaseError::NotFound(_))
        ));
        assert!(matches!(
            repo.get_by_id(Uuid::new_v4()).await,
            Err(DatabaseError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn update_merges_and_persists() {
        let (repo, owner) = setup().await;
        let mut seeded = input("Dataset Name");
        seeded.size = Some(5.0);
        let dataset = repo.create(&seeded, owner).await.unwrap();

        let patch: DatasetPatch = serde_json::from_value(json!({ "name": "New Name" })).unwrap();
        let updated = repo.update(&dataset, &patch).await.unwrap();
        assert_eq!(updated.name, "New Name");

        let reloaded = repo.get_by_id(dataset.id).await.unwrap();
        assert_eq!(reloaded.name, "New Name");
        assert_eq!(reloaded.description, "Dataset description");
        assert_eq!(reloaded.size, Some(5.0));
        assert_eq!(reloaded.created, dataset.created);
    }

    #[tokio::test]
    async fn update_rejects_blank_name_and_keeps_row() {
        let (repo, owner) = setup().await;
        let dataset = repo.create(&input("Dataset Name"), owner).await.unwrap();
        let patch: DatasetPatch = serde_json::from_value(json!({ "name": " " })).unwrap();
        assert!(repo.update(&dataset, &patch).await.is_err());
        assert_eq!(repo.get_by_id(dataset.id).await.unwrap().name, "Dataset Name");
    }

    #[tokio::test]
    async fn remove_returns_prior_state_and_second_remove_fails() {
        let (repo, owner) = setup().await;
        let dataset = repo.create(&input("Dataset Name"), owner).await.unwrap();
        let removed = repo.remove(&dataset).await.unwrap();
        assert_eq!(removed, dataset);
        assert!(matches!(repo.remove(&dataset).await, Err(DatabaseError::NotFound(_))));
    }
}
