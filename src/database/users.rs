use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::password;
use crate::database::manager::{is_unique_violation, DatabaseError};
use crate::database::models::User;

/// Fields accepted when registering a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub email: Option<String>,
}

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_user: &NewUser) -> Result<User, DatabaseError> {
        let salt = password::generate_salt();
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username.clone(),
            display_name: new_user.display_name.trim().to_string(),
            email: new_user.email.clone(),
            password_hash: password::hash_password(&new_user.password, &salt),
            salt,
            created: Utc::now(),
        };

        match sqlx::query(
            "INSERT INTO users (id, username, display_name, email, password_hash, salt, created)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.display_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.salt)
        .bind(user.created)
        .execute(&self.pool)
        .await
        {
            Ok(_) => Ok(user),
            Err(err) if is_unique_violation(&err) => Err(DatabaseError::Conflict(format!(
                "Username '{}' already exists",
                new_user.username
            ))),
            Err(err) => Err(DatabaseError::Sqlx(err)),
        }
    }

    /// Check if a user exists by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, display_name, email, password_hash, salt, created
             FROM users
             WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, display_name, email, password_hash, salt, created
             FROM users
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("User {}", id)))
    }

    /// The user matching both username and password, if any.
    pub async fn authenticate(&self, username: &str, candidate: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self
            .find_by_username(username)
            .await?
            .filter(|user| password::verify_password(candidate, &user.salt, &user.password_hash)))
    }
}
