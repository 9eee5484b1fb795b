use crate::{database::Database, users::User};
use sqlx::query_as;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
struct RawUser {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    created_at: OffsetDateTime,
}

impl From<RawUser> for User {
    fn from(raw: RawUser) -> Self {
        User {
            id: raw.id.into(),
            username: raw.username,
            email: raw.email,
            password_hash: raw.password_hash,
            created_at: raw.created_at,
        }
    }
}

/// Extends the primary database with user management methods.
impl Database {
    /// Inserts a new user row.
    pub async fn insert_user(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
INSERT INTO users (id, username, email, password_hash, created_at)
VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(*user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves a user by a case-insensitive email match.
    pub async fn get_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let raw: Option<RawUser> = query_as(
            r#"
SELECT id, username, email, password_hash, created_at
FROM users
WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(raw.map(User::from))
    }

    /// Retrieves a user by ID.
    pub async fn get_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let raw: Option<RawUser> = query_as(
            r#"
SELECT id, username, email, password_hash, created_at
FROM users
WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(raw.map(User::from))
    }
}
