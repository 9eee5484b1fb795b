use crate::database::Database;
use sqlx::query_as;
use time::OffsetDateTime;
use uuid::Uuid;

/// A credential row exactly as stored: every sensitive column holds base64-encoded ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub(crate) struct RawCredential {
    pub id: Uuid,
    pub user_id: Uuid,
    pub cred_type: String,
    pub cred_value: String,
    pub password: String,
    pub comment: Option<String>,
    pub pinned: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Ciphertext values for a partial update. `None` columns are left untouched. The set of fields
/// here, together with the fixed column list in the update statement, forms the compile-time
/// allow-list of updatable columns — caller input never shapes the statement.
#[derive(Debug, Clone, Default)]
pub(crate) struct RawCredentialUpdate {
    pub cred_type: Option<String>,
    pub cred_value: Option<String>,
    pub password: Option<String>,
    pub comment: Option<String>,
    pub pinned: Option<String>,
}

/// Extends the primary database with credentials CRUD methods. All values that cross this
/// boundary are ciphertext; encryption and decryption happen in the API layer.
impl Database {
    /// Inserts a new credential row and returns it as stored. A missing returned row is treated
    /// as a fatal persistence fault for this call, not retried.
    pub(crate) async fn insert_credential(
        &self,
        raw: &RawCredential,
    ) -> anyhow::Result<RawCredential> {
        let inserted: Option<RawCredential> = query_as(
            r#"
INSERT INTO credentials (id, user_id, cred_type, cred_value, password, comment, pinned, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
RETURNING id, user_id, cred_type, cred_value, password, comment, pinned, created_at, updated_at
            "#,
        )
        .bind(raw.id)
        .bind(raw.user_id)
        .bind(&raw.cred_type)
        .bind(&raw.cred_value)
        .bind(&raw.password)
        .bind(&raw.comment)
        .bind(&raw.pinned)
        .bind(raw.created_at)
        .bind(raw.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        inserted.ok_or_else(|| {
            anyhow::anyhow!("Credential insert for user {} didn't return a row.", raw.user_id)
        })
    }

    /// Fetches a single credential row by ID.
    pub(crate) async fn get_credential(&self, id: Uuid) -> anyhow::Result<Option<RawCredential>> {
        Ok(query_as(
            r#"
SELECT id, user_id, cred_type, cred_value, password, comment, pinned, created_at, updated_at
FROM credentials
WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    /// Fetches all credential rows that belong to the given user.
    pub(crate) async fn get_user_credentials(
        &self,
        user_id: Uuid,
    ) -> anyhow::Result<Vec<RawCredential>> {
        Ok(query_as(
            r#"
SELECT id, user_id, cred_type, cred_value, password, comment, pinned, created_at, updated_at
FROM credentials
WHERE user_id = ?1
ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    /// Applies a partial update in a single parameterized statement: absent fields bind NULL and
    /// keep the current column value, present fields overwrite it, `updated_at` always advances.
    /// Returns `None` if no row with the given ID exists.
    pub(crate) async fn update_credential(
        &self,
        id: Uuid,
        update: &RawCredentialUpdate,
    ) -> anyhow::Result<Option<RawCredential>> {
        Ok(query_as(
            r#"
UPDATE credentials
SET cred_type = COALESCE(?1, cred_type),
    cred_value = COALESCE(?2, cred_value),
    password = COALESCE(?3, password),
    comment = COALESCE(?4, comment),
    pinned = COALESCE(?5, pinned),
    updated_at = ?6
WHERE id = ?7
RETURNING id, user_id, cred_type, cred_value, password, comment, pinned, created_at, updated_at
            "#,
        )
        .bind(&update.cred_type)
        .bind(&update.cred_value)
        .bind(&update.password)
        .bind(&update.comment)
        .bind(&update.pinned)
        .bind(OffsetDateTime::now_utc())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    /// Deletes a credential row by ID and returns the number of affected rows.
    pub(crate) async fn remove_credential(&self, id: Uuid) -> anyhow::Result<u64> {
        Ok(sqlx::query("DELETE FROM credentials WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected())
    }

    /// Removes every credential row. Test/operational utility, not reachable over the API.
    pub(crate) async fn clear_credentials(&self) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM credentials")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
