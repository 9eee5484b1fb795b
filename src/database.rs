use anyhow::Context;
use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePool},
};
use std::path::Path;

#[derive(Clone)]
pub struct Database {
    pub(crate) pool: Pool<Sqlite>,
}

/// Common methods for the primary database, extensions are implemented separately in every module.
impl Database {
    /// Wraps an existing pool and runs pending migrations (used by tests and custom setups).
    pub async fn create(pool: SqlitePool) -> anyhow::Result<Self> {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .with_context(|| "Failed to migrate database")?;

        Ok(Database { pool })
    }

    /// Opens the database stored in the given folder, creating the file if it doesn't exist, and
    /// applies pending migrations before returning.
    pub async fn open_path<P: AsRef<Path>>(data_path: P) -> anyhow::Result<Self> {
        let db_path = data_path.as_ref().join("credvault.db");
        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

        Self::create(pool).await
    }
}

impl AsRef<Database> for Database {
    fn as_ref(&self) -> &Self {
        self
    }
}
