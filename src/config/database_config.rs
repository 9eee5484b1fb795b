use serde_derive::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the SQLite database.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// Path to the folder where the database file is stored.
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data"),
        }
    }
}
