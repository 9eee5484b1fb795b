use serde_derive::{Deserialize, Serialize};

/// Configuration for the security functionality.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct SecurityConfig {
    /// Secret key used to sign JWT tokens used for HTTP authentication. If not provided, users
    /// won't be able to sign in.
    pub jwt_secret: Option<String>,
    /// Operator secret the credentials encryption key is derived from. If not provided, the
    /// server refuses to start.
    pub encryption_key_seed: Option<String>,
    /// Operator secret the credentials encryption IV is derived from. If not provided, the
    /// server refuses to start.
    pub encryption_iv_seed: Option<String>,
}
