use serde_derive::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims struct.
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct Claims {
    /// ID of the user the token was issued for.
    pub sub: Uuid,
    /// Token expiration time (UTC unix timestamp).
    pub exp: i64,
}
