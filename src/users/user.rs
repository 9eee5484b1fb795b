use crate::users::UserId;
use serde_derive::Serialize;
use time::OffsetDateTime;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
}

impl AsRef<User> for User {
    fn as_ref(&self) -> &User {
        self
    }
}
