use crate::users::UserId;
use serde_derive::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Represents a user-owned credential record (e.g. a saved login). All sensitive fields are
/// stored encrypted at rest; this struct always carries the decrypted, plaintext values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credential {
    /// Unique identifier for the credential, assigned at creation.
    pub id: Uuid,
    /// The user who owns this credential.
    pub user_id: UserId,
    /// The kind of credential (e.g. `domain`).
    pub cred_type: String,
    /// The value the secret belongs to (e.g. a domain or site identifier).
    pub cred_value: String,
    /// The secret itself.
    pub password: String,
    /// Optional free-text comment.
    pub comment: Option<String>,
    /// Whether the credential is pinned in the UI.
    pub pinned: bool,
    /// When the credential was first created.
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    /// When the credential was last updated.
    #[serde(with = "time::serde::timestamp")]
    pub updated_at: OffsetDateTime,
}

/// Field values for a new credential.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCredentialParams {
    pub cred_type: String,
    pub cred_value: String,
    pub password: String,
    pub comment: Option<String>,
    #[serde(default)]
    pub pinned: bool,
}

/// Field values for a partial credential update. Only fields explicitly supplied are written;
/// `None` means "leave untouched", while a present-but-empty string still updates the field.
/// This fixed set of fields is the complete allow-list of what an update may touch — callers
/// can never address any other column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UpdateCredentialParams {
    pub cred_type: Option<String>,
    pub cred_value: Option<String>,
    pub password: Option<String>,
    pub comment: Option<String>,
    pub pinned: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::{CreateCredentialParams, UpdateCredentialParams};

    #[test]
    fn create_params_deserialization() -> anyhow::Result<()> {
        let params: CreateCredentialParams = serde_json::from_str(
            r#"{ "cred_type": "domain", "cred_value": "a.com", "password": "p1" }"#,
        )?;

        assert_eq!(
            params,
            CreateCredentialParams {
                cred_type: "domain".to_string(),
                cred_value: "a.com".to_string(),
                password: "p1".to_string(),
                comment: None,
                pinned: false,
            }
        );

        Ok(())
    }

    #[test]
    fn update_params_distinguish_absent_from_empty() -> anyhow::Result<()> {
        let params: UpdateCredentialParams =
            serde_json::from_str(r#"{ "cred_value": "", "pinned": true }"#)?;

        assert_eq!(
            params,
            UpdateCredentialParams {
                cred_type: None,
                cred_value: Some("".to_string()),
                password: None,
                comment: None,
                pinned: Some(true),
            }
        );

        Ok(())
    }
}
