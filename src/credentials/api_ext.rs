use crate::{
    api::Api,
    credentials::{
        CreateCredentialParams, Credential, RawCredential, RawCredentialUpdate,
        UpdateCredentialParams,
    },
    error::Error,
    users::User,
};
use anyhow::anyhow;
use time::OffsetDateTime;
use tracing::error;
use uuid::Uuid;

pub struct CredentialsApiExt<'a, 'u> {
    api: &'a Api,
    user: &'u User,
}

impl<'a, 'u> CredentialsApiExt<'a, 'u> {
    pub fn new(api: &'a Api, user: &'u User) -> Self {
        Self { api, user }
    }

    /// Creates a new credential owned by the user: assigns a fresh ID, encrypts every sensitive
    /// field, inserts the row and returns the created record with plaintext fields.
    pub async fn create(&self, params: CreateCredentialParams) -> Result<Credential, Error> {
        let cipher = &self.api.credentials_cipher;
        let now = OffsetDateTime::now_utc();
        let raw = RawCredential {
            id: Uuid::new_v4(),
            user_id: *self.user.id,
            cred_type: cipher.encrypt(&params.cred_type)?,
            cred_value: cipher.encrypt(&params.cred_value)?,
            password: cipher.encrypt(&params.password)?,
            comment: params
                .comment
                .as_deref()
                .map(|comment| cipher.encrypt(comment))
                .transpose()?,
            pinned: cipher.encrypt(bool_to_field(params.pinned))?,
            created_at: now,
            updated_at: now,
        };

        let inserted = self.api.db.insert_credential(&raw).await?;
        self.decrypt_credential(inserted)
    }

    /// Fetches a single credential by ID with all sensitive fields decrypted. Only the owner can
    /// retrieve it; existence of another user's credential is reported as `Unauthorized`.
    pub async fn get(&self, id: Uuid) -> Result<Credential, Error> {
        let raw = self.fetch_owned(id).await?;
        self.decrypt_credential(raw)
    }

    /// Lists all of the user's credentials with sensitive fields decrypted. A single row that
    /// fails to decrypt aborts the whole batch: a shortened list would silently mask a
    /// data-integrity fault.
    pub async fn list(&self) -> Result<Vec<Credential>, Error> {
        let raw_credentials = self.api.db.get_user_credentials(*self.user.id).await?;

        let mut credentials = Vec::with_capacity(raw_credentials.len());
        for raw in raw_credentials {
            credentials.push(self.decrypt_credential(raw)?);
        }

        Ok(credentials)
    }

    /// Applies a partial update: re-encrypts exactly the supplied fields and overwrites them in
    /// a single statement, leaving every other column untouched and advancing `updated_at`.
    /// Fields set to an empty string are still updated; only absent fields are skipped.
    pub async fn update(
        &self,
        id: Uuid,
        params: UpdateCredentialParams,
    ) -> Result<Credential, Error> {
        self.fetch_owned(id).await?;

        let cipher = &self.api.credentials_cipher;
        let update = RawCredentialUpdate {
            cred_type: params
                .cred_type
                .as_deref()
                .map(|value| cipher.encrypt(value))
                .transpose()?,
            cred_value: params
                .cred_value
                .as_deref()
                .map(|value| cipher.encrypt(value))
                .transpose()?,
            password: params
                .password
                .as_deref()
                .map(|value| cipher.encrypt(value))
                .transpose()?,
            comment: params
                .comment
                .as_deref()
                .map(|value| cipher.encrypt(value))
                .transpose()?,
            pinned: params
                .pinned
                .map(|value| cipher.encrypt(bool_to_field(value)))
                .transpose()?,
        };

        // The ownership check above and this statement aren't one transaction: a concurrent
        // delete between the two steps surfaces here as a missing row.
        let updated = self
            .api
            .db
            .update_credential(id, &update)
            .await?
            .ok_or_else(Error::not_found)?;

        self.decrypt_credential(updated)
    }

    /// Deletes a credential by ID. Zero affected rows after the existence check is a storage
    /// fault, reported distinctly from not-found.
    pub async fn delete(&self, id: Uuid) -> Result<(), Error> {
        self.fetch_owned(id).await?;

        let affected = self.api.db.remove_credential(id).await?;
        if affected == 0 {
            return Err(
                anyhow!("Credential {id} existed but the delete affected no rows.").into(),
            );
        }

        Ok(())
    }

    /// Fetches a raw row by ID and verifies the requester owns it, without touching ciphertext.
    async fn fetch_owned(&self, id: Uuid) -> Result<RawCredential, Error> {
        let raw = self
            .api
            .db
            .get_credential(id)
            .await?
            .ok_or_else(Error::not_found)?;

        if raw.user_id != *self.user.id {
            return Err(Error::unauthorized());
        }

        Ok(raw)
    }

    /// Decrypts every sensitive field of a stored row. Any failure is surfaced as a decryption
    /// error distinct from not-found, never as garbled field values.
    fn decrypt_credential(&self, raw: RawCredential) -> Result<Credential, Error> {
        let cipher = &self.api.credentials_cipher;
        let decrypt_field = |ciphertext: &str| {
            cipher.decrypt(ciphertext).inspect_err(|err| {
                error!(
                    user.id = %self.user.id,
                    credential.id = %raw.id,
                    "Failed to decrypt a stored credential field: {err:?}"
                );
            })
        };

        Ok(Credential {
            id: raw.id,
            user_id: raw.user_id.into(),
            cred_type: decrypt_field(&raw.cred_type)?,
            cred_value: decrypt_field(&raw.cred_value)?,
            password: decrypt_field(&raw.password)?,
            comment: raw
                .comment
                .as_deref()
                .map(|comment| decrypt_field(comment))
                .transpose()?,
            pinned: field_to_bool(&decrypt_field(&raw.pinned)?)?,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        })
    }
}

fn bool_to_field(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn field_to_bool(value: &str) -> Result<bool, Error> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::decryption(anyhow!(
            "Stored pinned flag decrypted to something that is not a boolean."
        ))),
    }
}

impl Api {
    /// Returns an API to work with the credentials of the given user.
    pub fn credentials<'a, 'u>(&'a self, user: &'u User) -> CredentialsApiExt<'a, 'u> {
        CredentialsApiExt::new(self, user)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        credentials::{CreateCredentialParams, RawCredentialUpdate, UpdateCredentialParams},
        error::ErrorKind,
        tests::{mock_api, mock_user, mock_user_with_id},
    };
    use sqlx::SqlitePool;
    use uuid::{Uuid, uuid};

    fn mock_params() -> CreateCredentialParams {
        CreateCredentialParams {
            cred_type: "domain".to_string(),
            cred_value: "a.com".to_string(),
            password: "p1".to_string(),
            comment: None,
            pinned: false,
        }
    }

    #[sqlx::test]
    async fn create_stores_ciphertext_and_returns_plaintext(
        pool: SqlitePool,
    ) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        let user = mock_user()?;
        api.db.insert_user(&user).await?;

        let credential = api
            .credentials(&user)
            .create(CreateCredentialParams {
                comment: Some("work account".to_string()),
                pinned: true,
                ..mock_params()
            })
            .await?;

        assert_eq!(credential.user_id, user.id);
        assert_eq!(credential.cred_type, "domain");
        assert_eq!(credential.cred_value, "a.com");
        assert_eq!(credential.password, "p1");
        assert_eq!(credential.comment.as_deref(), Some("work account"));
        assert!(credential.pinned);

        // The persisted row must hold ciphertext, not the plaintext values.
        let raw = api.db.get_credential(credential.id).await?.unwrap();
        assert_ne!(raw.cred_type, "domain");
        assert_ne!(raw.cred_value, "a.com");
        assert_ne!(raw.password, "p1");
        assert_ne!(raw.comment.as_deref(), Some("work account"));
        assert_ne!(raw.pinned, "true");

        Ok(())
    }

    #[sqlx::test]
    async fn get_round_trips_all_fields(pool: SqlitePool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        let user = mock_user()?;
        api.db.insert_user(&user).await?;

        let credentials_api = api.credentials(&user);
        let created = credentials_api
            .create(CreateCredentialParams {
                comment: Some("".to_string()),
                ..mock_params()
            })
            .await?;

        assert_eq!(credentials_api.get(created.id).await?, created);

        Ok(())
    }

    #[sqlx::test]
    async fn get_distinguishes_not_found_from_unauthorized(
        pool: SqlitePool,
    ) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        let owner = mock_user()?;
        let stranger = mock_user_with_id(uuid!("00000000-0000-0000-0000-000000000002"))?;
        api.db.insert_user(&owner).await?;
        api.db.insert_user(&stranger).await?;

        let created = api.credentials(&owner).create(mock_params()).await?;

        // A nonexistent ID yields NotFound regardless of the requester.
        let err = api.credentials(&owner).get(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = api
            .credentials(&stranger)
            .get(Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        // Another user's credential yields Unauthorized.
        let err = api
            .credentials(&stranger)
            .get(created.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        Ok(())
    }

    #[sqlx::test]
    async fn ownership_is_enforced_for_all_mutations(pool: SqlitePool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        let owner = mock_user()?;
        let stranger = mock_user_with_id(uuid!("00000000-0000-0000-0000-000000000002"))?;
        api.db.insert_user(&owner).await?;
        api.db.insert_user(&stranger).await?;

        let created = api.credentials(&owner).create(mock_params()).await?;

        let stranger_api = api.credentials(&stranger);
        let err = stranger_api
            .update(
                created.id,
                UpdateCredentialParams {
                    password: Some("hijacked".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        let err = stranger_api.delete(created.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        // The rejected requests must not have mutated anything.
        assert_eq!(api.credentials(&owner).get(created.id).await?, created);

        Ok(())
    }

    #[sqlx::test]
    async fn partial_update_leaves_other_fields_untouched(
        pool: SqlitePool,
    ) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        let user = mock_user()?;
        api.db.insert_user(&user).await?;

        let credentials_api = api.credentials(&user);
        let created = credentials_api.create(mock_params()).await?;

        let updated = credentials_api
            .update(
                created.id,
                UpdateCredentialParams {
                    cred_value: Some("b.com".to_string()),
                    ..Default::default()
                },
            )
            .await?;

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.cred_value, "b.com");
        assert_eq!(updated.cred_type, "domain");
        assert_eq!(updated.password, "p1");
        assert_eq!(updated.comment, None);
        assert!(!updated.pinned);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);

        Ok(())
    }

    #[sqlx::test]
    async fn update_with_empty_string_still_updates(pool: SqlitePool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        let user = mock_user()?;
        api.db.insert_user(&user).await?;

        let credentials_api = api.credentials(&user);
        let created = credentials_api
            .create(CreateCredentialParams {
                comment: Some("work account".to_string()),
                ..mock_params()
            })
            .await?;

        let updated = credentials_api
            .update(
                created.id,
                UpdateCredentialParams {
                    comment: Some("".to_string()),
                    ..Default::default()
                },
            )
            .await?;

        assert_eq!(updated.comment.as_deref(), Some(""));
        assert_eq!(updated.password, created.password);

        Ok(())
    }

    #[sqlx::test]
    async fn update_of_missing_credential_is_not_found(pool: SqlitePool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        let user = mock_user()?;
        api.db.insert_user(&user).await?;

        let err = api
            .credentials(&user)
            .update(
                Uuid::new_v4(),
                UpdateCredentialParams {
                    cred_value: Some("b.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        Ok(())
    }

    #[sqlx::test]
    async fn delete_succeeds_once_then_not_found(pool: SqlitePool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        let user = mock_user()?;
        api.db.insert_user(&user).await?;

        let credentials_api = api.credentials(&user);
        let created = credentials_api.create(mock_params()).await?;

        credentials_api.delete(created.id).await?;

        let err = credentials_api.delete(created.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = credentials_api.get(created.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        Ok(())
    }

    #[sqlx::test]
    async fn listing_is_scoped_to_the_owner(pool: SqlitePool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        let user_a = mock_user()?;
        let user_b = mock_user_with_id(uuid!("00000000-0000-0000-0000-000000000002"))?;
        api.db.insert_user(&user_a).await?;
        api.db.insert_user(&user_b).await?;

        let credentials_api_a = api.credentials(&user_a);
        let first = credentials_api_a.create(mock_params()).await?;
        let second = credentials_api_a
            .create(CreateCredentialParams {
                cred_value: "b.com".to_string(),
                ..mock_params()
            })
            .await?;
        let deleted = credentials_api_a.create(mock_params()).await?;
        credentials_api_a.delete(deleted.id).await?;

        api.credentials(&user_b)
            .create(CreateCredentialParams {
                cred_value: "c.com".to_string(),
                ..mock_params()
            })
            .await?;

        let mut listed = credentials_api_a.list().await?;
        listed.sort_by_key(|credential| credential.id);
        let mut expected = vec![first, second];
        expected.sort_by_key(|credential| credential.id);
        assert_eq!(listed, expected);

        let listed_b = api.credentials(&user_b).list().await?;
        assert_eq!(listed_b.len(), 1);
        assert_eq!(listed_b[0].cred_value, "c.com");

        Ok(())
    }

    #[sqlx::test]
    async fn corrupted_row_surfaces_decryption_error(pool: SqlitePool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        let user = mock_user()?;
        api.db.insert_user(&user).await?;

        let credentials_api = api.credentials(&user);
        let created = credentials_api.create(mock_params()).await?;

        // Corrupt the stored ciphertext behind the API's back.
        api.db
            .update_credential(
                created.id,
                &RawCredentialUpdate {
                    password: Some("bm90LWEtdmFsaWQtY2lwaGVydGV4dA==".to_string()),
                    ..Default::default()
                },
            )
            .await?;

        let err = credentials_api.get(created.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecryptionError);

        // One corrupt row aborts the whole listing rather than shortening it.
        credentials_api
            .create(CreateCredentialParams {
                cred_value: "b.com".to_string(),
                ..mock_params()
            })
            .await?;
        let err = credentials_api.list().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecryptionError);

        Ok(())
    }
}
