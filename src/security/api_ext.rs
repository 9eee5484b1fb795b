use crate::{
    error::Error,
    security::{Claims, hash_password, verify_password},
    users::User,
};
use anyhow::Context;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use time::OffsetDateTime;

/// How long an issued session token stays valid.
const TOKEN_LIFETIME: time::Duration = time::Duration::days(7);

pub struct SecurityApiExt<'a> {
    api: &'a crate::api::Api,
}

impl<'a> SecurityApiExt<'a> {
    pub fn new(api: &'a crate::api::Api) -> Self {
        Self { api }
    }

    /// Registers a new user with the given username, email and password. The password is stored
    /// as an Argon2id hash only.
    pub async fn signup(&self, username: &str, email: &str, password: &str) -> Result<User, Error> {
        if username.is_empty() || email.is_empty() {
            return Err(Error::client("Username and email cannot be empty."));
        }
        if password.is_empty() {
            return Err(Error::client("Password cannot be empty."));
        }

        if self.api.db.get_user_by_email(email).await?.is_some() {
            return Err(Error::client("User with this email already exists."));
        }

        let user = User {
            id: Default::default(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
            created_at: OffsetDateTime::now_utc(),
        };
        self.api.db.insert_user(&user).await?;

        Ok(user)
    }

    /// Validates the given email/password pair and returns the matching user. The failure is
    /// uniform regardless of whether the email is unknown or the password is wrong.
    pub async fn signin(&self, email: &str, password: &str) -> Result<User, Error> {
        let Some(user) = self.api.db.get_user_by_email(email).await? else {
            return Err(Error::unauthorized());
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(Error::unauthorized());
        }

        Ok(user)
    }

    /// Issues a signed session token for the given user.
    pub fn issue_token(&self, user: &User) -> Result<String, Error> {
        let claims = Claims {
            sub: *user.id,
            exp: (OffsetDateTime::now_utc() + TOKEN_LIFETIME).unix_timestamp(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret()?.as_bytes()),
        )
        .with_context(|| "Failed to sign a session token.")?)
    }

    /// Verifies a session token and resolves it to the user it was issued for. Returns `None`
    /// for invalid, expired or dangling tokens.
    pub async fn authenticate(&self, token: &str) -> anyhow::Result<Option<User>> {
        let secret = self.jwt_secret()?;
        let claims = match decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        ) {
            Ok(token_data) => token_data.claims,
            Err(_) => return Ok(None),
        };

        self.api.db.get_user_by_id(claims.sub).await
    }

    fn jwt_secret(&self) -> Result<&str, Error> {
        Ok(self
            .api
            .config
            .security
            .jwt_secret
            .as_deref()
            .with_context(|| "JWT secret is not configured.")?)
    }
}
