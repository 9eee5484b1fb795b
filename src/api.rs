use crate::{
    config::Config, credentials::CredentialsCipher, database::Database,
    security::SecurityApiExt,
};
use anyhow::Context;

/// Shared handle to all backend services, constructed once at startup and passed by reference to
/// whatever needs it.
pub struct Api {
    pub db: Database,
    pub config: Config,
    /// Field-level cipher with the key/IV derived once from the configured operator seeds.
    pub credentials_cipher: CredentialsCipher,
}

impl Api {
    /// Creates a new API handle. Fails if the credentials encryption seeds aren't configured.
    pub fn new(config: Config, db: Database) -> anyhow::Result<Self> {
        let key_seed = config
            .security
            .encryption_key_seed
            .as_deref()
            .with_context(|| "Credentials encryption key seed is not configured.")?;
        let iv_seed = config
            .security
            .encryption_iv_seed
            .as_deref()
            .with_context(|| "Credentials encryption IV seed is not configured.")?;
        let credentials_cipher = CredentialsCipher::new(key_seed, iv_seed)?;

        Ok(Self {
            db,
            config,
            credentials_cipher,
        })
    }

    /// Returns an API to work with security related tasks (signup, signin, tokens).
    pub fn security(&self) -> SecurityApiExt<'_> {
        SecurityApiExt::new(self)
    }
}

impl AsRef<Api> for Api {
    fn as_ref(&self) -> &Self {
        self
    }
}
