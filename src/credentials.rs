mod api_ext;
mod cipher;
mod credential;
mod database_ext;

pub(crate) use self::database_ext::{RawCredential, RawCredentialUpdate};
pub use self::{
    api_ext::CredentialsApiExt,
    cipher::CredentialsCipher,
    credential::{CreateCredentialParams, Credential, UpdateCredentialParams},
};
