mod credentials_create;
mod credentials_delete;
mod credentials_get;
mod credentials_list;
mod credentials_update;
mod security_signin;
mod security_signup;

pub use self::{
    credentials_create::credentials_create, credentials_delete::credentials_delete,
    credentials_get::credentials_get, credentials_list::credentials_list,
    credentials_update::credentials_update, security_signin::security_signin,
    security_signup::security_signup,
};

use crate::error::Error;
use uuid::Uuid;

/// Parses the credential ID path segment, rejecting anything that is not a valid ID before any
/// storage call is made.
fn parse_credential_id(credential_id: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(credential_id)
        .map_err(|_| Error::client("Please provide a valid credential ID."))
}
