mod api_ext;
mod jwt;
mod password;

pub use self::{
    api_ext::SecurityApiExt,
    jwt::Claims,
    password::{hash_password, verify_password},
};
