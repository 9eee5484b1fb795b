use crate::{
    error::Error,
    server::{app_state::AppState, handlers::parse_credential_id},
    users::User,
};
use actix_web::{HttpResponse, web};

/// DELETE /api/credentials/{credential_id}
pub async fn credentials_delete(
    state: web::Data<AppState>,
    user: User,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let id = parse_credential_id(&path)?;
    state.api.credentials(&user).delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
