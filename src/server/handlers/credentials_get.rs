use crate::{
    error::Error,
    server::{app_state::AppState, handlers::parse_credential_id},
    users::User,
};
use actix_web::{HttpResponse, web};

/// GET /api/credentials/{credential_id}
pub async fn credentials_get(
    state: web::Data<AppState>,
    user: User,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let id = parse_credential_id(&path)?;
    let credential = state.api.credentials(&user).get(id).await?;
    Ok(HttpResponse::Ok().json(credential))
}
