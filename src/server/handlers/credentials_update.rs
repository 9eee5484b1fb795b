use crate::{
    credentials::UpdateCredentialParams,
    error::Error,
    server::{app_state::AppState, handlers::parse_credential_id},
    users::User,
};
use actix_web::{HttpResponse, web};

/// PATCH /api/credentials/{credential_id}
pub async fn credentials_update(
    state: web::Data<AppState>,
    user: User,
    path: web::Path<String>,
    body: web::Json<UpdateCredentialParams>,
) -> Result<HttpResponse, Error> {
    let id = parse_credential_id(&path)?;
    let credential = state
        .api
        .credentials(&user)
        .update(id, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(credential))
}
