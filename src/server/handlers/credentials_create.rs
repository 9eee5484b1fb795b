use crate::{
    credentials::CreateCredentialParams, error::Error, server::app_state::AppState, users::User,
};
use actix_web::{HttpResponse, web};

/// POST /api/credentials
pub async fn credentials_create(
    state: web::Data<AppState>,
    user: User,
    body: web::Json<CreateCredentialParams>,
) -> Result<HttpResponse, Error> {
    let credential = state
        .api
        .credentials(&user)
        .create(body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(credential))
}
