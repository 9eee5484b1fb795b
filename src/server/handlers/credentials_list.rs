use crate::{error::Error, server::app_state::AppState, users::User};
use actix_web::{HttpResponse, web};

/// GET /api/credentials
pub async fn credentials_list(
    state: web::Data<AppState>,
    user: User,
) -> Result<HttpResponse, Error> {
    let credentials = state.api.credentials(&user).list().await?;
    Ok(HttpResponse::Ok().json(credentials))
}
