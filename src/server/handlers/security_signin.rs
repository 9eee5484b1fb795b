use crate::{error::Error, server::app_state::AppState};
use actix_web::{HttpResponse, web};
use serde_derive::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct SigninBody {
    pub email: String,
    pub password: String,
}

/// POST /api/signin
pub async fn security_signin(
    state: web::Data<AppState>,
    body: web::Json<SigninBody>,
) -> Result<HttpResponse, Error> {
    let security = state.api.security();
    let user = security.signin(&body.email, &body.password).await?;
    let token = security.issue_token(&user)?;

    Ok(HttpResponse::Ok().json(json!({ "token": token, "user": user })))
}
