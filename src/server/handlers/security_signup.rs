use crate::{error::Error, server::app_state::AppState};
use actix_web::{HttpResponse, web};
use serde_derive::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct SignupBody {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// POST /api/signup
pub async fn security_signup(
    state: web::Data<AppState>,
    body: web::Json<SignupBody>,
) -> Result<HttpResponse, Error> {
    let security = state.api.security();
    let user = security
        .signup(&body.username, &body.email, &body.password)
        .await?;
    let token = security.issue_token(&user)?;

    Ok(HttpResponse::Created().json(json!({ "token": token, "user": user })))
}
