use crate::{error::Error as CredvaultError, server::app_state::AppState, users::User};
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::{future::Future, pin::Pin};
use tracing::error;

impl FromRequest for User {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let state = web::Data::<AppState>::extract(&req).await?;

            let Some(bearer_auth) = Option::<BearerAuth>::extract(&req).await? else {
                return Err(CredvaultError::unauthorized().into());
            };

            match state.api.security().authenticate(bearer_auth.token()).await {
                Ok(Some(user)) => Ok(user),
                Ok(None) => Err(CredvaultError::unauthorized().into()),
                Err(err) => {
                    error!("Failed to extract user information due to: {err:?}");
                    Err(CredvaultError::from(err).into())
                }
            }
        })
    }
}
