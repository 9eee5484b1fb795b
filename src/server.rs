mod app_state;
mod extractors;
mod handlers;

use crate::{api::Api, config::Config, database::Database, server::app_state::AppState};
use actix_web::{App, HttpServer, middleware, web};
use anyhow::Context;
use std::fs;
use tracing::info;
use tracing_actix_web::TracingLogger;

#[actix_web::main]
pub async fn run(config: Config, http_port: u16) -> Result<(), anyhow::Error> {
    fs::create_dir_all(&config.db.path).with_context(|| {
        format!(
            "Cannot create database folder {}",
            config.db.path.display()
        )
    })?;
    let db = Database::open_path(&config.db.path).await?;
    let api = Api::new(config, db)?;

    let state = web::Data::new(AppState::new(api));
    info!("Credvault API server is listening on port {http_port}.");
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/signup", web::post().to(handlers::security_signup))
                    .route("/signin", web::post().to(handlers::security_signin))
                    .service(
                        web::scope("/credentials")
                            .route("", web::get().to(handlers::credentials_list))
                            .route("", web::post().to(handlers::credentials_create))
                            .route(
                                "/{credential_id}",
                                web::get().to(handlers::credentials_get),
                            )
                            .route(
                                "/{credential_id}",
                                web::patch().to(handlers::credentials_update),
                            )
                            .route(
                                "/{credential_id}",
                                web::delete().to(handlers::credentials_delete),
                            ),
                    ),
            )
    })
    .bind(("0.0.0.0", http_port))
    .with_context(|| format!("Cannot bind to port {http_port}"))?
    .run()
    .await
    .with_context(|| "HTTP server failed")
}
