mod cache;
mod config;
mod errors;
mod handlers;
mod models;
mod routes;
mod scheduling;
mod services;
mod state;
#[cfg(test)]
mod testing;

use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    dotenv().ok();

    let config = Config::from_env()?;
    let state = web::Data::new(AppState::from_config(&config).await?);

    info!("listening on {}:{}", config.host, config.port);
    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes::init))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await?;

    Ok(())
}
