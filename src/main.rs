use std::{net::SocketAddr, sync::Arc, time::Instant};

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use env_logger::Env;
use log::info;
use tokio::net::TcpListener;

mod browser;
mod config;
mod data;
mod html;
mod routes;
mod search;

#[derive(Clone)]
pub struct AppState {
    catalog: Arc<data::Catalog>,
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::pages::catalog))
        .route("/books.json", get(routes::files::books))
        .route("/components/results", get(routes::components::results))
        .route("/script/:file", get(routes::files::script))
        .route("/style/:file", get(routes::files::style))
        .route(
            "/theme",
            post(routes::theme::toggle).get(routes::theme::toggle_and_return),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let config = config::Config::parse();

    let catalog_load_start = Instant::now();
    let catalog = data::Catalog::load(&config.data, config.year_field).await;
    let catalog_load_elapsed = catalog_load_start.elapsed();
    info!(
        "Catalog of {} books loaded in {catalog_load_elapsed:?}",
        catalog.len()
    );

    let state = AppState {
        catalog: Arc::new(catalog),
    };

    let address = SocketAddr::new(config.bind, config.port);
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("could not listen on {address}"))?;
    info!("Listening on http://{address}");

    axum::serve(listener, app(state)).await?;
    Ok(())
}
