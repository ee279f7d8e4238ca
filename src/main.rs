#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::items_after_statements)]

mod cfg;
mod credentials;
mod error;
mod form;
mod liquid_utils;
mod models;
mod routes;
mod service;
mod state;

use cfg::Settings;
use liquid_utils::partials::{init_partials, PARTIALS};
use service::RestBookingService;
use state::BookingState;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[macro_use]
extern crate tracing;

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Unable to read .env, continuing without it: {e:?}");
    }
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    PARTIALS
        .set(init_partials().await)
        .expect("unable to set partials");

    let settings = Settings::new().await.expect("unable to load settings");
    info!(api = %settings.api.base_url, "Loaded settings");

    let service = RestBookingService::new(&settings.api).expect("unable to build backend client");
    let bind = settings.server.bind.clone();
    let state = BookingState::new(settings, Arc::new(service)).await;

    let listener = TcpListener::bind(&bind)
        .await
        .expect("unable to bind listener");
    info!(%bind, "Serving booking form");

    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("unable to serve");
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(?e, "Unable to listen for shutdown signal");
    }
    info!("Shutting down");
}
