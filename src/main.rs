mod catalog;
mod config;
mod db;
mod entities;
mod error;
mod models;
mod routes;
mod seed;
mod service;
mod templates;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use tower_http::trace::TraceLayer;

use crate::{
    config::Config,
    service::{MovieService, SeaOrmMovieService},
};

#[derive(Clone)]
pub struct AppState {
    pub movies: Arc<dyn MovieService>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movieshelf=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_migrate(&config.database_url).await?;
    let movies: Arc<dyn MovieService> = Arc::new(SeaOrmMovieService::new(db));

    if config.seed_sample_data {
        seed::seed_if_empty(movies.as_ref()).await?;
    }

    let state = Arc::new(AppState { movies });

    let app = routes::router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
