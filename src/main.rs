//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::{AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // (Apenas para testes locais) o .env é opcional
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Sem folha de cálculo ou sem fontes a aplicação não deve iniciar.
    let config = Config::from_env()?;
    let app_state = AppState::new(&config).inspect_err(|e| {
        tracing::error!("🔥 Falha ao inicializar o estado da aplicação: {:#}", e);
    })?;

    let app = handlers::routes(app_state);

    let listener = TcpListener::bind(config.app_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
