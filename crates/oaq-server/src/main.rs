use std::path::Path;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use oaq_llm::Chooser;
use oaq_server::{AppState, ServerConfig, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env();

    log::info!("loading OpenAPI document from {}", config.spec_path);
    let document = oaq_core::spec::load_document(Path::new(&config.spec_path))
        .with_context(|| format!("failed to load {}", config.spec_path))?;
    log::info!(
        "indexed {} operations across {} paths ({} schemas)",
        document.operation_count(),
        document.paths.len(),
        document.schema_count()
    );

    let chooser = Chooser::from_env().context("failed to build chat backend client")?;
    let state = AppState::new(document, chooser);

    let app = create_router().with_state(state);
    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;
    log::info!("listening on http://{}", config.bind_address());

    axum::serve(listener, app).await?;
    Ok(())
}
