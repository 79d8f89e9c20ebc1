use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use directory_core::{
    CoreConfig, DirectoryService, dataset_path_from_env_value, resolve_dataset_path,
};

/// Main entry point for the patient directory
///
/// Resolves configuration once, loads and normalises the bundled dataset, then
/// serves the REST API until interrupted.
///
/// # Environment Variables
/// - `DIRECTORY_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `PATIENT_DATASET_PATH`: Dataset file (default: bundled `data/patients.json`)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the dataset cannot be located, read, or parsed,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("directory_run=info".parse()?)
                .add_directive("directory_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("DIRECTORY_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let override_path = dataset_path_from_env_value(std::env::var("PATIENT_DATASET_PATH").ok());
    let dataset_path = resolve_dataset_path(override_path)?;
    let cfg = CoreConfig::new(dataset_path)?;
    let directory = DirectoryService::from_config(&cfg)
        .with_context(|| format!("loading dataset {}", cfg.dataset_path().display()))?;

    let app = router(AppState::new(directory));

    tracing::info!("++ Starting patient directory REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr)
        .await
        .with_context(|| format!("binding {rest_addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- Patient directory REST stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {:?}", e);
    }
}
