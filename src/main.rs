//! trivia-round binary entrypoint wiring configuration, storage, the trivia client and the terminal UI.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(feature = "file-store")]
use trivia_round::dao::progress_store::FileKeyValueStore;
#[cfg(not(feature = "file-store"))]
use trivia_round::dao::progress_store::MemoryKeyValueStore;
use trivia_round::{
    client::opentdb::OpenTdbClient,
    config::AppConfig,
    console::Console,
    dao::{progress::ProgressStore, progress_store::KeyValueStore},
    services::RoundService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let trivia_config = config.trivia_config();
    info!(base_url = %trivia_config.base_url, amount = config.amount, "starting trivia round");

    let client = OpenTdbClient::new(trivia_config).context("building trivia client")?;
    let progress = ProgressStore::new(progress_backend(&config), config.storage_key.clone());
    let service = RoundService::new(Arc::new(client), progress, config.round_settings());

    let mut console = Console::new(service, tokio::io::stdin(), tokio::io::stdout());
    tokio::select! {
        result = console.run() => result.context("terminal session failed")?,
        _ = shutdown_signal() => info!("interrupted; exiting"),
    }

    Ok(())
}

/// Storage area for the best record.
#[cfg(feature = "file-store")]
fn progress_backend(config: &AppConfig) -> Arc<dyn KeyValueStore> {
    Arc::new(FileKeyValueStore::new(config.progress_dir.clone()))
}

/// Storage area for the best record; without the file store it lasts one session.
#[cfg(not(feature = "file-store"))]
fn progress_backend(_config: &AppConfig) -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryKeyValueStore::new())
}

/// Configure tracing subscribers; logs go to stderr so they stay out of the quiz prompts.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn,trivia_round=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
