//! QR code generator web service.

use anyhow::Result;
use clap::Parser;
use std::{net::SocketAddr, sync::Arc};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use qr_web::{build_router, config::Args, state::AppState};

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(args))?;
    Ok(())
}

async fn async_main(args: Args) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.level())
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()?;

    let config = args.service_config();
    info!(
        module_size = config.render.module_size,
        border = config.render.border,
        error_correction = %config.render.error_correction,
        logo_ratio = config.render.logo_ratio,
        max_upload_bytes = config.max_upload_bytes,
        max_downloads = config.max_downloads,
        worker_threads = ?args.worker_threads,
        "Starting QR web service"
    );

    let state = Arc::new(AppState::new(&config)?);
    info!(path = %state.downloads.dir().display(), "Download directory ready");

    let app = build_router(state.clone(), prometheus_handle);

    let addr: SocketAddr = args.listen.parse()?;
    info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Received shutdown signal");
        })
        .await?;

    // Dropping the last reference removes the download directory
    drop(state);
    Ok(())
}
