mod config;
mod error;
mod handlers;
mod imaging;
mod middleware;
mod response;
mod router;
mod state;
#[cfg(test)]
mod test_helpers;
mod utils;

use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--help") {
        println!("photo-server");
        println!("Serves a photo directory tree as JSON listings, raw files and thumbnails.");
        println!();
        println!("USAGE:");
        println!("    photo-server [OPTIONS]");
        println!();
        println!("OPTIONS:");
        println!("    --addr=<ADDRESS>                 Sets the server listening address. [env: ADDR] [default: 0.0.0.0:8000]");
        println!("    --storage-path=<PATH>            Sets the photo storage root. [env: STORAGE_PATH] [default: /media/sf_Photos]");
        println!("    --cache-dir=<PATH>               Sets the thumbnail cache directory (unused). [env: CACHE_DIR] [default: <storage-path>/tmp]");
        println!("    --static-dir=<PATH>              Sets the web front-end directory. [env: STATIC_DIR] [default: static]");
        println!("    --orientation-mode=<MODE>        legacy (codes 2, 6, 8) or full (all eight). [env: ORIENTATION_MODE] [default: legacy]");
        println!("    --max-thumbnail-height=<PIXELS>  Clamps requested thumbnail heights. [env: MAX_THUMBNAIL_HEIGHT] [default: 4096, 0 = unlimited]");
        println!();
        println!("    --help                           Prints this help information.");
        println!();

        process::exit(0);
    }

    init_tracing();

    let config = config::Config::load();
    tracing::info!(
        storage_path = %config.storage_path.display(),
        cache_dir = %config.cache_dir.display(),
        static_dir = %config.static_dir.display(),
        orientation_mode = %config.orientation_mode,
        "loaded config"
    );

    let addr = config.addr.clone();
    let state = state::AppState::new(config);
    let app = router::create_router(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind to {}: {}", addr, err);
            process::exit(1);
        }
    };
    tracing::info!("Server running on {}", addr);

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("server error: {}", err);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = wait_for_ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(err) => {
                tracing::warn!("failed to install SIGTERM handler: {}", err);
                wait_for_ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        wait_for_ctrl_c().await;
    }

    tracing::info!("Shutdown signal received, stopping server...");
}

async fn wait_for_ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to install Ctrl+C handler: {}", err);
        std::future::pending::<()>().await;
    }
}
