use clap::Parser;
use dotenvy::dotenv;
use semester_sorter::config::{SortVariant, SorterConfig};
use semester_sorter::infrastructure::{logging, storage};
use semester_sorter::{AppState, create_app};
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port for the HTTP server
    #[arg(short, long, default_value_t = 5000)]
    port: u16,

    /// Sorting scheme (semester, simple); overrides SORT_VARIANT
    #[arg(short, long)]
    variant: Option<SortVariant>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment, configuration & logging
    dotenv().ok();
    let args = Args::parse();

    let mut config = SorterConfig::from_env();
    if let Some(variant) = args.variant {
        config.variant = variant;
    }

    logging::init_tracing(&config.log_file)?;

    info!("🚀 Starting Semester Sorter [Variant: {:?}]...", config.variant);
    info!(
        "🗂️  Collision policy: {:?}, Max upload: {}MB, Log file: {}",
        config.collision_policy,
        config.max_upload_size / 1024 / 1024,
        config.log_file.display()
    );

    // 2. Clean working folders
    let sorter = storage::setup_storage(&config)?;

    let state = AppState {
        sorter,
        config: config.clone(),
    };

    // 3. HTTP request tracing
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &axum::http::Request<_>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown");
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id,
            )
        })
        .on_request(|request: &axum::http::Request<_>, _span: &tracing::Span| {
            info!("📥 {} {}", request.method(), request.uri());
        })
        .on_response(
            |response: &axum::http::Response<_>,
             latency: std::time::Duration,
             _span: &tracing::Span| {
                info!(
                    "📤 Finished in {:?} with status {}",
                    latency,
                    response.status()
                );
            },
        );

    let app = create_app(state).layer(trace_layer);
    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("✅ Server ready at http://{}", addr);
    info!("📖 Swagger UI: http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("🛑 Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("⌨️  Ctrl+C received, shutting down..."),
        Err(e) => {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
