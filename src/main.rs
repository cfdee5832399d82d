use std::net::SocketAddr;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use circulation_desk::domain::Snapshot;
use circulation_desk::infrastructure::AppState;
use circulation_desk::{config, seed, server};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "circulation_desk=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let mut config = config::Config::from_env();

    // --seed on the command line behaves like SEED_DEMO=1
    if std::env::args().any(|arg| arg == "--seed") {
        config.seed_demo = true;
    }

    let snapshot = if config.seed_demo {
        tracing::info!("Seeding demo data...");
        seed::sample_snapshot()
    } else {
        Snapshot::default()
    };
    tracing::info!(
        "Loaded {} books, {} members, {} transactions",
        snapshot.books.len(),
        snapshot.members.len(),
        snapshot.transactions.len()
    );

    let Some(port) = server::find_available_port(config.port) else {
        tracing::error!("Failed to find available port near {}", config.port);
        return ExitCode::FAILURE;
    };
    if port != config.port {
        tracing::warn!(
            "Preferred port {} was not available, using port {} instead",
            config.port,
            port
        );
    }

    let app = server::build_router(AppState::new(snapshot, config));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Circulation desk listening on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
