//! Serve command - seeds the catalog and runs one profile's server

use std::net::SocketAddr;

use clap::Args;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::api::create_router;
use crate::config::{AppConfig, ServiceProfile};
use crate::domain::Dataset;
use crate::infrastructure::logging;

/// Overrides applied on top of the loaded configuration
#[derive(Args, Clone, Debug, Default)]
pub struct ServeArgs {
    /// Port to listen on (defaults to the profile's port)
    #[arg(long)]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Storage backend: memory or sqlite
    #[arg(long)]
    pub storage: Option<String>,

    /// SQLite database URL
    #[arg(long)]
    pub sqlite_url: Option<String>,

    /// Dataset to seed: catalog or sample
    #[arg(long)]
    pub dataset: Option<Dataset>,
}

impl ServeArgs {
    pub fn apply(self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.server.port = Some(port);
        }

        if let Some(host) = self.host {
            config.server.host = host;
        }

        if let Some(storage) = self.storage {
            config.storage.backend = Some(storage);
        }

        if let Some(url) = self.sqlite_url {
            config.storage.sqlite_url = url;
        }

        if let Some(dataset) = self.dataset {
            config.seed.dataset = Some(dataset);
        }
    }
}

/// Run the server for one profile
///
/// The catalog is opened and seeded before the listener is bound; any
/// failure there ends the process without serving.
pub async fn run(profile: ServiceProfile, args: ServeArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load()?;
    args.apply(&mut config);
    logging::init_logging(&config.logging)?;

    let state = crate::create_app_state_with_config(&config, profile).await?;
    let app = create_router(state, profile);

    let addr = build_socket_addr(&config, profile)?;
    info!(profile = %profile, "Starting server on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

fn build_socket_addr(config: &AppConfig, profile: ServiceProfile) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.port_for(profile),
    )))
}
