//! # Catalog Server
//!
//! HTTP host for the catalog services: configuration is resolved once, bound into
//! typed options and handed to an `Axum` router whose failures are rendered as
//! `application/problem+json`.
//!
//! ## Example
//! ```no_run
//! use catalog_kernel::config::ConfigResolver;
//! use catalog_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigResolver::builder().config_dir("config").resolve();
//!
//!     Server::builder().config(config).port(4583).build()?.run().await
//! }
//! ```

mod docs;
mod router;
mod state;
mod versioning;

pub use state::{AppState, AppStateInner};

use anyhow::{Context, Result};
use axum::Router;
use axum_server::Handle;
use catalog_domain::constants::{APP_OPTIONS, CORS_OPTIONS, SWAGGER_OPTIONS, VERSIONING_OPTIONS};
use catalog_domain::options::{AppOptions, CorsOptions, SwaggerOptions, VersioningOptions};
use catalog_kernel::config::{ConfigResolver, Configuration, LayerStatus};
use catalog_kernel::{problem, validation};
use versioning::VersionGuard;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(30);

/// A fluent builder for configuring and initializing the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    config: Option<Configuration>,
    port: Option<u16>,
}

impl ServerBuilder {
    /// Uses an already resolved configuration instead of resolving `./config`.
    pub fn config(mut self, config: Configuration) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides `appOptions.port`.
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Binds the option sections and validates them.
    ///
    /// # Errors
    /// Returns an error if an option section does not fit its type, the port is zero
    /// or the versioning header is not a valid header name.
    pub fn build(self) -> Result<Server> {
        let config = self.config.unwrap_or_else(|| ConfigResolver::builder().resolve());

        for layer in config.layers() {
            if let LayerStatus::Failed { reason } = &layer.status {
                warn!(source = %layer.source, ?layer.path, %reason, "Configuration layer ignored");
            }
        }

        let mut app: AppOptions =
            config.bind_options(APP_OPTIONS).context("Invalid appOptions section")?;
        if let Some(port) = self.port {
            app.port = port;
        }
        validation::not_negative_or_zero(Some(app.port), "port")?;

        let cors: CorsOptions =
            config.bind_options(CORS_OPTIONS).context("Invalid corsOptions section")?;
        let versioning: VersioningOptions =
            config.bind_options(VERSIONING_OPTIONS).context("Invalid versioningOptions section")?;
        let version_guard =
            VersionGuard::from_options(&versioning).context("Invalid versioningOptions section")?;
        let swagger: Option<SwaggerOptions> = config
            .bind_with_conversion(SWAGGER_OPTIONS)
            .context("Invalid swaggerOptions section")?;

        problem::set_stack_capture(config.environment().is_development());

        info!(
            environment = %config.environment(),
            service = %app.service_name,
            port = app.port,
            degraded = config.is_degraded(),
            "Initializing server"
        );

        Ok(Server {
            state: AppState::new(config, app, cors, versioning, swagger),
            version_guard,
        })
    }
}

/// A fully initialized server instance ready to run.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: AppState,
    version_guard: Option<VersionGuard>,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// The fully layered router, without binding a socket.
    pub fn router(&self) -> Router {
        router::init(self.state.clone(), self.version_guard.clone())
    }

    /// Serves until Ctrl+C or SIGTERM, then drains connections for up to 30 seconds.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the configured port.
    pub async fn run(self) -> Result<()> {
        let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.state.app.port));
        let app = self.router();

        let handle = Handle::<SocketAddr>::new();
        let shutdown_handle = handle.clone();

        tokio::spawn(async move {
            if let Err(e) = shutdown_signal().await {
                error!("Error while waiting for shutdown signal: {e}");
                return;
            }
            info!("Shutdown signal received, starting graceful shutdown...");
            shutdown_handle.graceful_shutdown(Some(SHUTDOWN_GRACE_PERIOD));
        });

        info!("Starting HTTP server on http://{address}{}", self.state.api_base());

        axum_server::bind(address)
            .handle(handle)
            .serve(app.into_make_service())
            .await
            .context("HTTP server failed")?;

        info!("Server shutdown complete");
        Ok(())
    }
}

/// Completes on SIGINT (Ctrl+C) or SIGTERM.
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => res?,
        res = terminate => res?,
    }

    Ok(())
}
