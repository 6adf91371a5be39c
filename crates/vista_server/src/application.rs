//! Process wiring and lifecycle.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info, instrument};
use vista_error::{ConfigError, ServerError, ServerErrorKind, VistaResult};
use vista_models::Provider;
use vista_rate_limit::RateLimiter;
use vista_service::AnalysisService;

use crate::{ImageAnalysisServer, RouterOptions, VistaConfig, router};

/// A fully wired Vista server.
///
/// Built once from configuration: provider, then service, rate limiter,
/// adapter and router. [`Application::close`] shuts the provider down and may
/// be called more than once.
pub struct Application {
    config: VistaConfig,
    server: Option<Arc<ImageAnalysisServer>>,
    router: Router,
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("address", &self.config.server.address())
            .field("provider", &self.config.provider.kind)
            .field("open", &self.server.is_some())
            .finish()
    }
}

impl Application {
    /// Build every component from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the provider cannot
    /// be constructed.
    #[instrument(skip_all, fields(provider = %config.provider.kind))]
    pub fn new(config: VistaConfig) -> VistaResult<Self> {
        config.validate()?;

        let provider = Provider::from_config(&config.provider)?;
        let service = AnalysisService::new(provider);
        let limiter = RateLimiter::new(&config.rate_limit)
            .map_err(|e| ConfigError::new(format!("rate_limit: {}", e)))?;
        let server = Arc::new(ImageAnalysisServer::new(
            Arc::new(service),
            Arc::new(limiter),
        ));

        let router = router(
            server.clone(),
            RouterOptions {
                default_timeout: config.server.request_timeout(),
                max_request_bytes: config.server.max_request_bytes,
            },
        );

        info!(
            requests_per_second = config.rate_limit.requests_per_second,
            burst = config.rate_limit.burst,
            "Application initialized"
        );

        Ok(Self {
            config,
            server: Some(server),
            router,
        })
    }

    /// The configuration the application was built from.
    pub fn config(&self) -> &VistaConfig {
        &self.config
    }

    /// A clone of the HTTP router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The configured listen address.
    pub fn address(&self) -> String {
        self.config.server.address()
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or serving fails.
    pub async fn serve<F>(&self, shutdown: F) -> VistaResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let address = self.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            ServerError::new(ServerErrorKind::Bind {
                address: address.clone(),
                message: e.to_string(),
            })
        })?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve_on<F>(&self, listener: TcpListener, shutdown: F) -> VistaResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener
            .local_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| self.address());
        info!(address = %local, "Vista server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;

        info!("Vista server stopped");
        Ok(())
    }

    /// Shut down the analysis provider.
    ///
    /// Only the first call reaches the provider. Later calls log an error and
    /// return `Ok`.
    pub async fn close(&mut self) -> VistaResult<()> {
        match self.server.take() {
            Some(server) => {
                info!("Closing analysis service");
                server.close().await
            }
            None => {
                error!("Analysis service already closed or never started");
                Ok(())
            }
        }
    }
}
