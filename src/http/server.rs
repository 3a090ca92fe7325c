//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum Router with a single catch-all handler
//! - Wire up middleware (timeout, tracing, request ID)
//! - Dispatch every request through the current [`Application`]
//! - Swap in a rebuilt application when the config file changes

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::dispatch::DispatchOutcome;
use crate::http::request::{
    propagate_request_id_layer, request_span, set_request_id_layer, X_REQUEST_ID,
};
use crate::lifecycle::startup::{Application, Bootstrap, StartupError};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
struct AppState {
    app: Arc<ArcSwap<Application>>,
}

/// HTTP front of a bootstrapped application.
pub struct HttpServer {
    bootstrap: Bootstrap,
    app: Arc<ArcSwap<Application>>,
}

impl HttpServer {
    /// Bootstrap the application. Any startup error is returned unchanged.
    pub fn new(bootstrap: Bootstrap) -> Result<Self, StartupError> {
        let app = bootstrap.build()?;
        Ok(Self {
            bootstrap,
            app: Arc::new(ArcSwap::from_pointee(app)),
        })
    }

    /// The application currently serving requests.
    pub fn application(&self) -> Arc<Application> {
        self.app.load_full()
    }

    /// Rebuild the application from `config` and swap it in.
    ///
    /// On error the running application is left untouched.
    pub fn reload(&self, config: AppConfig) -> Result<(), StartupError> {
        reload_application(&self.bootstrap, &self.app, config)
    }

    /// Build the axum router with all middleware layers.
    ///
    /// Server settings (timeout) come from the config the server started with.
    #[allow(deprecated)]
    pub fn router(&self) -> Router {
        let timeout = Duration::from_secs(self.bootstrap.config().server.request_timeout_secs);
        Router::new()
            .route("/", any(dispatch_handler))
            .route("/{*path}", any(dispatch_handler))
            .with_state(AppState {
                app: self.app.clone(),
            })
            .layer(TimeoutLayer::new(timeout))
            .layer(TraceLayer::new_for_http().make_span_with(request_span::<Body>))
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// Serve until `shutdown` fires, applying configs received on `config_updates`.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<AppConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let router = self.router();

        let bootstrap = self.bootstrap.clone();
        let app = self.app.clone();
        let reloader = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                // Errors are logged inside; the old application keeps serving.
                let _ = reload_application(&bootstrap, &app, config);
            }
        });

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn reload_application(
    bootstrap: &Bootstrap,
    app: &ArcSwap<Application>,
    config: AppConfig,
) -> Result<(), StartupError> {
    match bootstrap.with_config(config).build() {
        Ok(next) => {
            tracing::info!(
                modules = ?next.modules().loaded_module_names(),
                routes = next.map().table().len(),
                "Application reloaded"
            );
            app.store(Arc::new(next));
            Ok(())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Reload rejected, keeping current application");
            Err(e)
        }
    }
}

/// Catch-all handler: every request goes through the dispatcher.
async fn dispatch_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let start = Instant::now();
    let request_id = headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    let app = state.app.load();
    let outcome = app.dispatcher().dispatch(method.as_str(), uri.path());

    let route = match &outcome {
        DispatchOutcome::Matched { template, .. } => template.as_str(),
        _ => metrics::UNMATCHED_ROUTE,
    };
    metrics::record_request(method.as_str(), outcome.status(), route, start);
    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
        route = %route,
        status = outcome.status(),
        "Request dispatched"
    );

    outcome.into_response()
}
