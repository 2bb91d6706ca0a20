//! # Attendance Console API
//!
//! The console service sits between the attendance display layer and the attendance
//! backend. It proxies backend calls, keeps the signed-in session and local
//! notifications in the [`LocalStore`], and runs every slot status through the
//! [`StatusResolver`] so the display layer never decides absence on its own.
//!
//! ## Architecture
//!
//! - **Routes**: API endpoints and URL structure
//! - **Handlers**: Request processing
//! - **Middleware**: Error mapping and session guards
//! - **Config**: Environment configuration

/// Configuration module for console settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling and session guards
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use eyre::Result;
use tokio::{
    net::TcpListener,
    sync::{watch, Mutex},
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use attendance_client::AttendanceBackend;
use attendance_core::{
    clock::Clock, models::notification::Notification, resolver::StatusResolver,
};
use attendance_store::LocalStore;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Attendance backend the console proxies
    pub backend: Arc<dyn AttendanceBackend>,
    /// Resolver holding the shared deadline table
    pub resolver: StatusResolver,
    /// Source of the local date and time
    pub clock: Arc<dyn Clock>,
    /// Session, local notifications and popup dismissal
    pub store: Mutex<LocalStore>,
    /// Course used when a request does not name one
    pub course_id: i64,
    /// Latest unread backend notifications, as published by the poller
    pub unread: watch::Receiver<Vec<Notification>>,
}

impl ApiState {
    /// Builds the state, restoring the backend token from a persisted session.
    pub fn new(
        backend: Arc<dyn AttendanceBackend>,
        resolver: StatusResolver,
        clock: Arc<dyn Clock>,
        store: LocalStore,
        course_id: i64,
    ) -> Self {
        if let Some(token) = store.access_token() {
            backend.set_access_token(Some(token.to_string()));
        }

        Self {
            backend,
            resolver,
            clock,
            store: Mutex::new(store),
            course_id,
            unread: watch::channel(Vec::new()).1,
        }
    }

    /// Serves unread notifications from `feed` instead of an always-empty list.
    pub fn with_unread_feed(mut self, feed: watch::Receiver<Vec<Notification>>) -> Self {
        self.unread = feed;
        self
    }
}

/// Builds the application router with all routes attached to `state`
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Sign-in and session endpoints
        .merge(routes::auth::routes())
        // Student check-in and personal attendance
        .merge(routes::attendance::routes())
        // Admin board, configurations, leave review and members
        .merge(routes::admin::routes())
        // Student leave requests
        .merge(routes::leave::routes())
        // Notices and popup dismissal
        .merge(routes::notices::routes())
        // Local notifications
        .merge(routes::notifications::routes())
        .with_state(state)
}

/// Starts the console with the provided configuration and state
///
/// Initializes logging, applies CORS, tracing and timeout layers, and serves until
/// the listener fails.
pub async fn start_server(config: config::ApiConfig, state: Arc<ApiState>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Console listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true)
}
