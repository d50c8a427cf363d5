//! Mock API Server - JSON fixture for exercising HTTP clients.
//!
//! # Usage
//!
//! ```bash
//! # Listen on the default port (5000, or 5001 if 5000 is taken)
//! mock-api-server
//!
//! # Listen on a specific port
//! mock-api-server 8080
//! ```
//!
//! # Architecture
//!
//! - Axum web framework, JSON responses only
//! - One in-memory store (users, products, counter) behind a lock
//! - Seed data loaded at start, discarded at exit
//!
//! # Security
//!
//! None, on purpose: no auth, permissive CORS, internal error text is
//! returned to the client. Never expose this outside a test environment.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::Parser;
use mock_api_server::config::ServerConfig;
use mock_api_server::startup;
use mock_api_server::state::AppState;
use sentry::integrations::tracing as sentry_tracing;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mock-api-server")]
#[command(author, version, about = "Mock JSON API server for client testing")]
struct Cli {
    /// Port to listen on; falls back to the configured default if not a number
    port: Option<String>,
}

/// Start Sentry when a DSN is configured; the guard must outlive the server.
fn init_sentry(config: &ServerConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_deref()?;
    let options = sentry::ClientOptions {
        release: sentry::release_name!(),
        environment: config.sentry_environment.clone().map(Into::into),
        sample_rate: config.sentry_sample_rate,
        traces_sample_rate: config.sentry_traces_sample_rate,
        attach_stacktrace: true,
        ..Default::default()
    };
    Some(sentry::init((dsn, options)))
}

/// Install the subscriber: text or JSON lines, plus the Sentry bridge.
///
/// Only errors become Sentry events. Port and argument warnings are routine
/// for a local fixture, so they ride along as breadcrumbs.
fn init_tracing(log_json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mock_api_server=info,tower_http=debug".into());

    let (json_layer, text_layer) = if log_json {
        (
            Some(tracing_subscriber::fmt::layer().json().flatten_event(true)),
            None,
        )
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };

    let sentry_layer = sentry_tracing::layer().event_filter(|metadata| match *metadata.level() {
        Level::ERROR => sentry_tracing::EventFilter::Event,
        Level::WARN | Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_layer)
        .init();
}

/// Print the endpoint summary to the console.
#[allow(clippy::print_stdout)]
fn print_banner(port: u16) {
    println!("{}", startup::banner(port));
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // MOCK_API_* and SENTRY_* settings, with .env loaded first
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Sentry first, so the tracing bridge has a client to report to
    let sentry_guard = init_sentry(&config);
    init_tracing(config.log_json);
    if sentry_guard.is_some() {
        tracing::info!(
            environment = config.sentry_environment.as_deref().unwrap_or("default"),
            "Sentry enabled"
        );
    }

    let requested = startup::requested_port(cli.port.as_deref(), config.port);
    let port = startup::choose_port(&config, requested).await;

    let app = mock_api_server::app(AppState::seeded())
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr(port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    print_banner(port);
    tracing::info!("mock API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(startup::shutdown_signal())
        .await
        .expect("Server error");
}
