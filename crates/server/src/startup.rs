//! Port selection and the console banner printed at boot.

use std::fmt::Write as _;

use tokio::net::TcpStream;

use crate::config::ServerConfig;

/// Resolve the optional `PORT` argument.
///
/// A missing argument, or one that is not a valid port number, yields
/// `default`; the latter is logged as a warning.
#[must_use]
pub fn requested_port(arg: Option<&str>, default: u16) -> u16 {
    let Some(raw) = arg else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(arg = raw, default, "invalid port argument, using default port");
        default
    })
}

/// Whether something is already accepting connections on `localhost:port`.
pub async fn port_in_use(port: u16) -> bool {
    TcpStream::connect(("localhost", port)).await.is_ok()
}

/// Pick the port to bind.
///
/// Only the configured default port is probed: when it is taken the fallback
/// port is used instead. An explicitly requested non-default port is used
/// as-is.
pub async fn choose_port(config: &ServerConfig, requested: u16) -> u16 {
    if requested == config.port && port_in_use(config.port).await {
        tracing::warn!(
            port = config.port,
            fallback = config.fallback_port,
            "default port is in use, switching to fallback port"
        );
        return config.fallback_port;
    }
    requested
}

/// Human-readable endpoint summary for the console.
#[must_use]
pub fn banner(port: u16) -> String {
    let rule = "=".repeat(50);
    let base = format!("http://localhost:{port}");
    let lines = [
        ("GET", "/", "API index"),
        ("GET", "/api/users", "List users"),
        ("POST", "/api/users", "Create user"),
        ("GET", "/api/products", "List products"),
        ("POST", "/api/products", "Create product"),
        ("POST", "/api/echo", "Echo request data"),
        ("GET", "/api/test", "Test GET request"),
        ("POST", "/api/test", "Test POST request"),
        ("PUT", "/api/test", "Test PUT request"),
        ("DELETE", "/api/test", "Test DELETE request"),
        ("GET", "/api/data", "Dump all test data"),
        ("GET", "/api/counter", "Read counter"),
        ("POST", "/api/counter", "Increment counter"),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Mock API server starting...");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "\nAvailable endpoints:");
    for (method, path, description) in lines {
        let _ = writeln!(out, "  {method:<6} {base}{path:<16} - {description}");
    }
    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(out, "Server running at: {base}");
    let _ = writeln!(out, "Press Ctrl+C to stop the server");
    let _ = writeln!(out, "{rule}");
    out
}

/// Resolve on Ctrl+C or SIGTERM.
///
/// A handler that cannot be installed is logged and never fires, so the
/// other one still works.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        () = ctrl_c => "SIGINT",
        () = terminate => "SIGTERM",
    };

    tracing::info!(signal, "stopping mock API server, in-memory data is discarded");
}
