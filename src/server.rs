//! Listener setup.
//!
//! Serves plain HTTP, or HTTPS through rustls when a certificate and key are
//! configured. TLS material is loaded before anything binds, so a bad PEM
//! fails startup instead of the first handshake. Connections get a header
//! read deadline; handler and body time is bounded by the router's
//! `TimeoutLayer`.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum_server::{Handle, tls_rustls::RustlsConfig};
use hyper_util::rt::{TokioExecutor, TokioTimer};
use hyper_util::server::conn::auto::Builder;
use snippetbox_config::Config;

/// Deadline for a client to finish sending request headers.
pub const HEADER_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Time in-flight requests get to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Reads and validates the configured certificate and key, if any.
pub async fn load_tls(config: &Config) -> anyhow::Result<Option<RustlsConfig>> {
    let Some((cert, key)) = config.tls_paths() else {
        return Ok(None);
    };

    // Another crate may have installed a provider already; either is fine.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let tls = RustlsConfig::from_pem_file(cert, key)
        .await
        .with_context(|| {
            format!(
                "failed to load TLS certificate {} and key {}",
                cert.display(),
                key.display()
            )
        })?;

    Ok(Some(tls))
}

pub async fn serve(app: Router, addr: SocketAddr, tls: Option<RustlsConfig>) -> anyhow::Result<()> {
    let handle = Handle::new();
    tokio::spawn(shutdown_on_signal(handle.clone()));

    let service = app.into_make_service_with_connect_info::<SocketAddr>();

    match tls {
        Some(tls) => {
            tracing::info!(%addr, "starting HTTPS server");
            let mut server = axum_server::bind_rustls(addr, tls).handle(handle);
            configure_connections(server.http_builder());
            server.serve(service).await?;
        }
        None => {
            tracing::info!(%addr, "starting HTTP server");
            let mut server = axum_server::bind(addr).handle(handle);
            configure_connections(server.http_builder());
            server.serve(service).await?;
        }
    }

    tracing::info!("server shut down");
    Ok(())
}

fn configure_connections(builder: &mut Builder<TokioExecutor>) {
    builder
        .http1()
        .timer(TokioTimer::new())
        .header_read_timeout(HEADER_READ_TIMEOUT);
}

async fn shutdown_on_signal(handle: Handle) {
    shutdown_signal().await;
    tracing::info!("shutdown signal received, draining connections");
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use clap::Parser;

    use super::*;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("snippetbox-{}-{name}", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn tls_config(cert: &Path, key: &Path) -> Config {
        let cert = cert.display().to_string();
        let key = key.display().to_string();
        Config::try_parse_from(["snippetbox", "--tls-cert-path", &cert, "--tls-key-path", &key])
            .unwrap()
    }

    #[tokio::test]
    async fn test_plain_http_without_tls_flags() {
        let config = Config::try_parse_from(["snippetbox"]).unwrap();
        assert!(load_tls(&config).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_tls_files_fail_startup() {
        let missing = std::env::temp_dir().join("snippetbox-no-such-cert.pem");
        let result = load_tls(&tls_config(&missing, &missing)).await;

        let err = result.err().expect("missing files must be rejected");
        assert!(err.to_string().contains("failed to load TLS certificate"));
    }

    #[tokio::test]
    async fn test_malformed_pem_fails_startup() {
        let cert = write_temp("cert.pem", "not a certificate");
        let key = write_temp("key.pem", "not a key");

        let result = load_tls(&tls_config(&cert, &key)).await;

        std::fs::remove_file(&cert).ok();
        std::fs::remove_file(&key).ok();
        assert!(result.is_err());
    }
}
