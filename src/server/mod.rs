//! Transport layer
//!
//! Listener creation and per-connection tasks. All blocking lives here,
//! bounded by the configured read/write timeouts; the resolution core never
//! suspends.

pub mod tls;
pub mod upgrade;

use crate::config::AppState;
use crate::handler;
use crate::logger;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use std::convert::Infallible;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::TlsAcceptor;

const HTTPS_PORT: u16 = 443;
const HTTP_PORT: u16 = 80;

/// Run the server until the process is killed.
///
/// With TLS enabled this binds 443 for content and 80 for the upgrade
/// redirector; without it, a single plain listener on the configured port.
pub async fn run(state: Arc<AppState>) -> Result<(), Box<dyn Error>> {
    let timeout = connection_timeout(&state);

    if state.config.tls_enabled() {
        let cert = state.config.cert.clone().unwrap_or_default();
        let key = state.config.key.clone().unwrap_or_default();
        let tls_config = tls::load_server_config(&cert, &key)?;
        let acceptor = TlsAcceptor::from(tls_config);

        let https_listener = bind_listener(SocketAddr::from(([0, 0, 0, 0], HTTPS_PORT)))?;
        let http_listener = bind_listener(SocketAddr::from(([0, 0, 0, 0], HTTP_PORT)))?;

        let canonical_host = state.config.host.clone();
        tokio::spawn(run_upgrade_loop(http_listener, canonical_host, timeout));

        run_tls_loop(https_listener, acceptor, state, timeout).await
    } else {
        let listener = bind_listener(SocketAddr::from(([0, 0, 0, 0], state.config.port)))?;
        run_plain_loop(listener, state, timeout).await
    }
}

fn connection_timeout(state: &AppState) -> Duration {
    Duration::from_secs(state.config.read_timeout.max(state.config.write_timeout))
}

async fn run_plain_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    timeout: Duration,
) -> Result<(), Box<dyn Error>> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                handle_connection(stream, peer_addr, Arc::clone(&state), timeout);
            }
            Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
        }
    }
}

async fn run_tls_loop(
    listener: TcpListener,
    acceptor: TlsAcceptor,
    state: Arc<AppState>,
    timeout: Duration,
) -> Result<(), Box<dyn Error>> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                let acceptor = acceptor.clone();
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    // a stalled handshake counts against the same deadline
                    let accept = tokio::time::timeout(timeout, acceptor.accept(stream)).await;
                    match accept {
                        Ok(Ok(tls_stream)) => {
                            serve_stream(tls_stream, peer_addr, state, timeout).await;
                        }
                        Ok(Err(e)) => {
                            logger::log_warning(&format!("TLS handshake failed with {peer_addr}: {e}"));
                        }
                        Err(_) => {
                            logger::log_warning(&format!("TLS handshake timeout with {peer_addr}"));
                        }
                    }
                });
            }
            Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
        }
    }
}

/// Auxiliary port-80 loop: every request is answered by the host-gated
/// HTTPS redirector, no resolution logic involved.
async fn run_upgrade_loop(listener: TcpListener, canonical_host: String, timeout: Duration) {
    loop {
        match listener.accept().await {
            Ok((stream, _peer_addr)) => {
                let host = canonical_host.clone();
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);
                    let conn = http1::Builder::new().keep_alive(false).serve_connection(
                        io,
                        service_fn(move |req| {
                            let host = host.clone();
                            async move {
                                Ok::<_, Infallible>(upgrade::handle_upgrade(&req, &host))
                            }
                        }),
                    );
                    match tokio::time::timeout(timeout, conn).await {
                        Ok(Ok(())) | Err(_) => {}
                        Ok(Err(err)) => logger::log_connection_error(&err),
                    }
                });
            }
            Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
        }
    }
}

fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
    timeout: Duration,
) {
    tokio::spawn(async move {
        serve_stream(stream, peer_addr, state, timeout).await;
    });
}

/// Serve one connection with the request handler, bounded by the
/// whole-connection timeout. Keep-alive is disabled, matching the
/// single-request-per-connection serving model.
async fn serve_stream<S>(stream: S, peer_addr: SocketAddr, state: Arc<AppState>, timeout: Duration)
where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin + Send + 'static,
{
    let io = TokioIo::new(stream);
    let conn = http1::Builder::new().keep_alive(false).serve_connection(
        io,
        service_fn(move |req| handler::handle_request(req, Arc::clone(&state), peer_addr)),
    );

    match tokio::time::timeout(timeout, conn).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => logger::log_connection_error(&err),
        Err(_) => {
            logger::log_warning(&format!(
                "Connection timeout after {} seconds from {peer_addr}",
                timeout.as_secs()
            ));
        }
    }
}

/// Create a listener with `SO_REUSEADDR` so a quick restart can rebind the
/// port while the old socket is in TIME_WAIT.
fn bind_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
