//! Request handler module
//!
//! Turns a resolution outcome into a hyper response and emits the access
//! log line for the request.

mod resolver;

pub use resolver::{resolve, Resolution};

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling.
///
/// Every verb is treated identically; the request body is never read, which
/// keeps this generic over the body type.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let start = Instant::now();
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);

    let response = match resolve(&path, query.as_deref(), &state.content, &state.aliases) {
        Resolution::Serve { body, content_type } => {
            http::build_content_response(body, content_type)
        }
        Resolution::Redirect { target } => {
            logger::log_redirect(&target);
            http::build_redirect_response(&target)
        }
        Resolution::NotFound => http::build_not_found_response(),
    };

    if state.config.access_log {
        let entry = AccessLogEntry {
            remote_addr: peer_addr.to_string(),
            method,
            path,
            query,
            status: response.status().as_u16(),
            body_bytes: body_len(&response),
            request_time_us: elapsed_us(start),
            ..AccessLogEntry::default()
        };
        logger::log_access(&entry, &state.config.access_log_format);
    }

    Ok(response)
}

fn body_len(response: &Response<Full<Bytes>>) -> usize {
    use hyper::body::Body;
    usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(0)
}

fn elapsed_us(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX)
}
