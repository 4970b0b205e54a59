//! HTTP response building module
//!
//! Builders for the three outcomes a request can have: content, temporary
//! redirect, or not-found.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build a 200 response carrying the stored bytes.
///
/// Content-Type is the only header set explicitly; the body goes out whole,
/// with no chunking or range handling.
pub fn build_content_response(body: Bytes, content_type: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 307 Temporary Redirect. The method/body-preserving status matters
/// because aliases are not permanent.
pub fn build_redirect_response(target: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(307)
        .header("Location", target)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Temporary Redirect")))
        .unwrap_or_else(|e| {
            log_build_error("307", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 404 Not Found response with a plain-text body.
pub fn build_not_found_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("Not Found")))
        })
}

fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_response_carries_single_content_type() {
        let resp = build_content_response(Bytes::from_static(b"hi"), "text/plain");
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().len(), 1);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
    }

    #[test]
    fn redirect_response_sets_location() {
        let resp = build_redirect_response("/new?x=1");
        assert_eq!(resp.status(), 307);
        assert_eq!(resp.headers()["Location"], "/new?x=1");
    }

    #[test]
    fn not_found_has_plain_text_body() {
        let resp = build_not_found_response();
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
    }
}
