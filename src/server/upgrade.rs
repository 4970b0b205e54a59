//! HTTP-to-HTTPS upgrade redirector
//!
//! Served on the auxiliary plain-HTTP listener when TLS is enabled. Only
//! requests for the canonical host are redirected; everything else gets a
//! 404 so the listener cannot be used as an open redirector.

use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::HOST;
use hyper::{Request, Response};

pub fn handle_upgrade<B>(req: &Request<B>, canonical_host: &str) -> Response<Full<Bytes>> {
    let host = req.headers().get(HOST).and_then(|v| v.to_str().ok());
    if host != Some(canonical_host) {
        return http::build_not_found_response();
    }

    let mut target = format!("https://{canonical_host}{}", req.uri().path());
    if let Some(query) = req.uri().query().filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(query);
    }
    logger::log_redirect(&target);
    http::build_redirect_response(&target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Empty;

    fn request(host: Option<&str>, uri: &str) -> Request<Empty<Bytes>> {
        let mut builder = Request::builder().uri(uri);
        if let Some(host) = host {
            builder = builder.header(HOST, host);
        }
        builder.body(Empty::new()).unwrap()
    }

    #[test]
    fn matching_host_is_redirected_to_https() {
        let resp = handle_upgrade(&request(Some("example.com"), "/page"), "example.com");
        assert_eq!(resp.status(), 307);
        assert_eq!(resp.headers()["Location"], "https://example.com/page");
    }

    #[test]
    fn query_string_is_preserved() {
        let resp = handle_upgrade(&request(Some("example.com"), "/page?a=1&b=2"), "example.com");
        assert_eq!(resp.status(), 307);
        assert_eq!(
            resp.headers()["Location"],
            "https://example.com/page?a=1&b=2"
        );
    }

    #[test]
    fn foreign_host_is_not_found() {
        let resp = handle_upgrade(&request(Some("evil.example"), "/page"), "example.com");
        assert_eq!(resp.status(), 404);
    }

    #[test]
    fn missing_host_header_is_not_found() {
        let resp = handle_upgrade(&request(None, "/page"), "example.com");
        assert_eq!(resp.status(), 404);
    }
}
