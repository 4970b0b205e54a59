//! Request resolution core
//!
//! Pure mapping from a request path (plus raw query) and the two immutable
//! tables to a serve/redirect/not-found outcome. No I/O, nothing blocks, so
//! any number of connection tasks can call this concurrently.

use crate::http::mime;
use crate::store::{AliasTable, ContentStore};
use hyper::body::Bytes;

/// Outcome of resolving one request path.
#[derive(Debug)]
pub enum Resolution {
    /// Serve the stored bytes with the given Content-Type. The bytes are a
    /// cheap reference-counted view into the store, not a copy.
    Serve {
        body: Bytes,
        content_type: &'static str,
    },
    /// Temporary redirect (307) to the target URL.
    Redirect { target: String },
    NotFound,
}

/// Resolve `path` against the content store and alias table, in strict
/// order: exact match, alias redirect, implicit `.html` fallback, 404.
pub fn resolve(
    path: &str,
    raw_query: Option<&str>,
    content: &ContentStore,
    aliases: &AliasTable,
) -> Resolution {
    if let Some(body) = content.get(path) {
        return Resolution::Serve {
            content_type: mime::content_type_for(mime::extension_of(path), body),
            body: body.clone(),
        };
    }

    if let Some(alias) = aliases.get(path) {
        let mut target = alias.to_string();
        if let Some(query) = raw_query.filter(|q| !q.is_empty()) {
            target.push('?');
            target.push_str(query);
        }
        return Resolution::Redirect { target };
    }

    // Allow .html files to be addressed without the extension. The probe
    // always appends ".html" to the path as-is, even when the path already
    // carries an extension, and the served type is always derived from
    // "html" rather than from the original path.
    if let Some(body) = content.get(&format!("{path}.html")) {
        return Resolution::Serve {
            content_type: mime::content_type_for(Some("html"), body),
            body: body.clone(),
        };
    }

    Resolution::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ContentStore {
        ContentStore::from_entries([
            ("/index.html", Bytes::from_static(b"<html>hi</html>")),
            ("/style.css", Bytes::from_static(b"body {}")),
            ("/data.xyz", Bytes::from_static(b"\x00\x01\x02\x03")),
            ("/page.txt.html", Bytes::from_static(b"<html>txt</html>")),
        ])
    }

    fn aliases() -> AliasTable {
        AliasTable::from_entries([("/old", "/new")])
    }

    #[test]
    fn exact_match_serves_stored_bytes() {
        let outcome = resolve("/index.html", None, &store(), &aliases());
        match outcome {
            Resolution::Serve { body, content_type } => {
                assert_eq!(body.as_ref(), b"<html>hi</html>");
                assert_eq!(content_type, "text/html");
            }
            other => panic!("expected Serve, got {other:?}"),
        }
    }

    #[test]
    fn exact_match_uses_the_paths_own_extension() {
        match resolve("/style.css", None, &store(), &aliases()) {
            Resolution::Serve { content_type, .. } => assert_eq!(content_type, "text/css"),
            other => panic!("expected Serve, got {other:?}"),
        }
    }

    #[test]
    fn unknown_extension_is_sniffed() {
        match resolve("/data.xyz", None, &store(), &aliases()) {
            Resolution::Serve { content_type, .. } => {
                assert_eq!(content_type, "application/octet-stream");
            }
            other => panic!("expected Serve, got {other:?}"),
        }
    }

    #[test]
    fn alias_redirects_without_query() {
        match resolve("/old", None, &store(), &aliases()) {
            Resolution::Redirect { target } => assert_eq!(target, "/new"),
            other => panic!("expected Redirect, got {other:?}"),
        }
    }

    #[test]
    fn alias_appends_raw_query() {
        match resolve("/old", Some("x=1"), &store(), &aliases()) {
            Resolution::Redirect { target } => assert_eq!(target, "/new?x=1"),
            other => panic!("expected Redirect, got {other:?}"),
        }
    }

    #[test]
    fn empty_query_is_not_appended() {
        match resolve("/old", Some(""), &store(), &aliases()) {
            Resolution::Redirect { target } => assert_eq!(target, "/new"),
            other => panic!("expected Redirect, got {other:?}"),
        }
    }

    #[test]
    fn content_wins_over_alias() {
        let aliases = AliasTable::from_entries([("/index.html", "/elsewhere")]);
        assert!(matches!(
            resolve("/index.html", None, &store(), &aliases),
            Resolution::Serve { .. }
        ));
    }

    #[test]
    fn implicit_html_fallback() {
        match resolve("/index", None, &store(), &aliases()) {
            Resolution::Serve { body, content_type } => {
                assert_eq!(body.as_ref(), b"<html>hi</html>");
                assert_eq!(content_type, "text/html");
            }
            other => panic!("expected Serve, got {other:?}"),
        }
    }

    #[test]
    fn fallback_ignores_the_original_extension() {
        // /page.txt misses, /page.txt.html exists: it is served as html.
        match resolve("/page.txt", None, &store(), &aliases()) {
            Resolution::Serve { body, content_type } => {
                assert_eq!(body.as_ref(), b"<html>txt</html>");
                assert_eq!(content_type, "text/html");
            }
            other => panic!("expected Serve, got {other:?}"),
        }
    }

    #[test]
    fn unmatched_path_is_not_found() {
        assert!(matches!(
            resolve("/missing", None, &store(), &aliases()),
            Resolution::NotFound
        ));
    }
}
