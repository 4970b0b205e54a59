//! MIME type determination
//!
//! Maps a file extension to a Content-Type through the `mime_guess`
//! registry, falling back to content sniffing when the extension is unknown
//! or absent.

use crate::http::sniff;

/// Resolve the Content-Type for a response body.
///
/// `extension` is the effective extension chosen by the resolver (the
/// request path's own extension, or the literal `html` on the implicit
/// fallback); it is not re-derived here.
pub fn content_type_for(extension: Option<&str>, content: &[u8]) -> &'static str {
    if let Some(ext) = extension {
        if let Some(ctype) = mime_guess::from_ext(ext).first_raw() {
            return ctype;
        }
    }
    sniff::detect_content_type(content)
}

/// Extension of the final path segment, without the dot.
pub fn extension_of(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rfind('.').map(|dot| &name[dot + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_use_the_registry() {
        assert_eq!(content_type_for(Some("html"), b""), "text/html");
        assert_eq!(content_type_for(Some("css"), b""), "text/css");
        assert_eq!(content_type_for(Some("png"), b""), "image/png");
        assert_eq!(content_type_for(Some("json"), b""), "application/json");
    }

    #[test]
    fn unknown_extension_falls_back_to_sniffing() {
        assert_eq!(
            content_type_for(Some("zzz"), b"<html><body>x</body></html>"),
            "text/html; charset=utf-8"
        );
        assert_eq!(
            content_type_for(None, b"\x00\x01\x02"),
            "application/octet-stream"
        );
    }

    #[test]
    fn extension_comes_from_the_last_segment() {
        assert_eq!(extension_of("/blog/post.html"), Some("html"));
        assert_eq!(extension_of("/archive.tar.gz"), Some("gz"));
        assert_eq!(extension_of("/v1.2/readme"), None);
        assert_eq!(extension_of("/plain"), None);
        assert_eq!(extension_of("/trailing."), Some(""));
    }
}
