//! Content-type sniffing
//!
//! Heuristic classification of a byte prefix into a MIME type, used when the
//! file extension gives no answer. At most the first `SNIFF_LEN` bytes are
//! inspected; the slice is always bounds-checked so short content (down to
//! zero bytes) is safe.

/// The detection looks at no more than this many bytes.
const SNIFF_LEN: usize = 512;

const OCTET_STREAM: &str = "application/octet-stream";

/// Classify `content` into a MIME type from magic bytes, falling back to a
/// text-versus-binary heuristic over the sniff window.
pub fn detect_content_type(content: &[u8]) -> &'static str {
    let head = &content[..content.len().min(SNIFF_LEN)];

    if let Some(ctype) = match_markup(head) {
        return ctype;
    }
    if let Some(ctype) = match_magic(head) {
        return ctype;
    }
    if looks_textual(head) {
        "text/plain; charset=utf-8"
    } else {
        OCTET_STREAM
    }
}

/// Markup signatures are matched after leading whitespace and must be
/// terminated by a space or `>` to avoid matching e.g. `<htmlspecial`.
fn match_markup(head: &[u8]) -> Option<&'static str> {
    const HTML_TAGS: &[&[u8]] = &[
        b"<!DOCTYPE HTML",
        b"<HTML",
        b"<HEAD",
        b"<SCRIPT",
        b"<IFRAME",
        b"<H1",
        b"<DIV",
        b"<FONT",
        b"<TABLE",
        b"<A",
        b"<STYLE",
        b"<TITLE",
        b"<B",
        b"<BODY",
        b"<BR",
        b"<P",
        b"<!--",
    ];

    let trimmed = skip_whitespace(head);
    for &tag in HTML_TAGS {
        if matches_tag(trimmed, tag) {
            return Some("text/html; charset=utf-8");
        }
    }
    if trimmed.starts_with(b"<?xml") {
        return Some("text/xml; charset=utf-8");
    }
    None
}

fn match_magic(head: &[u8]) -> Option<&'static str> {
    const EXACT: &[(&[u8], &str)] = &[
        (b"%PDF-", "application/pdf"),
        (b"%!PS-Adobe-", "application/postscript"),
        (b"\xFF\xFE", "text/plain; charset=utf-16le"),
        (b"\xFE\xFF", "text/plain; charset=utf-16be"),
        (b"\xEF\xBB\xBF", "text/plain; charset=utf-8"),
        (b"\x89PNG\r\n\x1A\n", "image/png"),
        (b"GIF87a", "image/gif"),
        (b"GIF89a", "image/gif"),
        (b"\xFF\xD8\xFF", "image/jpeg"),
        (b"BM", "image/bmp"),
        (b"OggS", "application/ogg"),
        (b"ID3", "audio/mpeg"),
        (b"PK\x03\x04", "application/zip"),
        (b"\x1F\x8B\x08", "application/x-gzip"),
        (b"\x00asm", "application/wasm"),
        (b"wOFF", "font/woff"),
        (b"wOF2", "font/woff2"),
    ];

    for &(signature, ctype) in EXACT {
        if head.starts_with(signature) {
            return Some(ctype);
        }
    }
    // RIFF containers carry the concrete type at offset 8
    if head.starts_with(b"RIFF") && head.len() >= 12 {
        return match &head[8..12] {
            b"WEBP" => Some("image/webp"),
            b"WAVE" => Some("audio/wave"),
            b"AVI " => Some("video/avi"),
            _ => Some(OCTET_STREAM),
        };
    }
    None
}

fn matches_tag(data: &[u8], tag: &[u8]) -> bool {
    if data.len() <= tag.len() {
        return false;
    }
    for (&got, &want) in data.iter().zip(tag.iter()) {
        if got.to_ascii_uppercase() != want {
            return false;
        }
    }
    // the byte after the tag decides whether this is really the tag
    matches!(data[tag.len()], b' ' | b'>')
}

fn skip_whitespace(data: &[u8]) -> &[u8] {
    let start = data
        .iter()
        .position(|b| !matches!(b, b'\t' | b'\n' | b'\x0C' | b'\r' | b' '))
        .unwrap_or(data.len());
    &data[start..]
}

/// Text as long as no byte falls in the control ranges that never appear in
/// plain text (everything below 0x20 except TAB, LF, FF, CR and ESC).
fn looks_textual(head: &[u8]) -> bool {
    !head
        .iter()
        .any(|&b| matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_html() {
        assert_eq!(
            detect_content_type(b"<!DOCTYPE html><html></html>"),
            "text/html; charset=utf-8"
        );
        assert_eq!(
            detect_content_type(b"\n\t <html><body>hi</body></html>"),
            "text/html; charset=utf-8"
        );
        // tag prefix without a terminator is not html
        assert_ne!(detect_content_type(b"<htmlish"), "text/html; charset=utf-8");
    }

    #[test]
    fn detects_common_binaries() {
        assert_eq!(
            detect_content_type(b"\x89PNG\r\n\x1A\n....."),
            "image/png"
        );
        assert_eq!(detect_content_type(b"GIF89a......"), "image/gif");
        assert_eq!(detect_content_type(b"%PDF-1.7 ..."), "application/pdf");
        assert_eq!(
            detect_content_type(b"RIFF\x00\x00\x00\x00WEBPVP8 "),
            "image/webp"
        );
    }

    #[test]
    fn plain_text_and_binary_fallback() {
        assert_eq!(
            detect_content_type(b"just some words\n"),
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            detect_content_type(b"\x00\x01\x02\x03"),
            "application/octet-stream"
        );
    }

    #[test]
    fn short_content_never_reads_out_of_bounds() {
        // 0, 1 and 511 bytes: all below the sniff window
        assert_eq!(detect_content_type(b""), "text/plain; charset=utf-8");
        assert_eq!(detect_content_type(b"a"), "text/plain; charset=utf-8");

        let almost_full = vec![b'x'; SNIFF_LEN - 1];
        assert_eq!(
            detect_content_type(&almost_full),
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn binary_byte_past_the_window_is_ignored() {
        let mut content = vec![b'x'; SNIFF_LEN];
        content.push(0x00);
        assert_eq!(detect_content_type(&content), "text/plain; charset=utf-8");
    }
}
