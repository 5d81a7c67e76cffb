//! Character encoding detection and decoding for uploaded HTML
//!
//! Imported articles arrive as raw bytes read straight from disk, so there
//! is no transport header to consult. Encoding detection therefore has two
//! levels:
//!
//! 1. **HTML Meta Tags**: scan for `<meta charset>` or
//!    `<meta http-equiv="Content-Type">` declarations
//! 2. **Default to UTF-8**: if no declaration is found, assume UTF-8
//!
//! Decoding is total: malformed sequences become U+FFFD replacement
//! characters instead of errors, so a wrongly declared or corrupted upload
//! still produces a previewable document.
//!
//! # Examples
//!
//! ```rust
//! use cms_richtext_converter::charset::{decode_html, detect_charset};
//!
//! let html = b"<html><head><meta charset=\"ISO-8859-1\"></head></html>";
//! assert_eq!(detect_charset(html), "ISO-8859-1");
//!
//! let latin1 = b"<meta charset=\"iso-8859-1\"><p>caf\xe9</p>";
//! assert!(decode_html(latin1).contains("caf\u{e9}"));
//! ```

use regex::Regex;
use std::sync::OnceLock;

/// Default charset when detection fails
const DEFAULT_CHARSET: &str = "UTF-8";

/// Maximum bytes to scan for meta charset tags (first 1024 bytes)
const META_SCAN_LIMIT: usize = 1024;

/// Detect the character encoding declared by an HTML document
///
/// Scans the document head for a meta charset declaration and falls back to
/// UTF-8. The returned name is normalized to uppercase; it is a label, not
/// a guarantee that the body actually conforms to it.
///
/// # Examples
///
/// ```rust
/// use cms_richtext_converter::charset::detect_charset;
///
/// let html = b"<html><head><meta charset=\"utf-8\"></head></html>";
/// assert_eq!(detect_charset(html), "UTF-8");
///
/// assert_eq!(detect_charset(b"<html><body>No charset</body></html>"), "UTF-8");
/// ```
pub fn detect_charset(html: &[u8]) -> String {
    match extract_meta_charset(html) {
        Some(charset) => charset.to_uppercase(),
        None => DEFAULT_CHARSET.to_string(),
    }
}

/// Extract a charset name from HTML meta tags
///
/// Supports both declaration styles:
///
/// - HTML5: `<meta charset="UTF-8">`
/// - HTML4: `<meta http-equiv="Content-Type" content="text/html; charset=UTF-8">`
///
/// Only the first [`META_SCAN_LIMIT`] bytes are scanned; charset
/// declarations belong at the top of `<head>` and scanning further would
/// just read the whole body on every import.
pub fn extract_meta_charset(html: &[u8]) -> Option<String> {
    let scan_limit = std::cmp::min(html.len(), META_SCAN_LIMIT);
    let html_str = String::from_utf8_lossy(&html[..scan_limit]);

    static HTML5_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let html5_regex =
        HTML5_REGEX.get_or_init(|| Regex::new(r#"(?i)<meta\s+charset\s*=\s*"?([^";>\s]+)"?"#).ok());
    let html5_regex = html5_regex.as_ref()?;

    if let Some(caps) = html5_regex.captures(&html_str)
        && let Some(m) = caps.get(1)
    {
        return Some(m.as_str().to_string());
    }

    static HTML4_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let html4_regex = HTML4_REGEX.get_or_init(|| {
        Regex::new(
            r#"(?i)<meta\s+http-equiv\s*=\s*"?Content-Type"?\s+content\s*=\s*"?[^">]*charset\s*=\s*([^";>\s]+)"?"#,
        )
        .ok()
    });
    let html4_regex = html4_regex.as_ref()?;

    if let Some(caps) = html4_regex.captures(&html_str)
        && let Some(m) = caps.get(1)
    {
        return Some(m.as_str().to_string());
    }

    None
}

/// Decode uploaded HTML bytes to a UTF-8 string
///
/// Resolves the detected charset label through the WHATWG encoding registry
/// (so aliases like `latin1` work), then decodes with BOM sniffing. A byte
/// order mark, when present, wins over the meta declaration. Unknown labels
/// fall back to UTF-8.
///
/// This function never fails: undecodable byte sequences are replaced with
/// U+FFFD.
///
/// # Examples
///
/// ```rust
/// use cms_richtext_converter::charset::decode_html;
///
/// assert_eq!(decode_html(b"<p>plain ascii</p>"), "<p>plain ascii</p>");
///
/// let latin1 = b"<meta charset=\"windows-1252\"><p>r\xe9sum\xe9</p>";
/// assert!(decode_html(latin1).contains("r\u{e9}sum\u{e9}"));
/// ```
pub fn decode_html(html: &[u8]) -> String {
    let label = detect_charset(html);
    let encoding =
        encoding_rs::Encoding::for_label(label.as_bytes()).unwrap_or(encoding_rs::UTF_8);
    let (text, _, _) = encoding.decode(html);
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ============================================================================
    // Unit Tests for Meta Charset Extraction
    // ============================================================================

    #[test]
    fn test_extract_meta_charset_html5_format() {
        let html = b"<html><head><meta charset=\"UTF-8\"></head></html>";
        assert_eq!(extract_meta_charset(html), Some("UTF-8".to_string()));
    }

    #[test]
    fn test_extract_meta_charset_html5_no_quotes() {
        let html = b"<html><head><meta charset=UTF-8></head></html>";
        assert_eq!(extract_meta_charset(html), Some("UTF-8".to_string()));
    }

    #[test]
    fn test_extract_meta_charset_html4_format() {
        let html = b"<meta http-equiv=\"Content-Type\" content=\"text/html; charset=ISO-8859-1\">";
        assert_eq!(extract_meta_charset(html), Some("ISO-8859-1".to_string()));
    }

    #[test]
    fn test_extract_meta_charset_case_insensitive() {
        let html = b"<html><head><META CHARSET=\"UTF-8\"></head></html>";
        assert_eq!(extract_meta_charset(html), Some("UTF-8".to_string()));
    }

    #[test]
    fn test_extract_meta_charset_with_whitespace() {
        let html = b"<html><head><meta   charset  =  \"UTF-8\"  ></head></html>";
        assert_eq!(extract_meta_charset(html), Some("UTF-8".to_string()));
    }

    #[test]
    fn test_extract_meta_charset_absent() {
        let html = b"<html><head><title>Test</title></head></html>";
        assert_eq!(extract_meta_charset(html), None);
    }

    #[test]
    fn test_extract_meta_charset_beyond_scan_limit() {
        let mut html = vec![b' '; META_SCAN_LIMIT + 100];
        html.extend_from_slice(b"<meta charset=\"UTF-8\">");
        assert_eq!(extract_meta_charset(&html), None);
    }

    // ============================================================================
    // Unit Tests for Charset Detection
    // ============================================================================

    #[test]
    fn test_detect_charset_defaults_to_utf8() {
        assert_eq!(detect_charset(b""), "UTF-8");
        assert_eq!(detect_charset(b"<html><body>x</body></html>"), "UTF-8");
    }

    #[test]
    fn test_detect_charset_normalizes_to_uppercase() {
        let html = b"<meta charset=\"windows-1252\">";
        assert_eq!(detect_charset(html), "WINDOWS-1252");
    }

    #[test]
    fn test_detect_charset_various_declarations() {
        let charsets = vec!["UTF-8", "ISO-8859-1", "windows-1252", "GB2312", "Shift_JIS"];
        for cs in charsets {
            let html = format!("<html><head><meta charset=\"{}\"></head></html>", cs);
            assert_eq!(detect_charset(html.as_bytes()), cs.to_uppercase());
        }
    }

    // ============================================================================
    // Unit Tests for Decoding
    // ============================================================================

    #[test]
    fn test_decode_html_utf8_passthrough() {
        let html = "<meta charset=\"utf-8\"><p>naïve café</p>";
        assert_eq!(decode_html(html.as_bytes()), html);
    }

    #[test]
    fn test_decode_html_latin1_body() {
        let html = b"<meta charset=\"iso-8859-1\"><p>caf\xe9 \xe0 c\xf4t\xe9</p>";
        let decoded = decode_html(html);
        assert!(decoded.contains("café à côté"), "got: {}", decoded);
    }

    #[test]
    fn test_decode_html_unknown_label_falls_back_to_utf8() {
        let html = b"<meta charset=\"martian-9000\"><p>ok</p>";
        assert_eq!(decode_html(html), "<meta charset=\"martian-9000\"><p>ok</p>");
    }

    #[test]
    fn test_decode_html_invalid_bytes_become_replacement_chars() {
        let html = b"<p>bad \xff\xfe\xff byte</p>";
        let decoded = decode_html(html);
        assert!(decoded.contains('\u{FFFD}'));
        assert!(decoded.starts_with("<p>bad "));
    }

    #[test]
    fn test_decode_html_honors_byte_order_mark() {
        // UTF-16LE BOM followed by "hi" in UTF-16LE
        let html = b"\xff\xfeh\0i\0";
        assert_eq!(decode_html(html), "hi");
    }

    // ============================================================================
    // Property-Based Tests
    // ============================================================================

    proptest! {
        #[test]
        fn prop_decode_html_is_total(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
            let decoded = decode_html(&bytes);
            // replacement never expands a byte past one code point
            prop_assert!(decoded.chars().count() <= bytes.len() + 1);
        }

        #[test]
        fn prop_detect_charset_matches_declaration(
            charset in prop::sample::select(vec!["utf-8", "iso-8859-1", "windows-1252", "shift_jis", "big5"]),
            use_html4_syntax in any::<bool>(),
        ) {
            let html = if use_html4_syntax {
                format!(
                    r#"<html><head><meta http-equiv="Content-Type" content="text/html; charset={}"></head></html>"#,
                    charset
                )
            } else {
                format!(r#"<html><head><meta charset="{}"></head></html>"#, charset)
            };

            prop_assert_eq!(detect_charset(html.as_bytes()), charset.to_uppercase());
        }
    }
}
