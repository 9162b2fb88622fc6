//! Content type sniffing
//!
//! Classifies a byte stream by inspecting its leading bytes, never by
//! trusting the client-declared Content-Type header. Pure function over a
//! bounded prefix; callers read at most [`SNIFF_LEN`] bytes.

/// Number of leading bytes inspected when classifying a stream.
pub const SNIFF_LEN: usize = 512;

/// Classify `data` by magic-number signatures. Falls back to
/// `text/plain; charset=utf-8` for printable content and
/// `application/octet-stream` otherwise.
pub fn detect_content_type(data: &[u8]) -> &'static str {
    let data = &data[..data.len().min(SNIFF_LEN)];

    // Image formats
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return "image/jpeg";
    }
    if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        return "image/png";
    }
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return "image/gif";
    }
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return "image/webp";
    }
    if data.starts_with(b"BM") {
        return "image/bmp";
    }

    // Audio/video containers
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WAVE" {
        return "audio/wave";
    }
    if data.len() >= 12 && &data[4..8] == b"ftyp" {
        return "video/mp4";
    }
    if data.starts_with(b"ID3")
        || data.starts_with(&[0xFF, 0xFB])
        || data.starts_with(&[0xFF, 0xF3])
        || data.starts_with(&[0xFF, 0xF2])
    {
        return "audio/mpeg";
    }
    if data.starts_with(b"OggS") {
        return "application/ogg";
    }

    // Documents and archives
    if data.starts_with(b"%PDF-") {
        return "application/pdf";
    }
    if data.starts_with(b"PK\x03\x04") {
        return "application/zip";
    }
    if data.starts_with(&[0x1F, 0x8B, 0x08]) {
        return "application/x-gzip";
    }
    if data.starts_with(b"wOF2") {
        return "font/woff2";
    }

    // Textual content. HTML tags are matched after leading whitespace,
    // case-insensitively.
    let trimmed = trim_leading_whitespace(data);
    for tag in [
        "<!DOCTYPE HTML", "<HTML", "<HEAD", "<BODY", "<SCRIPT", "<IFRAME", "<DIV", "<P", "<!--",
    ] {
        if starts_with_ignore_case(trimmed, tag.as_bytes()) {
            return "text/html; charset=utf-8";
        }
    }
    if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return "text/plain; charset=utf-8";
    }
    if !data.is_empty() && !data.iter().any(|b| is_binary_byte(*b)) {
        return "text/plain; charset=utf-8";
    }

    "application/octet-stream"
}

fn trim_leading_whitespace(data: &[u8]) -> &[u8] {
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    &data[start..]
}

fn starts_with_ignore_case(data: &[u8], prefix: &[u8]) -> bool {
    data.len() >= prefix.len()
        && data[..prefix.len()].eq_ignore_ascii_case(prefix)
}

// Control bytes that never appear in plain text.
fn is_binary_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_signatures() {
        assert_eq!(detect_content_type(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
        assert_eq!(detect_content_type(b"\x89PNG\r\n\x1a\n____"), "image/png");
        assert_eq!(detect_content_type(b"GIF89a______"), "image/gif");
        assert_eq!(detect_content_type(b"BM\x00\x00"), "image/bmp");
    }

    #[test]
    fn test_riff_containers() {
        assert_eq!(detect_content_type(b"RIFF\x00\x00\x00\x00WEBPVP8 "), "image/webp");
        assert_eq!(detect_content_type(b"RIFF\x00\x00\x00\x00WAVEfmt "), "audio/wave");
    }

    #[test]
    fn test_mp4_ftyp_at_offset_four() {
        let mut mp4 = vec![0x00, 0x00, 0x00, 0x20];
        mp4.extend_from_slice(b"ftypisom");
        assert_eq!(detect_content_type(&mp4), "video/mp4");
    }

    #[test]
    fn test_documents_and_archives() {
        assert_eq!(detect_content_type(b"%PDF-1.4 "), "application/pdf");
        assert_eq!(detect_content_type(b"PK\x03\x04____"), "application/zip");
        assert_eq!(detect_content_type(&[0x1F, 0x8B, 0x08, 0x00]), "application/x-gzip");
    }

    #[test]
    fn test_html_is_case_insensitive_after_whitespace() {
        assert_eq!(
            detect_content_type(b"  \n<!doctype html><html>"),
            "text/html; charset=utf-8"
        );
        assert_eq!(detect_content_type(b"<HTML><body>"), "text/html; charset=utf-8");
    }

    #[test]
    fn test_plain_text_fallback() {
        assert_eq!(
            detect_content_type(b"hello, world\nsecond line"),
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            detect_content_type(&[0xEF, 0xBB, 0xBF, b'h', b'i']),
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn test_binary_fallback() {
        assert_eq!(
            detect_content_type(&[0x00, 0x01, 0x02, 0x03]),
            "application/octet-stream"
        );
        assert_eq!(detect_content_type(b""), "application/octet-stream");
    }

    #[test]
    fn test_only_prefix_is_inspected() {
        // A PNG signature buried past the sniff window must not match.
        let mut data = vec![b'a'; SNIFF_LEN];
        data.extend_from_slice(b"\x89PNG\r\n\x1a\n");
        assert_eq!(detect_content_type(&data), "text/plain; charset=utf-8");
    }
}
