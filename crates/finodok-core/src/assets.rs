//! Inline asset embedding
//!
//! Images are embedded as `data:` URIs so the assembled document renders
//! without filesystem or network access.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

/// Encode bytes as a `data:` URI
pub fn embed_inline(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Sniff the image type from its leading bytes
pub fn detect_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        return Some("image/png");
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }

    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(512)]);
    if head.contains("<svg") {
        return Some("image/svg+xml");
    }

    None
}

/// Map an image file extension to its MIME type
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Read a logo file and embed it
///
/// Returns `None` when the path is absent or empty, the file does not
/// exist or cannot be read, or its content is not a recognised image.
/// Never fails: a missing logo only removes the logo slot.
pub fn load_and_embed_logo(path: Option<&Path>) -> Option<String> {
    let path = path?;
    if path.as_os_str().is_empty() {
        return None;
    }

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "logo not readable, omitting");
            return None;
        }
    };
    if bytes.is_empty() {
        debug!(path = %path.display(), "logo file is empty, omitting");
        return None;
    }

    let mime = detect_mime(&bytes).or_else(|| {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(mime_for_extension)
    });

    match mime {
        Some(mime) => Some(embed_inline(&bytes, mime)),
        None => {
            debug!(path = %path.display(), "logo is not a recognised image, omitting");
            None
        }
    }
}
