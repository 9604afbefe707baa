//! Data-URL codec
//!
//! Encodes binary payloads as `data:<mime>;base64,<payload>` strings and
//! decodes them back, byte-exact. This is the wire form the loader hands to
//! UI bindings: an image inlined as base64 text with a MIME-type prefix.
//!
//! Only the base64 encoding variant is supported; percent-encoded data URLs
//! are rejected rather than mis-decoded.
//!
//! # Example
//!
//! ```rust
//! use tierlab::dataurl;
//!
//! let url = dataurl::encode("image/png", &[1, 2, 3]);
//! assert!(url.starts_with("data:image/png;base64,"));
//!
//! let decoded = dataurl::decode(&url).unwrap();
//! assert_eq!(decoded.mime, "image/png");
//! assert_eq!(decoded.bytes, vec![1, 2, 3]);
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

/// A decoded data URL: MIME type plus raw bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload {
    /// MIME type from the URL header, e.g. "image/png"
    pub mime: String,
    /// The decoded payload bytes
    pub bytes: Vec<u8>,
}

/// Encode bytes as a base64 data URL with the given MIME type
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Decode a base64 data URL back into MIME type and bytes
///
/// Round-trips exactly: `decode(&encode(mime, bytes))` reproduces the
/// original bytes. An empty MIME header falls back to `text/plain` as the
/// data-URL RFC prescribes.
pub fn decode(url: &str) -> DataUrlResult<DecodedPayload> {
    let rest = url.strip_prefix("data:").ok_or(DataUrlError::MissingScheme)?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or(DataUrlError::MissingSeparator)?;

    // The encoding marker is the last ;-separated header segment; anything
    // before it (including MIME parameters) is the type.
    let (mime, encoding) = match header.rsplit_once(';') {
        Some((mime, encoding)) => (mime, encoding),
        None => (header, ""),
    };
    if encoding != "base64" {
        return Err(DataUrlError::UnsupportedEncoding(if encoding.is_empty() {
            "percent".to_string()
        } else {
            encoding.to_string()
        }));
    }

    let bytes = STANDARD.decode(payload)?;
    let mime = if mime.is_empty() {
        "text/plain".to_string()
    } else {
        mime.to_string()
    };

    Ok(DecodedPayload { mime, bytes })
}

/// Check whether a string looks like a data URL
pub fn is_data_url(s: &str) -> bool {
    s.starts_with("data:") && s.contains(',')
}

/// Guess the MIME type of an image from its magic bytes
///
/// Returns `None` when the bytes are not a recognized image format.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|f| f.to_mime_type())
}

/// Errors that can occur while decoding a data URL
#[derive(Debug, Error)]
pub enum DataUrlError {
    /// The string does not start with the `data:` scheme
    #[error("Not a data URL: missing \"data:\" scheme")]
    MissingScheme,

    /// No comma between header and payload
    #[error("Malformed data URL: missing \",\" separator")]
    MissingSeparator,

    /// The URL uses an encoding other than base64
    #[error("Unsupported data URL encoding: {0}")]
    UnsupportedEncoding(String),

    /// The base64 payload is invalid
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Result type alias for data URL operations
pub type DataUrlResult<T> = Result<T, DataUrlError>;
