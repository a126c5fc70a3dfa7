//! Base64 text at the HTTP boundary, raw bytes everywhere else.

use base64::{engine::general_purpose, Engine as _};

use crate::errors::ServiceError;

/// Decodes an optional base64 image. Absent or blank input stores no image.
/// The standard alphabet is tried first, then the URL-safe one.
pub fn decode_image(encoded: Option<&str>) -> Result<Option<Vec<u8>>, ServiceError> {
    let Some(text) = encoded.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    general_purpose::STANDARD
        .decode(text)
        .or_else(|_| general_purpose::URL_SAFE.decode(text))
        .or_else(|_| general_purpose::URL_SAFE_NO_PAD.decode(text))
        .map(Some)
        .map_err(|e| ServiceError::ValidationError(format!("img_source is not valid base64: {}", e)))
}

/// Encodes stored image bytes with the standard alphabet
pub fn encode_image(bytes: Option<&[u8]>) -> Option<String> {
    bytes.map(|b| general_purpose::STANDARD.encode(b))
}
