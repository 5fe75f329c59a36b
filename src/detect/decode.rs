use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use super::error::DetectError;

/// Decodes a base64 audio payload, tolerating a `data:audio/...;base64,`
/// URI prefix. An empty payload decodes to an empty byte sequence.
pub fn decode_audio(payload: &str) -> Result<Vec<u8>, DetectError> {
    let payload = payload.trim();

    let encoded = if payload.starts_with("data:") {
        match payload.split_once(";base64,") {
            Some((_, rest)) => rest,
            None => payload,
        }
    } else {
        payload
    };

    BASE64
        .decode(encoded)
        .map_err(|e| DetectError::InvalidAudio(e.to_string()))
}
