#![forbid(unsafe_code)]

//! Transport form of an encoded tree inside an HTML page.
//!
//! JSON placed verbatim in a `<script>` either gets its quotes entity-escaped
//! or can be cut short by a `</script>` inside some string. The payload is
//! therefore the base64 of the JSON text's UTF-16 code units, little-endian,
//! which is what a browser can undo with `atob` plus a `Uint16Array` view.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::Value as Json;

pub fn pack(json: &Json) -> String {
    pack_text(&json.to_string())
}

pub fn pack_text(text: &str) -> String {
    let mut bytes = Vec::with_capacity(text.len() * 2);
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    STANDARD.encode(bytes)
}

pub fn unpack(payload: &str) -> Result<Json, PayloadError> {
    let text = unpack_text(payload)?;
    serde_json::from_str(&text).map_err(PayloadError::Json)
}

pub fn unpack_text(payload: &str) -> Result<String, PayloadError> {
    let bytes = STANDARD.decode(payload.trim())?;
    if bytes.len() % 2 != 0 {
        return Err(PayloadError::OddLength { len: bytes.len() });
    }
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect::<Vec<_>>();
    String::from_utf16(&units).map_err(|_| PayloadError::Utf16)
}

#[derive(Debug)]
pub enum PayloadError {
    Base64(base64::DecodeError),
    OddLength { len: usize },
    Utf16,
    Json(serde_json::Error),
}

impl std::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base64(err) => write!(f, "payload is not base64: {err}"),
            Self::OddLength { len } => {
                write!(f, "payload decodes to {len} bytes, not whole utf-16 units")
            }
            Self::Utf16 => write!(f, "payload contains an unpaired utf-16 surrogate"),
            Self::Json(err) => write!(f, "payload is not json: {err}"),
        }
    }
}

impl std::error::Error for PayloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Base64(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<base64::DecodeError> for PayloadError {
    fn from(value: base64::DecodeError) -> Self {
        Self::Base64(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_browser_vector() {
        assert_eq!(unpack_text("SABpACAAPtim3Q==").unwrap(), "Hi 🦦");
        assert_eq!(pack_text("Hi 🦦"), "SABpACAAPtim3Q==");
    }

    #[test]
    fn script_breaking_text_survives() {
        let json = json!({ "html": "</script><script>alert(\"x\")</script>", "n": 1 });
        let payload = pack(&json);
        assert!(!payload.contains('<'));
        assert!(!payload.contains('"'));
        assert_eq!(unpack(&payload).unwrap(), json);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let payload = format!("\n    {}\n  ", pack(&json!([1, 2])));
        assert_eq!(unpack(&payload).unwrap(), json!([1, 2]));
    }

    #[test]
    fn odd_byte_count_is_rejected() {
        // one byte
        assert!(matches!(
            unpack_text("AA==").unwrap_err(),
            PayloadError::OddLength { len: 1 }
        ));
    }

    #[test]
    fn lone_surrogate_is_rejected() {
        let payload = STANDARD.encode(0xD83Eu16.to_le_bytes());
        assert!(matches!(
            unpack_text(&payload).unwrap_err(),
            PayloadError::Utf16
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            unpack("not base64!").unwrap_err(),
            PayloadError::Base64(_)
        ));
        assert!(matches!(
            unpack(&pack_text("{oops")).unwrap_err(),
            PayloadError::Json(_)
        ));
    }
}
