#![forbid(unsafe_code)]

//! Server-to-client hand-off of an element tree embedded in a page.

mod payload;

pub use payload::{PayloadError, pack, pack_text, unpack, unpack_text};

use crate::codec::{self, DecodingError, EncodingError};
use crate::element::Element;
use crate::registry::TypeRegistry;
use crate::value::Value;

pub const DATA_SCRIPT_ID: &str = "data";

/// Server side: encodes `element` and packs it for embedding.
///
/// The packed text is parsed and decoded once before it is returned, so a
/// page never ships a tree the client would fail to rebuild.
pub fn render(element: &Element, registry: &TypeRegistry) -> Result<String, HydrationError> {
    let json = codec::encode_element(element, registry)?;
    let text = json.to_string();
    let reparsed: serde_json::Value =
        serde_json::from_str(&text).map_err(PayloadError::Json)?;
    codec::decode(&reparsed, registry)?;
    let payload = pack_text(&text);
    tracing::debug!(
        json_len = text.len(),
        payload_len = payload.len(),
        "rendered hydration payload"
    );
    Ok(payload)
}

/// Client side: unpacks a payload and rebuilds the tree.
pub fn hydrate(payload: &str, registry: &TypeRegistry) -> Result<Value, HydrationError> {
    let json = unpack(payload)?;
    Ok(codec::decode(&json, registry)?)
}

pub fn script_tag(payload: &str) -> String {
    format!(r#"<script id="{DATA_SCRIPT_ID}" type="application/json">{payload}</script>"#)
}

#[derive(Debug)]
pub enum HydrationError {
    Encoding(EncodingError),
    Decoding(DecodingError),
    Payload(PayloadError),
}

impl std::fmt::Display for HydrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encoding(err) => write!(f, "encoding: {err}"),
            Self::Decoding(err) => write!(f, "decoding: {err}"),
            Self::Payload(err) => write!(f, "payload: {err}"),
        }
    }
}

impl std::error::Error for HydrationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encoding(err) => Some(err),
            Self::Decoding(err) => Some(err),
            Self::Payload(err) => Some(err),
        }
    }
}

impl From<EncodingError> for HydrationError {
    fn from(value: EncodingError) -> Self {
        Self::Encoding(value)
    }
}

impl From<DecodingError> for HydrationError {
    fn from(value: DecodingError) -> Self {
        Self::Decoding(value)
    }
}

impl From<PayloadError> for HydrationError {
    fn from(value: PayloadError) -> Self {
        Self::Payload(value)
    }
}
