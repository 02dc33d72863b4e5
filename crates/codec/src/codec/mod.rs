#![forbid(unsafe_code)]

//! Element tree <-> JSON.
//!
//! An element encodes as an object holding [`TYPE_KEY`] plus optional
//! `props` and `key`:
//!
//! ```text
//! { "$$elementType.": "h1", "props": { "children": ["Hello ", "world"] } }
//! { "$$elementType.": { "fragment": true }, "key": "1" }
//! { "$$elementType.": { "custom": "TaskList" }, "props": { ... } }
//! ```
//!
//! A prop or object entry that is itself named [`TYPE_KEY`] is stored as
//! `{ "literal": <encoded value> }` so that its parent never reads as an
//! element.

mod decode;
mod encode;
mod error;

pub use decode::decode;
pub use encode::{encode, encode_element};
pub use error::{DecodingError, EncodingError};

pub const TYPE_KEY: &str = "$$elementType.";

pub(crate) const CUSTOM: &str = "custom";
pub(crate) const FRAGMENT: &str = "fragment";
pub(crate) const LITERAL: &str = "literal";
pub(crate) const PROPS: &str = "props";
pub(crate) const KEY: &str = "key";
