#![forbid(unsafe_code)]

//! Encodes UI element trees as plain JSON and rebuilds them on the other
//! side, for server-rendered pages that hydrate in the browser.

pub mod codec;
pub mod element;
pub mod hydration;
pub mod path;
pub mod registry;
pub mod validate;
pub mod value;

pub use codec::{DecodingError, EncodingError, TYPE_KEY, decode, encode, encode_element};
pub use element::{Element, ElementBuilder, ElementKind, Props};
pub use hydration::{HydrationError, PayloadError};
pub use path::JsonPath;
pub use registry::{ComponentType, RegistryError, TypeRegistry};
pub use validate::{InvalidJson, InvalidReason, check, is_json};
pub use value::{Opaque, Value};
