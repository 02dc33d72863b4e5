#![forbid(unsafe_code)]

use super::error::EncodingError;
use super::{CUSTOM, FRAGMENT, KEY, LITERAL, PROPS, TYPE_KEY};
use crate::element::{Element, ElementKind};
use crate::path::Crumbs;
use crate::registry::TypeRegistry;
use crate::validate::{self, VisitStack};
use crate::value::{ObjectRef, Value};
use indexmap::IndexMap;
use serde_json::Value as Json;

/// Encodes a UI value into its JSON form.
///
/// The result is checked to be valid JSON before it is returned; a value
/// that slips through the per-node rules (a NaN prop, say) fails here with
/// the path of the offending node instead of producing a payload the other
/// side cannot read.
pub fn encode(value: &Value, registry: &TypeRegistry) -> Result<Json, EncodingError> {
    let mut encoder = Encoder::new(registry);
    let encoded = encoder.encode(value)?;
    validate::check(&encoded)?;
    let json = encoded.to_json().ok_or_else(|| EncodingError::NotEncodable {
        path: Default::default(),
        found: encoded.describe(),
    })?;
    tracing::debug!(elements = encoder.elements, "encoded element tree");
    Ok(json)
}

pub fn encode_element(element: &Element, registry: &TypeRegistry) -> Result<Json, EncodingError> {
    encode(&Value::from(element.clone()), registry)
}

struct Encoder<'a> {
    registry: &'a TypeRegistry,
    stack: VisitStack,
    crumbs: Crumbs,
    elements: usize,
}

impl<'a> Encoder<'a> {
    fn new(registry: &'a TypeRegistry) -> Self {
        Self {
            registry,
            stack: VisitStack::default(),
            crumbs: Crumbs::default(),
            elements: 0,
        }
    }

    fn encode(&mut self, value: &Value) -> Result<Value, EncodingError> {
        match value {
            Value::Undefined => Err(EncodingError::Undefined {
                path: self.crumbs.path(),
            }),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                Ok(value.clone())
            }
            Value::Opaque(_) => Err(EncodingError::NotEncodable {
                path: self.crumbs.path(),
                found: format!("{} {}", value.kind_name(), value.describe()),
            }),
            Value::Array(items) => self.descend(value, |enc| {
                let items = items.borrow();
                let mut out = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    out.push(enc.encode_at(index.to_string(), item)?);
                }
                Ok(Value::array(out))
            }),
            Value::Element(element) => self.descend(value, |enc| enc.encode_element(element)),
            Value::Object(map) => self.descend(value, |enc| enc.encode_object(map)),
        }
    }

    fn encode_at(&mut self, segment: String, value: &Value) -> Result<Value, EncodingError> {
        self.crumbs.push(segment);
        let out = self.encode(value);
        self.crumbs.pop();
        out
    }

    fn descend(
        &mut self,
        value: &Value,
        f: impl FnOnce(&mut Self) -> Result<Value, EncodingError>,
    ) -> Result<Value, EncodingError> {
        if !self.stack.enter(value) {
            return Err(EncodingError::Cycle {
                path: self.crumbs.path(),
            });
        }
        let out = f(self);
        self.stack.leave(value);
        out
    }

    fn encode_element(&mut self, element: &Element) -> Result<Value, EncodingError> {
        self.elements += 1;
        let mut node = IndexMap::new();
        node.insert(TYPE_KEY.to_string(), self.tag(element.kind())?);

        self.crumbs.push(PROPS);
        let props = self.encode_entries(
            element
                .props()
                .iter()
                .filter(|(_, value)| !value.is_undefined()),
        );
        self.crumbs.pop();
        let props = props?;
        if !props.is_empty() {
            node.insert(PROPS.to_string(), Value::object(props));
        }

        if let Some(key) = element.key() {
            node.insert(KEY.to_string(), Value::from(key));
        }
        Ok(Value::object(node))
    }

    fn tag(&self, kind: &ElementKind) -> Result<Value, EncodingError> {
        Ok(match kind {
            ElementKind::Host(tag) => Value::from(tag.as_str()),
            ElementKind::Fragment => Value::object([(FRAGMENT, Value::Bool(true))]),
            ElementKind::Custom(ty) => {
                let name = self.registry.resolve_name(ty).map_err(|_| {
                    EncodingError::NoEncoding {
                        path: self.crumbs.path(),
                        component: ty.label().to_string(),
                    }
                })?;
                Value::object([(CUSTOM, Value::from(name))])
            }
        })
    }

    /// Plain objects are encoded member by member and then checked as a
    /// whole, so a bad leaf is reported here rather than by the final pass.
    fn encode_object(&mut self, map: &ObjectRef) -> Result<Value, EncodingError> {
        let entries = self.encode_entries(map.borrow().iter())?;
        let encoded = Value::object(entries);
        validate::check(&encoded).map_err(|invalid| {
            EncodingError::NotJson(validate::InvalidJson {
                path: invalid.path.clone().under(self.crumbs.as_slice()),
                ..invalid
            })
        })?;
        Ok(encoded)
    }

    /// Encodes each entry under its own key; an entry named like the
    /// reserved type key is literal-wrapped so it cannot read as a tag.
    fn encode_entries<'v>(
        &mut self,
        entries: impl Iterator<Item = (&'v String, &'v Value)>,
    ) -> Result<IndexMap<String, Value>, EncodingError> {
        let mut out = IndexMap::new();
        for (key, value) in entries {
            let encoded = self.encode_at(key.clone(), value)?;
            let encoded = if key == TYPE_KEY {
                Value::object([(LITERAL, encoded)])
            } else {
                encoded
            };
            out.insert(key.clone(), encoded);
        }
        Ok(out)
    }
}
