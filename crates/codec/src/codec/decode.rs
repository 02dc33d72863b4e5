#![forbid(unsafe_code)]

use super::error::DecodingError;
use super::{CUSTOM, FRAGMENT, KEY, LITERAL, PROPS, TYPE_KEY};
use crate::element::{Element, ElementKind, Props};
use crate::path::Crumbs;
use crate::registry::TypeRegistry;
use crate::value::Value;
use indexmap::IndexMap;
use serde_json::{Map, Value as Json};

/// Rebuilds a UI value from JSON produced by [`super::encode`].
///
/// Objects carrying the reserved type key become elements; every other
/// object and array is walked so that elements nested in props, arrays or
/// plain objects are restored too.
pub fn decode(json: &Json, registry: &TypeRegistry) -> Result<Value, DecodingError> {
    let mut decoder = Decoder {
        registry,
        crumbs: Crumbs::default(),
        elements: 0,
    };
    let value = decoder.decode(json)?;
    tracing::debug!(elements = decoder.elements, "decoded element tree");
    Ok(value)
}

struct Decoder<'a> {
    registry: &'a TypeRegistry,
    crumbs: Crumbs,
    elements: usize,
}

/// `{ "literal": X }` with nothing else beside it.
fn literal_of(json: &Json) -> Option<&Json> {
    json.as_object()
        .filter(|map| map.len() == 1)
        .and_then(|map| map.get(LITERAL))
}

impl Decoder<'_> {
    fn decode(&mut self, json: &Json) -> Result<Value, DecodingError> {
        match json {
            Json::Null => Ok(Value::Null),
            Json::Bool(b) => Ok(Value::Bool(*b)),
            Json::Number(n) => n.as_f64().map(Value::Number).ok_or_else(|| {
                DecodingError::Number {
                    path: self.crumbs.path(),
                }
            }),
            Json::String(s) => Ok(Value::String(s.clone())),
            Json::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    out.push(self.decode_at(index.to_string(), item)?);
                }
                Ok(Value::array(out))
            }
            Json::Object(map) => match map.get(TYPE_KEY) {
                Some(tag) if literal_of(tag).is_none() => self.decode_element(map, tag),
                _ => Ok(Value::object(self.decode_entries(map)?)),
            },
        }
    }

    fn decode_at(
        &mut self,
        segment: impl Into<String>,
        json: &Json,
    ) -> Result<Value, DecodingError> {
        self.crumbs.push(segment);
        let out = self.decode(json);
        self.crumbs.pop();
        out
    }

    /// Decodes each entry, unwrapping the literal that guards an entry named
    /// like the reserved type key. Element children need nothing special:
    /// an encoded children array decodes back to an array whatever its
    /// length, and a single child stays single.
    fn decode_entries(
        &mut self,
        map: &Map<String, Json>,
    ) -> Result<IndexMap<String, Value>, DecodingError> {
        let mut out = IndexMap::with_capacity(map.len());
        for (key, json) in map {
            let value = if key == TYPE_KEY {
                self.crumbs.push(key.as_str());
                let out = self.unwrap_literal(json);
                self.crumbs.pop();
                out?
            } else {
                self.decode_at(key.as_str(), json)?
            };
            out.insert(key.clone(), value);
        }
        Ok(out)
    }

    fn unwrap_literal(&mut self, json: &Json) -> Result<Value, DecodingError> {
        match literal_of(json) {
            Some(inner) => self.decode_at(LITERAL, inner),
            None => Err(DecodingError::UncollapsedLiteral {
                path: self.crumbs.path(),
            }),
        }
    }

    fn decode_element(
        &mut self,
        map: &Map<String, Json>,
        tag: &Json,
    ) -> Result<Value, DecodingError> {
        if let Some(field) = map
            .keys()
            .find(|k| !matches!(k.as_str(), TYPE_KEY | PROPS | KEY))
        {
            return Err(DecodingError::UnexpectedField {
                path: self.crumbs.path(),
                field: field.clone(),
            });
        }
        let kind = self.decode_tag(tag)?;
        self.elements += 1;

        let key = match map.get(KEY) {
            None => None,
            Some(Json::String(key)) => Some(key.clone()),
            Some(_) => {
                return Err(DecodingError::MalformedKey {
                    path: self.crumbs.path().child(KEY),
                });
            }
        };

        let props = match map.get(PROPS) {
            None => Props::new(),
            Some(Json::Object(props)) => {
                self.crumbs.push(PROPS);
                let out = self.decode_entries(props);
                self.crumbs.pop();
                out?
            }
            Some(_) => {
                return Err(DecodingError::MalformedProps {
                    path: self.crumbs.path().child(PROPS),
                });
            }
        };

        Ok(Element::from_parts(kind, props, key).into())
    }

    fn decode_tag(&self, tag: &Json) -> Result<ElementKind, DecodingError> {
        if let Json::String(tag) = tag {
            return Ok(ElementKind::Host(tag.clone()));
        }
        let unknown = || DecodingError::UnknownTag {
            path: self.crumbs.path().child(TYPE_KEY),
            found: tag.to_string(),
        };
        let Some(shape) = tag.as_object().filter(|shape| shape.len() == 1) else {
            return Err(unknown());
        };
        if shape.get(FRAGMENT) == Some(&Json::Bool(true)) {
            return Ok(ElementKind::Fragment);
        }
        match shape.get(CUSTOM) {
            Some(Json::String(name)) => self
                .registry
                .resolve_type(name)
                .map(|ty| ElementKind::Custom(ty.clone()))
                .map_err(|source| DecodingError::Unregistered {
                    path: self.crumbs.path().child(TYPE_KEY),
                    source,
                }),
            _ => Err(unknown()),
        }
    }
}
