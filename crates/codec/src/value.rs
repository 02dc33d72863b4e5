#![forbid(unsafe_code)]

use crate::element::Element;
use indexmap::IndexMap;
use serde_json::{Map, Number, Value as Json};
use std::cell::RefCell;
use std::rc::Rc;

pub type ArrayRef = Rc<RefCell<Vec<Value>>>;
pub type ObjectRef = Rc<RefCell<IndexMap<String, Value>>>;

/// An in-memory value as handed over by the UI layer.
///
/// Arrays and objects are shared and mutable so that the same node can be
/// referenced from several places, or from inside itself. Identity of those
/// composites is the identity of their `Rc`.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(ArrayRef),
    Object(ObjectRef),
    Element(Rc<Element>),
    Opaque(Rc<Opaque>),
}

impl Value {
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Array(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self::Object(Rc::new(RefCell::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        )))
    }

    pub fn empty_object() -> Self {
        Self::Object(Rc::new(RefCell::new(IndexMap::new())))
    }

    pub fn opaque(opaque: Opaque) -> Self {
        Self::Opaque(Rc::new(opaque))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Pointer identity of a composite value; `None` for scalars.
    pub fn identity(&self) -> Option<*const ()> {
        match self {
            Self::Array(items) => Some(Rc::as_ptr(items) as *const ()),
            Self::Object(map) => Some(Rc::as_ptr(map) as *const ()),
            Self::Element(element) => Some(Rc::as_ptr(element) as *const ()),
            Self::Opaque(opaque) => Some(Rc::as_ptr(opaque) as *const ()),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Element(_) => "element",
            Self::Opaque(opaque) => opaque.class(),
        }
    }

    /// Short one-line rendering for diagnostics. Never descends more than one
    /// level, so it is safe on cyclic values.
    pub fn describe(&self) -> String {
        match self {
            Self::Undefined => "undefined".to_string(),
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => describe_number(*n),
            Self::String(s) => Json::String(s.clone()).to_string(),
            Self::Array(items) => match items.try_borrow() {
                Ok(items) => format!("[array of {}]", items.len()),
                Err(_) => "[array]".to_string(),
            },
            Self::Object(map) => match map.try_borrow() {
                Ok(map) => {
                    let keys = map.keys().map(String::as_str).collect::<Vec<_>>();
                    format!("{{ {} }}", keys.join(", "))
                }
                Err(_) => "{ … }".to_string(),
            },
            Self::Element(element) => format!("<{}>", element.kind().label()),
            Self::Opaque(opaque) => opaque.repr().to_string(),
        }
    }

    /// Converts an already-validated value into `serde_json`'s model.
    ///
    /// Returns `None` on anything JSON cannot hold. Does not detect cycles;
    /// run [`crate::validate::check`] first.
    pub(crate) fn to_json(&self) -> Option<Json> {
        match self {
            Self::Null => Some(Json::Null),
            Self::Bool(b) => Some(Json::Bool(*b)),
            Self::Number(n) => number_to_json(*n).map(Json::Number),
            Self::String(s) => Some(Json::String(s.clone())),
            Self::Array(items) => items
                .borrow()
                .iter()
                .map(Value::to_json)
                .collect::<Option<Vec<_>>>()
                .map(Json::Array),
            Self::Object(map) => {
                let mut out = Map::new();
                for (k, v) in map.borrow().iter() {
                    out.insert(k.clone(), v.to_json()?);
                }
                Some(Json::Object(out))
            }
            Self::Undefined | Self::Element(_) | Self::Opaque(_) => None,
        }
    }
}

/// Integral numbers that fit `i64` go out as JSON integers (`1`, not `1.0`).
pub(crate) fn number_to_json(n: f64) -> Option<Number> {
    if !n.is_finite() {
        return None;
    }
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        return Some(Number::from(n as i64));
    }
    Number::from_f64(n)
}

fn describe_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        number_to_json(n)
            .map(|n| n.to_string())
            .unwrap_or_else(|| n.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Element> for Value {
    fn from(value: Element) -> Self {
        Self::Element(Rc::new(value))
    }
}

impl From<Opaque> for Value {
    fn from(value: Opaque) -> Self {
        Self::opaque(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Undefined, Into::into)
    }
}

/// A value that is not plain data: a callback, a date, an instance of some
/// class. It can sit in a UI tree but has no JSON form.
#[derive(Clone, Debug, PartialEq)]
pub struct Opaque {
    class: String,
    repr: String,
}

impl Opaque {
    pub fn new(class: impl Into<String>, repr: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            repr: repr.into(),
        }
    }

    pub fn function(name: &str) -> Self {
        Self::new("function", format!("[Function: {name}]"))
    }

    pub fn date(iso: &str) -> Self {
        Self::new("Date", iso)
    }

    pub fn instance(class: &str) -> Self {
        Self::new(class, format!("{class} {{}}"))
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn repr(&self) -> &str {
        &self.repr
    }
}
