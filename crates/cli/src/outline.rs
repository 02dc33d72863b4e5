#![forbid(unsafe_code)]

use ej_codec::element::CHILDREN;
use ej_codec::{Element, Value};
use serde::Serialize;

/// Compact view of a decoded tree: tags, keys and prop names, not prop values.
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub(crate) enum Outline {
    Element {
        tag: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        props: Vec<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        children: Vec<Outline>,
    },
    List(Vec<Outline>),
    Leaf(String),
}

pub(crate) fn outline(value: &Value) -> Outline {
    match value {
        Value::Element(element) => outline_element(element),
        Value::Array(items) => Outline::List(items.borrow().iter().map(outline).collect()),
        other => Outline::Leaf(other.describe()),
    }
}

fn outline_element(element: &Element) -> Outline {
    Outline::Element {
        tag: element.kind().label().to_string(),
        key: element.key().map(str::to_string),
        props: element
            .props()
            .keys()
            .filter(|k| k.as_str() != CHILDREN)
            .cloned()
            .collect(),
        children: element.children().iter().map(outline).collect(),
    }
}

/// Elements anywhere in the value: children, props, arrays, plain objects.
pub(crate) fn count_elements(value: &Value) -> usize {
    match value {
        Value::Element(element) => {
            1 + element.props().values().map(count_elements).sum::<usize>()
        }
        Value::Array(items) => items.borrow().iter().map(count_elements).sum(),
        Value::Object(map) => map.borrow().values().map(count_elements).sum(),
        _ => 0,
    }
}
