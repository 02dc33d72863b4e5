#![forbid(unsafe_code)]

//! Checks that an in-memory [`Value`] is representable as JSON, and reports
//! the first node that is not.

use crate::path::{Crumbs, JsonPath};
use crate::value::Value;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidReason {
    Undefined,
    NonFinite,
    NotPlainObject,
    Cycle,
}

impl InvalidReason {
    pub fn message(self) -> &'static str {
        match self {
            Self::Undefined => "is undefined",
            Self::NonFinite => "is infinite or NaN",
            Self::NotPlainObject => "is not a plain object",
            Self::Cycle => "forms a cycle",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidJson {
    pub path: JsonPath,
    pub reason: InvalidReason,
    /// `type <kind> = <rendering>` of the offending node.
    pub found: String,
}

impl fmt::Display for InvalidJson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} {}", self.path, self.found, self.reason.message())
    }
}

impl std::error::Error for InvalidJson {}

pub fn is_json(value: &Value) -> bool {
    check(value).is_ok()
}

pub fn check(value: &Value) -> Result<(), InvalidJson> {
    let mut walker = Walker::default();
    let out = walker.visit(value);
    debug_assert!(walker.stack.is_empty(), "visit stack left unbalanced");
    debug_assert!(walker.crumbs.is_empty(), "breadcrumbs left unbalanced");
    out
}

/// Composite values currently being descended into, by identity. A value
/// met again while still on the stack is a back-edge; one met again after it
/// was left is merely shared.
#[derive(Debug, Default)]
pub(crate) struct VisitStack(Vec<*const ()>);

impl VisitStack {
    /// Returns `false` (and pushes nothing) if `value` is already being visited.
    pub(crate) fn enter(&mut self, value: &Value) -> bool {
        let Some(id) = value.identity() else {
            return true;
        };
        if self.0.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    pub(crate) fn leave(&mut self, value: &Value) {
        if value.identity().is_some() {
            self.0.pop();
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Default)]
struct Walker {
    stack: VisitStack,
    crumbs: Crumbs,
}

impl Walker {
    fn visit(&mut self, value: &Value) -> Result<(), InvalidJson> {
        match value {
            Value::Undefined => Err(self.invalid(value, InvalidReason::Undefined)),
            Value::Null | Value::Bool(_) | Value::String(_) => Ok(()),
            Value::Number(n) if n.is_finite() => Ok(()),
            Value::Number(_) => Err(self.invalid(value, InvalidReason::NonFinite)),
            Value::Element(_) | Value::Opaque(_) => {
                Err(self.invalid(value, InvalidReason::NotPlainObject))
            }
            Value::Array(items) => {
                if !self.stack.enter(value) {
                    return Err(self.invalid(value, InvalidReason::Cycle));
                }
                let out = items
                    .borrow()
                    .iter()
                    .enumerate()
                    .try_for_each(|(index, item)| self.visit_at(index.to_string(), item));
                self.stack.leave(value);
                out
            }
            Value::Object(map) => {
                if !self.stack.enter(value) {
                    return Err(self.invalid(value, InvalidReason::Cycle));
                }
                let out = map
                    .borrow()
                    .iter()
                    .try_for_each(|(key, item)| self.visit_at(key.clone(), item));
                self.stack.leave(value);
                out
            }
        }
    }

    fn visit_at(&mut self, segment: String, value: &Value) -> Result<(), InvalidJson> {
        self.crumbs.push(segment);
        let out = self.visit(value);
        self.crumbs.pop();
        out
    }

    fn invalid(&self, value: &Value, reason: InvalidReason) -> InvalidJson {
        InvalidJson {
            path: self.crumbs.path(),
            reason,
            found: format!("type {} = {}", value.kind_name(), value.describe()),
        }
    }
}

#[cfg(test)]
mod tests;
