#![forbid(unsafe_code)]

use std::fmt;

/// Location of a node relative to the root of a value, as array indices and
/// object keys. Renders as `obj.<seg>.<seg>`; the root alone renders as `obj`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JsonPath {
    segments: Vec<String>,
}

impl JsonPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<String>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Re-roots a path found inside a sub-value at `prefix`.
    pub fn under(self, prefix: &[String]) -> Self {
        let mut segments = prefix.to_vec();
        segments.extend(self.segments);
        Self { segments }
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("obj")?;
        for segment in &self.segments {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}

/// Breadcrumb trail kept by the tree walkers; materialized into a
/// [`JsonPath`] only when something goes wrong.
#[derive(Debug, Default)]
pub(crate) struct Crumbs(Vec<String>);

impl Crumbs {
    pub(crate) fn push(&mut self, segment: impl Into<String>) {
        self.0.push(segment.into());
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }

    pub(crate) fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub(crate) fn path(&self) -> JsonPath {
        JsonPath::from_segments(self.0.clone())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
