#![forbid(unsafe_code)]

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DYNAMIC_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Identity {
    Rust(TypeId),
    Dynamic(u64),
}

/// Identity of a custom component.
///
/// Two `ComponentType`s are equal iff they denote the same component; the
/// label only feeds diagnostics.
#[derive(Clone)]
pub struct ComponentType {
    identity: Identity,
    label: Arc<str>,
}

impl ComponentType {
    pub fn of<T: 'static>() -> Self {
        Self {
            identity: Identity::Rust(TypeId::of::<T>()),
            label: short_type_name(std::any::type_name::<T>()).into(),
        }
    }

    /// Mints a component identity that is distinct from every other one,
    /// including other dynamic components with the same label.
    pub fn dynamic(label: impl Into<String>) -> Self {
        let id = NEXT_DYNAMIC_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            identity: Identity::Dynamic(id),
            label: label.into().into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

impl PartialEq for ComponentType {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for ComponentType {}

impl Hash for ComponentType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentType({})", self.label)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
