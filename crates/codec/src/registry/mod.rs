#![forbid(unsafe_code)]

mod component;

pub use component::ComponentType;

use std::collections::HashMap;

/// Two-way map between component identities and their stable wire names.
///
/// Built once at start-up and only read afterwards; share it by reference
/// (or behind an `Arc`) with every encoder and decoder.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    by_type: HashMap<ComponentType, String>,
    by_name: HashMap<String, ComponentType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, ty: ComponentType, name: &str) -> Result<Self, RegistryError> {
        self.register(ty, name)?;
        Ok(self)
    }

    /// Binds `ty` and `name` to each other. Registering an identical pair
    /// again is a no-op; rebinding either side to something else fails and
    /// leaves the registry untouched.
    pub fn register(&mut self, ty: ComponentType, name: &str) -> Result<(), RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName {
                component: ty.label().to_string(),
            });
        }
        if let Some(existing) = self.by_name.get(name)
            && *existing != ty
        {
            return Err(RegistryError::NameTaken {
                name: name.to_string(),
                holder: existing.label().to_string(),
            });
        }
        if let Some(existing) = self.by_type.get(&ty)
            && existing != name
        {
            return Err(RegistryError::AlreadyRegistered {
                component: ty.label().to_string(),
                name: existing.clone(),
            });
        }
        if self.by_type.contains_key(&ty) {
            return Ok(());
        }
        tracing::trace!(name, component = %ty, "registered component type");
        self.by_name.insert(name.to_string(), ty.clone());
        self.by_type.insert(ty, name.to_string());
        Ok(())
    }

    pub fn resolve_name(&self, ty: &ComponentType) -> Result<&str, RegistryError> {
        self.by_type
            .get(ty)
            .map(String::as_str)
            .ok_or_else(|| RegistryError::UnknownType {
                component: ty.label().to_string(),
            })
    }

    pub fn resolve_type(&self, name: &str) -> Result<&ComponentType, RegistryError> {
        self.by_name
            .get(name)
            .ok_or_else(|| RegistryError::UnknownName {
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names = self.by_name.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    EmptyName { component: String },
    NameTaken { name: String, holder: String },
    AlreadyRegistered { component: String, name: String },
    UnknownType { component: String },
    UnknownName { name: String },
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName { component } => {
                write!(f, "empty name given for component {component}")
            }
            Self::NameTaken { name, holder } => {
                write!(f, "name {name:?} is already in use by {holder}")
            }
            Self::AlreadyRegistered { component, name } => {
                write!(f, "{component} is already registered as {name:?}")
            }
            Self::UnknownType { component } => {
                write!(f, "component {component} is not registered")
            }
            Self::UnknownName { name } => write!(f, "no component registered as {name:?}"),
        }
    }
}

impl std::error::Error for RegistryError {}
