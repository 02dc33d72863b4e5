#![forbid(unsafe_code)]

use crate::path::JsonPath;
use crate::registry::RegistryError;
use crate::validate::InvalidJson;

#[derive(Clone, Debug, PartialEq)]
pub enum EncodingError {
    Undefined {
        path: JsonPath,
    },
    NotEncodable {
        path: JsonPath,
        found: String,
    },
    NoEncoding {
        path: JsonPath,
        component: String,
    },
    Cycle {
        path: JsonPath,
    },
    NotJson(InvalidJson),
}

impl EncodingError {
    pub fn path(&self) -> &JsonPath {
        match self {
            Self::Undefined { path }
            | Self::NotEncodable { path, .. }
            | Self::NoEncoding { path, .. }
            | Self::Cycle { path } => path,
            Self::NotJson(invalid) => &invalid.path,
        }
    }
}

impl std::fmt::Display for EncodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undefined { path } => {
                write!(f, "undefined cannot be stored in json (at {path})")
            }
            Self::NotEncodable { path, found } => {
                write!(f, "cannot encode {found} (at {path})")
            }
            Self::NoEncoding { path, component } => {
                write!(f, "no encoding defined for {component} (at {path})")
            }
            Self::Cycle { path } => write!(f, "value forms a cycle (at {path})"),
            Self::NotJson(invalid) => write!(f, "encoded value is not json: {invalid}"),
        }
    }
}

impl std::error::Error for EncodingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotJson(invalid) => Some(invalid),
            _ => None,
        }
    }
}

impl From<InvalidJson> for EncodingError {
    fn from(value: InvalidJson) -> Self {
        Self::NotJson(value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DecodingError {
    UnknownTag { path: JsonPath, found: String },
    UnexpectedField { path: JsonPath, field: String },
    MalformedProps { path: JsonPath },
    MalformedKey { path: JsonPath },
    UncollapsedLiteral { path: JsonPath },
    Unregistered { path: JsonPath, source: RegistryError },
    Number { path: JsonPath },
}

impl DecodingError {
    pub fn path(&self) -> &JsonPath {
        match self {
            Self::UnknownTag { path, .. }
            | Self::UnexpectedField { path, .. }
            | Self::MalformedProps { path }
            | Self::MalformedKey { path }
            | Self::UncollapsedLiteral { path }
            | Self::Unregistered { path, .. }
            | Self::Number { path } => path,
        }
    }
}

impl std::fmt::Display for DecodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTag { path, found } => {
                write!(f, "unrecognized element tag {found} (at {path})")
            }
            Self::UnexpectedField { path, field } => {
                write!(f, "unexpected field {field:?} on element (at {path})")
            }
            Self::MalformedProps { path } => {
                write!(f, "element props must be an object (at {path})")
            }
            Self::MalformedKey { path } => {
                write!(f, "element key must be a string (at {path})")
            }
            Self::UncollapsedLiteral { path } => {
                write!(f, "literal failed to collapse (at {path})")
            }
            Self::Unregistered { path, source } => write!(f, "{source} (at {path})"),
            Self::Number { path } => write!(f, "number is not representable (at {path})"),
        }
    }
}

impl std::error::Error for DecodingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unregistered { source, .. } => Some(source),
            _ => None,
        }
    }
}
