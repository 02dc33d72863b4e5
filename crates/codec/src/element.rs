#![forbid(unsafe_code)]

use crate::registry::ComponentType;
use crate::value::Value;
use indexmap::IndexMap;

pub const CHILDREN: &str = "children";

pub type Props = IndexMap<String, Value>;

#[derive(Clone, Debug, PartialEq)]
pub enum ElementKind {
    Host(String),
    Fragment,
    Custom(ComponentType),
}

impl ElementKind {
    pub fn label(&self) -> &str {
        match self {
            Self::Host(tag) => tag,
            Self::Fragment => "#fragment",
            Self::Custom(ty) => ty.label(),
        }
    }
}

/// A node of the UI tree: a kind, its props (children included, under
/// [`CHILDREN`]) and an optional sibling key.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    kind: ElementKind,
    props: Props,
    key: Option<String>,
}

impl Element {
    pub fn host(tag: impl Into<String>) -> ElementBuilder {
        ElementBuilder::new(ElementKind::Host(tag.into()))
    }

    pub fn fragment() -> ElementBuilder {
        ElementBuilder::new(ElementKind::Fragment)
    }

    pub fn custom(ty: ComponentType) -> ElementBuilder {
        ElementBuilder::new(ElementKind::Custom(ty))
    }

    /// Assembles an element from props that already carry their children.
    pub fn from_parts(kind: ElementKind, props: Props, key: Option<String>) -> Self {
        Self { kind, props, key }
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Children as an ordered list: none, the single child, or the items of
    /// the children array.
    pub fn children(&self) -> Vec<Value> {
        match self.props.get(CHILDREN) {
            None => Vec::new(),
            Some(Value::Array(items)) => items.borrow().clone(),
            Some(child) => vec![child.clone()],
        }
    }
}

#[derive(Clone, Debug)]
pub struct ElementBuilder {
    kind: ElementKind,
    props: Props,
    key: Option<String>,
    children: Vec<Value>,
}

impl ElementBuilder {
    fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            props: Props::new(),
            key: None,
            children: Vec::new(),
        }
    }

    pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn child(mut self, child: impl Into<Value>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<V: Into<Value>>(mut self, children: impl IntoIterator<Item = V>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Applies the children convention: no entry for zero children, the
    /// child itself for one, an array for several. Children added here
    /// replace a `children` prop set through [`ElementBuilder::prop`].
    pub fn build(self) -> Element {
        let Self {
            kind,
            mut props,
            key,
            mut children,
        } = self;
        match children.len() {
            0 => {}
            1 => {
                props.insert(CHILDREN.to_string(), children.remove(0));
            }
            _ => {
                props.insert(CHILDREN.to_string(), Value::array(children));
            }
        }
        Element { kind, props, key }
    }
}

impl From<ElementBuilder> for Value {
    fn from(builder: ElementBuilder) -> Self {
        builder.build().into()
    }
}
