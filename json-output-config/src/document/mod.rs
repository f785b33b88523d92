//! Schema-bound view of a configuration document.
//!
//! [`parse_document`] checks the XML text against the schema tables and
//! produces a tree of [`Context`]s whose leaves already carry typed values.
//! The output parsers only ever see this tree.

mod bind;

pub use bind::parse_document;

use crate::error::{Error, Result};
use crate::schema::{Element, NodeKind};

/// Value of a bound element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    Uint(u64),
    Bool(bool),
    Context(Context),
}

/// One child of a [`Context`]: element identifier plus its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    id: Element,
    tag: &'static str,
    value: Value,
}

impl Content {
    pub(crate) fn new(id: Element, tag: &'static str, value: Value) -> Self {
        Self { id, tag, value }
    }

    pub fn id(&self) -> Element {
        self.id
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_string(self) -> Result<String> {
        match self.value {
            Value::String(s) => Ok(s),
            _ => Err(self.type_mismatch("string")),
        }
    }

    pub fn into_uint(self) -> Result<u64> {
        match self.value {
            Value::Uint(v) => Ok(v),
            _ => Err(self.type_mismatch("unsigned integer")),
        }
    }

    pub fn into_bool(self) -> Result<bool> {
        match self.value {
            Value::Bool(v) => Ok(v),
            _ => Err(self.type_mismatch("boolean")),
        }
    }

    pub fn into_context(self) -> Result<Context> {
        match self.value {
            Value::Context(ctx) => Ok(ctx),
            _ => Err(self.type_mismatch("nested element")),
        }
    }

    fn type_mismatch(&self, expected: &str) -> Error {
        Error::invalid(format!(
            "Element <{}> has unexpected type (expected {expected})!",
            self.tag
        ))
    }
}

/// Children of one node, in document order.
///
/// A context is consumed by iterating over it, so every child is visited
/// exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    kind: NodeKind,
    contents: Vec<Content>,
}

impl Context {
    pub(crate) fn new(kind: NodeKind, contents: Vec<Content>) -> Self {
        Self { kind, contents }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

impl IntoIterator for Context {
    type Item = Content;
    type IntoIter = std::vec::IntoIter<Content>;

    fn into_iter(self) -> Self::IntoIter {
        self.contents.into_iter()
    }
}

pub(crate) fn unexpected_element(kind: NodeKind) -> Error {
    Error::invalid(format!("Unexpected element within <{kind}>!"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(value: &str) -> Content {
        Content::new(
            Element::PrintName,
            "name",
            Value::String(value.to_string()),
        )
    }

    #[test]
    fn test_content_accessors() {
        let content = name("console");
        assert_eq!(content.id(), Element::PrintName);
        assert_eq!(content.tag(), "name");
        assert_eq!(content.value(), &Value::String("console".to_string()));
        assert_eq!(content.into_string(), Ok("console".to_string()));
    }

    #[test]
    fn test_content_type_mismatch() {
        let err = name("console").into_uint().err();
        assert_eq!(
            err.map(|e| e.to_string()),
            Some("Element <name> has unexpected type (expected unsigned integer)!".to_string())
        );
        assert!(name("x").into_bool().is_err());
        assert!(name("x").into_context().is_err());
    }

    #[test]
    fn test_context_iterates_in_order() {
        let ctx = Context::new(NodeKind::Print, vec![name("a"), name("b")]);
        assert_eq!(ctx.kind(), NodeKind::Print);
        assert_eq!(ctx.len(), 2);
        assert!(!ctx.is_empty());

        let names: Vec<String> = ctx
            .into_iter()
            .filter_map(|c| c.into_string().ok())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_unexpected_names_node() {
        assert_eq!(
            unexpected_element(NodeKind::SyslogTransport).to_string(),
            "Unexpected element within <transport>!"
        );
    }
}
