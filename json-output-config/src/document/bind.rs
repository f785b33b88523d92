use crate::document::{unexpected_element, Content, Context, Value};
use crate::error::{Error, Result};
use crate::schema::{node_schema, ElementDef, NodeKind, ValueType};
use roxmltree::{Document, Node, ParsingOptions};
use std::collections::HashMap;

/// Parse XML text and bind it to the schema of the `<params>` root.
///
/// Malformed XML and a wrong root element are reported as
/// [`Error::Configuration`], schema violations as [`Error::InvalidArgument`].
pub fn parse_document(text: &str) -> Result<Context> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(text, options)
        .map_err(|e| Error::Configuration(e.to_string()))?;

    let root = doc.root_element();
    let tag = root.tag_name().name();
    if let Some(ns) = root.tag_name().namespace() {
        return Err(Error::Configuration(format!(
            "Unexpected namespace '{ns}' of the root element <{tag}>"
        )));
    }
    if tag != NodeKind::ROOT.to_string() {
        return Err(Error::Configuration(format!(
            "Unexpected root element <{tag}> (expected <{}>)",
            NodeKind::ROOT
        )));
    }

    bind_node(root, NodeKind::ROOT)
}

fn bind_node(node: Node<'_, '_>, kind: NodeKind) -> Result<Context> {
    let schema = node_schema(kind)
        .ok_or_else(|| Error::Configuration(format!("Missing description of the node <{kind}>")))?;

    if let Some(attr) = node.attributes().next() {
        return Err(Error::invalid(format!(
            "Unexpected attribute '{}' of the element <{kind}>!",
            attr.name()
        )));
    }

    let mut seen: HashMap<&'static str, usize> = HashMap::new();
    let mut contents = Vec::new();

    for child in node.children() {
        if child.is_text() {
            if child.text().is_some_and(|t| !t.trim().is_empty()) {
                return Err(Error::invalid(format!(
                    "Unexpected text within <{kind}>!"
                )));
            }
            continue;
        }

        if !child.is_element() {
            // Comments and processing instructions
            continue;
        }

        // Only unqualified tags belong to the schema
        if child.tag_name().namespace().is_some() {
            return Err(unexpected_element(kind));
        }
        let def = schema
            .lookup(child.tag_name().name())
            .ok_or_else(|| unexpected_element(kind))?;

        let count = seen.entry(def.tag()).or_insert(0);
        *count += 1;
        if *count > 1 && !def.is_repeatable() {
            return Err(Error::invalid(format!(
                "Element <{}> within <{kind}> can be defined only once!",
                def.tag()
            )));
        }

        log::trace!("binding <{}> within <{kind}>", def.tag());
        let value = bind_value(child, def, kind)?;
        contents.push(Content::new(def.id(), def.tag(), value));
    }

    if let Some(missing) = schema
        .elements()
        .iter()
        .find(|def| def.is_required() && !seen.contains_key(def.tag()))
    {
        return Err(Error::invalid(format!(
            "Element <{}> within <{kind}> is missing!",
            missing.tag()
        )));
    }

    Ok(Context::new(kind, contents))
}

fn bind_value(node: Node<'_, '_>, def: &ElementDef, parent: NodeKind) -> Result<Value> {
    let text = match def.ty() {
        ValueType::Context(kind) => return bind_node(node, kind).map(Value::Context),
        _ => leaf_text(node, def, parent)?,
    };

    let invalid = |what: &str| {
        Error::invalid(format!(
            "Value '{text}' of the element <{}> within <{parent}> is not {what}!",
            def.tag()
        ))
    };

    match def.ty() {
        ValueType::Uint => {
            if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid("an unsigned integer"));
            }
            text.parse()
                .map(Value::Uint)
                .map_err(|_| invalid("an unsigned integer"))
        }
        ValueType::Bool => parse_bool(&text)
            .map(Value::Bool)
            .ok_or_else(|| invalid("a boolean")),
        ValueType::String => Ok(Value::String(text)),
        ValueType::Context(kind) => bind_node(node, kind).map(Value::Context),
    }
}

/// Trimmed text of an element that must not have attributes or children.
fn leaf_text(node: Node<'_, '_>, def: &ElementDef, parent: NodeKind) -> Result<String> {
    if node.attributes().next().is_some() || node.children().any(|c| c.is_element()) {
        return Err(Error::invalid(format!(
            "Element <{}> within <{parent}> must contain only a value!",
            def.tag()
        )));
    }

    let text: String = node
        .children()
        .filter(Node::is_text)
        .filter_map(|c| c.text())
        .collect();
    Ok(text.trim().to_string())
}

fn parse_bool(text: &str) -> Option<bool> {
    const TRUE: [&str; 3] = ["true", "yes", "1"];
    const FALSE: [&str; 3] = ["false", "no", "0"];

    if TRUE.iter().any(|t| text.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if FALSE.iter().any(|f| text.eq_ignore_ascii_case(f)) {
        Some(false)
    } else {
        None
    }
}
