//! XML-to-JSON decoding for the upstream feed payload.
//!
//! The decoder produces a generic nested tree rather than typed structs:
//! the upstream schema is not ours and may change without notice. Three
//! normalizations are applied while building the tree:
//!
//! - namespace prefixes are stripped from element and attribute names
//!   (`ns1:alert` becomes `alert`),
//! - attributes become ordinary fields of the element's mapping,
//! - an element with one child of a given tag nests a mapping, while
//!   repeated same-tag children become an ordered sequence.
//!
//! The single-vs-sequence shape ambiguity is inherent to this mapping and
//! is resolved downstream by the normalizer, not here.

use roxmltree::{Document, Node};
use serde_json::{Map, Value};

use crate::error::FeedError;

/// Key that carries an element's text when it also has attributes or
/// child elements.
const TEXT_KEY: &str = "_";

/// Decode a raw XML payload into a generic JSON tree.
///
/// The root element appears as the single top-level key of the returned
/// object, mirroring the upstream document shape (`alerts` wrapping
/// `alert` entries).
///
/// # Errors
///
/// Returns [`FeedError::Decode`] if the payload is not well-formed XML
/// (unclosed tags, invalid entities). Callers treat that as "no update
/// this cycle".
pub fn decode(raw: &str) -> Result<Value, FeedError> {
    let doc = Document::parse(raw).map_err(|e| FeedError::Decode(e.to_string()))?;
    let root = doc.root_element();

    let mut tree = Map::new();
    tree.insert(root.tag_name().name().to_string(), element_to_value(root));
    Ok(Value::Object(tree))
}

/// Convert one element into a JSON value.
///
/// A text-only element becomes a plain string. Anything with attributes
/// or child elements becomes a mapping; non-empty text alongside those is
/// kept under [`TEXT_KEY`].
fn element_to_value(node: Node<'_, '_>) -> Value {
    let mut map = Map::new();

    // tag_name().name() and attr.name() are local names, so namespace
    // prefixes are already gone.
    for attr in node.attributes() {
        map.insert(
            attr.name().to_string(),
            Value::String(attr.value().to_string()),
        );
    }

    // Group element children by tag, preserving first-seen order.
    let mut children: Vec<(String, Vec<Value>)> = Vec::new();
    for child in node.children().filter(Node::is_element) {
        let name = child.tag_name().name().to_string();
        let value = element_to_value(child);
        match children.iter_mut().find(|(tag, _)| *tag == name) {
            Some((_, values)) => values.push(value),
            None => children.push((name, vec![value])),
        }
    }

    let text: String = node
        .children()
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .collect();
    let text = text.trim();

    if children.is_empty() && map.is_empty() {
        return Value::String(text.to_string());
    }

    if !text.is_empty() {
        map.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
    }

    for (name, mut values) in children {
        let value = if values.len() == 1 {
            values.pop().unwrap_or(Value::Null)
        } else {
            Value::Array(values)
        };
        map.insert(name, value);
    }

    Value::Object(map)
}
