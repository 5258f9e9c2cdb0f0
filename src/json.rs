//! Build trees from JSON document descriptions.
//!
//! A node is described as one of:
//!
//! - a JSON string: a text node,
//! - `{"raw": "..."}` or `{"raw": ["...", "..."]}`: trusted markup,
//! - `{"tag": "div", "attrs": {...}, "children": [...]}`: an element.
//!
//! Elements take their flags from the tag table unless `"void"` or
//! `"raw_content"` is given explicitly. Attribute values may be strings,
//! numbers, booleans or `null` (same as `false`); attribute order follows the
//! document.
//!
//! ```
//! use tagtree::json::from_json;
//!
//! let node = from_json(r#"
//!     {"tag": "p", "attrs": {"class_": "lead"}, "children": ["a < b", {"raw": "<br />"}]}
//! "#)?;
//! assert_eq!(node.serialize(false), r#"<p class="lead">a &lt; b<br /></p>"#);
//! # Ok::<(), tagtree::Error>(())
//! ```

use std::io::Read;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::attr::AttrValue;
use crate::error::{Error, Result};
use crate::node::{Node, Trusted, make_element};
use crate::tags;

/// Deserialized description of a node.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    Text(String),
    Raw(RawSpec),
    Element(ElementSpec),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSpec {
    raw: RawContent,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawContent {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementSpec {
    tag: String,
    #[serde(default)]
    attrs: Map<String, Value>,
    #[serde(default)]
    children: Vec<NodeSpec>,
    #[serde(default)]
    void: Option<bool>,
    #[serde(default)]
    raw_content: Option<bool>,
}

impl NodeSpec {
    /// Convert the description into a tree.
    pub fn into_node(self) -> Result<Node> {
        match self {
            NodeSpec::Text(text) => Ok(Node::text(text)),
            NodeSpec::Raw(RawSpec { raw }) => Ok(match raw {
                RawContent::One(markup) => Trusted::new(markup),
                RawContent::Many(fragments) => Trusted::concat(fragments),
            }
            .into()),
            NodeSpec::Element(spec) => spec.into_node(),
        }
    }
}

impl ElementSpec {
    fn into_node(self) -> Result<Node> {
        if self.tag.is_empty() {
            return Err(Error::InvalidDocument("element with empty tag".to_string()));
        }
        let known = tags::lookup(&self.tag);
        let void = self
            .void
            .unwrap_or_else(|| known.is_some_and(|spec| spec.void));
        let raw_content = self
            .raw_content
            .unwrap_or_else(|| known.is_some_and(|spec| spec.raw_content));

        let attrs = self
            .attrs
            .into_iter()
            .map(|(name, value)| attr_value(&self.tag, &name, value).map(|v| (name, v)))
            .collect::<Result<Vec<_>>>()?;
        let children = self
            .children
            .into_iter()
            .map(NodeSpec::into_node)
            .collect::<Result<Vec<_>>>()?;

        Ok(make_element(self.tag, void, raw_content, children, attrs)?.into())
    }
}

fn attr_value(tag: &str, name: &str, value: Value) -> Result<AttrValue> {
    match value {
        Value::Null => Ok(AttrValue::Absent),
        Value::Bool(b) => Ok(b.into()),
        Value::String(s) => Ok(s.into()),
        Value::Number(n) => Ok(n.to_string().into()),
        Value::Array(_) | Value::Object(_) => Err(Error::InvalidDocument(format!(
            "attribute `{name}` on <{tag}> must be a string, number, boolean or null"
        ))),
    }
}

/// Parse a JSON description and build the tree.
pub fn from_json(json: &str) -> Result<Node> {
    let spec: NodeSpec = serde_json::from_str(json)?;
    spec.into_node()
}

/// Read a JSON description from `reader` and build the tree.
pub fn from_reader<R: Read>(reader: R) -> Result<Node> {
    let spec: NodeSpec = serde_json::from_reader(reader)?;
    spec.into_node()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_node() {
        assert_eq!(from_json(r#""a & b""#).unwrap().serialize(false), "a &amp; b");
    }

    #[test]
    fn test_raw_fragments() {
        let node = from_json(r#"{"raw": ["<em>a</em>", "<em>b</em>"]}"#).unwrap();
        assert_eq!(node.serialize(false), "<em>a</em><em>b</em>");
    }

    #[test]
    fn test_attribute_order_and_values() {
        let node = from_json(
            r#"{"tag": "input", "attrs": {"type": "number", "min": 0, "required": true, "disabled": false, "step": null}}"#,
        )
        .unwrap();
        assert_eq!(
            node.serialize(false),
            r#"<input type="number" min="0" required />"#
        );
    }

    #[test]
    fn test_void_with_children_rejected() {
        let err = from_json(r#"{"tag": "br", "children": ["x"]}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidStructure { .. }));
    }

    #[test]
    fn test_flag_override() {
        let node = from_json(r#"{"tag": "x-icon", "void": true}"#).unwrap();
        assert_eq!(node.serialize(false), "<x-icon />");

        let node = from_json(r#"{"tag": "x-tmpl", "raw_content": true, "children": ["<b>"]}"#)
            .unwrap();
        assert_eq!(node.serialize(false), "<x-tmpl><b></x-tmpl>");
    }

    #[test]
    fn test_nested_attribute_value_rejected() {
        let err = from_json(r#"{"tag": "div", "attrs": {"data_x": [1, 2]}}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(from_json("{"), Err(Error::Json(_))));
        assert!(matches!(from_json(r#"{"nope": 1}"#), Err(Error::Json(_))));
    }

    #[test]
    fn test_from_reader() {
        let json = br#"{"tag": "p", "children": ["hi"]}"#;
        let node = from_reader(&json[..]).unwrap();
        assert_eq!(node.serialize(false), "<p>hi</p>");
    }
}
