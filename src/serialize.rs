//! HTML serialization.
//!
//! Walks a finished tree and produces markup text. Serialization never
//! mutates the tree and cannot fail: the structural invariants (no children
//! under void elements) are enforced when nodes are attached.
//!
//! Output rules:
//!
//! - text is escaped (`&`, `<`, `>`), trusted markup is copied verbatim,
//! - attributes render in insertion order via [`crate::attr::encode`],
//! - void elements always self-close as `<tag ... />`,
//! - other elements always get an explicit end tag, even when empty,
//! - text directly inside raw-content elements (`script`, `style`) is not
//!   escaped.
//!
//! # Example
//!
//! ```
//! use tagtree::{SerializeConfig, Serializer};
//! use tagtree::elements::{body, head, html, title};
//!
//! let page = html()
//!     .with_child(head().with_child(title().with_child("T")?)?)?
//!     .with_child(body())?;
//!
//! let doc = Serializer::new().serialize(&page);
//! assert_eq!(doc, "<!DOCTYPE html><html><head><title>T</title></head><body></body></html>");
//!
//! let fragment = Serializer::new()
//!     .with_config(SerializeConfig { prepend_doctype: false, ..Default::default() })
//!     .serialize(&page);
//! assert_eq!(fragment, "<html><head><title>T</title></head><body></body></html>");
//! # Ok::<(), tagtree::Error>(())
//! ```

use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::escape;
use crate::node::{Element, Node, Text, Trusted};

/// The HTML5 doctype.
pub const DOCTYPE: &str = "<!DOCTYPE html>";

/// Configuration for serialization.
#[derive(Debug, Clone)]
pub struct SerializeConfig {
    /// Emit the doctype before the serialized node. Default is true.
    pub prepend_doctype: bool,
    /// Doctype text to emit. Default is [`DOCTYPE`].
    pub doctype: Cow<'static, str>,
}

impl Default for SerializeConfig {
    fn default() -> Self {
        Self {
            prepend_doctype: true,
            doctype: Cow::Borrowed(DOCTYPE),
        }
    }
}

/// Anything that can be rendered as markup.
pub trait Render {
    /// Append this node's markup to `out`.
    fn render_into(&self, out: &mut String);
}

impl Render for Text {
    fn render_into(&self, out: &mut String) {
        escape::push_text(out, self.as_str());
    }
}

impl Render for Trusted {
    fn render_into(&self, out: &mut String) {
        out.push_str(self.as_str());
    }
}

impl Render for Element {
    fn render_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag());
        self.attributes().write_into(out);

        if self.is_void() {
            out.push_str(" />");
            return;
        }
        out.push('>');

        for child in self.children() {
            match child {
                Node::Text(text) if self.is_raw_content() => out.push_str(text.as_str()),
                other => other.render_into(out),
            }
        }

        out.push_str("</");
        out.push_str(self.tag());
        out.push('>');
    }
}

impl Render for Node {
    fn render_into(&self, out: &mut String) {
        match self {
            Node::Element(el) => el.render_into(out),
            Node::Text(text) => text.render_into(out),
            Node::Trusted(trusted) => trusted.render_into(out),
        }
    }
}

/// Serializer for document trees.
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    config: SerializeConfig,
}

impl Serializer {
    /// Create a serializer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the serializer with custom settings.
    pub fn with_config(mut self, config: SerializeConfig) -> Self {
        self.config = config;
        self
    }

    /// Serialize a node to a string.
    pub fn serialize<R: Render + ?Sized>(&self, node: &R) -> String {
        let mut out = String::new();
        if self.config.prepend_doctype {
            out.push_str(&self.config.doctype);
        }
        node.render_into(&mut out);
        out
    }

    /// Serialize a node into any writer.
    pub fn write_to<R: Render + ?Sized, W: Write>(&self, node: &R, mut writer: W) -> io::Result<()> {
        writer.write_all(self.serialize(node).as_bytes())?;
        writer.flush()
    }
}

/// Serialize `node` with the default configuration and write it to `path`.
///
/// I/O failures are returned unchanged as [`crate::Error::Io`].
pub fn write<R: Render + ?Sized>(node: &R, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let html = Serializer::new().serialize(node);
    debug!(path = %path.display(), bytes = html.len(), "writing document");
    std::fs::write(path, html)?;
    Ok(())
}

fn serialize_with<R: Render + ?Sized>(node: &R, prepend_doctype: bool) -> String {
    Serializer::new()
        .with_config(SerializeConfig {
            prepend_doctype,
            ..Default::default()
        })
        .serialize(node)
}

impl Node {
    /// Serialize this node, optionally preceded by `<!DOCTYPE html>`.
    pub fn serialize(&self, prepend_doctype: bool) -> String {
        serialize_with(self, prepend_doctype)
    }

    /// Serialize this node with a doctype and write it to `path`.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        write(self, path)
    }
}

impl Element {
    /// Serialize this element, optionally preceded by `<!DOCTYPE html>`.
    pub fn serialize(&self, prepend_doctype: bool) -> String {
        serialize_with(self, prepend_doctype)
    }

    /// Serialize this element with a doctype and write it to `path`.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        write(self, path)
    }
}

macro_rules! display_via_render {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    let mut out = String::new();
                    self.render_into(&mut out);
                    f.write_str(&out)
                }
            }
        )*
    };
}

display_via_render!(Node, Element, Text, Trusted);
