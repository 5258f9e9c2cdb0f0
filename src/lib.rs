//! # tagtree
//!
//! Build HTML document trees in Rust and serialize them with correct escaping.
//!
//! ## Features
//!
//! - One constructor per HTML tag, all backed by a single [`make_element`] factory
//! - Nesting by argument (`with_child`) or by scoped blocks ([`BuildContext`])
//! - Text escaped on output; [`Trusted`] markup emitted verbatim
//! - Void elements self-close and reject children; `script`/`style` content is
//!   not escaped
//!
//! ## Quick Start
//!
//! ```
//! use tagtree::elements::{a, div};
//! use tagtree::nodes;
//!
//! let el = div()
//!     .with_attr("class_", "container")
//!     .with_children(nodes![
//!         "Hello, ",
//!         a().with_attr("href", "https://example.com").with_child("world")?,
//!         "!",
//!     ])?;
//!
//! assert_eq!(
//!     el.serialize(false),
//!     r#"<div class="container">Hello, <a href="https://example.com">world</a>!</div>"#
//! );
//! # Ok::<(), tagtree::Error>(())
//! ```
//!
//! ## Scoped Blocks
//!
//! The same tree, declared with block structure:
//!
//! ```
//! use tagtree::BuildContext;
//! use tagtree::elements::{a, div};
//!
//! let el = BuildContext::build(div().with_attr("class_", "container"), |cx| {
//!     cx.add("Hello, ")?;
//!     {
//!         let mut link = cx.enter_scope(a().with_attr("href", "https://example.com"))?;
//!         link.add("world")?;
//!     }
//!     cx.add("!")
//! })?;
//!
//! assert_eq!(
//!     el.serialize(false),
//!     r#"<div class="container">Hello, <a href="https://example.com">world</a>!</div>"#
//! );
//! # Ok::<(), tagtree::Error>(())
//! ```

pub mod attr;
pub mod context;
pub mod elements;
pub mod error;
pub mod escape;
#[cfg(feature = "json")]
pub mod json;
pub mod node;
pub mod serialize;
pub mod tags;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use attr::{AttrValue, Attributes, EncodedAttr, encode, normalize_attr_name};
pub use context::{BuildContext, Scope, ScopeId};
pub use error::{Error, Result};
pub use escape::{escape_attr, escape_text};
pub use node::{Element, Node, Text, Trusted, make_element};
pub use serialize::{DOCTYPE, Render, SerializeConfig, Serializer, write};
pub use tags::TagSpec;
