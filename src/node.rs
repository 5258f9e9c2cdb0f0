//! Document tree node types.
//!
//! A [`Node`] is one of:
//!
//! - [`Element`]: a tag with attributes and an ordered list of children,
//! - [`Text`]: literal text, escaped on output,
//! - [`Trusted`]: pre-built markup, emitted verbatim.
//!
//! Elements own their children, so every node has at most one parent. The
//! child list is append-only, and appending to a void element fails with
//! [`Error::InvalidStructure`].

use std::iter;

use crate::attr::{AttrValue, Attributes};
use crate::error::{Error, Result};
use crate::tags;

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(Text),
    Trusted(Trusted),
}

impl Node {
    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(Text::new(content))
    }

    /// Create a trusted (unescaped) markup node.
    pub fn trusted(markup: impl Into<String>) -> Self {
        Node::Trusted(Trusted::new(markup))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl From<Trusted> for Node {
    fn from(trusted: Trusted) -> Self {
        Node::Trusted(trusted)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::text(s)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::text(s)
    }
}

impl From<&String> for Node {
    fn from(s: &String) -> Self {
        Node::text(s.as_str())
    }
}

/// Literal text content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text(String);

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Text(content.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Pre-built markup that is emitted without escaping.
///
/// Use this for HTML that is already escaped or comes from a trusted
/// generator. It does not represent a tag and never has children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trusted(String);

impl Trusted {
    pub fn new(markup: impl Into<String>) -> Self {
        Trusted(markup.into())
    }

    /// Concatenate several markup fragments as-is.
    ///
    /// ```
    /// use tagtree::Trusted;
    ///
    /// let t = Trusted::concat(["<em>a</em>", "<em>b</em>"]);
    /// assert_eq!(t.as_str(), "<em>a</em><em>b</em>");
    /// ```
    pub fn concat<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut markup = String::new();
        for fragment in fragments {
            markup.push_str(fragment.as_ref());
        }
        Trusted(markup)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An HTML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Attributes,
    children: Vec<Node>,
    void: bool,
    raw_content: bool,
}

impl Element {
    /// Create an element, taking its `void`/`raw_content` flags from the tag
    /// table. Unknown tags are ordinary elements.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let void = tags::is_void(&tag);
        let raw_content = tags::is_raw_content(&tag);
        empty_element(tag, void, raw_content)
    }

    /// Create an element with explicit flags, for tags the table doesn't know
    /// about or to override it.
    pub fn with_flags(tag: impl Into<String>, void: bool, raw_content: bool) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
            void,
            raw_content,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_void(&self) -> bool {
        self.void
    }

    pub fn is_raw_content(&self) -> bool {
        self.raw_content
    }

    /// Set an attribute. See [`crate::attr`] for name and value rules.
    pub fn with_attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.attributes.set(name, value);
        self
    }

    /// Set several attributes in order.
    pub fn with_attrs<I, K, V>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<AttrValue>,
    {
        self.attributes.extend(attrs);
        self
    }

    /// Append a child, consuming and returning the element.
    pub fn with_child(mut self, child: impl Into<Node>) -> Result<Self> {
        self.append(child)?;
        Ok(self)
    }

    /// Append several children in order.
    ///
    /// Stops at the first failure; for a void element that is the first child.
    pub fn with_children<I, N>(mut self, children: I) -> Result<Self>
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        for child in children {
            self.append(child)?;
        }
        Ok(self)
    }

    /// Append a child as the last one.
    pub fn append(&mut self, child: impl Into<Node>) -> Result<()> {
        if self.void {
            return Err(Error::void_element(&self.tag));
        }
        self.children.push(child.into());
        Ok(())
    }
}

/// Generic element factory that every named constructor delegates to.
///
/// Fails with [`Error::InvalidStructure`] if `void` is set and `children` is
/// non-empty.
///
/// ```
/// use tagtree::{AttrValue, make_element};
///
/// let input = make_element(
///     "input",
///     true,
///     false,
///     Vec::<&str>::new(),
///     [("type", AttrValue::from("checkbox")), ("checked", AttrValue::from(true))],
/// )?;
/// assert_eq!(input.serialize(false), r#"<input type="checkbox" checked />"#);
/// # Ok::<(), tagtree::Error>(())
/// ```
pub fn make_element<C, N, A, K, V>(
    tag: impl Into<String>,
    void: bool,
    raw_content: bool,
    children: C,
    attributes: A,
) -> Result<Element>
where
    C: IntoIterator<Item = N>,
    N: Into<Node>,
    A: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<AttrValue>,
{
    Element::with_flags(tag, void, raw_content)
        .with_attrs(attributes)
        .with_children(children)
}

/// [`make_element`] with no children and no attributes. Cannot fail: the
/// void check only rejects children.
pub(crate) fn empty_element(tag: impl Into<String>, void: bool, raw_content: bool) -> Element {
    match make_element(
        tag,
        void,
        raw_content,
        iter::empty::<Node>(),
        iter::empty::<(&str, AttrValue)>(),
    ) {
        Ok(element) => element,
        Err(err) => unreachable!("element without children was rejected: {err}"),
    }
}

/// Build a `Vec<Node>` from a mix of elements, strings and trusted markup.
///
/// ```
/// use tagtree::{nodes, elements::a};
///
/// let children = nodes!["Hello, ", a().with_child("world")?, "!"];
/// assert_eq!(children.len(), 3);
/// # Ok::<(), tagtree::Error>(())
/// ```
#[macro_export]
macro_rules! nodes {
    ($($node:expr),* $(,)?) => {
        vec![$($crate::Node::from($node)),*]
    };
}
