//! Attribute values, name normalization and encoding.
//!
//! Attribute names are supplied in "identifier form" and normalized before
//! they are stored:
//!
//! - a single trailing underscore is stripped, so reserved words can be used
//!   (`class_` → `class`, `for_` → `for`, `type_` → `type`),
//! - remaining underscores become hyphens (`data_user_id` → `data-user-id`).
//!
//! Values are a small tagged type decided at the conversion boundary:
//! `true` renders as a bare token, `false` and `None` omit the attribute, and
//! everything else renders as an escaped, double-quoted string.

use std::borrow::Cow;
use std::fmt;

use crate::escape;

/// The value of a single attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Omitted from output (`false` / `None`).
    Absent,
    /// Rendered as the bare attribute name (`true`).
    Bare,
    /// Rendered as `name="value"` with the value escaped.
    Text(String),
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        if value { AttrValue::Bare } else { AttrValue::Absent }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        AttrValue::Text(value.clone())
    }
}

impl From<Cow<'_, str>> for AttrValue {
    fn from(value: Cow<'_, str>) -> Self {
        AttrValue::Text(value.into_owned())
    }
}

impl From<char> for AttrValue {
    fn from(value: char) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttrValue::Absent, Into::into)
    }
}

macro_rules! attr_value_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    AttrValue::Text(value.to_string())
                }
            }
        )*
    };
}

attr_value_from_display!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Normalize an identifier-form attribute name to its HTML spelling.
///
/// # Examples
///
/// ```
/// use tagtree::normalize_attr_name;
///
/// assert_eq!(normalize_attr_name("class_"), "class");
/// assert_eq!(normalize_attr_name("data_user_id"), "data-user-id");
/// assert_eq!(normalize_attr_name("href"), "href");
/// ```
pub fn normalize_attr_name(name: &str) -> Cow<'_, str> {
    let name = name.strip_suffix('_').unwrap_or(name);
    if name.contains('_') {
        Cow::Owned(name.replace('_', "-"))
    } else {
        Cow::Borrowed(name)
    }
}

/// The rendered form of one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedAttr<'a> {
    Omitted,
    Bare(Cow<'a, str>),
    Pair(Cow<'a, str>, Cow<'a, str>),
}

impl fmt::Display for EncodedAttr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodedAttr::Omitted => Ok(()),
            EncodedAttr::Bare(name) => f.write_str(name),
            EncodedAttr::Pair(name, value) => write!(f, "{name}=\"{value}\""),
        }
    }
}

/// Encode a single attribute.
///
/// The name is normalized and a text value is escaped. De-duplication is not
/// done here; see [`Attributes`].
pub fn encode<'a>(name: &'a str, value: &'a AttrValue) -> EncodedAttr<'a> {
    match value {
        AttrValue::Absent => EncodedAttr::Omitted,
        AttrValue::Bare => EncodedAttr::Bare(normalize_attr_name(name)),
        AttrValue::Text(text) => {
            EncodedAttr::Pair(normalize_attr_name(name), escape::escape_attr(text))
        }
    }
}

/// Ordered attribute map keyed by normalized name.
///
/// Setting a name that is already present replaces its value in place, so the
/// last assignment wins while the position of the first one is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, AttrValue)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, normalizing its name.
    pub fn set(&mut self, name: &str, value: impl Into<AttrValue>) {
        let name = normalize_attr_name(name);
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.into_owned(), value)),
        }
    }

    /// Look up an attribute by name (identifier or HTML form).
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        let name = normalize_attr_name(name);
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Append every rendered attribute to `out`, each preceded by a space.
    pub(crate) fn write_into(&self, out: &mut String) {
        for (name, value) in &self.entries {
            match encode(name, value) {
                EncodedAttr::Omitted => {}
                EncodedAttr::Bare(name) => {
                    out.push(' ');
                    out.push_str(&name);
                }
                EncodedAttr::Pair(name, value) => {
                    out.push(' ');
                    out.push_str(&name);
                    out.push_str("=\"");
                    out.push_str(&value);
                    out.push('"');
                }
            }
        }
    }
}

impl<K: AsRef<str>, V: Into<AttrValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        attrs.extend(iter);
        attrs
    }
}

impl<K: AsRef<str>, V: Into<AttrValue>> Extend<(K, V)> for Attributes {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set(name.as_ref(), value);
        }
    }
}
