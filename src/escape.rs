//! HTML escaping for text content and attribute values.
//!
//! Both escapers return `Cow<str>` so strings without special characters are
//! passed through without allocation. The first byte needing an entity is
//! located with `memchr`; everything before it is copied in one slice.

use std::borrow::Cow;

use memchr::{memchr2, memchr3};

fn text_entity(b: u8) -> Option<&'static str> {
    match b {
        b'&' => Some("&amp;"),
        b'<' => Some("&lt;"),
        b'>' => Some("&gt;"),
        _ => None,
    }
}

fn attr_entity(b: u8) -> Option<&'static str> {
    match b {
        b'"' => Some("&quot;"),
        b'\'' => Some("&#x27;"),
        _ => text_entity(b),
    }
}

fn first_attr_special(bytes: &[u8]) -> Option<usize> {
    match (memchr3(b'&', b'<', b'>', bytes), memchr2(b'"', b'\'', bytes)) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Append `s` to `out`, replacing every byte for which `entity` returns a
/// replacement. All special bytes are ASCII, so slicing at them never splits a
/// UTF-8 sequence.
fn escape_into(out: &mut String, s: &str, entity: fn(u8) -> Option<&'static str>) {
    let mut last = 0;
    for (i, b) in s.bytes().enumerate() {
        if let Some(replacement) = entity(b) {
            out.push_str(&s[last..i]);
            out.push_str(replacement);
            last = i + 1;
        }
    }
    out.push_str(&s[last..]);
}

/// Escape text content.
///
/// Replaces `&`, `<` and `>`. Quote characters are left alone since they have
/// no meaning outside attribute values.
///
/// # Examples
///
/// ```
/// use tagtree::escape_text;
///
/// assert_eq!(escape_text("a < b && c"), "a &lt; b &amp;&amp; c");
/// assert_eq!(escape_text(r#"say "hi""#), r#"say "hi""#);
/// ```
pub fn escape_text(s: &str) -> Cow<'_, str> {
    match memchr3(b'&', b'<', b'>', s.as_bytes()) {
        None => Cow::Borrowed(s),
        Some(first) => {
            let mut out = String::with_capacity(s.len() + 16);
            out.push_str(&s[..first]);
            escape_into(&mut out, &s[first..], text_entity);
            Cow::Owned(out)
        }
    }
}

/// Escape a double-quoted attribute value.
///
/// Replaces `&`, `<`, `>`, `"` and `'`.
///
/// # Examples
///
/// ```
/// use tagtree::escape_attr;
///
/// assert_eq!(escape_attr(r#"x"y"#), "x&quot;y");
/// ```
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    match first_attr_special(s.as_bytes()) {
        None => Cow::Borrowed(s),
        Some(first) => {
            let mut out = String::with_capacity(s.len() + 16);
            out.push_str(&s[..first]);
            escape_into(&mut out, &s[first..], attr_entity);
            Cow::Owned(out)
        }
    }
}

pub(crate) fn push_text(out: &mut String, s: &str) {
    out.push_str(&escape_text(s));
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escape_text_plain_is_borrowed() {
        assert!(matches!(escape_text("Hello, world"), Cow::Borrowed(_)));
        assert!(matches!(escape_attr("container"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("<script>"), "&lt;script&gt;");
        assert_eq!(escape_text("a & b"), "a &amp; b");
        assert_eq!(escape_text("it's \"fine\""), "it's \"fine\"");
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr(r#"a "quoted" value"#), "a &quot;quoted&quot; value");
        assert_eq!(escape_attr("it's"), "it&#x27;s");
        assert_eq!(escape_attr("?q=1&x=<2>"), "?q=1&amp;x=&lt;2&gt;");
    }

    #[test]
    fn test_escape_is_applied_once() {
        // Already-escaped input is escaped again, never recognized
        assert_eq!(escape_text("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_escape_preserves_multibyte() {
        assert_eq!(escape_text("héllo <wörld>"), "héllo &lt;wörld&gt;");
        assert_eq!(escape_attr("日本\"語"), "日本&quot;語");
    }

    proptest! {
        #[test]
        fn prop_escaped_text_has_no_markup(s in ".*") {
            let escaped = escape_text(&s);
            prop_assert!(!escaped.contains('<'));
            prop_assert!(!escaped.contains('>'));
            // Every ampersand starts one of the three entities we emit
            for (i, _) in escaped.match_indices('&') {
                let rest = &escaped[i..];
                prop_assert!(
                    rest.starts_with("&amp;") || rest.starts_with("&lt;") || rest.starts_with("&gt;")
                );
            }
        }

        #[test]
        fn prop_escaped_attr_has_no_quotes(s in ".*") {
            let escaped = escape_attr(&s);
            prop_assert!(!escaped.contains('"'));
            prop_assert!(!escaped.contains('\''));
            prop_assert!(!escaped.contains('<'));
        }

        #[test]
        fn prop_escape_text_reversible(s in ".*") {
            let escaped = escape_text(&s);
            let restored = escaped
                .replace("&lt;", "<")
                .replace("&gt;", ">")
                .replace("&amp;", "&");
            prop_assert_eq!(restored, s);
        }
    }
}
