//! Named constructors, one per HTML tag.
//!
//! Each function returns an empty [`Element`] whose flags come from the tag
//! table, ready for `with_attr` / `with_child`:
//!
//! ```
//! use tagtree::elements::{li, ul};
//!
//! let list = ul().with_children([li().with_child("one")?, li().with_child("two")?])?;
//! assert_eq!(list.to_string(), "<ul><li>one</li><li>two</li></ul>");
//! # Ok::<(), tagtree::Error>(())
//! ```

use crate::node::{Element, empty_element};
use crate::tags::{TagSpec, for_each_tag, tag_spec};

macro_rules! element_constructors {
    ($($fn_name:ident => $tag:literal $(: $kind:ident)?),* $(,)?) => {
        $(
            #[doc = concat!("Create a `<", $tag, ">` element.")]
            #[inline]
            pub fn $fn_name() -> Element {
                const SPEC: TagSpec = tag_spec!($tag $($kind)?);
                empty_element(SPEC.name, SPEC.void, SPEC.raw_content)
            }
        )*
    };
}

for_each_tag!(element_constructors);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::AttrValue;
    use crate::node::{Node, make_element};
    use crate::tags;

    #[test]
    fn test_constructor_matches_factory() {
        for (built, tag) in [(div(), "div"), (br(), "br"), (script(), "script")] {
            let spec = tags::lookup(tag).unwrap();
            let made = make_element(
                tag,
                spec.void,
                spec.raw_content,
                Vec::<Node>::new(),
                Vec::<(&str, AttrValue)>::new(),
            )
            .unwrap();
            assert_eq!(built, made);
        }
    }

    #[test]
    fn test_constructor_matches_new() {
        assert_eq!(img(), Element::new("img"));
        assert_eq!(style(), Element::new("style"));
        assert_eq!(main(), Element::new("main"));
    }

    #[test]
    fn test_constructor_flags() {
        assert!(input().is_void());
        assert!(meta().is_void());
        assert!(style().is_raw_content());
        assert!(!textarea().is_raw_content());
        assert_eq!(h3().tag(), "h3");
    }
}
