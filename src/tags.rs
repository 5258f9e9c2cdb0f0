//! Static table of known HTML tags.
//!
//! The named constructors in [`crate::elements`] are generated from the same
//! list as [`TAGS`], and [`crate::Element::new`] resolves its `void` and
//! `raw_content` flags here. Tags not in the table are ordinary elements.

/// Serialization flags for a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSpec {
    pub name: &'static str,
    /// Self-closing, can never have children.
    pub void: bool,
    /// Text children are emitted without escaping.
    pub raw_content: bool,
}

/// Build the [`TagSpec`] for one tag entry.
macro_rules! tag_spec {
    ($name:literal) => {
        $crate::tags::TagSpec { name: $name, void: false, raw_content: false }
    };
    ($name:literal void) => {
        $crate::tags::TagSpec { name: $name, void: true, raw_content: false }
    };
    ($name:literal raw) => {
        $crate::tags::TagSpec { name: $name, void: false, raw_content: true }
    };
}

pub(crate) use tag_spec;

/// The tag list, sorted by name. Invokes `$callback!` with one
/// `fn_name => "tag" [: void | raw]` entry per tag; the static table and the
/// named constructors in [`crate::elements`] are both generated from it.
macro_rules! for_each_tag {
    ($callback:ident) => {
        $callback! {
            a => "a",
            abbr => "abbr",
            address => "address",
            area => "area": void,
            article => "article",
            aside => "aside",
            audio => "audio",
            b => "b",
            base => "base": void,
            bdi => "bdi",
            bdo => "bdo",
            blockquote => "blockquote",
            body => "body",
            br => "br": void,
            button => "button",
            canvas => "canvas",
            caption => "caption",
            cite => "cite",
            code => "code",
            col => "col": void,
            colgroup => "colgroup",
            data => "data",
            datalist => "datalist",
            dd => "dd",
            del => "del",
            details => "details",
            dfn => "dfn",
            dialog => "dialog",
            div => "div",
            dl => "dl",
            dt => "dt",
            em => "em",
            embed => "embed": void,
            fieldset => "fieldset",
            figcaption => "figcaption",
            figure => "figure",
            footer => "footer",
            form => "form",
            h1 => "h1",
            h2 => "h2",
            h3 => "h3",
            h4 => "h4",
            h5 => "h5",
            h6 => "h6",
            head => "head",
            header => "header",
            hgroup => "hgroup",
            hr => "hr": void,
            html => "html",
            i => "i",
            iframe => "iframe",
            img => "img": void,
            input => "input": void,
            ins => "ins",
            kbd => "kbd",
            label => "label",
            legend => "legend",
            li => "li",
            link => "link": void,
            main => "main",
            map => "map",
            mark => "mark",
            menu => "menu",
            meta => "meta": void,
            meter => "meter",
            nav => "nav",
            noscript => "noscript",
            object => "object",
            ol => "ol",
            optgroup => "optgroup",
            option => "option",
            output => "output",
            p => "p",
            picture => "picture",
            pre => "pre",
            progress => "progress",
            q => "q",
            rp => "rp",
            rt => "rt",
            ruby => "ruby",
            s => "s",
            samp => "samp",
            script => "script": raw,
            search => "search",
            section => "section",
            select => "select",
            slot => "slot",
            small => "small",
            source => "source": void,
            span => "span",
            strong => "strong",
            style => "style": raw,
            sub => "sub",
            summary => "summary",
            sup => "sup",
            table => "table",
            tbody => "tbody",
            td => "td",
            template => "template",
            textarea => "textarea",
            tfoot => "tfoot",
            th => "th",
            thead => "thead",
            time => "time",
            title => "title",
            tr => "tr",
            track => "track": void,
            u => "u",
            ul => "ul",
            var => "var",
            video => "video",
            wbr => "wbr": void,
        }
    };
}

pub(crate) use for_each_tag;

macro_rules! tag_table {
    ($($fn_name:ident => $name:literal $(: $kind:ident)?),* $(,)?) => {
        /// All known tags, sorted by name.
        pub static TAGS: &[TagSpec] = &[
            $(tag_spec!($name $($kind)?),)*
        ];
    };
}

for_each_tag!(tag_table);

/// Look up a tag by name. Matching is exact; tag names are lowercase.
pub fn lookup(name: &str) -> Option<&'static TagSpec> {
    TAGS.binary_search_by(|spec| spec.name.cmp(name))
        .ok()
        .map(|idx| &TAGS[idx])
}

/// Whether `name` is a void element.
pub fn is_void(name: &str) -> bool {
    lookup(name).is_some_and(|spec| spec.void)
}

/// Whether `name` is a raw-content element (`script`, `style`).
pub fn is_raw_content(name: &str) -> bool {
    lookup(name).is_some_and(|spec| spec.raw_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_and_unique() {
        for pair in TAGS.windows(2) {
            assert!(
                pair[0].name < pair[1].name,
                "{} must sort before {}",
                pair[0].name,
                pair[1].name
            );
        }
    }

    #[test]
    fn test_void_elements() {
        for tag in [
            "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
            "track", "wbr",
        ] {
            assert!(is_void(tag), "{tag} should be void");
        }
        assert!(!is_void("div"));
        assert!(!is_void("custom-widget"));
    }

    #[test]
    fn test_raw_content_elements() {
        assert!(is_raw_content("script"));
        assert!(is_raw_content("style"));
        assert!(!is_raw_content("textarea"));
        assert!(!is_raw_content("title"));
    }

    #[test]
    fn test_no_tag_is_both_void_and_raw() {
        assert!(TAGS.iter().all(|spec| !(spec.void && spec.raw_content)));
    }

    #[test]
    fn test_lookup_unknown() {
        assert_eq!(lookup("blink"), None);
        assert_eq!(lookup("DIV"), None);
    }
}
