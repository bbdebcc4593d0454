//! Token model shared by the tokenizer, the policy filter and the serializer.

use std::borrow::Cow;

/// A single attribute on a start tag.
///
/// Attributes are kept as an ordered sequence, not a map: output order is
/// observable and must match source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

/// One unit of tokenized HTML.
///
/// Tag and attribute names are lowercase (HTML5 tokenization lowercases
/// them) and character references are already decoded in both character
/// data and attribute values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    StartTag {
        name: String,
        attrs: Vec<Attr>,
        self_closing: bool,
    },
    EndTag {
        name: String,
    },
    Characters(String),
    Comment(String),
    Doctype {
        name: Option<String>,
        public_id: Option<String>,
        system_id: Option<String>,
    },
    /// Recoverable tokenization defect. Carried for observability; the
    /// serializer emits nothing for it.
    ParseError(Cow<'static, str>),
}

/// Void elements: emitted without an end tag, per the HTML serialization
/// algorithm.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose content the tokenizer treats as raw text (or RCDATA)
/// rather than markup. Their character data can never contain child tags.
const RAWTEXT_ELEMENTS: &[&str] = &[
    "script", "style", "title", "textarea", "xmp", "iframe", "noembed", "noframes",
];

/// Whether `name` (lowercase) is a void element.
pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Whether `name` (lowercase) is a raw-text element.
pub fn is_rawtext(name: &str) -> bool {
    RAWTEXT_ELEMENTS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_elements() {
        assert!(is_void("br"));
        assert!(is_void("img"));
        assert!(!is_void("p"));
        assert!(!is_void("script"));
    }

    #[test]
    fn test_rawtext_elements() {
        assert!(is_rawtext("script"));
        assert!(is_rawtext("style"));
        assert!(!is_rawtext("p"));
        assert!(!is_rawtext("noscript"));
    }
}
