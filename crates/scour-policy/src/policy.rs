//! Allow-list policy values
//!
//! A `Policy` is an immutable triple of allow-lists: element names,
//! attribute names (one global list, not per-element ACLs) and CSS property
//! names permitted inside a `style` attribute. Two built-ins ship with the
//! crate; everything else is caller-defined.

use std::collections::HashSet;

/// Broad content-authoring allow-list. Good for articles and posts by
/// known authors. `iframe` and `object` are excluded, so embedded videos
/// are out by default; images and figures are in.
const GENERAL_ELEMENTS: &[&str] = &[
    "a",
    "abbr",
    "acronym",
    "address",
    "article",
    "aside",
    "b",
    "bdi",
    "bdo",
    "big",
    "blockquote",
    "br",
    "caption",
    "center",
    "cite",
    "code",
    "col",
    "colgroup",
    "data",
    "dd",
    "del",
    "dfn",
    "dir",
    "div",
    "dl",
    "dt",
    "em",
    "figcaption",
    "figure",
    "font",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hr",
    "i",
    "img",
    "ins",
    "kbd",
    "li",
    "mark",
    "nav",
    "ol",
    "p",
    "pre",
    "q",
    "rp",
    "rt",
    "ruby",
    "s",
    "samp",
    "section",
    "small",
    "span",
    "strike",
    "strong",
    "sub",
    "sup",
    "table",
    "tbody",
    "td",
    "time",
    "tfoot",
    "th",
    "thead",
    "tr",
    "u",
    "ul",
    "var",
    "wbr",
];

const GENERAL_ATTRIBUTES: &[&str] = &[
    "abbr",
    "align",
    "alt",
    "axis",
    "border",
    "cellpadding",
    "cellspacing",
    "char",
    "charoff",
    "charset",
    "cite",
    "cols",
    "colspan",
    "datetime",
    "dir",
    "frame",
    "headers",
    "height",
    "href",
    "hreflang",
    "hspace",
    "lang",
    "longdesc",
    "name",
    "nohref",
    "noshade",
    "nowrap",
    "rel",
    "rev",
    "rows",
    "rowspan",
    "rules",
    "scope",
    "span",
    "style",
    "src",
    "start",
    "summary",
    "title",
    "type",
    "valign",
    "vspace",
    "width",
];

/// Minimal allow-list for site guests and unknown, untrusted sources.
const RESTRICTED_ELEMENTS: &[&str] = &[
    "a",
    "abbr",
    "blockquote",
    "br",
    "code",
    "em",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hr",
    "figcaption",
    "figure",
    "img",
    "li",
    "ol",
    "p",
    "pre",
    "span",
    "strike",
    "strong",
    "sub",
    "sup",
    "u",
    "ul",
];

const RESTRICTED_ATTRIBUTES: &[&str] = &[
    "alt", "cite", "height", "href", "span", "style", "src", "title", "width",
];

/// Both built-ins share this list. Deliberately narrow: nothing that loads
/// external resources or escapes layout containment (`position`,
/// `background`, `content` are all out).
const DEFAULT_CSS_PROPERTIES: &[&str] = &[
    "text-decoration",
    "font-style",
    "font-weight",
    "text-justify",
    "text-align",
    "color",
];

/// An immutable sanitization allow-list.
///
/// Construction is the only time the lists are populated; a `Policy` is
/// freely shared across concurrent sanitize calls.
#[derive(Debug, Clone)]
pub struct Policy {
    elements: HashSet<String>,
    attributes: HashSet<String>,
    css_properties: HashSet<String>,
}

impl Policy {
    /// Build a policy from three allow-lists. Names are normalized to
    /// lowercase; construction cannot fail.
    pub fn new<E, A, C>(elements: E, attributes: A, css_properties: C) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        fn normalize<I>(names: I) -> HashSet<String>
        where
            I: IntoIterator,
            I::Item: AsRef<str>,
        {
            names
                .into_iter()
                .map(|name| name.as_ref().to_ascii_lowercase())
                .collect()
        }

        Self {
            elements: normalize(elements),
            attributes: normalize(attributes),
            css_properties: normalize(css_properties),
        }
    }

    /// The general-purpose built-in policy.
    pub fn general() -> Self {
        Self::new(GENERAL_ELEMENTS, GENERAL_ATTRIBUTES, DEFAULT_CSS_PROPERTIES)
    }

    /// The restricted built-in policy for untrusted submitters.
    pub fn restricted() -> Self {
        Self::new(
            RESTRICTED_ELEMENTS,
            RESTRICTED_ATTRIBUTES,
            DEFAULT_CSS_PROPERTIES,
        )
    }

    pub fn allows_element(&self, name: &str) -> bool {
        self.elements.contains(&name.to_ascii_lowercase())
    }

    pub fn allows_attribute(&self, name: &str) -> bool {
        self.attributes.contains(&name.to_ascii_lowercase())
    }

    pub fn allows_css_property(&self, name: &str) -> bool {
        self.css_properties.contains(&name.to_ascii_lowercase())
    }
}
