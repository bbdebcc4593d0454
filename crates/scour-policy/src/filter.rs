//! Policy-driven token filtering
//!
//! A sequence-to-sequence transducer over the token stream: each input
//! token maps to zero or one output tokens. Parameterized by a [`Policy`]
//! value, never by type-level composition.

use scour_tokens::{Attr, Token, is_rawtext};

use crate::css;
use crate::policy::Policy;

/// Attributes whose value is a URI and therefore gets a scheme check.
const URI_ATTRIBUTES: &[&str] = &[
    "action",
    "background",
    "cite",
    "href",
    "longdesc",
    "poster",
    "src",
];

/// Schemes a URI-valued attribute may carry. Relative URIs always pass;
/// `javascript:`, `data:` and `vbscript:` are deliberately absent.
const ALLOWED_PROTOCOLS: &[&str] = &[
    "afs", "aim", "callto", "ed2k", "feed", "ftp", "gopher", "http", "https", "irc", "mailto",
    "news", "nntp", "rsync", "rtsp", "sftp", "ssh", "tag", "telnet", "urn", "webcal", "xmpp",
];

/// What to do with a tag whose element is not on the allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisallowedTags {
    /// Silently remove the tag (and, for raw-text elements, its content).
    /// The fail-closed default.
    #[default]
    Drop,
    /// Re-emit the tag as literal text so readers can see what was there.
    Escape,
}

/// Filtering knobs beyond the policy allow-lists themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterOptions {
    pub disallowed: DisallowedTags,
    /// Comments are stripped by default; their content is not inspected,
    /// so untrusted input should not carry them through.
    pub keep_comments: bool,
    /// Fragments have no doctype; document-level filtering can keep it.
    pub keep_doctype: bool,
}

/// Per-token policy filter.
///
/// The only state it carries is the skip marker for a dropped raw-text
/// element: when `<script>` is removed, the character data up to its end
/// tag goes with it.
#[derive(Debug)]
pub struct PolicyFilter<'a> {
    policy: &'a Policy,
    options: FilterOptions,
    skip_until: Option<String>,
}

impl<'a> PolicyFilter<'a> {
    pub fn new(policy: &'a Policy, options: FilterOptions) -> Self {
        Self {
            policy,
            options,
            skip_until: None,
        }
    }

    /// Apply the policy to one token. `None` means the token is dropped.
    pub fn filter(&mut self, token: Token) -> Option<Token> {
        if self.skip_until.is_some() {
            return match &token {
                Token::EndTag { name } if Some(name.as_str()) == self.skip_until.as_deref() => {
                    self.skip_until = None;
                    None
                }
                // Parse errors stay observable even inside skipped content.
                Token::ParseError(_) => Some(token),
                _ => None,
            };
        }

        match token {
            Token::StartTag {
                name,
                attrs,
                self_closing,
            } => {
                if self.policy.allows_element(&name) {
                    return Some(Token::StartTag {
                        attrs: self.filter_attrs(attrs),
                        name,
                        self_closing,
                    });
                }
                match self.options.disallowed {
                    DisallowedTags::Drop => {
                        tracing::trace!("dropping disallowed element <{name}>");
                        // The tokenizer enters the raw-text state whether or
                        // not the tag carried a self-closing flag, so the
                        // content skip must arm either way; the matching end
                        // tag or EOF terminates it.
                        if is_rawtext(&name) {
                            self.skip_until = Some(name);
                        }
                        None
                    }
                    DisallowedTags::Escape => Some(Token::Characters(literal_start_tag(
                        &name,
                        &attrs,
                        self_closing,
                    ))),
                }
            }
            Token::EndTag { name } => {
                if self.policy.allows_element(&name) {
                    Some(Token::EndTag { name })
                } else {
                    match self.options.disallowed {
                        DisallowedTags::Drop => None,
                        DisallowedTags::Escape => Some(Token::Characters(format!("</{name}>"))),
                    }
                }
            }
            Token::Characters(_) | Token::ParseError(_) => Some(token),
            Token::Comment(_) => self.options.keep_comments.then_some(token),
            Token::Doctype { .. } => self.options.keep_doctype.then_some(token),
        }
    }

    fn filter_attrs(&self, attrs: Vec<Attr>) -> Vec<Attr> {
        attrs
            .into_iter()
            .filter_map(|attr| {
                if !self.policy.allows_attribute(&attr.name) {
                    tracing::trace!("dropping disallowed attribute `{}`", attr.name);
                    return None;
                }
                if URI_ATTRIBUTES.contains(&attr.name.as_str()) && !uri_is_allowed(&attr.value) {
                    tracing::trace!(
                        "dropping `{}` with disallowed URI scheme: {}",
                        attr.name,
                        attr.value
                    );
                    return None;
                }
                if attr.name == "style" {
                    let value = css::filter_declarations(&attr.value, self.policy)?;
                    return Some(Attr {
                        name: attr.name,
                        value,
                    });
                }
                Some(attr)
            })
            .collect()
    }
}

/// Scheme check for URI-valued attributes. Entities are already decoded by
/// the tokenizer, and control characters and whitespace are stripped before
/// matching, so `java\tscript:` and `&#106;avascript:` obfuscations both
/// resolve to the real scheme.
fn uri_is_allowed(value: &str) -> bool {
    let cleaned: String = value
        .chars()
        .filter(|c| !c.is_ascii_control() && !c.is_whitespace())
        .collect();
    match cleaned.split_once(':') {
        // Relative URI.
        None => true,
        Some((scheme, _)) => {
            // A `:` after `/`, `?` or `#` is part of the path, not a scheme.
            if scheme.contains(['/', '?', '#']) {
                return true;
            }
            ALLOWED_PROTOCOLS.contains(&scheme.to_ascii_lowercase().as_str())
        }
    }
}

/// Literal source representation of a start tag, for escape mode. Values
/// are pushed raw; the serializer's single escaping pass over character
/// data is what makes the markup visible.
fn literal_start_tag(name: &str, attrs: &[Attr], self_closing: bool) -> String {
    let mut out = String::new();
    out.push('<');
    out.push_str(name);
    for attr in attrs {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        out.push_str(&attr.value);
        out.push('"');
    }
    if self_closing {
        out.push('/');
    }
    out.push('>');
    out
}
