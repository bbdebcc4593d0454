//! Token-to-text serialization
//!
//! Re-emits a token stream as well-formed markup: reserved characters are
//! escaped, attribute values are always double-quoted, and an open-element
//! stack guarantees every non-void start tag gets an explicit end tag even
//! when the input stream is unbalanced (`omit_optional_tags = false`
//! semantics).

use crate::token::{Token, is_void};

/// Streaming serializer over [`Token`] values.
///
/// Output is deterministic: the same token sequence always produces
/// byte-identical text.
#[derive(Debug, Default)]
pub struct Serializer {
    out: String,
    open: Vec<String>,
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one token to the output.
    pub fn write(&mut self, token: &Token) {
        match token {
            Token::StartTag {
                name,
                attrs,
                self_closing,
            } => {
                self.out.push('<');
                self.out.push_str(name);
                for attr in attrs {
                    self.out.push(' ');
                    self.out.push_str(&attr.name);
                    self.out.push_str("=\"");
                    push_escaped(&mut self.out, &attr.value, true);
                    self.out.push('"');
                }
                self.out.push('>');
                if is_void(name) {
                    // No end tag, ever.
                } else if *self_closing {
                    // Self-closing has no meaning on non-void HTML elements;
                    // close immediately to stay well-formed.
                    self.close(name);
                } else {
                    self.open.push(name.clone());
                }
            }
            Token::EndTag { name } => {
                if is_void(name.as_str()) {
                    return;
                }
                // A stray end tag with no open counterpart is dropped; an end
                // tag for an outer element closes the inner ones first.
                if let Some(pos) = self.open.iter().rposition(|open| open == name) {
                    while self.open.len() > pos {
                        let inner = self.open.pop().unwrap_or_default();
                        self.close(&inner);
                    }
                }
            }
            Token::Characters(text) => push_escaped(&mut self.out, text, false),
            Token::Comment(text) => {
                self.out.push_str("<!--");
                self.out.push_str(text);
                self.out.push_str("-->");
            }
            Token::Doctype {
                name,
                public_id,
                system_id,
            } => {
                self.out.push_str("<!DOCTYPE");
                if let Some(name) = name {
                    self.out.push(' ');
                    self.out.push_str(name);
                }
                if let Some(public_id) = public_id {
                    self.out.push_str(" PUBLIC \"");
                    self.out.push_str(public_id);
                    self.out.push('"');
                } else if system_id.is_some() {
                    self.out.push_str(" SYSTEM");
                }
                if let Some(system_id) = system_id {
                    self.out.push_str(" \"");
                    self.out.push_str(system_id);
                    self.out.push('"');
                }
                self.out.push('>');
            }
            Token::ParseError(info) => {
                tracing::trace!("skipping parse error token: {info}");
            }
        }
    }

    /// Close any still-open elements and return the output text.
    pub fn finish(mut self) -> String {
        while let Some(name) = self.open.pop() {
            self.out.push_str("</");
            self.out.push_str(&name);
            self.out.push('>');
        }
        self.out
    }

    fn close(&mut self, name: &str) {
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
    }
}

/// Serialize a full token sequence.
pub fn serialize<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = &'a Token>,
{
    let mut serializer = Serializer::new();
    for token in tokens {
        serializer.write(token);
    }
    serializer.finish()
}

fn push_escaped(out: &mut String, text: &str, in_attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
