//! Scour - policy-driven HTML sanitization
//!
//! Tokenize untrusted markup with a real HTML5 tokenizer, filter the token
//! stream against an allow-list [`Policy`], and re-serialize it as
//! well-formed output that is safe to render without further escaping.
//!
//! Malformed markup never fails a call; it is recovered and sanitized
//! best-effort. The only errors the crate surfaces are registry and
//! configuration errors ([`RegistryError`]).
//!
//! Input size is not bounded here: callers feeding adversarial input should
//! cap its length before calling in, since tokenization is linear in input
//! size and the token sequence is materialized in memory.
//!
//! ```
//! use scour_engine::{Policy, sanitize};
//!
//! let policy = Policy::general();
//! assert_eq!(
//!     sanitize("<p onclick='x()'>hi <b>there</b></p>", &policy),
//!     "<p>hi <b>there</b></p>",
//! );
//! assert_eq!(sanitize("<script>alert(1)</script>", &policy), "");
//! ```

pub use scour_policy::{
    ConfigSource, DisallowedTags, FilterOptions, GENERAL, Policy, PolicyConfig, PolicyFilter,
    RESTRICTED, Registry, RegistryError,
};
pub use scour_tokens::{Attr, Serializer, Token, serialize, tokenize};

/// Sanitize an HTML fragment against `policy` with default options:
/// disallowed elements silently dropped, comments and doctypes stripped.
///
/// Never fails on malformed HTML; the output contains only allow-listed
/// elements, attributes and style properties, and is well-formed.
pub fn sanitize(html: &str, policy: &Policy) -> String {
    sanitize_with(html, policy, FilterOptions::default())
}

/// Sanitize with explicit [`FilterOptions`] (escape mode, comment and
/// doctype handling).
pub fn sanitize_with(html: &str, policy: &Policy, options: FilterOptions) -> String {
    let mut filter = PolicyFilter::new(policy, options);
    let mut serializer = Serializer::new();
    for token in tokenize(html) {
        if let Some(token) = filter.filter(token) {
            serializer.write(&token);
        }
    }
    let output = serializer.finish();
    tracing::debug!(
        "sanitized {} bytes of input into {} bytes of output",
        html.len(),
        output.len()
    );
    output
}

/// Normalize trusted markup without restricting its vocabulary: tokenize
/// and re-serialize only. Unclosed tags are closed, attribute values are
/// quoted, reserved characters are re-escaped. Comments and doctypes
/// survive.
pub fn cleanup(html: &str) -> String {
    serialize(&tokenize(html))
}
