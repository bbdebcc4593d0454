//! Inline-style declaration filtering
//!
//! A `style` attribute value is a semicolon-separated list of
//! `property: value` declarations. Filtering keeps a declaration iff its
//! property name is on the policy's CSS allow-list; values are not parsed
//! further.

use crate::policy::Policy;

/// Filter a `style` attribute value against `policy.css_properties`.
///
/// Surviving declarations keep their original (trimmed) text and original
/// order. Returns `None` when nothing survives, in which case the whole
/// attribute is dropped.
pub(crate) fn filter_declarations(style: &str, policy: &Policy) -> Option<String> {
    let kept: Vec<&str> = style
        .split(';')
        .filter_map(|declaration| {
            let declaration = declaration.trim();
            // Declarations without a colon are malformed and dropped.
            let (property, _value) = declaration.split_once(':')?;
            policy
                .allows_css_property(property.trim())
                .then_some(declaration)
        })
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(kept.join(";"))
    }
}
