//! Edge case and stress tests for scour-engine
//!
//! Malformed markup, hostile obfuscation and unusual-but-legal input. None
//! of these may panic; sanitize always returns best-effort output.

use scour_engine::{GENERAL, Policy, RESTRICTED, Registry, RegistryError, cleanup, sanitize};

// ============================================================================
// EMPTY AND MINIMAL INPUT
// ============================================================================

#[test]
fn test_empty_input() {
    assert_eq!(sanitize("", &Policy::general()), "");
    assert_eq!(cleanup(""), "");
}

#[test]
fn test_whitespace_only() {
    assert_eq!(sanitize("  \t\n  ", &Policy::general()), "  \t\n  ");
}

#[test]
fn test_text_only() {
    assert_eq!(sanitize("just text", &Policy::general()), "just text");
}

#[test]
fn test_null_bytes_removed() {
    let out = sanitize("a\0b", &Policy::general());
    assert!(!out.contains('\0'));
}

// ============================================================================
// MALFORMED MARKUP
// ============================================================================

#[test]
fn test_unclosed_nested_tags() {
    let out = sanitize("<div><p><span>text", &Policy::general());
    assert_eq!(out, "<div><p><span>text</span></p></div>");
}

#[test]
fn test_mismatched_close_order() {
    let out = sanitize("<div><p></div></p>", &Policy::general());
    assert_eq!(out, "<div><p></p></div>");
}

#[test]
fn test_extra_closing_tags() {
    let out = sanitize("<div></div></div></div>", &Policy::general());
    assert_eq!(out, "<div></div>");
}

#[test]
fn test_orphan_closing_tag() {
    assert_eq!(sanitize("</div>text", &Policy::general()), "text");
}

#[test]
fn test_stray_angle_brackets() {
    let out = sanitize("1 < 2 and 3 > 2", &Policy::general());
    assert_eq!(out, "1 &lt; 2 and 3 &gt; 2");
}

#[test]
fn test_unterminated_comment() {
    let out = sanitize("<p>before</p><!-- never closed", &Policy::general());
    assert_eq!(out, "<p>before</p>");
}

#[test]
fn test_unterminated_script() {
    // EOF inside raw text: the element and everything after it is dropped.
    let out = sanitize("<p>safe</p><script>alert(1)", &Policy::general());
    assert_eq!(out, "<p>safe</p>");
}

#[test]
fn test_deeply_nested_input() {
    let mut input = String::new();
    for _ in 0..500 {
        input.push_str("<div>");
    }
    input.push('x');
    let out = sanitize(&input, &Policy::general());
    assert!(out.starts_with("<div>"));
    assert!(out.ends_with("</div>"));
    assert_eq!(out.matches("<div>").count(), out.matches("</div>").count());
}

// ============================================================================
// OBFUSCATED ATTACK VECTORS
// ============================================================================

#[test]
fn test_uppercase_script_tag() {
    assert_eq!(sanitize("<SCRIPT>alert(1)</SCRIPT>", &Policy::general()), "");
}

#[test]
fn test_entity_encoded_uri_scheme() {
    let out = sanitize(
        "<a href='&#106;avascript:alert(1)'>x</a>",
        &Policy::general(),
    );
    assert_eq!(out, "<a>x</a>");
}

#[test]
fn test_whitespace_obfuscated_uri_scheme() {
    let out = sanitize(
        "<a href='java\tscript:alert(1)'>x</a>\u{0}",
        &Policy::general(),
    );
    assert!(!out.to_ascii_lowercase().contains("javascript"));
}

#[test]
fn test_event_attribute_case_variants() {
    let out = sanitize("<p OnClIcK='x()' ONERROR='y()'>x</p>", &Policy::general());
    assert_eq!(out, "<p>x</p>");
}

#[test]
fn test_markup_inside_script_does_not_escape() {
    // Raw-text tokenization keeps the payload as character data, and the
    // dropped script takes it along.
    let out = sanitize(
        "<script><img src=x onerror=alert(1)></script>",
        &Policy::general(),
    );
    assert_eq!(out, "");
}

#[test]
fn test_self_closing_script_content_dropped() {
    // `<script/>` still puts the tokenizer in raw text, so the payload
    // belongs to the dropped element, not the document.
    let out = sanitize("<script/>alert(1)</script><p>x</p>", &Policy::general());
    assert_eq!(out, "<p>x</p>");
}

#[test]
fn test_style_element_payload_dropped() {
    let out = sanitize(
        "<style>@import url('https://evil.example');</style><p>x</p>",
        &Policy::general(),
    );
    assert_eq!(out, "<p>x</p>");
}

#[test]
fn test_comment_payload_stripped() {
    let out = sanitize("<!--<script>alert(1)</script>--><p>x</p>", &Policy::general());
    assert_eq!(out, "<p>x</p>");
}

#[test]
fn test_style_attribute_with_only_hostile_declarations() {
    let out = sanitize(
        "<p style='position:fixed;background:url(x)'>x</p>",
        &Policy::general(),
    );
    assert_eq!(out, "<p>x</p>");
}

// ============================================================================
// QUOTING AND ESCAPING
// ============================================================================

#[test]
fn test_unquoted_attribute_gets_quoted() {
    let out = sanitize("<img src=photo.png alt=pic>", &Policy::general());
    assert_eq!(out, "<img src=\"photo.png\" alt=\"pic\">");
}

#[test]
fn test_quote_in_attribute_value_escaped() {
    let out = sanitize("<img alt='say \"hi\"' src='x'>", &Policy::general());
    assert_eq!(out, "<img alt=\"say &quot;hi&quot;\" src=\"x\">");
}

#[test]
fn test_entities_normalized_in_text() {
    let out = sanitize("<p>&amp; &copy; &#169;</p>", &Policy::general());
    assert_eq!(out, "<p>&amp; \u{a9} \u{a9}</p>");
}

#[test]
fn test_unicode_passes_through() {
    let out = sanitize("<p>héllo 世界 🚀</p>", &Policy::general());
    assert_eq!(out, "<p>héllo 世界 🚀</p>");
}

// ============================================================================
// VOID AND SELF-CLOSING ELEMENTS
// ============================================================================

#[test]
fn test_void_elements_no_end_tags() {
    let out = sanitize("<p>a<br>b<hr>c</p>", &Policy::general());
    assert_eq!(out, "<p>a<br>b<hr>c</p>");
}

#[test]
fn test_xml_style_self_closing_void() {
    let out = sanitize("<p>a<br/>b</p>", &Policy::general());
    assert_eq!(out, "<p>a<br>b</p>");
}

#[test]
fn test_self_closing_non_void_closed_immediately() {
    let out = cleanup("<span/>after");
    assert_eq!(out, "<span></span>after");
}

// ============================================================================
// REGISTRY
// ============================================================================

#[test]
fn test_registry_builtin_policies_sanitize() {
    let registry = Registry::new();
    let general = registry.lookup(GENERAL).unwrap();
    let restricted = registry.lookup(RESTRICTED).unwrap();
    assert_eq!(sanitize("<div>x</div>", &general), "<div>x</div>");
    assert_eq!(sanitize("<div>x</div>", &restricted), "x");
}

#[test]
fn test_registry_unknown_name_errors() {
    let registry = Registry::new();
    let err = registry.lookup("Unregistered").unwrap_err();
    assert!(matches!(err, RegistryError::NotFound(_)));
}
