//! Integration tests for the normalization quick check.

use unorm_unicode::{Form, Normalizer, is_normalized};

fn check(form: Form, text: &str) -> bool {
    Normalizer::new(form).quick_check(text.as_bytes(), true)
}

#[test]
fn test_ascii_passes_every_form() {
    for form in Form::ALL {
        assert!(check(form, "plain ascii text"), "{form}");
    }
}

#[test]
fn test_precomposed_fails_decomposed_forms() {
    assert!(check(Form::Nfc, "caf\u{00E9}"));
    assert!(!check(Form::Nfd, "caf\u{00E9}"));
    assert!(!check(Form::Nfkd, "caf\u{00E9}"));
}

#[test]
fn test_compatibility_characters() {
    assert!(check(Form::Nfc, "\u{FB01}"));
    assert!(!check(Form::Nfkc, "\u{FB01}"));
}

#[test]
fn test_maybe_fails_composed_forms() {
    // U+0301 is NFC_QC=Maybe: only normalization can tell.
    assert!(!check(Form::Nfc, "e\u{0301}"));
    assert!(check(Form::Nfd, "e\u{0301}"));
}

#[test]
fn test_combining_class_order() {
    assert!(check(Form::Nfd, "a\u{0323}\u{0301}"));
    assert!(!check(Form::Nfd, "a\u{0301}\u{0323}"));
}

#[test]
fn test_malformed_input_fails() {
    let mut normalizer = Normalizer::new(Form::Nfd);
    assert!(!normalizer.quick_check(b"ab\xFF", true));
    // Truncated at the very end.
    assert!(!normalizer.quick_check(b"ab\xE1\x80", true));
}

#[test]
fn test_chunked_check_with_split_sequence() {
    let bytes = "a\u{0323}\u{0301}".as_bytes();
    let mut normalizer = Normalizer::new(Form::Nfd);
    for byte in bytes {
        assert!(normalizer.quick_check(std::slice::from_ref(byte), false));
    }
    assert!(normalizer.quick_check_end());
}

#[test]
fn test_order_violation_across_chunks() {
    let mut normalizer = Normalizer::new(Form::Nfd);
    assert!(normalizer.quick_check("a\u{0301}".as_bytes(), false));
    assert!(!normalizer.quick_check("\u{0323}".as_bytes(), false));
    // The failure reset the state.
    assert!(normalizer.quick_check("\u{0323}".as_bytes(), true));
}

#[test]
fn test_codepoint_check() {
    let mut normalizer = Normalizer::new(Form::Nfkc);
    assert!(normalizer.quick_check_codepoints(&['a', 'b'], false));
    assert!(!normalizer.quick_check_codepoints(&['\u{2126}'], true));
}

#[test]
fn test_quick_check_does_not_disturb_normalize() {
    let mut normalizer = Normalizer::new(Form::Nfc);
    let mut out = Vec::new();
    let mut sink = |b: &[u8]| {
        out.extend_from_slice(b);
        Ok::<(), unorm_unicode::NormalizeError>(())
    };

    let bytes = "e\u{0301}".as_bytes();
    normalizer.normalize(&bytes[..2], false, &mut sink).unwrap();
    assert!(!normalizer.quick_check(&bytes[2..], false));
    normalizer.normalize(&bytes[2..], true, &mut sink).unwrap();

    assert_eq!(out, "\u{00E9}".as_bytes());
}

#[test]
fn test_is_normalized_resolves_maybe() {
    assert!(is_normalized(Form::Nfc, "\u{00E9}\u{0301}"));
    assert!(!is_normalized(Form::Nfc, "e\u{0301}"));
    assert!(is_normalized(Form::Nfd, "e\u{0301}"));
    assert!(!is_normalized(Form::Nfkc, "\u{FB01}"));
}
