//! Rows from `NormalizationTest.txt`, plus configuration round trips.
//!
//! Each row is `source; NFC; NFD; NFKC; NFKD` as space-separated hex
//! codepoints, exactly as in the Unicode data file.

use unorm_unicode::{Form, NormalizerOptions, is_normalized, normalize_str};

const ROWS: &[&str] = &[
    // Part 0: specific cases
    "1E0A;1E0A;0044 0307;1E0A;0044 0307;",
    "1E0C;1E0C;0044 0323;1E0C;0044 0323;",
    "1E0A 0323;1E0C 0307;0044 0323 0307;1E0C 0307;0044 0323 0307;",
    "1E0C 0307;1E0C 0307;0044 0323 0307;1E0C 0307;0044 0323 0307;",
    "0044 0307 0323;1E0C 0307;0044 0323 0307;1E0C 0307;0044 0323 0307;",
    "1E0A 031B 0323;1E0C 031B 0307;0044 031B 0323 0307;1E0C 031B 0307;0044 031B 0323 0307;",
    "00C8;00C8;0045 0300;00C8;0045 0300;",
    "0112;0112;0045 0304;0112;0045 0304;",
    "0045 0304 0300;1E14;0045 0304 0300;1E14;0045 0304 0300;",
    "1E14 0304;1E14 0304;0045 0304 0300 0304;1E14 0304;0045 0304 0300 0304;",
    "05B8 05B9 05B1 0591 05C3 05B0 05AC 059F;05B1 05B8 05B9 0591 05C3 05B0 05AC 059F;05B1 05B8 05B9 0591 05C3 05B0 05AC 059F;05B1 05B8 05B9 0591 05C3 05B0 05AC 059F;05B1 05B8 05B9 0591 05C3 05B0 05AC 059F;",
    "1100 AC00 11A8;1100 AC01;1100 1100 1161 11A8;1100 AC01;1100 1100 1161 11A8;",
    "1100 AC00 11A8 11A8;1100 AC01 11A8;1100 1100 1161 11A8 11A8;1100 AC01 11A8;1100 1100 1161 11A8 11A8;",
    // Part 1: character by character
    "00A0;00A0;00A0;0020;0020;",
    "00C5;00C5;0041 030A;00C5;0041 030A;",
    "212B;00C5;0041 030A;00C5;0041 030A;",
    "2126;03A9;03A9;03A9;03A9;",
    "0958;0915 093C;0915 093C;0915 093C;0915 093C;",
    "1E9B 0323;1E9B 0323;017F 0323 0307;1E69;0073 0323 0307;",
    "FB01;FB01;FB01;0066 0069;0066 0069;",
    "1F82;1F82;03B1 0313 0300 0345;1F82;03B1 0313 0300 0345;",
    "FF76;FF76;FF76;30AB;30AB;",
    "FF76 FF9E;FF76 FF9E;FF76 FF9E;30AC;30AB 3099;",
    "D4DB;D4DB;1111 1171 11B6;D4DB;1111 1171 11B6;",
    "0344;0308 0301;0308 0301;0308 0301;0308 0301;",
];

fn parse(field: &str) -> String {
    field
        .split_whitespace()
        .map(|hex| char::from_u32(u32::from_str_radix(hex, 16).unwrap()).unwrap())
        .collect()
}

fn columns(row: &str) -> [String; 5] {
    let mut fields = row.split(';').map(parse);
    std::array::from_fn(|_| fields.next().unwrap())
}

#[test]
fn test_normalization_test_rows() {
    for row in ROWS {
        let [source, nfc, nfd, nfkc, nfkd] = columns(row);
        let expected = [
            (Form::Nfc, &nfc),
            (Form::Nfd, &nfd),
            (Form::Nfkc, &nfkc),
            (Form::Nfkd, &nfkd),
        ];
        for (form, want) in expected {
            assert_eq!(&normalize_str(form, &source).unwrap(), want, "{form} of {row}");
        }
    }
}

/// The invariants stated in the header of `NormalizationTest.txt`.
#[test]
fn test_normalization_test_invariants() {
    for row in ROWS {
        let [c1, c2, c3, c4, c5] = columns(row);
        for c in [&c1, &c2, &c3] {
            assert_eq!(normalize_str(Form::Nfc, c).unwrap(), c2, "{row}");
            assert_eq!(normalize_str(Form::Nfd, c).unwrap(), c3, "{row}");
        }
        for c in [&c1, &c2, &c3, &c4, &c5] {
            assert_eq!(normalize_str(Form::Nfkc, c).unwrap(), c4, "{row}");
            assert_eq!(normalize_str(Form::Nfkd, c).unwrap(), c5, "{row}");
        }
        assert!(is_normalized(Form::Nfc, &c2));
        assert!(is_normalized(Form::Nfd, &c3));
        assert!(is_normalized(Form::Nfkc, &c4));
        assert!(is_normalized(Form::Nfkd, &c5));
    }
}

#[test]
fn test_options_from_partial_json() {
    let options: NormalizerOptions = serde_json::from_str(r#"{"flush_threshold": 64}"#).unwrap();
    assert_eq!(options.flush_threshold, 64);
    assert_eq!(options.initial_capacity, NormalizerOptions::default().initial_capacity);

    let json = serde_json::to_string(&NormalizerOptions::default()).unwrap();
    assert_eq!(json, r#"{"flush_threshold":1024,"initial_capacity":4096}"#);
}

#[test]
fn test_form_serde_names() {
    assert_eq!(serde_json::to_string(&Form::Nfkc).unwrap(), r#""NFKC""#);
    let form: Form = serde_json::from_str(r#""NFD""#).unwrap();
    assert_eq!(form, Form::Nfd);
}
