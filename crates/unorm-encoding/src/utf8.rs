//! Single codepoint UTF-8 decoding and encoding.
//!
//! [Unicode § 3.9 Unicode Encoding Forms](https://www.unicode.org/versions/latest/ch03.pdf)

/// U+FFFD REPLACEMENT CHARACTER, substituted for ill-formed input.
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// Longest well-formed UTF-8 sequence, in bytes.
pub const MAX_SEQUENCE_LENGTH: usize = 4;

/// Result of decoding the first codepoint of a byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A well-formed sequence of `len` bytes encoding `ch`.
    Char {
        /// The decoded scalar value.
        ch: char,
        /// Number of bytes consumed.
        len: usize,
    },
    /// The span ends before the sequence does; every byte present is valid so
    /// far, so more input may complete it.
    Incomplete,
    /// An ill-formed sequence. `len` is the length of its maximal subpart,
    /// which is replaced by a single U+FFFD.
    Invalid {
        /// Number of bytes consumed by the replacement.
        len: usize,
    },
}

/// [Unicode § 3.9, Table 3-7 Well-Formed UTF-8 Byte Sequences](https://www.unicode.org/versions/latest/ch03.pdf)
///
/// Returns the sequence length announced by `lead` together with the allowed
/// range of the second byte, or `None` if `lead` can never start a sequence.
const fn lead_byte(lead: u8) -> Option<(usize, u8, u8)> {
    match lead {
        0xC2..=0xDF => Some((2, 0x80, 0xBF)),
        0xE0 => Some((3, 0xA0, 0xBF)),
        0xE1..=0xEC | 0xEE..=0xEF => Some((3, 0x80, 0xBF)),
        // Excludes the surrogate block U+D800..U+DFFF.
        0xED => Some((3, 0x80, 0x9F)),
        0xF0 => Some((4, 0x90, 0xBF)),
        0xF1..=0xF3 => Some((4, 0x80, 0xBF)),
        // Nothing above U+10FFFF.
        0xF4 => Some((4, 0x80, 0x8F)),
        _ => None,
    }
}

/// Number of bytes a sequence starting with `lead` occupies, or `None` for a
/// byte that cannot start a sequence.
#[must_use]
pub const fn sequence_length(lead: u8) -> Option<usize> {
    if lead < 0x80 {
        return Some(1);
    }
    match lead_byte(lead) {
        Some((len, _, _)) => Some(len),
        None => None,
    }
}

/// Decode the first codepoint of `bytes`.
///
/// An empty span is reported as [`Decoded::Incomplete`].
///
/// # Example
/// ```
/// use unorm_encoding::{Decoded, decode_one};
///
/// assert_eq!(decode_one("é".as_bytes()), Decoded::Char { ch: 'é', len: 2 });
/// assert_eq!(decode_one(&[0xE2, 0x82]), Decoded::Incomplete);
/// assert_eq!(decode_one(&[0xE2, 0x41]), Decoded::Invalid { len: 1 });
/// ```
#[must_use]
pub fn decode_one(bytes: &[u8]) -> Decoded {
    let Some(&lead) = bytes.first() else {
        return Decoded::Incomplete;
    };

    if lead < 0x80 {
        return Decoded::Char {
            ch: char::from(lead),
            len: 1,
        };
    }

    let Some((len, lower, upper)) = lead_byte(lead) else {
        return Decoded::Invalid { len: 1 };
    };

    let mut cp = u32::from(lead)
        & match len {
            2 => 0x1F,
            3 => 0x0F,
            _ => 0x07,
        };

    for i in 1..len {
        let Some(&byte) = bytes.get(i) else {
            return Decoded::Incomplete;
        };

        let (lo, hi) = if i == 1 { (lower, upper) } else { (0x80, 0xBF) };
        if !(lo..=hi).contains(&byte) {
            return Decoded::Invalid { len: i };
        }

        cp = (cp << 6) | u32::from(byte & 0x3F);
    }

    char::from_u32(cp).map_or(Decoded::Invalid { len }, |ch| Decoded::Char { ch, len })
}

/// Encode `ch` as UTF-8 at the start of `out`.
///
/// Returns the number of bytes written, or `None` when `out` is too small to
/// hold the whole sequence (nothing is written in that case).
#[must_use]
pub fn encode_one(ch: char, out: &mut [u8]) -> Option<usize> {
    if out.len() < ch.len_utf8() {
        return None;
    }
    Some(ch.encode_utf8(out).len())
}
