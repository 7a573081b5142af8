//! Unicode Character Database lookups used by the normalizer.
//!
//! The data is the immutable table set embedded by the `unicode-normalization`
//! crate; everything here is a pure function of its arguments.
//!
//! Hangul syllables are absent on purpose: `UnicodeData.txt` lists no mappings
//! for them, and [`crate::hangul`] computes them arithmetically.

use std::iter::once;
use std::ops::{BitOr, Deref};

use unicode_normalization::char::{
    canonical_combining_class, compose, decompose_canonical, decompose_compatible,
};
use unicode_normalization::{
    IsNormalized, is_nfc_quick, is_nfd_quick, is_nfkc_quick, is_nfkd_quick,
};

use crate::hangul;

/// Longest full decomposition of a single codepoint (U+FDFA under NFKD).
pub const MAX_DECOMPOSITION_LENGTH: usize = 18;

/// A full (recursively applied) decomposition mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    chars: [char; MAX_DECOMPOSITION_LENGTH],
    len: usize,
}

impl Mapping {
    const EMPTY: Self = Self {
        chars: ['\0'; MAX_DECOMPOSITION_LENGTH],
        len: 0,
    };

    const fn push(&mut self, ch: char) {
        if self.len < MAX_DECOMPOSITION_LENGTH {
            self.chars[self.len] = ch;
            self.len += 1;
        }
    }

    /// `None` when the decomposer handed back `source` unchanged.
    fn of(self, source: char) -> Option<Self> {
        if self.is_empty() || *self == [source] {
            None
        } else {
            Some(self)
        }
    }
}

impl Deref for Mapping {
    type Target = [char];

    fn deref(&self) -> &[char] {
        &self.chars[..self.len]
    }
}

/// [UAX #15 § 9 Detecting Normalization Forms](https://www.unicode.org/reports/tr15/#Detecting_Normalization_Forms)
///
/// Quick-check property bits of one codepoint (`NFC_QC`, `NFD_QC`, `NFKC_QC`,
/// `NFKD_QC` from `DerivedNormalizationProps.txt`). A clear bit means `Yes`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct QuickCheck(u8);

impl QuickCheck {
    /// Allowed in every form.
    pub const NONE: Self = Self(0);
    /// `NFC_QC=No`
    pub const NFC_NO: Self = Self(1 << 0);
    /// `NFC_QC=Maybe`
    pub const NFC_MAYBE: Self = Self(1 << 1);
    /// `NFD_QC=No`
    pub const NFD_NO: Self = Self(1 << 2);
    /// `NFKC_QC=No`
    pub const NFKC_NO: Self = Self(1 << 3);
    /// `NFKC_QC=Maybe`
    pub const NFKC_MAYBE: Self = Self(1 << 4);
    /// `NFKD_QC=No`
    pub const NFKD_NO: Self = Self(1 << 5);

    /// Raw bit pattern.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Both sets of bits.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether any bit of `other` is also set here.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for QuickCheck {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Canonical combining class, 0 for codepoints the database does not list.
#[must_use]
pub fn combining_class(ch: char) -> u8 {
    canonical_combining_class(ch)
}

/// Full canonical decomposition of `ch`, if it has one.
#[must_use]
pub fn canonical_decomposition(ch: char) -> Option<Mapping> {
    if hangul::is_syllable(ch) {
        return None;
    }

    let mut mapping = Mapping::EMPTY;
    decompose_canonical(ch, |d| mapping.push(d));
    mapping.of(ch)
}

/// Full compatibility decomposition of `ch`, if it has one. Codepoints that
/// only decompose canonically return their canonical mapping.
#[must_use]
pub fn compatibility_decomposition(ch: char) -> Option<Mapping> {
    if hangul::is_syllable(ch) {
        return None;
    }

    let mut mapping = Mapping::EMPTY;
    decompose_compatible(ch, |d| mapping.push(d));
    mapping.of(ch)
}

/// Quick-check bits of `ch` for all four forms.
#[must_use]
pub fn quick_check(ch: char) -> QuickCheck {
    if ch.is_ascii() {
        return QuickCheck::NONE;
    }

    let bit = |result: IsNormalized, no: QuickCheck, maybe: QuickCheck| match result {
        IsNormalized::Yes => QuickCheck::NONE,
        IsNormalized::No => no,
        IsNormalized::Maybe => maybe,
    };

    bit(is_nfc_quick(once(ch)), QuickCheck::NFC_NO, QuickCheck::NFC_MAYBE)
        | bit(is_nfd_quick(once(ch)), QuickCheck::NFD_NO, QuickCheck::NFD_NO)
        | bit(is_nfkc_quick(once(ch)), QuickCheck::NFKC_NO, QuickCheck::NFKC_MAYBE)
        | bit(is_nfkd_quick(once(ch)), QuickCheck::NFKD_NO, QuickCheck::NFKD_NO)
}

/// [UAX #15 § 3 Composition](https://www.unicode.org/reports/tr15/#Description_Norm)
///
/// Primary composite of the pair `(first, second)`. Pairs whose composite is
/// on the composition exclusion list are not in the table, and Hangul pairs
/// are left to [`hangul::compose`].
#[must_use]
pub fn compose_pair(first: char, second: char) -> Option<char> {
    if hangul::compose(first, second).is_some() {
        return None;
    }
    compose(first, second)
}
