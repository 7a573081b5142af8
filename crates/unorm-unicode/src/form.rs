//! Normalization forms and the strategy each one selects.
//!
//! [UAX #15 § 1.2 Normalization Forms](https://www.unicode.org/reports/tr15/#Norm_Forms)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::NormalizeError;
use crate::tables::QuickCheck;

/// [UAX #15 § 1.2 Normalization Forms](https://www.unicode.org/reports/tr15/#Norm_Forms)
///
/// "Unicode Normalization Forms are formally defined normalizations of
/// Unicode strings which make it possible to determine whether any two
/// Unicode strings are equivalent to each other."
///
/// Parsing is ASCII case-insensitive, so `"nfkc".parse::<Form>()` works.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Form {
    /// Canonical Decomposition, followed by Canonical Composition.
    #[strum(serialize = "NFC")]
    Nfc,
    /// Canonical Decomposition.
    #[strum(serialize = "NFD")]
    Nfd,
    /// Compatibility Decomposition, followed by Canonical Composition.
    #[strum(serialize = "NFKC")]
    Nfkc,
    /// Compatibility Decomposition.
    #[strum(serialize = "NFKD")]
    Nfkd,
}

/// Which decomposition mappings a form applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompositionKind {
    /// Canonical mappings only.
    Canonical,
    /// Compatibility mappings, which include the canonical ones.
    Compatibility,
}

impl Form {
    /// All four forms, in the order used by `NormalizationTest.txt`.
    pub const ALL: [Self; 4] = [Self::Nfc, Self::Nfd, Self::Nfkc, Self::Nfkd];

    /// The decomposition applied to every codepoint.
    #[must_use]
    pub const fn decomposition(self) -> DecompositionKind {
        match self {
            Self::Nfc | Self::Nfd => DecompositionKind::Canonical,
            Self::Nfkc | Self::Nfkd => DecompositionKind::Compatibility,
        }
    }

    /// Whether canonical composition runs after ordering.
    #[must_use]
    pub const fn composes(self) -> bool {
        matches!(self, Self::Nfc | Self::Nfkc)
    }

    /// [UAX #15 § 9 Detecting Normalization Forms](https://www.unicode.org/reports/tr15/#Detecting_Normalization_Forms)
    ///
    /// Quick-check properties that rule a codepoint out of this form. The
    /// composed forms treat `Maybe` as a failure: whether such a codepoint
    /// survives depends on its neighbours, which only full normalization sees.
    #[must_use]
    pub const fn quick_check_mask(self) -> QuickCheck {
        match self {
            Self::Nfc => QuickCheck::NFC_NO.union(QuickCheck::NFC_MAYBE),
            Self::Nfd => QuickCheck::NFD_NO,
            Self::Nfkc => QuickCheck::NFKC_NO.union(QuickCheck::NFKC_MAYBE),
            Self::Nfkd => QuickCheck::NFKD_NO,
        }
    }

    /// Normalize a whole string into this form.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Allocation`] if the decomposition buffer
    /// cannot grow.
    pub fn normalize(self, input: &str) -> Result<String, NormalizeError> {
        crate::normalize_str(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("NFC".parse::<Form>(), Ok(Form::Nfc));
        assert_eq!("nfkd".parse::<Form>(), Ok(Form::Nfkd));
        assert_eq!("Nfkc".parse::<Form>(), Ok(Form::Nfkc));
        assert!("NFX".parse::<Form>().is_err());
    }

    #[test]
    fn test_display_uses_standard_names() {
        assert_eq!(Form::Nfd.to_string(), "NFD");
        assert_eq!(Form::Nfkc.to_string(), "NFKC");
    }

    #[test]
    fn test_strategy_selection() {
        assert_eq!(Form::Nfc.decomposition(), DecompositionKind::Canonical);
        assert_eq!(Form::Nfkd.decomposition(), DecompositionKind::Compatibility);
        assert!(Form::Nfkc.composes());
        assert!(!Form::Nfd.composes());
    }
}
