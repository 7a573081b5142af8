//! Streaming Unicode normalization for the unorm toolkit.
//!
//! # Scope
//!
//! This crate implements:
//! - **Normalization Forms** ([UAX #15 § 1.2](https://www.unicode.org/reports/tr15/#Norm_Forms))
//!   - NFC, NFD, NFKC, NFKD
//!
//! - **Decomposition** ([UAX #15 § 3](https://www.unicode.org/reports/tr15/#Description_Norm))
//!   - Full canonical and compatibility mappings
//!   - Algorithmic Hangul syllable decomposition
//!
//! - **Canonical Ordering** (stable, by combining class)
//!
//! - **Canonical Composition**
//!   - Primary composites only (composition exclusions never form)
//!   - Blocking rule
//!   - Algorithmic Hangul composition
//!
//! - **Streaming**
//!   - Chunks of any size, split anywhere (including inside a UTF-8 sequence)
//!   - Bounded memory: finalized output is flushed at starter boundaries
//!   - UTF-8 and codepoint input/output
//!
//! - **Quick Check** ([UAX #15 § 9](https://www.unicode.org/reports/tr15/#Detecting_Normalization_Forms))
//!
//! # Not Yet Implemented
//!
//! - Stream-Safe Text Format (UAX #15 § 13)
//! - Encodings other than UTF-8

mod buffer;
mod compose;
mod decompose;
/// Errors raised by the normalizer.
pub mod error;
/// Normalization forms.
pub mod form;
/// Hangul syllable arithmetic per [Unicode § 3.12](https://www.unicode.org/versions/latest/ch03.pdf).
pub mod hangul;
mod normalizer;
/// Normalizer configuration.
pub mod options;
mod quick_check;
mod reorder;
/// Unicode Character Database lookups.
pub mod tables;

pub use buffer::GROWTH_INCREMENT;
pub use error::NormalizeError;
pub use form::{DecompositionKind, Form};
pub use normalizer::Normalizer;
pub use options::NormalizerOptions;

/// Normalize a whole string.
///
/// # Errors
///
/// Returns [`NormalizeError::Allocation`] if the decomposition buffer cannot
/// grow.
///
/// # Example
/// ```
/// use unorm_unicode::{Form, normalize_str};
///
/// assert_eq!(normalize_str(Form::Nfd, "\u{00C5}").unwrap(), "A\u{030A}");
/// assert_eq!(normalize_str(Form::Nfkc, "\u{FB01}").unwrap(), "fi");
/// ```
pub fn normalize_str(form: Form, input: &str) -> Result<String, NormalizeError> {
    let mut out = String::with_capacity(input.len());
    Normalizer::new(form).normalize(input.as_bytes(), true, |bytes: &[u8]| {
        // The sink only ever sees whole encoded codepoints.
        out.push_str(&String::from_utf8_lossy(bytes));
        Ok::<(), NormalizeError>(())
    })?;
    Ok(out)
}

/// Whether `input` is already in `form`.
///
/// Runs the quick check and falls back to a full normalization when it is
/// inconclusive.
#[must_use]
pub fn is_normalized(form: Form, input: &str) -> bool {
    if Normalizer::new(form).quick_check(input.as_bytes(), true) {
        return true;
    }
    normalize_str(form, input).is_ok_and(|normalized| normalized == input)
}
