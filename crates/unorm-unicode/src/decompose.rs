//! [UAX #15 § 3 Decomposition](https://www.unicode.org/reports/tr15/#Description_Norm)
//!
//! Expands one codepoint into buffer entries.

use crate::buffer::{Buffer, Entry};
use crate::error::NormalizeError;
use crate::form::DecompositionKind;
use crate::hangul;
use crate::tables::{self, Mapping};

fn mapping(kind: DecompositionKind, ch: char) -> Option<Mapping> {
    match kind {
        DecompositionKind::Canonical => tables::canonical_decomposition(ch),
        DecompositionKind::Compatibility => tables::compatibility_decomposition(ch),
    }
}

/// Append the full decomposition of `ch` to `buffer`.
///
/// Mapped codepoints carry their own combining class. Hangul syllables
/// expand into ccc 0 jamo. Anything else is appended unchanged.
pub(crate) fn decompose(
    kind: DecompositionKind,
    ch: char,
    buffer: &mut Buffer,
) -> Result<(), NormalizeError> {
    if let Some(mapping) = mapping(kind, ch) {
        buffer.ensure_capacity(mapping.len())?;
        for &mapped in mapping.iter() {
            buffer.push(Entry::new(mapped, tables::combining_class(mapped)));
        }
        return Ok(());
    }

    if let Some(syllable) = hangul::decompose(ch) {
        buffer.ensure_capacity(syllable.len())?;
        for jamo in syllable.jamo() {
            buffer.push(Entry::new(jamo, 0));
        }
        return Ok(());
    }

    buffer.ensure_capacity(1)?;
    buffer.push(Entry::new(ch, tables::combining_class(ch)));
    Ok(())
}
