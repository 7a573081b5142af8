//! [UAX #15 § 3 Canonical Composition Algorithm](https://www.unicode.org/reports/tr15/#Description_Norm)

use crate::buffer::Entry;
use crate::hangul;
use crate::tables;

/// Compose the marks of `run` into its first entry.
///
/// `run[0]` is the starter. The remaining entries are already in canonical
/// order; the last one may be the next starter, which is a candidate too.
///
/// "Starting from the second character in the coded character sequence...
/// if C is not blocked from L, and there exists a Primary Composite P which
/// is canonically equivalent to the sequence <L, C>, then replace L by P and
/// delete C from the sequence."
///
/// An entry is blocked when the previous live entry after the starter has a
/// non-zero class not below its own. Runs are sorted, so looking only at that
/// neighbour is enough.
pub(crate) fn compose(run: &mut [Entry]) {
    let Some((head, rest)) = run.split_first_mut() else {
        return;
    };
    let Some(mut starter) = head.codepoint else {
        return;
    };

    let mut last_ccc: Option<u8> = None;
    for entry in rest {
        let Some(ch) = entry.codepoint else {
            continue;
        };

        let blocked = last_ccc.is_some_and(|prev| prev != 0 && prev >= entry.ccc);
        if !blocked {
            let composite =
                tables::compose_pair(starter, ch).or_else(|| hangul::compose(starter, ch));
            if let Some(composite) = composite {
                starter = composite;
                *head = Entry::new(composite, tables::combining_class(composite));
                entry.erase();
                continue;
            }
        }

        last_ccc = Some(entry.ccc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(chars: &[char]) -> Vec<Entry> {
        chars
            .iter()
            .map(|&ch| Entry::new(ch, tables::combining_class(ch)))
            .collect()
    }

    fn live(run: &[Entry]) -> Vec<char> {
        run.iter().filter_map(|e| e.codepoint).collect()
    }

    #[test]
    fn test_composes_unblocked_marks() {
        let mut run = entries(&['s', '\u{0323}', '\u{0307}']);
        compose(&mut run);
        assert_eq!(live(&run), ['\u{1E69}']);
        assert!(run[1].is_erased() && run[2].is_erased());
    }

    #[test]
    fn test_same_class_blocks() {
        // The grave is absorbed, so nothing blocks the acute, but U+00E0 has
        // no pair with it.
        let mut run = entries(&['a', '\u{0300}', '\u{0301}']);
        compose(&mut run);
        assert_eq!(live(&run), ['\u{00E0}', '\u{0301}']);

        // U+0305 does not compose with 'a' and blocks the same-class acute.
        let mut run = entries(&['a', '\u{0305}', '\u{0301}']);
        compose(&mut run);
        assert_eq!(live(&run), ['a', '\u{0305}', '\u{0301}']);
    }

    #[test]
    fn test_lower_class_does_not_block() {
        // U+0316 (220) does not compose with 'e' and sits before U+0301 (230).
        let mut run = entries(&['e', '\u{0316}', '\u{0301}']);
        compose(&mut run);
        assert_eq!(live(&run), ['\u{00E9}', '\u{0316}']);
    }

    #[test]
    fn test_next_starter_composes_when_adjacent() {
        let mut run = entries(&['\u{1100}', '\u{1161}']);
        compose(&mut run);
        assert_eq!(live(&run), ['\u{AC00}']);

        let mut run = entries(&['\u{AC00}', '\u{11A8}']);
        compose(&mut run);
        assert_eq!(live(&run), ['\u{AC01}']);
    }

    #[test]
    fn test_next_starter_blocked_by_mark() {
        let mut run = entries(&['\u{1100}', '\u{0301}', '\u{1161}']);
        compose(&mut run);
        assert_eq!(live(&run), ['\u{1100}', '\u{0301}', '\u{1161}']);
    }

    #[test]
    fn test_exclusions_stay_decomposed() {
        let mut run = entries(&['\u{0915}', '\u{093C}']);
        compose(&mut run);
        assert_eq!(live(&run), ['\u{0915}', '\u{093C}']);
    }
}
