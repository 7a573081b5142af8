//! [UAX #15 § 9 Detecting Normalization Forms](https://www.unicode.org/reports/tr15/#Detecting_Normalization_Forms)
//!
//! A single pass over the input that never touches the decomposition buffer.
//! It answers "already normalized" for most real text; a `false` only means
//! full normalization is needed to be sure.

use unorm_encoding::{ChunkDecoder, Scalar, Utf8Carry};

use crate::tables::{self, QuickCheck};

/// Check one codepoint against `mask`, tracking the previous class.
fn accept(last_ccc: &mut u8, mask: QuickCheck, ch: char) -> bool {
    if ch.is_ascii() {
        *last_ccc = 0;
        return true;
    }

    if tables::quick_check(ch).intersects(mask) {
        return false;
    }

    let ccc = tables::combining_class(ch);
    if ccc != 0 && ccc < *last_ccc {
        return false;
    }
    *last_ccc = ccc;
    true
}

/// Quick-check state carried between chunks.
#[derive(Debug, Default)]
pub(crate) struct QuickChecker {
    carry: Utf8Carry,
    /// Combining class of the previous codepoint, 0 after a starter.
    last_ccc: u8,
}

impl QuickChecker {
    pub(crate) fn reset(&mut self) {
        self.carry.clear();
        self.last_ccc = 0;
    }

    fn finish(&mut self, passed: bool, is_last: bool) -> bool {
        if !passed || is_last {
            self.reset();
        }
        passed
    }

    /// Check a chunk of UTF-8. Ill-formed input fails the check.
    pub(crate) fn check_bytes(&mut self, mask: QuickCheck, data: &[u8], is_last: bool) -> bool {
        let last_ccc = &mut self.last_ccc;
        let passed = ChunkDecoder::new(&mut self.carry, data, is_last).all(|scalar| match scalar {
            Scalar::Valid(ch) => accept(last_ccc, mask, ch),
            Scalar::Replaced => false,
        });
        self.finish(passed, is_last)
    }

    /// Check a chunk of codepoints.
    pub(crate) fn check_codepoints(
        &mut self,
        mask: QuickCheck,
        data: &[char],
        is_last: bool,
    ) -> bool {
        let passed = data.iter().all(|&ch| accept(&mut self.last_ccc, mask, ch));
        self.finish(passed, is_last)
    }
}
