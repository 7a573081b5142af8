//! [UAX #15 § 3 Canonical Ordering Algorithm](https://www.unicode.org/reports/tr15/#Description_Norm)

use crate::buffer::Entry;

/// Stably sort a run of non-starters by ascending combining class.
///
/// Adjacent transpositions only: walking from the right, a pair out of order
/// is swapped and the walk steps forward again so the moved entry settles.
/// Entries with equal classes never pass each other.
pub(crate) fn reorder(run: &mut [Entry]) {
    let mut i = run.len();
    while i > 1 {
        if run[i - 2].ccc > run[i - 1].ccc {
            run.swap(i - 2, i - 1);
            if i < run.len() {
                i += 1;
                continue;
            }
        }
        i -= 1;
    }
}
