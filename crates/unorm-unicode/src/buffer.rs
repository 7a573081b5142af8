//! The decomposition buffer.
//!
//! Entries are addressed by index, so growing the backing `Vec` never
//! invalidates the starter or flush-boundary positions held by the
//! normalizer.

use std::ops::{Deref, DerefMut};

use crate::error::NormalizeError;

/// Minimum number of entries added whenever the buffer has to grow.
pub const GROWTH_INCREMENT: usize = 1024;

/// One decomposed codepoint awaiting ordering, composition and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// The codepoint, or `None` once it has been absorbed into a composite.
    pub codepoint: Option<char>,
    /// Canonical combining class. Always 0 for erased entries.
    pub ccc: u8,
}

impl Entry {
    /// A live entry.
    #[must_use]
    pub const fn new(codepoint: char, ccc: u8) -> Self {
        Self {
            codepoint: Some(codepoint),
            ccc,
        }
    }

    /// Whether this entry has combining class 0. Erased entries count as
    /// starters.
    #[must_use]
    pub const fn is_starter(&self) -> bool {
        self.ccc == 0
    }

    /// Whether this entry was absorbed into a preceding composite.
    #[must_use]
    pub const fn is_erased(&self) -> bool {
        self.codepoint.is_none()
    }

    /// Mark this entry as absorbed: it is skipped on output.
    pub const fn erase(&mut self) {
        self.codepoint = None;
        self.ccc = 0;
    }
}

/// Growable entry storage with fallible growth.
#[derive(Debug)]
pub(crate) struct Buffer {
    entries: Vec<Entry>,
    /// Capacity reserved by the first growth.
    initial_capacity: usize,
    /// Set when a reservation failed.
    poisoned: bool,
}

impl Buffer {
    /// An empty buffer that reserves `initial_capacity` entries on first use.
    pub(crate) const fn new(initial_capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            initial_capacity,
            poisoned: false,
        }
    }

    pub(crate) const fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    pub(crate) fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Make room for `additional` more entries.
    ///
    /// When the spare capacity is too small the buffer grows to at least
    /// `capacity + max(GROWTH_INCREMENT, additional)` (or to the initial
    /// capacity on first use, whichever is larger).
    pub(crate) fn ensure_capacity(&mut self, additional: usize) -> Result<(), NormalizeError> {
        let capacity = self.entries.capacity();
        let len = self.entries.len();
        if capacity - len >= additional {
            return Ok(());
        }

        let mut target = capacity + GROWTH_INCREMENT.max(additional);
        if capacity == 0 {
            target = target.max(self.initial_capacity);
        }
        let requested = target - len;

        #[cfg(feature = "normalize-trace")]
        eprintln!("[NORMALIZE] grow buffer capacity={capacity} len={len} requested={requested}");

        self.entries.try_reserve_exact(requested).map_err(|source| {
            self.poisoned = true;
            NormalizeError::Allocation { requested, source }
        })
    }

    /// Append an entry. Callers reserve room with
    /// [`Buffer::ensure_capacity`] first, so this never reallocates.
    pub(crate) fn push(&mut self, entry: Entry) {
        debug_assert!(self.entries.len() < self.entries.capacity());
        self.entries.push(entry);
    }

    /// Discard the finalized prefix `[0, boundary)` and move the live tail to
    /// the buffer origin. Capacity is kept.
    pub(crate) fn shift_to_origin(&mut self, boundary: usize) {
        let len = self.entries.len();
        self.entries.copy_within(boundary..len, 0);
        self.entries.truncate(len - boundary);
    }

    /// Drop every entry, keeping capacity. Clears the poisoned flag.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.poisoned = false;
    }
}

impl Deref for Buffer {
    type Target = [Entry];

    fn deref(&self) -> &[Entry] {
        &self.entries
    }
}

impl DerefMut for Buffer {
    fn deref_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_growth_honours_initial_capacity() {
        let mut buffer = Buffer::new(4096);
        buffer.ensure_capacity(1).unwrap();
        assert!(buffer.capacity() >= 4096);
    }

    #[test]
    fn test_growth_adds_at_least_the_increment() {
        let mut buffer = Buffer::new(1);
        buffer.ensure_capacity(1).unwrap();
        let before = buffer.capacity();

        for i in 0..before {
            buffer.push(Entry::new(char::from(b'a' + u8::try_from(i % 26).unwrap()), 0));
        }
        buffer.ensure_capacity(3).unwrap();
        assert!(buffer.capacity() >= before + GROWTH_INCREMENT);
        assert_eq!(buffer.len(), before);
    }

    #[test]
    fn test_shift_to_origin_keeps_tail() {
        let mut buffer = Buffer::new(8);
        buffer.ensure_capacity(4).unwrap();
        for ch in ['a', 'b', 'c', 'd'] {
            buffer.push(Entry::new(ch, 0));
        }
        let capacity = buffer.capacity();

        buffer.shift_to_origin(3);
        assert_eq!(&*buffer, &[Entry::new('d', 0)]);
        assert_eq!(buffer.capacity(), capacity);
    }

    #[test]
    fn test_erase() {
        let mut entry = Entry::new('\u{0301}', 230);
        entry.erase();
        assert!(entry.is_erased());
        assert!(entry.is_starter());
    }
}
