//! Carry for a UTF-8 sequence split across chunk boundaries.

use crate::utf8::{Decoded, MAX_SEQUENCE_LENGTH, decode_one};

/// Outcome of [`Utf8Carry::restore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restored {
    /// The chunk ran out before the sequence was complete. All of it was
    /// consumed into the carry.
    Pending,
    /// The carried sequence was completed by the first `consumed` bytes.
    Char {
        /// The reconstructed scalar value.
        ch: char,
        /// Bytes taken from the new chunk.
        consumed: usize,
    },
    /// The carried sequence turned out to be ill-formed (or the stream ended);
    /// it stands for one U+FFFD. `consumed` bytes of the new chunk belong to it.
    Replaced {
        /// Bytes taken from the new chunk.
        consumed: usize,
    },
}

/// Bytes of one incomplete UTF-8 sequence held over from a previous chunk.
///
/// Invariant: `len < MAX_SEQUENCE_LENGTH`, and the held bytes are always a
/// valid prefix of some well-formed sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf8Carry {
    bytes: [u8; MAX_SEQUENCE_LENGTH],
    len: usize,
}

impl Utf8Carry {
    /// An empty carry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: [0; MAX_SEQUENCE_LENGTH],
            len: 0,
        }
    }

    /// Whether no partial sequence is held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bytes held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// The held bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Drop any held bytes.
    pub const fn clear(&mut self) {
        self.len = 0;
    }

    /// Hold `tail`, an incomplete sequence at the end of a chunk.
    ///
    /// `tail` must be what [`decode_one`] reported as
    /// [`Decoded::Incomplete`], so it is shorter than a full sequence.
    pub fn save(&mut self, tail: &[u8]) {
        debug_assert!(tail.len() < MAX_SEQUENCE_LENGTH);
        debug_assert_eq!(decode_one(tail), Decoded::Incomplete);

        let len = tail.len().min(MAX_SEQUENCE_LENGTH - 1);
        self.bytes[..len].copy_from_slice(&tail[..len]);
        self.len = len;
    }

    /// Complete the held sequence with bytes from the start of `data`.
    ///
    /// Bytes are taken one at a time. A byte that cannot continue the sequence
    /// is not consumed: the held prefix becomes one U+FFFD and decoding resumes
    /// at that byte. With `is_last` set, a sequence still incomplete at the end
    /// of `data` is replaced instead of kept.
    pub fn restore(&mut self, data: &[u8], is_last: bool) -> Restored {
        let mut consumed = 0;

        loop {
            match decode_one(self.as_bytes()) {
                Decoded::Char { ch, .. } => {
                    self.clear();
                    return Restored::Char { ch, consumed };
                }
                Decoded::Invalid { len } => {
                    // Bytes past the maximal subpart go back to the chunk.
                    let given_back = (self.len - len).min(consumed);
                    self.clear();
                    return Restored::Replaced {
                        consumed: consumed - given_back,
                    };
                }
                Decoded::Incomplete => {
                    let Some(&byte) = data.get(consumed) else {
                        if is_last {
                            self.clear();
                            return Restored::Replaced { consumed };
                        }
                        return Restored::Pending;
                    };

                    self.bytes[self.len] = byte;
                    self.len += 1;
                    consumed += 1;
                }
            }
        }
    }
}
