//! Decoding one chunk of a UTF-8 stream.

use crate::carry::{Restored, Utf8Carry};
use crate::utf8::{Decoded, REPLACEMENT_CHARACTER, decode_one};

/// One unit produced while decoding a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    /// A well-formed codepoint.
    Valid(char),
    /// An ill-formed sequence, standing for one U+FFFD.
    Replaced,
}

impl Scalar {
    /// The scalar value to process: the decoded character, or U+FFFD.
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Self::Valid(ch) => ch,
            Self::Replaced => REPLACEMENT_CHARACTER,
        }
    }

    /// Whether this unit replaced ill-formed input.
    #[must_use]
    pub const fn is_replaced(self) -> bool {
        matches!(self, Self::Replaced)
    }
}

/// Iterator over the scalars of one chunk.
///
/// A sequence held in `carry` from the previous chunk is completed first. If
/// the chunk ends inside a sequence and `is_last` is false, the tail is saved
/// into `carry` and iteration stops; the next chunk picks it up.
///
/// # Example
/// ```
/// use unorm_encoding::{ChunkDecoder, Scalar, Utf8Carry};
///
/// let bytes = "aé".as_bytes();
/// let mut carry = Utf8Carry::new();
///
/// let first: Vec<Scalar> = ChunkDecoder::new(&mut carry, &bytes[..2], false).collect();
/// assert_eq!(first, [Scalar::Valid('a')]);
///
/// let second: Vec<Scalar> = ChunkDecoder::new(&mut carry, &bytes[2..], true).collect();
/// assert_eq!(second, [Scalar::Valid('é')]);
/// ```
#[derive(Debug)]
pub struct ChunkDecoder<'c, 'd> {
    carry: &'c mut Utf8Carry,
    data: &'d [u8],
    pos: usize,
    is_last: bool,
}

impl<'c, 'd> ChunkDecoder<'c, 'd> {
    /// Start decoding `data`, resuming from `carry`.
    pub const fn new(carry: &'c mut Utf8Carry, data: &'d [u8], is_last: bool) -> Self {
        Self {
            carry,
            data,
            pos: 0,
            is_last,
        }
    }

    /// Bytes of the chunk not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> &'d [u8] {
        &self.data[self.pos..]
    }
}

impl Iterator for ChunkDecoder<'_, '_> {
    type Item = Scalar;

    fn next(&mut self) -> Option<Scalar> {
        if !self.carry.is_empty() {
            return match self.carry.restore(self.remaining(), self.is_last) {
                Restored::Pending => {
                    self.pos = self.data.len();
                    None
                }
                Restored::Char { ch, consumed } => {
                    self.pos += consumed;
                    Some(Scalar::Valid(ch))
                }
                Restored::Replaced { consumed } => {
                    self.pos += consumed;
                    Some(Scalar::Replaced)
                }
            };
        }

        let rest = self.remaining();
        if rest.is_empty() {
            return None;
        }

        match decode_one(rest) {
            Decoded::Char { ch, len } => {
                self.pos += len;
                Some(Scalar::Valid(ch))
            }
            Decoded::Invalid { len } => {
                self.pos += len;
                Some(Scalar::Replaced)
            }
            Decoded::Incomplete => {
                self.pos = self.data.len();
                if self.is_last {
                    return Some(Scalar::Replaced);
                }
                // The single suspension point: keep the tail for the next chunk.
                self.carry.save(rest);
                None
            }
        }
    }
}
