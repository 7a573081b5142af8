//! UTF-8 codepoint source and encoder for the unorm toolkit.
//!
//! # Scope
//!
//! This crate implements:
//! - **Single codepoint decoding** ([Unicode § 3.9, Table 3-7](https://www.unicode.org/versions/latest/ch03.pdf))
//!   - Well-formed byte ranges, including the `E0`/`ED`/`F0`/`F4` special cases
//!   - A distinguished "incomplete" result for truncated sequences
//!   - Maximal-subpart replacement of ill-formed sequences with U+FFFD
//!
//! - **Chunked decoding**
//!   - A carry that keeps a partial sequence across chunk boundaries
//!   - An iterator over one chunk that resumes from, and saves into, that carry
//!
//! - **Encoding** a scalar value into a caller-provided byte buffer
//!
//! # Not Yet Implemented
//!
//! - Encodings other than UTF-8 (handled by the charset codecs, not here)

/// Partial-sequence carry between chunks.
pub mod carry;
/// Iteration over one chunk of a stream.
pub mod chunk;
/// Single codepoint decode/encode.
pub mod utf8;

pub use carry::{Restored, Utf8Carry};
pub use chunk::{ChunkDecoder, Scalar};
pub use utf8::{Decoded, MAX_SEQUENCE_LENGTH, REPLACEMENT_CHARACTER, decode_one, encode_one};
