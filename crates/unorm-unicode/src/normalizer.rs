//! The streaming normalizer.
//!
//! Input arrives in chunks of any size. Each codepoint is decomposed into the
//! buffer; whenever a new starter appears, the run before it is closed
//! (reordered, then composed for NFC/NFKC). Everything before the latest
//! starter is final and can be flushed to the sink once the buffer grows past
//! the flush threshold, so memory stays bounded by the longest run of
//! combining marks rather than by the input size.

use std::marker::PhantomData;

use unorm_common::warning::warn_once;
use unorm_encoding::{ChunkDecoder, MAX_SEQUENCE_LENGTH, Utf8Carry, encode_one};

use crate::buffer::{Buffer, Entry};
use crate::compose::compose;
use crate::decompose::decompose;
use crate::error::NormalizeError;
use crate::form::Form;
use crate::options::NormalizerOptions;
use crate::quick_check::QuickChecker;
use crate::reorder::reorder;

/// Bytes encoded before each call of a UTF-8 sink.
const FLUSH_BUFFER_SIZE: usize = 4096;

/// Codepoints collected before each call of a codepoint sink.
const FLUSH_CODEPOINTS: usize = FLUSH_BUFFER_SIZE / MAX_SEQUENCE_LENGTH;

/// Where finalized entries go.
trait Emit {
    type Error: From<NormalizeError>;

    /// Output every live entry of `entries`, in order.
    fn emit(&mut self, entries: &[Entry]) -> Result<(), Self::Error>;
}

/// Encodes entries as UTF-8 into a local buffer and hands it to the caller.
struct Utf8Sink<F, E> {
    sink: F,
    _error: PhantomData<fn() -> E>,
}

impl<F, E> Emit for Utf8Sink<F, E>
where
    F: FnMut(&[u8]) -> Result<(), E>,
    E: From<NormalizeError>,
{
    type Error = E;

    fn emit(&mut self, entries: &[Entry]) -> Result<(), E> {
        let mut out = [0_u8; FLUSH_BUFFER_SIZE];
        let mut len = 0;

        for ch in entries.iter().filter_map(|entry| entry.codepoint) {
            if FLUSH_BUFFER_SIZE - len < MAX_SEQUENCE_LENGTH {
                (self.sink)(&out[..len])?;
                len = 0;
            }
            if let Some(written) = encode_one(ch, &mut out[len..]) {
                len += written;
            }
        }

        if len > 0 {
            (self.sink)(&out[..len])?;
        }
        Ok(())
    }
}

/// Collects entries into a local codepoint buffer for the caller.
struct CodepointSink<F, E> {
    sink: F,
    _error: PhantomData<fn() -> E>,
}

impl<F, E> Emit for CodepointSink<F, E>
where
    F: FnMut(&[char]) -> Result<(), E>,
    E: From<NormalizeError>,
{
    type Error = E;

    fn emit(&mut self, entries: &[Entry]) -> Result<(), E> {
        let mut out = ['\0'; FLUSH_CODEPOINTS];
        let mut len = 0;

        for ch in entries.iter().filter_map(|entry| entry.codepoint) {
            if len == FLUSH_CODEPOINTS {
                (self.sink)(&out[..])?;
                len = 0;
            }
            out[len] = ch;
            len += 1;
        }

        if len > 0 {
            (self.sink)(&out[..len])?;
        }
        Ok(())
    }
}

/// Buffer plus the positions that describe its state.
#[derive(Debug)]
struct Stream {
    buffer: Buffer,
    /// Index of the starter anchoring the open run.
    starter: Option<usize>,
    /// Everything before this index is final.
    ican: usize,
    /// First entry not yet examined for run boundaries.
    pending: usize,
}

impl Stream {
    const fn new(initial_capacity: usize) -> Self {
        Self {
            buffer: Buffer::new(initial_capacity),
            starter: None,
            ican: 0,
            pending: 0,
        }
    }

    fn clear(&mut self) {
        self.buffer.clear();
        self.starter = None;
        self.ican = 0;
        self.pending = 0;
    }

    /// Decompose `ch` into the buffer and close every run it ends.
    fn feed<S: Emit>(
        &mut self,
        form: Form,
        threshold: usize,
        ch: char,
        sink: &mut S,
    ) -> Result<(), S::Error> {
        decompose(form.decomposition(), ch, &mut self.buffer).inspect_err(|err| {
            warn_once("normalizer", &err.to_string());
        })?;
        self.drain(form, threshold, sink)
    }

    /// Examine the entries appended since the last call.
    fn drain<S: Emit>(
        &mut self,
        form: Form,
        threshold: usize,
        sink: &mut S,
    ) -> Result<(), S::Error> {
        while self.pending < self.buffer.len() {
            let index = self.pending;
            self.pending += 1;
            if self.buffer[index].is_starter() {
                self.close_run(form, threshold, index, sink)?;
            }
        }
        Ok(())
    }

    /// A starter arrived at `index`: finish the run before it.
    fn close_run<S: Emit>(
        &mut self,
        form: Form,
        threshold: usize,
        index: usize,
        sink: &mut S,
    ) -> Result<(), S::Error> {
        match self.starter {
            Some(starter) => {
                reorder(&mut self.buffer[starter + 1..index]);
                if form.composes() {
                    compose(&mut self.buffer[starter..=index]);
                }

                #[cfg(feature = "normalize-trace")]
                eprintln!(
                    "[NORMALIZE] close run starter={starter} end={index} absorbed={}",
                    self.buffer[index].is_erased()
                );

                if self.buffer[index].is_erased() {
                    return Ok(());
                }
            }
            None => {
                // Combining marks at the very start of the stream.
                reorder(&mut self.buffer[..index]);
            }
        }

        self.starter = Some(index);
        self.ican = index;

        if index >= threshold {
            self.flush(sink)?;
        }
        Ok(())
    }

    /// Emit `[0, ican)` and move the remaining entries to the origin.
    ///
    /// On a sink error nothing is discarded.
    fn flush<S: Emit>(&mut self, sink: &mut S) -> Result<(), S::Error> {
        let boundary = self.ican;
        if boundary == 0 {
            return Ok(());
        }

        #[cfg(feature = "normalize-trace")]
        eprintln!(
            "[NORMALIZE] flush {boundary} of {} entries",
            self.buffer.len()
        );

        sink.emit(&self.buffer[..boundary])?;

        self.buffer.shift_to_origin(boundary);
        self.starter = self.starter.and_then(|s| s.checked_sub(boundary));
        self.pending -= boundary;
        self.ican = 0;
        Ok(())
    }

    /// Close the last run, flush everything and start over.
    fn finish<S: Emit>(
        &mut self,
        form: Form,
        threshold: usize,
        sink: &mut S,
    ) -> Result<(), S::Error> {
        self.drain(form, threshold, sink)?;

        let len = self.buffer.len();
        if self.ican < len {
            match self.starter {
                Some(starter) => {
                    reorder(&mut self.buffer[starter + 1..]);
                    if form.composes() {
                        compose(&mut self.buffer[starter..]);
                    }
                }
                None => reorder(&mut self.buffer),
            }
            self.ican = len;
        }

        self.flush(sink)?;
        self.clear();
        Ok(())
    }
}

/// Streaming Unicode normalizer for one form.
///
/// One instance handles one stream at a time. Feed it chunks with
/// [`Normalizer::normalize`] (or [`Normalizer::normalize_codepoints`]) and
/// finish with `is_last = true` or [`Normalizer::normalize_end`]. After the
/// final call the instance is ready for a new stream; its buffer capacity is
/// kept.
///
/// A chunk may end anywhere, including inside a UTF-8 sequence. Output is
/// handed to the sink in order, possibly over several calls, and never
/// includes entries that a later codepoint could still change.
///
/// # Example
/// ```
/// use unorm_unicode::{Form, NormalizeError, Normalizer};
///
/// let mut normalizer = Normalizer::new(Form::Nfc);
/// let mut out = Vec::new();
/// let mut sink = |bytes: &[u8]| {
///     out.extend_from_slice(bytes);
///     Ok::<(), NormalizeError>(())
/// };
///
/// normalizer.normalize("e\u{0301}".as_bytes(), false, &mut sink)?;
/// normalizer.normalize(" caf\u{00E9}".as_bytes(), true, &mut sink)?;
/// assert_eq!(out, "\u{00E9} caf\u{00E9}".as_bytes());
/// # Ok::<(), NormalizeError>(())
/// ```
#[derive(Debug)]
pub struct Normalizer {
    form: Form,
    flush_threshold: usize,
    /// Partial UTF-8 sequence left by the previous `normalize` call.
    carry: Utf8Carry,
    stream: Stream,
    quick: QuickChecker,
}

impl Normalizer {
    /// A normalizer with default options. The buffer is reserved on first
    /// use.
    #[must_use]
    pub fn new(form: Form) -> Self {
        Self::unreserved(form, NormalizerOptions::default())
    }

    fn unreserved(form: Form, options: NormalizerOptions) -> Self {
        Self {
            form,
            flush_threshold: options.flush_threshold,
            carry: Utf8Carry::new(),
            stream: Stream::new(options.initial_capacity),
            quick: QuickChecker::default(),
        }
    }

    /// A normalizer with its buffer reserved up front.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Allocation`] if the initial buffer cannot
    /// be reserved.
    pub fn with_options(form: Form, options: NormalizerOptions) -> Result<Self, NormalizeError> {
        let mut normalizer = Self::unreserved(form, options);
        if options.initial_capacity > 0 {
            normalizer
                .stream
                .buffer
                .ensure_capacity(options.initial_capacity)?;
        }
        Ok(normalizer)
    }

    /// The active form.
    #[must_use]
    pub const fn form(&self) -> Form {
        self.form
    }

    /// Switch to another form. Any stream in progress is discarded.
    pub fn set_form(&mut self, form: Form) {
        self.form = form;
        self.reset();
    }

    /// Entry count at which finalized output is flushed.
    #[must_use]
    pub const fn flush_threshold(&self) -> usize {
        self.flush_threshold
    }

    /// Change the flush threshold. Takes effect at the next starter.
    pub const fn set_flush_threshold(&mut self, entries: usize) {
        self.flush_threshold = entries;
    }

    /// Discard the stream in progress, the quick-check state and any
    /// allocation failure. Buffer capacity is kept.
    pub fn reset(&mut self) {
        self.carry.clear();
        self.stream.clear();
        self.quick.reset();
    }

    /// Current buffer capacity in entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.stream.buffer.capacity()
    }

    const fn check_poisoned(&self) -> Result<(), NormalizeError> {
        if self.stream.buffer.is_poisoned() {
            Err(NormalizeError::Poisoned)
        } else {
            Ok(())
        }
    }

    fn normalize_bytes<S: Emit>(
        &mut self,
        data: &[u8],
        is_last: bool,
        sink: &mut S,
    ) -> Result<(), S::Error> {
        self.check_poisoned()?;

        let Self {
            form,
            flush_threshold,
            carry,
            stream,
            ..
        } = self;
        for scalar in ChunkDecoder::new(carry, data, is_last) {
            if scalar.is_replaced() {
                warn_once("UTF-8", "ill-formed sequence replaced with U+FFFD");
            }
            stream.feed(*form, *flush_threshold, scalar.to_char(), sink)?;
        }

        if is_last {
            self.stream.finish(self.form, self.flush_threshold, sink)?;
        }
        Ok(())
    }

    fn normalize_chars<S: Emit>(
        &mut self,
        data: &[char],
        is_last: bool,
        sink: &mut S,
    ) -> Result<(), S::Error> {
        self.check_poisoned()?;

        for &ch in data {
            self.stream.feed(self.form, self.flush_threshold, ch, sink)?;
        }

        if is_last {
            self.stream.finish(self.form, self.flush_threshold, sink)?;
        }
        Ok(())
    }

    /// Normalize a chunk of UTF-8.
    ///
    /// `sink` receives normalized UTF-8 in order. It may be called zero or
    /// more times; with `is_last` everything left is flushed and the
    /// normalizer is reset. Ill-formed input is replaced by U+FFFD.
    ///
    /// # Errors
    ///
    /// Returns the sink's error unchanged, or a [`NormalizeError`] converted
    /// into `E` if the buffer could not grow. After an error the chunk must
    /// not be fed again: finish the stream or [`reset`](Self::reset).
    pub fn normalize<E, F>(&mut self, data: &[u8], is_last: bool, sink: F) -> Result<(), E>
    where
        F: FnMut(&[u8]) -> Result<(), E>,
        E: From<NormalizeError>,
    {
        let mut sink = Utf8Sink {
            sink,
            _error: PhantomData,
        };
        self.normalize_bytes(data, is_last, &mut sink)
    }

    /// Finish the stream: same as `normalize(&[], true, sink)`.
    ///
    /// # Errors
    ///
    /// See [`Normalizer::normalize`].
    pub fn normalize_end<E, F>(&mut self, sink: F) -> Result<(), E>
    where
        F: FnMut(&[u8]) -> Result<(), E>,
        E: From<NormalizeError>,
    {
        self.normalize(&[], true, sink)
    }

    /// Normalize a chunk of already decoded codepoints.
    ///
    /// # Errors
    ///
    /// See [`Normalizer::normalize`].
    pub fn normalize_codepoints<E, F>(
        &mut self,
        data: &[char],
        is_last: bool,
        sink: F,
    ) -> Result<(), E>
    where
        F: FnMut(&[char]) -> Result<(), E>,
        E: From<NormalizeError>,
    {
        let mut sink = CodepointSink {
            sink,
            _error: PhantomData,
        };
        self.normalize_chars(data, is_last, &mut sink)
    }

    /// Finish a codepoint stream: same as
    /// `normalize_codepoints(&[], true, sink)`.
    ///
    /// # Errors
    ///
    /// See [`Normalizer::normalize`].
    pub fn normalize_codepoints_end<E, F>(&mut self, sink: F) -> Result<(), E>
    where
        F: FnMut(&[char]) -> Result<(), E>,
        E: From<NormalizeError>,
    {
        self.normalize_codepoints(&[], true, sink)
    }

    /// Whether a chunk of UTF-8 is certainly already in this form.
    ///
    /// State carries over between calls until `is_last` or a `false`
    /// result. `false` means "normalize to find out": the composed forms
    /// reject codepoints whose quick-check value is `Maybe`, and ill-formed
    /// UTF-8 always fails.
    #[must_use]
    pub fn quick_check(&mut self, data: &[u8], is_last: bool) -> bool {
        self.quick
            .check_bytes(self.form.quick_check_mask(), data, is_last)
    }

    /// [`Normalizer::quick_check`] over decoded codepoints.
    #[must_use]
    pub fn quick_check_codepoints(&mut self, data: &[char], is_last: bool) -> bool {
        self.quick
            .check_codepoints(self.form.quick_check_mask(), data, is_last)
    }

    /// Finish a quick check: same as `quick_check(&[], true)`.
    #[must_use]
    pub fn quick_check_end(&mut self) -> bool {
        self.quick_check(&[], true)
    }
}
