//! Span conversion in two passes: measure, then write.
//!
//! Both passes run the same decode loop over the source span. The measuring
//! pass sums [`CodeUnit::encoded_len`] for every scalar; the writing pass
//! encodes each scalar at the running offset of the destination. Given the
//! same source and options, the count returned by [`Transcoder::measure`] is
//! exactly the number of units [`Transcoder::write_into`] writes into a buffer
//! of at least that size.
use alloc::{vec, vec::Vec};

use crate::{
    error::TranscodeError,
    options::{DecodeOptions, TranscodeOptions},
    scalar::{CodeUnit, Decoded},
};

/// Runs conversions with a fixed set of [`TranscodeOptions`].
///
/// The free functions [`measure`], [`write_into`], [`transcode`] and
/// [`transcode_to_vec`] are shorthands for a default `Transcoder`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transcoder {
    options: TranscodeOptions,
}

impl Transcoder {
    /// Creates a transcoder with the given options.
    #[must_use]
    pub const fn new(options: TranscodeOptions) -> Self {
        Self { options }
    }

    /// The options this transcoder runs with.
    #[must_use]
    pub fn options(&self) -> &TranscodeOptions {
        &self.options
    }

    fn scalars<'a, S: CodeUnit>(&self, src: &'a [S]) -> Scalars<'a, S> {
        Scalars {
            src,
            pos: 0,
            decode: self.options.decode_options(),
            stop_at_nul: self.options.stop_at_nul,
            done: false,
        }
    }

    /// Measurement pass: the number of `D` units needed to hold `src`.
    ///
    /// Scalars the destination cannot encode count as zero units.
    #[must_use]
    pub fn measure<D: CodeUnit, S: CodeUnit>(&self, src: &[S]) -> usize {
        self.scalars(src)
            .map(|(_, decoded)| D::encoded_len(decoded.scalar))
            .sum()
    }

    /// Materialization pass: writes `src` into `dst` and returns the number
    /// of units written.
    ///
    /// A scalar that cannot be encoded, or that does not fit in what is left
    /// of `dst`, is skipped and the loop carries on with the next one. With a
    /// `dst` at least [`Transcoder::measure`] units long the result equals the
    /// measured count.
    pub fn write_into<D: CodeUnit, S: CodeUnit>(&self, dst: &mut [D], src: &[S]) -> usize {
        let mut written = 0;
        let mut malformed = 0usize;
        let mut dropped = 0usize;

        for (_, decoded) in self.scalars(src) {
            malformed += usize::from(decoded.malformed);
            let n = D::encode_into(&mut dst[written..], decoded.scalar);
            if n == 0 {
                dropped += 1;
            }
            written += n;
        }

        if malformed > 0 || dropped > 0 {
            tracing::debug!(
                from = %S::WIDTH,
                to = %D::WIDTH,
                malformed,
                dropped,
                written,
                "transcoded with substitutions"
            );
        }

        written
    }

    /// Materialization pass that stops at the first scalar it cannot write.
    ///
    /// Malformed source sequences are still replaced; only encoder failures
    /// are reported.
    ///
    /// # Errors
    ///
    /// Returns a [`TranscodeError`] carrying the source offset of the scalar
    /// and the units written so far if a scalar is unencodable in `D` or
    /// `dst` runs out of space.
    pub fn try_write_into<D: CodeUnit, S: CodeUnit>(
        &self,
        dst: &mut [D],
        src: &[S],
    ) -> Result<usize, TranscodeError> {
        let mut written = 0;
        for (offset, decoded) in self.scalars(src) {
            written += D::try_encode_into(&mut dst[written..], decoded.scalar).map_err(
                |source| TranscodeError {
                    source,
                    offset,
                    written,
                },
            )?;
        }
        Ok(written)
    }

    /// Measures when `dst` is `None`, writes otherwise.
    pub fn transcode<D: CodeUnit, S: CodeUnit>(&self, dst: Option<&mut [D]>, src: &[S]) -> usize {
        match dst {
            Some(dst) => self.write_into(dst, src),
            None => self.measure::<D, S>(src),
        }
    }

    /// Measures, allocates exactly the measured size, and writes.
    #[must_use]
    pub fn transcode_to_vec<D: CodeUnit, S: CodeUnit>(&self, src: &[S]) -> Vec<D> {
        let len = self.measure::<D, S>(src);
        let mut out = vec![D::default(); len];
        let written = self.write_into(&mut out, src);
        debug_assert_eq!(written, len, "write pass diverged from measurement");
        out.truncate(written);
        out
    }
}

/// Decoded scalars of a span, with their source offsets.
struct Scalars<'a, S> {
    src: &'a [S],
    pos: usize,
    decode: DecodeOptions,
    stop_at_nul: bool,
    done: bool,
}

impl<S: CodeUnit> Iterator for Scalars<'_, S> {
    type Item = (usize, Decoded);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let decoded = S::decode_with(self.src.get(self.pos..)?, &self.decode)?;
        let offset = self.pos;
        self.pos += decoded.len;
        if self.stop_at_nul && decoded.scalar == 0 {
            self.done = true;
        }
        Some((offset, decoded))
    }
}

/// Measurement pass with default options. See [`Transcoder::measure`].
#[must_use]
pub fn measure<D: CodeUnit, S: CodeUnit>(src: &[S]) -> usize {
    Transcoder::default().measure::<D, S>(src)
}

/// Materialization pass with default options. See [`Transcoder::write_into`].
pub fn write_into<D: CodeUnit, S: CodeUnit>(dst: &mut [D], src: &[S]) -> usize {
    Transcoder::default().write_into(dst, src)
}

/// Measures when `dst` is `None`, writes otherwise, with default options.
pub fn transcode<D: CodeUnit, S: CodeUnit>(dst: Option<&mut [D]>, src: &[S]) -> usize {
    Transcoder::default().transcode(dst, src)
}

/// Converts `src` into a freshly allocated, exactly sized `Vec<D>`.
#[must_use]
pub fn transcode_to_vec<D: CodeUnit, S: CodeUnit>(src: &[S]) -> Vec<D> {
    Transcoder::default().transcode_to_vec(src)
}

/// Number of units before the first zero unit, or `units.len()` if there is
/// none.
#[must_use]
pub fn length<U: CodeUnit>(units: &[U]) -> usize {
    units
        .iter()
        .position(|&unit| unit == U::default())
        .unwrap_or(units.len())
}

/// Number of units before the zero terminator of a raw buffer.
///
/// # Safety
///
/// `ptr` must be non-null, aligned, and point to initialized units that are
/// followed by a zero unit within the same allocation.
#[must_use]
pub unsafe fn length_raw<U: CodeUnit>(ptr: *const U) -> usize {
    let mut len = 0;
    // SAFETY: the caller guarantees every unit up to the terminator is readable.
    while unsafe { ptr.add(len).read() } != U::default() {
        len += 1;
    }
    len
}
