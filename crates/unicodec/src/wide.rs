//! Conversion between platform wide strings and narrow (UTF-8) strings.
//!
//! Wide strings usually come from an OS call, e.g. an adapter description,
//! and may carry a zero terminator inside a fixed-size array. Only the units
//! before the first zero are converted.
use alloc::vec::Vec;

use bstr::BString;

use crate::{
    scalar::CodeUnit,
    transcode::{length, length_raw, measure, write_into},
};

/// The platform's wide character unit (`wchar_t`).
#[cfg(windows)]
pub type WideChar = u16;

/// The platform's wide character unit (`wchar_t`).
#[cfg(not(windows))]
pub type WideChar = u32;

/// Converts a wide string to a narrow UTF-8 string.
///
/// Conversion stops at the first zero unit. Malformed units are replaced
/// with `'?'`. The result is a [`BString`] because lenient decoding can
/// produce byte sequences that are not strictly valid UTF-8 (for example a
/// stray surrogate in UTF-32 input).
///
/// ```rust
/// use unicodec::{WideChar, from_wide};
///
/// let desc: Vec<WideChar> = "GPU \u{2122}\0\0\0".chars().map(|c| c as WideChar).collect();
/// assert_eq!(from_wide(&desc), "GPU \u{2122}");
/// ```
#[must_use]
pub fn from_wide(wide: &[WideChar]) -> BString {
    from_wide_units(wide)
}

/// Converts a narrow UTF-8 string to a wide string.
///
/// Conversion stops at the first zero byte; the result has no terminator.
#[must_use]
pub fn to_wide(narrow: &[u8]) -> Vec<WideChar> {
    to_wide_units(narrow)
}

/// [`from_wide`] for any unit width.
#[must_use]
pub fn from_wide_units<W: CodeUnit>(wide: &[W]) -> BString {
    let src = &wide[..length(wide)];
    let len = measure::<u8, W>(src);
    let mut out = alloc::vec![0u8; len];
    let written = write_into(&mut out, src);
    debug_assert_eq!(written, len);
    tracing::trace!(from = %W::WIDTH, units = src.len(), bytes = written, "narrowed wide string");
    BString::from(out)
}

/// [`to_wide`] for any unit width.
#[must_use]
pub fn to_wide_units<W: CodeUnit>(narrow: &[u8]) -> Vec<W> {
    let src = &narrow[..length(narrow)];
    let len = measure::<W, u8>(src);
    let mut out = alloc::vec![W::default(); len];
    let written = write_into(&mut out, src);
    debug_assert_eq!(written, len);
    tracing::trace!(to = %W::WIDTH, bytes = src.len(), units = written, "widened narrow string");
    out
}

/// [`from_wide`] for a raw zero-terminated wide string.
///
/// # Safety
///
/// `ptr` must be non-null, aligned, and point to initialized units followed
/// by a zero unit within the same allocation. The memory must not be mutated
/// for the duration of the call.
#[must_use]
pub unsafe fn from_wide_ptr(ptr: *const WideChar) -> BString {
    // SAFETY: forwarded from the caller.
    let len = unsafe { length_raw(ptr) };
    // SAFETY: the `len` units before the terminator are initialized and readable.
    let units = unsafe { core::slice::from_raw_parts(ptr, len) };
    from_wide(units)
}

/// Copies `src` into a fixed-size, zero-terminated buffer.
///
/// Copies at most `dst.len() - 1` bytes, stopping early at a zero byte in
/// `src`, and zero-fills the remainder so a non-empty `dst` is always
/// terminated. Truncation may split a multi-byte sequence. Returns the number
/// of bytes copied, excluding the terminator.
///
/// ```rust
/// use unicodec::copy_truncated;
///
/// let mut name = [0xAAu8; 6];
/// assert_eq!(copy_truncated(&mut name, b"adapter"), 5);
/// assert_eq!(&name, b"adapt\0");
/// ```
pub fn copy_truncated(dst: &mut [u8], src: &[u8]) -> usize {
    let Some(capacity) = dst.len().checked_sub(1) else {
        return 0;
    };
    let n = length(src).min(capacity);
    let (head, tail) = dst.split_at_mut(n);
    head.copy_from_slice(&src[..n]);
    tail.fill(0);
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide(s: &str) -> Vec<WideChar> {
        transcode_str(s)
    }

    fn transcode_str<W: CodeUnit>(s: &str) -> Vec<W> {
        to_wide_units(s.as_bytes())
    }

    #[test]
    fn from_wide_round_trips_to_wide() {
        let s = "Radeon\u{2122} \u{1F600} caf\u{e9}";
        assert_eq!(from_wide(&wide(s)), s);
    }

    #[test]
    fn from_wide_stops_at_terminator() {
        let mut desc = wide("NVIDIA");
        desc.extend_from_slice(&[0, 0x41, 0x42]);
        assert_eq!(from_wide(&desc), "NVIDIA");
    }

    #[test]
    fn to_wide_has_no_terminator() {
        let w: Vec<u16> = to_wide_units(b"ab\0cd");
        assert_eq!(w, [0x61, 0x62]);
    }

    #[test]
    fn utf16_surrogate_pair_narrows_to_four_bytes() {
        let units: Vec<u16> = transcode_str("\u{1F600}");
        assert_eq!(units, [0xD83D, 0xDE00]);
        assert_eq!(from_wide_units(&units), "\u{1F600}");
    }

    #[test]
    fn malformed_wide_units_are_replaced() {
        assert_eq!(from_wide_units::<u16>(&[0x41, 0xDC00, 0x42]), "A?B");
        assert_eq!(from_wide_units::<u16>(&[0x41, 0xD800]), "A?");
    }

    #[test]
    fn malformed_narrow_bytes_are_replaced() {
        let w: Vec<u32> = to_wide_units(&[0x41, 0xFF, 0x42]);
        // 0xFF claims an eight-byte sequence longer than what remains.
        assert_eq!(w, [0x41, 0x3F]);
    }

    #[test]
    fn empty_inputs() {
        assert!(from_wide(&[]).is_empty());
        assert!(to_wide(b"").is_empty());
        assert!(from_wide(&[0]).is_empty());
    }

    #[test]
    fn from_wide_ptr_reads_to_terminator() {
        let mut units = wide("Intel(R) UHD");
        units.push(0);
        // SAFETY: `units` is zero-terminated and outlives the call.
        let narrow = unsafe { from_wide_ptr(units.as_ptr()) };
        assert_eq!(narrow, "Intel(R) UHD");
    }

    #[test]
    fn copy_truncated_fits() {
        let mut dst = [0xAAu8; 8];
        assert_eq!(copy_truncated(&mut dst, b"abc"), 3);
        assert_eq!(&dst, b"abc\0\0\0\0\0");
    }

    #[test]
    fn copy_truncated_stops_at_source_nul() {
        let mut dst = [0xAAu8; 8];
        assert_eq!(copy_truncated(&mut dst, b"ab\0cdef"), 2);
        assert_eq!(&dst[..3], b"ab\0");
    }

    #[test]
    fn copy_truncated_empty_destination() {
        assert_eq!(copy_truncated(&mut [], b"abc"), 0);
        let mut one = [0xAAu8; 1];
        assert_eq!(copy_truncated(&mut one, b"abc"), 0);
        assert_eq!(one, [0]);
    }
}
