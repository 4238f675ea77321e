//! Lenient transcoding between UTF-8, UTF-16 and UTF-32 code units.
//!
//! Conversions run in two passes over one complete, caller-supplied span: a
//! measurement pass computes the exact destination size, then a
//! materialization pass writes into a buffer of that size. Malformed input is
//! never an error; it is replaced with `'?'` (configurable) and decoding moves
//! on.
//!
//! ```rust
//! use unicodec::{measure, write_into};
//!
//! let src = "café".as_bytes();
//! let len = measure::<u16, u8>(src);
//! let mut dst = vec![0u16; len];
//! assert_eq!(write_into(&mut dst, src), len);
//! assert_eq!(dst, [0x63, 0x61, 0x66, 0xE9]);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod options;
mod scalar;
mod text;
mod transcode;
mod wide;

#[cfg(test)]
mod tests;

pub use error::{EncodeError, TranscodeError};
pub use options::{DecodeOptions, SurrogatePairing, TranscodeOptions};
pub use scalar::{CodeUnit, Decoded, REPLACEMENT, Width};
pub use text::{Printable, PrintableFrom, build_text};
pub use transcode::{
    Transcoder, length, length_raw, measure, transcode, transcode_to_vec, write_into,
};
pub use wide::{
    WideChar, copy_truncated, from_wide, from_wide_ptr, from_wide_units, to_wide, to_wide_units,
};

#[doc(hidden)]
pub use alloc::vec;

/// Builds a narrow string from a heterogeneous list of printable values.
///
/// Values are appended left to right with no separator. Wide strings (slices
/// of [`WideChar`]) are transcoded to UTF-8 first; everything else uses its
/// natural textual form.
///
/// ```rust
/// use unicodec::text;
///
/// let name: Vec<unicodec::WideChar> = "Adapter".chars().map(|c| c as unicodec::WideChar).collect();
/// let line = text!["#", 0, ": ", name.as_slice(), " (", 512u32, " MiB)"];
/// assert_eq!(line, "#0: Adapter (512 MiB)");
/// ```
#[macro_export]
macro_rules! text {
    ( $( $arg:expr ),* $(,)? ) => {{
        $crate::build_text(&$crate::vec![
            $(<$crate::Printable as $crate::PrintableFrom<_>>::from_printable($arg)),*
        ])
    }};
}
