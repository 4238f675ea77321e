//! Single-scalar decoding and encoding for each code-unit width.
//!
//! [`CodeUnit`] is implemented for `u8` (UTF-8), `u16` (UTF-16) and `u32`
//! (UTF-32). Decoding reads one scalar from the head of a slice and always
//! consumes at least one unit; encoding is split into a measuring form
//! ([`CodeUnit::encoded_len`]) and a writing form
//! ([`CodeUnit::encode_into`]) that share the same length rules.
//!
//! Decoding is lenient. Malformed sequences become the replacement scalar,
//! continuation bytes of an otherwise well-formed UTF-8 lead are not checked,
//! and overlong forms are accepted.
use core::fmt;

use crate::{
    error::EncodeError,
    options::{DecodeOptions, SurrogatePairing},
};

/// Scalar substituted for malformed input by default (`'?'`).
pub const REPLACEMENT: u32 = 0x3F;

const HIGH_SURROGATES: core::ops::Range<u32> = 0xD800..0xDC00;
const LOW_SURROGATES: core::ops::Range<u32> = 0xDC00..0xE000;

/// Storage width of a code unit, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    /// 8-bit units (UTF-8).
    Utf8 = 1,
    /// 16-bit units (UTF-16).
    Utf16 = 2,
    /// 32-bit units (UTF-32).
    Utf32 = 4,
}

impl Width {
    /// Size of one unit in bytes.
    #[must_use]
    pub const fn bytes(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Width::Utf8 => f.write_str("UTF-8"),
            Width::Utf16 => f.write_str("UTF-16"),
            Width::Utf32 => f.write_str("UTF-32"),
        }
    }
}

/// One decoded scalar and how far the cursor moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// The scalar value, or the replacement if `malformed` is set.
    pub scalar: u32,
    /// Units consumed; always at least one.
    pub len: usize,
    /// Whether the replacement scalar was substituted.
    pub malformed: bool,
}

impl Decoded {
    const fn valid(scalar: u32, len: usize) -> Self {
        Self {
            scalar,
            len,
            malformed: false,
        }
    }

    const fn replaced(opts: DecodeOptions, len: usize) -> Self {
        Self {
            scalar: opts.replacement,
            len,
            malformed: true,
        }
    }
}

mod private {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// A fixed-width Unicode code unit.
///
/// This trait is sealed; it is implemented for `u8`, `u16` and `u32` only.
pub trait CodeUnit: Copy + Default + Eq + fmt::Debug + private::Sealed {
    /// Width of the unit.
    const WIDTH: Width;

    /// Decodes the scalar at the head of `src` with default options.
    ///
    /// Returns `None` only when `src` is empty.
    fn decode(src: &[Self]) -> Option<Decoded> {
        Self::decode_with(src, &DecodeOptions::default())
    }

    /// Decodes the scalar at the head of `src`.
    ///
    /// Never reads past the end of `src` and, for a non-empty `src`, always
    /// consumes between one and `src.len()` units.
    fn decode_with(src: &[Self], opts: &DecodeOptions) -> Option<Decoded>;

    /// Units needed to encode `scalar`, or 0 if it cannot be encoded.
    fn encoded_len(scalar: u32) -> usize;

    /// Encodes `scalar` at the start of `dst`.
    ///
    /// Returns the number of units written. 0 means the scalar cannot be
    /// encoded in this width or `dst` is too short; nothing is written in
    /// either case. Use [`CodeUnit::try_encode_into`] to tell them apart.
    fn encode_into(dst: &mut [Self], scalar: u32) -> usize;

    /// Like [`CodeUnit::encode_into`], but reports why nothing was written.
    ///
    /// # Errors
    ///
    /// [`EncodeError::Unencodable`] if the scalar has no representation in
    /// this width, [`EncodeError::InsufficientSpace`] if `dst` is too short.
    fn try_encode_into(dst: &mut [Self], scalar: u32) -> Result<usize, EncodeError> {
        let needed = Self::encoded_len(scalar);
        if needed == 0 {
            return Err(EncodeError::Unencodable(scalar));
        }
        if needed > dst.len() {
            return Err(EncodeError::InsufficientSpace {
                needed,
                available: dst.len(),
            });
        }
        Ok(Self::encode_into(dst, scalar))
    }
}

#[inline]
fn continuation(bits: u32) -> u8 {
    #[allow(clippy::cast_possible_truncation)]
    let low = (bits & 0x3F) as u8;
    0x80 | low
}

impl CodeUnit for u8 {
    const WIDTH: Width = Width::Utf8;

    fn decode_with(src: &[u8], opts: &DecodeOptions) -> Option<Decoded> {
        let &lead = src.first()?;

        if lead < 0x80 {
            return Some(Decoded::valid(u32::from(lead), 1));
        }

        if lead < 0xC0 {
            // Stray continuation: resynchronize at the next non-continuation byte.
            let run = src.iter().take_while(|&&b| b & 0xC0 == 0x80).count();
            return Some(Decoded::replaced(*opts, run));
        }

        // An all-ones lead claims 32 units, so it swallows any shorter span.
        let len = if lead == 0xFF {
            32
        } else {
            lead.leading_ones() as usize
        };
        if len > src.len() {
            return Some(Decoded::replaced(*opts, src.len()));
        }

        let tail = |i: usize| u32::from(src[i] & 0x3F);
        let scalar = match len {
            2 => (u32::from(lead & 0x1F) << 6) | tail(1),
            3 => (u32::from(lead & 0x0F) << 12) | (tail(1) << 6) | tail(2),
            4 => (u32::from(lead & 0x07) << 18) | (tail(1) << 12) | (tail(2) << 6) | tail(3),
            // 0xF8 and above
            _ => return Some(Decoded::replaced(*opts, len)),
        };

        Some(Decoded::valid(scalar, len))
    }

    fn encoded_len(scalar: u32) -> usize {
        match scalar {
            0..0x80 => 1,
            0x80..0x800 => 2,
            0x800..0x1_0000 => 3,
            0x1_0000..0x20_0000 => 4,
            _ => 0,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn encode_into(dst: &mut [u8], scalar: u32) -> usize {
        let needed = Self::encoded_len(scalar);
        if needed == 0 || needed > dst.len() {
            return 0;
        }

        match needed {
            1 => dst[0] = scalar as u8,
            2 => {
                dst[0] = 0xC0 | (scalar >> 6) as u8;
                dst[1] = continuation(scalar);
            }
            3 => {
                dst[0] = 0xE0 | (scalar >> 12) as u8;
                dst[1] = continuation(scalar >> 6);
                dst[2] = continuation(scalar);
            }
            _ => {
                dst[0] = 0xF0 | (scalar >> 18) as u8;
                dst[1] = continuation(scalar >> 12);
                dst[2] = continuation(scalar >> 6);
                dst[3] = continuation(scalar);
            }
        }

        needed
    }
}

impl CodeUnit for u16 {
    const WIDTH: Width = Width::Utf16;

    fn decode_with(src: &[u16], opts: &DecodeOptions) -> Option<Decoded> {
        let (&first, rest) = src.split_first()?;
        let first = u32::from(first);

        if HIGH_SURROGATES.contains(&first) {
            let Some(&second) = rest.first() else {
                return Some(Decoded::replaced(*opts, src.len()));
            };
            let second = u32::from(second);
            if opts.surrogate_pairing == SurrogatePairing::Checked
                && !LOW_SURROGATES.contains(&second)
            {
                return Some(Decoded::replaced(*opts, 1));
            }
            let scalar = 0x1_0000 + ((first & 0x3FF) << 10) + (second & 0x3FF);
            return Some(Decoded::valid(scalar, 2));
        }

        if LOW_SURROGATES.contains(&first) {
            return Some(Decoded::replaced(*opts, 1));
        }

        Some(Decoded::valid(first, 1))
    }

    fn encoded_len(scalar: u32) -> usize {
        match scalar {
            0..0xD800 | 0xE000..0x1_0000 => 1,
            0x1_0000..0x11_0000 => 2,
            // Standalone surrogates and values past U+10FFFF.
            _ => 0,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn encode_into(dst: &mut [u16], scalar: u32) -> usize {
        let needed = Self::encoded_len(scalar);
        if needed == 0 || needed > dst.len() {
            return 0;
        }

        if needed == 1 {
            dst[0] = scalar as u16;
        } else {
            let v = scalar - 0x1_0000;
            dst[0] = (0xD800 + (v >> 10)) as u16;
            dst[1] = (0xDC00 + (v & 0x3FF)) as u16;
        }

        needed
    }
}

impl CodeUnit for u32 {
    const WIDTH: Width = Width::Utf32;

    fn decode_with(src: &[u32], _opts: &DecodeOptions) -> Option<Decoded> {
        src.first().map(|&unit| Decoded::valid(unit, 1))
    }

    fn encoded_len(_scalar: u32) -> usize {
        1
    }

    fn encode_into(dst: &mut [u32], scalar: u32) -> usize {
        match dst.first_mut() {
            Some(slot) => {
                *slot = scalar;
                1
            }
            None => 0,
        }
    }
}
