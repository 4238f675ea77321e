use crate::scalar::REPLACEMENT;

/// How a UTF-16 high surrogate treats the unit that follows it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SurrogatePairing {
    /// Consume the next unit as the low half without checking its range.
    ///
    /// `[0xD83D, 0x0041]` decodes to a single (wrong) supplementary scalar
    /// and both units are consumed.
    #[default]
    Lenient,
    /// Require the next unit to be a low surrogate.
    ///
    /// Otherwise the high surrogate alone is replaced and the next unit is
    /// decoded on its own.
    Checked,
}

/// Configuration for decoding a single scalar.
///
/// # Examples
///
/// ```rust
/// use unicodec::{CodeUnit, DecodeOptions, SurrogatePairing};
///
/// let opts = DecodeOptions {
///     surrogate_pairing: SurrogatePairing::Checked,
///     ..Default::default()
/// };
/// let d = u16::decode_with(&[0xD83D, 0x0041], &opts).unwrap();
/// assert_eq!((d.scalar, d.len, d.malformed), (u32::from(b'?'), 1, true));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecodeOptions {
    /// Scalar substituted for malformed sequences.
    ///
    /// # Default
    ///
    /// `0x3F` (`'?'`)
    pub replacement: u32,

    /// Handling of the unit after a UTF-16 high surrogate.
    ///
    /// # Default
    ///
    /// [`SurrogatePairing::Lenient`]
    pub surrogate_pairing: SurrogatePairing,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            replacement: REPLACEMENT,
            surrogate_pairing: SurrogatePairing::Lenient,
        }
    }
}

/// Configuration for a [`Transcoder`](crate::Transcoder).
///
/// Both passes of a conversion must run with the same options, otherwise the
/// measured size no longer matches what the write pass produces.
///
/// # Examples
///
/// ```rust
/// use unicodec::{TranscodeOptions, Transcoder};
///
/// let t = Transcoder::new(TranscodeOptions {
///     stop_at_nul: false,
///     ..Default::default()
/// });
/// assert_eq!(t.measure::<u16, u8>(b"a\0b"), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TranscodeOptions {
    /// Scalar substituted for malformed source sequences.
    ///
    /// The replacement goes through the destination encoder like any other
    /// scalar, so a replacement the destination cannot encode is dropped.
    ///
    /// # Default
    ///
    /// `0x3F` (`'?'`)
    pub replacement: u32,

    /// Handling of the unit after a UTF-16 high surrogate in the source.
    ///
    /// # Default
    ///
    /// [`SurrogatePairing::Lenient`]
    pub surrogate_pairing: SurrogatePairing,

    /// Stop after the first decoded NUL scalar.
    ///
    /// The NUL itself is still encoded and counted. This makes the same call
    /// work for explicit-length spans and for zero-terminated buffers whose
    /// length is an upper bound.
    ///
    /// # Default
    ///
    /// `true`
    pub stop_at_nul: bool,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            replacement: REPLACEMENT,
            surrogate_pairing: SurrogatePairing::Lenient,
            stop_at_nul: true,
        }
    }
}

impl TranscodeOptions {
    /// The per-scalar decode settings carried by these options.
    #[must_use]
    pub fn decode_options(self) -> DecodeOptions {
        DecodeOptions {
            replacement: self.replacement,
            surrogate_pairing: self.surrogate_pairing,
        }
    }
}
