use thiserror::Error;

/// Why a scalar could not be written to a destination span.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The scalar has no representation in the destination width, e.g. a
    /// standalone surrogate into UTF-16 or a value past `0x10FFFF`.
    #[error("scalar U+{0:04X} cannot be encoded in the destination width")]
    Unencodable(u32),
    /// The scalar needs more units than the destination has left.
    #[error("scalar needs {needed} units but only {available} remain")]
    InsufficientSpace {
        /// Units the encoded scalar occupies.
        needed: usize,
        /// Units left in the destination.
        available: usize,
    },
}

/// A strict materialization pass stopped early.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{source} at source unit {offset} (after {written} units written)")]
pub struct TranscodeError {
    pub(crate) source: EncodeError,
    pub(crate) offset: usize,
    pub(crate) written: usize,
}

impl TranscodeError {
    /// The encoder failure that stopped the pass.
    #[must_use]
    pub fn kind(&self) -> EncodeError {
        self.source
    }

    /// Offset of the offending scalar in the source span, in source units.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of destination units written before the failure.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }
}
