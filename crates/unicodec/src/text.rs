//! Building narrow text from heterogeneous values.
//!
//! [`build_text`] appends a list of [`Printable`] values left to right with
//! no separator. Wide strings are narrowed through [`from_wide`]; every other
//! kind is written in its natural textual form. The [`text!`](crate::text)
//! macro assembles the list from plain expressions.
use alloc::{string::String, vec::Vec};
use core::fmt::{self, Write as _};

use bstr::{BStr, BString};

use crate::wide::{WideChar, from_wide};

/// A value that can be appended by [`build_text`].
#[derive(Clone, Copy)]
pub enum Printable<'a> {
    /// UTF-8 text, appended as is.
    Text(&'a str),
    /// Narrow bytes, appended as is.
    Bytes(&'a [u8]),
    /// A wide string, narrowed up to its first zero unit.
    Wide(&'a [WideChar]),
    /// A signed integer in decimal.
    Int(i64),
    /// An unsigned integer in decimal.
    UInt(u64),
    /// A double-precision float in its shortest round-trip form.
    Float(f64),
    /// A single-precision float in its shortest round-trip form.
    Float32(f32),
    /// A single character.
    Char(char),
    /// `true` or `false`.
    Bool(bool),
    /// Anything else with a [`fmt::Display`] impl.
    Display(&'a dyn fmt::Display),
}

impl fmt::Debug for Printable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Bytes(b) => f.debug_tuple("Bytes").field(&BStr::new(b)).finish(),
            Self::Wide(w) => f.debug_tuple("Wide").field(w).finish(),
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Float32(v) => f.debug_tuple("Float32").field(v).finish(),
            Self::Char(c) => f.debug_tuple("Char").field(c).finish(),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Display(d) => f.debug_tuple("Display").field(&format_args!("{d}")).finish(),
        }
    }
}

impl Printable<'_> {
    /// Appends this value's text to `out`.
    pub fn append_to(&self, out: &mut Vec<u8>) {
        match *self {
            Self::Text(s) => out.extend_from_slice(s.as_bytes()),
            Self::Bytes(b) => out.extend_from_slice(b),
            Self::Wide(w) => out.extend_from_slice(&from_wide(w)),
            Self::Int(v) => append_display(out, &v),
            Self::UInt(v) => append_display(out, &v),
            Self::Float(v) => append_display(out, &v),
            Self::Float32(v) => append_display(out, &v),
            Self::Char(c) => out.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes()),
            Self::Bool(b) => out.extend_from_slice(if b { b"true" } else { b"false" }),
            Self::Display(d) => append_display(out, d),
        }
    }
}

/// Display writes through a lossy UTF-8 view of the narrowed text.
impl fmt::Display for Printable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Vec::new();
        self.append_to(&mut buf);
        fmt::Display::fmt(BStr::new(&buf), f)
    }
}

struct ByteWriter<'a>(&'a mut Vec<u8>);

impl fmt::Write for ByteWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

fn append_display(out: &mut Vec<u8>, value: &dyn fmt::Display) {
    // A failing Display impl leaves whatever it wrote before failing.
    let _ = write!(ByteWriter(out), "{value}");
}

/// Concatenates `args` left to right with no separator.
///
/// An empty list yields an empty string.
///
/// ```rust
/// use unicodec::{Printable, build_text};
///
/// let text = build_text(&[Printable::Text("VRAM: "), Printable::UInt(8192), Printable::Char('M')]);
/// assert_eq!(text, "VRAM: 8192M");
/// ```
#[must_use]
pub fn build_text(args: &[Printable<'_>]) -> BString {
    let mut out = Vec::new();
    for arg in args {
        arg.append_to(&mut out);
    }
    BString::from(out)
}

/// Conversion used by the [`text!`](crate::text) macro.
#[doc(hidden)]
pub trait PrintableFrom<T> {
    /// Wraps `value` in the matching [`Printable`] variant.
    fn from_printable(value: T) -> Self;
}

macro_rules! impl_printable_from {
    ($variant:ident as $target:ty: $($t:ty),+) => {
        $(
            impl PrintableFrom<$t> for Printable<'_> {
                fn from_printable(value: $t) -> Self {
                    Printable::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

impl_printable_from!(Int as i64: i8, i16, i32, i64);
impl_printable_from!(UInt as u64: u8, u16, u32, u64);
impl_printable_from!(Float as f64: f64);
impl_printable_from!(Float32 as f32: f32);

impl PrintableFrom<isize> for Printable<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn from_printable(value: isize) -> Self {
        Printable::Int(value as i64)
    }
}

impl PrintableFrom<usize> for Printable<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn from_printable(value: usize) -> Self {
        Printable::UInt(value as u64)
    }
}

impl PrintableFrom<char> for Printable<'_> {
    fn from_printable(value: char) -> Self {
        Printable::Char(value)
    }
}

impl PrintableFrom<bool> for Printable<'_> {
    fn from_printable(value: bool) -> Self {
        Printable::Bool(value)
    }
}

impl<'a> PrintableFrom<&'a str> for Printable<'a> {
    fn from_printable(value: &'a str) -> Self {
        Printable::Text(value)
    }
}

impl<'a> PrintableFrom<&'a String> for Printable<'a> {
    fn from_printable(value: &'a String) -> Self {
        Printable::Text(value)
    }
}

impl<'a> PrintableFrom<&'a [u8]> for Printable<'a> {
    fn from_printable(value: &'a [u8]) -> Self {
        Printable::Bytes(value)
    }
}

impl<'a, const N: usize> PrintableFrom<&'a [u8; N]> for Printable<'a> {
    fn from_printable(value: &'a [u8; N]) -> Self {
        Printable::Bytes(value)
    }
}

impl<'a> PrintableFrom<&'a BString> for Printable<'a> {
    fn from_printable(value: &'a BString) -> Self {
        Printable::Bytes(value)
    }
}

impl<'a> PrintableFrom<&'a [WideChar]> for Printable<'a> {
    fn from_printable(value: &'a [WideChar]) -> Self {
        Printable::Wide(value)
    }
}

impl<'a, const N: usize> PrintableFrom<&'a [WideChar; N]> for Printable<'a> {
    fn from_printable(value: &'a [WideChar; N]) -> Self {
        Printable::Wide(value)
    }
}

impl<'a> PrintableFrom<&'a Vec<WideChar>> for Printable<'a> {
    fn from_printable(value: &'a Vec<WideChar>) -> Self {
        Printable::Wide(value)
    }
}

impl<'a> PrintableFrom<Printable<'a>> for Printable<'a> {
    fn from_printable(value: Printable<'a>) -> Self {
        value
    }
}
