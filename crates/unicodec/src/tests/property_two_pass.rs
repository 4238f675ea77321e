use alloc::{vec, vec::Vec};

use quickcheck::QuickCheck;

use crate::{CodeUnit, measure, write_into};

fn check_two_pass<D: CodeUnit, S: CodeUnit>(src: &[S]) -> bool {
    let first = measure::<D, S>(src);
    let second = measure::<D, S>(src);
    if first != second {
        return false;
    }
    // Pad the buffer to catch writes past the measured size.
    let mut dst = vec![D::default(); first + 4];
    let written = write_into(&mut dst, src);
    written == first && dst[first..].iter().all(|&u| u == D::default())
}

fn check_progress<S: CodeUnit>(src: &[S]) -> bool {
    let mut pos = 0;
    while pos < src.len() {
        let Some(decoded) = S::decode(&src[pos..]) else {
            return false;
        };
        if decoded.len == 0 || pos + decoded.len > src.len() {
            return false;
        }
        pos += decoded.len;
    }
    pos == src.len()
}

/// Property: for arbitrary (mostly malformed) input, the measured size
/// equals the written size for every destination width.
#[test]
fn measured_equals_written_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(bytes: Vec<u8>, units16: Vec<u16>, units32: Vec<u32>) -> bool {
        check_two_pass::<u8, u8>(&bytes)
            && check_two_pass::<u16, u8>(&bytes)
            && check_two_pass::<u32, u8>(&bytes)
            && check_two_pass::<u8, u16>(&units16)
            && check_two_pass::<u16, u16>(&units16)
            && check_two_pass::<u32, u16>(&units16)
            && check_two_pass::<u8, u32>(&units32)
            && check_two_pass::<u16, u32>(&units32)
            && check_two_pass::<u32, u32>(&units32)
    }

    QuickCheck::new()
        .tests(1_000)
        .quickcheck(prop as fn(Vec<u8>, Vec<u16>, Vec<u32>) -> bool);
}

/// Property: decoding always moves forward and lands exactly on the end.
#[test]
fn decode_progress_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(bytes: Vec<u8>, units16: Vec<u16>, units32: Vec<u32>) -> bool {
        check_progress(&bytes) && check_progress(&units16) && check_progress(&units32)
    }

    QuickCheck::new()
        .tests(1_000)
        .quickcheck(prop as fn(Vec<u8>, Vec<u16>, Vec<u32>) -> bool);
}

#[test]
fn every_two_byte_utf8_prefix_makes_progress() {
    for lead in 0..=u8::MAX {
        for next in 0..=u8::MAX {
            assert!(check_progress(&[lead, next]), "{lead:02X} {next:02X}");
            assert!(check_two_pass::<u16, u8>(&[lead, next]), "{lead:02X} {next:02X}");
        }
    }
}
