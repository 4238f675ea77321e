use alloc::{string::String, vec::Vec};

use quickcheck::QuickCheck;

use crate::{CodeUnit, transcode_to_vec};

fn test_count() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Encodes `scalar` as `D` and decodes it again; `None` if `D` cannot hold it.
fn round_trip<D: CodeUnit>(scalar: u32) -> Option<u32> {
    let mut buf = [D::default(); 4];
    let n = D::encode_into(&mut buf, scalar);
    if n == 0 {
        return None;
    }
    let decoded = D::decode(&buf[..n])?;
    (decoded.len == n && !decoded.malformed).then_some(decoded.scalar)
}

/// Property: every scalar an encoder accepts decodes back to itself.
#[test]
fn scalar_round_trip_quickcheck() {
    fn prop(raw: u32) -> bool {
        // Bias half the inputs into the Unicode range.
        let scalar = if raw & 1 == 0 { raw >> 1 } else { (raw >> 1) % 0x11_0000 };
        let utf8 = u8::encoded_len(scalar) == 0 || round_trip::<u8>(scalar) == Some(scalar);
        let utf16 = u16::encoded_len(scalar) == 0 || round_trip::<u16>(scalar) == Some(scalar);
        let utf32 = round_trip::<u32>(scalar) == Some(scalar);
        utf8 && utf16 && utf32
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(u32) -> bool);
}

/// Property: well-formed text survives UTF-8 → UTF-16 → UTF-32 → UTF-8.
#[test]
fn valid_text_round_trip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String) -> bool {
        let text: String = text.chars().filter(|&c| c != '\0').collect();

        let utf16: Vec<u16> = transcode_to_vec(text.as_bytes());
        let utf32: Vec<u32> = transcode_to_vec(&utf16);
        let utf8: Vec<u8> = transcode_to_vec(&utf32);

        utf16 == text.encode_utf16().collect::<Vec<_>>()
            && utf32 == text.chars().map(u32::from).collect::<Vec<_>>()
            && utf8 == text.as_bytes()
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(String) -> bool);
}

#[test]
fn every_bmp_and_supplementary_scalar_round_trips() {
    for scalar in (0..0xD800).chain(0xE000..0x11_0000) {
        assert_eq!(round_trip::<u8>(scalar), Some(scalar), "UTF-8 U+{scalar:04X}");
        assert_eq!(round_trip::<u16>(scalar), Some(scalar), "UTF-16 U+{scalar:04X}");
    }
}
