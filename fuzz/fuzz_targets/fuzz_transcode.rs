#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use unicodec::{CodeUnit, SurrogatePairing, TranscodeOptions, Transcoder};

#[derive(Debug, Arbitrary)]
enum Source {
    Utf8(Vec<u8>),
    Utf16(Vec<u16>),
    Utf32(Vec<u32>),
}

#[derive(Debug, Arbitrary)]
struct Input {
    source: Source,
    checked_pairing: bool,
    stop_at_nul: bool,
    replacement: u32,
    /// Units removed from the measured size to exercise short destinations.
    shortfall: u8,
}

/// Both passes must agree, stay in bounds, and never panic.
fn check<D: CodeUnit, S: CodeUnit>(t: &Transcoder, src: &[S], shortfall: usize) {
    let len = t.measure::<D, S>(src);
    assert_eq!(len, t.measure::<D, S>(src), "measurement is not repeatable");

    let mut dst = vec![D::default(); len];
    assert_eq!(t.write_into(&mut dst, src), len, "write pass diverged");
    if t.try_write_into(&mut dst, src).is_ok() {
        assert_eq!(t.transcode_to_vec::<D, S>(src), dst);
    }

    let mut short = vec![D::default(); len.saturating_sub(shortfall)];
    assert!(t.write_into(&mut short, src) <= short.len());
    let _ = t.try_write_into(&mut short, src);
}

fn run<S: CodeUnit>(t: &Transcoder, src: &[S], shortfall: usize) {
    check::<u8, S>(t, src, shortfall);
    check::<u16, S>(t, src, shortfall);
    check::<u32, S>(t, src, shortfall);
}

fuzz_target!(|input: Input| {
    let t = Transcoder::new(TranscodeOptions {
        replacement: input.replacement,
        surrogate_pairing: if input.checked_pairing {
            SurrogatePairing::Checked
        } else {
            SurrogatePairing::Lenient
        },
        stop_at_nul: input.stop_at_nul,
    });
    let shortfall = usize::from(input.shortfall);
    match &input.source {
        Source::Utf8(src) => run(&t, src, shortfall),
        Source::Utf16(src) => run(&t, src, shortfall),
        Source::Utf32(src) => run(&t, src, shortfall),
    }
});
