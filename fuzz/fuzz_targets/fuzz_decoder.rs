#![no_main]
use arbitrary::Arbitrary;
use jsonpour::{ArrayableFn, Decoder, DecoderOptions, Value};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    /// Refill size, 1..=256.
    buffer_size: u8,
    data: Vec<u8>,
}

fn options(buffer_size: u8) -> DecoderOptions {
    DecoderOptions {
        buffer_size: usize::from(buffer_size) + 1,
        ..Default::default()
    }
}

fuzz_target!(|input: Input| {
    let Input { buffer_size, data } = input;

    // Malformed input must fail cleanly, never panic.
    let mut ours = Value::Null;
    let mut dec = Decoder::with_options(&data[..], options(buffer_size));
    let res = dec.decode_variable(&mut ours);

    // Anything serde_json accepts must decode to the same tree.
    if let Ok(theirs) = serde_json::from_slice::<Value>(&data) {
        assert!(res.is_ok(), "rejected valid JSON: {res:?}");
        assert!(dec.error().is_none());
        assert_eq!(ours, theirs);
    }

    // The arrayable path must agree with the skipper on where a value ends.
    let mut dec = Decoder::with_options(&data[..], options(buffer_size));
    if dec.decode_arrayable(&mut ArrayableFn::empty()).is_ok() {
        let end = dec.cursor();
        let mut skipper = Decoder::with_options(&data[..], options(buffer_size));
        skipper.skip_value().unwrap();
        assert_eq!(skipper.cursor(), end);
    }
});
