#![no_main]

use libfuzzer_sys::fuzz_target;
use tracepad_core::codec::PatternCodec;

fuzz_target!(|data: &[u8]| {
    // First byte picks the grid resolution, the rest is the token.
    let Some((&divisions, payload)) = data.split_first() else {
        return;
    };
    let Ok(token) = std::str::from_utf8(payload) else {
        return;
    };
    let codec = PatternCodec::new(u32::from(divisions));

    if let Ok(pattern) = codec.decode(token) {
        // A decoded pattern re-encodes to the same token and has no repeats.
        assert_eq!(codec.encode(&pattern), token, "round trip changed the token");
        for (i, p) in pattern.iter().enumerate() {
            assert!(!pattern[i + 1..].contains(p), "duplicate cell decoded");
        }
    }
});
