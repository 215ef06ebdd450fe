#![no_main]

use libfuzzer_sys::fuzz_target;
use shogiban::sfen::Sfen;

fuzz_target!(|data: &[u8]| {
    if let Ok(sfen) = Sfen::from_ascii(data) {
        let roundtripped = Sfen::from_ascii(sfen.to_string().as_bytes()).expect("roundtrip");
        assert_eq!(sfen, roundtripped);
    }
});
