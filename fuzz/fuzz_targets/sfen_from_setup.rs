#![no_main]

use libfuzzer_sys::fuzz_target;
use shogiban::{sfen::Sfen, Setup};

fuzz_target!(|setup: Setup| {
    let sfen = Sfen::from_setup(setup.clone()).to_string();
    let roundtripped = Sfen::from_ascii(sfen.as_bytes()).expect("roundtrip via: {sfen}");
    assert_eq!(setup, roundtripped.into_setup());
});
