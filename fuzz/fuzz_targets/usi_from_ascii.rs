#![no_main]

use libfuzzer_sys::fuzz_target;
use shogiban::usi::UsiMove;

fuzz_target!(|data: &[u8]| {
    let Ok(usi) = UsiMove::from_ascii(data) else {
        return;
    };
    let roundtripped = UsiMove::from_ascii(usi.to_string().as_bytes()).expect("roundtrip");
    assert_eq!(usi, roundtripped);
});
