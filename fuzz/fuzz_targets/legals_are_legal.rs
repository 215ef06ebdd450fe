#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shogiban::{check, legal, Move, Position, Setup};

#[derive(Debug, Arbitrary)]
struct Data {
    candidate: Move,
    setup: Setup,
}

fuzz_target!(|data: Data| {
    let Ok(pos) = Position::from_setup(data.setup) else {
        return;
    };
    let legals = legal::all_legal_moves(&pos);
    assert_eq!(
        legals.contains(&data.candidate),
        legal::is_legal(&pos, &data.candidate)
    );
    for m in &legals {
        assert!(legal::is_legal(&pos, m));
        let mut child = pos.clone();
        child.play_unchecked(m).expect("playable");
        assert!(!check::in_check(&child, pos.turn()));
    }
});
