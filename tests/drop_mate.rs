use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};
use shogiban::{legal, sfen::Sfen, usi::UsiMove, PositionError};

#[serde_as]
#[derive(Deserialize)]
struct Record {
    #[serde_as(as = "DisplayFromStr")]
    sfen: Sfen,
    #[serde_as(as = "DisplayFromStr")]
    usi: UsiMove,
    legal: bool,
}

#[test]
fn test_drop_reference() {
    let mut reader = csv::Reader::from_path("tests/drop_mate.csv").expect("reader");

    for (i, record) in reader.deserialize().enumerate() {
        let record: Record = record.expect("record");

        let pos = record
            .sfen
            .into_position()
            .or_else(PositionError::ignore_missing_king)
            .expect("legal position");

        let m = record.usi.to_move(&pos);
        assert_eq!(m.is_ok(), record.legal, "line {}: {}", i + 2, record.usi);

        if let (UsiMove::Drop { role, to }, Ok(m)) = (record.usi, m) {
            assert!(legal::legal_drops(&pos, pos.turn(), role).contains(to));
            assert!(legal::all_legal_moves(&pos).contains(&m));
        }
    }
}
