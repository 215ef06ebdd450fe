use iai::black_box;
use shogiban::{legal, perft, sfen::Sfen, usi::UsiMove, Game, Move, Position, Role, Square};

fn matsuri() -> Position {
    "l6nl/5+P1gk/2np1S3/p1p4Pp/3P2Sp1/1PPb2P1P/P5GS1/R8/LN4bKL w RGgsn5p 1"
        .parse::<Sfen>()
        .expect("valid sfen")
        .into_position()
        .expect("legal position")
}

fn bench_shallow_perft() {
    let pos = Position::new();
    assert_eq!(black_box(perft(black_box(&pos), 3)), 25_470);
}

fn bench_matsuri_perft() {
    assert_eq!(perft(black_box(&matsuri()), 2), 28_684);
}

fn bench_generate_moves() {
    let pos = matsuri();
    assert_eq!(legal::all_legal_moves(black_box(&pos)).len(), 207);
}

fn bench_legal_drops() {
    let pos = matsuri();
    let drops = legal::legal_drops(black_box(&pos), pos.turn(), Role::Pawn);
    assert!(!drops.is_empty());
}

fn bench_play_unchecked() -> Position {
    let m = Move::Normal {
        role: Role::Pawn,
        from: Square::from_ascii(b"7g").expect("square"),
        capture: None,
        to: Square::from_ascii(b"7f").expect("square"),
        promotion: false,
    };

    let mut pos = black_box(Position::new());
    pos.play_unchecked(&m).expect("playable");
    pos
}

fn bench_parse_sfen() -> Sfen {
    black_box("ln1g5/1ks1g3l/1p2p1n2/p1pGs2rp/1P1N1ppp1/P1SB1P2P/1S1p1bPP1/LKG6/4R2NL w 2Pp 91")
        .parse()
        .expect("valid sfen")
}

fn bench_play_usis() -> Game {
    let moves = [
        "7g7f", "3c3d", "2g2f", "4c4d", "3i4h", "3a3b", "5i6h", "8b4b", "6h7h", "5a6b", "5g5f",
        "6b7b", "4i5h", "7b8b", "9g9f", "9c9d", "8h7g", "7a7b", "7h8h", "4a5b", "9i9h", "6a6b",
    ];

    let mut game = black_box(Game::new());
    for usi in black_box(moves) {
        let m = usi
            .parse::<UsiMove>()
            .expect("valid usi")
            .to_move(game.position())
            .expect("legal move");
        game.play(&m).expect("playable");
    }
    game
}

iai::main!(
    bench_shallow_perft,
    bench_matsuri_perft,
    bench_generate_moves,
    bench_legal_drops,
    bench_play_unchecked,
    bench_parse_sfen,
    bench_play_usis,
);
