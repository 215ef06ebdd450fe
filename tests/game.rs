use shogiban::{usi::UsiMove, Game, Move, PlayError, Role, Side, Square};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn play_usi(game: &mut Game, moves: &str) {
    for usi in moves.split_whitespace() {
        let m = usi
            .parse::<UsiMove>()
            .expect("valid usi")
            .to_move(game.position())
            .expect("legal usi");
        game.play(&m).expect("playable");
    }
}

#[test]
fn test_bishop_exchange() {
    init_logger();

    let mut game = Game::new();
    play_usi(&mut game, "7g7f 3c3d 8h2b+ 3a2b B*4e");

    assert_eq!(game.current_side(), Side::Gote);
    assert_eq!(game.position().ply().get(), 6);
    assert_eq!(game.hand_count(Side::Sente, Role::Bishop), 0);
    assert_eq!(game.hand_count(Side::Gote, Role::Bishop), 1);
    assert_eq!(game.piece_at(4, 5), Some(Role::Bishop.of(Side::Sente)));
    assert_eq!(game.piece_at(1, 7), Some(Role::Silver.of(Side::Gote)));
    assert_eq!(
        game.last_move(),
        Some(Move::Drop {
            role: Role::Bishop,
            to: Square::from_ascii(b"4e").expect("square"),
        })
    );
    assert!(!game.is_in_check(Side::Gote));
}

#[test]
fn test_mate_by_drop() {
    init_logger();

    let pos = "4k4/9/4P4/9/9/9/9/9/4K4 b G 1"
        .parse::<shogiban::sfen::Sfen>()
        .expect("valid sfen")
        .into_position()
        .expect("legal position");
    let mut game = Game::from_position(pos);

    game.apply_drop(Role::Gold, 1, 4).expect("gold in hand");
    game.end_turn_and_evaluate();

    assert!(game.is_in_check(Side::Gote));
    assert!(game.is_game_over());
    assert_eq!(game.winner(), Some(Side::Sente));
    assert_eq!(game.hand_count(Side::Sente, Role::Gold), 0);
}

#[test]
fn test_rejects_illegal_input() {
    init_logger();

    let mut game = Game::new();

    assert_eq!(game.apply_move(9, 0, 8, 0, false), Err(PlayError::OutOfBounds));
    assert_eq!(game.apply_drop(Role::Pawn, -1, 4), Err(PlayError::OutOfBounds));
    assert!(matches!(
        game.apply_drop(Role::Pawn, 4, 4),
        Err(PlayError::NotInHand { .. })
    ));

    // The knight would land on its own pawn.
    let blocked = Move::Normal {
        role: Role::Knight,
        from: Square::from_ascii(b"8i").expect("square"),
        capture: None,
        to: Square::from_ascii(b"7g").expect("square"),
        promotion: false,
    };
    assert_eq!(game.play(&blocked), Err(PlayError::Illegal(blocked)));
    assert_eq!(game.current_side(), Side::Sente);
    assert_eq!(game.position().ply().get(), 1);
}

#[test]
fn test_reset() {
    init_logger();

    let mut game = Game::new();
    play_usi(&mut game, "2g2f 8c8d");
    game.reset();

    assert_eq!(game.current_side(), Side::Sente);
    assert_eq!(game.last_move(), None);
    assert_eq!(game.position(), &shogiban::Position::new());
}
