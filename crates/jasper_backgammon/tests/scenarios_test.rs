//! Scenario tests for the move engine.

use jasper_backgammon::{
    Board, Conflict, Dice, Game, IllegalMoveError, Location, MoveRequest, Piece,
    can_auto_resolve_move_conflict, can_auto_resolve_roll_conflict,
};

fn spot(index: usize) -> Location {
    Location::spot(index).unwrap()
}

#[test]
fn test_hit_sends_blot_to_bar() {
    let mut board = Board::empty();
    board.place(spot(0), Piece::Red, 1).place(spot(3), Piece::Black, 1);
    let mut game = Game::with_board(board);
    game.roll(Piece::Red, Dice::new(3, 3).unwrap());

    let result = game.drop(MoveRequest::new(Piece::Red, spot(0), spot(3))).unwrap();

    assert!(*result.hit());
    assert_eq!(game.board().bar_count(Piece::Black), 1);
    assert_eq!(game.board().stack(spot(3)), &[Piece::Red]);
    assert_eq!(game.lines().last().map(String::as_str), Some("r 1x4"));
}

#[test]
fn test_try_move_hit_without_dice() {
    let mut board = Board::empty();
    board.place(spot(0), Piece::Red, 1).place(spot(3), Piece::Black, 1);
    let mut game = Game::with_board(board);

    let result = game.try_move(Piece::Red, spot(0), spot(3)).unwrap();

    assert!(*result.hit());
    assert_eq!(game.comment(), "r 1x4");
}

#[test]
fn test_blocked_spot_rejects_move() {
    let mut board = Board::empty();
    board.place(spot(0), Piece::Red, 1).place(spot(5), Piece::Black, 5);
    let mut game = Game::with_board(board.clone());

    assert!(game.try_move(Piece::Red, spot(0), spot(5)).is_none());
    assert_eq!(game.board(), &board);
    assert!(game.log().is_empty());

    game.roll(Piece::Red, Dice::new(5, 2).unwrap());
    assert_eq!(
        game.drop(MoveRequest::new(Piece::Red, spot(0), spot(5))),
        Err(IllegalMoveError::Blocked(spot(5)))
    );
    assert_eq!(game.board(), &board);
    assert_eq!(game.log().len(), 1);
}

#[test]
fn test_bar_reentry_required_first() {
    let mut board = Board::empty();
    board.place(Location::Bar, Piece::Red, 1).place(spot(0), Piece::Red, 1);
    let mut game = Game::with_board(board);
    game.roll(Piece::Red, Dice::new(2, 4).unwrap());

    for to in [1, 2, 4] {
        assert_eq!(
            game.drop(MoveRequest::new(Piece::Red, spot(0), spot(to))),
            Err(IllegalMoveError::MustEnterFromBar(Piece::Red))
        );
    }

    game.drop(MoveRequest::new(Piece::Red, Location::Bar, spot(1))).unwrap();
    assert_eq!(game.board().bar_count(Piece::Red), 0);

    game.drop(MoveRequest::new(Piece::Red, spot(0), spot(4))).unwrap();
    assert_eq!(game.comment(), "r 2-4\nr 2\nr 1 5");
}

#[test]
fn test_bar_entry_hit_notation() {
    let mut board = Board::empty();
    board.place(Location::Bar, Piece::Black, 1).place(spot(20), Piece::Red, 1);
    let mut game = Game::with_board(board);
    game.roll(Piece::Black, Dice::new(4, 1).unwrap());

    let result = game.drop(MoveRequest::new(Piece::Black, Location::Bar, spot(20))).unwrap();

    assert!(*result.hit());
    assert_eq!(game.board().bar_count(Piece::Red), 1);
    assert_eq!(game.lines().last().map(String::as_str), Some("b x21"));
}

#[test]
fn test_bear_off_larger_die_for_farthest_piece() {
    let mut board = Board::empty();
    board
        .place(spot(21), Piece::Red, 1)
        .place(spot(23), Piece::Red, 1)
        .place(Location::Off, Piece::Red, 13);
    let mut game = Game::with_board(board);
    game.roll(Piece::Red, Dice::new(6, 1).unwrap());

    // Spot 21 is three pips from home exit; the 6 covers it.
    game.drop(MoveRequest::new(Piece::Red, spot(21), Location::Off)).unwrap();
    assert_eq!(game.active_roll().unwrap().remaining(), &[1]);

    game.drop(MoveRequest::new(Piece::Red, spot(23), Location::Off)).unwrap();
    assert_eq!(game.board().off_count(Piece::Red), 15);
    assert_eq!(game.comment(), "r 6-1\nr 22 off\nr 24 off");
}

#[test]
fn test_bear_off_refused_outside_home() {
    let mut board = Board::empty();
    board.place(spot(23), Piece::Red, 1).place(spot(12), Piece::Red, 1);
    let mut game = Game::with_board(board);

    assert!(game.try_move(Piece::Red, spot(23), Location::Off).is_none());

    game.roll(Piece::Red, Dice::new(1, 2).unwrap());
    assert_eq!(
        game.drop(MoveRequest::new(Piece::Red, spot(23), Location::Off)),
        Err(IllegalMoveError::NotAllHome(Piece::Red))
    );
}

#[test]
fn test_raw_sentinels_reach_engine() {
    let mut board = Board::empty();
    board.place(spot(2), Piece::Black, 1);
    let mut game = Game::with_board(board);
    game.roll(Piece::Black, Dice::new(3, 2).unwrap());

    game.drop_raw(Piece::Black, 2, -2).unwrap();
    assert_eq!(game.board().off_count(Piece::Black), 1);
}

#[test]
fn test_doubles_allow_four_moves() {
    let mut game = Game::new();
    game.roll(Piece::Black, Dice::new(2, 2).unwrap());
    for (from, to) in [(12, 10), (12, 10), (10, 8), (10, 8)] {
        game.drop(MoveRequest::new(Piece::Black, spot(from), spot(to))).unwrap();
    }
    assert!(game.active_roll().unwrap().is_exhausted());
    assert_eq!(game.board().count_at(spot(8), Piece::Black), 2);
}

#[test]
fn test_replay_round_trip() {
    let comment = "r 3-1\nr 17 20\nr 19 20\nb 6-4\nb 24 18\nb 13 9\nr 5-5\nr 12 17\nr 12 17\nr 17/22\nr 17-22";
    let game = Game::from_comment(comment);

    let reparsed = Game::from_comment(&game.comment());
    assert_eq!(reparsed, game);
    assert_eq!(Game::from_comment(&reparsed.comment()).comment(), game.comment());
}

#[test]
fn test_roll_conflict_scenario() {
    let conflict = Conflict::new(["r 5-2"], ["b 5-2"]);
    assert!(can_auto_resolve_roll_conflict(&conflict));
}

#[test]
fn test_move_roll_conflict_scenario() {
    let conflict = Conflict::new(["r 4-5"], ["r 1/3"]);
    assert!(!can_auto_resolve_move_conflict(&conflict));
}
