use sweeper_core::*;

fn safe_hidden_cells(session: &Session) -> Vec<Coord2> {
    session
        .board()
        .iter()
        .filter(|cell| !cell.is_mine && cell.status == CellStatus::Hidden)
        .map(Cell::coords)
        .collect()
}

#[test]
fn clearing_every_safe_cell_wins() {
    for preset in Difficulty::PRESETS {
        for seed in 0..8 {
            let mut session = Session::seeded(preset.clone(), seed).unwrap();
            let mut outcome = session.on_reveal((0, 0)).unwrap();

            while let Some(&next) = safe_hidden_cells(&session).first() {
                assert_eq!(session.status(), GameStatus::Playing);
                session.tick();
                outcome = session.on_reveal(next).unwrap();
                assert!(!outcome.exploded());
            }

            assert_eq!(outcome, RevealOutcome::Won, "{} seed {}", preset.name, seed);
            assert_eq!(session.status(), GameStatus::Won);
            assert_eq!(session.flags_used(), preset.mines);
            assert_eq!(session.mines_remaining(), 0);
            assert!(
                session
                    .board()
                    .iter()
                    .filter(|cell| cell.is_mine)
                    .all(|cell| cell.status == CellStatus::Flagged)
            );
        }
    }
}

#[test]
fn stepping_on_a_mine_loses() {
    let mut session = Session::seeded(Difficulty::INTERMEDIATE, 17).unwrap();
    session.on_reveal((8, 8)).unwrap();
    session.advance(12);

    let mine = session
        .board()
        .iter()
        .find(|cell| cell.is_mine)
        .map(Cell::coords)
        .unwrap();
    let (other_row, other_col) = session
        .board()
        .iter()
        .filter(|cell| cell.is_mine && cell.coords() != mine)
        .map(Cell::coords)
        .next()
        .unwrap();
    session.on_flag_toggle((other_row, other_col)).unwrap();

    assert_eq!(session.on_reveal(mine), Ok(RevealOutcome::HitMine));
    assert_eq!(session.status(), GameStatus::Lost);
    assert_eq!(session.triggered_mine(), Some(mine));
    assert_eq!(session.elapsed(), 12);
    assert!(
        session
            .board()
            .iter()
            .filter(|cell| cell.is_mine)
            .all(|cell| cell.status == CellStatus::Revealed)
    );

    session.tick();
    assert_eq!(session.elapsed(), 12);
}

#[test]
fn first_reveal_in_the_middle_of_a_beginner_board() {
    for seed in 0..16 {
        let mut session = Session::seeded(Difficulty::BEGINNER, seed).unwrap();

        let outcome = session.on_reveal((4, 4)).unwrap();

        assert!(!outcome.exploded());
        let board = session.board();
        assert_eq!(board.iter().filter(|cell| cell.is_mine).count(), 10);
        assert!(
            board
                .iter()
                .filter(|cell| cell.is_mine)
                .all(|cell| !is_adjacent_or_same((4, 4), cell.coords()))
        );
        assert_eq!(board[(4, 4)].status, CellStatus::Revealed);
        assert_eq!(board[(4, 4)].neighbor_mines, 0);
    }
}

#[test]
fn pure_board_functions_compose_into_a_game() {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    let difficulty = Difficulty::BEGINNER;
    let mut rng = SmallRng::seed_from_u64(2024);

    let board = new_board(difficulty.rows, difficulty.cols).unwrap();
    let board = place_mines(board, &difficulty, (0, 8), &mut rng).unwrap();
    let (board, exploded) = reveal(board, (0, 8)).unwrap();
    assert!(!exploded);

    let mine = board.iter().find(|cell| cell.is_mine).unwrap().coords();
    let board = toggle_flag(board, mine).unwrap();
    assert_eq!(board[mine].status, CellStatus::Flagged);

    let (board, exploded) = reveal(board, mine).unwrap();
    assert!(!exploded);
    assert_eq!(board[mine].status, CellStatus::Flagged);

    let board = toggle_flag(board, mine).unwrap();
    let (board, exploded) = reveal(board, mine).unwrap();
    assert!(exploded);
    assert_eq!(board[mine].status, CellStatus::Revealed);
}

#[test]
fn switching_difficulty_mid_game() {
    let mut session = Session::seeded(Difficulty::EXPERT, 5).unwrap();
    session.on_reveal((7, 15)).unwrap();
    session.advance(30);

    session.reset(Difficulty::preset("beginner").unwrap()).unwrap();

    assert_eq!(session.status(), GameStatus::Idle);
    assert_eq!(session.board().size(), (9, 9));
    assert_eq!(session.elapsed(), 0);
    assert_eq!(session.flags_used(), 0);
    assert!(!session.board().has_mines_placed());

    session.on_reveal((8, 8)).unwrap();
    assert_eq!(session.board().mine_count(), 10);
}
