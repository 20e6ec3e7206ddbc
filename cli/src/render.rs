use std::fmt::Write;
use sweeper_core::{Cell, CellStatus, GameStatus, MinePlacer, Session};

/// Three-character counter, like the LCD ones.
pub fn counter(value: i64) -> String {
    format!("{:03}", value.clamp(-99, 999))
}

fn glyph(cell: &Cell, status: GameStatus, triggered: bool) -> char {
    match cell.status {
        CellStatus::Hidden => '#',
        CellStatus::Flagged if status == GameStatus::Lost && !cell.is_mine => 'X',
        CellStatus::Flagged => 'F',
        CellStatus::Revealed if triggered => '@',
        CellStatus::Revealed if cell.is_mine => '*',
        CellStatus::Revealed if cell.neighbor_mines == 0 => '.',
        CellStatus::Revealed => char::from(b'0' + cell.neighbor_mines),
    }
}

fn status_line(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Idle => "reveal any cell to start",
        GameStatus::Playing => "playing",
        GameStatus::Won => "cleared, you win",
        GameStatus::Lost => "boom, you lose",
    }
}

/// Board with row and column labels plus the counters.
pub fn render<P: MinePlacer>(session: &Session<P>) -> String {
    let board = session.board();
    let status = session.status();
    let mut out = String::new();

    // formatting into a String cannot fail
    let _ = writeln!(
        out,
        "{} [{}]  mines {}  time {}  {}",
        session.difficulty().name,
        session.difficulty().mines,
        counter(session.mines_remaining().into()),
        counter(session.elapsed().into()),
        status_line(status),
    );

    out.push_str("    ");
    for col in 0..board.cols() {
        let _ = write!(out, "{:>3}", col);
    }
    out.push('\n');

    for (row, cells) in board.iter_rows().enumerate() {
        let _ = write!(out, "{:>3} ", row);
        for cell in cells {
            let triggered = session.triggered_mine() == Some(cell.coords());
            let _ = write!(out, "{:>3}", glyph(cell, status, triggered));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::{Difficulty, FixedPlacer};

    #[test]
    fn counters_are_clamped() {
        assert_eq!(counter(7), "007");
        assert_eq!(counter(1234), "999");
        assert_eq!(counter(-5), "-05");
        assert_eq!(counter(-250), "-99");
    }

    #[test]
    fn lost_board_marks_trigger_and_wrong_flags() {
        let difficulty = Difficulty::custom(5, 5, 2).unwrap();
        let mut session = Session::new(difficulty, FixedPlacer::new([(3, 4), (4, 3)])).unwrap();
        session.on_reveal((0, 0)).unwrap();
        session.on_flag_toggle((4, 4)).unwrap();
        session.on_reveal((4, 3)).unwrap();

        let text = render(&session);
        let last_row = text.lines().last().unwrap();

        assert!(text.contains("boom"));
        assert_eq!(last_row.split_whitespace().collect::<Vec<_>>(), ["4", ".", ".", "1", "@", "X"]);
        assert!(text.lines().nth(5).unwrap().ends_with('*'));
    }

    #[test]
    fn idle_board_is_all_hidden() {
        let session = Session::seeded(Difficulty::BEGINNER, 0).unwrap();
        let text = render(&session);

        assert!(text.starts_with("Beginner [10]  mines 010  time 000"));
        assert_eq!(text.matches('#').count(), 81);
    }
}
