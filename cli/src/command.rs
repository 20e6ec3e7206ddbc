use anyhow::{Context, Result, bail};
use std::str::FromStr;
use sweeper_core::{Coord, Coord2, Difficulty};

pub const HELP: &str = "\
commands:
  r ROW COL     reveal a cell
  f ROW COL     flag or unflag a cell
  n [PRESET]    new game, optionally beginner/intermediate/expert
  s             show the board
  h             this help
  q             quit";

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame(Option<Difficulty>),
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Self::Show);
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Reveal(parse_coords(&mut words)?),
            "f" | "flag" => Self::Flag(parse_coords(&mut words)?),
            "n" | "new" => match words.next() {
                None => Self::NewGame(None),
                Some(name) => Self::NewGame(Some(
                    Difficulty::preset(name)
                        .with_context(|| format!("unknown difficulty {name:?}"))?,
                )),
            },
            "s" | "show" => Self::Show,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => bail!("unknown command {other:?}, try \"help\""),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected argument {extra:?}");
        }
        Ok(command)
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2> {
    let mut next = |axis: &str| -> Result<Coord> {
        let word = words.next().with_context(|| format!("missing {axis}"))?;
        word.parse::<Coord>()
            .with_context(|| format!("invalid {axis} {word:?}"))
    };
    Ok((next("row")?, next("column")?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cell_commands() {
        assert_eq!("r 3 4".parse::<Command>().unwrap(), Command::Reveal((3, 4)));
        assert_eq!("FLAG 0 12".parse::<Command>().unwrap(), Command::Flag((0, 12)));
    }

    #[test]
    fn parses_new_game_with_and_without_preset() {
        assert_eq!("n".parse::<Command>().unwrap(), Command::NewGame(None));
        assert_eq!(
            "new Expert".parse::<Command>().unwrap(),
            Command::NewGame(Some(Difficulty::EXPERT))
        );
        assert!("n impossible".parse::<Command>().is_err());
    }

    #[test]
    fn blank_line_shows_board() {
        assert_eq!("   ".parse::<Command>().unwrap(), Command::Show);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!("r 3".parse::<Command>().is_err());
        assert!("r a b".parse::<Command>().is_err());
        assert!("r 300 1".parse::<Command>().is_err());
        assert!("r 1 1 1".parse::<Command>().is_err());
        assert!("dig 1 1".parse::<Command>().is_err());
    }
}
