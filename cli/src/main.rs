use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::Verbosity;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::io::{BufRead, Write};
use sweeper_core::{CellCount, Coord, Difficulty, RandomPlacer, Session};
use web_time::Duration;

use crate::clock::TickClock;
use crate::command::{Command, HELP};

mod clock;
mod command;
mod render;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl From<Preset> for Difficulty {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Beginner => Difficulty::BEGINNER,
            Preset::Intermediate => Difficulty::INTERMEDIATE,
            Preset::Expert => Difficulty::EXPERT,
        }
    }
}

/// Terminal minesweeper, reads commands from stdin.
#[derive(Parser, Debug)]
#[command(version, about, after_help = HELP)]
struct Cli {
    /// Board preset, ignored when a custom size is given
    #[arg(short, long, value_enum, default_value_t = Preset::Beginner)]
    difficulty: Preset,

    /// Custom board rows
    #[arg(long, requires_all = ["cols", "mines"])]
    rows: Option<Coord>,

    /// Custom board columns
    #[arg(long, requires_all = ["rows", "mines"])]
    cols: Option<Coord>,

    /// Custom mine count
    #[arg(long, requires_all = ["rows", "cols"])]
    mines: Option<CellCount>,

    /// Seed for a reproducible mine layout
    #[arg(long)]
    seed: Option<u64>,

    /// Print a JSON snapshot instead of the board after every command
    #[arg(long)]
    json: bool,

    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity,
}

impl Cli {
    fn starting_difficulty(&self) -> Result<Difficulty> {
        match (self.rows, self.cols, self.mines) {
            (Some(rows), Some(cols), Some(mines)) => Difficulty::custom(rows, cols, mines)
                .with_context(|| format!("cannot play {rows}x{cols} with {mines} mines")),
            (None, None, None) => Ok(self.difficulty.into()),
            _ => bail!("--rows, --cols and --mines go together"),
        }
    }

    fn placer(&self) -> RandomPlacer {
        match self.seed {
            Some(seed) => RandomPlacer::seeded(seed),
            None => RandomPlacer::new(SmallRng::from_os_rng()),
        }
    }
}

struct Game {
    session: Session,
    clock: TickClock,
    json: bool,
}

impl Game {
    fn print(&self, out: &mut impl Write) -> Result<()> {
        if self.json {
            serde_json::to_writer(&mut *out, &self.session.snapshot())?;
            writeln!(out)?;
        } else {
            write!(out, "{}", render::render(&self.session))?;
        }
        Ok(())
    }

    /// Runs one command, returns `false` once the player quits.
    fn apply(&mut self, command: Command, out: &mut impl Write) -> Result<bool> {
        let ticks = self.clock.poll();
        self.session.advance(ticks);

        match command {
            Command::Reveal(coords) => {
                let was_idle = self.session.status().is_idle();
                let outcome = self.session.on_reveal(coords)?;
                if was_idle && outcome.has_update() {
                    self.clock.rearm();
                }
                log::info!("Reveal {:?}: {:?}", coords, outcome);
            }
            Command::Flag(coords) => {
                let outcome = self.session.on_flag_toggle(coords)?;
                log::info!("Flag {:?}: {:?}", coords, outcome);
            }
            Command::NewGame(difficulty) => {
                match difficulty {
                    Some(difficulty) => self.session.reset(difficulty)?,
                    None => self.session.restart()?,
                }
                self.clock.rearm();
            }
            Command::Show => {}
            Command::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(true);
            }
            Command::Quit => return Ok(false),
        }

        self.print(out)?;
        Ok(true)
    }

    /// Parses and runs one input line. Bad commands are reported to the
    /// player; only failures to write the report are returned.
    fn run_line(&mut self, line: &str, out: &mut impl Write) -> Result<bool> {
        let result = line
            .parse::<Command>()
            .and_then(|command| self.apply(command, out));
        match result {
            Ok(keep_going) => Ok(keep_going),
            Err(err) => {
                log::warn!("Command {:?} failed: {}", line, err);
                writeln!(out, "error: {err}")?;
                Ok(true)
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    log::debug!("seed: {:?}", cli.seed);

    let difficulty = cli.starting_difficulty()?;
    let session = Session::new(difficulty, cli.placer())?;
    let mut game = Game {
        session,
        clock: TickClock::new(Duration::from_secs(1)),
        json: cli.json,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    game.print(&mut out)?;

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let keep_going = game.run_line(&line, &mut out)?;
        out.flush()?;
        if !keep_going {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn game() -> Game {
        Game {
            session: Session::seeded(Difficulty::BEGINNER, 3).unwrap(),
            clock: TickClock::new(Duration::from_secs(1)),
            json: false,
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn bad_commands_are_reported_and_play_continues() {
        let mut game = game();
        let mut out = Vec::new();

        assert!(game.run_line("dig 1 1", &mut out).unwrap());
        assert!(game.run_line("r 40 40", &mut out).unwrap());

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("error:").count(), 2);
        assert!(game.session.status().is_idle());
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut out = Vec::new();
        assert!(!game().run_line("q", &mut out).unwrap());
    }

    #[test]
    fn write_failures_are_not_swallowed() {
        let mut game = game();

        assert!(game.run_line("dig 1 1", &mut Broken).is_err());
        assert!(game.run_line("r 40 40", &mut Broken).is_err());
    }
}
