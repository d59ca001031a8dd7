use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use anyhow::Context;
use log::{info, warn};

#[allow(dead_code)]
mod config;
#[allow(dead_code)]
mod game;
#[allow(dead_code)]
mod generators;
#[allow(dead_code)]
mod grids;
#[allow(dead_code)]
mod renderer;
#[allow(dead_code)]
mod runner;
#[allow(dead_code)]
mod store;
#[allow(dead_code)]
mod timeline;

use config::GameConfig;
use game::{Game, Phase};
use store::{JsonFileStore, KeyValueStore};

const HELP: &str = "\
moves:  any mix of u d l r, e.g. `rrdd`
run     let the bunny hop through the queued moves
clear   drop the queued moves
new     build a new maze
size N  resize the maze (5 to 15) and build a new one
wins    show the total wins
quit    leave";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Moves(String),
    Run,
    Clear,
    New,
    Size(usize),
    Wins,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let first = match words.next() {
            Some(word) => word.to_ascii_lowercase(),
            None => return Err("type `help` for the commands".to_string()),
        };

        let command = match first.as_str() {
            "run" | "go" => Command::Run,
            "clear" => Command::Clear,
            "new" => Command::New,
            "wins" => Command::Wins,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "size" => {
                let n = words
                    .next()
                    .and_then(|n| n.parse().ok())
                    .ok_or_else(|| "usage: size N".to_string())?;
                Command::Size(n)
            }
            _ => Command::Moves(line.to_string()),
        };

        Ok(command)
    }
}

struct State<S: KeyValueStore> {
    game: Game<S>,
}

impl<S: KeyValueStore> State<S> {
    // returns false once the player asked to leave
    fn input(&mut self, line: &str, out: &mut impl Write) -> anyhow::Result<bool> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(msg) => {
                writeln!(out, "{}", msg)?;
                return Ok(true);
            }
        };

        match command {
            Command::Moves(symbols) => match self.game.push_symbols(&symbols) {
                Ok(_) => {}
                Err(bad) => writeln!(out, "unknown move {:?}, use u d l r", bad)?,
            },
            Command::Run => {
                self.game.run()?;
                self.play(out)?;
            }
            Command::Clear => self.game.clear_moves(),
            Command::New => self.game.regenerate(),
            Command::Size(n) => {
                let size = self.game.set_size(n);
                info!("maze size set to {}", size);
            }
            Command::Wins => writeln!(out, "Total Wins: {}", self.game.total_wins())?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(false),
        }

        if *self.game.phase() == Phase::Planning {
            self.render(out, None)?;
        }
        Ok(true)
    }

    /// Plays the last run back in real time.
    fn play(&mut self, out: &mut impl Write) -> anyhow::Result<()> {
        let step = self.game.config().step_interval;
        let started = Instant::now();
        let mut shown = None;

        while let Some(frame) = self.game.tick(started.elapsed()) {
            if shown != Some(frame.at) {
                shown = Some(frame.at);
                self.render(out, frame.next)?;
            }
            std::thread::sleep(step.min(Duration::from_millis(100)));
        }

        if let Some(result) = self.game.last_run() {
            writeln!(out, "{}", result.outcome.message())?;
        }
        Ok(())
    }

    fn render(&self, out: &mut impl Write, next: Option<grids::Cell>) -> io::Result<()> {
        write!(
            out,
            "\n{}",
            renderer::render_board(self.game.maze(), self.game.bunny(), next)
        )?;
        writeln!(out, "moves: {}", renderer::render_moves(self.game.moves()))?;
        out.flush()
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = GameConfig::from_env().context("bad configuration")?;
    let wins_file = config.wins_file()?;
    let store = JsonFileStore::open(&wins_file)
        .with_context(|| format!("could not open win counter at {:?}", wins_file))?;
    info!("win counter stored at {:?}", store.path());

    let mut state = State {
        game: Game::new(config, store)?,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{}", HELP)?;
    state.render(&mut out, None)?;

    for line in stdin.lock().lines() {
        let line = line?;

        if *state.game.phase() == Phase::Victory {
            state.game.dismiss_victory();
            state.render(&mut out, None)?;
            continue;
        }

        match state.input(&line, &mut out) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => warn!("{:#}", e),
        }

        if *state.game.phase() == Phase::Victory {
            write!(out, "{}", renderer::render_victory(state.game.total_wins()))?;
            out.flush()?;
        }
    }

    Ok(())
}
