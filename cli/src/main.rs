use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use sapper_core::*;
use web_time::Instant;

use command::{Command, HELP};

mod command;
mod render;

/// Minesweeper in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Board preset
    #[arg(short, long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Seed for mine placement, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Ledger of finished games, used for best times
    #[arg(long, default_value = "game_records.txt")]
    records: PathBuf,

    /// Keep the ledger in memory only
    #[arg(long)]
    no_records: bool,

    /// Print each board snapshot as a JSON line instead of text
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let log: Box<dyn RecordLog> = if cli.no_records {
        Box::new(MemoryRecordLog::default())
    } else {
        Box::new(FileRecordLog::new(&cli.records))
    };
    let records = RecordStore::load(log)
        .with_context(|| format!("Could not load records from {}", cli.records.display()))?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("Starting {} game, seed {}", cli.difficulty, seed);

    let mut game = Game::new(cli.difficulty, records, seed);
    run(&mut game, cli.json)
}

/// Reads stdin on its own thread so the main loop can wake up for timer ticks.
fn spawn_input_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn run<L: RecordLog>(game: &mut Game<L>, json: bool) -> anyhow::Result<()> {
    let input = spawn_input_reader();
    let mut out = io::stdout().lock();
    let mut ticker = Ticker::new();
    let mut shown_secs = 0;

    writeln!(out, "{HELP}")?;
    show(&mut out, game, json)?;

    loop {
        let line = match ticker.until_next(Instant::now()) {
            Some(wait) => match input.recv_timeout(wait) {
                Ok(line) => line,
                Err(RecvTimeoutError::Timeout) => {
                    if let Some(secs) = ticker.poll(game.session(), Instant::now()) {
                        if secs != shown_secs && !json {
                            shown_secs = secs;
                            render::status(&mut out, &game.snapshot(), secs)?;
                        }
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            },
            None => match input.recv() {
                Ok(line) => line,
                Err(_) => break,
            },
        };

        let command = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => {
                writeln!(out, "{HELP}")?;
                show(&mut out, game, json)?;
                continue;
            }
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                show(&mut out, game, json)?;
                continue;
            }
        };

        match apply(game, command) {
            Ok(Some(report)) => {
                show(&mut out, game, json)?;
                render::report(&mut out, &report)?;
            }
            Ok(None) => show(&mut out, game, json)?,
            Err(err) => {
                writeln!(out, "{err}")?;
                show(&mut out, game, json)?;
            }
        }

        if game.session().phase().is_active() && !ticker.is_running() {
            shown_secs = 0;
            ticker.start(Instant::now());
        }
    }

    writeln!(out)?;
    Ok(())
}

fn apply<L: RecordLog>(game: &mut Game<L>, command: Command) -> Result<Option<GameReport>> {
    match command {
        Command::Reveal(coords) => Ok(game.reveal(coords)?.report),
        Command::Flag(coords) => Ok(game.toggle_flag(coords)?.report),
        Command::Difficulty(difficulty) => {
            game.set_difficulty(difficulty);
            Ok(None)
        }
        Command::Restart => {
            game.restart();
            Ok(None)
        }
        Command::Help | Command::Quit => Ok(None),
    }
}

fn show<L: RecordLog>(out: &mut impl Write, game: &Game<L>, json: bool) -> anyhow::Result<()> {
    let snapshot = game.snapshot();
    if json {
        serde_json::to_writer(&mut *out, &snapshot)?;
        writeln!(out)?;
    } else {
        writeln!(out)?;
        render::board(out, &snapshot)?;
        render::status(out, &snapshot, snapshot.elapsed_secs)?;
    }
    out.flush()?;
    Ok(())
}
