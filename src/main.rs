use std::io;
use std::path::PathBuf;
use std::thread;

use clap::Parser;
use log::{error, info, LevelFilter};
use snake::config::{settings_path, Settings};
use snake::game::{GameOverReason, GameState};
use snake::input::{listen, TerminalInput};
use snake::logging::{init_file_logger, log_path};
use snake::score::ScoreStore;
use snake::session::{run_session, SessionEnd};
use snake::terminal_runtime::{install_panic_hook, TerminalSession};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Side length of the square board.
    #[arg(long = "grid-size")]
    grid_size: Option<u16>,

    /// Starting tick interval in milliseconds.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// High-score file (one score per line).
    #[arg(long = "scores-file")]
    scores_file: Option<PathBuf>,

    /// JSON settings file with `grid_size` and `tick_interval_ms`.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    #[arg(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let log_file = cli.log_file.clone().unwrap_or_else(log_path);
    if let Err(error) = init_file_logger(&log_file, cli.log_level) {
        eprintln!("Logging disabled ({}): {error}", log_file.display());
    }

    let config_path = cli.config.clone().unwrap_or_else(settings_path);
    let settings = Settings::load_from_path(&config_path)
        .and_then(|settings| settings.with_overrides(cli.grid_size, cli.tick_ms).validate())
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    let mut store = match cli.scores_file {
        Some(path) => ScoreStore::new(path),
        None => ScoreStore::at_default_location(),
    };
    info!(
        "starting with {settings:?}, scores at {}",
        store.path().display()
    );

    install_panic_hook();
    match run(settings, &mut store) {
        Ok(end) => report(&end),
        Err(error) => {
            error!("session aborted: {error}");
            eprintln!("Session aborted: {error}");
        }
    }
    Ok(())
}

fn run(settings: Settings, store: &mut ScoreStore) -> io::Result<SessionEnd> {
    let mut terminal = TerminalSession::enter()?;
    let mut state = GameState::new(settings.grid()).with_tick_interval(settings.tick_interval());

    let controls = state.controls();
    thread::spawn(move || {
        let mut source = TerminalInput;
        if let Err(error) = listen(&mut source, &controls) {
            error!("input listener stopped: {error}");
            controls.shut_down();
        }
    });

    run_session(&mut state, &mut terminal, store, thread::sleep)
}

fn report(end: &SessionEnd) {
    let SessionEnd::GameOver {
        reason,
        high_scores,
        ..
    } = end
    else {
        return;
    };

    match reason {
        GameOverReason::SelfCollision => println!("Game Over"),
        GameOverReason::PoisonEaten => println!("Game Over - You ate poisonous food!"),
    }

    match high_scores {
        Ok(scores) => {
            println!("--- Top 10 High Scores ---");
            for score in scores {
                println!("{score}");
            }
        }
        Err(error) => eprintln!("Failed to save high scores: {error}"),
    }
}
