//! ESCRABOL - a solo word game on a rack of letters
//!
//! Build words from your letters, longer ones score more. The `*` stands
//! for any vowel.

mod app;
mod config;
mod console;
mod error;
mod game;
mod logging;
mod tui;

use app::{AppCoordinator, Screen};
use clap::Parser;
use config::GameConfig;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use error::AppError;
use game::Dictionary;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tui::Tui;

const ENVIRONMENT_HELP: &str = "\
Environment:
  ESCRABOL_ROUNDS             rounds per game (default 3)
  ESCRABOL_RACK_SIZE          letters per rack (default 7)
  ESCRABOL_DICTIONARY         word list file, one word per line
  ESCRABOL_STOP_TOKEN         input that ends a round (default !!)
  ESCRABOL_REPLACE_ANY_ROUND  offer the letter swap every round
  ESCRABOL_LOG                log filter (default info)";

#[derive(Debug, Parser)]
#[command(name = "escrabol", version)]
#[command(about = "Solo word game: build words from a rack of letters")]
#[command(after_help = ENVIRONMENT_HELP)]
struct Cli {
    /// Play on plain stdin/stdout instead of the full-screen UI
    #[arg(long)]
    plain: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "exiting");
            eprintln!("escrabol: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = GameConfig::from_env()?;
    let dictionary = config.load_dictionary()?;
    tracing::info!(words = dictionary.len(), plain = cli.plain, "dictionary ready");

    if cli.plain {
        console::run(config.rules, &dictionary)?;
        Ok(())
    } else {
        run_tui(config, Arc::new(dictionary))
    }
}

fn run_tui(config: GameConfig, dictionary: Arc<Dictionary>) -> Result<(), AppError> {
    let mut terminal = Tui::new()?;
    terminal.enter()?;

    let mut coordinator = AppCoordinator::new(config, dictionary);
    let poll_rate = Duration::from_millis(250);

    loop {
        terminal.draw(|frame| tui::render(frame, &coordinator))?;

        if event::poll(poll_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut coordinator, key.code);
                }
            }
        }

        if coordinator.should_quit {
            break;
        }
    }

    // Terminal cleanup happens automatically via Tui::drop
    Ok(())
}

fn handle_key(coordinator: &mut AppCoordinator, code: KeyCode) {
    match &coordinator.screen {
        Screen::Menu { .. } => handle_menu_key(coordinator, code),
        Screen::Playing { .. } => handle_game_key(coordinator, code),
        Screen::Error { .. } => {
            if matches!(code, KeyCode::Esc | KeyCode::Enter) {
                coordinator.go_to_menu();
            }
        }
    }
}

fn handle_menu_key(coordinator: &mut AppCoordinator, code: KeyCode) {
    match code {
        KeyCode::Esc => coordinator.quit(),
        KeyCode::Up => coordinator.menu_up(),
        KeyCode::Down => coordinator.menu_down(),
        KeyCode::Tab => coordinator.menu_tab(),
        KeyCode::Enter => coordinator.menu_select(),
        KeyCode::Backspace => coordinator.menu_backspace(),
        KeyCode::Char(c) => coordinator.menu_char(c),
        _ => {}
    }
}

fn handle_game_key(coordinator: &mut AppCoordinator, code: KeyCode) {
    if code == KeyCode::Esc {
        coordinator.go_to_menu();
        return;
    }
    let Screen::Playing { app } = &mut coordinator.screen else {
        return;
    };
    match code {
        KeyCode::Enter => app.on_submit(),
        KeyCode::Backspace => app.on_backspace(),
        // Letters, the wildcard and the stop token's symbols
        KeyCode::Char(c) if !c.is_whitespace() && !c.is_control() => app.on_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        assert!(!Cli::try_parse_from(["escrabol"]).unwrap().plain);
        assert!(Cli::try_parse_from(["escrabol", "--plain"]).unwrap().plain);

        let err = Cli::try_parse_from(["escrabol", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("ESCRABOL_DICTIONARY"));

        let err = Cli::try_parse_from(["escrabol", "--fast"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }
}
