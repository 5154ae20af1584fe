//! Application screen state management
//!
//! Handles transitions between the main menu, a game in progress and the
//! error screen.

use std::sync::Arc;

use crate::config::GameConfig;
use crate::game::Dictionary;

use super::state::App;

/// Longest round count the menu accepts
const MAX_ROUNDS: u32 = 99;

/// Menu option on the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    NewGame,
    Quit,
}

impl MenuOption {
    /// Get all menu options in order
    pub fn all() -> &'static [MenuOption] {
        &[MenuOption::NewGame, MenuOption::Quit]
    }

    /// Get the display label for this option
    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::NewGame => "New Game",
            MenuOption::Quit => "Quit",
        }
    }
}

/// The current application screen
pub enum Screen {
    /// Main menu
    Menu {
        selected: usize,
        rounds: u32,
        rounds_input: String,
        editing_rounds: bool,
    },
    /// Playing a game
    Playing { app: Box<App> },
    /// Game could not be started
    Error { message: String },
}

/// Main application coordinator
pub struct AppCoordinator {
    /// Current screen
    pub screen: Screen,
    /// Whether the application should quit
    pub should_quit: bool,
    config: GameConfig,
    dictionary: Arc<Dictionary>,
}

impl AppCoordinator {
    /// Create a new app coordinator starting at the menu
    pub fn new(config: GameConfig, dictionary: Arc<Dictionary>) -> Self {
        let rounds = config.rules.rounds;
        Self {
            screen: menu(rounds),
            should_quit: false,
            config,
            dictionary,
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Go back to the main menu, keeping the chosen round count
    pub fn go_to_menu(&mut self) {
        let rounds = match &self.screen {
            Screen::Menu { rounds, .. } => *rounds,
            Screen::Playing { app } => app.total_rounds(),
            Screen::Error { .. } => self.config.rules.rounds,
        };
        self.screen = menu(rounds);
    }

    /// Handle menu navigation (up)
    pub fn menu_up(&mut self) {
        if let Screen::Menu {
            selected,
            editing_rounds,
            ..
        } = &mut self.screen
        {
            if !*editing_rounds && *selected > 0 {
                *selected -= 1;
            }
        }
    }

    /// Handle menu navigation (down)
    pub fn menu_down(&mut self) {
        if let Screen::Menu {
            selected,
            editing_rounds,
            ..
        } = &mut self.screen
        {
            if !*editing_rounds && *selected < MenuOption::all().len() - 1 {
                *selected += 1;
            }
        }
    }

    /// Handle menu character input (for round count editing)
    pub fn menu_char(&mut self, c: char) {
        if let Screen::Menu {
            rounds_input,
            editing_rounds,
            ..
        } = &mut self.screen
        {
            if *editing_rounds && c.is_ascii_digit() && rounds_input.len() < 2 {
                rounds_input.push(c);
            }
        }
    }

    /// Handle menu backspace (for round count editing)
    pub fn menu_backspace(&mut self) {
        if let Screen::Menu {
            rounds_input,
            editing_rounds,
            ..
        } = &mut self.screen
        {
            if *editing_rounds {
                rounds_input.pop();
            }
        }
    }

    /// Handle Tab key to toggle round count editing
    pub fn menu_tab(&mut self) {
        if let Screen::Menu {
            rounds,
            rounds_input,
            editing_rounds,
            ..
        } = &mut self.screen
        {
            if *editing_rounds {
                commit_rounds(rounds, rounds_input);
            }
            *editing_rounds = !*editing_rounds;
        }
    }

    /// Handle menu selection (Enter)
    pub fn menu_select(&mut self) {
        let (selected, rounds) = match &mut self.screen {
            Screen::Menu {
                selected,
                rounds,
                rounds_input,
                editing_rounds,
            } => {
                if *editing_rounds {
                    // Just finish editing
                    commit_rounds(rounds, rounds_input);
                    *editing_rounds = false;
                    return;
                }
                (*selected, *rounds)
            }
            _ => return,
        };

        match MenuOption::all()[selected] {
            MenuOption::NewGame => self.start_game(rounds),
            MenuOption::Quit => self.should_quit = true,
        }
    }

    /// Start a game of `rounds` rounds with the configured rules
    pub fn start_game(&mut self, rounds: u32) {
        let mut rules = self.config.rules.clone();
        rules.rounds = rounds;
        tracing::info!(rounds, rack_size = rules.rack_size, "new game");

        self.screen = match App::new(rules, Arc::clone(&self.dictionary)) {
            Ok(app) => Screen::Playing { app: Box::new(app) },
            Err(e) => {
                tracing::error!(error = %e, "could not start game");
                Screen::Error {
                    message: e.to_string(),
                }
            }
        };
    }
}

fn menu(rounds: u32) -> Screen {
    Screen::Menu {
        selected: 0,
        rounds,
        rounds_input: rounds.to_string(),
        editing_rounds: false,
    }
}

/// Accept the typed round count, or restore the previous one if it is not
/// a number between 1 and the maximum.
fn commit_rounds(rounds: &mut u32, rounds_input: &mut String) {
    match rounds_input.parse::<u32>() {
        Ok(n) if (1..=MAX_ROUNDS).contains(&n) => *rounds = n,
        _ => *rounds_input = rounds.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinator() -> AppCoordinator {
        let dictionary = Arc::new(Dictionary::from_words(["pez", "sol"]));
        AppCoordinator::new(GameConfig::default(), dictionary)
    }

    fn menu_rounds(coordinator: &AppCoordinator) -> u32 {
        match &coordinator.screen {
            Screen::Menu { rounds, .. } => *rounds,
            _ => panic!("not on the menu"),
        }
    }

    #[test]
    fn test_starts_at_menu_with_configured_rounds() {
        let coordinator = coordinator();
        assert_eq!(menu_rounds(&coordinator), 3);
        assert!(!coordinator.should_quit);
    }

    #[test]
    fn test_menu_navigation_is_bounded() {
        let mut coordinator = coordinator();
        coordinator.menu_up();
        coordinator.menu_down();
        coordinator.menu_down();
        match &coordinator.screen {
            Screen::Menu { selected, .. } => assert_eq!(*selected, 1),
            _ => panic!("not on the menu"),
        }
        coordinator.menu_select();
        assert!(coordinator.should_quit);
    }

    #[test]
    fn test_edit_round_count() {
        let mut coordinator = coordinator();
        coordinator.menu_tab();
        coordinator.menu_backspace();
        coordinator.menu_char('x');
        coordinator.menu_char('5');
        coordinator.menu_select();
        assert_eq!(menu_rounds(&coordinator), 5);

        coordinator.menu_select();
        match &coordinator.screen {
            Screen::Playing { app } => {
                assert_eq!(app.total_rounds(), 5);
                assert_eq!(app.round_number(), 1);
            }
            _ => panic!("game did not start"),
        }

        coordinator.go_to_menu();
        assert_eq!(menu_rounds(&coordinator), 5);
    }

    #[test]
    fn test_invalid_round_count_restored() {
        let mut coordinator = coordinator();
        coordinator.menu_tab();
        coordinator.menu_backspace();
        coordinator.menu_char('0');
        coordinator.menu_tab();
        assert_eq!(menu_rounds(&coordinator), 3);
        match &coordinator.screen {
            Screen::Menu { rounds_input, .. } => assert_eq!(rounds_input, "3"),
            _ => panic!("not on the menu"),
        }
    }
}
