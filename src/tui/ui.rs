//! UI rendering using ratatui
//!
//! Supports three screens:
//! - Menu: Main menu with options and the round count
//! - Playing: In-game screen, including round and game summaries
//! - Error: Error message display

use crate::app::{App, AppCoordinator, Feedback, MenuOption, Prompt, Screen, Tone};
use crate::game::session::RoundRecord;
use crate::game::Rack;
use ratatui::{
    layout::Margin,
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Render the appropriate screen based on app state
pub fn render(frame: &mut Frame, coordinator: &AppCoordinator) {
    match &coordinator.screen {
        Screen::Menu {
            selected,
            rounds,
            rounds_input,
            editing_rounds,
        } => {
            let words = coordinator.dictionary().len();
            render_menu(frame, *selected, *rounds, rounds_input, *editing_rounds, words);
        }
        Screen::Playing { app } => {
            render_game(frame, app);
        }
        Screen::Error { message } => {
            render_error(frame, message);
        }
    }
}

/// Render the main menu
fn render_menu(
    frame: &mut Frame,
    selected: usize,
    rounds: u32,
    rounds_input: &str,
    editing_rounds: bool,
    words: usize,
) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Logo
            Constraint::Length(1), // Round count
            Constraint::Length(2), // Dictionary size
            Constraint::Min(4),    // Menu options
            Constraint::Length(2), // Footer
        ])
        .margin(2)
        .split(area);

    let logo = r#"
  ___ ___  ___ ___    _   ___  ___  _
 | __/ __|/ __| _ \  /_\ | _ )/ _ \| |
 | _|\__ \ (__|   / / _ \| _ \ (_) | |__
 |___|___/\___|_|_\/_/ \_\___/\___/|____|
"#;
    let logo_widget = Paragraph::new(logo)
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Center);
    frame.render_widget(logo_widget, layout[0]);

    let rounds_display = if editing_rounds {
        format!("Rounds: [{}]_", rounds_input)
    } else {
        format!("Rounds: {} (Tab to edit)", rounds)
    };
    let rounds_style = if editing_rounds {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let rounds_widget = Paragraph::new(rounds_display)
        .style(rounds_style)
        .alignment(Alignment::Center);
    frame.render_widget(rounds_widget, layout[1]);

    let words_widget = Paragraph::new(format!("{} words in the dictionary", words))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(words_widget, layout[2]);

    let items: Vec<ListItem> = MenuOption::all()
        .iter()
        .enumerate()
        .map(|(i, opt)| {
            let style = if i == selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if i == selected { "> " } else { "  " };
            ListItem::new(format!("{}{}", prefix, opt.label())).style(style)
        })
        .collect();
    frame.render_widget(List::new(items), layout[3]);

    let footer = Paragraph::new("↑↓ Navigate  Enter Select  Esc Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[4]);
}

/// Render the in-game screen
fn render_game(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with rack and round
            Constraint::Min(0),    // Main content area
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, layout[0], app);

    match app.prompt() {
        Prompt::NextRound => render_round_summary(frame, layout[1], app),
        Prompt::Done => render_game_summary(frame, layout[1], app),
        _ => render_main(frame, layout[1], app),
    }

    let footer = Paragraph::new(format!(
        "Enter Submit  {} Stop round  Esc Menu",
        app.stop_token()
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(footer, layout[2]);
}

/// Render error screen
fn render_error(frame: &mut Frame, message: &str) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Percentage(40),
        ])
        .margin(2)
        .split(area);

    let error = Paragraph::new(format!("Error: {}", message))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);
    frame.render_widget(error, layout[1]);

    let hint = Paragraph::new("Press Esc to go back")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hint, layout[2]);
}

/// Render the header: logo, letter rack, round counter
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(10), // Logo
            Constraint::Min(20),    // Letters
            Constraint::Length(14), // Round
        ])
        .split(inner);

    let logo = Paragraph::new("ESCRABOL")
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Left);
    frame.render_widget(logo, header_layout[0]);

    let letters = Paragraph::new(format_letter_rack(app.rack()))
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center);
    frame.render_widget(letters, header_layout[1]);

    let round_color = if app.is_replaying() {
        Color::Magenta
    } else {
        Color::Green
    };
    let round_text = if app.is_replaying() {
        format!("Replay {}/{}", app.round_number(), app.total_rounds())
    } else {
        format!("Round {}/{}", app.round_number(), app.total_rounds())
    };
    let round = Paragraph::new(round_text)
        .style(Style::default().fg(round_color).bold())
        .alignment(Alignment::Right);
    frame.render_widget(round, header_layout[2]);
}

/// Render the play area with the word list on the right
fn render_main(frame: &mut Frame, area: Rect, app: &App) {
    let horizontal_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(30),    // Input area
            Constraint::Length(28), // Words
        ])
        .split(area);

    render_input_area(frame, horizontal_layout[0], app);
    render_word_list(frame, horizontal_layout[1], app);
}

/// Render the prompt, input, feedback and scores
fn render_input_area(frame: &mut Frame, area: Rect, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Prompt
            Constraint::Length(1), // Input line
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Feedback line
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Round score
            Constraint::Length(1), // Game total
            Constraint::Length(1), // Privileges
            Constraint::Min(0),
        ])
        .split(area);

    let prompt = Paragraph::new(prompt_text(app)).style(Style::default().fg(Color::Yellow));
    frame.render_widget(prompt, main_layout[0]);

    let input = Paragraph::new(format!("> {}_", app.input)).style(Style::default().fg(Color::White));
    frame.render_widget(input, main_layout[1]);

    let (feedback_text, feedback_color) = format_feedback(app.feedback.as_ref());
    let feedback = Paragraph::new(feedback_text).style(Style::default().fg(feedback_color));
    frame.render_widget(feedback, main_layout[3]);

    let mut score_text = format!("Round score: {}", app.round_score());
    if let Some(first) = app.first_attempt_score() {
        score_text.push_str(&format!("  (first attempt: {})", first));
    }
    let score = Paragraph::new(score_text).style(Style::default().fg(Color::Magenta).bold());
    frame.render_widget(score, main_layout[5]);

    let total = Paragraph::new(format!("Game total: {}", app.game_state().total_score))
        .style(Style::default().fg(Color::Magenta));
    frame.render_widget(total, main_layout[6]);

    let state = app.game_state();
    let privileges = Paragraph::new(format!(
        "Replace: {}  Replay: {}",
        availability(state.replace_available),
        availability(state.replay_available)
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(privileges, main_layout[7]);
}

/// Render the words played and missed in the current attempt
fn render_word_list(frame: &mut Frame, area: Rect, app: &App) {
    let played = app.played_words().iter().rev().map(|w| {
        ListItem::new(format!("{} +{}", w.word.to_uppercase(), w.points))
            .style(Style::default().fg(Color::Green))
    });
    let missed = app.missed_words().iter().rev().take(5).map(|m| {
        ListItem::new(format!("{} ✗ {}", m.word.to_uppercase(), m.reason.message()))
            .style(Style::default().fg(Color::Red))
    });
    let items: Vec<ListItem> = played.chain(missed).collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Words"),
    );
    frame.render_widget(list, area);
}

/// Render the summary of the round just settled
fn render_round_summary(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("ROUND {} COMPLETE", app.round_number()),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(""),
    ];
    if let Some(record) = app.last_round() {
        lines.extend(record_lines(record));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Game total: {}", app.game_state().total_score),
        Style::default().fg(Color::Magenta).bold(),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press ENTER for the next round",
        Style::default().fg(Color::DarkGray),
    )));

    let summary = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(summary, area.inner(Margin::new(1, 1)));
}

/// Render the end-of-game summary
fn render_game_summary(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(""),
    ];
    for record in app.history() {
        lines.push(Line::from(Span::styled(
            format!("Round {}: {} points", record.number, record.contribution),
            Style::default().fg(Color::Cyan),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Final Score: {}", app.game_state().total_score),
        Style::default().fg(Color::Yellow).bold(),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press ESC to return to menu",
        Style::default().fg(Color::DarkGray),
    )));

    let summary = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(summary, area.inner(Margin::new(1, 1)));
}

fn record_lines(record: &RoundRecord) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("First attempt: {}", record.first.score),
        Style::default().fg(Color::Cyan),
    ))];
    if let Some(replay) = &record.replay {
        lines.push(Line::from(Span::styled(
            format!("Replay: {}", replay.score),
            Style::default().fg(Color::Cyan),
        )));
    }
    lines.push(Line::from(Span::styled(
        format!("Counted: {}", record.contribution),
        Style::default().fg(Color::Green).bold(),
    )));
    lines
}

/// Instruction line for the current prompt
fn prompt_text(app: &App) -> String {
    match app.prompt() {
        Prompt::Replace => "Type a letter to replace it, or press Enter to keep your rack".to_string(),
        Prompt::Word => format!("Type a word, or {} to end the round", app.stop_token()),
        Prompt::Replay => "Replay this round from the same letters? (y/n)".to_string(),
        Prompt::NextRound => "Press Enter for the next round".to_string(),
        Prompt::Done => String::new(),
    }
}

fn availability(available: bool) -> &'static str {
    if available {
        "available"
    } else {
        "used"
    }
}

/// Format the letter rack for display
fn format_letter_rack(rack: Option<&Rack>) -> String {
    match rack {
        Some(rack) if !rack.is_exhausted() => format!("[ {} ]", rack.to_string().to_uppercase()),
        Some(_) => String::from("[ no letters left ]"),
        None => String::new(),
    }
}

/// Format feedback with a color for its tone
fn format_feedback(feedback: Option<&Feedback>) -> (String, Color) {
    match feedback {
        None => (String::new(), Color::White),
        Some(feedback) => {
            let color = match feedback.tone {
                Tone::Neutral => Color::White,
                Tone::Good => Color::Green,
                Tone::Bad => Color::Red,
                Tone::Warning => Color::Yellow,
            };
            (feedback.text.clone(), color)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_letter_rack() {
        let rack = Rack::parse("*aepz");
        assert_eq!(format_letter_rack(Some(&rack)), "[ * A E P Z ]");
        assert_eq!(
            format_letter_rack(Some(&rack.deplete("*aepz"))),
            "[ no letters left ]"
        );
        assert_eq!(format_letter_rack(None), "");
    }

    #[test]
    fn test_format_feedback_colors() {
        assert_eq!(format_feedback(None), (String::new(), Color::White));
        let bad = Feedback {
            text: "NOPE".to_string(),
            tone: Tone::Bad,
        };
        assert_eq!(format_feedback(Some(&bad)).1, Color::Red);
    }
}
