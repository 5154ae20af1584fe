//! Line-oriented front-end for `--plain`
//!
//! Plays a whole game over any reader and writer pair, one prompt per line.
//! End of input ends the round in progress and declines every offer, so a
//! closed stdin finishes the game instead of hanging it.

use std::io::{self, BufRead, Write};

use crate::error::GameError;
use crate::game::round::{RoundEvent, RoundResult};
use crate::game::session::{Game, GameRules, Player, RoundRecord};
use crate::game::{Dictionary, LetterPool, LetterSource, Rack};

/// A player answering prompts from `input`, writing to `output`.
pub struct ConsolePlayer<R, W> {
    input: R,
    output: W,
    stop_token: String,
}

impl<R: BufRead, W: Write> ConsolePlayer<R, W> {
    pub fn new(input: R, output: W, stop_token: impl Into<String>) -> Self {
        Self {
            input,
            output,
            stop_token: stop_token.into(),
        }
    }

    /// Next trimmed input line, or `None` at end of input.
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read input");
                None
            }
        }
    }

    /// Print a prompt without a newline and read the answer.
    fn ask(&mut self, prompt: &str) -> Option<String> {
        let written = write!(self.output, "{}", prompt).and_then(|()| self.output.flush());
        if let Err(err) = written {
            tracing::warn!(error = %err, "failed to write prompt");
        }
        self.read_line()
    }

    fn say(&mut self, text: &str) {
        if let Err(err) = writeln!(self.output, "{}", text) {
            tracing::warn!(error = %err, "failed to write output");
        }
    }
}

impl<R: BufRead, W: Write> Player for ConsolePlayer<R, W> {
    fn choose_replacement(&mut self, rack: &Rack) -> Option<char> {
        self.say(&format!("Your letters: {}", rack));
        let answer = self.ask("Replace a letter? Type it, or press Enter to keep your rack: ")?;
        answer.chars().next()
    }

    fn next_word(&mut self, rack: &Rack, score: u32) -> Option<String> {
        self.say(&format!("Letters: {}   Score: {}", rack, score));
        let prompt = format!("Word ({} to stop): ", self.stop_token);
        self.ask(&prompt)
    }

    fn wants_replay(&mut self, first: &RoundResult) -> bool {
        self.say(&format!("You scored {} this round.", first.score));
        self.ask("Replay it from the same letters? (y/n): ")
            .is_some_and(|answer| crate::app::state::is_yes(&answer))
    }

    fn on_replaced(&mut self, rack: &Rack) {
        self.say(&format!("New letters: {}", rack));
    }

    fn on_replace_failed(&mut self, error: &GameError) {
        self.say(&format!("{}; keeping your letters", error));
    }

    fn on_word(&mut self, outcome: &Result<RoundEvent, GameError>) {
        let text = match outcome {
            Ok(RoundEvent::Scored {
                word,
                points,
                finished: true,
                ..
            }) => format!("{} scores {}. No letters left!", word.to_uppercase(), points),
            Ok(RoundEvent::Scored { word, points, .. }) => {
                format!("{} scores {}", word.to_uppercase(), points)
            }
            Ok(RoundEvent::Stopped { total }) => format!("Round over with {} points", total),
            Err(GameError::InvalidWord { word, reason }) => {
                format!("{}: {}", word.to_uppercase(), reason.message())
            }
            Err(err) => err.to_string(),
        };
        self.say(&text);
    }

    fn on_round_complete(&mut self, record: &RoundRecord) {
        self.say(&format!(
            "Round {} counts {} points",
            record.number, record.contribution
        ));
        self.say("");
    }
}

/// Play one game on stdin and stdout. Returns the final total.
pub fn run(rules: GameRules, dictionary: &Dictionary) -> Result<u32, GameError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    play(
        rules,
        dictionary,
        LetterPool::from_os_rng(),
        stdin.lock(),
        stdout.lock(),
    )
}

/// Play one game with the given letters and streams.
pub fn play<S, R, W>(
    rules: GameRules,
    dictionary: &Dictionary,
    source: S,
    input: R,
    output: W,
) -> Result<u32, GameError>
where
    S: LetterSource,
    R: BufRead,
    W: Write,
{
    let mut game = Game::new(rules, source)?;
    let mut player = ConsolePlayer::new(input, output, game.rules().stop_token.clone());
    player.say(&format!(
        "ESCRABOL: {} rounds. The * stands for any vowel.",
        game.rules().rounds
    ));

    let total = game.run(&mut player, dictionary)?;
    player.say(&format!("Game over. Final score: {}", total));
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::Cursor;

    struct Stacked(VecDeque<Rack>);

    impl LetterSource for Stacked {
        fn deal(&mut self, _size: usize) -> Rack {
            self.0.pop_front().unwrap_or_default()
        }

        fn pick(&mut self, candidates: &[char]) -> Option<char> {
            candidates.first().copied()
        }
    }

    fn play_script(rounds: u32, racks: &[&str], script: &str) -> (u32, String) {
        let rules = GameRules {
            rounds,
            ..GameRules::default()
        };
        let dictionary = Dictionary::from_words(["pez", "a", "sol", "paz"]);
        let source = Stacked(racks.iter().map(|r| Rack::parse(r)).collect());
        let mut output = Vec::new();
        let total = play(
            rules,
            &dictionary,
            source,
            Cursor::new(script.as_bytes()),
            &mut output,
        )
        .unwrap();
        (total, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_scripted_game() {
        let script = "\npez\nqqq\n!!\nn\nsol\n!!\n";
        let (total, output) = play_script(2, &["*aeplsz", "lmos"], script);

        // sol on a 4-letter rack: 3 * (21 - 3) = 54
        assert_eq!(total, 126 + 54);
        assert!(output.contains("PEZ scores 126"));
        assert!(output.contains("QQQ: Not in dictionary"));
        assert!(output.contains("Round 1 counts 126 points"));
        assert!(output.contains("Final score: 180"));
    }

    #[test]
    fn test_replacement_prompt() {
        let (_, output) = play_script(1, &["*aeplsz"], "z\n!!\nn\n");
        // First candidate not on the rack is 'i'
        assert!(output.contains("New letters: * a e i l p s"));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_broken_output_does_not_stop_play() {
        let dictionary = Dictionary::from_words(["pez"]);
        let source = Stacked(VecDeque::from([Rack::parse("*aeplsz")]));
        let total = play(
            GameRules {
                rounds: 1,
                ..GameRules::default()
            },
            &dictionary,
            source,
            Cursor::new("\npez\n!!\nn\n".as_bytes()),
            BrokenPipe,
        )
        .unwrap();
        assert_eq!(total, 126);
    }

    #[test]
    fn test_end_of_input_finishes_game() {
        let (total, output) = play_script(3, &["*aeplsz", "*aeplsz", "*aeplsz"], "");
        assert_eq!(total, 0);
        assert!(output.contains("Game over. Final score: 0"));
    }
}
