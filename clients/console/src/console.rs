use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use blackjack::input::{parse_action, parse_continue, validate_bet, Validation};
use blackjack::{Action, Dealer, Participant, Player, TableEvent, TableInput, TableOutput};

use crate::render::{self, Tone};

/// One attempt at reading an answer.
enum Reply {
    Line(String),
    /// Bytes that are not UTF-8. The line is already consumed.
    Garbled,
    Closed,
}

/// Reads player decisions line by line, re-asking until the answer is valid.
///
/// End of input counts as the most passive answer: bet nothing, stand,
/// leave the table.
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, line: &str) {
        if let Err(err) = writeln!(self.output, "{line}") {
            log::warn!("console write failed: {err}");
        }
    }

    fn ask(&mut self, question: &str) -> Reply {
        if let Err(err) = write!(self.output, "{question}").and_then(|_| self.output.flush()) {
            log::warn!("console write failed: {err}");
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Reply::Closed,
            Ok(_) => Reply::Line(line),
            Err(err) if err.kind() == io::ErrorKind::InvalidData => Reply::Garbled,
            Err(err) => {
                log::warn!("console read failed: {err}");
                Reply::Closed
            }
        }
    }

    fn ask_until<T>(
        &mut self,
        question: &str,
        validate: impl Fn(&str) -> Validation<T>,
    ) -> Option<T> {
        loop {
            let problem = match self.ask(question) {
                Reply::Closed => return None,
                Reply::Garbled => "could not read that line".to_string(),
                Reply::Line(line) => match validate(&line) {
                    Validation::Accepted(value) => return Some(value),
                    Validation::Rejected(rejection) => rejection.to_string(),
                },
            };
            self.say(&render::paint(Tone::Bad, &format!("Invalid input: {problem}")));
        }
    }
}

impl<R: BufRead, W: Write> TableInput for ConsolePrompt<R, W> {
    fn bet(&mut self, player: &Player) -> u64 {
        let available = player.chips();
        let question = format!(
            "{}, you have {available} chips. How many do you bet? ",
            player.name()
        );
        self.ask_until(&question, |raw| validate_bet(raw, available))
            .unwrap_or_else(|| {
                log::warn!("input closed, {} bets nothing", player.name());
                0
            })
    }

    fn action(&mut self, player: &Player, dealer: &Dealer) -> Action {
        let hand = player.hand();
        self.say(&format!(
            "{}'s hand: {} ({})",
            player.name(),
            render::cards(hand.cards()),
            render::value_label(hand.score(), hand.is_soft(), hand.is_natural())
        ));
        self.say(&format!(
            "{}'s hand: {}",
            dealer.name(),
            render::hidden_hand(dealer.up_cards())
        ));
        let question = format!("{}, 1) Hit or 2) Stand? ", player.name());
        self.ask_until(&question, parse_action).unwrap_or_else(|| {
            log::warn!("input closed, {} stands", player.name());
            Action::Stand
        })
    }

    fn keep_playing(&mut self, player: &Player) -> bool {
        let question = format!("{}, play another round? [Y/n] ", player.name());
        self.ask_until(&question, parse_continue).unwrap_or_else(|| {
            log::warn!("input closed, {} leaves the table", player.name());
            false
        })
    }
}

/// Prints table events with color, pausing after each drawn card.
pub struct ConsoleAnnouncer<W> {
    output: W,
    dealer_name: String,
    card_delay: Duration,
}

impl<W: Write> ConsoleAnnouncer<W> {
    pub fn new(output: W, dealer_name: impl Into<String>, card_delay: Duration) -> Self {
        Self {
            output,
            dealer_name: dealer_name.into(),
            card_delay,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<W: Write> TableOutput for ConsoleAnnouncer<W> {
    fn announce(&mut self, event: &TableEvent) {
        let (tone, text) = render::describe(event, &self.dealer_name);
        let spacer = if matches!(event, TableEvent::RoundStarted { .. }) {
            "\n"
        } else {
            ""
        };
        if let Err(err) = writeln!(self.output, "{spacer}{}", render::paint(tone, &text))
            .and_then(|_| self.output.flush())
        {
            log::warn!("console write failed: {err}");
        }

        let drew_card = matches!(
            event,
            TableEvent::PlayerHit { .. } | TableEvent::DealerHit { .. } | TableEvent::DealerRevealed { .. }
        );
        if drew_card && !self.card_delay.is_zero() {
            thread::sleep(self.card_delay);
        }
    }
}
