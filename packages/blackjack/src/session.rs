use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Dealer, Deck, Participant, Player, RetireReason, RoundEngine, RoundReport, TableError,
    TableEvent, TableInput, TableOutput, TableRules,
};

/// Where a player ended up when the session closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStanding {
    pub name: String,
    pub chips: u64,
    /// `None` while the player is still seated.
    pub retired: Option<RetireReason>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub rounds_played: u32,
    pub standings: Vec<PlayerStanding>,
}

/// Repeats rounds against one dealer until every player has left the table.
pub struct Session<R = ChaCha8Rng> {
    rules: TableRules,
    dealer: Dealer,
    active: Vec<Player>,
    retired: Vec<(Player, RetireReason)>,
    rounds_played: u32,
    rng: R,
}

impl Session<ChaCha8Rng> {
    pub fn new<S: AsRef<str>>(
        names: &[S],
        dealer_name: &str,
        rules: TableRules,
    ) -> Result<Self, TableError> {
        Self::with_rng(names, dealer_name, rules, ChaCha8Rng::from_entropy())
    }

    /// Same shuffles for the same seed.
    pub fn seeded<S: AsRef<str>>(
        names: &[S],
        dealer_name: &str,
        rules: TableRules,
        seed: u64,
    ) -> Result<Self, TableError> {
        Self::with_rng(names, dealer_name, rules, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng<S: AsRef<str>>(
        names: &[S],
        dealer_name: &str,
        rules: TableRules,
        rng: R,
    ) -> Result<Self, TableError> {
        rules.validate()?;
        rules.validate_roster(names)?;
        let active = names
            .iter()
            .map(|name| Player::new(name.as_ref(), rules.starting_chips))
            .collect();
        Ok(Self {
            rules,
            dealer: Dealer::new(dealer_name),
            active,
            retired: Vec::new(),
            rounds_played: 0,
            rng,
        })
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    pub fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    pub fn active_players(&self) -> &[Player] {
        &self.active
    }

    pub fn retired_players(&self) -> &[(Player, RetireReason)] {
        &self.retired
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn is_over(&self) -> bool {
        self.active.is_empty()
    }

    /// Play one round with a freshly shuffled deck.
    pub fn play_round<I, O>(&mut self, input: &mut I, output: &mut O) -> Result<RoundReport, TableError>
    where
        I: TableInput + ?Sized,
        O: TableOutput + ?Sized,
    {
        let deck = Deck::shuffled(&mut self.rng);
        self.play_round_with_deck(deck, input, output)
    }

    pub fn play_round_with_deck<I, O>(
        &mut self,
        deck: Deck,
        input: &mut I,
        output: &mut O,
    ) -> Result<RoundReport, TableError>
    where
        I: TableInput + ?Sized,
        O: TableOutput + ?Sized,
    {
        let round = self.rounds_played + 1;
        log::debug!("starting round {round} with {} players", self.active.len());
        output.announce(&TableEvent::RoundStarted { round });

        let engine = RoundEngine::new(&mut self.active, &mut self.dealer, deck, self.rules);
        let report = engine.play(input, output)?;
        self.rounds_played = round;
        Ok(report)
    }

    /// Drop players who are out of chips or decline another round.
    /// Returns the names retired this call.
    pub fn retire_players<I, O>(&mut self, input: &mut I, output: &mut O) -> Vec<String>
    where
        I: TableInput + ?Sized,
        O: TableOutput + ?Sized,
    {
        let mut staying = Vec::with_capacity(self.active.len());
        let mut leaving = Vec::new();

        for player in self.active.drain(..) {
            let reason = if player.wallet().is_broke() {
                Some(RetireReason::OutOfChips)
            } else if !input.keep_playing(&player) {
                Some(RetireReason::Declined)
            } else {
                None
            };

            match reason {
                Some(reason) => {
                    log::info!("{} leaves the table ({reason:?})", player.name());
                    output.announce(&TableEvent::PlayerRetired {
                        player: player.name().to_string(),
                        reason,
                    });
                    leaving.push(player.name().to_string());
                    self.retired.push((player, reason));
                }
                None => staying.push(player),
            }
        }

        self.active = staying;
        leaving
    }

    /// Play rounds until the table is empty.
    pub fn run<I, O>(mut self, input: &mut I, output: &mut O) -> Result<SessionSummary, TableError>
    where
        I: TableInput + ?Sized,
        O: TableOutput + ?Sized,
    {
        while !self.is_over() {
            self.play_round(input, output)?;
            self.retire_players(input, output);
        }
        output.announce(&TableEvent::SessionOver {
            rounds: self.rounds_played,
        });
        Ok(self.summary())
    }

    pub fn summary(&self) -> SessionSummary {
        let seated = self.active.iter().map(|p| PlayerStanding {
            name: p.name().to_string(),
            chips: p.chips(),
            retired: None,
        });
        let retired = self.retired.iter().map(|(p, reason)| PlayerStanding {
            name: p.name().to_string(),
            chips: p.chips(),
            retired: Some(*reason),
        });
        SessionSummary {
            rounds_played: self.rounds_played,
            standings: retired.chain(seated).collect(),
        }
    }
}
