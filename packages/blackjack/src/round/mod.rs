use serde::{Deserialize, Serialize};

use crate::{
    Card, Dealer, Deck, HandOutcome, Participant, Player, TableError, TableEvent, TableInput,
    TableOutput, TableRules,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Hit,
    Stand,
}

/// Phases of a single round, in the only order they can occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    NewHand,
    Betting,
    InitialDeal,
    PlayerTurns,
    DealerTurn,
    Settlement,
    Done,
}

impl RoundPhase {
    pub fn next(self) -> Option<Self> {
        match self {
            RoundPhase::NewHand => Some(RoundPhase::Betting),
            RoundPhase::Betting => Some(RoundPhase::InitialDeal),
            RoundPhase::InitialDeal => Some(RoundPhase::PlayerTurns),
            RoundPhase::PlayerTurns => Some(RoundPhase::DealerTurn),
            RoundPhase::DealerTurn => Some(RoundPhase::Settlement),
            RoundPhase::Settlement => Some(RoundPhase::Done),
            RoundPhase::Done => None,
        }
    }
}

/// How one player's round ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResult {
    pub name: String,
    pub cards: Vec<Card>,
    pub score: u16,
    pub outcome: HandOutcome,
    /// Chips won (positive) or lost (negative) this round
    pub net_chips: i64,
    pub balance: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub results: Vec<PlayerResult>,
    pub dealer_cards: Vec<Card>,
    pub dealer_score: u16,
    /// Every player busted, so the dealer never drew.
    pub dealer_won_by_default: bool,
}

/// Drives one round for a fixed set of players against the dealer.
///
/// Owns the deck for the round and mutates each participant's hand and
/// wallet. Phases only move forward; a finished engine rejects further steps.
pub struct RoundEngine<'a> {
    players: &'a mut [Player],
    dealer: &'a mut Dealer,
    deck: Deck,
    rules: TableRules,
    phase: RoundPhase,
    settled: Vec<Option<(HandOutcome, i64)>>,
    dealer_won_by_default: bool,
}

impl<'a> RoundEngine<'a> {
    pub fn new(
        players: &'a mut [Player],
        dealer: &'a mut Dealer,
        deck: Deck,
        rules: TableRules,
    ) -> Self {
        let settled = vec![None; players.len()];
        Self {
            players,
            dealer,
            deck,
            rules,
            phase: RoundPhase::NewHand,
            settled,
            dealer_won_by_default: false,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn players(&self) -> &[Player] {
        self.players
    }

    pub fn dealer(&self) -> &Dealer {
        self.dealer
    }

    /// Player busted while drawing this round.
    pub fn busted(&self, index: usize) -> bool {
        matches!(
            self.settled.get(index),
            Some(Some((HandOutcome::BustedDuringTurn, _)))
        )
    }

    fn all_players_busted(&self) -> bool {
        (0..self.players.len()).all(|i| self.busted(i))
    }

    /// Run the current phase and advance to the next one.
    pub fn step<I, O>(&mut self, input: &mut I, output: &mut O) -> Result<RoundPhase, TableError>
    where
        I: TableInput + ?Sized,
        O: TableOutput + ?Sized,
    {
        match self.phase {
            RoundPhase::NewHand => self.new_hand(),
            RoundPhase::Betting => self.take_bets(input, output),
            RoundPhase::InitialDeal => self.initial_deal(output)?,
            RoundPhase::PlayerTurns => self.player_turns(input, output)?,
            RoundPhase::DealerTurn => self.dealer_turn(output)?,
            RoundPhase::Settlement => self.settle(output),
            RoundPhase::Done => return Err(TableError::RoundFinished),
        }
        let next = self.phase.next().ok_or(TableError::RoundFinished)?;
        log::debug!("round phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
        Ok(next)
    }

    /// Run every remaining phase and return the round's report.
    pub fn play<I, O>(mut self, input: &mut I, output: &mut O) -> Result<RoundReport, TableError>
    where
        I: TableInput + ?Sized,
        O: TableOutput + ?Sized,
    {
        while self.phase != RoundPhase::Done {
            self.step(input, output)?;
        }
        Ok(self.report())
    }

    /// Results settled so far. Complete once the phase is `Done`.
    pub fn report(&self) -> RoundReport {
        let results = self
            .players
            .iter()
            .zip(&self.settled)
            .filter_map(|(player, settled)| {
                let (outcome, net_chips) = (*settled)?;
                Some(PlayerResult {
                    name: player.name().to_string(),
                    cards: player.hand().cards().to_vec(),
                    score: player.hand().score(),
                    outcome,
                    net_chips,
                    balance: player.chips(),
                })
            })
            .collect();
        RoundReport {
            results,
            dealer_cards: self.dealer.hand().cards().to_vec(),
            dealer_score: self.dealer.hand().score(),
            dealer_won_by_default: self.dealer_won_by_default,
        }
    }

    fn new_hand(&mut self) {
        for player in self.players.iter_mut() {
            player.reset_hand();
        }
        self.dealer.reset_hand();
    }

    fn take_bets<I, O>(&mut self, input: &mut I, output: &mut O)
    where
        I: TableInput + ?Sized,
        O: TableOutput + ?Sized,
    {
        for player in self.players.iter_mut() {
            loop {
                let amount = input.bet(player);
                match player.wallet_mut().place_bet(amount) {
                    Ok(()) => {
                        log::debug!("{} bets {amount}", player.name());
                        output.announce(&TableEvent::BetPlaced {
                            player: player.name().to_string(),
                            amount,
                        });
                        break;
                    }
                    Err(error) => {
                        log::warn!("{} bet rejected: {error}", player.name());
                        output.announce(&TableEvent::BetRejected {
                            player: player.name().to_string(),
                            error,
                        });
                    }
                }
            }
        }
    }

    fn deal_to<P>(deck: &mut Deck, participant: &mut P) -> Result<Card, TableError>
    where
        P: Participant + ?Sized,
    {
        let card = deck.deal()?;
        log::debug!("{} receives {card}", participant.name());
        participant.hand_mut().add_card(card);
        Ok(card)
    }

    fn initial_deal<O: TableOutput + ?Sized>(&mut self, output: &mut O) -> Result<(), TableError> {
        for player in self.players.iter_mut() {
            for _ in 0..2 {
                Self::deal_to(&mut self.deck, &mut *player)?;
            }
            output.announce(&TableEvent::CardsDealt {
                player: player.name().to_string(),
                cards: player.hand().cards().to_vec(),
                score: player.hand().score(),
                soft: player.hand().is_soft(),
                natural: player.hand().is_natural(),
            });
        }
        for _ in 0..2 {
            Self::deal_to(&mut self.deck, &mut *self.dealer)?;
        }
        output.announce(&TableEvent::DealerShowing {
            up_cards: self.dealer.up_cards().to_vec(),
        });
        Ok(())
    }

    fn player_turns<I, O>(&mut self, input: &mut I, output: &mut O) -> Result<(), TableError>
    where
        I: TableInput + ?Sized,
        O: TableOutput + ?Sized,
    {
        for (index, player) in self.players.iter_mut().enumerate() {
            loop {
                match input.action(player, &*self.dealer) {
                    Action::Stand => {
                        output.announce(&TableEvent::PlayerStood {
                            player: player.name().to_string(),
                            score: player.hand().score(),
                            soft: player.hand().is_soft(),
                        });
                        break;
                    }
                    Action::Hit => {
                        let card = Self::deal_to(&mut self.deck, &mut *player)?;
                        let score = player.hand().score();
                        output.announce(&TableEvent::PlayerHit {
                            player: player.name().to_string(),
                            card,
                            score,
                        });
                        if player.hand().is_busted() {
                            // settled now; the dealer's hand no longer matters
                            let lost = player.wallet_mut().lose_bet();
                            self.settled[index] =
                                Some((HandOutcome::BustedDuringTurn, -(lost as i64)));
                            log::info!("{} busts with {score}, loses {lost}", player.name());
                            output.announce(&TableEvent::PlayerBusted {
                                player: player.name().to_string(),
                                score,
                                lost,
                                balance: player.chips(),
                            });
                            break;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn dealer_turn<O: TableOutput + ?Sized>(&mut self, output: &mut O) -> Result<(), TableError> {
        output.announce(&TableEvent::DealerRevealed {
            cards: self.dealer.hand().cards().to_vec(),
            score: self.dealer.hand().score(),
        });

        if self.all_players_busted() {
            self.dealer_won_by_default = true;
            log::info!("all players busted, dealer wins without drawing");
            output.announce(&TableEvent::AllPlayersBusted);
            return Ok(());
        }

        while self.rules.dealer_should_hit(self.dealer.hand().score()) {
            let card = Self::deal_to(&mut self.deck, &mut *self.dealer)?;
            output.announce(&TableEvent::DealerHit {
                card,
                score: self.dealer.hand().score(),
            });
        }

        let score = self.dealer.hand().score();
        if self.dealer.hand().is_busted() {
            output.announce(&TableEvent::DealerBusted { score });
        } else {
            output.announce(&TableEvent::DealerStood { score });
        }
        Ok(())
    }

    fn settle<O: TableOutput + ?Sized>(&mut self, output: &mut O) {
        if self.dealer_won_by_default {
            return;
        }
        let dealer_score = self.dealer.hand().score();
        let dealer_busted = self.dealer.hand().is_busted();

        for (player, settled) in self.players.iter_mut().zip(self.settled.iter_mut()) {
            if settled.is_some() {
                continue;
            }
            let score = player.hand().score();
            let wallet = player.wallet_mut();
            let (outcome, amount, net) = if dealer_busted || score > dealer_score {
                let won = wallet.win_bet();
                (HandOutcome::Win, won, won as i64)
            } else if dealer_score > score {
                let lost = wallet.lose_bet();
                (HandOutcome::Lose, lost, -(lost as i64))
            } else {
                let staked = wallet.bet();
                wallet.tie_bet();
                (HandOutcome::Tie, staked, 0)
            };
            *settled = Some((outcome, net));
            log::info!(
                "{} {:?} with {score} against {dealer_score} ({net:+})",
                player.name(),
                outcome
            );
            output.announce(&TableEvent::Settled {
                player: player.name().to_string(),
                outcome,
                score,
                amount,
                balance: player.chips(),
            });
        }
    }
}

#[cfg(test)]
pub(crate) mod tests;
