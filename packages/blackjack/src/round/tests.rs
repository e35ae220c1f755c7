use std::collections::VecDeque;

use super::*;
use crate::{Rank, Silent, Suit};

/// Replays canned decisions. Runs out to bet 0, stand, and leave.
pub(crate) struct ScriptedInput {
    bets: VecDeque<u64>,
    actions: VecDeque<Action>,
    answers: VecDeque<bool>,
    pub bet_prompts: usize,
    pub action_prompts: usize,
    pub continue_prompts: usize,
}

impl ScriptedInput {
    pub fn new(bets: Vec<u64>, actions: Vec<Action>) -> Self {
        Self {
            bets: bets.into(),
            actions: actions.into(),
            answers: VecDeque::new(),
            bet_prompts: 0,
            action_prompts: 0,
            continue_prompts: 0,
        }
    }

    pub fn with_answers(mut self, answers: Vec<bool>) -> Self {
        self.answers = answers.into();
        self
    }
}

impl TableInput for ScriptedInput {
    fn bet(&mut self, _player: &Player) -> u64 {
        self.bet_prompts += 1;
        self.bets.pop_front().unwrap_or(0)
    }

    fn action(&mut self, _player: &Player, _dealer: &Dealer) -> Action {
        self.action_prompts += 1;
        self.actions.pop_front().unwrap_or(Action::Stand)
    }

    fn keep_playing(&mut self, _player: &Player) -> bool {
        self.continue_prompts += 1;
        self.answers.pop_front().unwrap_or(false)
    }
}

fn card(rank: Rank, n: usize) -> Card {
    Card::new(rank, Suit::ALL[n % 4])
}

/// Deck that deals `hands` two cards each in seat order, then the dealer's
/// two cards, then `draws` in order.
pub(crate) fn stacked_multi(hands: &[&[Rank]], dealer: &[Rank], draws: &[Rank]) -> Deck {
    let mut order: Vec<Rank> = hands.iter().flat_map(|h| h.iter().copied()).collect();
    order.extend_from_slice(dealer);
    order.extend_from_slice(draws);
    let mut cards: Vec<Card> = order
        .into_iter()
        .enumerate()
        .map(|(n, rank)| card(rank, n))
        .collect();
    cards.reverse();
    Deck::from_cards(cards)
}

pub(crate) fn stacked(player: &[Rank], dealer: &[Rank], draws: &[Rank]) -> Deck {
    stacked_multi(&[player], dealer, draws)
}

fn table(names: &[&str]) -> (Vec<Player>, Dealer) {
    let players = names.iter().map(|n| Player::new(*n, 100)).collect();
    (players, Dealer::default())
}

#[test]
fn test_phases_advance_in_order() {
    let (mut players, mut dealer) = table(&["Player1"]);
    let deck = stacked(&[Rank::Ten, Rank::Nine], &[Rank::Ten, Rank::Eight], &[]);
    let mut engine = RoundEngine::new(&mut players, &mut dealer, deck, TableRules::default());
    let mut input = ScriptedInput::new(vec![10], vec![Action::Stand]);
    let mut out: Vec<TableEvent> = Vec::new();

    assert_eq!(engine.phase(), RoundPhase::NewHand);
    let expected = [
        RoundPhase::Betting,
        RoundPhase::InitialDeal,
        RoundPhase::PlayerTurns,
        RoundPhase::DealerTurn,
        RoundPhase::Settlement,
        RoundPhase::Done,
    ];
    for phase in expected {
        assert_eq!(engine.step(&mut input, &mut out).unwrap(), phase);
    }
    assert_eq!(engine.step(&mut input, &mut out), Err(TableError::RoundFinished));
}

#[test]
fn test_new_hand_clears_previous_cards() {
    let (mut players, mut dealer) = table(&["Player1"]);
    players[0].hand_mut().add_card(card(Rank::Two, 0));
    dealer.hand_mut().add_card(card(Rank::Three, 1));
    let deck = Deck::new();
    let mut engine = RoundEngine::new(&mut players, &mut dealer, deck, TableRules::default());
    engine.step(&mut ScriptedInput::new(vec![], vec![]), &mut Silent).unwrap();
    assert!(engine.players()[0].hand().is_empty());
    assert!(engine.dealer().hand().is_empty());
}

#[test]
fn test_opening_natural_and_soft_stand_are_flagged() {
    let (mut players, mut dealer) = table(&["Player1", "Player2"]);
    let deck = stacked_multi(
        &[&[Rank::Ace, Rank::King], &[Rank::Ace, Rank::Seven]],
        &[Rank::Ten, Rank::Nine],
        &[],
    );
    let engine = RoundEngine::new(&mut players, &mut dealer, deck, TableRules::default());
    let mut input = ScriptedInput::new(vec![10, 10], vec![Action::Stand, Action::Stand]);
    let mut events: Vec<TableEvent> = Vec::new();
    engine.play(&mut input, &mut events).unwrap();

    assert!(events.iter().any(|e| matches!(
        e,
        TableEvent::CardsDealt { player, score: 21, soft: true, natural: true, .. } if player == "Player1"
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        TableEvent::CardsDealt { player, score: 18, soft: true, natural: false, .. } if player == "Player2"
    )));
    assert!(events.contains(&TableEvent::PlayerStood {
        player: "Player2".into(),
        score: 18,
        soft: true,
    }));
}

#[test]
fn test_natural_beats_dealer_eighteen() {
    let (mut players, mut dealer) = table(&["Player1"]);
    // Dealer sits on exactly 17, must hit, and the ace lands on 18.
    let deck = stacked(&[Rank::Ace, Rank::King], &[Rank::Ten, Rank::Seven], &[Rank::Ace]);
    let engine = RoundEngine::new(&mut players, &mut dealer, deck, TableRules::default());
    let mut input = ScriptedInput::new(vec![10], vec![Action::Stand]);
    let report = engine.play(&mut input, &mut Silent).unwrap();

    assert_eq!(report.dealer_score, 18);
    assert_eq!(report.dealer_cards.len(), 3);
    assert_eq!(report.results[0].score, 21);
    assert_eq!(report.results[0].outcome, HandOutcome::Win);
    assert_eq!(report.results[0].net_chips, 10);
    assert_eq!(players[0].wallet().total(), 110);
    assert_eq!(players[0].wallet().bet(), 0);
}

#[test]
fn test_dealer_stands_above_seventeen() {
    let (mut players, mut dealer) = table(&["Player1"]);
    let deck = stacked(&[Rank::Ten, Rank::Seven], &[Rank::Ten, Rank::Eight], &[Rank::Five]);
    let engine = RoundEngine::new(&mut players, &mut dealer, deck, TableRules::default());
    let report = engine
        .play(&mut ScriptedInput::new(vec![25], vec![Action::Stand]), &mut Silent)
        .unwrap();

    assert_eq!(report.dealer_cards.len(), 2);
    assert_eq!(report.dealer_score, 18);
    assert_eq!(report.results[0].outcome, HandOutcome::Lose);
    assert_eq!(players[0].chips(), 75);
}

#[test]
fn test_dealer_keeps_hitting_through_soft_seventeen() {
    let (mut players, mut dealer) = table(&["Player1"]);
    // A+6 is soft 17: hit. +10 -> hard 17: hit again. +4 -> 21.
    let deck = stacked(
        &[Rank::Ten, Rank::Ten],
        &[Rank::Ace, Rank::Six],
        &[Rank::Ten, Rank::Four],
    );
    let engine = RoundEngine::new(&mut players, &mut dealer, deck, TableRules::default());
    let mut events: Vec<TableEvent> = Vec::new();
    let report = engine
        .play(&mut ScriptedInput::new(vec![10], vec![Action::Stand]), &mut events)
        .unwrap();

    assert_eq!(report.dealer_score, 21);
    assert_eq!(report.dealer_cards.len(), 4);
    assert_eq!(report.results[0].outcome, HandOutcome::Lose);
    let dealer_hits = events
        .iter()
        .filter(|e| matches!(e, TableEvent::DealerHit { .. }))
        .count();
    assert_eq!(dealer_hits, 2);
    assert!(events.contains(&TableEvent::DealerStood { score: 21 }));
}

#[test]
fn test_bust_is_charged_during_turn_and_skips_settlement() {
    let (mut players, mut dealer) = table(&["Ann", "Bob"]);
    // Ann 10+9 hits a 5 (24). Bob stands on 20. Dealer 16 draws a king and busts.
    let deck = stacked_multi(
        &[&[Rank::Ten, Rank::Nine], &[Rank::Ten, Rank::Queen]],
        &[Rank::Ten, Rank::Six],
        &[Rank::Five, Rank::King],
    );
    let mut engine = RoundEngine::new(&mut players, &mut dealer, deck, TableRules::default());
    let mut input = ScriptedInput::new(vec![10, 10], vec![Action::Hit, Action::Stand]);
    let mut events: Vec<TableEvent> = Vec::new();

    while engine.phase() != RoundPhase::DealerTurn {
        engine.step(&mut input, &mut events).unwrap();
    }
    // Already charged before the dealer plays.
    assert!(engine.busted(0));
    assert!(!engine.busted(1));
    assert_eq!(engine.players()[0].chips(), 90);
    assert_eq!(engine.players()[0].wallet().bet(), 0);

    while engine.phase() != RoundPhase::Done {
        engine.step(&mut input, &mut events).unwrap();
    }
    let report = engine.report();
    assert!(!report.dealer_won_by_default);
    assert_eq!(report.dealer_score, 26);
    assert_eq!(report.results[0].outcome, HandOutcome::BustedDuringTurn);
    assert_eq!(report.results[0].net_chips, -10);
    assert_eq!(report.results[1].outcome, HandOutcome::Win);
    assert_eq!(players[0].chips(), 90);
    assert_eq!(players[1].chips(), 110);

    let settled: Vec<&TableEvent> = events
        .iter()
        .filter(|e| matches!(e, TableEvent::Settled { .. }))
        .collect();
    assert_eq!(settled.len(), 1);
    assert!(events.contains(&TableEvent::DealerBusted { score: 26 }));
}

#[test]
fn test_all_players_bust_dealer_does_not_draw() {
    let (mut players, mut dealer) = table(&["Player1"]);
    let deck = stacked(
        &[Rank::Ten, Rank::Nine],
        &[Rank::Ten, Rank::Two],
        &[Rank::Five, Rank::Three],
    );
    let engine = RoundEngine::new(&mut players, &mut dealer, deck, TableRules::default());
    let mut input = ScriptedInput::new(vec![10], vec![Action::Hit, Action::Hit, Action::Hit]);
    let mut events: Vec<TableEvent> = Vec::new();
    let report = engine.play(&mut input, &mut events).unwrap();

    assert!(report.dealer_won_by_default);
    assert_eq!(report.dealer_score, 12);
    assert_eq!(report.dealer_cards.len(), 2);
    assert_eq!(report.results[0].outcome, HandOutcome::BustedDuringTurn);
    assert_eq!(report.results[0].score, 24);
    assert_eq!(players[0].chips(), 90);
    // No draws after the bust.
    assert_eq!(input.action_prompts, 1);
    assert!(events.contains(&TableEvent::AllPlayersBusted));
    assert!(!events.iter().any(|e| matches!(e, TableEvent::DealerHit { .. })));
    assert!(!events.iter().any(|e| matches!(e, TableEvent::Settled { .. })));
}

#[test]
fn test_tie_clears_bet_only() {
    let (mut players, mut dealer) = table(&["Player1"]);
    let deck = stacked(&[Rank::Ten, Rank::Nine], &[Rank::King, Rank::Nine], &[]);
    let engine = RoundEngine::new(&mut players, &mut dealer, deck, TableRules::default());
    let report = engine
        .play(&mut ScriptedInput::new(vec![40], vec![Action::Stand]), &mut Silent)
        .unwrap();

    assert_eq!(report.results[0].outcome, HandOutcome::Tie);
    assert_eq!(report.results[0].net_chips, 0);
    assert_eq!(players[0].wallet().total(), 100);
    assert_eq!(players[0].wallet().bet(), 0);
}

#[test]
fn test_dealer_bust_pays_every_survivor() {
    let (mut players, mut dealer) = table(&["Ann", "Bob"]);
    let deck = stacked_multi(
        &[&[Rank::Two, Rank::Three], &[Rank::Ten, Rank::Two]],
        &[Rank::Ten, Rank::Five],
        &[Rank::Nine],
    );
    let engine = RoundEngine::new(&mut players, &mut dealer, deck, TableRules::default());
    let mut input = ScriptedInput::new(vec![5, 50], vec![Action::Stand, Action::Stand]);
    let report = engine.play(&mut input, &mut Silent).unwrap();

    assert_eq!(report.dealer_score, 24);
    assert!(report.results.iter().all(|r| r.outcome == HandOutcome::Win));
    assert_eq!(players[0].chips(), 105);
    assert_eq!(players[1].chips(), 150);
}

#[test]
fn test_overbet_is_asked_again() {
    let (mut players, mut dealer) = table(&["Player1"]);
    let deck = stacked(&[Rank::Ten, Rank::Nine], &[Rank::Ten, Rank::Eight], &[]);
    let mut engine = RoundEngine::new(&mut players, &mut dealer, deck, TableRules::default());
    let mut input = ScriptedInput::new(vec![150, 20], vec![]);
    let mut events: Vec<TableEvent> = Vec::new();
    engine.step(&mut input, &mut events).unwrap();
    engine.step(&mut input, &mut events).unwrap();

    assert_eq!(input.bet_prompts, 2);
    assert_eq!(engine.players()[0].wallet().bet(), 20);
    assert_eq!(engine.players()[0].wallet().total(), 100);
    assert_eq!(
        events,
        vec![
            TableEvent::BetRejected {
                player: "Player1".into(),
                error: TableError::InsufficientChips {
                    requested: 150,
                    available: 100
                },
            },
            TableEvent::BetPlaced {
                player: "Player1".into(),
                amount: 20
            },
        ]
    );
}

#[test]
fn test_dealer_hole_card_is_hidden_on_deal() {
    let (mut players, mut dealer) = table(&["Player1"]);
    let deck = stacked(&[Rank::Ten, Rank::Nine], &[Rank::Ace, Rank::Eight], &[]);
    let engine = RoundEngine::new(&mut players, &mut dealer, deck, TableRules::default());
    let mut events: Vec<TableEvent> = Vec::new();
    engine
        .play(&mut ScriptedInput::new(vec![10], vec![]), &mut events)
        .unwrap();

    let showing = events.iter().find_map(|e| match e {
        TableEvent::DealerShowing { up_cards } => Some(up_cards.clone()),
        _ => None,
    });
    let up_cards = showing.unwrap();
    assert_eq!(up_cards.len(), 1);
    assert_eq!(up_cards[0].rank, Rank::Eight);
}

#[test]
fn test_exhausted_deck_is_reported() {
    let (mut players, mut dealer) = table(&["Player1"]);
    let deck = stacked(&[Rank::Ten, Rank::Nine], &[Rank::Ten], &[]);
    let engine = RoundEngine::new(&mut players, &mut dealer, deck, TableRules::default());
    let result = engine.play(&mut ScriptedInput::new(vec![10], vec![]), &mut Silent);
    assert_eq!(result, Err(TableError::EmptyDeck));
}
