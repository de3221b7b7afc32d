use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game::resources::ResourceBundle;
use crate::types::{DevelopmentCardKind, Resource};

pub type ResourceTally = BTreeMap<Resource, u32>;

fn tally(into: &mut ResourceTally, bundle: &ResourceBundle) {
    for (resource, amount) in bundle.iter().filter(|(_, amount)| *amount > 0) {
        *into.entry(resource).or_insert(0) += amount;
    }
}

/// Dice outcomes indexed by sum, 2 through 12.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceHistogram(BTreeMap<u8, u32>);

impl DiceHistogram {
    fn record(&mut self, sum: u8) {
        *self.0.entry(sum).or_insert(0) += 1;
    }

    pub fn count(&self, sum: u8) -> u32 {
        self.0.get(&sum).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub dice: DiceHistogram,
    pub resources_drawn: ResourceTally,
    pub resources_discarded: ResourceTally,
    pub resources_blocked: ResourceTally,
    pub resources_used: ResourceTally,
    pub development_cards: BTreeMap<DevelopmentCardKind, u32>,
    pub robberies: u32,
    pub times_robbed: u32,
    pub trades_started: u32,
    pub trades_finalized: u32,
    pub resources_given: ResourceTally,
    pub resources_received: ResourceTally,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub round: u32,
    pub points: Vec<u32>,
    pub longest_roads: Vec<usize>,
}

/// Per-game counters. Nothing here feeds back into the rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookKeeping {
    pub dice: DiceHistogram,
    pub players: Vec<PlayerRecord>,
    pub rounds: Vec<RoundSnapshot>,
}

impl BookKeeping {
    pub fn new(num_players: usize) -> Self {
        Self {
            dice: DiceHistogram::default(),
            players: vec![PlayerRecord::default(); num_players],
            rounds: Vec::new(),
        }
    }

    pub fn player(&self, seat: usize) -> Option<&PlayerRecord> {
        self.players.get(seat)
    }

    pub fn record_roll(&mut self, seat: usize, dice: (u8, u8)) {
        let sum = dice.0 + dice.1;
        self.dice.record(sum);
        self.players[seat].dice.record(sum);
    }

    pub fn record_drawn(&mut self, seat: usize, bundle: &ResourceBundle) {
        tally(&mut self.players[seat].resources_drawn, bundle);
    }

    pub fn record_discarded(&mut self, seat: usize, bundle: &ResourceBundle) {
        tally(&mut self.players[seat].resources_discarded, bundle);
    }

    pub fn record_blocked(&mut self, seat: usize, bundle: &ResourceBundle) {
        tally(&mut self.players[seat].resources_blocked, bundle);
    }

    pub fn record_used(&mut self, seat: usize, bundle: &ResourceBundle) {
        tally(&mut self.players[seat].resources_used, bundle);
    }

    pub fn record_card(&mut self, seat: usize, kind: DevelopmentCardKind) {
        *self.players[seat]
            .development_cards
            .entry(kind)
            .or_insert(0) += 1;
    }

    pub fn record_robbery(&mut self, robber: usize, victim: usize) {
        self.players[robber].robberies += 1;
        self.players[victim].times_robbed += 1;
    }

    pub fn record_trade_started(&mut self, seat: usize) {
        self.players[seat].trades_started += 1;
    }

    /// Both parties of a settled exchange: `first` gave `gave` and got `got`.
    pub fn record_exchange(
        &mut self,
        first: usize,
        second: Option<usize>,
        gave: &ResourceBundle,
        got: &ResourceBundle,
    ) {
        let record = &mut self.players[first];
        record.trades_finalized += 1;
        tally(&mut record.resources_given, gave);
        tally(&mut record.resources_received, got);
        if let Some(second) = second {
            let record = &mut self.players[second];
            record.trades_finalized += 1;
            tally(&mut record.resources_given, got);
            tally(&mut record.resources_received, gave);
        }
    }

    pub fn record_round(&mut self, round: u32, points: Vec<u32>, longest_roads: Vec<usize>) {
        self.rounds.push(RoundSnapshot {
            round,
            points,
            longest_roads,
        });
    }
}
