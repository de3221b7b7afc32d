use std::fmt;

use serde::{Deserialize, Serialize};
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Phase {
    SetupSettlement1,
    SetupRoad1,
    SetupSettlement2,
    SetupRoad2,
    FirstRound,
    Regular,
    MoveRobberDue7,
    MoveRobberDueKnight,
    PickRobbed,
    BetweenTurns,
    BuildRoad1Development,
    BuildRoad2Development,
    MonopolyPickResource,
    YearOfPlentyPickResources,
    DiscardPhase,
    GameOver,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::SetupSettlement1 => "SettlementSetup#1",
            Phase::SetupRoad1 => "RoadSetup#1",
            Phase::SetupSettlement2 => "SettlementSetup#2",
            Phase::SetupRoad2 => "RoadSetup#2",
            Phase::FirstRound => "FirstRound",
            Phase::Regular => "Regular",
            Phase::MoveRobberDue7 => "MoveRobber(7)",
            Phase::MoveRobberDueKnight => "MoveRobber(Knight)",
            Phase::PickRobbed => "ChooseRobbedPlayer",
            Phase::BetweenTurns => "BetweenRounds",
            Phase::BuildRoad1Development => "BuildRoadDevelopment(1)",
            Phase::BuildRoad2Development => "BuildRoadDevelopment(2)",
            Phase::MonopolyPickResource => "MonopolyPickResource",
            Phase::YearOfPlentyPickResources => "YearOfPlentyPickResources",
            Phase::DiscardPhase => "DiscardPhase",
            Phase::GameOver => "GameOver",
        }
    }

    pub fn is_setup(self) -> bool {
        matches!(
            self,
            Phase::SetupSettlement1 | Phase::SetupRoad1 | Phase::SetupSettlement2 | Phase::SetupRoad2
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Turn bookkeeping: whose turn it is, what they may do, and where to come back to
/// after a card or robber detour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    phase: Phase,
    round: u32,
    current: usize,
    num_players: usize,
    dice: Option<(u8, u8)>,
    resume: Option<Phase>,
    dev_cards_played: u32,
}

impl RoundState {
    pub fn new(num_players: usize) -> Self {
        Self {
            phase: Phase::SetupSettlement1,
            round: 0,
            current: 0,
            num_players,
            dice: None,
            resume: None,
            dev_cards_played: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn dice(&self) -> Option<(u8, u8)> {
        self.dice
    }

    pub fn has_rolled(&self) -> bool {
        self.dice.is_some()
    }

    pub fn dev_cards_played(&self) -> u32 {
        self.dev_cards_played
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn set_current(&mut self, current: usize) {
        self.current = current;
    }

    pub(crate) fn set_round(&mut self, round: u32) {
        self.round = round;
    }

    pub(crate) fn record_dice(&mut self, dice: (u8, u8)) {
        self.dice = Some(dice);
    }

    pub(crate) fn record_dev_card_play(&mut self) {
        self.dev_cards_played += 1;
    }

    /// Moves past the setup placement just made. Returns true once the reverse pass
    /// is complete and regular play begins.
    pub(crate) fn advance_setup(&mut self) -> bool {
        match self.phase {
            Phase::SetupSettlement1 => self.phase = Phase::SetupRoad1,
            Phase::SetupRoad1 => {
                if self.current + 1 < self.num_players {
                    self.current += 1;
                    self.phase = Phase::SetupSettlement1;
                } else {
                    self.phase = Phase::SetupSettlement2;
                }
            }
            Phase::SetupSettlement2 => self.phase = Phase::SetupRoad2,
            Phase::SetupRoad2 => {
                if self.current == 0 {
                    self.phase = Phase::FirstRound;
                    return true;
                }
                self.current -= 1;
                self.phase = Phase::SetupSettlement2;
            }
            _ => {}
        }
        false
    }

    /// Enters a sub-phase, remembering the phase to come back to.
    pub(crate) fn detour(&mut self, phase: Phase) {
        if self.resume.is_none() {
            self.resume = Some(self.phase);
        }
        self.phase = phase;
    }

    /// Leaves a sub-phase. Without a remembered phase, falls back to Regular after a
    /// roll and BetweenTurns before one.
    pub(crate) fn finish_detour(&mut self) {
        if self.phase == Phase::GameOver {
            return;
        }
        self.phase = self.resume.take().unwrap_or(if self.has_rolled() {
            Phase::Regular
        } else {
            Phase::BetweenTurns
        });
    }

    pub(crate) fn end_turn(&mut self) {
        self.round += 1;
        self.dice = None;
        self.resume = None;
        self.dev_cards_played = 0;
        self.current = (self.current + 1) % self.num_players;
        self.phase = Phase::BetweenTurns;
    }

    pub(crate) fn finish_game(&mut self) {
        self.phase = Phase::GameOver;
        self.resume = None;
    }
}
