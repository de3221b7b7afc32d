use std::collections::BTreeMap;

use itertools::Itertools;

use crate::board::{Board, EdgeId, TileId, VertexId};
use crate::game::config::GameConfig;
use crate::game::players::PlayerState;
use crate::game::resources::ResourceBundle;
use crate::game::round::Phase;
use crate::game::scoring::PointBreakdown;
use crate::game::state::{GameError, GameState};
use crate::game::stats::BookKeeping;
use crate::game::trade::Trade;
use crate::types::{DevelopmentCardKind, PortKind};

impl GameState {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn player(&self, player: &str) -> Result<&PlayerState, GameError> {
        Ok(&self.players[self.seat_of(player)?])
    }

    pub fn phase(&self) -> Phase {
        self.round.phase()
    }

    pub fn phase_label(&self) -> &'static str {
        self.round.phase().label()
    }

    pub fn current_player(&self) -> &str {
        self.name(self.round.current())
    }

    pub fn current_seat(&self) -> usize {
        self.round.current()
    }

    pub fn round_number(&self) -> u32 {
        self.round.round()
    }

    pub fn dice(&self) -> Option<(u8, u8)> {
        self.round.dice()
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.map(|seat| self.name(seat))
    }

    /// Logical clock: the number of commands accepted through `apply`.
    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn resource_hand(&self, player: &str) -> Result<ResourceBundle, GameError> {
        Ok(self.player(player)?.resources)
    }

    pub fn development_hand(
        &self,
        player: &str,
    ) -> Result<BTreeMap<DevelopmentCardKind, usize>, GameError> {
        Ok(self.player(player)?.development_hand())
    }

    pub fn used_development_cards(
        &self,
        player: &str,
    ) -> Result<BTreeMap<DevelopmentCardKind, usize>, GameError> {
        let state = self.player(player)?;
        Ok(DevelopmentCardKind::ALL
            .iter()
            .map(|kind| (*kind, state.used(*kind)))
            .collect())
    }

    pub fn development_cards_left(&self) -> usize {
        self.deck.remaining()
    }

    pub fn settlements(&self, player: &str) -> Result<&[VertexId], GameError> {
        Ok(&self.player(player)?.settlements)
    }

    pub fn cities(&self, player: &str) -> Result<&[VertexId], GameError> {
        Ok(&self.player(player)?.cities)
    }

    pub fn roads(&self, player: &str) -> Result<&[EdgeId], GameError> {
        Ok(&self.player(player)?.roads)
    }

    pub fn ports_of(&self, player: &str) -> Result<Vec<PortKind>, GameError> {
        Ok(self.ports_held(self.seat_of(player)?))
    }

    pub fn blocked_tiles(&self) -> Vec<TileId> {
        self.board.robber().into_iter().collect()
    }

    pub fn unblocked_tiles(&self) -> Vec<TileId> {
        self.board
            .topology()
            .tiles()
            .iter()
            .map(|tile| tile.id)
            .filter(|id| !self.board.is_blocked(*id))
            .collect()
    }

    /// Vertices where `player` could place a settlement in the current phase.
    pub fn available_vertices(&self, player: &str) -> Result<Vec<VertexId>, GameError> {
        let seat = self.seat_of(player)?;
        let topology = self.board.topology();
        let all = 0..topology.num_vertices() as VertexId;
        let vertices = match self.round.phase() {
            Phase::SetupSettlement1 | Phase::SetupSettlement2 => all
                .filter(|v| self.board.respects_distance_rule(*v))
                .collect(),
            Phase::Regular
                if self.players[seat].settlements.len() < self.config.max_settlements =>
            {
                all.filter(|v| {
                    self.board.respects_distance_rule(*v) && self.board.has_road_touching(seat, *v)
                })
                .collect()
            }
            _ => Vec::new(),
        };
        Ok(vertices)
    }

    /// Edges where `player` could place a road in the current phase.
    pub fn available_edges(&self, player: &str) -> Result<Vec<EdgeId>, GameError> {
        let seat = self.seat_of(player)?;
        let topology = self.board.topology();
        let edges = match self.round.phase() {
            Phase::SetupRoad1 | Phase::SetupRoad2 => match self.players[seat].last_settlement() {
                Some(anchor) => topology
                    .edges_of_vertex(anchor)
                    .iter()
                    .copied()
                    .filter(|e| self.board.road_owner(*e).is_none())
                    .sorted()
                    .collect(),
                None => Vec::new(),
            },
            Phase::Regular | Phase::BuildRoad1Development | Phase::BuildRoad2Development
                if self.players[seat].roads.len() < self.config.max_roads =>
            {
                self.board.open_edges(seat).collect()
            }
            _ => Vec::new(),
        };
        Ok(edges)
    }

    pub fn points(&self, player: &str) -> Result<u32, GameError> {
        Ok(self.breakdown(self.seat_of(player)?).total)
    }

    pub fn public_points(&self, player: &str) -> Result<u32, GameError> {
        Ok(self.breakdown(self.seat_of(player)?).public())
    }

    pub fn point_distribution(&self, player: &str) -> Result<PointBreakdown, GameError> {
        Ok(self.breakdown(self.seat_of(player)?))
    }

    pub fn longest_road_holder(&self) -> Option<&str> {
        self.titles.longest_road.map(|seat| self.name(seat))
    }

    pub fn most_knights_holder(&self) -> Option<&str> {
        self.titles.most_knights.map(|seat| self.name(seat))
    }

    pub fn longest_road_lengths(&self) -> Vec<(&str, usize)> {
        self.players
            .iter()
            .map(|state| (state.id(), state.longest_road_length()))
            .collect()
    }

    pub fn knight_uses(&self) -> Vec<(&str, u32)> {
        self.players
            .iter()
            .map(|state| (state.id(), state.knights_used()))
            .collect()
    }

    pub fn robbable_players(&self, player: &str) -> Result<Vec<&str>, GameError> {
        let seat = self.seat_of(player)?;
        Ok(self
            .robbable_seats(seat)
            .into_iter()
            .map(|other| self.name(other))
            .collect())
    }

    /// Outstanding discards, for seats that still owe.
    pub fn discard_amounts(&self) -> Vec<(&str, u32)> {
        self.players
            .iter()
            .filter(|state| state.discard_amount > 0 && !state.has_discarded)
            .map(|state| (state.id(), state.discard_amount))
            .collect()
    }

    pub fn trades(&self) -> Vec<&Trade> {
        self.trades.trades().collect()
    }

    pub fn active_trades(&self) -> Vec<&Trade> {
        self.trades.active().collect()
    }

    pub fn statistics(&self) -> &BookKeeping {
        &self.stats
    }
}
