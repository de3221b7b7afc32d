use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::board::{EdgeId, VertexId};
use crate::game::deck::{CardId, DevelopmentCard};
use crate::game::resources::{ResourceBundle, ResourceError};
use crate::types::{Color, DevelopmentCardKind, PortKind, Resource};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub color: Color,
}

impl Player {
    pub fn new(id: impl Into<String>, color: Color) -> Self {
        Self {
            id: id.into(),
            color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldCard {
    pub card: DevelopmentCard,
    pub round_bought: u32,
}

/// Everything one seat owns. Buildings are listed in placement order; the last
/// settlement anchors the setup road.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub player: Player,
    pub resources: ResourceBundle,
    pub development_cards: Vec<HeldCard>,
    pub used_cards: Vec<HeldCard>,
    pub settlements: Vec<VertexId>,
    pub cities: Vec<VertexId>,
    pub roads: Vec<EdgeId>,
    pub ports: BTreeMap<VertexId, PortKind>,
    pub longest_road: Vec<EdgeId>,
    pub discard_amount: u32,
    pub has_discarded: bool,
}

impl PlayerState {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            resources: ResourceBundle::zero(),
            development_cards: Vec::new(),
            used_cards: Vec::new(),
            settlements: Vec::new(),
            cities: Vec::new(),
            roads: Vec::new(),
            ports: BTreeMap::new(),
            longest_road: Vec::new(),
            discard_amount: 0,
            has_discarded: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.player.id
    }

    pub fn hand_size(&self) -> u32 {
        self.resources.total()
    }

    pub fn add_resources(&mut self, bundle: &ResourceBundle) {
        self.resources.add_bundle(bundle);
    }

    pub fn remove_resources(&mut self, bundle: &ResourceBundle) -> Result<(), ResourceError> {
        self.resources.subtract_bundle(bundle)
    }

    pub fn has(&self, resource: Resource, amount: u32) -> bool {
        self.resources.get(resource) >= amount
    }

    pub fn add_card(&mut self, card: DevelopmentCard, round_bought: u32) {
        self.development_cards.push(HeldCard { card, round_bought });
    }

    pub fn holds(&self, kind: DevelopmentCardKind) -> usize {
        self.development_cards
            .iter()
            .filter(|held| held.card.kind == kind)
            .count()
    }

    pub fn used(&self, kind: DevelopmentCardKind) -> usize {
        self.used_cards
            .iter()
            .filter(|held| held.card.kind == kind)
            .count()
    }

    pub fn knights_used(&self) -> u32 {
        self.used(DevelopmentCardKind::Knight) as u32
    }

    pub fn victory_point_cards(&self) -> u32 {
        self.holds(DevelopmentCardKind::VictoryPoint) as u32
    }

    /// First card of `kind` bought before `round`.
    pub fn playable_card(&self, kind: DevelopmentCardKind, round: u32) -> Option<CardId> {
        self.development_cards
            .iter()
            .find(|held| held.card.kind == kind && held.round_bought < round)
            .map(|held| held.card.id)
    }

    /// Moves the card from the hand to the used pile.
    pub fn consume_card(&mut self, id: CardId) -> Option<HeldCard> {
        let pos = self
            .development_cards
            .iter()
            .position(|held| held.card.id == id)?;
        let held = self.development_cards.remove(pos);
        self.used_cards.push(held);
        Some(held)
    }

    pub fn development_hand(&self) -> BTreeMap<DevelopmentCardKind, usize> {
        DevelopmentCardKind::ALL
            .iter()
            .map(|kind| (*kind, self.holds(*kind)))
            .collect()
    }

    pub fn owns_port(&self, kind: PortKind) -> bool {
        self.ports.values().any(|owned| *owned == kind)
    }

    pub fn last_settlement(&self) -> Option<VertexId> {
        self.settlements.last().copied()
    }

    pub fn promote_settlement(&mut self, vertex: VertexId) -> bool {
        let Some(pos) = self.settlements.iter().position(|v| *v == vertex) else {
            return false;
        };
        self.settlements.remove(pos);
        self.cities.push(vertex);
        true
    }

    /// Cards owed after a seven: half the hand, rounded down, once it exceeds `max_cards`.
    pub fn discard_obligation(&self, max_cards: u32) -> u32 {
        let hand = self.hand_size();
        if hand > max_cards { hand / 2 } else { 0 }
    }

    pub fn longest_road_length(&self) -> usize {
        self.longest_road.len()
    }
}
