use serde::{Deserialize, Serialize};

use crate::rng::{RandomSource, shuffled};
use crate::types::DevelopmentCardKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DevelopmentCard {
    pub id: CardId,
    pub kind: DevelopmentCardKind,
}

/// Draw pile. Cards are never removed from storage: drawing only moves the head
/// forward, so the remaining order can always be inspected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevelopmentDeck {
    cards: Vec<DevelopmentCard>,
    head: usize,
}

impl DevelopmentDeck {
    pub fn standard(rng: &mut dyn RandomSource) -> Self {
        use DevelopmentCardKind::*;
        const DISTRIBUTION: &[(DevelopmentCardKind, usize)] = &[
            (Knight, 14),
            (VictoryPoint, 5),
            (RoadBuilding, 2),
            (YearOfPlenty, 2),
            (Monopoly, 2),
        ];

        let mut kinds = Vec::with_capacity(25);
        for (kind, count) in DISTRIBUTION {
            for _ in 0..*count {
                kinds.push(*kind);
            }
        }
        Self::from_kinds(&shuffled(rng, &kinds))
    }

    /// A deck drawn in exactly the given order.
    pub fn from_kinds(kinds: &[DevelopmentCardKind]) -> Self {
        let cards = kinds
            .iter()
            .enumerate()
            .map(|(idx, kind)| DevelopmentCard {
                id: CardId(idx as u16),
                kind: *kind,
            })
            .collect();
        Self { cards, head: 0 }
    }

    pub fn draw(&mut self) -> Option<DevelopmentCard> {
        let card = self.cards.get(self.head).copied()?;
        self.head += 1;
        Some(card)
    }

    pub fn peek(&self) -> &[DevelopmentCard] {
        &self.cards[self.head..]
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.head
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Cards of `kind` the deck started with, drawn or not.
    pub fn total_of(&self, kind: DevelopmentCardKind) -> usize {
        self.cards.iter().filter(|card| card.kind == kind).count()
    }

    pub fn remaining_of(&self, kind: DevelopmentCardKind) -> usize {
        self.peek().iter().filter(|card| card.kind == kind).count()
    }
}
