use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::types::Resource;

const KINDS: usize = Resource::ALL.len();

/// A hand, a cost or one side of a trade: one unsigned amount per resource kind,
/// stored in `Resource::ALL` order. Amounts never go below zero; removal that would
/// underflow is refused as a whole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceBundle {
    amounts: [u32; KINDS],
}

impl ResourceBundle {
    pub const fn from_counts(amounts: [u32; KINDS]) -> Self {
        Self { amounts }
    }

    pub const fn zero() -> Self {
        Self::from_counts([0; KINDS])
    }

    pub fn single(resource: Resource, amount: u32) -> Self {
        Self::from_pairs(&[(resource, amount)])
    }

    pub fn from_pairs(pairs: &[(Resource, u32)]) -> Self {
        pairs.iter().fold(Self::zero(), |mut bundle, (resource, amount)| {
            bundle.add(*resource, *amount);
            bundle
        })
    }

    pub fn get(&self, resource: Resource) -> u32 {
        self.amounts[resource.index()]
    }

    pub fn counts(&self) -> [u32; KINDS] {
        self.amounts
    }

    pub fn total(&self) -> u32 {
        self.amounts.iter().map(|amount| *amount).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Resource, u32)> + '_ {
        Resource::ALL.iter().copied().zip(self.amounts)
    }

    /// Resources with a nonzero amount.
    pub fn kinds(&self) -> impl Iterator<Item = Resource> + '_ {
        self.iter()
            .filter_map(|(resource, amount)| (amount > 0).then_some(resource))
    }

    /// One entry per unit, grouped by kind in `Resource::ALL` order.
    pub fn units(&self) -> Vec<Resource> {
        self.iter()
            .flat_map(|(resource, amount)| itertools::repeat_n(resource, amount as usize))
            .collect()
    }

    pub fn can_afford(&self, cost: &ResourceBundle) -> bool {
        self.shortfall(cost).is_none()
    }

    /// First kind `cost` asks more of than this bundle holds.
    fn shortfall(&self, cost: &ResourceBundle) -> Option<ResourceError> {
        cost.iter().find_map(|(resource, requested)| {
            let available = self.get(resource);
            (available < requested).then_some(ResourceError::InsufficientResource {
                resource,
                available,
                requested,
            })
        })
    }

    pub fn add(&mut self, resource: Resource, amount: u32) {
        let slot = &mut self.amounts[resource.index()];
        *slot = slot.saturating_add(amount);
    }

    pub fn add_bundle(&mut self, other: &ResourceBundle) {
        for (resource, amount) in other.iter() {
            self.add(resource, amount);
        }
    }

    pub fn subtract(&mut self, resource: Resource, amount: u32) -> Result<(), ResourceError> {
        self.subtract_bundle(&Self::single(resource, amount))
    }

    /// Removes `other` entirely or not at all.
    pub fn subtract_bundle(&mut self, other: &ResourceBundle) -> Result<(), ResourceError> {
        if let Some(err) = self.shortfall(other) {
            return Err(err);
        }
        for (slot, amount) in self.amounts.iter_mut().zip(other.amounts) {
            *slot -= amount;
        }
        Ok(())
    }

    /// Empties one kind, returning what it held.
    pub fn take_all(&mut self, resource: Resource) -> u32 {
        std::mem::take(&mut self.amounts[resource.index()])
    }
}

impl fmt::Display for ResourceBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("nothing");
        }
        let parts = self
            .iter()
            .filter(|(_, amount)| *amount > 0)
            .map(|(resource, amount)| format!("{amount}x{resource}"))
            .join(", ");
        f.write_str(&parts)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    #[error("insufficient {resource}: have {available}, need {requested}")]
    InsufficientResource {
        resource: Resource,
        available: u32,
        requested: u32,
    },
}

//                                                          L  B  S  G  O
pub const COST_ROAD: ResourceBundle = ResourceBundle::from_counts([1, 1, 0, 0, 0]);
pub const COST_SETTLEMENT: ResourceBundle = ResourceBundle::from_counts([1, 1, 1, 1, 0]);
pub const COST_CITY: ResourceBundle = ResourceBundle::from_counts([0, 0, 0, 2, 3]);
pub const COST_DEVELOPMENT: ResourceBundle = ResourceBundle::from_counts([0, 0, 1, 1, 1]);

#[cfg(test)]
mod tests {
    use super::*;
    use Resource::*;

    #[test]
    fn failed_subtraction_leaves_the_hand_alone() {
        let mut hand = ResourceBundle::from_counts([1, 0, 0, 2, 3]);
        let err = hand.subtract_bundle(&COST_SETTLEMENT).unwrap_err();
        assert_eq!(
            err,
            ResourceError::InsufficientResource {
                resource: Brick,
                available: 0,
                requested: 1,
            }
        );
        assert_eq!(hand.counts(), [1, 0, 0, 2, 3]);
        assert!(!hand.can_afford(&COST_SETTLEMENT));
        hand.subtract_bundle(&COST_CITY).unwrap();
        assert_eq!(hand, ResourceBundle::single(Lumber, 1));
        assert!(hand.subtract(Lumber, 2).is_err());
        hand.subtract(Lumber, 1).unwrap();
        assert!(hand.is_empty());
    }

    #[test]
    fn units_are_grouped_in_resource_order() {
        let hand = ResourceBundle::from_pairs(&[(Ore, 1), (Lumber, 2)]);
        assert_eq!(hand.units(), vec![Lumber, Lumber, Ore]);
        assert_eq!(hand.kinds().collect::<Vec<_>>(), vec![Lumber, Ore]);
    }

    #[test]
    fn take_all_empties_one_kind() {
        let mut hand = ResourceBundle::from_counts([0, 0, 4, 1, 0]);
        assert_eq!(hand.take_all(Sheep), 4);
        assert_eq!(hand.total(), 1);
        assert_eq!(hand.to_string(), "1xGRAIN");
        assert_eq!(ResourceBundle::zero().to_string(), "nothing");
    }

    #[test]
    fn amounts_go_past_a_byte() {
        let mut hand = ResourceBundle::single(Lumber, 255);
        hand.add_bundle(&ResourceBundle::single(Lumber, 2));
        assert_eq!(hand.get(Lumber), 257);
        assert_eq!(hand.units().len(), 257);
        assert_eq!(hand.take_all(Lumber), 257);
    }
}
