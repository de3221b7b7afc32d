use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::config::GameConfig;
use crate::game::players::PlayerState;
use crate::game::resources::{ResourceBundle, ResourceError};
use crate::types::{PortKind, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TradeId(pub u32);

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    Open,
    Accepted,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeResponse {
    pub status: ResponseStatus,
    pub blocked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeStatus {
    Open,
    Closed,
    Finalized,
}

/// One offer in a negotiation tree. Terms are always phrased from the requester's
/// side: `offer` leaves the requester, `request` comes back to them. A counter keeps
/// the requester of its parent and records who proposed it as `creator`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub requester: usize,
    pub creator: usize,
    pub responses: BTreeMap<usize, TradeResponse>,
    pub offer: ResourceBundle,
    pub request: ResourceBundle,
    pub status: TradeStatus,
    pub parent: Option<TradeId>,
    pub children: Vec<TradeId>,
    pub finalized: bool,
    pub timestamp: u64,
}

impl Trade {
    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open
    }

    pub fn is_counter(&self) -> bool {
        self.parent.is_some()
    }

    /// Response entry of a seat that may act on this trade.
    fn responder(&self, seat: usize) -> Result<&TradeResponse, TradeError> {
        let response = self
            .responses
            .get(&seat)
            .ok_or(TradeError::NotParticipant(seat, self.id))?;
        if response.blocked {
            return Err(TradeError::Blocked(seat, self.id));
        }
        Ok(response)
    }

    fn set_status(&mut self, seat: usize, status: ResponseStatus) {
        if let Some(response) = self.responses.get_mut(&seat) {
            response.status = status;
        }
    }

    fn close(&mut self) {
        self.status = TradeStatus::Closed;
        self.finalized = true;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TradeError {
    #[error("trade {0} not found")]
    NotFound(TradeId),
    #[error("trade {0} is no longer open")]
    NotOpen(TradeId),
    #[error("player {0} cannot respond to their own trade {1}")]
    OwnTrade(usize, TradeId),
    #[error("player {0} is blocked from trade {1}")]
    Blocked(usize, TradeId),
    #[error("player {0} takes no part in trade {1}")]
    NotParticipant(usize, TradeId),
    #[error("counter offer repeats the terms of trade {0}")]
    UnchangedCounter(TradeId),
    #[error("only the requester may finalize trade {0}")]
    NotRequester(TradeId),
    #[error("only the creator may cancel trade {0}")]
    NotCreator(TradeId),
    #[error("player {0} has not accepted trade {1}")]
    NotAccepted(usize, TradeId),
    #[error("player {0} cannot trade with themselves")]
    SelfTrade(usize),
    #[error("both sides of a trade must be non-empty")]
    EmptySide,
    #[error("player {seat} cannot cover the trade: {source}")]
    Insufficient {
        seat: usize,
        #[source]
        source: ResourceError,
    },
    #[error("cannot exchange nothing")]
    EmptyExchange,
    #[error("cannot trade {amount} of {resource}: not a multiple of {rate}")]
    NotMultipleOfRate {
        resource: Resource,
        amount: u32,
        rate: u32,
    },
    #[error("cannot give and request {0} in the same exchange")]
    ResourceOnBothSides(Resource),
    #[error("wrong proportion: given resources pay for {expected}, requested {requested}")]
    Disproportionate { expected: u32, requested: u32 },
    #[error("port {0} not owned")]
    PortNotOwned(PortKind),
    #[error("cannot trade {0} in a general port while owning its specific port")]
    SpecificPortOwned(Resource),
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

fn ensure_holds(
    players: &[PlayerState],
    seat: usize,
    bundle: &ResourceBundle,
) -> Result<(), TradeError> {
    let mut hand = players[seat].resources;
    hand.subtract_bundle(bundle)
        .map_err(|source| TradeError::Insufficient { seat, source })
}

/// All direct trades of one game, roots and counters alike, keyed by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeBook {
    trades: BTreeMap<TradeId, Trade>,
    next_id: u32,
}

impl Default for TradeBook {
    fn default() -> Self {
        Self {
            trades: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl TradeBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: TradeId) -> Option<&Trade> {
        self.trades.get(&id)
    }

    /// Every trade ever opened, by id.
    pub fn trades(&self) -> impl Iterator<Item = &Trade> + '_ {
        self.trades.values()
    }

    pub fn active(&self) -> impl Iterator<Item = &Trade> + '_ {
        self.trades.values().filter(|trade| trade.is_open())
    }

    fn open_trade(&self, id: TradeId) -> Result<&Trade, TradeError> {
        let trade = self.trades.get(&id).ok_or(TradeError::NotFound(id))?;
        if !trade.is_open() {
            return Err(TradeError::NotOpen(id));
        }
        Ok(trade)
    }

    fn open_trade_mut(&mut self, id: TradeId) -> Result<&mut Trade, TradeError> {
        let trade = self.trades.get_mut(&id).ok_or(TradeError::NotFound(id))?;
        if !trade.is_open() {
            return Err(TradeError::NotOpen(id));
        }
        Ok(trade)
    }

    fn allocate(&mut self) -> TradeId {
        let id = TradeId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn open(
        &mut self,
        players: &[PlayerState],
        requester: usize,
        offer: ResourceBundle,
        request: ResourceBundle,
        blocked: &[usize],
        timestamp: u64,
    ) -> Result<TradeId, TradeError> {
        if offer.is_empty() || request.is_empty() {
            return Err(TradeError::EmptySide);
        }
        ensure_holds(players, requester, &offer)?;

        let responses = (0..players.len())
            .filter(|seat| *seat != requester)
            .map(|seat| {
                let response = TradeResponse {
                    status: ResponseStatus::Open,
                    blocked: blocked.contains(&seat),
                };
                (seat, response)
            })
            .collect();
        let id = self.allocate();
        self.trades.insert(
            id,
            Trade {
                id,
                requester,
                creator: requester,
                responses,
                offer,
                request,
                status: TradeStatus::Open,
                parent: None,
                children: Vec::new(),
                finalized: false,
                timestamp,
            },
        );
        Ok(id)
    }

    /// Proposes new terms under `parent`. A counter from an opponent counts as that
    /// opponent's acceptance of the new terms.
    pub fn counter(
        &mut self,
        players: &[PlayerState],
        seat: usize,
        parent: TradeId,
        offer: ResourceBundle,
        request: ResourceBundle,
        timestamp: u64,
    ) -> Result<TradeId, TradeError> {
        let base = self.open_trade(parent)?;
        if base.creator == seat {
            return Err(TradeError::OwnTrade(seat, parent));
        }
        if seat != base.requester {
            base.responder(seat)?;
        }
        if offer.is_empty() || request.is_empty() {
            return Err(TradeError::EmptySide);
        }
        if base.offer == offer && base.request == request {
            return Err(TradeError::UnchangedCounter(parent));
        }
        let gives = if seat == base.requester {
            &offer
        } else {
            &request
        };
        ensure_holds(players, seat, gives)?;

        let requester = base.requester;
        let mut responses: BTreeMap<usize, TradeResponse> = base
            .responses
            .iter()
            .map(|(other, response)| {
                let reset = TradeResponse {
                    status: ResponseStatus::Open,
                    blocked: response.blocked,
                };
                (*other, reset)
            })
            .collect();
        if let Some(response) = responses.get_mut(&seat) {
            response.status = ResponseStatus::Accepted;
        }

        let id = self.allocate();
        self.trades.insert(
            id,
            Trade {
                id,
                requester,
                creator: seat,
                responses,
                offer,
                request,
                status: TradeStatus::Open,
                parent: Some(parent),
                children: Vec::new(),
                finalized: false,
                timestamp,
            },
        );
        if let Some(base) = self.trades.get_mut(&parent) {
            base.children.push(id);
        }
        Ok(id)
    }

    /// Marks `seat` as willing. A seat that can no longer pay is moved to Declined
    /// and the error is still returned.
    pub fn accept(
        &mut self,
        players: &[PlayerState],
        seat: usize,
        id: TradeId,
    ) -> Result<(), TradeError> {
        let trade = self.open_trade_mut(id)?;
        if trade.creator == seat {
            return Err(TradeError::OwnTrade(seat, id));
        }
        trade.responder(seat)?;
        if let Err(err) = ensure_holds(players, seat, &trade.request) {
            trade.set_status(seat, ResponseStatus::Declined);
            return Err(err);
        }
        trade.set_status(seat, ResponseStatus::Accepted);
        Ok(())
    }

    /// The requester rejecting a counter closes it; anyone else declines.
    pub fn reject(&mut self, seat: usize, id: TradeId) -> Result<(), TradeError> {
        let trade = self.open_trade_mut(id)?;
        if trade.requester == seat {
            if !trade.is_counter() {
                return Err(TradeError::OwnTrade(seat, id));
            }
            trade.close();
            return Ok(());
        }
        trade.responder(seat)?;
        trade.set_status(seat, ResponseStatus::Declined);
        Ok(())
    }

    pub fn cancel(&mut self, seat: usize, id: TradeId) -> Result<(), TradeError> {
        let trade = self.trades.get_mut(&id).ok_or(TradeError::NotFound(id))?;
        if trade.creator != seat {
            return Err(TradeError::NotCreator(id));
        }
        if !trade.is_open() {
            return Err(TradeError::NotOpen(id));
        }
        trade.close();
        Ok(())
    }

    /// Settles `id` between its requester and `accepter`, then closes every other
    /// open trade in the same tree. Returns the ids that were closed.
    ///
    /// Two failures still change state: a requester who can no longer pay loses the
    /// trade, and an accepter who can no longer pay is moved to Declined.
    pub fn finalize(
        &mut self,
        players: &mut [PlayerState],
        seat: usize,
        accepter: usize,
        id: TradeId,
    ) -> Result<Vec<TradeId>, TradeError> {
        let trade = self.open_trade(id)?;
        if trade.requester != seat {
            return Err(TradeError::NotRequester(id));
        }
        if accepter == seat {
            return Err(TradeError::SelfTrade(seat));
        }
        let accepted = trade
            .responses
            .get(&accepter)
            .is_some_and(|response| response.status == ResponseStatus::Accepted);
        if !accepted {
            return Err(TradeError::NotAccepted(accepter, id));
        }
        let (offer, request) = (trade.offer, trade.request);

        if let Err(err) = ensure_holds(players, seat, &offer) {
            log::warn!("trade {id} closed: requester {seat} can no longer pay");
            if let Some(trade) = self.trades.get_mut(&id) {
                trade.close();
            }
            return Err(err);
        }
        if let Err(err) = ensure_holds(players, accepter, &request) {
            log::warn!("trade {id}: accepter {accepter} can no longer pay");
            if let Some(trade) = self.trades.get_mut(&id) {
                trade.set_status(accepter, ResponseStatus::Declined);
            }
            return Err(err);
        }

        players[seat].remove_resources(&offer)?;
        players[accepter].remove_resources(&request)?;
        players[seat].add_resources(&request);
        players[accepter].add_resources(&offer);

        if let Some(trade) = self.trades.get_mut(&id) {
            trade.status = TradeStatus::Finalized;
            trade.finalized = true;
        }
        let mut closed = Vec::new();
        for other in self.tree_of(id) {
            if let Some(trade) = self.trades.get_mut(&other) {
                if trade.is_open() {
                    trade.close();
                    closed.push(other);
                }
            }
        }
        log::info!("trade {id} finalized between {seat} and {accepter}");
        Ok(closed)
    }

    /// Closes every open trade, returning how many there were.
    pub fn cancel_active(&mut self) -> usize {
        let mut count = 0;
        for trade in self.trades.values_mut().filter(|trade| trade.is_open()) {
            trade.close();
            count += 1;
        }
        count
    }

    /// Root of `id` and all of its descendants.
    fn tree_of(&self, id: TradeId) -> BTreeSet<TradeId> {
        let mut root = id;
        while let Some(parent) = self.trades.get(&root).and_then(|trade| trade.parent) {
            root = parent;
        }
        let mut tree = BTreeSet::new();
        let mut pending = vec![root];
        while let Some(next) = pending.pop() {
            if tree.insert(next) {
                if let Some(trade) = self.trades.get(&next) {
                    pending.extend(trade.children.iter().copied());
                }
            }
        }
        tree
    }
}

/// Counterparty of a single-player exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exchange {
    Bank,
    GeneralPort,
    ResourcePort,
}

impl Exchange {
    pub fn rate(self, config: &GameConfig) -> u32 {
        match self {
            Exchange::Bank => config.bank_trade_amount,
            Exchange::GeneralPort => config.general_port_trade_amount,
            Exchange::ResourcePort => config.resource_port_trade_amount,
        }
    }
}

/// Checks an exchange of `given` for `requested` at the rate of `kind`.
pub fn validate_exchange(
    kind: Exchange,
    player: &PlayerState,
    config: &GameConfig,
    given: &ResourceBundle,
    requested: &ResourceBundle,
) -> Result<(), TradeError> {
    if given.is_empty() {
        return Err(TradeError::EmptyExchange);
    }
    if kind == Exchange::GeneralPort && !player.owns_port(PortKind::General) {
        return Err(TradeError::PortNotOwned(PortKind::General));
    }

    let rate = kind.rate(config);
    let mut payable = 0u32;
    for (resource, amount) in given.iter().filter(|(_, amount)| *amount > 0) {
        let specific = PortKind::Resource(resource);
        match kind {
            Exchange::GeneralPort if player.owns_port(specific) => {
                return Err(TradeError::SpecificPortOwned(resource));
            }
            Exchange::ResourcePort if !player.owns_port(specific) => {
                return Err(TradeError::PortNotOwned(specific));
            }
            _ => {}
        }
        if amount % rate != 0 {
            return Err(TradeError::NotMultipleOfRate {
                resource,
                amount,
                rate,
            });
        }
        let mut hand = player.resources;
        hand.subtract(resource, amount)?;
        payable += amount / rate;
    }

    if let Some(resource) = requested.kinds().find(|r| given.get(*r) > 0) {
        return Err(TradeError::ResourceOnBothSides(resource));
    }
    if requested.total() != payable {
        return Err(TradeError::Disproportionate {
            expected: payable,
            requested: requested.total(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::players::Player;
    use crate::types::Color;
    use Resource::*;

    fn table(hands: &[[u32; 5]]) -> Vec<PlayerState> {
        hands
            .iter()
            .zip(Color::ORDERED)
            .enumerate()
            .map(|(seat, (hand, color))| {
                let mut state = PlayerState::new(Player::new((seat + 1).to_string(), color));
                state.resources = ResourceBundle::from_counts(*hand);
                state
            })
            .collect()
    }

    fn one(resource: Resource) -> ResourceBundle {
        ResourceBundle::single(resource, 1)
    }

    #[test]
    fn open_requires_holding_offer() {
        let players = table(&[[1, 0, 0, 0, 0], [0, 1, 0, 0, 0], [0; 5]]);
        let mut book = TradeBook::new();
        let err = book
            .open(&players, 0, one(Ore), one(Brick), &[], 0)
            .unwrap_err();
        assert!(matches!(err, TradeError::Insufficient { seat: 0, .. }));
        assert_eq!(
            book.open(&players, 0, ResourceBundle::zero(), one(Brick), &[], 0),
            Err(TradeError::EmptySide)
        );

        let id = book.open(&players, 0, one(Lumber), one(Brick), &[2], 1).unwrap();
        assert_eq!(id, TradeId(1));
        let trade = book.get(id).unwrap();
        assert_eq!(trade.responses.len(), 2);
        assert!(trade.responses[&2].blocked);
        assert!(!trade.responses.contains_key(&0));
    }

    #[test]
    fn accept_demotes_when_unaffordable() {
        let players = table(&[[1, 0, 0, 0, 0], [0, 1, 0, 0, 0], [0; 5]]);
        let mut book = TradeBook::new();
        let id = book.open(&players, 0, one(Lumber), one(Brick), &[], 0).unwrap();

        assert_eq!(book.accept(&players, 0, id), Err(TradeError::OwnTrade(0, id)));
        assert!(book.accept(&players, 2, id).is_err());
        assert_eq!(
            book.get(id).unwrap().responses[&2].status,
            ResponseStatus::Declined
        );
        book.accept(&players, 1, id).unwrap();
        assert_eq!(
            book.get(id).unwrap().responses[&1].status,
            ResponseStatus::Accepted
        );
    }

    #[test]
    fn blocked_players_cannot_respond() {
        let players = table(&[[1, 0, 0, 0, 0], [0, 1, 0, 0, 0]]);
        let mut book = TradeBook::new();
        let id = book.open(&players, 0, one(Lumber), one(Brick), &[1], 0).unwrap();
        assert_eq!(book.accept(&players, 1, id), Err(TradeError::Blocked(1, id)));
        assert_eq!(book.reject(1, id), Err(TradeError::Blocked(1, id)));
        assert!(matches!(
            book.counter(&players, 1, id, one(Lumber), ResourceBundle::single(Brick, 2), 1),
            Err(TradeError::Blocked(1, _))
        ));
    }

    #[test]
    fn counter_presets_creator_acceptance() {
        let players = table(&[[2, 0, 0, 0, 0], [0, 2, 0, 0, 0], [0, 1, 0, 0, 0]]);
        let mut book = TradeBook::new();
        let root = book.open(&players, 0, one(Lumber), one(Brick), &[], 0).unwrap();
        book.reject(2, root).unwrap();

        let ask_more = ResourceBundle::single(Brick, 2);
        assert_eq!(
            book.counter(&players, 1, root, one(Lumber), one(Brick), 1),
            Err(TradeError::UnchangedCounter(root))
        );
        let child = book.counter(&players, 1, root, one(Lumber), ask_more, 1).unwrap();
        let trade = book.get(child).unwrap();
        assert_eq!((trade.requester, trade.creator), (0, 1));
        assert_eq!(trade.responses[&1].status, ResponseStatus::Accepted);
        assert_eq!(trade.responses[&2].status, ResponseStatus::Open);
        assert_eq!(book.get(root).unwrap().children, vec![child]);

        assert_eq!(
            book.counter(&players, 1, child, one(Lumber), one(Brick), 2),
            Err(TradeError::OwnTrade(1, child))
        );
    }

    #[test]
    fn requester_rejecting_counter_closes_it() {
        let players = table(&[[2, 0, 0, 0, 0], [0, 2, 0, 0, 0]]);
        let mut book = TradeBook::new();
        let root = book.open(&players, 0, one(Lumber), one(Brick), &[], 0).unwrap();
        let child = book
            .counter(&players, 1, root, one(Lumber), ResourceBundle::single(Brick, 2), 1)
            .unwrap();
        assert_eq!(book.reject(0, root), Err(TradeError::OwnTrade(0, root)));
        book.reject(0, child).unwrap();
        assert_eq!(book.get(child).unwrap().status, TradeStatus::Closed);
        assert!(book.get(root).unwrap().is_open());
    }

    #[test]
    fn finalizing_root_closes_counters() {
        let mut players = table(&[[2, 0, 0, 0, 0], [0, 2, 0, 0, 0], [0, 2, 0, 0, 0]]);
        let mut book = TradeBook::new();
        let root = book.open(&players, 0, one(Lumber), one(Brick), &[], 0).unwrap();
        let child = book
            .counter(&players, 2, root, ResourceBundle::single(Lumber, 2), one(Brick), 1)
            .unwrap();
        book.accept(&players, 1, root).unwrap();

        assert_eq!(
            book.finalize(&mut players, 1, 1, root),
            Err(TradeError::NotRequester(root))
        );
        assert_eq!(
            book.finalize(&mut players, 0, 2, root),
            Err(TradeError::NotAccepted(2, root))
        );
        let closed = book.finalize(&mut players, 0, 1, root).unwrap();
        assert_eq!(closed, vec![child]);
        assert_eq!(players[0].resources.counts(), [1, 1, 0, 0, 0]);
        assert_eq!(players[1].resources.counts(), [1, 1, 0, 0, 0]);
        assert_eq!(book.get(root).unwrap().status, TradeStatus::Finalized);
        assert_eq!(book.active().count(), 0);
    }

    #[test]
    fn finalizing_counter_closes_parent_and_siblings() {
        let mut players = table(&[[3, 0, 0, 0, 0], [0, 2, 0, 0, 0], [0, 2, 0, 0, 0]]);
        let mut book = TradeBook::new();
        let root = book.open(&players, 0, one(Lumber), one(Brick), &[], 0).unwrap();
        let first = book
            .counter(&players, 1, root, ResourceBundle::single(Lumber, 2), one(Brick), 1)
            .unwrap();
        let second = book
            .counter(&players, 2, root, ResourceBundle::single(Lumber, 3), one(Brick), 2)
            .unwrap();

        let mut closed = book.finalize(&mut players, 0, 1, first).unwrap();
        closed.sort();
        assert_eq!(closed, vec![root, second]);
        assert_eq!(players[1].resources.counts(), [2, 1, 0, 0, 0]);
        assert_eq!(book.get(first).unwrap().status, TradeStatus::Finalized);
    }

    #[test]
    fn finalize_side_effects_on_shortfall() {
        let mut players = table(&[[1, 0, 0, 0, 0], [0, 1, 0, 0, 0]]);
        let mut book = TradeBook::new();
        let id = book.open(&players, 0, one(Lumber), one(Brick), &[], 0).unwrap();
        book.accept(&players, 1, id).unwrap();
        players[1].resources = ResourceBundle::zero();
        assert!(book.finalize(&mut players, 0, 1, id).is_err());
        assert_eq!(
            book.get(id).unwrap().responses[&1].status,
            ResponseStatus::Declined
        );
        assert!(book.get(id).unwrap().is_open());

        players[1].resources = one(Brick);
        book.accept(&players, 1, id).unwrap();
        players[0].resources = ResourceBundle::zero();
        assert!(matches!(
            book.finalize(&mut players, 0, 1, id),
            Err(TradeError::Insufficient { seat: 0, .. })
        ));
        assert_eq!(book.get(id).unwrap().status, TradeStatus::Closed);
    }

    #[test]
    fn cancel_is_creator_only_and_once() {
        let players = table(&[[1, 0, 0, 0, 0], [0, 1, 0, 0, 0]]);
        let mut book = TradeBook::new();
        let id = book.open(&players, 0, one(Lumber), one(Brick), &[], 0).unwrap();
        assert_eq!(book.cancel(1, id), Err(TradeError::NotCreator(id)));
        book.cancel(0, id).unwrap();
        assert_eq!(book.cancel(0, id), Err(TradeError::NotOpen(id)));
        assert_eq!(book.cancel(0, TradeId(9)), Err(TradeError::NotFound(TradeId(9))));
    }

    #[test]
    fn cancel_active_closes_everything_open() {
        let players = table(&[[2, 0, 0, 0, 0], [0, 1, 0, 0, 0]]);
        let mut book = TradeBook::new();
        book.open(&players, 0, one(Lumber), one(Brick), &[], 0).unwrap();
        book.open(&players, 0, one(Lumber), one(Ore), &[], 1).unwrap();
        assert_eq!(book.cancel_active(), 2);
        assert_eq!(book.active().count(), 0);
        assert_eq!(book.trades().count(), 2);
    }

    #[test]
    fn bank_exchange_rules() {
        let players = table(&[[8, 3, 0, 0, 0]]);
        let config = GameConfig::default();
        let player = &players[0];
        let check = |given: ResourceBundle, requested: ResourceBundle| {
            validate_exchange(Exchange::Bank, player, &config, &given, &requested)
        };

        let two_kinds = ResourceBundle::from_pairs(&[(Ore, 1), (Grain, 1)]);
        assert!(check(ResourceBundle::single(Lumber, 8), two_kinds).is_ok());
        assert!(matches!(
            check(ResourceBundle::single(Lumber, 6), one(Ore)),
            Err(TradeError::NotMultipleOfRate { rate: 4, .. })
        ));
        assert_eq!(
            check(ResourceBundle::single(Lumber, 4), one(Lumber)),
            Err(TradeError::ResourceOnBothSides(Lumber))
        );
        assert!(matches!(
            check(ResourceBundle::single(Lumber, 4), ResourceBundle::single(Ore, 2)),
            Err(TradeError::Disproportionate { expected: 1, requested: 2 })
        ));
        assert!(matches!(
            check(ResourceBundle::single(Brick, 4), one(Ore)),
            Err(TradeError::Resource(_))
        ));
    }

    #[test]
    fn port_exchange_ownership() {
        let mut players = table(&[[3, 2, 0, 0, 0]]);
        let config = GameConfig::default();
        let give_lumber = ResourceBundle::single(Lumber, 3);
        assert_eq!(
            validate_exchange(Exchange::GeneralPort, &players[0], &config, &give_lumber, &one(Ore)),
            Err(TradeError::PortNotOwned(PortKind::General))
        );

        players[0].ports.insert(4, PortKind::General);
        players[0].ports.insert(9, PortKind::Resource(Lumber));
        assert_eq!(
            validate_exchange(Exchange::GeneralPort, &players[0], &config, &give_lumber, &one(Ore)),
            Err(TradeError::SpecificPortOwned(Lumber))
        );
        let give_brick = ResourceBundle::single(Brick, 2);
        assert_eq!(
            validate_exchange(Exchange::ResourcePort, &players[0], &config, &give_brick, &one(Ore)),
            Err(TradeError::PortNotOwned(PortKind::Resource(Brick)))
        );
        let give_two_lumber = ResourceBundle::single(Lumber, 2);
        assert!(
            validate_exchange(Exchange::ResourcePort, &players[0], &config, &give_two_lumber, &one(Ore))
                .is_ok()
        );
    }
}
