use std::collections::HashSet;

use crate::board::{Board, EdgeId, Topology, VertexId};
use crate::game::config::GameConfig;
use crate::game::deck::{CardId, DevelopmentCard, DevelopmentDeck};
use crate::game::players::{HeldCard, Player, PlayerState};
use crate::game::resources::ResourceBundle;
use crate::game::round::{Phase, RoundState};
use crate::game::scoring::Titles;
use crate::game::state::{GameError, GameState};
use crate::game::stats::BookKeeping;
use crate::game::trade::TradeBook;
use crate::rng::{RandomSource, SeededRandom};
use crate::types::DevelopmentCardKind;

/// Assembles a `GameState`. Without overrides this is a fresh game on a shuffled
/// standard board; fixtures can start from any phase with pieces already placed.
pub struct GameBuilder {
    players: Vec<Player>,
    config: GameConfig,
    topology: Option<Topology>,
    rng: Option<Box<dyn RandomSource>>,
    deck: Option<Vec<DevelopmentCardKind>>,
    phase: Option<Phase>,
    current: usize,
    round: u32,
    dice: Option<(u8, u8)>,
    resources: Vec<(usize, ResourceBundle)>,
    settlements: Vec<(usize, VertexId)>,
    cities: Vec<(usize, VertexId)>,
    roads: Vec<(usize, EdgeId)>,
    cards: Vec<(usize, DevelopmentCardKind, u32)>,
    used_cards: Vec<(usize, DevelopmentCardKind)>,
}

impl GameBuilder {
    pub fn new(players: Vec<Player>) -> Self {
        Self {
            players,
            config: GameConfig::default(),
            topology: None,
            rng: None,
            deck: None,
            phase: None,
            current: 0,
            round: 0,
            dice: None,
            resources: Vec::new(),
            settlements: Vec::new(),
            cities: Vec::new(),
            roads: Vec::new(),
            cards: Vec::new(),
            used_cards: Vec::new(),
        }
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn topology(mut self, topology: Topology) -> Self {
        self.topology = Some(topology);
        self
    }

    pub fn rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Draw pile in exactly this order.
    pub fn deck(mut self, kinds: Vec<DevelopmentCardKind>) -> Self {
        self.deck = Some(kinds);
        self
    }

    pub fn phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn current(mut self, seat: usize) -> Self {
        self.current = seat;
        self
    }

    pub fn round(mut self, round: u32) -> Self {
        self.round = round;
        self
    }

    pub fn dice(mut self, dice: (u8, u8)) -> Self {
        self.dice = Some(dice);
        self
    }

    pub fn resources(mut self, seat: usize, bundle: ResourceBundle) -> Self {
        self.resources.push((seat, bundle));
        self
    }

    pub fn settlement(mut self, seat: usize, vertex: VertexId) -> Self {
        self.settlements.push((seat, vertex));
        self
    }

    pub fn city(mut self, seat: usize, vertex: VertexId) -> Self {
        self.cities.push((seat, vertex));
        self
    }

    pub fn road(mut self, seat: usize, edge: EdgeId) -> Self {
        self.roads.push((seat, edge));
        self
    }

    pub fn roads(mut self, seat: usize, edges: &[EdgeId]) -> Self {
        self.roads.extend(edges.iter().map(|edge| (seat, *edge)));
        self
    }

    /// A card already in `seat`'s hand, bought in `round_bought`.
    pub fn card(mut self, seat: usize, kind: DevelopmentCardKind, round_bought: u32) -> Self {
        self.cards.push((seat, kind, round_bought));
        self
    }

    pub fn used_card(mut self, seat: usize, kind: DevelopmentCardKind) -> Self {
        self.used_cards.push((seat, kind));
        self
    }

    pub fn build(self) -> Result<GameState, GameError> {
        let num_players = self.players.len();
        if !(2..=4).contains(&num_players) {
            return Err(GameError::InvalidSetup("a game seats two to four players"));
        }
        let unique: HashSet<&str> = self.players.iter().map(|p| p.id.as_str()).collect();
        if unique.len() != num_players {
            return Err(GameError::InvalidSetup("player ids must be unique"));
        }
        if self.current >= num_players {
            return Err(GameError::InvalidSetup("current seat out of range"));
        }
        let mut seats = self
            .settlements
            .iter()
            .chain(&self.cities)
            .chain(&self.roads)
            .map(|(seat, _)| *seat)
            .chain(self.resources.iter().map(|(seat, _)| *seat))
            .chain(self.cards.iter().map(|(seat, _, _)| *seat))
            .chain(self.used_cards.iter().map(|(seat, _)| *seat));
        if seats.any(|seat| seat >= num_players) {
            return Err(GameError::InvalidSetup("fixture seat out of range"));
        }
        self.config
            .validate()
            .map_err(|_| GameError::InvalidSetup("invalid config"))?;

        let mut rng: Box<dyn RandomSource> = match self.rng {
            Some(rng) => rng,
            None => Box::new(SeededRandom::new(self.config.seed)),
        };
        let topology = match self.topology {
            Some(topology) => topology,
            None => Topology::standard(rng.as_mut()),
        };
        let deck = match &self.deck {
            Some(kinds) => DevelopmentDeck::from_kinds(kinds),
            None => DevelopmentDeck::standard(rng.as_mut()),
        };

        let mut board = Board::new(topology);
        let mut players: Vec<PlayerState> =
            self.players.into_iter().map(PlayerState::new).collect();

        for (seat, vertex) in self.settlements.iter().chain(self.cities.iter()) {
            if !board.topology().has_vertex(*vertex) {
                return Err(GameError::UnknownVertex(*vertex));
            }
            board.buildings_mut().place_settlement(*vertex, *seat);
            players[*seat].settlements.push(*vertex);
            if let Some(kind) = board.topology().port_at(*vertex) {
                players[*seat].ports.insert(*vertex, kind);
            }
        }
        for (seat, vertex) in &self.cities {
            board.buildings_mut().upgrade_to_city(*vertex);
            players[*seat].promote_settlement(*vertex);
        }
        for (seat, edge) in &self.roads {
            if !board.topology().has_edge(*edge) {
                return Err(GameError::UnknownEdge(*edge));
            }
            board.buildings_mut().place_road(*edge, *seat);
            players[*seat].roads.push(*edge);
        }
        for (seat, bundle) in &self.resources {
            players[*seat].add_resources(bundle);
        }

        // Fixture cards get ids past the deck so they never collide with drawn ones.
        let mut next_card = deck.peek().len() as u16;
        let mut fixture_card = |kind: DevelopmentCardKind| {
            let card = DevelopmentCard {
                id: CardId(next_card),
                kind,
            };
            next_card += 1;
            card
        };
        for (seat, kind, round_bought) in &self.cards {
            players[*seat].add_card(fixture_card(*kind), *round_bought);
        }
        for (seat, kind) in &self.used_cards {
            players[*seat].used_cards.push(HeldCard {
                card: fixture_card(*kind),
                round_bought: 0,
            });
        }
        let mut round = RoundState::new(num_players);
        if let Some(phase) = self.phase {
            round.set_phase(phase);
        }
        round.set_current(self.current);
        round.set_round(self.round);
        if let Some(dice) = self.dice {
            round.record_dice(dice);
        }

        let mut state = GameState {
            config: self.config,
            board,
            players,
            deck,
            trades: TradeBook::new(),
            titles: Titles::default(),
            round,
            stats: BookKeeping::new(num_players),
            rng,
            winner: None,
            clock: 0,
        };
        state.recompute_longest_roads(0..num_players);
        state.recount_most_knights();
        Ok(state)
    }
}

impl GameState {
    /// A fresh game on a standard board, seeded from `config.seed`.
    pub fn new(config: GameConfig, players: Vec<Player>) -> Result<Self, GameError> {
        GameBuilder::new(players).config(config).build()
    }
}
