use crate::board::{Board, EdgeId, TileId, VertexId};
use crate::game::config::GameConfig;
use crate::game::deck::DevelopmentDeck;
use crate::game::players::PlayerState;
use crate::game::resources::{ResourceBundle, ResourceError};
use crate::game::round::{Phase, RoundState};
use crate::game::scoring::{self, PointBreakdown, Titles};
use crate::game::stats::BookKeeping;
use crate::game::trade::{TradeBook, TradeError};
use crate::rng::RandomSource;
use crate::types::{BuildingKind, DevelopmentCardKind, PortKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("game is over")]
    GameOver,
    #[error("unknown player {0}")]
    UnknownPlayer(String),
    #[error("player {player} acted out of turn, {current} is playing")]
    NotYourTurn { player: String, current: String },
    #[error("{command} not allowed during {phase}")]
    WrongPhase {
        command: &'static str,
        phase: &'static str,
    },
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error("{0} limit reached")]
    CapacityExceeded(BuildingKind),
    #[error("unknown vertex {0}")]
    UnknownVertex(VertexId),
    #[error("unknown edge {0}")]
    UnknownEdge(EdgeId),
    #[error("unknown tile {0}")]
    UnknownTile(TileId),
    #[error("vertex {0} already has a building")]
    VertexOccupied(VertexId),
    #[error("vertex {0} is next to another building")]
    DistanceRule(VertexId),
    #[error("edge {0} already has a road")]
    EdgeOccupied(EdgeId),
    #[error("vertex {0} is not reached by the player's roads")]
    VertexNotConnected(VertexId),
    #[error("edge {0} is not connected to the player's network")]
    EdgeNotConnected(EdgeId),
    #[error("no free edge connected to the player's network")]
    NoRoadSpot,
    #[error("setup road {0} must touch the last settlement")]
    DetachedSetupRoad(EdgeId),
    #[error("no own settlement at vertex {0}")]
    NoSettlement(VertexId),
    #[error(transparent)]
    Trade(#[from] TradeError),
    #[error("no playable {0} card")]
    CardNotPlayable(DevelopmentCardKind),
    #[error("development card deck is exhausted")]
    DeckExhausted,
    #[error("already played {0} development card(s) this turn")]
    DevelopmentCardLimit(u32),
    #[error("dice already rolled this turn")]
    AlreadyRolled,
    #[error("dice not rolled yet this turn")]
    NotRolled,
    #[error("robber is already on tile {0}")]
    RobberAlreadyThere(TileId),
    #[error("player {0} cannot rob themselves")]
    SelfRobbery(String),
    #[error("player {0} cannot be robbed")]
    NotRobbable(String),
    #[error("player {0} has nothing to steal")]
    NothingToSteal(String),
    #[error("player {0} owes no discard")]
    NoDiscardOwed(String),
    #[error("player {0} already discarded")]
    AlreadyDiscarded(String),
    #[error("discarding {given} cards, owed {owed}")]
    WrongDiscardAmount { given: u32, owed: u32 },
    #[error("invalid game setup: {0}")]
    InvalidSetup(&'static str),
}

/// The whole game: board, seats, deck, negotiations and the turn machine. Commands
/// are methods that either apply fully or return an error with nothing changed.
#[derive(Debug)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) board: Board,
    pub(crate) players: Vec<PlayerState>,
    pub(crate) deck: DevelopmentDeck,
    pub(crate) trades: TradeBook,
    pub(crate) titles: Titles,
    pub(crate) round: RoundState,
    pub(crate) stats: BookKeeping,
    pub(crate) rng: Box<dyn RandomSource>,
    pub(crate) winner: Option<usize>,
    pub(crate) clock: u64,
}

impl GameState {
    pub(crate) fn seat_of(&self, player: &str) -> Result<usize, GameError> {
        self.players
            .iter()
            .position(|state| state.id() == player)
            .ok_or_else(|| GameError::UnknownPlayer(player.to_string()))
    }

    pub(crate) fn name(&self, seat: usize) -> &str {
        self.players[seat].id()
    }

    /// Phase check alone, for commands any seat may send.
    pub(crate) fn ensure_phase(
        &self,
        command: &'static str,
        allowed: &[Phase],
    ) -> Result<(), GameError> {
        let phase = self.round.phase();
        if phase == Phase::GameOver {
            return Err(GameError::GameOver);
        }
        if !allowed.contains(&phase) {
            return Err(GameError::WrongPhase {
                command,
                phase: phase.label(),
            });
        }
        Ok(())
    }

    /// Turn and phase check for commands only the current seat may send.
    pub(crate) fn ensure_turn(
        &self,
        command: &'static str,
        player: &str,
        allowed: &[Phase],
    ) -> Result<usize, GameError> {
        if self.round.phase() == Phase::GameOver {
            return Err(GameError::GameOver);
        }
        let seat = self.seat_of(player)?;
        let current = self.round.current();
        if seat != current {
            return Err(GameError::NotYourTurn {
                player: player.to_string(),
                current: self.name(current).to_string(),
            });
        }
        self.ensure_phase(command, allowed)?;
        Ok(seat)
    }

    pub(crate) fn ensure_vertex(&self, vertex: VertexId) -> Result<(), GameError> {
        if self.board.topology().has_vertex(vertex) {
            Ok(())
        } else {
            Err(GameError::UnknownVertex(vertex))
        }
    }

    pub(crate) fn ensure_edge(&self, edge: EdgeId) -> Result<(), GameError> {
        if self.board.topology().has_edge(edge) {
            Ok(())
        } else {
            Err(GameError::UnknownEdge(edge))
        }
    }

    pub(crate) fn pay(&mut self, seat: usize, cost: &ResourceBundle) -> Result<(), GameError> {
        self.players[seat].remove_resources(cost)?;
        self.stats.record_used(seat, cost);
        Ok(())
    }

    /// Grants the port at `vertex`, if any, to `seat`.
    pub(crate) fn claim_port(&mut self, seat: usize, vertex: VertexId) {
        if let Some(kind) = self.board.topology().port_at(vertex) {
            self.players[seat].ports.insert(vertex, kind);
        }
    }

    /// Recomputes the cached longest path of each listed seat, then reassigns the
    /// title from every seat's length.
    pub(crate) fn recompute_longest_roads(&mut self, seats: impl IntoIterator<Item = usize>) {
        for seat in seats {
            let path = scoring::longest_road(&self.board, seat, &self.players[seat].roads);
            self.players[seat].longest_road = path;
        }
        let lengths: Vec<usize> = self
            .players
            .iter()
            .map(PlayerState::longest_road_length)
            .collect();
        if self
            .titles
            .recount_longest_road(&lengths, self.config.longest_road_minimum)
        {
            match self.titles.longest_road {
                Some(seat) => log::info!(
                    "{} takes longest road with {}",
                    self.name(seat),
                    lengths[seat]
                ),
                None => log::info!("longest road title revoked"),
            }
        }
    }

    pub(crate) fn recount_most_knights(&mut self) {
        let knights: Vec<u32> = self.players.iter().map(PlayerState::knights_used).collect();
        if self
            .titles
            .recount_most_knights(&knights, self.config.most_knights_minimum)
        {
            if let Some(seat) = self.titles.most_knights {
                log::info!("{} takes most knights with {}", self.name(seat), knights[seat]);
            }
        }
    }

    pub(crate) fn breakdown(&self, seat: usize) -> PointBreakdown {
        scoring::point_breakdown(seat, &self.players[seat], &self.titles, &self.config)
    }

    /// Ends the game once somebody reaches the target. The current seat wins ties.
    pub(crate) fn check_game_over(&mut self) {
        if self.round.phase() == Phase::GameOver {
            return;
        }
        let target = self.config.target_points;
        let current = self.round.current();
        let winner = if self.breakdown(current).total >= target {
            Some(current)
        } else {
            (0..self.players.len()).find(|seat| self.breakdown(*seat).total >= target)
        };
        if let Some(seat) = winner {
            self.winner = Some(seat);
            self.round.finish_game();
            log::info!(
                "game over: {} wins with {} points",
                self.name(seat),
                self.breakdown(seat).total
            );
        }
    }

    pub(crate) fn is_over(&self) -> bool {
        self.round.phase() == Phase::GameOver
    }

    pub(crate) fn ports_held(&self, seat: usize) -> Vec<PortKind> {
        let mut kinds: Vec<PortKind> = self.players[seat].ports.values().copied().collect();
        kinds.sort();
        kinds.dedup();
        kinds
    }
}
