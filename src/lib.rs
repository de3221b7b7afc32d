#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod board;
pub mod coords;
pub mod game;
pub mod players;
pub mod rng;
pub mod types;

pub use board::{Board, Tile, Topology, TopologyBuilder};
pub use game::{Command, Game, GameBuilder, GameConfig, GameError, GameState, Phase};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use types::{Color, DevelopmentCardKind, PortKind, Resource};
