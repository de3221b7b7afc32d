pub mod action;
mod building;
pub mod builder;
pub mod config;
pub mod deck;
mod development;
pub mod game;
mod legal;
pub mod players;
mod queries;
pub mod resources;
mod robber;
pub mod round;
pub mod scoring;
pub mod state;
pub mod stats;
pub mod trade;
mod trading;
mod turn;

pub use action::Command;
pub use builder::GameBuilder;
pub use config::{ConfigError, GameConfig};
pub use deck::{CardId, DevelopmentCard, DevelopmentDeck};
pub use game::Game;
pub use players::{Player, PlayerState};
pub use resources::{
    COST_CITY, COST_DEVELOPMENT, COST_ROAD, COST_SETTLEMENT, ResourceBundle, ResourceError,
};
pub use round::{Phase, RoundState};
pub use scoring::{PointBreakdown, Titles};
pub use state::{GameError, GameState};
pub use stats::BookKeeping;
pub use trade::{Exchange, Trade, TradeBook, TradeError, TradeId, TradeStatus};
