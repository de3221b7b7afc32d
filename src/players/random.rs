use rand::seq::SliceRandom;
use rand::{SeedableRng, rngs::StdRng};

use crate::game::action::Command;
use crate::game::state::GameState;
use crate::players::BasePlayer;

/// Picks uniformly among legal commands. Seeded so simulations can be rerun.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl BasePlayer for RandomPlayer {
    fn decide(&mut self, _state: &GameState, commands: &[Command]) -> Option<Command> {
        commands.choose(&mut self.rng).cloned()
    }
}
