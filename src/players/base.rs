use crate::game::action::Command;
use crate::game::state::GameState;

/// An agent choosing among the commands legal for its seat.
pub trait BasePlayer {
    fn decide(&mut self, state: &GameState, commands: &[Command]) -> Option<Command>;
}
