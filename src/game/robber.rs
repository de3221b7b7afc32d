use crate::board::TileId;
use crate::game::round::Phase;
use crate::game::state::{GameError, GameState};
use crate::types::Resource;

impl GameState {
    pub fn move_robber(&mut self, player: &str, tile: TileId) -> Result<(), GameError> {
        let seat = self.ensure_turn(
            "MoveRobber",
            player,
            &[Phase::MoveRobberDue7, Phase::MoveRobberDueKnight],
        )?;
        if self.board.topology().tile(tile).is_none() {
            return Err(GameError::UnknownTile(tile));
        }
        if self.board.is_blocked(tile) {
            return Err(GameError::RobberAlreadyThere(tile));
        }
        let previous = self.board.move_robber(tile);
        log::debug!("{player} moved the robber from {previous:?} to {tile}");

        if self.robbable_seats(seat).is_empty() {
            self.round.finish_detour();
        } else {
            self.round.set_phase(Phase::PickRobbed);
        }
        Ok(())
    }

    /// Seats with a building on the blocked tile, other than `seat`.
    pub(crate) fn robbable_seats(&self, seat: usize) -> Vec<usize> {
        self.board
            .robber()
            .map(|tile| self.board.owners_around(tile))
            .unwrap_or_default()
            .into_iter()
            .filter(|owner| *owner != seat)
            .collect()
    }

    /// Steals one unit from `victim`. The robbery is spent even when the victim's
    /// hand turns out to be empty; that case still reports an error.
    pub fn rob_player(&mut self, player: &str, victim: &str) -> Result<Resource, GameError> {
        let seat = self.ensure_turn("RobPlayer", player, &[Phase::PickRobbed])?;
        let target = self.seat_of(victim)?;
        if target == seat {
            return Err(GameError::SelfRobbery(player.to_string()));
        }
        if !self.robbable_seats(seat).contains(&target) {
            return Err(GameError::NotRobbable(victim.to_string()));
        }

        self.round.finish_detour();
        let units = self.players[target].resources.units();
        if units.is_empty() {
            return Err(GameError::NothingToSteal(victim.to_string()));
        }
        let stolen = units[self.rng.pick(units.len())];
        self.players[target].resources.subtract(stolen, 1)?;
        self.players[seat].resources.add(stolen, 1);
        self.stats.record_robbery(seat, target);
        log::debug!("{player} robbed one {stolen} from {victim}");
        Ok(stolen)
    }
}
