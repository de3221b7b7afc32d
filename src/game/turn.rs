use crate::game::resources::ResourceBundle;
use crate::game::round::Phase;
use crate::game::state::{GameError, GameState};
use crate::types::BuildingKind;

impl GameState {
    /// Rolls both dice with the game's random source.
    pub fn roll_dice(&mut self, player: &str) -> Result<(u8, u8), GameError> {
        let seat = self.ensure_turn("RollDice", player, &[Phase::FirstRound, Phase::BetweenTurns])?;
        if self.round.has_rolled() {
            return Err(GameError::AlreadyRolled);
        }
        let dice = (self.rng.roll_die(), self.rng.roll_die());
        self.round.record_dice(dice);
        self.stats.record_roll(seat, dice);
        let sum = dice.0 + dice.1;
        log::debug!("{player} rolled {sum}");

        if sum == 7 {
            let max_cards = self.config.max_cards;
            let mut anyone_owes = false;
            for state in self.players.iter_mut() {
                state.discard_amount = state.discard_obligation(max_cards);
                state.has_discarded = false;
                anyone_owes |= state.discard_amount > 0;
            }
            let next = if anyone_owes {
                Phase::DiscardPhase
            } else {
                Phase::MoveRobberDue7
            };
            self.round.set_phase(next);
            log::info!("seven rolled, phase {next}");
        } else {
            self.produce(sum);
            self.round.set_phase(Phase::Regular);
        }
        Ok(dice)
    }

    /// Pays every building around tiles showing `sum`. Output of the blocked tile
    /// is only counted.
    fn produce(&mut self, sum: u8) {
        let mut payouts: Vec<(usize, ResourceBundle, bool)> = Vec::new();
        for tile in self.board.topology().tiles() {
            let Some(resource) = tile.resource else {
                continue;
            };
            if tile.token != Some(sum) {
                continue;
            }
            let blocked = self.board.is_blocked(tile.id);
            for vertex in &tile.vertices {
                let Some(building) = self.board.buildings().at_vertex(*vertex) else {
                    continue;
                };
                let amount = match building.kind {
                    BuildingKind::City => 2,
                    _ => 1,
                };
                payouts.push((building.owner, ResourceBundle::single(resource, amount), blocked));
            }
        }

        for (seat, bundle, blocked) in payouts {
            if blocked {
                self.stats.record_blocked(seat, &bundle);
            } else {
                self.players[seat].add_resources(&bundle);
                self.stats.record_drawn(seat, &bundle);
            }
        }
    }

    pub fn end_round(&mut self, player: &str) -> Result<(), GameError> {
        self.ensure_turn("EndRound", player, &[Phase::Regular])?;
        if !self.round.has_rolled() {
            return Err(GameError::NotRolled);
        }

        let closed = self.trades.cancel_active();
        if closed > 0 {
            log::debug!("closed {closed} open trade(s) at end of round");
        }
        for state in self.players.iter_mut() {
            state.discard_amount = 0;
            state.has_discarded = false;
        }
        let points = (0..self.players.len())
            .map(|seat| self.breakdown(seat).total)
            .collect();
        let lengths = self
            .players
            .iter()
            .map(|state| state.longest_road_length())
            .collect();
        self.stats.record_round(self.round.round(), points, lengths);

        self.round.end_turn();
        log::info!(
            "round {} begins, {} to play",
            self.round.round(),
            self.name(self.round.current())
        );
        Ok(())
    }

    /// Any seat that owes cards after a seven discards exactly what it owes, once.
    pub fn discard_player_cards(
        &mut self,
        player: &str,
        cards: &ResourceBundle,
    ) -> Result<(), GameError> {
        self.ensure_phase("DiscardPlayerCards", &[Phase::DiscardPhase])?;
        let seat = self.seat_of(player)?;
        let state = &self.players[seat];
        if state.discard_amount == 0 {
            return Err(GameError::NoDiscardOwed(player.to_string()));
        }
        if state.has_discarded {
            return Err(GameError::AlreadyDiscarded(player.to_string()));
        }
        if cards.total() != state.discard_amount {
            return Err(GameError::WrongDiscardAmount {
                given: cards.total(),
                owed: state.discard_amount,
            });
        }

        self.players[seat].remove_resources(cards)?;
        self.players[seat].has_discarded = true;
        self.stats.record_discarded(seat, cards);
        log::debug!("{player} discarded {cards}");

        let pending = self
            .players
            .iter()
            .any(|state| state.discard_amount > 0 && !state.has_discarded);
        if !pending {
            self.round.set_phase(Phase::MoveRobberDue7);
            log::info!("discards complete, phase {}", Phase::MoveRobberDue7);
        }
        Ok(())
    }
}
