use crate::board::{EdgeId, VertexId};
use crate::game::resources::{COST_CITY, COST_ROAD, COST_SETTLEMENT, ResourceBundle};
use crate::game::round::Phase;
use crate::game::state::{GameError, GameState};
use crate::types::BuildingKind;

impl GameState {
    pub fn build_settlement(&mut self, player: &str, vertex: VertexId) -> Result<(), GameError> {
        let seat = self.ensure_turn(
            "BuildSettlement",
            player,
            &[Phase::SetupSettlement1, Phase::SetupSettlement2, Phase::Regular],
        )?;
        self.ensure_vertex(vertex)?;
        if self.board.owner_at(vertex).is_some() {
            return Err(GameError::VertexOccupied(vertex));
        }
        if !self.board.respects_distance_rule(vertex) {
            return Err(GameError::DistanceRule(vertex));
        }

        let setup = self.round.phase().is_setup();
        if !setup {
            if self.players[seat].settlements.len() >= self.config.max_settlements {
                return Err(GameError::CapacityExceeded(BuildingKind::Settlement));
            }
            if !self.board.has_road_touching(seat, vertex) {
                return Err(GameError::VertexNotConnected(vertex));
            }
            self.pay(seat, &COST_SETTLEMENT)?;
        }

        self.board.buildings_mut().place_settlement(vertex, seat);
        self.players[seat].settlements.push(vertex);
        self.claim_port(seat, vertex);
        log::debug!("{player} built a settlement at {vertex}");

        // A new settlement may cut an opponent's road.
        self.recompute_longest_roads(0..self.players.len());
        self.check_game_over();
        if setup && !self.is_over() {
            self.round.advance_setup();
        }
        Ok(())
    }

    pub fn build_city(&mut self, player: &str, vertex: VertexId) -> Result<(), GameError> {
        let seat = self.ensure_turn("BuildCity", player, &[Phase::Regular])?;
        self.ensure_vertex(vertex)?;
        let own_settlement = self
            .board
            .buildings()
            .at_vertex(vertex)
            .is_some_and(|b| b.owner == seat && b.kind == BuildingKind::Settlement);
        if !own_settlement {
            return Err(GameError::NoSettlement(vertex));
        }
        if self.players[seat].cities.len() >= self.config.max_cities {
            return Err(GameError::CapacityExceeded(BuildingKind::City));
        }
        self.pay(seat, &COST_CITY)?;

        self.board.buildings_mut().upgrade_to_city(vertex);
        self.players[seat].promote_settlement(vertex);
        log::debug!("{player} upgraded {vertex} to a city");
        self.check_game_over();
        Ok(())
    }

    /// Setup and paid roads. During a road-building card the free placement applies.
    pub fn build_road(&mut self, player: &str, edge: EdgeId) -> Result<(), GameError> {
        if matches!(
            self.round.phase(),
            Phase::BuildRoad1Development | Phase::BuildRoad2Development
        ) {
            return self.pick_road_building_spot(player, edge);
        }
        let seat = self.ensure_turn(
            "BuildRoad",
            player,
            &[Phase::SetupRoad1, Phase::SetupRoad2, Phase::Regular],
        )?;
        self.ensure_edge(edge)?;
        if self.board.road_owner(edge).is_some() {
            return Err(GameError::EdgeOccupied(edge));
        }

        let setup = self.round.phase().is_setup();
        if setup {
            let touches_last = self.players[seat]
                .last_settlement()
                .zip(self.board.topology().vertices_of_edge(edge))
                .is_some_and(|(vertex, ends)| ends.contains(&vertex));
            if !touches_last {
                return Err(GameError::DetachedSetupRoad(edge));
            }
        } else {
            self.ensure_road_capacity(seat)?;
            if !self.board.reaches_edge(seat, edge) {
                return Err(GameError::EdgeNotConnected(edge));
            }
            self.pay(seat, &COST_ROAD)?;
        }

        self.place_road(seat, edge);
        if setup && !self.is_over() && self.round.advance_setup() {
            self.grant_starting_resources();
        }
        Ok(())
    }

    pub(crate) fn ensure_road_capacity(&self, seat: usize) -> Result<(), GameError> {
        if self.players[seat].roads.len() >= self.config.max_roads {
            Err(GameError::CapacityExceeded(BuildingKind::Road))
        } else {
            Ok(())
        }
    }

    /// Under the road cap with at least one free edge the network reaches.
    pub(crate) fn has_road_spot(&self, seat: usize) -> bool {
        self.ensure_road_capacity(seat).is_ok() && self.board.open_edges(seat).next().is_some()
    }

    pub(crate) fn place_road(&mut self, seat: usize, edge: EdgeId) {
        self.board.buildings_mut().place_road(edge, seat);
        self.players[seat].roads.push(edge);
        log::debug!("{} built a road at {edge}", self.name(seat));
        self.recompute_longest_roads([seat]);
        self.check_game_over();
    }

    /// One unit per producing tile around each seat's second settlement.
    fn grant_starting_resources(&mut self) {
        for seat in 0..self.players.len() {
            let Some(&vertex) = self.players[seat].settlements.get(1) else {
                continue;
            };
            let mut bundle = ResourceBundle::zero();
            for tile in self.board.topology().tiles_of_vertex(vertex) {
                if let Some(resource) = self.board.topology().tile(*tile).and_then(|t| t.resource) {
                    bundle.add(resource, 1);
                }
            }
            self.players[seat].add_resources(&bundle);
            self.stats.record_drawn(seat, &bundle);
            log::debug!("{} starts with {bundle}", self.name(seat));
        }
        log::info!("setup complete, phase {}", self.round.phase());
    }
}
