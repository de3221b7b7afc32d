use crate::board::EdgeId;
use crate::game::deck::CardId;
use crate::game::resources::{COST_DEVELOPMENT, ResourceBundle};
use crate::game::round::Phase;
use crate::game::state::{GameError, GameState};
use crate::types::{DevelopmentCardKind, Resource};

const KNIGHT_PHASES: &[Phase] = &[Phase::FirstRound, Phase::Regular, Phase::BetweenTurns];
const MONOPOLY_PHASES: &[Phase] = KNIGHT_PHASES;
const BUILDER_PHASES: &[Phase] = &[Phase::FirstRound, Phase::Regular];

impl GameState {
    pub fn buy_development_card(&mut self, player: &str) -> Result<DevelopmentCardKind, GameError> {
        let seat = self.ensure_turn("BuyDevelopmentCard", player, BUILDER_PHASES)?;
        if self.deck.is_empty() {
            return Err(GameError::DeckExhausted);
        }
        self.pay(seat, &COST_DEVELOPMENT)?;
        let card = self.deck.draw().ok_or(GameError::DeckExhausted)?;
        self.players[seat].add_card(card, self.round.round());
        self.stats.record_card(seat, card.kind);
        log::debug!("{player} bought a development card");

        if card.kind == DevelopmentCardKind::VictoryPoint {
            self.check_game_over();
        }
        Ok(card.kind)
    }

    /// Shared gate for playing a card: per-turn limit, then a card of `kind` bought
    /// in an earlier round.
    pub(crate) fn playable(&self, seat: usize, kind: DevelopmentCardKind) -> Result<CardId, GameError> {
        let played = self.round.dev_cards_played();
        if played >= self.config.max_dev_cards_per_round {
            return Err(GameError::DevelopmentCardLimit(played));
        }
        self.players[seat]
            .playable_card(kind, self.round.round())
            .ok_or(GameError::CardNotPlayable(kind))
    }

    fn consume(&mut self, seat: usize, card: CardId) {
        self.players[seat].consume_card(card);
        self.round.record_dev_card_play();
    }

    pub fn use_knight(&mut self, player: &str) -> Result<(), GameError> {
        let seat = self.ensure_turn("UseKnight", player, KNIGHT_PHASES)?;
        let card = self.playable(seat, DevelopmentCardKind::Knight)?;
        self.consume(seat, card);
        log::debug!("{player} played a knight");

        self.recount_most_knights();
        self.check_game_over();
        if !self.is_over() {
            self.round.detour(Phase::MoveRobberDueKnight);
        }
        Ok(())
    }

    pub fn use_monopoly(&mut self, player: &str) -> Result<(), GameError> {
        let seat = self.ensure_turn("UseMonopoly", player, MONOPOLY_PHASES)?;
        let card = self.playable(seat, DevelopmentCardKind::Monopoly)?;
        self.consume(seat, card);
        self.round.detour(Phase::MonopolyPickResource);
        Ok(())
    }

    pub fn pick_monopoly_resource(
        &mut self,
        player: &str,
        resource: Resource,
    ) -> Result<u32, GameError> {
        let seat = self.ensure_turn("PickMonopolyResource", player, &[Phase::MonopolyPickResource])?;
        let mut taken = 0u32;
        for (other, state) in self.players.iter_mut().enumerate() {
            if other != seat {
                taken = taken.saturating_add(state.resources.take_all(resource));
            }
        }
        self.players[seat].resources.add(resource, taken);
        log::debug!("{player} took {taken} {resource} by monopoly");
        self.round.finish_detour();
        Ok(taken)
    }

    pub fn use_road_building(&mut self, player: &str) -> Result<(), GameError> {
        let seat = self.ensure_turn("UseRoadBuilding", player, BUILDER_PHASES)?;
        let card = self.playable(seat, DevelopmentCardKind::RoadBuilding)?;
        self.ensure_road_capacity(seat)?;
        if !self.has_road_spot(seat) {
            return Err(GameError::NoRoadSpot);
        }
        self.consume(seat, card);
        self.round.detour(Phase::BuildRoad1Development);
        Ok(())
    }

    /// Free road from a road-building card. Connectivity applies as for a paid road.
    pub fn pick_road_building_spot(&mut self, player: &str, edge: EdgeId) -> Result<(), GameError> {
        let seat = self.ensure_turn(
            "PickRoadBuildingSpot",
            player,
            &[Phase::BuildRoad1Development, Phase::BuildRoad2Development],
        )?;
        self.ensure_edge(edge)?;
        if self.board.road_owner(edge).is_some() {
            return Err(GameError::EdgeOccupied(edge));
        }
        self.ensure_road_capacity(seat)?;
        if !self.board.reaches_edge(seat, edge) {
            return Err(GameError::EdgeNotConnected(edge));
        }

        let first = self.round.phase() == Phase::BuildRoad1Development;
        self.place_road(seat, edge);
        if self.is_over() {
            return Ok(());
        }
        if first && self.has_road_spot(seat) {
            self.round.set_phase(Phase::BuildRoad2Development);
        } else {
            self.round.finish_detour();
        }
        Ok(())
    }

    pub fn use_year_of_plenty(&mut self, player: &str) -> Result<(), GameError> {
        let seat = self.ensure_turn("UseYearOfPlenty", player, BUILDER_PHASES)?;
        let card = self.playable(seat, DevelopmentCardKind::YearOfPlenty)?;
        self.consume(seat, card);
        self.round.detour(Phase::YearOfPlentyPickResources);
        Ok(())
    }

    pub fn pick_year_of_plenty_resources(
        &mut self,
        player: &str,
        first: Resource,
        second: Resource,
    ) -> Result<(), GameError> {
        let seat = self.ensure_turn(
            "PickYearOfPlentyResources",
            player,
            &[Phase::YearOfPlentyPickResources],
        )?;
        let bundle = ResourceBundle::from_pairs(&[(first, 1), (second, 1)]);
        self.players[seat].add_resources(&bundle);
        self.stats.record_drawn(seat, &bundle);
        log::debug!("{player} took {bundle} by year of plenty");
        self.round.finish_detour();
        Ok(())
    }
}
