use serde::{Deserialize, Serialize};

use crate::board::{EdgeId, TileId, VertexId};
use crate::game::resources::ResourceBundle;
use crate::game::state::{GameError, GameState};
use crate::game::trade::TradeId;
use crate::types::Resource;

/// Every mutating command, in a form that can be logged and replayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    BuildSettlement {
        player: String,
        vertex: VertexId,
    },
    BuildCity {
        player: String,
        vertex: VertexId,
    },
    BuildRoad {
        player: String,
        edge: EdgeId,
    },
    RollDice {
        player: String,
    },
    EndRound {
        player: String,
    },
    DiscardPlayerCards {
        player: String,
        cards: ResourceBundle,
    },
    BuyDevelopmentCard {
        player: String,
    },
    UseKnight {
        player: String,
    },
    UseMonopoly {
        player: String,
    },
    PickMonopolyResource {
        player: String,
        resource: Resource,
    },
    UseRoadBuilding {
        player: String,
    },
    PickRoadBuildingSpot {
        player: String,
        edge: EdgeId,
    },
    UseYearOfPlenty {
        player: String,
    },
    PickYearOfPlentyResources {
        player: String,
        first: Resource,
        second: Resource,
    },
    MoveRobber {
        player: String,
        tile: TileId,
    },
    RobPlayer {
        player: String,
        victim: String,
    },
    MakeTradeOffer {
        player: String,
        offer: ResourceBundle,
        request: ResourceBundle,
        #[serde(default)]
        blocked: Vec<String>,
    },
    MakeCounterTradeOffer {
        player: String,
        parent: TradeId,
        offer: ResourceBundle,
        request: ResourceBundle,
    },
    AcceptTradeOffer {
        player: String,
        trade: TradeId,
    },
    RejectTradeOffer {
        player: String,
        trade: TradeId,
    },
    CancelTradeOffer {
        player: String,
        trade: TradeId,
    },
    FinalizeTrade {
        player: String,
        accepter: String,
        trade: TradeId,
    },
    MakeBankTrade {
        player: String,
        given: ResourceBundle,
        requested: ResourceBundle,
    },
    MakeGeneralPortTrade {
        player: String,
        given: ResourceBundle,
        requested: ResourceBundle,
    },
    MakeResourcePortTrade {
        player: String,
        given: ResourceBundle,
        requested: ResourceBundle,
    },
}

impl Command {
    pub fn player(&self) -> &str {
        match self {
            Command::BuildSettlement { player, .. }
            | Command::BuildCity { player, .. }
            | Command::BuildRoad { player, .. }
            | Command::RollDice { player }
            | Command::EndRound { player }
            | Command::DiscardPlayerCards { player, .. }
            | Command::BuyDevelopmentCard { player }
            | Command::UseKnight { player }
            | Command::UseMonopoly { player }
            | Command::PickMonopolyResource { player, .. }
            | Command::UseRoadBuilding { player }
            | Command::PickRoadBuildingSpot { player, .. }
            | Command::UseYearOfPlenty { player }
            | Command::PickYearOfPlentyResources { player, .. }
            | Command::MoveRobber { player, .. }
            | Command::RobPlayer { player, .. }
            | Command::MakeTradeOffer { player, .. }
            | Command::MakeCounterTradeOffer { player, .. }
            | Command::AcceptTradeOffer { player, .. }
            | Command::RejectTradeOffer { player, .. }
            | Command::CancelTradeOffer { player, .. }
            | Command::FinalizeTrade { player, .. }
            | Command::MakeBankTrade { player, .. }
            | Command::MakeGeneralPortTrade { player, .. }
            | Command::MakeResourcePortTrade { player, .. } => player,
        }
    }
}

impl GameState {
    /// Runs `command` and advances the logical clock when it is accepted.
    pub fn apply(&mut self, command: &Command) -> Result<(), GameError> {
        match command {
            Command::BuildSettlement { player, vertex } => self.build_settlement(player, *vertex),
            Command::BuildCity { player, vertex } => self.build_city(player, *vertex),
            Command::BuildRoad { player, edge } => self.build_road(player, *edge),
            Command::RollDice { player } => self.roll_dice(player).map(|_| ()),
            Command::EndRound { player } => self.end_round(player),
            Command::DiscardPlayerCards { player, cards } => {
                self.discard_player_cards(player, cards)
            }
            Command::BuyDevelopmentCard { player } => self.buy_development_card(player).map(|_| ()),
            Command::UseKnight { player } => self.use_knight(player),
            Command::UseMonopoly { player } => self.use_monopoly(player),
            Command::PickMonopolyResource { player, resource } => {
                self.pick_monopoly_resource(player, *resource).map(|_| ())
            }
            Command::UseRoadBuilding { player } => self.use_road_building(player),
            Command::PickRoadBuildingSpot { player, edge } => {
                self.pick_road_building_spot(player, *edge)
            }
            Command::UseYearOfPlenty { player } => self.use_year_of_plenty(player),
            Command::PickYearOfPlentyResources {
                player,
                first,
                second,
            } => self.pick_year_of_plenty_resources(player, *first, *second),
            Command::MoveRobber { player, tile } => self.move_robber(player, *tile),
            Command::RobPlayer { player, victim } => self.rob_player(player, victim).map(|_| ()),
            Command::MakeTradeOffer {
                player,
                offer,
                request,
                blocked,
            } => self
                .make_trade_offer(player, *offer, *request, blocked)
                .map(|_| ()),
            Command::MakeCounterTradeOffer {
                player,
                parent,
                offer,
                request,
            } => self
                .make_counter_trade_offer(player, *parent, *offer, *request)
                .map(|_| ()),
            Command::AcceptTradeOffer { player, trade } => self.accept_trade_offer(player, *trade),
            Command::RejectTradeOffer { player, trade } => self.reject_trade_offer(player, *trade),
            Command::CancelTradeOffer { player, trade } => self.cancel_trade_offer(player, *trade),
            Command::FinalizeTrade {
                player,
                accepter,
                trade,
            } => self.finalize_trade(player, accepter, *trade),
            Command::MakeBankTrade {
                player,
                given,
                requested,
            } => self.make_bank_trade(player, *given, *requested),
            Command::MakeGeneralPortTrade {
                player,
                given,
                requested,
            } => self.make_general_port_trade(player, *given, *requested),
            Command::MakeResourcePortTrade {
                player,
                given,
                requested,
            } => self.make_resource_port_trade(player, *given, *requested),
        }?;
        self.clock += 1;
        Ok(())
    }
}
