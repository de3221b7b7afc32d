use itertools::Itertools;

use crate::game::action::Command;
use crate::game::resources::{
    COST_CITY, COST_DEVELOPMENT, COST_ROAD, COST_SETTLEMENT, ResourceBundle,
};
use crate::game::round::Phase;
use crate::game::state::GameState;
use crate::game::trade::{Exchange, validate_exchange};
use crate::types::{DevelopmentCardKind, Resource};

impl GameState {
    /// Seat expected to act next: the first seat still owing a discard during the
    /// discard phase, otherwise the current seat.
    pub fn acting_seat(&self) -> usize {
        if self.round.phase() == Phase::DiscardPhase {
            if let Some(seat) = self
                .players
                .iter()
                .position(|state| state.discard_amount > 0 && !state.has_discarded)
            {
                return seat;
            }
        }
        self.round.current()
    }

    /// Commands the acting seat may send right now. Direct trade offers are left
    /// out since they need the other seats to answer.
    pub fn legal_commands(&self) -> Vec<Command> {
        if self.is_over() {
            return Vec::new();
        }
        let seat = self.acting_seat();
        let player = self.name(seat).to_string();
        let state = &self.players[seat];
        let mut commands = Vec::new();

        match self.round.phase() {
            Phase::SetupSettlement1 | Phase::SetupSettlement2 => {
                for vertex in self.available_vertices(&player).unwrap_or_default() {
                    commands.push(Command::BuildSettlement {
                        player: player.clone(),
                        vertex,
                    });
                }
            }
            Phase::SetupRoad1 | Phase::SetupRoad2 => {
                for edge in self.available_edges(&player).unwrap_or_default() {
                    commands.push(Command::BuildRoad {
                        player: player.clone(),
                        edge,
                    });
                }
            }
            phase @ (Phase::FirstRound | Phase::BetweenTurns) => {
                if !self.round.has_rolled() {
                    commands.push(Command::RollDice {
                        player: player.clone(),
                    });
                }
                self.card_commands(seat, phase, &mut commands);
                if phase == Phase::FirstRound {
                    self.purchase_commands(seat, &mut commands);
                }
            }
            Phase::Regular => {
                if self.round.has_rolled() {
                    commands.push(Command::EndRound {
                        player: player.clone(),
                    });
                }
                self.purchase_commands(seat, &mut commands);
                if state.resources.can_afford(&COST_SETTLEMENT) {
                    for vertex in self.available_vertices(&player).unwrap_or_default() {
                        commands.push(Command::BuildSettlement {
                            player: player.clone(),
                            vertex,
                        });
                    }
                }
                if state.resources.can_afford(&COST_CITY)
                    && state.cities.len() < self.config.max_cities
                {
                    for vertex in &state.settlements {
                        commands.push(Command::BuildCity {
                            player: player.clone(),
                            vertex: *vertex,
                        });
                    }
                }
                if state.resources.can_afford(&COST_ROAD) {
                    for edge in self.available_edges(&player).unwrap_or_default() {
                        commands.push(Command::BuildRoad {
                            player: player.clone(),
                            edge,
                        });
                    }
                }
                self.card_commands(seat, Phase::Regular, &mut commands);
                self.exchange_commands(seat, &mut commands);
            }
            Phase::DiscardPhase => {
                let units = state.resources.units();
                let owed = state.discard_amount as usize;
                let front: Vec<Resource> = units.iter().copied().take(owed).collect();
                let back: Vec<Resource> = units.iter().rev().copied().take(owed).collect();
                for choice in [front, back].into_iter().dedup() {
                    let mut cards = ResourceBundle::zero();
                    for resource in choice {
                        cards.add(resource, 1);
                    }
                    commands.push(Command::DiscardPlayerCards {
                        player: player.clone(),
                        cards,
                    });
                }
            }
            Phase::MoveRobberDue7 | Phase::MoveRobberDueKnight => {
                for tile in self.unblocked_tiles() {
                    commands.push(Command::MoveRobber {
                        player: player.clone(),
                        tile,
                    });
                }
            }
            Phase::PickRobbed => {
                for victim in self.robbable_seats(seat) {
                    commands.push(Command::RobPlayer {
                        player: player.clone(),
                        victim: self.name(victim).to_string(),
                    });
                }
            }
            Phase::BuildRoad1Development | Phase::BuildRoad2Development => {
                for edge in self.available_edges(&player).unwrap_or_default() {
                    commands.push(Command::PickRoadBuildingSpot {
                        player: player.clone(),
                        edge,
                    });
                }
            }
            Phase::MonopolyPickResource => {
                for resource in Resource::ALL {
                    commands.push(Command::PickMonopolyResource {
                        player: player.clone(),
                        resource,
                    });
                }
            }
            Phase::YearOfPlentyPickResources => {
                for (first, second) in Resource::ALL
                    .iter()
                    .copied()
                    .tuple_combinations()
                    .chain(Resource::ALL.iter().map(|r| (*r, *r)))
                {
                    commands.push(Command::PickYearOfPlentyResources {
                        player: player.clone(),
                        first,
                        second,
                    });
                }
            }
            Phase::GameOver => {}
        }
        commands
    }

    fn purchase_commands(&self, seat: usize, commands: &mut Vec<Command>) {
        if !self.deck.is_empty() && self.players[seat].resources.can_afford(&COST_DEVELOPMENT) {
            commands.push(Command::BuyDevelopmentCard {
                player: self.name(seat).to_string(),
            });
        }
    }

    fn card_commands(&self, seat: usize, phase: Phase, commands: &mut Vec<Command>) {
        let player = self.name(seat).to_string();
        let playable = |kind| self.playable(seat, kind).is_ok();
        if playable(DevelopmentCardKind::Knight) {
            commands.push(Command::UseKnight {
                player: player.clone(),
            });
        }
        if playable(DevelopmentCardKind::Monopoly) {
            commands.push(Command::UseMonopoly {
                player: player.clone(),
            });
        }
        if phase == Phase::BetweenTurns {
            return;
        }
        if playable(DevelopmentCardKind::YearOfPlenty) {
            commands.push(Command::UseYearOfPlenty {
                player: player.clone(),
            });
        }
        if playable(DevelopmentCardKind::RoadBuilding) && self.has_road_spot(seat) {
            commands.push(Command::UseRoadBuilding { player });
        }
    }

    /// One-unit bank and port exchanges at the cheapest valid rate per resource.
    fn exchange_commands(&self, seat: usize, commands: &mut Vec<Command>) {
        let state = &self.players[seat];
        let player = self.name(seat);
        for give in Resource::ALL {
            for kind in [Exchange::ResourcePort, Exchange::GeneralPort, Exchange::Bank] {
                let rate = kind.rate(&self.config);
                let given = ResourceBundle::single(give, rate);
                let Some(take) = Resource::ALL.into_iter().find(|r| *r != give) else {
                    continue;
                };
                let requested = ResourceBundle::single(take, 1);
                if validate_exchange(kind, state, &self.config, &given, &requested).is_err() {
                    continue;
                }
                for take in Resource::ALL.into_iter().filter(|r| *r != give) {
                    let requested = ResourceBundle::single(take, 1);
                    commands.push(match kind {
                        Exchange::Bank => Command::MakeBankTrade {
                            player: player.to_string(),
                            given,
                            requested,
                        },
                        Exchange::GeneralPort => Command::MakeGeneralPortTrade {
                            player: player.to_string(),
                            given,
                            requested,
                        },
                        Exchange::ResourcePort => Command::MakeResourcePortTrade {
                            player: player.to_string(),
                            given,
                            requested,
                        },
                    });
                }
                break;
            }
        }
    }
}
