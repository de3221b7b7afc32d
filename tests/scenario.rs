use settlers_engine::board::{TileId, VertexId};
use settlers_engine::game::{
    GameBuilder, GameError, GameState, Phase, Player, ResourceBundle, TradeStatus,
};
use settlers_engine::rng::ScriptedRandom;
use settlers_engine::types::{Color, DevelopmentCardKind, Resource};

use Resource::*;

fn bundle(pairs: &[(Resource, u32)]) -> ResourceBundle {
    ResourceBundle::from_pairs(pairs)
}

fn seating() -> Vec<Player> {
    ["a", "b", "c", "d"]
        .into_iter()
        .zip(Color::ORDERED)
        .map(|(id, color)| Player::new(id, color))
        .collect()
}

/// A free corner of `tile` that touches no other tile, so it only ever produces
/// from `tile`.
fn lonely_corner(state: &GameState, player: &str, tile: TileId) -> VertexId {
    let topology = state.board().topology();
    let open = state.available_vertices(player).unwrap();
    topology
        .tile(tile)
        .unwrap()
        .vertices
        .iter()
        .copied()
        .find(|vertex| topology.tiles_of_vertex(*vertex).len() == 1 && open.contains(vertex))
        .expect("free single-tile corner")
}

fn settle(state: &mut GameState, player: &str, tile: TileId) -> VertexId {
    assert_eq!(state.current_player(), player);
    let vertex = lonely_corner(state, player, tile);
    state.build_settlement(player, vertex).unwrap();
    let edge = state.available_edges(player).unwrap()[0];
    state.build_road(player, edge).unwrap();
    vertex
}

#[test]
fn four_player_game() {
    // Default layout: tile 7 brick(5), 8 sheep(6), 10 sheep(8), 12 and 13 grain(9),
    // 15 grain(10), 17 ore(11), 18 ore(12). Tiles 2 and 3 roll on 3, 4 and 5 on 4.
    let rng = ScriptedRandom::new().with_rolls([(1, 2), (2, 2), (6, 1), (6, 6), (3, 3)]);
    let mut state = GameBuilder::new(seating())
        .rng(rng)
        .deck(vec![DevelopmentCardKind::Knight, DevelopmentCardKind::Monopoly])
        .resources(0, bundle(&[(Sheep, 1), (Grain, 2), (Ore, 4)]))
        .resources(1, bundle(&[(Lumber, 3), (Sheep, 2)]))
        .resources(2, bundle(&[(Sheep, 1)]))
        .resources(3, bundle(&[(Lumber, 4), (Brick, 4)]))
        .build()
        .unwrap();
    assert_eq!(state.blocked_tiles(), vec![0]);

    // Setup snakes a b c d, then d c b a.
    let a_first = settle(&mut state, "a", 17);
    settle(&mut state, "b", 8);
    settle(&mut state, "c", 10);
    settle(&mut state, "d", 12);
    settle(&mut state, "d", 18);
    settle(&mut state, "c", 7);
    settle(&mut state, "b", 13);
    assert_eq!(state.phase(), Phase::SetupSettlement2);
    settle(&mut state, "a", 15);

    assert_eq!(state.phase(), Phase::FirstRound);
    assert_eq!(state.current_player(), "a");
    assert_eq!(state.resource_hand("a").unwrap(), bundle(&[(Sheep, 1), (Grain, 3), (Ore, 4)]));
    assert_eq!(state.resource_hand("b").unwrap(), bundle(&[(Lumber, 3), (Sheep, 2), (Grain, 1)]));
    assert_eq!(state.resource_hand("c").unwrap(), bundle(&[(Brick, 1), (Sheep, 1)]));
    assert_eq!(state.resource_hand("d").unwrap(), bundle(&[(Lumber, 4), (Brick, 4), (Ore, 1)]));
    for player in ["a", "b", "c", "d"] {
        assert_eq!(state.points(player).unwrap(), 2);
        assert_eq!(state.roads(player).unwrap().len(), 2);
    }

    // Round 0: a buys a knight and upgrades the first settlement.
    assert_eq!(state.roll_dice("a").unwrap(), (1, 2));
    assert_eq!(state.phase(), Phase::Regular);
    assert_eq!(
        state.buy_development_card("a").unwrap(),
        DevelopmentCardKind::Knight
    );
    assert_eq!(
        state.use_knight("a"),
        Err(GameError::CardNotPlayable(DevelopmentCardKind::Knight))
    );
    state.build_city("a", a_first).unwrap();
    assert!(state.resource_hand("a").unwrap().is_empty());
    assert_eq!(state.points("a").unwrap(), 3);
    state.end_round("a").unwrap();

    // Round 1: b asks for brick; c accepts, d counters with a better price.
    assert_eq!(state.phase(), Phase::BetweenTurns);
    state.roll_dice("b").unwrap();
    let root = state
        .make_trade_offer("b", bundle(&[(Lumber, 1)]), bundle(&[(Brick, 1)]), &[])
        .unwrap();
    state.accept_trade_offer("c", root).unwrap();
    let counter = state
        .make_counter_trade_offer("d", root, bundle(&[(Lumber, 2)]), bundle(&[(Brick, 1)]))
        .unwrap();
    assert_eq!(state.active_trades().len(), 2);
    state.finalize_trade("b", "d", counter).unwrap();
    assert!(state.active_trades().is_empty());
    let statuses: Vec<TradeStatus> = state.trades().iter().map(|trade| trade.status).collect();
    assert_eq!(statuses, vec![TradeStatus::Closed, TradeStatus::Finalized]);
    assert_eq!(
        state.resource_hand("b").unwrap(),
        bundle(&[(Lumber, 1), (Brick, 1), (Sheep, 2), (Grain, 1)])
    );
    assert_eq!(state.resource_hand("d").unwrap().total(), 10);
    state.end_round("b").unwrap();

    // Round 2: c rolls a seven, d is over the limit.
    assert_eq!(state.roll_dice("c").unwrap(), (6, 1));
    assert_eq!(state.phase(), Phase::DiscardPhase);
    assert_eq!(state.discard_amounts(), vec![("d", 5)]);
    assert_eq!(
        state.move_robber("c", 18),
        Err(GameError::WrongPhase {
            command: "MoveRobber",
            phase: "DiscardPhase",
        })
    );
    state
        .discard_player_cards("d", &bundle(&[(Lumber, 5)]))
        .unwrap();
    assert_eq!(state.phase(), Phase::MoveRobberDue7);
    state.move_robber("c", 18).unwrap();
    assert_eq!(state.robbable_players("c").unwrap(), vec!["d"]);
    assert_eq!(state.rob_player("c", "d").unwrap(), Lumber);
    assert_eq!(state.phase(), Phase::Regular);
    state.end_round("c").unwrap();

    // Round 3: d's ore tile is blocked.
    assert_eq!(state.roll_dice("d").unwrap(), (6, 6));
    assert_eq!(state.resource_hand("d").unwrap(), bundle(&[(Brick, 3), (Ore, 1)]));
    state.end_round("d").unwrap();

    // Round 4: a plays the knight before rolling and robs b.
    assert_eq!(state.phase(), Phase::BetweenTurns);
    state.use_knight("a").unwrap();
    assert_eq!(state.phase(), Phase::MoveRobberDueKnight);
    state.move_robber("a", 8).unwrap();
    assert_eq!(state.rob_player("a", "b").unwrap(), Lumber);
    assert_eq!(state.phase(), Phase::BetweenTurns);
    assert_eq!(state.roll_dice("a").unwrap(), (3, 3));
    state.end_round("a").unwrap();

    assert_eq!(state.round_number(), 5);
    assert_eq!(state.current_player(), "b");
    assert_eq!(state.blocked_tiles(), vec![8]);
    assert_eq!(state.development_cards_left(), 1);
    assert_eq!(state.knight_uses()[0], ("a", 1));
    assert_eq!(state.most_knights_holder(), None);

    assert_eq!(state.resource_hand("a").unwrap(), bundle(&[(Lumber, 1)]));
    assert_eq!(
        state.resource_hand("b").unwrap(),
        bundle(&[(Brick, 1), (Sheep, 2), (Grain, 1)])
    );
    assert_eq!(
        state.resource_hand("c").unwrap(),
        bundle(&[(Lumber, 1), (Brick, 1), (Sheep, 1)])
    );
    assert_eq!(state.resource_hand("d").unwrap(), bundle(&[(Brick, 3), (Ore, 1)]));
    let points: Vec<u32> = ["a", "b", "c", "d"]
        .iter()
        .map(|player| state.points(player).unwrap())
        .collect();
    assert_eq!(points, vec![3, 2, 2, 2]);

    let stats = state.statistics();
    assert_eq!(stats.dice.total(), 5);
    assert_eq!(stats.dice.count(7), 1);
    let d = stats.player(3).unwrap();
    assert_eq!(d.resources_discarded.get(&Lumber), Some(&5));
    assert_eq!(d.resources_blocked.get(&Ore), Some(&1));
    assert_eq!(d.times_robbed, 1);
    assert_eq!(stats.player(2).unwrap().robberies, 1);
    assert_eq!(stats.player(1).unwrap().trades_finalized, 1);
    assert_eq!(stats.rounds.len(), 5);
}
