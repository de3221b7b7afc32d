use std::collections::BTreeSet;

use settlers_engine::board::{Board, EdgeId, StandardLayout, Topology, VertexId};
use settlers_engine::game::scoring::longest_road;
use settlers_engine::game::{COST_SETTLEMENT, GameBuilder, Phase, Player};
use settlers_engine::rng::ScriptedRandom;
use settlers_engine::types::Color;

fn board() -> Board {
    Board::new(StandardLayout::default().build())
}

fn length(board: &Board, roads: &[EdgeId]) -> usize {
    longest_road(board, 0, roads).len()
}

fn players() -> Vec<Player> {
    vec![Player::new("a", Color::Red), Player::new("b", Color::Blue)]
}

/// Roads joining consecutive `vertices`.
fn walk(topology: &Topology, vertices: &[VertexId]) -> Vec<EdgeId> {
    vertices
        .windows(2)
        .map(|pair| topology.edge_between(pair[0], pair[1]).unwrap())
        .collect()
}

/// The edge leaving `vertex` away from the corners of `tile`.
fn spoke(topology: &Topology, tile: usize, vertex: VertexId) -> EdgeId {
    let corners = &topology.tiles()[tile].vertices;
    topology
        .edges_of_vertex(vertex)
        .iter()
        .copied()
        .find(|edge| !corners.contains(&topology.other_end(*edge, vertex)))
        .unwrap()
}

/// Two roads running outward from a corner of `tile`.
fn tail(topology: &Topology, tile: usize, vertex: VertexId) -> [EdgeId; 2] {
    let first = spoke(topology, tile, vertex);
    let outer = topology.other_end(first, vertex);
    let second = topology
        .edges_of_vertex(outer)
        .iter()
        .copied()
        .find(|edge| *edge != first)
        .unwrap();
    [first, second]
}

fn union(tiles: &[usize], topology: &Topology) -> Vec<EdgeId> {
    let edges: BTreeSet<EdgeId> = tiles
        .iter()
        .flat_map(|tile| topology.edges_of_tile(*tile as u16))
        .collect();
    edges.into_iter().collect()
}

fn shares_a_corner(topology: &Topology, a: usize, b: usize) -> bool {
    let tiles = topology.tiles();
    tiles[a].vertices.iter().any(|vertex| tiles[b].vertices.contains(vertex))
}

/// Extends `path` into a simple path of `len` edges that never enters `avoid`.
fn simple_path(
    topology: &Topology,
    from: VertexId,
    len: usize,
    avoid: &BTreeSet<VertexId>,
    seen: &mut BTreeSet<VertexId>,
    path: &mut Vec<EdgeId>,
) -> bool {
    if path.len() == len {
        return true;
    }
    for edge in topology.edges_of_vertex(from).to_vec() {
        let next = topology.other_end(edge, from);
        if avoid.contains(&next) || !seen.insert(next) {
            continue;
        }
        path.push(edge);
        if simple_path(topology, next, len, avoid, seen, path) {
            return true;
        }
        path.pop();
        seen.remove(&next);
    }
    false
}

#[test]
fn five_edge_line() {
    let board = board();
    let mut line = board.topology().edges_of_tile(0);
    line.remove(0);
    assert_eq!(line.len(), 5);
    assert_eq!(length(&board, &line), 5);
}

#[test]
fn line_with_a_branch() {
    let board = board();
    let topology = board.topology();
    let corners = topology.tiles()[0].vertices.to_vec();
    let mut roads = walk(topology, &corners);
    assert_eq!(roads.len(), 5);
    roads.push(spoke(topology, 0, corners[2]));
    assert_eq!(length(&board, &roads), 5);
}

#[test]
fn outer_ring() {
    let board = board();
    let ring = board.topology().coastal_edges();
    assert_eq!(ring.len(), 30);
    let path = longest_road(&board, 0, &ring);
    assert_eq!(path.len(), 30);
    let distinct: BTreeSet<EdgeId> = path.iter().copied().collect();
    assert_eq!(distinct.len(), 30);
}

#[test]
fn outer_ring_with_inward_spoke() {
    let board = board();
    let topology = board.topology();
    let mut roads = topology.coastal_edges();
    let spoke = roads
        .iter()
        .flat_map(|edge| topology.vertices_of_edge(*edge).unwrap())
        .flat_map(|vertex| topology.edges_of_vertex(vertex).to_vec())
        .find(|edge| !roads.contains(edge))
        .unwrap();
    roads.push(spoke);
    assert_eq!(length(&board, &roads), 31);
}

#[test]
fn single_and_double_tile_loops() {
    let board = board();
    let topology = board.topology();
    let centre = topology.edges_of_tile(0);
    assert_eq!(length(&board, &centre), 6);

    let mut both: BTreeSet<EdgeId> = centre.iter().copied().collect();
    both.extend(topology.edges_of_tile(1));
    let both: Vec<EdgeId> = both.into_iter().collect();
    assert_eq!(both.len(), 11);
    assert_eq!(length(&board, &both), 11);
}

#[test]
fn hangman() {
    let board = board();
    let topology = board.topology();
    let corners = topology.tiles()[0].vertices.to_vec();
    let mut roads = topology.edges_of_tile(0);
    roads.extend(tail(topology, 0, corners[0]));
    roads.extend(tail(topology, 0, corners[3]));
    let distinct: BTreeSet<EdgeId> = roads.iter().copied().collect();
    assert_eq!(distinct.len(), 10);
    assert_eq!(length(&board, &roads), 8);
}

#[test]
fn tile_loops_joined_by_one_edge() {
    let board = board();
    let topology = board.topology();
    // tile 16 sits two steps north of the centre, across the side tiles 5 and 6 share
    assert!(!shares_a_corner(topology, 0, 16));
    let far = &topology.tiles()[16].vertices;
    let connectors: Vec<EdgeId> = topology.tiles()[0]
        .vertices
        .iter()
        .flat_map(|vertex| {
            topology
                .edges_of_vertex(*vertex)
                .iter()
                .copied()
                .filter(move |edge| far.contains(&topology.other_end(*edge, *vertex)))
        })
        .collect();
    assert_eq!(connectors.len(), 1);

    let mut roads = union(&[0, 16], topology);
    roads.extend(connectors);
    assert_eq!(roads.len(), 13);
    assert_eq!(length(&board, &roads), 13);
}

#[test]
fn chain_of_three_tile_loops() {
    let board = board();
    let topology = board.topology();
    // centre, its east neighbour, and the tile east of that
    assert!(shares_a_corner(topology, 0, 1));
    assert!(shares_a_corner(topology, 1, 7));
    assert!(!shares_a_corner(topology, 0, 7));
    let roads = union(&[0, 1, 7], topology);
    assert_eq!(roads.len(), 16);
    assert_eq!(length(&board, &roads), 15);
}

#[test]
fn opponent_settlement_interrupts_a_line() {
    let topology = StandardLayout::default().build();
    let corners = topology.tiles()[0].vertices.to_vec();
    let fixture = |roads: &[EdgeId], blocker: Option<VertexId>| {
        let mut builder = GameBuilder::new(players())
            .rng(ScriptedRandom::new())
            .topology(topology.clone())
            .phase(Phase::Regular)
            .roads(0, roads);
        if let Some(vertex) = blocker {
            builder = builder.settlement(1, vertex);
        }
        builder.build().unwrap()
    };

    let short = walk(&topology, &corners[..5]);
    assert_eq!(short.len(), 4);
    let state = fixture(&short, None);
    assert_eq!(state.longest_road_lengths()[0], ("a", 4));
    let state = fixture(&short, Some(corners[2]));
    assert_eq!(state.longest_road_lengths()[0], ("a", 2));

    let long = walk(&topology, &corners);
    let state = fixture(&long, None);
    assert_eq!(state.longest_road_lengths()[0], ("a", 5));
    assert_eq!(state.longest_road_holder(), Some("a"));
    let state = fixture(&long, Some(corners[2]));
    assert_eq!(state.longest_road_lengths()[0], ("a", 3));
    assert_eq!(state.longest_road_holder(), None);
}

#[test]
fn settlement_split_transfers_the_title() {
    let topology = StandardLayout::default().build();
    let ring = topology.edges_of_tile(0);
    let ring_vertices: BTreeSet<VertexId> = topology.tiles()[0].vertices.iter().copied().collect();
    let junction = topology.tiles()[0].vertices[0];

    let mut seen = BTreeSet::from([junction]);
    let mut branch = Vec::new();
    assert!(simple_path(
        &topology,
        junction,
        6,
        &ring_vertices,
        &mut seen,
        &mut branch
    ));

    let mut state = GameBuilder::new(players())
        .rng(ScriptedRandom::new())
        .phase(Phase::Regular)
        .current(1)
        .dice((2, 3))
        .roads(0, &ring)
        .roads(1, &branch)
        .resources(1, COST_SETTLEMENT)
        .build()
        .unwrap();
    assert_eq!(state.longest_road_lengths(), vec![("a", 6), ("b", 6)]);
    assert_eq!(state.longest_road_holder(), Some("a"));
    assert_eq!(state.points("a").unwrap(), 2);

    state.build_settlement("b", junction).unwrap();
    assert_eq!(state.longest_road_lengths(), vec![("a", 5), ("b", 6)]);
    assert_eq!(state.longest_road_holder(), Some("b"));
    assert_eq!(state.points("a").unwrap(), 0);
    assert_eq!(state.points("b").unwrap(), 3);
    assert_eq!(state.point_distribution("b").unwrap().longest_road, 2);
}
