use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use strum::IntoEnumIterator;

use crate::coords::{
    CornerKey, CubeCoord, Direction, SideKey, corner_key, edge_corners, edge_direction, side_key,
};
use crate::rng::{RandomSource, shuffled};
use crate::types::{EdgeRef, NodeRef, PortKind, Resource};

use super::{Topology, TopologyBuilder, VertexId};

struct MapTemplate {
    numbers: Vec<u8>,
    port_kinds: Vec<PortKind>,
    tile_resources: Vec<Option<Resource>>,
    land: Vec<CubeCoord>,
    /// Water hexes holding a port, with the direction facing land.
    ports: Vec<(CubeCoord, Direction)>,
}

/// Resource, token and port assignment for the 19-tile board. Tokens are dealt in
/// land order, skipping the desert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardLayout {
    pub tile_resources: Vec<Option<Resource>>,
    pub numbers: Vec<u8>,
    pub port_kinds: Vec<PortKind>,
}

impl Default for StandardLayout {
    fn default() -> Self {
        Self {
            tile_resources: BASE_TEMPLATE.tile_resources.clone(),
            numbers: BASE_TEMPLATE.numbers.clone(),
            port_kinds: BASE_TEMPLATE.port_kinds.clone(),
        }
    }
}

impl StandardLayout {
    pub fn shuffled(rng: &mut dyn RandomSource) -> Self {
        let template = &*BASE_TEMPLATE;
        Self {
            tile_resources: shuffled(rng, &template.tile_resources),
            numbers: shuffled(rng, &template.numbers),
            port_kinds: shuffled(rng, &template.port_kinds),
        }
    }

    pub fn build(&self) -> Topology {
        let template = &*BASE_TEMPLATE;
        let mut vertex_ids: HashMap<CornerKey, VertexId> = HashMap::new();
        let mut sides: HashSet<SideKey> = HashSet::new();
        let mut edges: Vec<(VertexId, VertexId)> = Vec::new();
        let mut tiles: Vec<(Option<Resource>, Option<u8>, Vec<VertexId>)> = Vec::new();
        let mut numbers = self.numbers.iter().copied();

        for (idx, coord) in template.land.iter().enumerate() {
            let mut corners: HashMap<NodeRef, VertexId> = HashMap::new();
            let mut vertices = Vec::with_capacity(6);
            for node in NodeRef::iter() {
                let next_id = vertex_ids.len() as VertexId;
                let id = *vertex_ids.entry(corner_key(*coord, node)).or_insert(next_id);
                corners.insert(node, id);
                vertices.push(id);
            }
            for edge in EdgeRef::iter() {
                let key = side_key(*coord, edge_direction(edge));
                if !sides.insert(key) {
                    continue;
                }
                let (a, b) = edge_corners(edge);
                edges.push((corners[&a], corners[&b]));
            }

            let resource = self.tile_resources.get(idx).copied().flatten();
            let token = match resource {
                Some(_) => Some(numbers.next().expect("not enough numbers")),
                None => None,
            };
            tiles.push((resource, token, vertices));
        }

        let mut builder = TopologyBuilder::new(vertex_ids.len());
        for (a, b) in edges {
            builder = builder.edge(a, b);
        }
        for (resource, token, vertices) in &tiles {
            builder = builder.tile(*resource, *token, vertices);
        }
        for ((coord, direction), kind) in template.ports.iter().zip(&self.port_kinds) {
            let (a, b) = edge_corners(direction.edge_ref());
            for node in [a, b] {
                let vertex = vertex_ids
                    .get(&corner_key(*coord, node))
                    .copied()
                    .expect("port must face a land corner");
                builder = builder.port(vertex, *kind);
            }
        }
        builder.build().expect("standard layout is well formed")
    }
}

static BASE_TEMPLATE: Lazy<MapTemplate> = Lazy::new(|| MapTemplate {
    numbers: vec![2, 3, 3, 4, 4, 5, 5, 6, 6, 8, 8, 9, 9, 10, 10, 11, 11, 12],
    port_kinds: vec![
        PortKind::Resource(Resource::Lumber),
        PortKind::Resource(Resource::Brick),
        PortKind::Resource(Resource::Sheep),
        PortKind::Resource(Resource::Grain),
        PortKind::Resource(Resource::Ore),
        PortKind::General,
        PortKind::General,
        PortKind::General,
        PortKind::General,
    ],
    tile_resources: vec![
        None,
        Some(Resource::Lumber),
        Some(Resource::Lumber),
        Some(Resource::Lumber),
        Some(Resource::Lumber),
        Some(Resource::Brick),
        Some(Resource::Brick),
        Some(Resource::Brick),
        Some(Resource::Sheep),
        Some(Resource::Sheep),
        Some(Resource::Sheep),
        Some(Resource::Sheep),
        Some(Resource::Grain),
        Some(Resource::Grain),
        Some(Resource::Grain),
        Some(Resource::Grain),
        Some(Resource::Ore),
        Some(Resource::Ore),
        Some(Resource::Ore),
    ],
    land: vec![
        CubeCoord::new(0, 0, 0),
        CubeCoord::new(1, -1, 0),
        CubeCoord::new(0, -1, 1),
        CubeCoord::new(-1, 0, 1),
        CubeCoord::new(-1, 1, 0),
        CubeCoord::new(0, 1, -1),
        CubeCoord::new(1, 0, -1),
        CubeCoord::new(2, -2, 0),
        CubeCoord::new(1, -2, 1),
        CubeCoord::new(0, -2, 2),
        CubeCoord::new(-1, -1, 2),
        CubeCoord::new(-2, 0, 2),
        CubeCoord::new(-2, 1, 1),
        CubeCoord::new(-2, 2, 0),
        CubeCoord::new(-1, 2, -1),
        CubeCoord::new(0, 2, -2),
        CubeCoord::new(1, 1, -2),
        CubeCoord::new(2, 0, -2),
        CubeCoord::new(2, -1, -1),
    ],
    ports: vec![
        (CubeCoord::new(3, -3, 0), Direction::West),
        (CubeCoord::new(1, -3, 2), Direction::NorthWest),
        (CubeCoord::new(-1, -2, 3), Direction::NorthWest),
        (CubeCoord::new(-3, 0, 3), Direction::NorthEast),
        (CubeCoord::new(-3, 2, 1), Direction::East),
        (CubeCoord::new(-2, 3, -1), Direction::East),
        (CubeCoord::new(0, 3, -3), Direction::SouthEast),
        (CubeCoord::new(2, 1, -3), Direction::SouthWest),
        (CubeCoord::new(3, -1, -2), Direction::SouthWest),
    ],
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRandom;

    #[test]
    fn default_layout_counts() {
        let topology = StandardLayout::default().build();
        assert_eq!(topology.tiles().len(), 19);
        assert_eq!(topology.num_vertices(), 54);
        assert_eq!(topology.num_edges(), 72);
        assert_eq!(topology.ports().count(), 18);
        assert_eq!(topology.coastal_edges().len(), 30);

        let desert = &topology.tiles()[0];
        assert!(desert.is_desert());
        assert_eq!(desert.token, None);
        assert_eq!(topology.tiles()[1].token, Some(2));
        assert_eq!(topology.tiles()[18].token, Some(12));
    }

    #[test]
    fn every_vertex_touches_two_or_three_edges() {
        let topology = StandardLayout::default().build();
        for vertex in 0..topology.num_vertices() as VertexId {
            let degree = topology.edges_of_vertex(vertex).len();
            assert!((2..=3).contains(&degree), "vertex {vertex} has degree {degree}");
            assert!(!topology.tiles_of_vertex(vertex).is_empty());
        }
    }

    #[test]
    fn shuffled_layout_keeps_the_inventory() {
        let mut rng = SeededRandom::new(3);
        let layout = StandardLayout::shuffled(&mut rng);
        let topology = layout.build();
        let deserts = topology.tiles().iter().filter(|t| t.is_desert()).count();
        assert_eq!(deserts, 1);
        let mut tokens: Vec<u8> = topology.tiles().iter().filter_map(|t| t.token).collect();
        tokens.sort_unstable();
        assert_eq!(tokens, BASE_TEMPLATE.numbers);
    }
}
