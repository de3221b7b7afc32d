use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::types::BuildingKind;

use super::{EdgeId, TileId, Topology, VertexId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BuildingId(pub u32);

/// A placed piece. Upgrading a settlement keeps its id and owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub owner: usize,
    pub kind: BuildingKind,
}

/// Placement records keyed by vertex and edge id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildingRegistry {
    vertices: BTreeMap<VertexId, Building>,
    roads: BTreeMap<EdgeId, Building>,
    next_id: u32,
}

impl BuildingRegistry {
    pub fn at_vertex(&self, vertex: VertexId) -> Option<&Building> {
        self.vertices.get(&vertex)
    }

    pub fn road(&self, edge: EdgeId) -> Option<&Building> {
        self.roads.get(&edge)
    }

    pub fn settlements(&self) -> impl Iterator<Item = (VertexId, &Building)> + '_ {
        self.of_kind(BuildingKind::Settlement)
    }

    pub fn cities(&self) -> impl Iterator<Item = (VertexId, &Building)> + '_ {
        self.of_kind(BuildingKind::City)
    }

    pub fn roads(&self) -> impl Iterator<Item = (EdgeId, &Building)> + '_ {
        self.roads.iter().map(|(edge, building)| (*edge, building))
    }

    fn of_kind(&self, kind: BuildingKind) -> impl Iterator<Item = (VertexId, &Building)> + '_ {
        self.vertices
            .iter()
            .filter(move |(_, building)| building.kind == kind)
            .map(|(vertex, building)| (*vertex, building))
    }

    pub fn place_settlement(&mut self, vertex: VertexId, owner: usize) -> BuildingId {
        let building = self.allocate(owner, BuildingKind::Settlement);
        self.vertices.insert(vertex, building);
        building.id
    }

    /// Turns the settlement at `vertex` into a city. Returns `None` when there is no
    /// settlement to upgrade.
    pub fn upgrade_to_city(&mut self, vertex: VertexId) -> Option<BuildingId> {
        let building = self.vertices.get_mut(&vertex)?;
        if building.kind != BuildingKind::Settlement {
            return None;
        }
        building.kind = BuildingKind::City;
        Some(building.id)
    }

    pub fn place_road(&mut self, edge: EdgeId, owner: usize) -> BuildingId {
        let building = self.allocate(owner, BuildingKind::Road);
        self.roads.insert(edge, building);
        building.id
    }

    fn allocate(&mut self, owner: usize, kind: BuildingKind) -> Building {
        let id = BuildingId(self.next_id);
        self.next_id += 1;
        Building { id, owner, kind }
    }
}

/// Topology plus everything placed on it, including the robber.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    topology: Topology,
    buildings: BuildingRegistry,
    robber: Option<TileId>,
}

impl Board {
    /// The robber starts on the first desert, if the map has one.
    pub fn new(topology: Topology) -> Self {
        let robber = topology
            .tiles()
            .iter()
            .find(|tile| tile.is_desert())
            .map(|tile| tile.id);
        Self {
            topology,
            buildings: BuildingRegistry::default(),
            robber,
        }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn buildings(&self) -> &BuildingRegistry {
        &self.buildings
    }

    pub(crate) fn buildings_mut(&mut self) -> &mut BuildingRegistry {
        &mut self.buildings
    }

    pub fn robber(&self) -> Option<TileId> {
        self.robber
    }

    pub fn is_blocked(&self, tile: TileId) -> bool {
        self.robber == Some(tile)
    }

    /// Places the robber on `tile`, returning where it was.
    pub(crate) fn move_robber(&mut self, tile: TileId) -> Option<TileId> {
        self.robber.replace(tile)
    }

    pub fn owner_at(&self, vertex: VertexId) -> Option<usize> {
        self.buildings.at_vertex(vertex).map(|b| b.owner)
    }

    pub fn road_owner(&self, edge: EdgeId) -> Option<usize> {
        self.buildings.road(edge).map(|b| b.owner)
    }

    /// No building on `vertex` nor on any vertex one edge away.
    pub fn respects_distance_rule(&self, vertex: VertexId) -> bool {
        self.owner_at(vertex).is_none()
            && self
                .topology
                .neighbors(vertex)
                .all(|neighbor| self.owner_at(neighbor).is_none())
    }

    pub fn has_road_touching(&self, owner: usize, vertex: VertexId) -> bool {
        self.topology
            .edges_of_vertex(vertex)
            .iter()
            .any(|edge| self.road_owner(*edge) == Some(owner))
    }

    /// Whether `owner`'s network reaches either end of `edge`: an own settlement or
    /// city there, or an own road touching an end no opponent has built on.
    pub fn reaches_edge(&self, owner: usize, edge: EdgeId) -> bool {
        let Some(ends) = self.topology.vertices_of_edge(edge) else {
            return false;
        };
        ends.iter().any(|vertex| match self.owner_at(*vertex) {
            Some(other) => other == owner,
            None => self.has_road_touching(owner, *vertex),
        })
    }

    /// Free edges `owner` could extend a road onto.
    pub fn open_edges(&self, owner: usize) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.topology.num_edges() as EdgeId)
            .filter(move |edge| self.road_owner(*edge).is_none() && self.reaches_edge(owner, *edge))
    }

    /// Owners of settlements and cities on the corners of `tile`, in seat order.
    pub fn owners_around(&self, tile: TileId) -> BTreeSet<usize> {
        self.topology
            .tile(tile)
            .map(|tile| {
                tile.vertices
                    .iter()
                    .filter_map(|vertex| self.owner_at(*vertex))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TopologyBuilder;
    use crate::types::Resource;

    fn hex_board() -> Board {
        let topology = TopologyBuilder::new(7)
            .path(&[0, 1, 2, 3, 4, 5, 0])
            .edge(5, 6)
            .tile(None, None, &[0, 1, 2, 3, 4, 5])
            .build()
            .unwrap();
        Board::new(topology)
    }

    #[test]
    fn robber_starts_on_desert() {
        let board = hex_board();
        assert_eq!(board.robber(), Some(0));
        assert!(board.is_blocked(0));

        let topology = TopologyBuilder::new(6)
            .tile(Some(Resource::Ore), Some(6), &[0, 1, 2, 3, 4, 5])
            .build()
            .unwrap();
        assert_eq!(Board::new(topology).robber(), None);
    }

    #[test]
    fn distance_rule_checks_neighbours() {
        let mut board = hex_board();
        board.buildings_mut().place_settlement(0, 1);
        assert!(!board.respects_distance_rule(0));
        assert!(!board.respects_distance_rule(1));
        assert!(!board.respects_distance_rule(5));
        assert!(board.respects_distance_rule(2));
        assert!(board.respects_distance_rule(6));
    }

    #[test]
    fn upgrade_keeps_identity() {
        let mut registry = BuildingRegistry::default();
        let road = registry.place_road(3, 0);
        let id = registry.place_settlement(4, 0);
        assert_ne!(road, id);
        assert_eq!(registry.upgrade_to_city(4), Some(id));
        assert_eq!(registry.upgrade_to_city(4), None);
        let city = registry.at_vertex(4).unwrap();
        assert_eq!((city.id, city.owner, city.kind), (id, 0, BuildingKind::City));
        assert_eq!(registry.settlements().count(), 0);
        assert_eq!(registry.cities().count(), 1);
    }

    #[test]
    fn edge_reach_counts_buildings_and_roads() {
        let mut board = hex_board();
        board.buildings_mut().place_settlement(0, 2);
        board.buildings_mut().place_road(1, 2);
        // edge 0 is 0-1, edge 2 is 2-3, edge 3 is 3-4
        assert!(board.reaches_edge(2, 0));
        assert!(board.reaches_edge(2, 2));
        assert!(!board.reaches_edge(2, 3));
        assert!(!board.reaches_edge(1, 0));
        assert_eq!(board.owners_around(0).into_iter().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn opponent_building_stops_the_network() {
        let mut board = hex_board();
        board.buildings_mut().place_settlement(0, 0);
        board.buildings_mut().place_road(0, 0);
        board.buildings_mut().place_settlement(1, 1);
        // edge 1 is 1-2 and only reaches road 0 through the opponent at 1
        assert!(!board.reaches_edge(0, 1));
        assert_eq!(board.open_edges(0).collect::<Vec<_>>(), vec![5]);
        assert!(board.reaches_edge(1, 1));

        board.buildings_mut().upgrade_to_city(1);
        assert!(!board.reaches_edge(0, 1));
    }
}
