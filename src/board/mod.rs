use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::{PortKind, Resource};

pub mod registry;
mod standard;

pub use registry::{Board, Building, BuildingId, BuildingRegistry};
pub use standard::StandardLayout;

pub type VertexId = u16;
pub type EdgeId = u16;
pub type TileId = u16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    /// `None` for the desert.
    pub resource: Option<Resource>,
    pub token: Option<u8>,
    pub vertices: SmallVec<[VertexId; 6]>,
}

impl Tile {
    pub fn is_desert(&self) -> bool {
        self.resource.is_none()
    }
}

/// Static adjacency of the playing field. Vertices, edges and tiles carry dense ids
/// starting at zero; the graph never changes after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    tiles: Vec<Tile>,
    vertices_by_edge: Vec<[VertexId; 2]>,
    edges_by_vertex: Vec<SmallVec<[EdgeId; 3]>>,
    tiles_by_vertex: Vec<SmallVec<[TileId; 3]>>,
    ports: BTreeMap<VertexId, PortKind>,
}

impl Topology {
    /// The 19-tile board with resources, tokens and ports shuffled by `rng`.
    pub fn standard(rng: &mut dyn crate::rng::RandomSource) -> Self {
        StandardLayout::shuffled(rng).build()
    }

    pub fn num_vertices(&self) -> usize {
        self.edges_by_vertex.len()
    }

    pub fn num_edges(&self) -> usize {
        self.vertices_by_edge.len()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id as usize)
    }

    pub fn has_vertex(&self, vertex: VertexId) -> bool {
        (vertex as usize) < self.edges_by_vertex.len()
    }

    pub fn has_edge(&self, edge: EdgeId) -> bool {
        (edge as usize) < self.vertices_by_edge.len()
    }

    pub fn vertices_of_edge(&self, edge: EdgeId) -> Option<[VertexId; 2]> {
        self.vertices_by_edge.get(edge as usize).copied()
    }

    pub fn edges_of_vertex(&self, vertex: VertexId) -> &[EdgeId] {
        self.edges_by_vertex
            .get(vertex as usize)
            .map(|edges| edges.as_slice())
            .unwrap_or(&[])
    }

    pub fn tiles_of_vertex(&self, vertex: VertexId) -> &[TileId] {
        self.tiles_by_vertex
            .get(vertex as usize)
            .map(|tiles| tiles.as_slice())
            .unwrap_or(&[])
    }

    /// The endpoint of `edge` that is not `vertex`.
    ///
    /// Panics when `edge` does not touch `vertex`: callers only walk edges taken from
    /// `edges_of_vertex`, so a mismatch means the adjacency tables are corrupt.
    pub fn other_end(&self, edge: EdgeId, vertex: VertexId) -> VertexId {
        let [a, b] = self.vertices_by_edge[edge as usize];
        if a == vertex {
            b
        } else if b == vertex {
            a
        } else {
            panic!("edge {edge} does not touch vertex {vertex}")
        }
    }

    /// Vertices one edge away from `vertex`.
    pub fn neighbors(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.edges_of_vertex(vertex)
            .iter()
            .map(move |edge| self.other_end(*edge, vertex))
    }

    pub fn edge_between(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.edges_of_vertex(a)
            .iter()
            .copied()
            .find(|edge| self.other_end(*edge, a) == b)
    }

    pub fn port_at(&self, vertex: VertexId) -> Option<PortKind> {
        self.ports.get(&vertex).copied()
    }

    pub fn ports(&self) -> impl Iterator<Item = (VertexId, PortKind)> + '_ {
        self.ports.iter().map(|(vertex, kind)| (*vertex, *kind))
    }

    /// Edges running along the border of `tile`.
    pub fn edges_of_tile(&self, tile: TileId) -> Vec<EdgeId> {
        let Some(tile) = self.tile(tile) else {
            return Vec::new();
        };
        let corners: BTreeSet<VertexId> = tile.vertices.iter().copied().collect();
        let mut edges: BTreeSet<EdgeId> = BTreeSet::new();
        for vertex in &corners {
            for edge in self.edges_of_vertex(*vertex) {
                if corners.contains(&self.other_end(*edge, *vertex)) {
                    edges.insert(*edge);
                }
            }
        }
        edges.into_iter().collect()
    }

    /// Tiles bordering `edge`: one for coastal edges, two inland.
    pub fn tiles_of_edge(&self, edge: EdgeId) -> Vec<TileId> {
        let Some([a, b]) = self.vertices_of_edge(edge) else {
            return Vec::new();
        };
        let other = self.tiles_of_vertex(b);
        self.tiles_of_vertex(a)
            .iter()
            .copied()
            .filter(|tile| other.contains(tile))
            .collect()
    }

    pub fn coastal_edges(&self) -> Vec<EdgeId> {
        (0..self.num_edges() as EdgeId)
            .filter(|edge| self.tiles_of_edge(*edge).len() == 1)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    #[error("vertex {0} is out of range")]
    UnknownVertex(VertexId),
    #[error("edge joins vertex {0} to itself")]
    SelfLoop(VertexId),
    #[error("edge between {0} and {1} declared twice")]
    DuplicateEdge(VertexId, VertexId),
    #[error("token {0} is not a valid dice sum")]
    InvalidToken(u8),
    #[error("tile has {0} vertices, expected 6")]
    MalformedTile(usize),
    #[error("port at vertex {0} declared twice")]
    DuplicatePort(VertexId),
}

/// Assembles a `Topology` from explicit adjacency, validating ids as it goes.
#[derive(Debug, Clone, Default)]
pub struct TopologyBuilder {
    num_vertices: usize,
    edges: Vec<[VertexId; 2]>,
    tiles: Vec<(Option<Resource>, Option<u8>, Vec<VertexId>)>,
    ports: Vec<(VertexId, PortKind)>,
}

impl TopologyBuilder {
    pub fn new(num_vertices: usize) -> Self {
        Self {
            num_vertices,
            ..Self::default()
        }
    }

    pub fn edge(mut self, a: VertexId, b: VertexId) -> Self {
        self.edges.push([a, b]);
        self
    }

    /// Chains consecutive vertices into edges.
    pub fn path(mut self, vertices: &[VertexId]) -> Self {
        for pair in vertices.windows(2) {
            self.edges.push([pair[0], pair[1]]);
        }
        self
    }

    pub fn tile(mut self, resource: Option<Resource>, token: Option<u8>, vertices: &[VertexId]) -> Self {
        self.tiles.push((resource, token, vertices.to_vec()));
        self
    }

    pub fn port(mut self, vertex: VertexId, kind: PortKind) -> Self {
        self.ports.push((vertex, kind));
        self
    }

    pub fn build(self) -> Result<Topology, TopologyError> {
        let check = |vertex: VertexId| {
            if (vertex as usize) < self.num_vertices {
                Ok(vertex)
            } else {
                Err(TopologyError::UnknownVertex(vertex))
            }
        };

        let mut edges_by_vertex: Vec<SmallVec<[EdgeId; 3]>> = vec![SmallVec::new(); self.num_vertices];
        let mut seen: BTreeSet<(VertexId, VertexId)> = BTreeSet::new();
        for (idx, [a, b]) in self.edges.iter().copied().enumerate() {
            check(a)?;
            check(b)?;
            if a == b {
                return Err(TopologyError::SelfLoop(a));
            }
            if !seen.insert((a.min(b), a.max(b))) {
                return Err(TopologyError::DuplicateEdge(a, b));
            }
            edges_by_vertex[a as usize].push(idx as EdgeId);
            edges_by_vertex[b as usize].push(idx as EdgeId);
        }

        let mut tiles = Vec::with_capacity(self.tiles.len());
        let mut tiles_by_vertex: Vec<SmallVec<[TileId; 3]>> = vec![SmallVec::new(); self.num_vertices];
        for (idx, (resource, token, vertices)) in self.tiles.into_iter().enumerate() {
            if vertices.len() != 6 {
                return Err(TopologyError::MalformedTile(vertices.len()));
            }
            if let Some(token) = token {
                if !(2..=12).contains(&token) || token == 7 {
                    return Err(TopologyError::InvalidToken(token));
                }
            }
            for vertex in &vertices {
                check(*vertex)?;
                tiles_by_vertex[*vertex as usize].push(idx as TileId);
            }
            tiles.push(Tile {
                id: idx as TileId,
                resource,
                token,
                vertices: vertices.into_iter().collect(),
            });
        }

        let mut ports = BTreeMap::new();
        for (vertex, kind) in self.ports {
            check(vertex)?;
            if ports.insert(vertex, kind).is_some() {
                return Err(TopologyError::DuplicatePort(vertex));
            }
        }

        Ok(Topology {
            tiles,
            vertices_by_edge: self.edges,
            edges_by_vertex,
            tiles_by_vertex,
            ports,
        })
    }
}
