use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::board::{Board, EdgeId, VertexId};
use crate::game::config::GameConfig;
use crate::game::players::PlayerState;

/// Longest trail through `roads`, as an edge list. A trail may not pass through a
/// vertex holding another seat's settlement or city.
pub fn longest_road(board: &Board, owner: usize, roads: &[EdgeId]) -> Vec<EdgeId> {
    let topology = board.topology();
    let mut graph: BTreeMap<VertexId, Vec<EdgeId>> = BTreeMap::new();
    for edge in roads {
        let Some([a, b]) = topology.vertices_of_edge(*edge) else {
            continue;
        };
        graph.entry(a).or_default().push(*edge);
        graph.entry(b).or_default().push(*edge);
    }

    struct Frame {
        vertex: VertexId,
        next: usize,
    }

    let mut best: Vec<EdgeId> = Vec::new();
    for start in graph.keys().copied() {
        let mut visited: BTreeSet<EdgeId> = BTreeSet::new();
        let mut path: Vec<EdgeId> = Vec::new();
        let mut stack = vec![Frame {
            vertex: start,
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let vertex = frame.vertex;
            let edges = &graph[&vertex];
            if frame.next == edges.len() {
                stack.pop();
                if let Some(edge) = path.pop() {
                    visited.remove(&edge);
                }
                continue;
            }
            let edge = edges[frame.next];
            frame.next += 1;
            if visited.contains(&edge) {
                continue;
            }
            let far = topology.other_end(edge, vertex);
            if board.owner_at(far).is_some_and(|other| other != owner) {
                continue;
            }
            visited.insert(edge);
            path.push(edge);
            if path.len() > best.len() {
                best = path.clone();
            }
            stack.push(Frame {
                vertex: far,
                next: 0,
            });
        }
    }
    best
}

/// Current holders of the two bonus titles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Titles {
    pub longest_road: Option<usize>,
    pub most_knights: Option<usize>,
    pub most_knights_count: u32,
}

impl Titles {
    /// Awards the longest-road title from per-seat lengths. The incumbent keeps it on a
    /// tie, and it is revoked when the best length falls under `minimum`. Returns
    /// whether the holder changed.
    pub fn recount_longest_road(&mut self, lengths: &[usize], minimum: usize) -> bool {
        let mut best: Option<(usize, usize)> = None;
        for (seat, length) in lengths.iter().copied().enumerate() {
            let best_length = best.map_or(0, |(_, len)| len);
            if length > best_length || (length == best_length && self.longest_road == Some(seat)) {
                best = Some((seat, length));
            }
        }

        let holder = match best {
            Some((seat, length)) if length >= minimum => Some(seat),
            _ => None,
        };
        let changed = holder != self.longest_road;
        self.longest_road = holder;
        changed
    }

    /// Moves the most-knights title to a seat that strictly beats the holder's count
    /// and meets `minimum`. Returns whether the holder changed.
    pub fn recount_most_knights(&mut self, knights: &[u32], minimum: u32) -> bool {
        let mut changed = false;
        for (seat, used) in knights.iter().copied().enumerate() {
            if used > self.most_knights_count && used >= minimum {
                changed |= self.most_knights != Some(seat);
                self.most_knights = Some(seat);
                self.most_knights_count = used;
            }
        }
        changed
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointBreakdown {
    pub total: u32,
    pub settlements: u32,
    pub cities: u32,
    pub victory_points: u32,
    pub most_knights: u32,
    pub longest_road: u32,
}

impl PointBreakdown {
    /// Points visible to opponents: hidden victory-point cards excluded.
    pub fn public(&self) -> u32 {
        self.total - self.victory_points
    }
}

pub fn point_breakdown(
    seat: usize,
    player: &PlayerState,
    titles: &Titles,
    config: &GameConfig,
) -> PointBreakdown {
    let settlements = player.settlements.len() as u32 * config.points_per_settlement;
    let cities = player.cities.len() as u32 * config.points_per_city;
    let victory_points = player.victory_point_cards();
    let most_knights = if titles.most_knights == Some(seat) {
        config.points_for_most_knights
    } else {
        0
    };
    let longest_road = if titles.longest_road == Some(seat) {
        config.points_for_longest_road
    } else {
        0
    };
    PointBreakdown {
        total: settlements + cities + victory_points + most_knights + longest_road,
        settlements,
        cities,
        victory_points,
        most_knights,
        longest_road,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{StandardLayout, TopologyBuilder};
    use crate::game::players::Player;
    use crate::types::Color;

    fn line_board(len: u16) -> Board {
        let vertices: Vec<u16> = (0..=len).collect();
        let topology = TopologyBuilder::new(vertices.len())
            .path(&vertices)
            .build()
            .unwrap();
        Board::new(topology)
    }

    #[test]
    fn straight_line() {
        let board = line_board(5);
        assert_eq!(longest_road(&board, 0, &[0, 1, 2, 3, 4]).len(), 5);
        assert_eq!(longest_road(&board, 0, &[0, 1, 3, 4]).len(), 2);
        assert!(longest_road(&board, 0, &[]).is_empty());
    }

    #[test]
    fn opponent_building_cuts_the_line() {
        let mut board = line_board(4);
        board.buildings_mut().place_settlement(2, 1);
        assert_eq!(longest_road(&board, 0, &[0, 1, 2, 3]).len(), 2);
        board.buildings_mut().place_settlement(4, 0);
        assert_eq!(longest_road(&board, 0, &[0, 1, 2, 3]).len(), 2);
    }

    #[test]
    fn own_building_does_not_cut() {
        let mut board = line_board(4);
        board.buildings_mut().place_settlement(2, 0);
        assert_eq!(longest_road(&board, 0, &[0, 1, 2, 3]).len(), 4);
    }

    #[test]
    fn single_tile_loop() {
        let board = Board::new(StandardLayout::default().build());
        let ring = board.topology().edges_of_tile(0);
        let path = longest_road(&board, 0, &ring);
        assert_eq!(path.len(), 6);
        let unique: BTreeSet<_> = path.iter().collect();
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn longest_road_title_keeps_incumbent_on_tie() {
        let mut titles = Titles::default();
        assert!(titles.recount_longest_road(&[5, 3, 0, 0], 5));
        assert_eq!(titles.longest_road, Some(0));
        assert!(!titles.recount_longest_road(&[5, 5, 0, 0], 5));
        assert_eq!(titles.longest_road, Some(0));
        assert!(titles.recount_longest_road(&[5, 6, 0, 0], 5));
        assert_eq!(titles.longest_road, Some(1));
        assert!(titles.recount_longest_road(&[4, 4, 0, 0], 5));
        assert_eq!(titles.longest_road, None);
        assert!(!titles.recount_longest_road(&[1, 2, 3, 4], 5));
    }

    #[test]
    fn most_knights_needs_strict_lead() {
        let mut titles = Titles::default();
        assert!(!titles.recount_most_knights(&[2, 0], 3));
        assert!(titles.recount_most_knights(&[3, 0], 3));
        assert!(!titles.recount_most_knights(&[3, 3], 3));
        assert_eq!(titles.most_knights, Some(0));
        assert!(titles.recount_most_knights(&[3, 4], 3));
        assert_eq!((titles.most_knights, titles.most_knights_count), (Some(1), 4));
    }

    #[test]
    fn breakdown_adds_bonuses() {
        let mut player = PlayerState::new(Player::new("1", Color::Red));
        player.settlements = vec![1, 2];
        player.cities = vec![3];
        let titles = Titles {
            longest_road: Some(0),
            most_knights: Some(1),
            most_knights_count: 3,
        };
        let config = GameConfig::default();
        let breakdown = point_breakdown(0, &player, &titles, &config);
        assert_eq!(breakdown.total, 2 + 2 + 2);
        assert_eq!(breakdown.longest_road, 2);
        assert_eq!(breakdown.most_knights, 0);
        assert_eq!(breakdown.public(), 6);
    }
}
