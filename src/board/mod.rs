use std::collections::{BTreeSet, HashMap};
use std::fmt;

use itertools::Itertools;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use strum::IntoEnumIterator;

use crate::coords::{Direction, HexCoord};
use crate::types::Terrain;

mod codec;
mod generator;
mod validator;

pub use codec::{DecodeError, decode_board, encode_board};
pub use generator::{
    BoardError, NUMBER_POOL, TERRAIN_POOL, generate_board, generate_board_default,
};
pub use validator::{
    is_valid_board, no_adjacent_red_numbers, no_shared_adjacent_numbers, pip_weight_under_cap,
};

/// Land tiles on the standard board, laid out in rows of 3, 4, 5, 4, 3.
pub const HEX_COUNT: usize = 19;

/// One of the 19 tiles: grid position, terrain, and number token.
/// `number` is `None` exactly for the Desert. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hex {
    pub slot: u8,
    pub coord: HexCoord,
    pub terrain: Terrain,
    pub number: Option<u8>,
}

/// Ordered assignment of terrain and number to the 19 fixed slots,
/// row-major over the 3/4/5/4/3 rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexLayout {
    hexes: Vec<Hex>,
}

impl HexLayout {
    /// Wrap a full slot assignment. A wrong tile count is a programmer
    /// error, not a runtime condition.
    pub fn new(hexes: Vec<Hex>) -> Self {
        assert_eq!(hexes.len(), HEX_COUNT, "layout must cover all 19 slots");
        debug_assert!(
            hexes
                .iter()
                .enumerate()
                .all(|(slot, hex)| hex.slot as usize == slot),
            "hexes must be ordered by slot"
        );
        Self { hexes }
    }

    pub fn hex(&self, slot: u8) -> &Hex {
        &self.hexes[slot as usize]
    }

    pub fn hexes(&self) -> &[Hex] {
        &self.hexes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hex> {
        self.hexes.iter()
    }

    pub fn desert_slot(&self) -> Option<u8> {
        self.hexes
            .iter()
            .find(|hex| hex.terrain.is_desert())
            .map(|hex| hex.slot)
    }

    /// Sum of the pip weights of the hexes meeting at a vertex.
    pub fn vertex_pip_weight(&self, vertex: &VertexKey) -> u32 {
        vertex
            .hexes()
            .iter()
            .map(|&slot| self.hex(slot).number.map_or(0, pip_weight))
            .sum()
    }
}

/// Canonical settlement-spot key: the sorted set of the 2-3 hex slots
/// meeting at the intersection. Corners touching a single hex are not
/// part of the board graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexKey(SmallVec<[u8; 3]>);

impl VertexKey {
    fn from_slots(mut slots: SmallVec<[u8; 3]>) -> Self {
        slots.sort_unstable();
        Self(slots)
    }

    /// Incident hex slots, sorted ascending.
    pub fn hexes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for VertexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut slots = self.0.iter();
        if let Some(first) = slots.next() {
            write!(f, "{first}")?;
        }
        for slot in slots {
            write!(f, ".{slot}")?;
        }
        Ok(())
    }
}

/// Canonical road-spot key: the lexicographically ordered pair of its
/// endpoint vertices.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    a: VertexKey,
    b: VertexKey,
}

impl EdgeKey {
    pub fn new(x: VertexKey, y: VertexKey) -> Self {
        if x <= y { Self { a: x, b: y } } else { Self { a: y, b: x } }
    }

    pub fn endpoints(&self) -> (&VertexKey, &VertexKey) {
        (&self.a, &self.b)
    }

    pub fn touches(&self, vertex: &VertexKey) -> bool {
        &self.a == vertex || &self.b == vertex
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.a, self.b)
    }
}

/// Precomputed adjacency tables over the fixed 19-slot topology. The
/// graph never depends on the terrain/number assignment, so a single
/// shared instance serves every layout.
#[derive(Debug)]
pub struct BoardGraph {
    hex_neighbors: Vec<SmallVec<[u8; 6]>>,
    vertices: Vec<VertexKey>,
    edges: Vec<EdgeKey>,
    vertex_neighbors: HashMap<VertexKey, SmallVec<[VertexKey; 3]>>,
    vertex_edges: HashMap<VertexKey, SmallVec<[EdgeKey; 3]>>,
}

static LAYOUT_COORDS: Lazy<Vec<HexCoord>> = Lazy::new(|| {
    let mut coords = Vec::with_capacity(HEX_COUNT);
    for r in -2..=2 {
        for q in (-2).max(-2 - r)..=2.min(2 - r) {
            coords.push(HexCoord::new(q, r));
        }
    }
    coords
});

static GRAPH: Lazy<BoardGraph> = Lazy::new(BoardGraph::standard);

/// Cube coordinates of the 19 slots in row-major order.
pub fn layout_coords() -> &'static [HexCoord] {
    &LAYOUT_COORDS
}

/// Slot indices grouped into the five board rows, for display.
pub fn slot_rows() -> Vec<Vec<u8>> {
    let mut rows: Vec<Vec<u8>> = Vec::with_capacity(5);
    let mut current_r = i32::MIN;
    for (slot, coord) in layout_coords().iter().enumerate() {
        if coord.r != current_r {
            current_r = coord.r;
            rows.push(Vec::new());
        }
        rows.last_mut().expect("row pushed above").push(slot as u8);
    }
    rows
}

/// The shared adjacency tables for the standard board.
pub fn board_graph() -> &'static BoardGraph {
    &GRAPH
}

impl BoardGraph {
    fn standard() -> Self {
        let coords = layout_coords();
        let index: HashMap<HexCoord, u8> = coords
            .iter()
            .enumerate()
            .map(|(slot, coord)| (*coord, slot as u8))
            .collect();

        let hex_neighbors: Vec<SmallVec<[u8; 6]>> = coords
            .iter()
            .map(|coord| {
                coord
                    .neighbors()
                    .filter_map(|neighbor| index.get(&neighbor).copied())
                    .collect()
            })
            .collect();

        let directions: Vec<Direction> = Direction::iter().collect();
        let mut vertices: BTreeSet<VertexKey> = BTreeSet::new();
        let mut edges: BTreeSet<EdgeKey> = BTreeSet::new();

        for (slot, coord) in coords.iter().enumerate() {
            // The corner between two consecutive side directions touches
            // this hex and the neighbors across those two sides.
            let corners: Vec<Option<VertexKey>> = directions
                .iter()
                .circular_tuple_windows()
                .map(|(side_a, side_b)| {
                    let mut slots: SmallVec<[u8; 3]> = smallvec![slot as u8];
                    for side in [side_a, side_b] {
                        if let Some(&neighbor) = index.get(&coord.neighbor(*side)) {
                            slots.push(neighbor);
                        }
                    }
                    (slots.len() >= 2).then(|| VertexKey::from_slots(slots))
                })
                .collect();

            for (corner_a, corner_b) in corners.iter().circular_tuple_windows() {
                if let (Some(corner_a), Some(corner_b)) = (corner_a, corner_b) {
                    edges.insert(EdgeKey::new(corner_a.clone(), corner_b.clone()));
                }
            }
            vertices.extend(corners.into_iter().flatten());
        }

        let mut vertex_neighbors: HashMap<VertexKey, SmallVec<[VertexKey; 3]>> = vertices
            .iter()
            .map(|vertex| (vertex.clone(), SmallVec::new()))
            .collect();
        let mut vertex_edges: HashMap<VertexKey, SmallVec<[EdgeKey; 3]>> = vertices
            .iter()
            .map(|vertex| (vertex.clone(), SmallVec::new()))
            .collect();
        for edge in &edges {
            let (a, b) = edge.endpoints();
            vertex_neighbors
                .get_mut(a)
                .expect("edge endpoint missing from vertex set")
                .push(b.clone());
            vertex_neighbors
                .get_mut(b)
                .expect("edge endpoint missing from vertex set")
                .push(a.clone());
            vertex_edges
                .get_mut(a)
                .expect("edge endpoint missing from vertex set")
                .push(edge.clone());
            vertex_edges
                .get_mut(b)
                .expect("edge endpoint missing from vertex set")
                .push(edge.clone());
        }

        Self {
            hex_neighbors,
            vertices: vertices.into_iter().collect(),
            edges: edges.into_iter().collect(),
            vertex_neighbors,
            vertex_edges,
        }
    }

    /// Slots sharing an edge with the given slot.
    pub fn adjacent_hexes(&self, slot: u8) -> &[u8] {
        &self.hex_neighbors[slot as usize]
    }

    /// All settlement spots, sorted by key.
    pub fn vertices(&self) -> &[VertexKey] {
        &self.vertices
    }

    /// All road spots, sorted by key.
    pub fn edges(&self) -> &[EdgeKey] {
        &self.edges
    }

    pub fn contains_vertex(&self, vertex: &VertexKey) -> bool {
        self.vertex_neighbors.contains_key(vertex)
    }

    /// Vertices one edge away from the given vertex.
    pub fn vertex_neighbors(&self, vertex: &VertexKey) -> &[VertexKey] {
        match self.vertex_neighbors.get(vertex) {
            Some(neighbors) => neighbors,
            None => &[],
        }
    }

    /// Edges incident to the given vertex.
    pub fn vertex_edges(&self, vertex: &VertexKey) -> &[EdgeKey] {
        match self.vertex_edges.get(vertex) {
            Some(edges) => edges,
            None => &[],
        }
    }
}

/// Dice-combination count for a number token: how many of the 36 rolls
/// of two dice produce it. Desert tiles contribute zero.
pub fn pip_weight(number: u8) -> u32 {
    PIP_WEIGHTS.get(&number).copied().unwrap_or(0)
}

static PIP_WEIGHTS: Lazy<HashMap<u8, u32>> = Lazy::new(|| {
    let mut weights: HashMap<u8, u32> = HashMap::new();
    for die_a in 1..=6u8 {
        for die_b in 1..=6u8 {
            *weights.entry(die_a + die_b).or_insert(0) += 1;
        }
    }
    weights
});
