//! Hexagonal spiral for search results.
//!
//! Matches fill rings outward from the center in relevance order; ring `n`
//! holds `6n` slots. Everything that did not match is pushed onto a distant
//! circle.

use std::collections::HashSet;

use glam::DVec3;

use super::liminal::ring_point;
use super::node::{Node, NodeId};

pub const BANISH_SCALE: f64 = 0.25;
const BANISH_RADIUS_PER_NODE: f64 = 100.0;
const CENTER_SCALE: f64 = 2.0;
const MIN_SCALE: f64 = 0.25;

/// Axial hex coordinate; the implicit third axis is `s = -q - r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HexCoord {
    pub q: i64,
    pub r: i64,
}

impl HexCoord {
    pub const ORIGIN: Self = Self { q: 0, r: 0 };

    pub const fn new(q: i64, r: i64) -> Self {
        Self { q, r }
    }

    pub fn ring(&self) -> u64 {
        let s = -self.q - self.r;
        self.q
            .unsigned_abs()
            .max(self.r.unsigned_abs())
            .max(s.unsigned_abs())
    }

    /// Center of this cell in the plane for cells of size `cell`.
    pub fn to_planar(self, cell: f64) -> (f64, f64) {
        let q = self.q as f64;
        let r = self.r as f64;
        (1.5 * q * cell, 3f64.sqrt() * (r + q / 2.0) * cell)
    }
}

/// Ring-start corners, one per side, as multiples of the ring number.
const CORNERS: [HexCoord; 6] = [
    HexCoord::new(1, 0),
    HexCoord::new(0, 1),
    HexCoord::new(-1, 1),
    HexCoord::new(-1, 0),
    HexCoord::new(0, -1),
    HexCoord::new(1, -1),
];

/// Step taken along each side, walking from its corner to the next.
const DIRECTIONS: [HexCoord; 6] = [
    HexCoord::new(-1, 1),
    HexCoord::new(-1, 0),
    HexCoord::new(0, -1),
    HexCoord::new(1, -1),
    HexCoord::new(1, 0),
    HexCoord::new(0, 1),
];

/// Slots in rings `1..=ring`.
pub const fn slots_through(ring: u64) -> u64 {
    3 * ring * (ring + 1)
}

/// Ring holding match `index`; index 0 is the center.
pub fn ring_of(index: u64) -> u64 {
    let mut ring = 0;
    while slots_through(ring) < index {
        ring += 1;
    }
    ring
}

/// Axial coordinate of match `index` on the spiral.
pub fn spiral_coord(index: u64) -> HexCoord {
    if index == 0 {
        return HexCoord::ORIGIN;
    }

    let ring = ring_of(index);
    let offset = index - slots_through(ring - 1) - 1;
    let side = (offset / ring) as usize;
    let step = (offset % ring) as i64;
    let ring = ring as i64;

    let corner = CORNERS[side];
    let direction = DIRECTIONS[side];
    HexCoord::new(
        corner.q * ring + direction.q * step,
        corner.r * ring + direction.r * step,
    )
}

/// Halves per ring from 2 at the center, never below a quarter.
pub fn ring_scale(ring: u64) -> f64 {
    let exponent = ring.min(i32::MAX as u64) as i32;
    (CENTER_SCALE / 2f64.powi(exponent)).max(MIN_SCALE)
}

/// Radius of the banish circle: 100 units per banished node, but never less
/// than `floor` (the sphere radius in practice). Below `floor / 100` nodes the
/// radius is therefore constant.
pub fn banish_radius(count: usize, floor: f64) -> f64 {
    (BANISH_RADIUS_PER_NODE * count as f64).max(floor)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoneycombSummary {
    pub matched: usize,
    pub banished: usize,
}

/// Arrange `matches` (best first) on the spiral and banish every other node.
///
/// Ids that are unknown or repeated are skipped. `banish_floor` is the
/// smallest radius used for the banish circle.
pub fn honeycomb_layout(
    nodes: &mut [Node],
    matches: &[NodeId],
    cell: f64,
    banish_floor: f64,
) -> HoneycombSummary {
    let mut seen = HashSet::new();
    let matched = matches
        .iter()
        .filter_map(|id| nodes.iter().position(|node| &node.id == id))
        .filter(|index| seen.insert(*index))
        .collect::<Vec<_>>();

    for (slot, &index) in matched.iter().enumerate() {
        let coord = spiral_coord(slot as u64);
        let (x, y) = coord.to_planar(cell);
        nodes[index].enter_focus(DVec3::new(x, y, 0.0), ring_scale(coord.ring()));
    }

    let banished = (0..nodes.len())
        .filter(|index| !seen.contains(index))
        .collect::<Vec<_>>();
    let radius = banish_radius(banished.len(), banish_floor);
    for (slot, &index) in banished.iter().enumerate() {
        nodes[index].enter_focus(ring_point(slot, banished.len(), radius), BANISH_SCALE);
    }

    HoneycombSummary {
        matched: matched.len(),
        banished: banished.len(),
    }
}
