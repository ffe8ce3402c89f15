//! Random level generation
//!
//! Every generator is generic over `rand::Rng` so games can feed their
//! seeded `Pcg32` and tests can feed a rigged RNG.

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;

use super::state::{Choice, PathNode, Rotation};
use crate::consts::{NODE_MIN, NODE_SPAN};

/// Discrimination palette
pub const FRUIT_ICONS: [&str; 8] = ["🍎", "🍌", "🍇", "🍓", "🍍", "🥝", "🍒", "🥭"];

/// Memory pads (fixed palette of four)
pub const MEMORY_PADS: [&str; 4] = ["🦁", "🐯", "🦒", "🐘"];

/// Spatial game items
pub const SPATIAL_ITEMS: [&str; 6] = ["🚀", "🚁", "🛸", "✈️", "⛵", "🚲"];

/// Grid size for a discrimination level
pub fn odd_one_out_count(level: u32) -> usize {
    if level > 5 {
        8
    } else if level > 2 {
        6
    } else {
        4
    }
}

/// Build a discrimination grid: one common icon everywhere, one odd icon at a random slot
pub fn odd_one_out<R: Rng + ?Sized>(rng: &mut R, level: u32) -> Vec<Choice> {
    let palette = FRUIT_ICONS.len();
    let common = rng.random_range(0..palette);
    // Uniform over the other icons, so no retry loop is needed
    let odd = (common + 1 + rng.random_range(0..palette - 1)) % palette;

    let count = odd_one_out_count(level);
    let odd_index = rng.random_range(0..count);

    (0..count)
        .map(|id| {
            let is_odd = id == odd_index;
            Choice {
                id,
                icon: if is_odd { FRUIT_ICONS[odd] } else { FRUIT_ICONS[common] },
                is_odd,
            }
        })
        .collect()
}

/// Memory sequence for a level: `level + 1` independent pad picks
pub fn memory_sequence<R: Rng + ?Sized>(rng: &mut R, level: u32) -> Vec<usize> {
    (0..=level as usize)
        .map(|_| rng.random_range(0..MEMORY_PADS.len()))
        .collect()
}

/// One spatial comparison
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SpatialRound {
    pub item: &'static str,
    pub target: Rotation,
    /// All four rotations in shuffled order
    pub options: [Rotation; 4],
}

pub fn spatial_round<R: Rng + ?Sized>(rng: &mut R) -> SpatialRound {
    let item = SPATIAL_ITEMS[rng.random_range(0..SPATIAL_ITEMS.len())];
    let target = Rotation::ALL[rng.random_range(0..Rotation::ALL.len())];
    let mut options = Rotation::ALL;
    options.shuffle(rng);
    SpatialRound {
        item,
        target,
        options,
    }
}

/// Result of path node placement
#[derive(Debug, Clone)]
pub struct Placement {
    pub nodes: Vec<PathNode>,
    /// Nodes accepted too close to a neighbour after exhausting their attempts
    pub relaxed: usize,
}

/// Place `count` nodes in [15,85]² by rejection sampling.
///
/// Each node gets at most `max_attempts` tries to keep `min_separation` from
/// every earlier node; after that the last candidate is accepted anyway.
pub fn path_nodes<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    min_separation: f32,
    max_attempts: u32,
) -> Placement {
    let max_attempts = max_attempts.max(1);
    let mut nodes: Vec<PathNode> = Vec::with_capacity(count);
    let mut relaxed = 0;

    for id in 1..=count as u32 {
        let mut attempts = 0;
        let pos = loop {
            let candidate = Vec2::new(
                NODE_MIN + rng.random::<f32>() * NODE_SPAN,
                NODE_MIN + rng.random::<f32>() * NODE_SPAN,
            );
            attempts += 1;

            let too_close = nodes
                .iter()
                .any(|n| n.pos.distance(candidate) < min_separation);
            if !too_close {
                break candidate;
            }
            if attempts >= max_attempts {
                relaxed += 1;
                break candidate;
            }
        };
        nodes.push(PathNode { id, pos });
    }

    if relaxed > 0 {
        log::warn!(
            "Path placement relaxed spacing for {} of {} nodes (min separation {})",
            relaxed,
            count,
            min_separation
        );
    }

    Placement { nodes, relaxed }
}
