//! Shared simulation module
//!
//! Gameplay building blocks used by every mini-game. This module must stay
//! free of rendering and platform dependencies:
//! - Seeded RNG only (generators take any `rand::Rng`)
//! - Time only advances through explicit `advance`/`step` calls
//! - Positions live in percentage space, y grows downward

pub mod collision;
pub mod generate;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{box_hit, crosses_own_path, node_under, within_radius};
pub use generate::{
    FRUIT_ICONS, MEMORY_PADS, SPATIAL_ITEMS, Placement, SpatialRound, memory_sequence,
    odd_one_out, odd_one_out_count, path_nodes, spatial_round,
};
pub use state::{
    Choice, GameKind, Input, MiniGame, Particle, PathNode, Rotation, SliceWorld, Target,
    Verdict,
};
pub use tick::{burst, spawn_target, step};
pub use timer::{CancelToken, Delay, DelayState, Interval, TokenSource};
