//! Vision Quest - a playground of five mini-games for young children
//!
//! Core modules:
//! - `sim`: Shared simulation pieces (data model, level generation, hit tests, physics, timers)
//! - `games`: The five mini-games (discrimination, memory, spatial, path, slice)
//! - `shell`: Navigation, shared score/level board and feedback banner
//! - `narrator`: Best-effort text generation for the assistant bubble
//! - `config`: Data-driven game tuning

pub mod config;
pub mod games;
pub mod narrator;
pub mod shell;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{ConfigError, GameConfig};
pub use shell::{Difficulty, ScoreBoard, Screen, Session};
pub use sim::{GameKind, Input, MiniGame, Verdict};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Side length of the playfield in percentage space
    pub const FIELD_SIZE: f32 = 100.0;
    /// Largest frame delta accepted by `advance` (prevents spiral of death after a stall)
    pub const MAX_FRAME_MS: f32 = 250.0;
    /// Maximum physics substeps per frame
    pub const MAX_SUBSTEPS: u32 = 16;

    /// Points per success event
    pub const DISCRIMINATION_POINTS: u32 = 10;
    pub const MEMORY_POINTS: u32 = 20;
    pub const SPATIAL_POINTS: u32 = 15;
    pub const PATH_TAP_POINTS: u32 = 25;
    pub const PATH_DRAG_POINTS: u32 = 30;

    /// Path nodes are placed inside [NODE_MIN, NODE_MIN + NODE_SPAN] on both axes
    pub const NODE_MIN: f32 = 15.0;
    pub const NODE_SPAN: f32 = 70.0;
}

/// Convert a client-space pointer position into percentage space of a container.
///
/// Returns `None` for a degenerate (zero-sized) container.
#[inline]
pub fn to_percent_space(client: Vec2, origin: Vec2, size: Vec2) -> Option<Vec2> {
    if size.x <= 0.0 || size.y <= 0.0 {
        return None;
    }
    Some((client - origin) / size * consts::FIELD_SIZE)
}
