//! Game tuning
//!
//! Data-driven constants for every mini-game. Loaded once from JSON (or left
//! at defaults); nothing here is persisted between sessions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse game config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid game config: {0}")]
    Invalid(String),
}

/// Which path-following interaction to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PathVariant {
    /// Tap the numbered nodes in order
    #[default]
    Tap,
    /// Trace one continuous stroke through the nodes
    Drag,
}

impl PathVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathVariant::Tap => "Tap",
            PathVariant::Drag => "Drag",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tap" => Some(PathVariant::Tap),
            "drag" | "trace" => Some(PathVariant::Drag),
            _ => None,
        }
    }
}

/// Path game tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub variant: PathVariant,
    /// Minimum node spacing in the tap variant
    pub tap_min_separation: f32,
    /// Minimum node spacing in the drag variant
    pub drag_min_separation: f32,
    /// Node count cap in the drag variant
    pub drag_max_nodes: usize,
    /// Placement tries per node before accepting a too-close spot
    pub placement_attempts: u32,
    /// Radius within which a drag sample touches a node
    pub capture_radius: f32,
    /// A drag must start this close to node 1
    pub start_radius: f32,
    /// Distance to an old sample that counts as crossing the path
    pub self_cross_epsilon: f32,
    /// Newest samples excluded from the crossing check
    pub self_cross_skip: usize,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            variant: PathVariant::Tap,
            tap_min_separation: 15.0,
            drag_min_separation: 20.0,
            drag_max_nodes: 8,
            placement_attempts: 100,
            capture_radius: 6.0,
            start_radius: 8.0,
            self_cross_epsilon: 1.5,
            self_cross_skip: 10,
        }
    }
}

/// Slice game presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SlicePreset {
    /// Fast launches, bombs, points every 5 slices
    #[default]
    Ninja,
    /// Gentle arcs, no bombs, points every 10 slices
    Classic,
}

impl SlicePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlicePreset::Ninja => "Ninja",
            SlicePreset::Classic => "Classic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ninja" => Some(SlicePreset::Ninja),
            "classic" => Some(SlicePreset::Classic),
            _ => None,
        }
    }

    pub fn config(&self) -> SliceConfig {
        match self {
            SlicePreset::Ninja => SliceConfig::ninja(),
            SlicePreset::Classic => SliceConfig::classic(),
        }
    }
}

/// Slice game tuning. Velocities and gravity are per physics tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceConfig {
    pub spawn_interval_ms: f32,
    pub physics_tick_ms: f32,
    /// Spawning pauses while this many targets are on the field
    pub max_targets: usize,
    pub gravity: f32,
    /// Targets are removed once y reaches this
    pub despawn_y: f32,
    pub spawn_y: f32,
    pub spawn_x_min: f32,
    pub spawn_x_max: f32,
    /// Horizontal drift is uniform in [-drift, drift]
    pub drift: f32,
    /// Upward speed is uniform in [launch_min, launch_min + launch_spread)
    pub launch_min: f32,
    pub launch_spread: f32,
    /// Probability that a spawn is a bomb
    pub bomb_chance: f32,
    /// Every `batch_size`-th fruit slice awards `batch_points`
    pub batch_size: u32,
    pub batch_points: u32,
    /// Half side of the blade hit box
    pub hit_half_extent: f32,
    pub particle_count: usize,
    /// Particle velocity components are uniform in [-particle_speed, particle_speed]
    pub particle_speed: f32,
    pub particle_decay: f32,
    pub particle_gravity: f32,
    pub trail_length: usize,
    /// Ticks a sliced target stays on the field before removal
    pub fade_ticks: u32,
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self::ninja()
    }
}

impl SliceConfig {
    pub fn ninja() -> Self {
        Self {
            spawn_interval_ms: 800.0,
            physics_tick_ms: 16.0,
            max_targets: 6,
            gravity: 0.05,
            despawn_y: 130.0,
            spawn_y: 110.0,
            spawn_x_min: 10.0,
            spawn_x_max: 90.0,
            drift: 0.6,
            launch_min: 4.0,
            launch_spread: 3.0,
            bomb_chance: 0.2,
            batch_size: 5,
            batch_points: 5,
            hit_half_extent: 10.0,
            particle_count: 8,
            particle_speed: 1.0,
            particle_decay: 0.02,
            particle_gravity: 0.1,
            trail_length: 10,
            fade_ticks: 18,
        }
    }

    pub fn classic() -> Self {
        Self {
            spawn_interval_ms: 1000.0,
            max_targets: 5,
            gravity: 0.035,
            despawn_y: 120.0,
            launch_min: 2.0,
            launch_spread: 0.6,
            bomb_chance: 0.0,
            batch_size: 10,
            batch_points: 10,
            ..Self::ninja()
        }
    }
}

/// Memory playback timing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryTiming {
    /// Pause before the first pad lights up
    pub lead_in_ms: f32,
    /// How long each pad stays lit
    pub show_ms: f32,
    /// Dark gap after each pad
    pub gap_ms: f32,
}

impl Default for MemoryTiming {
    fn default() -> Self {
        Self {
            lead_in_ms: 1000.0,
            show_ms: 900.0,
            gap_ms: 400.0,
        }
    }
}

/// Complete tuning for a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub path: PathConfig,
    pub slice: SliceConfig,
    pub memory: MemoryTiming,
    /// Feedback banner lifetime (visible time plus exit animation)
    pub feedback_ms: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            path: PathConfig::default(),
            slice: SliceConfig::default(),
            memory: MemoryTiming::default(),
            feedback_ms: 1800.0,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded game config (path: {}, slice every {} ms)",
            config.path.variant.as_str(),
            config.slice.spawn_interval_ms
        );
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let slice = &self.slice;
        if slice.spawn_interval_ms <= 0.0 || slice.physics_tick_ms <= 0.0 {
            return Err(ConfigError::Invalid(
                "slice timer intervals must be positive".into(),
            ));
        }
        if slice.max_targets == 0 {
            return Err(ConfigError::Invalid("slice max_targets must be at least 1".into()));
        }
        if slice.batch_size == 0 {
            return Err(ConfigError::Invalid("slice batch_size must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&slice.bomb_chance) {
            return Err(ConfigError::Invalid(format!(
                "slice bomb_chance {} is outside [0, 1]",
                slice.bomb_chance
            )));
        }
        if slice.spawn_x_min > slice.spawn_x_max {
            return Err(ConfigError::Invalid("slice spawn x range is empty".into()));
        }
        if self.path.placement_attempts == 0 {
            return Err(ConfigError::Invalid(
                "path placement_attempts must be at least 1".into(),
            ));
        }
        if self.path.drag_max_nodes < 2 {
            return Err(ConfigError::Invalid("path drag_max_nodes must be at least 2".into()));
        }
        let timing = &self.memory;
        if timing.lead_in_ms < 0.0 || timing.show_ms < 0.0 || timing.gap_ms < 0.0 {
            return Err(ConfigError::Invalid("memory timings must not be negative".into()));
        }
        Ok(())
    }
}
