//! Shared data model for the mini-games
//!
//! Entities are owned by exactly one mini-game instance and are replaced
//! wholesale when a round or level is regenerated.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The five mini-games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    Discrimination,
    Memory,
    Spatial,
    PathFollowing,
    SliceChallenge,
}

impl GameKind {
    pub const ALL: [GameKind; 5] = [
        GameKind::Discrimination,
        GameKind::Memory,
        GameKind::Spatial,
        GameKind::PathFollowing,
        GameKind::SliceChallenge,
    ];

    /// Stable label, also used as the game name in instruction prompts
    pub fn label(&self) -> &'static str {
        match self {
            GameKind::Discrimination => "DISCRIMINATION",
            GameKind::Memory => "MEMORY",
            GameKind::Spatial => "SPATIAL",
            GameKind::PathFollowing => "PATH_FOLLOWING",
            GameKind::SliceChallenge => "SLICE_CHALLENGE",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(s))
    }

    /// Menu card title
    pub fn title(&self) -> &'static str {
        match self {
            GameKind::Discrimination => "Occhio al Dettaglio",
            GameKind::Memory => "Memoria Stellare",
            GameKind::Spatial => "Rotazioni Spaziali",
            GameKind::PathFollowing => "Traccia Sentiero",
            GameKind::SliceChallenge => "Ninja delle Forme",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            GameKind::Discrimination => "🔍",
            GameKind::Memory => "⭐",
            GameKind::Spatial => "🧭",
            GameKind::PathFollowing => "🗺️",
            GameKind::SliceChallenge => "⚔️",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GameKind::Discrimination => "Trova l'intruso!",
            GameKind::Memory => "Ricorda la sequenza!",
            GameKind::Spatial => "Guarda l'orientamento!",
            GameKind::PathFollowing => "Unisci i punti in ordine!",
            GameKind::SliceChallenge => "Taglia la frutta al volo!",
        }
    }
}

/// Outcome of feeding one input (or one stretch of time) into a mini-game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// No gameplay effect
    Ignored,
    /// Correct partial progress (sequence or path advanced)
    Progress,
    /// Round/level cleared, report points to the shell
    Success { points: u32 },
    /// Wrong input, report to the shell
    Failure,
}

impl Verdict {
    /// Whether the shell needs to hear about this verdict
    pub fn is_reportable(&self) -> bool {
        matches!(self, Verdict::Success { .. } | Verdict::Failure)
    }
}

/// Player input. Pointer positions are in percentage space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Discrete tap on an option, pad or node (index or node id)
    Select(usize),
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp(Vec2),
}

/// Contract between a mini-game and the shell.
///
/// The returned verdicts are the only thing crossing into the shell; it
/// turns `Success`/`Failure` into score and feedback.
pub trait MiniGame {
    fn kind(&self) -> GameKind;

    /// Local difficulty counter (starts at 1)
    fn level(&self) -> u32;

    /// Feed one input
    fn handle(&mut self, input: Input) -> Vec<Verdict>;

    /// Advance the game's timers by `elapsed_ms`
    fn advance(&mut self, elapsed_ms: f32) -> Vec<Verdict>;

    /// Cancel all pending timers. Called before the game is dropped.
    fn stop(&mut self) {}

    /// Render-facing view of the current state
    fn view(&self) -> serde_json::Value;
}

/// Wrap a single verdict, dropping `Ignored`
pub(crate) fn reported(verdict: Verdict) -> Vec<Verdict> {
    if verdict == Verdict::Ignored {
        Vec::new()
    } else {
        vec![verdict]
    }
}

/// One option in the discrimination grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub id: usize,
    pub icon: &'static str,
    pub is_odd: bool,
}

/// Quarter-turn orientations for the spatial game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }
}

/// A numbered node in the path game, visited in increasing id order
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathNode {
    /// 1-based visiting order
    pub id: u32,
    pub pos: Vec2,
}

/// A falling object in the slice game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Target {
    pub id: u32,
    pub pos: Vec2,
    /// Per-tick velocity
    pub vel: Vec2,
    pub icon: &'static str,
    /// 0xRRGGBB, also used for the particle burst
    pub color: u32,
    pub is_bomb: bool,
    pub is_sliced: bool,
    /// Ticks elapsed since slicing (drives fade-out removal)
    pub fade_ticks: u32,
}

impl Target {
    /// Mark as sliced. Returns false if it already was.
    pub fn slice(&mut self) -> bool {
        if self.is_sliced {
            return false;
        }
        self.is_sliced = true;
        true
    }
}

/// Cosmetic juice particle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// 0-1, decreases every tick
    pub life: f32,
}

/// Everything the slice physics integrator advances
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SliceWorld {
    pub targets: Vec<Target>,
    pub particles: Vec<Particle>,
    /// Physics ticks simulated so far
    pub ticks: u64,
    next_id: u32,
}

impl SliceWorld {
    /// Allocate a new target ID
    pub fn next_target_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Targets that can still be sliced
    pub fn live_targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter().filter(|t| !t.is_sliced)
    }
}
