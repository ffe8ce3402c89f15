//! Path following: visit the numbered nodes in order
//!
//! Two interaction variants share the same generator:
//! - Tap: tap each node; a wrong tap resets progress to node 1
//! - Drag: one continuous stroke starting on node 1; touching a later node
//!   out of order, crossing the drawn path, or lifting early fails the try

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::config::{PathConfig, PathVariant};
use crate::consts::{PATH_DRAG_POINTS, PATH_TAP_POINTS};
use crate::sim::state::reported;
use crate::sim::{
    GameKind, Input, MiniGame, PathNode, Verdict, crosses_own_path, node_under, path_nodes,
    within_radius,
};

#[derive(Debug, Clone, Serialize)]
pub struct PathGame {
    level: u32,
    nodes: Vec<PathNode>,
    /// Id of the node that must be reached next
    next_id: u32,
    /// Samples of the current stroke (drag variant)
    stroke: Vec<Vec2>,
    tracing: bool,
    #[serde(skip)]
    cfg: PathConfig,
    #[serde(skip)]
    rng: Pcg32,
}

impl PathGame {
    pub fn new(seed: u64, cfg: PathConfig) -> Self {
        let mut game = Self {
            level: 1,
            nodes: Vec::new(),
            next_id: 1,
            stroke: Vec::new(),
            tracing: false,
            cfg,
            rng: Pcg32::seed_from_u64(seed),
        };
        game.generate();
        game
    }

    pub fn variant(&self) -> PathVariant {
        self.cfg.variant
    }

    /// Node count for a level
    pub fn node_count(&self) -> usize {
        let count = self.level as usize + 3;
        match self.cfg.variant {
            PathVariant::Tap => count,
            PathVariant::Drag => count.min(self.cfg.drag_max_nodes),
        }
    }

    fn generate(&mut self) {
        let separation = match self.cfg.variant {
            PathVariant::Tap => self.cfg.tap_min_separation,
            PathVariant::Drag => self.cfg.drag_min_separation,
        };
        let count = self.node_count();
        self.nodes = path_nodes(&mut self.rng, count, separation, self.cfg.placement_attempts).nodes;
        self.reset_progress();
        log::debug!("Path level {}: {} nodes", self.level, count);
    }

    fn reset_progress(&mut self) {
        self.next_id = 1;
        self.stroke.clear();
        self.tracing = false;
    }

    fn complete(&mut self, points: u32) -> Verdict {
        self.level += 1;
        self.generate();
        Verdict::Success { points }
    }

    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn stroke(&self) -> &[Vec2] {
        &self.stroke
    }

    pub fn is_tracing(&self) -> bool {
        self.tracing
    }

    /// Segments between consecutive nodes that have already been reached
    pub fn completed_links(&self) -> Vec<(Vec2, Vec2)> {
        self.nodes
            .windows(2)
            .filter(|pair| pair[1].id < self.next_id)
            .map(|pair| (pair[0].pos, pair[1].pos))
            .collect()
    }

    fn is_last(&self, id: u32) -> bool {
        id as usize == self.nodes.len()
    }

    /// Tap variant: tap the node with `id`
    pub fn tap(&mut self, id: u32) -> Verdict {
        if self.cfg.variant != PathVariant::Tap || !self.nodes.iter().any(|n| n.id == id) {
            return Verdict::Ignored;
        }
        if id != self.next_id {
            self.reset_progress();
            return Verdict::Failure;
        }
        if self.is_last(id) {
            return self.complete(PATH_TAP_POINTS);
        }
        self.next_id += 1;
        Verdict::Progress
    }

    /// Drag variant: pointer pressed. Only starts a stroke on node 1.
    pub fn press(&mut self, point: Vec2) -> Verdict {
        if self.cfg.variant != PathVariant::Drag {
            return Verdict::Ignored;
        }
        let Some(&first) = self.nodes.first() else {
            return Verdict::Ignored;
        };
        if !within_radius(point, first.pos, self.cfg.start_radius) {
            return Verdict::Ignored;
        }

        self.tracing = true;
        self.stroke.clear();
        self.stroke.push(point);
        self.next_id = first.id + 1;
        if self.is_last(first.id) {
            return self.complete(PATH_DRAG_POINTS);
        }
        Verdict::Progress
    }

    /// Drag variant: pointer moved while pressed
    pub fn drag(&mut self, point: Vec2) -> Verdict {
        if !self.tracing {
            return Verdict::Ignored;
        }
        // Jitter within epsilon of the last recorded sample is not recorded
        let moved = self
            .stroke
            .last()
            .is_none_or(|last| last.distance(point) > self.cfg.self_cross_epsilon);
        if moved {
            if crosses_own_path(
                &self.stroke,
                point,
                self.cfg.self_cross_skip,
                self.cfg.self_cross_epsilon,
            ) {
                self.reset_progress();
                return Verdict::Failure;
            }
            self.stroke.push(point);
        }

        let touched = node_under(point, &self.nodes, self.cfg.capture_radius).map(|n| n.id);
        match touched {
            Some(id) if id == self.next_id => {
                if self.is_last(id) {
                    self.complete(PATH_DRAG_POINTS)
                } else {
                    self.next_id += 1;
                    Verdict::Progress
                }
            }
            // The node just reached stays under the stroke while leaving it
            Some(id) if id + 1 == self.next_id => Verdict::Ignored,
            Some(_) => {
                self.reset_progress();
                Verdict::Failure
            }
            None => Verdict::Ignored,
        }
    }

    /// Drag variant: pointer lifted before the last node
    pub fn release(&mut self) -> Verdict {
        if !self.tracing {
            return Verdict::Ignored;
        }
        self.reset_progress();
        Verdict::Failure
    }
}

impl MiniGame for PathGame {
    fn kind(&self) -> GameKind {
        GameKind::PathFollowing
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn handle(&mut self, input: Input) -> Vec<Verdict> {
        let verdict = match input {
            Input::Select(id) => u32::try_from(id).map_or(Verdict::Ignored, |id| self.tap(id)),
            Input::PointerDown(point) => self.press(point),
            Input::PointerMove(point) => self.drag(point),
            Input::PointerUp(_) => self.release(),
        };
        reported(verdict)
    }

    fn advance(&mut self, _elapsed_ms: f32) -> Vec<Verdict> {
        Vec::new()
    }

    fn view(&self) -> serde_json::Value {
        let mut view = serde_json::to_value(self).unwrap_or_default();
        if let Some(map) = view.as_object_mut() {
            map.insert("variant".into(), serde_json::json!(self.variant()));
            map.insert("links".into(), serde_json::json!(self.completed_links()));
        }
        view
    }
}
