//! Slice challenge: swipe through flying fruit, avoid bombs
//!
//! Two independent timers drive the world: a slow spawn timer and a fast
//! physics timer. Both are owned by the game and stop with it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::config::SliceConfig;
use crate::consts::MAX_SUBSTEPS;
use crate::sim::{
    GameKind, Input, Interval, MiniGame, SliceWorld, Verdict, box_hit, burst, spawn_target, step,
};

#[derive(Debug, Clone, Serialize)]
pub struct SliceGame {
    world: SliceWorld,
    /// Fruit slices so far (bombs excluded)
    slices: u32,
    /// Recent blade positions, newest first (rendering only)
    trail: Vec<Vec2>,
    #[serde(skip)]
    spawn_timer: Interval,
    #[serde(skip)]
    physics_timer: Interval,
    #[serde(skip)]
    cfg: SliceConfig,
    #[serde(skip)]
    rng: Pcg32,
}

impl SliceGame {
    pub fn new(seed: u64, cfg: SliceConfig) -> Self {
        Self {
            world: SliceWorld::default(),
            slices: 0,
            trail: Vec::with_capacity(cfg.trail_length),
            spawn_timer: Interval::new(cfg.spawn_interval_ms),
            physics_timer: Interval::new(cfg.physics_tick_ms),
            cfg,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn world(&self) -> &SliceWorld {
        &self.world
    }

    pub fn slices(&self) -> u32 {
        self.slices
    }

    pub fn trail(&self) -> &[Vec2] {
        &self.trail
    }

    pub fn is_running(&self) -> bool {
        !self.spawn_timer.is_cancelled() && !self.physics_timer.is_cancelled()
    }

    /// Run both timers for `elapsed_ms`
    pub fn update(&mut self, elapsed_ms: f32) {
        let spawns = self.spawn_timer.advance(elapsed_ms, 1);
        for _ in 0..spawns {
            if self.world.targets.len() < self.cfg.max_targets {
                spawn_target(&mut self.world, &mut self.rng, &self.cfg);
            }
        }

        let ticks = self.physics_timer.advance(elapsed_ms, MAX_SUBSTEPS);
        for _ in 0..ticks {
            self.world = step(std::mem::take(&mut self.world), &self.cfg);
        }
    }

    /// Record a blade position (newest first)
    fn record_trail(&mut self, point: Vec2) {
        self.trail.insert(0, point);
        self.trail.truncate(self.cfg.trail_length);
    }

    /// Hit-test one blade sample against every unsliced target
    pub fn swipe(&mut self, point: Vec2) -> Vec<Verdict> {
        self.record_trail(point);

        let mut verdicts = Vec::new();
        let mut splashes = Vec::new();
        for target in self.world.targets.iter_mut() {
            if target.is_sliced || !box_hit(point, target.pos, self.cfg.hit_half_extent) {
                continue;
            }
            target.slice();
            if target.is_bomb {
                verdicts.push(Verdict::Failure);
                continue;
            }

            splashes.push((target.pos, target.color));
            self.slices += 1;
            if self.slices % self.cfg.batch_size.max(1) == 0 {
                verdicts.push(Verdict::Success {
                    points: self.cfg.batch_points,
                });
            }
        }

        for (pos, color) in splashes {
            burst(&mut self.world, &mut self.rng, pos, color, &self.cfg);
        }
        verdicts
    }

    /// Cancel both timers; the world freezes
    pub fn halt(&mut self) {
        self.spawn_timer.cancel();
        self.physics_timer.cancel();
    }
}

impl MiniGame for SliceGame {
    fn kind(&self) -> GameKind {
        GameKind::SliceChallenge
    }

    fn level(&self) -> u32 {
        self.slices / self.cfg.batch_size.max(1) + 1
    }

    fn handle(&mut self, input: Input) -> Vec<Verdict> {
        match input {
            Input::PointerMove(point) => self.swipe(point),
            Input::PointerUp(_) => {
                self.trail.clear();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn advance(&mut self, elapsed_ms: f32) -> Vec<Verdict> {
        self.update(elapsed_ms);
        Vec::new()
    }

    fn stop(&mut self) {
        self.halt();
    }

    fn view(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
