//! Fixed-tick physics for the slice game
//!
//! Explicit Euler with one global gravity constant: position moves by the
//! current velocity, then gravity is added to the vertical velocity. No
//! collision between targets.

use glam::Vec2;
use rand::Rng;

use super::state::{Particle, SliceWorld, Target};
use crate::config::SliceConfig;

/// Fruit icons with their juice colours
pub const FRUITS: [(&str, u32); 6] = [
    ("🍉", 0xff4d4d),
    ("🥝", 0x8cff66),
    ("🍎", 0xff3333),
    ("🍓", 0xff66b2),
    ("🍊", 0xff9933),
    ("🍍", 0xffff66),
];

pub const BOMB: (&str, u32) = ("💣", 0x333333);

/// Advance the world by one physics tick
pub fn step(mut world: SliceWorld, cfg: &SliceConfig) -> SliceWorld {
    for target in &mut world.targets {
        target.pos += target.vel;
        target.vel.y += cfg.gravity;
        if target.is_sliced {
            target.fade_ticks += 1;
        }
    }
    world.targets.retain(|t| {
        let faded = t.is_sliced && t.fade_ticks >= cfg.fade_ticks;
        t.pos.y < cfg.despawn_y && !faded
    });

    for particle in &mut world.particles {
        particle.pos += particle.vel;
        particle.vel.y += cfg.particle_gravity;
        particle.life -= cfg.particle_decay;
    }
    world.particles.retain(|p| p.life > 0.0);

    world.ticks += 1;
    world
}

/// Launch a new target from below the visible band
pub fn spawn_target<R: Rng + ?Sized>(world: &mut SliceWorld, rng: &mut R, cfg: &SliceConfig) {
    let is_bomb = rng.random::<f32>() > 1.0 - cfg.bomb_chance;
    let fruit = FRUITS[rng.random_range(0..FRUITS.len())];
    let (icon, color) = if is_bomb { BOMB } else { fruit };

    let x = cfg.spawn_x_min + rng.random::<f32>() * (cfg.spawn_x_max - cfg.spawn_x_min);
    let vx = (rng.random::<f32>() - 0.5) * 2.0 * cfg.drift;
    let vy = -cfg.launch_min - rng.random::<f32>() * cfg.launch_spread;

    let id = world.next_target_id();
    world.targets.push(Target {
        id,
        pos: Vec2::new(x, cfg.spawn_y),
        vel: Vec2::new(vx, vy),
        icon,
        color,
        is_bomb,
        is_sliced: false,
        fade_ticks: 0,
    });
}

/// Emit a juice burst at `pos`
pub fn burst<R: Rng + ?Sized>(
    world: &mut SliceWorld,
    rng: &mut R,
    pos: Vec2,
    color: u32,
    cfg: &SliceConfig,
) {
    world.particles.extend((0..cfg.particle_count).map(|_| Particle {
        pos,
        vel: Vec2::new(
            (rng.random::<f32>() - 0.5) * 2.0 * cfg.particle_speed,
            (rng.random::<f32>() - 0.5) * 2.0 * cfg.particle_speed,
        ),
        color,
        life: 1.0,
    }));
}
