//! Vision Quest entry point
//!
//! The browser build is driven from JavaScript through `web::WebSession`.
//! Natively we run a deterministic headless autoplay of every mini-game,
//! which is handy for eyeballing tuning changes in the log.

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use vision_quest::config::{GameConfig, PathVariant};
    use vision_quest::games::{
        DiscriminationGame, MemoryGame, PathGame, SliceGame, SpatialGame,
    };
    use vision_quest::narrator::{Narrator, OfflineGenerator};
    use vision_quest::{GameKind, MiniGame, ScoreBoard, Verdict};

    const ROUNDS: usize = 5;
    const FRAME_MS: f32 = 16.0;
    const SLICE_FRAMES: usize = 60 * 30;

    struct Tally {
        board: ScoreBoard,
        narrator: Narrator<OfflineGenerator>,
        failures: u32,
    }

    impl Tally {
        fn record(&mut self, verdicts: impl IntoIterator<Item = Verdict>) {
            for verdict in verdicts {
                match verdict {
                    Verdict::Success { points } => {
                        if let Some((score, level)) = self.board.on_success(points) {
                            log::info!("🦉 {}", self.narrator.motivation(score, level));
                        }
                    }
                    Verdict::Failure => self.failures += 1,
                    Verdict::Progress | Verdict::Ignored => {}
                }
            }
        }

        fn report(&self, game: &dyn MiniGame) {
            log::info!(
                "{:<16} reached level {} | board: {} points, level {} | {} misses",
                game.kind().label(),
                game.level(),
                self.board.score(),
                self.board.level(),
                self.failures
            );
        }
    }

    fn discrimination(tally: &mut Tally, seed: u64) {
        let mut game = DiscriminationGame::new(seed);
        for _ in 0..ROUNDS {
            if let Some(id) = game.options().iter().find(|c| c.is_odd).map(|c| c.id) {
                tally.record([game.choose(id)]);
            }
        }
        tally.report(&game);
    }

    fn memory(tally: &mut Tally, seed: u64, config: &GameConfig) {
        let mut game = MemoryGame::new(seed, config.memory);
        for _ in 0..ROUNDS {
            while game.is_replaying() {
                game.advance(FRAME_MS);
            }
            let sequence = game.sequence().to_vec();
            tally.record(sequence.into_iter().map(|pad| game.tap(pad)));
        }
        game.stop();
        tally.report(&game);
    }

    fn spatial(tally: &mut Tally, seed: u64) {
        let mut game = SpatialGame::new(seed);
        for _ in 0..ROUNDS {
            let target = game.round().target;
            tally.record([game.choose_rotation(target)]);
        }
        tally.report(&game);
    }

    fn path(tally: &mut Tally, seed: u64, config: &GameConfig, variant: PathVariant) {
        let mut cfg = config.path.clone();
        cfg.variant = variant;
        let mut game = PathGame::new(seed, cfg);
        for _ in 0..ROUNDS {
            let nodes = game.nodes().to_vec();
            match variant {
                PathVariant::Tap => tally.record(nodes.iter().map(|n| game.tap(n.id))),
                PathVariant::Drag => {
                    let Some(first) = nodes.first() else {
                        break;
                    };
                    tally.record([game.press(first.pos)]);
                    tally.record(nodes[1..].iter().map(|n| game.drag(n.pos)));
                    if game.is_tracing() {
                        tally.record([game.release()]);
                    }
                }
            }
        }
        tally.report(&game);
    }

    fn slice(tally: &mut Tally, seed: u64, config: &GameConfig) {
        let mut game = SliceGame::new(seed, config.slice.clone());
        for _ in 0..SLICE_FRAMES {
            game.update(FRAME_MS);
            let fruit: Vec<_> = game
                .world()
                .live_targets()
                .filter(|t| !t.is_bomb)
                .map(|t| t.pos)
                .collect();
            for pos in fruit {
                tally.record(game.swipe(pos));
            }
        }
        game.stop();
        tally.report(&game);
    }

    pub fn run(config: GameConfig, seed: u64) {
        let mut tally = Tally {
            board: ScoreBoard::new(),
            narrator: Narrator::new(OfflineGenerator),
            failures: 0,
        };

        for (i, kind) in GameKind::ALL.into_iter().enumerate() {
            let seed = seed.wrapping_add(i as u64);
            log::info!("{} {}: {}", kind.icon(), kind.title(), kind.description());
            match kind {
                GameKind::Discrimination => discrimination(&mut tally, seed),
                GameKind::Memory => memory(&mut tally, seed, &config),
                GameKind::Spatial => spatial(&mut tally, seed),
                GameKind::PathFollowing => {
                    path(&mut tally, seed, &config, PathVariant::Tap);
                    path(&mut tally, seed, &config, PathVariant::Drag);
                }
                GameKind::SliceChallenge => slice(&mut tally, seed, &config),
            }
        }

        log::info!(
            "Autoplay finished: {} points, level {}",
            tally.board.score(),
            tally.board.level()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
use vision_quest::config::SlicePreset;

/// Usage: `vision-quest [config.json] [seed] [ninja|classic]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Vision Quest (native) starting...");

    let mut args = std::env::args().skip(1);
    let mut config = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                vision_quest::GameConfig::from_json(&json).map_err(|e| e.to_string())
            }) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Could not load {}: {}, using defaults", path, e);
                vision_quest::GameConfig::default()
            }
        },
        None => vision_quest::GameConfig::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    if let Some(preset) = args.next() {
        match SlicePreset::from_str(&preset) {
            Some(preset) => {
                log::info!("Slice preset: {}", preset.as_str());
                config.slice = preset.config();
            }
            None => log::warn!("Unknown slice preset {:?}, keeping config", preset),
        }
    }

    autoplay::run(config, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_main, this is just to satisfy the compiler
}
