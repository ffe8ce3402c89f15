//! The five mini-games
//!
//! Each game owns its generator state, its seeded RNG and its timers, and
//! talks to the shell only through the verdicts it returns.

pub mod discrimination;
pub mod memory;
pub mod path;
pub mod slice;
pub mod spatial;

pub use discrimination::DiscriminationGame;
pub use memory::{MemoryGame, Playback, PlaybackState};
pub use path::PathGame;
pub use slice::SliceGame;
pub use spatial::SpatialGame;

use crate::config::GameConfig;
use crate::sim::{GameKind, MiniGame};

/// Construct a fresh game of `kind`
pub fn build(kind: GameKind, seed: u64, config: &GameConfig) -> Box<dyn MiniGame> {
    log::info!("Starting {} (seed {})", kind.label(), seed);
    match kind {
        GameKind::Discrimination => Box::new(DiscriminationGame::new(seed)),
        GameKind::Memory => Box::new(MemoryGame::new(seed, config.memory)),
        GameKind::Spatial => Box::new(SpatialGame::new(seed)),
        GameKind::PathFollowing => Box::new(PathGame::new(seed, config.path.clone())),
        GameKind::SliceChallenge => Box::new(SliceGame::new(seed, config.slice.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_matches_kind() {
        let config = GameConfig::default();
        for kind in GameKind::ALL {
            let game = build(kind, 42, &config);
            assert_eq!(game.kind(), kind);
            assert_eq!(game.level(), 1);
            assert!(game.view().is_object());
        }
    }
}
