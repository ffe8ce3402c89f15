//! Spatial rotation: pick the option oriented like the target

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::SPATIAL_POINTS;
use crate::sim::state::reported;
use crate::sim::{GameKind, Input, MiniGame, Rotation, SpatialRound, Verdict, spatial_round};

#[derive(Debug, Clone, Serialize)]
pub struct SpatialGame {
    round: SpatialRound,
    rounds_won: u32,
    #[serde(skip)]
    rng: Pcg32,
}

impl SpatialGame {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let round = spatial_round(&mut rng);
        Self {
            round,
            rounds_won: 0,
            rng,
        }
    }

    pub fn round(&self) -> &SpatialRound {
        &self.round
    }

    /// Pick the option at `index`. The round stays until the right one is chosen.
    pub fn choose(&mut self, index: usize) -> Verdict {
        let Some(&rotation) = self.round.options.get(index) else {
            return Verdict::Ignored;
        };
        self.choose_rotation(rotation)
    }

    pub fn choose_rotation(&mut self, rotation: Rotation) -> Verdict {
        if rotation != self.round.target {
            return Verdict::Failure;
        }
        self.rounds_won += 1;
        self.round = spatial_round(&mut self.rng);
        Verdict::Success {
            points: SPATIAL_POINTS,
        }
    }
}

impl MiniGame for SpatialGame {
    fn kind(&self) -> GameKind {
        GameKind::Spatial
    }

    fn level(&self) -> u32 {
        self.rounds_won + 1
    }

    fn handle(&mut self, input: Input) -> Vec<Verdict> {
        match input {
            Input::Select(index) => reported(self.choose(index)),
            _ => Vec::new(),
        }
    }

    fn advance(&mut self, _elapsed_ms: f32) -> Vec<Verdict> {
        Vec::new()
    }

    fn view(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
