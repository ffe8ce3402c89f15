//! Odd one out: find the single icon that differs from the rest

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::DISCRIMINATION_POINTS;
use crate::sim::state::reported;
use crate::sim::{Choice, GameKind, Input, MiniGame, Verdict, odd_one_out};

#[derive(Debug, Clone, Serialize)]
pub struct DiscriminationGame {
    level: u32,
    options: Vec<Choice>,
    #[serde(skip)]
    rng: Pcg32,
}

impl DiscriminationGame {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let options = odd_one_out(&mut rng, 1);
        Self {
            level: 1,
            options,
            rng,
        }
    }

    pub fn options(&self) -> &[Choice] {
        &self.options
    }

    /// Pick the option with `id`. A wrong pick leaves the round unchanged.
    pub fn choose(&mut self, id: usize) -> Verdict {
        let Some(choice) = self.options.iter().find(|c| c.id == id) else {
            return Verdict::Ignored;
        };
        if !choice.is_odd {
            return Verdict::Failure;
        }

        self.level += 1;
        self.options = odd_one_out(&mut self.rng, self.level);
        log::debug!(
            "Discrimination level {} ({} options)",
            self.level,
            self.options.len()
        );
        Verdict::Success {
            points: DISCRIMINATION_POINTS,
        }
    }
}

impl MiniGame for DiscriminationGame {
    fn kind(&self) -> GameKind {
        GameKind::Discrimination
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn handle(&mut self, input: Input) -> Vec<Verdict> {
        match input {
            Input::Select(id) => reported(self.choose(id)),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn odd_id(game: &DiscriminationGame) -> usize {
        game.options().iter().find(|c| c.is_odd).map(|c| c.id).unwrap()
    }

    #[test]
    fn test_correct_choice_levels_up() {
        let mut game = DiscriminationGame::new(1);
        assert_eq!(game.options().len(), 4);

        let verdict = game.choose(odd_id(&game));
        assert_eq!(verdict, Verdict::Success { points: 10 });
        assert_eq!(game.level(), 2);
    }

    #[test]
    fn test_wrong_choice_keeps_round() {
        let mut game = DiscriminationGame::new(2);
        let before = game.options().to_vec();
        let wrong = before.iter().find(|c| !c.is_odd).unwrap().id;

        assert_eq!(game.choose(wrong), Verdict::Failure);
        assert_eq!(game.level(), 1);
        assert_eq!(game.options(), &before[..]);
    }

    #[test]
    fn test_grid_grows_with_level() {
        let mut game = DiscriminationGame::new(3);
        let mut sizes = Vec::new();
        for _ in 0..6 {
            sizes.push(game.options().len());
            let id = odd_id(&game);
            game.choose(id);
        }
        assert_eq!(sizes, vec![4, 4, 6, 6, 6, 8]);
    }

    #[test]
    fn test_unknown_option_ignored() {
        let mut game = DiscriminationGame::new(4);
        assert_eq!(game.choose(99), Verdict::Ignored);
        assert!(game.handle(Input::Select(99)).is_empty());
        assert!(game.handle(Input::PointerMove(glam::Vec2::ZERO)).is_empty());
    }
}
