//! Navigation, shared score board and the feedback banner
//!
//! The shell owns at most one running mini-game. Every screen change drops
//! it (after stopping its timers), so nothing from an old game can outlive
//! the screen it was started on.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::config::GameConfig;
use crate::consts::MAX_FRAME_MS;
use crate::games;
use crate::narrator::{Narrator, OfflineGenerator, TextGenerator};
use crate::sim::{GameKind, Input, MiniGame, Verdict};

pub const GREETING: &str = "Ciao! Scegli la difficoltà per iniziare!";
pub const SUCCESS_MESSAGE: &str = "Fantastico!";
pub const FAILURE_MESSAGE: &str = "Riprova!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Easy,
    Medium,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Facile",
            Difficulty::Medium => "Medio",
        }
    }

    pub fn menu_title(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Giochi Semplici ✨",
            Difficulty::Medium => "Sfide Difficili 🔥",
        }
    }

    /// Games offered at this difficulty
    pub fn games(&self) -> &'static [GameKind] {
        match self {
            Difficulty::Easy => &[GameKind::Discrimination, GameKind::Memory, GameKind::Spatial],
            Difficulty::Medium => &[GameKind::PathFollowing, GameKind::SliceChallenge],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Screen {
    ChooseDifficulty,
    ChooseGame(Difficulty),
    Playing(Difficulty, GameKind),
}

/// Score and level shared by every game in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBoard {
    score: u32,
    level: u32,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self { score: 0, level: 1 }
    }
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Record a success. Returns `(new score, completed level)` when the
    /// completed level earns a motivation message (every third level).
    pub fn on_success(&mut self, points: u32) -> Option<(u32, u32)> {
        let completed = self.level;
        self.score = self.score.saturating_add(points);
        self.level += 1;
        (completed % 3 == 0).then_some((self.score, completed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeedbackKind {
    Success,
    Error,
}

/// Transient banner shown after a success or failure
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: &'static str,
    pub remaining_ms: f32,
}

pub struct Session<G: TextGenerator = OfflineGenerator> {
    screen: Screen,
    board: ScoreBoard,
    feedback: Option<Feedback>,
    assistant: String,
    instruction: Option<String>,
    game: Option<Box<dyn MiniGame>>,
    narrator: Narrator<G>,
    config: GameConfig,
    rng: Pcg32,
}

impl Session {
    /// Offline session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_generator(seed, GameConfig::default(), OfflineGenerator)
    }
}

impl<G: TextGenerator> Session<G> {
    pub fn with_generator(seed: u64, config: GameConfig, generator: G) -> Self {
        Self {
            screen: Screen::ChooseDifficulty,
            board: ScoreBoard::new(),
            feedback: None,
            assistant: GREETING.to_string(),
            instruction: None,
            game: None,
            narrator: Narrator::new(generator),
            config,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn board(&self) -> ScoreBoard {
        self.board
    }

    pub fn score(&self) -> u32 {
        self.board.score()
    }

    pub fn level(&self) -> u32 {
        self.board.level()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Text for the assistant bubble (instruction wins while set)
    pub fn assistant_message(&self) -> &str {
        self.instruction.as_deref().unwrap_or(&self.assistant)
    }

    pub fn narrator(&self) -> &Narrator<G> {
        &self.narrator
    }

    pub fn game(&self) -> Option<&dyn MiniGame> {
        self.game.as_deref()
    }

    /// Games offered on the current screen
    pub fn menu(&self) -> &'static [GameKind] {
        match self.screen {
            Screen::ChooseGame(difficulty) => difficulty.games(),
            _ => &[],
        }
    }

    fn drop_game(&mut self) {
        if let Some(mut game) = self.game.take() {
            game.stop();
            log::debug!("Stopped {}", game.kind().label());
        }
    }

    pub fn choose_difficulty(&mut self, difficulty: Difficulty) {
        self.drop_game();
        self.instruction = None;
        self.screen = Screen::ChooseGame(difficulty);
        self.assistant = format!(
            "Ottimo! Hai scelto {}. Ora scegli un gioco!",
            difficulty.label()
        );
        log::info!("Difficulty: {}", difficulty.label());
    }

    /// Start `kind` if the current menu offers it
    pub fn choose_game(&mut self, kind: GameKind) -> bool {
        let Screen::ChooseGame(difficulty) = self.screen else {
            return false;
        };
        if !difficulty.games().contains(&kind) {
            log::warn!("{} is not offered at {}", kind.label(), difficulty.label());
            return false;
        }

        let seed = self.rng.random();
        self.game = Some(games::build(kind, seed, &self.config));
        self.screen = Screen::Playing(difficulty, kind);
        self.instruction = Some(self.narrator.instruction(kind.label()));
        true
    }

    /// From a game back to its menu; from a menu back home
    pub fn back(&mut self) {
        match self.screen {
            Screen::Playing(difficulty, _) => {
                self.drop_game();
                self.instruction = None;
                self.screen = Screen::ChooseGame(difficulty);
            }
            Screen::ChooseGame(_) => self.home(),
            Screen::ChooseDifficulty => {}
        }
    }

    pub fn home(&mut self) {
        self.drop_game();
        self.instruction = None;
        self.assistant = GREETING.to_string();
        self.screen = Screen::ChooseDifficulty;
    }

    /// Forward input to the running game
    pub fn handle(&mut self, input: Input) -> Vec<Verdict> {
        let verdicts = match self.game.as_mut() {
            Some(game) => game.handle(input),
            None => return Vec::new(),
        };
        self.apply(&verdicts);
        verdicts
    }

    /// Advance timers by `elapsed_ms` (clamped to one long frame, non-finite counts as 0)
    pub fn advance(&mut self, elapsed_ms: f32) -> Vec<Verdict> {
        let dt = if elapsed_ms.is_finite() {
            elapsed_ms.clamp(0.0, MAX_FRAME_MS)
        } else {
            0.0
        };

        if let Some(feedback) = self.feedback.as_mut() {
            feedback.remaining_ms -= dt;
            if feedback.remaining_ms <= 0.0 {
                self.feedback = None;
            }
        }

        let verdicts = match self.game.as_mut() {
            Some(game) => game.advance(dt),
            None => return Vec::new(),
        };
        self.apply(&verdicts);
        verdicts
    }

    fn apply(&mut self, verdicts: &[Verdict]) {
        for verdict in verdicts {
            match *verdict {
                Verdict::Success { points } => {
                    self.show(FeedbackKind::Success, SUCCESS_MESSAGE);
                    if let Some((score, level)) = self.board.on_success(points) {
                        self.assistant = self.narrator.motivation(score, level);
                    }
                }
                Verdict::Failure => self.show(FeedbackKind::Error, FAILURE_MESSAGE),
                Verdict::Progress | Verdict::Ignored => {}
            }
        }
    }

    fn show(&mut self, kind: FeedbackKind, message: &'static str) {
        self.feedback = Some(Feedback {
            kind,
            message,
            remaining_ms: self.config.feedback_ms,
        });
    }

    /// Everything a view layer needs to draw the current frame
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "screen": self.screen,
            "score": self.board.score(),
            "level": self.board.level(),
            "feedback": self.feedback,
            "assistant": self.assistant_message(),
            "menu_title": match self.screen {
                Screen::ChooseGame(difficulty) => Some(difficulty.menu_title()),
                _ => None,
            },
            "menu": self.menu().iter().map(|k| k.label()).collect::<Vec<_>>(),
            "game": self.game.as_ref().map(|g| g.view()),
        })
    }
}

impl<G: TextGenerator> Drop for Session<G> {
    fn drop(&mut self) {
        self.drop_game();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrator::tests::Scripted;
    use crate::narrator::{INSTRUCTION_ON_ERROR, TextGenError};

    /// Pick the odd option out of a discrimination view
    fn odd_id(session: &Session<impl TextGenerator>) -> usize {
        let view = session.game().unwrap().view();
        view["options"]
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["is_odd"] == true)
            .and_then(|c| c["id"].as_u64())
            .unwrap() as usize
    }

    #[test]
    fn test_score_board_motivation_cadence() {
        let mut board = ScoreBoard::new();
        let due: Vec<_> = (0..7).map(|_| board.on_success(10)).collect();
        assert_eq!(
            due,
            vec![None, None, Some((30, 3)), None, None, Some((60, 6)), None]
        );
        assert_eq!(board.level(), 8);
        assert_eq!(board.score(), 70);
    }

    #[test]
    fn test_navigation() {
        let mut session = Session::new(1);
        assert_eq!(session.screen(), Screen::ChooseDifficulty);
        assert_eq!(session.assistant_message(), GREETING);
        assert!(!session.choose_game(GameKind::Memory));

        session.choose_difficulty(Difficulty::Easy);
        assert_eq!(
            session.assistant_message(),
            "Ottimo! Hai scelto Facile. Ora scegli un gioco!"
        );
        assert_eq!(session.menu().len(), 3);
        assert!(!session.choose_game(GameKind::SliceChallenge));
        assert_eq!(session.screen(), Screen::ChooseGame(Difficulty::Easy));

        assert!(session.choose_game(GameKind::Memory));
        assert_eq!(
            session.screen(),
            Screen::Playing(Difficulty::Easy, GameKind::Memory)
        );
        assert_eq!(session.assistant_message(), INSTRUCTION_ON_ERROR);

        session.back();
        assert!(session.game().is_none());
        assert_eq!(session.screen(), Screen::ChooseGame(Difficulty::Easy));
        assert_eq!(
            session.assistant_message(),
            "Ottimo! Hai scelto Facile. Ora scegli un gioco!"
        );

        session.back();
        assert_eq!(session.screen(), Screen::ChooseDifficulty);
        assert_eq!(session.assistant_message(), GREETING);
    }

    #[test]
    fn test_success_and_failure_feedback() {
        let mut session = Session::new(2);
        session.choose_difficulty(Difficulty::Easy);
        session.choose_game(GameKind::Discrimination);

        let odd = odd_id(&session);
        let wrong = (0..4).find(|&id| id != odd).unwrap();
        assert_eq!(session.handle(Input::Select(wrong)), vec![Verdict::Failure]);
        assert_eq!(session.feedback().unwrap().message, FAILURE_MESSAGE);
        assert_eq!(session.score(), 0);

        let odd = odd_id(&session);
        session.handle(Input::Select(odd));
        assert_eq!(session.feedback().unwrap().kind, FeedbackKind::Success);
        assert_eq!(session.score(), 10);
        assert_eq!(session.level(), 2);

        for _ in 0..8 {
            session.advance(MAX_FRAME_MS);
        }
        assert!(session.feedback().is_none());
    }

    #[test]
    fn test_motivation_replaces_assistant_message() {
        let generator = Scripted::new(vec![
            Ok("Segui le forme!".into()),
            Ok("Grande!".into()),
        ]);
        let mut session = Session::with_generator(3, GameConfig::default(), generator);
        session.choose_difficulty(Difficulty::Easy);
        session.choose_game(GameKind::Discrimination);
        assert_eq!(session.assistant_message(), "Segui le forme!");

        for _ in 0..3 {
            let odd = odd_id(&session);
            session.handle(Input::Select(odd));
        }
        session.back();
        assert_eq!(session.assistant_message(), "Grande!");
        assert_eq!(session.level(), 4);
    }

    #[test]
    fn test_generator_error_uses_fallback() {
        let generator = Scripted::new(vec![Err(TextGenError::Transport("503".into()))]);
        let mut session = Session::with_generator(4, GameConfig::default(), generator);
        session.choose_difficulty(Difficulty::Medium);
        assert!(session.choose_game(GameKind::PathFollowing));
        assert_eq!(session.assistant_message(), INSTRUCTION_ON_ERROR);
    }

    #[test]
    fn test_home_drops_game() {
        let mut session = Session::new(5);
        session.choose_difficulty(Difficulty::Medium);
        session.choose_game(GameKind::SliceChallenge);
        session.advance(100.0);
        assert!(session.game().is_some());

        session.home();
        assert!(session.game().is_none());
        assert!(session.advance(100.0).is_empty());
        assert!(session.handle(Input::Select(0)).is_empty());
    }

    #[test]
    fn test_non_finite_frame_time_is_harmless() {
        let mut session = Session::new(7);
        session.choose_difficulty(Difficulty::Medium);
        session.choose_game(GameKind::SliceChallenge);
        session.handle(Input::PointerMove(glam::Vec2::ZERO));

        session.advance(f32::NAN);
        session.advance(f32::NEG_INFINITY);
        for _ in 0..4 {
            session.advance(250.0);
        }
        let targets = session.snapshot()["game"]["world"]["targets"]
            .as_array()
            .map(|t| t.len());
        assert_eq!(targets, Some(1));

        session.home();
        session.choose_difficulty(Difficulty::Easy);
        session.choose_game(GameKind::Discrimination);
        let odd = odd_id(&session);
        session.handle(Input::Select(odd));
        session.advance(f32::NAN);
        assert!(session.feedback().unwrap().remaining_ms.is_finite());
        for _ in 0..8 {
            session.advance(250.0);
        }
        assert!(session.feedback().is_none());
    }

    #[test]
    fn test_snapshot_shape() {
        let mut session = Session::new(6);
        session.choose_difficulty(Difficulty::Medium);
        let snap = session.snapshot();
        assert_eq!(snap["menu"][0], "PATH_FOLLOWING");
        assert_eq!(snap["menu_title"], "Sfide Difficili 🔥");
        assert!(snap["game"].is_null());

        session.choose_game(GameKind::PathFollowing);
        let snap = session.snapshot();
        assert!(snap["game"].is_object());
        assert_eq!(snap["level"], 1);
    }
}
