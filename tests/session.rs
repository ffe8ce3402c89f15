//! End-to-end scenarios through the public session API

use std::cell::RefCell;

use glam::Vec2;
use vision_quest::config::{GameConfig, PathVariant};
use vision_quest::narrator::{
    INSTRUCTION_ON_ERROR, MOTIVATION_ON_ERROR, OfflineGenerator, Prompt, TextGenError, TextGenerator,
};
use vision_quest::shell::{FAILURE_MESSAGE, FeedbackKind, GREETING, SUCCESS_MESSAGE};
use vision_quest::{Difficulty, GameKind, Input, Screen, Session, Verdict};

/// Records prompts and answers every one with the same reply
struct Echo {
    reply: Result<&'static str, ()>,
    prompts: RefCell<Vec<Prompt>>,
}

impl Echo {
    fn new(reply: Result<&'static str, ()>) -> Self {
        Self {
            reply,
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl TextGenerator for Echo {
    fn generate(&self, prompt: &Prompt) -> Result<String, TextGenError> {
        self.prompts.borrow_mut().push(prompt.clone());
        self.reply
            .map(str::to_string)
            .map_err(|_| TextGenError::Transport("connection refused".into()))
    }
}

fn odd_option(session: &Session<impl TextGenerator>) -> usize {
    let view = session.game().expect("game running").view();
    view["options"]
        .as_array()
        .expect("options")
        .iter()
        .find(|c| c["is_odd"] == true)
        .and_then(|c| c["id"].as_u64())
        .expect("odd option") as usize
}

fn node_positions(session: &Session<impl TextGenerator>) -> Vec<(u64, Vec2)> {
    let view = session.game().expect("game running").view();
    view["nodes"]
        .as_array()
        .expect("nodes")
        .iter()
        .map(|n| {
            let pos = &n["pos"];
            (
                n["id"].as_u64().unwrap(),
                Vec2::new(
                    pos[0].as_f64().unwrap() as f32,
                    pos[1].as_f64().unwrap() as f32,
                ),
            )
        })
        .collect()
}

#[test]
fn test_full_navigation_cycle() {
    let mut session = Session::new(7);
    assert_eq!(session.assistant_message(), GREETING);

    session.choose_difficulty(Difficulty::Medium);
    assert_eq!(session.menu(), Difficulty::Medium.games());
    assert!(session.choose_game(GameKind::SliceChallenge));
    assert_eq!(session.game().map(|g| g.kind()), Some(GameKind::SliceChallenge));

    session.back();
    assert_eq!(session.screen(), Screen::ChooseGame(Difficulty::Medium));
    assert!(session.choose_game(GameKind::PathFollowing));

    session.home();
    assert_eq!(session.screen(), Screen::ChooseDifficulty);
    assert!(session.game().is_none());
    assert_eq!(session.assistant_message(), GREETING);
}

#[test]
fn test_motivation_every_third_level() {
    let echo = Echo::new(Ok("Bravissimo!"));
    let mut session = Session::with_generator(8, GameConfig::default(), echo);
    session.choose_difficulty(Difficulty::Easy);
    session.choose_game(GameKind::Discrimination);
    assert_eq!(session.assistant_message(), "Bravissimo!");

    for _ in 0..6 {
        let odd = odd_option(&session);
        assert_eq!(
            session.handle(Input::Select(odd)),
            vec![Verdict::Success { points: 10 }]
        );
    }
    assert_eq!(session.score(), 60);
    assert_eq!(session.level(), 7);

    // One instruction, then motivation after levels 3 and 6
    let prompts = session.narrator().generator().prompts.borrow().clone();
    assert_eq!(prompts.len(), 3);
    assert!(prompts[0].text.contains("DISCRIMINATION"));
    assert!(prompts[1].text.contains("livello 3"));
    assert!(prompts[1].text.contains("punteggio di 30"));
    assert!(prompts[2].text.contains("livello 6"));
    assert!(prompts[2].text.contains("punteggio di 60"));
    assert_eq!(prompts[2].temperature, Some(0.8));
}

#[test]
fn test_failed_generation_falls_back() {
    let echo = Echo::new(Err(()));
    let mut session = Session::with_generator(9, GameConfig::default(), echo);
    session.choose_difficulty(Difficulty::Easy);
    session.choose_game(GameKind::Discrimination);
    assert_eq!(session.assistant_message(), INSTRUCTION_ON_ERROR);

    for _ in 0..3 {
        let odd = odd_option(&session);
        session.handle(Input::Select(odd));
    }
    session.back();
    assert_eq!(session.assistant_message(), MOTIVATION_ON_ERROR);
}

#[test]
fn test_feedback_banner_lifecycle() {
    let mut session = Session::new(10);
    session.choose_difficulty(Difficulty::Easy);
    session.choose_game(GameKind::Discrimination);

    let odd = odd_option(&session);
    let wrong = (0..4).find(|&id| id != odd).unwrap();
    session.handle(Input::Select(wrong));
    let banner = session.feedback().copied().unwrap();
    assert_eq!(banner.kind, FeedbackKind::Error);
    assert_eq!(banner.message, FAILURE_MESSAGE);

    session.advance(1000.0);
    assert!(session.feedback().is_some());

    let odd = odd_option(&session);
    session.handle(Input::Select(odd));
    assert_eq!(session.feedback().unwrap().message, SUCCESS_MESSAGE);

    // Each frame is clamped, so one huge delta does not clear the banner
    session.advance(60_000.0);
    assert!(session.feedback().is_some());
    for _ in 0..8 {
        session.advance(250.0);
    }
    assert!(session.feedback().is_none());
}

#[test]
fn test_tap_path_through_session() {
    let mut session = Session::new(11);
    session.choose_difficulty(Difficulty::Medium);
    session.choose_game(GameKind::PathFollowing);

    let nodes = node_positions(&session);
    assert_eq!(nodes.len(), 4);

    let mut verdicts = Vec::new();
    for (id, _) in &nodes {
        verdicts.extend(session.handle(Input::Select(*id as usize)));
    }
    assert_eq!(
        verdicts,
        vec![
            Verdict::Progress,
            Verdict::Progress,
            Verdict::Progress,
            Verdict::Success { points: 25 },
        ]
    );
    assert_eq!(session.score(), 25);
    assert_eq!(node_positions(&session).len(), 5);
}

#[test]
fn test_drag_path_release_early_fails() {
    let mut config = GameConfig::default();
    config.path.variant = PathVariant::Drag;
    let mut session = Session::with_generator(12, config, OfflineGenerator);
    session.choose_difficulty(Difficulty::Medium);
    session.choose_game(GameKind::PathFollowing);

    let nodes = node_positions(&session);
    assert_eq!(
        session.handle(Input::PointerDown(nodes[0].1)),
        vec![Verdict::Progress]
    );
    assert_eq!(
        session.handle(Input::PointerUp(nodes[0].1)),
        vec![Verdict::Failure]
    );
    assert_eq!(session.feedback().unwrap().kind, FeedbackKind::Error);
    assert_eq!(session.score(), 0);
}

#[test]
fn test_slice_game_spawns_and_stops() {
    let mut session = Session::new(13);
    session.choose_difficulty(Difficulty::Medium);
    session.choose_game(GameKind::SliceChallenge);

    for _ in 0..4 {
        session.advance(250.0);
    }
    let targets = session.snapshot()["game"]["world"]["targets"]
        .as_array()
        .map(|t| t.len())
        .unwrap_or(0);
    assert_eq!(targets, 1);

    session.back();
    assert!(session.snapshot()["game"].is_null());
}

#[test]
fn test_config_from_json_feeds_session() {
    let config = GameConfig::from_json(r#"{ "feedback_ms": 500.0 }"#).unwrap();
    assert_eq!(config.feedback_ms, 500.0);

    let mut session = Session::with_generator(14, config, OfflineGenerator);
    session.choose_difficulty(Difficulty::Easy);
    session.choose_game(GameKind::Spatial);
    session.handle(Input::Select(0));
    session.handle(Input::Select(1));
    assert!(session.feedback().is_some());
    session.advance(250.0);
    session.advance(250.0);
    assert!(session.feedback().is_none());

    assert!(GameConfig::from_json("{ not json").is_err());
}
