//! Assistant text: motivation after level-ups and per-game instructions
//!
//! Generation goes through a [`TextGenerator`]. Every call is best effort:
//! failures and empty replies map to fixed Italian fallbacks and never reach
//! the player.

use serde::Serialize;
use thiserror::Error;

pub const MOTIVATION_ON_ERROR: &str = "Sei stato bravissimo! Continua così!";
pub const MOTIVATION_ON_EMPTY: &str = "Ottimo lavoro, piccolo esploratore!";
pub const INSTRUCTION_ON_ERROR: &str = "Pronto per la sfida? Cominciamo!";
pub const INSTRUCTION_ON_EMPTY: &str = "Usa i tuoi occhi magici per trovare le forme!";

#[derive(Debug, Error)]
pub enum TextGenError {
    #[error("text generation unavailable")]
    Unavailable,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("empty response")]
    Empty,
}

/// A single generation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prompt {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

impl Prompt {
    pub fn motivation(score: u32, level: u32) -> Self {
        Self {
            text: format!(
                "Sei un simpatico gufo magico di nome Gemi. Un bambino ha appena completato \
                 il livello {level} con un punteggio di {score}. Scrivi un brevissimo messaggio \
                 di incoraggiamento (massimo 15 parole) in italiano, molto allegro e giocoso."
            ),
            temperature: Some(0.8),
            top_p: Some(0.9),
        }
    }

    pub fn instruction(game_label: &str) -> Self {
        Self {
            text: format!(
                "Descrivi brevemente come giocare a un gioco di {game_label} per un bambino \
                 di 6 anni. Sii magico e divertente. Massimo 20 parole."
            ),
            temperature: None,
            top_p: None,
        }
    }
}

pub trait TextGenerator {
    fn generate(&self, prompt: &Prompt) -> Result<String, TextGenError>;
}

impl<G: TextGenerator + ?Sized> TextGenerator for Box<G> {
    fn generate(&self, prompt: &Prompt) -> Result<String, TextGenError> {
        (**self).generate(prompt)
    }
}

/// Generator used when no service is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGenerator;

impl TextGenerator for OfflineGenerator {
    fn generate(&self, _prompt: &Prompt) -> Result<String, TextGenError> {
        Err(TextGenError::Unavailable)
    }
}

/// Wraps a generator with the fallback policy
#[derive(Debug, Clone, Default)]
pub struct Narrator<G> {
    generator: G,
}

impl<G: TextGenerator> Narrator<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn motivation(&self, score: u32, level: u32) -> String {
        self.best_effort(
            &Prompt::motivation(score, level),
            MOTIVATION_ON_ERROR,
            MOTIVATION_ON_EMPTY,
        )
    }

    pub fn instruction(&self, game_label: &str) -> String {
        self.best_effort(
            &Prompt::instruction(game_label),
            INSTRUCTION_ON_ERROR,
            INSTRUCTION_ON_EMPTY,
        )
    }

    fn best_effort(&self, prompt: &Prompt, on_error: &str, on_empty: &str) -> String {
        let reply = self.generator.generate(prompt).and_then(|text| {
            let text = text.trim();
            if text.is_empty() {
                Err(TextGenError::Empty)
            } else {
                Ok(text.to_string())
            }
        });
        match reply {
            Ok(text) => text,
            Err(TextGenError::Empty) => on_empty.to_string(),
            Err(TextGenError::Unavailable) => {
                log::debug!("Text generation offline, using fallback");
                on_error.to_string()
            }
            Err(e) => {
                log::warn!("Text generation failed: {}", e);
                on_error.to_string()
            }
        }
    }
}
