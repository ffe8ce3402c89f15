//! Sequence memory: watch the pads light up, then repeat the sequence
//!
//! Playback is an explicit state machine driven by elapsed time:
//!
//! ```text
//! Paused{0} --lead_in--> Showing(0) --show--> Paused{1} --gap--> Showing(1) ... Paused{len} --> AcceptingInput
//! ```
//!
//! Restarting playback invalidates the previous token, so a half-finished
//! replay can never leak highlights into a newer round.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::config::MemoryTiming;
use crate::consts::MEMORY_POINTS;
use crate::sim::state::reported;
use crate::sim::{
    CancelToken, Delay, DelayState, GameKind, Input, MEMORY_PADS, MiniGame, TokenSource, Verdict,
    memory_sequence,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaybackState {
    /// Not started or cancelled
    Idle,
    /// Dark pause before showing step `next` (or before accepting input once `next == len`)
    Paused { next: usize },
    /// Step `index` of the sequence is lit
    Showing(usize),
    /// Replay finished, taps are accepted
    AcceptingInput,
}

/// Cancellable replay of a sequence
#[derive(Debug, Clone, Serialize)]
pub struct Playback {
    state: PlaybackState,
    delay: Option<Delay>,
    tokens: TokenSource,
    timing: MemoryTiming,
}

impl Playback {
    pub fn new(timing: MemoryTiming) -> Self {
        Self {
            state: PlaybackState::Idle,
            delay: None,
            tokens: TokenSource::default(),
            timing,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Token of the replay currently running
    pub fn token(&self) -> CancelToken {
        self.tokens.current()
    }

    pub fn is_live(&self, token: CancelToken) -> bool {
        self.tokens.is_live(token)
    }

    /// Start a new replay, invalidating any replay in flight
    pub fn start(&mut self) -> CancelToken {
        let token = self.tokens.cancel_all();
        self.state = PlaybackState::Paused { next: 0 };
        self.delay = Some(Delay::new(self.timing.lead_in_ms, token));
        token
    }

    pub fn cancel(&mut self) {
        self.tokens.cancel_all();
        self.state = PlaybackState::Idle;
        self.delay = None;
    }

    pub fn accepting_input(&self) -> bool {
        self.state == PlaybackState::AcceptingInput
    }

    /// Advance through as many transitions as `elapsed_ms` covers
    pub fn advance(&mut self, elapsed_ms: f32, len: usize) {
        let mut budget = elapsed_ms;
        while let Some(delay) = self.delay.as_mut() {
            match delay.advance(budget, &self.tokens) {
                DelayState::Pending => return,
                DelayState::Cancelled => {
                    self.delay = None;
                    return;
                }
                DelayState::Elapsed { overflow_ms } => {
                    budget = overflow_ms;
                    self.transition(len);
                }
            }
        }
    }

    fn transition(&mut self, len: usize) {
        let token = self.tokens.current();
        match self.state {
            PlaybackState::Paused { next } if next < len => {
                self.state = PlaybackState::Showing(next);
                self.delay = Some(Delay::new(self.timing.show_ms, token));
            }
            PlaybackState::Paused { .. } => {
                self.state = PlaybackState::AcceptingInput;
                self.delay = None;
            }
            PlaybackState::Showing(index) => {
                self.state = PlaybackState::Paused { next: index + 1 };
                self.delay = Some(Delay::new(self.timing.gap_ms, token));
            }
            PlaybackState::Idle | PlaybackState::AcceptingInput => {
                self.delay = None;
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemoryGame {
    level: u32,
    sequence: Vec<usize>,
    entered: Vec<usize>,
    playback: Playback,
    #[serde(skip)]
    rng: Pcg32,
}

impl MemoryGame {
    pub fn new(seed: u64, timing: MemoryTiming) -> Self {
        let mut game = Self {
            level: 1,
            sequence: Vec::new(),
            entered: Vec::new(),
            playback: Playback::new(timing),
            rng: Pcg32::seed_from_u64(seed),
        };
        game.start_level();
        game
    }

    /// Fresh sequence for the current level, then replay it
    fn start_level(&mut self) {
        self.sequence = memory_sequence(&mut self.rng, self.level);
        self.entered.clear();
        self.playback.start();
        log::debug!("Memory level {}: {:?}", self.level, self.sequence);
    }

    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    /// Whether the sequence is still being shown (taps are ignored)
    pub fn is_replaying(&self) -> bool {
        !self.playback.accepting_input()
    }

    /// Pad currently lit by the replay
    pub fn highlighted(&self) -> Option<usize> {
        match self.playback.state() {
            PlaybackState::Showing(index) => self.sequence.get(index).copied(),
            _ => None,
        }
    }

    /// (taps entered, sequence length)
    pub fn progress(&self) -> (usize, usize) {
        (self.entered.len(), self.sequence.len())
    }

    /// Tap a pad. Ignored while the sequence is replaying.
    pub fn tap(&mut self, pad: usize) -> Verdict {
        if self.is_replaying() || pad >= MEMORY_PADS.len() {
            return Verdict::Ignored;
        }

        let position = self.entered.len();
        if self.sequence.get(position) != Some(&pad) {
            self.start_level();
            return Verdict::Failure;
        }

        self.entered.push(pad);
        if self.entered.len() < self.sequence.len() {
            return Verdict::Progress;
        }

        self.level += 1;
        self.start_level();
        Verdict::Success {
            points: MEMORY_POINTS,
        }
    }
}

impl MiniGame for MemoryGame {
    fn kind(&self) -> GameKind {
        GameKind::Memory
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn handle(&mut self, input: Input) -> Vec<Verdict> {
        match input {
            Input::Select(pad) => reported(self.tap(pad)),
            _ => Vec::new(),
        }
    }

    fn advance(&mut self, elapsed_ms: f32) -> Vec<Verdict> {
        self.playback.advance(elapsed_ms, self.sequence.len());
        Vec::new()
    }

    fn stop(&mut self) {
        self.playback.cancel();
    }

    fn view(&self) -> serde_json::Value {
        let mut view = serde_json::to_value(self).unwrap_or_default();
        if let Some(map) = view.as_object_mut() {
            map.insert("highlighted".into(), serde_json::json!(self.highlighted()));
            map.insert("replaying".into(), serde_json::json!(self.is_replaying()));
        }
        view
    }
}
