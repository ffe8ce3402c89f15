//! Time-driven scheduling without callbacks
//!
//! Games never register closures with the host event loop. The host reports
//! elapsed time and the game asks its timers what became due. Cancelling a
//! timer (or invalidating a token) guarantees nothing fires afterwards.

use serde::Serialize;

/// Fixed-rate repeating timer
#[derive(Debug, Clone, Serialize)]
pub struct Interval {
    period_ms: f32,
    accumulated_ms: f32,
    cancelled: bool,
}

impl Interval {
    pub fn new(period_ms: f32) -> Self {
        Self {
            period_ms: period_ms.max(f32::EPSILON),
            accumulated_ms: 0.0,
            cancelled: false,
        }
    }

    /// Accumulate `elapsed_ms` and return how many periods completed, at most `max_fires`.
    ///
    /// Periods beyond `max_fires` are dropped rather than queued.
    pub fn advance(&mut self, elapsed_ms: f32, max_fires: u32) -> u32 {
        if self.cancelled || !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return 0;
        }
        self.accumulated_ms += elapsed_ms;

        let mut fires = 0;
        while self.accumulated_ms >= self.period_ms && fires < max_fires {
            self.accumulated_ms -= self.period_ms;
            fires += 1;
        }
        if fires == max_fires {
            self.accumulated_ms = self.accumulated_ms.min(self.period_ms);
        }
        fires
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.accumulated_ms = 0.0;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Identifies one scheduling generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CancelToken(u64);

/// Hands out tokens; `cancel_all` invalidates every token issued so far
#[derive(Debug, Clone, Default, Serialize)]
pub struct TokenSource {
    generation: u64,
}

impl TokenSource {
    pub fn current(&self) -> CancelToken {
        CancelToken(self.generation)
    }

    /// Invalidate all outstanding tokens and return a fresh one
    pub fn cancel_all(&mut self) -> CancelToken {
        self.generation += 1;
        self.current()
    }

    pub fn is_live(&self, token: CancelToken) -> bool {
        token.0 == self.generation
    }
}

/// What a delay did during one `advance`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DelayState {
    Pending,
    /// Fired; carries the time left over past the deadline
    Elapsed { overflow_ms: f32 },
    /// Its token was invalidated; it will never fire
    Cancelled,
}

/// One-shot delay bound to a cancellation token
#[derive(Debug, Clone, Serialize)]
pub struct Delay {
    remaining_ms: f32,
    token: CancelToken,
}

impl Delay {
    pub fn new(duration_ms: f32, token: CancelToken) -> Self {
        Self {
            remaining_ms: duration_ms.max(0.0),
            token,
        }
    }

    pub fn remaining_ms(&self) -> f32 {
        self.remaining_ms
    }

    pub fn advance(&mut self, elapsed_ms: f32, tokens: &TokenSource) -> DelayState {
        if !tokens.is_live(self.token) {
            return DelayState::Cancelled;
        }
        self.remaining_ms -= elapsed_ms.max(0.0);
        if self.remaining_ms <= 0.0 {
            DelayState::Elapsed {
                overflow_ms: -self.remaining_ms,
            }
        } else {
            DelayState::Pending
        }
    }
}
