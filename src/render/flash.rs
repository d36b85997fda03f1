use std::time::{Duration, Instant};

/// How long the start banner stays up
pub const START_FLASH: Duration = Duration::from_millis(900);

/// How long the score stays highlighted after a meal
pub const SCORE_POP: Duration = Duration::from_millis(250);

/// A short-lived banner drawn above the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub text: String,
    until: Instant,
}

impl Flash {
    pub fn new(text: impl Into<String>, duration: Duration, now: Instant) -> Self {
        Self {
            text: text.into(),
            until: now + duration,
        }
    }

    pub fn is_active(&self, now: Instant) -> bool {
        now < self.until
    }

    pub fn until(&self) -> Instant {
        self.until
    }
}
