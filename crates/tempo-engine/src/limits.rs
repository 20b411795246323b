//! Search budget: maximum depth and wall-clock time.

use std::time::Duration;

use crate::error::EngineError;

/// How deep and how long a search may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Deepest iteration to attempt, in plies. Must be at least 1.
    pub max_depth: u8,
    /// Wall-clock budget measured from the start of the search.
    pub max_time: Duration,
}

impl SearchLimits {
    pub const DEFAULT_DEPTH: u8 = 5;
    pub const DEFAULT_TIME: Duration = Duration::from_millis(5_000);

    pub const fn new(max_depth: u8, max_time: Duration) -> Self {
        Self { max_depth, max_time }
    }

    pub const fn with_depth(self, max_depth: u8) -> Self {
        Self { max_depth, ..self }
    }

    pub const fn with_time(self, max_time: Duration) -> Self {
        Self { max_time, ..self }
    }

    /// Reject a zero depth, which would never complete an iteration.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_depth == 0 {
            return Err(EngineError::InvalidDepth);
        }
        Ok(())
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DEPTH, Self::DEFAULT_TIME)
    }
}
