use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_TOP_K: usize = 2;

/// Upper bound on the number of results a query returns. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopK(usize);

impl TopK {
    pub fn new(value: usize) -> Result<Self, String> {
        if value == 0 {
            return Err("k must be a positive integer, got 0".to_string());
        }
        Ok(TopK(value))
    }

    /// Builds a `TopK` from a configured value, raising anything below 1 to 1.
    pub fn clamped(value: usize) -> Self {
        TopK(value.max(1))
    }

    pub fn value(&self) -> usize {
        self.0
    }
}

impl fmt::Display for TopK {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for TopK {
    fn default() -> Self {
        TopK(DEFAULT_TOP_K)
    }
}
