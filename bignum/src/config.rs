use serde::{Deserialize, Serialize};

/// Tuning for [`BigNum::is_probable_prime`](crate::BigNum::is_probable_prime).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimalityConfig {
    /// Random-base Miller-Rabin rounds. A base-2 round is always added.
    pub reps: usize,
    /// Highest Lucas parameter `P` to try; `0` leaves only the built-in cap.
    pub lucas_limit: u64,
}

impl Default for PrimalityConfig {
    fn default() -> Self {
        Self {
            reps: 20,
            lucas_limit: 0,
        }
    }
}
