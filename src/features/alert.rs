//! The nth-prime result alert value.

use serde::{Deserialize, Serialize};

/// Alert shown once an nth-prime lookup resolves successfully.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimeAlert {
    pub n: i64,
    pub prime: i64,
}

impl PrimeAlert {
    pub fn new(n: i64, prime: i64) -> Self {
        Self { n, prime }
    }

    pub fn title(&self) -> String {
        format!("The {} prime is {}", ordinal(self.n), self.prime)
    }
}

/// Render `n` with its English ordinal suffix.
pub fn ordinal(n: i64) -> String {
    let suffix = match (n.abs() % 10, n.abs() % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}
