//! Local prime arithmetic and the offline nth-prime lookup.

use crate::effect::Effect;
use std::sync::Arc;

/// Numeric-lookup capability: resolve the nth prime, or `None` when the
/// value could not be computed. The remote collaborator stays external;
/// this alias is its injection point in an environment.
pub type NthPrime = Arc<dyn Fn(i64) -> Effect<Option<i64>> + Send + Sync>;

pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut divisor = 3;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// The nth prime counted from `nth_prime(1) == 2`; `None` for n < 1.
pub fn nth_prime(n: i64) -> Option<i64> {
    if n < 1 {
        return None;
    }
    let mut remaining = n;
    let mut candidate = 1_i64;
    while remaining > 0 {
        candidate += 1;
        if is_prime(candidate) {
            remaining -= 1;
        }
    }
    Some(candidate)
}

/// Offline lookup effect; the computation runs on a blocking task.
pub fn offline_nth_prime(n: i64) -> Effect<Option<i64>> {
    Effect::try_future(async move { Ok(tokio::task::spawn_blocking(move || nth_prime(n)).await?) })
}
