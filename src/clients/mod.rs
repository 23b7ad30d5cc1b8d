//! Interface-level collaborators injected through environments.
//!
//! Everything here is expressed as effect-returning function values so
//! reducers stay pure and tests can substitute closures.

mod file;
mod primes;

pub use file::FileClient;
pub use primes::{is_prime, nth_prime, offline_nth_prime, NthPrime};
