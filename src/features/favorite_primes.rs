//! The favorite primes list: persistence and nth-prime lookups.

use crate::clients::{FileClient, NthPrime};
use crate::effect::{Effect, EffectError};
use crate::features::alert::PrimeAlert;
use serde::{Deserialize, Serialize};

/// Name of the persisted favorites blob. The layout is a JSON array of
/// integers with no version field: whatever was last saved in this exact
/// shape is what loads back.
pub const FAVORITES_FILE: &str = "favorite-primes.json";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoritePrimesState {
    pub alert_nth_prime: Option<PrimeAlert>,
    pub favorite_primes: Vec<i64>,
    pub is_nth_prime_request_in_flight: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FavoritePrimesAction {
    /// Ascending, unique indices into the current list.
    DeleteFavoritePrimes(Vec<usize>),
    LoadButtonTapped,
    LoadedFavoritePrimes(Vec<i64>),
    PrimeButtonTapped(i64),
    SaveButtonTapped,
    NthPrimeResponse { n: i64, prime: Option<i64> },
    AlertDismissTapped,
}

#[derive(Clone)]
pub struct FavoritePrimesEnvironment {
    pub file_client: FileClient,
    pub nth_prime: NthPrime,
}

pub fn favorite_primes_reducer(
    state: &mut FavoritePrimesState,
    action: FavoritePrimesAction,
    environment: &FavoritePrimesEnvironment,
) -> Vec<Effect<FavoritePrimesAction>> {
    match action {
        FavoritePrimesAction::DeleteFavoritePrimes(mut indices) => {
            indices.sort_unstable();
            indices.dedup();
            for index in indices.into_iter().rev() {
                state.favorite_primes.remove(index);
            }
            Vec::new()
        }

        FavoritePrimesAction::LoadedFavoritePrimes(favorite_primes) => {
            state.favorite_primes = favorite_primes;
            Vec::new()
        }

        FavoritePrimesAction::SaveButtonTapped => match serde_json::to_vec(&state.favorite_primes)
        {
            Ok(bytes) => vec![environment
                .file_client
                .save(FAVORITES_FILE, bytes)
                .fire_and_forget()],
            Err(error) => {
                tracing::warn!(error = %error, "favorites could not be encoded, save skipped");
                Vec::new()
            }
        },

        FavoritePrimesAction::LoadButtonTapped => vec![environment
            .file_client
            .load(FAVORITES_FILE)
            .compact()
            .try_map(|bytes| Ok(serde_json::from_slice::<Vec<i64>>(&bytes)?))
            .catch(|error: EffectError| {
                tracing::warn!(error = %error, "favorites could not be decoded, list unchanged");
                Effect::none()
            })
            .map(FavoritePrimesAction::LoadedFavoritePrimes)],

        FavoritePrimesAction::PrimeButtonTapped(n) => {
            state.is_nth_prime_request_in_flight = true;
            vec![(environment.nth_prime)(n)
                .map(move |prime| FavoritePrimesAction::NthPrimeResponse { n, prime })]
        }

        FavoritePrimesAction::NthPrimeResponse { n, prime } => {
            state.alert_nth_prime = prime.map(|prime| PrimeAlert::new(n, prime));
            state.is_nth_prime_request_in_flight = false;
            Vec::new()
        }

        FavoritePrimesAction::AlertDismissTapped => {
            state.alert_nth_prime = None;
            Vec::new()
        }
    }
}
