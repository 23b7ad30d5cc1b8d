//! The prime detail modal: save or remove the current count as a favorite.

use crate::effect::Effect;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimeModalState {
    pub count: i64,
    pub favorite_primes: Vec<i64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimeModalAction {
    SaveFavoritePrimeTapped,
    RemoveFavoritePrimeTapped,
}

pub fn prime_modal_reducer(
    state: &mut PrimeModalState,
    action: PrimeModalAction,
    _environment: &(),
) -> Vec<Effect<PrimeModalAction>> {
    match action {
        PrimeModalAction::SaveFavoritePrimeTapped => {
            state.favorite_primes.push(state.count);
        }
        PrimeModalAction::RemoveFavoritePrimeTapped => {
            let count = state.count;
            state.favorite_primes.retain(|&prime| prime != count);
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_appends_current_count() {
        let mut state = PrimeModalState {
            count: 2,
            favorite_primes: vec![3, 5],
        };
        let effects =
            prime_modal_reducer(&mut state, PrimeModalAction::SaveFavoritePrimeTapped, &());
        assert_eq!(state.favorite_primes, vec![3, 5, 2]);
        assert!(effects.is_empty());
    }

    #[test]
    fn remove_drops_all_occurrences_of_current_count() {
        let mut state = PrimeModalState {
            count: 5,
            favorite_primes: vec![3, 5, 2, 5],
        };
        let effects =
            prime_modal_reducer(&mut state, PrimeModalAction::RemoveFavoritePrimeTapped, &());
        assert_eq!(state.favorite_primes, vec![3, 2]);
        assert!(effects.is_empty());
    }
}
