//! The counter feature and its composed view reducer.
//!
//! `counter_reducer` owns the count and the nth-prime request lifecycle;
//! the view-level state and reducer additionally pull in the prime detail
//! modal, composed with the same `combine`/`pullback` machinery the
//! application root uses.

use crate::clients::NthPrime;
use crate::effect::Effect;
use crate::features::alert::PrimeAlert;
use crate::features::prime_modal::{prime_modal_reducer, PrimeModalAction, PrimeModalState};
use crate::reducer::{combine, pullback, Lens, Prism, Reducer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CounterState {
    pub alert_nth_prime: Option<PrimeAlert>,
    pub count: i64,
    pub is_nth_prime_request_in_flight: bool,
    pub is_prime_detail_shown: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CounterAction {
    DecrementTapped,
    IncrementTapped,
    NthPrimeButtonTapped,
    NthPrimeResponse { n: i64, prime: Option<i64> },
    AlertDismissTapped,
    PrimeDetailTapped,
    PrimeDetailDismissed,
}

#[derive(Clone)]
pub struct CounterEnvironment {
    pub nth_prime: NthPrime,
}

pub fn counter_reducer(
    state: &mut CounterState,
    action: CounterAction,
    environment: &CounterEnvironment,
) -> Vec<Effect<CounterAction>> {
    match action {
        CounterAction::DecrementTapped => {
            state.count -= 1;
            Vec::new()
        }
        CounterAction::IncrementTapped => {
            state.count += 1;
            Vec::new()
        }
        CounterAction::NthPrimeButtonTapped => {
            state.is_nth_prime_request_in_flight = true;
            let n = state.count;
            vec![(environment.nth_prime)(n)
                .map(move |prime| CounterAction::NthPrimeResponse { n, prime })]
        }
        CounterAction::NthPrimeResponse { n, prime } => {
            state.alert_nth_prime = prime.map(|prime| PrimeAlert::new(n, prime));
            state.is_nth_prime_request_in_flight = false;
            Vec::new()
        }
        CounterAction::AlertDismissTapped => {
            state.alert_nth_prime = None;
            Vec::new()
        }
        CounterAction::PrimeDetailTapped => {
            state.is_prime_detail_shown = true;
            Vec::new()
        }
        CounterAction::PrimeDetailDismissed => {
            state.is_prime_detail_shown = false;
            Vec::new()
        }
    }
}

/// Everything the counter screen shows: the counter itself plus the prime
/// detail modal's favorites.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CounterFeatureState {
    pub alert_nth_prime: Option<PrimeAlert>,
    pub count: i64,
    pub favorite_primes: Vec<i64>,
    pub is_nth_prime_request_in_flight: bool,
    pub is_prime_detail_shown: bool,
}

impl CounterFeatureState {
    pub fn counter_lens() -> Lens<CounterFeatureState, CounterState> {
        Lens::new(
            |state: &CounterFeatureState| CounterState {
                alert_nth_prime: state.alert_nth_prime,
                count: state.count,
                is_nth_prime_request_in_flight: state.is_nth_prime_request_in_flight,
                is_prime_detail_shown: state.is_prime_detail_shown,
            },
            |state: &mut CounterFeatureState, counter: CounterState| {
                state.alert_nth_prime = counter.alert_nth_prime;
                state.count = counter.count;
                state.is_nth_prime_request_in_flight = counter.is_nth_prime_request_in_flight;
                state.is_prime_detail_shown = counter.is_prime_detail_shown;
            },
        )
    }

    pub fn prime_modal_lens() -> Lens<CounterFeatureState, PrimeModalState> {
        Lens::new(
            |state: &CounterFeatureState| PrimeModalState {
                count: state.count,
                favorite_primes: state.favorite_primes.clone(),
            },
            |state: &mut CounterFeatureState, modal: PrimeModalState| {
                state.count = modal.count;
                state.favorite_primes = modal.favorite_primes;
            },
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CounterFeatureAction {
    Counter(CounterAction),
    PrimeModal(PrimeModalAction),
}

impl CounterFeatureAction {
    pub fn counter_prism() -> Prism<CounterFeatureAction, CounterAction> {
        Prism::new(
            |action: &CounterFeatureAction| match action {
                CounterFeatureAction::Counter(action) => Some(action.clone()),
                CounterFeatureAction::PrimeModal(_) => None,
            },
            CounterFeatureAction::Counter,
        )
    }

    pub fn prime_modal_prism() -> Prism<CounterFeatureAction, PrimeModalAction> {
        Prism::new(
            |action: &CounterFeatureAction| match action {
                CounterFeatureAction::PrimeModal(action) => Some(*action),
                CounterFeatureAction::Counter(_) => None,
            },
            CounterFeatureAction::PrimeModal,
        )
    }
}

pub fn counter_feature_reducer(
) -> Reducer<CounterFeatureState, CounterFeatureAction, CounterEnvironment> {
    let counter: Reducer<CounterState, CounterAction, CounterEnvironment> =
        Arc::new(counter_reducer);
    let prime_modal: Reducer<PrimeModalState, PrimeModalAction, ()> =
        Arc::new(prime_modal_reducer);
    combine(vec![
        pullback(
            counter,
            CounterFeatureState::counter_lens(),
            CounterFeatureAction::counter_prism(),
            |environment: &CounterEnvironment| environment.clone(),
        ),
        pullback(
            prime_modal,
            CounterFeatureState::prime_modal_lens(),
            CounterFeatureAction::prime_modal_prism(),
            |_: &CounterEnvironment| (),
        ),
    ])
}
