//! The application root: state, actions, environment, and the canonical
//! composed reducer.
//!
//! Feature reducers are lifted into the root domain with `pullback` and
//! merged with `combine`; the activity-feed and logging decorators wrap the
//! result, in that order, so every dispatch flows through one pipeline.

use crate::clients::{offline_nth_prime, FileClient, NthPrime};
use crate::features::activity_feed::{
    activity_feed_reducer, Activity, ActivityFeedAction, ActivityFeedState, ActivityKind,
};
use crate::features::alert::PrimeAlert;
use crate::features::counter::{
    counter_feature_reducer, CounterEnvironment, CounterFeatureAction, CounterFeatureState,
};
use crate::features::favorite_primes::{
    favorite_primes_reducer, FavoritePrimesAction, FavoritePrimesEnvironment, FavoritePrimesState,
};
use crate::features::prime_modal::PrimeModalAction;
use crate::reducer::{combine, logging, pullback, Lens, Prism, Reducer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Time source for derived log entries.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub count: i64,
    pub favorite_primes: Vec<i64>,
    pub activity_feed: Vec<Activity>,
    pub alert_nth_prime: Option<PrimeAlert>,
    pub is_nth_prime_request_in_flight: bool,
    pub is_prime_detail_shown: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AppAction {
    CounterView(CounterFeatureAction),
    OfflineCounterView(CounterFeatureAction),
    FavoritePrimes(FavoritePrimesAction),
    ActivityFeed(ActivityFeedAction),
}

#[derive(Clone)]
pub struct AppEnvironment {
    pub file_client: FileClient,
    pub nth_prime: NthPrime,
    pub offline_nth_prime: NthPrime,
    pub clock: Clock,
}

impl AppEnvironment {
    /// Environment wired to the local filesystem and the offline lookup.
    ///
    /// A remote lookup collaborator slots in by replacing `nth_prime`.
    pub fn live(storage_root: PathBuf) -> Self {
        Self {
            file_client: FileClient::live(storage_root),
            nth_prime: Arc::new(offline_nth_prime),
            offline_nth_prime: Arc::new(offline_nth_prime),
            clock: Arc::new(Utc::now),
        }
    }

    pub fn counter(&self) -> CounterEnvironment {
        CounterEnvironment {
            nth_prime: Arc::clone(&self.nth_prime),
        }
    }

    pub fn offline_counter(&self) -> CounterEnvironment {
        CounterEnvironment {
            nth_prime: Arc::clone(&self.offline_nth_prime),
        }
    }

    pub fn favorite_primes(&self) -> FavoritePrimesEnvironment {
        FavoritePrimesEnvironment {
            file_client: self.file_client.clone(),
            nth_prime: Arc::clone(&self.nth_prime),
        }
    }
}

impl AppState {
    pub fn counter_feature_lens() -> Lens<AppState, CounterFeatureState> {
        Lens::new(
            |state: &AppState| CounterFeatureState {
                alert_nth_prime: state.alert_nth_prime,
                count: state.count,
                favorite_primes: state.favorite_primes.clone(),
                is_nth_prime_request_in_flight: state.is_nth_prime_request_in_flight,
                is_prime_detail_shown: state.is_prime_detail_shown,
            },
            |state: &mut AppState, feature: CounterFeatureState| {
                state.alert_nth_prime = feature.alert_nth_prime;
                state.count = feature.count;
                state.favorite_primes = feature.favorite_primes;
                state.is_nth_prime_request_in_flight = feature.is_nth_prime_request_in_flight;
                state.is_prime_detail_shown = feature.is_prime_detail_shown;
            },
        )
    }

    pub fn favorite_primes_lens() -> Lens<AppState, FavoritePrimesState> {
        Lens::new(
            |state: &AppState| FavoritePrimesState {
                alert_nth_prime: state.alert_nth_prime,
                favorite_primes: state.favorite_primes.clone(),
                is_nth_prime_request_in_flight: state.is_nth_prime_request_in_flight,
            },
            |state: &mut AppState, feature: FavoritePrimesState| {
                state.alert_nth_prime = feature.alert_nth_prime;
                state.favorite_primes = feature.favorite_primes;
                state.is_nth_prime_request_in_flight = feature.is_nth_prime_request_in_flight;
            },
        )
    }

    pub fn activity_feed_lens() -> Lens<AppState, ActivityFeedState> {
        Lens::new(
            |state: &AppState| state.activity_feed.clone(),
            |state: &mut AppState, feed: ActivityFeedState| state.activity_feed = feed,
        )
    }
}

impl AppAction {
    pub fn counter_view_prism() -> Prism<AppAction, CounterFeatureAction> {
        Prism::new(
            |action: &AppAction| match action {
                AppAction::CounterView(action) => Some(action.clone()),
                _ => None,
            },
            AppAction::CounterView,
        )
    }

    pub fn offline_counter_view_prism() -> Prism<AppAction, CounterFeatureAction> {
        Prism::new(
            |action: &AppAction| match action {
                AppAction::OfflineCounterView(action) => Some(action.clone()),
                _ => None,
            },
            AppAction::OfflineCounterView,
        )
    }

    pub fn favorite_primes_prism() -> Prism<AppAction, FavoritePrimesAction> {
        Prism::new(
            |action: &AppAction| match action {
                AppAction::FavoritePrimes(action) => Some(action.clone()),
                _ => None,
            },
            AppAction::FavoritePrimes,
        )
    }

    pub fn activity_feed_prism() -> Prism<AppAction, ActivityFeedAction> {
        Prism::new(
            |action: &AppAction| match action {
                AppAction::ActivityFeed(action) => Some(action.clone()),
                _ => None,
            },
            AppAction::ActivityFeed,
        )
    }
}

/// Derive activity-feed entries from favorites changes.
///
/// For the closed trigger set — saving a favorite, removing a favorite,
/// deleting favorites at indices — appends exactly one classified entry per
/// trigger, reading the pre-mutation state, then delegates. Every other
/// action passes through untouched, as does the wrapped reducer's effect
/// list.
pub fn record_activity(
    reducer: Reducer<AppState, AppAction, AppEnvironment>,
) -> Reducer<AppState, AppAction, AppEnvironment> {
    Arc::new(move |state, action, environment| {
        match &action {
            AppAction::CounterView(CounterFeatureAction::PrimeModal(
                PrimeModalAction::SaveFavoritePrimeTapped,
            ))
            | AppAction::OfflineCounterView(CounterFeatureAction::PrimeModal(
                PrimeModalAction::SaveFavoritePrimeTapped,
            )) => {
                let entry = Activity::new(
                    (environment.clock)(),
                    ActivityKind::AddedFavoritePrime(state.count),
                );
                state.activity_feed.push(entry);
            }

            AppAction::CounterView(CounterFeatureAction::PrimeModal(
                PrimeModalAction::RemoveFavoritePrimeTapped,
            ))
            | AppAction::OfflineCounterView(CounterFeatureAction::PrimeModal(
                PrimeModalAction::RemoveFavoritePrimeTapped,
            )) => {
                let entry = Activity::new(
                    (environment.clock)(),
                    ActivityKind::RemovedFavoritePrime(state.count),
                );
                state.activity_feed.push(entry);
            }

            AppAction::FavoritePrimes(FavoritePrimesAction::DeleteFavoritePrimes(indices)) => {
                for &index in indices {
                    let entry = Activity::new(
                        (environment.clock)(),
                        ActivityKind::RemovedFavoritePrime(state.favorite_primes[index]),
                    );
                    state.activity_feed.push(entry);
                }
            }

            _ => {}
        }
        reducer(state, action, environment)
    })
}

/// The canonical root reducer pipeline.
pub fn app_reducer() -> Reducer<AppState, AppAction, AppEnvironment> {
    let favorite_primes: Reducer<FavoritePrimesState, FavoritePrimesAction, FavoritePrimesEnvironment> =
        Arc::new(favorite_primes_reducer);
    let activity_feed: Reducer<ActivityFeedState, ActivityFeedAction, ()> =
        Arc::new(activity_feed_reducer);

    let combined = combine(vec![
        pullback(
            counter_feature_reducer(),
            AppState::counter_feature_lens(),
            AppAction::counter_view_prism(),
            AppEnvironment::counter,
        ),
        pullback(
            counter_feature_reducer(),
            AppState::counter_feature_lens(),
            AppAction::offline_counter_view_prism(),
            AppEnvironment::offline_counter,
        ),
        pullback(
            favorite_primes,
            AppState::favorite_primes_lens(),
            AppAction::favorite_primes_prism(),
            AppEnvironment::favorite_primes,
        ),
        pullback(
            activity_feed,
            AppState::activity_feed_lens(),
            AppAction::activity_feed_prism(),
            |_: &AppEnvironment| (),
        ),
    ]);

    logging(record_activity(combined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Effect;
    use crate::features::counter::CounterAction;
    use crate::store::Store;

    fn test_environment(loaded: Option<Vec<u8>>, prime: Option<i64>) -> AppEnvironment {
        let lookup: NthPrime = Arc::new(move |_| Effect::sync(move || prime));
        AppEnvironment {
            file_client: FileClient::from_fns(
                move |_| {
                    let loaded = loaded.clone();
                    Effect::sync(move || loaded)
                },
                |_, _| Effect::sync(|| ()),
            ),
            nth_prime: Arc::clone(&lookup),
            offline_nth_prime: lookup,
            clock: Arc::new(|| DateTime::UNIX_EPOCH),
        }
    }

    fn feed_kinds(state: &AppState) -> Vec<ActivityKind> {
        state.activity_feed.iter().map(|entry| entry.kind).collect()
    }

    #[tokio::test]
    async fn integration_flow_matches_original_suite() {
        let store = Store::new(
            AppState {
                count: 4,
                ..Default::default()
            },
            app_reducer(),
            test_environment(Some(b"[2,31,7]".to_vec()), Some(17)),
        );

        store.send(AppAction::CounterView(CounterFeatureAction::Counter(
            CounterAction::NthPrimeButtonTapped,
        )));
        assert!(store.state().is_nth_prime_request_in_flight);

        store.settle().await;
        let state = store.state();
        assert!(!state.is_nth_prime_request_in_flight);
        assert_eq!(state.alert_nth_prime, Some(PrimeAlert::new(4, 17)));

        store.send(AppAction::FavoritePrimes(
            FavoritePrimesAction::LoadButtonTapped,
        ));
        store.settle().await;
        assert_eq!(store.state().favorite_primes, vec![2, 31, 7]);
    }

    #[test]
    fn saving_then_removing_records_two_activities() {
        let reducer = app_reducer();
        let env = test_environment(None, None);
        let mut state = AppState {
            count: 2,
            favorite_primes: vec![3, 5],
            ..Default::default()
        };

        reducer(
            &mut state,
            AppAction::CounterView(CounterFeatureAction::PrimeModal(
                PrimeModalAction::SaveFavoritePrimeTapped,
            )),
            &env,
        );
        assert_eq!(state.favorite_primes, vec![3, 5, 2]);

        reducer(
            &mut state,
            AppAction::CounterView(CounterFeatureAction::PrimeModal(
                PrimeModalAction::RemoveFavoritePrimeTapped,
            )),
            &env,
        );
        assert_eq!(state.favorite_primes, vec![3, 5]);

        assert_eq!(
            feed_kinds(&state),
            vec![
                ActivityKind::AddedFavoritePrime(2),
                ActivityKind::RemovedFavoritePrime(2),
            ]
        );
    }

    #[test]
    fn deleting_a_favorite_records_its_removal() {
        let reducer = app_reducer();
        let env = test_environment(None, None);
        let mut state = AppState {
            favorite_primes: vec![2, 31, 7],
            ..Default::default()
        };

        reducer(
            &mut state,
            AppAction::FavoritePrimes(FavoritePrimesAction::DeleteFavoritePrimes(vec![0])),
            &env,
        );

        assert_eq!(state.favorite_primes, vec![31, 7]);
        assert_eq!(feed_kinds(&state), vec![ActivityKind::RemovedFavoritePrime(2)]);
    }

    #[test]
    fn non_trigger_actions_leave_the_feed_unchanged() {
        let reducer = app_reducer();
        let env = test_environment(None, None);
        let mut state = AppState::default();

        reducer(
            &mut state,
            AppAction::CounterView(CounterFeatureAction::Counter(CounterAction::IncrementTapped)),
            &env,
        );
        reducer(
            &mut state,
            AppAction::FavoritePrimes(FavoritePrimesAction::AlertDismissTapped),
            &env,
        );

        assert_eq!(state.count, 1);
        assert!(state.activity_feed.is_empty());
    }

    #[test]
    fn offline_counter_embedding_reaches_the_same_feature() {
        let reducer = app_reducer();
        let env = test_environment(None, None);
        let mut state = AppState::default();

        reducer(
            &mut state,
            AppAction::OfflineCounterView(CounterFeatureAction::Counter(
                CounterAction::IncrementTapped,
            )),
            &env,
        );
        assert_eq!(state.count, 1);
    }
}
