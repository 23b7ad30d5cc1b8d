//! Pure state transitions and their composition algebra.
//!
//! A reducer is a pure function `(state, action, environment) -> effects`:
//! it mutates its state slice synchronously, never performs I/O directly,
//! and describes asynchronous follow-up work as returned [`Effect`] values.
//!
//! Reducers compose two ways:
//!
//! - [`combine`] merges sibling reducers over the same domain, applying them
//!   in declaration order and concatenating their effects.
//! - [`pullback`] lifts a child reducer into a parent domain through a
//!   [`Lens`] over state, a [`Prism`] over actions, and an environment
//!   projection.
//!
//! Cross-cutting behavior is added with decorator reducers — ordinary
//! higher-order functions such as [`logging`] — applied by explicit
//! composition at startup.
//!
//! # Example
//!
//! ```rust
//! use confluence::reducer::{combine, Reducer};
//! use std::sync::Arc;
//!
//! #[derive(Clone, Debug)]
//! enum TallyAction {
//!     Add(i64),
//! }
//!
//! let add: Reducer<i64, TallyAction, ()> = Arc::new(|state, action, _| {
//!     match action {
//!         TallyAction::Add(amount) => *state += amount,
//!     }
//!     Vec::new()
//! });
//! let double: Reducer<i64, TallyAction, ()> = Arc::new(|state, _, _| {
//!     *state *= 2;
//!     Vec::new()
//! });
//!
//! // Later reducers observe earlier mutations.
//! let tally = combine(vec![add, double]);
//! let mut state = 1;
//! let effects = tally(&mut state, TallyAction::Add(2), &());
//! assert_eq!(state, 6);
//! assert!(effects.is_empty());
//! ```

use crate::effect::Effect;
use std::sync::Arc;

mod decorator;
mod lens;

pub use decorator::logging;
pub use lens::{Lens, Prism};

/// A pure transition function over `(State, Action, Environment)`.
///
/// Reducers must be total over their action union — Rust's exhaustive
/// matching enforces this — and must express all I/O as returned effects.
pub type Reducer<S, A, E> = Arc<dyn Fn(&mut S, A, &E) -> Vec<Effect<A>> + Send + Sync>;

/// Merge sibling reducers over the same state, action, and environment.
///
/// Each reducer runs in declaration order against the same state value, so
/// later reducers observe earlier reducers' mutations. Effect lists
/// concatenate in the same order.
pub fn combine<S, A, E>(reducers: Vec<Reducer<S, A, E>>) -> Reducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    Arc::new(move |state, action, environment| {
        let mut effects = Vec::new();
        for reducer in &reducers {
            effects.extend(reducer(state, action.clone(), environment));
        }
        effects
    })
}

/// Lift a child reducer into a parent domain.
///
/// The lens focuses the child's state slice, the prism matches the child's
/// action embedding, and `to_local_environment` projects the parent
/// environment. A parent action the prism does not match is a silent no-op:
/// parent state is left untouched and no effects are returned.
///
/// Effects produced by the child are re-wrapped with the prism's embedding
/// so their resolutions route back through the parent's dispatch correctly.
pub fn pullback<LS, LA, LE, S, A, E, F>(
    reducer: Reducer<LS, LA, LE>,
    lens: Lens<S, LS>,
    prism: Prism<A, LA>,
    to_local_environment: F,
) -> Reducer<S, A, E>
where
    LS: 'static,
    LA: Send + 'static,
    LE: 'static,
    S: 'static,
    A: Send + 'static,
    E: 'static,
    F: Fn(&E) -> LE + Send + Sync + 'static,
{
    Arc::new(move |state, action, environment| {
        let Some(local_action) = prism.extract(&action) else {
            return Vec::new();
        };
        let mut local_state = lens.get(state);
        let local_environment = to_local_environment(environment);
        let effects = reducer(&mut local_state, local_action, &local_environment);
        lens.set(state, local_state);
        effects
            .into_iter()
            .map(|effect| {
                let prism = prism.clone();
                effect.map(move |local| prism.embed(local))
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Pair {
        left: i64,
        right: i64,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum PairAction {
        Left(LeftAction),
        Right(i64),
    }

    #[derive(Clone, Debug, PartialEq)]
    enum LeftAction {
        Bump,
        Bumped(i64),
    }

    fn left_reducer(state: &mut i64, action: LeftAction, _environment: &()) -> Vec<Effect<LeftAction>> {
        match action {
            LeftAction::Bump => {
                let next = *state + 1;
                vec![Effect::sync(move || LeftAction::Bumped(next))]
            }
            LeftAction::Bumped(value) => {
                *state = value;
                Vec::new()
            }
        }
    }

    fn left_lens() -> Lens<Pair, i64> {
        Lens::new(
            |pair: &Pair| pair.left,
            |pair: &mut Pair, left| pair.left = left,
        )
    }

    fn left_prism() -> Prism<PairAction, LeftAction> {
        Prism::new(
            |action: &PairAction| match action {
                PairAction::Left(action) => Some(action.clone()),
                PairAction::Right(_) => None,
            },
            PairAction::Left,
        )
    }

    #[test]
    fn combine_applies_in_declaration_order() {
        #[derive(Clone, Debug)]
        struct Touch;

        let append_a: Reducer<Vec<&'static str>, Touch, ()> = Arc::new(|state, _, _| {
            state.push("a");
            Vec::new()
        });
        let append_b: Reducer<Vec<&'static str>, Touch, ()> = Arc::new(|state, _, _| {
            state.push("b");
            Vec::new()
        });

        let combined = combine(vec![append_a, append_b]);
        let mut state = Vec::new();
        combined(&mut state, Touch, &());
        assert_eq!(state, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn combine_concatenates_effects_in_order() {
        #[derive(Clone, Debug, PartialEq)]
        struct Marker(&'static str);

        let first: Reducer<(), Marker, ()> =
            Arc::new(|_, _, _| vec![Effect::sync(|| Marker("first"))]);
        let second: Reducer<(), Marker, ()> =
            Arc::new(|_, _, _| vec![Effect::sync(|| Marker("second"))]);

        let combined = combine(vec![first, second]);
        let effects = combined(&mut (), Marker("go"), &());
        assert_eq!(effects.len(), 2);

        let mut resolved = Vec::new();
        for effect in effects {
            resolved.push(effect.outcome().await.unwrap());
        }
        assert_eq!(
            resolved,
            vec![Some(Marker("first")), Some(Marker("second"))]
        );
    }

    #[test]
    fn pullback_applies_matching_action_through_lens() {
        let local: Reducer<i64, LeftAction, ()> = Arc::new(left_reducer);
        let lifted = pullback(local, left_lens(), left_prism(), |_: &()| ());

        let mut pair = Pair { left: 1, right: 9 };
        let effects = lifted(&mut pair, PairAction::Left(LeftAction::Bumped(5)), &());
        assert_eq!(pair, Pair { left: 5, right: 9 });
        assert!(effects.is_empty());
    }

    #[test]
    fn pullback_non_matching_action_is_noop() {
        let local: Reducer<i64, LeftAction, ()> = Arc::new(left_reducer);
        let lifted = pullback(local, left_lens(), left_prism(), |_: &()| ());

        let mut pair = Pair { left: 1, right: 9 };
        let before = pair.clone();
        let effects = lifted(&mut pair, PairAction::Right(3), &());
        assert_eq!(pair, before);
        assert!(effects.is_empty());
    }

    #[tokio::test]
    async fn pullback_rewraps_child_effects() {
        let local: Reducer<i64, LeftAction, ()> = Arc::new(left_reducer);
        let lifted = pullback(local, left_lens(), left_prism(), |_: &()| ());

        let mut pair = Pair { left: 1, right: 9 };
        let mut effects = lifted(&mut pair, PairAction::Left(LeftAction::Bump), &());
        assert_eq!(effects.len(), 1);

        let effect = effects.remove(0);
        let resolved = effect.outcome().await.unwrap();
        assert_eq!(resolved, Some(PairAction::Left(LeftAction::Bumped(2))));
    }
}
