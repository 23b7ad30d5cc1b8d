//! Cross-cutting decorator reducers.

use crate::reducer::Reducer;
use std::fmt::Debug;
use std::sync::Arc;

/// Wrap a reducer with diagnostic logging.
///
/// Records the action, the state before, and the state after every
/// invocation via `tracing`. State semantics and the returned effect list
/// pass through untouched.
pub fn logging<S, A, E>(reducer: Reducer<S, A, E>) -> Reducer<S, A, E>
where
    S: Debug + 'static,
    A: Debug + 'static,
    E: 'static,
{
    Arc::new(move |state, action, environment| {
        tracing::debug!(action = ?action, before = ?state, "dispatching");
        let effects = reducer(state, action, environment);
        tracing::debug!(after = ?state, effects = effects.len(), "applied");
        effects
    })
}
