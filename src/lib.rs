//! Confluence: composable unidirectional state management.
//!
//! A single source of truth is mutated only by pure reducers in response to
//! discrete actions; asynchronous work is described as declarative,
//! cancellable [`Effect`] values that resolve to at most one follow-up
//! action. Independently developed features compose into one application
//! through [`combine`], [`pullback`], and store scoping, and every
//! transition replays deterministically for testing.
//!
//! # Core Concepts
//!
//! - **Reducer**: pure function `(state, action, environment) -> effects`
//! - **Effect**: deferred, cancellable async work owned by the store
//! - **Store**: serializes mutation, notifies subscribers, runs effects
//! - **Scope**: a projected, write-embedding view for nested features
//!
//! # Example
//!
//! ```rust
//! use confluence::{Effect, Reducer, Store};
//! use std::sync::Arc;
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//!     Decrement,
//! }
//!
//! fn counter(
//!     state: &mut CounterState,
//!     action: CounterAction,
//!     _environment: &(),
//! ) -> Vec<Effect<CounterAction>> {
//!     match action {
//!         CounterAction::Increment => state.count += 1,
//!         CounterAction::Decrement => state.count -= 1,
//!     }
//!     Vec::new()
//! }
//!
//! let reducer: Reducer<CounterState, CounterAction, ()> = Arc::new(counter);
//! let store = Store::new(CounterState::default(), reducer, ());
//! store.send(CounterAction::Increment);
//! assert_eq!(store.state().count, 1);
//! ```

pub mod clients;
pub mod effect;
pub mod features;
pub mod reducer;
pub mod store;

// Re-export the runtime surface.
pub use effect::{CancelToken, Effect, EffectError, EffectId, EffectResolver};
pub use reducer::{combine, logging, pullback, Lens, Prism, Reducer};
pub use store::{ScopedStore, Store, SubscriberId};
