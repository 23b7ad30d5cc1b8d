//! The runtime object that owns state and drives the unidirectional loop.
//!
//! A [`Store`] holds the current state, the composed reducer, and the
//! environment. Every mutation funnels through [`Store::send`]: the reducer
//! runs, subscribers are notified with the new state, and only then are the
//! returned effects started. When an effect resolves to an action, that
//! action is marshaled back through `send` from the effect's task, which
//! serializes it against every other dispatch.
//!
//! The dispatch context is the store's state lock plus a dispatch-owner
//! slot. Re-entering `send` synchronously from the thread that is currently
//! dispatching — a reducer or subscriber calling back into the store — is a
//! programming invariant violation and panics. The asynchronous callback
//! path taken by resolving effects is always safe.

use crate::effect::{CancelToken, Effect, EffectId};
use crate::reducer::Reducer;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::thread::{self, ThreadId};
use tokio::sync::Notify;

mod scope;

pub use scope::ScopedStore;

/// Identity of a registered subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

struct Subscriber<S> {
    id: SubscriberId,
    notify: Arc<dyn Fn(&S) + Send + Sync>,
}

struct StoreCell<S> {
    state: S,
    subscribers: Vec<Subscriber<S>>,
    next_subscriber: u64,
}

struct StoreInner<S, A, E> {
    cell: Mutex<StoreCell<S>>,
    reducer: Reducer<S, A, E>,
    environment: E,
    dispatch_owner: Mutex<Option<ThreadId>>,
    effects: Mutex<HashMap<EffectId, CancelToken>>,
    in_flight: AtomicUsize,
    settled: Notify,
}

impl<S, A, E> Drop for StoreInner<S, A, E> {
    fn drop(&mut self) {
        for (_, token) in self.effects.lock().drain() {
            token.cancel();
        }
    }
}

/// A cloneable handle to the single source of truth for one feature tree.
pub struct Store<S, A, E> {
    inner: Arc<StoreInner<S, A, E>>,
}

impl<S, A, E> Clone for Store<S, A, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, A, E> Store<S, A, E>
where
    S: Send + 'static,
    A: Send + 'static,
    E: Send + Sync + 'static,
{
    pub fn new(initial: S, reducer: Reducer<S, A, E>, environment: E) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                cell: Mutex::new(StoreCell {
                    state: initial,
                    subscribers: Vec::new(),
                    next_subscriber: 0,
                }),
                reducer,
                environment,
                dispatch_owner: Mutex::new(None),
                effects: Mutex::new(HashMap::new()),
                in_flight: AtomicUsize::new(0),
                settled: Notify::new(),
            }),
        }
    }

    /// Dispatch an action.
    ///
    /// Synchronous and non-blocking: the reducer and subscriber
    /// notifications complete before this returns, and every effect from
    /// this dispatch starts only after the notifications.
    pub fn send(&self, action: A) {
        StoreInner::dispatch(&self.inner, action);
    }

    /// Read a value out of the current state.
    pub fn with_state<R>(&self, read: impl FnOnce(&S) -> R) -> R {
        read(&self.inner.cell.lock().state)
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> S
    where
        S: Clone,
    {
        self.with_state(S::clone)
    }

    /// Register an observer invoked with the new state after every
    /// completed dispatch, including effect-driven re-dispatches.
    ///
    /// Subscribers run on the dispatch context and must not call back into
    /// the store synchronously.
    pub fn subscribe(&self, notify: impl Fn(&S) + Send + Sync + 'static) -> SubscriberId {
        let mut cell = self.inner.cell.lock();
        let id = SubscriberId(cell.next_subscriber);
        cell.next_subscriber += 1;
        cell.subscribers.push(Subscriber {
            id,
            notify: Arc::new(notify),
        });
        id
    }

    /// Remove a subscriber. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut cell = self.inner.cell.lock();
        let before = cell.subscribers.len();
        cell.subscribers.retain(|subscriber| subscriber.id != id);
        cell.subscribers.len() != before
    }

    /// Cancel an in-flight effect by identity.
    ///
    /// Guarantees the effect's resolution is not delivered afterward, even
    /// if the underlying work later completes.
    pub fn cancel(&self, id: EffectId) {
        if let Some(token) = self.inner.effects.lock().get(&id) {
            token.cancel();
        }
    }

    /// Derive a store-like view over a projected state slice and an
    /// embedded action subset.
    pub fn scope<LS, LA>(
        &self,
        project: impl Fn(&S) -> LS + Send + Sync + 'static,
        embed: impl Fn(LA) -> A + Send + Sync + 'static,
    ) -> ScopedStore<S, A, E, LS, LA>
    where
        LS: Send + 'static,
        LA: 'static,
    {
        ScopedStore::new(self.clone(), Arc::new(project), Arc::new(embed))
    }

    /// Wait until no effects are in flight.
    pub async fn settle(&self) {
        loop {
            let notified = self.inner.settled.notified();
            if self.inner.in_flight.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }
}

impl<S, A, E> StoreInner<S, A, E>
where
    S: Send + 'static,
    A: Send + 'static,
    E: Send + Sync + 'static,
{
    fn dispatch(inner: &Arc<Self>, action: A) {
        let current = thread::current().id();
        if *inner.dispatch_owner.lock() == Some(current) {
            panic!(
                "Store::send re-entered synchronously on the dispatch context; \
                 effect resolutions must arrive through their own task"
            );
        }

        let effects = {
            let mut cell = inner.cell.lock();
            *inner.dispatch_owner.lock() = Some(current);
            let effects = (inner.reducer)(&mut cell.state, action, &inner.environment);
            let StoreCell {
                state, subscribers, ..
            } = &mut *cell;
            for subscriber in subscribers.iter() {
                (subscriber.notify)(state);
            }
            *inner.dispatch_owner.lock() = None;
            effects
        };

        for effect in effects {
            Self::run_effect(inner, effect);
        }
    }

    fn run_effect(inner: &Arc<Self>, effect: Effect<A>) {
        let (id, token, handle, future) = effect.into_parts();
        inner.effects.lock().insert(id, token.clone());
        inner.in_flight.fetch_add(1, Ordering::SeqCst);

        let weak: Weak<Self> = Arc::downgrade(inner);
        let task = async move {
            let resolved = tokio::select! {
                _ = token.cancelled() => None,
                outcome = future => match outcome {
                    Ok(value) => value,
                    Err(error) => {
                        tracing::warn!(effect = %id, error = %error, "effect failed at the dispatch boundary");
                        None
                    }
                },
            };

            if let Some(inner) = weak.upgrade() {
                if let Some(action) = resolved {
                    if !token.is_cancelled() {
                        Self::dispatch(&inner, action);
                    }
                }
                inner.effects.lock().remove(&id);
                inner.in_flight.fetch_sub(1, Ordering::SeqCst);
                inner.settled.notify_waiters();
            }
        };

        match handle {
            Some(handle) => {
                handle.spawn(task);
            }
            None => {
                tokio::spawn(task);
            }
        }
    }
}
