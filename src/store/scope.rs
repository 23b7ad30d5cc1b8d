//! Derived store views for nested features.

use crate::store::{Store, SubscriberId};
use parking_lot::Mutex;
use std::sync::Arc;

/// A store-like handle over a projected slice of a parent store.
///
/// Reads re-project the parent's current state on every access — the parent
/// remains the single source of truth. Sends embed the child action into the
/// parent action union and forward to the parent's dispatch. Subscriptions
/// fire only when the projected slice actually changes.
pub struct ScopedStore<S, A, E, LS, LA> {
    parent: Store<S, A, E>,
    project: Arc<dyn Fn(&S) -> LS + Send + Sync>,
    embed: Arc<dyn Fn(LA) -> A + Send + Sync>,
}

impl<S, A, E, LS, LA> Clone for ScopedStore<S, A, E, LS, LA> {
    fn clone(&self) -> Self {
        Self {
            parent: self.parent.clone(),
            project: Arc::clone(&self.project),
            embed: Arc::clone(&self.embed),
        }
    }
}

impl<S, A, E, LS, LA> ScopedStore<S, A, E, LS, LA>
where
    S: Send + 'static,
    A: Send + 'static,
    E: Send + Sync + 'static,
    LS: Send + 'static,
    LA: 'static,
{
    pub(crate) fn new(
        parent: Store<S, A, E>,
        project: Arc<dyn Fn(&S) -> LS + Send + Sync>,
        embed: Arc<dyn Fn(LA) -> A + Send + Sync>,
    ) -> Self {
        Self {
            parent,
            project,
            embed,
        }
    }

    /// Current projection of the parent state.
    pub fn state(&self) -> LS {
        let project = Arc::clone(&self.project);
        self.parent.with_state(move |state| project(state))
    }

    /// Embed the child action and forward to the parent store.
    pub fn send(&self, action: LA) {
        self.parent.send((self.embed)(action));
    }

    /// Observe the projected slice.
    ///
    /// The observer fires only when the slice differs from its previous
    /// projection; the baseline is the projection at subscription time.
    pub fn subscribe(&self, notify: impl Fn(&LS) + Send + Sync + 'static) -> SubscriberId
    where
        LS: Clone + PartialEq,
    {
        let project = Arc::clone(&self.project);
        let last = Mutex::new(self.state());
        self.parent.subscribe(move |state: &S| {
            let slice = project(state);
            let mut last = last.lock();
            if *last != slice {
                *last = slice.clone();
                notify(&slice);
            }
        })
    }

    /// Remove a subscriber registered through this scope.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.parent.unsubscribe(id)
    }

    /// Scope further into the projected slice; projections compose.
    pub fn scope<LLS, LLA>(
        &self,
        project: impl Fn(&LS) -> LLS + Send + Sync + 'static,
        embed: impl Fn(LLA) -> LA + Send + Sync + 'static,
    ) -> ScopedStore<S, A, E, LLS, LLA> {
        let outer_project = Arc::clone(&self.project);
        let outer_embed = Arc::clone(&self.embed);
        ScopedStore {
            parent: self.parent.clone(),
            project: Arc::new(move |state: &S| project(&outer_project(state))),
            embed: Arc::new(move |action: LLA| outer_embed(embed(action))),
        }
    }
}
