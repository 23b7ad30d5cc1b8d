//! Deferred, cancellable, composable asynchronous work.
//!
//! An [`Effect`] describes a computation that will produce at most one
//! follow-up action, or nothing at all. Effects are lazy: a reducer returns
//! them as plain values and the store starts them only after the state
//! mutation has been committed and subscribers notified.
//!
//! # Key Concepts
//!
//! - **Constructors**: [`Effect::none`], [`Effect::sync`],
//!   [`Effect::from_future`], [`Effect::try_future`],
//!   [`Effect::from_callback`]
//! - **Operators**: [`Effect::map`], [`Effect::try_map`], [`Effect::catch`],
//!   [`Effect::compact`], [`Effect::fire_and_forget`],
//!   [`Effect::receive_on`], [`Effect::cancellable`]
//! - **Cancellation**: every effect carries an [`EffectId`] and a
//!   [`CancelToken`]; cancelling by identity suppresses delivery even when
//!   the underlying work has already completed.
//!
//! Failures are values of [`EffectError`] and never escape the effect
//! boundary: either a `catch` handler substitutes a recovery effect, or the
//! store logs and drops the resolution.

use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use tokio::runtime::Handle;
use tokio::sync::oneshot;

mod cancel;
mod error;

pub use cancel::{CancelToken, EffectId};
pub use error::EffectError;

/// A lazy description of asynchronous work yielding at most one value.
///
/// `Ok(None)` is the empty resolution: legal, and dropped silently by the
/// store. `Err` is an effect failure, interceptable with [`Effect::catch`].
pub struct Effect<A> {
    id: EffectId,
    token: CancelToken,
    handle: Option<Handle>,
    future: BoxFuture<'static, Result<Option<A>, EffectError>>,
}

/// Single-shot resolution handle passed to [`Effect::from_callback`].
///
/// Consuming `resolve` enforces at-most-once resolution; dropping the
/// resolver without calling it yields the empty resolution.
pub struct EffectResolver<A> {
    sender: oneshot::Sender<A>,
}

impl<A> EffectResolver<A> {
    pub fn resolve(self, value: A) {
        let _ = self.sender.send(value);
    }
}

impl<A: Send + 'static> Effect<A> {
    fn from_boxed(future: BoxFuture<'static, Result<Option<A>, EffectError>>) -> Self {
        Self {
            id: EffectId::new(),
            token: CancelToken::new(),
            handle: None,
            future,
        }
    }

    /// An effect that resolves to nothing.
    pub fn none() -> Self {
        Self::from_boxed(Box::pin(async { Ok(None) }))
    }

    /// An effect resolving immediately to the closure's value.
    ///
    /// The closure runs when the effect is started, not when it is built.
    pub fn sync<F>(work: F) -> Self
    where
        F: FnOnce() -> A + Send + 'static,
    {
        Self::from_boxed(Box::pin(async move { Ok(Some(work())) }))
    }

    /// An effect backed by an infallible future.
    pub fn from_future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = A> + Send + 'static,
    {
        Self::from_boxed(Box::pin(async move { Ok(Some(future.await)) }))
    }

    /// An effect backed by a fallible future.
    pub fn try_future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = Result<A, EffectError>> + Send + 'static,
    {
        Self::from_boxed(Box::pin(async move { future.await.map(Some) }))
    }

    /// An effect driven by a single-shot callback.
    ///
    /// `register` receives an [`EffectResolver`] when the effect starts and
    /// may hand it to any completion mechanism. Dropping the resolver
    /// unresolved produces the empty resolution.
    pub fn from_callback<F>(register: F) -> Self
    where
        F: FnOnce(EffectResolver<A>) + Send + 'static,
    {
        Self::from_boxed(Box::pin(async move {
            let (sender, receiver) = oneshot::channel();
            register(EffectResolver { sender });
            Ok(receiver.await.ok())
        }))
    }

    /// Transform the eventual resolved value.
    ///
    /// Identity, cancellation, and delivery handle carry over unchanged.
    pub fn map<B, F>(self, transform: F) -> Effect<B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> B + Send + 'static,
    {
        let Self {
            id,
            token,
            handle,
            future,
        } = self;
        Effect {
            id,
            token,
            handle,
            future: Box::pin(async move { Ok(future.await?.map(transform)) }),
        }
    }

    /// Fallible transform; an `Err` becomes an effect failure.
    pub fn try_map<B, F>(self, transform: F) -> Effect<B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> Result<B, EffectError> + Send + 'static,
    {
        let Self {
            id,
            token,
            handle,
            future,
        } = self;
        Effect {
            id,
            token,
            handle,
            future: Box::pin(async move {
                match future.await? {
                    Some(value) => transform(value).map(Some),
                    None => Ok(None),
                }
            }),
        }
    }

    /// Intercept a failure and substitute a recovery effect.
    ///
    /// Returning [`Effect::none`] from the handler converts the failure into
    /// the empty resolution.
    pub fn catch<F>(self, handler: F) -> Effect<A>
    where
        F: FnOnce(EffectError) -> Effect<A> + Send + 'static,
    {
        let Self {
            id,
            token,
            handle,
            future,
        } = self;
        Effect {
            id,
            token,
            handle,
            future: Box::pin(async move {
                match future.await {
                    Ok(value) => Ok(value),
                    Err(error) => handler(error).future.await,
                }
            }),
        }
    }

    /// Discard any output, producing an effect that never yields an action.
    pub fn fire_and_forget<B>(self) -> Effect<B>
    where
        B: Send + 'static,
    {
        let Self {
            id,
            token,
            handle,
            future,
        } = self;
        Effect {
            id,
            token,
            handle,
            future: Box::pin(async move {
                future.await?;
                Ok(None)
            }),
        }
    }

    /// Pin execution to a specific runtime handle.
    ///
    /// Delivery of the resolved action still funnels through the owning
    /// store's dispatch entry point.
    pub fn receive_on(mut self, handle: Handle) -> Self {
        self.handle = Some(handle);
        self
    }

    /// Assign an explicit identity for later cancellation.
    pub fn cancellable(mut self, id: EffectId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> EffectId {
        self.id
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        EffectId,
        CancelToken,
        Option<Handle>,
        BoxFuture<'static, Result<Option<A>, EffectError>>,
    ) {
        (self.id, self.token, self.handle, self.future)
    }

    /// Drive the effect to completion, test support only.
    #[cfg(test)]
    pub(crate) async fn outcome(self) -> Result<Option<A>, EffectError> {
        self.future.await
    }
}

impl<A: Send + 'static> Effect<Option<A>> {
    /// Flatten a missing inner value into the empty resolution.
    pub fn compact(self) -> Effect<A> {
        let Self {
            id,
            token,
            handle,
            future,
        } = self;
        Effect {
            id,
            token,
            handle,
            future: Box::pin(async move { Ok(future.await?.flatten()) }),
        }
    }
}

impl<A> fmt::Debug for Effect<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effect").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn none_resolves_empty() {
        let effect: Effect<i64> = Effect::none();
        assert_eq!(effect.outcome().await.unwrap(), None);
    }

    #[tokio::test]
    async fn sync_resolves_to_value() {
        let effect = Effect::sync(|| 42);
        assert_eq!(effect.outcome().await.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn map_transforms_resolved_value() {
        let effect = Effect::sync(|| 21).map(|n| n * 2);
        assert_eq!(effect.outcome().await.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn map_preserves_identity() {
        let effect = Effect::sync(|| 1);
        let id = effect.id();
        assert_eq!(effect.map(|n| n + 1).id(), id);
    }

    #[tokio::test]
    async fn try_map_failure_is_caught() {
        let effect = Effect::sync(|| "not a number")
            .try_map(|text| {
                text.parse::<i64>()
                    .map_err(|err| EffectError::Lookup(err.to_string()))
            })
            .catch(|_| Effect::sync(|| -1));
        assert_eq!(effect.outcome().await.unwrap(), Some(-1));
    }

    #[tokio::test]
    async fn catch_can_substitute_empty() {
        let effect: Effect<i64> =
            Effect::try_future(async { Err(EffectError::Lookup("offline".to_string())) })
                .catch(|_| Effect::none());
        assert_eq!(effect.outcome().await.unwrap(), None);
    }

    #[tokio::test]
    async fn compact_flattens_missing_value() {
        let present: Effect<i64> = Effect::sync(|| Some(5)).compact();
        assert_eq!(present.outcome().await.unwrap(), Some(5));

        let missing: Effect<i64> = Effect::sync(|| None).compact();
        assert_eq!(missing.outcome().await.unwrap(), None);
    }

    #[tokio::test]
    async fn fire_and_forget_produces_no_action() {
        let ran = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
        let flag = std::sync::Arc::clone(&ran);
        let effect: Effect<i64> = Effect::sync(move || {
            flag.store(true, std::sync::atomic::Ordering::SeqCst);
        })
        .fire_and_forget();
        assert_eq!(effect.outcome().await.unwrap(), None);
        assert!(ran.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[tokio::test]
    async fn callback_resolves_once() {
        let effect = Effect::from_callback(|resolver| resolver.resolve(7));
        assert_eq!(effect.outcome().await.unwrap(), Some(7));
    }

    #[tokio::test]
    async fn dropped_resolver_yields_empty() {
        let effect: Effect<i64> = Effect::from_callback(|resolver| drop(resolver));
        assert_eq!(effect.outcome().await.unwrap(), None);
    }

    #[tokio::test]
    async fn cancellable_assigns_identity() {
        let id = EffectId::new();
        let effect = Effect::sync(|| 1).cancellable(id);
        assert_eq!(effect.id(), id);
    }
}
