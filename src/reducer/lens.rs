//! Bidirectional state and action projections.
//!
//! A [`Lens`] is an explicit get/set pair over a state tree; a [`Prism`] is
//! a partial extract/embed pair over an action union. Both are plain pure
//! function values, so feature composition never relies on reflective key
//! paths.

use std::sync::Arc;

/// Focuses a child state slice inside a parent state.
///
/// `get` clones the slice out; `set` writes a (possibly mutated) slice back.
///
/// # Example
///
/// ```rust
/// use confluence::reducer::Lens;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Parent {
///     count: i64,
///     name: String,
/// }
///
/// let count = Lens::new(
///     |parent: &Parent| parent.count,
///     |parent: &mut Parent, count| parent.count = count,
/// );
///
/// let mut parent = Parent { count: 1, name: "p".to_string() };
/// let next = count.get(&parent) + 1;
/// count.set(&mut parent, next);
/// assert_eq!(parent.count, 2);
/// ```
pub struct Lens<Outer, Inner> {
    get: Arc<dyn Fn(&Outer) -> Inner + Send + Sync>,
    set: Arc<dyn Fn(&mut Outer, Inner) + Send + Sync>,
}

impl<Outer, Inner> Lens<Outer, Inner> {
    pub fn new(
        get: impl Fn(&Outer) -> Inner + Send + Sync + 'static,
        set: impl Fn(&mut Outer, Inner) + Send + Sync + 'static,
    ) -> Self {
        Self {
            get: Arc::new(get),
            set: Arc::new(set),
        }
    }

    pub fn get(&self, outer: &Outer) -> Inner {
        (self.get)(outer)
    }

    pub fn set(&self, outer: &mut Outer, inner: Inner) {
        (self.set)(outer, inner)
    }
}

impl<Outer, Inner> Clone for Lens<Outer, Inner> {
    fn clone(&self) -> Self {
        Self {
            get: Arc::clone(&self.get),
            set: Arc::clone(&self.set),
        }
    }
}

/// Matches one embedding of a child action inside a parent action union.
///
/// `extract` yields the child action when the parent variant matches this
/// embedding, `None` otherwise — absence means "not this reducer's concern"
/// and is a silent no-op, not an error. `embed` wraps a child action back
/// into the parent union.
pub struct Prism<Outer, Inner> {
    extract: Arc<dyn Fn(&Outer) -> Option<Inner> + Send + Sync>,
    embed: Arc<dyn Fn(Inner) -> Outer + Send + Sync>,
}

impl<Outer, Inner> Prism<Outer, Inner> {
    pub fn new(
        extract: impl Fn(&Outer) -> Option<Inner> + Send + Sync + 'static,
        embed: impl Fn(Inner) -> Outer + Send + Sync + 'static,
    ) -> Self {
        Self {
            extract: Arc::new(extract),
            embed: Arc::new(embed),
        }
    }

    pub fn extract(&self, outer: &Outer) -> Option<Inner> {
        (self.extract)(outer)
    }

    pub fn embed(&self, inner: Inner) -> Outer {
        (self.embed)(inner)
    }
}

impl<Outer, Inner> Clone for Prism<Outer, Inner> {
    fn clone(&self) -> Self {
        Self {
            extract: Arc::clone(&self.extract),
            embed: Arc::clone(&self.embed),
        }
    }
}
