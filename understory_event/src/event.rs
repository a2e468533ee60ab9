// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event registry: the listeners of one event slot and their cached invoker.

use alloc::rc::Rc;
use core::any::type_name;
use core::cell::OnceCell;
use core::fmt;

use smallvec::SmallVec;

use crate::invoker;
use crate::policy::ResultPolicy;

/// The listeners of one event, composed into a single cached invoker.
///
/// `L` is the call shape (for example [`LoopListener<A>`](crate::LoopListener))
/// and `P` the [`ResultPolicy`] bound at construction.
///
/// ## Cache
///
/// The composed invoker is built lazily by [`Event::invoker`] and kept until
/// the next mutation. [`register`](Event::register),
/// [`clear_listeners`](Event::clear_listeners), and a successful
/// [`unregister`](Event::unregister) drop it. A cached invoker is therefore
/// never stale: it always dispatches to exactly the current listeners in
/// registration order.
///
/// Invokers already handed out are snapshots. They keep dispatching to the
/// listeners that were registered when they were built.
///
/// ## Identity
///
/// Listeners are compared by allocation ([`Rc::ptr_eq`]). Keep a clone of the
/// `Rc` you register if you intend to unregister it later.
///
/// ## Threading
///
/// `Event` is `!Send` and `!Sync`. Registration and dispatch happen on one
/// thread. Process-wide events are typically kept in a `thread_local!`
/// `RefCell` owned by the module that declares them.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use understory_event::{InteractionListener, InteractionResult, factory};
///
/// let mut event = factory::create_interaction_result::<u32>();
///
/// let calls = Rc::new(Cell::new(0));
/// let counter = calls.clone();
/// let deny_large: Rc<InteractionListener<u32>> = Rc::new(move |x: &u32| {
///     counter.set(counter.get() + 1);
///     if *x > 10 { InteractionResult::Fail } else { InteractionResult::Pass }
/// });
/// event.register(deny_large.clone());
/// event.register(Rc::new(|_: &u32| InteractionResult::Success));
///
/// assert_eq!(event.invoker()(&5), InteractionResult::Success);
/// assert_eq!(event.invoker()(&50), InteractionResult::Fail);
/// assert_eq!(calls.get(), 2);
///
/// assert!(event.unregister(&deny_large));
/// assert!(!event.is_registered(&deny_large));
/// assert_eq!(event.invoker()(&50), InteractionResult::Success);
/// ```
pub struct Event<L: ?Sized, P> {
    listeners: SmallVec<[Rc<L>; 2]>,
    policy: P,
    invoker: OnceCell<Rc<L>>,
}

impl<L: ?Sized, P> Event<L, P> {
    /// Creates an event with no listeners.
    #[must_use]
    pub fn new(policy: P) -> Self {
        Self {
            listeners: SmallVec::new(),
            policy,
            invoker: OnceCell::new(),
        }
    }

    /// Appends `listener` to the dispatch order.
    ///
    /// There is no uniqueness check: a listener registered twice is called
    /// twice per dispatch.
    pub fn register(&mut self, listener: Rc<L>) {
        self.listeners.push(listener);
        self.invalidate();
        tracing::trace!(
            shape = type_name::<L>(),
            listeners = self.listeners.len(),
            "registered listener"
        );
    }

    /// Removes every registration of `listener`.
    ///
    /// Returns `true` if at least one registration was removed. When nothing
    /// matches, the event (including its cached invoker) is left untouched.
    pub fn unregister(&mut self, listener: &Rc<L>) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| !Rc::ptr_eq(l, listener));
        let removed = before - self.listeners.len();
        if removed == 0 {
            return false;
        }
        self.invalidate();
        tracing::trace!(
            shape = type_name::<L>(),
            removed,
            listeners = self.listeners.len(),
            "unregistered listener"
        );
        true
    }

    /// Returns `true` if `listener` is currently registered.
    #[must_use]
    pub fn is_registered(&self, listener: &Rc<L>) -> bool {
        self.listeners.iter().any(|l| Rc::ptr_eq(l, listener))
    }

    /// Removes all listeners.
    pub fn clear_listeners(&mut self) {
        let removed = self.listeners.len();
        self.listeners.clear();
        self.listeners.shrink_to_fit();
        self.invalidate();
        tracing::trace!(shape = type_name::<L>(), removed, "cleared listeners");
    }

    /// Number of registrations (duplicates counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// The policy this event was built with.
    #[must_use]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Returns `true` if a composed invoker is cached.
    ///
    /// Becomes `true` after [`Event::invoker`] and `false` after any
    /// effective mutation.
    #[must_use]
    pub fn is_invoker_cached(&self) -> bool {
        self.invoker.get().is_some()
    }

    fn invalidate(&mut self) {
        self.invoker.take();
    }
}

impl<L, P> Event<L, P>
where
    L: ?Sized,
    P: ResultPolicy<L>,
{
    /// Returns the composed invoker for the current listeners.
    ///
    /// The first call after a mutation composes the listeners with the
    /// event's policy; later calls return the cached invoker. Call the result
    /// exactly like a single listener.
    ///
    /// With no listeners the invoker returns the policy's default result.
    /// With one listener the invoker is that listener.
    #[must_use]
    pub fn invoker(&self) -> Rc<L> {
        Rc::clone(self.invoker.get_or_init(|| {
            tracing::trace!(
                shape = type_name::<L>(),
                listeners = self.listeners.len(),
                "composing invoker"
            );
            invoker::build(self.listeners.as_slice(), &self.policy)
        }))
    }
}

impl<L: ?Sized, P: Default> Default for Event<L, P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}

impl<L: ?Sized, P: fmt::Debug> fmt::Debug for Event<L, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("shape", &type_name::<L>())
            .field("listeners", &self.listeners.len())
            .field("policy", &self.policy)
            .field("invoker", &self.invoker.get().map(|_| "cached"))
            .finish()
    }
}
