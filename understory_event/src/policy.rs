// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Result policies: how many listener calls become one.

use alloc::rc::Rc;
use core::fmt;

use crate::result::{InteractionResult, InteractionResultHolder};

/// Notification listener: called for its side effects only.
pub type LoopListener<A> = dyn Fn(&A);

/// Fallible notification listener: the first `Err` aborts the dispatch.
pub type TryLoopListener<A, E> = dyn Fn(&A) -> Result<(), E>;

/// Vetoable listener: the first non-[`Pass`](InteractionResult::Pass) outcome wins.
pub type InteractionListener<A> = dyn Fn(&A) -> InteractionResult;

/// Vetoable listener that also hands back a payload.
pub type HolderListener<A, V> = dyn Fn(&A) -> InteractionResultHolder<V>;

/// Listener receiving a shared mutable argument, called for its side effects.
pub type Consumer<T> = dyn Fn(&mut T);

/// Vetoable listener receiving a shared mutable argument.
pub type Actor<T> = dyn Fn(&mut T) -> InteractionResult;

/// Trait for result policies.
///
/// A result policy composes an ordered sequence of listeners of shape `L`
/// into a single listener of the same shape. Calling the composed listener
/// calls the underlying listeners in order and decides when to stop and what
/// to return.
///
/// Policies receive a snapshot of the listener sequence and must not keep any
/// call arguments beyond the call that received them. The composed listener
/// for an empty snapshot must still be callable and return the policy's
/// identity result.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use understory_event::{LoopListener, LoopPolicy, ResultPolicy};
///
/// let log = Rc::new(RefCell::new(Vec::new()));
/// let (a, b) = (log.clone(), log.clone());
/// let listeners: Rc<[Rc<LoopListener<u32>>]> = Rc::from(vec![
///     Rc::new(move |x: &u32| a.borrow_mut().push(*x)) as Rc<LoopListener<u32>>,
///     Rc::new(move |x: &u32| b.borrow_mut().push(*x * 10)),
/// ]);
///
/// let composed = LoopPolicy.combine(listeners);
/// composed(&4);
/// assert_eq!(*log.borrow(), vec![4, 40]);
/// ```
pub trait ResultPolicy<L: ?Sized> {
    /// Composes `listeners` into one listener of the same shape.
    fn combine(&self, listeners: Rc<[Rc<L>]>) -> Rc<L>;
}

/// Policy references are policies.
impl<L, P> ResultPolicy<L> for &P
where
    L: ?Sized,
    P: ResultPolicy<L> + ?Sized,
{
    fn combine(&self, listeners: Rc<[Rc<L>]>) -> Rc<L> {
        (*self).combine(listeners)
    }
}

/// Loop policy: call every listener in order and return nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct LoopPolicy;

impl<A> ResultPolicy<LoopListener<A>> for LoopPolicy
where
    A: ?Sized + 'static,
{
    fn combine(&self, listeners: Rc<[Rc<LoopListener<A>>]>) -> Rc<LoopListener<A>> {
        Rc::new(move |args: &A| {
            for listener in listeners.iter() {
                listener(args);
            }
        })
    }
}

/// Fallible loop policy: call listeners in order until one returns `Err`.
///
/// The error is returned unchanged and no later listener is called. When
/// every listener succeeds, or there are none, the result is `Ok(())`.
#[derive(Copy, Clone, Debug, Default)]
pub struct TryLoopPolicy;

impl<A, E> ResultPolicy<TryLoopListener<A, E>> for TryLoopPolicy
where
    A: ?Sized + 'static,
    E: 'static,
{
    fn combine(&self, listeners: Rc<[Rc<TryLoopListener<A, E>>]>) -> Rc<TryLoopListener<A, E>> {
        Rc::new(move |args: &A| {
            for listener in listeners.iter() {
                listener(args)?;
            }
            Ok(())
        })
    }
}

/// Interaction policy: the first non-`Pass` outcome wins.
///
/// Listeners after the deciding one are not called. When every listener
/// passes, or there are none, the result is [`InteractionResult::Pass`].
#[derive(Copy, Clone, Debug, Default)]
pub struct InteractionPolicy;

impl<A> ResultPolicy<InteractionListener<A>> for InteractionPolicy
where
    A: ?Sized + 'static,
{
    fn combine(&self, listeners: Rc<[Rc<InteractionListener<A>>]>) -> Rc<InteractionListener<A>> {
        Rc::new(move |args: &A| {
            for listener in listeners.iter() {
                let result = listener(args);
                if !result.is_pass() {
                    return result;
                }
            }
            InteractionResult::Pass
        })
    }
}

/// Holder policy: the first holder with a non-`Pass` outcome wins.
///
/// The payload of passing holders is dropped. When every listener passes, or
/// there are none, the result is `(Pass, None)`.
#[derive(Copy, Clone, Debug, Default)]
pub struct HolderPolicy;

impl<A, V> ResultPolicy<HolderListener<A, V>> for HolderPolicy
where
    A: ?Sized + 'static,
    V: 'static,
{
    fn combine(&self, listeners: Rc<[Rc<HolderListener<A, V>>]>) -> Rc<HolderListener<A, V>> {
        Rc::new(move |args: &A| {
            for listener in listeners.iter() {
                let held = listener(args);
                if !held.result().is_pass() {
                    return held;
                }
            }
            InteractionResultHolder::empty()
        })
    }
}

/// Consumer policy: hand the same mutable argument to every listener.
///
/// There is no short circuit. Each listener sees the mutations made by the
/// listeners registered before it.
#[derive(Copy, Clone, Debug, Default)]
pub struct ConsumerPolicy;

impl<T> ResultPolicy<Consumer<T>> for ConsumerPolicy
where
    T: ?Sized + 'static,
{
    fn combine(&self, listeners: Rc<[Rc<Consumer<T>>]>) -> Rc<Consumer<T>> {
        Rc::new(move |value: &mut T| {
            for listener in listeners.iter() {
                listener(value);
            }
        })
    }
}

/// Actor policy: first non-`Pass` outcome wins, over a shared mutable argument.
///
/// This is [`InteractionPolicy`] for notifications that listeners may both
/// modify and veto.
#[derive(Copy, Clone, Debug, Default)]
pub struct ActorPolicy;

impl<T> ResultPolicy<Actor<T>> for ActorPolicy
where
    T: ?Sized + 'static,
{
    fn combine(&self, listeners: Rc<[Rc<Actor<T>>]>) -> Rc<Actor<T>> {
        Rc::new(move |value: &mut T| {
            for listener in listeners.iter() {
                let result = listener(value);
                if !result.is_pass() {
                    return result;
                }
            }
            InteractionResult::Pass
        })
    }
}

/// A policy backed by a closure.
///
/// Use this for call shapes the built-in policies do not cover. The closure
/// receives the listener snapshot and returns the composed listener.
///
/// ```
/// use std::rc::Rc;
/// use understory_event::{Event, factory, policy_fn};
///
/// type Sum = dyn Fn(&u32) -> u32;
///
/// let mut event: Event<Sum, _> = factory::of(policy_fn(|listeners: Rc<[Rc<Sum>]>| {
///     Rc::new(move |x: &u32| listeners.iter().map(|l| l(x)).sum::<u32>()) as Rc<Sum>
/// }));
/// event.register(Rc::new(|x: &u32| x + 1));
/// event.register(Rc::new(|x: &u32| x * 2));
/// assert_eq!(event.invoker()(&3), 10);
/// ```
#[derive(Copy, Clone)]
pub struct FnPolicy<F>(F);

/// Wraps a closure as a [`ResultPolicy`].
pub fn policy_fn<F>(f: F) -> FnPolicy<F> {
    FnPolicy(f)
}

impl<L, F> ResultPolicy<L> for FnPolicy<F>
where
    L: ?Sized,
    F: Fn(Rc<[Rc<L>]>) -> Rc<L>,
{
    fn combine(&self, listeners: Rc<[Rc<L>]>) -> Rc<L> {
        (self.0)(listeners)
    }
}

impl<F> fmt::Debug for FnPolicy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPolicy").finish_non_exhaustive()
    }
}
