// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named constructors, one per supported call shape.
//!
//! Each constructor binds the matching [`ResultPolicy`] to a fresh [`Event`].
//! Policies are only implemented for the shapes they understand, so asking
//! for, say, an interaction event over listeners that return `()` is a compile
//! error rather than a runtime failure.
//!
//! | Constructor                           | Shape                          | Policy                |
//! |---------------------------------------|--------------------------------|-----------------------|
//! | [`create_loop`]                       | [`LoopListener<A>`]            | [`LoopPolicy`]        |
//! | [`create_try_loop`]                   | [`TryLoopListener<A, E>`]      | [`TryLoopPolicy`]     |
//! | [`create_interaction_result`]         | [`InteractionListener<A>`]     | [`InteractionPolicy`] |
//! | [`create_interaction_result_holder`]  | [`HolderListener<A, V>`]       | [`HolderPolicy`]      |
//! | [`create_consumer_loop`]              | [`Consumer<T>`]                | [`ConsumerPolicy`]    |
//! | [`create_actor_loop`]                 | [`Actor<T>`]                   | [`ActorPolicy`]       |
//! | [`of`]                                | any                            | caller supplied       |
//!
//! [`create_consumer_loop_with`] and [`create_actor_loop_with`] additionally
//! hand the new event to a [`PlatformBridge`] according to a [`Forwarding`]
//! tag; see the [`bridge`](crate::bridge) module.

use core::any::type_name;

use crate::bridge::{Attachment, Forwarding, PlatformBridge};
use crate::error::FactoryError;
use crate::event::Event;
use crate::policy::{
    Actor, ActorPolicy, Consumer, ConsumerPolicy, HolderListener, HolderPolicy,
    InteractionListener, InteractionPolicy, LoopListener, LoopPolicy, ResultPolicy,
    TryLoopListener, TryLoopPolicy,
};

/// Event of plain notifications.
pub type LoopEvent<A> = Event<LoopListener<A>, LoopPolicy>;
/// Event of fallible notifications.
pub type TryLoopEvent<A, E> = Event<TryLoopListener<A, E>, TryLoopPolicy>;
/// Event of vetoable notifications.
pub type InteractionEvent<A> = Event<InteractionListener<A>, InteractionPolicy>;
/// Event of vetoable notifications carrying a payload.
pub type HolderEvent<A, V> = Event<HolderListener<A, V>, HolderPolicy>;
/// Event of shared mutable values.
pub type ConsumerEvent<T> = Event<Consumer<T>, ConsumerPolicy>;
/// Event of shared mutable values that listeners may veto.
pub type ActorEvent<T> = Event<Actor<T>, ActorPolicy>;

/// Creates an event with a caller-supplied policy.
///
/// The listener shape `L` usually has to be named at the call site.
#[must_use]
pub fn of<L, P>(policy: P) -> Event<L, P>
where
    L: ?Sized,
    P: ResultPolicy<L>,
{
    Event::new(policy)
}

/// Creates a notification event: every listener is called, in order.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use understory_event::factory;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let mut tick = factory::create_loop::<u64>();
/// for id in 1..=3 {
///     let seen = seen.clone();
///     tick.register(Rc::new(move |t: &u64| seen.borrow_mut().push((id, *t))));
/// }
/// tick.invoker()(&42);
/// assert_eq!(*seen.borrow(), vec![(1, 42), (2, 42), (3, 42)]);
/// ```
#[must_use]
pub fn create_loop<A>() -> LoopEvent<A>
where
    A: ?Sized + 'static,
{
    Event::new(LoopPolicy)
}

/// Creates a fallible notification event: the first `Err` stops dispatch.
#[must_use]
pub fn create_try_loop<A, E>() -> TryLoopEvent<A, E>
where
    A: ?Sized + 'static,
    E: 'static,
{
    Event::new(TryLoopPolicy)
}

/// Creates a vetoable event: the first non-`Pass` outcome wins.
#[must_use]
pub fn create_interaction_result<A>() -> InteractionEvent<A>
where
    A: ?Sized + 'static,
{
    Event::new(InteractionPolicy)
}

/// Creates a vetoable event whose outcome carries a payload.
///
/// ```
/// use std::rc::Rc;
/// use understory_event::{InteractionResult, InteractionResultHolder, factory};
///
/// let mut use_item = factory::create_interaction_result_holder::<u32, &'static str>();
/// use_item.register(Rc::new(|_: &u32| InteractionResultHolder::empty()));
/// use_item.register(Rc::new(|slot: &u32| {
///     if *slot == 0 { InteractionResultHolder::success("torch") } else { InteractionResultHolder::empty() }
/// }));
///
/// let held = use_item.invoker()(&0);
/// assert_eq!(held.into_parts(), (InteractionResult::Success, Some("torch")));
/// assert_eq!(use_item.invoker()(&1), InteractionResultHolder::empty());
/// ```
#[must_use]
pub fn create_interaction_result_holder<A, V>() -> HolderEvent<A, V>
where
    A: ?Sized + 'static,
    V: 'static,
{
    Event::new(HolderPolicy)
}

/// Creates an event that hands one mutable value to every listener.
#[must_use]
pub fn create_consumer_loop<T>() -> ConsumerEvent<T>
where
    T: ?Sized + 'static,
{
    Event::new(ConsumerPolicy)
}

/// Creates a vetoable event over one mutable value.
#[must_use]
pub fn create_actor_loop<T>() -> ActorEvent<T>
where
    T: ?Sized + 'static,
{
    Event::new(ActorPolicy)
}

/// Creates a consumer event and attaches `bridge` according to `forwarding`.
///
/// # Errors
///
/// - [`FactoryError::CancellationUnsupported`] for
///   [`Forwarding::ForwardCancellable`]: a consumer has no result to report a
///   host cancellation through.
/// - [`FactoryError::Bridge`] when the bridge refuses the event.
pub fn create_consumer_loop_with<T, B>(
    forwarding: Forwarding,
    bridge: &B,
) -> Result<ConsumerEvent<T>, FactoryError>
where
    T: ?Sized + 'static,
    B: PlatformBridge<T> + ?Sized,
{
    let mut event = create_consumer_loop::<T>();
    match forwarding {
        Forwarding::Local => {}
        Forwarding::Forward => bridge.attach_consumer(Attachment::new(&mut event))?,
        Forwarding::ForwardCancellable => {
            return Err(FactoryError::CancellationUnsupported {
                shape: type_name::<Consumer<T>>(),
            });
        }
    }
    tracing::debug!(
        shape = type_name::<Consumer<T>>(),
        ?forwarding,
        listeners = event.len(),
        "created consumer event"
    );
    Ok(event)
}

/// Creates an actor event and attaches `bridge` according to `forwarding`.
///
/// # Errors
///
/// [`FactoryError::Bridge`] when the bridge refuses the event, for example
/// because the host cannot cancel events of type `T`.
pub fn create_actor_loop_with<T, B>(
    forwarding: Forwarding,
    bridge: &B,
) -> Result<ActorEvent<T>, FactoryError>
where
    T: ?Sized + 'static,
    B: PlatformBridge<T> + ?Sized,
{
    let mut event = create_actor_loop::<T>();
    match forwarding {
        Forwarding::Local => {}
        Forwarding::Forward => bridge.attach_actor(Attachment::new(&mut event))?,
        Forwarding::ForwardCancellable => {
            bridge.attach_cancellable_actor(Attachment::new(&mut event))?;
        }
    }
    tracing::debug!(
        shape = type_name::<Actor<T>>(),
        ?forwarding,
        listeners = event.len(),
        "created actor event"
    );
    Ok(event)
}
