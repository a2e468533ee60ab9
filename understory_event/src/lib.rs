// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Event: many listeners, called as one.
//!
//! ## Overview
//!
//! An [`Event`] owns the listeners registered for one event slot. All
//! listeners share a call shape, such as `dyn Fn(&A)` or
//! `dyn Fn(&mut T) -> InteractionResult`. Producers never iterate the
//! listeners themselves: they ask the event for its [invoker](Event::invoker),
//! a single listener of the same shape, and call it.
//!
//! How N listener calls become one result is decided by a [`ResultPolicy`]
//! bound when the event is created:
//!
//! - [`LoopPolicy`]: call everything, return nothing.
//! - [`TryLoopPolicy`]: call until the first `Err`, return it.
//! - [`InteractionPolicy`]: call until the first non-`Pass` [`InteractionResult`], return it.
//! - [`HolderPolicy`]: like `InteractionPolicy`, with a payload ([`InteractionResultHolder`]).
//! - [`ConsumerPolicy`]: call everything with one shared `&mut T`.
//! - [`ActorPolicy`]: like `InteractionPolicy`, with one shared `&mut T`.
//!
//! The [`factory`] module has one constructor per shape.
//!
//! ## Caching
//!
//! The composed invoker is built on first use and cached. Registering,
//! clearing, or successfully unregistering drops the cache, and the next
//! [`Event::invoker`] call rebuilds it. Dispatch between mutations costs one
//! `Rc` clone plus the listener calls themselves.
//!
//! With no listeners the invoker returns the policy's default (`()`, `Ok(())`,
//! `Pass`, or `(Pass, None)`). With exactly one listener the invoker *is* that
//! listener.
//!
//! ## Faults
//!
//! Listeners are called in registration order on the caller's stack. A panic
//! in a listener unwinds through the invoker to the caller and no later
//! listener runs. Use [`TryLoopListener`] when listeners report failures as
//! values.
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use understory_event::{InteractionListener, InteractionResult, factory};
//!
//! let mut break_block = factory::create_interaction_result::<(i32, i32)>();
//!
//! let protect_spawn: Rc<InteractionListener<(i32, i32)>> = Rc::new(|&(x, z): &(i32, i32)| {
//!     if x.abs() < 16 && z.abs() < 16 { InteractionResult::Fail } else { InteractionResult::Pass }
//! });
//! break_block.register(protect_spawn.clone());
//!
//! assert_eq!(break_block.invoker()(&(3, 4)), InteractionResult::Fail);
//! assert_eq!(break_block.invoker()(&(300, 4)), InteractionResult::Pass);
//!
//! break_block.unregister(&protect_spawn);
//! assert_eq!(break_block.invoker()(&(3, 4)), InteractionResult::Pass);
//! ```
//!
//! ## Process-wide events
//!
//! Events are `!Send` and `!Sync`; registration and dispatch happen on one
//! thread. A catalog of process-wide events is a set of `thread_local!`
//! slots owned by the module that declares them. Clone the invoker out of
//! the slot before calling it, so listeners may register or unregister
//! during dispatch:
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_event::factory::{self, LoopEvent};
//!
//! thread_local! {
//!     static SERVER_TICK: RefCell<LoopEvent<u64>> = RefCell::new(factory::create_loop());
//! }
//!
//! SERVER_TICK.with_borrow_mut(|e| e.register(Rc::new(|tick: &u64| assert_eq!(*tick, 7))));
//! let invoker = SERVER_TICK.with_borrow(|e| e.invoker());
//! invoker(&7);
//! ```
//!
//! ## Host buses
//!
//! The [`bridge`] module lets a host adapter append one forwarding listener
//! when an event is created, selected with an explicit [`Forwarding`] tag.
//!
//! ## Logging
//!
//! Registration changes and invoker rebuilds are reported as `tracing`
//! events at `TRACE` level; bridge attachment and bridged construction at
//! `DEBUG`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod bridge;
mod error;
mod event;
pub mod factory;
pub mod invoker;
mod policy;
mod result;

pub use bridge::{Attachment, Forwarding, PlatformBridge};
pub use error::{BridgeError, FactoryError};
pub use event::Event;
pub use policy::{
    Actor, ActorPolicy, Consumer, ConsumerPolicy, FnPolicy, HolderListener, HolderPolicy,
    InteractionListener, InteractionPolicy, LoopListener, LoopPolicy, ResultPolicy,
    TryLoopListener, TryLoopPolicy, policy_fn,
};
pub use result::{InteractionResult, InteractionResultHolder};
