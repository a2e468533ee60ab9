// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hook for forwarding events to a host event bus.
//!
//! Some events mirror an event type that a host runtime already dispatches on
//! its own bus. The factory constructors
//! [`create_consumer_loop_with`](crate::factory::create_consumer_loop_with) and
//! [`create_actor_loop_with`](crate::factory::create_actor_loop_with) take a
//! [`Forwarding`] tag and a [`PlatformBridge`]; when the tag asks for it, the
//! bridge is handed the fresh event once, before the constructor returns.
//!
//! A bridge only ever sees an [`Attachment`]. The attachment can register a
//! single listener and nothing else, so a bridge cannot inspect, reorder, or
//! clear the event's other listeners.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_event::{
//!     Actor, ActorPolicy, Attachment, BridgeError, Forwarding, InteractionResult,
//!     PlatformBridge, factory,
//! };
//!
//! struct Chat { text: String, cancelled: bool }
//!
//! /// Host bus that records what it saw and cancels shouting.
//! #[derive(Default)]
//! struct HostBus { posted: Rc<RefCell<Vec<String>>> }
//!
//! impl PlatformBridge<Chat> for HostBus {
//!     fn attach_cancellable_actor(
//!         &self,
//!         attachment: Attachment<'_, Actor<Chat>, ActorPolicy>,
//!     ) -> Result<(), BridgeError> {
//!         let posted = self.posted.clone();
//!         attachment.register(Rc::new(move |chat: &mut Chat| {
//!             posted.borrow_mut().push(chat.text.clone());
//!             chat.cancelled = chat.text.chars().all(|c| !c.is_lowercase());
//!             if chat.cancelled { InteractionResult::Fail } else { InteractionResult::Pass }
//!         }));
//!         Ok(())
//!     }
//! }
//!
//! let bus = HostBus::default();
//! let event = factory::create_actor_loop_with::<Chat, _>(Forwarding::ForwardCancellable, &bus)
//!     .unwrap();
//! assert_eq!(event.len(), 1);
//!
//! let mut chat = Chat { text: "HELLO".into(), cancelled: false };
//! assert_eq!(event.invoker()(&mut chat), InteractionResult::Fail);
//! assert_eq!(*bus.posted.borrow(), vec!["HELLO".to_string()]);
//! ```

use alloc::rc::Rc;
use core::any::type_name;
use core::fmt;

use crate::error::BridgeError;
use crate::event::Event;
use crate::policy::{Actor, ActorPolicy, Consumer, ConsumerPolicy};

/// Whether, and how, a freshly built event is forwarded to the host bus.
///
/// This is declared by the code that constructs the event. It is read exactly
/// once, by the factory constructor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Forwarding {
    /// Listeners registered in this process only; the bridge is not called.
    #[default]
    Local,
    /// Every dispatch is also posted to the host bus.
    Forward,
    /// Every dispatch is posted to the host bus, and host cancellation is
    /// reported as [`InteractionResult::Fail`](crate::InteractionResult::Fail).
    ///
    /// Only shapes that return an [`InteractionResult`](crate::InteractionResult)
    /// support this.
    ForwardCancellable,
}

/// One-shot permission to append a single listener to an event.
pub struct Attachment<'a, L: ?Sized, P> {
    event: &'a mut Event<L, P>,
}

impl<'a, L: ?Sized, P> Attachment<'a, L, P> {
    pub(crate) fn new(event: &'a mut Event<L, P>) -> Self {
        Self { event }
    }

    /// Type name of the listener shape being attached to.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        type_name::<L>()
    }

    /// Appends `listener` to the event and consumes the attachment.
    pub fn register(self, listener: Rc<L>) {
        self.event.register(listener);
        tracing::debug!(shape = type_name::<L>(), "bridge attached forwarding listener");
    }
}

impl<L: ?Sized, P> fmt::Debug for Attachment<'_, L, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("shape", &type_name::<L>())
            .finish_non_exhaustive()
    }
}

/// Adapter that forwards events with argument type `T` to a host bus.
///
/// Each method is called at most once per event, during construction, and
/// may register at most one listener through the [`Attachment`]. The default
/// implementations refuse, so a bridge only implements the forms its host
/// supports; requesting any other form fails construction with the returned
/// [`BridgeError`].
pub trait PlatformBridge<T: ?Sized + 'static> {
    /// Attach a listener that posts each consumer dispatch to the host bus.
    fn attach_consumer(
        &self,
        attachment: Attachment<'_, Consumer<T>, ConsumerPolicy>,
    ) -> Result<(), BridgeError> {
        Err(BridgeError::UnsupportedShape {
            shape: attachment.shape(),
        })
    }

    /// Attach a listener that posts each actor dispatch to the host bus and
    /// passes.
    fn attach_actor(
        &self,
        attachment: Attachment<'_, Actor<T>, ActorPolicy>,
    ) -> Result<(), BridgeError> {
        Err(BridgeError::UnsupportedShape {
            shape: attachment.shape(),
        })
    }

    /// Attach a listener that posts each actor dispatch to the host bus and
    /// fails when the host cancels it.
    fn attach_cancellable_actor(
        &self,
        attachment: Attachment<'_, Actor<T>, ActorPolicy>,
    ) -> Result<(), BridgeError> {
        Err(BridgeError::NotCancellable {
            shape: attachment.shape(),
        })
    }
}

impl<T, B> PlatformBridge<T> for &B
where
    T: ?Sized + 'static,
    B: PlatformBridge<T> + ?Sized,
{
    fn attach_consumer(
        &self,
        attachment: Attachment<'_, Consumer<T>, ConsumerPolicy>,
    ) -> Result<(), BridgeError> {
        (*self).attach_consumer(attachment)
    }

    fn attach_actor(
        &self,
        attachment: Attachment<'_, Actor<T>, ActorPolicy>,
    ) -> Result<(), BridgeError> {
        (*self).attach_actor(attachment)
    }

    fn attach_cancellable_actor(
        &self,
        attachment: Attachment<'_, Actor<T>, ActorPolicy>,
    ) -> Result<(), BridgeError> {
        (*self).attach_cancellable_actor(attachment)
    }
}
