// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while building events.
//!
//! Dispatch itself has no error type: listener panics unwind through the
//! composed invoker, and fallible shapes return their own error values.

use alloc::borrow::Cow;

use thiserror::Error;

/// A bridge refused to attach to an event.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// The host bus cannot represent the event's argument type.
    #[error("`{shape}` cannot be represented on the host event bus")]
    UnsupportedShape {
        /// Type name of the rejected argument.
        shape: &'static str,
    },
    /// Cancellable forwarding was requested for a host event that cannot be cancelled.
    #[error("`{shape}` is not cancellable on the host event bus")]
    NotCancellable {
        /// Type name of the rejected argument.
        shape: &'static str,
    },
    /// Any other host-specific refusal.
    #[error("{0}")]
    Other(Cow<'static, str>),
}

/// An event could not be constructed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FactoryError {
    /// Cancellable forwarding needs a result to carry the veto, which the
    /// requested shape does not have.
    #[error("`{shape}` has no result to report host cancellation through")]
    CancellationUnsupported {
        /// Type name of the listener shape.
        shape: &'static str,
    },
    /// The bridge rejected the freshly built event.
    #[error("platform bridge rejected the event")]
    Bridge(#[from] BridgeError),
}
