// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outcome values returned by short-circuiting listeners.

/// Tri-state outcome of a vetoable listener.
///
/// Short-circuiting policies keep calling listeners while they return
/// [`InteractionResult::Pass`] and stop at the first other value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionResult {
    /// The listener has no opinion; dispatch continues.
    #[default]
    Pass,
    /// The listener accepted or handled the event; dispatch stops.
    Success,
    /// The listener denied the event; dispatch stops.
    Fail,
}

impl InteractionResult {
    /// Returns `true` for [`InteractionResult::Pass`].
    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns `true` for [`InteractionResult::Success`].
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns `true` for [`InteractionResult::Fail`].
    #[must_use]
    pub const fn is_fail(self) -> bool {
        matches!(self, Self::Fail)
    }
}

/// An [`InteractionResult`] paired with an optional payload.
///
/// The default holder is `(Pass, None)`, which is also what a holder event
/// returns when every listener passes.
///
/// ```
/// use understory_event::{InteractionResult, InteractionResultHolder};
///
/// let held = InteractionResultHolder::success("sword");
/// assert_eq!(held.result(), InteractionResult::Success);
/// assert_eq!(held.value(), Some(&"sword"));
///
/// let empty = InteractionResultHolder::<&str>::default();
/// assert!(empty.result().is_pass());
/// assert_eq!(empty.value(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InteractionResultHolder<V> {
    result: InteractionResult,
    value: Option<V>,
}

impl<V> InteractionResultHolder<V> {
    /// Creates a holder from its parts.
    #[must_use]
    pub const fn new(result: InteractionResult, value: Option<V>) -> Self {
        Self { result, value }
    }

    /// `(Pass, None)`.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(InteractionResult::Pass, None)
    }

    /// `(Pass, Some(value))`.
    #[must_use]
    pub const fn pass(value: V) -> Self {
        Self::new(InteractionResult::Pass, Some(value))
    }

    /// `(Success, Some(value))`.
    #[must_use]
    pub const fn success(value: V) -> Self {
        Self::new(InteractionResult::Success, Some(value))
    }

    /// `(Fail, Some(value))`.
    #[must_use]
    pub const fn fail(value: V) -> Self {
        Self::new(InteractionResult::Fail, Some(value))
    }

    /// The outcome part of the holder.
    #[must_use]
    pub const fn result(&self) -> InteractionResult {
        self.result
    }

    /// The payload, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Consumes the holder and returns the payload.
    #[must_use]
    pub fn into_value(self) -> Option<V> {
        self.value
    }

    /// Consumes the holder and returns both parts.
    #[must_use]
    pub fn into_parts(self) -> (InteractionResult, Option<V>) {
        (self.result, self.value)
    }
}

impl<V> Default for InteractionResultHolder<V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<V> From<InteractionResult> for InteractionResultHolder<V> {
    fn from(result: InteractionResult) -> Self {
        Self::new(result, None)
    }
}
