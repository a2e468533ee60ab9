// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Invoker builder: materialize one composed listener from many.
//!
//! [`build`] takes an ordered listener slice and a [`ResultPolicy`] and
//! returns a single listener of the same shape. The composed listener owns an
//! immutable snapshot of the listener pointers, so later changes to the source
//! sequence never leak into an invoker that was already handed out.
//!
//! Rules:
//!
//! - Listeners are called in slice order with the same arguments.
//! - The policy alone decides when to stop early.
//! - A panicking listener unwinds straight through the composed listener; no
//!   later listener runs for that call.
//! - A single listener is returned as is, without a fan-out wrapper.

use alloc::rc::Rc;

use crate::policy::ResultPolicy;

/// Composes `listeners` into one listener using `policy`.
///
/// `listeners` is only read. With exactly one listener the result is that
/// listener itself (the same allocation); otherwise the policy builds a
/// wrapper over a snapshot of the slice, including for the empty slice.
///
/// ```
/// use std::rc::Rc;
/// use understory_event::{InteractionListener, InteractionPolicy, InteractionResult, invoker};
///
/// let deny: Rc<InteractionListener<u32>> = Rc::new(|x: &u32| {
///     if *x > 3 { InteractionResult::Fail } else { InteractionResult::Pass }
/// });
///
/// let single = invoker::build(&[deny.clone()], &InteractionPolicy);
/// assert!(Rc::ptr_eq(&single, &deny));
///
/// let none = invoker::build::<InteractionListener<u32>, _>(&[], &InteractionPolicy);
/// assert_eq!(none(&10), InteractionResult::Pass);
/// ```
pub fn build<L, P>(listeners: &[Rc<L>], policy: &P) -> Rc<L>
where
    L: ?Sized,
    P: ResultPolicy<L> + ?Sized,
{
    match listeners {
        [only] => Rc::clone(only),
        _ => policy.combine(Rc::from(listeners)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{InteractionListener, InteractionPolicy, LoopListener, LoopPolicy};
    use crate::result::InteractionResult;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn recorder(log: &Rc<RefCell<Vec<u32>>>, id: u32) -> Rc<LoopListener<()>> {
        let log = log.clone();
        Rc::new(move |_: &()| log.borrow_mut().push(id))
    }

    #[test]
    fn calls_in_slice_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let listeners = vec![recorder(&log, 3), recorder(&log, 1), recorder(&log, 2)];
        build(&listeners, &LoopPolicy)(&());
        assert_eq!(*log.borrow(), vec![3, 1, 2]);
    }

    #[test]
    fn composed_listener_is_a_snapshot() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = vec![recorder(&log, 1), recorder(&log, 2)];
        let composed = build(&listeners, &LoopPolicy);

        listeners.push(recorder(&log, 3));
        composed(&());
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn single_listener_is_returned_unwrapped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let only = recorder(&log, 7);
        let composed = build(core::slice::from_ref(&only), &LoopPolicy);
        assert!(Rc::ptr_eq(&composed, &only));
    }

    #[test]
    fn does_not_call_listeners_while_building() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let listeners = vec![recorder(&log, 1), recorder(&log, 2)];
        let _composed = build(&listeners, &LoopPolicy);
        assert!(log.borrow().is_empty());
    }

    #[test]
    #[should_panic(expected = "listener 2 failed")]
    fn listener_panic_propagates() {
        let listeners: Vec<Rc<InteractionListener<u32>>> = vec![
            Rc::new(|_: &u32| InteractionResult::Pass),
            Rc::new(|_: &u32| -> InteractionResult { panic!("listener 2 failed") }),
            Rc::new(|_: &u32| InteractionResult::Success),
        ];
        let _ = build(&listeners, &InteractionPolicy)(&0);
    }
}
