// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_event` crate.
//!
//! These exercise dispatch through the public API: per-policy results and
//! short circuits, the invoker cache across mutations, and fault propagation.

use std::cell::RefCell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use understory_event::factory::{self, LoopEvent};
use understory_event::{
    Actor, InteractionListener, InteractionResult, InteractionResultHolder, LoopListener,
    TryLoopListener,
};

type Log = Rc<RefCell<Vec<u32>>>;

fn recorder(log: &Log, id: u32) -> Rc<LoopListener<()>> {
    let log = log.clone();
    Rc::new(move |_: &()| log.borrow_mut().push(id))
}

fn fire(event: &LoopEvent<()>, log: &Log) -> Vec<u32> {
    log.borrow_mut().clear();
    event.invoker()(&());
    log.borrow().clone()
}

fn interaction(log: &Log, id: u32, result: InteractionResult) -> Rc<InteractionListener<()>> {
    let log = log.clone();
    Rc::new(move |_: &()| {
        log.borrow_mut().push(id);
        result
    })
}

#[test]
fn loop_dispatches_in_registration_order() {
    for n in [0_u32, 1, 5] {
        let log = Log::default();
        let mut event = factory::create_loop::<()>();
        for id in 1..=n {
            event.register(recorder(&log, id));
        }
        assert_eq!(fire(&event, &log), (1..=n).collect::<Vec<_>>(), "n = {n}");
    }
}

#[test]
fn interaction_stops_at_first_veto() {
    let log = Log::default();
    let mut event = factory::create_interaction_result::<()>();
    event.register(interaction(&log, 1, InteractionResult::Pass));
    event.register(interaction(&log, 2, InteractionResult::Pass));
    event.register(interaction(&log, 3, InteractionResult::Fail));
    event.register(interaction(&log, 4, InteractionResult::Pass));

    assert_eq!(event.invoker()(&()), InteractionResult::Fail);
    assert_eq!(*log.borrow(), [1, 2, 3]);
}

#[test]
fn interaction_all_pass_returns_pass() {
    let log = Log::default();
    let mut event = factory::create_interaction_result::<()>();
    event.register(interaction(&log, 1, InteractionResult::Pass));
    event.register(interaction(&log, 2, InteractionResult::Pass));

    assert_eq!(event.invoker()(&()), InteractionResult::Pass);
    assert_eq!(*log.borrow(), [1, 2]);
}

#[test]
fn holder_returns_first_non_pass_pair() {
    let log = Log::default();
    let mut event = factory::create_interaction_result_holder::<(), &'static str>();
    let l1 = log.clone();
    event.register(Rc::new(move |_: &()| {
        l1.borrow_mut().push(1);
        InteractionResultHolder::empty()
    }));
    let l2 = log.clone();
    event.register(Rc::new(move |_: &()| {
        l2.borrow_mut().push(2);
        InteractionResultHolder::success("x")
    }));
    let l3 = log.clone();
    event.register(Rc::new(move |_: &()| {
        l3.borrow_mut().push(3);
        InteractionResultHolder::fail("y")
    }));

    let held = event.invoker()(&());
    assert_eq!(held.into_parts(), (InteractionResult::Success, Some("x")));
    assert_eq!(*log.borrow(), [1, 2]);
}

#[test]
fn actor_shares_the_argument_and_short_circuits() {
    let mut event = factory::create_actor_loop::<Vec<&'static str>>();
    let first: Rc<Actor<Vec<&'static str>>> = Rc::new(|v: &mut Vec<&'static str>| {
        v.push("first");
        InteractionResult::Pass
    });
    event.register(first);
    event.register(Rc::new(|v: &mut Vec<&'static str>| {
        v.push("veto");
        InteractionResult::Fail
    }));
    event.register(Rc::new(|v: &mut Vec<&'static str>| {
        v.push("never");
        InteractionResult::Pass
    }));

    let mut seen = Vec::new();
    assert_eq!(event.invoker()(&mut seen), InteractionResult::Fail);
    assert_eq!(seen, ["first", "veto"]);
}

#[test]
fn invoker_is_never_stale() {
    let log = Log::default();
    let a = recorder(&log, 1);
    let b = recorder(&log, 2);
    let c = recorder(&log, 3);
    let mut event = factory::create_loop::<()>();

    event.register(a.clone());
    event.register(b.clone());
    assert_eq!(fire(&event, &log), [1, 2]);

    event.register(c.clone());
    assert_eq!(fire(&event, &log), [1, 2, 3]);

    event.unregister(&a);
    assert_eq!(fire(&event, &log), [2, 3]);

    event.register(a.clone());
    assert_eq!(fire(&event, &log), [2, 3, 1]);

    event.clear_listeners();
    assert_eq!(fire(&event, &log), Vec::<u32>::new());

    event.register(c);
    assert_eq!(fire(&event, &log), [3]);
}

#[test]
fn register_then_unregister_round_trips() {
    let log = Log::default();
    let mut event = factory::create_loop::<()>();
    event.register(recorder(&log, 1));
    event.register(recorder(&log, 2));
    let before = fire(&event, &log);

    let extra = recorder(&log, 9);
    event.register(extra.clone());
    assert!(event.is_registered(&extra));
    assert!(event.unregister(&extra));
    assert!(!event.is_registered(&extra));

    assert_eq!(fire(&event, &log), before);
}

#[test]
fn duplicate_registration_dispatches_twice() {
    let log = Log::default();
    let twice = recorder(&log, 1);
    let mut event = factory::create_loop::<()>();
    event.register(twice.clone());
    event.register(twice.clone());
    assert_eq!(fire(&event, &log), [1, 1]);

    assert!(event.unregister(&twice));
    assert!(event.is_empty());
}

#[test]
fn single_listener_fast_path_returns_the_listener() {
    let log = Log::default();
    let only = recorder(&log, 1);
    let mut event = factory::create_loop::<()>();
    event.register(only.clone());
    assert!(Rc::ptr_eq(&event.invoker(), &only));
}

fn blow_up(_: &()) {
    panic!("listener blew up");
}

#[test]
fn panicking_listener_aborts_dispatch() {
    let log = Log::default();
    let mut event = factory::create_loop::<()>();
    event.register(recorder(&log, 1));
    event.register(Rc::new(blow_up));
    event.register(recorder(&log, 3));

    let invoker = event.invoker();
    let payload = catch_unwind(AssertUnwindSafe(|| invoker(&()))).unwrap_err();
    assert_eq!(payload.downcast_ref::<&str>(), Some(&"listener blew up"));
    assert_eq!(*log.borrow(), [1]);
}

#[test]
fn failing_listener_error_is_returned_unchanged() {
    let log = Log::default();
    let mut event = factory::create_try_loop::<(), String>();
    let step = |id: u32, fail: bool| -> Rc<TryLoopListener<(), String>> {
        let log = log.clone();
        Rc::new(move |_: &()| {
            log.borrow_mut().push(id);
            if fail { Err(format!("listener {id}")) } else { Ok(()) }
        })
    };
    event.register(step(1, false));
    event.register(step(2, true));
    event.register(step(3, false));

    assert_eq!(event.invoker()(&()), Err("listener 2".to_string()));
    assert_eq!(*log.borrow(), [1, 2]);
}

#[test]
fn listeners_may_mutate_a_slot_during_dispatch() {
    thread_local! {
        static SLOT: RefCell<LoopEvent<u32>> = RefCell::new(factory::create_loop());
    }

    let log = Log::default();
    let late_log = log.clone();
    let late: Rc<LoopListener<u32>> = Rc::new(move |x: &u32| late_log.borrow_mut().push(*x + 100));
    let registering_log = log.clone();
    let registers_late = late.clone();
    SLOT.with_borrow_mut(|e| {
        e.register(Rc::new(move |x: &u32| {
            registering_log.borrow_mut().push(*x);
            let late = registers_late.clone();
            SLOT.with_borrow_mut(|e| {
                if !e.is_registered(&late) {
                    e.register(late);
                }
            });
        }));
    });

    let first = SLOT.with_borrow(|e| e.invoker());
    first(&1);
    assert_eq!(*log.borrow(), [1]);

    let second = SLOT.with_borrow(|e| e.invoker());
    second(&2);
    assert_eq!(*log.borrow(), [1, 2, 102]);
    assert!(SLOT.with_borrow(|e| e.is_registered(&late)));
}
