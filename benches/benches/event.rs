// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::rc::Rc;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_event::factory::{self, InteractionEvent, LoopEvent};
use understory_event::{InteractionListener, InteractionResult, LoopListener};

fn loop_event(n: u32, counter: &Rc<Cell<u64>>) -> LoopEvent<u64> {
    let mut event = factory::create_loop::<u64>();
    for _ in 0..n {
        let counter = counter.clone();
        let listener: Rc<LoopListener<u64>> =
            Rc::new(move |x: &u64| counter.set(counter.get().wrapping_add(*x)));
        event.register(listener);
    }
    event
}

fn interaction_event(n: u32) -> InteractionEvent<u32> {
    let mut event = factory::create_interaction_result::<u32>();
    for i in 0..n {
        let listener: Rc<InteractionListener<u32>> = Rc::new(move |x: &u32| {
            if *x == i {
                InteractionResult::Fail
            } else {
                InteractionResult::Pass
            }
        });
        event.register(listener);
    }
    event
}

fn bench_event(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_event");
    group.sample_size(50);

    for &n in &[0_u32, 1, 8, 64] {
        let counter = Rc::new(Cell::new(0));
        let event = loop_event(n, &counter);

        group.bench_function(format!("loop_cached_dispatch(n={n})"), |b| {
            b.iter(|| event.invoker()(black_box(&1)));
        });

        group.bench_function(format!("loop_rebuild_dispatch(n={n})"), |b| {
            b.iter_batched(
                || loop_event(n, &counter),
                |mut event| {
                    // Register + unregister forces a rebuild on the next access.
                    let extra: Rc<LoopListener<u64>> = Rc::new(|_: &u64| {});
                    event.register(extra.clone());
                    event.unregister(&extra);
                    event.invoker()(black_box(&1));
                    black_box(event);
                },
                BatchSize::SmallInput,
            );
        });
    }

    for &n in &[8_u32, 64] {
        let event = interaction_event(n);
        group.bench_function(format!("interaction_veto_midway(n={n})"), |b| {
            b.iter(|| black_box(event.invoker()(black_box(&(n / 2)))));
        });
        group.bench_function(format!("interaction_all_pass(n={n})"), |b| {
            b.iter(|| black_box(event.invoker()(black_box(&u32::MAX))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_event);
criterion_main!(benches);
