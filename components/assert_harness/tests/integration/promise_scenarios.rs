//! Promise-style scenarios driven through TestRunContext

use assert_harness::{HarnessError, TestRunContext};
use async_runtime::MicroTask;
use core_types::Value;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A settle-once slot standing in for a promise's internal state.
#[derive(Clone, Default)]
struct Slot(Rc<RefCell<Option<Value>>>);

impl Slot {
    fn resolve(&self, value: Value) {
        self.0.borrow_mut().get_or_insert(value);
    }

    fn value(&self) -> Option<Value> {
        self.0.borrow().clone()
    }
}

/// Resolves `slot` after `hops` microtask hops, like a chain of `then`s.
fn resolve_after(ctx: &mut TestRunContext, slot: Slot, value: Value, hops: u32) {
    fn hop(slot: Slot, value: Value, left: u32) -> MicroTask {
        MicroTask::with_event_loop(move |el| {
            if left <= 1 {
                slot.resolve(value);
            } else {
                el.enqueue_microtask(hop(slot, value, left - 1));
            }
            Ok(Value::Undefined)
        })
    }
    ctx.enqueue_microtask(hop(slot, value, hops));
}

#[test]
fn test_three_assertions_converge_within_budget() {
    let mut ctx = TestRunContext::new();
    let ticks = Rc::new(Cell::new(0u32));

    fn counter(ticks: Rc<Cell<u32>>, left: u32) -> MicroTask {
        MicroTask::with_event_loop(move |el| {
            ticks.set(ticks.get() + 1);
            if left > 1 {
                el.enqueue_microtask(counter(ticks, left - 1));
            }
            Ok(Value::Undefined)
        })
    }
    ctx.enqueue_microtask(counter(ticks.clone(), 10));

    for (label, after) in [("after 1", 1), ("after 2", 2), ("after 10", 10)] {
        let t = ticks.clone();
        ctx.assert_later(label, move || t.get() >= after).unwrap();
    }
    assert_eq!(ctx.pending_count(), 3);

    ctx.run_ticks(10).unwrap();

    assert_eq!(ctx.pending_count(), 0);
    let labels: Vec<&str> = ctx.registry().iter().map(|e| e.description()).collect();
    assert_eq!(labels, vec!["after 1", "after 2", "after 10"]);
    assert!(ctx.registry().iter().all(|e| e.passed()));
}

#[test]
fn test_promise_then_chain() {
    let mut ctx = TestRunContext::new();
    let slot = Slot::default();
    resolve_after(&mut ctx, slot.clone(), Value::from(42), 3);

    let s = slot.clone();
    ctx.assert_later("resolved", move || s.value().is_some()).unwrap();
    ctx.assert_async_done().unwrap();

    let value = slot.value().unwrap_or(Value::Undefined);
    ctx.assert_equals(&Value::from(42), &value, Some("resolution value"))
        .unwrap();
    assert_eq!(ctx.report().passed, 2);
}

#[test]
fn test_never_settling_promise() {
    // the per-assertion budget runs out on the same tick as the aggregate one
    let mut ctx = TestRunContext::new();
    let slot = Slot::default();

    let s = slot.clone();
    ctx.assert_later("never settles", move || s.value().is_some())
        .unwrap();
    match ctx.assert_async_done().unwrap_err() {
        HarnessError::SchedulingExhaustion { label, attempts } => {
            assert_eq!(label, "never settles");
            assert_eq!(attempts, 11);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_already_resolved_is_usage_error() {
    let mut ctx = TestRunContext::new();
    let err = ctx.assert_later("sync", || true).unwrap_err();
    assert!(err.is_usage());
}

#[test]
fn test_slot_settles_once() {
    let mut ctx = TestRunContext::new();
    let slot = Slot::default();
    resolve_after(&mut ctx, slot.clone(), Value::from("first"), 1);
    resolve_after(&mut ctx, slot.clone(), Value::from("second"), 2);
    ctx.run_until_idle().unwrap();

    let value = slot.value().unwrap_or(Value::Undefined);
    ctx.assert_same(&Value::from("first"), &value, None).unwrap();
}
