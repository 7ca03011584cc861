use std::rc::Rc;
use anyhow::Result;
use serde_json::json;
use vow::{Machine, Promise};
use vow::vm::{Resolution, Thenable};
use common::thenable::*;
mod common;

fn resolve_with(thenable: Rc<dyn Thenable>) -> Result<Result<serde_json::Value, String>> {
    let machine = Machine::new();
    let promise = Promise::pending(&machine.handle());
    promise.resolve(thenable);
    common::settle(&machine, &promise)
}

#[test]
fn only_first_resolution_is_honored() -> Result<()> {
    common::init();
    let outcome = resolve_with(Rc::new(Repeat(vec![json!(1), json!(2)])))?;
    assert_eq!(outcome, Ok(json!(1)));
    Ok(())
}

#[test]
fn first_of_reject_resolve_or_throw_wins() -> Result<()> {
    let outcome = resolve_with(Rc::new(Everything))?;
    assert_eq!(outcome, Err("first".to_owned()));
    Ok(())
}

#[test]
fn throw_after_resolve_is_ignored() -> Result<()> {
    let outcome = resolve_with(Rc::new(ResolveThenThrow(json!("kept"))))?;
    assert_eq!(outcome, Ok(json!("kept")));
    Ok(())
}

#[test]
fn synchronous_throw_rejects() -> Result<()> {
    let outcome = resolve_with(Rc::new(Throw("thrown")))?;
    assert_eq!(outcome, Err("thrown".to_owned()));
    Ok(())
}

#[test]
fn failed_lookup_rejects() -> Result<()> {
    let outcome = resolve_with(Rc::new(BrokenLookup))?;
    assert_eq!(outcome, Err("lookup failed".to_owned()));
    Ok(())
}

#[test]
fn non_callable_then_fulfills_with_value() -> Result<()> {
    let value   = json!({"then": 5});
    let outcome = resolve_with(Rc::new(NotCallable(value.clone())))?;
    assert_eq!(outcome, Ok(value));
    Ok(())
}

#[test]
fn nested_thenables_are_unwrapped() -> Result<()> {
    let outcome = resolve_with(Rc::new(Nested(json!("deep"))))?;
    assert_eq!(outcome, Ok(json!("deep")));
    Ok(())
}

#[test]
fn late_thenable_settles_later_and_once() -> Result<()> {
    let machine = Machine::new();
    let promise = Promise::pending(&machine.handle());
    let later   = Rc::new(Later::default());

    promise.resolve(Resolution::Thenable(later.clone()));
    machine.run()?;
    assert!(promise.state().is_pending());

    let resolver = later.resolver();
    resolver.reject("refused");
    resolver.resolve(json!("accepted"));

    assert_eq!(common::settle(&machine, &promise)?, Err("refused".to_owned()));
    Ok(())
}

#[test]
fn thenable_resolving_with_a_promise_adopts_it() -> Result<()> {
    let machine = Machine::new();
    let handle  = machine.handle();
    let promise = Promise::pending(&handle);
    let later   = Rc::new(Later::default());

    promise.resolve(Resolution::Thenable(later.clone()));

    let inner = Promise::pending(&handle);
    later.resolver().resolve(&inner);
    inner.fulfill(json!([1, 2, 3]));

    assert_eq!(common::settle(&machine, &promise)?, Ok(json!([1, 2, 3])));
    Ok(())
}

#[test]
fn thenable_resolving_with_target_promise_rejects() -> Result<()> {
    let machine = Machine::new();
    let promise = Promise::pending(&machine.handle());
    let later   = Rc::new(Later::default());

    promise.resolve(Resolution::Thenable(later.clone()));
    later.resolver().resolve(&promise);

    let outcome = common::settle(&machine, &promise)?;
    assert_eq!(outcome, Err(vow::vm::Error::Cycle.to_string()));
    Ok(())
}

#[test]
fn handler_may_return_thenable() -> Result<()> {
    let machine = Machine::new();
    let handle  = machine.handle();

    let promise = vow::ex::resolved(&handle, json!(0)).and_then(|_| {
        Ok(Resolution::thenable(Repeat(vec![json!("from thenable")])))
    });

    assert_eq!(common::settle(&machine, &promise)?, Ok(json!("from thenable")));
    Ok(())
}
