use std::cell::{Cell, RefCell};
use std::rc::Rc;
use serde_json::Value;
use tracing::trace;
use crate::vm::{Handle, Promise, Reason, Resolution, Resolver, Settle};

/// Waits for every input to fulfill.
///
/// Fulfills with the results in input order, or rejects with the first
/// rejection to settle. Inputs that are not promises are resolved into
/// fresh promises first.
pub fn all<I>(handle: &Handle, inputs: I) -> Promise
where
    I: IntoIterator,
    I::Item: Into<Resolution>,
{
    let inputs = inputs.into_iter().map(Into::into).collect::<Vec<Resolution>>();

    Promise::new(handle, |resolver| {
        let length = inputs.len();

        if length == 0 {
            resolver.resolve(Value::Array(Vec::new()));
            return;
        }

        let results   = Rc::new(RefCell::new(vec![Value::Null; length]));
        let remaining = Rc::new(Cell::new(length));

        for (index, input) in inputs.into_iter().enumerate() {
            let promise = match input {
                Resolution::Promise(promise) => promise,
                other                        => Promise::new(handle, |r| r.resolve(other)),
            };

            subscribe(&promise, index, &resolver, &results, &remaining);
        }

        trace!(promise = resolver.promise().id(), length, "waiting on all");
    })
}

fn subscribe(
    promise:   &Promise,
    index:     usize,
    resolver:  &Resolver,
    results:   &Rc<RefCell<Vec<Value>>>,
    remaining: &Rc<Cell<usize>>,
) {
    let fulfilled = resolver.clone();
    let rejected  = resolver.clone();
    let results   = results.clone();
    let remaining = remaining.clone();

    promise.then(Some(Box::new(move |value: Value| -> Settle {
        results.borrow_mut()[index] = value;
        remaining.set(remaining.get() - 1);

        if remaining.get() == 0 {
            fulfilled.resolve(Value::Array(results.take()));
        }

        Ok(Resolution::default())
    })), Some(Box::new(move |reason: Reason| -> Settle {
        rejected.reject(reason);
        Ok(Resolution::default())
    })));
}
