use std::cell::RefCell;
use serde_json::Value;
use vow::vm::{Lookup, Reason, Resolution, Resolver, Thenable};

/// Calls resolve once per value, synchronously.
pub struct Repeat(pub Vec<Value>);

impl Thenable for Repeat {
    fn then(&self, resolver: Resolver) -> Result<(), Reason> {
        for value in &self.0 {
            resolver.resolve(value.clone());
        }
        Ok(())
    }
}

/// Rejects, then resolves, then throws.
pub struct Everything;

impl Thenable for Everything {
    fn then(&self, resolver: Resolver) -> Result<(), Reason> {
        resolver.reject("first");
        resolver.resolve(Value::from("second"));
        Err(Reason::from("third"))
    }
}

/// Resolves, then throws.
pub struct ResolveThenThrow(pub Value);

impl Thenable for ResolveThenThrow {
    fn then(&self, resolver: Resolver) -> Result<(), Reason> {
        resolver.resolve(self.0.clone());
        Err(Reason::from("too late"))
    }
}

/// Throws without calling anything.
pub struct Throw(pub &'static str);

impl Thenable for Throw {
    fn then(&self, _resolver: Resolver) -> Result<(), Reason> {
        Err(Reason::from(self.0))
    }
}

/// Fails while its `then` is being read.
pub struct BrokenLookup;

impl Thenable for BrokenLookup {
    fn lookup(&self) -> Result<Lookup, Reason> {
        Err(Reason::from("lookup failed"))
    }

    fn then(&self, _resolver: Resolver) -> Result<(), Reason> {
        unreachable!("then called after failed lookup")
    }
}

/// Has a `then` that is not callable.
pub struct NotCallable(pub Value);

impl Thenable for NotCallable {
    fn lookup(&self) -> Result<Lookup, Reason> {
        Ok(Lookup::Plain(self.0.clone()))
    }

    fn then(&self, _resolver: Resolver) -> Result<(), Reason> {
        unreachable!("then called on a plain value")
    }
}

/// Keeps the resolver so the test can settle it later.
#[derive(Default)]
pub struct Later(pub RefCell<Option<Resolver>>);

impl Thenable for Later {
    fn then(&self, resolver: Resolver) -> Result<(), Reason> {
        *self.0.borrow_mut() = Some(resolver);
        Ok(())
    }
}

impl Later {
    pub fn resolver(&self) -> Resolver {
        self.0.borrow().clone().expect("then not called yet")
    }
}

/// Resolves with a thenable that resolves with `value`.
pub struct Nested(pub Value);

impl Thenable for Nested {
    fn then(&self, resolver: Resolver) -> Result<(), Reason> {
        resolver.resolve(Resolution::thenable(Repeat(vec![self.0.clone()])));
        Ok(())
    }
}
