use std::cell::Cell;
use std::rc::Rc;
use serde_json::Value;
use tracing::trace;
use super::error::Error;
use super::promise::{Promise, Settle};
use super::reason::Reason;
use super::state::State;

/// Anything a promise can be resolved with.
pub enum Resolution {
    Value(Value),
    Promise(Promise),
    Thenable(Rc<dyn Thenable>),
}

/// A foreign asynchronous source that can be assimilated into a promise.
pub trait Thenable {
    /// Reads the subscribe capability. `Err` rejects the promise being
    /// resolved, `Lookup::Plain` fulfills it with the given value.
    fn lookup(&self) -> Result<Lookup, Reason> {
        Ok(Lookup::Callable)
    }

    /// Subscribes `resolver` to this source. Only the first of resolve,
    /// reject or a returned `Err` takes effect.
    fn then(&self, resolver: Resolver) -> Result<(), Reason>;
}

pub enum Lookup {
    Callable,
    Plain(Value),
}

/// Settle-success and settle-failure capabilities for one promise.
#[derive(Clone)]
pub struct Resolver {
    promise: Promise,
    gate:    Option<Gate>,
}

#[derive(Clone, Default)]
struct Gate(Rc<Cell<bool>>);

impl Resolver {
    pub(crate) fn new(promise: Promise) -> Self {
        Self { promise, gate: None }
    }

    fn gated(promise: Promise) -> Self {
        Self { promise, gate: Some(Gate::default()) }
    }

    pub fn promise(&self) -> &Promise {
        &self.promise
    }

    pub fn resolve<R: Into<Resolution>>(&self, value: R) {
        if self.pass() {
            self.promise.resolve(value);
        }
    }

    pub fn reject<R: Into<Reason>>(&self, reason: R) {
        if self.pass() {
            self.promise.reject(reason);
        }
    }

    fn pass(&self) -> bool {
        match &self.gate {
            Some(gate) => gate.enter(),
            None       => true,
        }
    }
}

impl Gate {
    fn enter(&self) -> bool {
        !self.0.replace(true)
    }
}

impl Promise {
    /// Settles this promise with `value`, adopting promises and thenables.
    ///
    /// Two pending promises resolved with each other hold each other through
    /// their callback queues and are never freed.
    pub fn resolve<R: Into<Resolution>>(&self, value: R) {
        match value.into() {
            Resolution::Value(value)                     => self.fulfill(value),
            Resolution::Promise(other) if other == *self => self.reject(Error::Cycle),
            Resolution::Promise(other)                   => self.adopt(other),
            Resolution::Thenable(thenable)               => self.assimilate(thenable),
        }
    }

    fn adopt(&self, other: Promise) {
        match other.state() {
            State::Fulfilled(value) => self.fulfill(value),
            State::Rejected(reason) => self.reject(reason),
            State::Pending          => {
                trace!(promise = self.id(), source = other.id(), "adopting pending promise");

                let fulfilled = self.clone();
                let rejected  = self.clone();

                other.then(Some(Box::new(move |value: Value| -> Settle {
                    fulfilled.resolve(value);
                    Ok(Resolution::default())
                })), Some(Box::new(move |reason: Reason| -> Settle {
                    rejected.reject(reason);
                    Ok(Resolution::default())
                })));
            }
        }
    }

    fn assimilate(&self, thenable: Rc<dyn Thenable>) {
        let resolver = Resolver::gated(self.clone());

        match thenable.lookup() {
            Ok(Lookup::Callable) => {
                if let Err(reason) = thenable.then(resolver.clone()) {
                    resolver.reject(reason);
                }
            }
            Ok(Lookup::Plain(value)) => resolver.resolve(value),
            Err(reason)              => resolver.reject(reason),
        }
    }
}

impl Resolution {
    pub fn thenable<T: Thenable + 'static>(thenable: T) -> Self {
        Self::Thenable(Rc::new(thenable))
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::Value(Value::Null)
    }
}

impl From<Value> for Resolution {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Promise> for Resolution {
    fn from(promise: Promise) -> Self {
        Self::Promise(promise)
    }
}

impl From<&Promise> for Resolution {
    fn from(promise: &Promise) -> Self {
        Self::Promise(promise.clone())
    }
}

impl From<Rc<dyn Thenable>> for Resolution {
    fn from(thenable: Rc<dyn Thenable>) -> Self {
        Self::Thenable(thenable)
    }
}
