use crate::vm::{Handle, Promise, Reason, Resolution, Resolver};

pub struct Deferred {
    pub promise: Promise,
    resolver:    Resolver,
}

pub fn resolved<V: Into<Resolution>>(handle: &Handle, value: V) -> Promise {
    Promise::new(handle, |resolver| resolver.resolve(value))
}

pub fn rejected<R: Into<Reason>>(handle: &Handle, reason: R) -> Promise {
    Promise::new(handle, |resolver| resolver.reject(reason))
}

pub fn deferred(handle: &Handle) -> Deferred {
    let promise  = Promise::pending(handle);
    let resolver = promise.resolver();
    Deferred { promise, resolver }
}

impl Deferred {
    pub fn resolve<V: Into<Resolution>>(&self, value: V) {
        self.resolver.resolve(value);
    }

    pub fn reject<R: Into<Reason>>(&self, reason: R) {
        self.resolver.reject(reason);
    }

    pub fn resolver(&self) -> Resolver {
        self.resolver.clone()
    }
}
