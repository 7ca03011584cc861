use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::mem;
use std::rc::Rc;
use serde_json::Value;
use tracing::{debug, trace, warn};
use super::channel::{oneshot, Rx};
use super::machine::Handle;
use super::reason::Reason;
use super::resolve::{Resolution, Resolver};
use super::state::State;

pub type Settle = Result<Resolution, Reason>;

pub type OnFulfilled = Box<dyn FnOnce(Value) -> Settle>;
pub type OnRejected  = Box<dyn FnOnce(Reason) -> Settle>;

/// A value that settles later, exactly once.
///
/// Cloning yields another handle to the same promise. Handlers attached with
/// [`Promise::then`] never run inside the call that settled or registered
/// them; they run on a later turn of the [`Machine`](super::Machine) that
/// owns `handle`.
#[derive(Clone)]
pub struct Promise {
    inner:  Rc<RefCell<Inner>>,
    handle: Handle,
}

struct Inner {
    id:        u64,
    state:     State,
    callbacks: VecDeque<Continuation>,
    scheduled: bool,
}

struct Continuation {
    on_fulfilled: Option<OnFulfilled>,
    on_rejected:  Option<OnRejected>,
    downstream:   Promise,
}

impl Promise {
    pub fn pending(handle: &Handle) -> Self {
        let inner = Inner {
            id:        handle.next_id(),
            state:     State::Pending,
            callbacks: VecDeque::new(),
            scheduled: false,
        };

        Self {
            inner:  Rc::new(RefCell::new(inner)),
            handle: handle.clone(),
        }
    }

    /// Creates a pending promise and runs `init` immediately with its
    /// settle-success and settle-failure capabilities.
    pub fn new<F: FnOnce(Resolver)>(handle: &Handle, init: F) -> Self {
        let promise = Self::pending(handle);
        init(promise.resolver());
        promise
    }

    pub fn id(&self) -> u64 {
        self.inner.borrow().id
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub fn state(&self) -> State {
        self.inner.borrow().state.clone()
    }

    pub fn ptr_eq(&self, other: &Promise) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.clone())
    }

    pub fn then(
        &self,
        on_fulfilled: Option<OnFulfilled>,
        on_rejected:  Option<OnRejected>,
    ) -> Promise {
        let downstream = Promise::pending(&self.handle);

        self.inner.borrow_mut().callbacks.push_back(Continuation {
            on_fulfilled: on_fulfilled,
            on_rejected:  on_rejected,
            downstream:   downstream.clone(),
        });

        self.flush();

        downstream
    }

    pub fn and_then<F>(&self, on_fulfilled: F) -> Promise
    where
        F: FnOnce(Value) -> Settle + 'static,
    {
        self.then(Some(Box::new(on_fulfilled)), None)
    }

    pub fn or_else<F>(&self, on_rejected: F) -> Promise
    where
        F: FnOnce(Reason) -> Settle + 'static,
    {
        self.then(None, Some(Box::new(on_rejected)))
    }

    /// Forwards this promise's outcome into a one-shot channel once the
    /// machine has run the continuation.
    pub fn observe(&self) -> Rx {
        let (tx, rx) = oneshot();

        let fulfilled = Rc::new(Cell::new(Some(tx)));
        let rejected  = fulfilled.clone();

        self.then(Some(Box::new(move |value: Value| -> Settle {
            if let Some(tx) = fulfilled.take() {
                tx.send(Ok(value));
            }
            Ok(Resolution::default())
        })), Some(Box::new(move |reason: Reason| -> Settle {
            if let Some(tx) = rejected.take() {
                tx.send(Err(reason));
            }
            Ok(Resolution::default())
        })));

        rx
    }

    pub fn fulfill(&self, value: Value) {
        self.settle(State::Fulfilled(value));
    }

    pub fn reject<R: Into<Reason>>(&self, reason: R) {
        self.settle(State::Rejected(reason.into()));
    }

    fn settle(&self, state: State) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.state.is_settled() {
                trace!(promise = inner.id, "already settled, ignoring");
                return;
            }
            trace!(promise = inner.id, state = ?state, "settled");
            inner.state = state;
        }
        self.flush();
    }

    fn flush(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.state.is_pending() || inner.callbacks.is_empty() || inner.scheduled {
                return;
            }
            inner.scheduled = true;
        }

        let promise = self.clone();
        if let Err(e) = self.handle.defer(move || promise.drain()) {
            self.inner.borrow_mut().scheduled = false;
            warn!(promise = self.id(), "drain not scheduled: {e}");
        }
    }

    /// Runs the continuations queued when this task started. Anything
    /// registered while they run goes to the next drain.
    fn drain(&self) {
        let (state, batch) = {
            let mut inner = self.inner.borrow_mut();
            inner.scheduled = false;
            if inner.state.is_pending() {
                return;
            }
            (inner.state.clone(), mem::take(&mut inner.callbacks))
        };

        for Continuation { on_fulfilled, on_rejected, downstream } in batch {
            let result = match &state {
                State::Fulfilled(value) => match on_fulfilled {
                    Some(handler) => handler(value.clone()),
                    None          => Ok(value.clone().into()),
                },
                State::Rejected(reason) => match on_rejected {
                    Some(handler) => handler(reason.clone()),
                    None          => Err(reason.clone()),
                },
                State::Pending => return,
            };

            match result {
                Ok(value) => downstream.resolve(value),
                Err(e)    => {
                    debug!(promise = self.id(), downstream = downstream.id(), "rejecting downstream: {e}");
                    downstream.reject(e);
                }
            }
        }
    }
}

impl PartialEq for Promise {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Promise {}

impl fmt::Debug for Promise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Promise")
            .field("id", &inner.id)
            .field("state", &inner.state)
            .field("callbacks", &inner.callbacks.len())
            .finish()
    }
}
