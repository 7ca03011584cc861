use std::fmt::{self, Debug, Display};
use std::rc::Rc;
use serde_json::Value;
use super::error::Error;

/// Why a promise was rejected.
///
/// Clones share the underlying error, so a reason passed down a chain of
/// rethrowing handlers stays the same reason (see [`Reason::ptr_eq`]).
#[derive(Clone)]
pub struct Reason(Rc<anyhow::Error>);

impl Reason {
    pub fn msg<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self(Rc::new(anyhow::Error::msg(message)))
    }

    pub fn error(&self) -> &anyhow::Error {
        &self.0
    }

    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: Display + Debug + Send + Sync + 'static,
    {
        self.0.downcast_ref::<E>()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<anyhow::Error> for Reason {
    fn from(error: anyhow::Error) -> Self {
        Self(Rc::new(error))
    }
}

impl From<Error> for Reason {
    fn from(error: Error) -> Self {
        Self(Rc::new(error.into()))
    }
}

impl From<Value> for Reason {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::msg(s),
            value            => Self::msg(value),
        }
    }
}

impl From<&str> for Reason {
    fn from(message: &str) -> Self {
        Self::msg(message.to_owned())
    }
}

impl From<String> for Reason {
    fn from(message: String) -> Self {
        Self::msg(message)
    }
}

impl Debug for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&*self.0, f)
    }
}

impl Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&*self.0, f)
    }
}
