use serde_json::Value;
use super::reason::Reason;

pub type Outcome = Result<Value, Reason>;

#[derive(Clone, Debug, Default)]
pub enum State {
    #[default]
    Pending,
    Fulfilled(Value),
    Rejected(Reason),
}

impl State {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Fulfilled(value) => Some(value),
            _                      => None,
        }
    }

    pub fn reason(&self) -> Option<&Reason> {
        match self {
            Self::Rejected(reason) => Some(reason),
            _                      => None,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Self::Pending          => None,
            Self::Fulfilled(value) => Some(Ok(value.clone())),
            Self::Rejected(reason) => Some(Err(reason.clone())),
        }
    }
}
