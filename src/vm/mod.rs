pub use channel::Rx;
pub use channel::Tx;
pub use error::Error;
pub use machine::Command;
pub use machine::Handle;
pub use machine::Machine;
pub use machine::Task;
pub use machine::Turn;

pub use promise::OnFulfilled;
pub use promise::OnRejected;
pub use promise::Promise;
pub use promise::Settle;
pub use reason::Reason;
pub use resolve::Lookup;
pub use resolve::Resolution;
pub use resolve::Resolver;
pub use resolve::Thenable;
pub use state::Outcome;
pub use state::State;

mod channel;
mod error;
mod machine;
mod promise;
mod reason;
mod resolve;
mod state;
