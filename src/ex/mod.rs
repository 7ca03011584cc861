pub use adapter::{deferred, rejected, resolved, Deferred};
pub use all::all;

pub mod adapter;
pub mod all;
