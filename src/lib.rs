pub use vm::Handle;
pub use vm::Machine;
pub use vm::Promise;

pub mod ex;
pub mod vm;
