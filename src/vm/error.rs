use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("promise cannot be resolved with itself")]
    Cycle,
    #[error("event loop exceeded {0} turns")]
    Limit(usize),
    #[error("machine terminated")]
    Terminated,
    #[error("promise dropped before settling")]
    Dropped,
}
