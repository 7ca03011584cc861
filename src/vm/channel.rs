#[cfg(not(feature = "tokio"))]
use crossbeam_channel::{bounded, Sender, Receiver, TryRecvError};
#[cfg(feature = "tokio")]
use std::{future::Future, pin::Pin, task::{Context, Poll}};
use anyhow::Result;
#[cfg(feature = "tokio")]
use tokio::sync::oneshot::{channel, Sender, Receiver, error::TryRecvError};
use super::error::Error;
use super::state::Outcome;

pub struct Tx(Sender<Outcome>);
pub struct Rx(Receiver<Outcome>);

#[cfg(not(feature = "tokio"))]
pub fn oneshot() -> (Tx, Rx) {
    let (tx, rx) = bounded(1);
    (Tx(tx), Rx(rx))
}

#[cfg(feature = "tokio")]
pub fn oneshot() -> (Tx, Rx) {
    let (tx, rx) = channel();
    (Tx(tx), Rx(rx))
}

impl Tx {
    pub fn send(self, outcome: Outcome) {
        match self.0.send(outcome) {
            Ok(()) => (),
            Err(_) => (),
        }
    }
}

#[cfg(not(feature = "tokio"))]
impl Rx {
    pub fn try_recv(&mut self) -> Result<Option<Outcome>> {
        match self.0.try_recv() {
            Ok(outcome)                     => Ok(Some(outcome)),
            Err(TryRecvError::Empty)        => Ok(None),
            Err(TryRecvError::Disconnected) => Err(Error::Dropped.into()),
        }
    }
}

#[cfg(feature = "tokio")]
impl Rx {
    pub fn try_recv(&mut self) -> Result<Option<Outcome>> {
        match self.0.try_recv() {
            Ok(outcome)              => Ok(Some(outcome)),
            Err(TryRecvError::Empty)  => Ok(None),
            Err(TryRecvError::Closed) => Err(Error::Dropped.into()),
        }
    }
}

#[cfg(feature = "tokio")]
impl Future for Rx {
    type Output = Outcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.0).poll(cx) {
            Poll::Ready(Ok(r))  => Poll::Ready(r),
            Poll::Ready(Err(_)) => Poll::Ready(Err(Error::Dropped.into())),
            Poll::Pending       => Poll::Pending,
        }
    }
}
