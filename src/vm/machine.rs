use std::cell::Cell;
use std::rc::Rc;
use anyhow::{anyhow, Result};
use crossbeam_channel::{unbounded, Sender, Receiver};
use tracing::{debug, trace};
use super::error::Error;

pub type Task = Box<dyn FnOnce()>;

/// Single-threaded event loop. Promises queue their drains here through a
/// [`Handle`]; nothing runs until [`Machine::run`] or [`Machine::turn`].
pub struct Machine {
    receiver: Receiver<Command>,
    handle:   Handle,
    limit:    Option<usize>,
}

#[derive(Clone)]
pub struct Handle {
    sender: Sender<Command>,
    serial: Rc<Cell<u64>>,
}

pub enum Command {
    Run(Task),
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Ran,
    Stopped,
    Idle,
}

impl Machine {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();

        let handle = Handle {
            sender: sender,
            serial: Rc::new(Cell::new(0)),
        };

        Self {
            receiver: receiver,
            handle:   handle,
            limit:    None,
        }
    }

    /// Bounds how many tasks a single [`Machine::run`] may execute.
    pub fn limit(mut self, turns: usize) -> Self {
        self.limit = Some(turns);
        self
    }

    pub fn handle(&self) -> Handle {
        self.handle.clone()
    }

    /// Runs at most one queued task. A queued stop is consumed and reported
    /// as `Turn::Stopped`; tasks behind it stay queued.
    pub fn turn(&self) -> Turn {
        match self.receiver.try_recv() {
            Ok(Command::Run(task)) => {
                task();
                Turn::Ran
            }
            Ok(Command::Stop) => Turn::Stopped,
            Err(_)            => Turn::Idle,
        }
    }

    pub fn run(&self) -> Result<usize> {
        let mut turns = 0;

        loop {
            if let Some(limit) = self.limit {
                if turns >= limit && !self.receiver.is_empty() {
                    return Err(Error::Limit(limit).into());
                }
            }

            match self.receiver.try_recv() {
                Ok(Command::Run(task)) => task(),
                Ok(Command::Stop)      => {
                    debug!(turns, "machine stopped");
                    return Ok(turns);
                }
                Err(_)                 => break,
            }

            turns += 1;
            trace!(turns, "turn complete");
        }

        debug!(turns, "machine idle");

        Ok(turns)
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Handle {
    pub fn defer<F: FnOnce() + 'static>(&self, task: F) -> Result<()> {
        self.send(Command::Run(Box::new(task)))
    }

    pub fn stop(&self) -> Result<()> {
        self.send(Command::Stop)
    }

    pub(crate) fn next_id(&self) -> u64 {
        let id = self.serial.get();
        self.serial.set(id.wrapping_add(1));
        id
    }

    fn send(&self, cmd: Command) -> Result<()> {
        match self.sender.send(cmd) {
            Ok(()) => Ok(()),
            Err(_) => Err(anyhow!(Error::Terminated)),
        }
    }
}
