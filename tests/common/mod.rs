#![allow(dead_code)]

use std::sync::Once;
use anyhow::{anyhow, Result};
use serde_json::Value;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, registry};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use vow::{Machine, Promise};

pub mod thenable;

pub fn init() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        filter = filter.add_directive(LevelFilter::WARN.into());
        let print = fmt::layer().compact().with_test_writer();
        registry().with(filter).with(print).init();
    });
}

/// Runs the machine to idle and returns the promise's outcome, with the
/// rejection rendered as its message.
pub fn settle(machine: &Machine, promise: &Promise) -> Result<Result<Value, String>> {
    let mut rx = promise.observe();
    machine.run()?;
    match rx.try_recv()? {
        Some(outcome) => Ok(outcome.map_err(|e| e.to_string())),
        None          => Err(anyhow!("promise {} still pending", promise.id())),
    }
}
