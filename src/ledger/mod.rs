//! Append-only per-turn log, written alongside the in-memory match.
//!
//! Writes are best-effort: the coordinator logs a failed append and carries on.
mod background;
mod file;
mod memory;

pub use background::*;
pub use file::*;
pub use memory::*;

use crate::rally::Turn;

/// Sink for every turn the coordinator records.
pub trait Ledger: Send {
    fn append(&mut self, turn: &Turn) -> anyhow::Result<()>;
}

/// Ledger that forgets everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl Ledger for Discard {
    fn append(&mut self, _: &Turn) -> anyhow::Result<()> {
        Ok(())
    }
}
