use super::*;
use std::sync::Arc;
use std::sync::Mutex;

/// Shared in-memory ledger. Clones observe the same turns.
#[derive(Debug, Clone, Default)]
pub struct Memory(Arc<Mutex<Vec<Turn>>>);

impl Memory {
    pub fn turns(&self) -> Vec<Turn> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Ledger for Memory {
    fn append(&mut self, turn: &Turn) -> anyhow::Result<()> {
        self.0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(turn.clone());
        Ok(())
    }
}
