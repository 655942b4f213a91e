use super::*;
use tokio::sync::mpsc;

/// Runs another ledger on a blocking worker so file writes never stall
/// the coordinator. Failed writes are logged by the worker.
///
/// Dropping it closes the queue; the worker drains what is left and exits.
pub struct Background(mpsc::UnboundedSender<Turn>);

impl Background {
    pub fn spawn<L>(mut inner: L) -> (Self, tokio::task::JoinHandle<()>)
    where
        L: Ledger + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<Turn>();
        let worker = tokio::task::spawn_blocking(move || {
            while let Some(turn) = rx.blocking_recv() {
                if let Err(e) = inner.append(&turn) {
                    log::warn!("[ledger] failed to record turn {}: {}", turn.number(), e);
                }
            }
        });
        (Self(tx), worker)
    }
}

impl Ledger for Background {
    fn append(&mut self, turn: &Turn) -> anyhow::Result<()> {
        self.0
            .send(turn.clone())
            .map_err(|_| anyhow::anyhow!("ledger worker has stopped"))
    }
}
