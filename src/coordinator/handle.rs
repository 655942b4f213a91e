use super::*;
use crate::MatchId;
use crate::Power;
use crate::rally::*;
use crate::store::*;
use crate::transport::Players;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::oneshot;

/// Cloneable front door to a running [`Coordinator`].
///
/// Rally commands go through the mailbox; reads of finished matches go
/// straight to the store, which the coordinator never caches.
#[derive(Clone)]
pub struct Handle {
    inbox: mpsc::UnboundedSender<Command>,
    store: Arc<dyn Store>,
}

impl Handle {
    /// A handle plus the mailbox its coordinator should drain.
    pub fn channel(store: Arc<dyn Store>) -> (Self, mpsc::UnboundedReceiver<Command>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { inbox: tx, store }, rx)
    }

    pub async fn start_match(&self) -> anyhow::Result<Ack> {
        self.ask(|reply| Command::Start { reply }).await
    }
    pub async fn return_from(&self, ping: Ping) -> anyhow::Result<Ack> {
        self.ask(|reply| Command::Return { ping, reply }).await
    }
    pub async fn return_from_a(&self, power: Power) -> anyhow::Result<Ack> {
        self.return_from(Ping::new(power, Player::A, None)).await
    }
    pub async fn return_from_b(&self, power: Power) -> anyhow::Result<Ack> {
        self.return_from(Ping::new(power, Player::B, None)).await
    }
    pub async fn is_game_active(&self) -> anyhow::Result<bool> {
        self.ask(|reply| Command::Active { reply }).await
    }
    /// Snapshot of the match in play.
    pub async fn current(&self) -> anyhow::Result<Option<Match>> {
        self.ask(|reply| Command::Current { reply }).await
    }
    /// Retries parked saves and returns how many are still unsaved.
    pub async fn flush(&self) -> anyhow::Result<usize> {
        self.ask(|reply| Command::Flush { reply }).await
    }

    pub async fn get_match(&self) -> Result<Match, StoreError> {
        self.store.last_match().await
    }
    pub async fn get_match_by_id(&self, id: MatchId) -> Result<Match, StoreError> {
        self.store.match_by_id(id).await
    }
    pub async fn test_store_connection(&self) -> Result<(), StoreError> {
        self.store.test_connection().await
    }

    async fn ask<T, F>(&self, command: F) -> anyhow::Result<T>
    where
        F: FnOnce(oneshot::Sender<T>) -> Command,
    {
        let (tx, rx) = oneshot::channel();
        self.inbox
            .send(command(tx))
            .map_err(|_| anyhow::anyhow!("coordinator has stopped"))?;
        rx.await
            .map_err(|_| anyhow::anyhow!("coordinator dropped the request"))
    }
}

#[async_trait::async_trait]
impl Players for Handle {
    async fn ping(&self, ping: Ping) -> anyhow::Result<()> {
        self.return_from(ping).await.map(|_| ())
    }
    async fn is_game_active(&self) -> anyhow::Result<bool> {
        Handle::is_game_active(self).await
    }
}
