//! Capabilities each party holds to reach the other.
//!
//! The coordinator talks to the table through [`Relay`]; the table talks to
//! the players through [`Players`]. In-process, these are the services
//! themselves. Across processes, [`RemotePlayers`] and [`RemoteTable`] carry
//! the same calls over HTTP.
#[cfg(feature = "server")]
mod remote;

#[cfg(feature = "server")]
pub use remote::*;

use crate::rally::*;
use std::sync::Arc;

/// What the table may ask of the players' side.
#[async_trait::async_trait]
pub trait Players: Send + Sync {
    /// Delivers a ball to the player it is addressed to.
    async fn ping(&self, ping: Ping) -> anyhow::Result<()>;
    /// Whether a match is currently in play.
    async fn is_game_active(&self) -> anyhow::Result<bool>;
}

/// What the players' side may ask of the table.
#[async_trait::async_trait]
pub trait Relay: Send + Sync {
    /// Serves the opening ball of the match tagged `routine`.
    async fn start_game(&self, routine: Option<Routine>) -> anyhow::Result<()>;
    /// Hands a returned ball to the table for forwarding.
    async fn receive_ball(&self, ball: Ball) -> anyhow::Result<()>;
}

#[async_trait::async_trait]
impl<P> Players for Arc<P>
where
    P: Players + ?Sized,
{
    async fn ping(&self, ping: Ping) -> anyhow::Result<()> {
        self.as_ref().ping(ping).await
    }
    async fn is_game_active(&self) -> anyhow::Result<bool> {
        self.as_ref().is_game_active().await
    }
}

#[async_trait::async_trait]
impl<R> Relay for Arc<R>
where
    R: Relay + ?Sized,
{
    async fn start_game(&self, routine: Option<Routine>) -> anyhow::Result<()> {
        self.as_ref().start_game(routine).await
    }
    async fn receive_ball(&self, ball: Ball) -> anyhow::Result<()> {
        self.as_ref().receive_ball(ball).await
    }
}
