//! Durable storage of finished matches.
//!
//! - [`Store`]: Contract the coordinator and read endpoints depend on
//! - [`Memory`]: Process-local store for tests and database-less runs
//! - [`Postgres`]: Tables `matches` and `turns`, written in one transaction
mod error;
mod memory;
#[cfg(feature = "database")]
mod postgres;
#[cfg(feature = "database")]
mod schema;

pub use error::*;
pub use memory::*;
#[cfg(feature = "database")]
pub use postgres::*;
#[cfg(feature = "database")]
pub use schema::*;

use crate::MatchId;
use crate::rally::Match;
use std::sync::Arc;

/// Save and read completed matches.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// Persists the match with all of its turns and returns the id it was stored under.
    async fn save_match(&self, game: &Match) -> Result<MatchId, StoreError>;
    async fn match_by_id(&self, id: MatchId) -> Result<Match, StoreError>;
    /// The most recently saved match.
    async fn last_match(&self) -> Result<Match, StoreError>;
    async fn test_connection(&self) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
impl<S> Store for Arc<S>
where
    S: Store + ?Sized,
{
    async fn save_match(&self, game: &Match) -> Result<MatchId, StoreError> {
        self.as_ref().save_match(game).await
    }
    async fn match_by_id(&self, id: MatchId) -> Result<Match, StoreError> {
        self.as_ref().match_by_id(id).await
    }
    async fn last_match(&self) -> Result<Match, StoreError> {
        self.as_ref().last_match().await
    }
    async fn test_connection(&self) -> Result<(), StoreError> {
        self.as_ref().test_connection().await
    }
}
