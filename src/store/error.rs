use crate::MatchId;

/// Failures of the match store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("match {0} not found")]
    NotFound(MatchId),
    #[error("no match data available")]
    Empty,
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("stored match is corrupt: {0}")]
    Corrupt(String),
}

impl StoreError {
    /// Whether the request named something that does not exist,
    /// as opposed to the store failing.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Empty)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Corrupt(e.to_string())
    }
}

#[cfg(feature = "database")]
impl From<tokio_postgres::Error> for StoreError {
    fn from(e: tokio_postgres::Error) -> Self {
        Self::Unavailable(e.to_string())
    }
}
