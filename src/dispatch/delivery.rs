use serde::Deserialize;
use serde::Serialize;
use tokio::sync::oneshot;

/// Final outcome of one dispatched job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Delivered { attempts: usize },
    Dropped { attempts: usize, reason: String },
    DeadLettered { attempts: usize, reason: String },
}

impl Delivery {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
    pub fn attempts(&self) -> usize {
        match self {
            Self::Delivered { attempts }
            | Self::Dropped { attempts, .. }
            | Self::DeadLettered { attempts, .. } => *attempts,
        }
    }
}

/// A job that gave up and was kept for inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Letter {
    pub label: String,
    pub reason: String,
    pub attempts: usize,
}

/// Handle to the outcome of a detached job.
/// Dropping it does not cancel the job.
#[derive(Debug)]
pub struct Receipt(oneshot::Receiver<Delivery>);

impl Receipt {
    /// Waits for the job to finish.
    pub async fn wait(self) -> Delivery {
        self.0.await.unwrap_or_else(|_| Delivery::Dropped {
            attempts: 0,
            reason: String::from("worker vanished before reporting"),
        })
    }
}

impl From<oneshot::Receiver<Delivery>> for Receipt {
    fn from(rx: oneshot::Receiver<Delivery>) -> Self {
        Self(rx)
    }
}
