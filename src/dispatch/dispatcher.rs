use super::*;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::sync::oneshot;

/// Bounded pool of detached forwarding tasks.
///
/// At most `workers` jobs run their calls at once; the rest wait for a permit.
/// Clones share the permits and the dead letters. At most
/// [`crate::DEAD_LETTER_CAPACITY`] letters are kept; the oldest go first.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    permits: Arc<Semaphore>,
    redelivery: Redelivery,
    backoff: Duration,
    letters: Arc<Mutex<VecDeque<Letter>>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(crate::DISPATCH_WORKERS, Redelivery::default())
    }
}

impl Dispatcher {
    pub fn new(workers: usize, redelivery: Redelivery) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(workers.max(1))),
            redelivery,
            backoff: crate::RETRY_BACKOFF,
            letters: Arc::new(Mutex::new(VecDeque::new())),
        }
    }
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }
    /// Jobs that exhausted their attempts under [`Redelivery::DeadLetter`].
    pub fn dead_letters(&self) -> Vec<Letter> {
        self.letters
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .cloned()
            .collect()
    }
    /// Takes every dead letter, leaving the list empty.
    pub fn drain_dead_letters(&self) -> Vec<Letter> {
        self.letters
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .drain(..)
            .collect()
    }

    /// Runs `job` in the background as soon as a worker is free.
    pub fn send<F, Fut>(&self, label: impl Into<String>, job: F) -> Receipt
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.send_after(label, Duration::ZERO, job)
    }

    /// Runs `job` in the background once `delay` has passed and a worker is free.
    pub fn send_after<F, Fut>(&self, label: impl Into<String>, delay: Duration, job: F) -> Receipt
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let label = label.into();
        let this = self.clone();
        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let delivery = match this.permits.clone().acquire_owned().await {
                Ok(_permit) => this.attempt(&label, &job).await,
                Err(_) => Delivery::Dropped {
                    attempts: 0,
                    reason: String::from("dispatcher closed"),
                },
            };
            let _ = tx.send(delivery);
        });
        Receipt::from(rx)
    }

    async fn attempt<F, Fut>(&self, label: &str, job: &F) -> Delivery
    where
        F: Fn() -> Fut,
        Fut: Future<Output = anyhow::Result<()>>,
    {
        let limit = self.redelivery.attempts();
        let mut reason = String::new();
        for attempt in 1..=limit {
            match job().await {
                Ok(()) => {
                    log::debug!("[dispatch] {} delivered (attempt {})", label, attempt);
                    return Delivery::Delivered { attempts: attempt };
                }
                Err(e) => {
                    log::warn!("[dispatch] {} failed (attempt {}/{}): {}", label, attempt, limit, e);
                    reason = e.to_string();
                    if attempt < limit {
                        tokio::time::sleep(self.backoff).await;
                    }
                }
            }
        }
        if self.redelivery.parks() {
            log::error!("[dispatch] {} dead-lettered after {} attempts", label, limit);
            self.park(Letter {
                label: label.to_string(),
                reason: reason.clone(),
                attempts: limit,
            });
            Delivery::DeadLettered {
                attempts: limit,
                reason,
            }
        } else {
            log::error!("[dispatch] {} dropped after {} attempts", label, limit);
            Delivery::Dropped {
                attempts: limit,
                reason,
            }
        }
    }

    fn park(&self, letter: Letter) {
        let mut letters = self.letters.lock().unwrap_or_else(|e| e.into_inner());
        if letters.len() >= crate::DEAD_LETTER_CAPACITY {
            if let Some(lost) = letters.pop_front() {
                log::warn!("[dispatch] dead letters full, forgetting {}", lost.label);
            }
        }
        letters.push_back(letter);
    }
}
