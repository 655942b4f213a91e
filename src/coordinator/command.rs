use super::Ack;
use crate::rally::*;
use tokio::sync::oneshot;

/// Requests accepted by the coordinator's mailbox.
#[derive(Debug)]
pub enum Command {
    Start {
        reply: oneshot::Sender<Ack>,
    },
    Return {
        ping: Ping,
        reply: oneshot::Sender<Ack>,
    },
    Active {
        reply: oneshot::Sender<bool>,
    },
    Current {
        reply: oneshot::Sender<Option<Match>>,
    },
    /// Retry parked saves; replies with how many remain unsaved.
    Flush {
        reply: oneshot::Sender<usize>,
    },
}
