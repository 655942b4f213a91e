use crate::Power;
use crate::dispatch::Receipt;
use crate::rally::*;

/// Result of a start or return command.
#[derive(Debug)]
pub enum Ack {
    /// A new match is live; the table will be told to serve.
    Started {
        match_number: u32,
        routine: Routine,
        kickoff: Receipt,
    },
    /// The ball went back toward the table.
    Returned { power: Power, forward: Receipt },
    /// The ball ended the match.
    Finished { winner: Winner, saved: bool },
    /// Stale or untimely ping; nothing changed.
    Ignored,
}

impl Ack {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Started { .. } => "New match started",
            Self::Returned { .. } => "Ball returned",
            Self::Finished { .. } => "Match finished",
            Self::Ignored => "Ping ignored",
        }
    }
}
