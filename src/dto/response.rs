use crate::Power;
use crate::coordinator::Ack;
use crate::rally::*;
use serde::Deserialize;
use serde::Serialize;

/// Reply to a start or ping request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledged {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routine_id: Option<Routine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_power: Option<Power>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Winner>,
}

impl From<&Ack> for Acknowledged {
    fn from(ack: &Ack) -> Self {
        let mut body = Self {
            message: ack.message().to_string(),
            match_number: None,
            routine_id: None,
            return_power: None,
            winner: None,
        };
        match ack {
            Ack::Started {
                match_number,
                routine,
                ..
            } => {
                body.match_number = Some(*match_number);
                body.routine_id = Some(routine.clone());
            }
            Ack::Returned { power, .. } => body.return_power = Some(*power),
            Ack::Finished { winner, .. } => body.winner = Some(*winner),
            Ack::Ignored => {}
        }
        body
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Active {
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pending {
    pub pending: usize,
}

/// Generic `{status}` or `{error}` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Status {
    pub fn ok(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            error: None,
        }
    }
    pub fn error(error: impl ToString) -> Self {
        Self {
            status: None,
            error: Some(error.to_string()),
        }
    }
}
