use super::Player;
use super::Routine;
use crate::Power;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// One recorded return within a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    id: i64,
    turn_number: u32,
    time: DateTime<Utc>,
    player: Player,
    ball_power: Power,
    routine_id: Routine,
    match_number: u32,
}

impl Turn {
    pub fn new(
        turn_number: u32,
        time: DateTime<Utc>,
        player: Player,
        ball_power: Power,
        routine_id: Routine,
        match_number: u32,
    ) -> Self {
        Self {
            id: 0,
            turn_number,
            time,
            player,
            ball_power,
            routine_id,
            match_number,
        }
    }
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }
    pub fn id(&self) -> i64 {
        self.id
    }
    pub fn number(&self) -> u32 {
        self.turn_number
    }
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }
    pub fn player(&self) -> Player {
        self.player
    }
    pub fn power(&self) -> Power {
        self.ball_power
    }
    pub fn routine(&self) -> &Routine {
        &self.routine_id
    }
    pub fn match_number(&self) -> u32 {
        self.match_number
    }
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "turn #{} player {} power {} (match #{}, {})",
            self.turn_number, self.player, self.ball_power, self.match_number, self.routine_id
        )
    }
}
