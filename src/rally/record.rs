use super::*;
use crate::MatchId;
use crate::Power;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A match and its full turn history.
///
/// Turns can only be appended, numbered 1, 2, 3, ... without gaps.
/// The end time and winner are set together by [`Match::conclude`],
/// so one is present exactly when the other is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    id: MatchId,
    match_number: u32,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    winner: Option<Winner>,
    turns: Vec<Turn>,
}

impl Match {
    pub fn new(match_number: u32, start_time: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            match_number,
            start_time,
            end_time: None,
            winner: None,
            turns: Vec::new(),
        }
    }

    /// Reassembles a stored match, rejecting rows that break the turn or result invariants.
    pub fn hydrate(
        id: MatchId,
        match_number: u32,
        start_time: DateTime<Utc>,
        result: Option<(DateTime<Utc>, Winner)>,
        turns: Vec<Turn>,
    ) -> anyhow::Result<Self> {
        if let Some(gap) = turns
            .iter()
            .zip(1u32..)
            .find(|(turn, expected)| turn.number() != *expected)
        {
            return Err(anyhow::anyhow!(
                "match {} has turn #{} where #{} was expected",
                id,
                gap.0.number(),
                gap.1
            ));
        }
        Ok(Self {
            id,
            match_number,
            start_time,
            end_time: result.map(|(end, _)| end),
            winner: result.map(|(_, winner)| winner),
            turns,
        })
    }

    pub fn with_id(mut self, id: MatchId) -> Self {
        self.id = id;
        self
    }
    pub fn id(&self) -> MatchId {
        self.id
    }
    pub fn number(&self) -> u32 {
        self.match_number
    }
    pub fn start(&self) -> DateTime<Utc> {
        self.start_time
    }
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }
    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }
    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }

    /// Records the next return and hands back a copy of it.
    pub fn append(
        &mut self,
        player: Player,
        power: Power,
        routine: &Routine,
        time: DateTime<Utc>,
    ) -> Turn {
        let number = self.turns.len() as u32 + 1;
        let turn = Turn::new(number, time, player, power, routine.clone(), self.match_number);
        self.turns.push(turn.clone());
        turn
    }

    /// Ends the match. Later calls leave the first result in place.
    pub fn conclude(&mut self, winner: Winner, time: DateTime<Utc>) -> bool {
        if self.is_finished() {
            return false;
        }
        self.end_time = Some(time);
        self.winner = Some(winner);
        true
    }
}

impl std::fmt::Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.winner {
            Some(winner) => write!(
                f,
                "match #{} ({} turns, winner {})",
                self.match_number,
                self.turns.len(),
                winner
            ),
            None => write!(f, "match #{} ({} turns, in play)", self.match_number, self.turns.len()),
        }
    }
}
