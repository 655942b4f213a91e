use crate::Power;
use crate::rally::*;
use chrono::Utc;

/// The live match plus the routine that scopes it.
#[derive(Debug, Clone)]
pub struct Session {
    game: Match,
    routine: Routine,
}

impl Session {
    pub fn new(match_number: u32) -> Self {
        let now = Utc::now();
        Self {
            game: Match::new(match_number, now),
            routine: Routine::new(match_number, now),
        }
    }
    pub fn routine(&self) -> &Routine {
        &self.routine
    }
    pub fn game(&self) -> &Match {
        &self.game
    }
    /// Turns played so far, which is also the number of the latest turn.
    pub fn turns(&self) -> u32 {
        self.game.turns().len() as u32
    }
    /// Whether a ping tagged `routine` belongs to this session.
    /// Untagged pings always do.
    pub fn admits(&self, routine: Option<&Routine>) -> bool {
        routine.is_none_or(|r| r == &self.routine)
    }
    pub fn record(&mut self, player: Player, power: Power) -> Turn {
        self.game.append(player, power, &self.routine, Utc::now())
    }
    pub fn conclude(mut self, winner: Winner) -> Match {
        self.game.conclude(winner, Utc::now());
        self.game
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_own_and_untagged_pings() {
        let session = Session::new(3);
        assert!(session.admits(None));
        assert!(session.admits(Some(&session.routine().clone())));
        assert!(!session.admits(Some(&Routine::from("match-2-old"))));
    }

    #[test]
    fn turns_carry_routine_and_number() {
        let mut session = Session::new(5);
        let turn = session.record(Player::A, 88);
        assert_eq!(turn.number(), 1);
        assert_eq!(turn.match_number(), 5);
        assert_eq!(turn.routine(), session.routine());
        assert_eq!(session.turns(), 1);
    }
}
