use super::Player;
use super::Routine;
use crate::Power;
use serde::Deserialize;
use serde::Serialize;

/// A ball hit toward the table by `hitter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    power: Power,
    hitter: Player,
    routine: Option<Routine>,
}

impl Ball {
    pub fn new(power: Power, hitter: Player, routine: Option<Routine>) -> Self {
        Self {
            power,
            hitter,
            routine,
        }
    }
    pub fn power(&self) -> Power {
        self.power
    }
    pub fn hitter(&self) -> Player {
        self.hitter
    }
    pub fn routine(&self) -> Option<&Routine> {
        self.routine.as_ref()
    }
    /// The same ball continuing past the table to the other side.
    pub fn across(&self) -> Ping {
        Ping::new(self.power, self.hitter.opposite(), self.routine.clone())
    }
}

/// A ball arriving at player `to`, who must return it.
/// Untagged pings apply to whatever match is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ping {
    power: Power,
    to: Player,
    routine: Option<Routine>,
}

impl Ping {
    pub fn new(power: Power, to: Player, routine: Option<Routine>) -> Self {
        Self { power, to, routine }
    }
    pub fn power(&self) -> Power {
        self.power
    }
    pub fn to(&self) -> Player {
        self.to
    }
    pub fn routine(&self) -> Option<&Routine> {
        self.routine.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ball_crosses_to_opposite_player() {
        let routine = Routine::from("match-1-t");
        let ping = Ball::new(64, Player::A, Some(routine.clone())).across();
        assert_eq!(ping.to(), Player::B);
        assert_eq!(ping.power(), 64);
        assert_eq!(ping.routine(), Some(&routine));
    }
}
