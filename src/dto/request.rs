use crate::Power;
use crate::rally::*;
use serde::Deserialize;
use serde::Serialize;

/// Body of `POST /ping/{player}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingBall {
    pub ball_power: Power,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routine_id: Option<Routine>,
}

impl PingBall {
    pub fn into_ping(self, to: Player) -> Ping {
        Ping::new(self.ball_power, to, self.routine_id)
    }
}

impl From<&Ping> for PingBall {
    fn from(ping: &Ping) -> Self {
        Self {
            ball_power: ping.power(),
            routine_id: ping.routine().cloned(),
        }
    }
}

/// Body of the table's `POST /start`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartGame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routine_id: Option<Routine>,
}

/// Body of the table's `POST /ball`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveBall {
    pub ball_power: Power,
    pub from_player: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routine_id: Option<Routine>,
}

impl TryFrom<ReceiveBall> for Ball {
    type Error = anyhow::Error;
    fn try_from(body: ReceiveBall) -> Result<Self, Self::Error> {
        let hitter = Player::try_from(body.from_player.as_str())?;
        Ok(Ball::new(body.ball_power, hitter, body.routine_id))
    }
}

impl From<&Ball> for ReceiveBall {
    fn from(ball: &Ball) -> Self {
        Self {
            ball_power: ball.power(),
            from_player: ball.hitter().to_string(),
            routine_id: ball.routine().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routine_is_optional_on_the_wire() {
        let body: PingBall = serde_json::from_str(r#"{"ball_power":42}"#).unwrap();
        assert_eq!(body.into_ping(Player::B), Ping::new(42, Player::B, None));
        let json = serde_json::to_string(&PingBall::from(&Ping::new(7, Player::A, None))).unwrap();
        assert_eq!(json, r#"{"ball_power":7}"#);
    }

    #[test]
    fn unknown_hitter_is_rejected() {
        let body = ReceiveBall {
            ball_power: 60,
            from_player: String::from("C"),
            routine_id: None,
        };
        assert!(Ball::try_from(body).is_err());
    }
}
