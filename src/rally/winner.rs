use crate::Power;
use serde::Deserialize;
use serde::Serialize;

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    A,
    B,
    Draw,
}

impl Winner {
    /// Settles a rally cut short by the turn limit.
    /// B wins by out-hitting the ball it received, loses by under-hitting it.
    pub fn by_power(returned: Power, received: Power) -> Self {
        match returned.cmp(&received) {
            std::cmp::Ordering::Greater => Self::B,
            std::cmp::Ordering::Less => Self::A,
            std::cmp::Ordering::Equal => Self::Draw,
        }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::Draw => write!(f, "Draw"),
        }
    }
}

impl TryFrom<&str> for Winner {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "Draw" => Ok(Self::Draw),
            other => Err(anyhow::anyhow!("unknown winner: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_comparison() {
        assert_eq!(Winner::by_power(80, 60), Winner::B);
        assert_eq!(Winner::by_power(60, 80), Winner::A);
        assert_eq!(Winner::by_power(70, 70), Winner::Draw);
    }

    #[test]
    fn display_parses_back() {
        for w in [Winner::A, Winner::B, Winner::Draw] {
            assert_eq!(Winner::try_from(w.to_string().as_str()).unwrap(), w);
        }
    }
}
