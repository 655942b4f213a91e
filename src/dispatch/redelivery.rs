/// What happens to a forward whose call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Redelivery {
    /// Give up after the first failure.
    #[default]
    Drop,
    /// Try again up to this many times, then give up.
    Retry(usize),
    /// Give up after the first failure and park the job in the dead letters.
    DeadLetter,
}

impl Redelivery {
    /// Total calls allowed for one job.
    pub fn attempts(&self) -> usize {
        match self {
            Self::Retry(n) => n + 1,
            Self::Drop | Self::DeadLetter => 1,
        }
    }
    pub fn parks(&self) -> bool {
        matches!(self, Self::DeadLetter)
    }
}

impl std::str::FromStr for Redelivery {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drop" => Ok(Self::Drop),
            "dead-letter" | "deadletter" => Ok(Self::DeadLetter),
            other => other
                .strip_prefix("retry:")
                .ok_or_else(|| anyhow::anyhow!("unknown redelivery policy: {}", s))?
                .parse::<usize>()
                .map(Self::Retry)
                .map_err(|e| anyhow::anyhow!("invalid retry count in {}: {}", s, e)),
        }
    }
}

impl std::fmt::Display for Redelivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Drop => write!(f, "drop"),
            Self::Retry(n) => write!(f, "retry:{}", n),
            Self::DeadLetter => write!(f, "dead-letter"),
        }
    }
}
