use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Token scoping turns and in-flight forwards to one match instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Routine(String);

impl Routine {
    pub fn new(match_number: u32, time: DateTime<Utc>) -> Self {
        Self(format!("match-{}-{}", match_number, time.format("%Y%m%d%H%M%S")))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Routine {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Routine {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for Routine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn derived_from_number_and_time() {
        let time = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(Routine::new(3, time).as_str(), "match-3-20240309140507");
    }

    #[test]
    fn serializes_as_plain_string() {
        let routine = Routine::from("match-1-x");
        assert_eq!(serde_json::to_string(&routine).unwrap(), "\"match-1-x\"");
    }
}
