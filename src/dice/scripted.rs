use super::*;
use std::collections::VecDeque;

/// Dice that replay a fixed sequence.
/// Values are clamped into the requested range; once exhausted every roll is `range.start`.
#[derive(Debug, Clone, Default)]
pub struct Scripted(VecDeque<Power>);

impl Scripted {
    pub fn new<I>(rolls: I) -> Self
    where
        I: IntoIterator<Item = Power>,
    {
        Self(rolls.into_iter().collect())
    }
}

impl Dice for Scripted {
    fn roll(&mut self, range: Range<Power>) -> Power {
        match self.0.pop_front() {
            _ if range.is_empty() => range.start,
            Some(x) => x.clamp(range.start, range.end - 1),
            None => range.start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_then_falls_back() {
        let mut dice = Scripted::new([75, 80]);
        assert_eq!(dice.roll(70..90), 75);
        assert_eq!(dice.roll(70..90), 80);
        assert_eq!(dice.roll(70..90), 70);
    }

    #[test]
    fn clamps_into_range() {
        let mut dice = Scripted::new([5, 500]);
        assert_eq!(dice.roll(70..90), 70);
        assert_eq!(dice.roll(70..90), 89);
    }
}
