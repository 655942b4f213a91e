//! Sources of randomness for serves and returns.
//!
//! Every power the rally generates is drawn through [`Dice`], so tests can
//! script exact sequences while servers roll a seeded [`Random`].
mod random;
mod scripted;

pub use random::*;
pub use scripted::*;

use crate::Power;
use std::ops::Range;

/// Draws integers from half-open ranges.
pub trait Dice: Send {
    /// Returns a value in `range`, or `range.start` when the range is empty.
    fn roll(&mut self, range: Range<Power>) -> Power;
}

impl Dice for Box<dyn Dice> {
    fn roll(&mut self, range: Range<Power>) -> Power {
        self.as_mut().roll(range)
    }
}
