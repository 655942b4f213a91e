//! Stateless relay between the two players.
//!
//! The table serves the opening ball and passes every returned ball to the
//! other side, asking first whether the match is still in play.
mod relayed;
mod table;

pub use relayed::*;
pub use table::*;
