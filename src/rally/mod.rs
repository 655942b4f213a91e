//! Data model of a rally: who hit, how hard, and how the match ended.
mod ball;
mod player;
mod record;
mod routine;
mod turn;
mod winner;

pub use ball::*;
pub use player::*;
pub use record::*;
pub use routine::*;
pub use turn::*;
pub use winner::*;
