//! The rally coordinator: sole owner of the in-flight match.
//!
//! ## Architecture
//!
//! - [`Coordinator`]: Actor task holding all rally state, fed by a queue
//! - [`Handle`]: Cloneable front door that submits [`Command`]s and awaits replies
//! - [`Ack`]: What a command did, including receipts for any forwards it issued
//!
//! Commands are applied one at a time. A ping's turn count and the
//! termination decision it triggers never interleave with another ping.
mod ack;
mod command;
mod coordinator;
mod handle;
mod session;

pub use ack::*;
pub use command::*;
pub use coordinator::*;
pub use handle::*;
pub use session::*;

#[cfg(test)]
mod tests;
