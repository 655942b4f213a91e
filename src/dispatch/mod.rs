//! Fire-and-forget forwarding with observable outcomes.
//!
//! Forwards run as detached tasks on a bounded pool. The caller never waits
//! for them, but every job hands back a [`Receipt`] that resolves to its
//! [`Delivery`], and failures follow an explicit [`Redelivery`] policy.
mod delivery;
mod dispatcher;
mod redelivery;

pub use delivery::*;
pub use dispatcher::*;
pub use redelivery::*;
