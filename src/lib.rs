//! Three-party ping-pong rally coordinated over remote calls.
//!
//! Two players and a table pass a ball around while a central coordinator
//! keeps score. Every hop between parties is a one-way notification, so the
//! coordinator is the only place where the rally's state lives.
//!
//! ## Architecture
//!
//! - [`coordinator`]: Actor owning the in-flight match and the rally rules
//! - [`table`]: Stateless relay that serves and forwards the ball
//! - [`dispatch`]: Bounded worker pool for fire-and-forget forwarding
//! - [`transport`]: Capabilities each party uses to reach the other
//! - [`store`]: Durable storage of finished matches
//! - [`ledger`]: Append-only per-turn log
//! - [`rally`]: Data model shared by all of the above
pub mod config;
pub mod coordinator;
pub mod dice;
pub mod dispatch;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod hosting;
pub mod ledger;
pub mod rally;
pub mod store;
pub mod table;
pub mod transport;
pub mod venue;

pub use config::*;
pub use venue::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Strength of a hit. Never negative.
pub type Power = u32;
/// Identifier assigned to a match by the store.
pub type MatchId = i64;

// ============================================================================
// RALLY RULES
// ============================================================================
/// Rallies longer than this many turns are settled on the next B return.
pub const TURN_LIMIT: u32 = 10;
/// Range of the table's opening serve.
pub const SERVE_POWER: std::ops::Range<Power> = 70..100;
/// Percentage of the incoming power that player A sends back.
pub const A_RETURN_PERCENT: std::ops::Range<Power> = 70..90;
/// Floor of player B's return, independent of the incoming ball.
pub const B_RETURN_BASE: Power = 50;
/// Random spread added on top of [`B_RETURN_BASE`].
pub const B_RETURN_SPREAD: std::ops::Range<Power> = 0..50;
/// Delay between acknowledging a start request and telling the table.
pub const KICKOFF_DELAY: std::time::Duration = std::time::Duration::from_millis(100);

// ============================================================================
// INFRASTRUCTURE
// ============================================================================
/// Concurrent forwards allowed per dispatcher.
pub const DISPATCH_WORKERS: usize = 16;
/// Pause between redelivery attempts.
pub const RETRY_BACKOFF: std::time::Duration = std::time::Duration::from_millis(50);
/// Unsaved matches held for another attempt before the oldest is dropped.
pub const OUTBOX_CAPACITY: usize = 64;
/// Dead letters kept per dispatcher before the oldest is forgotten.
pub const DEAD_LETTER_CAPACITY: usize = 64;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, `level` to terminal.
#[cfg(feature = "server")]
pub fn log(level: log::LevelFilter) -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}

/// Register Ctrl+C handler for immediate termination.
/// In-flight forwards are abandoned.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => log::warn!("interrupt received, exiting"),
            Err(e) => log::error!("failed to listen for interrupt: {}", e),
        }
        std::process::exit(0);
    });
}
