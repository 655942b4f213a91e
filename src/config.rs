use crate::dispatch::Redelivery;
use std::path::PathBuf;
use std::time::Duration;

/// Knobs of the rally itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// A B return that takes the turn count past this settles the match.
    pub turn_limit: u32,
    /// Pause between accepting a start and asking the table to serve.
    pub kickoff: Duration,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            turn_limit: crate::TURN_LIMIT,
            kickoff: crate::KICKOFF_DELAY,
        }
    }
}

/// Everything a deployment of both services needs to know.
#[derive(Debug, Clone)]
pub struct Config {
    pub players_addr: String,
    pub table_addr: String,
    /// Postgres connection string. Without one, matches are kept in memory.
    pub db_url: Option<String>,
    pub ledger: PathBuf,
    pub workers: usize,
    pub redelivery: Redelivery,
    pub rules: Rules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            players_addr: String::from("127.0.0.1:8888"),
            table_addr: String::from("127.0.0.1:8889"),
            db_url: None,
            ledger: PathBuf::from("match_log.csv"),
            workers: crate::DISPATCH_WORKERS,
            redelivery: Redelivery::default(),
            rules: Rules::default(),
        }
    }
}

impl Config {
    pub fn dispatcher(&self) -> crate::dispatch::Dispatcher {
        crate::dispatch::Dispatcher::new(self.workers, self.redelivery)
    }
    pub fn players_url(&self) -> String {
        Self::url(&self.players_addr)
    }
    pub fn table_url(&self) -> String {
        Self::url(&self.table_addr)
    }
    fn url(addr: &str) -> String {
        match addr.starts_with("http://") || addr.starts_with("https://") {
            true => addr.trim_end_matches('/').to_string(),
            false => format!("http://{}", addr.trim_end_matches('/')),
        }
    }
}
