//! Ping-Pong Rally Binary
//!
//! Runs the players and table services, or talks to running ones.
//!
//! Subcommands: serve [--local], start, show [--id N], check, flush, letters [--drain]

use clap::Parser;
use clap::Subcommand;
use pingpong::dispatch::Redelivery;
use pingpong::ledger;
use pingpong::store;
use pingpong::store::Store;
use pingpong::transport::RemotePlayers;
use pingpong::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, env = "PLAYERS_ADDR", default_value = "127.0.0.1:8888")]
    players_addr: String,
    #[arg(long, env = "TABLE_ADDR", default_value = "127.0.0.1:8889")]
    table_addr: String,
    #[arg(long, env = "DB_URL")]
    db_url: Option<String>,
    #[arg(long, env = "LEDGER_PATH", default_value = "match_log.csv")]
    ledger: PathBuf,
    #[arg(long, env = "DISPATCH_WORKERS", default_value_t = DISPATCH_WORKERS)]
    workers: usize,
    #[arg(long, env = "REDELIVERY", default_value = "drop")]
    redelivery: Redelivery,
    #[arg(long, env = "TURN_LIMIT", default_value_t = TURN_LIMIT)]
    turn_limit: u32,
    #[arg(long, env = "KICKOFF_MS", default_value_t = 100)]
    kickoff_ms: u64,
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: log::LevelFilter,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Run the players and table services")]
    Serve {
        #[arg(long, help = "Wire both services in-process instead of over HTTP")]
        local: bool,
    },
    #[command(about = "Start a new match on a running server")]
    Start,
    #[command(about = "Print the last or a given match as JSON")]
    Show {
        #[arg(long)]
        id: Option<MatchId>,
    },
    #[command(about = "Check the server's store connection")]
    Check,
    #[command(about = "Retry saving matches the store rejected")]
    Flush,
    #[command(about = "Print forwards that gave up under the dead-letter policy")]
    Letters {
        #[arg(long, help = "Remove the letters from the server after printing")]
        drain: bool,
    },
}

impl Args {
    fn config(&self) -> Config {
        Config {
            players_addr: self.players_addr.clone(),
            table_addr: self.table_addr.clone(),
            db_url: self.db_url.clone(),
            ledger: self.ledger.clone(),
            workers: self.workers,
            redelivery: self.redelivery,
            rules: Rules {
                turn_limit: self.turn_limit,
                kickoff: Duration::from_millis(self.kickoff_ms),
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    log(args.log_level)?;
    kys();
    let config = args.config();
    let remote = RemotePlayers::new(config.players_url());
    match args.command {
        Command::Serve { local } => serve(&config, local).await,
        Command::Start => print(&remote.start_match().await?),
        Command::Show { id: Some(id) } => print(&remote.match_by_id(id).await?),
        Command::Show { id: None } => print(&remote.last_match().await?),
        Command::Check => print(&remote.test_store().await?),
        Command::Flush => print(&remote.flush().await?),
        Command::Letters { drain } => print(&remote.dead_letters(drain).await?),
    }
}

async fn serve(config: &Config, local: bool) -> anyhow::Result<()> {
    let store = connect(config).await?;
    let (ledger, _) = ledger::Background::spawn(ledger::Csv::open(&config.ledger)?);
    let venue = match local {
        true => Venue::local(config, store, ledger),
        false => Venue::remote(config, store, ledger),
    };
    hosting::Server::run(venue, &config.players_addr, &config.table_addr).await?;
    Ok(())
}

async fn connect(config: &Config) -> anyhow::Result<Arc<dyn Store>> {
    match config.db_url.as_deref() {
        #[cfg(feature = "database")]
        Some(url) => {
            let db = store::Postgres::connect(url).await?;
            db.test_connection().await?;
            Ok(Arc::new(db))
        }
        #[cfg(not(feature = "database"))]
        Some(_) => anyhow::bail!("DB_URL is set but database support is not compiled in"),
        None => {
            log::warn!("[store] DB_URL not set, matches are kept in memory");
            Ok(Arc::new(store::Memory::default()))
        }
    }
}

fn print<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
