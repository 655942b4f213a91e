use crate::Config;
use crate::coordinator::*;
use crate::dispatch::Dispatcher;
use crate::ledger::Ledger;
use crate::store::Store;
use crate::table::Table;
use std::sync::Arc;

/// Both services wired together and running.
///
/// The coordinator task is spawned on construction and lives as long as
/// the table can still reach it.
pub struct Venue {
    players: Handle,
    table: Arc<Table>,
    dispatch: Dispatcher,
}

impl Venue {
    /// Coordinator and table in one process, calling each other directly.
    pub fn local(config: &Config, store: Arc<dyn Store>, ledger: impl Ledger + 'static) -> Self {
        let dispatch = config.dispatcher();
        let (players, inbox) = Handle::channel(store.clone());
        let table = Arc::new(Table::new(Arc::new(players.clone())).with_dispatch(dispatch.clone()));
        Coordinator::new(inbox, table.clone(), store)
            .with_ledger(ledger)
            .with_dispatch(dispatch.clone())
            .with_rules(config.rules)
            .spawn();
        log::info!("[venue] players and table wired in-process");
        Self {
            players,
            table,
            dispatch,
        }
    }

    /// Coordinator and table that reach each other over HTTP at the
    /// configured addresses.
    #[cfg(feature = "server")]
    pub fn remote(config: &Config, store: Arc<dyn Store>, ledger: impl Ledger + 'static) -> Self {
        use crate::transport::*;
        let dispatch = config.dispatcher();
        let (players, inbox) = Handle::channel(store.clone());
        let table = Arc::new(
            Table::new(Arc::new(RemotePlayers::new(config.players_url())))
                .with_dispatch(dispatch.clone()),
        );
        Coordinator::new(inbox, Arc::new(RemoteTable::new(config.table_url())), store)
            .with_ledger(ledger)
            .with_dispatch(dispatch.clone())
            .with_rules(config.rules)
            .spawn();
        log::info!(
            "[venue] players at {}, table at {}",
            config.players_url(),
            config.table_url()
        );
        Self {
            players,
            table,
            dispatch,
        }
    }

    pub fn players(&self) -> &Handle {
        &self.players
    }
    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }
    /// The pool both services forward through, with its dead letters.
    pub fn dispatch(&self) -> &Dispatcher {
        &self.dispatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rules;
    use crate::ledger;
    use crate::rally::*;
    use crate::store;
    use std::time::Duration;

    #[tokio::test]
    async fn local_rally_runs_to_completion() {
        let config = Config {
            rules: Rules {
                kickoff: Duration::from_millis(1),
                ..Rules::default()
            },
            ..Config::default()
        };
        let store = Arc::new(store::Memory::default());
        let ledger = ledger::Memory::default();
        let venue = Venue::local(&config, store.clone(), ledger.clone());
        venue.players().start_match().await.unwrap();
        let game = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if let Ok(game) = venue.players().get_match().await {
                    break game;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("rally did not finish");
        assert!(game.is_finished());
        assert!(game.winner().is_some());
        assert!(game.turns().len() <= 11);
        assert_eq!(game.turns()[0].player(), Player::A);
        assert!(game.turns().windows(2).all(|w| w[0].player() != w[1].player()));
        assert_eq!(ledger.turns(), game.turns().to_vec());
        assert!(!venue.players().is_game_active().await.unwrap());
        assert!(venue.dispatch().dead_letters().is_empty());
    }
}
