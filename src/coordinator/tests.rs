use super::*;
use crate::MatchId;
use crate::Power;
use crate::Rules;
use crate::dice::Scripted;
use crate::ledger;
use crate::rally::*;
use crate::store;
use crate::store::Store;
use crate::store::StoreError;
use crate::transport::Relay;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;

/// Table stand-in that remembers what it was asked to do.
#[derive(Default)]
struct Recorder {
    starts: Mutex<Vec<Option<Routine>>>,
    balls: Mutex<Vec<Ball>>,
}

#[async_trait::async_trait]
impl Relay for Recorder {
    async fn start_game(&self, routine: Option<Routine>) -> anyhow::Result<()> {
        self.starts.lock().unwrap().push(routine);
        Ok(())
    }
    async fn receive_ball(&self, ball: Ball) -> anyhow::Result<()> {
        self.balls.lock().unwrap().push(ball);
        Ok(())
    }
}

/// In-memory store that can be switched off.
#[derive(Default)]
struct Flaky {
    down: AtomicBool,
    inner: store::Memory,
}

impl Flaky {
    fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }
    fn check(&self) -> Result<(), StoreError> {
        match self.down.load(Ordering::SeqCst) {
            true => Err(StoreError::Unavailable(String::from("connection refused"))),
            false => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl Store for Flaky {
    async fn save_match(&self, game: &Match) -> Result<MatchId, StoreError> {
        self.check()?;
        self.inner.save_match(game).await
    }
    async fn match_by_id(&self, id: MatchId) -> Result<Match, StoreError> {
        self.inner.match_by_id(id).await
    }
    async fn last_match(&self) -> Result<Match, StoreError> {
        self.inner.last_match().await
    }
    async fn test_connection(&self) -> Result<(), StoreError> {
        self.check()
    }
}

/// Ledger on a full disk.
struct Unwritable;

impl ledger::Ledger for Unwritable {
    fn append(&mut self, _: &Turn) -> anyhow::Result<()> {
        anyhow::bail!("no space left on device")
    }
}

struct Rig {
    handle: Handle,
    table: Arc<Recorder>,
    store: Arc<Flaky>,
    ledger: ledger::Memory,
}

fn rig<I>(rolls: I) -> Rig
where
    I: IntoIterator<Item = Power>,
{
    let table = Arc::new(Recorder::default());
    let store = Arc::new(Flaky::default());
    let ledger = ledger::Memory::default();
    let (handle, inbox) = Handle::channel(store.clone());
    Coordinator::new(inbox, table.clone(), store.clone())
        .with_dice(Scripted::new(rolls))
        .with_ledger(ledger.clone())
        .with_rules(Rules {
            kickoff: Duration::ZERO,
            ..Rules::default()
        })
        .spawn();
    Rig {
        handle,
        table,
        store,
        ledger,
    }
}

async fn returned(ack: Ack) -> Power {
    match ack {
        Ack::Returned { power, forward } => {
            assert!(forward.wait().await.is_delivered());
            power
        }
        other => panic!("expected a return, got {:?}", other),
    }
}

fn finished(ack: Ack) -> (Winner, bool) {
    match ack {
        Ack::Finished { winner, saved } => (winner, saved),
        other => panic!("expected the match to finish, got {:?}", other),
    }
}

#[tokio::test]
async fn return_from_a_records_turn_and_forwards() {
    let rig = rig([80]);
    let Ack::Started { routine, .. } = rig.handle.start_match().await.unwrap() else {
        panic!("match did not start");
    };
    let power = returned(rig.handle.return_from_a(100).await.unwrap()).await;
    assert_eq!(power, 80);
    let turns = rig.ledger.turns();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].number(), 1);
    assert_eq!(turns[0].player(), Player::A);
    assert_eq!(turns[0].power(), 100);
    assert_eq!(turns[0].routine(), &routine);
    let balls = rig.table.balls.lock().unwrap().clone();
    assert_eq!(balls, vec![Ball::new(80, Player::A, Some(routine))]);
}

#[tokio::test]
async fn a_return_rounds_down() {
    let rig = rig([71]);
    rig.handle.start_match().await.unwrap();
    let power = returned(rig.handle.return_from_a(77).await.unwrap()).await;
    assert_eq!(power, 54);
}

#[tokio::test]
async fn kickoff_asks_table_to_serve_tagged_routine() {
    let rig = rig([]);
    let Ack::Started {
        match_number,
        routine,
        kickoff,
    } = rig.handle.start_match().await.unwrap()
    else {
        panic!("match did not start");
    };
    assert_eq!(match_number, 1);
    assert!(routine.as_str().starts_with("match-1-"));
    assert!(kickoff.wait().await.is_delivered());
    let starts = rig.table.starts.lock().unwrap().clone();
    assert_eq!(starts, vec![Some(routine)]);
}

#[tokio::test]
async fn eleventh_b_return_settles_by_power() {
    let rig = rig([49; 11]);
    rig.handle.start_match().await.unwrap();
    for _ in 0..10 {
        assert_eq!(returned(rig.handle.return_from_b(10).await.unwrap()).await, 99);
    }
    let (winner, saved) = finished(rig.handle.return_from_b(10).await.unwrap());
    assert_eq!(winner, Winner::B);
    assert!(saved);
    assert!(!rig.handle.is_game_active().await.unwrap());
    assert_eq!(rig.table.balls.lock().unwrap().len(), 10);
    let game = rig.handle.get_match().await.unwrap();
    assert_eq!(game.turns().len(), 11);
    assert_eq!(game.winner(), Some(Winner::B));
    assert!(game.end().is_some());
}

#[tokio::test]
async fn turn_limit_counts_both_players() {
    let rig = rig([80, 40, 80, 40, 80, 40, 80, 40, 80, 40, 25]);
    rig.handle.start_match().await.unwrap();
    for _ in 0..5 {
        returned(rig.handle.return_from_a(90).await.unwrap()).await;
        returned(rig.handle.return_from_b(60).await.unwrap()).await;
    }
    let (winner, _) = finished(rig.handle.return_from_b(75).await.unwrap());
    assert_eq!(winner, Winner::Draw);
    let game = rig.handle.get_match().await.unwrap();
    assert_eq!(game.turns().last().map(Turn::number), Some(11));
}

#[tokio::test]
async fn weak_b_return_loses_to_a() {
    let rig = rig([0, 10]);
    rig.handle.start_match().await.unwrap();
    let (winner, saved) = finished(rig.handle.return_from_b(50).await.unwrap());
    assert_eq!(winner, Winner::A);
    assert!(saved);
    assert!(rig.table.balls.lock().unwrap().is_empty());

    rig.handle.start_match().await.unwrap();
    let (winner, _) = finished(rig.handle.return_from_b(61).await.unwrap());
    assert_eq!(winner, Winner::A);
}

#[tokio::test]
async fn late_pings_are_ignored_for_both_players() {
    let rig = rig([]);
    assert!(matches!(rig.handle.return_from_a(90).await.unwrap(), Ack::Ignored));
    rig.handle.start_match().await.unwrap();
    finished(rig.handle.return_from_b(200).await.unwrap());
    assert!(matches!(rig.handle.return_from_a(90).await.unwrap(), Ack::Ignored));
    assert!(matches!(rig.handle.return_from_b(10).await.unwrap(), Ack::Ignored));
    assert_eq!(rig.ledger.turns().len(), 1);
    assert!(rig.table.balls.lock().unwrap().is_empty());
    assert_eq!(rig.store.inner.len().await, 1);
}

#[tokio::test]
async fn pings_from_another_routine_are_ignored() {
    let rig = rig([]);
    rig.handle.start_match().await.unwrap();
    let stale = Ping::new(90, Player::A, Some(Routine::from("match-0-20000101000000")));
    assert!(matches!(rig.handle.return_from(stale).await.unwrap(), Ack::Ignored));
    assert!(rig.ledger.turns().is_empty());
    assert!(rig.handle.is_game_active().await.unwrap());
}

#[tokio::test]
async fn activity_follows_match_lifecycle() {
    let rig = rig([]);
    assert!(!rig.handle.is_game_active().await.unwrap());
    rig.handle.start_match().await.unwrap();
    assert!(rig.handle.is_game_active().await.unwrap());
    finished(rig.handle.return_from_b(99).await.unwrap());
    assert!(!rig.handle.is_game_active().await.unwrap());
    assert!(rig.handle.current().await.unwrap().is_none());
}

#[tokio::test]
async fn restart_abandons_unfinished_match() {
    let rig = rig([80]);
    rig.handle.start_match().await.unwrap();
    returned(rig.handle.return_from_a(100).await.unwrap()).await;
    let Ack::Started { match_number, .. } = rig.handle.start_match().await.unwrap() else {
        panic!("match did not restart");
    };
    assert_eq!(match_number, 2);
    let current = rig.handle.current().await.unwrap().unwrap();
    assert_eq!(current.number(), 2);
    assert!(current.turns().is_empty());
    assert!(rig.store.inner.is_empty().await);
}

#[tokio::test]
async fn failed_save_is_parked_until_flush() {
    let rig = rig([]);
    rig.store.set_down(true);
    rig.handle.start_match().await.unwrap();
    let (_, saved) = finished(rig.handle.return_from_b(90).await.unwrap());
    assert!(!saved);
    assert_eq!(rig.handle.flush().await.unwrap(), 1);
    rig.store.set_down(false);
    assert_eq!(rig.handle.flush().await.unwrap(), 0);
    let game = rig.handle.get_match().await.unwrap();
    assert_eq!(game.number(), 1);
    assert_eq!(game.winner(), Some(Winner::A));
}

#[tokio::test]
async fn parked_matches_are_saved_before_the_next() {
    let rig = rig([]);
    rig.store.set_down(true);
    rig.handle.start_match().await.unwrap();
    finished(rig.handle.return_from_b(90).await.unwrap());
    rig.store.set_down(false);
    rig.handle.start_match().await.unwrap();
    let (_, saved) = finished(rig.handle.return_from_b(90).await.unwrap());
    assert!(saved);
    assert_eq!(rig.handle.get_match_by_id(1).await.unwrap().number(), 1);
    assert_eq!(rig.handle.get_match_by_id(2).await.unwrap().number(), 2);
    assert!(rig.handle.test_store_connection().await.is_ok());
}

#[tokio::test]
async fn failed_ledger_write_does_not_stop_the_turn() {
    let table = Arc::new(Recorder::default());
    let store = Arc::new(store::Memory::default());
    let (handle, inbox) = Handle::channel(store.clone());
    Coordinator::new(inbox, table.clone(), store)
        .with_dice(Scripted::new([80]))
        .with_ledger(Unwritable)
        .spawn();
    handle.start_match().await.unwrap();
    let power = returned(handle.return_from_a(100).await.unwrap()).await;
    assert_eq!(power, 80);
    let current = handle.current().await.unwrap().unwrap();
    assert_eq!(current.turns().len(), 1);
    assert_eq!(current.turns()[0].power(), 100);
    assert_eq!(table.balls.lock().unwrap().len(), 1);
}
