use super::*;
use crate::Power;
use crate::Rules;
use crate::dice::*;
use crate::dispatch::*;
use crate::ledger::*;
use crate::rally::*;
use crate::store::*;
use crate::transport::Relay;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Single owner of the in-flight match.
///
/// Runs as one task draining its mailbox, so every command sees the state
/// left behind by the previous one.
///
/// After a match ends it is handed to the [`Store`] and forgotten. A save
/// that fails is parked in a bounded outbox and retried before the next
/// save or on [`Command::Flush`].
pub struct Coordinator {
    inbox: UnboundedReceiver<Command>,
    table: Arc<dyn Relay>,
    store: Arc<dyn Store>,
    ledger: Box<dyn Ledger>,
    dice: Box<dyn Dice>,
    dispatch: Dispatcher,
    rules: Rules,
    session: Option<Session>,
    count: u32,
    outbox: VecDeque<Match>,
}

impl Coordinator {
    pub fn new(
        inbox: UnboundedReceiver<Command>,
        table: Arc<dyn Relay>,
        store: Arc<dyn Store>,
    ) -> Self {
        Self {
            inbox,
            table,
            store,
            ledger: Box::new(Discard),
            dice: Box::new(Random::default()),
            dispatch: Dispatcher::default(),
            rules: Rules::default(),
            session: None,
            count: 0,
            outbox: VecDeque::new(),
        }
    }
    pub fn with_dice(mut self, dice: impl Dice + 'static) -> Self {
        self.dice = Box::new(dice);
        self
    }
    pub fn with_ledger(mut self, ledger: impl Ledger + 'static) -> Self {
        self.ledger = Box::new(ledger);
        self
    }
    pub fn with_dispatch(mut self, dispatch: Dispatcher) -> Self {
        self.dispatch = dispatch;
        self
    }
    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    /// Moves the coordinator onto its own task.
    /// It stops once every [`Handle`] is dropped.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(mut self) {
        log::debug!("[coordinator] running");
        while let Some(command) = self.inbox.recv().await {
            match command {
                Command::Start { reply } => {
                    let _ = reply.send(self.start());
                }
                Command::Return { ping, reply } => {
                    let _ = reply.send(self.receive(ping).await);
                }
                Command::Active { reply } => {
                    let _ = reply.send(self.session.is_some());
                }
                Command::Current { reply } => {
                    let _ = reply.send(self.session.as_ref().map(|s| s.game().clone()));
                }
                Command::Flush { reply } => {
                    self.flush().await;
                    let _ = reply.send(self.outbox.len());
                }
            }
        }
        if !self.outbox.is_empty() {
            log::error!("[coordinator] stopping with {} unsaved matches", self.outbox.len());
        }
        log::debug!("[coordinator] stopped");
    }
}

impl Coordinator {
    fn start(&mut self) -> Ack {
        if let Some(stale) = self.session.take() {
            log::warn!(
                "[coordinator] abandoning match {} after {} turns",
                stale.game().number(),
                stale.turns()
            );
        }
        self.count += 1;
        let session = Session::new(self.count);
        let routine = session.routine().clone();
        self.session = Some(session);
        log::info!("[coordinator] match {} started ({})", self.count, routine);
        let table = self.table.clone();
        let tag = routine.clone();
        let kickoff = self.dispatch.send_after(
            format!("start {}", routine),
            self.rules.kickoff,
            move || {
                let table = table.clone();
                let tag = tag.clone();
                async move { table.start_game(Some(tag)).await }
            },
        );
        Ack::Started {
            match_number: self.count,
            routine,
            kickoff,
        }
    }

    async fn receive(&mut self, ping: Ping) -> Ack {
        let Some(session) = self.session.as_mut() else {
            log::debug!("[coordinator] no match in play, ignoring ping to {}", ping.to());
            return Ack::Ignored;
        };
        if !session.admits(ping.routine()) {
            log::debug!(
                "[coordinator] ignoring ping to {} from {}",
                ping.to(),
                ping.routine().map(Routine::as_str).unwrap_or_default()
            );
            return Ack::Ignored;
        }
        let turn = session.record(ping.to(), ping.power());
        let routine = session.routine().clone();
        log::debug!("[coordinator] {}", turn);
        if let Err(e) = self.ledger.append(&turn) {
            log::warn!("[ledger] failed to record turn {}: {}", turn.number(), e);
        }
        match ping.to() {
            Player::A => {
                let percent = self.dice.roll(crate::A_RETURN_PERCENT);
                let power = (u64::from(ping.power()) * u64::from(percent) / 100) as Power;
                self.forward(Ball::new(power, Player::A, Some(routine)))
            }
            Player::B => {
                let power = crate::B_RETURN_BASE + self.dice.roll(crate::B_RETURN_SPREAD);
                if turn.number() > self.rules.turn_limit {
                    self.finish(Winner::by_power(power, ping.power())).await
                } else if power > ping.power() {
                    self.forward(Ball::new(power, Player::B, Some(routine)))
                } else {
                    self.finish(Winner::A).await
                }
            }
        }
    }

    fn forward(&self, ball: Ball) -> Ack {
        let power = ball.power();
        let table = self.table.clone();
        let label = format!("ball {} from {}", power, ball.hitter());
        let forward = self.dispatch.send(label, move || {
            let table = table.clone();
            let ball = ball.clone();
            async move { table.receive_ball(ball).await }
        });
        Ack::Returned { power, forward }
    }

    async fn finish(&mut self, winner: Winner) -> Ack {
        let Some(session) = self.session.take() else {
            return Ack::Ignored;
        };
        let game = session.conclude(winner);
        log::info!(
            "[coordinator] match {} won by {} after {} turns",
            game.number(),
            winner,
            game.turns().len()
        );
        let saved = self.persist(game).await;
        Ack::Finished { winner, saved }
    }

    async fn persist(&mut self, game: Match) -> bool {
        self.flush().await;
        match self.store.save_match(&game).await {
            Ok(id) => {
                log::info!("[store] match {} saved as {}", game.number(), id);
                true
            }
            Err(e) => {
                log::error!("[store] failed to save match {}: {}", game.number(), e);
                self.park(game);
                false
            }
        }
    }

    fn park(&mut self, game: Match) {
        if self.outbox.len() >= crate::OUTBOX_CAPACITY {
            if let Some(lost) = self.outbox.pop_front() {
                log::error!("[store] outbox full, match {} lost", lost.number());
            }
        }
        self.outbox.push_back(game);
    }

    /// Retries parked saves in order, stopping at the first that still fails.
    async fn flush(&mut self) {
        while let Some(game) = self.outbox.front() {
            match self.store.save_match(game).await {
                Ok(id) => {
                    log::info!("[store] parked match {} saved as {}", game.number(), id);
                    self.outbox.pop_front();
                }
                Err(e) => {
                    log::warn!("[store] {} matches still unsaved: {}", self.outbox.len(), e);
                    break;
                }
            }
        }
    }
}
