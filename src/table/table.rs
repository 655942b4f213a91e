use super::*;
use crate::dice::*;
use crate::dispatch::*;
use crate::rally::*;
use crate::transport::*;
use std::sync::Arc;
use std::sync::Mutex;

pub struct Table {
    players: Arc<dyn Players>,
    dice: Mutex<Box<dyn Dice>>,
    dispatch: Dispatcher,
}

impl Table {
    pub fn new(players: Arc<dyn Players>) -> Self {
        Self {
            players,
            dice: Mutex::new(Box::new(Random::default())),
            dispatch: Dispatcher::default(),
        }
    }
    pub fn with_dice(mut self, dice: impl Dice + 'static) -> Self {
        self.dice = Mutex::new(Box::new(dice));
        self
    }
    pub fn with_dispatch(mut self, dispatch: Dispatcher) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Serves toward player A and returns without waiting for the hit.
    pub fn start_game(&self, routine: Option<Routine>) -> Serve {
        let power = self
            .dice
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .roll(crate::SERVE_POWER);
        log::info!("[table] serving {} to A", power);
        let receipt = self.deliver(Ping::new(power, Player::A, routine));
        Serve { power, receipt }
    }

    /// Passes `ball` to the opposite player if the match is still on.
    ///
    /// When the liveness check itself fails the ball is forwarded anyway;
    /// the coordinator discards it if it turns out to be stale.
    pub async fn receive_ball(&self, ball: Ball) -> Relayed {
        match self.players.is_game_active().await {
            Ok(true) => {}
            Ok(false) => {
                log::debug!("[table] match over, dropping ball from {}", ball.hitter());
                return Relayed::Dropped;
            }
            Err(e) => log::warn!("[table] liveness check failed, forwarding anyway: {}", e),
        }
        log::debug!(
            "[table] ball {} from {} to {}",
            ball.power(),
            ball.hitter(),
            ball.hitter().opposite()
        );
        Relayed::Forwarded(self.deliver(ball.across()))
    }

    fn deliver(&self, ping: Ping) -> Receipt {
        let players = self.players.clone();
        let label = format!("ping {} to {}", ping.power(), ping.to());
        self.dispatch.send(label, move || {
            let players = players.clone();
            let ping = ping.clone();
            async move { players.ping(ping).await }
        })
    }
}

#[async_trait::async_trait]
impl Relay for Table {
    async fn start_game(&self, routine: Option<Routine>) -> anyhow::Result<()> {
        Table::start_game(self, routine);
        Ok(())
    }
    async fn receive_ball(&self, ball: Ball) -> anyhow::Result<()> {
        Table::receive_ball(self, ball).await;
        Ok(())
    }
}
