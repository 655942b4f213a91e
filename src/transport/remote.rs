use super::*;
use crate::MatchId;
use crate::dispatch::Letter;
use crate::dto::*;
use reqwest::Client;

/// The players' service reached over HTTP.
#[derive(Debug, Clone)]
pub struct RemotePlayers {
    client: Client,
    base: String,
}

impl RemotePlayers {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base: base.into(),
        }
    }
    pub async fn start_match(&self) -> anyhow::Result<Acknowledged> {
        let url = format!("{}/match", self.base);
        Ok(self.client.post(url).send().await?.error_for_status()?.json().await?)
    }
    pub async fn last_match(&self) -> anyhow::Result<Match> {
        let url = format!("{}/match", self.base);
        Ok(self.client.get(url).send().await?.error_for_status()?.json().await?)
    }
    pub async fn match_by_id(&self, id: MatchId) -> anyhow::Result<Match> {
        let url = format!("{}/match/{}", self.base, id);
        Ok(self.client.get(url).send().await?.error_for_status()?.json().await?)
    }
    pub async fn test_store(&self) -> anyhow::Result<Status> {
        let url = format!("{}/store", self.base);
        Ok(self.client.get(url).send().await?.error_for_status()?.json().await?)
    }
    /// Lists the server's dead letters, taking them when `drain` is set.
    pub async fn dead_letters(&self, drain: bool) -> anyhow::Result<Vec<Letter>> {
        let url = format!("{}/dead-letters", self.base);
        let request = match drain {
            true => self.client.delete(url),
            false => self.client.get(url),
        };
        Ok(request.send().await?.error_for_status()?.json().await?)
    }
    pub async fn flush(&self) -> anyhow::Result<Pending> {
        let url = format!("{}/flush", self.base);
        Ok(self.client.post(url).send().await?.error_for_status()?.json().await?)
    }
}

#[async_trait::async_trait]
impl Players for RemotePlayers {
    async fn ping(&self, ping: Ping) -> anyhow::Result<()> {
        let url = match ping.to() {
            Player::A => format!("{}/ping/a", self.base),
            Player::B => format!("{}/ping/b", self.base),
        };
        self.client
            .post(url)
            .json(&PingBall::from(&ping))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
    async fn is_game_active(&self) -> anyhow::Result<bool> {
        let url = format!("{}/active", self.base);
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Active>()
            .await?;
        Ok(body.active)
    }
}

/// The table's service reached over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteTable {
    client: Client,
    base: String,
}

impl RemoteTable {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base: base.into(),
        }
    }
}

#[async_trait::async_trait]
impl Relay for RemoteTable {
    async fn start_game(&self, routine: Option<Routine>) -> anyhow::Result<()> {
        let url = format!("{}/start", self.base);
        self.client
            .post(url)
            .json(&StartGame { routine_id: routine })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
    async fn receive_ball(&self, ball: Ball) -> anyhow::Result<()> {
        let url = format!("{}/ball", self.base);
        self.client
            .post(url)
            .json(&ReceiveBall::from(&ball))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
