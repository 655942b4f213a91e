use super::*;
use crate::rally::*;
use chrono::DateTime;
use chrono::Utc;
use const_format::concatcp;
use tokio::sync::Mutex;
use tokio_postgres::Client;
use tokio_postgres::NoTls;
use tokio_postgres::Row;

/// PostgreSQL-backed match store.
///
/// A save writes the match row, every turn row and the JSON copy of the turns
/// inside one transaction, so the two representations never disagree.
/// Transactions need exclusive access to the client, hence the mutex.
pub struct Postgres {
    client: Mutex<Client>,
}

impl Postgres {
    /// Connects, spawns the connection driver and creates missing tables.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        log::info!("[store] connecting to database");
        let (client, connection) = tokio_postgres::connect(url, NoTls).await?;
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                log::error!("[store] database connection closed: {}", e);
            }
        });
        client
            .batch_execute("SET client_min_messages TO WARNING")
            .await?;
        let store = Self {
            client: Mutex::new(client),
        };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), StoreError> {
        let client = self.client.lock().await;
        client.batch_execute(Match::creates()).await?;
        client.batch_execute(Turn::creates()).await?;
        client.batch_execute(Match::indices()).await?;
        client.batch_execute(Turn::indices()).await?;
        Ok(())
    }

    fn turn(row: &Row) -> Result<Turn, StoreError> {
        let player = Player::try_from(row.get::<_, &str>(3))
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        Ok(Turn::new(
            row.get::<_, i32>(1) as u32,
            row.get::<_, DateTime<Utc>>(2),
            player,
            row.get::<_, i32>(4) as crate::Power,
            Routine::from(row.get::<_, String>(5)),
            row.get::<_, i32>(6) as u32,
        )
        .with_id(row.get::<_, i64>(0)))
    }

    async fn turns(client: &Client, id: MatchId) -> Result<Vec<Turn>, StoreError> {
        const SQL: &str = concatcp!(
            "SELECT id, turn_number, time, player, ball_power, routine_id, match_number ",
            "FROM   ", TURNS, " ",
            "WHERE  match_id = $1 ",
            "ORDER  BY turn_number"
        );
        client
            .query(SQL, &[&id])
            .await?
            .iter()
            .map(Self::turn)
            .collect()
    }
}

#[async_trait::async_trait]
impl Store for Postgres {
    async fn save_match(&self, game: &Match) -> Result<MatchId, StoreError> {
        #[rustfmt::skip]
        const MATCH: &str = concatcp!(
            "INSERT INTO ", MATCHES, " (match_number, start_time, end_time, winner) ",
            "VALUES                    ($1,           $2,         $3,       $4) ",
            "RETURNING id"
        );
        #[rustfmt::skip]
        const TURN: &str = concatcp!(
            "INSERT INTO ", TURNS, " (turn_number, time, player, ball_power, routine_id, match_number, match_id) ",
            "VALUES                  ($1,          $2,   $3,     $4,         $5,         $6,           $7) ",
            "RETURNING id"
        );
        #[rustfmt::skip]
        const BLOB: &str = concatcp!(
            "UPDATE ", MATCHES, " ",
            "SET    turns = $1 ",
            "WHERE  id = $2"
        );
        log::info!("[store] saving match #{} with {} turns", game.number(), game.turns().len());
        let mut client = self.client.lock().await;
        let tx = client.transaction().await?;
        let insert = tx.prepare_typed(MATCH, Match::columns()).await?;
        let id = tx
            .query_one(
                &insert,
                &[
                    &(game.number() as i32),
                    &game.start(),
                    &game.end(),
                    &game.winner().map(|w| w.to_string()),
                ],
            )
            .await?
            .get::<_, i64>(0);
        let insert = tx.prepare_typed(TURN, Turn::columns()).await?;
        let mut stored = Vec::with_capacity(game.turns().len());
        for turn in game.turns() {
            let row = tx
                .query_one(
                    &insert,
                    &[
                        &(turn.number() as i32),
                        &turn.time(),
                        &turn.player().to_string(),
                        &(turn.power() as i32),
                        &turn.routine().as_str(),
                        &(turn.match_number() as i32),
                        &id,
                    ],
                )
                .await?;
            stored.push(turn.clone().with_id(row.get::<_, i64>(0)));
        }
        let json = serde_json::to_value(&stored)?;
        tx.execute(BLOB, &[&json, &id]).await?;
        tx.commit().await?;
        log::info!("[store] saved match #{} with id {}", game.number(), id);
        Ok(id)
    }

    async fn match_by_id(&self, id: MatchId) -> Result<Match, StoreError> {
        #[rustfmt::skip]
        const SQL: &str = concatcp!(
            "SELECT id, match_number, start_time, end_time, winner, turns ",
            "FROM   ", MATCHES, " ",
            "WHERE  id = $1"
        );
        let client = self.client.lock().await;
        let row = client
            .query_opt(SQL, &[&id])
            .await?
            .ok_or(StoreError::NotFound(id))?;
        let turns = match row.get::<_, Option<serde_json::Value>>(5) {
            Some(json) => serde_json::from_value::<Vec<Turn>>(json)?,
            None => Self::turns(&client, id).await?,
        };
        let result = match (
            row.get::<_, Option<DateTime<Utc>>>(3),
            row.get::<_, Option<String>>(4),
        ) {
            (Some(end), Some(winner)) => Some((
                end,
                Winner::try_from(winner.as_str())
                    .map_err(|e| StoreError::Corrupt(e.to_string()))?,
            )),
            (None, None) => None,
            _ => {
                return Err(StoreError::Corrupt(format!(
                    "match {} has only one of end time and winner",
                    id
                )));
            }
        };
        Match::hydrate(
            row.get::<_, i64>(0),
            row.get::<_, i32>(1) as u32,
            row.get::<_, DateTime<Utc>>(2),
            result,
            turns,
        )
        .map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    async fn last_match(&self) -> Result<Match, StoreError> {
        const SQL: &str = concatcp!("SELECT MAX(id) FROM ", MATCHES);
        let id = self
            .client
            .lock()
            .await
            .query_one(SQL, &[])
            .await?
            .get::<_, Option<i64>>(0)
            .ok_or(StoreError::Empty)?;
        self.match_by_id(id).await
    }

    async fn test_connection(&self) -> Result<(), StoreError> {
        self.client
            .lock()
            .await
            .execute("SELECT 1", &[])
            .await
            .map(|_| log::info!("[store] connection test passed"))
            .inspect_err(|e| log::error!("[store] connection test failed: {}", e))
            .map_err(StoreError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires DB_URL"]
    async fn blob_and_rows_carry_the_same_turn_ids() {
        let ref url = std::env::var("DB_URL").expect("DB_URL must be set");
        let store = Postgres::connect(url).await.unwrap();
        let now = Utc::now();
        let routine = Routine::new(1, now);
        let mut game = Match::new(1, now);
        game.append(Player::A, 90, &routine, now);
        game.append(Player::B, 72, &routine, now);
        game.conclude(Winner::A, now);
        let id = store.save_match(&game).await.unwrap();
        let blob = store.match_by_id(id).await.unwrap();
        let rows = Postgres::turns(&*store.client.lock().await, id).await.unwrap();
        assert_eq!(blob.turns(), rows.as_slice());
        assert!(rows.iter().all(|turn| turn.id() > 0));
        assert_eq!(blob.winner(), Some(Winner::A));
    }
}
