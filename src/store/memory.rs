use super::*;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Process-local store. Ids count up from 1 in save order.
#[derive(Debug, Default)]
pub struct Memory {
    rows: RwLock<BTreeMap<MatchId, Match>>,
}

impl Memory {
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl Store for Memory {
    async fn save_match(&self, game: &Match) -> Result<MatchId, StoreError> {
        let mut rows = self.rows.write().await;
        let id = rows.keys().next_back().copied().unwrap_or(0) + 1;
        rows.insert(id, game.clone().with_id(id));
        log::info!("[store] saved match #{} with id {}", game.number(), id);
        Ok(id)
    }
    async fn match_by_id(&self, id: MatchId) -> Result<Match, StoreError> {
        self.rows
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }
    async fn last_match(&self) -> Result<Match, StoreError> {
        self.rows
            .read()
            .await
            .values()
            .next_back()
            .cloned()
            .ok_or(StoreError::Empty)
    }
    async fn test_connection(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rally::*;
    use chrono::Utc;

    fn finished(number: u32) -> Match {
        let routine = Routine::new(number, Utc::now());
        let mut game = Match::new(number, Utc::now());
        game.append(Player::A, 90, &routine, Utc::now());
        game.append(Player::B, 72, &routine, Utc::now());
        game.conclude(Winner::A, Utc::now());
        game
    }

    #[tokio::test]
    async fn round_trip_preserves_turns() {
        let store = Memory::default();
        let game = finished(1);
        let id = store.save_match(&game).await.unwrap();
        let back = store.match_by_id(id).await.unwrap();
        assert_eq!(back.id(), id);
        assert_eq!(back.turns(), game.turns());
        assert_eq!(back.winner(), Some(Winner::A));
    }

    #[tokio::test]
    async fn last_match_is_latest_save() {
        let store = Memory::default();
        assert_eq!(store.last_match().await, Err(StoreError::Empty));
        store.save_match(&finished(1)).await.unwrap();
        store.save_match(&finished(2)).await.unwrap();
        assert_eq!(store.last_match().await.unwrap().number(), 2);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = Memory::default();
        assert_eq!(store.match_by_id(9).await, Err(StoreError::NotFound(9)));
    }
}
