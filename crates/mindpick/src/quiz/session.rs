use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::answers::Answers;
use super::engine::ScoredOutcome;
use super::results::ResultSpec;

/// Identifier of a browsing session that owns one outcome slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Last scoring run for a session, kept so result pages can be revisited
/// without re-answering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredOutcome {
    pub slug: String,
    pub answers: Answers,
    pub outcome: ScoredOutcome,
    pub result: Option<ResultSpec>,
    pub saved_at: DateTime<Utc>,
}

/// Single-slot outcome storage. Saving for another slug replaces the slot.
/// Loading with a slug other than the stored one yields nothing and leaves the
/// slot in place.
pub trait OutcomeStore: Send + Sync {
    fn save(&self, session: &SessionId, outcome: StoredOutcome) -> Result<(), StoreError>;
    fn load(&self, session: &SessionId, slug: &str) -> Result<Option<StoredOutcome>, StoreError>;
    fn clear(&self, session: &SessionId) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("outcome store unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store used by the API service and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryOutcomeStore {
    slots: Arc<Mutex<HashMap<SessionId, StoredOutcome>>>,
}

impl InMemoryOutcomeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<SessionId, StoredOutcome>>, StoreError> {
        self.slots
            .lock()
            .map_err(|_| StoreError::Unavailable("outcome store lock poisoned".to_string()))
    }
}

impl OutcomeStore for InMemoryOutcomeStore {
    fn save(&self, session: &SessionId, outcome: StoredOutcome) -> Result<(), StoreError> {
        self.slots()?.insert(session.clone(), outcome);
        Ok(())
    }

    fn load(&self, session: &SessionId, slug: &str) -> Result<Option<StoredOutcome>, StoreError> {
        let slots = self.slots()?;
        Ok(slots
            .get(session)
            .filter(|stored| stored.slug == slug)
            .cloned())
    }

    fn clear(&self, session: &SessionId) -> Result<(), StoreError> {
        self.slots()?.remove(session);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::engine::EngineKind;

    fn stored(slug: &str) -> StoredOutcome {
        StoredOutcome {
            slug: slug.to_string(),
            answers: Answers::new().with("q1", "a"),
            outcome: ScoredOutcome {
                outcome_type: Some("ESTJ".to_string()),
                score: None,
                max: None,
                band: None,
                tally: None,
                engine: EngineKind::Mbti,
            },
            result: None,
            saved_at: Utc::now(),
        }
    }

    #[test]
    fn load_returns_the_slot_for_the_same_slug() {
        let store = InMemoryOutcomeStore::new();
        let session = SessionId::new("s1");
        store.save(&session, stored("love-type")).expect("save");

        let loaded = store.load(&session, "love-type").expect("load");
        assert_eq!(loaded.map(|outcome| outcome.slug), Some("love-type".to_string()));
    }

    #[test]
    fn saving_another_slug_replaces_the_slot() {
        let store = InMemoryOutcomeStore::new();
        let session = SessionId::new("s1");
        store.save(&session, stored("love-type")).expect("save");
        store.save(&session, stored("stress-check")).expect("save");

        assert!(store.load(&session, "love-type").expect("load").is_none());
        assert!(store.load(&session, "stress-check").expect("load").is_some());
    }

    #[test]
    fn loading_another_slug_keeps_the_slot() {
        let store = InMemoryOutcomeStore::new();
        let session = SessionId::new("s1");
        store.save(&session, stored("love-type")).expect("save");

        assert!(store.load(&session, "other").expect("load").is_none());
        assert!(store.load(&session, "love-type").expect("load").is_some());
    }

    #[test]
    fn sessions_are_isolated() {
        let store = InMemoryOutcomeStore::new();
        store.save(&SessionId::new("a"), stored("quiz")).expect("save");
        assert!(store.load(&SessionId::new("b"), "quiz").expect("load").is_none());

        store.clear(&SessionId::new("a")).expect("clear");
        assert!(store.load(&SessionId::new("a"), "quiz").expect("load").is_none());
    }
}
