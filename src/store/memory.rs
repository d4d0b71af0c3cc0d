use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use super::{PersonDirectory, RecordStore, StoreResult};
use crate::model::cohort::Cohort;
use crate::model::person::PersonRef;

/// Non-durable document store. Backs tests and single-process deployments
/// that can afford to lose the board on restart.
#[derive(Default)]
pub struct MemoryStore {
    docs: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn load(&self, key: &str) -> StoreResult<Option<Value>> {
        let docs = self.docs.read().expect("memory store poisoned");
        Ok(docs.get(key).cloned())
    }

    async fn save(&self, key: &str, value: Value) -> StoreResult<()> {
        let mut docs = self.docs.write().expect("memory store poisoned");
        docs.insert(key.to_string(), value);
        Ok(())
    }
}

/// In-memory roster, populated by hand.
#[derive(Default)]
pub struct MemoryDirectory {
    persons: RwLock<Vec<(Cohort, PersonRef)>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enroll(&self, cohort: Cohort, id: &str, display_name: &str) {
        let mut persons = self.persons.write().expect("memory directory poisoned");
        persons.push((
            cohort,
            PersonRef {
                id: id.to_string(),
                display_name: display_name.to_string(),
            },
        ));
    }
}

#[async_trait]
impl PersonDirectory for MemoryDirectory {
    async fn list(&self, cohort: Cohort) -> StoreResult<Vec<PersonRef>> {
        let persons = self.persons.read().expect("memory directory poisoned");
        Ok(persons
            .iter()
            .filter(|(c, _)| *c == cohort)
            .map(|(_, p)| p.clone())
            .collect())
    }

    async fn display_name(&self, person_id: &str) -> StoreResult<Option<String>> {
        let persons = self.persons.read().expect("memory directory poisoned");
        Ok(persons
            .iter()
            .find(|(_, p)| p.id == person_id)
            .map(|(_, p)| p.display_name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[actix_web::test]
    async fn load_of_missing_key_is_none() {
        let store = MemoryStore::new();
        assert!(store.load("nursery_statuses").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn save_then_load_round_trips_and_overwrites() {
        let store = MemoryStore::new();
        store
            .save("staff_statuses", json!({"s1": {"status": "checked-in"}}))
            .await
            .unwrap();
        store
            .save("staff_statuses", json!({"s1": {"status": "checked-out"}}))
            .await
            .unwrap();

        let doc = store.load("staff_statuses").await.unwrap().unwrap();
        assert_eq!(doc["s1"]["status"], "checked-out");
        // other keys stay untouched
        assert!(store.load("nursery_statuses").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn directory_lists_only_the_requested_cohort() {
        let dir = MemoryDirectory::new();
        dir.enroll(Cohort::Nursery, "s1", "Ama");
        dir.enroll(Cohort::Staff, "t1", "Mr. Boateng");

        let nursery = dir.list(Cohort::Nursery).await.unwrap();
        assert_eq!(nursery.len(), 1);
        assert_eq!(nursery[0].display_name, "Ama");

        assert_eq!(
            dir.display_name("t1").await.unwrap().as_deref(),
            Some("Mr. Boateng")
        );
        assert!(dir.display_name("ghost").await.unwrap().is_none());
    }
}
