use std::collections::{BTreeSet, HashMap};

use crate::catalog::CatalogLookup;
use crate::error::Result;
use crate::models::{Food, FoodRecord};
use crate::planner::resolver::normalize_record;

/// A catalog held entirely in memory, keyed by record id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    records: HashMap<String, FoodRecord>,
}

impl InMemoryCatalog {
    /// Build a catalog from raw records; later duplicates replace earlier ones.
    pub fn new(records: Vec<FoodRecord>) -> Self {
        let mut map = HashMap::new();
        for record in records {
            map.insert(record.id.clone(), record);
        }
        Self { records: map }
    }

    pub fn get(&self, id: &str) -> Option<&FoodRecord> {
        self.records.get(id)
    }

    /// Every record, normalized, keyed by id.
    pub fn snapshot(&self) -> HashMap<String, Food> {
        self.records
            .iter()
            .map(|(id, record)| (id.clone(), normalize_record(record)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CatalogLookup for InMemoryCatalog {
    async fn lookup(&self, ids: &BTreeSet<String>) -> Result<Vec<FoodRecord>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.records.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    fn record(id: &str, fields: Value) -> FoodRecord {
        let fields: Map<String, Value> = serde_json::from_value(fields).unwrap();
        FoodRecord::new(id, fields)
    }

    fn sample_catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            record("egg", json!({"name": "Egg", "protein": 13, "fat": 11, "carbohydrate": 1})),
            record("rice", json!({"name": "Rice", "calories": 130})),
            record("egg", json!({"name": "Duck Egg", "protein": 13})),
        ])
    }

    #[test]
    fn test_later_duplicates_replace() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("egg").unwrap().field("name"), &json!("Duck Egg"));
    }

    #[test]
    fn test_snapshot_normalizes() {
        let snapshot = sample_catalog().snapshot();
        assert_eq!(snapshot["rice"].calories, 130.0);
        assert_eq!(snapshot["egg"].name, "Duck Egg");
    }

    #[tokio::test]
    async fn test_lookup_returns_only_known_ids() {
        let catalog = sample_catalog();
        let ids: BTreeSet<String> = ["egg", "ghost"].iter().map(|s| s.to_string()).collect();

        let records = catalog.lookup(&ids).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "egg");
    }
}
