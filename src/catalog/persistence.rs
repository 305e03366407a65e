use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{NutriError, Result};
use crate::models::{FoodRecord, PlanPayload};
use crate::planner::constants::ID_KEY;

/// Deduplicate records by id, last occurrence wins. First-seen order is kept.
pub fn dedupe_by_id(records: Vec<FoodRecord>) -> Vec<FoodRecord> {
    let mut order: Vec<String> = Vec::new();
    let mut seen: HashMap<String, FoodRecord> = HashMap::new();
    for record in records {
        if !seen.contains_key(&record.id) {
            order.push(record.id.clone());
        }
        seen.insert(record.id.clone(), record);
    }
    order.into_iter().filter_map(|id| seen.remove(&id)).collect()
}

/// Parse a JSON array of catalog documents.
///
/// Numeric ids are accepted as their decimal string; any other non-string id
/// fails the whole catalog.
pub fn parse_json_records(content: &str) -> Result<Vec<FoodRecord>> {
    let records: Vec<FoodRecord> = serde_json::from_str(content)?;
    Ok(dedupe_by_id(records))
}

/// Parse a CSV catalog with a header row; one column must be `id`.
///
/// Cells are kept as strings and empty cells are left out, so they read as
/// missing fields.
pub fn parse_csv_records(content: &str) -> Result<Vec<FoodRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row?;
        let mut id = None;
        let mut fields = Map::new();
        for (key, cell) in headers.iter().zip(row.iter()) {
            if key == ID_KEY {
                id = Some(cell.to_string());
            } else if !cell.is_empty() {
                fields.insert(key.to_string(), Value::String(cell.to_string()));
            }
        }
        let id = id.filter(|id| !id.is_empty()).ok_or_else(|| {
            NutriError::Catalog(format!("CSV row {} has no id", line + 2))
        })?;
        records.push(FoodRecord::new(id, fields));
    }

    Ok(dedupe_by_id(records))
}

/// Load a plan payload from a JSON file.
pub fn load_payload<P: AsRef<Path>>(path: P) -> Result<PlanPayload> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write any serializable value as pretty JSON.
pub fn save_json<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlanType;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_json_deduplication() {
        let json = r#"[
            {"id": "apple", "name": "Apple", "calories": 52},
            {"id": "pear", "name": "Pear"},
            {"id": "apple", "name": "Green Apple", "calories": 58}
        ]"#;

        let records = parse_json_records(json).unwrap();
        assert_eq!(records.len(), 2);
        // Last occurrence wins, first position kept
        assert_eq!(records[0].id, "apple");
        assert_eq!(records[0].field("name"), &json!("Green Apple"));
        assert_eq!(records[1].id, "pear");
    }

    #[test]
    fn test_json_numeric_ids() {
        let json = r#"[{"id": 7, "name": "Lentils"}, {"id": "7", "name": "Red Lentils"}, {"id": "oats"}]"#;

        let records = parse_json_records(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "7");
        assert_eq!(records[0].field("name"), &json!("Red Lentils"));
        assert!(parse_json_records(r#"[{"id": true}]"#).is_err());
    }

    #[test]
    fn test_csv_records() {
        let csv = "id,name,protein,fat,carbohydrate,calories\n\
                   egg, Egg ,13,11,1,\n\
                   rice,Rice,2.7,0.3,28,130\n";

        let records = parse_csv_records(csv).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "egg");
        assert_eq!(records[0].field("name"), &json!("Egg"));
        assert_eq!(records[0].field("calories"), &Value::Null);
        assert_eq!(records[1].field("protein"), &json!("2.7"));
    }

    #[test]
    fn test_csv_missing_id_is_an_error() {
        let csv = "id,name\n,Nameless\n";
        assert!(matches!(
            parse_csv_records(csv),
            Err(NutriError::Catalog(_))
        ));
    }

    #[test]
    fn test_payload_roundtrip() {
        let json = r#"{"name": "Cut", "planType": "bulk", "meals": []}"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let payload = load_payload(file.path()).unwrap();
        assert_eq!(payload.plan_type, PlanType::Bulk);

        let out = NamedTempFile::new().unwrap();
        save_json(out.path(), &payload).unwrap();
        assert_eq!(load_payload(out.path()).unwrap(), payload);
    }
}
