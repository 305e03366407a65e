use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::MealMacros;
use crate::planner::constants::REFERENCE_QUANTITY;

static MISSING: Value = Value::Null;

/// A raw catalog document as the store hands it back.
///
/// Only `id` is structural; everything else is an open field map whose values
/// may be numbers, numeric strings, nulls or anything else. Numeric ids are
/// read as their decimal string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl FoodRecord {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Field value, or `Null` when the document does not carry it.
    pub fn field(&self, key: &str) -> &Value {
        self.fields.get(key).unwrap_or(&MISSING)
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(de::Error::custom(format!(
            "food id must be a string or a number, got {other}"
        ))),
    }
}

/// A normalized catalog entry.
///
/// Macro values are defined per `reference_quantity` units of `unit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: String,
    pub name: String,
    pub protein: f64,
    pub fat: f64,
    pub carbohydrate: f64,
    pub calories: f64,
    pub reference_quantity: f64,
    pub unit: String,
}

impl Food {
    /// Scaling factor for a consumed quantity.
    #[inline]
    pub fn factor(&self, quantity: f64) -> f64 {
        let reference = if self.reference_quantity > 0.0 {
            self.reference_quantity
        } else {
            REFERENCE_QUANTITY
        };
        quantity / reference
    }

    /// Macros contributed by `quantity` units of this food.
    pub fn macros_for(&self, quantity: f64) -> MealMacros {
        let factor = self.factor(quantity);
        MealMacros {
            kcal: self.calories * factor,
            protein: self.protein * factor,
            fat: self.fat * factor,
            carbohydrate: self.carbohydrate * factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn oats() -> Food {
        Food {
            id: "oats".to_string(),
            name: "Oats".to_string(),
            protein: 13.0,
            fat: 7.0,
            carbohydrate: 68.0,
            calories: 389.0,
            reference_quantity: 100.0,
            unit: "g".to_string(),
        }
    }

    #[test]
    fn test_macros_for_scales_linearly() {
        let macros = oats().macros_for(50.0);
        assert!((macros.kcal - 194.5).abs() < 1e-9);
        assert!((macros.protein - 6.5).abs() < 1e-9);
        assert!((macros.fat - 3.5).abs() < 1e-9);
        assert!((macros.carbohydrate - 34.0).abs() < 1e-9);
    }

    #[test]
    fn test_factor_uses_reference_quantity() {
        let mut egg = oats();
        egg.reference_quantity = 1.0;
        egg.unit = "unit".to_string();
        assert!((egg.factor(3.0) - 3.0).abs() < 1e-9);

        egg.reference_quantity = 0.0;
        assert!((egg.factor(50.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_record_keeps_unknown_fields() {
        let record: FoodRecord = serde_json::from_value(json!({
            "id": "rice",
            "name": "Rice",
            "protein": "2.7",
            "season": "all year"
        }))
        .unwrap();

        assert_eq!(record.id, "rice");
        assert_eq!(record.field("season"), &json!("all year"));
        assert_eq!(record.field("fat"), &Value::Null);
        assert!(!record.fields.contains_key("id"));
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        let record: FoodRecord =
            serde_json::from_value(json!({"id": 7, "name": "Lentils"})).unwrap();
        assert_eq!(record.id, "7");
        assert_eq!(record.field("name"), &json!("Lentils"));
        assert_eq!(serde_json::to_value(&record).unwrap()["id"], json!("7"));
    }

    #[test]
    fn test_structured_id_is_rejected() {
        let result = serde_json::from_value::<FoodRecord>(json!({"id": {"oid": "x"}}));
        assert!(result.is_err());
        assert!(serde_json::from_value::<FoodRecord>(json!({"id": null})).is_err());
    }
}
