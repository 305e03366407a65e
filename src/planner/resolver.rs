use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::catalog::CatalogLookup;
use crate::error::Result;
use crate::models::{Food, FoodRecord};
use crate::planner::constants::*;
use crate::planner::normalize::{first_truthy, normalize};

/// Calories derived from macros via Atwater factors.
#[inline]
pub fn calories_from_macros(protein: f64, carbohydrate: f64, fat: f64) -> f64 {
    protein * KCAL_PER_GRAM_PROTEIN
        + carbohydrate * KCAL_PER_GRAM_CARBOHYDRATE
        + fat * KCAL_PER_GRAM_FAT
}

/// Stored calories when present and nonzero, otherwise derived from macros.
pub fn effective_calories(stored: f64, protein: f64, carbohydrate: f64, fat: f64) -> f64 {
    if stored != 0.0 {
        stored
    } else {
        calories_from_macros(protein, carbohydrate, fat)
    }
}

/// Turn a raw catalog document into a normalized `Food`.
pub fn normalize_record(record: &FoodRecord) -> Food {
    let protein = first_truthy(record.field(PROTEIN_KEYS.0), record.field(PROTEIN_KEYS.1));
    let fat = normalize(record.field(FAT_KEY));
    let carbohydrate = normalize(record.field(CARBOHYDRATE_KEY));
    let stored_calories = first_truthy(record.field(CALORIE_KEYS.0), record.field(CALORIE_KEYS.1));

    let reference_quantity = match normalize(record.field(REFERENCE_QUANTITY_KEY)) {
        q if q > 0.0 => q,
        _ => REFERENCE_QUANTITY,
    };

    Food {
        id: record.id.clone(),
        name: non_blank(record, NAME_KEY).unwrap_or(UNNAMED_FOOD).to_string(),
        protein,
        fat,
        carbohydrate,
        calories: effective_calories(stored_calories, protein, carbohydrate, fat),
        reference_quantity,
        unit: non_blank(record, UNIT_KEY).unwrap_or(DEFAULT_UNIT).to_string(),
    }
}

fn non_blank<'a>(record: &'a FoodRecord, key: &str) -> Option<&'a str> {
    record
        .field(key)
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Resolve a set of distinct food ids with a single catalog read.
///
/// An empty set returns an empty map without touching the catalog. Ids the
/// catalog does not know are simply absent from the result; a failing lookup
/// is returned as is.
pub async fn resolve_foods<C: CatalogLookup>(
    ids: &BTreeSet<String>,
    catalog: &C,
) -> Result<HashMap<String, Food>> {
    if ids.is_empty() {
        debug!("no food references to resolve, skipping catalog lookup");
        return Ok(HashMap::new());
    }

    let records = catalog.lookup(ids).await?;
    let resolved: HashMap<String, Food> = records
        .iter()
        .filter(|r| ids.contains(&r.id))
        .map(|r| (r.id.clone(), normalize_record(r)))
        .collect();

    debug!(
        requested = ids.len(),
        resolved = resolved.len(),
        "resolved food references"
    );
    Ok(resolved)
}
