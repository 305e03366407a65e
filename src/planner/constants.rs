/// Quantity for which catalog macros are defined unless a record says otherwise.
pub const REFERENCE_QUANTITY: f64 = 100.0;

/// Unit assumed when a catalog record does not name one.
pub const DEFAULT_UNIT: &str = "g";

/// Energy density per gram of each macro (Atwater factors).
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBOHYDRATE: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Display name for catalog records without one.
pub const UNNAMED_FOOD: &str = "unnamed food";

/// Objective stored when the caller leaves it blank.
pub const DEFAULT_OBJECTIVE: &str = "objective not specified";

// ─────────────────────────────────────────────────────────────────────────────
// Catalog field names
// ─────────────────────────────────────────────────────────────────────────────

pub const ID_KEY: &str = "id";
pub const NAME_KEY: &str = "name";
pub const FAT_KEY: &str = "fat";
pub const CARBOHYDRATE_KEY: &str = "carbohydrate";
pub const REFERENCE_QUANTITY_KEY: &str = "reference_quantity";
pub const UNIT_KEY: &str = "unit";

/// Current and historical spelling of the protein field.
pub const PROTEIN_KEYS: (&str, &str) = ("protein", "proteins");

/// Current and historical spelling of the calorie field.
pub const CALORIE_KEYS: (&str, &str) = ("calories", "kcal");
