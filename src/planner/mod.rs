pub mod aggregation;
pub mod constants;
pub mod document;
pub mod normalize;
pub mod resolver;

pub use aggregation::{aggregate_meal, aggregate_plan, collect_food_refs, preview_plan};
pub use constants::*;
pub use document::{build_plan_document, macro_distribution, validate_payload};
pub use normalize::{normalize, parse_number, parse_quantity};
pub use resolver::{effective_calories, normalize_record, resolve_foods};
