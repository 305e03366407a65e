pub mod catalog;
pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;

pub use catalog::{CatalogLookup, FileCatalog, InMemoryCatalog};
pub use error::{NutriError, Result};
pub use models::{Food, FoodRecord, Meal, MealLineItem, MealMacros, MealSummary, PlanAggregate};
pub use planner::{aggregate_plan, build_plan_document, preview_plan};
