mod document;
mod food;
mod plan;

pub use document::{MacroDistribution, PlanDocument, PlanVersion};
pub use food::{Food, FoodRecord};
pub use plan::{
    Meal, MealLineItem, MealMacros, MealSummary, PlanAggregate, PlanPayload, PlanType, Principal,
};
