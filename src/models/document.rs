use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{MealMacros, MealSummary, PlanType};

/// Share of daily calories coming from each macro, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroDistribution {
    pub protein: f64,
    pub carbohydrate: f64,
    pub fat: f64,
}

/// One computed version of a plan, ready to be stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanVersion {
    pub plan_type: PlanType,
    pub calories: f64,
    pub macro_distribution: MacroDistribution,
    pub objective: String,
    pub meals: Vec<MealSummary>,
    pub daily_totals: MealMacros,
    pub technical_notes: Vec<String>,
}

/// A plan with its metadata and computed versions, keyed by version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDocument {
    pub name: String,
    pub description: String,
    pub assigned_to: String,
    pub author: String,
    /// When the plan was assigned; absent on documents stored without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_at: Option<DateTime<Utc>>,
    pub versions: BTreeMap<String, PlanVersion>,
}
