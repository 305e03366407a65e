use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// One entry in a meal: a catalog reference and a free-form quantity like `"150g"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealLineItem {
    pub food_ref: String,
    pub quantity: String,
}

impl MealLineItem {
    pub fn new(food_ref: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            food_ref: food_ref.into(),
            quantity: quantity.into(),
        }
    }
}

/// A named, ordered list of line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub name: String,
    #[serde(default)]
    pub line_items: Vec<MealLineItem>,
}

impl Meal {
    pub fn new(name: impl Into<String>, line_items: Vec<MealLineItem>) -> Self {
        Self {
            name: name.into(),
            line_items,
        }
    }
}

/// Macro totals for a meal or a day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MealMacros {
    pub kcal: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbohydrate: f64,
}

impl MealMacros {
    pub fn is_zero(&self) -> bool {
        self.kcal == 0.0 && self.protein == 0.0 && self.fat == 0.0 && self.carbohydrate == 0.0
    }
}

impl Add for MealMacros {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            kcal: self.kcal + other.kcal,
            protein: self.protein + other.protein,
            fat: self.fat + other.fat,
            carbohydrate: self.carbohydrate + other.carbohydrate,
        }
    }
}

impl AddAssign for MealMacros {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for MealMacros {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// A meal after aggregation: only resolvable line items, plus their totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSummary {
    pub name: String,
    pub line_items: Vec<MealLineItem>,
    pub macros: MealMacros,
}

/// Per-meal results in input order and their element-wise sum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanAggregate {
    pub meals: Vec<MealSummary>,
    pub daily_totals: MealMacros,
}

impl PlanAggregate {
    /// True when at least one meal kept a line item.
    pub fn has_resolved_items(&self) -> bool {
        self.meals.iter().any(|m| !m.line_items.is_empty())
    }

    /// Number of retained line items across all meals.
    pub fn line_item_count(&self) -> usize {
        self.meals.iter().map(|m| m.line_items.len()).sum()
    }
}

/// Plan flavour, which also names the stored version of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanType {
    #[serde(rename = "bulk", alias = "Bulk", alias = "Volumen")]
    Bulk,
    #[serde(
        rename = "recomposition",
        alias = "Recomposition",
        alias = "Recomposición",
        alias = "Recomposicion"
    )]
    Recomposition,
}

impl PlanType {
    pub const ALL: [PlanType; 2] = [PlanType::Bulk, PlanType::Recomposition];

    /// Key under which this version is stored in a plan document.
    pub fn version_key(self) -> &'static str {
        match self {
            PlanType::Bulk => "bulk",
            PlanType::Recomposition => "recomposition",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlanType::Bulk => "Bulk",
            PlanType::Recomposition => "Recomposition",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A plan as submitted by a client, before aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPayload {
    pub name: String,
    #[serde(alias = "type")]
    pub plan_type: PlanType,
    #[serde(default)]
    pub meals: Vec<Meal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
}

/// The authenticated caller on whose behalf a plan is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
}

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
