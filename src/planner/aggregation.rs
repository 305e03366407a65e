use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::catalog::CatalogLookup;
use crate::error::Result;
use crate::models::{Food, Meal, MealMacros, MealSummary, PlanAggregate};
use crate::planner::normalize::parse_quantity;
use crate::planner::resolver::resolve_foods;

/// Distinct food references across every meal.
pub fn collect_food_refs(meals: &[Meal]) -> BTreeSet<String> {
    meals
        .iter()
        .flat_map(|m| m.line_items.iter())
        .map(|item| item.food_ref.clone())
        .collect()
}

/// Aggregate one meal against already resolved foods.
///
/// Line items whose reference is not in `resolved` are dropped from both the
/// totals and the returned item list.
pub fn aggregate_meal(meal: &Meal, resolved: &HashMap<String, Food>) -> MealSummary {
    let mut macros = MealMacros::default();
    let mut line_items = Vec::with_capacity(meal.line_items.len());

    for item in &meal.line_items {
        let Some(food) = resolved.get(&item.food_ref) else {
            warn!(meal = %meal.name, food_ref = %item.food_ref, "dropping unresolvable food reference");
            continue;
        };
        macros += food.macros_for(parse_quantity(&item.quantity));
        line_items.push(item.clone());
    }

    MealSummary {
        name: meal.name.clone(),
        line_items,
        macros,
    }
}

/// Aggregate a plan against a catalog snapshot that is already in memory.
///
/// This is the same arithmetic `aggregate_plan` runs after its catalog read,
/// so clients can show live totals while a plan is being composed. The
/// result is a preview only: stored figures always come from `aggregate_plan`
/// against the authoritative catalog.
pub fn preview_plan(meals: &[Meal], resolved: &HashMap<String, Food>) -> PlanAggregate {
    let any_resolvable = meals
        .iter()
        .flat_map(|m| m.line_items.iter())
        .any(|item| resolved.contains_key(&item.food_ref));
    if !any_resolvable {
        return PlanAggregate::default();
    }

    let mut daily_totals = MealMacros::default();
    let meals: Vec<MealSummary> = meals
        .iter()
        .map(|meal| {
            let summary = aggregate_meal(meal, resolved);
            daily_totals += summary.macros;
            summary
        })
        .collect();

    PlanAggregate {
        meals,
        daily_totals,
    }
}

/// Resolve every food referenced by `meals` with one catalog read and
/// aggregate per-meal and daily totals.
///
/// A plan without any resolvable reference yields an empty aggregate. The
/// only error is a failed catalog read, which is returned unchanged.
pub async fn aggregate_plan<C: CatalogLookup>(
    meals: &[Meal],
    catalog: &C,
) -> Result<PlanAggregate> {
    let ids = collect_food_refs(meals);
    if ids.is_empty() {
        debug!(meals = meals.len(), "plan references no foods");
        return Ok(PlanAggregate::default());
    }

    let resolved = resolve_foods(&ids, catalog).await?;
    let aggregate = preview_plan(meals, &resolved);

    debug!(
        meals = aggregate.meals.len(),
        line_items = aggregate.line_item_count(),
        kcal = aggregate.daily_totals.kcal,
        "aggregated plan"
    );
    Ok(aggregate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealLineItem;

    fn food(id: &str, protein: f64, fat: f64, carbohydrate: f64, calories: f64) -> Food {
        Food {
            id: id.to_string(),
            name: id.to_string(),
            protein,
            fat,
            carbohydrate,
            calories,
            reference_quantity: 100.0,
            unit: "g".to_string(),
        }
    }

    fn resolved() -> HashMap<String, Food> {
        [
            food("egg", 13.0, 11.0, 1.0, 165.0),
            food("rice", 2.7, 0.3, 28.0, 130.0),
        ]
        .into_iter()
        .map(|f| (f.id.clone(), f))
        .collect()
    }

    #[test]
    fn test_collect_food_refs_dedupes() {
        let meals = vec![
            Meal::new("Breakfast", vec![MealLineItem::new("egg", "100g")]),
            Meal::new(
                "Lunch",
                vec![MealLineItem::new("egg", "50g"), MealLineItem::new("rice", "1")],
            ),
        ];
        let refs = collect_food_refs(&meals);
        assert_eq!(refs.len(), 2);
        assert!(refs.contains("egg") && refs.contains("rice"));
    }

    #[test]
    fn test_aggregate_meal_drops_unresolvable() {
        let meal = Meal::new(
            "Lunch",
            vec![
                MealLineItem::new("rice", "200g"),
                MealLineItem::new("ghost", "100g"),
            ],
        );
        let summary = aggregate_meal(&meal, &resolved());

        assert_eq!(summary.line_items, vec![MealLineItem::new("rice", "200g")]);
        assert!((summary.macros.kcal - 260.0).abs() < 1e-9);
        assert!((summary.macros.carbohydrate - 56.0).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_meal_without_items_is_zero() {
        let summary = aggregate_meal(&Meal::new("Snack", Vec::new()), &resolved());
        assert!(summary.macros.is_zero());
        assert!(summary.line_items.is_empty());
    }

    #[test]
    fn test_bad_quantity_contributes_nothing() {
        let meal = Meal::new("Dinner", vec![MealLineItem::new("egg", "a handful")]);
        let summary = aggregate_meal(&meal, &resolved());
        assert_eq!(summary.line_items.len(), 1);
        assert!(summary.macros.is_zero());
    }

    #[test]
    fn test_preview_keeps_meal_order_and_sums() {
        let meals = vec![
            Meal::new("Dinner", vec![MealLineItem::new("rice", "100g")]),
            Meal::new("Breakfast", vec![MealLineItem::new("egg", "100g")]),
            Meal::new("Snack", vec![MealLineItem::new("ghost", "30g")]),
        ];
        let aggregate = preview_plan(&meals, &resolved());

        let names: Vec<&str> = aggregate.meals.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Dinner", "Breakfast", "Snack"]);

        let sum: MealMacros = aggregate.meals.iter().map(|m| m.macros).sum();
        assert_eq!(aggregate.daily_totals, sum);
        assert!((aggregate.daily_totals.kcal - 295.0).abs() < 1e-9);
    }

    #[test]
    fn test_preview_nothing_resolvable_is_empty() {
        let meals = vec![Meal::new("Lunch", vec![MealLineItem::new("ghost", "100g")])];
        let aggregate = preview_plan(&meals, &resolved());
        assert!(aggregate.meals.is_empty());
        assert!(aggregate.daily_totals.is_zero());
    }
}
