use std::cmp::Ordering;
use std::collections::HashMap;

use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::Result;
use crate::interface::render::display_plan_aggregate;
use crate::models::{Food, Meal, MealLineItem, PlanPayload, PlanType};
use crate::planner::aggregation::preview_plan;

/// Meals offered by the composer, in display order.
pub const MEAL_NAMES: [&str; 4] = ["Breakfast", "Snack", "Lunch", "Dinner"];

/// Units offered for quantities. Only the number is used in aggregation.
pub const UNIT_OPTIONS: [&str; 3] = ["g", "ml", "unit"];

/// Minimum similarity for a fuzzy food match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Foods matching `query` by id or name, best first.
///
/// An exact (case-insensitive) id or name match is returned alone.
pub fn rank_matches<'a>(foods: &[&'a Food], query: &str) -> Vec<(&'a Food, f64)> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    if let Some(food) = foods
        .iter()
        .find(|f| f.id.to_lowercase() == query || f.name.to_lowercase() == query)
    {
        return vec![(*food, 1.0)];
    }

    let mut candidates: Vec<(&Food, f64)> = foods
        .iter()
        .map(|f| (*f, jaro_winkler(&f.name.to_lowercase(), &query)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    candidates
}

/// Prompt for a food with fuzzy matching. `None` when nothing was picked.
pub fn prompt_food<'a>(foods: &[&'a Food]) -> Result<Option<&'a Food>> {
    let input: String = Input::new()
        .with_prompt("Food (name or id)")
        .interact_text()?;

    let candidates = rank_matches(foods, &input);
    match candidates.as_slice() {
        [] => {
            println!("No matching food found for '{}'", input.trim());
            Ok(None)
        }
        [(food, score)] if *score >= 1.0 => Ok(Some(*food)),
        [(food, _)] => {
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", food.name))
                .default(true)
                .interact()?;
            Ok(confirm.then_some(*food))
        }
        _ => {
            // Multiple matches - let user select
            let options: Vec<&Food> = candidates.iter().take(5).map(|(f, _)| *f).collect();
            let mut labels: Vec<String> = options.iter().map(|f| f.name.clone()).collect();
            labels.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&labels)
                .default(0)
                .interact()?;

            Ok(options.get(selection).copied())
        }
    }
}

/// Prompt for which meal an item goes into.
pub fn prompt_meal_name() -> Result<&'static str> {
    let selection = Select::new()
        .with_prompt("Meal")
        .items(&MEAL_NAMES)
        .default(0)
        .interact()?;
    Ok(MEAL_NAMES[selection])
}

/// Prompt for a positive quantity and its unit, e.g. `"150 g"`.
pub fn prompt_quantity(default_unit: &str) -> Result<String> {
    let amount: String = Input::new()
        .with_prompt("Quantity")
        .default("100".to_string())
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            match input.trim().parse::<f64>() {
                Ok(v) if v > 0.0 && v.is_finite() => Ok(()),
                _ => Err("Enter a positive number"),
            }
        })
        .interact_text()?;

    let default_index = UNIT_OPTIONS
        .iter()
        .position(|u| *u == default_unit)
        .unwrap_or(0);
    let unit = Select::new()
        .with_prompt("Unit")
        .items(&UNIT_OPTIONS)
        .default(default_index)
        .interact()?;

    Ok(format!("{} {}", amount.trim(), UNIT_OPTIONS[unit]))
}

/// Prompt for the plan type.
pub fn prompt_plan_type() -> Result<PlanType> {
    let labels: Vec<&str> = PlanType::ALL.iter().map(|t| t.label()).collect();
    let selection = Select::new()
        .with_prompt("Plan type")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(PlanType::ALL[selection])
}

/// Prompt for free text. Empty input gives `None` when `required` is false.
pub fn prompt_text(prompt: &str, required: bool) -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(!required)
        .interact_text()?;

    let input = input.trim();
    Ok((!input.is_empty()).then(|| input.to_string()))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Interactively compose a plan, previewing totals after every added item.
///
/// The totals shown here come from the local catalog snapshot and are a
/// preview; the stored plan is recomputed against the catalog when built.
pub fn compose_plan(catalog: &HashMap<String, Food>) -> Result<PlanPayload> {
    let mut foods: Vec<&Food> = catalog.values().collect();
    foods.sort_by(|a, b| a.name.cmp(&b.name));

    let name = prompt_text("Plan name", true)?.unwrap_or_default();
    let plan_type = prompt_plan_type()?;
    let description = prompt_text("Description (optional)", false)?;
    let objective = prompt_text("Objective (optional)", false)?;

    let mut meals: Vec<Meal> = MEAL_NAMES.iter().map(|n| Meal::new(*n, Vec::new())).collect();

    loop {
        let meal_name = prompt_meal_name()?;
        if let Some(food) = prompt_food(&foods)? {
            let quantity = prompt_quantity(&food.unit)?;
            if let Some(meal) = meals.iter_mut().find(|m| m.name == meal_name) {
                meal.line_items.push(MealLineItem::new(food.id.clone(), quantity));
            }
            display_plan_aggregate(&preview_plan(&meals, catalog), catalog);
        }

        if !prompt_yes_no("Add another food?", true)? {
            break;
        }
    }

    meals.retain(|m| !m.line_items.is_empty());

    Ok(PlanPayload {
        name,
        plan_type,
        meals,
        patient_id: None,
        description,
        objective,
    })
}
