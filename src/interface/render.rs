use std::collections::HashMap;

use crate::models::{Food, MealMacros, PlanAggregate};
use crate::planner::normalize::parse_quantity;

fn macros_row(label: &str, macros: &MealMacros, width: usize) -> String {
    format!(
        "{:<width$}  {:>7.0} kcal | P {:>6.1} | C {:>6.1} | F {:>6.1}",
        label,
        macros.kcal,
        macros.protein,
        macros.carbohydrate,
        macros.fat,
        width = width
    )
}

/// Display an aggregated plan: each meal, its items, and the daily totals.
///
/// `foods` is only used for display names and per-item figures; items whose
/// food is not in it are shown by reference.
pub fn display_plan_aggregate(aggregate: &PlanAggregate, foods: &HashMap<String, Food>) {
    if aggregate.meals.is_empty() {
        println!("No resolvable foods in this plan.");
        return;
    }

    let label_for = |food_ref: &str| {
        foods
            .get(food_ref)
            .map_or_else(|| food_ref.to_string(), |f| f.name.clone())
    };

    let item_label = |food_ref: &str, quantity: &str| {
        format!("  - {} {}", label_for(food_ref), quantity.trim())
    };

    // Find widest label for alignment
    let mut width = "Daily total".len();
    for meal in &aggregate.meals {
        width = width.max(meal.name.len());
        for item in &meal.line_items {
            width = width.max(item_label(&item.food_ref, &item.quantity).len());
        }
    }

    println!();
    println!("=== Meal Plan ===");

    for meal in &aggregate.meals {
        println!();
        println!("{}", macros_row(&meal.name, &meal.macros, width));

        for item in &meal.line_items {
            let label = item_label(&item.food_ref, &item.quantity);
            match foods.get(&item.food_ref) {
                Some(food) => {
                    let macros = food.macros_for(parse_quantity(&item.quantity));
                    println!("{}", macros_row(&label, &macros, width));
                }
                None => println!("{label}"),
            }
        }
    }

    println!();
    println!("--- Summary ---");
    println!("Meals: {}", aggregate.meals.len());
    println!("Items: {}", aggregate.line_item_count());
    println!("{}", macros_row("Daily total", &aggregate.daily_totals, width));
    println!();
}

/// Display a simple list of foods with their details.
pub fn display_food_list(foods: &[&Food], title: &str) {
    if foods.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, foods.len());
    println!();

    for food in foods {
        println!(
            "  {:<16} {} - {} kcal, P:{} C:{} F:{} per {}{}",
            food.id,
            food.name,
            food.calories,
            food.protein,
            food.carbohydrate,
            food.fat,
            food.reference_quantity,
            food.unit
        );
    }

    println!();
}
