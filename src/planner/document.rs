use std::collections::BTreeMap;

use chrono::Utc;
use tracing::info;

use crate::catalog::CatalogLookup;
use crate::error::{NutriError, Result};
use crate::models::{
    MacroDistribution, MealMacros, PlanDocument, PlanPayload, PlanVersion, Principal,
};
use crate::planner::aggregation::aggregate_plan;
use crate::planner::constants::*;

/// Check the fields a plan needs before anything is computed.
pub fn validate_payload(payload: &PlanPayload) -> Result<()> {
    if payload.name.trim().is_empty() {
        return Err(NutriError::InvalidInput("plan name is required".to_string()));
    }
    if payload.meals.is_empty() {
        return Err(NutriError::InvalidInput(
            "plan must contain at least one meal".to_string(),
        ));
    }
    Ok(())
}

/// Percentage of daily calories supplied by each macro.
///
/// All zero when the day has no calories.
pub fn macro_distribution(totals: &MealMacros) -> MacroDistribution {
    if totals.kcal <= 0.0 {
        return MacroDistribution::default();
    }
    let share = |grams: f64, kcal_per_gram: f64| grams * kcal_per_gram / totals.kcal * 100.0;
    MacroDistribution {
        protein: share(totals.protein, KCAL_PER_GRAM_PROTEIN),
        carbohydrate: share(totals.carbohydrate, KCAL_PER_GRAM_CARBOHYDRATE),
        fat: share(totals.fat, KCAL_PER_GRAM_FAT),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Validate, aggregate and assemble a storable plan document.
///
/// `author` is whoever is creating the plan; it becomes the assignee when the
/// payload does not name a patient. A plan that keeps no line item after
/// resolution is rejected with `EmptyPlan`.
pub async fn build_plan_document<C: CatalogLookup>(
    payload: &PlanPayload,
    author: &Principal,
    catalog: &C,
) -> Result<PlanDocument> {
    validate_payload(payload)?;

    let aggregate = aggregate_plan(&payload.meals, catalog).await?;
    if !aggregate.has_resolved_items() {
        return Err(NutriError::EmptyPlan);
    }

    let plan_type = payload.plan_type;
    let version = PlanVersion {
        plan_type,
        calories: aggregate.daily_totals.kcal,
        macro_distribution: macro_distribution(&aggregate.daily_totals),
        objective: non_blank(payload.objective.as_deref())
            .unwrap_or(DEFAULT_OBJECTIVE)
            .to_string(),
        meals: aggregate.meals,
        daily_totals: aggregate.daily_totals,
        technical_notes: Vec::new(),
    };

    let assigned_to = non_blank(payload.patient_id.as_deref())
        .unwrap_or(author.id.as_str())
        .to_string();
    let description = match non_blank(payload.description.as_deref()) {
        Some(d) => d.to_string(),
        None => format!("{plan_type} plan created by {}", author.id),
    };

    info!(
        plan = payload.name.trim(),
        version = plan_type.version_key(),
        assigned_to = %assigned_to,
        kcal = version.calories,
        "built plan document"
    );

    let mut versions = BTreeMap::new();
    versions.insert(plan_type.version_key().to_string(), version);

    Ok(PlanDocument {
        name: payload.name.trim().to_string(),
        description,
        assigned_to,
        author: author.id.clone(),
        assigned_at: Some(Utc::now()),
        versions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Meal, PlanType};

    #[test]
    fn test_macro_distribution() {
        let totals = MealMacros {
            kcal: 155.0,
            protein: 13.0,
            fat: 11.0,
            carbohydrate: 1.0,
        };
        let dist = macro_distribution(&totals);
        assert!((dist.protein - 52.0 / 155.0 * 100.0).abs() < 1e-9);
        assert!((dist.fat - 99.0 / 155.0 * 100.0).abs() < 1e-9);
        assert!((dist.protein + dist.carbohydrate + dist.fat - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_macro_distribution_zero_kcal() {
        assert_eq!(
            macro_distribution(&MealMacros::default()),
            MacroDistribution::default()
        );
    }

    #[test]
    fn test_validate_payload() {
        let mut payload = PlanPayload {
            name: "  ".to_string(),
            plan_type: PlanType::Bulk,
            meals: vec![Meal::new("Breakfast", Vec::new())],
            patient_id: None,
            description: None,
            objective: None,
        };
        assert!(matches!(
            validate_payload(&payload),
            Err(NutriError::InvalidInput(_))
        ));

        payload.name = "Plan X".to_string();
        assert!(validate_payload(&payload).is_ok());

        payload.meals.clear();
        assert!(matches!(
            validate_payload(&payload),
            Err(NutriError::InvalidInput(_))
        ));
    }
}
