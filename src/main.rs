use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use nutri_plan_rs::catalog::{load_payload, save_json, FileCatalog};
use nutri_plan_rs::cli::{Cli, Command};
use nutri_plan_rs::error::Result;
use nutri_plan_rs::interface::{
    compose_plan, display_food_list, display_plan_aggregate, prompt_yes_no,
};
use nutri_plan_rs::models::Principal;
use nutri_plan_rs::planner::{aggregate_plan, build_plan_document};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let catalog = FileCatalog::new(&cli.catalog);

    match cli.command {
        Command::Aggregate { plan, json } => cmd_aggregate(&catalog, &plan, json).await,
        Command::Foods { filter } => cmd_foods(&catalog, filter.as_deref()).await,
        Command::Build { plan, author, out } => {
            cmd_build(&catalog, &plan, &Principal::new(author), out.as_deref()).await
        }
        Command::Compose { out } => cmd_compose(&catalog, out).await,
    }
}

/// Aggregate a plan file and print the result.
async fn cmd_aggregate(catalog: &FileCatalog, plan_path: &Path, json: bool) -> Result<()> {
    let payload = load_payload(plan_path)?;
    // One read serves both the totals and the table
    let memory = catalog.to_memory().await?;
    let aggregate = aggregate_plan(&payload.meals, &memory).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&aggregate)?);
        return Ok(());
    }

    println!("{} ({})", payload.name.trim(), payload.plan_type);
    display_plan_aggregate(&aggregate, &memory.snapshot());
    Ok(())
}

/// List catalog foods, optionally filtered.
async fn cmd_foods(catalog: &FileCatalog, filter: Option<&str>) -> Result<()> {
    let snapshot = catalog.to_memory().await?.snapshot();
    let needle = filter.map(str::to_lowercase);

    let mut foods: Vec<_> = snapshot
        .values()
        .filter(|f| match &needle {
            Some(n) => f.id.to_lowercase().contains(n) || f.name.to_lowercase().contains(n),
            None => true,
        })
        .collect();
    foods.sort_by(|a, b| a.name.cmp(&b.name));

    display_food_list(&foods, "Foods");
    Ok(())
}

/// Build the storable plan document.
async fn cmd_build(
    catalog: &FileCatalog,
    plan_path: &Path,
    author: &Principal,
    out: Option<&Path>,
) -> Result<()> {
    let payload = load_payload(plan_path)?;
    let document = build_plan_document(&payload, author, catalog).await?;

    match out {
        Some(path) => {
            save_json(path, &document)?;
            info!(path = %path.display(), "plan document written");
        }
        None => println!("{}", serde_json::to_string_pretty(&document)?),
    }
    Ok(())
}

/// Compose a plan interactively and optionally save it.
async fn cmd_compose(catalog: &FileCatalog, out: Option<PathBuf>) -> Result<()> {
    let snapshot = catalog.to_memory().await?.snapshot();
    if snapshot.is_empty() {
        println!("The catalog at {} has no foods.", catalog.path().display());
        return Ok(());
    }

    println!("Loaded {} foods", snapshot.len());
    println!();

    let payload = compose_plan(&snapshot)?;
    if payload.meals.is_empty() {
        println!("No foods added; nothing to save.");
        return Ok(());
    }

    let path = out.unwrap_or_else(|| PathBuf::from("plan.json"));
    if prompt_yes_no(&format!("Save plan to {}?", path.display()), true)? {
        save_json(&path, &payload)?;
        println!("Plan saved.");
    }
    Ok(())
}
