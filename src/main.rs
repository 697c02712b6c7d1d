use clap::Parser;
use tracing::info;

use macro_blocks_rs::cli::{Cli, Command, PlanArgs};
use macro_blocks_rs::error::Result;
use macro_blocks_rs::interface::{
    display_catalog, display_plan_report, prompt_food_selection, write_csv, write_json,
};
use macro_blocks_rs::logging;
use macro_blocks_rs::planner::plan_meals;
use macro_blocks_rs::solver::MicroLpSolver;
use macro_blocks_rs::state::{load_catalog, load_targets};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Plan(args) => cmd_plan(&cli.catalog, &cli.targets, &args),
        Command::Foods => cmd_foods(&cli.catalog),
    }
}

/// Select foods, search for plans and print them.
fn cmd_plan(catalog_path: &std::path::Path, targets_path: &std::path::Path, args: &PlanArgs) -> Result<()> {
    let config = args.search_config();
    config.validate()?;

    let catalog = load_catalog(catalog_path)?;
    let targets = load_targets(targets_path)?;
    info!(foods = catalog.len(), "catalog loaded");

    println!(
        "Targets: P {:.0} g, C {:.0} g, F {:.0} g = {:.0} kcal",
        targets.macros().protein,
        targets.macros().carbs,
        targets.macros().fat,
        targets.calories()
    );

    let selection = if args.foods.is_empty() {
        prompt_food_selection(&catalog)?
    } else {
        catalog.select(&args.foods)?
    };

    println!(
        "Planning with: {}",
        selection
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let report = plan_meals(&selection, &targets, &config, &MicroLpSolver)?;

    display_plan_report(&report);

    if let Some(path) = &args.csv {
        write_csv(&report, path)?;
        println!("Plans written to {}", path.display());
    }
    if let Some(path) = &args.json {
        write_json(&report, path)?;
        println!("Plans written to {}", path.display());
    }

    Ok(())
}

/// List the catalog.
fn cmd_foods(catalog_path: &std::path::Path) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    display_catalog(catalog.foods());
    Ok(())
}
