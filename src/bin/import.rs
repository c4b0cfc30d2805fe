//! Import pizzas from third-party catalog exports
//!
//! Usage: cargo run --bin import -- /path/to/menu.json [more.json ...]
//!
//! Merges the given files into the canonical catalog, tolerating the
//! format variants seen in the wild (ingredients as a list or as one
//! comma-joined string). Existing pizzas are kept; imports never
//! overwrite a name already in the catalog.

use anyhow::{Context, Result};
use pizzaiolo::catalog;
use pizzaiolo::types::Pizza;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct PizzaRecord {
    #[serde(alias = "pizza", alias = "title")]
    name: String,
    #[serde(alias = "toppings")]
    ingredients: IngredientsVariant,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IngredientsVariant {
    // The canonical form: a list of ingredient strings
    List(Vec<String>),
    // Some exports join everything with commas
    Joined(String),
}

impl IngredientsVariant {
    fn into_list(self) -> Vec<String> {
        match self {
            IngredientsVariant::List(list) => list,
            IngredientsVariant::Joined(s) => s
                .split(',')
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty())
                .collect(),
        }
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <catalog-exports...> [--out=path]", args[0]);
        eprintln!("Example: {} ~/Downloads/menu.json", args[0]);
        std::process::exit(1);
    }

    let out_path = args
        .iter()
        .find(|a| a.starts_with("--out="))
        .map(|a| PathBuf::from(a.strip_prefix("--out=").unwrap()))
        .unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("pizzaiolo")
                .join("pizzas.json")
        });

    println!("Catalog at {:?}", out_path);

    let mut pizzas: Vec<Pizza> = if out_path.exists() {
        catalog::load_catalog(&out_path)?
    } else {
        Vec::new()
    };

    let mut imported = 0;
    let mut skipped = 0;

    for arg in args[1..].iter().filter(|a| !a.starts_with("--")) {
        let raw = fs::read_to_string(arg)
            .with_context(|| format!("Failed to read import file {arg}"))?;
        let records: Vec<PizzaRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed pizza JSON in {arg}"))?;

        for record in records {
            if pizzas.iter().any(|p| p.name == record.name) {
                skipped += 1;
                continue;
            }
            pizzas.push(Pizza {
                name: record.name,
                ingredients: record.ingredients.into_list(),
            });
            imported += 1;
        }
    }

    catalog::save_catalog(&out_path, &pizzas)?;

    println!(
        "Imported {} pizzas ({} already present), catalog now has {}",
        imported,
        skipped,
        pizzas.len()
    );

    Ok(())
}
