//! Catalog storage: the flat JSON pizza file
//!
//! The catalog lives in a single JSON file (`pizzas.json`), read fresh
//! for every recommendation and never written by scoring. Writes only
//! happen through the seed/import paths.

use crate::types::Pizza;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Load the pizza catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<Vec<Pizza>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog at {:?}", path))?;
    let pizzas: Vec<Pizza> = serde_json::from_str(&raw)
        .with_context(|| format!("Malformed catalog JSON at {:?}", path))?;
    info!(count = pizzas.len(), path = ?path, "catalog loaded");
    Ok(pizzas)
}

/// Write the pizza catalog back to a JSON file (pretty-printed, same as
/// the seed output).
pub fn save_catalog(path: &Path, pizzas: &[Pizza]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create catalog directory {:?}", parent))?;
    }
    let json = serde_json::to_string_pretty(pizzas)?;
    fs::write(path, json).with_context(|| format!("Failed to write catalog at {:?}", path))?;
    info!(count = pizzas.len(), path = ?path, "catalog written");
    Ok(())
}

/// The built-in catalog used to seed a fresh install.
///
/// Ingredient strings are what the preference names match against, so
/// meat pizzas carry a literal "Cured meats" entry and fish pizzas
/// spell out "fish" somewhere.
pub fn default_catalog() -> Vec<Pizza> {
    fn pizza(name: &str, ingredients: &[&str]) -> Pizza {
        Pizza {
            name: name.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        }
    }

    vec![
        pizza("Margherita", &["Tomato sauce", "Mozzarella", "Fresh basil"]),
        pizza(
            "Marinara",
            &["Tomato sauce", "Garlic", "Oregano", "Extra virgin olive oil"],
        ),
        pizza("Diavola", &["Tomato sauce", "Mozzarella", "Spicy salami"]),
        pizza(
            "Calabrese",
            &["Tomato sauce", "Mozzarella", "Spicy salami", "'Nduja", "Red chili"],
        ),
        pizza(
            "Capricciosa",
            &[
                "Tomato sauce",
                "Mozzarella",
                "Cured meats",
                "Mushrooms",
                "Artichokes",
                "Black olives",
            ],
        ),
        pizza(
            "Quattro Formaggi",
            &["Mozzarella", "Gorgonzola", "Ricotta", "Parmesan"],
        ),
        pizza(
            "Tonno e Cipolla",
            &["Tomato sauce", "Mozzarella", "Tuna fish", "Red onion"],
        ),
        pizza(
            "Frutti di Mare",
            &["Tomato sauce", "Shellfish mix", "Shrimp", "Garlic", "Parsley"],
        ),
        pizza(
            "Ortolana",
            &[
                "Tomato sauce",
                "Mozzarella",
                "Grilled zucchini",
                "Eggplant",
                "Peppers",
            ],
        ),
        pizza(
            "Vegana",
            &["Tomato sauce", "Grilled vegetables", "Oregano", "Olive oil"],
        ),
    ]
}
