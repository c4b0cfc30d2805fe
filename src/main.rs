//! pizzaiolo CLI
//!
//! Interactive pizza questionnaire plus a few maintenance commands.
//!
//! Run with: cargo run
//! One-shot scoring: cargo run -- recommend Mozzarella=yes Fish=no

use anyhow::{bail, Context, Result};
use pizzaiolo::{
    catalog, db,
    recommend::{score_pizzas, RecommendEngine},
    session::Session,
    tree,
    types::{Pizza, Preferences, ScoredPizza},
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();

    // COMMAND MODE: handle specific commands
    if args.len() > 1 {
        match args[1].as_str() {
            "--seed" => {
                let path = args
                    .get(2)
                    .map(PathBuf::from)
                    .map_or_else(default_catalog_path, Ok)?;
                catalog::save_catalog(&path, &catalog::default_catalog())?;
                println!("Default catalog written to {:?}", path);
                return Ok(());
            }
            "--catalog" => {
                let path = args
                    .get(2)
                    .map(PathBuf::from)
                    .map_or_else(default_catalog_path, Ok)?;
                let pizzas = catalog::load_catalog(&path)?;
                print_catalog(&pizzas);
                return Ok(());
            }
            "--tree" => {
                print_tree();
                return Ok(());
            }
            "--stats" => {
                return run_stats();
            }
            "recommend" => {
                // recommend <Name=yes|no> ... [--catalog=path]
                let catalog_path = args
                    .iter()
                    .find(|a| a.starts_with("--catalog="))
                    .map(|a| PathBuf::from(a.strip_prefix("--catalog=").unwrap()))
                    .map_or_else(default_catalog_path, Ok)?;
                let preferences = parse_preferences(
                    args[2..].iter().filter(|a| !a.starts_with("--")),
                )?;
                return run_oneshot(&catalog_path, &preferences);
            }
            "--repl" => {}
            other => {
                bail!(
                    "Unknown command '{other}'. Try --seed, --catalog, --tree, --stats, \
                     recommend, or no arguments for the questionnaire."
                );
            }
        }
    }

    // REPL MODE: the questionnaire itself
    run_questionnaire()
}

fn data_dir() -> Result<PathBuf> {
    let dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pizzaiolo");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create data directory {:?}", dir))?;
    Ok(dir)
}

fn default_catalog_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("pizzas.json"))
}

/// Load the catalog, seeding the default one on first run.
fn load_or_seed_catalog(path: &Path) -> Result<Vec<Pizza>> {
    if !path.exists() {
        tracing::info!(path = ?path, "no catalog found, seeding default");
        catalog::save_catalog(path, &catalog::default_catalog())?;
    }
    catalog::load_catalog(path)
}

/// Interactive questionnaire loop
fn run_questionnaire() -> Result<()> {
    let data_dir = data_dir()?;
    let db_path = data_dir.join("sessions.db");
    let conn = db::init_db(&db_path)?;
    tracing::info!("Database initialized at {:?}", db_path);

    let catalog_path = default_catalog_path()?;
    let engine = RecommendEngine::new(&conn);

    println!("pizzaiolo");
    println!("=========");
    println!("Answer y/n to each question; 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    'sessions: loop {
        let mut session = Session::new();

        while let Some(node) = session.current_question() {
            print!("{} [y/n] ", node.prompt);
            stdout.flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                return Ok(()); // EOF
            }
            let line = line.trim().to_lowercase();

            match line.as_str() {
                "y" | "yes" => {
                    session.answer(true);
                }
                "n" | "no" => {
                    session.answer(false);
                }
                "quit" | "exit" | "q" => break 'sessions,
                _ => println!("Please answer y or n."),
            }
        }

        let pizzas = load_or_seed_catalog(&catalog_path)?;
        match engine.recommend(&session, &pizzas) {
            Ok(recommendation) => {
                println!();
                print_shortlist(recommendation.shortlist());
            }
            Err(e) => eprintln!("Error: {}", e),
        }

        print!("\nAnother round? [y/n] ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if !matches!(line.trim().to_lowercase().as_str(), "y" | "yes") {
            break;
        }
        println!();
    }

    Ok(())
}

/// One-shot scoring from explicit preferences, no session recorded.
fn run_oneshot(catalog_path: &Path, preferences: &Preferences) -> Result<()> {
    let pizzas = load_or_seed_catalog(catalog_path)?;
    let ranked = score_pizzas(&pizzas, preferences);

    println!("Preferences:");
    for (name, wants) in preferences {
        println!("  {} {}", if *wants { "+" } else { "-" }, name);
    }
    println!();
    let n = pizzaiolo::SHORTLIST_LEN.min(ranked.len());
    print_shortlist(&ranked[..n]);
    Ok(())
}

fn run_stats() -> Result<()> {
    let db_path = data_dir()?.join("sessions.db");
    let conn = db::init_db(&db_path)?;
    let stats = db::get_stats(&conn)?;

    println!("Sessions recorded: {}", stats.sessions_recorded);

    if !stats.top_pizzas.is_empty() {
        println!("\nMost recommended:");
        for (name, count) in &stats.top_pizzas {
            println!("  {:<20} {}", name, count);
        }
    }

    if !stats.preference_yes_counts.is_empty() {
        println!("\nPreferences answered yes:");
        for (name, count) in &stats.preference_yes_counts {
            println!("  {:<20} {}", name, count);
        }
    }

    Ok(())
}

/// Parse `Name=yes` / `Name=no` pairs into a preference mapping.
fn parse_preferences<'a>(args: impl Iterator<Item = &'a String>) -> Result<Preferences> {
    let mut preferences = Preferences::new();
    for arg in args {
        let Some((name, value)) = arg.split_once('=') else {
            bail!("Expected Name=yes or Name=no, got '{arg}'");
        };
        let wants = match value.to_lowercase().as_str() {
            "yes" | "y" | "true" => true,
            "no" | "n" | "false" => false,
            other => bail!("Expected yes or no for '{name}', got '{other}'"),
        };
        preferences.insert(name.to_string(), wants);
    }
    if preferences.is_empty() {
        bail!("No preferences given. Example: recommend Mozzarella=yes Fish=no");
    }
    Ok(preferences)
}

fn print_shortlist(shortlist: &[ScoredPizza]) {
    println!("Your top picks:");
    for (i, pizza) in shortlist.iter().enumerate() {
        let bar = score_bar(pizza.score);
        println!("  {}. {:<20} [{}] {:+.1}", i + 1, pizza.name, bar, pizza.score);
        println!("     {}", pizza.ingredients.join(", "));
    }
}

/// Small visual bar: one block per half point above zero, capped at 8.
fn score_bar(score: f64) -> String {
    let filled = ((score * 2.0).max(0.0) as usize).min(8);
    format!("{}{}", "█".repeat(filled), "░".repeat(8 - filled))
}

fn print_catalog(pizzas: &[Pizza]) {
    println!("Catalog ({} pizzas):", pizzas.len());
    for pizza in pizzas {
        println!("  {:<20} {}", pizza.name, pizza.ingredients.join(", "));
    }
}

fn print_tree() {
    println!("Question tree (start: {}):", tree::START_NODE);
    for node in tree::nodes() {
        let yes = node.next_on_yes.unwrap_or("<results>");
        let no = node.next_on_no.unwrap_or("<results>");
        println!("  {:<16} {}", node.id, node.prompt);
        println!("  {:<16}   yes → {:<16} no → {}", "", yes, no);
        if let Some(key) = tree::preference_key(node.id) {
            println!("  {:<16}   records preference \"{}\"", "", key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preferences_accepts_yes_no_variants() {
        let args = vec![
            "Mozzarella=yes".to_string(),
            "Fish=NO".to_string(),
            "Spicy salami=true".to_string(),
        ];
        let prefs = parse_preferences(args.iter()).unwrap();
        assert_eq!(prefs.get("Mozzarella"), Some(&true));
        assert_eq!(prefs.get("Fish"), Some(&false));
        assert_eq!(prefs.get("Spicy salami"), Some(&true));
    }

    #[test]
    fn test_parse_preferences_rejects_bad_input() {
        let args = vec!["Mozzarella".to_string()];
        assert!(parse_preferences(args.iter()).is_err());

        let args = vec!["Mozzarella=maybe".to_string()];
        assert!(parse_preferences(args.iter()).is_err());

        let args: Vec<String> = vec![];
        assert!(parse_preferences(args.iter()).is_err());
    }

    #[test]
    fn test_score_bar_shapes() {
        assert_eq!(score_bar(0.0), "░░░░░░░░");
        assert_eq!(score_bar(-1.0), "░░░░░░░░");
        assert_eq!(score_bar(1.0), "██░░░░░░");
        assert_eq!(score_bar(4.0), "████████");
        assert_eq!(score_bar(10.0), "████████");
    }
}
