//! Recommendation engine: preference scoring over the catalog
//!
//! Scoring is a pure pass over in-memory data. Per pizza, each
//! accumulated preference either rewards a matching ingredient (+1.0),
//! penalizes a conflicting one (-0.5), or contributes nothing when the
//! ingredient is absent. Ingredient matching is case-insensitive
//! substring containment, so the preference "Fish" matches "Tuna fish"
//! and "Shellfish mix" alike.
//!
//! The engine wraps the pure scorer with the audit trail: every
//! completed session is recorded in SQLite together with its ranking.

use crate::db;
use crate::session::Session;
use crate::types::{Pizza, Preferences, Recommendation, ScoredPizza};
use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use tracing::debug;

/// How many ranked pizzas the presentation layer shows.
pub const SHORTLIST_LEN: usize = 3;

/// Score the catalog against the accumulated preferences.
///
/// Returns the full catalog as [`ScoredPizza`] entries, sorted by
/// descending score. The sort is stable: ties keep catalog order. The
/// input is never mutated; scores live only on the returned copies.
pub fn score_pizzas(pizzas: &[Pizza], preferences: &Preferences) -> Vec<ScoredPizza> {
    let mut scored: Vec<ScoredPizza> = pizzas
        .iter()
        .map(|pizza| ScoredPizza::from_pizza(pizza, score_one(pizza, preferences)))
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored
}

fn score_one(pizza: &Pizza, preferences: &Preferences) -> f64 {
    let mut score = 0.0;
    for (name, wants) in preferences {
        let has_ingredient = has_ingredient(&pizza.ingredients, name);
        match (*wants, has_ingredient) {
            (true, true) => score += 1.0,
            (false, true) => score -= 0.5,
            // Absent ingredient: no contribution either way.
            (_, false) => {}
        }
    }
    debug!(pizza = %pizza.name, score, "scored pizza");
    score
}

/// Case-insensitive substring containment over the ingredient list.
fn has_ingredient(ingredients: &[String], preference_name: &str) -> bool {
    let needle = preference_name.to_lowercase();
    ingredients
        .iter()
        .any(|ing| ing.to_lowercase().contains(&needle))
}

/// The engine that turns a finished session into a recorded recommendation
pub struct RecommendEngine<'a> {
    conn: &'a Connection,
}

impl<'a> RecommendEngine<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Score the catalog for a finished session and persist the result.
    ///
    /// The session is expected to have reached a terminal node, but the
    /// scorer does not care: missing preferences simply contribute zero.
    pub fn recommend(&self, session: &Session, pizzas: &[Pizza]) -> Result<Recommendation> {
        let ranked = score_pizzas(pizzas, session.preferences());

        let recommendation = Recommendation {
            session_id: session.id().to_string(),
            preferences: session.preferences().clone(),
            ranked,
            created_at: Utc::now(),
        };

        db::record_session(self.conn, session, &recommendation)?;

        Ok(recommendation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use tempfile::tempdir;

    fn pizza(name: &str, ingredients: &[&str]) -> Pizza {
        Pizza {
            name: name.into(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn prefs(entries: &[(&str, bool)]) -> Preferences {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_wanted_ingredient_present_scores_one() {
        let pizzas = [pizza("Margherita", &["Mozzarella", "Tomato"])];
        let ranked = score_pizzas(&pizzas, &prefs(&[("Mozzarella", true)]));
        assert_eq!(ranked[0].score, 1.0);
    }

    #[test]
    fn test_unwanted_ingredient_present_penalizes_half() {
        let pizzas = [pizza("Margherita", &["Mozzarella", "Tomato"])];
        let ranked = score_pizzas(&pizzas, &prefs(&[("Mozzarella", false)]));
        assert_eq!(ranked[0].score, -0.5);
    }

    #[test]
    fn test_absent_ingredient_scores_zero_either_way() {
        let pizzas = [pizza("Marinara", &["Tomato"])];
        let wanted = score_pizzas(&pizzas, &prefs(&[("Mozzarella", true)]));
        let unwanted = score_pizzas(&pizzas, &prefs(&[("Mozzarella", false)]));
        assert_eq!(wanted[0].score, 0.0);
        assert_eq!(unwanted[0].score, 0.0);
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        let pizzas = [pizza("Tonno", &["Tuna FISH", "Red onion"])];
        let ranked = score_pizzas(&pizzas, &prefs(&[("Fish", true)]));
        assert_eq!(ranked[0].score, 1.0);

        let pizzas = [pizza("Frutti di Mare", &["Shellfish mix"])];
        let ranked = score_pizzas(&pizzas, &prefs(&[("fish", true)]));
        assert_eq!(ranked[0].score, 1.0);
    }

    #[test]
    fn test_sorted_descending_by_score() {
        let pizzas = [
            pizza("Marinara", &["Tomato", "Garlic"]),
            pizza("Capricciosa", &["Mozzarella", "Cured meats"]),
            pizza("Margherita", &["Mozzarella", "Tomato"]),
        ];
        let ranked = score_pizzas(&pizzas, &prefs(&[("Mozzarella", true), ("Meats", true)]));
        assert_eq!(ranked[0].name, "Capricciosa");
        assert_eq!(ranked[0].score, 2.0);
        assert_eq!(ranked[1].name, "Margherita");
        assert_eq!(ranked[1].score, 1.0);
        assert_eq!(ranked[2].name, "Marinara");
        assert_eq!(ranked[2].score, 0.0);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let pizzas = [
            pizza("First", &["Tomato"]),
            pizza("Second", &["Tomato"]),
            pizza("Third", &["Tomato"]),
        ];
        let ranked = score_pizzas(&pizzas, &prefs(&[("Mozzarella", true)]));
        let names: Vec<_> = ranked.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let pizzas = [
            pizza("Diavola", &["Mozzarella", "Spicy salami"]),
            pizza("Tonno", &["Tuna fish"]),
        ];
        let preferences = prefs(&[("Mozzarella", true), ("Fish", false), ("Spicy salami", true)]);
        let first = score_pizzas(&pizzas, &preferences);
        for _ in 0..10 {
            assert_eq!(score_pizzas(&pizzas, &preferences), first);
        }
    }

    #[test]
    fn test_empty_preferences_scores_everything_zero_in_catalog_order() {
        let pizzas = [pizza("B", &["x"]), pizza("A", &["y"])];
        let ranked = score_pizzas(&pizzas, &Preferences::new());
        assert_eq!(ranked[0].name, "B");
        assert_eq!(ranked[1].name, "A");
        assert!(ranked.iter().all(|p| p.score == 0.0));
    }

    #[test]
    fn test_source_catalog_is_not_mutated() {
        let pizzas = [pizza("Margherita", &["Mozzarella"])];
        let before = pizzas.clone();
        let _ = score_pizzas(&pizzas, &prefs(&[("Mozzarella", false)]));
        assert_eq!(pizzas, before);
    }

    #[test]
    fn test_engine_records_session_and_returns_full_ranking() {
        let dir = tempdir().unwrap();
        let conn = init_db(&dir.path().join("test.db")).unwrap();

        let mut session = Session::new();
        // vegan? no → vegetarian? no → cured_meats? yes → seafood? no → ...
        for answer in [false, false, true, false] {
            session.answer(answer);
        }

        let pizzas = [
            pizza("Capricciosa", &["Mozzarella", "Cured meats"]),
            pizza("Tonno", &["Tuna fish"]),
            pizza("Marinara", &["Tomato"]),
            pizza("Frutti di Mare", &["Shellfish mix"]),
        ];

        let engine = RecommendEngine::new(&conn);
        let rec = engine.recommend(&session, &pizzas).unwrap();

        // Full ranking comes back; the shortlist is what gets displayed.
        assert_eq!(rec.ranked.len(), 4);
        assert_eq!(rec.shortlist().len(), 3);
        assert_eq!(rec.ranked[0].name, "Capricciosa");

        let stats = db::get_stats(&conn).unwrap();
        assert_eq!(stats.sessions_recorded, 1);
    }
}
