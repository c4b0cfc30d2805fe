//! Core types for the pizzaiolo questionnaire
//!
//! The shapes here mirror the flow of a session: a walk through the
//! question tree accumulates [`Preferences`], and the scorer turns the
//! catalog plus those preferences into a ranked list of [`ScoredPizza`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A pizza in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pizza {
    pub name: String,
    pub ingredients: Vec<String>,
}

/// A pizza with its computed preference score.
///
/// Scores are derived per request and never written back to the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPizza {
    pub name: String,
    pub ingredients: Vec<String>,
    pub score: f64,
}

impl ScoredPizza {
    pub fn from_pizza(pizza: &Pizza, score: f64) -> Self {
        Self {
            name: pizza.name.clone(),
            ingredients: pizza.ingredients.clone(),
            score,
        }
    }
}

/// Accumulated preferences: preference name → desired state.
///
/// Only a fixed subset of question nodes contribute entries (see
/// [`crate::tree::preference_key`]). A BTreeMap keeps iteration order
/// deterministic, which keeps scoring deterministic.
pub type Preferences = BTreeMap<String, bool>;

/// One answered question in a session transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    pub node_id: String,
    pub prompt: String,
    pub answer: bool,
}

/// The result of one recommendation pass over the catalog.
///
/// `ranked` holds the full catalog sorted by descending score; callers
/// truncate to [`crate::recommend::SHORTLIST_LEN`] for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub session_id: String,
    pub preferences: Preferences,
    pub ranked: Vec<ScoredPizza>,
    pub created_at: DateTime<Utc>,
}

impl Recommendation {
    /// The top entries a user actually sees.
    pub fn shortlist(&self) -> &[ScoredPizza] {
        let n = crate::recommend::SHORTLIST_LEN.min(self.ranked.len());
        &self.ranked[..n]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortlist_truncates_to_three() {
        let ranked: Vec<ScoredPizza> = (0..5)
            .map(|i| ScoredPizza {
                name: format!("pizza-{i}"),
                ingredients: vec![],
                score: -(i as f64),
            })
            .collect();
        let rec = Recommendation {
            session_id: "s".into(),
            preferences: Preferences::new(),
            ranked,
            created_at: Utc::now(),
        };
        assert_eq!(rec.shortlist().len(), 3);
        assert_eq!(rec.shortlist()[0].name, "pizza-0");
    }

    #[test]
    fn test_shortlist_handles_small_catalogs() {
        let rec = Recommendation {
            session_id: "s".into(),
            preferences: Preferences::new(),
            ranked: vec![ScoredPizza {
                name: "Margherita".into(),
                ingredients: vec!["Tomato sauce".into()],
                score: 0.0,
            }],
            created_at: Utc::now(),
        };
        assert_eq!(rec.shortlist().len(), 1);
    }

    #[test]
    fn test_pizza_serde_round_trip() {
        let pizza = Pizza {
            name: "Diavola".into(),
            ingredients: vec!["Tomato sauce".into(), "Spicy salami".into()],
        };
        let json = serde_json::to_string(&pizza).unwrap();
        let back: Pizza = serde_json::from_str(&json).unwrap();
        assert_eq!(pizza, back);
    }
}
