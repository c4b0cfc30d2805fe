//! Question tree: the fixed yes/no decision walk
//!
//! The tree is a static table of nodes keyed by id. It is a DAG, not a
//! strict binary tree: several branches converge on shared downstream
//! nodes ("allergies" is reached from three different places).
//!
//! The walker itself is a pure lookup; the only state lives in the
//! caller's [`crate::Session`]. Answering one of a fixed subset of
//! nodes also records a preference, under the translation table in
//! [`preference_key`].

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::types::Preferences;

/// A single question node. Both branches `None` marks a terminal node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionNode {
    pub id: &'static str,
    pub prompt: &'static str,
    pub next_on_yes: Option<&'static str>,
    pub next_on_no: Option<&'static str>,
}

/// The node every walk starts from.
pub const START_NODE: &str = "vegan";

const NODES: &[QuestionNode] = &[
    QuestionNode {
        id: "vegan",
        prompt: "Are you vegan?",
        next_on_yes: Some("allergies"),
        next_on_no: Some("vegetarian"),
    },
    QuestionNode {
        id: "vegetarian",
        prompt: "Are you vegetarian?",
        next_on_yes: Some("mozzarella"),
        next_on_no: Some("cured_meats"),
    },
    QuestionNode {
        id: "mozzarella",
        prompt: "Do you want mozzarella?",
        next_on_yes: Some("creamy_cheeses"),
        next_on_no: Some("creamy_cheeses"),
    },
    QuestionNode {
        id: "creamy_cheeses",
        prompt: "Do you prefer creamy cheeses (e.g., ricotta, brie)?",
        next_on_yes: Some("allergies"),
        next_on_no: Some("allergies"),
    },
    QuestionNode {
        id: "cured_meats",
        prompt: "Would you like cured meats (e.g., ham, salami)?",
        next_on_yes: Some("seafood"),
        next_on_no: Some("seafood"),
    },
    QuestionNode {
        id: "seafood",
        prompt: "Are you okay with seafood (e.g., tuna, anchovies)?",
        next_on_yes: Some("allergies"),
        next_on_no: Some("allergies"),
    },
    QuestionNode {
        id: "allergies",
        prompt: "Do you have any allergies?",
        next_on_yes: Some("gluten"),
        next_on_no: Some("ingredients"),
    },
    QuestionNode {
        id: "gluten",
        prompt: "Are you allergic to gluten?",
        next_on_yes: Some("dairy"),
        next_on_no: Some("dairy"),
    },
    QuestionNode {
        id: "dairy",
        prompt: "Are you allergic to dairy?",
        next_on_yes: Some("seafood_allergy"),
        next_on_no: Some("seafood_allergy"),
    },
    QuestionNode {
        id: "seafood_allergy",
        prompt: "Are you allergic to seafood?",
        next_on_yes: Some("ingredients"),
        next_on_no: Some("ingredients"),
    },
    QuestionNode {
        id: "ingredients",
        prompt: "Do you want tomato sauce?",
        next_on_yes: Some("vegetables"),
        next_on_no: Some("vegetables"),
    },
    QuestionNode {
        id: "vegetables",
        prompt: "Do you like fresh vegetables (e.g., eggplants, zucchini, peppers)?",
        next_on_yes: Some("spicy"),
        next_on_no: Some("spicy"),
    },
    QuestionNode {
        id: "spicy",
        prompt: "Do you enjoy spicy flavors?",
        next_on_yes: None,
        next_on_no: None,
    },
];

fn node_table() -> &'static HashMap<&'static str, &'static QuestionNode> {
    static TABLE: OnceLock<HashMap<&'static str, &'static QuestionNode>> = OnceLock::new();
    TABLE.get_or_init(|| NODES.iter().map(|n| (n.id, n)).collect())
}

/// All nodes, in walk-friendly definition order.
pub fn nodes() -> &'static [QuestionNode] {
    NODES
}

/// Look up a node by id.
pub fn get_node(node_id: &str) -> Option<&'static QuestionNode> {
    node_table().get(node_id).copied()
}

/// Advance the walk: given the current node and a yes/no answer, return
/// the next node id, or `None` when the walk is finished.
///
/// An unknown node id is treated as an implicit terminal rather than an
/// error. That reproduces the observed behavior of the questionnaire; a
/// typo in the static table is caught by the integrity test instead.
pub fn advance(current_node_id: &str, answer: bool) -> Option<&'static str> {
    let node = get_node(current_node_id)?;
    if answer {
        node.next_on_yes
    } else {
        node.next_on_no
    }
}

/// The node-id → preference-name translation table.
///
/// Only these four nodes contribute to the accumulated preferences; the
/// names are the exact strings matched against catalog ingredients.
pub fn preference_key(node_id: &str) -> Option<&'static str> {
    match node_id {
        "mozzarella" => Some("Mozzarella"),
        "cured_meats" => Some("Meats"),
        "seafood" => Some("Fish"),
        "spicy" => Some("Spicy salami"),
        _ => None,
    }
}

/// Record the preference side effect of answering `node_id`, if any.
/// Returns the preference name touched, for logging.
pub fn record_preference(
    preferences: &mut Preferences,
    node_id: &str,
    answer: bool,
) -> Option<&'static str> {
    let key = preference_key(node_id)?;
    preferences.insert(key.to_string(), answer);
    Some(key)
}
