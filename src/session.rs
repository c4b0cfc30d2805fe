//! Session state: one user's walk through the question tree
//!
//! The walker and scorer are pure; everything mutable lives here. A
//! session starts at [`crate::tree::START_NODE`], advances one node per
//! answer, accumulates preferences as a side effect of the contributing
//! nodes, and is consumed exactly once by the recommendation engine
//! when the walk finishes.

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::tree::{self, QuestionNode};
use crate::types::{AnsweredQuestion, Preferences};

/// What the caller should do after an answer is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Ask the next question.
    Question(&'static QuestionNode),
    /// The walk is over; hand the preferences to the scorer.
    Finished,
}

/// One questionnaire session
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    current: Option<String>,
    preferences: Preferences,
    transcript: Vec<AnsweredQuestion>,
    started_at: DateTime<Utc>,
}

impl Session {
    /// Start a fresh session at the root of the tree.
    pub fn new() -> Self {
        Self::resume_at(tree::START_NODE)
    }

    /// Start a session at an arbitrary node id.
    ///
    /// The id is not validated here: an unknown id behaves as an
    /// implicit terminal, same as during a walk.
    pub fn resume_at(node_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            current: Some(node_id.to_string()),
            preferences: Preferences::new(),
            transcript: Vec::new(),
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn transcript(&self) -> &[AnsweredQuestion] {
        &self.transcript
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The question to ask next, or `None` when the walk is finished.
    ///
    /// A current id that is missing from the table reads as finished,
    /// mirroring the walker's implicit-terminal rule.
    pub fn current_question(&self) -> Option<&'static QuestionNode> {
        self.current.as_deref().and_then(tree::get_node)
    }

    pub fn is_finished(&self) -> bool {
        self.current_question().is_none()
    }

    /// Apply a yes/no answer to the current question.
    ///
    /// Records the preference side effect for contributing nodes,
    /// appends to the transcript, and advances the walk. Answering a
    /// finished session is a no-op that reports [`Step::Finished`].
    pub fn answer(&mut self, answer: bool) -> Step {
        let Some(node) = self.current_question() else {
            self.current = None;
            return Step::Finished;
        };

        if let Some(key) = tree::record_preference(&mut self.preferences, node.id, answer) {
            debug!(session = %self.id, preference = key, wants = answer, "preference recorded");
        }

        self.transcript.push(AnsweredQuestion {
            node_id: node.id.to_string(),
            prompt: node.prompt.to_string(),
            answer,
        });

        match tree::advance(node.id, answer) {
            Some(next) => {
                self.current = Some(next.to_string());
                match tree::get_node(next) {
                    Some(next_node) => Step::Question(next_node),
                    // Branch id missing from the table: implicit terminal.
                    None => Step::Finished,
                }
            }
            None => {
                self.current = None;
                Step::Finished
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
