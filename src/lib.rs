//! pizzaiolo - Decision-tree pizza recommender
//!
//! Walks a user through a fixed sequence of yes/no questions, turns the
//! answers into a preference mapping, and scores a small pizza catalog
//! against those preferences.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pizzaiolo::{catalog, db, RecommendEngine, Session, Step};
//!
//! let conn = db::init_db(&db_path)?;
//! let pizzas = catalog::load_catalog(&catalog_path)?;
//!
//! // Drive the walk
//! let mut session = Session::new();
//! while let Some(node) = session.current_question() {
//!     let answer = ask_user(node.prompt);
//!     session.answer(answer);
//! }
//!
//! // Score and record
//! let engine = RecommendEngine::new(&conn);
//! let recommendation = engine.recommend(&session, &pizzas)?;
//! for pizza in recommendation.shortlist() {
//!     println!("{} ({:+.1})", pizza.name, pizza.score);
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 CLI (REPL / commands)                │
//! └─────────────────────┬────────────────────────────────┘
//!                       │
//!                       ▼
//! ┌──────────────────────────────────────────────────────┐
//! │  Session ──► tree::advance()   (pure walk, no I/O)   │
//! │          ──► Preferences       (side effect of 4     │
//! │                                 contributing nodes)  │
//! │  RecommendEngine ──► score_pizzas()  (pure scoring)  │
//! │                  ──► db (SQLite audit trail)         │
//! │  catalog (flat JSON file, read per recommendation)   │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod db;
pub mod recommend;
pub mod session;
pub mod tree;
pub mod types;

// Core types
pub use recommend::{score_pizzas, RecommendEngine, SHORTLIST_LEN};
pub use session::{Session, Step};
pub use tree::{advance, preference_key, QuestionNode, START_NODE};
pub use types::*;

// Storage
pub use catalog::{default_catalog, load_catalog, save_catalog};
pub use db::{get_stats, init_db, Stats};
