//! Session audit trail in SQLite
//!
//! Single file, zero network dependencies, works offline. The walker
//! and scorer never read from here; this layer only records finished
//! sessions and answers the aggregate stats queries behind `--stats`.

use crate::session::Session;
use crate::types::Recommendation;
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::debug;

/// Initialize the database with schema
pub fn init_db(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database at {:?}", path))?;

    conn.execute_batch(SCHEMA)?;

    Ok(conn)
}

const SCHEMA: &str = r#"
-- Sessions: one row per completed questionnaire walk
CREATE TABLE IF NOT EXISTS sessions (
    id TEXT PRIMARY KEY,
    started_at TEXT NOT NULL,
    recorded_at TEXT NOT NULL,
    answers_json TEXT NOT NULL,         -- ordered transcript of (node, answer)
    preferences_json TEXT NOT NULL      -- final preference mapping
);

CREATE INDEX IF NOT EXISTS idx_sessions_recorded ON sessions(recorded_at);

-- Recommendations: the ranking produced for each session
CREATE TABLE IF NOT EXISTS recommendations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id TEXT NOT NULL REFERENCES sessions(id),
    rank INTEGER NOT NULL,              -- 1-based position in the ranking
    pizza_name TEXT NOT NULL,
    score REAL NOT NULL,
    shortlisted INTEGER NOT NULL        -- 1 if within the displayed top entries
);

CREATE INDEX IF NOT EXISTS idx_recommendations_session ON recommendations(session_id);
CREATE INDEX IF NOT EXISTS idx_recommendations_pizza ON recommendations(pizza_name);
"#;

/// Persist a finished session together with its ranking.
pub fn record_session(
    conn: &Connection,
    session: &Session,
    recommendation: &Recommendation,
) -> Result<()> {
    let answers_json = serde_json::to_string(session.transcript())?;
    let preferences_json = serde_json::to_string(session.preferences())?;

    conn.execute(
        "INSERT INTO sessions (id, started_at, recorded_at, answers_json, preferences_json)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            session.id(),
            session.started_at().to_rfc3339(),
            recommendation.created_at.to_rfc3339(),
            answers_json,
            preferences_json,
        ],
    )
    .context("Failed to insert session")?;

    let shortlist_len = recommendation.shortlist().len();
    for (i, pizza) in recommendation.ranked.iter().enumerate() {
        conn.execute(
            "INSERT INTO recommendations (session_id, rank, pizza_name, score, shortlisted)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                session.id(),
                (i + 1) as i64,
                pizza.name,
                pizza.score,
                (i < shortlist_len) as i64,
            ],
        )
        .context("Failed to insert recommendation")?;
    }

    debug!(session = %session.id(), ranked = recommendation.ranked.len(), "session recorded");
    Ok(())
}

/// Aggregate stats over everything recorded so far
#[derive(Debug, Clone)]
pub struct Stats {
    pub sessions_recorded: i64,
    /// (pizza name, times it appeared in a displayed shortlist)
    pub top_pizzas: Vec<(String, i64)>,
    /// (preference name, how often it was answered "yes"), over all sessions
    pub preference_yes_counts: Vec<(String, i64)>,
}

/// Compute aggregate stats for the `--stats` surface.
pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let sessions_recorded: i64 =
        conn.query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;

    let mut stmt = conn.prepare(
        "SELECT pizza_name, COUNT(*) as n
         FROM recommendations
         WHERE shortlisted = 1
         GROUP BY pizza_name
         ORDER BY n DESC, pizza_name ASC
         LIMIT 10",
    )?;
    let top_pizzas = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<std::result::Result<Vec<(String, i64)>, _>>()?;

    // Preference tallies live in the stored JSON; decode per session.
    let mut stmt = conn.prepare("SELECT preferences_json FROM sessions")?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;

    let mut yes_counts: std::collections::BTreeMap<String, i64> = Default::default();
    for raw in rows {
        let prefs: crate::types::Preferences =
            serde_json::from_str(&raw).context("Corrupt preferences_json in sessions table")?;
        for (name, wants) in prefs {
            if wants {
                *yes_counts.entry(name).or_insert(0) += 1;
            }
        }
    }
    let mut preference_yes_counts: Vec<(String, i64)> = yes_counts.into_iter().collect();
    preference_yes_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Ok(Stats {
        sessions_recorded,
        top_pizzas,
        preference_yes_counts,
    })
}
