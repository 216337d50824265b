//! Statement text scanning
//!
//! Keyword-based extraction of source and target table names from raw SQL
//! text. The scan is deliberately shallow: it splits on keywords anywhere in
//! the uppercased text and takes the next whitespace token, with no
//! awareness of subqueries, aliases, CTEs, comments or string literals.
//! Qualified names it misses simply produce no edge; names it over-matches
//! produce an extra edge that carries its originating query id for review.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

const SOURCE_KEYWORDS: [&str; 6] = [
    "FROM",
    "JOIN",
    "INNER JOIN",
    "LEFT JOIN",
    "RIGHT JOIN",
    "FULL JOIN",
];

// Tokens between CREATE TABLE and the table name in the conditional and
// replacing forms.
const TARGET_MODIFIERS: [&str; 5] = ["IF", "NOT", "EXISTS", "OR", "REPLACE"];

/// Kind of a mutating statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryKind {
    /// INSERT statement
    Insert,

    /// CREATE TABLE ... AS SELECT statement
    CreateTableAsSelect,

    /// MERGE statement
    Merge,

    /// UPDATE statement
    Update,

    /// Anything else
    Unknown,
}

impl QueryKind {
    /// String form used in persisted records and query-log filters
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Insert => "INSERT",
            QueryKind::CreateTableAsSelect => "CREATE_TABLE_AS_SELECT",
            QueryKind::Merge => "MERGE",
            QueryKind::Update => "UPDATE",
            QueryKind::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a statement by the first matching keyword
///
/// Checked in a fixed order: INSERT before CREATE TABLE before MERGE before
/// UPDATE, anywhere in the text.
pub fn classify_statement(text: &str) -> QueryKind {
    let upper = text.to_uppercase();
    if upper.contains("INSERT") {
        QueryKind::Insert
    } else if upper.contains("CREATE TABLE") {
        QueryKind::CreateTableAsSelect
    } else if upper.contains("MERGE") {
        QueryKind::Merge
    } else if upper.contains("UPDATE") {
        QueryKind::Update
    } else {
        QueryKind::Unknown
    }
}

/// Candidate source tables of a statement
///
/// The token after each FROM/JOIN keyword, trimmed of `(),;`. Only
/// qualified names containing a `.` are kept.
pub fn scan_sources(text: &str) -> BTreeSet<String> {
    let upper = text.to_uppercase();
    let mut sources = BTreeSet::new();

    for keyword in SOURCE_KEYWORDS {
        if !upper.contains(keyword) {
            continue;
        }
        for part in upper.split(keyword).skip(1) {
            let token = match first_token(part) {
                Some(token) => token,
                None => continue,
            };
            let table = trim_punctuation(token);
            if table.contains('.') {
                sources.insert(table.to_string());
            }
        }
    }

    sources
}

/// Candidate target tables of a statement
///
/// The token after INSERT INTO, CREATE TABLE and MERGE INTO. After CREATE
/// TABLE the IF NOT EXISTS / OR REPLACE modifiers are skipped, so the table
/// name itself is found rather than the IF token. Targets are not required
/// to be qualified.
pub fn scan_targets(text: &str) -> BTreeSet<String> {
    let upper = text.to_uppercase();
    let mut targets = BTreeSet::new();

    collect_targets(&upper, "INSERT INTO", false, &mut targets);
    collect_targets(&upper, "CREATE TABLE", true, &mut targets);
    collect_targets(&upper, "MERGE INTO", false, &mut targets);

    targets
}

fn collect_targets(
    upper: &str,
    keyword: &str,
    skip_modifiers: bool,
    targets: &mut BTreeSet<String>,
) {
    if !upper.contains(keyword) {
        return;
    }
    for part in upper.split(keyword).skip(1) {
        let token = part
            .split_whitespace()
            .find(|token| !(skip_modifiers && TARGET_MODIFIERS.contains(token)));
        let token = match token {
            Some(token) => token,
            None => continue,
        };
        let table = trim_punctuation(token);
        if !table.is_empty() {
            targets.insert(table.to_string());
        }
    }
}

fn first_token(part: &str) -> Option<&str> {
    part.split_whitespace().next()
}

fn trim_punctuation(token: &str) -> &str {
    token.trim_matches(|c| matches!(c, '(' | ')' | ',' | ';'))
}
