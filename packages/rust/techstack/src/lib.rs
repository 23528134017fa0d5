//! Alias-table driven technology detection.
//!
//! A table maps each canonical technology name to the surface strings that
//! refer to it and the technologies it implies:
//!
//! ```toml
//! [skills."docker compose"]
//! area = "infra"
//! aliases = ["docker compose", "docker-compose"]
//! implies = ["docker"]
//! ```
//!
//! [`TechStack::compile`] turns the table into boundary-safe matchers,
//! [`TechStack::extract_skills`] finds every canonical name mentioned in a text
//! (plus everything implied, transitively), and [`pick_stack`] reduces that to
//! a short, priority-ordered stack.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use jobnote_shared::{JobNoteError, Result};

/// Built-in alias table, embedded at compile time.
pub const BUILTIN_TABLE: &str = include_str!("../data/tech_stack.toml");

/// Default number of technologies kept by [`pick_stack`].
pub const DEFAULT_MAX_STACK_ITEMS: usize = 6;

/// Technologies that make it into the `stack` field, most important first.
pub const STACK_PRIORITY: &[&str] = &[
    "python",
    "sql",
    "r",
    "postgresql",
    "clickhouse",
    "mysql",
    "airflow",
    "mlflow",
    "docker",
    "docker compose",
    "spark",
    "pyspark",
    "hadoop",
    "power bi",
    "tableau",
    "datalens",
    "superset",
    "grafana",
    "git",
    "jira",
    "confluence",
];

// ---------------------------------------------------------------------------
// Compiled table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct AliasMatcher {
    canonical: String,
    re: Regex,
}

/// A compiled alias table.
#[derive(Debug, Clone, Default)]
pub struct TechStack {
    matchers: Vec<AliasMatcher>,
    implies: HashMap<String, Vec<String>>,
    areas: HashMap<String, String>,
}

impl TechStack {
    /// Compile a table shaped like `{"skills": {canonical: {area, aliases, implies}}}`.
    ///
    /// Malformed entries (non-object metadata, non-string or blank aliases,
    /// non-array fields) are skipped rather than failing the whole table.
    pub fn compile(table: &Value) -> Self {
        let mut stack = Self::default();

        let Some(skills) = table.get("skills").and_then(Value::as_object) else {
            debug!("alias table has no `skills` object");
            return stack;
        };

        for (canonical, meta) in skills {
            let Some(meta) = meta.as_object() else {
                debug!(%canonical, "skipping non-object alias entry");
                continue;
            };

            let area = meta.get("area").and_then(Value::as_str).unwrap_or_default();
            stack.areas.insert(canonical.clone(), area.to_string());

            let implies: Vec<String> = meta
                .get("implies")
                .and_then(Value::as_array)
                .map(|deps| deps.iter().filter_map(Value::as_str).map(str::to_string).collect())
                .unwrap_or_default();
            stack.implies.insert(canonical.clone(), implies);

            let aliases = meta
                .get("aliases")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();

            for alias in aliases {
                let Some(alias) = alias.as_str().filter(|a| !a.trim().is_empty()) else {
                    debug!(%canonical, ?alias, "skipping malformed alias");
                    continue;
                };
                let Some(pattern) = alias_pattern(alias) else {
                    continue;
                };
                match Regex::new(&pattern) {
                    Ok(re) => stack.matchers.push(AliasMatcher {
                        canonical: canonical.clone(),
                        re,
                    }),
                    Err(e) => debug!(%canonical, alias, error = %e, "skipping uncompilable alias"),
                }
            }
        }

        debug!(
            technologies = stack.areas.len(),
            aliases = stack.matchers.len(),
            "compiled alias table"
        );
        stack
    }

    /// Compile a TOML alias table.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let value: Value = toml::from_str(toml_str)
            .map_err(|e| JobNoteError::parse(format!("invalid alias table: {e}")))?;
        Ok(Self::compile(&value))
    }

    /// Load and compile a TOML alias table from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| JobNoteError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// The compiled built-in table.
    pub fn builtin() -> &'static Self {
        static BUILTIN: LazyLock<TechStack> = LazyLock::new(|| {
            TechStack::from_toml_str(BUILTIN_TABLE).expect("embedded alias table is valid TOML")
        });
        &BUILTIN
    }

    /// Number of canonical technologies in the table.
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Area label of a canonical technology (e.g. `"bi"` for `"power bi"`).
    pub fn area_of(&self, canonical: &str) -> Option<&str> {
        self.areas.get(canonical).map(String::as_str)
    }

    /// Sorted, unique canonical names mentioned in `text`, with implications expanded.
    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() || self.matchers.is_empty() {
            return Vec::new();
        }

        let normalized = normalize_for_match(text);
        let mut found: BTreeSet<String> = self
            .matchers
            .iter()
            .filter(|m| m.re.is_match(&normalized))
            .map(|m| m.canonical.clone())
            .collect();

        expand_implies(&mut found, &self.implies);
        found.into_iter().collect()
    }
}

// ---------------------------------------------------------------------------
// Matching helpers
// ---------------------------------------------------------------------------

/// Lowercase, `ё`→`е`, NBSP to space, dash variants to `-`, whitespace collapsed.
pub fn normalize_for_match(s: &str) -> String {
    let lowered: String = s
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'ё' => 'е',
            '\u{00A0}' => ' ',
            '–' | '—' | '−' => '-',
            c => c,
        })
        .collect();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Regex source for one alias: dash/space runs inside the alias are flexible,
/// and the match must not touch a Latin/Cyrillic letter or digit on either side.
///
/// Returns `None` for aliases with no matchable content.
pub fn alias_pattern(alias: &str) -> Option<String> {
    static SEP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid regex"));

    let normalized = normalize_for_match(alias);
    let tokens: Vec<String> = SEP_RE
        .split(&normalized)
        .filter(|t| !t.is_empty())
        .map(regex::escape)
        .collect();

    if tokens.is_empty() {
        return None;
    }

    let body = tokens.join(r"[-\s]*");
    Some(format!(r"(?:^|[^a-zа-я0-9]){body}(?:[^a-zа-я0-9]|$)"))
}

/// Add everything reachable through `implies`, breadth-first.
///
/// The found set doubles as the visited set, so cycles terminate.
pub fn expand_implies(found: &mut BTreeSet<String>, implies: &HashMap<String, Vec<String>>) {
    let mut queue: VecDeque<String> = found.iter().cloned().collect();

    while let Some(current) = queue.pop_front() {
        let Some(deps) = implies.get(&current) else {
            continue;
        };
        for dep in deps {
            if found.insert(dep.clone()) {
                queue.push_back(dep.clone());
            }
        }
    }
}

/// Reduce detected skills to at most `max_items`, in [`STACK_PRIORITY`] order.
///
/// Falls back to the raw skill list when nothing from the priority list was found.
pub fn pick_stack(skills: &[String], max_items: usize) -> Vec<String> {
    let present: HashSet<&str> = skills.iter().map(String::as_str).collect();

    let mut out: Vec<String> = STACK_PRIORITY
        .iter()
        .filter(|p| present.contains(**p))
        .map(|p| p.to_string())
        .collect();

    if out.is_empty() {
        out = skills.to_vec();
    }

    out.truncate(max_items);
    out
}
