//! Note rendering: `{{ field }}` placeholder substitution.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use jobnote_shared::{JobNoteError, Result, VacancyRecord};
use jobnote_text::{strip_tracking_params, to_yaml_inline_array, to_yaml_string};

/// Built-in Markdown note template.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/vacancy.md");

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("valid regex"));

/// Read a custom template, or the built-in one when `path` is `None`.
pub fn load_template(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| JobNoteError::io(path, e)),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

/// Flat `field → text` view of a record.
///
/// Every field also has a `{field}_yaml` key holding a YAML-safe form: a
/// double-quoted escaped scalar, or an inline list for array fields.
pub fn template_values(record: &VacancyRecord) -> Result<HashMap<String, String>> {
    let value = serde_json::to_value(record)
        .map_err(|e| JobNoteError::Template(format!("failed to serialize record: {e}")))?;
    let Value::Object(mut fields) = value else {
        return Err(JobNoteError::Template("record did not serialize to a map".into()));
    };

    fields.insert(
        "job_link".into(),
        Value::String(strip_tracking_params(&record.job_link)),
    );

    let mut values = HashMap::with_capacity(fields.len() * 2);
    for (key, value) in fields {
        let text = value_text(&value);
        let yaml = match value {
            Value::Array(_) => text.clone(),
            _ => to_yaml_string(&text),
        };
        values.insert(format!("{key}_yaml"), yaml);
        values.insert(key, text);
    }

    Ok(values)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(value_text).collect();
            to_yaml_inline_array(&items)
        }
        other => other.to_string(),
    }
}

/// Substitute every `{{ key }}` in `template`. Unknown keys render as `""`.
pub fn render_template(template: &str, record: &VacancyRecord) -> Result<String> {
    let values = template_values(record)?;
    let rendered = PLACEHOLDER_RE.replace_all(template, |caps: &Captures<'_>| {
        values.get(&caps[1]).cloned().unwrap_or_default()
    });
    Ok(rendered.into_owned())
}
