//! Core domain types for jobnote vacancy records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::JobNoteError;

// ---------------------------------------------------------------------------
// Level
// ---------------------------------------------------------------------------

/// Seniority level of a vacancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "intern")]
    Intern,
    #[serde(rename = "junior")]
    Junior,
    #[serde(rename = "junior+")]
    JuniorPlus,
    #[serde(rename = "middle")]
    Middle,
    #[serde(rename = "middle+")]
    MiddlePlus,
    #[serde(rename = "senior")]
    Senior,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intern => "intern",
            Self::Junior => "junior",
            Self::JuniorPlus => "junior+",
            Self::Middle => "middle",
            Self::MiddlePlus => "middle+",
            Self::Senior => "senior",
        }
    }

    /// Short tag used in note filenames. `middle+` has none.
    pub fn abbrev(self) -> Option<&'static str> {
        match self {
            Self::Intern => Some("INT"),
            Self::Junior => Some("J"),
            Self::JuniorPlus => Some("J+"),
            Self::Middle => Some("M"),
            Self::Senior => Some("S"),
            Self::MiddlePlus => None,
        }
    }
}

impl AsRef<str> for Level {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = JobNoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "intern" => Ok(Self::Intern),
            "junior" => Ok(Self::Junior),
            "junior+" => Ok(Self::JuniorPlus),
            "middle" => Ok(Self::Middle),
            "middle+" => Ok(Self::MiddlePlus),
            "senior" => Ok(Self::Senior),
            other => Err(JobNoteError::validation(format!("unknown level '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// WorkMode
// ---------------------------------------------------------------------------

/// Where the work is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkMode {
    Remote,
    Hybrid,
    Office,
}

impl WorkMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Hybrid => "hybrid",
            Self::Office => "office",
        }
    }
}

impl AsRef<str> for WorkMode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkMode {
    type Err = JobNoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "hybrid" => Ok(Self::Hybrid),
            "office" => Ok(Self::Office),
            other => Err(JobNoteError::validation(format!(
                "unknown work mode '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Job board a page was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "hh.ru")]
    Hh,
    #[serde(rename = "career.habr.com")]
    Habr,
    #[serde(rename = "geekjob")]
    Geekjob,
    #[serde(rename = "superjob.ru")]
    Superjob,
    #[default]
    #[serde(rename = "other")]
    Other,
}

impl Source {
    /// Identify the job board from a page hostname.
    pub fn from_host(host: &str) -> Self {
        let host = host.trim().to_lowercase();
        let host = host.strip_prefix("www.").unwrap_or(&host);

        if host.ends_with("hh.ru") {
            Self::Hh
        } else if host == "career.habr.com" || host == "career.habr.ru" {
            Self::Habr
        } else if host.ends_with("geekjob.ru") {
            Self::Geekjob
        } else if host.ends_with("superjob.ru") {
            Self::Superjob
        } else {
            Self::Other
        }
    }

    /// Value stored in the record's `source` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hh => "hh.ru",
            Self::Habr => "career.habr.com",
            Self::Geekjob => "geekjob",
            Self::Superjob => "superjob.ru",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PartialRecord
// ---------------------------------------------------------------------------

/// Raw, adapter-specific scrape of a single vacancy page.
///
/// Every field is optional in practice: adapters leave what they could not
/// find empty, and consumers treat empty as "not found", never as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialRecord {
    pub role: String,
    pub company: String,
    pub salary: String,
    pub location_city: String,
    pub location_address: String,
    pub location_metro: String,
    /// Work-format text as shown on the page (e.g. "Гибрид").
    pub work_mode: String,
    /// Experience requirement text (e.g. "Опыт работы от 1 года").
    pub experience: String,
    /// Level explicitly stated by the adapter.
    pub level: String,
    /// Text of a structured level label/link on the page.
    #[serde(alias = "levelLink")]
    pub level_link: String,
    pub skills: Vec<String>,
    pub tags: Vec<String>,
    /// Raw publication date text (ISO or Russian long form).
    pub publish_date: String,
    pub job_description_raw: String,
    /// `href` of the page's `<link rel="canonical">`, if any.
    pub canonical_link: String,
    pub source: Source,
}

// ---------------------------------------------------------------------------
// VacancyRecord
// ---------------------------------------------------------------------------

/// Fully classified, normalized vacancy record handed to rendering.
///
/// Serializes to a flat mapping; unknown level/work mode become `""`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacancyRecord {
    pub company: String,
    pub role: String,
    pub role_norm: String,
    #[serde(with = "empty_if_none")]
    pub level: Option<Level>,
    pub source: Source,
    pub job_link: String,
    #[serde(with = "empty_if_none")]
    pub work_mode: Option<WorkMode>,
    pub location_city: String,
    pub location_address: String,
    pub location_metro: String,
    pub location_display: String,
    pub commute_minutes: String,
    pub salary: String,
    pub salary_min_net: String,
    pub salary_currency: String,
    pub stack: Vec<String>,
    pub skills: Vec<String>,
    pub apply_date: String,
    pub publish_date: String,
    pub parsed_at: String,
    pub tags: Vec<String>,
    pub job_description_raw: String,
    pub cover_letter_draft: String,
    pub filename: String,
}

/// Serialize `Option<T>` as its string form, or `""` when absent.
mod empty_if_none {
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: AsRef<str>,
    {
        serializer.serialize_str(value.as_ref().map(|v| v.as_ref()).unwrap_or(""))
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let s = String::deserialize(deserializer)?;
        if s.trim().is_empty() {
            return Ok(None);
        }
        s.parse().map(Some).map_err(de::Error::custom)
    }
}
