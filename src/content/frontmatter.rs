//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A `---` line at the very start, up to the next line that is only `---`
    static ref FRONT_MATTER_BLOCK: Regex =
        Regex::new(r"(?ms)\A---\r?\n(.*?)^---\r?$").unwrap();
}

/// A single coerced front-matter value
#[derive(Debug, Clone, PartialEq)]
pub enum FrontMatterValue {
    Text(String),
    Number(f64),
    Bool(bool),
    List(Vec<FrontMatterValue>),
}

impl FrontMatterValue {
    /// Scalar value rendered as text; lists have no text form
    pub fn as_text(&self) -> Option<String> {
        match self {
            FrontMatterValue::Text(s) => Some(s.clone()),
            FrontMatterValue::Number(n) => Some(n.to_string()),
            FrontMatterValue::Bool(b) => Some(b.to_string()),
            FrontMatterValue::List(_) => None,
        }
    }

    /// Value as a list of strings. A lone scalar becomes a one-element list.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            FrontMatterValue::List(items) => items.iter().filter_map(|v| v.as_text()).collect(),
            FrontMatterValue::Text(s) if s.trim().is_empty() => Vec::new(),
            other => other.as_text().into_iter().collect(),
        }
    }
}

impl From<serde_json::Value> for FrontMatterValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FrontMatterValue::Text(String::new()),
            serde_json::Value::Bool(b) => FrontMatterValue::Bool(b),
            serde_json::Value::Number(n) => FrontMatterValue::Number(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => FrontMatterValue::Text(s),
            serde_json::Value::Array(items) => {
                FrontMatterValue::List(items.into_iter().map(FrontMatterValue::from).collect())
            }
            object @ serde_json::Value::Object(_) => FrontMatterValue::Text(object.to_string()),
        }
    }
}

/// Front-matter data from a content file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    fields: IndexMap<String, FrontMatterValue>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, body). Never fails: anything that is not a
    /// well-formed block leaves the whole input as body.
    pub fn parse(content: &str) -> (Self, &str) {
        let Some(captures) = FRONT_MATTER_BLOCK.captures(content) else {
            return (FrontMatter::default(), content);
        };

        let block = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let end = captures.get(0).map(|m| m.end()).unwrap_or_default();
        let body = content[end..].trim();

        (
            FrontMatter {
                fields: parse_fields(block),
            },
            body,
        )
    }

    pub fn get(&self, key: &str) -> Option<&FrontMatterValue> {
        self.fields.get(key)
    }

    /// Non-empty text value for a key
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(|v| v.as_text())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// List value for a key; `None` when absent or empty
    pub fn list(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).map(|v| v.to_list()).filter(|l| !l.is_empty())
    }

    /// Parse the `date` field into a calendar date
    pub fn date(&self) -> Option<NaiveDate> {
        self.text("date").and_then(|s| parse_date_string(&s))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FrontMatterValue)> {
        self.fields.iter()
    }
}

/// Split `key: value` lines into typed fields.
///
/// A key with an empty value collects the `- item` lines that follow it
/// into a list.
fn parse_fields(block: &str) -> IndexMap<String, FrontMatterValue> {
    let mut fields = IndexMap::new();
    let mut pending: Option<(String, Vec<FrontMatterValue>)> = None;

    for line in block.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some((_, items)) = pending.as_mut() {
            if let Some(item) = sequence_item(trimmed) {
                items.push(coerce_value(item));
                continue;
            }
        }
        if let Some((key, items)) = pending.take() {
            fields.insert(key, finish_sequence(items));
        }

        let Some((key, value)) = trimmed.split_once(':') else {
            tracing::debug!("Skipping front-matter line without a key: {}", trimmed);
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        let value = value.trim();
        if value.is_empty() {
            pending = Some((key.to_string(), Vec::new()));
        } else {
            fields.insert(key.to_string(), coerce_value(value));
        }
    }

    if let Some((key, items)) = pending {
        fields.insert(key, finish_sequence(items));
    }

    fields
}

fn sequence_item(line: &str) -> Option<&str> {
    if line == "-" {
        return Some("");
    }
    line.strip_prefix("- ").map(str::trim)
}

fn finish_sequence(items: Vec<FrontMatterValue>) -> FrontMatterValue {
    if items.is_empty() {
        FrontMatterValue::Text(String::new())
    } else {
        FrontMatterValue::List(items)
    }
}

/// Coerce a raw value: quoted string, number, boolean, bracketed list, text
pub fn coerce_value(raw: &str) -> FrontMatterValue {
    let value = raw.trim();

    if let Some(inner) = strip_quotes(value) {
        return FrontMatterValue::Text(inner.to_string());
    }

    if let Some(number) = parse_number(value) {
        return FrontMatterValue::Number(number);
    }

    if value.eq_ignore_ascii_case("true") {
        return FrontMatterValue::Bool(true);
    }
    if value.eq_ignore_ascii_case("false") {
        return FrontMatterValue::Bool(false);
    }

    if value.starts_with('[') && value.ends_with(']') {
        match serde_json::from_str::<Vec<serde_json::Value>>(&value.replace('\'', "\"")) {
            Ok(items) => {
                return FrontMatterValue::List(
                    items.into_iter().map(FrontMatterValue::from).collect(),
                )
            }
            Err(e) => {
                tracing::warn!("Could not parse list value {}, keeping it as text: {}", value, e);
            }
        }
    }

    FrontMatterValue::Text(value.to_string())
}

fn strip_quotes(value: &str) -> Option<&str> {
    if value.len() < 2 {
        return None;
    }
    ['"', '\''].into_iter().find_map(|quote| {
        value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
    })
}

fn parse_number(value: &str) -> Option<f64> {
    let first = value.chars().next()?;
    if !(first.is_ascii_digit() || matches!(first, '-' | '+' | '.')) {
        return None;
    }
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a date string in various formats, keeping only the calendar date
pub fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    // RFC 3339 / ISO 8601 with offset
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}
