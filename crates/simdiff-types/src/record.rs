//! Snapshot records and datasets.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{json_type_name, TypeError};
use crate::field::FieldKind;

/// Field naming the agent that produced a record.
pub const AGENT_ID_FIELD: &str = "agent_software_id";

/// Agent id used when a record has no usable `agent_software_id`.
pub const UNKNOWN_AGENT: &str = "unknown";

/// One flat JSON object from a snapshot.
///
/// Field names are dynamic; only the agent id and amount fields carry
/// meaning. Everything else is kept but never interpreted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(name, value)` pairs.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Resolve the agent id for this record.
    ///
    /// A non-empty string is used as-is and a non-zero number by its
    /// shortest decimal text, so `1.0` and `1` both become `"1"`. `true`
    /// becomes `"true"`. Anything else (missing, `null`, `""`,
    /// `0`, `false`, arrays, objects) falls back to [`UNKNOWN_AGENT`].
    pub fn agent_id(&self) -> Cow<'_, str> {
        match self.fields.get(AGENT_ID_FIELD) {
            Some(Value::String(s)) if !s.is_empty() => Cow::Borrowed(s.as_str()),
            Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Cow::Owned(number_text(n)),
            Some(Value::Bool(true)) => Cow::Borrowed("true"),
            _ => Cow::Borrowed(UNKNOWN_AGENT),
        }
    }

    /// Iterate over amount fields as `(field name, year, raw value)`.
    ///
    /// Values are not converted here; callers decide how to treat
    /// non-numeric amounts.
    pub fn amount_fields(&self) -> impl Iterator<Item = (&str, &str, &Value)> {
        self.fields().filter_map(|(name, value)| {
            FieldKind::parse(name).year().map(|year| (name, year, value))
        })
    }
}

fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            format!("{}", f as i128)
        }
        _ => n.to_string(),
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl TryFrom<Value> for Record {
    type Error = TypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(TypeError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }
}

/// Ordered, fully materialized sequence of records from one snapshot.
///
/// Order is preserved for error reporting (record indices) but no aggregate
/// depends on it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
