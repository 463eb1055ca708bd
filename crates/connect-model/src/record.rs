//! Sparse participant records as returned by the backend.
//!
//! A participant record is a JSON object keyed by concept IDs (in string
//! form) plus a handful of plain keys such as `Connect_ID` and `token`.
//! Values are scalars, lists, or nested records for grouped data
//! (collection details, payment rounds, refusal options).
//!
//! Every accessor here is total: a missing key, a nested block that is not a
//! record, or a value of the wrong shape yields `None`. Partially populated
//! records are the common case, not an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::{ConceptId, ModelError};

/// Key holding the participant's public Connect identifier.
pub const CONNECT_ID_KEY: &str = "Connect_ID";

/// Key holding the participant's backend token.
pub const TOKEN_KEY: &str = "token";

/// A single value within a participant record.
///
/// `Null` is an explicit JSON null and is distinct from an absent key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    List(Vec<FieldValue>),
    Record(ParticipantRecord),
}

impl FieldValue {
    /// Interpret this value as a concept code (number or numeric string).
    pub fn as_code(&self) -> Option<ConceptId> {
        match self {
            FieldValue::Number(number) => number.as_u64().map(ConceptId::new),
            FieldValue::Text(text) => text.parse().ok(),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&ParticipantRecord> {
        match self {
            FieldValue::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Render scalars for display; nested values render as `None`.
    pub fn display_scalar(&self) -> Option<String> {
        match self {
            FieldValue::Bool(value) => Some(value.to_string()),
            FieldValue::Number(number) => Some(number.to_string()),
            FieldValue::Text(text) => Some(text.clone()),
            FieldValue::Null | FieldValue::List(_) | FieldValue::Record(_) => None,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(value) => FieldValue::Bool(value),
            Value::Number(number) => FieldValue::Number(number),
            Value::String(text) => FieldValue::Text(text),
            Value::Array(items) => FieldValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => FieldValue::Record(ParticipantRecord::from(map)),
        }
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(value) => Value::Bool(value),
            FieldValue::Number(number) => Value::Number(number),
            FieldValue::Text(text) => Value::String(text),
            FieldValue::List(items) => Value::Array(items.into_iter().map(Into::into).collect()),
            FieldValue::Record(record) => Value::Object(record.into()),
        }
    }
}

impl From<ConceptId> for FieldValue {
    fn from(id: ConceptId) -> Self {
        FieldValue::Number(Number::from(id.get()))
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<ParticipantRecord> for FieldValue {
    fn from(record: ParticipantRecord) -> Self {
        FieldValue::Record(record)
    }
}

/// A participant snapshot keyed by concept ID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct ParticipantRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl ParticipantRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a record from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let value: Value = serde_json::from_str(json)?;
        Self::try_from(value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, id: ConceptId) -> Option<&FieldValue> {
        self.fields.get(&id.key())
    }

    pub fn get_key(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Follow a path of nested records. An empty path yields `None`.
    pub fn get_path(&self, path: &[ConceptId]) -> Option<&FieldValue> {
        let (last, parents) = path.split_last()?;
        let mut current = self;
        for id in parents {
            current = current.record(*id)?;
        }
        current.get(*last)
    }

    pub fn record(&self, id: ConceptId) -> Option<&ParticipantRecord> {
        self.get(id).and_then(FieldValue::as_record)
    }

    pub fn record_at(&self, path: &[ConceptId]) -> Option<&ParticipantRecord> {
        self.get_path(path).and_then(FieldValue::as_record)
    }

    pub fn code_at(&self, path: &[ConceptId]) -> Option<ConceptId> {
        self.get_path(path).and_then(FieldValue::as_code)
    }

    pub fn text_at(&self, path: &[ConceptId]) -> Option<&str> {
        self.get_path(path).and_then(FieldValue::as_text)
    }

    /// True when the key exists at `path`, even if its value is null.
    pub fn contains_path(&self, path: &[ConceptId]) -> bool {
        self.get_path(path).is_some()
    }

    /// Insert a value, creating (or replacing non-record) intermediate blocks.
    pub fn insert_path(&mut self, path: &[ConceptId], value: impl Into<FieldValue>) {
        let Some((last, parents)) = path.split_last() else {
            return;
        };
        let mut current = self;
        for id in parents {
            let slot = current
                .fields
                .entry(id.key())
                .or_insert_with(|| FieldValue::Record(ParticipantRecord::new()));
            if !matches!(slot, FieldValue::Record(_)) {
                *slot = FieldValue::Record(ParticipantRecord::new());
            }
            let FieldValue::Record(next) = slot else {
                return;
            };
            current = next;
        }
        current.fields.insert(last.key(), value.into());
    }

    /// Builder form of [`ParticipantRecord::insert_path`].
    #[must_use]
    pub fn with(mut self, path: &[ConceptId], value: impl Into<FieldValue>) -> Self {
        self.insert_path(path, value);
        self
    }

    /// The participant's Connect ID, rendered as a string.
    pub fn connect_id(&self) -> Option<String> {
        self.get_key(CONNECT_ID_KEY)
            .and_then(FieldValue::display_scalar)
    }

    pub fn token(&self) -> Option<&str> {
        self.get_key(TOKEN_KEY).and_then(FieldValue::as_text)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }
}

impl From<Map<String, Value>> for ParticipantRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            fields: map
                .into_iter()
                .map(|(key, value)| (key, FieldValue::from(value)))
                .collect(),
        }
    }
}

impl From<ParticipantRecord> for Map<String, Value> {
    fn from(record: ParticipantRecord) -> Self {
        record
            .fields
            .into_iter()
            .map(|(key, value)| (key, Value::from(value)))
            .collect()
    }
}

impl From<ParticipantRecord> for Value {
    fn from(record: ParticipantRecord) -> Self {
        Value::Object(record.into())
    }
}

impl TryFrom<Value> for ParticipantRecord {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self::from(map)),
            other => Err(ModelError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL: ConceptId = ConceptId::new(173836415);
    const FOLLOW_UP: ConceptId = ConceptId::new(266600170);
    const SETTING: ConceptId = ConceptId::new(650516960);

    #[test]
    fn nested_lookup_degrades_to_none() {
        let record = ParticipantRecord::from_json(r#"{"173836415": {"266600170": 5}}"#).unwrap();
        assert!(record.get_path(&[DETAIL, FOLLOW_UP, SETTING]).is_none());
        assert!(record.get_path(&[]).is_none());
        assert!(record.record_at(&[DETAIL, FOLLOW_UP]).is_none());
    }

    #[test]
    fn insert_path_builds_blocks() {
        let record = ParticipantRecord::new().with(&[DETAIL, FOLLOW_UP, SETTING], ConceptId::new(534621077));
        assert_eq!(
            record.code_at(&[DETAIL, FOLLOW_UP, SETTING]),
            Some(ConceptId::new(534621077))
        );
    }

    #[test]
    fn null_is_present_but_not_a_code() {
        let record = ParticipantRecord::from_json(r#"{"878865966": null}"#).unwrap();
        let flag = [ConceptId::new(878865966)];
        assert!(record.contains_path(&flag));
        assert!(record.code_at(&flag).is_none());
    }

    #[test]
    fn rejects_non_object_documents() {
        let err = ParticipantRecord::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, ModelError::NotAnObject { found: "array" }));
    }
}
