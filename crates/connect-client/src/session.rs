//! Staged participant edits.
//!
//! An [`EditSession`] owns one participant snapshot and the changes staged
//! against it. Nothing is global: a caller that wants to know whether there
//! are unsaved edits asks the session it holds.

use std::collections::BTreeMap;

use connect_concepts::ConceptMap;
use connect_model::{ConceptId, FieldValue, ParticipantRecord};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ClientError, Result};

#[derive(Debug, Clone, PartialEq)]
struct StagedChange {
    path: Vec<ConceptId>,
    value: FieldValue,
}

impl StagedChange {
    /// Nested fields are submitted under dotted concept-ID keys.
    fn key(&self) -> String {
        self.path
            .iter()
            .map(|id| id.key())
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[derive(Debug, Clone)]
pub struct EditSession {
    snapshot: ParticipantRecord,
    staged: BTreeMap<String, StagedChange>,
}

impl EditSession {
    pub fn new(snapshot: ParticipantRecord) -> Self {
        Self {
            snapshot,
            staged: BTreeMap::new(),
        }
    }

    pub fn snapshot(&self) -> &ParticipantRecord {
        &self.snapshot
    }

    /// Stage `value` for the symbolic `field` (dotted for grouped fields,
    /// e.g. `paymentRoundup.baselinePayment.paymentIssued`).
    ///
    /// Returns `false` when the value equals the snapshot, in which case any
    /// earlier change to the same field is dropped.
    pub fn stage(
        &mut self,
        concepts: &ConceptMap,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> Result<bool> {
        let path = resolve_dotted(concepts, field)?;
        let value = value.into();
        if self.snapshot.get_path(&path) == Some(&value) {
            self.staged.remove(field);
            debug!(field, "edit matches snapshot");
            return Ok(false);
        }
        debug!(field, "staged edit");
        self.staged
            .insert(field.to_string(), StagedChange { path, value });
        Ok(true)
    }

    /// Drop the staged change for `field`. Returns whether one existed.
    pub fn discard(&mut self, field: &str) -> bool {
        self.staged.remove(field).is_some()
    }

    pub fn discard_all(&mut self) {
        self.staged.clear();
    }

    pub fn has_unsaved_changes(&self) -> bool {
        !self.staged.is_empty()
    }

    /// Symbolic names of the staged fields, sorted.
    pub fn changed_fields(&self) -> Vec<&str> {
        self.staged.keys().map(String::as_str).collect()
    }

    /// The staged value for `field`, if any.
    pub fn staged_value(&self, field: &str) -> Option<&FieldValue> {
        self.staged.get(field).map(|change| &change.value)
    }

    /// Build the `updateParticipantData` body:
    /// `{"data": {"<conceptId>": value, ..., "token": "<participant token>"}}`.
    pub fn to_payload(&self) -> Result<Value> {
        if self.staged.is_empty() {
            return Err(ClientError::NothingToSubmit);
        }
        let token = self.snapshot.token().ok_or(ClientError::MissingToken)?;
        let mut data: Map<String, Value> = self
            .staged
            .values()
            .map(|change| (change.key(), Value::from(change.value.clone())))
            .collect();
        data.insert("token".to_string(), Value::String(token.to_string()));

        let mut body = Map::new();
        body.insert("data".to_string(), Value::Object(data));
        Ok(Value::Object(body))
    }

    /// Replace the snapshot with the record the backend now holds and clear
    /// the staged changes.
    pub fn commit(&mut self, fresh: ParticipantRecord) {
        self.snapshot = fresh;
        self.staged.clear();
    }
}

fn resolve_dotted(concepts: &ConceptMap, field: &str) -> Result<Vec<ConceptId>> {
    field
        .split('.')
        .map(|segment| concepts.resolve(segment).map_err(ClientError::from))
        .collect()
}
