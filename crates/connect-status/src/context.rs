//! Borrowed inputs shared by every activity deriver.

use connect_concepts::{CodeRef, ConceptError, ConceptMap, FieldPath};
use connect_concepts::paths::YES;
use connect_model::{ConceptId, FieldValue, ParticipantRecord};

use crate::datetime::format_mdy_opt;

/// A participant snapshot paired with the concept map used to read it.
///
/// Every accessor resolves symbolic paths first, so an unknown field name is
/// an `Err`, while a missing or malformed value in the record is `Ok(None)`.
#[derive(Debug, Clone, Copy)]
pub struct DerivationContext<'a> {
    record: &'a ParticipantRecord,
    concepts: &'a ConceptMap,
}

impl<'a> DerivationContext<'a> {
    pub fn new(record: &'a ParticipantRecord, concepts: &'a ConceptMap) -> Self {
        Self { record, concepts }
    }

    pub fn record(&self) -> &'a ParticipantRecord {
        self.record
    }

    pub fn concepts(&self) -> &'a ConceptMap {
        self.concepts
    }

    pub fn value(&self, path: &FieldPath) -> Result<Option<&'a FieldValue>, ConceptError> {
        let ids = self.concepts.resolve_path(path)?;
        Ok(self.record.get_path(&ids))
    }

    /// True when the path holds a non-null value.
    pub fn is_present(&self, path: &FieldPath) -> Result<bool, ConceptError> {
        Ok(self.value(path)?.is_some_and(|value| !value.is_null()))
    }

    pub fn code(&self, path: &FieldPath) -> Result<Option<ConceptId>, ConceptError> {
        Ok(self.value(path)?.and_then(FieldValue::as_code))
    }

    pub fn text(&self, path: &FieldPath) -> Result<Option<&'a str>, ConceptError> {
        Ok(self.value(path)?.and_then(FieldValue::as_text))
    }

    pub fn resolve(&self, code: &CodeRef) -> Result<ConceptId, ConceptError> {
        self.concepts.resolve_ref(code)
    }

    /// True when the code stored at `path` equals `code`.
    pub fn is(&self, path: &FieldPath, code: &CodeRef) -> Result<bool, ConceptError> {
        let expected = self.resolve(code)?;
        Ok(self.code(path)? == Some(expected))
    }

    pub fn is_yes(&self, path: &FieldPath) -> Result<bool, ConceptError> {
        self.is(path, &YES)
    }

    /// True when any of `paths` holds `yes`. Every path is resolved.
    pub fn any_yes(&self, paths: &[FieldPath]) -> Result<bool, ConceptError> {
        let mut refused = false;
        for path in paths {
            refused |= self.is_yes(path)?;
        }
        Ok(refused)
    }

    /// The timestamp at `path` as `MM/DD/YYYY`, or `N/A`.
    pub fn date(&self, path: &FieldPath) -> Result<String, ConceptError> {
        Ok(format_mdy_opt(self.text(path)?))
    }

    pub fn label(&self, id: ConceptId) -> Option<&'a str> {
        self.concepts.label(id)
    }

    /// The label of `id` within the enumeration named after the field at
    /// `path`; codes from other groups have none.
    pub fn group_label(
        &self,
        path: &FieldPath,
        id: ConceptId,
    ) -> Result<Option<&'a str>, ConceptError> {
        let group = path.segments().last().copied().unwrap_or_default();
        let map = self
            .concepts
            .child_map(group)
            .ok_or_else(|| ConceptError::NotAGroup {
                name: group.to_string(),
            })?;
        Ok(map.label(id))
    }
}
