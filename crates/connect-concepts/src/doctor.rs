#![deny(unsafe_code)]

use crate::paths::{CODES, SCHEMA};
use crate::registry::{ConceptMap, VerifySummary};

#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorReport {
    pub schema: String,
    pub schema_version: u32,
    pub origin: String,
    pub release: Option<String>,
    pub fingerprint: String,
    pub counts: DoctorCounts,
    pub aliases: Vec<AliasEntry>,
    /// Schema paths or codes the map cannot resolve.
    pub unresolved: Vec<String>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorCounts {
    pub fields: usize,
    pub groups: usize,
    pub codes: usize,
    pub labels: usize,
    pub aliases: usize,
    pub schema_paths: usize,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct AliasEntry {
    pub alias: String,
    pub canonical: String,
    pub concept_id: u64,
}

impl DoctorReport {
    pub fn from_verify_summary(summary: &VerifySummary, map: &ConceptMap) -> Self {
        let mut unresolved: Vec<String> = SCHEMA
            .iter()
            .filter(|path| map.resolve_path(path).is_err())
            .map(ToString::to_string)
            .collect();
        unresolved.extend(
            CODES
                .iter()
                .filter(|code| map.resolve_ref(code).is_err())
                .map(ToString::to_string),
        );

        let mut aliases: Vec<AliasEntry> = map
            .fields()
            .into_iter()
            .filter_map(|(name, id)| {
                map.alias_of(name).map(|canonical| AliasEntry {
                    alias: name.to_string(),
                    canonical: canonical.to_string(),
                    concept_id: id.get(),
                })
            })
            .collect();
        aliases.sort_by(|a, b| a.alias.cmp(&b.alias));

        Self {
            schema: "connect-dashboard.concepts-doctor".to_string(),
            schema_version: 1,
            origin: summary.origin.clone(),
            release: summary.release.clone(),
            fingerprint: summary.fingerprint.clone(),
            counts: DoctorCounts {
                fields: summary.field_count,
                groups: summary.group_count,
                codes: summary.code_count,
                labels: summary.label_count,
                aliases: summary.alias_count,
                schema_paths: SCHEMA.len(),
            },
            aliases,
            unresolved,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.unresolved.is_empty()
    }
}
