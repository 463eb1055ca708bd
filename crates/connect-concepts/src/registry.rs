#![deny(unsafe_code)]

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use connect_model::ConceptId;
use tracing::{debug, warn};

use crate::error::ConceptError;
use crate::hash::sha256_hex;
use crate::paths::{CodeRef, FieldPath};
use crate::source::{ConceptSource, GroupSource, SCHEMA_NAME, SCHEMA_VERSION};

#[derive(Debug, Clone, serde::Serialize)]
pub struct VerifySummary {
    pub origin: String,
    pub schema: String,
    pub schema_version: u32,
    pub release: Option<String>,
    pub fingerprint: String,
    pub field_count: usize,
    pub group_count: usize,
    pub code_count: usize,
    pub label_count: usize,
    pub alias_count: usize,
}

#[derive(Debug, Clone)]
enum ConceptEntry {
    Field(ConceptId),
    Group {
        id: Option<ConceptId>,
        map: ConceptMap,
    },
}

/// Immutable lookup from symbolic field names to concept IDs.
///
/// Nested enumerations (kit types, kit statuses, survey status codes) are
/// exposed as child maps with the same interface. Each map also carries the
/// reverse labels for the codes it contains.
#[derive(Debug, Clone, Default)]
pub struct ConceptMap {
    scope: String,
    entries: HashMap<String, ConceptEntry>,
    labels: HashMap<ConceptId, String>,
    aliases: HashMap<String, String>,
}

impl ConceptMap {
    /// Read, verify and build a concept map from a TOML file.
    pub fn verify_and_load(path: &Path) -> Result<(Self, VerifySummary), ConceptError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConceptError::io(path, e))?;
        Self::verify_and_parse(&text, &path.display().to_string())
    }

    /// Parse, verify and build a concept map from TOML text.
    ///
    /// `origin` only labels errors and the summary.
    pub fn verify_and_parse(text: &str, origin: &str) -> Result<(Self, VerifySummary), ConceptError> {
        let source: ConceptSource = toml::from_str(text).map_err(|e| ConceptError::Toml {
            origin: origin.to_string(),
            source: e,
        })?;
        let mut summary = verify(&source)?;
        summary.origin = origin.to_string();
        summary.fingerprint = sha256_hex(text.as_bytes());

        let map = Self::build(&source)?;
        debug!(
            origin,
            fields = summary.field_count,
            groups = summary.group_count,
            "concept map loaded"
        );
        Ok((map, summary))
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConceptError> {
        Self::verify_and_parse(text, "<inline>").map(|(map, _)| map)
    }

    fn build(source: &ConceptSource) -> Result<Self, ConceptError> {
        let labels = parse_labels(&source.labels)?;

        let mut entries: HashMap<String, ConceptEntry> = source
            .fields
            .iter()
            .map(|(name, id)| (name.clone(), ConceptEntry::Field(ConceptId::new(*id))))
            .collect();
        for (name, group) in &source.groups {
            entries.insert(name.clone(), build_group(name, group, &labels));
        }
        for (alias, canonical) in &source.aliases {
            let id = source
                .fields
                .get(canonical)
                .copied()
                .map(ConceptId::new)
                .ok_or_else(|| ConceptError::InvalidAlias {
                    alias: alias.clone(),
                    message: format!("unknown canonical field '{canonical}'"),
                })?;
            entries.insert(alias.clone(), ConceptEntry::Field(id));
        }

        Ok(Self {
            scope: String::new(),
            entries,
            labels,
            aliases: source.aliases.clone().into_iter().collect(),
        })
    }

    /// Resolve a symbolic name to its concept ID.
    pub fn resolve(&self, name: &str) -> Result<ConceptId, ConceptError> {
        match self.entries.get(name) {
            Some(ConceptEntry::Field(id)) => Ok(*id),
            Some(ConceptEntry::Group { id: Some(id), .. }) => Ok(*id),
            Some(ConceptEntry::Group { id: None, .. }) => Err(ConceptError::NotAField {
                name: self.qualify(name),
            }),
            None => Err(ConceptError::unknown(self.qualify(name))),
        }
    }

    /// Reverse label for a code, if one is registered.
    pub fn label(&self, id: ConceptId) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }

    /// The nested enumeration registered under `name`.
    pub fn child_map(&self, name: &str) -> Option<&ConceptMap> {
        match self.entries.get(name) {
            Some(ConceptEntry::Group { map, .. }) => Some(map),
            _ => None,
        }
    }

    /// Resolve `value` inside the group `group`.
    pub fn resolve_code(&self, group: &str, value: &str) -> Result<ConceptId, ConceptError> {
        match self.entries.get(group) {
            Some(ConceptEntry::Group { map, .. }) => map.resolve(value),
            Some(ConceptEntry::Field(_)) => Err(ConceptError::NotAGroup {
                name: self.qualify(group),
            }),
            None => Err(ConceptError::unknown(self.qualify(group))),
        }
    }

    pub fn resolve_ref(&self, code: &CodeRef) -> Result<ConceptId, ConceptError> {
        match code.group() {
            Some(group) => self.resolve_code(group, code.name()),
            None => self.resolve(code.name()),
        }
    }

    /// Resolve every segment of a record path.
    pub fn resolve_path(&self, path: &FieldPath) -> Result<Vec<ConceptId>, ConceptError> {
        path.segments()
            .iter()
            .map(|segment| self.resolve(segment))
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The canonical name an alias points at.
    pub fn alias_of(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// Dotted path of this map within the root map; empty for the root.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All names that resolve to an ID, sorted by name.
    pub fn fields(&self) -> Vec<(&str, ConceptId)> {
        let mut out: Vec<(&str, ConceptId)> = self
            .entries
            .iter()
            .filter_map(|(name, entry)| match entry {
                ConceptEntry::Field(id) => Some((name.as_str(), *id)),
                ConceptEntry::Group { id, .. } => id.map(|id| (name.as_str(), id)),
            })
            .collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }

    pub fn group_names(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .entries
            .iter()
            .filter(|(_, entry)| matches!(entry, ConceptEntry::Group { .. }))
            .map(|(name, _)| name.as_str())
            .collect();
        out.sort_unstable();
        out
    }

    fn qualify(&self, name: &str) -> String {
        if self.scope.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.scope, name)
        }
    }
}

fn build_group(
    scope: &str,
    group: &GroupSource,
    labels: &HashMap<ConceptId, String>,
) -> ConceptEntry {
    let mut entries: HashMap<String, ConceptEntry> = group
        .values
        .iter()
        .map(|(name, id)| (name.clone(), ConceptEntry::Field(ConceptId::new(*id))))
        .collect();
    for (name, child) in &group.groups {
        entries.insert(
            name.clone(),
            build_group(&format!("{scope}.{name}"), child, labels),
        );
    }

    let mut scoped_labels = HashMap::new();
    collect_group_labels(group, labels, &mut scoped_labels);

    ConceptEntry::Group {
        id: group.id.map(ConceptId::new),
        map: ConceptMap {
            scope: scope.to_string(),
            entries,
            labels: scoped_labels,
            aliases: HashMap::new(),
        },
    }
}

fn collect_group_labels(
    group: &GroupSource,
    labels: &HashMap<ConceptId, String>,
    out: &mut HashMap<ConceptId, String>,
) {
    for id in group.values.values().chain(group.id.iter()) {
        let id = ConceptId::new(*id);
        if let Some(label) = labels.get(&id) {
            out.insert(id, label.clone());
        }
    }
    for child in group.groups.values() {
        collect_group_labels(child, labels, out);
    }
}

fn parse_labels(raw: &BTreeMap<String, String>) -> Result<HashMap<ConceptId, String>, ConceptError> {
    raw.iter()
        .map(|(code, label)| {
            code.parse::<ConceptId>()
                .map(|id| (id, label.clone()))
                .map_err(|_| ConceptError::InvalidLabelCode { code: code.clone() })
        })
        .collect()
}

/// Validate a concept source before it is built.
///
/// Concept IDs must be unique across every field, group and group value;
/// the only sanctioned sharing is through `[aliases]`, which must point at a
/// plain field.
pub fn verify(source: &ConceptSource) -> Result<VerifySummary, ConceptError> {
    if source.registry.schema != SCHEMA_NAME {
        return Err(ConceptError::InvalidSchema {
            message: format!("unsupported schema: {}", source.registry.schema),
        });
    }
    if source.registry.schema_version != SCHEMA_VERSION {
        return Err(ConceptError::InvalidSchema {
            message: format!(
                "unsupported schema_version: {}",
                source.registry.schema_version
            ),
        });
    }

    reject_shadowed_names(&source.fields, &source.groups, None)?;

    let mut seen: BTreeMap<u64, String> = BTreeMap::new();
    let mut code_count = 0usize;
    let mut group_count = 0usize;
    for (name, id) in &source.fields {
        claim(&mut seen, *id, name)?;
    }
    for (name, group) in &source.groups {
        claim_group(&mut seen, name, group, &mut group_count, &mut code_count)?;
    }

    for (alias, canonical) in &source.aliases {
        if source.fields.contains_key(alias) || source.groups.contains_key(alias) {
            return Err(ConceptError::InvalidAlias {
                alias: alias.clone(),
                message: "name is already defined".to_string(),
            });
        }
        if !source.fields.contains_key(canonical) {
            return Err(ConceptError::InvalidAlias {
                alias: alias.clone(),
                message: format!("unknown canonical field '{canonical}'"),
            });
        }
    }

    let labels = parse_labels(&source.labels)?;
    for id in labels.keys() {
        if !seen.contains_key(&id.get()) {
            warn!(code = %id, "label registered for a code with no symbolic name");
        }
    }

    Ok(VerifySummary {
        origin: String::new(),
        schema: source.registry.schema.clone(),
        schema_version: source.registry.schema_version,
        release: source.registry.release.clone(),
        fingerprint: String::new(),
        field_count: source.fields.len(),
        group_count,
        code_count,
        label_count: labels.len(),
        alias_count: source.aliases.len(),
    })
}

fn claim(seen: &mut BTreeMap<u64, String>, id: u64, name: &str) -> Result<(), ConceptError> {
    if let Some(first) = seen.get(&id) {
        return Err(ConceptError::DuplicateConceptId {
            id: ConceptId::new(id),
            first: first.clone(),
            second: name.to_string(),
        });
    }
    seen.insert(id, name.to_string());
    Ok(())
}

/// A name may be a plain entry or a nested group within one scope, never both.
fn reject_shadowed_names(
    plain: &BTreeMap<String, u64>,
    groups: &BTreeMap<String, GroupSource>,
    scope: Option<&str>,
) -> Result<(), ConceptError> {
    match plain.keys().find(|name| groups.contains_key(*name)) {
        Some(name) => Err(ConceptError::DuplicateName {
            name: match scope {
                Some(scope) => format!("{scope}.{name}"),
                None => name.clone(),
            },
        }),
        None => Ok(()),
    }
}

fn claim_group(
    seen: &mut BTreeMap<u64, String>,
    scope: &str,
    group: &GroupSource,
    group_count: &mut usize,
    code_count: &mut usize,
) -> Result<(), ConceptError> {
    *group_count += 1;
    reject_shadowed_names(&group.values, &group.groups, Some(scope))?;
    if let Some(id) = group.id {
        claim(seen, id, scope)?;
    }
    for (name, id) in &group.values {
        claim(seen, *id, &format!("{scope}.{name}"))?;
        *code_count += 1;
    }
    for (name, child) in &group.groups {
        claim_group(seen, &format!("{scope}.{name}"), child, group_count, code_count)?;
    }
    Ok(())
}
