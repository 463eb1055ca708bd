#![deny(unsafe_code)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const SCHEMA_NAME: &str = "connect-dashboard.concept-map";
pub const SCHEMA_VERSION: u32 = 1;

/// The static configuration document a [`crate::ConceptMap`] is built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptSource {
    pub registry: RegistryHeader,
    #[serde(default)]
    pub fields: BTreeMap<String, u64>,
    #[serde(default)]
    pub groups: BTreeMap<String, GroupSource>,
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryHeader {
    pub schema: String,
    pub schema_version: u32,
    #[serde(default)]
    pub release: Option<String>,
}

/// A nested enumeration, optionally carrying the concept ID of the field
/// whose values it enumerates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupSource {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub values: BTreeMap<String, u64>,
    #[serde(default)]
    pub groups: BTreeMap<String, GroupSource>,
}
