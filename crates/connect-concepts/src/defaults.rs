//! The concept map shipped with the crate, and override resolution.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::ConceptError;
use crate::registry::{ConceptMap, VerifySummary};

/// Environment variable pointing at a concept map to use instead of the
/// embedded one.
pub const CONCEPTS_ENV_VAR: &str = "CONNECT_CONCEPTS_PATH";

/// Origin label reported for the embedded map.
pub const EMBEDDED_ORIGIN: &str = "<embedded>";

/// The concept map compiled into the binary.
pub const EMBEDDED_CONCEPTS: &str = include_str!("../data/concepts.toml");

static DEFAULT_CONCEPTS: OnceLock<ConceptMap> = OnceLock::new();

/// Returns the embedded concept map, parsed on first access.
///
/// The embedded source is verified by this crate's tests, so a failure here
/// means the binary itself was built from a broken mapping.
pub fn default_concepts() -> &'static ConceptMap {
    DEFAULT_CONCEPTS.get_or_init(|| {
        ConceptMap::verify_and_parse(EMBEDDED_CONCEPTS, EMBEDDED_ORIGIN)
            .map(|(map, _)| map)
            .expect("embedded concept map is valid")
    })
}

/// Path from `CONNECT_CONCEPTS_PATH`, if set and non-empty.
pub fn concepts_path_from_env() -> Option<PathBuf> {
    std::env::var_os(CONCEPTS_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Load a concept map for a process.
///
/// Resolution order:
/// 1. `path`, when given
/// 2. `CONNECT_CONCEPTS_PATH`
/// 3. the embedded map
pub fn load_concepts(path: Option<&Path>) -> Result<(ConceptMap, VerifySummary), ConceptError> {
    match path.map(Path::to_path_buf).or_else(concepts_path_from_env) {
        Some(path) => ConceptMap::verify_and_load(&path),
        None => ConceptMap::verify_and_parse(EMBEDDED_CONCEPTS, EMBEDDED_ORIGIN),
    }
}
