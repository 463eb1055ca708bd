#![deny(unsafe_code)]

pub mod defaults;
pub mod doctor;
pub mod error;
pub mod hash;
pub mod paths;
pub mod registry;
pub mod source;

pub use crate::defaults::{
    CONCEPTS_ENV_VAR, EMBEDDED_CONCEPTS, concepts_path_from_env, default_concepts, load_concepts,
};
pub use crate::doctor::DoctorReport;
pub use crate::error::ConceptError;
pub use crate::paths::{CodeRef, FieldPath};
pub use crate::registry::{ConceptMap, VerifySummary};
pub use crate::source::ConceptSource;
