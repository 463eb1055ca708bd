#![deny(unsafe_code)]

//! Status derivation for participant records.
//!
//! Every activity row is a pure projection of one participant snapshot and
//! the concept map. Precedence per activity is an explicit
//! [`rules::RuleChain`]; missing or malformed record data degrades to `N/A`
//! rows, and only an unknown symbolic field name is an error.

pub mod activities;
pub mod context;
pub mod datetime;
pub mod incentive;
pub mod outcome;
pub mod refusal;
pub mod registry;
pub mod rules;

pub use context::DerivationContext;
pub use datetime::format_mdy;
pub use incentive::IncentiveGate;
pub use outcome::{ActivityInfo, Collection, Progress, Setting, Verdict};
pub use registry::{ActivityDeriver, DeriverRegistry, default_registry, derive_all, summarize};
pub use rules::{Decision, RuleChain};
