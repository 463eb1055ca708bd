//! Backend collaborator for the site manager dashboard.
//!
//! Configuration, participant lookup, staged edits and the mutation
//! endpoints. Requests are blocking and never retried; callers decide what to
//! do with a [`ClientError`] using [`ClientError::is_retryable`].

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod requests;
pub mod response;
pub mod session;

pub use client::DashboardClient;
pub use config::{API_BASE_ENV_VAR, API_TOKEN_ENV_VAR, DEFAULT_TIMEOUT_SECS, DashboardConfig};
pub use error::{ClientError, Result};
pub use query::ParticipantQuery;
pub use requests::{IncentiveEligibilityRequest, PaymentRound, ResetSurveyRequest, SurveyKind};
pub use response::{ApiResponse, parse_participants};
pub use session::EditSession;
