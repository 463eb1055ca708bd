//! Per-activity derivers.
//!
//! Each submodule owns the rule chain for one activity family. Every deriver
//! implements [`crate::ActivityDeriver`] and is registered in
//! [`crate::default_registry`] in display order.

pub mod enrollment;
pub mod milestones;
pub mod payment;
pub mod samples;
pub mod ssn;
pub mod surveys;
pub mod verification;

pub use enrollment::{EnrollmentDeriver, WithdrawalDeriver};
pub use milestones::MilestoneDeriver;
pub use payment::PaymentDeriver;
pub use samples::CollectionDeriver;
pub use ssn::SsnDeriver;
pub use surveys::SurveyDeriver;
pub use verification::VerificationDeriver;
