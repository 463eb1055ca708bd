//! Gate for the baseline incentive eligibility update.
//!
//! Both the roundup eligibility flag and the NORC eligibility flag must still
//! read `no` before the update may be submitted. If either already reads
//! `yes` the participant has been marked eligible and further updates are
//! disabled.

use connect_concepts::ConceptError;
use connect_concepts::paths::{
    BASELINE_ELIGIBLE, BASELINE_ELIGIBLE_DATE, BASELINE_NORC_ELIGIBLE, NO,
};
use serde::Serialize;

use crate::context::DerivationContext;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum IncentiveGate {
    /// Both flags read `no`; the update may be submitted.
    Permitted,
    /// Already marked eligible on `date` (`MM/DD/YYYY` or `N/A`).
    AlreadyEligible { date: String },
    /// A flag is missing or holds an unexpected code.
    Unavailable,
}

impl IncentiveGate {
    pub fn evaluate(ctx: &DerivationContext<'_>) -> Result<Self, ConceptError> {
        if ctx.is_yes(&BASELINE_ELIGIBLE)? || ctx.is_yes(&BASELINE_NORC_ELIGIBLE)? {
            let date = ctx.date(&BASELINE_ELIGIBLE_DATE)?;
            return Ok(Self::AlreadyEligible { date });
        }
        if ctx.is(&BASELINE_ELIGIBLE, &NO)? && ctx.is(&BASELINE_NORC_ELIGIBLE, &NO)? {
            return Ok(Self::Permitted);
        }
        Ok(Self::Unavailable)
    }

    pub fn is_permitted(&self) -> bool {
        matches!(self, Self::Permitted)
    }

    /// Text shown next to the update control.
    pub fn note(&self) -> String {
        match self {
            Self::Permitted => {
                "Participant is not yet eligible for the baseline incentive.".to_string()
            }
            Self::AlreadyEligible { date } => {
                format!("Participant is already eligible for incentive. Date of eligibility: {date}")
            }
            Self::Unavailable => {
                "Incentive eligibility cannot be updated for this participant.".to_string()
            }
        }
    }
}
