//! Baseline payment eligibility and its issued/declined annotation.

use connect_concepts::ConceptError;
use connect_concepts::paths::{
    BASELINE_DECLINED, BASELINE_DECLINED_DATE, BASELINE_ELIGIBLE, BASELINE_ELIGIBLE_DATE,
    BASELINE_ISSUED, BASELINE_ISSUED_DATE, NO,
};
use connect_model::{ActivityStatus, Icon, NOT_AVAILABLE, Severity};

use crate::context::DerivationContext;
use crate::outcome::{ActivityInfo, Verdict};
use crate::registry::ActivityDeriver;
use crate::rules::RuleChain;

pub const PAYMENT: ActivityInfo = ActivityInfo::new("Baseline", "Payment", "Payment");

pub fn eligibility_chain() -> RuleChain<Verdict> {
    RuleChain::new(Verdict::not_available())
        .rule("eligible", |ctx| {
            if ctx.is_yes(&BASELINE_ELIGIBLE)? {
                let date = ctx.date(&BASELINE_ELIGIBLE_DATE)?;
                return Ok(Some(
                    Verdict::new("Eligible", Icon::Check, Severity::Ok).with_date(date),
                ));
            }
            Ok(None)
        })
        .rule("not_eligible", |ctx| {
            Ok(ctx
                .is(&BASELINE_ELIGIBLE, &NO)?
                .then(|| Verdict::new("Not Eligible", Icon::Times, Severity::Error)))
        })
}

/// `Issued <date>`, else `Declined <date>`, else `N/A`.
pub fn annotation_chain() -> RuleChain<String> {
    RuleChain::new(NOT_AVAILABLE.to_string())
        .rule("issued", |ctx| {
            if ctx.is_yes(&BASELINE_ISSUED)? {
                return Ok(Some(format!("Issued {}", ctx.date(&BASELINE_ISSUED_DATE)?)));
            }
            Ok(None)
        })
        .rule("declined", |ctx| {
            if ctx.is_yes(&BASELINE_DECLINED)? {
                return Ok(Some(format!(
                    "Declined {}",
                    ctx.date(&BASELINE_DECLINED_DATE)?
                )));
            }
            Ok(None)
        })
}

pub struct PaymentDeriver {
    eligibility: RuleChain<Verdict>,
    annotation: RuleChain<String>,
}

impl PaymentDeriver {
    pub fn new() -> Self {
        Self {
            eligibility: eligibility_chain(),
            annotation: annotation_chain(),
        }
    }
}

impl Default for PaymentDeriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityDeriver for PaymentDeriver {
    fn activity(&self) -> &ActivityInfo {
        &PAYMENT
    }

    fn derive(&self, ctx: &DerivationContext<'_>) -> Result<ActivityStatus, ConceptError> {
        let verdict = self.eligibility.evaluate(ctx)?;
        let extra = self.annotation.evaluate(ctx)?;
        Ok(verdict.render(&PAYMENT).with_extra(extra))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect_concepts::default_concepts;
    use connect_model::{ConceptId, ParticipantRecord};

    const ROUNDUP: ConceptId = ConceptId::new(130371375);
    const BASELINE: ConceptId = ConceptId::new(266600170);
    const YES: ConceptId = ConceptId::new(353358909);

    #[test]
    fn issued_outranks_declined() {
        let record = ParticipantRecord::new()
            .with(&[ROUNDUP, BASELINE, ConceptId::new(731498909)], YES)
            .with(&[ROUNDUP, BASELINE, ConceptId::new(372189734)], "2024-01-10T00:00:00Z")
            .with(&[ROUNDUP, BASELINE, ConceptId::new(861639549)], YES)
            .with(&[ROUNDUP, BASELINE, ConceptId::new(297462035)], "2024-02-10T00:00:00Z")
            .with(&[ROUNDUP, BASELINE, ConceptId::new(648936790)], YES)
            .with(&[ROUNDUP, BASELINE, ConceptId::new(380157640)], "2024-03-10T00:00:00Z");
        let ctx = DerivationContext::new(&record, default_concepts());
        let row = PaymentDeriver::new().derive(&ctx).unwrap();
        assert_eq!(row.status_text, "Eligible");
        assert_eq!(row.date, "01/10/2024");
        assert_eq!(row.extra, "Issued 02/10/2024");
    }

    #[test]
    fn declined_without_issue() {
        let record = ParticipantRecord::new()
            .with(&[ROUNDUP, BASELINE, ConceptId::new(648936790)], YES)
            .with(&[ROUNDUP, BASELINE, ConceptId::new(380157640)], "2024-03-10T00:00:00Z");
        let ctx = DerivationContext::new(&record, default_concepts());
        let row = PaymentDeriver::new().derive(&ctx).unwrap();
        assert_eq!(row.status_text, NOT_AVAILABLE);
        assert_eq!(row.extra, "Declined 03/10/2024");
    }
}
