use connect_concepts::ConceptError;
use connect_concepts::paths::{SSN_FULL_DATE, SSN_FULL_FLAG, SSN_PARTIAL_DATE, SSN_PARTIAL_FLAG};
use connect_model::{ActivityStatus, Icon, Severity};

use crate::context::DerivationContext;
use crate::outcome::{ActivityInfo, ProgressLabels, Verdict};
use crate::refusal;
use crate::registry::ActivityDeriver;
use crate::rules::RuleChain;

pub const SSN: ActivityInfo = ActivityInfo::new("Baseline", "Survey", "SSN");

/// Full SSN outranks partial; a present flag without `yes` is not received.
pub fn ssn_chain() -> RuleChain<Verdict> {
    RuleChain::new(Verdict::not_available())
        .rule("refused", |ctx| {
            Ok(ctx
                .any_yes(refusal::FUTURE_SURVEY)?
                .then(|| Verdict::refused(ProgressLabels::SURVEY.refused)))
        })
        .rule("full", |ctx| {
            if ctx.is_yes(&SSN_FULL_FLAG)? {
                let date = ctx.date(&SSN_FULL_DATE)?;
                return Ok(Some(
                    Verdict::new("Full SSN Received", Icon::Check, Severity::Ok).with_date(date),
                ));
            }
            Ok(None)
        })
        .rule("partial", |ctx| {
            if ctx.is_yes(&SSN_PARTIAL_FLAG)? {
                let date = ctx.date(&SSN_PARTIAL_DATE)?;
                return Ok(Some(
                    Verdict::new("Partial SSN Received", Icon::Check, Severity::Ok)
                        .with_date(date),
                ));
            }
            Ok(None)
        })
        .rule("not_received", |ctx| {
            let present = ctx.is_present(&SSN_FULL_FLAG)? || ctx.is_present(&SSN_PARTIAL_FLAG)?;
            Ok(present.then(|| Verdict::new("Not Received", Icon::Times, Severity::Error)))
        })
}

pub struct SsnDeriver {
    chain: RuleChain<Verdict>,
}

impl SsnDeriver {
    pub fn new() -> Self {
        Self { chain: ssn_chain() }
    }
}

impl Default for SsnDeriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityDeriver for SsnDeriver {
    fn activity(&self) -> &ActivityInfo {
        &SSN
    }

    fn derive(&self, ctx: &DerivationContext<'_>) -> Result<ActivityStatus, ConceptError> {
        Ok(self.chain.evaluate(ctx)?.render(&SSN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect_concepts::default_concepts;
    use connect_model::{ConceptId, NOT_AVAILABLE, ParticipantRecord};

    const YES: ConceptId = ConceptId::new(353358909);
    const NO: ConceptId = ConceptId::new(104430631);

    fn derive(record: &ParticipantRecord) -> ActivityStatus {
        SsnDeriver::new()
            .derive(&DerivationContext::new(record, default_concepts()))
            .unwrap()
    }

    #[test]
    fn full_outranks_partial() {
        let record = ParticipantRecord::new()
            .with(&[ConceptId::new(311580100)], YES)
            .with(&[ConceptId::new(454067894)], "2024-04-04T00:00:00Z")
            .with(&[ConceptId::new(914639140)], YES);
        let row = derive(&record);
        assert_eq!(row.status_text, "Full SSN Received");
        assert_eq!(row.date, "04/04/2024");
    }

    #[test]
    fn negative_flags_are_not_received() {
        let record = ParticipantRecord::new().with(&[ConceptId::new(914639140)], NO);
        assert_eq!(derive(&record).status_text, "Not Received");
    }

    #[test]
    fn no_flags_is_not_available() {
        let row = derive(&ParticipantRecord::new());
        assert_eq!(row.status_text, NOT_AVAILABLE);
        assert_eq!(row.severity, Severity::Error);
    }
}
