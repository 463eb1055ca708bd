use connect_concepts::ConceptError;
use connect_concepts::paths::{
    CANNOT_BE_VERIFIED, DUPLICATE, NOT_YET_VERIFIED, OUTREACH_TIMED_OUT, VERIFICATION_DATE,
    VERIFIED, VERIFIED_FLAG,
};
use connect_model::{ActivityStatus, Icon, NOT_AVAILABLE, Severity};
use tracing::warn;

use crate::context::DerivationContext;
use crate::outcome::{ActivityInfo, Verdict};
use crate::registry::ActivityDeriver;
use crate::rules::RuleChain;

pub const VERIFICATION: ActivityInfo = ActivityInfo::new("Enrollment", "Verification", "Verification");

pub fn verification_chain() -> RuleChain<Verdict> {
    RuleChain::new(Verdict::not_available())
        .rule("absent", |ctx| {
            Ok((!ctx.is_present(&VERIFIED_FLAG)?).then(Verdict::not_available))
        })
        .rule("verified", |ctx| {
            if ctx.is(&VERIFIED_FLAG, &VERIFIED)? {
                let date = ctx.date(&VERIFICATION_DATE)?;
                return Ok(Some(
                    Verdict::new("Verified", Icon::Check, Severity::Ok).with_date(date),
                ));
            }
            Ok(None)
        })
        .rule("not_yet_verified", |ctx| {
            Ok(ctx
                .is(&VERIFIED_FLAG, &NOT_YET_VERIFIED)?
                .then(|| Verdict::new("Not Yet Verified", Icon::Hashtag, Severity::Warning)))
        })
        .rule("not_verified", |ctx| {
            for code in [CANNOT_BE_VERIFIED, DUPLICATE, OUTREACH_TIMED_OUT] {
                if ctx.is(&VERIFIED_FLAG, &code)? {
                    let id = ctx.resolve(&code)?;
                    let text = ctx.label(id).unwrap_or(NOT_AVAILABLE);
                    return Ok(Some(Verdict::new(text, Icon::Times, Severity::Error)));
                }
            }
            Ok(None)
        })
        .rule("unrecognized", |ctx| {
            let code = ctx.code(&VERIFIED_FLAG)?;
            warn!(code = ?code, "unrecognized verification code");
            Ok(Some(Verdict::not_available()))
        })
}

pub struct VerificationDeriver {
    chain: RuleChain<Verdict>,
}

impl VerificationDeriver {
    pub fn new() -> Self {
        Self {
            chain: verification_chain(),
        }
    }
}

impl Default for VerificationDeriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityDeriver for VerificationDeriver {
    fn activity(&self) -> &ActivityInfo {
        &VERIFICATION
    }

    fn derive(&self, ctx: &DerivationContext<'_>) -> Result<ActivityStatus, ConceptError> {
        Ok(self.chain.evaluate(ctx)?.render(&VERIFICATION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect_concepts::default_concepts;
    use connect_model::{ConceptId, ParticipantRecord};

    const FLAG: ConceptId = ConceptId::new(821247024);

    fn derive(code: u64) -> ActivityStatus {
        let record = ParticipantRecord::new()
            .with(&[FLAG], ConceptId::new(code))
            .with(&[ConceptId::new(914594314)], "2024-03-01T09:00:00Z");
        let ctx = DerivationContext::new(&record, default_concepts());
        VerificationDeriver::new().derive(&ctx).unwrap()
    }

    #[test]
    fn verified_shows_verification_date() {
        let row = derive(197316935);
        assert_eq!(row.status_text, "Verified");
        assert_eq!(row.date, "03/01/2024");
    }

    #[test]
    fn duplicate_uses_registry_label() {
        let row = derive(922622075);
        assert_eq!(row.status_text, "Duplicate");
        assert_eq!(row.severity, Severity::Error);
        assert_eq!(row.date, NOT_AVAILABLE);
    }

    #[test]
    fn outreach_timeout_uses_registry_label() {
        assert_eq!(derive(160161595).status_text, "Outreach Timed Out");
    }
}
