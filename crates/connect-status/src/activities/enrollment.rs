//! Enrollment status and withdrawal state.
//!
//! Enrollment status is a single exclusive code; the backend guarantees the
//! exclusivity, so the row is a direct label lookup. Withdrawal combines the
//! explicit withdrawal flags with the participation status code.

use connect_concepts::ConceptError;
use connect_concepts::paths::{
    DESTROY_DATA, DESTROY_DATA_DATE, ENROLLMENT_CANNOT_BE_VERIFIED, ENROLLMENT_STATUS, NO_REFUSAL,
    PARTICIPATION_STATUS, REVOKE_HIPAA, REVOKE_HIPAA_DATE, WITHDRAW_CONSENT,
    WITHDRAW_CONSENT_DATE,
};
use connect_model::{ActivityStatus, Icon, Severity};
use tracing::warn;

use crate::context::DerivationContext;
use crate::outcome::{ActivityInfo, Verdict};
use crate::registry::ActivityDeriver;
use crate::rules::RuleChain;

pub const ENROLLMENT: ActivityInfo = ActivityInfo::new("Enrollment", "Enrollment", "Enrollment Status");
pub const WITHDRAWAL: ActivityInfo = ActivityInfo::new("Enrollment", "Withdrawal", "Withdrawal");

pub fn enrollment_verdict(ctx: &DerivationContext<'_>) -> Result<Verdict, ConceptError> {
    let Some(code) = ctx.code(&ENROLLMENT_STATUS)? else {
        return Ok(Verdict::not_available());
    };
    let Some(label) = ctx.group_label(&ENROLLMENT_STATUS, code)? else {
        warn!(code = %code, "enrollment status code has no label");
        return Ok(Verdict::not_available());
    };
    if code == ctx.resolve(&ENROLLMENT_CANNOT_BE_VERIFIED)? {
        return Ok(Verdict::new(label, Icon::Times, Severity::Error));
    }
    Ok(Verdict::new(label, Icon::Check, Severity::Ok))
}

#[derive(Debug, Default)]
pub struct EnrollmentDeriver;

impl ActivityDeriver for EnrollmentDeriver {
    fn activity(&self) -> &ActivityInfo {
        &ENROLLMENT
    }

    fn derive(&self, ctx: &DerivationContext<'_>) -> Result<ActivityStatus, ConceptError> {
        Ok(enrollment_verdict(ctx)?.render(&ENROLLMENT))
    }
}

pub fn withdrawal_chain() -> RuleChain<Verdict> {
    RuleChain::new(Verdict::not_available())
        .rule("withdrew_consent", |ctx| {
            if ctx.is_yes(&WITHDRAW_CONSENT)? {
                let date = ctx.date(&WITHDRAW_CONSENT_DATE)?;
                return Ok(Some(
                    Verdict::new("Withdrew Consent", Icon::Times, Severity::Warning).with_date(date),
                ));
            }
            Ok(None)
        })
        .rule("data_destroyed", |ctx| {
            if ctx.is_yes(&DESTROY_DATA)? {
                let date = ctx.date(&DESTROY_DATA_DATE)?;
                return Ok(Some(
                    Verdict::new("Data Destroyed", Icon::Times, Severity::Warning).with_date(date),
                ));
            }
            Ok(None)
        })
        .rule("revoked_hipaa", |ctx| {
            if ctx.is_yes(&REVOKE_HIPAA)? {
                let date = ctx.date(&REVOKE_HIPAA_DATE)?;
                return Ok(Some(
                    Verdict::new("Revoked HIPAA", Icon::Times, Severity::Warning).with_date(date),
                ));
            }
            Ok(None)
        })
        .rule("participation_status", |ctx| {
            let Some(code) = ctx.code(&PARTICIPATION_STATUS)? else {
                return Ok(None);
            };
            let Some(label) = ctx.group_label(&PARTICIPATION_STATUS, code)? else {
                warn!(code = %code, "participation status code has no label");
                return Ok(None);
            };
            if code == ctx.resolve(&NO_REFUSAL)? {
                return Ok(Some(Verdict::new(label, Icon::Check, Severity::Ok)));
            }
            Ok(Some(Verdict::new(label, Icon::Hashtag, Severity::Warning)))
        })
}

pub struct WithdrawalDeriver {
    chain: RuleChain<Verdict>,
}

impl WithdrawalDeriver {
    pub fn new() -> Self {
        Self {
            chain: withdrawal_chain(),
        }
    }
}

impl Default for WithdrawalDeriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityDeriver for WithdrawalDeriver {
    fn activity(&self) -> &ActivityInfo {
        &WITHDRAWAL
    }

    fn derive(&self, ctx: &DerivationContext<'_>) -> Result<ActivityStatus, ConceptError> {
        Ok(self.chain.evaluate(ctx)?.render(&WITHDRAWAL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect_concepts::default_concepts;
    use connect_model::{ConceptId, NOT_AVAILABLE, ParticipantRecord};

    const YES: ConceptId = ConceptId::new(353358909);

    #[test]
    fn enrollment_label_lookup() {
        let record = ParticipantRecord::new()
            .with(&[ConceptId::new(506648060)], ConceptId::new(197035726));
        let ctx = DerivationContext::new(&record, default_concepts());
        let row = EnrollmentDeriver.derive(&ctx).unwrap();
        assert_eq!(row.status_text, "Fully Enrolled");
        assert_eq!(row.severity, Severity::Ok);
    }

    #[test]
    fn unknown_enrollment_code_is_not_available() {
        let record =
            ParticipantRecord::new().with(&[ConceptId::new(506648060)], ConceptId::new(42));
        let ctx = DerivationContext::new(&record, default_concepts());
        assert_eq!(EnrollmentDeriver.derive(&ctx).unwrap().status_text, NOT_AVAILABLE);
    }

    #[test]
    fn codes_from_other_groups_have_no_enrollment_label() {
        let record = ParticipantRecord::new().with(&[ConceptId::new(506648060)], YES);
        let ctx = DerivationContext::new(&record, default_concepts());
        let row = EnrollmentDeriver.derive(&ctx).unwrap();
        assert_eq!(row.status_text, NOT_AVAILABLE);
        assert_eq!(row.severity, Severity::Error);
    }

    #[test]
    fn codes_from_other_groups_have_no_participation_label() {
        let record = ParticipantRecord::new().with(&[ConceptId::new(912301837)], YES);
        let ctx = DerivationContext::new(&record, default_concepts());
        let row = WithdrawalDeriver::new().derive(&ctx).unwrap();
        assert_eq!(row.status_text, NOT_AVAILABLE);
        assert_eq!(row.severity, Severity::Error);
    }

    #[test]
    fn withdrawal_outranks_participation_status() {
        let record = ParticipantRecord::new()
            .with(&[ConceptId::new(912301837)], ConceptId::new(208325815))
            .with(&[ConceptId::new(831041022)], YES)
            .with(&[ConceptId::new(747006172)], YES)
            .with(&[ConceptId::new(659990606)], "2024-05-06T00:00:00Z");
        let ctx = DerivationContext::new(&record, default_concepts());
        let row = WithdrawalDeriver::new().derive(&ctx).unwrap();
        assert_eq!(row.status_text, "Withdrew Consent");
        assert_eq!(row.date, "05/06/2024");
    }

    #[test]
    fn no_refusal_is_ok() {
        let record = ParticipantRecord::new()
            .with(&[ConceptId::new(912301837)], ConceptId::new(208325815));
        let ctx = DerivationContext::new(&record, default_concepts());
        let row = WithdrawalDeriver::new().derive(&ctx).unwrap();
        assert_eq!(row.status_text, "No Refusal");
        assert_eq!(row.severity, Severity::Ok);
    }
}
