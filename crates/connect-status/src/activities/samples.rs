//! Biospecimen collections: blood, urine and mouthwash.
//!
//! Blood and urine take their setting from the follow-up collection block.
//! Mouthwash can also arrive as a mailed home kit; the kit fields override
//! the generic flag whenever the kit type is the home mouthwash kit.

use connect_concepts::paths::{
    BLOOD_CLINICAL_DATE, BLOOD_FLAG, BLOOD_RESEARCH_DATE, BLOOD_SETTING, KIT_HOME_MOUTHWASH,
    KIT_RECEIVED, MOUTHWASH_FLAG, MOUTHWASH_KIT_RECEIVED, MOUTHWASH_KIT_STATUS,
    MOUTHWASH_KIT_TYPE, MOUTHWASH_RESEARCH_DATE, SETTING_CLINICAL, SETTING_RESEARCH, URINE_CLINICAL_DATE,
    URINE_FLAG, URINE_RESEARCH_DATE, URINE_SETTING,
};
use connect_concepts::{ConceptError, FieldPath};
use connect_model::ActivityStatus;

use crate::context::DerivationContext;
use crate::outcome::{ActivityInfo, Collection, Setting};
use crate::refusal;
use crate::registry::ActivityDeriver;
use crate::rules::RuleChain;

/// A sample collected in a research or clinical setting.
#[derive(Debug, Clone, Copy)]
pub struct CollectionSpec {
    pub info: ActivityInfo,
    pub flag: FieldPath,
    pub setting: FieldPath,
    pub research_date: FieldPath,
    pub clinical_date: FieldPath,
    pub refusals: &'static [FieldPath],
}

pub const BLOOD: CollectionSpec = CollectionSpec {
    info: ActivityInfo::new("Baseline", "Sample", "Blood"),
    flag: BLOOD_FLAG,
    setting: BLOOD_SETTING,
    research_date: BLOOD_RESEARCH_DATE,
    clinical_date: BLOOD_CLINICAL_DATE,
    refusals: refusal::BLOOD,
};

pub const URINE: CollectionSpec = CollectionSpec {
    info: ActivityInfo::new("Baseline", "Sample", "Urine"),
    flag: URINE_FLAG,
    setting: URINE_SETTING,
    research_date: URINE_RESEARCH_DATE,
    clinical_date: URINE_CLINICAL_DATE,
    refusals: refusal::URINE,
};

pub const MOUTHWASH: ActivityInfo = ActivityInfo::new("Baseline", "Sample", "Mouthwash");

/// Setting and date of a collected sample.
///
/// Research and clinical collections carry their own timestamps; when the
/// setting code is missing or unrecognized the research timestamp is shown.
pub fn collected_setting(
    ctx: &DerivationContext<'_>,
    spec: &CollectionSpec,
) -> Result<Collection, ConceptError> {
    let (setting, date) = if ctx.is(&spec.setting, &SETTING_RESEARCH)? {
        (Setting::Research, ctx.date(&spec.research_date)?)
    } else if ctx.is(&spec.setting, &SETTING_CLINICAL)? {
        (Setting::Clinical, ctx.date(&spec.clinical_date)?)
    } else {
        (Setting::Unknown, ctx.date(&spec.research_date)?)
    };
    Ok(Collection::Collected { setting, date })
}

pub fn collection_chain(spec: CollectionSpec) -> RuleChain<Collection> {
    RuleChain::new(Collection::NotCollected {
        setting: Setting::Unknown,
    })
    .rule("refused", move |ctx| {
        Ok(ctx.any_yes(spec.refusals)?.then_some(Collection::Refused))
    })
    .rule("absent", move |ctx| {
        Ok((!ctx.is_present(&spec.flag)?).then_some(Collection::Absent))
    })
    .rule("collected", move |ctx| {
        if ctx.is_yes(&spec.flag)? {
            return collected_setting(ctx, &spec).map(Some);
        }
        Ok(None)
    })
}

/// Home kit first, then the generic flag.
pub fn mouthwash_chain() -> RuleChain<Collection> {
    RuleChain::new(Collection::NotCollected {
        setting: Setting::Unknown,
    })
    .rule("refused", |ctx| {
        Ok(ctx.any_yes(refusal::MOUTHWASH)?.then_some(Collection::Refused))
    })
    .rule("home_kit_received", |ctx| {
        if ctx.is(&MOUTHWASH_KIT_TYPE, &KIT_HOME_MOUTHWASH)?
            && ctx.is(&MOUTHWASH_KIT_STATUS, &KIT_RECEIVED)?
        {
            let date = ctx.date(&MOUTHWASH_KIT_RECEIVED)?;
            return Ok(Some(Collection::Collected {
                setting: Setting::Home,
                date,
            }));
        }
        Ok(None)
    })
    .rule("home_kit_pending", |ctx| {
        Ok(ctx
            .is(&MOUTHWASH_KIT_TYPE, &KIT_HOME_MOUTHWASH)?
            .then_some(Collection::NotCollected {
                setting: Setting::Home,
            }))
    })
    .rule("absent", |ctx| {
        Ok((!ctx.is_present(&MOUTHWASH_FLAG)?).then_some(Collection::Absent))
    })
    .rule("collected", |ctx| {
        if ctx.is_yes(&MOUTHWASH_FLAG)? {
            let date = ctx.date(&MOUTHWASH_RESEARCH_DATE)?;
            return Ok(Some(Collection::Collected {
                setting: Setting::Research,
                date,
            }));
        }
        Ok(None)
    })
}

pub struct CollectionDeriver {
    info: ActivityInfo,
    chain: RuleChain<Collection>,
}

impl CollectionDeriver {
    pub fn new(spec: CollectionSpec) -> Self {
        Self {
            info: spec.info,
            chain: collection_chain(spec),
        }
    }

    pub fn mouthwash() -> Self {
        Self {
            info: MOUTHWASH,
            chain: mouthwash_chain(),
        }
    }

    pub fn chain(&self) -> &RuleChain<Collection> {
        &self.chain
    }
}

impl ActivityDeriver for CollectionDeriver {
    fn activity(&self) -> &ActivityInfo {
        &self.info
    }

    fn derive(&self, ctx: &DerivationContext<'_>) -> Result<ActivityStatus, ConceptError> {
        Ok(self.chain.evaluate(ctx)?.verdict().render(&self.info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect_concepts::default_concepts;
    use connect_model::{ConceptId, ParticipantRecord};

    const YES: ConceptId = ConceptId::new(353358909);
    const NO: ConceptId = ConceptId::new(104430631);
    const URINE_FLAG_ID: ConceptId = ConceptId::new(167958071);
    const DETAIL: ConceptId = ConceptId::new(173836415);
    const FOLLOW_UP: ConceptId = ConceptId::new(266600170);
    const URINE_SETTING_ID: ConceptId = ConceptId::new(718172863);
    const URINE_CLINICAL: ConceptId = ConceptId::new(139821708);
    const URINE_RESEARCH: ConceptId = ConceptId::new(847159717);

    fn decide(chain: &RuleChain<Collection>, record: &ParticipantRecord) -> Collection {
        let ctx = DerivationContext::new(record, default_concepts());
        chain.evaluate(&ctx).unwrap()
    }

    #[test]
    fn clinical_urine_uses_clinical_date() {
        let record = ParticipantRecord::new()
            .with(&[URINE_FLAG_ID], YES)
            .with(&[DETAIL, FOLLOW_UP, URINE_SETTING_ID], ConceptId::new(664882224))
            .with(&[DETAIL, FOLLOW_UP, URINE_CLINICAL], "2024-02-03T12:00:00Z")
            .with(&[DETAIL, FOLLOW_UP, URINE_RESEARCH], "2024-02-01T12:00:00Z");
        assert_eq!(
            decide(&collection_chain(URINE), &record),
            Collection::Collected {
                setting: Setting::Clinical,
                date: "02/03/2024".to_string()
            }
        );
    }

    #[test]
    fn missing_setting_falls_back_to_research_date() {
        let record = ParticipantRecord::new()
            .with(&[URINE_FLAG_ID], YES)
            .with(&[DETAIL, FOLLOW_UP, URINE_RESEARCH], "2024-02-01T12:00:00Z");
        assert_eq!(
            decide(&collection_chain(URINE), &record),
            Collection::Collected {
                setting: Setting::Unknown,
                date: "02/01/2024".to_string()
            }
        );
    }

    #[test]
    fn negative_flag_is_not_collected() {
        let record = ParticipantRecord::new().with(&[URINE_FLAG_ID], NO);
        let row = CollectionDeriver::new(URINE)
            .derive(&DerivationContext::new(&record, default_concepts()))
            .unwrap();
        assert_eq!(row.status_text, "Not Collected");
        assert_eq!(row.setting, "N/A");
    }

    #[test]
    fn mouthwash_rule_order() {
        assert_eq!(
            mouthwash_chain().rule_names(),
            vec![
                "refused",
                "home_kit_received",
                "home_kit_pending",
                "absent",
                "collected"
            ]
        );
    }
}
