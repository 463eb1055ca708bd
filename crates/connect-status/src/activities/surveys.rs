//! Survey instruments tracked by a coded status flag plus start and
//! completion timestamps.

use connect_concepts::paths::{
    BIO_SURVEY_COMPLETED, BIO_SURVEY_STARTED, BIO_SURVEY_STATUS, BOH_COMPLETED, BOH_STARTED,
    BOH_STATUS, COVID_COMPLETED, COVID_STARTED, COVID_STATUS, LAW_COMPLETED, LAW_STARTED,
    LAW_STATUS, MENSTRUAL_COMPLETED, MENSTRUAL_STARTED, MENSTRUAL_STATUS, MRE_COMPLETED,
    MRE_STARTED, MRE_STATUS, PROMIS_COMPLETED, PROMIS_STARTED, PROMIS_STATUS, SAS_COMPLETED,
    SAS_STARTED, SAS_STATUS, SURVEY_NOT_STARTED, SURVEY_NOT_YET_ELIGIBLE, SURVEY_STARTED,
    SURVEY_SUBMITTED,
};
use connect_concepts::{ConceptError, FieldPath};
use connect_model::ActivityStatus;
use tracing::warn;

use crate::context::DerivationContext;
use crate::outcome::{ActivityInfo, Progress, ProgressLabels};
use crate::refusal;
use crate::registry::ActivityDeriver;
use crate::rules::RuleChain;

#[derive(Debug, Clone, Copy)]
pub struct SurveySpec {
    pub info: ActivityInfo,
    pub status: FieldPath,
    pub started: FieldPath,
    pub completed: FieldPath,
    pub refusals: &'static [FieldPath],
}

pub const BOH: SurveySpec = SurveySpec {
    info: ActivityInfo::new("Baseline", "Survey", "BOH"),
    status: BOH_STATUS,
    started: BOH_STARTED,
    completed: BOH_COMPLETED,
    refusals: refusal::BASELINE_SURVEY,
};

pub const MRE: SurveySpec = SurveySpec {
    info: ActivityInfo::new("Baseline", "Survey", "MRE"),
    status: MRE_STATUS,
    started: MRE_STARTED,
    completed: MRE_COMPLETED,
    refusals: refusal::BASELINE_SURVEY,
};

pub const SAS: SurveySpec = SurveySpec {
    info: ActivityInfo::new("Baseline", "Survey", "SAS"),
    status: SAS_STATUS,
    started: SAS_STARTED,
    completed: SAS_COMPLETED,
    refusals: refusal::BASELINE_SURVEY,
};

pub const LAW: SurveySpec = SurveySpec {
    info: ActivityInfo::new("Baseline", "Survey", "LAW"),
    status: LAW_STATUS,
    started: LAW_STARTED,
    completed: LAW_COMPLETED,
    refusals: refusal::BASELINE_SURVEY,
};

pub const COVID: SurveySpec = SurveySpec {
    info: ActivityInfo::new("Baseline", "Survey", "COVID"),
    status: COVID_STATUS,
    started: COVID_STARTED,
    completed: COVID_COMPLETED,
    refusals: refusal::FUTURE_SURVEY,
};

pub const BIOSPECIMEN_SURVEY: SurveySpec = SurveySpec {
    info: ActivityInfo::new("Baseline", "Survey", "Biospecimen Survey"),
    status: BIO_SURVEY_STATUS,
    started: BIO_SURVEY_STARTED,
    completed: BIO_SURVEY_COMPLETED,
    refusals: refusal::SPECIMEN_SURVEY,
};

pub const MENSTRUAL: SurveySpec = SurveySpec {
    info: ActivityInfo::new("Baseline", "Survey", "Menstrual Cycle"),
    status: MENSTRUAL_STATUS,
    started: MENSTRUAL_STARTED,
    completed: MENSTRUAL_COMPLETED,
    refusals: refusal::FUTURE_SURVEY,
};

pub const PROMIS: SurveySpec = SurveySpec {
    info: ActivityInfo::new("Follow-Up 3-mo", "Survey", "PROMIS"),
    status: PROMIS_STATUS,
    started: PROMIS_STARTED,
    completed: PROMIS_COMPLETED,
    refusals: refusal::QUALITY_OF_LIFE,
};

/// Precedence: refusal, absent flag, then the coded survey status.
pub fn survey_chain(spec: SurveySpec) -> RuleChain<Progress> {
    RuleChain::new(Progress::Absent)
        .rule("refused", move |ctx| {
            Ok(ctx.any_yes(spec.refusals)?.then_some(Progress::Refused))
        })
        .rule("absent", move |ctx| {
            Ok((!ctx.is_present(&spec.status)?).then_some(Progress::Absent))
        })
        .rule("submitted", move |ctx| {
            if ctx.is(&spec.status, &SURVEY_SUBMITTED)? {
                let date = ctx.date(&spec.completed)?;
                return Ok(Some(Progress::Completed { date }));
            }
            Ok(None)
        })
        .rule("started", move |ctx| {
            if ctx.is(&spec.status, &SURVEY_STARTED)? {
                let date = ctx.date(&spec.started)?;
                return Ok(Some(Progress::Started { date }));
            }
            Ok(None)
        })
        .rule("not_started", move |ctx| {
            Ok(ctx
                .is(&spec.status, &SURVEY_NOT_STARTED)?
                .then_some(Progress::NotStarted))
        })
        .rule("not_yet_eligible", move |ctx| {
            Ok(ctx
                .is(&spec.status, &SURVEY_NOT_YET_ELIGIBLE)?
                .then_some(Progress::NotYetEligible))
        })
        .rule("unrecognized", move |ctx| {
            let code = ctx.code(&spec.status)?;
            warn!(item = spec.info.item, code = ?code, "unrecognized survey status code");
            Ok(Some(Progress::Unrecognized))
        })
}

pub struct SurveyDeriver {
    spec: SurveySpec,
    chain: RuleChain<Progress>,
}

impl SurveyDeriver {
    pub fn new(spec: SurveySpec) -> Self {
        Self {
            spec,
            chain: survey_chain(spec),
        }
    }

    pub fn chain(&self) -> &RuleChain<Progress> {
        &self.chain
    }
}

impl ActivityDeriver for SurveyDeriver {
    fn activity(&self) -> &ActivityInfo {
        &self.spec.info
    }

    fn derive(&self, ctx: &DerivationContext<'_>) -> Result<ActivityStatus, ConceptError> {
        let progress = self.chain.evaluate(ctx)?;
        Ok(progress.verdict(&ProgressLabels::SURVEY).render(&self.spec.info))
    }
}
