//! Yes/no milestones with a single timestamp: user profile and EMR push.

use connect_concepts::paths::{
    EHR_PUSHED_DATE, EHR_PUSHED_FLAG, NO, USER_PROFILE_DATE, USER_PROFILE_FLAG,
};
use connect_concepts::{ConceptError, FieldPath};
use connect_model::{ActivityStatus, NOT_AVAILABLE};
use tracing::warn;

use crate::context::DerivationContext;
use crate::outcome::{ActivityInfo, Progress, ProgressLabels};
use crate::refusal;
use crate::registry::ActivityDeriver;
use crate::rules::RuleChain;

#[derive(Debug, Clone, Copy)]
pub struct MilestoneSpec {
    pub info: ActivityInfo,
    pub flag: FieldPath,
    pub date: FieldPath,
    pub refusals: &'static [FieldPath],
    pub labels: ProgressLabels,
}

pub const USER_PROFILE: MilestoneSpec = MilestoneSpec {
    info: ActivityInfo::new("Enrollment", "Profile", "User Profile"),
    flag: USER_PROFILE_FLAG,
    date: USER_PROFILE_DATE,
    refusals: refusal::NONE,
    labels: ProgressLabels {
        completed: "Submitted",
        started: "Started",
        not_started: "Not Submitted",
        refused: NOT_AVAILABLE,
    },
};

pub const EMR: MilestoneSpec = MilestoneSpec {
    info: ActivityInfo::new("Baseline", "EMR", "EMR"),
    flag: EHR_PUSHED_FLAG,
    date: EHR_PUSHED_DATE,
    refusals: refusal::ALL_FUTURE,
    labels: ProgressLabels {
        completed: "Pushed",
        started: "Started",
        not_started: "Not Pushed",
        refused: NOT_AVAILABLE,
    },
};

pub fn milestone_chain(spec: MilestoneSpec) -> RuleChain<Progress> {
    RuleChain::new(Progress::Absent)
        .rule("refused", move |ctx| {
            Ok(ctx.any_yes(spec.refusals)?.then_some(Progress::Refused))
        })
        .rule("absent", move |ctx| {
            Ok((!ctx.is_present(&spec.flag)?).then_some(Progress::Absent))
        })
        .rule("completed", move |ctx| {
            if ctx.is_yes(&spec.flag)? {
                let date = ctx.date(&spec.date)?;
                return Ok(Some(Progress::Completed { date }));
            }
            Ok(None)
        })
        .rule("not_started", move |ctx| {
            Ok(ctx.is(&spec.flag, &NO)?.then_some(Progress::NotStarted))
        })
        .rule("unrecognized", move |ctx| {
            let code = ctx.code(&spec.flag)?;
            warn!(item = spec.info.item, code = ?code, "unrecognized yes/no code");
            Ok(Some(Progress::Unrecognized))
        })
}

pub struct MilestoneDeriver {
    spec: MilestoneSpec,
    chain: RuleChain<Progress>,
}

impl MilestoneDeriver {
    pub fn new(spec: MilestoneSpec) -> Self {
        Self {
            spec,
            chain: milestone_chain(spec),
        }
    }
}

impl ActivityDeriver for MilestoneDeriver {
    fn activity(&self) -> &ActivityInfo {
        &self.spec.info
    }

    fn derive(&self, ctx: &DerivationContext<'_>) -> Result<ActivityStatus, ConceptError> {
        let progress = self.chain.evaluate(ctx)?;
        Ok(progress.verdict(&self.spec.labels).render(&self.spec.info))
    }
}
