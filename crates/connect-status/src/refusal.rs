//! Which refusal options gate which activity.
//!
//! A refusal set is ORed: any key holding `yes` refuses the activity.

use connect_concepts::FieldPath;
use connect_concepts::paths::{
    REFUSED_ALL_FUTURE_ACTIVITIES, REFUSED_BLOOD, REFUSED_FUTURE_SAMPLES, REFUSED_FUTURE_SURVEYS,
    REFUSED_MOUTHWASH, REFUSED_QUALITY_OF_LIFE_SURVEY, REFUSED_SPECIMEN_SURVEYS, REFUSED_SURVEY,
    REFUSED_URINE,
};

pub const BASELINE_SURVEY: &[FieldPath] = &[
    REFUSED_SURVEY,
    REFUSED_FUTURE_SURVEYS,
    REFUSED_ALL_FUTURE_ACTIVITIES,
];

pub const FUTURE_SURVEY: &[FieldPath] = &[REFUSED_FUTURE_SURVEYS, REFUSED_ALL_FUTURE_ACTIVITIES];

pub const SPECIMEN_SURVEY: &[FieldPath] = &[
    REFUSED_SPECIMEN_SURVEYS,
    REFUSED_FUTURE_SURVEYS,
    REFUSED_ALL_FUTURE_ACTIVITIES,
];

pub const QUALITY_OF_LIFE: &[FieldPath] = &[
    REFUSED_FUTURE_SURVEYS,
    REFUSED_ALL_FUTURE_ACTIVITIES,
    REFUSED_QUALITY_OF_LIFE_SURVEY,
];

pub const BLOOD: &[FieldPath] = &[
    REFUSED_BLOOD,
    REFUSED_FUTURE_SAMPLES,
    REFUSED_ALL_FUTURE_ACTIVITIES,
];

pub const URINE: &[FieldPath] = &[
    REFUSED_URINE,
    REFUSED_FUTURE_SAMPLES,
    REFUSED_ALL_FUTURE_ACTIVITIES,
];

pub const MOUTHWASH: &[FieldPath] = &[
    REFUSED_MOUTHWASH,
    REFUSED_FUTURE_SAMPLES,
    REFUSED_ALL_FUTURE_ACTIVITIES,
];

pub const ALL_FUTURE: &[FieldPath] = &[REFUSED_ALL_FUTURE_ACTIVITIES];

/// No refusal option applies.
pub const NONE: &[FieldPath] = &[];
