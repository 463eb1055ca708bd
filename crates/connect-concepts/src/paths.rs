//! Every participant-record path the status engine reads.
//!
//! Paths are written as symbolic names and resolved against a
//! [`crate::ConceptMap`] at derivation time, so a renamed or missing field
//! fails loudly instead of silently reading the wrong key. [`SCHEMA`] lists
//! them all; the test suite resolves each entry against the embedded map.

use std::fmt;

/// A named path of symbolic field names through nested record blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath {
    name: &'static str,
    segments: &'static [&'static str],
}

impl FieldPath {
    pub const fn new(name: &'static str, segments: &'static [&'static str]) -> Self {
        Self { name, segments }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn segments(&self) -> &'static [&'static str] {
        self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// A code value compared against record fields, either a top-level field
/// (such as `yes`) or a value inside a group (such as `kitStatus.received`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeRef {
    group: Option<&'static str>,
    name: &'static str,
}

impl CodeRef {
    pub const fn field(name: &'static str) -> Self {
        Self { group: None, name }
    }

    pub const fn in_group(group: &'static str, name: &'static str) -> Self {
        Self {
            group: Some(group),
            name,
        }
    }

    pub const fn group(&self) -> Option<&'static str> {
        self.group
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for CodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.group {
            Some(group) => write!(f, "{group}.{}", self.name),
            None => f.write_str(self.name),
        }
    }
}

macro_rules! field_paths {
    ($($ident:ident = [$($segment:literal),+ $(,)?];)+) => {
        $(
            pub const $ident: FieldPath = FieldPath::new(stringify!($ident), &[$($segment),+]);
        )+

        /// All paths read by the status engine and the edit tooling.
        pub const SCHEMA: &[FieldPath] = &[$($ident),+];
    };
}

field_paths! {
    FIRST_NAME = ["firstName"];
    LAST_NAME = ["lastName"];

    USER_PROFILE_FLAG = ["userProfileFlag"];
    USER_PROFILE_DATE = ["userProfileDateTime"];
    VERIFIED_FLAG = ["verifiedFlag"];
    VERIFICATION_DATE = ["verificationDate"];
    ENROLLMENT_STATUS = ["enrollmentStatus"];
    PARTICIPATION_STATUS = ["participationStatus"];

    WITHDRAW_CONSENT = ["withdrawConsent"];
    WITHDRAW_CONSENT_DATE = ["dateWithdrewConsentRequested"];
    DESTROY_DATA = ["destroyData"];
    DESTROY_DATA_DATE = ["dateDataDestroyRequested"];
    REVOKE_HIPAA = ["revokeHipaa"];
    REVOKE_HIPAA_DATE = ["dateHipaaRevoked"];

    REFUSED_SURVEY = ["refusalOptions", "refusedSurvey"];
    REFUSED_BLOOD = ["refusalOptions", "refusedBlood"];
    REFUSED_URINE = ["refusalOptions", "refusedUrine"];
    REFUSED_MOUTHWASH = ["refusalOptions", "refusedMouthwash"];
    REFUSED_SPECIMEN_SURVEYS = ["refusalOptions", "refusedSpecimenSurveys"];
    REFUSED_FUTURE_SAMPLES = ["refusalOptions", "refusedFutureSamples"];
    REFUSED_FUTURE_SURVEYS = ["refusalOptions", "refusedFutureSurveys"];
    REFUSED_ALL_FUTURE_ACTIVITIES = ["refusalOptions", "refusedAllFutureActivities"];
    REFUSED_QUALITY_OF_LIFE_SURVEY = ["refusalOptions", "refusedQualityOfLifeSurvey"];

    BOH_STATUS = ["bohStatusFlag1"];
    BOH_STARTED = ["bohStartDate1"];
    BOH_COMPLETED = ["bohCompletedDate1"];
    MRE_STATUS = ["mreStatusFlag1"];
    MRE_STARTED = ["mreStartDate1"];
    MRE_COMPLETED = ["mreCompletedDate1"];
    SAS_STATUS = ["sasStatusFlag1"];
    SAS_STARTED = ["sasStartDate1"];
    SAS_COMPLETED = ["sasCompletedDate1"];
    LAW_STATUS = ["lawStausFlag1"];
    LAW_STARTED = ["lawStartDate1"];
    LAW_COMPLETED = ["lawCompletedDate1"];
    COVID_STATUS = ["covidFlag"];
    COVID_STARTED = ["covidStartDate"];
    COVID_COMPLETED = ["covidCompletedDate"];
    BIO_SURVEY_STATUS = ["bioSurveyFlag"];
    BIO_SURVEY_STARTED = ["bioSurveyStartDate"];
    BIO_SURVEY_COMPLETED = ["bioSurveyCompletedDate"];
    MENSTRUAL_STATUS = ["menstrualSurveyFlag"];
    MENSTRUAL_STARTED = ["menstrualSurveyStartDate"];
    MENSTRUAL_COMPLETED = ["menstrualSurveyCompletedDate"];
    PROMIS_STATUS = ["promisFlag"];
    PROMIS_STARTED = ["promisStartDate"];
    PROMIS_COMPLETED = ["promisCompletedDate"];

    SSN_FULL_FLAG = ["ssnFullFlag"];
    SSN_FULL_DATE = ["ssnFullDate"];
    SSN_PARTIAL_FLAG = ["ssnPartialFlag"];
    SSN_PARTIAL_DATE = ["ssnPartialDate"];

    BLOOD_FLAG = ["bloodFlag"];
    BLOOD_SETTING = ["biospecimenCollectionDetail", "biospecimenFollowUp", "biosepcimenBloodCollection"];
    BLOOD_RESEARCH_DATE = ["biospecimenCollectionDetail", "biospecimenFollowUp", "researchBloodDateTime"];
    BLOOD_CLINICAL_DATE = ["biospecimenCollectionDetail", "biospecimenFollowUp", "clinicalBloodDateTime"];
    URINE_FLAG = ["urineFlag"];
    URINE_SETTING = ["biospecimenCollectionDetail", "biospecimenFollowUp", "biospecimenUrineCollection"];
    URINE_RESEARCH_DATE = ["biospecimenCollectionDetail", "biospecimenFollowUp", "researchUrineDateTime"];
    URINE_CLINICAL_DATE = ["biospecimenCollectionDetail", "biospecimenFollowUp", "clinicalUrineDateTime"];
    MOUTHWASH_FLAG = ["mouthwashFlag"];
    MOUTHWASH_RESEARCH_DATE = ["biospecimenCollectionDetail", "biospecimenFollowUp", "researchMouthwashDateTime"];
    MOUTHWASH_KIT_TYPE = ["bioKitMouthwash", "kitType"];
    MOUTHWASH_KIT_STATUS = ["bioKitMouthwash", "kitStatus"];
    MOUTHWASH_KIT_RECEIVED = ["bioKitMouthwash", "kitReceivedDateTime"];

    EHR_PUSHED_FLAG = ["ehrPushedFlag"];
    EHR_PUSHED_DATE = ["ehrPushedDate"];

    BASELINE_ELIGIBLE = ["paymentRoundup", "baselinePayment", "eligiblePayment"];
    BASELINE_NORC_ELIGIBLE = ["paymentRoundup", "baselinePayment", "norcPaymentEligibility"];
    BASELINE_ELIGIBLE_DATE = ["paymentRoundup", "baselinePayment", "eligiblePaymentDate"];
    BASELINE_ISSUED = ["paymentRoundup", "baselinePayment", "paymentIssued"];
    BASELINE_ISSUED_DATE = ["paymentRoundup", "baselinePayment", "paymentIssuedDate"];
    BASELINE_DECLINED = ["paymentRoundup", "baselinePayment", "paymentDeclined"];
    BASELINE_DECLINED_DATE = ["paymentRoundup", "baselinePayment", "paymentDeclinedDate"];
}

macro_rules! code_refs {
    ($($ident:ident = $value:expr;)+) => {
        $(pub const $ident: CodeRef = $value;)+

        /// All code values compared by the status engine.
        pub const CODES: &[CodeRef] = &[$($ident),+];
    };
}

code_refs! {
    YES = CodeRef::field("yes");
    NO = CodeRef::field("no");

    SURVEY_NOT_STARTED = CodeRef::in_group("surveyStatus", "notStarted");
    SURVEY_STARTED = CodeRef::in_group("surveyStatus", "started");
    SURVEY_SUBMITTED = CodeRef::in_group("surveyStatus", "submitted");
    SURVEY_NOT_YET_ELIGIBLE = CodeRef::in_group("surveyStatus", "notYetEligible");

    NOT_YET_VERIFIED = CodeRef::in_group("verifiedFlag", "notYetVerified");
    OUTREACH_TIMED_OUT = CodeRef::in_group("verifiedFlag", "outreachTimedout");
    VERIFIED = CodeRef::in_group("verifiedFlag", "verified");
    CANNOT_BE_VERIFIED = CodeRef::in_group("verifiedFlag", "cannotBeVerified");
    DUPLICATE = CodeRef::in_group("verifiedFlag", "duplicate");

    NO_REFUSAL = CodeRef::in_group("participationStatus", "noRefusal");
    ENROLLMENT_CANNOT_BE_VERIFIED = CodeRef::in_group("enrollmentStatus", "cannotBeVerified");

    SETTING_RESEARCH = CodeRef::field("biospecimenResearch");
    SETTING_CLINICAL = CodeRef::field("biospecimenClinical");

    KIT_HOME_MOUTHWASH = CodeRef::in_group("kitType", "homeMouthwash");
    KIT_RECEIVED = CodeRef::in_group("kitStatus", "received");
}
