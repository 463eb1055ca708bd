//! Activity deriver trait and registry.
//!
//! The [`ActivityDeriver`] trait is the common interface for every activity
//! row. Derivers are registered in a [`DeriverRegistry`] that keeps display
//! order, and the standard set is cached in [`default_registry`].
//!
//! # Example
//!
//! ```ignore
//! use connect_status::{DerivationContext, default_registry};
//!
//! let ctx = DerivationContext::new(&record, concepts);
//! let rows = default_registry().derive_all(&ctx)?;
//! ```

use std::sync::OnceLock;

use connect_concepts::paths::{FIRST_NAME, LAST_NAME};
use connect_concepts::{ConceptError, ConceptMap};
use connect_model::{ActivityStatus, ParticipantRecord, ParticipantSummary};
use tracing::debug;

use crate::activities::{
    CollectionDeriver, EnrollmentDeriver, MilestoneDeriver, PaymentDeriver, SsnDeriver,
    SurveyDeriver, VerificationDeriver, WithdrawalDeriver, milestones, samples, surveys,
};
use crate::context::DerivationContext;
use crate::outcome::ActivityInfo;

/// Derives the status row for one activity.
///
/// Implementations are pure: they read the record through the context and
/// never fail on missing or malformed data. The only error is a symbolic
/// field name the concept map does not define.
pub trait ActivityDeriver: Send + Sync {
    /// Identity of the row this deriver produces.
    fn activity(&self) -> &ActivityInfo;

    fn derive(&self, ctx: &DerivationContext<'_>) -> Result<ActivityStatus, ConceptError>;
}

/// Ordered collection of activity derivers.
#[derive(Default)]
pub struct DeriverRegistry {
    derivers: Vec<Box<dyn ActivityDeriver>>,
}

impl DeriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a deriver. A deriver for the same item replaces the old one in
    /// place.
    pub fn register(&mut self, deriver: Box<dyn ActivityDeriver>) {
        let item = deriver.activity().item;
        match self
            .derivers
            .iter_mut()
            .find(|existing| existing.activity().item == item)
        {
            Some(slot) => *slot = deriver,
            None => self.derivers.push(deriver),
        }
    }

    /// Lookup by item name, case-insensitive.
    pub fn get(&self, item: &str) -> Option<&dyn ActivityDeriver> {
        self.derivers
            .iter()
            .find(|deriver| deriver.activity().item.eq_ignore_ascii_case(item))
            .map(|deriver| deriver.as_ref())
    }

    pub fn len(&self) -> usize {
        self.derivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.derivers.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.derivers.iter().map(|deriver| deriver.activity().item)
    }

    /// One row per registered activity, in registration order.
    pub fn derive_all(
        &self,
        ctx: &DerivationContext<'_>,
    ) -> Result<Vec<ActivityStatus>, ConceptError> {
        self.derivers
            .iter()
            .map(|deriver| deriver.derive(ctx))
            .collect()
    }

    pub fn summarize(
        &self,
        record: &ParticipantRecord,
        concepts: &ConceptMap,
    ) -> Result<ParticipantSummary, ConceptError> {
        let ctx = DerivationContext::new(record, concepts);
        let activities = self.derive_all(&ctx)?;
        let summary = ParticipantSummary {
            connect_id: record.connect_id(),
            first_name: ctx.text(&FIRST_NAME)?.map(str::to_string),
            last_name: ctx.text(&LAST_NAME)?.map(str::to_string),
            activities,
        };
        debug!(
            rows = summary.activities.len(),
            errors = summary.error_count(),
            refused = summary.refused_count(),
            "participant summarized"
        );
        Ok(summary)
    }
}

static DEFAULT_REGISTRY: OnceLock<DeriverRegistry> = OnceLock::new();

/// The standard activity set, cached on first access.
pub fn default_registry() -> &'static DeriverRegistry {
    DEFAULT_REGISTRY.get_or_init(build_default_registry)
}

fn build_default_registry() -> DeriverRegistry {
    let mut registry = DeriverRegistry::new();

    registry.register(Box::new(MilestoneDeriver::new(milestones::USER_PROFILE)));
    registry.register(Box::new(VerificationDeriver::new()));
    registry.register(Box::new(EnrollmentDeriver));
    registry.register(Box::new(WithdrawalDeriver::new()));

    for spec in [
        surveys::BOH,
        surveys::MRE,
        surveys::SAS,
        surveys::LAW,
    ] {
        registry.register(Box::new(SurveyDeriver::new(spec)));
    }
    registry.register(Box::new(SsnDeriver::new()));
    for spec in [
        surveys::COVID,
        surveys::BIOSPECIMEN_SURVEY,
        surveys::MENSTRUAL,
    ] {
        registry.register(Box::new(SurveyDeriver::new(spec)));
    }

    registry.register(Box::new(CollectionDeriver::new(samples::BLOOD)));
    registry.register(Box::new(CollectionDeriver::new(samples::URINE)));
    registry.register(Box::new(CollectionDeriver::mouthwash()));

    registry.register(Box::new(MilestoneDeriver::new(milestones::EMR)));
    registry.register(Box::new(PaymentDeriver::new()));
    registry.register(Box::new(SurveyDeriver::new(surveys::PROMIS)));

    registry
}

/// Derive every standard activity row for a participant.
pub fn derive_all(
    record: &ParticipantRecord,
    concepts: &ConceptMap,
) -> Result<Vec<ActivityStatus>, ConceptError> {
    default_registry().derive_all(&DerivationContext::new(record, concepts))
}

/// Derive the standard summary for a participant.
pub fn summarize(
    record: &ParticipantRecord,
    concepts: &ConceptMap,
) -> Result<ParticipantSummary, ConceptError> {
    default_registry().summarize(record, concepts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_every_activity() {
        let items: Vec<_> = default_registry().items().collect();
        assert_eq!(
            items,
            vec![
                "User Profile",
                "Verification",
                "Enrollment Status",
                "Withdrawal",
                "BOH",
                "MRE",
                "SAS",
                "LAW",
                "SSN",
                "COVID",
                "Biospecimen Survey",
                "Menstrual Cycle",
                "Blood",
                "Urine",
                "Mouthwash",
                "EMR",
                "Payment",
                "PROMIS",
            ]
        );
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let registry = default_registry();
        assert_eq!(registry.get("blood").unwrap().activity().item, "Blood");
        assert_eq!(registry.get("PROMIS").unwrap().activity().timeline, "Follow-Up 3-mo");
        assert!(registry.get("Saliva").is_none());
    }

    #[test]
    fn register_replaces_same_item() {
        let mut registry = DeriverRegistry::new();
        registry.register(Box::new(SurveyDeriver::new(surveys::BOH)));
        registry.register(Box::new(SurveyDeriver::new(surveys::BOH)));
        assert_eq!(registry.len(), 1);
    }
}
