pub mod error;
pub mod ids;
pub mod record;
pub mod status;
pub mod summary;

pub use error::{ModelError, Result};
pub use ids::ConceptId;
pub use record::{FieldValue, ParticipantRecord};
pub use status::{ActivityStatus, Icon, RefusedFlag, Severity, NOT_AVAILABLE};
pub use summary::ParticipantSummary;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_outstanding_rows() {
        let summary = ParticipantSummary {
            connect_id: Some("1234567890".to_string()),
            first_name: None,
            last_name: None,
            activities: vec![
                ActivityStatus::new("Baseline", "Survey", "BOH")
                    .with_status("Submitted", Icon::Check, Severity::Ok),
                ActivityStatus::new("Baseline", "Sample", "Blood")
                    .with_status("Not Collected", Icon::Times, Severity::Error),
            ],
        };
        assert_eq!(summary.error_count(), 1);
        assert_eq!(summary.refused_count(), 0);
    }

    #[test]
    fn record_parses_backend_json() {
        let record: ParticipantRecord =
            serde_json::from_str(r#"{"Connect_ID": 1234567890, "878865966": 353358909}"#)
                .expect("parse record");
        assert_eq!(
            record.code_at(&[ConceptId::new(878865966)]),
            Some(ConceptId::new(353358909))
        );
    }
}
