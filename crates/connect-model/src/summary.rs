use serde::{Deserialize, Serialize};

use crate::{ActivityStatus, Severity};

/// All status rows derived for one participant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSummary {
    pub connect_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub activities: Vec<ActivityStatus>,
}

impl ParticipantSummary {
    pub fn error_count(&self) -> usize {
        self.activities
            .iter()
            .filter(|row| row.severity == Severity::Error)
            .count()
    }

    pub fn refused_count(&self) -> usize {
        self.activities
            .iter()
            .filter(|row| row.refused.is_refused())
            .count()
    }

    pub fn find(&self, item: &str) -> Option<&ActivityStatus> {
        self.activities.iter().find(|row| row.item == item)
    }

    /// "Last, First" when either part is known.
    pub fn display_name(&self) -> Option<String> {
        match (&self.last_name, &self.first_name) {
            (Some(last), Some(first)) => Some(format!("{last}, {first}")),
            (Some(last), None) => Some(last.clone()),
            (None, Some(first)) => Some(first.clone()),
            (None, None) => None,
        }
    }
}
