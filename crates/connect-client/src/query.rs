//! Participant lookup filters.

use serde::Serialize;

use crate::error::{ClientError, Result};

/// Filters for `getParticipants?type=filter`. Unset filters are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Date of birth as `YYYYMMDD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_id: Option<String>,
}

impl ParticipantQuery {
    pub fn by_connect_id(connect_id: impl Into<String>) -> Self {
        Self {
            connect_id: Some(connect_id.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }

    /// Query-string pairs in a stable order, starting with `type=filter`.
    pub fn to_query(&self) -> Result<Vec<(&'static str, &str)>> {
        let pairs = self.pairs();
        if pairs.is_empty() {
            return Err(ClientError::EmptyQuery);
        }
        let mut query = vec![("type", "filter")];
        query.extend(pairs);
        Ok(query)
    }

    fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("connectId", &self.connect_id),
            ("email", &self.email),
            ("phone", &self.phone),
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("dob", &self.dob),
            ("studyId", &self.study_id),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(|value| (key, value))
        })
        .collect()
    }
}
