//! Request bodies for the dashboard mutation endpoints.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Payment round an incentive update applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentRound {
    Baseline,
}

/// Body of `updateParticipantIncentiveEligibility`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncentiveEligibilityRequest {
    pub connect_id: u64,
    pub current_payment_round: PaymentRound,
    /// Eligibility date as `YYYY-MM-DD`.
    pub date_of_eligibility_input: String,
}

impl IncentiveEligibilityRequest {
    pub fn baseline(connect_id: u64, eligible_on: NaiveDate) -> Self {
        Self {
            connect_id,
            current_payment_round: PaymentRound::Baseline,
            date_of_eligibility_input: eligible_on.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Surveys that can be reset for a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurveyKind {
    Ssn,
    Promis,
}

impl SurveyKind {
    pub const ALL: [SurveyKind; 2] = [SurveyKind::Ssn, SurveyKind::Promis];

    pub fn as_str(&self) -> &'static str {
        match self {
            SurveyKind::Ssn => "ssn",
            SurveyKind::Promis => "promis",
        }
    }
}

impl fmt::Display for SurveyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SurveyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SurveyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<&str> = SurveyKind::ALL.iter().map(SurveyKind::as_str).collect();
                format!("unknown survey '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

/// Body of `resetParticipantSurvey`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetSurveyRequest {
    pub connect_id: u64,
    pub survey: SurveyKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incentive_body_uses_backend_names() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let body = IncentiveEligibilityRequest::baseline(1234567890, date);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "connectId": 1234567890u64,
                "currentPaymentRound": "baseline",
                "dateOfEligibilityInput": "2024-03-09"
            })
        );
    }

    #[test]
    fn survey_kind_parses_case_insensitively() {
        assert_eq!("PROMIS".parse::<SurveyKind>().unwrap(), SurveyKind::Promis);
        assert!("boh".parse::<SurveyKind>().unwrap_err().contains("ssn, promis"));
        let body = ResetSurveyRequest {
            connect_id: 1,
            survey: SurveyKind::Ssn,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"connectId":1,"survey":"ssn"}"#
        );
    }
}
