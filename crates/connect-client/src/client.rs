//! Blocking client for the participant backend.

use std::path::PathBuf;

use connect_model::ParticipantRecord;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::{API_TOKEN_ENV_VAR, DashboardConfig};
use crate::error::{ClientError, Result};
use crate::query::ParticipantQuery;
use crate::requests::{IncentiveEligibilityRequest, ResetSurveyRequest};
use crate::response::{ApiResponse, failed_body_message};

const CLIENT_NAME: &str = "connect-dashboard";

/// Client for the site-manager endpoints. Every call is a single attempt.
pub struct DashboardClient {
    client: Client,
    base_url: String,
    token: String,
}

impl DashboardClient {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        config: &DashboardConfig,
    ) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Build a client from configuration; both the base URL and the token
    /// must be set.
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        let base = config.require_api_base()?;
        let token = config
            .token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ClientError::Config {
                path: PathBuf::from(API_TOKEN_ENV_VAR),
                message: "no access token configured".to_string(),
            })?;
        Self::new(base, token, config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET getParticipants?type=filter&...`
    pub fn find_participants(&self, query: &ParticipantQuery) -> Result<Vec<ParticipantRecord>> {
        let url = self.url("getParticipants", &query.to_query()?)?;
        debug!(endpoint = "getParticipants", "sending request");
        let response = self.send(self.client.get(url))?;
        let body: ApiResponse<Vec<ParticipantRecord>> = response.json()?;
        debug!(count = body.data.len(), "participants returned");
        Ok(body.data)
    }

    /// `POST updateParticipantData` with a body built by
    /// [`crate::EditSession::to_payload`].
    pub fn update_participant_data(&self, payload: &Value) -> Result<()> {
        let url = self.url("updateParticipantData", &[])?;
        debug!(endpoint = "updateParticipantData", "sending request");
        self.post(url, payload).map(drop)
    }

    /// `POST dashboard?api=updateParticipantIncentiveEligibility`, returning
    /// the updated participant when the backend echoes one.
    pub fn update_incentive_eligibility(
        &self,
        request: &IncentiveEligibilityRequest,
    ) -> Result<Option<ParticipantRecord>> {
        self.dashboard_api("updateParticipantIncentiveEligibility", request)
    }

    /// `POST dashboard?api=resetParticipantSurvey`, returning the updated
    /// participant when the backend echoes one.
    pub fn reset_participant_survey(
        &self,
        request: &ResetSurveyRequest,
    ) -> Result<Option<ParticipantRecord>> {
        self.dashboard_api("resetParticipantSurvey", request)
    }

    fn dashboard_api<B: Serialize>(&self, api: &str, body: &B) -> Result<Option<ParticipantRecord>> {
        let url = self.url("dashboard", &[("api", api)])?;
        debug!(endpoint = "dashboard", api, "sending request");
        let response = self.post(url, body)?;
        let body: Value = response.json()?;
        Ok(echoed_participant(body))
    }

    fn url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url> {
        let raw = format!("{}/{endpoint}", self.base_url);
        let parsed = if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, params)
        };
        parsed.map_err(|e| ClientError::InvalidUrl {
            message: e.to_string(),
            url: raw,
        })
    }

    fn post<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<Response> {
        self.send(self.client.post(url).json(body))
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .bearer_auth(&self.token)
            .header(USER_AGENT, format!("{CLIENT_NAME}/{}", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        debug!(status = status.as_u16(), "response received");
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: failed_body_message(response.text()),
            });
        }
        Ok(response)
    }
}

/// Mutation endpoints answer `{code, data}` where `data` is either the
/// updated participant or a one-element list holding it.
fn echoed_participant(body: Value) -> Option<ParticipantRecord> {
    let data = match body {
        Value::Object(mut object) => object.remove("data")?,
        _ => return None,
    };
    let record = match data {
        Value::Array(items) => items.into_iter().next()?,
        other => other,
    };
    ParticipantRecord::try_from(record).ok()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn client() -> DashboardClient {
        DashboardClient::new("https://api.test/app/", "secret", &DashboardConfig::default()).unwrap()
    }

    #[test]
    fn urls_carry_filters() {
        let client = client();
        assert_eq!(client.base_url(), "https://api.test/app");
        let query = ParticipantQuery::by_connect_id("1234567890");
        let url = client.url("getParticipants", &query.to_query().unwrap()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.test/app/getParticipants?type=filter&connectId=1234567890"
        );
    }

    #[test]
    fn dashboard_urls_name_the_api() {
        let client = client();
        let url = client.url("dashboard", &[("api", "resetParticipantSurvey")]).unwrap();
        assert_eq!(url.query(), Some("api=resetParticipantSurvey"));
        let bare = client.url("updateParticipantData", &[]).unwrap();
        assert_eq!(bare.query(), None);
    }

    #[test]
    fn missing_token_is_a_config_error() {
        let config = DashboardConfig {
            api_base_url: Some("https://api.test".to_string()),
            ..DashboardConfig::default()
        };
        assert!(matches!(
            DashboardClient::from_config(&config),
            Err(ClientError::Config { .. })
        ));
    }

    #[test]
    fn echoed_participant_shapes() {
        let list = json!({"code": 200, "data": [{"Connect_ID": 1}]});
        assert_eq!(
            echoed_participant(list).and_then(|r| r.connect_id()),
            Some("1".to_string())
        );
        let single = json!({"code": 200, "data": {"Connect_ID": 2}});
        assert!(echoed_participant(single).is_some());
        assert!(echoed_participant(json!({"code": 200, "data": "ok"})).is_none());
    }
}
