//! Client for the upstream ticketing (Discovery) API.
//!
//! Events are returned as opaque JSON documents; the gateway forwards them
//! without reshaping. Nothing here retries.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::endpoint::endpoint;
use crate::error::{Error, Result};
use crate::query::EventQueryParams;

/// An upstream event record, forwarded verbatim.
pub type Event = Value;

/// Default upstream API root.
pub const DEFAULT_TICKETMASTER_BASE_URL: &str = "https://app.ticketmaster.com/discovery/v2";

const SERVICE: &str = "ticketmaster";

/// Read-only client for suggest, search, and single-event lookup.
#[derive(Debug, Clone)]
pub struct EventClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl EventClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// API key attached to every upstream call.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Autocomplete events for `keyword`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingKeyword`] for a blank keyword, checked before any
    /// network call. A response without `_embedded.events` is
    /// [`Error::MalformedResponse`].
    pub async fn suggest(&self, keyword: &str) -> Result<Vec<Event>> {
        if keyword.trim().is_empty() {
            return Err(Error::MissingKeyword);
        }

        let body = self
            .get_json(
                "suggest",
                &[("apikey", self.api_key.as_str()), ("keyword", keyword)],
            )
            .await?;

        match embedded_events(body) {
            Some(events) => Ok(events),
            None => Err(Error::MalformedResponse {
                service: SERVICE,
                message: "suggest response has no _embedded.events".to_string(),
            }),
        }
    }

    /// Run a full event search. No embedded events means no results.
    pub async fn search(&self, params: &EventQueryParams) -> Result<Vec<Event>> {
        let url = endpoint(&self.base_url, &["events.json"])?;
        let response = self.client.get(url).query(params).send().await?;
        let body = Self::decode(response).await?;

        let events = embedded_events(body).unwrap_or_default();
        debug!(count = events.len(), "event search completed");
        Ok(events)
    }

    /// Fetch a single event by identifier.
    ///
    /// The id is sent as one encoded path segment, so it cannot address any
    /// other upstream resource.
    ///
    /// # Errors
    ///
    /// [`Error::EventNotFound`] when upstream answers 404; any other failure
    /// keeps its own variant.
    pub async fn get_by_id(&self, id: &str) -> Result<Event> {
        let segment = format!("{id}.json");
        let url = endpoint(&self.base_url, &["events", segment.as_str()])?;
        let response = self
            .client
            .get(url)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::EventNotFound { id: id.to_string() });
        }

        Self::decode(response).await
    }

    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = endpoint(&self.base_url, &[path])?;
        let response = self.client.get(url).query(query).send().await?;
        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), url = %response.url().path(), "upstream request failed");
            return Err(Error::UpstreamStatus {
                service: SERVICE,
                status: status.as_u16(),
            });
        }
        Ok(response.json::<Value>().await?)
    }
}

fn embedded_events(mut body: Value) -> Option<Vec<Event>> {
    match body.pointer_mut("/_embedded/events")?.take() {
        Value::Array(events) => Some(events),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_embedded_events() {
        let body = json!({"_embedded": {"events": [{"id": "a"}, {"id": "b"}]}});
        let events = embedded_events(body).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["id"], "a");
    }

    #[test]
    fn missing_or_mistyped_embedded_is_none() {
        assert!(embedded_events(json!({"page": {"totalElements": 0}})).is_none());
        assert!(embedded_events(json!({"_embedded": {"venues": []}})).is_none());
        assert!(embedded_events(json!({"_embedded": {"events": {}}})).is_none());
    }

    #[tokio::test]
    async fn blank_keyword_is_rejected_locally() {
        // Unroutable base URL: any network attempt would surface as Error::Http.
        let client = EventClient::new(Client::new(), "http://127.0.0.1:9", "key");
        let err = client.suggest("   ").await.unwrap_err();
        assert!(matches!(err, Error::MissingKeyword));
    }
}
