use crate::error::{ReferenceError, SearchError};
use crate::models::{NameRequest, PreferenceRequest, RecommendationResponse, SchoolRecord};
use crate::normalize::{normalize_record, parse_response};
use crate::traits::{RecommendationApi, ReferenceApi};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// HTTP transport for the recommendation backend. One `reqwest::Client` is
/// reused across every call of the session.
pub struct HttpApi {
    client: Client,
    base_url: Url,
}

#[derive(Deserialize)]
struct SchoolsPayload {
    schools: Vec<String>,
}

#[derive(Deserialize)]
struct CitiesPayload {
    cities: Vec<String>,
}

#[derive(Deserialize)]
struct ZipcodesPayload {
    zipcodes: Vec<String>,
}

impl HttpApi {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, url::ParseError> {
        let base_url = Url::parse(base_url.as_ref())?;
        if base_url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
        }

        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    // Joined against the base, so a base of "http://host:5000" or
    // "http://host:5000/" resolves the same way.
    fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }

    async fn fetch_list<T>(&self, resource: &'static str, path: &str) -> Result<T, ReferenceError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.client.get(self.endpoint(path)?).send().await?;

        if !response.status().is_success() {
            return Err(ReferenceError::Fetch {
                resource,
                status: response.status().to_string(),
            });
        }

        Ok(response.json().await?)
    }

    async fn post_recommendation<B>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<RecommendationResponse, SearchError>
    where
        B: Serialize + Sync,
    {
        let response = self
            .client
            .post(self.endpoint(path)?)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.json::<Value>().await.unwrap_or(Value::Null);
            return Err(SearchError::RecommendationFailed(error_message(
                &body, status,
            )));
        }

        let payload: Value = response.json().await?;
        Ok(parse_response(&payload))
    }
}

#[async_trait]
impl ReferenceApi for HttpApi {
    async fn fetch_schools(&self) -> Result<Vec<String>, ReferenceError> {
        let payload: SchoolsPayload = self.fetch_list("schools", "api/schools").await?;
        Ok(payload.schools)
    }

    async fn fetch_cities(&self) -> Result<Vec<String>, ReferenceError> {
        let payload: CitiesPayload = self.fetch_list("cities", "api/cities").await?;
        Ok(payload.cities)
    }

    async fn fetch_zipcodes(&self) -> Result<Vec<String>, ReferenceError> {
        let payload: ZipcodesPayload = self.fetch_list("zipcodes", "api/zipcodes").await?;
        Ok(payload.zipcodes)
    }
}

#[async_trait]
impl RecommendationApi for HttpApi {
    async fn recommend_by_name(
        &self,
        request: &NameRequest,
    ) -> Result<RecommendationResponse, SearchError> {
        self.post_recommendation("api/recommend/by-name", request)
            .await
    }

    async fn recommend_by_preferences(
        &self,
        request: &PreferenceRequest,
    ) -> Result<RecommendationResponse, SearchError> {
        self.post_recommendation("api/recommend/by-preferences", request)
            .await
    }

    async fn school_details(&self, school_name: &str) -> Result<SchoolRecord, SearchError> {
        // Url::join percent-encodes the name, so "Lincoln Elementary" is a
        // single path segment on the wire.
        let url = self.endpoint(&format!("api/school/{school_name}"))?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.json::<Value>().await.unwrap_or(Value::Null);
            return Err(SearchError::RecommendationFailed(error_message(
                &body, status,
            )));
        }

        let payload: Value = response.json().await?;
        Ok(normalize_record(&payload))
    }
}

/// Pulls the backend's message out of a failure body, with a generic
/// fallback when the body is not JSON or carries no message.
fn error_message(body: &Value, status: StatusCode) -> String {
    body.pointer("/error")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("recommendation request failed with status {status}"))
}
