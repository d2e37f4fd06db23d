use std::time::Duration;

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::response::{IntoResponse, Response};
use crate::SocialMediaError;

/// Thin JSON-over-HTTP client bound to one platform's base URL.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Response<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .into_response("failed to build http client")?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    /// Adds a header sent with every request. `name` must be lowercase.
    pub fn with_header(
        mut self,
        name: &'static str,
        value: &str,
    ) -> Response<Self> {
        self.headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_str(value)
                .into_response("failed to build header")?,
        );

        Ok(self)
    }

    /// GETs `{base_url}/{path}` and decodes the JSON body. Non-2xx statuses
    /// are returned as errors together with the body text.
    pub async fn get<T, Q>(
        &self,
        path: &str,
        query: &Q,
        bearer: Option<&str>,
    ) -> Response<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let mut headers = self.headers.clone();
        if let Some(token) = bearer {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .into_response("failed to build authorization header")?,
            );
        }

        let response = self
            .http
            .get(format!("{}/{}", self.base_url, path))
            .headers(headers)
            .query(query)
            .send()
            .await
            .into_response("failed to send")?;

        let status = response.status();
        let text = response.text().await.into_response("failed to get text")?;

        if !status.is_success() {
            return Err(SocialMediaError::FailedStatusCode {
                status_code: status,
                message: text,
            });
        }

        serde_json::from_str::<T>(&text).into_response("failed to decode body")
    }
}
