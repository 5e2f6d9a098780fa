use std::sync::{PoisonError, RwLock};

use reqwest::header::CONTENT_TYPE;

use crate::{Error, HttpClient};

pub fn is_local_host(host: &str) -> bool {
    matches!(
        host,
        "localhost" | "127.0.0.1" | "0.0.0.0" | "::1" | "[::1]"
    )
}

/// reqwest-backed transport for the insights service.
///
/// Requests to a non-local base URL carry the access key as a `code` query
/// parameter. Local development hosts never receive it.
pub struct InsightsHttpClient {
    client: reqwest::Client,
    api_base: String,
    access_key: Option<String>,
    local: bool,
    access_token: RwLock<Option<String>>,
}

impl InsightsHttpClient {
    pub fn builder() -> InsightsHttpClientBuilder {
        InsightsHttpClientBuilder::default()
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn is_local(&self) -> bool {
        self.local
    }

    pub fn set_access_token(&self, token: impl Into<String>) {
        let mut guard = self
            .access_token
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Some(token.into());
    }

    pub fn clear_access_token(&self) {
        let mut guard = self
            .access_token
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    fn access_token(&self) -> Option<String> {
        self.access_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn url_for(&self, endpoint: &str) -> String {
        let mut url = format!("{}{}", self.api_base, endpoint);
        if !self.local
            && let Some(key) = &self.access_key
        {
            let separator = if endpoint.contains('?') { '&' } else { '?' };
            url.push(separator);
            url.push_str("code=");
            url.push_str(&urlencoding::encode(key));
        }
        url
    }

    fn prepare(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder.header(CONTENT_TYPE, "application/json");
        match self.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: reqwest::RequestBuilder, endpoint: &str) -> Result<Vec<u8>, Error> {
        let response = match self.prepare(builder).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(endpoint = %endpoint, error = %err, "insights_request_unreachable");
                return Err(err.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                endpoint = %endpoint,
                http_status = %status.as_u16(),
                "insights_request_rejected"
            );
            return Err(Error::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

impl HttpClient for InsightsHttpClient {
    async fn get(&self, path: &str) -> Result<Vec<u8>, Error> {
        tracing::debug!(method = "GET", endpoint = %path, keyed = !self.local, "insights_request");
        let builder = self.client.get(self.url_for(path));
        self.send(builder, path).await
    }

    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, Error> {
        tracing::debug!(method = "POST", endpoint = %path, keyed = !self.local, "insights_request");
        let builder = self.client.post(self.url_for(path)).body(body);
        self.send(builder, path).await
    }
}

#[derive(Default)]
pub struct InsightsHttpClientBuilder {
    api_base: Option<String>,
    access_key: Option<String>,
    access_token: Option<String>,
    client: Option<reqwest::Client>,
}

impl InsightsHttpClientBuilder {
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    pub fn access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    pub fn access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> Result<InsightsHttpClient, Error> {
        let api_base = self
            .api_base
            .filter(|base| !base.trim().is_empty())
            .ok_or_else(|| Error::InvalidConfig("api_base is required".into()))?;
        let api_base = api_base.trim().trim_end_matches('/').to_string();

        let parsed = url::Url::parse(&api_base)
            .map_err(|e| Error::InvalidConfig(format!("invalid api_base {api_base:?}: {e}")))?;
        let local = parsed.host_str().is_some_and(is_local_host);

        let access_key = self.access_key.filter(|key| !key.is_empty());
        if !local && access_key.is_none() {
            return Err(Error::InvalidConfig(
                "access_key is required for non-local api_base".into(),
            ));
        }

        Ok(InsightsHttpClient {
            client: self.client.unwrap_or_default(),
            api_base,
            access_key,
            local,
            access_token: RwLock::new(self.access_token.filter(|token| !token.is_empty())),
        })
    }
}
