use insights_http::HttpClient;

use crate::error::Error;
use crate::query::QueryParams;
use crate::types::{ChatQuery, ChatResponse, SpeakerData, TrendData, UtteranceData};

pub struct InsightsClient<C> {
    http: C,
}

impl<C: HttpClient> InsightsClient<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub async fn chat_query(&self, req: ChatQuery) -> Result<ChatResponse, Error> {
        let body = serde_json::to_vec(&req)?;
        let bytes = self.http.post("/chat/query", body).await?;
        let response: ChatResponse = serde_json::from_slice(&bytes)?;
        Ok(response)
    }

    pub async fn get_trends(&self, params: &QueryParams) -> Result<TrendData, Error> {
        let bytes = self.http.get(&params.endpoint("/insights/trends")).await?;
        let response: TrendData = serde_json::from_slice(&bytes)?;
        tracing::debug!(trends = response.trends.len(), "trends_received");
        Ok(response)
    }

    pub async fn get_speakers(&self, params: &QueryParams) -> Result<SpeakerData, Error> {
        let bytes = self.http.get(&params.endpoint("/insights/speakers")).await?;
        let response: SpeakerData = serde_json::from_slice(&bytes)?;
        tracing::debug!(speakers = response.results.len(), "speakers_received");
        Ok(response)
    }

    pub async fn get_utterances(&self, params: &QueryParams) -> Result<UtteranceData, Error> {
        let bytes = self
            .http
            .get(&params.endpoint("/insights/utterances"))
            .await?;
        let response: UtteranceData = serde_json::from_slice(&bytes)?;
        tracing::debug!(
            items = response.items.len(),
            total_count = response.total_count,
            "utterances_received"
        );
        Ok(response)
    }
}
