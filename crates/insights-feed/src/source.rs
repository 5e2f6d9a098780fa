use std::future::Future;
use std::sync::Arc;

use insights_client::{Error, HttpClient, InsightsClient, QueryParams, UtteranceData};

/// Where a [`crate::PagedFeed`] pulls utterance pages from.
pub trait UtteranceSource: Send + Sync {
    fn fetch_utterances(
        &self,
        params: QueryParams,
    ) -> impl Future<Output = Result<UtteranceData, Error>> + Send;
}

impl<C: HttpClient> UtteranceSource for InsightsClient<C> {
    async fn fetch_utterances(&self, params: QueryParams) -> Result<UtteranceData, Error> {
        self.get_utterances(&params).await
    }
}

impl<S: UtteranceSource> UtteranceSource for Arc<S> {
    fn fetch_utterances(
        &self,
        params: QueryParams,
    ) -> impl Future<Output = Result<UtteranceData, Error>> + Send {
        (**self).fetch_utterances(params)
    }
}

impl<S: UtteranceSource> UtteranceSource for &S {
    fn fetch_utterances(
        &self,
        params: QueryParams,
    ) -> impl Future<Output = Result<UtteranceData, Error>> + Send {
        (**self).fetch_utterances(params)
    }
}
