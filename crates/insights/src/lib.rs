mod client;
mod error;
pub mod query;
pub mod sentiment;
mod types;

pub use client::InsightsClient;
pub use error::*;
pub use query::{ALL, PageRequest, QueryParams, SentimentBucket, UtteranceFilters};
pub use sentiment::{SentimentLabel, SpeakerSentimentLabel};
pub use types::*;

pub use insights_http::{HttpClient, InsightsHttpClient, InsightsHttpClientBuilder};

macro_rules! common_derives {
    ($item:item) => {
        #[derive(Debug, PartialEq, Clone, serde::Serialize, serde::Deserialize)]
        $item
    };
}

pub(crate) use common_derives;
