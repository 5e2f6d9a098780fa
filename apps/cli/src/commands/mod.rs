pub mod chat;
pub mod dashboard;
pub mod speakers;
pub mod trends;
pub mod utterances;

use insights_client::{InsightsClient, InsightsHttpClient};

pub type Client = InsightsClient<InsightsHttpClient>;
