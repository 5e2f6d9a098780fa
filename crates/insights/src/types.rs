use chrono::{DateTime, FixedOffset};

use crate::common_derives;
use crate::sentiment::{SentimentLabel, SpeakerSentimentLabel};

const SUPPORT_PREVIEW: usize = 3;
const QUOTE_PREVIEW: usize = 2;

common_derives! {
    pub struct ChatQuery {
        pub question: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub context: Option<String>,
    }
}

common_derives! {
    pub struct ChatResponse {
        pub answer: String,
        #[serde(default)]
        pub data: serde_json::Value,
        #[serde(default)]
        pub sources: Vec<String>,
        #[serde(default)]
        pub confidence: f64,
        #[serde(default)]
        pub intent: Option<String>,
        #[serde(default)]
        pub parameters_used: Option<serde_json::Value>,
    }
}

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Momentum {
    Up,
    Down,
    /// Also covers any momentum value this client does not know about.
    #[default]
    #[serde(other)]
    Flat,
}

common_derives! {
    pub struct SupportRef {
        pub meeting_id: String,
        pub ts: String,
    }
}

common_derives! {
    pub struct Trend {
        pub name: String,
        #[serde(default)]
        pub description: String,
        pub meetings_count: u64,
        pub avg_sentiment: f64,
        #[serde(default)]
        pub momentum: Momentum,
        #[serde(default)]
        pub novelty_score: f64,
        #[serde(default)]
        pub support: Vec<SupportRef>,
    }
}

impl Trend {
    pub fn support_preview(&self) -> &[SupportRef] {
        &self.support[..self.support.len().min(SUPPORT_PREVIEW)]
    }
}

common_derives! {
    #[derive(Default)]
    pub struct TrendData {
        #[serde(default)]
        pub window_start: String,
        #[serde(default)]
        pub window_end: String,
        #[serde(default)]
        pub trends: Vec<Trend>,
    }
}

impl TrendData {
    pub fn total_topics(&self) -> usize {
        self.trends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trends.is_empty()
    }

    pub fn window_dates(&self) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let start = DateTime::parse_from_rfc3339(&self.window_start).ok()?;
        let end = DateTime::parse_from_rfc3339(&self.window_end).ok()?;
        Some((start, end))
    }
}

common_derives! {
    pub struct ExemplarQuote {
        pub quote: String,
        pub meeting_id: String,
        pub ts: String,
    }
}

common_derives! {
    pub struct Speaker {
        pub speaker_id: String,
        pub display_name: String,
        #[serde(default)]
        pub department: String,
        #[serde(default)]
        pub region: String,
        #[serde(default)]
        pub country: String,
        #[serde(default)]
        pub mentions: u64,
        pub avg_sentiment: f64,
        #[serde(default)]
        pub exemplar_quotes: Vec<ExemplarQuote>,
    }
}

impl Speaker {
    pub fn quote_preview(&self) -> &[ExemplarQuote] {
        &self.exemplar_quotes[..self.exemplar_quotes.len().min(QUOTE_PREVIEW)]
    }

    pub fn sentiment_label(&self) -> SpeakerSentimentLabel {
        SpeakerSentimentLabel::classify(self.avg_sentiment)
    }
}

common_derives! {
    #[derive(Default)]
    pub struct SpeakerData {
        #[serde(default)]
        pub results: Vec<Speaker>,
    }
}

common_derives! {
    pub struct Utterance {
        pub utterance_id: String,
        pub meeting_id: String,
        pub speaker: String,
        #[serde(default)]
        pub department: String,
        #[serde(default)]
        pub region: String,
        #[serde(default)]
        pub country: String,
        pub start_ts: String,
        pub end_ts: String,
        pub sentiment_score: f64,
        pub content: String,
        #[serde(default)]
        pub topics: Vec<String>,
        #[serde(default)]
        pub link_to_clip: String,
    }
}

impl Utterance {
    pub fn sentiment_label(&self) -> SentimentLabel {
        SentimentLabel::classify(self.sentiment_score)
    }
}

common_derives! {
    #[derive(Default)]
    pub struct Pagination {
        pub top: u32,
        pub skip: u32,
        pub has_more: bool,
    }
}

common_derives! {
    #[derive(Default)]
    pub struct UtteranceData {
        #[serde(default)]
        pub items: Vec<Utterance>,
        #[serde(default)]
        pub total_count: u64,
        #[serde(default)]
        pub search_text: String,
        #[serde(default)]
        pub filters_applied: serde_json::Value,
        #[serde(default)]
        pub pagination: Pagination,
    }
}
