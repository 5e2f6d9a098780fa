use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{Months, NaiveDate};
use insights_client::{
    HttpClient, InsightsClient, QueryParams, Speaker, SpeakerData, Trend, TrendData, Utterance,
    UtteranceData,
};
use regex::Regex;

/// Large enough to pull every utterance for the headline numbers.
pub const ALL_UTTERANCES_TOP: u32 = 10_000;

pub const TOP_LIST_LEN: usize = 5;

const UNKNOWN: &str = "Unknown";
const QUARTER: Months = Months::new(3);

static MEETING_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4}-\d{2}-\d{2})").expect("Invalid regex"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct DashboardMetrics {
    pub total_topics: usize,
    pub active_speakers: usize,
    /// Mean speaker sentiment as a rounded percentage.
    pub avg_sentiment: i64,
    pub meetings_held: usize,
    pub quarterly_meetings: usize,
    pub unique_regions: usize,
    pub unique_departments: usize,
    pub total_utterances: u64,
    /// Mean non-zero utterance sentiment as a rounded percentage.
    pub avg_utterance_sentiment: i64,
}

impl DashboardMetrics {
    pub fn compute(
        trends: &TrendData,
        speakers: &SpeakerData,
        utterances: &UtteranceData,
        today: NaiveDate,
    ) -> Self {
        let items = &utterances.items;

        Self {
            total_topics: trends.trends.len(),
            active_speakers: speakers.results.len(),
            avg_sentiment: mean(speakers.results.iter().map(|s| s.avg_sentiment))
                .map(as_percent)
                .unwrap_or(0),
            meetings_held: count_distinct(items.iter().map(|u| u.meeting_id.as_str())),
            quarterly_meetings: quarterly_meetings(items, today),
            unique_regions: count_known(items.iter().map(|u| u.region.as_str())),
            unique_departments: count_known(items.iter().map(|u| u.department.as_str())),
            total_utterances: utterances.total_count,
            avg_utterance_sentiment: mean(
                items
                    .iter()
                    .map(|u| u.sentiment_score)
                    .filter(|score| *score != 0.0),
            )
            .map(as_percent)
            .unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub metrics: DashboardMetrics,
    pub trends: TrendData,
    pub speakers: SpeakerData,
    pub utterances: UtteranceData,
    pub error: Option<String>,
}

impl Dashboard {
    /// Zeroed dashboard that still reports why it is empty.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            metrics: DashboardMetrics::default(),
            trends: TrendData::default(),
            speakers: SpeakerData::default(),
            utterances: UtteranceData::default(),
            error: Some(message.into()),
        }
    }

    pub fn top_trends(&self) -> &[Trend] {
        &self.trends.trends[..self.trends.trends.len().min(TOP_LIST_LEN)]
    }

    /// Most active speakers in server order, without moderators.
    pub fn top_speakers(&self) -> Vec<&Speaker> {
        self.speakers
            .results
            .iter()
            .filter(|s| !s.display_name.to_lowercase().contains("moderator"))
            .take(TOP_LIST_LEN)
            .collect()
    }
}

pub async fn load_dashboard<C: HttpClient>(
    client: &InsightsClient<C>,
    today: NaiveDate,
) -> Dashboard {
    let everything = QueryParams::new().with("top", ALL_UTTERANCES_TOP.to_string());
    let none = QueryParams::new();

    let result = futures_util::future::try_join3(
        client.get_utterances(&everything),
        client.get_speakers(&none),
        client.get_trends(&none),
    )
    .await;

    match result {
        Ok((utterances, speakers, trends)) => Dashboard {
            metrics: DashboardMetrics::compute(&trends, &speakers, &utterances, today),
            trends,
            speakers,
            utterances,
            error: None,
        },
        Err(err) => {
            tracing::warn!(error = %err, "dashboard_load_failed");
            Dashboard::failed(err.to_string())
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

// Half-up rounding, so -0.5 becomes 0 rather than -1.
fn as_percent(value: f64) -> i64 {
    (value * 100.0 + 0.5).floor() as i64
}

fn count_distinct<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values.collect::<HashSet<_>>().len()
}

fn count_known<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    count_distinct(values.filter(|v| !v.is_empty() && *v != UNKNOWN))
}

fn quarterly_meetings(items: &[Utterance], today: NaiveDate) -> usize {
    let since = today.checked_sub_months(QUARTER).unwrap_or(NaiveDate::MIN);

    count_distinct(
        items
            .iter()
            .map(|u| u.meeting_id.as_str())
            .filter(|id| !id.is_empty())
            .filter(|id| match MEETING_DATE_RE.captures(id) {
                Some(caps) => NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d")
                    .is_ok_and(|date| date >= since),
                None => true,
            }),
    )
}
