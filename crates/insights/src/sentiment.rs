//! Sentiment scores are in `[-1, 1]`. The `±0.3` band is the neutral zone used
//! both for labelling and for the sentiment bucket query parameters.

pub const POSITIVE_THRESHOLD: f64 = 0.3;
pub const NEGATIVE_THRESHOLD: f64 = -0.3;

const VERY_POSITIVE_THRESHOLD: f64 = 0.7;
const VERY_NEGATIVE_THRESHOLD: f64 = -0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn classify(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            Self::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum SpeakerSentimentLabel {
    #[strum(serialize = "Very Positive")]
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    #[strum(serialize = "Very Negative")]
    VeryNegative,
}

impl SpeakerSentimentLabel {
    pub fn classify(score: f64) -> Self {
        if score > VERY_POSITIVE_THRESHOLD {
            Self::VeryPositive
        } else if score > POSITIVE_THRESHOLD {
            Self::Positive
        } else if score > NEGATIVE_THRESHOLD {
            Self::Neutral
        } else if score > VERY_NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::VeryNegative
        }
    }
}

/// `0.4231` renders as `42.3%`.
pub fn format_percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}
