use std::fmt;

use crate::sentiment::{NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD};

/// Sentinel for "no restriction" on a categorical filter.
pub const ALL: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing any earlier value for it.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    pub fn endpoint(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.to_query_string())
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SentimentBucket {
    #[default]
    All,
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UtteranceFilters {
    /// Settled (debounced) search text. Empty means no search.
    pub search: String,
    pub speaker: String,
    pub department: String,
    pub region: String,
    pub sentiment: SentimentBucket,
}

impl Default for UtteranceFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            speaker: ALL.to_string(),
            department: ALL.to_string(),
            region: ALL.to_string(),
            sentiment: SentimentBucket::All,
        }
    }
}

impl UtteranceFilters {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn to_params(&self, page: PageRequest) -> QueryParams {
        let mut params = QueryParams::new()
            .with("top", page.top().to_string())
            .with("skip", page.skip().to_string());

        if !self.search.is_empty() {
            params.insert("search", self.search.as_str());
        }
        for (key, value) in [
            ("speaker", &self.speaker),
            ("department", &self.department),
            ("region", &self.region),
        ] {
            if value != ALL {
                params.insert(key, value.as_str());
            }
        }

        match self.sentiment {
            SentimentBucket::All => {}
            SentimentBucket::Positive => {
                params.insert("sentiment_min", POSITIVE_THRESHOLD.to_string());
            }
            SentimentBucket::Negative => {
                params.insert("sentiment_max", NEGATIVE_THRESHOLD.to_string());
            }
            SentimentBucket::Neutral => {
                params.insert("sentiment_min", NEGATIVE_THRESHOLD.to_string());
                params.insert("sentiment_max", POSITIVE_THRESHOLD.to_string());
            }
        }

        params
    }
}

/// One-based page index plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    pub fn first(page_size: u32) -> Self {
        Self::new(1, page_size)
    }

    pub fn top(&self) -> u32 {
        self.page_size
    }

    pub fn skip(&self) -> u32 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

impl fmt::Display for PageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {} (top={}, skip={})", self.page, self.top(), self.skip())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeSet;

    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    impl Arbitrary for SentimentBucket {
        fn arbitrary(g: &mut Gen) -> Self {
            *g.choose(&[
                SentimentBucket::All,
                SentimentBucket::Positive,
                SentimentBucket::Negative,
                SentimentBucket::Neutral,
            ])
            .unwrap()
        }
    }

    impl Arbitrary for UtteranceFilters {
        fn arbitrary(g: &mut Gen) -> Self {
            let pick = |g: &mut Gen, values: &[&str]| g.choose(values).unwrap().to_string();
            Self {
                search: pick(g, &["", "budget", "supply chain", "Q3 & Q4"]),
                speaker: pick(g, &[ALL, "Ana Ruiz", "Bo Chen"]),
                department: pick(g, &[ALL, "Sales", "Finance"]),
                region: pick(g, &[ALL, "EMEA", "APAC"]),
                sentiment: SentimentBucket::arbitrary(g),
            }
        }
    }

    fn expected_keys(filters: &UtteranceFilters) -> BTreeSet<&'static str> {
        let mut keys = BTreeSet::from(["top", "skip"]);
        if !filters.search.is_empty() {
            keys.insert("search");
        }
        if filters.speaker != ALL {
            keys.insert("speaker");
        }
        if filters.department != ALL {
            keys.insert("department");
        }
        if filters.region != ALL {
            keys.insert("region");
        }
        match filters.sentiment {
            SentimentBucket::All => {}
            SentimentBucket::Positive => {
                keys.insert("sentiment_min");
            }
            SentimentBucket::Negative => {
                keys.insert("sentiment_max");
            }
            SentimentBucket::Neutral => {
                keys.insert("sentiment_min");
                keys.insert("sentiment_max");
            }
        }
        keys
    }

    #[quickcheck]
    fn params_match_rule_table(filters: UtteranceFilters, page: u8) -> bool {
        let page = PageRequest::new(u32::from(page) + 1, 20);
        let params = filters.to_params(page);
        let keys: BTreeSet<&str> = params.keys().collect();

        keys == expected_keys(&filters)
            && params.len() == keys.len()
            && params.get("skip") == Some(page.skip().to_string().as_str())
    }

    #[quickcheck]
    fn params_are_deterministic(filters: UtteranceFilters) -> bool {
        let page = PageRequest::first(20);
        filters.to_params(page) == filters.clone().to_params(page)
    }

    #[test]
    fn test_default_filters_only_paginate() {
        let params = UtteranceFilters::default().to_params(PageRequest::new(3, 20));
        assert_eq!(params.to_query_string(), "top=20&skip=40");
    }

    #[test]
    fn test_sentiment_buckets() {
        let mut filters = UtteranceFilters::default();

        filters.sentiment = SentimentBucket::Positive;
        let params = filters.to_params(PageRequest::first(20));
        assert_eq!(params.get("sentiment_min"), Some("0.3"));
        assert_eq!(params.get("sentiment_max"), None);

        filters.sentiment = SentimentBucket::Negative;
        let params = filters.to_params(PageRequest::first(20));
        assert_eq!(params.get("sentiment_min"), None);
        assert_eq!(params.get("sentiment_max"), Some("-0.3"));

        filters.sentiment = SentimentBucket::Neutral;
        let params = filters.to_params(PageRequest::first(20));
        assert_eq!(params.get("sentiment_min"), Some("-0.3"));
        assert_eq!(params.get("sentiment_max"), Some("0.3"));
    }

    #[test]
    fn test_query_string_encoding() {
        let filters = UtteranceFilters {
            search: "Q3 & Q4".into(),
            speaker: "Ana Ruiz".into(),
            ..Default::default()
        };
        let query = filters.to_params(PageRequest::first(20)).to_query_string();
        assert_eq!(query, "top=20&skip=0&search=Q3+%26+Q4&speaker=Ana+Ruiz");
    }

    #[test]
    fn test_endpoint_without_params() {
        assert_eq!(QueryParams::new().endpoint("/insights/trends"), "/insights/trends");
        assert_eq!(
            QueryParams::new()
                .with("window", "90d")
                .endpoint("/insights/trends"),
            "/insights/trends?window=90d"
        );
    }

    #[test]
    fn test_clear_restores_sentinels() {
        let mut filters = UtteranceFilters {
            region: "APAC".into(),
            sentiment: "neutral".parse().unwrap(),
            ..Default::default()
        };
        assert!(!filters.is_default());
        filters.clear();
        assert!(filters.is_default());
    }
}
