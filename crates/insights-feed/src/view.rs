use insights_client::{
    Error, HttpClient, InsightsClient, QueryParams, SpeakerData, TrendData,
};

/// Data for a single-fetch view. A failed fetch leaves `data` empty and keeps
/// the message for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    pub data: T,
    pub error: Option<String>,
}

impl<T: Default> ViewState<T> {
    pub fn from_result(view: &'static str, result: Result<T, Error>) -> Self {
        match result {
            Ok(data) => Self { data, error: None },
            Err(err) => {
                tracing::warn!(view, error = %err, "view_load_failed");
                Self {
                    data: T::default(),
                    error: Some(err.to_string()),
                }
            }
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

pub async fn load_trends<C: HttpClient>(client: &InsightsClient<C>) -> ViewState<TrendData> {
    ViewState::from_result("trends", client.get_trends(&QueryParams::new()).await)
}

pub async fn load_speakers<C: HttpClient>(client: &InsightsClient<C>) -> ViewState<SpeakerData> {
    ViewState::from_result("speakers", client.get_speakers(&QueryParams::new()).await)
}
