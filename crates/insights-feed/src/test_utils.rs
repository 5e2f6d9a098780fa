use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};

use insights_client::{Error, QueryParams, Utterance, UtteranceData};
use tokio::sync::oneshot;

use crate::UtteranceSource;

type Reply = Result<UtteranceData, Error>;

#[derive(Default)]
struct Inner {
    requests: Vec<QueryParams>,
    scripted: VecDeque<Reply>,
    gated: bool,
    waiting: VecDeque<oneshot::Sender<Reply>>,
}

/// Answers from a script, or holds every request open until the test releases it.
#[derive(Clone, Default)]
pub(crate) struct FakeSource {
    inner: Arc<Mutex<Inner>>,
}

impl FakeSource {
    pub fn scripted(replies: impl IntoIterator<Item = Reply>) -> Self {
        let source = Self::default();
        source.inner.lock().unwrap().scripted.extend(replies);
        source
    }

    pub fn gated() -> Self {
        let source = Self::default();
        source.inner.lock().unwrap().gated = true;
        source
    }

    pub fn push(&self, reply: Reply) {
        self.inner.lock().unwrap().scripted.push_back(reply);
    }

    pub fn requests(&self) -> Vec<QueryParams> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn pending(&self) -> usize {
        self.inner.lock().unwrap().waiting.len()
    }

    /// Completes the oldest request still held open.
    pub fn release(&self, reply: Reply) {
        let tx = self
            .inner
            .lock()
            .unwrap()
            .waiting
            .pop_front()
            .expect("no request in flight");
        let _ = tx.send(reply);
    }

    pub async fn wait_for_pending(&self, count: usize) {
        for _ in 0..1000 {
            if self.pending() >= count {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("expected {count} requests in flight, saw {}", self.pending());
    }
}

impl UtteranceSource for FakeSource {
    fn fetch_utterances(
        &self,
        params: QueryParams,
    ) -> impl Future<Output = Result<UtteranceData, Error>> + Send {
        let inner = Arc::clone(&self.inner);
        async move {
            let rx = {
                let mut inner = inner.lock().unwrap();
                inner.requests.push(params);
                if !inner.gated {
                    return inner
                        .scripted
                        .pop_front()
                        .unwrap_or_else(|| Ok(UtteranceData::default()));
                }
                let (tx, rx) = oneshot::channel();
                inner.waiting.push_back(tx);
                rx
            };
            rx.await.unwrap_or_else(|_| Ok(UtteranceData::default()))
        }
    }
}

pub(crate) fn utterance(id: &str) -> Utterance {
    Utterance {
        utterance_id: id.to_string(),
        meeting_id: "townhall-2025-02-10".to_string(),
        speaker: "Ana Ruiz".to_string(),
        department: "Sales".to_string(),
        region: "EMEA".to_string(),
        country: "ES".to_string(),
        start_ts: "00:00:01".to_string(),
        end_ts: "00:00:09".to_string(),
        sentiment_score: 0.4,
        content: "We hit the quarterly target.".to_string(),
        topics: vec!["targets".to_string()],
        link_to_clip: String::new(),
    }
}

/// A page of `len` utterances with ids `{prefix}-0..`.
pub(crate) fn page(prefix: &str, len: usize, total_count: u64) -> UtteranceData {
    UtteranceData {
        items: (0..len)
            .map(|i| utterance(&format!("{prefix}-{i}")))
            .collect(),
        total_count,
        ..Default::default()
    }
}

pub(crate) fn status_error(status: u16) -> Error {
    Error::Http(insights_http::Error::Status {
        status,
        status_text: "Internal Server Error".to_string(),
    })
}
