mod client;
mod error;

use std::future::Future;

pub use client::{InsightsHttpClient, InsightsHttpClientBuilder, is_local_host};
pub use error::Error;

/// Transport used by the typed insights client.
///
/// Implementations resolve `path` against their own base URL and return the raw
/// response body of a successful (2xx) response.
pub trait HttpClient: Send + Sync {
    fn get(&self, path: &str) -> impl Future<Output = Result<Vec<u8>, Error>> + Send;

    fn post(&self, path: &str, body: Vec<u8>)
    -> impl Future<Output = Result<Vec<u8>, Error>> + Send;
}

impl<T: HttpClient> HttpClient for std::sync::Arc<T> {
    fn get(&self, path: &str) -> impl Future<Output = Result<Vec<u8>, Error>> + Send {
        (**self).get(path)
    }

    fn post(
        &self,
        path: &str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<Vec<u8>, Error>> + Send {
        (**self).post(path, body)
    }
}
