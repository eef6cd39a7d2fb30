mod client;

use std::sync::Arc;

use bytes::Bytes;
use futures::{future::BoxFuture, TryFutureExt};

use crate::error::Error;

pub use self::client::ReqwestClient;

/// How the response body should be delivered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResponseType {
    /// Raw bytes, untouched.
    #[default]
    Binary,
}

/// Per-request configuration passed to [`HttpClient::get`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RequestConfig {
    pub response_type: ResponseType,
}

impl RequestConfig {
    /// Configuration for fetching raw asset bytes.
    #[inline]
    pub const fn binary() -> Self {
        RequestConfig {
            response_type: ResponseType::Binary,
        }
    }
}

/// Response of a completed request.
///
/// Any status is a completed request.
/// Only failures that happen before a status arrives are errors of [`HttpClient`].
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub data: Option<Bytes>,
}

impl HttpResponse {
    pub fn ok(data: impl Into<Bytes>) -> Self {
        HttpResponse {
            status: 200,
            status_text: "OK".to_owned(),
            data: Some(data.into()),
        }
    }

    /// Checks status against the only one accepted as success.
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Abstract HTTP transport.
pub trait HttpClient: Send + Sync + 'static {
    /// Transport-level error, such as refused connection or DNS failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issues single GET request for `url`.
    fn get<'a>(
        &'a self,
        url: &'a str,
        config: RequestConfig,
    ) -> BoxFuture<'a, Result<HttpResponse, Self::Error>>;
}

pub(crate) trait AnyHttpClient: Send + Sync + 'static {
    fn get<'a>(
        &'a self,
        url: &'a str,
        config: RequestConfig,
    ) -> BoxFuture<'a, Result<HttpResponse, Error>>;
}

impl<C> AnyHttpClient for C
where
    C: HttpClient,
{
    fn get<'a>(
        &'a self,
        url: &'a str,
        config: RequestConfig,
    ) -> BoxFuture<'a, Result<HttpResponse, Error>> {
        let fut = HttpClient::get(self, url, config);
        Box::pin(fut.map_err(move |err| Error::Network {
            url: url.into(),
            source: Box::new(err),
        }))
    }
}

pub(crate) type SharedClient = Arc<dyn AnyHttpClient>;

/// Fetches binary content at `url`.
/// Anything but `200` with a body is an error.
pub(crate) async fn fetch_binary(client: &dyn AnyHttpClient, url: &str) -> Result<Bytes, Error> {
    let response = client.get(url, RequestConfig::binary()).await?;

    tracing::debug!("GET '{}' -> {} {}", url, response.status, response.status_text);

    if !response.is_ok() {
        tracing::warn!(
            "Rejecting '{}' with status {} {}",
            url,
            response.status,
            response.status_text
        );
        return Err(Error::Fetch {
            status: response.status,
            status_text: response.status_text,
        });
    }

    match response.data {
        Some(data) => Ok(data),
        None => Err(Error::Fetch {
            status: response.status,
            status_text: "Response has no body".to_owned(),
        }),
    }
}
