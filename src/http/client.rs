use std::time::Duration;

use futures::future::BoxFuture;

use super::{HttpClient, HttpResponse, RequestConfig, ResponseType};

/// [`HttpClient`] backed by `reqwest`.
///
/// Follows reqwest's default redirect policy and imposes no timeout
/// unless one is configured.
/// Bodies of non-success responses are not downloaded.
#[derive(Clone, Debug, Default)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        ReqwestClient::default()
    }

    /// Builds client with optional request timeout and user agent.
    pub fn with_options(
        timeout: Option<Duration>,
        user_agent: Option<&str>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = user_agent {
            builder = builder.user_agent(user_agent);
        }

        Ok(ReqwestClient {
            client: builder.build()?,
        })
    }

    /// Wraps preconfigured `reqwest` client.
    pub fn from_client(client: reqwest::Client) -> Self {
        ReqwestClient { client }
    }
}

impl HttpClient for ReqwestClient {
    type Error = reqwest::Error;

    fn get<'a>(
        &'a self,
        url: &'a str,
        config: RequestConfig,
    ) -> BoxFuture<'a, Result<HttpResponse, reqwest::Error>> {
        Box::pin(async move {
            let response = self.client.get(url).send().await?;

            let status = response.status();
            let status_text = status.canonical_reason().unwrap_or_default().to_owned();

            // Body of a rejected response is never delivered, so it is not read.
            if !status.is_success() {
                return Ok(HttpResponse {
                    status: status.as_u16(),
                    status_text,
                    data: None,
                });
            }

            let data = match config.response_type {
                ResponseType::Binary => response.bytes().await?,
            };

            Ok(HttpResponse {
                status: status.as_u16(),
                status_text,
                data: Some(data),
            })
        })
    }
}
