//! Production [`HttpClient`] over reqwest.
//!
//! Timeouts are per call. For `get` and `post` the timeout bounds the whole
//! exchange, body included. For `post_stream` it bounds the wait for the
//! response head and then every gap between body chunks, so a stream that
//! keeps producing data is never cut off.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::{self, Stream, StreamExt};
use std::time::Duration;

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, Response};

/// Shared reqwest client; one instance serves the health probe and messages.
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn request(
        &self,
        method: reqwest::Method,
        url: &str,
        headers: &Headers,
    ) -> reqwest::RequestBuilder {
        headers
            .iter()
            .fold(self.client.request(method, url), |builder, (name, value)| {
                builder.header(name, value)
            })
    }
}

fn request_error(err: reqwest::Error) -> HttpError {
    let detail = err.to_string();
    if err.is_timeout() {
        HttpError::Timeout(detail)
    } else if err.is_connect() {
        HttpError::ConnectionFailed(detail)
    } else if err.is_builder() {
        HttpError::InvalidUrl(detail)
    } else {
        HttpError::Other(detail)
    }
}

fn body_error(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout(err.to_string())
    } else {
        HttpError::Io(err.to_string())
    }
}

fn response_headers(map: &reqwest::header::HeaderMap) -> Headers {
    map.iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect()
}

async fn buffered(response: reqwest::Response) -> Result<Response, HttpError> {
    let status = response.status().as_u16();
    let headers = response_headers(response.headers());
    let body = response.bytes().await.map_err(request_error)?;
    Ok(Response::with_headers(status, headers, body))
}

/// Ends `body` with a `Timeout` error once no chunk arrives for `idle`.
/// The first error ends the stream.
fn idle_bounded<S>(body: S, idle: Duration) -> ByteStream
where
    S: Stream<Item = Result<Bytes, HttpError>> + Send + 'static,
{
    let body = Box::pin(body);
    Box::pin(stream::unfold(Some(body), move |state| async move {
        let mut body = state?;
        match tokio::time::timeout(idle, body.next()).await {
            Ok(Some(Ok(chunk))) => Some((Ok(chunk), Some(body))),
            Ok(Some(Err(err))) => Some((Err(err), None)),
            Ok(None) => None,
            Err(_) => Some((
                Err(HttpError::Timeout(format!("no data received for {:?}", idle))),
                None,
            )),
        }
    }))
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(
        &self,
        url: &str,
        headers: &Headers,
        timeout: Duration,
    ) -> Result<Response, HttpError> {
        let response = self
            .request(reqwest::Method::GET, url, headers)
            .timeout(timeout)
            .send()
            .await
            .map_err(request_error)?;
        buffered(response).await
    }

    async fn post(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
        timeout: Duration,
    ) -> Result<Response, HttpError> {
        let response = self
            .request(reqwest::Method::POST, url, headers)
            .body(body.to_string())
            .timeout(timeout)
            .send()
            .await
            .map_err(request_error)?;
        buffered(response).await
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
        timeout: Duration,
    ) -> Result<ByteStream, HttpError> {
        let pending = self
            .request(reqwest::Method::POST, url, headers)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .body(body.to_string())
            .send();

        let response = tokio::time::timeout(timeout, pending)
            .await
            .map_err(|_| HttpError::Timeout(format!("no response within {:?}", timeout)))?
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(HttpError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(idle_bounded(
            response.bytes_stream().map(|chunk| chunk.map_err(body_error)),
            timeout,
        ))
    }
}
