// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::observability::{create_http_attempt_span, record_http_result};
use crate::options::{ClientConfig, DEFAULT_ENDPOINT, InstrumentationClientInfo};
use gax::Result;
use gax::client_builder::Error as BuilderError;
use gax::credentials::Credentials;
use gax::error::Error;
use gax::options::RequestOptions;
use gax::polling::{PollingBackoffPolicy, PollingErrorPolicy, PollingOptions};
use gax::response::{Parts, Response};
use std::sync::Arc;
use tracing::Instrument;

/// Correlates a request with the ARM activity log.
pub const CLIENT_REQUEST_ID: &str = "x-ms-client-request-id";

/// The status codes an operation treats as success.
///
/// Any other status code is reported as an
/// [unexpected status][Error::is_unexpected_status] error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExpectedStatus {
    /// Only the listed codes.
    Codes(&'static [u16]),
    /// Any 2xx code.
    Success,
}

impl ExpectedStatus {
    pub const OK: Self = Self::Codes(&[200]);

    pub fn contains(&self, code: u16) -> bool {
        match self {
            Self::Codes(codes) => codes.contains(&code),
            Self::Success => (200..300).contains(&code),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ReqwestClient {
    inner: reqwest::Client,
    cred: Credentials,
    endpoint: String,
    polling: PollingOptions,
    instrumentation: Option<&'static InstrumentationClientInfo>,
    tracing: bool,
}

impl ReqwestClient {
    pub async fn new(config: ClientConfig, default_endpoint: &str) -> gax::client_builder::Result<Self> {
        let tracing = crate::options::tracing_enabled(&config);
        let endpoint = config
            .endpoint
            .unwrap_or_else(|| default_endpoint.to_string());
        reqwest::Url::parse(&endpoint).map_err(BuilderError::endpoint)?;
        let inner = reqwest::Client::builder()
            .build()
            .map_err(BuilderError::transport)?;
        Ok(Self {
            inner,
            cred: config.cred.unwrap_or_default(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            polling: config.polling,
            instrumentation: None,
            tracing,
        })
    }

    /// Creates a client for the Azure public cloud unless the configuration
    /// overrides the endpoint.
    pub async fn with_default_endpoint(config: ClientConfig) -> gax::client_builder::Result<Self> {
        Self::new(config, DEFAULT_ENDPOINT).await
    }

    pub fn with_instrumentation(mut self, instrumentation: &'static InstrumentationClientInfo) -> Self {
        self.instrumentation = Some(instrumentation);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Starts a request for `path`, relative to the endpoint.
    pub fn builder(&self, method: reqwest::Method, path: String) -> reqwest::RequestBuilder {
        self.inner
            .request(method, format!("{}{path}", &self.endpoint))
    }

    /// Starts a request for a fully-qualified URL.
    ///
    /// Used for `nextLink` and polling URLs returned by the service, which
    /// must be used verbatim.
    pub fn builder_for_url(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.inner.request(method, url)
    }

    /// Sends the request and decodes the response body as JSON.
    ///
    /// Empty bodies decode to `O::default()`.
    pub async fn execute<I: serde::ser::Serialize, O: serde::de::DeserializeOwned + Default>(
        &self,
        builder: reqwest::RequestBuilder,
        body: Option<I>,
        expected: ExpectedStatus,
        options: RequestOptions,
    ) -> Result<Response<O>> {
        let response = self.execute_raw(builder, body, expected, options).await?;
        to_json_response(response)
    }

    /// Sends the request and returns the raw response body.
    ///
    /// The body is always fully collected, so the connection can be reused.
    /// Status codes outside `expected` are returned as errors.
    pub async fn execute_raw<I: serde::ser::Serialize>(
        &self,
        mut builder: reqwest::RequestBuilder,
        body: Option<I>,
        expected: ExpectedStatus,
        options: RequestOptions,
    ) -> Result<Response<bytes::Bytes>> {
        let user_agent = options
            .user_agent()
            .map(str::to_string)
            .or_else(|| self.instrumentation.map(|i| i.user_agent()));
        if let Some(user_agent) = user_agent {
            builder = builder.header(
                reqwest::header::USER_AGENT,
                reqwest::header::HeaderValue::from_str(&user_agent).map_err(Error::ser)?,
            );
        }
        if let Some(id) = options.client_request_id() {
            builder = builder.header(
                CLIENT_REQUEST_ID,
                reqwest::header::HeaderValue::from_str(id).map_err(Error::ser)?,
            );
        }
        if let Some(timeout) = options.attempt_timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = body {
            let body = serde_json::to_vec(&body).map_err(Error::ser)?;
            builder = builder
                .header(
                    reqwest::header::CONTENT_TYPE,
                    reqwest::header::HeaderValue::from_static("application/json"),
                )
                .body(body);
        }
        let auth_headers = self.cred.headers().await.map_err(Error::authentication)?;
        for (key, value) in auth_headers.iter() {
            builder = builder.header(key, value);
        }
        let request = builder.build().map_err(Error::ser)?;
        if !self.tracing {
            return self.request_attempt(request, expected).await;
        }
        let span = create_http_attempt_span(&request, self.instrumentation);
        let result = self
            .request_attempt(request, expected)
            .instrument(span.clone())
            .await;
        record_http_result(&span, result.as_ref());
        result
    }

    async fn request_attempt(
        &self,
        request: reqwest::Request,
        expected: ExpectedStatus,
    ) -> Result<Response<bytes::Bytes>> {
        let response = self
            .inner
            .execute(request)
            .await
            .map_err(Self::map_send_error)?;
        let status = response.status();
        let response = http::Response::from(response);
        let (parts, body) = response.into_parts();
        let body = http_body_util::BodyExt::collect(body)
            .await
            .map_err(Self::map_send_error)?
            .to_bytes();
        if !expected.contains(status.as_u16()) {
            return Err(Error::service_with_http_metadata(
                status.as_u16(),
                parts.headers,
                body,
            ));
        }
        Ok(Response::from_parts(
            Parts::new().set_status(status).set_headers(parts.headers),
            body,
        ))
    }

    // Attempt timeouts are transport errors. Only the call deadline in
    // `CallContext` produces `Error::timeout`.
    fn map_send_error(err: reqwest::Error) -> Error {
        Error::io(err)
    }

    /// The polling policies for one operation: the request overrides, then
    /// the client configuration, then the defaults.
    pub fn polling_policies(
        &self,
        options: &RequestOptions,
    ) -> (Arc<dyn PollingErrorPolicy>, Arc<dyn PollingBackoffPolicy>) {
        options.polling().or(&self.polling).resolve()
    }
}

#[derive(serde::Serialize)]
pub struct NoBody;

/// Decodes a raw response body as JSON.
///
/// Empty bodies, as in `204 No Content` or `202 Accepted` responses, decode to
/// `O::default()`.
pub fn to_json_response<O: serde::de::DeserializeOwned + Default>(
    response: Response<bytes::Bytes>,
) -> Result<Response<O>> {
    let (parts, body) = response.into_parts();
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        O::default()
    } else {
        serde_json::from_slice::<O>(&body).map_err(Error::deser)?
    };
    Ok(Response::from_parts(parts, body))
}
