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

//! Interpret the response that starts a long-running operation.

use bytes::Bytes;
use gax::response::Response;
use std::time::Duration;

const AZURE_ASYNC_OPERATION: &str = "azure-asyncoperation";

/// Where to poll for the status of a long-running operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PollingLocation {
    /// The URL in the `Azure-AsyncOperation` header.
    ///
    /// The URL returns an operation status resource.
    AsyncOperation(String),
    /// The URL in the `Location` header of a `202 Accepted` response.
    ///
    /// The URL returns `202 Accepted` until the operation completes.
    Location(String),
}

impl PollingLocation {
    /// The URL to poll.
    pub fn url(&self) -> &str {
        match self {
            Self::AsyncOperation(u) | Self::Location(u) => u,
        }
    }
}

/// The initial response of a long-running operation.
///
/// # Example
/// ```
/// # use azure_rm_lro::{OperationEnvelope, PollingLocation};
/// # use gax::response::{Parts, Response};
/// let mut headers = http::HeaderMap::new();
/// headers.insert("azure-asyncoperation", http::HeaderValue::from_static("https://management.azure.com/status/1"));
/// headers.insert("retry-after", http::HeaderValue::from_static("15"));
/// let parts = Parts::new().set_status(http::StatusCode::CREATED).set_headers(headers);
/// let envelope = OperationEnvelope::from(Response::from_parts(parts, bytes::Bytes::new()));
/// assert_eq!(
///     envelope.polling_location,
///     Some(PollingLocation::AsyncOperation("https://management.azure.com/status/1".into()))
/// );
/// assert_eq!(envelope.retry_after, Some(std::time::Duration::from_secs(15)));
/// ```
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct OperationEnvelope {
    /// The HTTP status code.
    pub status: http::StatusCode,
    /// Where to poll, if the operation continues in the background.
    ///
    /// `Azure-AsyncOperation` takes precedence over `Location`. The `Location`
    /// header is only a polling location in `202 Accepted` responses.
    pub polling_location: Option<PollingLocation>,
    /// The `Location` header when `Azure-AsyncOperation` is also present.
    ///
    /// Some operations return their final result at this URL once the
    /// operation status reports success.
    pub final_location: Option<String>,
    /// The period requested by the `Retry-After` header.
    pub retry_after: Option<Duration>,
    /// The response body, possibly empty.
    pub body: Bytes,
}

impl OperationEnvelope {
    /// Returns true if the operation continues in the background.
    pub fn is_async(&self) -> bool {
        self.polling_location.is_some()
    }
}

impl From<Response<Bytes>> for OperationEnvelope {
    fn from(response: Response<Bytes>) -> Self {
        let status = response.status();
        let (parts, body) = response.into_parts();
        let async_operation = header(&parts.headers, AZURE_ASYNC_OPERATION);
        let location = header(&parts.headers, http::header::LOCATION.as_str());
        let (polling_location, final_location) = match (async_operation, location) {
            (Some(a), l) => (Some(PollingLocation::AsyncOperation(a)), l),
            (None, Some(l)) if status == http::StatusCode::ACCEPTED => {
                (Some(PollingLocation::Location(l)), None)
            }
            (None, _) => (None, None),
        };
        Self {
            status,
            polling_location,
            final_location,
            retry_after: retry_after(&parts.headers),
            body,
        }
    }
}

/// Returns the `Azure-AsyncOperation` header, if present.
pub(crate) fn async_operation(headers: &http::HeaderMap) -> Option<String> {
    header(headers, AZURE_ASYNC_OPERATION)
}

/// Returns the `Location` header, if present.
pub(crate) fn location(headers: &http::HeaderMap) -> Option<String> {
    header(headers, http::header::LOCATION.as_str())
}

/// Parses the `Retry-After` header.
///
/// Azure Resource Manager always sends this header as a number of seconds.
/// Other formats are ignored, and the poller falls back to its backoff
/// policy.
pub(crate) fn retry_after(headers: &http::HeaderMap) -> Option<Duration> {
    let value = headers.get(http::header::RETRY_AFTER)?.to_str().ok()?;
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

fn header(headers: &http::HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
