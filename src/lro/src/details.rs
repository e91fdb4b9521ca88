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

//! Simplifies the implementation of the pollers.
//!
//! The functions in this module interpret a single response. They do not send
//! requests or sleep, the pollers do that.

use crate::envelope::{self, OperationEnvelope, PollingLocation};
use crate::provisioning_state;
use crate::{Error, PollerState, PollingResult, ProvisioningState, Result};
use bytes::Bytes;
use gax::error::cloud::{CloudError, OperationFailure};
use gax::polling::{PollDecision, PollingErrorPolicy, PollingState};
use gax::response::Response;
use std::time::Duration;

/// The next request in the polling loop.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Next {
    /// Query an operation status resource (`Azure-AsyncOperation`).
    ///
    /// On success, the result is fetched from `final_url`, if any.
    Status {
        url: String,
        final_url: Option<String>,
    },
    /// Query a `Location` URL until it stops returning `202 Accepted`.
    Location {
        url: String,
        final_url: Option<String>,
    },
    /// Query the resource until its provisioning state is terminal.
    Resource(String),
    /// Fetch the result of an operation that already succeeded.
    Final(String),
}

impl Next {
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. } | Self::Location { url, .. } => url,
            Self::Resource(url) | Self::Final(url) => url,
        }
    }
}

/// The outcome of handling one response.
#[derive(Debug)]
pub(crate) struct Step<R> {
    pub next: Option<Next>,
    pub retry_after: Option<Duration>,
    pub state: PollerState,
    pub result: PollingResult<R>,
}

impl<R> Step<R> {
    fn completed(state: PollerState, result: Result<R>) -> Self {
        Self {
            next: None,
            retry_after: None,
            state,
            result: PollingResult::Completed(result),
        }
    }

    fn failed(e: Error) -> Self {
        Self::completed(PollerState::Failed, Err(e))
    }

    fn in_progress(next: Next, current: Option<ProvisioningState>, retry_after: Option<Duration>) -> Self {
        Self {
            next: Some(next),
            retry_after,
            state: PollerState::Polling,
            result: PollingResult::InProgress(current),
        }
    }

    /// Returns true if the next request should be sent without waiting.
    ///
    /// Once the operation succeeded there is no reason to wait before
    /// fetching its result.
    pub fn follow_up(&self) -> bool {
        matches!(
            (&self.next, &self.result),
            (Some(Next::Final(_)), PollingResult::InProgress(_))
        )
    }
}

/// The body of an operation status resource.
#[derive(Debug, serde::Deserialize)]
struct OperationStatus {
    status: String,
    #[serde(default)]
    error: Option<CloudError>,
}

pub(crate) fn handle_start<R>(result: Result<Response<Bytes>>, resource_url: Option<String>) -> Step<R>
where
    R: serde::de::DeserializeOwned + Default,
{
    let response = match result {
        Err(e) => return Step::failed(e),
        Ok(r) => r,
    };
    let envelope = OperationEnvelope::from(response);
    let current = provisioning_state::from_resource(&envelope.body);
    match envelope.polling_location {
        Some(PollingLocation::AsyncOperation(url)) => {
            let final_url = resource_url.or(envelope.final_location);
            Step::in_progress(Next::Status { url, final_url }, current, envelope.retry_after)
        }
        Some(PollingLocation::Location(url)) => Step::in_progress(
            Next::Location {
                url,
                final_url: resource_url,
            },
            current,
            envelope.retry_after,
        ),
        None => handle_synchronous(envelope.body, current, resource_url, envelope.retry_after),
    }
}

pub(crate) fn handle_poll<R>(
    error_policy: &dyn PollingErrorPolicy,
    state: &PollingState,
    next: Next,
    result: Result<Response<Bytes>>,
) -> Step<R>
where
    R: serde::de::DeserializeOwned + Default,
{
    let response = match result {
        Err(e) => return handle_polling_error(error_policy.on_error(state, e), next),
        Ok(r) => r,
    };
    let step = match next {
        Next::Status { url, final_url } => handle_status(response, url, final_url),
        Next::Location { url, final_url } => handle_location(response, url, final_url),
        Next::Resource(url) => handle_resource(response, url),
        Next::Final(_) => handle_final(response),
    };
    if step.follow_up() {
        return step;
    }
    match (&step.result, &step.next) {
        (PollingResult::InProgress(_), Some(next)) => {
            match error_policy.on_in_progress(state, next.url()) {
                None => step,
                Some(e) => Step::failed(e),
            }
        }
        _ => step,
    }
}

fn handle_polling_error<R>(decision: PollDecision, next: Next) -> Step<R> {
    match decision {
        PollDecision::Retry(e) => Step {
            next: Some(next),
            retry_after: None,
            state: PollerState::Polling,
            result: PollingResult::PollingError(e),
        },
        PollDecision::Fail(e) | PollDecision::Exhausted(e) => Step::failed(e),
    }
}

fn handle_status<R>(response: Response<Bytes>, url: String, final_url: Option<String>) -> Step<R>
where
    R: serde::de::DeserializeOwned + Default,
{
    let retry_after = envelope::retry_after(response.headers());
    let url = envelope::async_operation(response.headers()).unwrap_or(url);
    let status = match serde_json::from_slice::<OperationStatus>(response.body()) {
        Err(e) => return Step::failed(Error::deser(e)),
        Ok(s) => s,
    };
    let current = ProvisioningState::from(status.status.as_str());
    if current.is_failure() {
        return handle_failure(current, status.status, status.error);
    }
    if !current.is_success() {
        return Step::in_progress(Next::Status { url, final_url }, Some(current), retry_after);
    }
    match final_url {
        Some(u) => Step::in_progress(Next::Final(u), Some(current), None),
        None => Step::completed(PollerState::Succeeded, decode(&Bytes::new())),
    }
}

fn handle_location<R>(response: Response<Bytes>, url: String, final_url: Option<String>) -> Step<R>
where
    R: serde::de::DeserializeOwned + Default,
{
    let current = provisioning_state::from_resource(response.body());
    if response.status() == http::StatusCode::ACCEPTED {
        let retry_after = envelope::retry_after(response.headers());
        let url = envelope::location(response.headers()).unwrap_or(url);
        return Step::in_progress(Next::Location { url, final_url }, current, retry_after);
    }
    if let Some(s) = current.filter(ProvisioningState::is_failure) {
        let status = s.name().to_string();
        return handle_failure(s, status, None);
    }
    match final_url {
        Some(u) if is_empty(response.body()) => {
            Step::in_progress(Next::Final(u), Some(ProvisioningState::Succeeded), None)
        }
        _ => Step::completed(PollerState::Succeeded, decode(response.body())),
    }
}

fn handle_resource<R>(response: Response<Bytes>, url: String) -> Step<R>
where
    R: serde::de::DeserializeOwned + Default,
{
    let retry_after = envelope::retry_after(response.headers());
    let current = provisioning_state::from_resource(response.body())
        .unwrap_or(ProvisioningState::Succeeded);
    if current.is_failure() {
        let status = current.name().to_string();
        return handle_failure(current, status, None);
    }
    if !current.is_success() {
        return Step::in_progress(Next::Resource(url), Some(current), retry_after);
    }
    Step::completed(PollerState::Succeeded, decode(response.body()))
}

fn handle_final<R>(response: Response<Bytes>) -> Step<R>
where
    R: serde::de::DeserializeOwned + Default,
{
    Step::completed(PollerState::Succeeded, decode(response.body()))
}

/// Handles responses without an async indicator.
///
/// Some services return `200 OK` or `201 Created` while the resource is still
/// provisioning. If the caller provided the resource URL the poller queries it
/// until the provisioning state is terminal.
fn handle_synchronous<R>(
    body: Bytes,
    current: Option<ProvisioningState>,
    resource_url: Option<String>,
    retry_after: Option<Duration>,
) -> Step<R>
where
    R: serde::de::DeserializeOwned + Default,
{
    match (current, resource_url) {
        (Some(s), _) if s.is_failure() => {
            let status = s.name().to_string();
            let failure = OperationFailure::new(status);
            Step::failed(Error::operation_failed(failure))
        }
        (Some(s), Some(url)) if !s.is_terminal() => {
            Step::in_progress(Next::Resource(url), Some(s), retry_after)
        }
        _ => Step::completed(PollerState::Succeeded, decode(&body)),
    }
}

fn handle_failure<R>(current: ProvisioningState, status: String, error: Option<CloudError>) -> Step<R> {
    let state = match current {
        ProvisioningState::Canceled => PollerState::Canceled,
        _ => PollerState::Failed,
    };
    let failure = OperationFailure::from((status, error));
    Step::completed(state, Err(Error::operation_failed(failure)))
}

fn is_empty(body: &Bytes) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

/// Decodes the final result. Empty bodies decode to `R::default()`.
pub(crate) fn decode<R>(body: &Bytes) -> Result<R>
where
    R: serde::de::DeserializeOwned + Default,
{
    if is_empty(body) {
        return Ok(R::default());
    }
    serde_json::from_slice::<R>(body).map_err(Error::deser)
}
