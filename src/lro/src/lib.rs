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

//! Types and functions to make Azure Resource Manager long-running operations
//! easier to use.
//!
//! Many Azure Resource Manager operations (creating, updating or deleting most
//! resources) may complete in the background. The service signals this with a
//! `201 Created` or `202 Accepted` status code and a header pointing to a
//! URL that reports the progress of the operation:
//!
//! * `Azure-AsyncOperation`: an operation status resource, with a body of the
//!   form `{"status": "InProgress", "error": {...}}`.
//! * `Location`: returns `202 Accepted` while the operation is in progress,
//!   and the final resource (or `204 No Content`) when it completes.
//!
//! The client libraries return an implementation of [Poller] for these
//! operations. Applications can use [Poller::until_done] to wait for the
//! operation to complete, or [Poller::poll] to drive the polling loop one step
//! at a time.

pub use gax::Result;
pub use gax::error::Error;
use gax::context::CallContext;
/// The policies that shape the polling loop, also available from the client
/// builders and request options.
pub use gax::polling;
use polling::{PollingBackoffPolicy, PollingErrorPolicy};
use std::future::Future;

mod details;
mod envelope;
mod provisioning_state;
pub use envelope::{OperationEnvelope, PollingLocation};
pub use provisioning_state::ProvisioningState;

#[doc(hidden)]
pub mod internal;

/// The result of polling a long-running operation.
///
/// # Parameters
/// * `R` - the response type. This is the type returned when the operation
///   completes successfully.
#[derive(Debug)]
pub enum PollingResult<R> {
    /// The operation is still in progress.
    ///
    /// Includes the provisioning state reported by the service, if any.
    InProgress(Option<ProvisioningState>),
    /// The operation completed. This includes the result.
    Completed(Result<R>),
    /// An error trying to poll the operation.
    ///
    /// Not all errors indicate that the operation failed. For example, this
    /// may fail because it was not possible to connect to Azure. Such
    /// transient errors may disappear in the next polling attempt. The
    /// [PollingErrorPolicy] decides which errors are returned as
    /// `PollingError` and which errors complete the operation.
    PollingError(Error),
}

/// The state of a [Poller].
///
/// Pollers start in the `Submitted` state. If the initial response indicates
/// the operation continues in the background they move to `Polling`,
/// otherwise they move directly to a terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum PollerState {
    /// The operation has not started, or the initial response was not
    /// received yet.
    Submitted,
    /// The operation is running in the background.
    Polling,
    /// The operation completed successfully.
    Succeeded,
    /// The operation failed, or the polling loop stopped with an error.
    Failed,
    /// The service reported the operation as canceled.
    Canceled,
}

impl PollerState {
    /// Returns true if no more polling is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Canceled)
    }
}

/// The trait implemented by LRO helpers.
///
/// # Parameters
/// * `R` - the response type, that is, the type of response included when the
///   long-running operation completes successfully.
pub trait Poller<R>: Send + sealed::Poller {
    /// Returns the current state of the poller.
    fn state(&self) -> PollerState;

    /// Query the current status of the long-running operation.
    ///
    /// The first call starts the operation. Returns `None` once the operation
    /// has completed.
    fn poll(&mut self) -> impl Future<Output = Option<PollingResult<R>>> + Send;

    /// Poll the long-running operation until it completes.
    ///
    /// Between polls this waits for the period in the `Retry-After` header, if
    /// the service sent one, or the period chosen by the
    /// [PollingBackoffPolicy].
    fn until_done(self) -> impl Future<Output = Result<R>> + Send;

    /// Poll the long-running operation until it completes, or the context is
    /// cancelled or reaches its deadline.
    ///
    /// Cancellation returns an error where [Error::is_cancelled] is true, and
    /// an expired deadline returns an error where [Error::is_timeout] is true.
    /// No new requests are sent once either has been observed.
    fn until_done_with(self, ctx: &CallContext) -> impl Future<Output = Result<R>> + Send;

    /// Convert a poller to a [futures::Stream].
    #[cfg(feature = "unstable-stream")]
    fn into_stream(self) -> impl futures::Stream<Item = PollingResult<R>> + Unpin;
}

mod sealed {
    pub trait Poller {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poller_state() {
        assert!(!PollerState::Submitted.is_terminal());
        assert!(!PollerState::Polling.is_terminal());
        assert!(PollerState::Succeeded.is_terminal());
        assert!(PollerState::Failed.is_terminal());
        assert!(PollerState::Canceled.is_terminal());
    }
}
