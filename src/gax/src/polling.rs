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

//! Policies for polling Azure Resource Manager long-running operations.
//!
//! A long-running operation returns `201 Created` or `202 Accepted` and a
//! status URL. The pollers in the `azure-rm-lro` crate query that URL until
//! the operation reaches a terminal state. Two policies shape the loop:
//!
//! * A [PollingBackoffPolicy] picks the wait between queries. ARM services
//!   usually send a `Retry-After` header, which always takes precedence. The
//!   policy only decides when the header is missing.
//! * A [PollingErrorPolicy] classifies failed status queries. A query that
//!   never got a response (a reset connection, an attempt timeout) is worth
//!   repeating. A status code outside the expected set is not. The policy may
//!   also cap the number of queries or the time spent polling.
//!
//! The deadline of the whole operation is not a policy concern, use a
//! [CallContext][crate::context::CallContext] for that.
//!
//! Clients carry default [PollingOptions], and each request may override them.
//!
//! # Example
//! ```
//! # use azure_rm_gax::polling::*;
//! use std::time::Duration;
//! let mut options = PollingOptions::default();
//! options.set_error_policy(ArmStrict.with_attempt_limit(120));
//! options.set_backoff_policy(
//!     ExponentialBackoffBuilder::new()
//!         .with_initial_delay(Duration::from_secs(5))
//!         .with_maximum_delay(Duration::from_secs(30))
//!         .build()?,
//! );
//! # Ok::<(), BackoffError>(())
//! ```

use crate::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

mod backoff;
mod policy;
pub use backoff::{
    BackoffError, ExponentialBackoff, ExponentialBackoffBuilder, PollingBackoffPolicy,
    PollingBackoffPolicyArg,
};
pub use policy::{
    AlwaysContinue, ArmStrict, Exhausted, Limited, PollingErrorPolicy, PollingErrorPolicyArg,
    PollingErrorPolicyExt,
};

/// The progress of a polling loop, as seen by the policies.
///
/// The start time uses the tokio clock, tests with a paused runtime see
/// consistent elapsed times.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct PollingState {
    /// When the operation was submitted.
    pub start: Instant,
    /// The number of status queries sent so far.
    pub attempt_count: u32,
}

impl PollingState {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            attempt_count: 0,
        }
    }

    pub fn set_start(mut self, v: Instant) -> Self {
        self.start = v;
        self
    }

    pub fn set_attempt_count(mut self, v: u32) -> Self {
        self.attempt_count = v;
        self
    }

    /// Counts one more status query.
    pub fn record_attempt(&mut self) {
        self.attempt_count = self.attempt_count.saturating_add(1);
    }

    /// Time since the operation was submitted, waits included.
    pub fn elapsed(&self) -> Duration {
        Instant::now().saturating_duration_since(self.start)
    }
}

impl Default for PollingState {
    fn default() -> Self {
        Self::new()
    }
}

/// What the poller does after a failed status query.
#[derive(Debug)]
pub enum PollDecision {
    /// Query the status URL again after the usual wait.
    Retry(Error),
    /// The failure is final, the operation is reported as failed.
    Fail(Error),
    /// The failure may be transient, but a limit in the policy was reached.
    Exhausted(Error),
}

impl PollDecision {
    pub fn is_retry(&self) -> bool {
        matches!(self, Self::Retry(_))
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted(_))
    }

    /// The error behind the decision.
    pub fn into_error(self) -> Error {
        match self {
            Self::Retry(e) | Self::Fail(e) | Self::Exhausted(e) => e,
        }
    }
}

/// The polling configuration of a client, or the overrides for one request.
///
/// Unset policies fall back to the client configuration, and then to
/// [ArmStrict] and [ExponentialBackoff::default].
#[derive(Clone, Debug, Default)]
pub struct PollingOptions {
    error_policy: Option<Arc<dyn PollingErrorPolicy>>,
    backoff_policy: Option<Arc<dyn PollingBackoffPolicy>>,
}

impl PollingOptions {
    pub fn set_error_policy<V: Into<PollingErrorPolicyArg>>(&mut self, v: V) {
        self.error_policy = Some(v.into().0);
    }

    pub fn set_backoff_policy<V: Into<PollingBackoffPolicyArg>>(&mut self, v: V) {
        self.backoff_policy = Some(v.into().0);
    }

    pub fn error_policy(&self) -> Option<&Arc<dyn PollingErrorPolicy>> {
        self.error_policy.as_ref()
    }

    pub fn backoff_policy(&self) -> Option<&Arc<dyn PollingBackoffPolicy>> {
        self.backoff_policy.as_ref()
    }

    /// Fills the unset policies from `fallback`.
    pub fn or(&self, fallback: &PollingOptions) -> PollingOptions {
        PollingOptions {
            error_policy: self
                .error_policy
                .clone()
                .or_else(|| fallback.error_policy.clone()),
            backoff_policy: self
                .backoff_policy
                .clone()
                .or_else(|| fallback.backoff_policy.clone()),
        }
    }

    /// The policies to poll with, using the defaults for unset values.
    pub fn resolve(&self) -> (Arc<dyn PollingErrorPolicy>, Arc<dyn PollingBackoffPolicy>) {
        let errors = self
            .error_policy
            .clone()
            .unwrap_or_else(|| Arc::new(ArmStrict));
        let backoff = self
            .backoff_policy
            .clone()
            .unwrap_or_else(|| Arc::new(ExponentialBackoff::default()));
        (errors, backoff)
    }
}
