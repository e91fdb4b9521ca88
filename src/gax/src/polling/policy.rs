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

use super::{PollDecision, PollingState};
use crate::error::Error;
use std::sync::Arc;
use std::time::Duration;

/// Classifies failed status queries, and may bound the polling loop.
pub trait PollingErrorPolicy: Send + Sync + std::fmt::Debug {
    /// Called after a status query fails.
    ///
    /// `state.attempt_count` includes the failed query.
    fn on_error(&self, state: &PollingState, error: Error) -> PollDecision;

    /// Called after a status query reports the operation is still running.
    ///
    /// Returning an error stops polling, and the operation is reported with
    /// that error. `url` is the status URL that will be queried next.
    fn on_in_progress(&self, _state: &PollingState, _url: &str) -> Option<Error> {
        None
    }
}

/// Converts policies for [PollingOptions][super::PollingOptions] and the
/// builders.
#[derive(Clone)]
pub struct PollingErrorPolicyArg(pub(crate) Arc<dyn PollingErrorPolicy>);

impl<T: PollingErrorPolicy + 'static> From<T> for PollingErrorPolicyArg {
    fn from(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl From<Arc<dyn PollingErrorPolicy>> for PollingErrorPolicyArg {
    fn from(value: Arc<dyn PollingErrorPolicy>) -> Self {
        Self(value)
    }
}

/// Adds limits to any [PollingErrorPolicy].
pub trait PollingErrorPolicyExt: PollingErrorPolicy + Sized {
    /// Stops polling once `maximum` status queries were sent.
    ///
    /// # Example
    /// ```
    /// # use azure_rm_gax::polling::*;
    /// # use azure_rm_gax::error::Error;
    /// let policy = ArmStrict.with_attempt_limit(3);
    /// let state = PollingState::new().set_attempt_count(2);
    /// assert!(policy.on_error(&state, Error::io("reset")).is_retry());
    /// let state = PollingState::new().set_attempt_count(3);
    /// assert!(policy.on_error(&state, Error::io("reset")).is_exhausted());
    /// ```
    fn with_attempt_limit(self, maximum: u32) -> Limited<Self> {
        Limited::new(self).with_attempt_limit(maximum)
    }

    /// Stops polling once `maximum` has elapsed since the operation started.
    fn with_time_limit(self, maximum: Duration) -> Limited<Self> {
        Limited::new(self).with_time_limit(maximum)
    }
}

impl<T: PollingErrorPolicy> PollingErrorPolicyExt for T {}

/// The default policy for Azure Resource Manager operations.
///
/// A status query that got no response is repeated. That includes a reset
/// connection, a DNS failure, and a query that exceeded its attempt timeout.
/// Transient failures to get a token are repeated too. Any status code
/// outside the expected set fails the operation.
///
/// There are no limits, bound the loop with a
/// [CallContext][crate::context::CallContext] or [Limited].
///
/// # Example
/// ```
/// # use azure_rm_gax::polling::*;
/// # use azure_rm_gax::error::Error;
/// let state = PollingState::new().set_attempt_count(1);
/// assert!(ArmStrict.on_error(&state, Error::io("connection reset")).is_retry());
/// let throttled = Error::service_with_http_metadata(429, http::HeaderMap::new(), bytes::Bytes::new());
/// assert!(ArmStrict.on_error(&state, throttled).is_fail());
/// ```
#[derive(Clone, Debug)]
pub struct ArmStrict;

impl PollingErrorPolicy for ArmStrict {
    fn on_error(&self, _state: &PollingState, error: Error) -> PollDecision {
        if error.is_transport() || error.is_transient_and_before_rpc() {
            PollDecision::Retry(error)
        } else {
            PollDecision::Fail(error)
        }
    }
}

/// Repeats the status query after any failure.
///
/// Useful with services that return spurious errors from their status
/// endpoints. Combine it with a limit.
#[derive(Clone, Debug)]
pub struct AlwaysContinue;

impl PollingErrorPolicy for AlwaysContinue {
    fn on_error(&self, _state: &PollingState, error: Error) -> PollDecision {
        PollDecision::Retry(error)
    }
}

/// Bounds the queries made under an inner policy.
///
/// Errors the inner policy would retry become
/// [Exhausted][PollDecision::Exhausted] once a limit is reached. Status
/// queries reporting the operation is still running stop the loop at the same
/// point, with an [Exhausted] error.
///
/// # Example
/// ```
/// # use azure_rm_gax::polling::*;
/// use std::time::Duration;
/// let policy = Limited::new(AlwaysContinue)
///     .with_attempt_limit(100)
///     .with_time_limit(Duration::from_secs(30 * 60));
/// ```
#[derive(Clone, Debug)]
pub struct Limited<P = ArmStrict> {
    inner: P,
    attempts: Option<u32>,
    elapsed: Option<Duration>,
}

impl<P: PollingErrorPolicy> Limited<P> {
    /// Wraps `inner` with no limits set.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            attempts: None,
            elapsed: None,
        }
    }

    pub fn with_attempt_limit(mut self, maximum: u32) -> Self {
        self.attempts = Some(maximum);
        self
    }

    pub fn with_time_limit(mut self, maximum: Duration) -> Self {
        self.elapsed = Some(maximum);
        self
    }

    fn check(&self, state: &PollingState, url: &str) -> Option<Exhausted> {
        if let Some(limit) = self.attempts.filter(|l| state.attempt_count >= *l) {
            return Some(Exhausted::Attempts {
                url: url.to_string(),
                count: state.attempt_count,
                limit,
            });
        }
        let elapsed = state.elapsed();
        self.elapsed
            .filter(|l| elapsed >= *l)
            .map(|limit| Exhausted::Elapsed {
                url: url.to_string(),
                elapsed,
                limit,
            })
    }
}

impl<P: PollingErrorPolicy> PollingErrorPolicy for Limited<P> {
    fn on_error(&self, state: &PollingState, error: Error) -> PollDecision {
        match self.inner.on_error(state, error) {
            PollDecision::Retry(e) if self.check(state, "").is_some() => PollDecision::Exhausted(e),
            decision => decision,
        }
    }

    fn on_in_progress(&self, state: &PollingState, url: &str) -> Option<Error> {
        self.inner
            .on_in_progress(state, url)
            .or_else(|| self.check(state, url).map(Error::exhausted))
    }
}

/// A polling limit was reached while the operation was still running.
#[derive(thiserror::Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Exhausted {
    #[error("stopped polling {url} after {count} status queries, the limit is {limit}")]
    Attempts { url: String, count: u32, limit: u32 },
    #[error("stopped polling {url} after {elapsed:?}, the limit is {limit:?}")]
    Elapsed {
        url: String,
        elapsed: Duration,
        limit: Duration,
    },
}
