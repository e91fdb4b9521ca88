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

use super::PollingState;
use std::sync::Arc;
use std::time::Duration;

/// Chooses the wait between two status queries.
pub trait PollingBackoffPolicy: Send + Sync + std::fmt::Debug {
    /// The wait when the service did not send `Retry-After`.
    ///
    /// Called after at least one status query, `state.attempt_count` is never
    /// zero. Responses to the initial request count as attempt zero.
    fn backoff(&self, state: &PollingState) -> Duration;

    /// The wait before the next status query.
    ///
    /// ARM services send `Retry-After` with most accepted operations, and
    /// clients must not poll sooner. Implementations overriding this method
    /// should keep that rule.
    fn wait_period(&self, state: &PollingState, retry_after: Option<Duration>) -> Duration {
        retry_after.unwrap_or_else(|| self.backoff(state))
    }
}

/// Converts policies for [PollingOptions][super::PollingOptions] and the
/// builders.
#[derive(Clone)]
pub struct PollingBackoffPolicyArg(pub(crate) Arc<dyn PollingBackoffPolicy>);

impl<T: PollingBackoffPolicy + 'static> From<T> for PollingBackoffPolicyArg {
    fn from(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl From<Arc<dyn PollingBackoffPolicy>> for PollingBackoffPolicyArg {
    fn from(value: Arc<dyn PollingBackoffPolicy>) -> Self {
        Self(value)
    }
}

/// An invalid [ExponentialBackoffBuilder] configuration.
#[derive(thiserror::Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum BackoffError {
    #[error("the initial delay must be positive")]
    ZeroInitialDelay,
    #[error("the scaling factor must be at least 1")]
    ZeroScaling,
    #[error("the maximum delay ({maximum:?}) is shorter than the initial delay ({initial:?})")]
    MaximumBelowInitial { initial: Duration, maximum: Duration },
}

/// Configures an [ExponentialBackoff].
///
/// # Example
/// ```
/// # use azure_rm_gax::polling::*;
/// use std::time::Duration;
/// let backoff = ExponentialBackoffBuilder::new()
///     .with_initial_delay(Duration::from_secs(5))
///     .with_maximum_delay(Duration::from_secs(30))
///     .with_scaling(3_u32)
///     .build()?;
/// let state = |n| PollingState::new().set_attempt_count(n);
/// assert_eq!(backoff.backoff(&state(1)), Duration::from_secs(5));
/// assert_eq!(backoff.backoff(&state(2)), Duration::from_secs(15));
/// assert_eq!(backoff.backoff(&state(3)), Duration::from_secs(30));
/// # Ok::<(), BackoffError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ExponentialBackoffBuilder {
    initial_delay: Duration,
    maximum_delay: Duration,
    scaling: u32,
}

impl ExponentialBackoffBuilder {
    /// Starts from the values of [ExponentialBackoff::default].
    pub fn new() -> Self {
        let ExponentialBackoff {
            initial_delay,
            maximum_delay,
            scaling,
        } = ExponentialBackoff::default();
        Self {
            initial_delay,
            maximum_delay,
            scaling,
        }
    }

    /// The wait after the first status query.
    pub fn with_initial_delay<V: Into<Duration>>(mut self, v: V) -> Self {
        self.initial_delay = v.into();
        self
    }

    /// The cap for any wait.
    pub fn with_maximum_delay<V: Into<Duration>>(mut self, v: V) -> Self {
        self.maximum_delay = v.into();
        self
    }

    /// The factor applied to the wait after each query.
    pub fn with_scaling<V: Into<u32>>(mut self, v: V) -> Self {
        self.scaling = v.into();
        self
    }

    pub fn build(self) -> Result<ExponentialBackoff, BackoffError> {
        if self.initial_delay.is_zero() {
            return Err(BackoffError::ZeroInitialDelay);
        }
        if self.scaling == 0 {
            return Err(BackoffError::ZeroScaling);
        }
        if self.maximum_delay < self.initial_delay {
            return Err(BackoffError::MaximumBelowInitial {
                initial: self.initial_delay,
                maximum: self.maximum_delay,
            });
        }
        Ok(ExponentialBackoff {
            initial_delay: self.initial_delay,
            maximum_delay: self.maximum_delay,
            scaling: self.scaling,
        })
    }
}

impl Default for ExponentialBackoffBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Waits `initial * scaling^(n-1)` after the n-th status query, capped at the
/// maximum delay. There is no jitter.
///
/// The default starts at one second, doubles, and stops growing at 30
/// seconds, the polling interval ARM suggests when `Retry-After` is missing.
#[derive(Clone, Debug, PartialEq)]
pub struct ExponentialBackoff {
    initial_delay: Duration,
    maximum_delay: Duration,
    scaling: u32,
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            maximum_delay: Duration::from_secs(30),
            scaling: 2,
        }
    }
}

impl PollingBackoffPolicy for ExponentialBackoff {
    fn backoff(&self, state: &PollingState) -> Duration {
        let factor = self
            .scaling
            .checked_pow(state.attempt_count.saturating_sub(1));
        factor
            .and_then(|f| self.initial_delay.checked_mul(f))
            .map_or(self.maximum_delay, |d| d.min(self.maximum_delay))
    }
}
