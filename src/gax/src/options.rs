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

//! Overrides for a single Azure Resource Manager request.
//!
//! Every request builder in the client libraries implements
//! [RequestOptionsBuilder]. The `with_*` methods change one call without
//! touching the client: tag it with a client request ID to find it in the
//! ARM activity log, bound each HTTP attempt, or poll a slow operation with
//! different policies.
//!
//! For long-running operations the options apply to the initial request and
//! to every status query.
//!
//! # Example
//! ```
//! # use azure_rm_gax::options::RequestOptions;
//! # use azure_rm_gax::polling::{ArmStrict, PollingErrorPolicyExt};
//! use std::time::Duration;
//! let mut options = RequestOptions::default();
//! options.set_client_request_id("3f5b2a5e-1c1a-4c5e-8a40-0d6c4f2b9a11");
//! options.set_attempt_timeout(Duration::from_secs(30));
//! options.polling_mut().set_error_policy(ArmStrict.with_attempt_limit(240));
//! assert_eq!(options.attempt_timeout(), Some(Duration::from_secs(30)));
//! ```

use crate::polling::{PollingBackoffPolicyArg, PollingErrorPolicyArg, PollingOptions};
use std::time::Duration;

/// The options of one request.
///
/// Applications rarely build this type directly, the request builders hold
/// one. Mocks may inspect it.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    user_agent: Option<String>,
    client_request_id: Option<String>,
    attempt_timeout: Option<Duration>,
    polling: PollingOptions,
}

impl RequestOptions {
    /// Sends `v` as the `User-Agent` header.
    pub fn set_user_agent<T: Into<String>>(&mut self, v: T) {
        self.user_agent = Some(v.into());
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Sends `v` as the `x-ms-client-request-id` header.
    ///
    /// ARM records this value with the operation, and echoes it in the
    /// response. Applications use it to correlate their logs with the
    /// activity log of the subscription.
    pub fn set_client_request_id<T: Into<String>>(&mut self, v: T) {
        self.client_request_id = Some(v.into());
    }

    pub fn client_request_id(&self) -> Option<&str> {
        self.client_request_id.as_deref()
    }

    /// Bounds each HTTP attempt.
    ///
    /// An attempt that exceeds this timeout fails with a transport error. A
    /// poller repeats status queries that fail this way. Use a
    /// [CallContext][crate::context::CallContext] to bound a whole operation.
    pub fn set_attempt_timeout<T: Into<Duration>>(&mut self, v: T) {
        self.attempt_timeout = Some(v.into());
    }

    pub fn attempt_timeout(&self) -> Option<Duration> {
        self.attempt_timeout
    }

    /// The polling overrides, unset values fall back to the client.
    pub fn polling(&self) -> &PollingOptions {
        &self.polling
    }

    pub fn polling_mut(&mut self) -> &mut PollingOptions {
        &mut self.polling
    }
}

/// Setters for the [RequestOptions] of a request builder.
///
/// Implemented by every request builder.
pub trait RequestOptionsBuilder: internal::RequestBuilder {
    fn with_user_agent<V: Into<String>>(self, v: V) -> Self;

    /// See [RequestOptions::set_client_request_id].
    fn with_client_request_id<V: Into<String>>(self, v: V) -> Self;

    /// See [RequestOptions::set_attempt_timeout].
    fn with_attempt_timeout<V: Into<Duration>>(self, v: V) -> Self;

    /// Classifies failed status queries of this operation.
    fn with_polling_error_policy<V: Into<PollingErrorPolicyArg>>(self, v: V) -> Self;

    /// Chooses the wait between status queries of this operation, when the
    /// service does not send `Retry-After`.
    fn with_polling_backoff_policy<V: Into<PollingBackoffPolicyArg>>(self, v: V) -> Self;
}

#[cfg_attr(not(feature = "_internal-semver"), doc(hidden))]
pub mod internal {
    //! Implementation details of the generated request builders. Not part of
    //! the public API.
    use super::RequestOptions;

    pub trait RequestBuilder {
        fn request_options(&mut self) -> &mut RequestOptions;
    }
}

impl<T: internal::RequestBuilder> RequestOptionsBuilder for T {
    fn with_user_agent<V: Into<String>>(mut self, v: V) -> Self {
        self.request_options().set_user_agent(v);
        self
    }

    fn with_client_request_id<V: Into<String>>(mut self, v: V) -> Self {
        self.request_options().set_client_request_id(v);
        self
    }

    fn with_attempt_timeout<V: Into<Duration>>(mut self, v: V) -> Self {
        self.request_options().set_attempt_timeout(v);
        self
    }

    fn with_polling_error_policy<V: Into<PollingErrorPolicyArg>>(mut self, v: V) -> Self {
        self.request_options().polling_mut().set_error_policy(v);
        self
    }

    fn with_polling_backoff_policy<V: Into<PollingBackoffPolicyArg>>(mut self, v: V) -> Self {
        self.request_options().polling_mut().set_backoff_policy(v);
        self
    }
}
