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

//! Cancellation and deadlines for multi-request operations.
//!
//! Listing all the pages of a collection, or waiting for a long-running
//! operation, may issue many requests over a long period of time. A
//! [CallContext] lets the caller bound that period, or cancel it from another
//! task.
//!
//! # Example
//! ```
//! # use azure_rm_gax::context::CallContext;
//! use std::time::Duration;
//! # tokio_test::block_on(async {
//! let ctx = CallContext::new().with_timeout(Duration::from_secs(30 * 60));
//! let canceller = ctx.clone();
//! // Some other task may call `canceller.cancel()` to stop the operation.
//! let result = ctx.run(async { Ok(42) }).await;
//! assert_eq!(result.ok(), Some(42));
//! # });
//! ```

use crate::Result;
use crate::error::Error;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Bounds the execution of an operation spanning multiple requests.
///
/// Clones share the same cancellation token. Cancelling any clone cancels all
/// of them, and any [child][CallContext::child] contexts.
#[derive(Clone, Debug, Default)]
pub struct CallContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl CallContext {
    /// Creates a context without a deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a deadline relative to the current time.
    ///
    /// If the context already has an earlier deadline, the earlier deadline
    /// is kept.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        let deadline = Instant::now()
            .checked_add(timeout)
            .unwrap_or_else(far_future);
        self.with_deadline(deadline)
    }

    /// Sets an absolute deadline.
    ///
    /// If the context already has an earlier deadline, the earlier deadline
    /// is kept.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(d) => d.min(deadline),
            None => deadline,
        });
        self
    }

    /// Uses an existing cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Creates a context cancelled when this context is cancelled.
    ///
    /// Cancelling the child does not cancel the parent. The child inherits
    /// the deadline, and may set an earlier one.
    pub fn child(&self) -> Self {
        Self {
            cancel: self.cancel.child_token(),
            deadline: self.deadline,
        }
    }

    /// Cancels the operation, and any operation using a clone or child of
    /// this context.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns true if the context, or any of its parents, was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// The underlying cancellation token.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// The deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The time remaining before the deadline, if any.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Returns an error if the context is cancelled or past its deadline.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(cancelled());
        }
        match self.deadline {
            Some(d) if Instant::now() >= d => Err(deadline_exceeded()),
            _ => Ok(()),
        }
    }

    /// Runs `fut` until it completes, the context is cancelled, or the
    /// deadline expires.
    ///
    /// The future is not polled if the context is already cancelled or past
    /// its deadline. Cancellation takes precedence over the deadline, and
    /// both take precedence over a future that is ready at the same time.
    pub async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.check()?;
        let deadline = self.deadline.unwrap_or_else(far_future);
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(cancelled()),
            _ = tokio::time::sleep_until(deadline) => Err(deadline_exceeded()),
            r = fut => r,
        }
    }

    /// Sleeps for `period`, returning early with an error if the context is
    /// cancelled or the deadline expires first.
    pub async fn sleep(&self, period: Duration) -> Result<()> {
        self.run(async {
            tokio::time::sleep(period).await;
            Ok(())
        })
        .await
    }
}

fn far_future() -> Instant {
    // Roughly 30 years, the same value tokio uses for its own far future.
    Instant::now() + Duration::from_secs(86400 * 365 * 30)
}

fn cancelled() -> Error {
    Error::cancelled("the call context was cancelled")
}

fn deadline_exceeded() -> Error {
    Error::timeout("the call context deadline expired")
}
