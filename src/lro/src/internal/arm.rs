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

//! This module implements the Azure Resource Manager polling loop.
//!
//! The generated clients provide two closures. The first one sends the request
//! that starts the operation, and returns the raw response. The second one
//! sends a `GET` request to a fully-qualified URL, and also returns the raw
//! response. The poller uses the second closure for the operation status URL,
//! the `Location` URL, and to fetch the final resource.

use crate::details::{self, Next, Step};
use crate::polling::{PollingBackoffPolicy, PollingErrorPolicy, PollingState};
use crate::{Error, Poller, PollerState, PollingResult, Result};
use bytes::Bytes;
use gax::context::CallContext;
use gax::response::Response;
use std::sync::Arc;
use std::time::Duration;

/// Creates a poller for an operation returning `R`.
///
/// # Parameters
/// * `resource_url` - the URL of the resource created or updated by the
///   operation, if any. The poller fetches the final result from this URL
///   once the operation status reports success.
/// * `start` - starts the operation. Captures all the request parameters and
///   options.
/// * `query` - sends a `GET` request to the given URL. Must accept any
///   successful status code, as `Location` URLs return `202 Accepted` while
///   the operation is in progress.
pub fn new_poller<R, S, SF, Q, QF>(
    polling_error_policy: Arc<dyn PollingErrorPolicy>,
    polling_backoff_policy: Arc<dyn PollingBackoffPolicy>,
    resource_url: Option<String>,
    start: S,
    query: Q,
) -> impl Poller<R>
where
    R: serde::de::DeserializeOwned + Default + Send,
    S: FnOnce() -> SF + Send + Sync,
    SF: std::future::Future<Output = Result<Response<Bytes>>> + Send + 'static,
    Q: Fn(String) -> QF + Send + Sync,
    QF: std::future::Future<Output = Result<Response<Bytes>>> + Send + 'static,
{
    ArmPoller::new(
        polling_error_policy,
        polling_backoff_policy,
        resource_url,
        start,
        query,
    )
}

/// Creates a poller for operations without a result, such as deletes.
pub fn new_unit_poller<S, SF, Q, QF>(
    polling_error_policy: Arc<dyn PollingErrorPolicy>,
    polling_backoff_policy: Arc<dyn PollingBackoffPolicy>,
    start: S,
    query: Q,
) -> impl Poller<()>
where
    S: FnOnce() -> SF + Send + Sync,
    SF: std::future::Future<Output = Result<Response<Bytes>>> + Send + 'static,
    Q: Fn(String) -> QF + Send + Sync,
    QF: std::future::Future<Output = Result<Response<Bytes>>> + Send + 'static,
{
    ArmPoller::new(
        polling_error_policy,
        polling_backoff_policy,
        None,
        start,
        query,
    )
}

struct ArmPoller<S, Q> {
    error_policy: Arc<dyn PollingErrorPolicy>,
    backoff_policy: Arc<dyn PollingBackoffPolicy>,
    resource_url: Option<String>,
    start: Option<S>,
    query: Q,
    next: Option<Next>,
    retry_after: Option<Duration>,
    state: PollingState,
    poller_state: PollerState,
}

impl<S, Q> ArmPoller<S, Q> {
    fn new(
        error_policy: Arc<dyn PollingErrorPolicy>,
        backoff_policy: Arc<dyn PollingBackoffPolicy>,
        resource_url: Option<String>,
        start: S,
        query: Q,
    ) -> Self {
        Self {
            error_policy,
            backoff_policy,
            resource_url,
            start: Some(start),
            query,
            next: None,
            retry_after: None,
            state: PollingState::default(),
            poller_state: PollerState::Submitted,
        }
    }

    fn apply<R>(&mut self, step: Step<R>) -> PollingResult<R> {
        let previous = self.poller_state;
        self.next = step.next;
        self.retry_after = step.retry_after;
        self.poller_state = step.state;
        match &step.result {
            PollingResult::Completed(Err(e)) => {
                tracing::warn!(
                    from = ?previous,
                    to = ?self.poller_state,
                    attempt_count = self.state.attempt_count,
                    "long-running operation failed: {e}"
                );
            }
            PollingResult::PollingError(e) => {
                tracing::debug!(
                    attempt_count = self.state.attempt_count,
                    "error polling long-running operation, will retry: {e}"
                );
            }
            PollingResult::InProgress(current) => {
                tracing::debug!(
                    from = ?previous,
                    to = ?self.poller_state,
                    provisioning_state = ?current,
                    url = self.next.as_ref().map(Next::url),
                    "long-running operation in progress"
                );
            }
            PollingResult::Completed(Ok(_)) => {
                tracing::debug!(
                    from = ?previous,
                    to = ?self.poller_state,
                    attempt_count = self.state.attempt_count,
                    "long-running operation completed"
                );
            }
        }
        step.result
    }

    fn wait_period(&mut self) -> Duration {
        self.backoff_policy
            .wait_period(&self.state, self.retry_after.take())
    }
}

impl<S, Q> crate::sealed::Poller for ArmPoller<S, Q> {}

impl<R, S, SF, Q, QF> Poller<R> for ArmPoller<S, Q>
where
    R: serde::de::DeserializeOwned + Default + Send,
    S: FnOnce() -> SF + Send + Sync,
    SF: std::future::Future<Output = Result<Response<Bytes>>> + Send + 'static,
    Q: Fn(String) -> QF + Send + Sync,
    QF: std::future::Future<Output = Result<Response<Bytes>>> + Send + 'static,
{
    fn state(&self) -> PollerState {
        self.poller_state
    }

    async fn poll(&mut self) -> Option<PollingResult<R>> {
        if let Some(start) = self.start.take() {
            let result = start().await;
            let step = details::handle_start(result, self.resource_url.take());
            return Some(self.apply(step));
        }
        loop {
            let next = self.next.take()?;
            self.state.record_attempt();
            let result = (self.query)(next.url().to_string()).await;
            let step = details::handle_poll(self.error_policy.as_ref(), &self.state, next, result);
            let follow_up = step.follow_up();
            let result = self.apply(step);
            if !follow_up {
                return Some(result);
            }
        }
    }

    async fn until_done(self) -> Result<R> {
        <Self as Poller<R>>::until_done_with(self, &CallContext::default()).await
    }

    async fn until_done_with(mut self, ctx: &CallContext) -> Result<R> {
        loop {
            let step = async { Ok(<Self as Poller<R>>::poll(&mut self).await) };
            let Some(p) = ctx.run(step).await? else {
                break;
            };
            match p {
                // Return, the operation completed or the polling policy is
                // exhausted.
                PollingResult::Completed(r) => return r,
                // Continue, the operation was successfully polled and the
                // polling policy was queried.
                PollingResult::InProgress(_) => (),
                // Continue, the polling policy was queried and decided the
                // error is recoverable.
                PollingResult::PollingError(_) => (),
            }
            ctx.sleep(self.wait_period()).await?;
        }
        // We can only get here if `poll()` returns `None`, but it only returns
        // `None` after it returned `PollingResult::Completed` and therefore
        // this is never reached.
        Err(Error::other("polling loop ended without a result"))
    }

    #[cfg(feature = "unstable-stream")]
    fn into_stream(self) -> impl futures::Stream<Item = PollingResult<R>> + Unpin {
        use futures::stream::unfold;
        Box::pin(unfold(Some(self), move |state| async move {
            if let Some(mut poller) = state {
                if let Some(pr) = <Self as Poller<R>>::poll(&mut poller).await {
                    return Some((pr, Some(poller)));
                }
            };
            None
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polling::{
        AlwaysContinue, ArmStrict, ExponentialBackoff, ExponentialBackoffBuilder,
        PollingErrorPolicyExt,
    };
    use gax::response::Parts;
    use http::{HeaderMap, HeaderValue, StatusCode};
    use serde_json::{Value, json};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    type TestResult = anyhow::Result<()>;

    const STATUS_URL: &str = "https://management.azure.com/operations/op-1";
    const RESOURCE_URL: &str = "https://management.azure.com/subscriptions/abc/resourceGroups/rg1/providers/Microsoft.ManagedIdentity/userAssignedIdentities/id1";

    fn response(status: StatusCode, headers: &[(&'static str, &'static str)], body: Value) -> Response<Bytes> {
        let mut map = HeaderMap::new();
        for (k, v) in headers {
            map.insert(*k, HeaderValue::from_static(v));
        }
        let body = match body {
            Value::Null => Bytes::new(),
            b => Bytes::from(b.to_string()),
        };
        Response::from_parts(Parts::new().set_status(status).set_headers(map), body)
    }

    fn accepted() -> Response<Bytes> {
        response(
            StatusCode::CREATED,
            &[("azure-asyncoperation", STATUS_URL)],
            json!({"name": "id1", "properties": {"provisioningState": "Accepted"}}),
        )
    }

    fn status(s: &str) -> Result<Response<Bytes>> {
        Ok(response(StatusCode::OK, &[], json!({"status": s})))
    }

    fn resource() -> Value {
        json!({"name": "id1", "properties": {"provisioningState": "Succeeded", "clientId": "client-1"}})
    }

    fn test_backoff() -> ExponentialBackoff {
        ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::from_millis(100))
            .with_maximum_delay(Duration::from_secs(1))
            .build()
            .expect("a valid backoff policy")
    }

    /// Returns scripted responses in order, and records the queried URLs.
    #[derive(Clone, Default)]
    struct Script {
        responses: Arc<Mutex<VecDeque<Result<Response<Bytes>>>>>,
        urls: Arc<Mutex<Vec<String>>>,
    }

    impl Script {
        fn new<I: IntoIterator<Item = Result<Response<Bytes>>>>(responses: I) -> Self {
            Self {
                responses: Arc::new(Mutex::new(responses.into_iter().collect())),
                urls: Arc::default(),
            }
        }

        fn query(&self) -> impl Fn(String) -> std::future::Ready<Result<Response<Bytes>>> + Send + Sync + use<> {
            let script = self.clone();
            move |url| {
                script.urls.lock().unwrap().push(url);
                let next = script.responses.lock().unwrap().pop_front();
                std::future::ready(next.unwrap_or_else(|| Err(Error::other("script exhausted"))))
            }
        }

        fn urls(&self) -> Vec<String> {
            self.urls.lock().unwrap().clone()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn until_done_success() -> TestResult {
        let script = Script::new([
            status("InProgress"),
            status("Running"),
            status("Succeeded"),
            Ok(response(StatusCode::OK, &[], resource())),
        ]);
        let start = || async move { Ok(accepted()) };
        let poller = new_poller::<Value, _, _, _, _>(
            Arc::new(ArmStrict),
            Arc::new(test_backoff()),
            Some(RESOURCE_URL.to_string()),
            start,
            script.query(),
        );
        let begin = tokio::time::Instant::now();
        let got = poller.until_done().await?;
        assert_eq!(got, resource());
        assert_eq!(
            script.urls(),
            vec![STATUS_URL, STATUS_URL, STATUS_URL, RESOURCE_URL]
        );
        // Three waits: after the start, after `InProgress` and after `Running`.
        // The final resource is fetched without waiting.
        let elapsed = begin.elapsed();
        assert_eq!(elapsed, Duration::from_millis(100 + 100 + 200), "{elapsed:?}");
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn until_done_retry_after() -> TestResult {
        let script = Script::new([
            Ok(response(
                StatusCode::OK,
                &[("retry-after", "10")],
                json!({"status": "InProgress"}),
            )),
            status("Succeeded"),
        ]);
        let start = || async move {
            Ok(response(
                StatusCode::ACCEPTED,
                &[("azure-asyncoperation", STATUS_URL), ("retry-after", "2")],
                Value::Null,
            ))
        };
        let poller = new_unit_poller(
            Arc::new(ArmStrict),
            Arc::new(test_backoff()),
            start,
            script.query(),
        );
        let begin = tokio::time::Instant::now();
        poller.until_done().await?;
        assert_eq!(begin.elapsed(), Duration::from_secs(12));
        assert_eq!(script.urls(), vec![STATUS_URL, STATUS_URL]);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn until_done_failed() -> TestResult {
        let script = Script::new([
            status("InProgress"),
            Ok(response(
                StatusCode::OK,
                &[],
                json!({"status": "Failed", "error": {"code": "Conflict", "message": "the identity is being deleted"}}),
            )),
        ]);
        let start = || async move { Ok(accepted()) };
        let poller = new_poller::<Value, _, _, _, _>(
            Arc::new(ArmStrict),
            Arc::new(test_backoff()),
            Some(RESOURCE_URL.to_string()),
            start,
            script.query(),
        );
        let err = poller.until_done().await.unwrap_err();
        assert!(err.is_operation_failed(), "{err:?}");
        let failure = err.operation_failure().unwrap();
        assert_eq!(failure.status, "Failed");
        assert_eq!(failure.code, "Conflict");
        assert_eq!(failure.message, "the identity is being deleted");
        assert_eq!(script.urls(), vec![STATUS_URL, STATUS_URL]);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn until_done_location() -> TestResult {
        let location = "https://management.azure.com/operationResults/op-1";
        let script = Script::new([
            Ok(response(StatusCode::ACCEPTED, &[], Value::Null)),
            Ok(response(StatusCode::NO_CONTENT, &[], Value::Null)),
        ]);
        let start = move || async move {
            Ok(response(StatusCode::ACCEPTED, &[("location", location)], Value::Null))
        };
        let poller = new_unit_poller(
            Arc::new(ArmStrict),
            Arc::new(test_backoff()),
            start,
            script.query(),
        );
        poller.until_done().await?;
        assert_eq!(script.urls(), vec![location, location]);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn until_done_synchronous() -> TestResult {
        let script = Script::new([]);
        let start = || async move { Ok(response(StatusCode::OK, &[], resource())) };
        let poller = new_poller::<Value, _, _, _, _>(
            Arc::new(ArmStrict),
            Arc::new(test_backoff()),
            Some(RESOURCE_URL.to_string()),
            start,
            script.query(),
        );
        let got = poller.until_done().await?;
        assert_eq!(got, resource());
        assert!(script.urls().is_empty(), "{:?}", script.urls());
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn until_done_start_error() {
        let script = Script::new([]);
        let start = || async move {
            Err(Error::service_with_http_metadata(
                409,
                HeaderMap::new(),
                Bytes::from_static(b"{\"error\": {\"code\": \"Conflict\", \"message\": \"busy\"}}"),
            ))
        };
        let poller = new_unit_poller(
            Arc::new(ArmStrict),
            Arc::new(test_backoff()),
            start,
            script.query(),
        );
        let err = poller.until_done().await.unwrap_err();
        assert_eq!(err.http_status_code(), Some(409), "{err:?}");
        assert!(script.urls().is_empty(), "{:?}", script.urls());
    }

    #[tokio::test(start_paused = true)]
    async fn until_done_transient_errors() -> TestResult {
        let script = Script::new([
            Err(Error::io("connection reset")),
            status("InProgress"),
            Err(Error::io("connection reset")),
            status("Succeeded"),
        ]);
        let start = || async move { Ok(accepted()) };
        let poller = new_unit_poller(
            Arc::new(ArmStrict),
            Arc::new(test_backoff()),
            start,
            script.query(),
        );
        poller.until_done().await?;
        assert_eq!(script.urls().len(), 4);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn until_done_with_attempt_timeout() -> TestResult {
        // The executor reports a status query that exceeds its attempt
        // timeout as a transport error. Only the call deadline stops polling.
        let script = Script::new([
            Err(Error::io("operation timed out")),
            status("Succeeded"),
        ]);
        let start = || async move { Ok(accepted()) };
        let poller = new_unit_poller(
            Arc::new(ArmStrict),
            Arc::new(test_backoff()),
            start,
            script.query(),
        );
        let ctx = CallContext::new().with_timeout(Duration::from_secs(3600));
        poller.until_done_with(&ctx).await?;
        assert_eq!(script.urls(), vec![STATUS_URL, STATUS_URL]);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn until_done_permanent_error() {
        let script = Script::new([
            status("InProgress"),
            Err(Error::service_with_http_metadata(
                500,
                HeaderMap::new(),
                Bytes::new(),
            )),
            status("Succeeded"),
        ]);
        let start = || async move { Ok(accepted()) };
        let mut poller = new_unit_poller(
            Arc::new(ArmStrict),
            Arc::new(test_backoff()),
            start,
            script.query(),
        );
        while let Some(p) = poller.poll().await {
            if let PollingResult::Completed(r) = p {
                let err = r.unwrap_err();
                assert_eq!(err.http_status_code(), Some(500), "{err:?}");
            }
        }
        assert_eq!(poller.state(), PollerState::Failed);
        assert_eq!(script.urls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn until_done_exhausted() {
        let script = Script::new((0..10).map(|_| status("InProgress")));
        let start = || async move { Ok(accepted()) };
        let poller = new_unit_poller(
            Arc::new(AlwaysContinue.with_attempt_limit(3)),
            Arc::new(test_backoff()),
            start,
            script.query(),
        );
        let err = poller.until_done().await.unwrap_err();
        assert!(err.is_exhausted(), "{err:?}");
        assert_eq!(script.urls().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn until_done_with_cancel() {
        let script = Script::new((0..10).map(|_| status("InProgress")));
        let start = || async move { Ok(accepted()) };
        let poller = new_unit_poller(
            Arc::new(ArmStrict),
            Arc::new(test_backoff()),
            start,
            script.query(),
        );
        let ctx = CallContext::new();
        let child = ctx.clone();
        let task = tokio::spawn(async move { poller.until_done_with(&child).await });
        // Let the poller start and query once, then cancel during the wait.
        tokio::time::sleep(Duration::from_millis(150)).await;
        ctx.cancel();
        let err = task.await.expect("task should not panic").unwrap_err();
        assert!(err.is_cancelled(), "{err:?}");
        assert_eq!(script.urls().len(), 1);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(script.urls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn until_done_with_deadline() {
        let script = Script::new((0..100).map(|_| status("InProgress")));
        let start = || async move { Ok(accepted()) };
        let poller = new_unit_poller(
            Arc::new(ArmStrict),
            Arc::new(test_backoff()),
            start,
            script.query(),
        );
        let ctx = CallContext::new().with_timeout(Duration::from_millis(2500));
        let err = poller.until_done_with(&ctx).await.unwrap_err();
        assert!(err.is_timeout(), "{err:?}");
        // Waits of 100ms, 100ms, 200ms, 400ms, 800ms and then 1s: the
        // deadline expires during the sixth wait.
        assert_eq!(script.urls().len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn until_done_with_cancelled_before_start() {
        let started = Arc::new(AtomicU32::new(0));
        let counter = started.clone();
        let start = move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(accepted())
        };
        let script = Script::new([]);
        let poller = new_unit_poller(
            Arc::new(ArmStrict),
            Arc::new(test_backoff()),
            start,
            script.query(),
        );
        let ctx = CallContext::new();
        ctx.cancel();
        let err = poller.until_done_with(&ctx).await.unwrap_err();
        assert!(err.is_cancelled(), "{err:?}");
        assert_eq!(started.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn poll_states() -> TestResult {
        let script = Script::new([status("Creating"), status("Succeeded")]);
        let start = || async move { Ok(accepted()) };
        let mut poller = new_unit_poller(
            Arc::new(ArmStrict),
            Arc::new(test_backoff()),
            start,
            script.query(),
        );
        assert_eq!(poller.state(), PollerState::Submitted);

        let p = poller.poll().await;
        assert!(
            matches!(
                p,
                Some(PollingResult::InProgress(Some(crate::ProvisioningState::Accepted)))
            ),
            "{p:?}"
        );
        assert_eq!(poller.state(), PollerState::Polling);

        let p = poller.poll().await;
        assert!(
            matches!(
                p,
                Some(PollingResult::InProgress(Some(crate::ProvisioningState::Creating)))
            ),
            "{p:?}"
        );

        let p = poller.poll().await;
        assert!(matches!(p, Some(PollingResult::Completed(Ok(())))), "{p:?}");
        assert_eq!(poller.state(), PollerState::Succeeded);

        let p = poller.poll().await;
        assert!(p.is_none(), "{p:?}");
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn poll_stream() {
        use futures::StreamExt;
        let script = Script::new([status("InProgress"), status("Succeeded")]);
        let start = || async move { Ok(accepted()) };
        let poller = new_unit_poller(
            Arc::new(ArmStrict),
            Arc::new(test_backoff()),
            start,
            script.query(),
        );
        let got = poller.into_stream().collect::<Vec<_>>().await;
        assert_eq!(got.len(), 3, "{got:?}");
        assert!(matches!(got[0], PollingResult::InProgress(_)), "{got:?}");
        assert!(matches!(got[1], PollingResult::InProgress(_)), "{got:?}");
        assert!(matches!(got[2], PollingResult::Completed(Ok(()))), "{got:?}");
    }
}
