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

//! Drive the poller against a local HTTP server, using the request executor.

extern crate azure_rm_lro as lro;

#[cfg(test)]
mod tests {
    use gax::options::RequestOptions;
    use gaxi::http::{ExpectedStatus, NoBody, ReqwestClient};
    use gaxi::options::ClientConfig;
    use httptest::{Expectation, Server, all_of, matchers::*, responders::*};
    use lro::polling::{ArmStrict, ExponentialBackoffBuilder, PollingBackoffPolicy};
    use lro::{Poller, PollerState, PollingResult, ProvisioningState};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::time::Duration;

    type Result<T> = anyhow::Result<T>;

    const PATH: &str = "/subscriptions/abc/resourceGroups/rg1/providers/Microsoft.ManagedIdentity/userAssignedIdentities/id1";

    async fn test_client(server: &Server) -> Result<ReqwestClient> {
        let endpoint = format!("http://{}", server.addr());
        let client = ReqwestClient::new(ClientConfig::default(), &endpoint).await?;
        Ok(client)
    }

    fn test_backoff() -> Arc<dyn PollingBackoffPolicy> {
        let backoff = ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::from_millis(1))
            .with_maximum_delay(Duration::from_millis(5))
            .build()
            .expect("a valid backoff policy");
        Arc::new(backoff)
    }

    fn create_poller(client: ReqwestClient) -> impl Poller<Value> {
        create_poller_with(client, RequestOptions::default())
    }

    fn create_poller_with(client: ReqwestClient, query_options: RequestOptions) -> impl Poller<Value> {
        let start_client = client.clone();
        let resource_url = format!("{}{PATH}", client.endpoint());
        let start = move || async move {
            let builder = start_client.builder(reqwest::Method::PUT, PATH.to_string());
            let builder = gaxi::query_parameter::api_version(builder, "2023-01-31");
            start_client
                .execute_raw(
                    builder,
                    Some(json!({"location": "westus"})),
                    ExpectedStatus::Codes(&[200, 201]),
                    RequestOptions::default(),
                )
                .await
        };
        let query = move |url: String| {
            let client = client.clone();
            let options = query_options.clone();
            async move {
                let builder = client.builder_for_url(reqwest::Method::GET, &url);
                client
                    .execute_raw::<NoBody>(builder, None, ExpectedStatus::Success, options)
                    .await
            }
        };
        lro::internal::new_poller(
            Arc::new(ArmStrict),
            test_backoff(),
            Some(resource_url),
            start,
            query,
        )
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn async_operation_success() -> Result<()> {
        let server = Server::run();
        let status_url = server.url_str("/operations/op-1?api-version=2023-01-31");
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", PATH),
                request::query(url_decoded(contains(("api-version", "2023-01-31")))),
            ])
            .respond_with(
                status_code(201)
                    .append_header("azure-asyncoperation", status_url)
                    .append_header("retry-after", "0")
                    .body(json!({"name": "id1", "properties": {"provisioningState": "Creating"}}).to_string()),
            ),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/operations/op-1"),
                request::query(url_decoded(contains(("api-version", "2023-01-31")))),
            ])
            .times(3)
            .respond_with(cycle![
                json_encoded(json!({"status": "InProgress"})),
                json_encoded(json!({"status": "Running"})),
                json_encoded(json!({"status": "Succeeded"})),
            ]),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", PATH)).respond_with(json_encoded(
                json!({"name": "id1", "properties": {"provisioningState": "Succeeded", "clientId": "client-1"}}),
            )),
        );

        let client = test_client(&server).await?;
        let got = create_poller(client).until_done().await?;
        assert_eq!(got["properties"]["clientId"], json!("client-1"));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn async_operation_failed() -> Result<()> {
        let server = Server::run();
        let status_url = server.url_str("/operations/op-1");
        server.expect(
            Expectation::matching(request::method_path("PUT", PATH)).respond_with(
                status_code(201).append_header("azure-asyncoperation", status_url),
            ),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/operations/op-1")).respond_with(
                json_encoded(json!({
                    "status": "Failed",
                    "error": {"code": "InvalidLocation", "message": "westus9 is not a valid location"}
                })),
            ),
        );

        let client = test_client(&server).await?;
        let mut poller = create_poller(client);
        let mut last = None;
        while let Some(p) = poller.poll().await {
            last = Some(p);
        }
        assert_eq!(poller.state(), PollerState::Failed);
        match last {
            Some(PollingResult::Completed(Err(e))) => {
                let failure = e.operation_failure().cloned().unwrap_or_default();
                assert_eq!(failure.code, "InvalidLocation", "{e:?}");
                assert_eq!(failure.message, "westus9 is not a valid location", "{e:?}");
            }
            r => panic!("unexpected polling result {r:?}"),
        }
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn status_endpoint_not_found() -> Result<()> {
        let server = Server::run();
        let status_url = server.url_str("/operations/op-1");
        server.expect(
            Expectation::matching(request::method_path("PUT", PATH)).respond_with(
                status_code(201).append_header("azure-asyncoperation", status_url),
            ),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/operations/op-1")).respond_with(
                status_code(404).body(
                    json!({"error": {"code": "OperationNotFound", "message": "gone"}}).to_string(),
                ),
            ),
        );

        let client = test_client(&server).await?;
        let err = create_poller(client).until_done().await.unwrap_err();
        assert!(err.is_not_found(), "{err:?}");
        assert_eq!(
            err.cloud_error().map(|e| e.code.as_str()),
            Some("OperationNotFound"),
            "{err:?}"
        );
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn location_delete() -> Result<()> {
        let server = Server::run();
        let location = server.url_str("/operationResults/op-2");
        server.expect(
            Expectation::matching(request::method_path("DELETE", PATH)).respond_with(
                status_code(202)
                    .append_header("location", location)
                    .append_header("retry-after", "0"),
            ),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/operationResults/op-2"))
                .times(2)
                .respond_with(cycle![status_code(202), status_code(204)]),
        );

        let client = test_client(&server).await?;
        let start_client = client.clone();
        let start = move || async move {
            let builder = start_client.builder(reqwest::Method::DELETE, PATH.to_string());
            start_client
                .execute_raw::<NoBody>(
                    builder,
                    None,
                    ExpectedStatus::Codes(&[200, 202, 204]),
                    RequestOptions::default(),
                )
                .await
        };
        let query = move |url: String| {
            let client = client.clone();
            let options = query_options.clone();
            async move {
                let builder = client.builder_for_url(reqwest::Method::GET, &url);
                client
                    .execute_raw::<NoBody>(builder, None, ExpectedStatus::Success, options)
                    .await
            }
        };
        let mut poller = lro::internal::new_unit_poller(Arc::new(ArmStrict), test_backoff(), start, query);
        let mut states = Vec::new();
        while let Some(p) = poller.poll().await {
            match p {
                PollingResult::InProgress(s) => states.push(s),
                PollingResult::Completed(r) => r?,
                PollingResult::PollingError(e) => return Err(e.into()),
            }
        }
        assert_eq!(states, vec![None, None]);
        assert_eq!(poller.state(), PollerState::Succeeded);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn synchronous_create() -> Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("PUT", PATH)).respond_with(
                status_code(200).body(
                    json!({"name": "id1", "properties": {"provisioningState": "Succeeded"}}).to_string(),
                ),
            ),
        );

        let client = test_client(&server).await?;
        let mut poller = create_poller(client);
        let p = poller.poll().await;
        assert!(matches!(p, Some(PollingResult::Completed(Ok(_)))), "{p:?}");
        assert_eq!(poller.state(), PollerState::Succeeded);
        assert!(poller.poll().await.is_none());
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn stream() -> Result<()> {
        use futures::StreamExt;
        let server = Server::run();
        let status_url = server.url_str("/operations/op-1");
        server.expect(
            Expectation::matching(request::method_path("PUT", PATH)).respond_with(
                status_code(201).append_header("azure-asyncoperation", status_url),
            ),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/operations/op-1"))
                .times(2)
                .respond_with(cycle![
                    json_encoded(json!({"status": "Updating"})),
                    json_encoded(json!({"status": "Succeeded"})),
                ]),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", PATH))
                .respond_with(json_encoded(json!({"name": "id1"}))),
        );

        let client = test_client(&server).await?;
        let got = create_poller(client).into_stream().collect::<Vec<_>>().await;
        assert_eq!(got.len(), 3, "{got:?}");
        assert!(
            matches!(got[1], PollingResult::InProgress(Some(ProvisioningState::Updating))),
            "{got:?}"
        );
        assert!(matches!(got[2], PollingResult::Completed(Ok(_))), "{got:?}");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn status_attempt_timeout() -> Result<()> {
        let server = Server::run();
        let status_url = server.url_str("/operations/op-1");
        server.expect(
            Expectation::matching(request::method_path("PUT", PATH)).respond_with(
                status_code(201).append_header("azure-asyncoperation", status_url),
            ),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/operations/op-1"))
                .times(2)
                .respond_with(cycle![
                    delay_and_then(
                        Duration::from_millis(500),
                        json_encoded(json!({"status": "InProgress"})),
                    ),
                    json_encoded(json!({"status": "Succeeded"})),
                ]),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", PATH))
                .respond_with(json_encoded(json!({"name": "id1"}))),
        );

        let client = test_client(&server).await?;
        let mut options = RequestOptions::default();
        options.set_attempt_timeout(Duration::from_millis(50));
        let ctx = gax::context::CallContext::new().with_timeout(Duration::from_secs(3600));
        let got = create_poller_with(client, options).until_done_with(&ctx).await?;
        assert_eq!(got, json!({"name": "id1"}));
        Ok(())
    }
}
