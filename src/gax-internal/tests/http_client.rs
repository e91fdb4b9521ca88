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

//! Verify the request executor against a local HTTP server.

extern crate azure_rm_gax_internal as gaxi;

#[cfg(test)]
mod tests {
    use gax::credentials::BearerToken;
    use gax::options::*;
    use gaxi::http::{CLIENT_REQUEST_ID, ExpectedStatus, NoBody, ReqwestClient};
    use gaxi::options::{ClientConfig, InstrumentationClientInfo};
    use httptest::{Expectation, Server, all_of, matchers::*, responders::*};
    use serde_json::{Value, json};
    use std::time::Duration;

    type Result<T> = anyhow::Result<T>;

    async fn test_client(server: &Server) -> Result<ReqwestClient> {
        let endpoint = format!("http://{}", server.addr());
        let client = ReqwestClient::new(test_config(), &endpoint).await?;
        Ok(client)
    }

    fn test_config() -> ClientConfig {
        let mut config = ClientConfig::default();
        config.cred = Some(BearerToken::new("test-token").into());
        config
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn success_with_body() -> Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", "/subscriptions/abc/resourceGroups/rg1"),
                request::query(url_decoded(contains(("api-version", "2021-04-01")))),
                request::headers(contains(("authorization", "Bearer test-token"))),
                request::headers(contains(("content-type", "application/json"))),
                request::body(json_decoded(eq(json!({"location": "westus"})))),
            ])
            .respond_with(
                status_code(201)
                    .append_header("x-ms-request-id", "req-1")
                    .body(json!({"name": "rg1", "location": "westus"}).to_string()),
            ),
        );

        let client = test_client(&server).await?;
        let builder = client.builder(
            reqwest::Method::PUT,
            "/subscriptions/abc/resourceGroups/rg1".to_string(),
        );
        let builder = gaxi::query_parameter::api_version(builder, "2021-04-01");
        let response = client
            .execute::<Value, Value>(
                builder,
                Some(json!({"location": "westus"})),
                ExpectedStatus::Codes(&[200, 201]),
                RequestOptions::default(),
            )
            .await?;
        assert_eq!(response.status(), http::StatusCode::CREATED);
        assert_eq!(
            response.headers().get("x-ms-request-id").map(|v| v.as_bytes()),
            Some("req-1".as_bytes())
        );
        assert_eq!(response.into_body(), json!({"name": "rg1", "location": "westus"}));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn no_content() -> Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("DELETE", "/resource"))
                .respond_with(status_code(204)),
        );

        let client = test_client(&server).await?;
        let builder = client.builder(reqwest::Method::DELETE, "/resource".to_string());
        let response = client
            .execute::<NoBody, Value>(
                builder,
                None,
                ExpectedStatus::Codes(&[200, 202, 204]),
                RequestOptions::default(),
            )
            .await?;
        assert_eq!(response.status(), http::StatusCode::NO_CONTENT);
        assert_eq!(response.into_body(), Value::Null);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn unexpected_status_with_cloud_error() -> Result<()> {
        let server = Server::run();
        let payload = json!({"error": {
            "code": "ResourceNotFound",
            "message": "The Resource 'id1' was not found.",
        }});
        server.expect(
            Expectation::matching(request::method_path("GET", "/resource")).respond_with(
                status_code(404)
                    .append_header("content-type", "application/json")
                    .body(payload.to_string()),
            ),
        );

        let client = test_client(&server).await?;
        let builder = client.builder(reqwest::Method::GET, "/resource".to_string());
        let err = client
            .execute::<NoBody, Value>(builder, None, ExpectedStatus::OK, RequestOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_unexpected_status(), "{err:?}");
        assert!(err.is_not_found(), "{err:?}");
        assert_eq!(err.http_status_code(), Some(404));
        let cloud = err.cloud_error().expect("404 response has a cloud error");
        assert_eq!(cloud.code, "ResourceNotFound");
        assert_eq!(cloud.message, "The Resource 'id1' was not found.");
        assert_eq!(
            err.http_payload(),
            Some(&bytes::Bytes::from(payload.to_string()))
        );
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn unexpected_success_status() -> Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/resource"))
                .respond_with(status_code(202)),
        );

        let client = test_client(&server).await?;
        let builder = client.builder(reqwest::Method::GET, "/resource".to_string());
        let err = client
            .execute::<NoBody, Value>(builder, None, ExpectedStatus::OK, RequestOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_unexpected_status(), "{err:?}");
        assert_eq!(err.http_status_code(), Some(202));
        assert!(err.cloud_error().is_none(), "{err:?}");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn user_agent() -> Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/resource"),
                request::headers(contains(("user-agent", "test-prefix/1.2.3"))),
            ])
            .respond_with(status_code(200).body("{}")),
        );

        let client = test_client(&server).await?;
        let builder = client.builder(reqwest::Method::GET, "/resource".to_string());
        let options = {
            let mut o = RequestOptions::default();
            o.set_user_agent("test-prefix/1.2.3");
            o
        };
        let response = client
            .execute::<NoBody, Value>(builder, None, ExpectedStatus::OK, options)
            .await?;
        assert_eq!(response.into_body(), json!({}));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn default_user_agent() -> Result<()> {
        static INFO: InstrumentationClientInfo = InstrumentationClientInfo {
            service_name: "Microsoft.Resources",
            client_version: "0.1.0",
            client_artifact: "azure-rm-resources",
            api_version: "2021-04-01",
        };
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/resource"),
                request::headers(contains(("user-agent", "azsdk-rust-resources/0.1.0"))),
            ])
            .times(1)
            .respond_with(status_code(200).body("{}")),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/resource"),
                request::headers(contains(("user-agent", "my-app/2.0"))),
            ])
            .times(1)
            .respond_with(status_code(200).body("{}")),
        );

        let client = test_client(&server).await?.with_instrumentation(&INFO);
        let builder = client.builder(reqwest::Method::GET, "/resource".to_string());
        client
            .execute::<NoBody, Value>(builder, None, ExpectedStatus::OK, RequestOptions::default())
            .await?;

        let builder = client.builder(reqwest::Method::GET, "/resource".to_string());
        let mut options = RequestOptions::default();
        options.set_user_agent("my-app/2.0");
        client
            .execute::<NoBody, Value>(builder, None, ExpectedStatus::OK, options)
            .await?;
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn client_request_id() -> Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("DELETE", "/subscriptions/abc/resourceGroups/rg1"),
                request::headers(contains((CLIENT_REQUEST_ID, "5e7c3b1a-run-42"))),
            ])
            .respond_with(
                status_code(200).append_header(CLIENT_REQUEST_ID, "5e7c3b1a-run-42"),
            ),
        );

        let client = test_client(&server).await?;
        let builder = client.builder(
            reqwest::Method::DELETE,
            "/subscriptions/abc/resourceGroups/rg1".to_string(),
        );
        let options = {
            let mut o = RequestOptions::default();
            o.set_client_request_id("5e7c3b1a-run-42");
            o
        };
        let response = client
            .execute_raw::<NoBody>(builder, None, ExpectedStatus::OK, options)
            .await?;
        assert_eq!(
            response.headers().get(CLIENT_REQUEST_ID).and_then(|v| v.to_str().ok()),
            Some("5e7c3b1a-run-42")
        );
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn attempt_timeout() -> Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/slow")).respond_with(
                delay_and_then(Duration::from_millis(500), status_code(200).body("{}")),
            ),
        );

        let client = test_client(&server).await?;
        let builder = client.builder(reqwest::Method::GET, "/slow".to_string());
        let options = {
            let mut o = RequestOptions::default();
            o.set_attempt_timeout(Duration::from_millis(50));
            o
        };
        let err = client
            .execute::<NoBody, Value>(builder, None, ExpectedStatus::OK, options)
            .await
            .unwrap_err();
        assert!(err.is_transport(), "{err:?}");
        assert!(!err.is_timeout(), "{err:?}");
        let source = std::error::Error::source(&err)
            .and_then(|e| e.downcast_ref::<reqwest::Error>());
        assert!(matches!(source, Some(e) if e.is_timeout()), "{err:?}");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn transport_error() -> Result<()> {
        // Find an unused port, then release it.
        let endpoint = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
            format!("http://{}", listener.local_addr()?)
        };
        let client = ReqwestClient::new(test_config(), &endpoint).await?;
        let builder = client.builder(reqwest::Method::GET, "/resource".to_string());
        let err = client
            .execute::<NoBody, Value>(builder, None, ExpectedStatus::OK, RequestOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_transport(), "{err:?}");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn next_link_verbatim() -> Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/list"),
                request::query(url_decoded(contains(("$skipToken", "abc")))),
                request::query(url_decoded(contains(("api-version", "2023-01-31")))),
            ])
            .respond_with(status_code(200).body(json!({"value": [1, 2]}).to_string())),
        );

        let client = test_client(&server).await?;
        let link = format!(
            "http://{}/list?api-version=2023-01-31&$skipToken=abc",
            server.addr()
        );
        let builder = client.builder_for_url(reqwest::Method::GET, &link);
        let response = client
            .execute::<NoBody, gax::paginator::Page<i32>>(
                builder,
                None,
                ExpectedStatus::OK,
                RequestOptions::default(),
            )
            .await?;
        let page = response.into_body();
        assert_eq!(page.value, vec![1, 2]);
        assert!(page.next_page_link().is_none(), "{page:?}");
        Ok(())
    }
}
