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

#[cfg(test)]
mod test {
    use azure_rm_gax::error::Error;
    use azure_rm_gax::error::cloud::{CloudError, OperationFailure};
    use std::error::Error as _;

    #[derive(Debug, thiserror::Error)]
    #[error("leaf error")]
    struct LeafError;

    #[derive(Debug, thiserror::Error)]
    #[error("middle error")]
    struct MiddleError(#[source] LeafError);

    #[test]
    fn source_chain() {
        let error = Error::other(MiddleError(LeafError));
        let middle = error.source().and_then(|e| e.downcast_ref::<MiddleError>());
        assert!(middle.is_some(), "{error:?}");
        let leaf = middle
            .and_then(|e| e.source())
            .and_then(|e| e.downcast_ref::<LeafError>());
        assert!(leaf.is_some(), "{error:?}");
    }

    #[test]
    fn unexpected_status_with_cloud_error() {
        let payload = serde_json::json!({
            "error": {
                "code": "ResourceGroupNotFound",
                "message": "Resource group 'rg1' could not be found.",
            }
        });
        let error = Error::service_with_http_metadata(
            404,
            http::HeaderMap::new(),
            bytes::Bytes::from(payload.to_string()),
        );
        assert!(error.is_unexpected_status(), "{error:?}");
        assert!(error.is_not_found(), "{error:?}");
        assert_eq!(error.http_status_code(), Some(404));
        let cloud = error.cloud_error();
        assert_eq!(
            cloud.map(|c| c.code.as_str()),
            Some("ResourceGroupNotFound"),
            "{error:?}"
        );
        assert!(error.to_string().contains("ResourceGroupNotFound"), "{error}");
    }

    #[test]
    fn operation_failed_with_context() {
        let failure = OperationFailure::from((
            "Failed".to_string(),
            Some(CloudError::new("Conflict", "another operation is in progress")),
        ));
        let error = Error::operation_failed(failure).with_context(
            "create",
            "/subscriptions/abc/resourceGroups/rg1",
        );
        assert!(error.is_operation_failed(), "{error:?}");
        let got = error.operation_failure();
        assert_eq!(got.map(|f| f.code.as_str()), Some("Conflict"), "{error:?}");
        let fmt = error.to_string();
        assert!(
            fmt.starts_with("create /subscriptions/abc/resourceGroups/rg1: "),
            "{fmt}"
        );
        assert!(fmt.contains("another operation is in progress"), "{fmt}");
    }
}
