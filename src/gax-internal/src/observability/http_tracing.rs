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

use super::attributes::keys::*;
use super::attributes::*;
use super::errors::ErrorType;
use crate::options::InstrumentationClientInfo;
use gax::error::Error;
use gax::response::Response;
use tracing::{Span, field};

const REQUEST_ID: &str = "x-ms-request-id";

/// Creates a new tracing span for an HTTP request attempt.
///
/// Populates the span with attributes available before the request is sent.
pub(crate) fn create_http_attempt_span(
    request: &reqwest::Request,
    instrumentation: Option<&'static InstrumentationClientInfo>,
) -> Span {
    let url = request.url();
    let method = request.method();

    let otel_name = instrumentation.map_or_else(
        || method.to_string(),
        |info| format!("{} {}", method, info.service_name),
    );
    let (provider, api_version, client_version, client_artifact) = instrumentation
        .map_or((None, None, None, None), |info| {
            (
                Some(info.service_name),
                Some(info.api_version),
                Some(info.client_version),
                Some(info.client_artifact),
            )
        });

    tracing::info_span!(
        "http_request",
        { OTEL_NAME } = otel_name,
        { OTEL_KIND } = OTEL_KIND_CLIENT,
        { HTTP_REQUEST_METHOD } = method.as_str(),
        { SERVER_ADDRESS } = url
            .host_str()
            .map(|h| h.trim_start_matches('[').trim_end_matches(']'))
            .unwrap_or(""),
        { SERVER_PORT } = url.port_or_known_default().map(|p| p as i64).unwrap_or(0),
        { URL_FULL } = url.as_str(),
        { URL_SCHEME } = url.scheme(),
        { AZURE_RESOURCE_PROVIDER } = provider,
        { AZURE_API_VERSION } = api_version,
        { AZURE_CLIENT_VERSION } = client_version,
        { AZURE_CLIENT_ARTIFACT } = client_artifact,
        // Fields to be recorded later
        { OTEL_STATUS_CODE } = otel_status_codes::UNSET,
        { OTEL_STATUS_DESCRIPTION } = field::Empty,
        { HTTP_RESPONSE_STATUS_CODE } = field::Empty,
        { HTTP_RESPONSE_BODY_SIZE } = field::Empty,
        { AZURE_REQUEST_ID } = field::Empty,
        { ERROR_TYPE } = field::Empty,
    )
}

/// Records the outcome of the request attempt in `span`.
///
/// Unexpected status codes are recorded as errors, with the ARM error code as
/// the `error.type` when the service provides one.
pub(crate) fn record_http_result(span: &Span, result: Result<&Response<bytes::Bytes>, &Error>) {
    match result {
        Ok(response) => {
            span.record(
                HTTP_RESPONSE_STATUS_CODE,
                response.status().as_u16() as i64,
            );
            span.record(HTTP_RESPONSE_BODY_SIZE, response.body().len() as i64);
            if let Some(id) = response
                .headers()
                .get(REQUEST_ID)
                .and_then(|v| v.to_str().ok())
            {
                span.record(AZURE_REQUEST_ID, id);
            }
            span.record(OTEL_STATUS_CODE, otel_status_codes::OK);
        }
        Err(err) => {
            span.record(OTEL_STATUS_CODE, otel_status_codes::ERROR);
            if let Some(status) = err.http_status_code() {
                span.record(HTTP_RESPONSE_STATUS_CODE, status as i64);
            }
            if let Some(id) = err
                .http_headers()
                .and_then(|h| h.get(REQUEST_ID))
                .and_then(|v| v.to_str().ok())
            {
                span.record(AZURE_REQUEST_ID, id);
            }
            let error_type = ErrorType::from_gax_error(err);
            span.record(ERROR_TYPE, error_type.as_str());
            span.record(OTEL_STATUS_DESCRIPTION, err.to_string());
        }
    }
}
