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

// OpenTelemetry Semantic Convention Keys
// See https://opentelemetry.io/docs/specs/semconv/http/http-spans/

pub mod keys {
    /// Span Kind for OpenTelemetry interop.
    ///
    /// Always "Client" for a span representing an outbound HTTP request.
    pub const OTEL_KIND: &str = "otel.kind";
    /// Span Name for OpenTelemetry interop.
    ///
    /// "{http.request.method} {azure.resource_provider}" when the provider is known.
    pub const OTEL_NAME: &str = "otel.name";
    /// Span Status Code for OpenTelemetry interop.
    ///
    /// Must be one of "UNSET", "OK", or "ERROR".
    pub const OTEL_STATUS_CODE: &str = "otel.status_code";
    /// Span Status Description for OpenTelemetry interop.
    pub const OTEL_STATUS_DESCRIPTION: &str = "otel.status_description";

    pub const HTTP_REQUEST_METHOD: &str = "http.request.method";
    pub const HTTP_RESPONSE_STATUS_CODE: &str = "http.response.status_code";
    pub const HTTP_RESPONSE_BODY_SIZE: &str = "http.response.body.size";
    pub const SERVER_ADDRESS: &str = "server.address";
    pub const SERVER_PORT: &str = "server.port";
    pub const URL_FULL: &str = "url.full";
    pub const URL_SCHEME: &str = "url.scheme";
    pub const ERROR_TYPE: &str = "error.type";

    // Custom Azure attributes
    /// The resource provider namespace.
    ///
    /// Example: Microsoft.ManagedIdentity
    pub const AZURE_RESOURCE_PROVIDER: &str = "azure.resource_provider.namespace";
    /// The `api-version` used by the client.
    pub const AZURE_API_VERSION: &str = "azure.api_version";
    /// The client library version.
    pub const AZURE_CLIENT_VERSION: &str = "azure.client.version";
    /// The client library crate name.
    pub const AZURE_CLIENT_ARTIFACT: &str = "azure.client.artifact";
    /// The `x-ms-request-id` response header, used to correlate requests with
    /// service-side logs.
    pub const AZURE_REQUEST_ID: &str = "azure.request_id";
}

/// Value for [keys::OTEL_KIND].
pub const OTEL_KIND_CLIENT: &str = "Client";

/// Values for the OpenTelemetry `error.type` attribute.
/// See [https://opentelemetry.io/docs/specs/semconv/attributes-registry/error/]
pub mod error_type_values {
    /// A client-configured timeout was reached.
    pub const CLIENT_TIMEOUT: &str = "CLIENT_TIMEOUT";
    /// Failure to establish the network connection (DNS, TCP, TLS).
    pub const CLIENT_CONNECTION_ERROR: &str = "CLIENT_CONNECTION_ERROR";
    /// Client-side issue forming or sending the request.
    pub const CLIENT_REQUEST_ERROR: &str = "CLIENT_REQUEST_ERROR";
    /// Client-side issue sending the request body.
    pub const CLIENT_REQUEST_BODY_ERROR: &str = "CLIENT_REQUEST_BODY_ERROR";
    /// Client-side error decoding the response body.
    pub const CLIENT_RESPONSE_DECODE_ERROR: &str = "CLIENT_RESPONSE_DECODE_ERROR";
    /// Too many redirects, or a redirect loop.
    pub const CLIENT_REDIRECT_ERROR: &str = "CLIENT_REDIRECT_ERROR";
    /// Error during credential acquisition or application.
    pub const CLIENT_AUTHENTICATION_ERROR: &str = "CLIENT_AUTHENTICATION_ERROR";
    /// Unknown error type.
    pub const INTERNAL: &str = "INTERNAL";
}

/// Values for the OpenTelemetry `otel.status_code` attribute.
pub mod otel_status_codes {
    /// The operation completed successfully.
    pub const OK: &str = "OK";
    /// The operation contains an error.
    pub const ERROR: &str = "ERROR";
    /// The default status.
    pub const UNSET: &str = "UNSET";
}
