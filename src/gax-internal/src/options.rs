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

//! The configuration shared by the generated Resource Manager clients.

use gax::client_builder::Cloud;
pub use gax::credentials::Credentials;

/// What a generated client receives from its builder.
pub type ClientConfig = gax::client_builder::internal::ClientConfig<Credentials>;

pub(crate) const LOGGING_VAR: &str = "AZURE_RM_RUST_LOGGING";

/// Used when the builder sets neither an endpoint nor a cloud.
pub const DEFAULT_ENDPOINT: &str = Cloud::AzurePublic.endpoint();

/// Describes a generated client in spans and in the `User-Agent` header.
#[derive(Copy, Clone, Debug)]
pub struct InstrumentationClientInfo {
    /// The resource provider namespace, e.g. `Microsoft.ManagedIdentity`.
    pub service_name: &'static str,
    pub client_version: &'static str,
    /// The crate name.
    pub client_artifact: &'static str,
    /// The `api-version` query parameter sent with every request.
    pub api_version: &'static str,
}

impl InstrumentationClientInfo {
    /// The `User-Agent` sent when the request options do not set one.
    ///
    /// ARM aggregates client telemetry on the `azsdk-<language>-<package>`
    /// prefix.
    pub fn user_agent(&self) -> String {
        let package = self
            .client_artifact
            .strip_prefix("azure-rm-")
            .unwrap_or(self.client_artifact);
        format!("azsdk-rust-{package}/{}", self.client_version)
    }
}

/// Tracing is on if the builder asked for it, or if `AZURE_RM_RUST_LOGGING`
/// is `true` in any case.
pub fn tracing_enabled(config: &ClientConfig) -> bool {
    config.tracing
        || std::env::var(LOGGING_VAR).is_ok_and(|v| v.trim().eq_ignore_ascii_case("true"))
}
