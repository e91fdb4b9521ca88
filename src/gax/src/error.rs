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

mod core_error;
pub use core_error::*;
mod credentials;
pub use credentials::CredentialsError;

/// Error payloads returned by Azure Resource Manager.
///
/// ARM services report failures using a common JSON envelope:
///
/// ```json
/// { "error": { "code": "ResourceNotFound", "message": "...", "details": [] } }
/// ```
///
/// The client libraries parse this envelope when present, and expose it via
/// [Error::cloud_error]. The raw payload is always available via
/// [Error::http_payload], even when it does not match the envelope.
///
/// # Examples
///
/// ```
/// # use azure_rm_gax::error;
/// use error::Error;
/// fn handle_error(e: Error) {
///     if let Some(cloud) = e.cloud_error() {
///         println!("the service reported {} {}", cloud.code, cloud.message);
///     }
/// }
/// ```
pub mod cloud;
