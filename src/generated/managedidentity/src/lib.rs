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

//! Azure Resource Manager client library for `Microsoft.ManagedIdentity`.
//!
//! This crate contains a client for the managed identity resource provider,
//! using `api-version=2023-01-31`. The main types are:
//!
//! * [client::UserAssignedIdentities] to create, update, delete and list
//!   user-assigned identities.
//! * [client::FederatedIdentityCredentials] to manage the federated
//!   credentials of a user-assigned identity.
//!
//! # Example
//! ```no_run
//! # tokio_test::block_on(async {
//! use azure_rm_managedidentity::client::UserAssignedIdentities;
//! use azure_rm_managedidentity::ids::UserAssignedIdentityId;
//! let client = UserAssignedIdentities::builder().build().await?;
//! let id = UserAssignedIdentityId::new("my-subscription", "my-resource-group", "my-identity");
//! let identity = client.get(id).send().await?;
//! println!("{identity:?}");
//! # Result::<(), Box<dyn std::error::Error>>::Ok(()) });
//! ```

pub use gax::Result;
pub use gax::error::Error;

pub mod builder;
pub mod client;
pub mod ids;
pub mod model;

/// Validate names of `Microsoft.ManagedIdentity` resources.
pub mod validate;

/// The `api-version` implemented by this crate.
pub const API_VERSION: &str = "2023-01-31";

pub(crate) mod info {
    use gaxi::options::InstrumentationClientInfo;

    const NAME: &str = env!("CARGO_PKG_NAME");
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub(crate) static INSTRUMENTATION_CLIENT_INFO: InstrumentationClientInfo =
        InstrumentationClientInfo {
            service_name: "Microsoft.ManagedIdentity",
            client_version: VERSION,
            client_artifact: NAME,
            api_version: super::API_VERSION,
        };
}
