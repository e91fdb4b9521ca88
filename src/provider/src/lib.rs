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

//! CRUD adapters for Azure Resource Manager resources.
//!
//! Each supported resource type implements [ResourceAdapter], mapping a typed
//! configuration to the calls of a generated client. [Resource] runs the
//! lifecycle of a resource type with per-phase [timeouts], and a [Registry]
//! holds the supported resource types by name.
//!
//! # Example
//! ```no_run
//! # tokio_test::block_on(async {
//! use gax::context::CallContext;
//! use managedidentity::client::UserAssignedIdentities;
//! use serde_json::json;
//! let client = UserAssignedIdentities::builder().build().await?;
//! let registry = azure_rm_provider::registry("my-subscription", client);
//! let identities = registry
//!     .get("azurerm_user_assigned_identity")
//!     .expect("identities are always registered");
//! let id = identities
//!     .create(&CallContext::new(), json!({
//!         "name": "my-identity",
//!         "resource_group_name": "my-resource-group",
//!         "location": "westus",
//!     }))
//!     .await?;
//! println!("created {id}");
//! # Result::<(), Box<dyn std::error::Error>>::Ok(()) });
//! ```

pub use gax::Result;
pub use gax::error::Error;

pub mod adapter;
pub mod identity;
pub mod registry;
pub mod timeouts;

pub use adapter::{RequiresImport, Resource, ResourceAdapter};
pub use registry::Registry;

use managedidentity::client::UserAssignedIdentities;

/// Returns the registry with all the supported resource types.
///
/// Resources are created in `subscription_id`.
pub fn registry<S: Into<String>>(subscription_id: S, identities: UserAssignedIdentities) -> Registry {
    Registry::new().with_resource(Resource::new(identity::UserAssignedIdentity::new(
        identities,
        subscription_id,
    )))
}
