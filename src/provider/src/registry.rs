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

//! An explicit registry of the supported resource types.
//!
//! The registry is built once, when the provider starts, and passed by
//! reference to the code driving the resource lifecycles. Entries are
//! type-erased via [dynamic::DynResource], which exchanges configuration as
//! JSON values.

use crate::Result;
use crate::adapter::{Resource, ResourceAdapter};
use std::collections::BTreeMap;
use std::sync::Arc;

pub mod dynamic {
    use super::*;
    use crate::Error;
    use crate::timeouts::Phase;
    use gax::context::CallContext;
    use serde_json::Value;

    /// A dyn-compatible version of [Resource].
    #[async_trait::async_trait]
    pub trait DynResource: Send + Sync + std::fmt::Debug {
        /// The registry name of the resource type.
        fn type_name(&self) -> &'static str;

        /// Validates and normalizes a resource ID, e.g. during import.
        fn validate_id(&self, id: &str) -> Result<String>;

        /// Creates the resource, returning its canonical ID.
        async fn create(&self, ctx: &CallContext, config: Value) -> Result<String>;

        /// Reads the resource, `None` means it no longer exists.
        async fn read(&self, ctx: &CallContext, id: &str) -> Result<Option<Value>>;

        async fn update(&self, ctx: &CallContext, id: &str, config: Value) -> Result<()>;

        async fn delete(&self, ctx: &CallContext, id: &str) -> Result<()>;
    }

    fn expand<A: ResourceAdapter>(phase: Phase, config: Value) -> Result<A::Config> {
        serde_json::from_value(config)
            .map_err(|e| Error::binding(e).with_context(phase.as_str(), A::TYPE_NAME))
    }

    #[async_trait::async_trait]
    impl<A> DynResource for Resource<A>
    where
        A: ResourceAdapter + 'static,
    {
        fn type_name(&self) -> &'static str {
            A::TYPE_NAME
        }

        fn validate_id(&self, id: &str) -> Result<String> {
            let id = Resource::import(self, id)?;
            Ok(id.to_string())
        }

        async fn create(&self, ctx: &CallContext, config: Value) -> Result<String> {
            let config = expand::<A>(Phase::Create, config)?;
            let id = Resource::create(self, ctx, &config).await?;
            Ok(id.to_string())
        }

        async fn read(&self, ctx: &CallContext, id: &str) -> Result<Option<Value>> {
            let Some(config) = Resource::read(self, ctx, id).await? else {
                return Ok(None);
            };
            let value = serde_json::to_value(config)
                .map_err(|e| Error::ser(e).with_context(Phase::Read.as_str(), id))?;
            Ok(Some(value))
        }

        async fn update(&self, ctx: &CallContext, id: &str, config: Value) -> Result<()> {
            let config = expand::<A>(Phase::Update, config)?;
            Resource::update(self, ctx, id, &config).await
        }

        async fn delete(&self, ctx: &CallContext, id: &str) -> Result<()> {
            Resource::delete(self, ctx, id).await
        }
    }
}

/// The resource types supported by a provider, keyed by type name.
///
/// # Example
/// ```
/// # use azure_rm_provider::registry::Registry;
/// let registry = Registry::new();
/// assert!(registry.get("azurerm_user_assigned_identity").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Registry {
    resources: BTreeMap<&'static str, Arc<dyn dynamic::DynResource>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource type, replacing any previous entry with the same name.
    pub fn with_resource<A>(mut self, resource: Resource<A>) -> Self
    where
        A: ResourceAdapter + 'static,
    {
        self.resources.insert(A::TYPE_NAME, Arc::new(resource));
        self
    }

    /// Returns the resource type registered as `type_name`.
    pub fn get(&self, type_name: &str) -> Option<&dyn dynamic::DynResource> {
        self.resources.get(type_name).map(|r| r.as_ref())
    }

    /// The registered type names, in lexicographic order.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::tests::FakeAdapter;
    use gax::context::CallContext;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn empty() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.type_names().count(), 0);
    }

    #[test]
    fn lookup() {
        let registry = Registry::new().with_resource(Resource::new(FakeAdapter::default()));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.type_names().collect::<Vec<_>>(),
            vec!["azurerm_resource_group"]
        );
        let got = registry.get("azurerm_resource_group").map(|r| r.type_name());
        assert_eq!(got, Some("azurerm_resource_group"));
        assert!(registry.get("azurerm_storage_account").is_none());
    }

    #[tokio::test]
    async fn dynamic_lifecycle() -> anyhow::Result<()> {
        let registry = Registry::new().with_resource(Resource::new(FakeAdapter::default()));
        let resource = registry
            .get("azurerm_resource_group")
            .expect("the resource group is registered");
        let ctx = CallContext::new();

        let config = json!({"name": "rg1", "location": "westus"});
        let id = resource.create(&ctx, config.clone()).await?;
        assert_eq!(id, "/subscriptions/abc/resourceGroups/rg1");
        assert_eq!(resource.validate_id(&id)?, id);

        let got = resource.read(&ctx, &id).await?;
        assert_eq!(got, Some(config));

        resource
            .update(&ctx, &id, json!({"name": "rg1", "location": "eastus"}))
            .await?;
        let got = resource.read(&ctx, &id).await?;
        assert_eq!(got, Some(json!({"name": "rg1", "location": "eastus"})));

        resource.delete(&ctx, &id).await?;
        assert_eq!(resource.read(&ctx, &id).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn dynamic_bad_config() -> anyhow::Result<()> {
        let registry = Registry::new().with_resource(Resource::new(FakeAdapter::default()));
        let resource = registry
            .get("azurerm_resource_group")
            .expect("the resource group is registered");
        let err = resource
            .create(&CallContext::new(), json!({"location": "westus"}))
            .await
            .unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        assert_eq!(
            err.context().map(|c| c.resource_id.as_str()),
            Some("azurerm_resource_group")
        );

        let bad_id = "/subscriptions/abc/resourceGroups/rg1/extra";
        let err = resource.validate_id(bad_id).unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        let context = err.context().expect("import attaches a context");
        assert_eq!(context.operation, "import");
        assert_eq!(context.resource_id, bad_id);
        assert!(err.to_string().starts_with("import /subscriptions/"), "{err}");
        Ok(())
    }
}
