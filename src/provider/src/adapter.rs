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

//! The CRUD lifecycle of a managed resource.
//!
//! A [ResourceAdapter] maps a typed configuration to the requests of one
//! resource type. The [Resource] wrapper runs each adapter operation under a
//! [CallContext] bounded by the phase [Timeouts], refuses to adopt existing
//! resources on create, treats missing resources as gone on read, and
//! attaches the operation name and resource ID to every error.

use crate::timeouts::{Phase, Timeouts};
use crate::{Error, Result};
use gax::context::CallContext;
use resourceids::ResourceId;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;

/// Maps the typed configuration of a resource type to its API calls.
///
/// Implementations are stateless beyond their clients. The lifecycle calls
/// for a single resource are strictly sequential, calls for different
/// resources may run concurrently.
pub trait ResourceAdapter: Send + Sync + std::fmt::Debug {
    /// The typed configuration, with any computed attributes.
    type Config: Serialize + DeserializeOwned + Send + Sync;
    /// The resource ID type.
    type Id: ResourceId + Clone + Send + Sync;

    /// The registry name, e.g. `azurerm_user_assigned_identity`.
    const TYPE_NAME: &'static str;

    /// Returns the ID of the resource described by `config`.
    fn id(&self, config: &Self::Config) -> Result<Self::Id>;

    /// Validates user-supplied configuration, reporting all the problems.
    fn validate(&self, _config: &Self::Config) -> Result<()> {
        Ok(())
    }

    /// Validates and parses a resource ID from state or an import.
    ///
    /// The ID must use the canonical casing.
    fn validate_id(&self, id: &str) -> Result<Self::Id> {
        Self::Id::parse(id).map_err(Error::binding)
    }

    /// Creates the resource and waits until it is ready.
    fn create(
        &self,
        ctx: &CallContext,
        id: &Self::Id,
        config: &Self::Config,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Fetches the current configuration of the resource.
    ///
    /// Returns an error where [is_not_found][Error::is_not_found] is true if
    /// the resource no longer exists.
    fn read(
        &self,
        ctx: &CallContext,
        id: &Self::Id,
    ) -> impl Future<Output = Result<Self::Config>> + Send;

    /// Updates the resource in place.
    fn update(
        &self,
        ctx: &CallContext,
        id: &Self::Id,
        config: &Self::Config,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Deletes the resource and waits until it is gone.
    fn delete(&self, ctx: &CallContext, id: &Self::Id) -> impl Future<Output = Result<()>> + Send;
}

/// Runs the lifecycle of one resource type.
#[derive(Clone, Debug)]
pub struct Resource<A> {
    adapter: A,
    timeouts: Timeouts,
}

impl<A> Resource<A>
where
    A: ResourceAdapter,
{
    /// Creates a resource with the default [Timeouts].
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            timeouts: Timeouts::default(),
        }
    }

    /// Replaces the phase timeouts.
    pub fn with_timeouts(mut self, v: Timeouts) -> Self {
        self.timeouts = v;
        self
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }

    /// Validates the ID of an existing resource before it is imported.
    pub fn import(&self, id: &str) -> Result<A::Id> {
        self.adapter
            .validate_id(id)
            .map_err(|e| e.with_context("import", id))
    }

    /// Creates the resource, returning its ID.
    ///
    /// Fails with a [RequiresImport] error if the resource already exists.
    pub async fn create(&self, parent: &CallContext, config: &A::Config) -> Result<A::Id> {
        let phase = Phase::Create;
        let id = self
            .adapter
            .id(config)
            .map_err(|e| e.with_context(phase.as_str(), A::TYPE_NAME))?;
        let name = id.id();
        self.adapter
            .validate(config)
            .map_err(|e| e.with_context(phase.as_str(), &name))?;

        let ctx = self.timeouts.context(parent, phase);
        match self.adapter.read(&ctx, &id).await {
            Ok(_) => {
                let e = RequiresImport::new(A::TYPE_NAME, &name);
                return Err(Error::binding(e).with_context(phase.as_str(), name));
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.with_context(phase.as_str(), name)),
        }

        tracing::debug!(resource_type = A::TYPE_NAME, id = %name, "creating resource");
        self.adapter
            .create(&ctx, &id, config)
            .await
            .map_err(|e| e.with_context(phase.as_str(), &name))?;
        Ok(id)
    }

    /// Reads the resource.
    ///
    /// Returns `None` if the resource no longer exists, the caller should
    /// remove it from its state.
    pub async fn read(&self, parent: &CallContext, id: &str) -> Result<Option<A::Config>> {
        let phase = Phase::Read;
        let id = self
            .adapter
            .validate_id(id)
            .map_err(|e| e.with_context(phase.as_str(), id))?;
        let ctx = self.timeouts.context(parent, phase);
        match self.adapter.read(&ctx, &id).await {
            Ok(config) => Ok(Some(config)),
            Err(e) if e.is_not_found() => {
                tracing::warn!(
                    resource_type = A::TYPE_NAME,
                    id = %id,
                    "not found, removing from state"
                );
                Ok(None)
            }
            Err(e) => Err(e.with_context(phase.as_str(), id.id())),
        }
    }

    /// Updates the resource in place.
    pub async fn update(&self, parent: &CallContext, id: &str, config: &A::Config) -> Result<()> {
        let phase = Phase::Update;
        let id = self
            .adapter
            .validate_id(id)
            .map_err(|e| e.with_context(phase.as_str(), id))?;
        let name = id.id();
        self.adapter
            .validate(config)
            .map_err(|e| e.with_context(phase.as_str(), &name))?;
        let ctx = self.timeouts.context(parent, phase);
        tracing::debug!(resource_type = A::TYPE_NAME, id = %name, "updating resource");
        self.adapter
            .update(&ctx, &id, config)
            .await
            .map_err(|e| e.with_context(phase.as_str(), name))
    }

    /// Deletes the resource.
    pub async fn delete(&self, parent: &CallContext, id: &str) -> Result<()> {
        let phase = Phase::Delete;
        let id = self
            .adapter
            .validate_id(id)
            .map_err(|e| e.with_context(phase.as_str(), id))?;
        let ctx = self.timeouts.context(parent, phase);
        tracing::debug!(resource_type = A::TYPE_NAME, id = %id, "deleting resource");
        self.adapter
            .delete(&ctx, &id)
            .await
            .map_err(|e| e.with_context(phase.as_str(), id.id()))
    }
}

/// Create found an existing resource that is not managed yet.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
#[error(
    "a resource with the ID {id:?} already exists, to be managed it needs to be imported. See the documentation for {resource_type:?}"
)]
#[non_exhaustive]
pub struct RequiresImport {
    pub resource_type: String,
    pub id: String,
}

impl RequiresImport {
    pub(crate) fn new<T: Into<String>, I: Into<String>>(resource_type: T, id: I) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use bytes::Bytes;
    use http::HeaderMap;
    use resourceids::{ResourceGroupId, example_id};
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    pub(crate) fn not_found() -> Error {
        Error::service_with_http_metadata(
            404,
            HeaderMap::new(),
            Bytes::from_static(br#"{"error":{"code":"ResourceGroupNotFound","message":"gone"}}"#),
        )
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub(crate) struct GroupConfig {
        pub name: String,
        #[serde(default)]
        pub location: String,
    }

    /// A resource group adapter backed by an in-memory map.
    #[derive(Clone, Debug, Default)]
    pub(crate) struct FakeAdapter {
        pub groups: Arc<Mutex<BTreeMap<String, GroupConfig>>>,
        pub calls: Arc<Mutex<Vec<String>>>,
        pub delay: Option<Duration>,
    }

    impl FakeAdapter {
        fn record(&self, call: &str, id: &ResourceGroupId) {
            self.calls.lock().unwrap().push(format!("{call} {id}"));
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ResourceAdapter for FakeAdapter {
        type Config = GroupConfig;
        type Id = ResourceGroupId;
        const TYPE_NAME: &'static str = "azurerm_resource_group";

        fn id(&self, config: &Self::Config) -> Result<Self::Id> {
            Ok(ResourceGroupId::new("abc", &config.name))
        }

        fn validate(&self, config: &Self::Config) -> Result<()> {
            resourceids::validate::resource_group_name("name", &config.name)?;
            Ok(())
        }

        async fn create(&self, ctx: &CallContext, id: &Self::Id, config: &Self::Config) -> Result<()> {
            self.record("create", id);
            if let Some(d) = self.delay {
                ctx.sleep(d).await?;
            }
            self.groups
                .lock()
                .unwrap()
                .insert(id.id(), config.clone());
            Ok(())
        }

        async fn read(&self, ctx: &CallContext, id: &Self::Id) -> Result<Self::Config> {
            ctx.check()?;
            self.record("read", id);
            self.groups
                .lock()
                .unwrap()
                .get(&id.id())
                .cloned()
                .ok_or_else(not_found)
        }

        async fn update(&self, _ctx: &CallContext, id: &Self::Id, config: &Self::Config) -> Result<()> {
            self.record("update", id);
            let mut groups = self.groups.lock().unwrap();
            let current = groups.get_mut(&id.id()).ok_or_else(not_found)?;
            *current = config.clone();
            Ok(())
        }

        async fn delete(&self, _ctx: &CallContext, id: &Self::Id) -> Result<()> {
            self.record("delete", id);
            self.groups
                .lock()
                .unwrap()
                .remove(&id.id())
                .map(|_| ())
                .ok_or_else(not_found)
        }
    }

    fn config(name: &str) -> GroupConfig {
        GroupConfig {
            name: name.to_string(),
            location: "westus".to_string(),
        }
    }

    #[tokio::test]
    async fn lifecycle() -> anyhow::Result<()> {
        let adapter = FakeAdapter::default();
        let resource = Resource::new(adapter.clone());
        let ctx = CallContext::new();

        let id = resource.create(&ctx, &config("rg1")).await?;
        assert_eq!(id.to_string(), "/subscriptions/abc/resourceGroups/rg1");

        let got = resource.read(&ctx, &id.to_string()).await?;
        assert_eq!(got, Some(config("rg1")));

        let mut changed = config("rg1");
        changed.location = "eastus".to_string();
        resource.update(&ctx, &id.to_string(), &changed).await?;
        let got = resource.read(&ctx, &id.to_string()).await?;
        assert_eq!(got, Some(changed));

        resource.delete(&ctx, &id.to_string()).await?;
        let got = resource.read(&ctx, &id.to_string()).await?;
        assert_eq!(got, None);

        let path = "/subscriptions/abc/resourceGroups/rg1";
        let want = ["read", "create", "read", "update", "read", "delete", "read"]
            .map(|c| format!("{c} {path}"));
        assert_eq!(adapter.calls(), want);
        Ok(())
    }

    #[tokio::test]
    async fn create_requires_import() -> anyhow::Result<()> {
        let adapter = FakeAdapter::default();
        adapter
            .groups
            .lock()
            .unwrap()
            .insert("/subscriptions/abc/resourceGroups/rg1".to_string(), config("rg1"));
        let resource = Resource::new(adapter.clone());

        let err = resource
            .create(&CallContext::new(), &config("rg1"))
            .await
            .unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        let context = err.context().expect("create attaches a context");
        assert_eq!(context.operation, "create");
        assert_eq!(context.resource_id, "/subscriptions/abc/resourceGroups/rg1");
        let source = std::error::Error::source(&err)
            .and_then(|e| e.downcast_ref::<RequiresImport>())
            .expect("the source is a RequiresImport error");
        assert_eq!(source.resource_type, "azurerm_resource_group");
        assert!(err.to_string().contains("imported"), "{err}");
        assert!(!adapter.calls().iter().any(|c| c.starts_with("create")));
        Ok(())
    }

    #[tokio::test]
    async fn create_validates_config() -> anyhow::Result<()> {
        let adapter = FakeAdapter::default();
        let resource = Resource::new(adapter.clone());
        let err = resource
            .create(&CallContext::new(), &config("bad/name."))
            .await
            .unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        assert!(adapter.calls().is_empty(), "{:?}", adapter.calls());
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn create_timeout() -> anyhow::Result<()> {
        let adapter = FakeAdapter {
            delay: Some(Duration::from_secs(3600)),
            ..Default::default()
        };
        let resource = Resource::new(adapter.clone())
            .with_timeouts(Timeouts::default().set_create(Duration::from_secs(60)));
        let start = tokio::time::Instant::now();
        let err = resource
            .create(&CallContext::new(), &config("rg1"))
            .await
            .unwrap_err();
        assert!(err.is_timeout(), "{err:?}");
        assert_eq!(start.elapsed(), Duration::from_secs(60));
        assert_eq!(err.context().map(|c| c.operation.as_str()), Some("create"));
        Ok(())
    }

    #[tokio::test]
    async fn cancelled() -> anyhow::Result<()> {
        let adapter = FakeAdapter::default();
        let resource = Resource::new(adapter.clone());
        let ctx = CallContext::new();
        ctx.cancel();
        let err = resource
            .read(&ctx, "/subscriptions/abc/resourceGroups/rg1")
            .await
            .unwrap_err();
        assert!(err.is_cancelled(), "{err:?}");
        assert!(adapter.calls().is_empty(), "{:?}", adapter.calls());
        Ok(())
    }

    #[tokio::test]
    async fn invalid_ids() -> anyhow::Result<()> {
        let adapter = FakeAdapter::default();
        let resource = Resource::new(adapter.clone());
        let ctx = CallContext::new();
        let input = "/subscriptions/abc/resourcegroups/rg1";
        let err = resource.read(&ctx, input).await.unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        assert_eq!(err.context().map(|c| c.resource_id.as_str()), Some(input));

        let err = resource.delete(&ctx, "").await.unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        let err = resource
            .update(&ctx, &example_id(ResourceGroupId::segments()), &config("rg1"))
            .await
            .unwrap_err();
        assert!(err.is_not_found(), "{err:?}");
        assert!(adapter.calls().iter().all(|c| c.starts_with("update")));

        let err = resource.import(input).unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        assert_eq!(err.context().map(|c| c.operation.as_str()), Some("import"));
        let id = resource.import("/subscriptions/abc/resourceGroups/rg1")?;
        assert_eq!(id, ResourceGroupId::new("abc", "rg1"));
        Ok(())
    }
}
