//! Typed resources.
//!
//! A [`Resource`] declares its schema as two attribute maps (what the user
//! configures and what the provider computes) and a [`Model`] type that its
//! operations decode into and encode from. [`register`] checks both once, and
//! the resulting [`RegisteredResource`] runs each operation with a
//! [`ResourceMetaData`] handle under the resource's [`Timeouts`].
//!
//! # Example
//!
//! ```ignore
//! use typed_provider_sdk::{async_trait, typed_model, Resource, ResourceMetaData, ProviderError};
//! use typed_provider_sdk::schema::{Attribute, AttributeMap};
//!
//! typed_model! {
//!     #[derive(Debug, Default)]
//!     pub struct BucketModel {
//!         #[tag("name")]
//!         pub name: String,
//!     }
//! }
//!
//! struct Bucket;
//!
//! #[async_trait]
//! impl Resource for Bucket {
//!     type Model = BucketModel;
//!
//!     fn resource_type(&self) -> &str {
//!         "example_bucket"
//!     }
//!
//!     fn arguments(&self) -> AttributeMap {
//!         AttributeMap::from([("name".to_string(), Attribute::required_string())])
//!     }
//!
//!     fn attributes(&self) -> AttributeMap {
//!         AttributeMap::new()
//!     }
//!
//!     async fn create(&self, mut metadata: ResourceMetaData<'_>) -> Result<(), ProviderError> {
//!         let mut model = BucketModel::default();
//!         metadata.decode(&mut model)?;
//!         metadata.set_id(&format!("/buckets/{}", model.name));
//!         metadata.encode(&model)
//!     }
//!
//!     // ... read and delete
//! }
//! ```

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, info, instrument};

use crate::changes;
use crate::decode;
use crate::encode;
use crate::error::ProviderError;
use crate::logging::Logger;
use crate::model::{self, Model};
use crate::schema::{combine_schema, AttributeMap, Diagnostic, Schema};
use crate::state::{MemoryState, ResourceData};

/// Rewrites persisted state from one schema version to the next.
pub type StateUpgradeFn = fn(serde_json::Value) -> Result<serde_json::Value, ProviderError>;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30 * 60);
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Per-operation time limits for a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Limit for `create`.
    pub create: Duration,
    /// Limit for `read`.
    pub read: Duration,
    /// Limit for `update`.
    pub update: Duration,
    /// Limit for `delete`.
    pub delete: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            create: DEFAULT_TIMEOUT,
            read: DEFAULT_READ_TIMEOUT,
            update: DEFAULT_TIMEOUT,
            delete: DEFAULT_TIMEOUT,
        }
    }
}

impl Timeouts {
    /// Set the `create` limit.
    pub fn with_create(mut self, limit: Duration) -> Self {
        self.create = limit;
        self
    }

    /// Set the `read` limit.
    pub fn with_read(mut self, limit: Duration) -> Self {
        self.read = limit;
        self
    }

    /// Set the `update` limit.
    pub fn with_update(mut self, limit: Duration) -> Self {
        self.update = limit;
        self
    }

    /// Set the `delete` limit.
    pub fn with_delete(mut self, limit: Duration) -> Self {
        self.delete = limit;
        self
    }

    /// Use the same limit for every operation.
    pub fn all(limit: Duration) -> Self {
        Self {
            create: limit,
            read: limit,
            update: limit,
            delete: limit,
        }
    }
}

/// The handle a resource operation works through.
pub struct ResourceMetaData<'a> {
    resource_type: String,
    state: &'a mut dyn ResourceData,
    logger: &'a dyn Logger,
}

impl<'a> ResourceMetaData<'a> {
    /// Wrap a state handle and logger for one operation.
    pub fn new(
        resource_type: impl Into<String>,
        state: &'a mut dyn ResourceData,
        logger: &'a dyn Logger,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            state,
            logger,
        }
    }

    /// The resource type name.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// The logger for this operation.
    pub fn logger(&self) -> &dyn Logger {
        self.logger
    }

    /// Populate `model` from state. See [`decode::decode`].
    pub fn decode<M: Model>(&self, model: &mut M) -> Result<Vec<Diagnostic>, ProviderError> {
        Ok(decode::decode(model, &*self.state, self.logger)?)
    }

    /// Write `model` into state. See [`encode::encode`].
    pub fn encode<M: Model>(&mut self, model: &M) -> Result<(), ProviderError> {
        Ok(encode::encode(model, &mut *self.state, self.logger)?)
    }

    /// Whether the attribute behind `field_name` changed. See [`changes::has_changes`].
    pub fn has_changes<M: Model>(&self, model: &M, field_name: &str) -> Result<bool, ProviderError> {
        Ok(changes::has_changes(model, field_name, &*self.state)?)
    }

    /// The resource ID, empty when the resource does not exist.
    pub fn id(&self) -> String {
        self.state.id()
    }

    /// Set the resource ID.
    pub fn set_id(&mut self, id: &str) {
        self.state.set_id(id);
    }

    /// Remove the resource from state after it was found to no longer exist.
    pub fn mark_as_gone(&mut self, id: &str) {
        self.logger.info(&format!(
            "{} {:?} was not found, removing from state",
            self.resource_type, id
        ));
        self.state.set_id("");
    }

    /// The error to return from `create` when the resource already exists.
    pub fn resource_requires_import(&self, id: &str) -> ProviderError {
        ProviderError::AlreadyExists(format!(
            "a {} with the ID {:?} already exists and must be imported into state to be managed",
            self.resource_type, id
        ))
    }
}

/// A resource implementation.
///
/// `arguments` are the attributes the user sets; `attributes` are computed by
/// the provider. Both are merged into one schema by [`register`].
#[async_trait]
pub trait Resource: Send + Sync + 'static {
    /// The model operations decode into and encode from.
    type Model: Model + Send;

    /// The resource type name, e.g. `example_network`.
    fn resource_type(&self) -> &str;

    /// User-settable attributes.
    fn arguments(&self) -> AttributeMap;

    /// Provider-computed attributes.
    fn attributes(&self) -> AttributeMap;

    /// Per-operation time limits.
    fn timeouts(&self) -> Timeouts {
        Timeouts::default()
    }

    /// The current schema version. Bump it when persisted state changes shape.
    fn schema_version(&self) -> u64 {
        0
    }

    /// Upgraders keyed by the version they upgrade *from*.
    ///
    /// Every version below [`schema_version`](Resource::schema_version) needs
    /// an entry; [`register`] rejects gaps.
    fn state_upgraders(&self) -> BTreeMap<u64, StateUpgradeFn> {
        BTreeMap::new()
    }

    /// Create the resource and record its ID.
    async fn create(&self, metadata: ResourceMetaData<'_>) -> Result<(), ProviderError>;

    /// Refresh state from the real resource, or mark it as gone.
    async fn read(&self, metadata: ResourceMetaData<'_>) -> Result<(), ProviderError>;

    /// Update the resource in place.
    async fn update(&self, _metadata: ResourceMetaData<'_>) -> Result<(), ProviderError> {
        Err(ProviderError::Unimplemented(format!(
            "{} does not support in-place updates",
            self.resource_type()
        )))
    }

    /// Delete the resource.
    async fn delete(&self, metadata: ResourceMetaData<'_>) -> Result<(), ProviderError>;
}

/// A resource whose schema and model have been checked.
pub struct RegisteredResource<R: Resource> {
    resource: R,
    schema: Schema,
    timeouts: Timeouts,
    upgraders: BTreeMap<u64, StateUpgradeFn>,
}

/// Check a resource's schema and model, and wrap it for use.
///
/// # Errors
///
/// Returns [`ProviderError::Schema`] if the arguments and attributes cannot be
/// combined, [`ProviderError::Model`] if any model field lacks a tag, or
/// [`ProviderError::Sdk`] if a state upgrader is missing for an older version.
pub fn register<R: Resource>(resource: R) -> Result<RegisteredResource<R>, ProviderError> {
    let attributes = combine_schema(resource.arguments(), resource.attributes())?;
    model::validate::<R::Model>()?;

    let version = resource.schema_version();
    let upgraders = resource.state_upgraders();
    if let Some(missing) = (0..version).find(|v| !upgraders.contains_key(v)) {
        return Err(ProviderError::Sdk(format!(
            "{} is at schema version {} but has no state upgrader from version {}",
            resource.resource_type(),
            version,
            missing
        )));
    }

    let schema = Schema {
        version,
        attributes,
    };
    let timeouts = resource.timeouts();
    info!(
        resource_type = resource.resource_type(),
        version,
        attributes = schema.attributes.len(),
        "Registered resource"
    );

    Ok(RegisteredResource {
        resource,
        schema,
        timeouts,
        upgraders,
    })
}

impl<R: Resource> RegisteredResource<R> {
    /// The resource type name.
    pub fn resource_type(&self) -> &str {
        self.resource.resource_type()
    }

    /// The combined schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The wrapped resource.
    pub fn resource(&self) -> &R {
        &self.resource
    }

    /// The time limits operations run under.
    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// An empty state store bound to this resource's schema.
    pub fn new_state(&self) -> MemoryState {
        MemoryState::new().with_schema(self.schema.clone())
    }

    /// Load state persisted at schema `version`, upgrading it to the current
    /// version first.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Sdk`] if `version` is newer than the current
    /// schema, the upgrader's error if one fails, or [`ProviderError::State`]
    /// if the upgraded state cannot be loaded.
    #[instrument(skip_all, name = "resource.upgrade_state", fields(resource_type = %self.resource_type()))]
    pub fn upgrade_state(
        &self,
        version: u64,
        state: serde_json::Value,
    ) -> Result<MemoryState, ProviderError> {
        let current = self.schema.version;
        if version > current {
            return Err(ProviderError::Sdk(format!(
                "state for {} is at schema version {}, newer than the supported version {}",
                self.resource_type(),
                version,
                current
            )));
        }

        let mut state = state;
        for from in version..current {
            let upgrade = self.upgraders.get(&from).ok_or_else(|| {
                ProviderError::Sdk(format!("no state upgrader from version {}", from))
            })?;
            debug!(from, to = from + 1, "Upgrading state");
            state = upgrade(state)?;
        }

        Ok(MemoryState::from_json(state)?.with_schema(self.schema.clone()))
    }

    /// Run `create`.
    #[instrument(skip_all, name = "resource.create", fields(resource_type = %self.resource_type()))]
    pub async fn create(
        &self,
        state: &mut dyn ResourceData,
        logger: &dyn Logger,
    ) -> Result<(), ProviderError> {
        let metadata = ResourceMetaData::new(self.resource.resource_type(), state, logger);
        self.run("create", self.timeouts.create, self.resource.create(metadata))
            .await
    }

    /// Run `read`.
    #[instrument(skip_all, name = "resource.read", fields(resource_type = %self.resource_type()))]
    pub async fn read(
        &self,
        state: &mut dyn ResourceData,
        logger: &dyn Logger,
    ) -> Result<(), ProviderError> {
        let metadata = ResourceMetaData::new(self.resource.resource_type(), state, logger);
        self.run("read", self.timeouts.read, self.resource.read(metadata))
            .await
    }

    /// Run `update`.
    #[instrument(skip_all, name = "resource.update", fields(resource_type = %self.resource_type()))]
    pub async fn update(
        &self,
        state: &mut dyn ResourceData,
        logger: &dyn Logger,
    ) -> Result<(), ProviderError> {
        let metadata = ResourceMetaData::new(self.resource.resource_type(), state, logger);
        self.run("update", self.timeouts.update, self.resource.update(metadata))
            .await
    }

    /// Run `delete`.
    #[instrument(skip_all, name = "resource.delete", fields(resource_type = %self.resource_type()))]
    pub async fn delete(
        &self,
        state: &mut dyn ResourceData,
        logger: &dyn Logger,
    ) -> Result<(), ProviderError> {
        let metadata = ResourceMetaData::new(self.resource.resource_type(), state, logger);
        self.run("delete", self.timeouts.delete, self.resource.delete(metadata))
            .await
    }

    async fn run<F>(
        &self,
        operation: &'static str,
        limit: Duration,
        future: F,
    ) -> Result<(), ProviderError>
    where
        F: Future<Output = Result<(), ProviderError>>,
    {
        debug!(operation, timeout = ?limit, "Operation called");

        match tokio::time::timeout(limit, future).await {
            Ok(Ok(())) => {
                info!(operation, "Operation completed successfully");
                Ok(())
            },
            Ok(Err(e)) => {
                error!(operation, error = %e, "Operation failed");
                Err(e)
            },
            Err(_) => {
                error!(operation, timeout = ?limit, "Operation timed out");
                Err(ProviderError::DeadlineExceeded(format!(
                    "{} of {} did not complete within {:?}",
                    operation,
                    self.resource.resource_type(),
                    limit
                )))
            },
        }
    }
}
