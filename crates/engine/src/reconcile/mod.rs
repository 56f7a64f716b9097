// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration reconciliation.
//!
//! Before an adapter starts its container, fields whose intended value
//! comes from the container runtime are overridden: the host field is
//! pointed at the Docker server, and port fields defaulting to an exposed
//! container port are pointed at the published host port. Fields the user
//! set explicitly are never touched, except for the docker-server
//! sentinel on the host field.

mod host;
mod port;

use crate::config::ReconcileConfig;
use cube_core::{
    AdapterRegistry, CubeDescriptor, DescriptorStore, PropertyOverride, RuntimeContext,
    SharedAdapter,
};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("docker server address is unresolved; cannot set '{field}' for container '{container}'")]
    UnresolvedDockerAddress { container: String, field: String },
}

/// Why a container was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoAdapter,
    NoDescriptor,
}

cube_core::simple_display! {
    SkipReason {
        NoAdapter => "no adapter registered",
        NoDescriptor => "no cube descriptor",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The container is not managed as a cube.
    Skipped(SkipReason),
    /// Overrides written to the adapter's properties, possibly none.
    Applied(Vec<PropertyOverride>),
}

impl Outcome {
    pub fn overrides(&self) -> &[PropertyOverride] {
        match self {
            Outcome::Skipped(_) => &[],
            Outcome::Applied(overrides) => overrides,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }
}

/// Computes and applies runtime overrides for one test run.
pub struct Reconciler<'a> {
    descriptors: &'a DescriptorStore,
    adapters: &'a AdapterRegistry,
    runtime: &'a dyn RuntimeContext,
    config: ReconcileConfig,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        descriptors: &'a DescriptorStore,
        adapters: &'a AdapterRegistry,
        runtime: &'a dyn RuntimeContext,
        config: ReconcileConfig,
    ) -> Self {
        Self { descriptors, adapters, runtime, config }
    }

    /// Reconcile the adapter registered as `name` with its cube.
    ///
    /// The adapter record stays locked from planning through apply, so the
    /// adapter never observes a partially applied batch.
    pub fn reconcile(&self, name: &str) -> Result<Outcome, ReconcileError> {
        let (descriptor, adapter) = match self.lookup(name) {
            Ok(found) => found,
            Err(reason) => {
                tracing::debug!(container = name, %reason, "skipping reconciliation");
                return Ok(Outcome::Skipped(reason));
            }
        };

        let mut record = adapter.lock();
        let host_field = self.config.host_field(&record.shape).map(|f| f.name.clone());

        let mut overrides = Vec::new();
        if let Some(field) = &host_field {
            if let Some(o) = host::plan(&record, field, self.runtime, &self.config)? {
                overrides.push(o);
            }
        }
        overrides.extend(port::plan(descriptor, &record, host_field.as_deref(), &self.config));

        for o in &overrides {
            tracing::info!(container = name, field = %o.field, value = %o.value, "overriding property");
            record.properties.override_property(o.field.clone(), o.value.clone());
        }
        Ok(Outcome::Applied(overrides))
    }

    fn lookup(&self, name: &str) -> Result<(&'a CubeDescriptor, SharedAdapter), SkipReason> {
        let adapter = self.adapters.lookup_adapter(name).ok_or(SkipReason::NoAdapter)?;
        let descriptor = self.descriptors.lookup_descriptor(name).ok_or(SkipReason::NoDescriptor)?;
        Ok((descriptor, adapter))
    }
}

#[cfg(test)]
#[path = "../reconcile_tests/mod.rs"]
mod tests;
