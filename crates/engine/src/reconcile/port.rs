// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Port field reconciliation.

use crate::config::{PortMatch, ReconcileConfig};
use cube_core::{AdapterRecord, ConfigField, CubeDescriptor, PortBinding, PropertyOverride};

/// Overrides for every unset field whose default is an exposed, bound
/// container port. The host field is never considered.
pub(super) fn plan(
    descriptor: &CubeDescriptor,
    record: &AdapterRecord,
    host_field: Option<&str>,
    config: &ReconcileConfig,
) -> Vec<PropertyOverride> {
    record
        .shape
        .fields()
        .iter()
        .filter(|f| Some(f.name.as_str()) != host_field)
        .filter_map(|f| plan_field(descriptor, record, f, config))
        .collect()
}

fn plan_field(
    descriptor: &CubeDescriptor,
    record: &AdapterRecord,
    field: &ConfigField,
    config: &ReconcileConfig,
) -> Option<PropertyOverride> {
    let container_port = u16::try_from(field.default.as_int()?).ok()?;
    let binding = find_binding(descriptor, container_port, config.port_match)?;

    if let Some(existing) = record.properties.get(&field.name) {
        tracing::debug!(
            container = %record.name,
            field = %field.name,
            existing,
            host_port = binding.host_port,
            "port field set explicitly, keeping"
        );
        return None;
    }
    Some(PropertyOverride::new(field.name.as_str(), binding.host_port.to_string()))
}

fn find_binding(
    descriptor: &CubeDescriptor,
    container_port: u16,
    port_match: PortMatch,
) -> Option<&PortBinding> {
    match port_match {
        PortMatch::FirstBinding => {
            descriptor.exposes(container_port)?;
            descriptor.binding_for(container_port)
        }
        PortMatch::SameProtocol => descriptor
            .exposed_ports
            .iter()
            .filter(|p| p.container_port == container_port)
            .find_map(|p| descriptor.binding_for_protocol(container_port, p.protocol)),
    }
}
