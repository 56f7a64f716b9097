// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host field reconciliation.

use super::ReconcileError;
use crate::config::{EmptyAddressPolicy, ReconcileConfig};
use cube_core::{AdapterRecord, PropertyOverride, RuntimeContext};

/// Override for the host field, if one is due.
///
/// An unset field is remapped only on OS families where Docker runs in a
/// VM. The sentinel is always replaced. Any other explicit value is kept.
pub(super) fn plan(
    record: &AdapterRecord,
    field: &str,
    runtime: &dyn RuntimeContext,
    config: &ReconcileConfig,
) -> Result<Option<PropertyOverride>, ReconcileError> {
    let os_family = runtime.current_os_family();
    let due = match record.properties.get(field) {
        None => config.requires_remap(os_family),
        Some(value) => config.is_sentinel(value),
    };
    if !due {
        tracing::debug!(
            container = %record.name,
            field,
            current = ?record.current_value(field),
            %os_family,
            "host field kept"
        );
        return Ok(None);
    }

    let address = runtime.docker_server_address();
    if address.is_empty() {
        match config.empty_address {
            EmptyAddressPolicy::Write => {
                tracing::warn!(container = %record.name, field, "docker server address is empty");
            }
            EmptyAddressPolicy::Skip => {
                tracing::warn!(
                    container = %record.name,
                    field,
                    "docker server address is empty, leaving host field"
                );
                return Ok(None);
            }
            EmptyAddressPolicy::Reject => {
                return Err(ReconcileError::UnresolvedDockerAddress {
                    container: record.name.clone(),
                    field: field.to_string(),
                });
            }
        }
    }
    Ok(Some(PropertyOverride::new(field, address)))
}
