// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciliation policy.
//!
//! Every field has a default, so an empty file (or no file) yields the
//! standard behavior:
//!
//! ```toml
//! docker_server_sentinel = "dockerServerIp"
//! host_field_names = ["host", "myhost"]
//! remap_os_families = ["mac", "windows"]
//! port_match = "first_binding"
//! empty_address = "write"
//! ```

use cube_core::{ConfigField, ConfigurationShape, FieldKind, OsFamily};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Property value meaning "use the Docker server address here".
pub const DOCKER_SERVER_IP: &str = "dockerServerIp";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid reconcile config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// How a port field's container port is matched to a binding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortMatch {
    /// First binding for the container port in declaration order, whatever
    /// its protocol.
    #[default]
    FirstBinding,
    /// Exposed protocols for the container port are tried in declaration
    /// order; the first with a binding of the same protocol wins.
    SameProtocol,
}

/// What to do when the host field is due an override but the Docker server
/// address is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyAddressPolicy {
    /// Write the empty value.
    #[default]
    Write,
    /// Leave the field as it is.
    Skip,
    /// Fail reconciliation, blocking container startup.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    pub docker_server_sentinel: String,
    /// Host field names, matched case-insensitively in order.
    pub host_field_names: Vec<String>,
    /// Host OS families where Docker runs in a VM and containers are not
    /// reachable at their configured address.
    pub remap_os_families: Vec<OsFamily>,
    pub port_match: PortMatch,
    pub empty_address: EmptyAddressPolicy,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            docker_server_sentinel: DOCKER_SERVER_IP.to_string(),
            host_field_names: vec!["host".to_string(), "myhost".to_string()],
            remap_os_families: vec![OsFamily::Mac, OsFamily::Windows],
            port_match: PortMatch::default(),
            empty_address: EmptyAddressPolicy::default(),
        }
    }
}

impl ReconcileConfig {
    cube_core::setters! {
        into { docker_server_sentinel: String }
        set {
            host_field_names: Vec<String>,
            remap_os_families: Vec<OsFamily>,
            port_match: PortMatch,
            empty_address: EmptyAddressPolicy,
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&content)
    }

    pub fn requires_remap(&self, os_family: OsFamily) -> bool {
        self.remap_os_families.contains(&os_family)
    }

    pub fn is_sentinel(&self, value: &str) -> bool {
        value == self.docker_server_sentinel
    }

    /// The string field holding the address the adapter connects to.
    ///
    /// Only names listed in `host_field_names` qualify, tried in order.
    /// Other fields that merely mention a host (`proxyHost`) are left alone.
    pub fn host_field<'s>(&self, shape: &'s ConfigurationShape) -> Option<&'s ConfigField> {
        self.host_field_names.iter().find_map(|name| {
            shape
                .fields()
                .iter()
                .find(|f| f.kind() == FieldKind::Str && f.name.eq_ignore_ascii_case(name))
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
