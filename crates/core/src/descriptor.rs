// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cube descriptors: the declarative definition of a test container.
//!
//! Descriptors arrive as an already-parsed mapping. Ports use the short
//! text forms found in cube files:
//!
//! ```yaml
//! image: tutum/tomcat:7.0
//! exposedPorts: [8089/tcp]
//! portBindings: [8090->8089/tcp]
//! ```

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while loading a cube descriptor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("invalid port '{0}'")]
    InvalidPort(String),

    #[error("unknown protocol '{0}'")]
    UnknownProtocol(String),

    #[error("invalid port binding '{0}': expected [host_ip:]host_port->container_port[/protocol]")]
    InvalidBinding(String),

    #[error("invalid descriptor for cube '{id}': {message}")]
    InvalidMapping { id: String, message: String },
}

/// Transport protocol of an exposed port or binding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
}

crate::simple_display! {
    Protocol {
        Tcp => "tcp",
        Udp => "udp",
    }
}

impl FromStr for Protocol {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tcp" => Ok(Protocol::Tcp),
            "udp" => Ok(Protocol::Udp),
            _ => Err(DescriptorError::UnknownProtocol(s.to_string())),
        }
    }
}

fn parse_port(s: &str) -> Result<u16, DescriptorError> {
    s.trim().parse().map_err(|_| DescriptorError::InvalidPort(s.to_string()))
}

/// Split `8089/tcp` into port and protocol. A bare port is TCP.
fn parse_port_protocol(s: &str) -> Result<(u16, Protocol), DescriptorError> {
    match s.split_once('/') {
        Some((port, protocol)) => Ok((parse_port(port)?, protocol.parse()?)),
        None => Ok((parse_port(s)?, Protocol::Tcp)),
    }
}

/// Implements string-form serde for a type with `Display` + `FromStr`.
macro_rules! string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

/// A container-side port the image declares as listening.
///
/// Serializes to/from `"8089/tcp"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExposedPort {
    pub container_port: u16,
    pub protocol: Protocol,
}

impl ExposedPort {
    pub fn new(container_port: u16, protocol: Protocol) -> Self {
        Self { container_port, protocol }
    }

    pub fn tcp(container_port: u16) -> Self {
        Self::new(container_port, Protocol::Tcp)
    }
}

impl fmt::Display for ExposedPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.container_port, self.protocol)
    }
}

impl FromStr for ExposedPort {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (container_port, protocol) = parse_port_protocol(s)?;
        Ok(Self { container_port, protocol })
    }
}

string_serde!(ExposedPort);

/// A host port published for a container port when the cube starts.
///
/// Serializes to/from `"[host_ip:]8090->8089[/tcp]"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortBinding {
    pub host_ip: Option<String>,
    pub host_port: u16,
    pub container_port: u16,
    pub protocol: Protocol,
}

impl PortBinding {
    pub fn new(host_port: u16, container_port: u16, protocol: Protocol) -> Self {
        Self { host_ip: None, host_port, container_port, protocol }
    }

    pub fn tcp(host_port: u16, container_port: u16) -> Self {
        Self::new(host_port, container_port, Protocol::Tcp)
    }
}

impl fmt::Display for PortBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ip) = &self.host_ip {
            write!(f, "{}:", ip)?;
        }
        write!(f, "{}->{}/{}", self.host_port, self.container_port, self.protocol)
    }
}

impl FromStr for PortBinding {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, container) =
            s.split_once("->").ok_or_else(|| DescriptorError::InvalidBinding(s.to_string()))?;
        let (host_ip, host_port) = match host.rsplit_once(':') {
            Some((ip, _)) if ip.trim().is_empty() => {
                return Err(DescriptorError::InvalidBinding(s.to_string()))
            }
            Some((ip, port)) => (Some(ip.trim().to_string()), port),
            None => (None, host),
        };
        let host_port = parse_port(host_port)?;
        let (container_port, protocol) = parse_port_protocol(container)?;
        Ok(Self { host_ip, host_port, container_port, protocol })
    }
}

string_serde!(PortBinding);

/// Declarative definition of a test container.
///
/// `id` is the cube name; it is the key the descriptor was stored under
/// rather than a field of the mapping itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CubeDescriptor {
    #[serde(default, skip_serializing)]
    pub id: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub exposed_ports: IndexSet<ExposedPort>,
    #[serde(default)]
    pub port_bindings: Vec<PortBinding>,
}

impl CubeDescriptor {
    pub fn new(id: impl Into<String>, image: impl Into<String>) -> Self {
        Self { id: id.into(), image: image.into(), ..Default::default() }
    }

    /// Build a descriptor from the parsed cube mapping. Unknown keys are ignored.
    pub fn from_mapping(
        id: impl Into<String>,
        mapping: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, DescriptorError> {
        let id = id.into();
        let mut descriptor: CubeDescriptor =
            serde_json::from_value(serde_json::Value::Object(mapping.clone())).map_err(|e| {
                DescriptorError::InvalidMapping { id: id.clone(), message: e.to_string() }
            })?;
        descriptor.id = id;
        Ok(descriptor)
    }

    pub fn with_exposed_port(mut self, port: ExposedPort) -> Self {
        self.exposed_ports.insert(port);
        self
    }

    pub fn with_binding(mut self, binding: PortBinding) -> Self {
        self.port_bindings.push(binding);
        self
    }

    /// First exposed port on `container_port`, any protocol.
    pub fn exposes(&self, container_port: u16) -> Option<&ExposedPort> {
        self.exposed_ports.iter().find(|p| p.container_port == container_port)
    }

    /// First binding for `container_port` in declaration order, any protocol.
    pub fn binding_for(&self, container_port: u16) -> Option<&PortBinding> {
        self.port_bindings.iter().find(|b| b.container_port == container_port)
    }

    pub fn binding_for_protocol(
        &self,
        container_port: u16,
        protocol: Protocol,
    ) -> Option<&PortBinding> {
        self.port_bindings
            .iter()
            .find(|b| b.container_port == container_port && b.protocol == protocol)
    }
}

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod tests;
