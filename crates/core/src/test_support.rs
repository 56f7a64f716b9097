// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{
    AdapterRecord, AdapterRegistry, ConfigurationShape, CubeDescriptor, DescriptorStore,
    ExposedPort, PortBinding, RegistryError,
};
use indexmap::IndexSet;

/// Cube id shared by the tomcat fixtures.
pub const TOMCAT_ID: &str = "test";

crate::builder! {
    pub struct CubeDescriptorBuilder => CubeDescriptor {
        into {
            id: String = TOMCAT_ID,
            image: String = "tutum/tomcat:7.0",
        }
        set {
            exposed_ports: IndexSet<ExposedPort> = IndexSet::new(),
            port_bindings: Vec<PortBinding> = Vec::new(),
        }
    }
}

impl CubeDescriptorBuilder {
    pub fn expose(mut self, port: ExposedPort) -> Self {
        self.exposed_ports.insert(port);
        self
    }

    pub fn bind(mut self, binding: PortBinding) -> Self {
        self.port_bindings.push(binding);
        self
    }
}

// ── Fixtures ────────────────────────────────────────────────────────────────

/// `tutum/tomcat:7.0` exposing 8089/tcp, published on host port 8090.
pub fn tomcat_descriptor() -> CubeDescriptor {
    CubeDescriptor::builder()
        .expose(ExposedPort::tcp(8089))
        .bind(PortBinding::tcp(8090, 8089))
        .build()
}

/// Adapter configuration with a port field defaulting to the exposed port
/// and a host field defaulting to loopback.
pub fn tomcat_shape() -> ConfigurationShape {
    crate::configuration_shape! {
        port: Int = 8089,
        myHost: Str = "localhost",
    }
}

pub fn tomcat_adapter<'a>(properties: impl IntoIterator<Item = (&'a str, &'a str)>) -> AdapterRecord {
    let mut record = AdapterRecord::new(TOMCAT_ID, tomcat_shape());
    for (key, value) in properties {
        record.properties.set(key, value);
    }
    record
}

/// Stores holding one tomcat cube and its adapter.
pub fn tomcat_run<'a>(
    properties: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<(DescriptorStore, AdapterRegistry), RegistryError> {
    let mut store = DescriptorStore::new();
    let mut registry = AdapterRegistry::new();
    store.insert(tomcat_descriptor())?;
    registry.register(tomcat_adapter(properties))?;
    Ok((store, registry))
}

// ── Proptest strategies ─────────────────────────────────────────────────────

/// Proptest strategies for descriptor and property types.
///
/// Container ports are drawn from a small pool so exposures, bindings and
/// field defaults collide often.
pub mod strategies {
    use crate::descriptor::{CubeDescriptor, ExposedPort, PortBinding, Protocol};
    use proptest::collection::vec;
    use proptest::prelude::*;

    pub const CONTAINER_PORTS: &[u16] = &[80, 443, 5432, 8080, 8089];

    pub fn arb_protocol() -> impl Strategy<Value = Protocol> {
        prop_oneof![Just(Protocol::Tcp), Just(Protocol::Udp)]
    }

    pub fn arb_container_port() -> impl Strategy<Value = u16> {
        proptest::sample::select(CONTAINER_PORTS)
    }

    pub fn arb_exposed_port() -> impl Strategy<Value = ExposedPort> {
        (arb_container_port(), arb_protocol())
            .prop_map(|(port, protocol)| ExposedPort::new(port, protocol))
    }

    pub fn arb_binding() -> impl Strategy<Value = PortBinding> {
        (1024u16..=u16::MAX, arb_container_port(), arb_protocol())
            .prop_map(|(host, container, protocol)| PortBinding::new(host, container, protocol))
    }

    /// Descriptor with up to four exposures and six bindings.
    pub fn arb_descriptor(id: &'static str) -> impl Strategy<Value = CubeDescriptor> {
        (vec(arb_exposed_port(), 0..4), vec(arb_binding(), 0..6)).prop_map(
            move |(exposed, bindings)| {
                let descriptor = exposed
                    .into_iter()
                    .fold(CubeDescriptor::new(id, "img"), CubeDescriptor::with_exposed_port);
                bindings.into_iter().fold(descriptor, CubeDescriptor::with_binding)
            },
        )
    }

    /// Optional explicit value for a property: unset, a literal, or the
    /// given sentinel.
    pub fn arb_property_value(sentinel: &'static str) -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some(sentinel.to_string())),
            "[a-z0-9.]{1,15}".prop_map(Some),
        ]
    }
}
