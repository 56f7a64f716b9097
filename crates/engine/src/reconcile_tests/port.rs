// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::config::PortMatch;
use cube_core::test_support::tomcat_shape;
use cube_core::{
    AdapterRegistry, CubeDescriptor, DescriptorStore, ExposedPort, PortBinding, PropertyOverride,
    Protocol,
};

/// Reconcile an adapter against a custom descriptor on Linux (no host remap).
fn reconcile_with(
    descriptor: CubeDescriptor,
    record: AdapterRecord,
    config: ReconcileConfig,
) -> (Outcome, AdapterRecord) {
    let mut store = DescriptorStore::new();
    store.insert(descriptor).unwrap();
    let mut registry = AdapterRegistry::new();
    let handle = registry.register(record).unwrap();
    let runtime = linux_runtime();
    let reconciler = Reconciler::new(&store, &registry, &runtime, config);
    let outcome = reconciler.reconcile(TOMCAT_ID).unwrap();
    let record = handle.lock().clone();
    (outcome, record)
}

#[test]
fn unset_port_is_remapped_to_bound_host_port() {
    let (outcome, record) = reconcile_tomcat(&[], &linux_runtime(), ReconcileConfig::default());

    assert_eq!(outcome.unwrap().overrides(), &[PropertyOverride::new("port", "8090")]);
    assert_eq!(record.properties.get("port"), Some("8090"));
}

#[yare::parameterized(
    already_host_port = { "8090" },
    container_port    = { "8089" },
    other_literal     = { "9999" },
    not_a_number      = { "http" },
)]
fn explicit_port_is_never_overridden(value: &str) {
    let (outcome, record) =
        reconcile_tomcat(&[("port", value)], &linux_runtime(), ReconcileConfig::default());

    assert!(outcome.unwrap().overrides().is_empty());
    assert_eq!(record.properties.get("port"), Some(value));
    assert!(record.properties.overrides().is_empty());
}

#[test]
fn port_not_exposed_is_skipped() {
    let descriptor = CubeDescriptor::new(TOMCAT_ID, "img").with_binding(PortBinding::tcp(8090, 8089));
    let (outcome, record) = reconcile_with(
        descriptor,
        AdapterRecord::new(TOMCAT_ID, tomcat_shape()),
        ReconcileConfig::default(),
    );

    assert!(outcome.overrides().is_empty());
    assert!(!record.properties.has("port"));
}

#[test]
fn exposed_port_without_binding_is_skipped() {
    let descriptor = CubeDescriptor::new(TOMCAT_ID, "img").with_exposed_port(ExposedPort::tcp(8089));
    let (outcome, _) = reconcile_with(
        descriptor,
        AdapterRecord::new(TOMCAT_ID, tomcat_shape()),
        ReconcileConfig::default(),
    );
    assert!(outcome.overrides().is_empty());
}

#[test]
fn only_integer_fields_are_port_candidates() {
    let shape = cube_core::configuration_shape! {
        port: Int = 8089,
        portName: Str = "8089",
        adminPort: Int = 9990,
        timeout: Int = -1,
        secure: Bool = false,
    };
    let descriptor = CubeDescriptor::new(TOMCAT_ID, "img")
        .with_exposed_port(ExposedPort::tcp(8089))
        .with_exposed_port(ExposedPort::tcp(9990))
        .with_binding(PortBinding::tcp(8090, 8089))
        .with_binding(PortBinding::tcp(19990, 9990));
    let (outcome, record) =
        reconcile_with(descriptor, AdapterRecord::new(TOMCAT_ID, shape), ReconcileConfig::default());

    assert_eq!(
        outcome.overrides(),
        &[PropertyOverride::new("port", "8090"), PropertyOverride::new("adminPort", "19990")]
    );
    assert!(!record.properties.has("portName"));
    assert!(!record.properties.has("timeout"));
}

#[test]
fn first_binding_wins_across_protocols() {
    let descriptor = CubeDescriptor::new(TOMCAT_ID, "img")
        .with_exposed_port(ExposedPort::tcp(8089))
        .with_binding(PortBinding::new(7000, 8089, Protocol::Udp))
        .with_binding(PortBinding::tcp(8090, 8089));
    let (outcome, _) = reconcile_with(
        descriptor,
        AdapterRecord::new(TOMCAT_ID, tomcat_shape()),
        ReconcileConfig::default(),
    );
    assert_eq!(outcome.overrides(), &[PropertyOverride::new("port", "7000")]);
}

#[test]
fn same_protocol_match_skips_foreign_bindings() {
    let descriptor = CubeDescriptor::new(TOMCAT_ID, "img")
        .with_exposed_port(ExposedPort::tcp(8089))
        .with_binding(PortBinding::new(7000, 8089, Protocol::Udp))
        .with_binding(PortBinding::tcp(8090, 8089));
    let config = ReconcileConfig::default().port_match(PortMatch::SameProtocol);
    let (outcome, _) =
        reconcile_with(descriptor, AdapterRecord::new(TOMCAT_ID, tomcat_shape()), config);
    assert_eq!(outcome.overrides(), &[PropertyOverride::new("port", "8090")]);
}

#[test]
fn same_protocol_match_without_matching_binding_is_skipped() {
    let descriptor = CubeDescriptor::new(TOMCAT_ID, "img")
        .with_exposed_port(ExposedPort::tcp(8089))
        .with_binding(PortBinding::new(7000, 8089, Protocol::Udp));
    let config = ReconcileConfig::default().port_match(PortMatch::SameProtocol);
    let (outcome, _) =
        reconcile_with(descriptor, AdapterRecord::new(TOMCAT_ID, tomcat_shape()), config);
    assert!(outcome.overrides().is_empty());
}

#[test]
fn host_field_is_excluded_from_port_matching() {
    // A numeric-looking host default must not be treated as a port
    let shape = cube_core::configuration_shape! {
        host: Str = "8089",
        port: Int = 8089,
    };
    let (outcome, _) = reconcile_with(
        cube_core::test_support::tomcat_descriptor(),
        AdapterRecord::new(TOMCAT_ID, shape),
        ReconcileConfig::default(),
    );
    assert_eq!(outcome.overrides(), &[PropertyOverride::new("port", "8090")]);
}

#[test]
fn same_protocol_match_follows_exposure_order() {
    let descriptor = CubeDescriptor::new(TOMCAT_ID, "img")
        .with_exposed_port(ExposedPort::new(8089, Protocol::Udp))
        .with_exposed_port(ExposedPort::tcp(8089))
        .with_binding(PortBinding::tcp(8090, 8089))
        .with_binding(PortBinding::new(7000, 8089, Protocol::Udp));
    let config = ReconcileConfig::default().port_match(PortMatch::SameProtocol);
    let (outcome, _) =
        reconcile_with(descriptor, AdapterRecord::new(TOMCAT_ID, tomcat_shape()), config);
    assert_eq!(outcome.overrides(), &[PropertyOverride::new("port", "7000")]);
}
