// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A second reconciliation pass over an already reconciled record must
//! leave the property map unchanged.

use super::*;
use crate::config::{PortMatch, DOCKER_SERVER_IP};
use cube_core::test_support::strategies::{
    arb_container_port, arb_descriptor, arb_property_value,
};
use cube_core::{
    AdapterRegistry, ConfigField, ConfigurationShape, CubeDescriptor, DescriptorStore, ExposedPort,
    FieldValue,
};
use proptest::collection::vec;
use proptest::prelude::*;

fn arb_port_match() -> impl Strategy<Value = PortMatch> {
    prop_oneof![Just(PortMatch::FirstBinding), Just(PortMatch::SameProtocol)]
}

/// Integer fields defaulting to pooled container ports, each optionally
/// set explicitly.
fn arb_port_fields() -> impl Strategy<Value = Vec<(u16, Option<String>)>> {
    vec((arb_container_port(), arb_property_value(DOCKER_SERVER_IP)), 1..5)
}

fn snapshot(registry: &AdapterRegistry) -> Vec<(String, String)> {
    registry
        .lookup_adapter(TOMCAT_ID)
        .unwrap()
        .lock()
        .properties
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Binding the port rule should pick for `container_port`.
fn expected_binding(
    descriptor: &CubeDescriptor,
    container_port: u16,
    port_match: PortMatch,
) -> Option<u16> {
    match port_match {
        PortMatch::FirstBinding => {
            descriptor.exposes(container_port)?;
            descriptor.binding_for(container_port).map(|b| b.host_port)
        }
        PortMatch::SameProtocol => descriptor
            .port_bindings
            .iter()
            .filter(|b| b.container_port == container_port)
            .filter_map(|b| {
                let exposed = ExposedPort::new(container_port, b.protocol);
                descriptor.exposed_ports.get_index_of(&exposed).map(|rank| (rank, b.host_port))
            })
            // Earliest exposed protocol wins; ties keep declaration order
            .min_by_key(|(rank, _)| *rank)
            .map(|(_, host_port)| host_port),
    }
}

fn os_family_strategy() -> impl Strategy<Value = OsFamily> {
    prop_oneof![
        Just(OsFamily::Linux),
        Just(OsFamily::Mac),
        Just(OsFamily::Windows),
        Just(OsFamily::Unix),
    ]
}

#[test]
fn second_pass_applies_nothing() {
    let (store, registry) = tomcat_run([]).unwrap();
    let runtime = mac_runtime();
    let reconciler = Reconciler::new(&store, &registry, &runtime, ReconcileConfig::default());

    let first = reconciler.reconcile(TOMCAT_ID).unwrap();
    assert_eq!(first.overrides().len(), 2);

    let second = reconciler.reconcile(TOMCAT_ID).unwrap();
    assert_eq!(second, Outcome::Applied(Vec::new()));

    let handle = registry.lookup_adapter(TOMCAT_ID).unwrap();
    let record = handle.lock();
    assert_eq!(record.properties.get("myHost"), Some(DOCKER_IP));
    assert_eq!(record.properties.get("port"), Some("8090"));
    assert_eq!(record.properties.overrides().len(), 2);
}

proptest! {
    #[test]
    fn reconcile_is_idempotent(
        host in arb_property_value(DOCKER_SERVER_IP),
        port in arb_property_value(DOCKER_SERVER_IP),
        os_family in os_family_strategy(),
        address in "[0-9.]{0,15}",
    ) {
        let mut properties = Vec::new();
        if let Some(host) = &host {
            properties.push(("myHost", host.as_str()));
        }
        if let Some(port) = &port {
            properties.push(("port", port.as_str()));
        }
        let (store, registry) = tomcat_run(properties.iter().copied()).unwrap();
        let runtime = FakeRuntime::new(os_family, address);
        let reconciler = Reconciler::new(&store, &registry, &runtime, ReconcileConfig::default());

        reconciler.reconcile(TOMCAT_ID).unwrap();
        let handle = registry.lookup_adapter(TOMCAT_ID).unwrap();
        let once: Vec<(String, String)> = handle
            .lock()
            .properties
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let second = reconciler.reconcile(TOMCAT_ID).unwrap();
        let twice: Vec<(String, String)> = handle
            .lock()
            .properties
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        prop_assert!(second.overrides().is_empty());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn explicit_literals_survive(
        host in "[a-z][a-z0-9.]{0,14}",
        port in "[0-9]{1,5}",
        os_family in os_family_strategy(),
    ) {
        prop_assume!(host != DOCKER_SERVER_IP);
        let runtime = FakeRuntime::new(os_family, DOCKER_IP);
        let (outcome, record) = reconcile_tomcat(
            &[("myHost", host.as_str()), ("port", port.as_str())],
            &runtime,
            ReconcileConfig::default(),
        );

        prop_assert!(outcome.unwrap().overrides().is_empty());
        prop_assert_eq!(record.properties.get("myHost"), Some(host.as_str()));
        prop_assert_eq!(record.properties.get("port"), Some(port.as_str()));
    }
}

proptest! {
    #[test]
    fn arbitrary_descriptors_reconcile_idempotently(
        descriptor in arb_descriptor(TOMCAT_ID),
        fields in arb_port_fields(),
        host in arb_property_value(DOCKER_SERVER_IP),
        port_match in arb_port_match(),
        os_family in os_family_strategy(),
    ) {
        let names: Vec<String> = (0..fields.len()).map(|i| format!("port{}", i)).collect();
        let mut shape_fields: Vec<ConfigField> = names
            .iter()
            .zip(&fields)
            .map(|(name, (default, _))| {
                ConfigField::new(name.as_str(), FieldValue::Int(i64::from(*default)))
            })
            .collect();
        shape_fields.push(ConfigField::new("myHost", FieldValue::Str("localhost".to_string())));

        let mut record = AdapterRecord::new(TOMCAT_ID, ConfigurationShape::new(shape_fields));
        for (name, (_, explicit)) in names.iter().zip(&fields) {
            if let Some(value) = explicit {
                record.properties.set(name.as_str(), value.as_str());
            }
        }
        if let Some(host) = &host {
            record.properties.set("myHost", host.as_str());
        }

        let mut store = DescriptorStore::new();
        store.insert(descriptor.clone()).unwrap();
        let mut registry = AdapterRegistry::new();
        registry.register(record).unwrap();
        let runtime = FakeRuntime::new(os_family, DOCKER_IP);
        let config = ReconcileConfig::default().port_match(port_match);
        let reconciler = Reconciler::new(&store, &registry, &runtime, config);

        let first = reconciler.reconcile(TOMCAT_ID).unwrap();
        let once = snapshot(&registry);

        for (name, (default, explicit)) in names.iter().zip(&fields) {
            let value = once.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone());
            match explicit {
                Some(explicit) => {
                    prop_assert_eq!(value.as_ref(), Some(explicit));
                }
                None => {
                    let expected = expected_binding(&descriptor, *default, port_match);
                    prop_assert_eq!(value, expected.map(|p| p.to_string()));
                }
            }
        }
        // Only unset fields are ever written
        for o in first.overrides().iter().filter(|o| o.field != "myHost") {
            let index = names.iter().position(|n| *n == o.field).unwrap();
            prop_assert!(fields[index].1.is_none());
        }

        let second = reconciler.reconcile(TOMCAT_ID).unwrap();
        prop_assert!(second.overrides().is_empty());
        prop_assert_eq!(once, snapshot(&registry));
    }
}
