// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::config::{EmptyAddressPolicy, DOCKER_SERVER_IP};
use cube_core::PropertyOverride;

#[test]
fn unset_host_is_remapped_on_mac() {
    let (outcome, record) = reconcile_tomcat(&[], &mac_runtime(), ReconcileConfig::default());

    assert!(outcome.unwrap().overrides().contains(&PropertyOverride::new("myHost", DOCKER_IP)));
    assert_eq!(record.properties.get("myHost"), Some(DOCKER_IP));
}

#[test]
fn unset_host_is_kept_on_linux() {
    let runtime = linux_runtime();
    let (outcome, record) = reconcile_tomcat(&[], &runtime, ReconcileConfig::default());

    assert!(outcome.unwrap().overrides().iter().all(|o| o.field != "myHost"));
    assert!(!record.properties.has("myHost"));
    assert_eq!(record.current_value("myHost").as_deref(), Some("localhost"));
    assert_eq!(runtime.address_reads(), 0);
}

#[yare::parameterized(
    linux   = { OsFamily::Linux },
    mac     = { OsFamily::Mac },
    windows = { OsFamily::Windows },
    unix    = { OsFamily::Unix },
)]
fn sentinel_is_replaced_on_every_os(os_family: OsFamily) {
    let runtime = FakeRuntime::new(os_family, DOCKER_IP);
    let (outcome, record) =
        reconcile_tomcat(&[("myHost", DOCKER_SERVER_IP)], &runtime, ReconcileConfig::default());

    assert!(outcome.unwrap().overrides().contains(&PropertyOverride::new("myHost", DOCKER_IP)));
    assert_eq!(record.properties.get("myHost"), Some(DOCKER_IP));
}

#[yare::parameterized(
    literal_ip = { "10.0.10.1" },
    localhost  = { "localhost" },
    empty      = { "" },
    docker_ip  = { "192.168.0.1" },
)]
fn explicit_host_is_never_overridden(value: &str) {
    let (outcome, record) =
        reconcile_tomcat(&[("myHost", value)], &mac_runtime(), ReconcileConfig::default());

    assert!(outcome.unwrap().overrides().iter().all(|o| o.field != "myHost"));
    assert_eq!(record.properties.get("myHost"), Some(value));
    assert!(record.properties.overrides().iter().all(|o| o.field != "myHost"));
}

#[test]
fn custom_sentinel_is_honored() {
    let config = ReconcileConfig::default().docker_server_sentinel("${docker.host}");
    let (_, record) = reconcile_tomcat(&[("myHost", "${docker.host}")], &linux_runtime(), config);
    assert_eq!(record.properties.get("myHost"), Some(DOCKER_IP));
}

#[test]
fn custom_remap_families() {
    let config = ReconcileConfig::default().remap_os_families(vec![OsFamily::Linux]);
    let (_, record) = reconcile_tomcat(&[], &linux_runtime(), config);
    assert_eq!(record.properties.get("myHost"), Some(DOCKER_IP));
}

#[test]
fn empty_address_is_written_by_default() {
    let runtime = FakeRuntime::new(OsFamily::Mac, "");
    let (outcome, record) = reconcile_tomcat(&[], &runtime, ReconcileConfig::default());

    assert!(outcome.unwrap().overrides().contains(&PropertyOverride::new("myHost", "")));
    assert_eq!(record.properties.get("myHost"), Some(""));
}

#[test]
fn empty_address_can_be_skipped() {
    let runtime = FakeRuntime::new(OsFamily::Mac, "");
    let config = ReconcileConfig::default().empty_address(EmptyAddressPolicy::Skip);
    let (outcome, record) = reconcile_tomcat(&[("myHost", DOCKER_SERVER_IP)], &runtime, config);

    assert!(outcome.unwrap().overrides().iter().all(|o| o.field != "myHost"));
    assert_eq!(record.properties.get("myHost"), Some(DOCKER_SERVER_IP));
}

#[test]
fn empty_address_can_block_startup() {
    let runtime = FakeRuntime::new(OsFamily::Mac, "");
    let config = ReconcileConfig::default().empty_address(EmptyAddressPolicy::Reject);
    let (outcome, record) = reconcile_tomcat(&[], &runtime, config);

    assert_eq!(
        outcome.unwrap_err(),
        ReconcileError::UnresolvedDockerAddress {
            container: TOMCAT_ID.to_string(),
            field: "myHost".to_string(),
        }
    );
    // Nothing from the batch is applied, ports included
    assert!(record.properties.is_empty());
}

#[test]
fn adapter_without_host_field_only_gets_ports() {
    use cube_core::{AdapterRegistry, DescriptorStore};
    use cube_core::test_support::tomcat_descriptor;

    let mut store = DescriptorStore::new();
    store.insert(tomcat_descriptor()).unwrap();
    let mut registry = AdapterRegistry::new();
    let handle = registry
        .register(AdapterRecord::new(TOMCAT_ID, cube_core::configuration_shape! { port: Int = 8089 }))
        .unwrap();
    let runtime = mac_runtime();
    let reconciler = Reconciler::new(&store, &registry, &runtime, ReconcileConfig::default());

    let outcome = reconciler.reconcile(TOMCAT_ID).unwrap();
    assert_eq!(outcome.overrides(), &[PropertyOverride::new("port", "8090")]);
    assert_eq!(handle.lock().properties.len(), 1);
}

#[test]
fn host_like_fields_outside_the_configured_names_are_left_alone() {
    use cube_core::test_support::tomcat_descriptor;
    use cube_core::{AdapterRegistry, DescriptorStore};

    let mut store = DescriptorStore::new();
    store.insert(tomcat_descriptor()).unwrap();
    let mut registry = AdapterRegistry::new();
    let shape = cube_core::configuration_shape! {
        port: Int = 8089,
        proxyHost: Str = "",
        ghost: Str = "x",
    };
    let handle = registry.register(AdapterRecord::new(TOMCAT_ID, shape)).unwrap();
    let runtime = mac_runtime();
    let reconciler = Reconciler::new(&store, &registry, &runtime, ReconcileConfig::default());

    let outcome = reconciler.reconcile(TOMCAT_ID).unwrap();
    assert_eq!(outcome.overrides(), &[PropertyOverride::new("port", "8090")]);
    let record = handle.lock();
    assert!(!record.properties.has("proxyHost"));
    assert!(!record.properties.has("ghost"));
    assert_eq!(runtime.address_reads(), 0);
}
