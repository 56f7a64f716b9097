// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::config::{EmptyAddressPolicy, ReconcileConfig};
use cube_core::test_support::{tomcat_run, TOMCAT_ID};
use cube_core::{FakeRuntime, OsFamily, PropertyOverride};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn before_setup_applies_overrides() {
    init_tracing();
    let (store, registry) = tomcat_run([]).unwrap();
    let runtime = FakeRuntime::new(OsFamily::Mac, "192.168.0.1");
    let controller = ContainerConfigurationController::new(Reconciler::new(
        &store,
        &registry,
        &runtime,
        ReconcileConfig::default(),
    ));

    let outcome = controller.on_before_setup(&BeforeSetup::new(TOMCAT_ID)).unwrap();

    assert_eq!(
        outcome.overrides(),
        &[PropertyOverride::new("myHost", "192.168.0.1"), PropertyOverride::new("port", "8090")]
    );
    let handle = registry.lookup_adapter(TOMCAT_ID).unwrap();
    assert_eq!(handle.lock().properties.get("port"), Some("8090"));
}

#[test]
fn before_setup_for_unmanaged_container_is_a_no_op() {
    init_tracing();
    let (store, registry) = tomcat_run([]).unwrap();
    let runtime = FakeRuntime::new(OsFamily::Mac, "192.168.0.1");
    let controller = ContainerConfigurationController::new(Reconciler::new(
        &store,
        &registry,
        &runtime,
        ReconcileConfig::default(),
    ));

    let outcome = controller.on_before_setup(&BeforeSetup::new("jboss")).unwrap();
    assert!(outcome.is_skipped());
    assert!(registry.lookup_adapter(TOMCAT_ID).unwrap().lock().properties.is_empty());
}

#[test]
fn before_setup_surfaces_rejected_address() {
    init_tracing();
    let (store, registry) = tomcat_run([]).unwrap();
    let runtime = FakeRuntime::new(OsFamily::Windows, "");
    let config = ReconcileConfig::default().empty_address(EmptyAddressPolicy::Reject);
    let controller =
        ContainerConfigurationController::new(Reconciler::new(&store, &registry, &runtime, config));

    let err = controller.on_before_setup(&BeforeSetup::new(TOMCAT_ID)).unwrap_err();
    assert!(matches!(err, ReconcileError::UnresolvedDockerAddress { .. }));
    assert!(err.to_string().contains("myHost"));
}
