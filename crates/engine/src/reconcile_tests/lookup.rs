// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use cube_core::test_support::{tomcat_adapter, tomcat_descriptor};
use cube_core::{AdapterRegistry, CubeDescriptor, DescriptorStore};

#[test]
fn unknown_container_is_skipped() {
    let (store, registry) = tomcat_run([]).unwrap();
    let runtime = mac_runtime();
    let reconciler = Reconciler::new(&store, &registry, &runtime, ReconcileConfig::default());

    let outcome = reconciler.reconcile("other").unwrap();
    assert_eq!(outcome, Outcome::Skipped(SkipReason::NoAdapter));
    assert!(outcome.overrides().is_empty());
}

#[test]
fn adapter_without_cube_is_skipped_untouched() {
    let store = DescriptorStore::new();
    let mut registry = AdapterRegistry::new();
    let handle = registry.register(tomcat_adapter([])).unwrap();
    let runtime = mac_runtime();
    let reconciler = Reconciler::new(&store, &registry, &runtime, ReconcileConfig::default());

    let outcome = reconciler.reconcile(TOMCAT_ID).unwrap();
    assert_eq!(outcome, Outcome::Skipped(SkipReason::NoDescriptor));
    assert!(handle.lock().properties.is_empty());
    assert_eq!(runtime.address_reads(), 0);
}

#[test]
fn cube_without_adapter_is_skipped() {
    let mut store = DescriptorStore::new();
    store.insert(tomcat_descriptor()).unwrap();
    let registry = AdapterRegistry::new();
    let runtime = mac_runtime();
    let reconciler = Reconciler::new(&store, &registry, &runtime, ReconcileConfig::default());

    assert!(reconciler.reconcile(TOMCAT_ID).unwrap().is_skipped());
}

#[test]
fn match_is_by_exact_name() {
    let mut store = DescriptorStore::new();
    store.insert(CubeDescriptor { id: "Test".to_string(), ..tomcat_descriptor() }).unwrap();
    let mut registry = AdapterRegistry::new();
    registry.register(tomcat_adapter([])).unwrap();
    let runtime = mac_runtime();
    let reconciler = Reconciler::new(&store, &registry, &runtime, ReconcileConfig::default());

    assert_eq!(
        reconciler.reconcile(TOMCAT_ID).unwrap(),
        Outcome::Skipped(SkipReason::NoDescriptor)
    );
}

#[test]
fn skip_reason_display() {
    assert_eq!(SkipReason::NoAdapter.to_string(), "no adapter registered");
    assert_eq!(SkipReason::NoDescriptor.to_string(), "no cube descriptor");
}
