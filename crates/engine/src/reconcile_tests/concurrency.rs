// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciliations running on several threads over one run's shared stores.

use super::*;
use cube_core::{
    AdapterRegistry, CubeDescriptor, DescriptorStore, ExposedPort, PortBinding, PropertyOverride,
};
use std::sync::Barrier;
use std::thread;

/// (cube id, container port, published host port)
const CUBES: &[(&str, u16, u16)] =
    &[("tomcat", 8089, 8090), ("redis", 6379, 16379), ("postgres", 5432, 15432)];

fn shared_run() -> (DescriptorStore, AdapterRegistry) {
    let mut store = DescriptorStore::new();
    let mut registry = AdapterRegistry::new();
    for &(name, container_port, host_port) in CUBES {
        let descriptor = CubeDescriptor::new(name, "img")
            .with_exposed_port(ExposedPort::tcp(container_port))
            .with_binding(PortBinding::tcp(host_port, container_port));
        store.insert(descriptor).unwrap();
        let shape = cube_core::configuration_shape! {
            port: Int = i64::from(container_port),
            myHost: Str = "localhost",
        };
        registry.register(AdapterRecord::new(name, shape)).unwrap();
    }
    (store, registry)
}

fn expected_overrides(host_port: u16) -> Vec<PropertyOverride> {
    vec![
        PropertyOverride::new("myHost", DOCKER_IP),
        PropertyOverride::new("port", host_port.to_string()),
    ]
}

#[test]
fn different_containers_reconcile_concurrently() {
    let (store, registry) = shared_run();
    let runtime = mac_runtime();
    let reconciler = Reconciler::new(&store, &registry, &runtime, ReconcileConfig::default());
    let barrier = Barrier::new(CUBES.len());

    let outcomes: Vec<Result<Outcome, ReconcileError>> = thread::scope(|s| {
        let handles: Vec<_> = CUBES
            .iter()
            .map(|&(name, _, _)| {
                let reconciler = &reconciler;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    reconciler.reconcile(name)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (&(name, _, host_port), outcome) in CUBES.iter().zip(outcomes) {
        let expected = expected_overrides(host_port);
        assert_eq!(outcome.unwrap().overrides(), expected.as_slice(), "container {}", name);

        let handle = registry.lookup_adapter(name).unwrap();
        let record = handle.lock();
        assert_eq!(record.properties.overrides(), expected.as_slice(), "container {}", name);
        assert_eq!(record.properties.len(), 2);
    }
}

#[test]
fn racing_setups_of_one_container_apply_the_batch_once() {
    const THREADS: usize = 8;
    let (store, registry) = shared_run();
    let runtime = mac_runtime();
    let reconciler = Reconciler::new(&store, &registry, &runtime, ReconcileConfig::default());
    let barrier = Barrier::new(THREADS);

    let applied: usize = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let reconciler = &reconciler;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    reconciler.reconcile("tomcat").unwrap().overrides().len()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    });

    // The record lock spans plan and apply, so exactly one thread sees the
    // unset fields and the rest find nothing to do
    assert_eq!(applied, 2);
    let handle = registry.lookup_adapter("tomcat").unwrap();
    assert_eq!(handle.lock().properties.overrides(), expected_overrides(8090).as_slice());
    for &(name, _, _) in &CUBES[1..] {
        assert!(registry.lookup_adapter(name).unwrap().lock().properties.is_empty());
    }
}
