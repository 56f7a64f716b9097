// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciler tests

mod concurrency;
mod host;
mod idempotency;
mod lookup;
mod port;

use super::*;
use cube_core::test_support::{tomcat_run, TOMCAT_ID};
use cube_core::{AdapterRecord, FakeRuntime, OsFamily};

const DOCKER_IP: &str = "192.168.0.1";

/// Reconcile the tomcat fixture once and return the outcome plus the
/// resulting adapter record.
fn reconcile_tomcat(
    properties: &[(&str, &str)],
    runtime: &FakeRuntime,
    config: ReconcileConfig,
) -> (Result<Outcome, ReconcileError>, AdapterRecord) {
    let (store, registry) = tomcat_run(properties.iter().copied()).unwrap();
    let reconciler = Reconciler::new(&store, &registry, runtime, config);
    let outcome = reconciler.reconcile(TOMCAT_ID);
    let record = registry.lookup_adapter(TOMCAT_ID).unwrap().lock().clone();
    (outcome, record)
}

fn mac_runtime() -> FakeRuntime {
    FakeRuntime::new(OsFamily::Mac, DOCKER_IP)
}

fn linux_runtime() -> FakeRuntime {
    FakeRuntime::new(OsFamily::Linux, DOCKER_IP)
}
