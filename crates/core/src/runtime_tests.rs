// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    linux   = { "linux",   OsFamily::Linux },
    mac     = { "MAC",     OsFamily::Mac },
    darwin  = { "darwin",  OsFamily::Mac },
    windows = { "Windows", OsFamily::Windows },
    unix    = { "unix",    OsFamily::Unix },
)]
fn os_family_parses(input: &str, expected: OsFamily) {
    assert_eq!(input.parse::<OsFamily>().unwrap(), expected);
}

#[test]
fn os_family_rejects_unknown() {
    assert!("plan9".parse::<OsFamily>().is_err());
}

#[test]
fn os_family_serde_is_lowercase() {
    assert_eq!(serde_json::to_string(&OsFamily::Mac).unwrap(), "\"mac\"");
    assert_eq!(OsFamily::Windows.to_string(), "windows");
}

#[test]
fn static_runtime_reports_its_facts() {
    let runtime = StaticRuntime::new(OsFamily::Mac, "192.168.0.1");
    assert_eq!(runtime.current_os_family(), OsFamily::Mac);
    assert_eq!(runtime.docker_server_address(), "192.168.0.1");
}

#[test]
fn fake_runtime_is_shared_between_clones() {
    let runtime = FakeRuntime::default();
    let observer = runtime.clone();

    runtime.set_os_family(OsFamily::Windows);
    runtime.set_docker_server_address("10.0.0.2");

    assert_eq!(observer.current_os_family(), OsFamily::Windows);
    assert_eq!(observer.docker_server_address(), "10.0.0.2");
    assert_eq!(runtime.address_reads(), 1);
}
