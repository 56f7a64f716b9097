// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;

#[test]
fn empty_toml_yields_defaults() {
    let config = ReconcileConfig::from_toml_str("").unwrap();
    assert_eq!(config, ReconcileConfig::default());
    assert_eq!(config.docker_server_sentinel, DOCKER_SERVER_IP);
    assert_eq!(config.port_match, PortMatch::FirstBinding);
    assert_eq!(config.empty_address, EmptyAddressPolicy::Write);
}

#[test]
fn toml_overrides_selected_fields() {
    let config = ReconcileConfig::from_toml_str(
        r#"
        remap_os_families = ["mac"]
        port_match = "same_protocol"
        empty_address = "reject"
        "#,
    )
    .unwrap();

    assert_eq!(config.remap_os_families, vec![OsFamily::Mac]);
    assert_eq!(config.port_match, PortMatch::SameProtocol);
    assert_eq!(config.empty_address, EmptyAddressPolicy::Reject);
    assert_eq!(config.docker_server_sentinel, DOCKER_SERVER_IP);
}

#[test]
fn unknown_policy_is_a_parse_error() {
    let err = ReconcileConfig::from_toml_str(r#"empty_address = "panic""#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"docker_server_sentinel = "dockerHost""#).unwrap();

    let config = ReconcileConfig::load(file.path()).unwrap();
    assert!(config.is_sentinel("dockerHost"));
    assert!(!config.is_sentinel(DOCKER_SERVER_IP));
}

#[test]
fn load_missing_file_names_path() {
    let err = ReconcileConfig::load(Path::new("/nonexistent/reconcile.toml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/reconcile.toml"));
}

#[yare::parameterized(
    linux   = { OsFamily::Linux,   false },
    unix    = { OsFamily::Unix,    false },
    mac     = { OsFamily::Mac,     true },
    windows = { OsFamily::Windows, true },
)]
fn default_remap_families(os_family: OsFamily, expected: bool) {
    assert_eq!(ReconcileConfig::default().requires_remap(os_family), expected);
}

#[test]
fn setters_chain() {
    let config = ReconcileConfig::default()
        .docker_server_sentinel("dockerHost")
        .port_match(PortMatch::SameProtocol)
        .empty_address(EmptyAddressPolicy::Skip);
    assert_eq!(config.docker_server_sentinel, "dockerHost");
    assert_eq!(config.port_match, PortMatch::SameProtocol);
    assert_eq!(config.empty_address, EmptyAddressPolicy::Skip);
}

#[yare::parameterized(
    my_host    = { "myHost" },
    plain_host = { "host" },
    upper_host = { "HOST" },
)]
fn host_field_found_by_name(name: &'static str) {
    let shape = ConfigurationShape::new(vec![
        ConfigField::new("port", cube_core::FieldValue::Int(8089)),
        ConfigField::new(name, cube_core::FieldValue::Str("localhost".to_string())),
    ]);
    let field = ReconcileConfig::default().host_field(&shape).unwrap();
    assert_eq!(field.name, name);
}

#[yare::parameterized(
    proxy_host      = { "proxyHost" },
    management_host = { "managementHost" },
    ghost           = { "ghost" },
)]
fn unlisted_host_like_names_are_not_host_fields(name: &'static str) {
    let shape = ConfigurationShape::new(vec![
        ConfigField::new("port", cube_core::FieldValue::Int(8089)),
        ConfigField::new(name, cube_core::FieldValue::Str(String::new())),
    ]);
    assert!(ReconcileConfig::default().host_field(&shape).is_none());
}

#[test]
fn listed_name_is_found_among_host_like_fields() {
    let shape = ConfigurationShape::new(vec![
        ConfigField::new("proxyHost", cube_core::FieldValue::Str("localhost".to_string())),
        ConfigField::new("myHost", cube_core::FieldValue::Str("localhost".to_string())),
    ]);
    let field = ReconcileConfig::default().host_field(&shape).unwrap();
    assert_eq!(field.name, "myHost");
}

#[test]
fn custom_host_field_names() {
    let shape = ConfigurationShape::new(vec![ConfigField::new(
        "proxyHost",
        cube_core::FieldValue::Str("localhost".to_string()),
    )]);
    let config = ReconcileConfig::default().host_field_names(vec!["proxyhost".to_string()]);
    assert_eq!(config.host_field(&shape).map(|f| f.name.as_str()), Some("proxyHost"));
}

#[test]
fn host_field_must_be_a_string() {
    let shape = ConfigurationShape::new(vec![
        ConfigField::new("host", cube_core::FieldValue::Int(1)),
        ConfigField::new("hostname", cube_core::FieldValue::Str("localhost".to_string())),
    ]);
    assert!(ReconcileConfig::default().host_field(&shape).is_none());
}
