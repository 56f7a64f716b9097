// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[yare::parameterized(
    tcp_suffix = { "8089/tcp", 8089, Protocol::Tcp },
    udp_suffix = { "53/udp",   53,   Protocol::Udp },
    bare_port  = { "8080",     8080, Protocol::Tcp },
    upper_case = { "9090/TCP", 9090, Protocol::Tcp },
)]
fn exposed_port_parses(input: &str, port: u16, protocol: Protocol) {
    let parsed: ExposedPort = input.parse().unwrap();
    assert_eq!(parsed, ExposedPort::new(port, protocol));
}

#[yare::parameterized(
    plain     = { "8090->8089/tcp",           None,              8090, 8089, Protocol::Tcp },
    no_proto  = { "8090->8089",               None,              8090, 8089, Protocol::Tcp },
    udp       = { "5353->53/udp",             None,              5353, 53,   Protocol::Udp },
    with_ip   = { "127.0.0.1:8090->8089/tcp", Some("127.0.0.1"), 8090, 8089, Protocol::Tcp },
)]
fn port_binding_parses(
    input: &str,
    host_ip: Option<&str>,
    host_port: u16,
    container_port: u16,
    protocol: Protocol,
) {
    let parsed: PortBinding = input.parse().unwrap();
    assert_eq!(parsed.host_ip.as_deref(), host_ip);
    assert_eq!(parsed.host_port, host_port);
    assert_eq!(parsed.container_port, container_port);
    assert_eq!(parsed.protocol, protocol);
}

#[yare::parameterized(
    missing_arrow = { "8090:8089" },
    bad_host      = { "abc->8089/tcp" },
    out_of_range  = { "70000->8089/tcp" },
    bad_protocol  = { "8090->8089/sctp" },
    empty_ip      = { ":8090->8089/tcp" },
)]
fn port_binding_rejects(input: &str) {
    assert!(input.parse::<PortBinding>().is_err());
}

#[test]
fn unknown_protocol_error_names_protocol() {
    let err = "8089/sctp".parse::<ExposedPort>().unwrap_err();
    assert_eq!(err, DescriptorError::UnknownProtocol("sctp".to_string()));
}

#[test]
fn binding_display_includes_host_ip() {
    let binding: PortBinding = "0.0.0.0:8090->8089/tcp".parse().unwrap();
    assert_eq!(binding.to_string(), "0.0.0.0:8090->8089/tcp");
    assert_eq!(PortBinding::tcp(8090, 8089).to_string(), "8090->8089/tcp");
}

#[test]
fn from_mapping_reads_cube_fields() {
    let mapping = json!({
        "image": "tutum/tomcat:7.0",
        "exposedPorts": ["8089/tcp"],
        "portBindings": ["8090->8089/tcp"],
        "await": { "strategy": "polling" }
    });
    let descriptor = CubeDescriptor::from_mapping("test", mapping.as_object().unwrap()).unwrap();

    assert_eq!(descriptor.id, "test");
    assert_eq!(descriptor.image, "tutum/tomcat:7.0");
    assert_eq!(descriptor.exposed_ports.len(), 1);
    assert!(descriptor.exposes(8089).is_some());
    assert_eq!(descriptor.binding_for(8089), Some(&PortBinding::tcp(8090, 8089)));
}

#[test]
fn from_mapping_defaults_missing_lists() {
    let mapping = json!({ "image": "redis" });
    let descriptor = CubeDescriptor::from_mapping("cache", mapping.as_object().unwrap()).unwrap();
    assert!(descriptor.exposed_ports.is_empty());
    assert!(descriptor.port_bindings.is_empty());
}

#[test]
fn from_mapping_reports_cube_id_on_bad_port() {
    let mapping = json!({ "image": "redis", "portBindings": ["nope"] });
    let err = CubeDescriptor::from_mapping("cache", mapping.as_object().unwrap()).unwrap_err();
    match err {
        DescriptorError::InvalidMapping { id, message } => {
            assert_eq!(id, "cache");
            assert!(message.contains("nope"), "message: {}", message);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn duplicate_exposed_ports_collapse() {
    let mapping = json!({ "exposedPorts": ["8089/tcp", "8089/tcp", "8089/udp"] });
    let descriptor = CubeDescriptor::from_mapping("dup", mapping.as_object().unwrap()).unwrap();
    assert_eq!(descriptor.exposed_ports.len(), 2);
}

#[test]
fn first_binding_in_declaration_order_wins() {
    let descriptor = CubeDescriptor::new("multi", "img")
        .with_binding(PortBinding::new(9001, 8089, Protocol::Udp))
        .with_binding(PortBinding::new(9002, 8089, Protocol::Tcp));

    assert_eq!(descriptor.binding_for(8089).map(|b| b.host_port), Some(9001));
    assert_eq!(
        descriptor.binding_for_protocol(8089, Protocol::Tcp).map(|b| b.host_port),
        Some(9002)
    );
    assert!(descriptor.binding_for(8080).is_none());
}
