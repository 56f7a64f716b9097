// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::adapter::ConfigurationShape;
use serde_json::json;

#[test]
fn from_mappings_loads_each_cube() {
    let definitions = json!({
        "test": {
            "image": "tutum/tomcat:7.0",
            "exposedPorts": ["8089/tcp"],
            "portBindings": ["8090->8089/tcp"]
        },
        "db": { "image": "postgres:16" }
    });
    let store = DescriptorStore::from_mappings(&definitions).unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.lookup_descriptor("test").map(|d| d.image.as_str()), Some("tutum/tomcat:7.0"));
    assert_eq!(store.lookup_descriptor("db").map(|d| d.id.as_str()), Some("db"));
    assert!(store.lookup_descriptor("missing").is_none());
}

#[test]
fn from_mappings_rejects_non_mapping() {
    let err = DescriptorStore::from_mappings(&json!(["test"])).unwrap_err();
    assert!(matches!(err, RegistryError::NotAMapping));

    let err = DescriptorStore::from_mappings(&json!({ "test": "tomcat" })).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Descriptor(DescriptorError::InvalidMapping { ref id, .. }) if id == "test"
    ));
}

#[test]
fn duplicate_cube_is_rejected() {
    let mut store = DescriptorStore::new();
    store.insert(CubeDescriptor::new("test", "a")).unwrap();
    let err = store.insert(CubeDescriptor::new("test", "b")).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateCube(ref id) if id == "test"));
    assert_eq!(store.lookup_descriptor("test").map(|d| d.image.as_str()), Some("a"));
}

#[test]
fn lookup_is_exact_match() {
    let mut registry = AdapterRegistry::new();
    registry.register(AdapterRecord::new("test", ConfigurationShape::default())).unwrap();

    assert!(registry.lookup_adapter("test").is_some());
    assert!(registry.lookup_adapter("Test").is_none());
    assert!(registry.lookup_adapter("test ").is_none());
}

#[test]
fn register_returns_shared_handle() {
    let mut registry = AdapterRegistry::new();
    let handle = registry.register(AdapterRecord::new("test", ConfigurationShape::default())).unwrap();

    handle.lock().properties.set("port", "9000");

    let looked_up = registry.lookup_adapter("test").unwrap();
    assert_eq!(looked_up.lock().properties.get("port"), Some("9000"));
}

#[test]
fn duplicate_adapter_is_rejected() {
    let mut registry = AdapterRegistry::new();
    registry.register(AdapterRecord::new("test", ConfigurationShape::default())).unwrap();
    let err = registry
        .register(AdapterRecord::new("test", ConfigurationShape::default()))
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateAdapter(ref name) if name == "test"));
    assert_eq!(registry.len(), 1);
}
