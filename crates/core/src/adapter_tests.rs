// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn tomcat_shape() -> ConfigurationShape {
    crate::configuration_shape! {
        port: Int = 8089,
        myHost: Str = "localhost",
        debug: Bool = false,
    }
}

#[test]
fn shape_macro_preserves_order_and_kinds() {
    let shape = tomcat_shape();
    let names: Vec<_> = shape.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["port", "myHost", "debug"]);
    assert_eq!(shape.field("port").map(ConfigField::kind), Some(FieldKind::Int));
    assert_eq!(shape.field("myHost").map(ConfigField::kind), Some(FieldKind::Str));
    assert_eq!(shape.field("debug").map(ConfigField::kind), Some(FieldKind::Bool));
    assert!(shape.field("missing").is_none());
}

#[yare::parameterized(
    int  = { FieldValue::Int(8089),                    "8089" },
    str  = { FieldValue::Str("localhost".to_string()), "localhost" },
    bool = { FieldValue::Bool(true),                   "true" },
)]
fn field_value_renders_as_property_text(value: FieldValue, expected: &str) {
    assert_eq!(value.to_string(), expected);
}

#[test]
fn current_value_prefers_explicit_property() {
    let record = AdapterRecord::new("test", tomcat_shape()).with_property("myHost", "10.0.10.1");
    assert_eq!(record.current_value("myHost").as_deref(), Some("10.0.10.1"));
    assert_eq!(record.current_value("port").as_deref(), Some("8089"));
    assert_eq!(record.current_value("nope"), None);
}

#[test]
fn set_does_not_log_override() {
    let mut props = ContainerProperties::new();
    props.set("port", "8090");
    assert!(props.has("port"));
    assert!(props.overrides().is_empty());
}

#[test]
fn override_property_writes_and_logs() {
    let mut props: ContainerProperties = [("myHost", "dockerServerIp")].into_iter().collect();
    props.override_property("myHost", "192.168.0.1");

    assert_eq!(props.get("myHost"), Some("192.168.0.1"));
    assert_eq!(props.len(), 1);
    assert_eq!(props.overrides(), &[PropertyOverride::new("myHost", "192.168.0.1")]);
}

#[test]
fn record_deserializes_from_json() {
    let json = r#"{
        "name": "test",
        "shape": [
            { "name": "port", "default": 8089 },
            { "name": "myHost", "default": "localhost" }
        ],
        "properties": { "port": "9000" }
    }"#;
    let record: AdapterRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.shape.field("port").map(|f| &f.default), Some(&FieldValue::Int(8089)));
    assert_eq!(record.properties.get("port"), Some("9000"));
}
