// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cube-core: data model and collaborator interfaces for cube configuration
//! reconciliation.

pub mod macros;

pub mod adapter;
pub mod descriptor;
pub mod event;
pub mod registry;
pub mod runtime;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use adapter::{
    AdapterRecord, ConfigField, ConfigurationShape, ContainerProperties, FieldKind, FieldValue,
    PropertyOverride,
};
pub use descriptor::{CubeDescriptor, DescriptorError, ExposedPort, PortBinding, Protocol};
pub use event::BeforeSetup;
pub use registry::{AdapterRegistry, DescriptorStore, RegistryError, SharedAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use runtime::FakeRuntime;
pub use runtime::{OsFamily, RuntimeContext, StaticRuntime};
