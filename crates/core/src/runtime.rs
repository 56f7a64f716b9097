// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime facts about the Docker host, abstracted for testing

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Operating system family of the machine running the tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Linux,
    Mac,
    Windows,
    Unix,
}

crate::simple_display! {
    OsFamily {
        Linux => "linux",
        Mac => "mac",
        Windows => "windows",
        Unix => "unix",
    }
}

impl FromStr for OsFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linux" => Ok(OsFamily::Linux),
            "mac" | "macos" | "darwin" => Ok(OsFamily::Mac),
            "windows" => Ok(OsFamily::Windows),
            "unix" => Ok(OsFamily::Unix),
            other => Err(format!("unknown os family '{}'", other)),
        }
    }
}

/// Source of the two runtime facts reconciliation depends on
pub trait RuntimeContext: Send + Sync {
    fn current_os_family(&self) -> OsFamily;

    /// Address at which the Docker daemon (and its published ports) is
    /// reachable. Empty when unknown.
    fn docker_server_address(&self) -> String;
}

/// Fixed runtime facts, resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticRuntime {
    pub os_family: OsFamily,
    #[serde(default)]
    pub docker_server_address: String,
}

impl StaticRuntime {
    pub fn new(os_family: OsFamily, docker_server_address: impl Into<String>) -> Self {
        Self { os_family, docker_server_address: docker_server_address.into() }
    }
}

impl RuntimeContext for StaticRuntime {
    fn current_os_family(&self) -> OsFamily {
        self.os_family
    }

    fn docker_server_address(&self) -> String {
        self.docker_server_address.clone()
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeRuntime;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{OsFamily, RuntimeContext};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Fake runtime for testing with controllable facts
    #[derive(Clone)]
    pub struct FakeRuntime {
        os_family: Arc<Mutex<OsFamily>>,
        address: Arc<Mutex<String>>,
        address_reads: Arc<Mutex<usize>>,
    }

    impl FakeRuntime {
        pub fn new(os_family: OsFamily, address: impl Into<String>) -> Self {
            Self {
                os_family: Arc::new(Mutex::new(os_family)),
                address: Arc::new(Mutex::new(address.into())),
                address_reads: Arc::new(Mutex::new(0)),
            }
        }

        pub fn set_os_family(&self, os_family: OsFamily) {
            *self.os_family.lock() = os_family;
        }

        pub fn set_docker_server_address(&self, address: impl Into<String>) {
            *self.address.lock() = address.into();
        }

        /// Number of times the docker server address was asked for
        pub fn address_reads(&self) -> usize {
            *self.address_reads.lock()
        }
    }

    impl Default for FakeRuntime {
        fn default() -> Self {
            Self::new(OsFamily::Linux, "")
        }
    }

    impl RuntimeContext for FakeRuntime {
        fn current_os_family(&self) -> OsFamily {
            *self.os_family.lock()
        }

        fn docker_server_address(&self) -> String {
            *self.address_reads.lock() += 1;
            self.address.lock().clone()
        }
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
