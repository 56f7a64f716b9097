// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle notifications delivered to the reconciler.

use serde::{Deserialize, Serialize};

/// Fired once per container, immediately before its adapter starts it.
///
/// The caller must not start the container until handling returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeforeSetup {
    /// Registered adapter name, which is also the cube id.
    pub container: String,
}

impl BeforeSetup {
    pub fn new(container: impl Into<String>) -> Self {
        Self { container: container.into() }
    }

    pub fn log(&self) -> String {
        format!("container={}", self.container)
    }
}
