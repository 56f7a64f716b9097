// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cube-engine: reconciles adapter configuration with the cube runtime
//! before a container under test is started.

pub mod config;
pub mod controller;
pub mod reconcile;

pub use config::{ConfigError, EmptyAddressPolicy, PortMatch, ReconcileConfig, DOCKER_SERVER_IP};
pub use controller::ContainerConfigurationController;
pub use reconcile::{Outcome, ReconcileError, Reconciler, SkipReason};
