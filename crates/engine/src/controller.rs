// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entry point for container lifecycle notifications.

use crate::reconcile::{Outcome, ReconcileError, Reconciler};
use cube_core::BeforeSetup;
use std::time::Instant;

/// Reconciles a container's adapter configuration when it is about to be
/// set up. Construct once per test run.
pub struct ContainerConfigurationController<'a> {
    reconciler: Reconciler<'a>,
}

impl<'a> ContainerConfigurationController<'a> {
    pub fn new(reconciler: Reconciler<'a>) -> Self {
        Self { reconciler }
    }

    /// Handle a [`BeforeSetup`] notification.
    ///
    /// Returns once every override is applied; the caller may then start
    /// the container with the adapter's current properties. An error means
    /// the container must not be started.
    pub fn on_before_setup(&self, event: &BeforeSetup) -> Result<Outcome, ReconcileError> {
        let start = Instant::now();
        let result = self.reconciler.reconcile(&event.container);
        let elapsed_us = start.elapsed().as_micros() as u64;
        match &result {
            Ok(Outcome::Applied(overrides)) => {
                tracing::debug!(overrides = overrides.len(), elapsed_us, "before setup {}", event.log())
            }
            Ok(Outcome::Skipped(reason)) => {
                tracing::debug!(%reason, elapsed_us, "before setup {}", event.log())
            }
            Err(e) => tracing::error!(error = %e, elapsed_us, "before setup failed {}", event.log()),
        }
        result
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
