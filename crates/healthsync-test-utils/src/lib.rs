// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for HealthSync integration tests.
//!
//! [`TestHarness`] stands up a mock portal backend, a client pointed at
//! it, and an isolated on-disk session, so tests can drive whole user
//! flows without a real server.

pub mod harness;

pub use harness::{TestHarness, TestHarnessBuilder};
