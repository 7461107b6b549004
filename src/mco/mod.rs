// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Builders for machine-config operator resources.

pub mod pool;

pub use pool::{MachineConfigPoolBuilder, McpOption};
