// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod error;
pub mod mco;
pub mod types;
pub mod wait;

#[cfg(test)]
pub mod test_utils;

pub use error::{McoError, Result};
pub use mco::{MachineConfigPoolBuilder, McpOption};
pub use types::MachineConfigPool;
