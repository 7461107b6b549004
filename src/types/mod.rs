// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed custom resources managed by this crate.

pub mod machine_config_pool;

pub use machine_config_pool::{
    MachineConfigPool, MachineConfigPoolCondition, MachineConfigPoolSpec, MachineConfigPoolStatus,
    MachineConfigPoolStatusConfiguration,
};
