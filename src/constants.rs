// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;

/// Kind name used in log and error messages
pub const RESOURCE_KIND: &str = "MachineConfigPool";

/// Condition status value that marks a condition as set
pub const CONDITION_TRUE: &str = "True";

/// MachineConfigPool condition types reported by the machine-config operator
pub mod conditions {
    /// All machines in the pool run the target configuration
    pub const UPDATED: &str = "Updated";
    /// The pool is rolling out a new configuration
    pub const UPDATING: &str = "Updating";
    pub const DEGRADED: &str = "Degraded";
    pub const NODE_DEGRADED: &str = "NodeDegraded";
    pub const RENDER_DEGRADED: &str = "RenderDegraded";
}

/// Polling configuration
pub mod poll {
    use super::Duration;

    /// Interval between two samples of the pool status
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
    /// Environment variable overriding the interval, in seconds
    pub const INTERVAL_ENV: &str = "MCO_POLL_INTERVAL_SECS";
}
