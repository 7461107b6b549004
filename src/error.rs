// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum McoError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    /// Sticky builder validation failure, reported verbatim.
    #[error("{0}")]
    Invalid(String),

    #[error("machineconfigpool object {0} doesn't exist")]
    NotFound(String),

    #[error("MachineConfigPool cannot be deleted because it does not exist")]
    DoesNotExist,

    #[error("cannot delete MachineConfigPool: {0}")]
    DeleteFailed(#[source] kube::Error),

    #[error("timed out waiting for the condition")]
    Timeout,

    #[error("Invalid builder option: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, McoError>;
