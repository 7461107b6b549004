// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::poll::{DEFAULT_INTERVAL, INTERVAL_ENV};
use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

/// Builder configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interval between two status samples in every wait operation
    pub poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            poll_interval: DEFAULT_INTERVAL,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_interval_value(env::var(INTERVAL_ENV).ok().as_deref())
    }

    fn from_interval_value(value: Option<&str>) -> Result<Self> {
        let Some(raw) = value else {
            return Ok(Config::default());
        };

        let secs: u64 = raw
            .trim()
            .parse()
            .with_context(|| {
                format!("{} must be a number of seconds, got '{}'", INTERVAL_ENV, raw)
            })?;
        if secs == 0 {
            bail!("{} must be greater than zero", INTERVAL_ENV);
        }

        Ok(Config {
            poll_interval: Duration::from_secs(secs),
        })
    }
}
