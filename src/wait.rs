// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Fixed-interval polling with a deadline.

use crate::error::{McoError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use tracing::trace;

/// Poll until a condition is met or the timeout is reached.
///
/// The check runs immediately and then once per `interval`, as long as the
/// next run still falls within `timeout`. It returns `Ok(true)` when the
/// condition is met, `Ok(false)` to keep polling, or `Err` to abort.
///
/// Returns [`McoError::Timeout`] when the condition was never met. A timeout
/// too large to be represented as an instant never expires.
pub async fn poll_immediate<F, Fut>(
    interval: Duration,
    timeout: Duration,
    mut check_fn: F,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let deadline = Instant::now().checked_add(timeout);

    loop {
        if check_fn().await? {
            return Ok(());
        }

        let Some(next) = Instant::now().checked_add(interval) else {
            return Err(McoError::Timeout);
        };
        if deadline.is_some_and(|deadline| next > deadline) {
            return Err(McoError::Timeout);
        }

        trace!("Polling condition not yet met, retrying in {:?}", interval);
        sleep_until(next).await;
    }
}
