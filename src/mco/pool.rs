// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! MachineConfigPool builder: create, delete and watch a pool through the cluster API.

use crate::config::Config;
use crate::constants::conditions::{UPDATED, UPDATING};
use crate::constants::{poll::DEFAULT_INTERVAL, RESOURCE_KIND};
use crate::error::{McoError, Result};
use crate::types::{MachineConfigPool, MachineConfigPoolSpec};
use crate::wait::poll_immediate;
use kube::{
    api::{DeleteParams, PostParams},
    Api, Client, ResourceExt,
};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Mutation applied to a builder by [`MachineConfigPoolBuilder::with_options`]
pub type McpOption = Box<dyn FnOnce(&mut MachineConfigPoolBuilder) -> Result<()> + Send>;

/// Local handle on a single MachineConfigPool.
///
/// Holds the desired definition, the last object observed on the cluster and
/// a validation error that, once recorded, fails every later operation
/// without contacting the API server.
pub struct MachineConfigPoolBuilder {
    /// Desired state, used to create the pool
    pub definition: MachineConfigPool,
    /// Pool as last fetched from the cluster, `None` if the last fetch found nothing
    pub object: Option<MachineConfigPool>,
    client: Client,
    error_msg: Option<String>,
    poll_interval: Duration,
}

impl MachineConfigPoolBuilder {
    pub fn new(client: Client, name: &str) -> Self {
        debug!("Initializing new {} builder with name: {}", RESOURCE_KIND, name);

        let mut builder = Self {
            definition: MachineConfigPool::new(name, MachineConfigPoolSpec::default()),
            object: None,
            client,
            error_msg: None,
            poll_interval: DEFAULT_INTERVAL,
        };

        if name.is_empty() {
            debug!("The name of the {} is empty", RESOURCE_KIND);
            builder.error_msg = Some(format!("{} 'name' cannot be empty", RESOURCE_KIND));
        }

        builder
    }

    /// Load an existing pool from the cluster into a new builder
    #[instrument(skip(client))]
    pub async fn pull(client: Client, name: &str) -> Result<Self> {
        let mut builder = Self::new(client, name);
        builder.validate()?;

        debug!("Pulling existing {} {} from cluster", RESOURCE_KIND, name);

        if !builder.refresh().await? {
            return Err(McoError::NotFound(name.to_string()));
        }
        if let Some(pool) = builder.object.clone() {
            builder.definition = pool;
        }

        Ok(builder)
    }

    /// Override the interval between two samples in the wait operations
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        if self.validate().is_err() {
            return self;
        }

        if interval.is_zero() {
            self.error_msg = Some(format!(
                "{} poll interval must be greater than zero",
                RESOURCE_KIND
            ));
            return self;
        }

        self.poll_interval = interval;
        self
    }

    pub fn with_config(self, config: &Config) -> Self {
        self.with_poll_interval(config.poll_interval)
    }

    /// Set the machineConfigSelector labels of the pool
    pub fn with_mc_selector(mut self, labels: BTreeMap<String, String>) -> Self {
        if self.validate().is_err() {
            return self;
        }

        debug!("Setting machineConfigSelector labels: {:?}", labels);

        if labels.is_empty() {
            self.error_msg =
                Some("'machineConfigSelector MatchLabels' field cannot be empty".to_string());
            return self;
        }

        self.definition
            .spec
            .machine_config_selector
            .get_or_insert_with(Default::default)
            .match_labels = Some(labels);

        self
    }

    /// Apply mutation functions in order, recording the first failure as the builder error
    pub fn with_options(mut self, options: impl IntoIterator<Item = McpOption>) -> Self {
        if self.validate().is_err() {
            return self;
        }

        debug!("Applying additional {} options", RESOURCE_KIND);

        for option in options {
            if let Err(e) = option(&mut self) {
                debug!("Error occurred in mutation function: {}", e);
                self.error_msg = Some(e.to_string());
                return self;
            }
        }

        self
    }

    /// Create the pool unless it already exists, storing the resulting object
    #[instrument(skip(self), fields(pool = %self.definition.name_any()))]
    pub async fn create(&mut self) -> Result<&mut Self> {
        self.validate()?;

        debug!("Creating the {} {}", RESOURCE_KIND, self.name());

        if self.refresh().await? {
            debug!("{} {} already exists", RESOURCE_KIND, self.name());
            return Ok(self);
        }

        let created = self
            .api()
            .create(&PostParams::default(), &self.definition)
            .await?;
        info!("{} {} created", RESOURCE_KIND, created.name_any());
        self.object = Some(created);

        Ok(self)
    }

    /// Delete the pool from the cluster
    #[instrument(skip(self), fields(pool = %self.definition.name_any()))]
    pub async fn delete(&mut self) -> Result<()> {
        self.validate()?;

        let name = self.name();
        debug!("Deleting the {} {}", RESOURCE_KIND, name);

        if !self.refresh().await.map_err(McoError::DeleteFailed)? {
            return Err(McoError::DoesNotExist);
        }

        self.api()
            .delete(&name, &DeleteParams::default())
            .await
            .map_err(McoError::DeleteFailed)?;

        info!("{} {} deleted", RESOURCE_KIND, name);
        self.object = None;

        Ok(())
    }

    /// Check whether the pool exists, refreshing the cached object.
    /// Any failure to fetch the pool counts as absent.
    #[instrument(skip(self), fields(pool = %self.definition.name_any()))]
    pub async fn exists(&mut self) -> bool {
        if self.validate().is_err() {
            return false;
        }

        debug!("Checking if the {} {} exists", RESOURCE_KIND, self.name());

        match self.refresh().await {
            Ok(found) => found,
            Err(e) => {
                debug!("Failed to get {} {}: {}", RESOURCE_KIND, self.name(), e);
                false
            }
        }
    }

    /// Refresh the pool and check whether the given condition is "True"
    #[instrument(skip(self), fields(pool = %self.definition.name_any()))]
    pub async fn is_in_condition(&mut self, condition_type: &str) -> bool {
        if !self.exists().await {
            return false;
        }

        self.object
            .as_ref()
            .is_some_and(|pool| pool.is_in_condition(condition_type))
    }

    /// Wait until the pool reports the condition with the expected status
    #[instrument(skip(self), fields(pool = %self.definition.name_any()))]
    pub async fn wait_to_be_in_condition(
        &mut self,
        condition_type: &str,
        status: &str,
        timeout: Duration,
    ) -> Result<()> {
        self.validate()?;

        debug!(
            "Waiting up to {:?} until {} condition {} is {}",
            timeout, RESOURCE_KIND, condition_type, status
        );

        self.wait_for(timeout, |pool| pool.has_condition(condition_type, status))
            .await
    }

    /// Wait for an update in progress to finish.
    ///
    /// The pool is sampled once; if it is not "Updating" at that instant this
    /// returns right away.
    #[instrument(skip(self), fields(pool = %self.definition.name_any()))]
    pub async fn wait_for_update(&mut self, timeout: Duration) -> Result<()> {
        self.validate()?;

        self.object = None;
        let current = self.api().get(&self.name()).await?;
        let updating = current.is_in_condition(UPDATING);
        self.object = Some(current);

        if !updating {
            debug!("{} {} is not updating", RESOURCE_KIND, self.name());
            return Ok(());
        }

        debug!(
            "Waiting up to {:?} until updating {} {} is updated",
            timeout,
            RESOURCE_KIND,
            self.name()
        );

        self.wait_for(timeout, |pool| pool.is_in_condition(UPDATED))
            .await
    }

    /// Wait until the pool stays stable for a whole `stable_duration`, or `timeout` elapses.
    ///
    /// Every window that observes an unstable sample is abandoned and a new
    /// window starts at the next interval.
    #[instrument(skip(self), fields(pool = %self.definition.name_any()))]
    pub async fn wait_to_be_stable_for(
        &mut self,
        stable_duration: Duration,
        timeout: Duration,
    ) -> Result<()> {
        self.validate()?;

        debug!(
            "Waiting up to {:?} for {} to be stable for {:?}",
            timeout, RESOURCE_KIND, stable_duration
        );

        let api = &self.api();
        let name = self.name();
        let name = name.as_str();
        let interval = self.poll_interval;
        let last = &RefCell::new(self.object.take());

        let result = poll_immediate(interval, timeout, || async move {
            let stable = observe_stability(api, name, last, interval, stable_duration).await?;
            if !stable {
                debug!(
                    "{} was not stable during {:?}, retrying",
                    RESOURCE_KIND, stable_duration
                );
            }
            Ok(stable)
        })
        .await;

        self.object = last.take();

        match &result {
            Ok(()) => info!("{} {} was stable during {:?}", RESOURCE_KIND, name, stable_duration),
            Err(e) => warn!(
                "{} {} did not stay stable for {:?}: {}",
                RESOURCE_KIND, name, stable_duration, e
            ),
        }

        result
    }

    fn validate(&self) -> Result<()> {
        if let Some(msg) = &self.error_msg {
            debug!("The {} builder has error message: {}", RESOURCE_KIND, msg);
            return Err(McoError::Invalid(msg.clone()));
        }

        if self.definition.metadata.name.as_deref().unwrap_or_default().is_empty() {
            debug!("The {} is undefined", RESOURCE_KIND);
            return Err(McoError::Invalid(format!(
                "{} 'name' cannot be empty",
                RESOURCE_KIND
            )));
        }

        Ok(())
    }

    fn api(&self) -> Api<MachineConfigPool> {
        Api::all(self.client.clone())
    }

    fn name(&self) -> String {
        self.definition.name_any()
    }

    /// Fetch the pool into `object`, returning whether it exists
    async fn refresh(&mut self) -> std::result::Result<bool, kube::Error> {
        self.object = None;
        self.object = self.api().get_opt(&self.name()).await?;
        Ok(self.object.is_some())
    }

    /// Poll the pool until `predicate` holds, keeping the last sample in `object`.
    /// Fetch errors count as "not yet".
    async fn wait_for<P>(&mut self, timeout: Duration, predicate: P) -> Result<()>
    where
        P: Fn(&MachineConfigPool) -> bool,
    {
        let api = &self.api();
        let name = self.name();
        let name = name.as_str();
        let predicate = &predicate;
        let last = &RefCell::new(self.object.take());

        let result = poll_immediate(self.poll_interval, timeout, || async move {
            let pool = fetch_sample(api, name, last).await;
            Ok(pool.as_ref().is_some_and(|pool| predicate(pool)))
        })
        .await;

        self.object = last.take();
        result
    }
}

/// Fetch the pool, recording the result in `last`. A failed fetch yields `None`.
async fn fetch_sample(
    api: &Api<MachineConfigPool>,
    name: &str,
    last: &RefCell<Option<MachineConfigPool>>,
) -> Option<MachineConfigPool> {
    let pool = match api.get(name).await {
        Ok(pool) => Some(pool),
        Err(e) => {
            debug!("Failed to get {} {}, retrying: {}", RESOURCE_KIND, name, e);
            None
        }
    };
    last.replace(pool.clone());
    pool
}

/// Sample the pool every `interval` for `window`.
/// Returns `false` as soon as one sample is unstable.
async fn observe_stability(
    api: &Api<MachineConfigPool>,
    name: &str,
    last: &RefCell<Option<MachineConfigPool>>,
    interval: Duration,
    window: Duration,
) -> Result<bool> {
    let unstable = poll_immediate(interval, window, || async move {
        let Some(pool) = fetch_sample(api, name, last).await else {
            return Ok(false);
        };

        if pool.is_stable() {
            return Ok(false);
        }

        if let Some(status) = pool.status.as_ref() {
            debug!(
                "{} {} is degraded or has a mismatch in machineCount: {} vs \
                 updatedMachineCount: {} vs readyMachineCount: {}, degradedMachineCount: {}",
                RESOURCE_KIND,
                name,
                status.machine_count,
                status.updated_machine_count,
                status.ready_machine_count,
                status.degraded_machine_count
            );
        }
        Ok(true)
    })
    .await;

    match unstable {
        Ok(()) => Ok(false),
        Err(McoError::Timeout) => Ok(true),
        Err(e) => Err(e),
    }
}
