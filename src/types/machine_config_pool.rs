// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::CONDITION_TRUE;
use k8s_openapi::api::core::v1::ObjectReference;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, Time};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(
    group = "machineconfiguration.openshift.io",
    version = "v1",
    kind = "MachineConfigPool",
    plural = "machineconfigpools"
)]
#[kube(status = "MachineConfigPoolStatus")]
#[serde(rename_all = "camelCase")]
pub struct MachineConfigPoolSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine_config_selector: Option<LabelSelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<LabelSelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_unavailable: Option<IntOrString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<MachineConfigPoolStatusConfiguration>,
}

impl MachineConfigPool {
    /// Check if any status condition has the given type and status
    pub fn has_condition(&self, condition_type: &str, status: &str) -> bool {
        self.conditions()
            .iter()
            .any(|c| c.condition_type == condition_type && c.status == status)
    }

    /// Check if the condition of the given type is set to "True"
    pub fn is_in_condition(&self, condition_type: &str) -> bool {
        self.has_condition(condition_type, CONDITION_TRUE)
    }

    /// A pool is stable when every machine is ready and updated and none is degraded.
    /// A pool without status reports zero machines and is therefore stable.
    pub fn is_stable(&self) -> bool {
        let Some(status) = self.status.as_ref() else {
            return true;
        };

        status.ready_machine_count == status.machine_count
            && status.machine_count == status.updated_machine_count
            && status.degraded_machine_count == 0
    }

    fn conditions(&self) -> &[MachineConfigPoolCondition] {
        self.status
            .as_ref()
            .and_then(|s| s.conditions.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineConfigPoolStatusConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Vec<ObjectReference>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineConfigPoolStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<MachineConfigPoolStatusConfiguration>,
    #[serde(default)]
    pub machine_count: i32,
    #[serde(default)]
    pub updated_machine_count: i32,
    #[serde(default)]
    pub ready_machine_count: i32,
    #[serde(default)]
    pub unavailable_machine_count: i32,
    #[serde(default)]
    pub degraded_machine_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<MachineConfigPoolCondition>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineConfigPoolCondition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
