use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::directory::AlarmDirectory;
use crate::swap::{swap_alarm, SwapError};
use crate::templates::TemplateRegistry;

#[derive(Debug, Error)]
pub enum HandleError {
    #[error("malformed deployment event: {0}")]
    MalformedEvent(String),
    #[error("alarm swap failed for metric type {metric_type}: {source}")]
    Swap {
        metric_type: String,
        source: SwapError,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeploymentNotification {
    deployment_id: String,
    application_name: String,
    deployment_group_name: String,
}

/// Identifiers for one deployment event. Built once per invocation,
/// read-only afterwards, never persisted.
#[derive(Debug, Clone)]
pub struct DeploymentContext {
    pub deployment_id: String,
    pub application_name: String,
    pub deployment_group_name: String,
    pub resource_name: String,
}

impl DeploymentContext {
    /// Accepts either the bare notification payload or the bus envelope
    /// (`Records[0].Sns.Message` carrying the payload as a JSON string).
    pub fn from_event(event: &serde_json::Value) -> Result<Self, HandleError> {
        let message = match event.get("Records") {
            Some(records) => {
                let raw = records
                    .get(0)
                    .and_then(|record| record.get("Sns"))
                    .and_then(|sns| sns.get("Message"))
                    .and_then(|message| message.as_str())
                    .ok_or_else(|| {
                        HandleError::MalformedEvent(
                            "envelope is missing Records[0].Sns.Message".to_string(),
                        )
                    })?;
                serde_json::from_str(raw)
                    .map_err(|error| HandleError::MalformedEvent(error.to_string()))?
            }
            None => event.clone(),
        };

        let notification: DeploymentNotification = serde_json::from_value(message)
            .map_err(|error| HandleError::MalformedEvent(error.to_string()))?;

        for (field, value) in [
            ("deploymentId", &notification.deployment_id),
            ("applicationName", &notification.application_name),
            ("deploymentGroupName", &notification.deployment_group_name),
        ] {
            if value.trim().is_empty() {
                return Err(HandleError::MalformedEvent(format!(
                    "{field} must not be empty"
                )));
            }
        }

        let resource_name = format!(
            "CodeDeploy_{}_{}",
            notification.deployment_group_name, notification.deployment_id
        );

        Ok(Self {
            deployment_id: notification.deployment_id,
            application_name: notification.application_name,
            deployment_group_name: notification.deployment_group_name,
            resource_name,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AlarmResult {
    #[serde(rename = "alarmName")]
    pub alarm_name: String,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DeploymentOutcome {
    pub message: String,
    #[serde(rename = "resourceName")]
    pub resource_name: String,
    pub alarms: BTreeMap<String, AlarmResult>,
}

/// Swap every configured metric type for the deployment described by
/// `event`, strictly in the configured order.
///
/// Sequential processing is load-bearing: it bounds concurrency against the
/// monitoring backend and keeps failure attribution per metric type. The
/// first swap failure aborts the loop; alarms already swapped stay in their
/// new state.
pub async fn handle_deployment_event<D: AlarmDirectory>(
    registry: &TemplateRegistry,
    directory: &D,
    config: &Config,
    event: &serde_json::Value,
) -> Result<DeploymentOutcome, HandleError> {
    let context = DeploymentContext::from_event(event)?;

    log::info!(
        "deployment_event_received deployment_id={} application={} group={} resource={}",
        context.deployment_id,
        context.application_name,
        context.deployment_group_name,
        context.resource_name
    );

    let mut alarms = BTreeMap::new();

    for metric_type in &config.metric_types {
        let alarm_name = swap_alarm(
            registry,
            directory,
            &config.alert_topic,
            metric_type,
            &context.deployment_id,
            &context.resource_name,
        )
        .await
        .map_err(|source| HandleError::Swap {
            metric_type: metric_type.clone(),
            source,
        })?;

        tracing::info!(
            target: "orchestrator",
            metric_type = %metric_type,
            alarm_name = %alarm_name,
            resource_name = %context.resource_name,
            "alarm_swapped"
        );

        alarms.insert(
            metric_type.clone(),
            AlarmResult {
                alarm_name,
                status: "created",
            },
        );
    }

    Ok(DeploymentOutcome {
        message: "alarms provisioned for deployment".to_string(),
        resource_name: context.resource_name,
        alarms,
    })
}

#[cfg(test)]
mod tests;
