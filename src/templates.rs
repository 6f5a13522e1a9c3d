use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::directory::{AlarmDimension, PutAlarmRequest};

/// Dimension key every managed alarm is bound to.
pub const ASG_DIMENSION: &str = "AutoScalingGroupName";

#[derive(Debug, Error)]
#[error("unknown metric type: {0}")]
pub struct UnknownMetricType(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Statistic {
    Average,
    Maximum,
    Minimum,
    Sum,
    SampleCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComparisonOperator {
    GreaterThanThreshold,
    GreaterThanOrEqualToThreshold,
    LessThanThreshold,
    LessThanOrEqualToThreshold,
}

/// Static alarm specification for one metric type.
#[derive(Debug, Clone)]
pub struct AlarmTemplate {
    pub type_tag: &'static str,
    pub name_prefix: &'static str,
    pub description: &'static str,
    pub metric_name: &'static str,
    pub namespace: &'static str,
    pub statistic: Statistic,
    pub period_secs: u32,
    pub threshold: f64,
    pub comparison: ComparisonOperator,
    pub evaluation_periods: u32,
}

impl AlarmTemplate {
    /// Alarm name for one deployment. Deterministic so that a redelivered
    /// trigger resolves to the same name and create-overwrites converges.
    pub fn alarm_name(&self, deployment_id: &str) -> String {
        format!("{}-{}", self.name_prefix, deployment_id)
    }

    pub fn put_request(
        &self,
        deployment_id: &str,
        resource_name: &str,
        alert_topic: &str,
    ) -> PutAlarmRequest {
        PutAlarmRequest {
            alarm_name: self.alarm_name(deployment_id),
            alarm_description: self.description.to_string(),
            metric_name: self.metric_name.to_string(),
            namespace: self.namespace.to_string(),
            statistic: self.statistic,
            period: self.period_secs,
            threshold: self.threshold,
            comparison_operator: self.comparison,
            evaluation_periods: self.evaluation_periods,
            dimensions: vec![AlarmDimension {
                name: ASG_DIMENSION.to_string(),
                value: resource_name.to_string(),
            }],
            alarm_actions: vec![alert_topic.to_string()],
        }
    }
}

/// Closed set of supported metric types, built once at startup.
pub struct TemplateRegistry {
    templates: HashMap<&'static str, AlarmTemplate>,
}

impl TemplateRegistry {
    pub fn builtin() -> Self {
        let templates = [
            AlarmTemplate {
                type_tag: "CPU",
                name_prefix: "ASG-HighCPUUtilization",
                description: "Alarm when CPU exceeds 70%",
                metric_name: "CPUUtilization",
                namespace: "AWS/EC2",
                statistic: Statistic::Average,
                period_secs: 300,
                threshold: 70.0,
                comparison: ComparisonOperator::GreaterThanThreshold,
                evaluation_periods: 2,
            },
            AlarmTemplate {
                type_tag: "StatusCheck",
                name_prefix: "ASG-StatusCheckFailed",
                description: "Monitor status checks for the AutoScalingGroup",
                metric_name: "StatusCheckFailed",
                namespace: "AWS/EC2",
                statistic: Statistic::Maximum,
                period_secs: 300,
                threshold: 1.0,
                comparison: ComparisonOperator::GreaterThanOrEqualToThreshold,
                evaluation_periods: 2,
            },
            AlarmTemplate {
                type_tag: "Memory",
                name_prefix: "ASG-HighMemoryUtilization",
                description: "Alarm when memory usage exceeds 70%",
                metric_name: "mem_used_percent",
                namespace: "CWAgent",
                statistic: Statistic::Average,
                period_secs: 300,
                threshold: 70.0,
                comparison: ComparisonOperator::GreaterThanThreshold,
                evaluation_periods: 2,
            },
        ];

        Self {
            templates: templates
                .into_iter()
                .map(|template| (template.type_tag, template))
                .collect(),
        }
    }

    /// Consulted before any remote call so an unknown type fails fast
    /// without touching remote state.
    pub fn lookup(&self, type_tag: &str) -> Result<&AlarmTemplate, UnknownMetricType> {
        self.templates
            .get(type_tag)
            .ok_or_else(|| UnknownMetricType(type_tag.to_string()))
    }
}
