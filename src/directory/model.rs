use serde::{Deserialize, Serialize};

use crate::templates::{ComparisonOperator, Statistic};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmDimension {
    pub name: String,
    pub value: String,
}

/// Read model of an alarm as the monitoring backend reports it. Alarms are
/// only ever deleted or created by name, never edited in place.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAlarm {
    pub alarm_name: String,
    #[serde(default)]
    pub dimensions: Vec<AlarmDimension>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PutAlarmRequest {
    pub alarm_name: String,
    pub alarm_description: String,
    pub metric_name: String,
    pub namespace: String,
    pub statistic: Statistic,
    pub period: u32,
    pub threshold: f64,
    pub comparison_operator: ComparisonOperator,
    pub evaluation_periods: u32,
    pub dimensions: Vec<AlarmDimension>,
    pub alarm_actions: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DescribeAlarmsRequest<'a> {
    pub alarm_name_prefix: &'a str,
    pub max_records: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DescribeAlarmsResponse {
    #[serde(default)]
    pub metric_alarms: Vec<RemoteAlarm>,
    #[serde(default)]
    pub next_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DeleteAlarmsRequest<'a> {
    pub alarm_names: &'a [String],
}
