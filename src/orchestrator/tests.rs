use serde_json::json;

use crate::config::Config;
use crate::directory::mock::MockAlarmDirectory;
use crate::swap::SwapError;
use crate::templates::TemplateRegistry;

use super::{handle_deployment_event, DeploymentContext, HandleError};

fn test_config() -> Config {
    Config {
        alert_topic: "arn:alerts:anomaly-detection".to_string(),
        listen_addr: "127.0.0.1:8080".to_string(),
        metric_types: vec![
            "CPU".to_string(),
            "StatusCheck".to_string(),
            "Memory".to_string(),
        ],
        monitoring: Default::default(),
        retry: Default::default(),
        simulation: Default::default(),
    }
}

fn bare_event() -> serde_json::Value {
    json!({
        "deploymentId": "d1",
        "applicationName": "app",
        "deploymentGroupName": "g1"
    })
}

#[test]
fn resource_name_is_composed_from_group_and_deployment() {
    let context = DeploymentContext::from_event(&bare_event()).expect("event parses");
    assert_eq!(context.resource_name, "CodeDeploy_g1_d1");
}

#[test]
fn envelope_wrapped_event_is_unwrapped() {
    let envelope = json!({
        "Records": [{
            "Sns": {
                "Message": bare_event().to_string()
            }
        }]
    });

    let context = DeploymentContext::from_event(&envelope).expect("envelope parses");
    assert_eq!(context.deployment_id, "d1");
    assert_eq!(context.resource_name, "CodeDeploy_g1_d1");
}

#[test]
fn missing_field_is_a_malformed_event() {
    let event = json!({ "deploymentId": "d1", "applicationName": "app" });
    let error = DeploymentContext::from_event(&event).expect_err("group name is required");
    assert!(matches!(error, HandleError::MalformedEvent(_)));
}

#[test]
fn empty_field_is_a_malformed_event() {
    let event = json!({
        "deploymentId": "  ",
        "applicationName": "app",
        "deploymentGroupName": "g1"
    });
    let error = DeploymentContext::from_event(&event).expect_err("blank id is rejected");
    assert!(matches!(error, HandleError::MalformedEvent(_)));
}

#[test]
fn envelope_without_message_is_a_malformed_event() {
    let envelope = json!({ "Records": [{ "Sns": {} }] });
    let error = DeploymentContext::from_event(&envelope).expect_err("message is required");
    assert!(matches!(error, HandleError::MalformedEvent(_)));
}

#[tokio::test]
async fn all_metric_types_are_swapped_in_configured_order() {
    let config = test_config();
    let registry = TemplateRegistry::builtin();
    let directory = MockAlarmDirectory::new();

    let outcome = handle_deployment_event(&registry, &directory, &config, &bare_event())
        .await
        .expect("handling succeeds");

    assert_eq!(outcome.resource_name, "CodeDeploy_g1_d1");
    assert_eq!(outcome.alarms.len(), 3);
    assert_eq!(
        outcome.alarms["CPU"].alarm_name,
        "ASG-HighCPUUtilization-d1"
    );
    assert_eq!(
        outcome.alarms["StatusCheck"].alarm_name,
        "ASG-StatusCheckFailed-d1"
    );
    assert_eq!(
        outcome.alarms["Memory"].alarm_name,
        "ASG-HighMemoryUtilization-d1"
    );
    assert!(outcome.alarms.values().all(|result| result.status == "created"));

    let created: Vec<String> = directory
        .create_requests()
        .into_iter()
        .map(|request| request.alarm_name)
        .collect();
    assert_eq!(
        created,
        vec![
            "ASG-HighCPUUtilization-d1".to_string(),
            "ASG-StatusCheckFailed-d1".to_string(),
            "ASG-HighMemoryUtilization-d1".to_string(),
        ]
    );
}

#[tokio::test]
async fn create_failure_aborts_before_later_metric_types() {
    let config = test_config();
    let registry = TemplateRegistry::builtin();
    let directory = MockAlarmDirectory::new().failing_create();

    let error = handle_deployment_event(&registry, &directory, &config, &bare_event())
        .await
        .expect_err("create failure propagates");

    match error {
        HandleError::Swap {
            metric_type,
            source: SwapError::Create { .. },
        } => assert_eq!(metric_type, "CPU"),
        other => panic!("unexpected error: {other}"),
    }

    // Only the first metric type was attempted.
    assert_eq!(directory.create_requests().len(), 1);
}

#[tokio::test]
async fn unknown_configured_metric_type_fails_the_invocation() {
    let mut config = test_config();
    config.metric_types = vec!["CPU".to_string(), "Disk".to_string()];
    let registry = TemplateRegistry::builtin();
    let directory = MockAlarmDirectory::new();

    let error = handle_deployment_event(&registry, &directory, &config, &bare_event())
        .await
        .expect_err("Disk is not a supported metric type");

    assert!(matches!(
        error,
        HandleError::Swap {
            source: SwapError::UnknownMetricType(_),
            ..
        }
    ));
    assert_eq!(directory.create_requests().len(), 1);
}

#[test]
fn outcome_serializes_to_the_documented_payload() {
    let outcome = super::DeploymentOutcome {
        message: "alarms provisioned for deployment".to_string(),
        resource_name: "CodeDeploy_g1_d1".to_string(),
        alarms: [(
            "CPU".to_string(),
            super::AlarmResult {
                alarm_name: "ASG-HighCPUUtilization-d1".to_string(),
                status: "created",
            },
        )]
        .into(),
    };

    let value = serde_json::to_value(&outcome).expect("serializes");
    assert_eq!(value["resourceName"], "CodeDeploy_g1_d1");
    assert_eq!(value["alarms"]["CPU"]["alarmName"], "ASG-HighCPUUtilization-d1");
    assert_eq!(value["alarms"]["CPU"]["status"], "created");
}
