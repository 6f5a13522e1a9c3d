use thiserror::Error;

use crate::directory::{AlarmDirectory, DirectoryError};
use crate::templates::{TemplateRegistry, UnknownMetricType, ASG_DIMENSION};

#[derive(Debug, Error)]
pub enum SwapError {
    #[error(transparent)]
    UnknownMetricType(#[from] UnknownMetricType),
    #[error("failed to create alarm {alarm_name}: {source}")]
    Create {
        alarm_name: String,
        source: DirectoryError,
    },
}

/// Replace the alarm for one metric type with a fresh one for this
/// deployment: list stale alarms under the type's prefix, delete them,
/// create the new alarm.
///
/// Cleanup failures are logged and swallowed so a pile of stale alarms can
/// never block provisioning of new coverage; a create failure propagates.
/// There is no transactional window: between delete and create no alarm of
/// this type exists for the resource.
pub async fn swap_alarm<D: AlarmDirectory>(
    registry: &TemplateRegistry,
    directory: &D,
    alert_topic: &str,
    type_tag: &str,
    deployment_id: &str,
    resource_name: &str,
) -> Result<String, SwapError> {
    let template = registry.lookup(type_tag)?;
    let prefix = format!("{}-", template.name_prefix);

    match directory.list_by_prefix(&prefix).await {
        Ok(candidates) => {
            // Every alarm under the prefix carrying the group dimension key
            // is treated as stale, regardless of which deployment created
            // it. Matches the long-observed production behavior; see
            // DESIGN.md before narrowing this to a value comparison.
            let stale: Vec<String> = candidates
                .iter()
                .filter(|alarm| {
                    alarm.alarm_name.starts_with(&prefix)
                        && alarm
                            .dimensions
                            .iter()
                            .any(|dimension| dimension.name == ASG_DIMENSION)
                })
                .map(|alarm| alarm.alarm_name.clone())
                .collect();

            if !stale.is_empty() {
                match directory.delete_batch(&stale).await {
                    Ok(()) => {
                        log::info!(
                            "stale_alarms_deleted metric_type={} count={}",
                            type_tag,
                            stale.len()
                        );
                    }
                    Err(error) => {
                        log::warn!(
                            "stale_alarm_delete_failed metric_type={} count={} error={}",
                            type_tag,
                            stale.len(),
                            error
                        );
                    }
                }
            }
        }
        Err(error) => {
            log::warn!(
                "stale_alarm_list_failed metric_type={} error={}",
                type_tag,
                error
            );
        }
    }

    let request = template.put_request(deployment_id, resource_name, alert_topic);
    let alarm_name = request.alarm_name.clone();

    directory
        .create_one(&request)
        .await
        .map_err(|source| SwapError::Create {
            alarm_name: alarm_name.clone(),
            source,
        })?;

    Ok(alarm_name)
}
