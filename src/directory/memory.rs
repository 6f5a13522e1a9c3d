use std::collections::BTreeMap;

use tokio::sync::Mutex;

use super::error::DirectoryError;
use super::model::{PutAlarmRequest, RemoteAlarm};
use super::AlarmDirectory;

/// In-process directory used when simulation mode is enabled. Mirrors the
/// backend's replace-on-create and delete-missing-is-ok semantics.
pub struct InMemoryAlarmDirectory {
    alarms: Mutex<BTreeMap<String, PutAlarmRequest>>,
}

impl InMemoryAlarmDirectory {
    pub fn new() -> Self {
        Self {
            alarms: Mutex::new(BTreeMap::new()),
        }
    }
}

impl Default for InMemoryAlarmDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl AlarmDirectory for InMemoryAlarmDirectory {
    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<RemoteAlarm>, DirectoryError> {
        let alarms = self.alarms.lock().await;
        Ok(alarms
            .values()
            .filter(|request| request.alarm_name.starts_with(prefix))
            .map(|request| RemoteAlarm {
                alarm_name: request.alarm_name.clone(),
                dimensions: request.dimensions.clone(),
            })
            .collect())
    }

    async fn delete_batch(&self, names: &[String]) -> Result<(), DirectoryError> {
        let mut alarms = self.alarms.lock().await;
        for name in names {
            alarms.remove(name);
        }
        Ok(())
    }

    async fn create_one(&self, request: &PutAlarmRequest) -> Result<(), DirectoryError> {
        let mut alarms = self.alarms.lock().await;
        alarms.insert(request.alarm_name.clone(), request.clone());
        Ok(())
    }
}
