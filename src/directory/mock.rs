use std::collections::BTreeMap;
use std::sync::Mutex;

use super::error::DirectoryError;
use super::model::{PutAlarmRequest, RemoteAlarm};
use super::AlarmDirectory;

#[derive(Default)]
struct MockState {
    alarms: BTreeMap<String, RemoteAlarm>,
    list_calls: Vec<String>,
    delete_batches: Vec<Vec<String>>,
    create_requests: Vec<PutAlarmRequest>,
}

/// Test directory that records every call and can fail on demand.
#[derive(Default)]
pub(crate) struct MockAlarmDirectory {
    state: Mutex<MockState>,
    fail_list: bool,
    fail_delete: bool,
    fail_create: bool,
}

impl MockAlarmDirectory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_alarms(alarms: Vec<RemoteAlarm>) -> Self {
        let directory = Self::new();
        {
            let mut state = directory.state.lock().expect("mock state poisoned");
            for alarm in alarms {
                state.alarms.insert(alarm.alarm_name.clone(), alarm);
            }
        }
        directory
    }

    pub(crate) fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub(crate) fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub(crate) fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub(crate) fn alarm_names(&self) -> Vec<String> {
        let state = self.state.lock().expect("mock state poisoned");
        state.alarms.keys().cloned().collect()
    }

    pub(crate) fn delete_batches(&self) -> Vec<Vec<String>> {
        let state = self.state.lock().expect("mock state poisoned");
        state.delete_batches.clone()
    }

    pub(crate) fn create_requests(&self) -> Vec<PutAlarmRequest> {
        let state = self.state.lock().expect("mock state poisoned");
        state.create_requests.clone()
    }

    pub(crate) fn list_calls(&self) -> Vec<String> {
        let state = self.state.lock().expect("mock state poisoned");
        state.list_calls.clone()
    }

    fn mock_failure(op: &str) -> DirectoryError {
        DirectoryError::Api {
            status: 500,
            message: format!("mock {op} failure"),
        }
    }
}

impl AlarmDirectory for MockAlarmDirectory {
    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<RemoteAlarm>, DirectoryError> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.list_calls.push(prefix.to_string());
        if self.fail_list {
            return Err(Self::mock_failure("list"));
        }
        Ok(state
            .alarms
            .values()
            .filter(|alarm| alarm.alarm_name.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn delete_batch(&self, names: &[String]) -> Result<(), DirectoryError> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.delete_batches.push(names.to_vec());
        if self.fail_delete {
            return Err(Self::mock_failure("delete"));
        }
        for name in names {
            state.alarms.remove(name);
        }
        Ok(())
    }

    async fn create_one(&self, request: &PutAlarmRequest) -> Result<(), DirectoryError> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.create_requests.push(request.clone());
        if self.fail_create {
            return Err(Self::mock_failure("create"));
        }
        state.alarms.insert(
            request.alarm_name.clone(),
            RemoteAlarm {
                alarm_name: request.alarm_name.clone(),
                dimensions: request.dimensions.clone(),
            },
        );
        Ok(())
    }
}
