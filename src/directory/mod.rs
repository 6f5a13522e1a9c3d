mod error;
mod http;
mod memory;
#[cfg(test)]
pub(crate) mod mock;
mod model;

pub use error::DirectoryError;
pub use http::HttpAlarmDirectory;
pub use memory::InMemoryAlarmDirectory;
pub use model::{AlarmDimension, PutAlarmRequest, RemoteAlarm};

use crate::config::Config;

/// Remote alarm store. Implementations own pagination and retry; callers
/// only see whole listings and final results.
pub trait AlarmDirectory {
    /// All alarms whose name starts with `prefix`, across every page.
    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<RemoteAlarm>, DirectoryError>;

    /// Delete alarms by name. Deleting a name that does not exist is not an
    /// error. Callers must not invoke this with an empty set.
    async fn delete_batch(&self, names: &[String]) -> Result<(), DirectoryError>;

    /// Create an alarm, replacing any existing alarm with the same name.
    async fn create_one(&self, request: &PutAlarmRequest) -> Result<(), DirectoryError>;
}

pub enum ActiveAlarmDirectory {
    Http(HttpAlarmDirectory),
    Memory(InMemoryAlarmDirectory),
}

impl ActiveAlarmDirectory {
    pub fn from_config(config: &Config) -> Result<Self, DirectoryError> {
        if config.simulation.enabled {
            Ok(Self::Memory(InMemoryAlarmDirectory::new()))
        } else {
            Ok(Self::Http(HttpAlarmDirectory::new(
                &config.monitoring,
                config.retry.clone(),
            )?))
        }
    }
}

impl AlarmDirectory for ActiveAlarmDirectory {
    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<RemoteAlarm>, DirectoryError> {
        match self {
            Self::Http(directory) => directory.list_by_prefix(prefix).await,
            Self::Memory(directory) => directory.list_by_prefix(prefix).await,
        }
    }

    async fn delete_batch(&self, names: &[String]) -> Result<(), DirectoryError> {
        match self {
            Self::Http(directory) => directory.delete_batch(names).await,
            Self::Memory(directory) => directory.delete_batch(names).await,
        }
    }

    async fn create_one(&self, request: &PutAlarmRequest) -> Result<(), DirectoryError> {
        match self {
            Self::Http(directory) => directory.create_one(request).await,
            Self::Memory(directory) => directory.create_one(request).await,
        }
    }
}
