use std::sync::Arc;

use crate::config::Config;
use crate::directory::ActiveAlarmDirectory;
use crate::templates::TemplateRegistry;

#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub registry: Arc<TemplateRegistry>,
    pub directory: Arc<ActiveAlarmDirectory>,
}

impl AppContext {
    pub fn new(config: Config, directory: ActiveAlarmDirectory) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(TemplateRegistry::builtin()),
            directory: Arc::new(directory),
        }
    }
}
