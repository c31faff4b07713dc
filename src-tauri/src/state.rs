use crate::core::icon::service::IconStore;
use crate::core::motion::controller::MotionController;
use crate::core::scheduler::{Scheduler, TokioScheduler};
use crate::infra::config::AppConfig;
use std::sync::Arc;

pub struct RuntimeState {
    pub config: AppConfig,
    pub controller: MotionController,
    pub icons: IconStore,
}

impl RuntimeState {
    pub fn new(config: AppConfig) -> Self {
        Self::with_scheduler(config, Arc::new(TokioScheduler::new()))
    }

    pub fn with_scheduler(config: AppConfig, scheduler: Arc<dyn Scheduler>) -> Self {
        let controller = MotionController::new(scheduler, config.motion);
        Self {
            config,
            controller,
            icons: IconStore::new(),
        }
    }
}
