use std::sync::Arc;

use crate::application::ports::category_repository::CategoryRepository;
use crate::application::ports::node_repository::NodeRepository;
use crate::application::ports::tracker_repository::TrackerRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

pub struct AppServices {
    node_repo: Arc<dyn NodeRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    tracker_repo: Arc<dyn TrackerRepository>,
}

impl AppServices {
    pub fn new(
        node_repo: Arc<dyn NodeRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        tracker_repo: Arc<dyn TrackerRepository>,
    ) -> Self {
        Self {
            node_repo,
            category_repo,
            tracker_repo,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: Arc<AppServices>) -> Self {
        Self { cfg, services }
    }

    pub fn node_repo(&self) -> Arc<dyn NodeRepository> {
        self.services.node_repo.clone()
    }

    pub fn category_repo(&self) -> Arc<dyn CategoryRepository> {
        self.services.category_repo.clone()
    }

    pub fn tracker_repo(&self) -> Arc<dyn TrackerRepository> {
        self.services.tracker_repo.clone()
    }
}
