use std::sync::Arc;

use stackcheck_core::application::AppService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: AppService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: AppService) -> Self {
        Self { args, service }
    }
}
