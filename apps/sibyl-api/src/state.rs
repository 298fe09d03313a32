use std::sync::Arc;

use sibyl_service::SibylService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<SibylService>,
}
impl AppState {
	pub fn new(config: sibyl_config::Config) -> Self {
		Self { service: Arc::new(SibylService::new(config)) }
	}
}
