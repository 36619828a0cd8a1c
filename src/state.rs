use crate::config::Config;
use crate::db::DbPool;
use crate::places::GoogleClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<Config>,
    pub google: GoogleClient,
}
