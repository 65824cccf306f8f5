use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::{
    config::Config,
    utils::random::{Chooser, ThreadRngChooser},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub chooser: Arc<dyn Chooser>,
}

impl AppState {
    /// State with the default thread-RNG chooser.
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        Self::with_chooser(pool, config, Arc::new(ThreadRngChooser))
    }

    pub fn with_chooser(pool: SqlitePool, config: Config, chooser: Arc<dyn Chooser>) -> Self {
        Self {
            pool,
            config,
            chooser,
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}
