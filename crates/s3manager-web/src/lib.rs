pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod types;
pub mod views;

use std::sync::Arc;

use s3manager_common::error::Result;
use s3manager_storage::traits::ObjectStore;

pub use config::WebConfig;
pub use router::app_router;

use crate::views::Views;

pub struct AppState {
    store: Arc<dyn ObjectStore>,
    views: Views,
    max_upload_bytes: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn ObjectStore>, config: &WebConfig) -> Result<Self> {
        let views = Views::load(&config.template_dir)?;
        Ok(Self {
            store,
            views,
            max_upload_bytes: config.max_upload_bytes,
        })
    }

    pub fn store(&self) -> Arc<dyn ObjectStore> {
        Arc::clone(&self.store)
    }

    pub fn views(&self) -> &Views {
        &self.views
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}
