use std::sync::Arc;

use modelize_orm::{Adapter, Model, ModelResult};

use crate::models::product_model;

/// Shared handler state
#[derive(Clone, Debug)]
pub struct AppState {
    pub products: Model,
}

impl AppState {
    /// State with every model bound to `adapter`
    pub fn new(adapter: Arc<dyn Adapter>) -> ModelResult<Self> {
        Ok(Self {
            products: product_model(adapter)?,
        })
    }
}
