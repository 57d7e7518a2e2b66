// Reference data endpoint

use std::sync::Arc;

use crate::dispatch::{Dispatcher, RequestOptions};
use crate::error::Error;
use crate::models::Config;
use crate::shape::Scalar;

/// Client for `/config/`.
#[derive(Debug, Clone)]
pub struct ConfigClient {
    dispatcher: Arc<Dispatcher>,
}

impl ConfigClient {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// The shared dispatcher, for endpoints without a typed wrapper.
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// `GET /config/`
    pub async fn get(&self) -> Result<Config, Error> {
        self.dispatcher
            .get::<Scalar<Config>>("/config/", RequestOptions::new())
            .await
    }
}
