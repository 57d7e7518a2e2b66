// Solo certification endpoints
//
// Declared surface only; see `request.rs` for the same arrangement.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::dispatch::Dispatcher;
use crate::error::Error;
use crate::models::Cid;

/// Client for solo certification endorsements.
#[derive(Debug, Clone)]
pub struct SoloClient {
    dispatcher: Arc<Dispatcher>,
}

#[allow(clippy::unused_async)]
impl SoloClient {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// The shared dispatcher, for endpoints without a typed wrapper.
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Every active solo certification.
    pub async fn all(&self) -> Result<serde_json::Value, Error> {
        Err(Error::Unimplemented {
            operation: "solo.all",
        })
    }

    /// Solo certifications issued by one facility.
    pub async fn all_facility(&self, facility: &str) -> Result<serde_json::Value, Error> {
        debug!(facility, "all_facility is pending");
        Err(Error::Unimplemented {
            operation: "solo.all_facility",
        })
    }

    /// Endorse `cid` to work `position` alone until `expiration`.
    pub async fn create(
        &self,
        cid: Cid,
        facility: &str,
        position: &str,
        expiration: NaiveDate,
        admin_cid: Cid,
    ) -> Result<bool, Error> {
        debug!(cid, facility, position, %expiration, admin_cid, "create is pending");
        Err(Error::Unimplemented {
            operation: "solo.create",
        })
    }

    pub async fn delete(&self, solo_id: u64) -> Result<bool, Error> {
        debug!(solo_id, "delete is pending");
        Err(Error::Unimplemented {
            operation: "solo.delete",
        })
    }
}
