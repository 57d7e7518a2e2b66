// Transfer and visit request endpoints
//
// The operation surface is fixed but the server endpoints behind it are
// not published yet. Every method fails with `Error::Unimplemented` and
// never touches the network.

use std::sync::Arc;

use tracing::debug;

use crate::dispatch::Dispatcher;
use crate::error::Error;
use crate::models::Cid;

/// Client for transfer and visit requests.
#[derive(Debug, Clone)]
pub struct RequestClient {
    dispatcher: Arc<Dispatcher>,
}

#[allow(clippy::unused_async)]
impl RequestClient {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// The shared dispatcher, for endpoints without a typed wrapper.
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Open a transfer of `cid` to `facility`.
    pub async fn create_transfer(
        &self,
        cid: Cid,
        admin_cid: Cid,
        facility: &str,
        reason: &str,
    ) -> Result<bool, Error> {
        debug!(cid, admin_cid, facility, reason, "create_transfer is pending");
        Err(Error::Unimplemented {
            operation: "request.create_transfer",
        })
    }

    /// Accept or reject a pending transfer.
    pub async fn update_transfer(
        &self,
        transfer_id: u64,
        admin_cid: Cid,
        accept: bool,
        reason: Option<&str>,
    ) -> Result<bool, Error> {
        debug!(transfer_id, admin_cid, accept, ?reason, "update_transfer is pending");
        Err(Error::Unimplemented {
            operation: "request.update_transfer",
        })
    }

    /// Ask for `cid` to visit `facility`.
    pub async fn create_visit_request(
        &self,
        cid: Cid,
        admin_cid: Cid,
        facility: &str,
        reason: &str,
    ) -> Result<bool, Error> {
        debug!(cid, admin_cid, facility, reason, "create_visit_request is pending");
        Err(Error::Unimplemented {
            operation: "request.create_visit_request",
        })
    }

    /// Accept or reject a pending visit request.
    pub async fn update_visit_request(
        &self,
        cid: Cid,
        admin_cid: Cid,
        accept: bool,
        reason: Option<&str>,
    ) -> Result<bool, Error> {
        debug!(cid, admin_cid, accept, ?reason, "update_visit_request is pending");
        Err(Error::Unimplemented {
            operation: "request.update_visit_request",
        })
    }
}
