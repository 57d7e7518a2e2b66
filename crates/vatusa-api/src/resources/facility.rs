// Facility endpoints
//
// Facility listing, rosters and pending requests under `/facility/...`.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::dispatch::{Dispatcher, RequestOptions};
use crate::error::Error;
use crate::models::{Cid, ControllerData, FacilityData, FacilityRequestsData, RosterType};
use crate::shape::{List, NoBody, Scalar};

/// Client for `/facility/...`.
#[derive(Debug, Clone)]
pub struct FacilityClient {
    dispatcher: Arc<Dispatcher>,
}

impl FacilityClient {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// The shared dispatcher, for endpoints without a typed wrapper.
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// `GET /facility/`
    pub async fn all(&self) -> Result<Vec<FacilityData>, Error> {
        self.dispatcher
            .get::<List<FacilityData>>("/facility/", RequestOptions::new())
            .await
    }

    /// `GET /facility/{facility}`
    pub async fn get(&self, facility: &str) -> Result<FacilityData, Error> {
        self.dispatcher
            .get::<Scalar<FacilityData>>(&format!("/facility/{facility}"), RequestOptions::new())
            .await
    }

    /// `GET /facility/{facility}/roster/{ALL|HOME|VISITOR}`
    ///
    /// Fails with [`Error::InvalidRosterSelection`] without contacting the
    /// server when both groups are excluded.
    pub async fn get_roster(
        &self,
        facility: &str,
        include_home: bool,
        include_visitor: bool,
    ) -> Result<Vec<ControllerData>, Error> {
        let roster = RosterType::from_flags(include_home, include_visitor)?;
        self.get_roster_type(facility, roster).await
    }

    /// Roster fetch with an explicit selector.
    pub async fn get_roster_type(
        &self,
        facility: &str,
        roster: RosterType,
    ) -> Result<Vec<ControllerData>, Error> {
        self.dispatcher
            .get::<List<ControllerData>>(
                &format!("/facility/{facility}/roster/{roster}"),
                RequestOptions::new(),
            )
            .await
    }

    /// `POST /facility/{facility}/roster`
    pub async fn add_visitor(
        &self,
        facility: &str,
        cid: Cid,
        reason: Option<&str>,
    ) -> Result<bool, Error> {
        debug!(facility, cid, "adding visitor");
        let options = RequestOptions::new().form(&json!({
            "cid": cid,
            "reason": reason,
        }))?;
        self.dispatcher
            .post::<NoBody>(&format!("/facility/{facility}/roster"), options)
            .await?;
        Ok(true)
    }

    /// `DELETE /facility/{facility}/roster`
    pub async fn remove_controller(
        &self,
        facility: &str,
        cid: Cid,
        reason: Option<&str>,
    ) -> Result<bool, Error> {
        debug!(facility, cid, "removing controller from roster");
        let options = RequestOptions::new().form(&json!({
            "cid": cid,
            "reason": reason,
        }))?;
        self.dispatcher
            .delete::<NoBody>(&format!("/facility/{facility}/roster"), options)
            .await?;
        Ok(true)
    }

    /// `GET /facility/{facility}/request`
    pub async fn get_requests(&self, facility: &str) -> Result<FacilityRequestsData, Error> {
        self.dispatcher
            .get::<Scalar<FacilityRequestsData>>(
                &format!("/facility/{facility}/request"),
                RequestOptions::new(),
            )
            .await
    }

    /// `GET /facility/{facility}/staff`
    ///
    /// Returns loosely-typed JSON: no staff record is defined for this
    /// endpoint yet, so the payload is passed through undecoded.
    pub async fn get_staff(&self, facility: &str) -> Result<serde_json::Value, Error> {
        self.dispatcher
            .get::<Scalar<serde_json::Value>>(
                &format!("/facility/{facility}/staff"),
                RequestOptions::new(),
            )
            .await
    }
}
