// Controller endpoints
//
// Lookup, search and staff actions under `/controller/...`. Staff actions
// are form posts carrying the acting admin's CID; success is the 200
// itself, so they return `true` or an error.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::dispatch::{Dispatcher, RequestOptions};
use crate::error::Error;
use crate::models::{Cid, ControllerActionLog, ControllerData, ControllerDetails};
use crate::shape::{List, NoBody, Scalar};

/// Filters for `/controller/search`. Unset filters are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ControllerSearch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub facility: Option<String>,
    pub rating: Option<i32>,
    pub email: Option<String>,
}

impl ControllerSearch {
    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    pub fn facility(mut self, value: impl Into<String>) -> Self {
        self.facility = Some(value.into());
        self
    }

    pub fn rating(mut self, value: i32) -> Self {
        self.rating = Some(value);
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }
}

/// Client for `/controller/...`.
#[derive(Debug, Clone)]
pub struct ControllerClient {
    dispatcher: Arc<Dispatcher>,
}

impl ControllerClient {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// The shared dispatcher, for endpoints without a typed wrapper.
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// `GET /controller/{cid}`
    pub async fn get(&self, cid: Cid) -> Result<ControllerData, Error> {
        self.dispatcher
            .get::<Scalar<ControllerData>>(&format!("/controller/{cid}"), RequestOptions::new())
            .await
    }

    /// `GET /controller/{cid}/details`
    ///
    /// Profile plus transfer history, eligibility, promotions and action log.
    pub async fn get_details(&self, cid: Cid) -> Result<ControllerDetails, Error> {
        self.dispatcher
            .get::<Scalar<ControllerDetails>>(
                &format!("/controller/{cid}/details"),
                RequestOptions::new(),
            )
            .await
    }

    /// `GET /controller/search?first_name=..&last_name=..&facility=..&rating=..&email=..`
    pub async fn search(&self, filters: &ControllerSearch) -> Result<Vec<ControllerData>, Error> {
        debug!(?filters, "searching controllers");
        let options = RequestOptions::new().query(filters)?;
        self.dispatcher
            .get::<List<ControllerData>>("/controller/search", options)
            .await
    }

    /// `GET /controller/{cid}/log`
    pub async fn get_action_log(&self, cid: Cid) -> Result<Vec<ControllerActionLog>, Error> {
        self.dispatcher
            .get::<List<ControllerActionLog>>(
                &format!("/controller/{cid}/log"),
                RequestOptions::new(),
            )
            .await
    }

    /// `POST /controller/{cid}/role/facility`
    pub async fn add_facility_role(
        &self,
        cid: Cid,
        admin_cid: Cid,
        facility: &str,
        role: &str,
    ) -> Result<bool, Error> {
        debug!(cid, facility, role, "adding facility role");
        let options = RequestOptions::new().form(&json!({
            "admin_cid": admin_cid,
            "facility": facility,
            "role": role,
        }))?;
        self.dispatcher
            .post::<NoBody>(&format!("/controller/{cid}/role/facility"), options)
            .await?;
        Ok(true)
    }

    /// `DELETE /controller/{cid}/role/facility`
    pub async fn remove_facility_role(
        &self,
        cid: Cid,
        admin_cid: Cid,
        facility: &str,
        role: &str,
    ) -> Result<bool, Error> {
        debug!(cid, facility, role, "removing facility role");
        let options = RequestOptions::new().form(&json!({
            "admin_cid": admin_cid,
            "facility": facility,
            "role": role,
        }))?;
        self.dispatcher
            .delete::<NoBody>(&format!("/controller/{cid}/role/facility"), options)
            .await?;
        Ok(true)
    }

    /// `POST /controller/{cid}/role/global`
    pub async fn add_global_role(&self, cid: Cid, admin_cid: Cid, role: &str) -> Result<bool, Error> {
        debug!(cid, role, "adding global role");
        let options = RequestOptions::new().form(&json!({
            "admin_cid": admin_cid,
            "role": role,
        }))?;
        self.dispatcher
            .post::<NoBody>(&format!("/controller/{cid}/role/global"), options)
            .await?;
        Ok(true)
    }

    /// `DELETE /controller/{cid}/role/global`
    pub async fn remove_global_role(
        &self,
        cid: Cid,
        admin_cid: Cid,
        role: &str,
    ) -> Result<bool, Error> {
        debug!(cid, role, "removing global role");
        let options = RequestOptions::new().form(&json!({
            "admin_cid": admin_cid,
            "role": role,
        }))?;
        self.dispatcher
            .delete::<NoBody>(&format!("/controller/{cid}/role/global"), options)
            .await?;
        Ok(true)
    }

    /// `PUT /controller/{cid}/rating`
    pub async fn update_rating(&self, cid: Cid, admin_cid: Cid, rating: i32) -> Result<bool, Error> {
        debug!(cid, rating, "updating rating");
        let options = RequestOptions::new().form(&json!({
            "admin_cid": admin_cid,
            "rating": rating,
        }))?;
        self.dispatcher
            .put::<NoBody>(&format!("/controller/{cid}/rating"), options)
            .await?;
        Ok(true)
    }

    /// `PUT /controller/{cid}/flag`
    pub async fn set_flag(
        &self,
        cid: Cid,
        admin_cid: Cid,
        flag: &str,
        value: bool,
    ) -> Result<bool, Error> {
        debug!(cid, flag, value, "setting controller flag");
        let options = RequestOptions::new().form(&json!({
            "admin_cid": admin_cid,
            "flag": flag,
            "value": value,
        }))?;
        self.dispatcher
            .put::<NoBody>(&format!("/controller/{cid}/flag"), options)
            .await?;
        Ok(true)
    }

    /// `DELETE /controller/{cid}/facility`
    ///
    /// Removes the controller from their home facility roster.
    pub async fn roster_remove(
        &self,
        cid: Cid,
        admin_cid: Cid,
        facility: &str,
        reason: &str,
    ) -> Result<bool, Error> {
        debug!(cid, facility, "removing controller from home roster");
        let options = RequestOptions::new().form(&json!({
            "admin_cid": admin_cid,
            "facility": facility,
            "reason": reason,
        }))?;
        self.dispatcher
            .delete::<NoBody>(&format!("/controller/{cid}/facility"), options)
            .await?;
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dispatch::encode_pairs;

    #[test]
    fn search_builder_sets_only_given_filters() {
        let filters = ControllerSearch::default().first_name("John").rating(5);
        let mut pairs = encode_pairs(&filters).unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("first_name".to_owned(), "John".to_owned()),
                ("rating".to_owned(), "5".to_owned()),
            ]
        );
    }

    #[test]
    fn empty_search_sends_no_filters() {
        assert!(encode_pairs(&ControllerSearch::default()).unwrap().is_empty());
    }
}
