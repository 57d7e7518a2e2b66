// Controller records
//
// Snapshots of controller state as returned by the `/controller/...`
// endpoints. Optional members are explicit `Option`s: the server sends
// `null` (or omits the key) for data that does not exist yet, such as a
// transfer nobody has acted on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A VATSIM certificate identifier.
pub type Cid = u32;

/// Full controller profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerData {
    pub cid: Cid,
    pub first_name: String,
    pub last_name: String,
    /// Only visible to callers with sufficient privileges.
    pub email: Option<String>,
    /// Numeric rating; `-1` is inactive, `1` is OBS.
    pub rating: i32,
    pub rating_short: String,
    /// Home facility identifier (e.g. `ZDC`).
    pub facility: String,
    pub flags: Vec<String>,
    pub global_roles: Vec<String>,
    pub facility_roles: Vec<String>,
    /// Facilities this controller visits, with roles held there.
    pub visits: Vec<ControllerFacility>,
    pub facility_date: Option<String>,
    pub promotion_date: Option<String>,
}

impl ControllerData {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Compact controller reference embedded in other records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerMinimal {
    pub cid: Cid,
    pub name: String,
    pub rating: i32,
    pub rating_short: String,
    pub facility: String,
}

/// A facility membership with the roles held there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerFacility {
    pub facility: String,
    pub facility_roles: Vec<String>,
}

/// Read-time aggregate returned by `/controller/{cid}/details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerDetails {
    pub controller: ControllerData,
    pub transfers: Vec<ControllerTransfer>,
    pub transfer_status: ControllerTransferStatus,
    pub promotions: Vec<ControllerPromotion>,
    pub action_log: Vec<ControllerActionLog>,
}

/// A transfer between facilities. `action*` stay empty until staff act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerTransfer {
    pub controller: ControllerMinimal,
    pub from_facility: String,
    pub to_facility: String,
    pub reason: String,
    pub create_date: NaiveDate,
    pub action: Option<String>,
    pub action_cid: Option<Cid>,
    pub action_date: Option<NaiveDate>,
}

/// A request to visit a facility. `action*` stay empty until staff act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerVisitRequest {
    pub controller: ControllerMinimal,
    pub facility: String,
    pub reason: String,
    pub create_date: NaiveDate,
    pub action: Option<String>,
    pub action_cid: Option<Cid>,
    pub action_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerPromotion {
    pub controller: ControllerMinimal,
    pub from_rating: i32,
    pub from_rating_short: String,
    pub to_rating: i32,
    pub to_rating_short: String,
    /// Instructor who granted the rating; absent for imported history.
    pub grantor: Option<ControllerMinimal>,
    pub promotion_date: NaiveDate,
}

/// Server-computed transfer eligibility checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct ControllerTransferStatus {
    pub controller: ControllerMinimal,
    pub is_pending_transfer: bool,
    pub is_transfer_eligible: bool,
    pub is_transfer_override: bool,

    pub is_home_controller: bool,
    pub is_basic_training_complete: bool,
    /// No transfers in the past 90 days.
    pub is_transfer_stable: bool,
    pub is_first_facility: bool,
    pub is_recently_joined_facility: bool,
    /// Not promoted S1 through C1 in the past 90 days.
    pub is_rating_stable: bool,
    pub is_staff: bool,
    pub is_instructor: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerActionLog {
    /// `None` for entries written by the system rather than a staff member.
    pub admin_controller: Option<ControllerMinimal>,
    pub log: String,
    pub log_date: NaiveDate,
}
