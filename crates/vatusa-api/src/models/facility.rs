// Facility records

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::controller::{ControllerMinimal, ControllerTransfer, ControllerVisitRequest};
use crate::error::Error;

/// An ARTCC or other facility, with its staff slots.
///
/// Each staff slot is `None` while the position is vacant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityData {
    pub facility: String,
    pub name: String,
    pub url: String,
    pub region: u32,
    pub atm: Option<ControllerMinimal>,
    pub datm: Option<ControllerMinimal>,
    pub ta: Option<ControllerMinimal>,
    pub ec: Option<ControllerMinimal>,
    pub fe: Option<ControllerMinimal>,
    pub wm: Option<ControllerMinimal>,
    pub is_active: bool,
    pub is_special: bool,
}

impl FacilityData {
    /// Staff slots in conventional order, vacant ones included.
    pub fn staff(&self) -> [(&'static str, Option<&ControllerMinimal>); 6] {
        [
            ("ATM", self.atm.as_ref()),
            ("DATM", self.datm.as_ref()),
            ("TA", self.ta.as_ref()),
            ("EC", self.ec.as_ref()),
            ("FE", self.fe.as_ref()),
            ("WM", self.wm.as_ref()),
        ]
    }
}

/// Pending work for a facility: inbound transfers and visit requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityRequestsData {
    pub transfers: Vec<ControllerTransfer>,
    pub visit_requests: Vec<ControllerVisitRequest>,
}

/// Which part of a facility roster to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RosterType {
    All,
    Home,
    Visitor,
}

impl RosterType {
    /// Map inclusion flags to a selector. Excluding both is an error.
    pub fn from_flags(include_home: bool, include_visitor: bool) -> Result<Self, Error> {
        match (include_home, include_visitor) {
            (true, true) => Ok(Self::All),
            (true, false) => Ok(Self::Home),
            (false, true) => Ok(Self::Visitor),
            (false, false) => Err(Error::InvalidRosterSelection),
        }
    }

    /// Path segment used by `/facility/{facility}/roster/{type}`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Home => "HOME",
            Self::Visitor => "VISITOR",
        }
    }
}

impl fmt::Display for RosterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RosterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Ok(Self::All),
            "HOME" => Ok(Self::Home),
            "VISITOR" => Ok(Self::Visitor),
            other => Err(format!("unknown roster type '{other}'")),
        }
    }
}
