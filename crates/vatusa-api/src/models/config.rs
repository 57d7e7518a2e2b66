// Reference data from `/config/`

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigItemFacilityRole {
    pub role: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigItemGlobalRole {
    pub role: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigItemRating {
    pub rating: i32,
    pub short: String,
    pub long: String,
}

/// Server vocabulary: known roles and ratings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub facility_roles: Vec<ConfigItemFacilityRole>,
    pub global_roles: Vec<ConfigItemGlobalRole>,
    pub ratings: Vec<ConfigItemRating>,
}

impl Config {
    /// Look up a rating by its short code (`S1`, `C1`, ...).
    pub fn rating_by_short(&self, short: &str) -> Option<&ConfigItemRating> {
        self.ratings
            .iter()
            .find(|r| r.short.eq_ignore_ascii_case(short))
    }
}
