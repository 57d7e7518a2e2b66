// Domain records
//
// Immutable, fully-typed snapshots of server state. Records are created by
// decoding a response and never written back.

pub mod config;
pub mod controller;
pub mod facility;
pub mod news;

pub use config::{Config, ConfigItemFacilityRole, ConfigItemGlobalRole, ConfigItemRating};
pub use controller::{
    Cid, ControllerActionLog, ControllerData, ControllerDetails, ControllerFacility,
    ControllerMinimal, ControllerPromotion, ControllerTransfer, ControllerTransferStatus,
    ControllerVisitRequest,
};
pub use facility::{FacilityData, FacilityRequestsData, RosterType};
pub use news::{NewsPost, NewsPostForm};
