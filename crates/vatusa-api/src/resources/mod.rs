// Resource clients
//
// One client per URI namespace. All of them hold the same `Dispatcher`
// and share no other state.

pub mod config;
pub mod controller;
pub mod facility;
pub mod news;
pub mod request;
pub mod solo;

pub use config::ConfigClient;
pub use controller::{ControllerClient, ControllerSearch};
pub use facility::FacilityClient;
pub use news::NewsClient;
pub use request::RequestClient;
pub use solo::SoloClient;
