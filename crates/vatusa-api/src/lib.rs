// vatusa-api: Async Rust client for the VATUSA facility-management API

pub mod client;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod resources;
pub mod shape;
pub mod transport;

pub use client::VatusaClient;
pub use dispatch::{Dispatcher, RequestOptions, validate_base_url};
pub use error::Error;
pub use resources::{
    ConfigClient, ControllerClient, ControllerSearch, FacilityClient, NewsClient, RequestClient,
    SoloClient,
};
pub use shape::{List, NoBody, ResponseShape, Scalar};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TlsMode,
    TransportConfig,
};
