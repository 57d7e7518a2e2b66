// Client facade
//
// Single construction point: validates the base address once, builds one
// `Dispatcher`, and hands the same instance to every resource client.

use std::sync::Arc;

use secrecy::SecretString;

use crate::dispatch::{Dispatcher, validate_base_url};
use crate::error::Error;
use crate::resources::{
    ConfigClient, ControllerClient, FacilityClient, NewsClient, RequestClient, SoloClient,
};
use crate::transport::{HttpTransport, ReqwestTransport, TransportConfig};

/// Entry point to the API.
///
/// ```no_run
/// # async fn demo() -> Result<(), vatusa_api::Error> {
/// let client = vatusa_api::VatusaClient::new("my-token", "https://api.example/v1")?;
/// let controller = client.controller.get(1_234_567).await?;
/// println!("{}", controller.full_name());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct VatusaClient {
    pub config: ConfigClient,
    pub controller: ControllerClient,
    pub facility: FacilityClient,
    pub news: NewsClient,
    pub request: RequestClient,
    pub solo: SoloClient,
    dispatcher: Arc<Dispatcher>,
}

impl VatusaClient {
    /// Build with the default `reqwest` transport.
    pub fn new(token: impl Into<String>, base_url: &str) -> Result<Self, Error> {
        Self::with_config(token, base_url, &TransportConfig::default())
    }

    /// Build with a custom transport configuration (timeout, TLS).
    pub fn with_config(
        token: impl Into<String>,
        base_url: &str,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        validate_base_url(base_url)?;
        let transport = ReqwestTransport::new(transport)?;
        Self::with_transport(token, base_url, Arc::new(transport))
    }

    /// Build on top of any `HttpTransport`.
    pub fn with_transport(
        token: impl Into<String>,
        base_url: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, Error> {
        validate_base_url(base_url)?;
        let token = SecretString::from(token.into());
        let dispatcher = Arc::new(Dispatcher::new(base_url, token, transport)?);
        Ok(Self::from_dispatcher(dispatcher))
    }

    fn from_dispatcher(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            config: ConfigClient::new(Arc::clone(&dispatcher)),
            controller: ControllerClient::new(Arc::clone(&dispatcher)),
            facility: FacilityClient::new(Arc::clone(&dispatcher)),
            news: NewsClient::new(Arc::clone(&dispatcher)),
            request: RequestClient::new(Arc::clone(&dispatcher)),
            solo: SoloClient::new(Arc::clone(&dispatcher)),
            dispatcher,
        }
    }

    /// The dispatcher every resource client shares.
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    pub fn base_url(&self) -> &str {
        self.dispatcher.base_url()
    }
}
