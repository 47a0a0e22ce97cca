//! Car hire API client
//!
//! [`CarHireClient`] owns everything a request needs: the session
//! (credentials, alias, readiness), the executor and the populate-once
//! caches. It is cheap to clone; clones share state.

use std::fmt;
use std::sync::Arc;

use carhire_core::{
    Booking, DepotPair, Location, LocationProvider, PendingBooking, Search, SearchResult,
    Supplier, SupplierTerm, TopLocations,
};
use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::cache::ListCache;
use crate::config::ClientConfig;
use crate::error::{CarHireError, Result};
use crate::executor::RequestExecutor;
use crate::locations::TopLocationsProvider;
use crate::request::RequestDescriptor;
use crate::requests;
use crate::search::SearchOrchestrator;
use crate::session::{ClientStatus, SessionState};
use crate::transport::{create_transport, HttpTransport};

/// Client for the car hire booking API
///
/// Call [`setup`](Self::setup) once with the SDK key and API domain. Until
/// it succeeds every other request fails with [`CarHireError::NotReady`].
#[derive(Clone)]
pub struct CarHireClient {
    executor: RequestExecutor,
    session: Arc<SessionState>,
    suppliers: Arc<ListCache<Supplier>>,
    top_locations: Arc<ListCache<Location>>,
    location_provider: Option<Arc<dyn LocationProvider>>,
}

impl fmt::Debug for CarHireClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.session.snapshot();
        f.debug_struct("CarHireClient")
            .field("status", &session.status)
            .field("domain", &session.domain)
            .field("alias", &session.alias)
            .finish_non_exhaustive()
    }
}

impl CarHireClient {
    /// Create a client sending requests through `transport`
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        let session = Arc::new(SessionState::new());
        Self {
            executor: RequestExecutor::new(transport, session.clone()),
            session,
            suppliers: Arc::new(ListCache::new("suppliers")),
            top_locations: Arc::new(ListCache::new("top locations")),
            location_provider: None,
        }
    }

    /// Create a client with a reqwest transport using the configured timeouts
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(create_transport(config)?))
    }

    /// Resolve locations through `provider` instead of the top locations list
    pub fn with_location_provider(mut self, provider: Arc<dyn LocationProvider>) -> Self {
        self.location_provider = Some(provider);
        self
    }

    // =========================================================================
    // Bootstrap
    // =========================================================================

    /// Store credentials and fetch the account alias
    ///
    /// Status moves to Pending, then Ready with the alias or Failed with
    /// the error. Cached supplier and location lists are dropped. When a
    /// later `setup` starts before this one finishes, this call returns
    /// [`CarHireError::Superseded`] and leaves the session to the newer call.
    #[instrument(skip(self, sdk_key))]
    pub async fn setup(&self, sdk_key: &str, domain: &str) -> Result<String> {
        let generation = self.session.begin_setup(sdk_key, domain);
        self.clear_caches().await;
        let outcome = self.executor.execute(requests::alias()).await;

        let alias = outcome.as_ref().ok().cloned();
        if !self.session.complete_setup(generation, alias) {
            return Err(CarHireError::Superseded);
        }
        outcome
    }

    /// Run [`setup`](Self::setup) with the configured key and domain
    pub async fn setup_from_config(&self, config: &ClientConfig) -> Result<String> {
        let connection = &config.connection;
        let domain = connection
            .domain
            .as_deref()
            .ok_or_else(|| CarHireError::configuration("No API domain configured"))?;
        let sdk_key = connection
            .sdk_key
            .as_deref()
            .ok_or_else(|| CarHireError::configuration("No SDK key configured"))?;
        self.setup(sdk_key, domain).await
    }

    pub fn status(&self) -> ClientStatus {
        self.session.status()
    }

    /// Account alias, available once Ready
    pub fn alias(&self) -> Option<String> {
        self.session.alias()
    }

    /// Watch readiness changes
    pub fn subscribe(&self) -> watch::Receiver<ClientStatus> {
        self.session.subscribe()
    }

    /// Wait for an in-flight setup to finish
    ///
    /// Fails with [`CarHireError::NotReady`] when setup was never called or
    /// has failed.
    pub async fn wait_until_ready(&self) -> Result<()> {
        let mut status = self.subscribe();
        loop {
            let current = *status.borrow_and_update();
            match current {
                ClientStatus::Ready => return Ok(()),
                ClientStatus::NotReady | ClientStatus::Failed => {
                    return Err(CarHireError::NotReady)
                }
                ClientStatus::Pending => {
                    status.changed().await.map_err(|_| CarHireError::NotReady)?;
                }
            }
        }
    }

    /// Perform any request descriptor
    pub async fn execute<T>(&self, descriptor: RequestDescriptor<T>) -> Result<T> {
        self.executor.execute(descriptor).await
    }

    pub(crate) fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    /// Alias parameter value; empty before setup completes
    pub(crate) fn alias_param(&self) -> String {
        self.alias().unwrap_or_default()
    }

    // =========================================================================
    // Suppliers and locations
    // =========================================================================

    /// All suppliers, loaded once and then served from memory
    #[instrument(skip(self))]
    pub async fn suppliers(&self) -> Result<Arc<Vec<Supplier>>> {
        self.suppliers
            .get_or_load(|| async {
                let alias = self.alias_param();
                self.executor.execute(requests::supplier_list(&alias)).await
            })
            .await
    }

    /// Supplier by code
    #[instrument(skip(self))]
    pub async fn supplier(&self, code: &str) -> Result<Option<Supplier>> {
        let suppliers = self.suppliers().await?;
        Ok(suppliers.iter().find(|s| s.code == code).cloned())
    }

    /// Suppliers if already loaded, without touching the network
    pub fn cached_suppliers(&self) -> Option<Arc<Vec<Supplier>>> {
        self.suppliers.peek()
    }

    /// Forget the cached supplier and top location lists
    pub async fn clear_caches(&self) {
        self.suppliers.clear().await;
        self.top_locations.clear().await;
    }

    /// Popular locations, loaded once and then served from memory
    #[instrument(skip(self))]
    pub async fn top_locations(&self) -> Result<TopLocations> {
        let all = self
            .top_locations
            .get_or_load(|| self.executor.execute(requests::top_locations(None)))
            .await?;
        Ok(TopLocations::new(all.to_vec()))
    }

    /// Locations matching free text, as searched by the API
    #[instrument(skip(self))]
    pub async fn search_locations(&self, query: &str) -> Result<Vec<Location>> {
        self.executor
            .execute(requests::top_locations(Some(query)))
            .await
    }

    /// The configured location provider, or one backed by the top locations list
    pub fn location_provider(&self) -> Arc<dyn LocationProvider> {
        match &self.location_provider {
            Some(provider) => provider.clone(),
            None => Arc::new(TopLocationsProvider::new(self.clone())),
        }
    }

    // =========================================================================
    // Search and bookings
    // =========================================================================

    /// Start building vehicle searches
    pub fn search(&self) -> SearchOrchestrator {
        SearchOrchestrator::new(self.clone())
    }

    /// Detailed quote for one result of a search
    #[instrument(skip_all, fields(supplier = %result.supplier.code, vehicle = %result.code))]
    pub async fn pending_booking(
        &self,
        search: &Search,
        result: &SearchResult,
        depots: &DepotPair,
    ) -> Result<PendingBooking> {
        self.executor
            .execute(requests::pending_booking(search, result, depots))
            .await
    }

    /// Submit a pending booking
    #[instrument(skip_all, fields(supplier = %pending.result.supplier.code))]
    pub async fn create_booking(&self, pending: &PendingBooking) -> Result<Booking> {
        let suppliers = self.suppliers().await?;
        let descriptor = requests::create_booking(pending, &self.alias_param(), suppliers)?;
        let booking = self.executor.execute(descriptor).await?;
        debug!(booking_id = booking.id, "Booking created");
        Ok(booking)
    }

    /// Cancel a booking
    #[instrument(skip_all, fields(booking_id = booking.id))]
    pub async fn cancel_booking(&self, booking: &Booking) -> Result<()> {
        self.executor
            .execute(requests::cancel_booking(booking))
            .await
    }

    /// Find a booking by confirmation number and the driver's last name
    #[instrument(skip(self))]
    pub async fn fetch_booking(&self, confirmation: &str, last_name: &str) -> Result<Booking> {
        let suppliers = self.suppliers().await?;
        self.executor
            .execute(requests::fetch_booking(confirmation, last_name, suppliers))
            .await
    }

    /// Terms and conditions of a confirmed booking
    #[instrument(skip_all, fields(booking_id = booking.id))]
    pub async fn booking_terms(&self, booking: &Booking) -> Result<Vec<SupplierTerm>> {
        self.executor
            .execute(requests::booking_terms(booking.id))
            .await
    }

    /// Supplier terms and conditions for a quote
    #[instrument(skip_all, fields(supplier = %pending.result.supplier.code))]
    pub async fn supplier_terms(&self, pending: &PendingBooking) -> Result<Vec<SupplierTerm>> {
        self.executor
            .execute(requests::supplier_terms(pending))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpMethod;
    use crate::transport::{MockTransport, TransportError};
    use crate::wire::samples;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::time::Duration;

    const DOMAIN: &str = "https://x.test";

    fn client() -> (Arc<MockTransport>, CarHireClient) {
        let mock = Arc::new(MockTransport::new());
        (mock.clone(), CarHireClient::new(mock))
    }

    fn alias_route(mock: &MockTransport, alias: &str) {
        mock.on(HttpMethod::Get, "/json/v1.2")
            .respond_json(json!({"client": {"alias": alias}}));
    }

    async fn ready_client() -> (Arc<MockTransport>, CarHireClient) {
        let (mock, client) = client();
        alias_route(&mock, "acme");
        client.setup("abc", DOMAIN).await.unwrap();
        (mock, client)
    }

    #[tokio::test]
    async fn test_setup_ready() {
        let (mock, client) = client();
        alias_route(&mock, "acme");
        let mut status = client.subscribe();
        assert_eq!(client.status(), ClientStatus::NotReady);

        let alias = client.setup("abc", DOMAIN).await.unwrap();
        assert_eq!(alias, "acme");
        assert_eq!(client.status(), ClientStatus::Ready);
        assert_eq!(client.alias().as_deref(), Some("acme"));
        assert_eq!(*status.borrow_and_update(), ClientStatus::Ready);

        let request = &mock.requests()[0];
        assert_eq!(request.url.as_str(), "https://x.test/json/v1.2");
        assert_eq!(request.header("Authorization"), Some("Basic abc"));
    }

    #[tokio::test]
    async fn test_setup_failed() {
        let (mock, client) = client();
        mock.on(HttpMethod::Get, "/json/v1.2")
            .respond(401, r#"{"message": "Invalid SDK key"}"#);

        let err = client.setup("bad", DOMAIN).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid SDK key");
        assert_eq!(client.status(), ClientStatus::Failed);
        assert!(client.alias().is_none());
        assert!(matches!(
            client.wait_until_ready().await,
            Err(CarHireError::NotReady)
        ));
    }

    #[tokio::test]
    async fn test_stale_setup_superseded() {
        let (mock, client) = client();
        mock.on(HttpMethod::Get, "/json/v1.2")
            .delay(Duration::from_millis(100))
            .fail(TransportError::Timeout);

        let slow = {
            let client = client.clone();
            tokio::spawn(async move { client.setup("old", DOMAIN).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        alias_route(&mock, "fresh");
        assert_eq!(client.setup("new", DOMAIN).await.unwrap(), "fresh");

        let stale = slow.await.unwrap();
        assert!(matches!(stale, Err(CarHireError::Superseded)));
        assert_eq!(client.status(), ClientStatus::Ready);
        assert_eq!(client.alias().as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_wait_until_ready() {
        let (mock, client) = client();
        mock.on(HttpMethod::Get, "/json/v1.2")
            .delay(Duration::from_millis(30))
            .respond_json(json!({"client": {"alias": "acme"}}));

        assert!(matches!(
            client.wait_until_ready().await,
            Err(CarHireError::NotReady)
        ));

        let setup = {
            let client = client.clone();
            tokio::spawn(async move { client.setup("abc", DOMAIN).await })
        };
        tokio::time::sleep(Duration::from_millis(5)).await;
        client.wait_until_ready().await.unwrap();
        assert_eq!(setup.await.unwrap().unwrap(), "acme");
    }

    #[tokio::test]
    async fn test_setup_from_config() {
        let (mock, client) = client();
        alias_route(&mock, "acme");

        let missing = ClientConfig::builder().domain(DOMAIN).build();
        let err = client.setup_from_config(&missing).await.unwrap_err();
        assert!(matches!(err, CarHireError::Configuration(_)));
        assert_eq!(mock.request_count(), 0);

        let config = ClientConfig::builder().domain(DOMAIN).sdk_key("abc").build();
        assert_eq!(client.setup_from_config(&config).await.unwrap(), "acme");
    }

    #[tokio::test]
    async fn test_requests_gated_until_ready() {
        let (mock, client) = client();
        let err = client.suppliers().await.unwrap_err();
        assert!(matches!(err, CarHireError::NotReady));
        let err = client.fetch_booking("HZ1", "Driver").await.unwrap_err();
        assert!(matches!(err, CarHireError::NotReady));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_suppliers_cached() {
        let (mock, client) = ready_client().await;
        mock.on(HttpMethod::Get, "/json/v1.2/supplier/list")
            .with_query("alias", "acme")
            .delay(Duration::from_millis(20))
            .respond_json(samples::supplier_list());

        let (a, b) = tokio::join!(client.suppliers(), client.suppliers());
        assert_eq!(a.unwrap().len(), 3);
        assert_eq!(b.unwrap().len(), 3);
        assert_eq!(client.supplier("AV").await.unwrap().unwrap().name, "Avis");
        assert!(client.supplier("ZZ").await.unwrap().is_none());

        assert_eq!(mock.requests_to("/json/v1.2/supplier/list").len(), 1);
        assert_eq!(client.cached_suppliers().unwrap().len(), 3);

        client.clear_caches().await;
        assert!(client.cached_suppliers().is_none());
        client.suppliers().await.unwrap();
        assert_eq!(mock.requests_to("/json/v1.2/supplier/list").len(), 2);
    }

    #[tokio::test]
    async fn test_setup_drops_cached_lists() {
        let (mock, client) = ready_client().await;
        mock.on(HttpMethod::Get, "/json/v1.2/supplier/list")
            .with_query("alias", "acme")
            .respond_json(samples::supplier_list());
        mock.on(HttpMethod::Get, "/json/v1.2/supplier/list")
            .with_query("alias", "other")
            .respond_json(json!({"data": [
                {"code": "SX", "name": "Sixt", "image": "https://img.test/sx.png"}
            ]}));
        assert_eq!(client.suppliers().await.unwrap().len(), 3);

        alias_route(&mock, "other");
        client.setup("xyz", "https://other.test").await.unwrap();
        assert!(client.cached_suppliers().is_none());

        let codes: Vec<String> = client
            .suppliers()
            .await
            .unwrap()
            .iter()
            .map(|s| s.code.clone())
            .collect();
        assert_eq!(codes, vec!["SX".to_string()]);
        assert_eq!(mock.requests_to("/json/v1.2/supplier/list").len(), 2);
    }

    #[tokio::test]
    async fn test_top_locations_cached() {
        let (mock, client) = ready_client().await;
        mock.on(HttpMethod::Get, "/json/v1.2/search/toplocations")
            .respond_json(json!({"data": [{
                "latitude": "-33.9399", "longitude": "151.1753",
                "fullLocationName": "Sydney Airport, NSW, Australia",
                "displayName": "Sydney Airport", "countryName": "Australia",
                "code": "SYD", "isAirport": true
            }]}));

        let first = client.top_locations().await.unwrap();
        let second = client.top_locations().await.unwrap();
        assert_eq!(first.all, second.all);
        assert!(first.find_airport("syd").is_some());
        assert_eq!(
            mock.requests_to("/json/v1.2/search/toplocations").len(),
            1
        );
    }

    #[tokio::test]
    async fn test_fetch_and_cancel_booking() {
        let (mock, client) = ready_client().await;
        mock.on(HttpMethod::Get, "/json/v1.2/supplier/list")
            .respond_json(samples::supplier_list());
        mock.on(HttpMethod::Get, "/json/v1.2/booking")
            .with_query("supplierConfirmation", "HZ123456")
            .respond_json(json!({"data": samples::booking(1)}));
        mock.on(HttpMethod::Post, "/json/v1.2/booking/cancel")
            .respond_json(json!({"success": true}));

        let booking = client.fetch_booking("HZ123456", "Driver").await.unwrap();
        assert_eq!(booking.depots.supplier.name, "Hertz");

        client.cancel_booking(&booking).await.unwrap();
        let cancel = &mock.requests_to("/json/v1.2/booking/cancel")[0];
        assert_eq!(cancel.query_param("bookingID").as_deref(), Some("4242"));
        assert!(cancel.body.is_none());
    }
}
