//! Search orchestration

use carhire_core::{
    AgeGroup, Country, DateRange, PendingBooking, Search, SearchResult, SearchResults,
};
use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info, instrument, warn};

use super::events::SearchEvent;
use super::handle::{EventSender, SearchHandle};
use crate::client::CarHireClient;
use crate::error::{CarHireError, Result};
use crate::requests;
use crate::session::ClientStatus;

/// Runs vehicle searches across every supplier
#[derive(Debug, Clone)]
pub struct SearchOrchestrator {
    client: CarHireClient,
}

impl SearchOrchestrator {
    pub(crate) fn new(client: CarHireClient) -> Self {
        Self { client }
    }

    /// Start a search in the background
    ///
    /// Must be called within a tokio runtime.
    pub fn start(&self, search: Search) -> SearchHandle {
        let client = self.client.clone();
        SearchHandle::spawn(move |events| run(client, search, events))
    }

    /// Search from and back to the airport with IATA `code`
    ///
    /// Fails before any search request is sent when the client is not ready
    /// or the airport cannot be resolved.
    #[instrument(skip(self, date_range, residency))]
    pub async fn search_at_airport(
        &self,
        code: &str,
        date_range: DateRange,
        residency: Country,
        age: AgeGroup,
    ) -> Result<SearchHandle> {
        if self.client.status() != ClientStatus::Ready {
            return Err(CarHireError::NotReady);
        }
        let location = self
            .client
            .location_provider()
            .resolve_airport(code)
            .await
            .ok_or_else(|| {
                CarHireError::Location(format!("No Location found for airport code {}", code))
            })?;

        let mut search = Search::at(location, date_range);
        search.residency = residency;
        search.age = age;
        Ok(self.start(search))
    }

    /// Fetch the full quote for one result of a finished search
    pub async fn select(
        &self,
        search: &Search,
        results: &SearchResults,
        result: &SearchResult,
    ) -> Result<PendingBooking> {
        let response = results.response_for(result).ok_or_else(|| {
            CarHireError::Validation(format!(
                "{} is not part of these search results",
                result.supplier.name
            ))
        })?;
        self.client
            .pending_booking(search, result, &response.depots)
            .await
    }
}

async fn run(client: CarHireClient, search: Search, events: EventSender) {
    let terminal = match search_all(&client, &search, &events).await {
        Ok(results) => {
            info!(responses = results.len(), "Search finished");
            SearchEvent::Finished(results)
        }
        Err(error) => {
            warn!(error = %error, "Search failed");
            SearchEvent::Failed(error)
        }
    };
    events.emit(terminal);
}

async fn search_all(
    client: &CarHireClient,
    search: &Search,
    events: &EventSender,
) -> Result<SearchResults> {
    search.validate().map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        CarHireError::Validation(messages.join("\n"))
    })?;

    let suppliers = client.suppliers().await?;
    let alias = client.alias_param();
    let pairs = client
        .execute(requests::nearest_depots(search, &alias, suppliers)?)
        .await?;
    if pairs.is_empty() {
        return Err(CarHireError::NoDepots);
    }
    debug!(pairs = pairs.len(), "Depots found");
    events.emit(SearchEvent::DepotsFound(pairs.clone()));

    let dispatched = pairs.len();
    let mut outstanding: FuturesUnordered<_> = pairs
        .into_iter()
        .map(|pair| {
            let supplier = pair.supplier.clone();
            let descriptor = requests::search_vehicles(search, pair, &alias);
            let executor = client.executor().clone();
            async move { (supplier, executor.execute(descriptor).await) }
        })
        .collect();

    let mut results = SearchResults::new();
    let mut completed = 0;
    while let Some((supplier, outcome)) = outstanding.next().await {
        completed += 1;
        debug!(supplier = %supplier.code, completed, dispatched, "Supplier search completed");
        match outcome {
            Ok(response) => {
                events.emit(SearchEvent::SupplierResults {
                    supplier,
                    results: response.results.clone(),
                });
                results.push(response);
            }
            Err(error) => {
                warn!(supplier = %supplier.code, error = %error, "Supplier search failed");
                events.emit(SearchEvent::SupplierFailed { supplier, error });
            }
        }
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpMethod;
    use crate::transport::{MockTransport, TransportError};
    use crate::wire::samples;
    use async_trait::async_trait;
    use carhire_core::{Coordinate, Location, LocationProvider, Supplier};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    const NEAREST: &str = "/json/v1.2/search/nearest-depot-pair";
    const VEHICLES: &str = "/json/v1.2/search/vehicles";

    fn sydney_airport() -> Location {
        let mut airport = Location::new(
            "Sydney Airport",
            "NSW, Australia",
            "AU",
            Coordinate::new(-33.9399, 151.1753),
        );
        airport.airport_code = Some("SYD".to_string());
        airport
    }

    fn trip() -> DateRange {
        let day = NaiveDate::from_ymd_opt(2026, 11, 2).unwrap();
        DateRange::new(
            day.and_hms_opt(10, 0, 0).unwrap(),
            day.and_hms_opt(10, 0, 0).unwrap() + chrono::Duration::days(3),
        )
    }

    fn search() -> Search {
        Search::at(sydney_airport(), trip())
    }

    async fn ready_client() -> (Arc<MockTransport>, CarHireClient) {
        let mock = Arc::new(MockTransport::new());
        mock.on(HttpMethod::Get, "/json/v1.2")
            .respond_json(json!({"client": {"alias": "acme"}}));
        mock.on(HttpMethod::Get, "/json/v1.2/supplier/list")
            .respond_json(samples::supplier_list());
        let client = CarHireClient::new(mock.clone());
        client.setup("abc", "https://x.test").await.unwrap();
        (mock, client)
    }

    fn vehicles_for(mock: &MockTransport, code: &str, cars: &[(&str, f64)]) {
        mock.on(HttpMethod::Get, VEHICLES)
            .with_query("supplierCode", code)
            .respond_json(samples::vehicles(cars));
    }

    async fn collect(mut handle: SearchHandle) -> Vec<SearchEvent> {
        let mut events = Vec::new();
        while let Some(event) = handle.next().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_full_search() {
        let (mock, client) = ready_client().await;
        mock.on(HttpMethod::Get, NEAREST)
            .respond_json(samples::depots(&["HZ", "AV"]));
        vehicles_for(&mock, "HZ", &[("Corolla", 150.0), ("Camry", 210.0)]);
        vehicles_for(&mock, "AV", &[("Yaris", 99.5)]);

        let events = collect(client.search().start(search())).await;
        assert!(matches!(&events[0], SearchEvent::DepotsFound(pairs) if pairs.len() == 2));
        assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);

        let Some(SearchEvent::Finished(results)) = events.last() else {
            panic!("expected Finished, got {:?}", events.last());
        };
        assert_eq!(results.len(), 2);
        let totals: Vec<Decimal> = results.all().iter().map(|r| r.cost.total).collect();
        assert_eq!(
            totals,
            vec![Decimal::new(995, 1), Decimal::from(150), Decimal::from(210)]
        );

        assert_eq!(mock.requests_to(NEAREST).len(), 1);
        let searched = mock.requests_to(VEHICLES);
        assert_eq!(searched.len(), 2);
        let hertz = searched
            .iter()
            .find(|r| r.query_param("supplierCode").as_deref() == Some("HZ"))
            .unwrap();
        assert_eq!(
            hertz.query_param("pickUpDepot[depotCode]").as_deref(),
            Some("HZ2")
        );
    }

    #[tokio::test]
    async fn test_supplier_failures_do_not_fail_search() {
        let (mock, client) = ready_client().await;
        mock.on(HttpMethod::Get, NEAREST)
            .respond_json(samples::depots(&["HZ", "AV", "EC"]));
        vehicles_for(&mock, "HZ", &[("Corolla", 150.0)]);
        mock.on(HttpMethod::Get, VEHICLES)
            .with_query("supplierCode", "AV")
            .respond_json(json!({"message": "Depot closed"}));
        mock.on(HttpMethod::Get, VEHICLES)
            .with_query("supplierCode", "EC")
            .fail(TransportError::Timeout);

        let events = collect(client.search().start(search())).await;
        let failures: Vec<(String, String)> = events
            .iter()
            .filter_map(|event| match event {
                SearchEvent::SupplierFailed { supplier, error } => {
                    Some((supplier.code.clone(), error.to_string()))
                }
                _ => None,
            })
            .collect();
        assert_eq!(failures.len(), 2);
        assert!(failures.contains(&("AV".to_string(), "Depot closed".to_string())));
        assert!(failures.contains(&("EC".to_string(), "The request timed out".to_string())));

        assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
        let Some(SearchEvent::Finished(results)) = events.last() else {
            panic!("expected Finished, got {:?}", events.last());
        };
        assert_eq!(results.len(), 1);
        assert_eq!(results.responses[0].supplier().code, "HZ");
    }

    #[tokio::test]
    async fn test_every_supplier_failing_still_finishes() {
        let (mock, client) = ready_client().await;
        mock.on(HttpMethod::Get, NEAREST)
            .respond_json(samples::depots(&["HZ", "AV"]));
        mock.on(HttpMethod::Get, VEHICLES).fail(TransportError::Timeout);

        let results = client.search().start(search()).finish().await.unwrap();
        assert!(results.is_empty());
        assert_eq!(mock.requests_to(VEHICLES).len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_search_sends_nothing() {
        let (mock, client) = ready_client().await;
        let before = mock.request_count();

        let mut invalid = Search::new();
        invalid.date_range = DateRange::new(trip().end, trip().start);
        let err = client.search().start(invalid).finish().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please enter a Pickup Location\nPlease enter a Return Location\nReturn Date must be after pickup date"
        );
        assert_eq!(mock.request_count(), before);
    }

    #[tokio::test]
    async fn test_no_depots() {
        let (mock, client) = ready_client().await;
        mock.on(HttpMethod::Get, NEAREST)
            .respond_json(json!({"data": {"ZZ": {"pickUpDepot": [], "returnDepot": []}}}));

        let events = collect(client.search().start(search())).await;
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            SearchEvent::Failed(CarHireError::NoDepots)
        ));
        assert!(mock.requests_to(VEHICLES).is_empty());
    }

    #[tokio::test]
    async fn test_depot_error_fails_search() {
        let (mock, client) = ready_client().await;
        mock.on(HttpMethod::Get, NEAREST)
            .respond_json(json!({"message": "Invalid code"}));

        let err = client.search().start(search()).finish().await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid code");
    }

    #[tokio::test]
    async fn test_supplier_list_failure_fails_search() {
        let mock = Arc::new(MockTransport::new());
        mock.on(HttpMethod::Get, "/json/v1.2")
            .respond_json(json!({"client": {"alias": "acme"}}));
        mock.on(HttpMethod::Get, "/json/v1.2/supplier/list")
            .fail(TransportError::Connection("refused".to_string()));
        let client = CarHireClient::new(mock.clone());
        client.setup("abc", "https://x.test").await.unwrap();

        let err = client.search().start(search()).finish().await.unwrap_err();
        assert!(matches!(err, CarHireError::Transport(_)));
        assert!(mock.requests_to(NEAREST).is_empty());
    }

    #[tokio::test]
    async fn test_limit_to_suppliers() {
        let (mock, client) = ready_client().await;
        mock.on(HttpMethod::Get, NEAREST)
            .respond_json(samples::depots(&["HZ", "AV"]));
        vehicles_for(&mock, "AV", &[("Yaris", 99.5)]);

        let mut limited = search();
        limited.limit_to_suppliers = vec![Supplier::new("AV", "Avis", "")];
        let results = client.search().start(limited).finish().await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(mock.requests_to(VEHICLES).len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_suppresses_events() {
        let (mock, client) = ready_client().await;
        mock.on(HttpMethod::Get, NEAREST)
            .respond_json(samples::depots(&["HZ", "AV"]));
        mock.on(HttpMethod::Get, VEHICLES)
            .delay(Duration::from_millis(200))
            .respond_json(samples::vehicles(&[("Corolla", 150.0)]));

        let mut handle = client.search().start(search());
        assert!(matches!(
            handle.next().await,
            Some(SearchEvent::DepotsFound(_))
        ));
        handle.cancel();

        let late = tokio::time::timeout(Duration::from_millis(400), handle.next()).await;
        assert!(matches!(late, Ok(None)));
    }

    #[tokio::test]
    async fn test_search_at_airport() {
        let (mock, client) = ready_client().await;
        mock.on(HttpMethod::Get, "/json/v1.2/search/toplocations")
            .respond_json(json!({"data": [{
                "latitude": "-33.9399", "longitude": "151.1753",
                "fullLocationName": "Sydney Airport, NSW, Australia",
                "displayName": "Sydney Airport", "countryName": "Australia",
                "code": "SYD", "isAirport": true
            }]}));
        mock.on(HttpMethod::Get, NEAREST)
            .respond_json(samples::depots(&["HZ"]));
        vehicles_for(&mock, "HZ", &[("Corolla", 150.0)]);

        let handle = client
            .search()
            .search_at_airport("SYD", trip(), Country::new("NZ"), AgeGroup::Seventy)
            .await
            .unwrap();
        assert_eq!(handle.finish().await.unwrap().len(), 1);

        let request = &mock.requests_to(VEHICLES)[0];
        assert_eq!(request.query_param("driverCountryCode").as_deref(), Some("NZ"));
        assert_eq!(request.query_param("driverAge").as_deref(), Some("70"));
        let nearest = &mock.requests_to(NEAREST)[0];
        assert_eq!(nearest.query_param("pickUpLocationType").as_deref(), Some("1"));
    }

    struct NoAirports;

    #[async_trait]
    impl LocationProvider for NoAirports {
        async fn current_location(&self) -> Option<Coordinate> {
            None
        }

        async fn search_locations(&self, _query: &str) -> Vec<Location> {
            Vec::new()
        }

        async fn resolve_airport(&self, _code: &str) -> Option<Location> {
            None
        }
    }

    #[tokio::test]
    async fn test_unknown_airport_fails_early() {
        let (mock, client) = ready_client().await;
        let client = client.with_location_provider(Arc::new(NoAirports));
        let before = mock.request_count();

        let err = client
            .search()
            .search_at_airport("XXX", trip(), Country::default(), AgeGroup::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No Location found for airport code XXX");
        assert_eq!(mock.request_count(), before);
    }

    #[tokio::test]
    async fn test_airport_search_before_setup_not_ready() {
        let mock = Arc::new(MockTransport::new());
        let client = CarHireClient::new(mock.clone());

        let err = client
            .search()
            .search_at_airport("SYD", trip(), Country::default(), AgeGroup::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CarHireError::NotReady));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_select() {
        let (mock, client) = ready_client().await;
        mock.on(HttpMethod::Get, NEAREST)
            .respond_json(samples::depots(&["HZ"]));
        vehicles_for(&mock, "HZ", &[("Toyota Corolla or similar", 150.0)]);
        mock.on(HttpMethod::Get, "/json/v1.2/search/vehicle")
            .respond_json(json!({"data": {"0": samples::pending_vehicle()}}));

        let search = search();
        let results = client.search().start(search.clone()).finish().await.unwrap();
        let result = results.all()[0].clone();

        let pending = client
            .search()
            .select(&search, &results, &result)
            .await
            .unwrap();
        assert_eq!(pending.sipp_id, 11);
        assert_eq!(pending.depots.pickup_depot.code, "HZ2");

        let request = &mock.requests_to("/json/v1.2/search/vehicle")[0];
        assert_eq!(request.query_param("pickUpDepotCode").as_deref(), Some("HZ2"));
        assert_eq!(request.query_param("returnDepotCode").as_deref(), Some("HZ3"));

        let mut stranger = result.clone();
        stranger.supplier = Supplier::new("ZZ", "Nobody", "");
        let err = client
            .search()
            .select(&search, &results, &stranger)
            .await
            .unwrap_err();
        assert!(matches!(err, CarHireError::Validation(_)));
    }
}
