//! HTTP client implementation.
//!
//! Provides the main client for the Energi Data Service REST API.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use url::Url;

use super::config::ClientConfig;
use super::error::ClientError;
use super::query::DayAheadQuery;
use super::transport::{ReqwestTransport, Transport};
use crate::types::{PriceArea, PriceAreaFilter, PriceQueryResult};

/// HTTP client for the Energi Data Service REST API.
///
/// Cloning is cheap; clones share the transport. Each call is a single
/// round trip with no retries or caching.
#[derive(Clone)]
pub struct EnergiDataClient {
    config: ClientConfig,
    base_url: Url,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for EnergiDataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnergiDataClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl EnergiDataClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Creates a new client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, ClientError> {
        Self::new(ClientConfig::default())
    }

    /// Creates a new client with the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::new(ClientConfig::new(base_url))
    }

    /// Creates a client that sends requests through `transport`.
    ///
    /// The transport's own settings apply; only the base URL of `config` is
    /// used.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ClientError> {
        config.validate()?;
        let base_url = config.parsed_base_url()?;

        Ok(Self {
            config,
            base_url,
            transport,
        })
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Gets day-ahead prices for the given price areas.
    ///
    /// # Arguments
    ///
    /// * `price_areas` - Area codes in the order they should appear in the filter
    /// * `limit` - Optional number of records (default: 100)
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` without sending a request if the list is empty
    /// or contains a blank code. Otherwise fails if the request fails, the
    /// server returns a non-success status, or the body is malformed.
    pub async fn fetch_day_ahead_prices<S: AsRef<str> + Sync>(
        &self,
        price_areas: &[S],
        limit: Option<u32>,
    ) -> Result<PriceQueryResult, ClientError> {
        let query = Self::build_query(price_areas, limit)?;
        self.execute(&query).await
    }

    /// Gets day-ahead prices for a single price area.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `price_area` is blank, otherwise the same
    /// errors as [`Self::fetch_day_ahead_prices`].
    pub async fn fetch_day_ahead_prices_for_area(
        &self,
        price_area: &str,
        limit: Option<u32>,
    ) -> Result<PriceQueryResult, ClientError> {
        let query = Self::build_single_query(price_area, limit)?;
        self.execute(&query).await
    }

    /// Like [`Self::fetch_day_ahead_prices`], but gives up with `Cancelled`
    /// as soon as `cancel` fires.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` if the token fires before the response is read.
    pub async fn fetch_day_ahead_prices_with_cancel<S: AsRef<str> + Sync>(
        &self,
        price_areas: &[S],
        limit: Option<u32>,
        cancel: &CancellationToken,
    ) -> Result<PriceQueryResult, ClientError> {
        let query = Self::build_query(price_areas, limit)?;
        self.execute_with_cancel(&query, cancel).await
    }

    /// Like [`Self::fetch_day_ahead_prices_for_area`], but gives up with
    /// `Cancelled` as soon as `cancel` fires.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` if the token fires before the response is read.
    pub async fn fetch_day_ahead_prices_for_area_with_cancel(
        &self,
        price_area: &str,
        limit: Option<u32>,
        cancel: &CancellationToken,
    ) -> Result<PriceQueryResult, ClientError> {
        let query = Self::build_single_query(price_area, limit)?;
        self.execute_with_cancel(&query, cancel).await
    }

    /// Runs a prepared query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server returns a
    /// non-success status, or the body is malformed.
    pub async fn execute(&self, query: &DayAheadQuery) -> Result<PriceQueryResult, ClientError> {
        let url = query.to_url(&self.base_url)?;
        tracing::debug!(url = %url, "fetching day-ahead prices");

        let resp = self.transport.get(&url).await?;

        if !resp.status.is_success() {
            tracing::warn!(status = %resp.status, "day-ahead price request failed");
            return Err(ClientError::RequestFailed {
                status: resp.status,
            });
        }

        let result: PriceQueryResult = serde_json::from_str(&resp.body)?;
        tracing::debug!(
            records = result.len(),
            total = result.total(),
            "received day-ahead prices"
        );
        Ok(result)
    }

    /// Runs a prepared query, racing it against `cancel`.
    ///
    /// Cancelling drops the in-flight request.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` if the token fires first, otherwise the same errors
    /// as [`Self::execute`].
    pub async fn execute_with_cancel(
        &self,
        query: &DayAheadQuery,
        cancel: &CancellationToken,
    ) -> Result<PriceQueryResult, ClientError> {
        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!("day-ahead price request cancelled");
                Err(ClientError::Cancelled)
            }
            result = self.execute(query) => result,
        }
    }

    fn build_query<S: AsRef<str>>(
        price_areas: &[S],
        limit: Option<u32>,
    ) -> Result<DayAheadQuery, ClientError> {
        let filter = PriceAreaFilter::from_codes(price_areas)?;
        Ok(Self::apply_limit(DayAheadQuery::new(filter), limit))
    }

    fn build_single_query(
        price_area: &str,
        limit: Option<u32>,
    ) -> Result<DayAheadQuery, ClientError> {
        let area = PriceArea::new(price_area)?;
        Ok(Self::apply_limit(
            DayAheadQuery::new(PriceAreaFilter::single(area)),
            limit,
        ))
    }

    fn apply_limit(query: DayAheadQuery, limit: Option<u32>) -> DayAheadQuery {
        match limit {
            Some(l) => query.with_limit(l),
            None => query,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use reqwest::StatusCode;
    use rust_decimal::Decimal;

    use super::*;
    use crate::client::transport::TransportResponse;

    const SAMPLE_BODY: &str = r#"{
        "total": 1,
        "filters": "{\"PriceArea\":[\"DK2\"]}",
        "limit": 100,
        "dataset": "DayAheadPrices",
        "records": [
            {
                "TimeUTC": "2025-09-27T21:00:00",
                "TimeDK": "2025-09-27T23:00:00",
                "PriceArea": "DK2",
                "DayAheadPriceEUR": 99.269997,
                "DayAheadPriceDKK": 740.951258
            }
        ]
    }"#;

    /// Canned transport recording every requested URL.
    struct MockTransport {
        status: StatusCode,
        body: String,
        delay: Option<Duration>,
        calls: AtomicUsize,
        urls: Mutex<Vec<Url>>,
    }

    impl MockTransport {
        fn new(status: StatusCode, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                delay: None,
                calls: AtomicUsize::new(0),
                urls: Mutex::new(Vec::new()),
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last_query(&self) -> Vec<(String, String)> {
            let urls = self.urls.lock().expect("urls lock");
            urls.last()
                .map(|u| {
                    u.query_pairs()
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn get(&self, url: &Url) -> Result<TransportResponse, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.urls.lock().expect("urls lock").push(url.clone());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            Ok(TransportResponse::new(self.status, self.body.clone()))
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl Transport for FailingTransport {
        async fn get(&self, _url: &Url) -> Result<TransportResponse, ClientError> {
            Err(ClientError::Transport("connection refused".to_string()))
        }
    }

    fn client_with(transport: Arc<MockTransport>) -> EnergiDataClient {
        EnergiDataClient::with_transport(ClientConfig::default(), transport).expect("client")
    }

    fn filter_param(query: &[(String, String)]) -> serde_json::Value {
        let (_, raw) = query
            .iter()
            .find(|(k, _)| k == "filter")
            .expect("filter param");
        serde_json::from_str(raw).expect("filter json")
    }

    fn limit_param(query: &[(String, String)]) -> String {
        query
            .iter()
            .find(|(k, _)| k == "limit")
            .map(|(_, v)| v.clone())
            .expect("limit param")
    }

    #[test]
    fn test_client_new() {
        let client = EnergiDataClient::new(ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_with_defaults() {
        let client = EnergiDataClient::with_defaults().expect("client");
        assert_eq!(client.config().base_url, "https://api.energidataservice.dk");
    }

    #[test]
    fn test_client_invalid_config() {
        let client = EnergiDataClient::with_base_url("");
        assert!(matches!(client, Err(ClientError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_fetch_single_area_builds_filter() {
        let transport = Arc::new(MockTransport::new(StatusCode::OK, SAMPLE_BODY));
        let client = client_with(Arc::clone(&transport));

        let result = client
            .fetch_day_ahead_prices_for_area("DK2", None)
            .await
            .expect("result");

        assert_eq!(transport.calls(), 1);
        let query = transport.last_query();
        assert_eq!(query.len(), 2);
        assert_eq!(filter_param(&query), serde_json::json!({"PriceArea": ["DK2"]}));
        assert_eq!(limit_param(&query), "100");

        assert_eq!(result.total(), 1);
        assert_eq!(result.dataset(), "DayAheadPrices");
        let record = result.records().first().expect("record");
        assert_eq!(
            record.day_ahead_price_eur(),
            Decimal::from_str("99.269997").expect("decimal")
        );
        assert_eq!(
            record.day_ahead_price_dkk(),
            Decimal::from_str("740.951258").expect("decimal")
        );
    }

    #[tokio::test]
    async fn test_fetch_multiple_areas_keeps_order() {
        let transport = Arc::new(MockTransport::new(StatusCode::OK, SAMPLE_BODY));
        let client = client_with(Arc::clone(&transport));

        client
            .fetch_day_ahead_prices(&["DK2", "DK1", "DK2"], Some(50))
            .await
            .expect("result");

        let query = transport.last_query();
        assert_eq!(
            filter_param(&query),
            serde_json::json!({"PriceArea": ["DK2", "DK1", "DK2"]})
        );
        assert_eq!(limit_param(&query), "50");
    }

    #[tokio::test]
    async fn test_fetch_invalid_input_sends_nothing() {
        let transport = Arc::new(MockTransport::new(StatusCode::OK, SAMPLE_BODY));
        let client = client_with(Arc::clone(&transport));

        let empty: [&str; 0] = [];
        let err = client
            .fetch_day_ahead_prices(&empty, None)
            .await
            .expect_err("empty list");
        assert!(matches!(err, ClientError::InvalidArgument(_)));

        let err = client
            .fetch_day_ahead_prices(&["DK1", "  "], None)
            .await
            .expect_err("blank entry");
        assert!(matches!(err, ClientError::InvalidArgument(_)));

        for blank in ["", "   "] {
            let err = client
                .fetch_day_ahead_prices_for_area(blank, None)
                .await
                .expect_err("blank area");
            assert!(matches!(err, ClientError::InvalidArgument(_)));
        }

        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_bad_request() {
        let transport = Arc::new(MockTransport::new(StatusCode::BAD_REQUEST, SAMPLE_BODY));
        let client = client_with(transport);

        let err = client
            .fetch_day_ahead_prices_for_area("DK1", None)
            .await
            .expect_err("bad request");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        for body in ["", "not json", r#"{"total": "many"}"#, r#"{"records": 5}"#] {
            let transport = Arc::new(MockTransport::new(StatusCode::OK, body));
            let client = client_with(transport);

            let err = client
                .fetch_day_ahead_prices_for_area("DK1", None)
                .await
                .expect_err("malformed");
            assert!(matches!(err, ClientError::MalformedResponse(_)), "{}", body);
        }
    }

    #[tokio::test]
    async fn test_fetch_unknown_area_is_empty_success() {
        let body = r#"{"total":0,"filters":"{\"PriceArea\":[\"XX9\"]}","limit":100,"dataset":"DayAheadPrices","records":[]}"#;
        let transport = Arc::new(MockTransport::new(StatusCode::OK, body));
        let client = client_with(transport);

        let result = client
            .fetch_day_ahead_prices_for_area("XX9", None)
            .await
            .expect("empty result");
        assert!(result.is_empty());
        assert_eq!(result.total(), 0);
    }

    #[tokio::test]
    async fn test_fetch_transport_error_propagates() {
        let client =
            EnergiDataClient::with_transport(ClientConfig::default(), Arc::new(FailingTransport))
                .expect("client");

        let err = client
            .fetch_day_ahead_prices_for_area("DK1", None)
            .await
            .expect_err("transport error");
        assert!(err.is_transport());
        assert!(err.status().is_none());
    }

    #[tokio::test]
    async fn test_fetch_cancelled_while_waiting() {
        let transport = Arc::new(
            MockTransport::new(StatusCode::OK, SAMPLE_BODY).with_delay(Duration::from_secs(30)),
        );
        let client = client_with(Arc::clone(&transport));
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let err = tokio::time::timeout(
            Duration::from_secs(5),
            client.fetch_day_ahead_prices_with_cancel(&["DK1"], None, &cancel),
        )
        .await
        .expect("returns promptly")
        .expect_err("cancelled");

        assert!(err.is_cancelled());
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_already_cancelled_sends_nothing() {
        let transport = Arc::new(MockTransport::new(StatusCode::OK, SAMPLE_BODY));
        let client = client_with(Arc::clone(&transport));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = client
            .fetch_day_ahead_prices_for_area_with_cancel("DK1", None, &cancel)
            .await
            .expect_err("cancelled");

        assert!(err.is_cancelled());
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_with_cancel_completes_when_not_cancelled() {
        let transport = Arc::new(MockTransport::new(StatusCode::OK, SAMPLE_BODY));
        let client = client_with(transport);
        let cancel = CancellationToken::new();

        let result = client
            .fetch_day_ahead_prices_for_area_with_cancel("DK2", Some(1), &cancel)
            .await
            .expect("result");
        assert_eq!(result.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_input_wins_over_cancellation() {
        let transport = Arc::new(MockTransport::new(StatusCode::OK, SAMPLE_BODY));
        let client = client_with(transport);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = client
            .fetch_day_ahead_prices_for_area_with_cancel(" ", None, &cancel)
            .await
            .expect_err("invalid");
        assert!(matches!(err, ClientError::InvalidArgument(_)));
    }
}
