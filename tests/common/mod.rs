// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use cpf_ledger::api;
use cpf_ledger::application::{Clock, LedgerService};
use cpf_ledger::storage::Repository;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// A clock that only moves when told to. Used to backdate entries.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap() = to;
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Helper to create a service whose clock starts at `start` and only moves
/// when the test moves it.
pub fn test_service_at(start: DateTime<Utc>) -> (LedgerService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start));
    let service = LedgerService::new(Repository::new()).with_clock(clock.clone());
    (service, clock)
}

/// Helper to create a service with a clock fixed at midday on 2024-01-15.
pub fn test_service() -> (LedgerService, Arc<ManualClock>) {
    test_service_at(parse_datetime("2024-01-15", 12, 0))
}

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Helper to build a UTC timestamp on the given day
pub fn parse_datetime(date_str: &str, hour: u32, minute: u32) -> DateTime<Utc> {
    parse_date(date_str)
        .and_hms_opt(hour, minute, 0)
        .unwrap()
        .and_utc()
}

/// Test fixture: an account with some money on it
pub async fn funded_account(service: &LedgerService, cpf: &str, amount: i64) -> Result<()> {
    service.create_account(cpf, "Fixture").await?;
    service.deposit(cpf, amount, Some("opening".into())).await?;
    Ok(())
}

/// In-process HTTP client over the ledger router.
pub struct TestApp {
    router: Router,
    pub clock: Arc<ManualClock>,
}

/// A decoded response: status plus JSON body (`Value::Null` when empty).
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        let (service, clock) = test_service();
        Self {
            router: api::router(Arc::new(service)),
            clock,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        cpf: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cpf) = cpf {
            builder = builder.header("cpf", cpf);
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, cpf: &str) -> TestResponse {
        self.request(Method::GET, uri, Some(cpf), None).await
    }

    pub async fn post(&self, uri: &str, cpf: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, cpf, Some(body)).await
    }

    /// Send a raw, possibly malformed, JSON body.
    pub async fn post_raw(&self, uri: &str, cpf: Option<&str>, body: &str) -> TestResponse {
        let mut builder = Request::builder().method(Method::POST).uri(uri);
        if let Some(cpf) = cpf {
            builder = builder.header("cpf", cpf);
        }
        let request = builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }
}
