#![allow(clippy::unwrap_used)]
// Dispatcher and resource-client tests against a recording transport.
//
// The spy records every request it receives, so precondition failures can
// be checked for "no network call was made".

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::json;

use vatusa_api::{
    ControllerSearch, Error, HttpMethod, HttpRequest, HttpResponse, HttpTransport, NoBody,
    RequestOptions, Scalar, VatusaClient,
};

// ── Helpers ─────────────────────────────────────────────────────────

struct SpyTransport {
    requests: Mutex<Vec<HttpRequest>>,
    status: u16,
    body: String,
}

impl SpyTransport {
    fn new(status: u16, body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            status,
            body: body.into(),
        })
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for SpyTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        self.requests.lock().unwrap().push(request);
        Ok(HttpResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

const BASE: &str = "http://api.example/v1";

fn client_with(spy: &Arc<SpyTransport>) -> VatusaClient {
    VatusaClient::with_transport("abc", BASE, Arc::clone(spy) as Arc<dyn HttpTransport>).unwrap()
}

fn controller_body(cid: u32) -> serde_json::Value {
    json!({
        "cid": cid,
        "first_name": "John",
        "last_name": "Smith",
        "email": null,
        "rating": 5,
        "rating_short": "C1",
        "facility": "ZDC",
        "flags": [],
        "global_roles": [],
        "facility_roles": [],
        "visits": [],
        "facility_date": null,
        "promotion_date": null
    })
}

fn form_value<'a>(request: &'a HttpRequest, key: &str) -> Option<&'a str> {
    request
        .form
        .as_ref()?
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

// ── Preconditions ───────────────────────────────────────────────────

#[tokio::test]
async fn test_malformed_path_never_reaches_transport() {
    let spy = SpyTransport::new(200, "{}");
    let client = client_with(&spy);

    for path in ["controller/1", "", "config/", "?q=1", "http://evil.example/x"] {
        let result = client
            .dispatcher()
            .get::<NoBody>(path, RequestOptions::new())
            .await;
        assert!(
            matches!(result, Err(Error::MalformedPath { path: ref p }) if p == path),
            "path {path:?}: got {result:?}"
        );
    }

    assert_eq!(spy.call_count(), 0);
}

#[tokio::test]
async fn test_unsupported_method_never_reaches_transport() {
    let spy = SpyTransport::new(200, "{}");
    let client = client_with(&spy);

    let methods = [
        reqwest::Method::PATCH,
        reqwest::Method::HEAD,
        reqwest::Method::OPTIONS,
        reqwest::Method::TRACE,
        reqwest::Method::from_bytes(b"PURGE").unwrap(),
    ];

    for method in &methods {
        let result = client
            .dispatcher()
            .call::<NoBody>(method, "/config/", RequestOptions::new())
            .await;
        assert!(
            matches!(result, Err(Error::UnsupportedMethod { method: ref m }) if m == method.as_str()),
            "method {method}: got {result:?}"
        );
    }

    assert_eq!(spy.call_count(), 0);
}

#[tokio::test]
async fn test_method_is_checked_before_path() {
    let spy = SpyTransport::new(200, "{}");
    let client = client_with(&spy);

    let result = client
        .dispatcher()
        .call::<NoBody>(&reqwest::Method::PATCH, "no-slash", RequestOptions::new())
        .await;
    assert!(matches!(result, Err(Error::UnsupportedMethod { .. })));
    assert_eq!(spy.call_count(), 0);
}

// ── Status handling ─────────────────────────────────────────────────

#[tokio::test]
async fn test_every_non_200_status_is_unexpected() {
    for status in [201, 202, 204, 301, 304, 400, 401, 403, 404, 422, 500, 503] {
        let spy = SpyTransport::new(status, controller_body(1).to_string());
        let client = client_with(&spy);

        let result = client.controller.get(1).await;
        assert!(
            matches!(result, Err(Error::UnexpectedStatus { status: s }) if s == status),
            "status {status}: got {result:?}"
        );
        assert_eq!(spy.call_count(), 1);
    }
}

#[tokio::test]
async fn test_no_body_shape_ignores_payload() {
    let spy = SpyTransport::new(200, "");
    let client = client_with(&spy);

    assert!(client.news.delete_news_post(9).await.unwrap());
    let requests = spy.requests();
    assert_eq!(requests[0].method, HttpMethod::Delete);
    assert_eq!(requests[0].url, format!("{BASE}/news/9"));
    assert!(requests[0].form.is_none());
}

#[tokio::test]
async fn test_decode_error_names_shape() {
    let spy = SpyTransport::new(200, "[]");
    let client = client_with(&spy);

    let result = client.controller.get(1).await;
    match result {
        Err(Error::Deserialization { shape, body, .. }) => {
            assert_eq!(shape, "ControllerData");
            assert_eq!(body, "[]");
        }
        other => panic!("expected Deserialization, got: {other:?}"),
    }
}

// ── End to end through the facade ───────────────────────────────────

#[tokio::test]
async fn test_controller_get_end_to_end() {
    let spy = SpyTransport::new(200, controller_body(100).to_string());
    let client = client_with(&spy);

    let controller = client.controller.get(100).await.unwrap();
    assert_eq!(controller.cid, 100);
    assert_eq!(controller.first_name, "John");
    assert_eq!(controller.rating_short, "C1");
    assert_eq!(controller.email, None);

    let requests = spy.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.url, "http://api.example/v1/controller/100");
    assert_eq!(
        request.headers.get(AUTHORIZATION).unwrap().to_str().unwrap(),
        "Bearer abc"
    );
    assert!(request.headers.get(AUTHORIZATION).unwrap().is_sensitive());
    assert!(request.query.is_empty());
    assert!(request.form.is_none());
}

#[tokio::test]
async fn test_path_placeholders_are_not_escaped() {
    let spy = SpyTransport::new(200, "{}");
    let client = client_with(&spy);

    let _ = client.facility.get_staff("Z D/C").await.unwrap();
    assert_eq!(spy.requests()[0].url, format!("{BASE}/facility/Z D/C/staff"));
}

#[tokio::test]
async fn test_raw_call_returns_body_verbatim() {
    let spy = SpyTransport::new(200, r#"{"anything": [1, 2]}"#);
    let client = client_with(&spy);

    let response = client
        .dispatcher()
        .raw_call(&reqwest::Method::PUT, "/custom", RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, r#"{"anything": [1, 2]}"#);

    let value = client
        .dispatcher()
        .get::<Scalar<serde_json::Value>>("/custom", RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(value["anything"][1], 2);
}

// ── Roster selection ────────────────────────────────────────────────

#[tokio::test]
async fn test_roster_flags_select_path() {
    let cases = [
        (true, true, "ALL"),
        (true, false, "HOME"),
        (false, true, "VISITOR"),
    ];

    for (home, visitor, segment) in cases {
        let spy = SpyTransport::new(200, "[]");
        let client = client_with(&spy);

        let roster = client.facility.get_roster("ZDC", home, visitor).await.unwrap();
        assert!(roster.is_empty());

        let requests = spy.requests();
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(
            requests[0].url,
            format!("{BASE}/facility/ZDC/roster/{segment}")
        );
    }
}

#[tokio::test]
async fn test_empty_roster_selection_makes_no_call() {
    let spy = SpyTransport::new(200, "[]");
    let client = client_with(&spy);

    let result = client.facility.get_roster("ZDC", false, false).await;
    assert!(matches!(result, Err(Error::InvalidRosterSelection)));
    assert_eq!(spy.call_count(), 0);
}

// ── Query and form encoding ─────────────────────────────────────────

#[tokio::test]
async fn test_search_sends_only_given_filters() {
    let spy = SpyTransport::new(200, json!([controller_body(1)]).to_string());
    let client = client_with(&spy);

    let found = client
        .controller
        .search(&ControllerSearch::default().first_name("John"))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);

    let request = &spy.requests()[0];
    assert_eq!(request.url, format!("{BASE}/controller/search"));
    assert_eq!(
        request.query,
        vec![("first_name".to_owned(), "John".to_owned())]
    );
}

#[tokio::test]
async fn test_role_mutation_form_body() {
    let spy = SpyTransport::new(200, "");
    let client = client_with(&spy);

    assert!(
        client
            .controller
            .add_facility_role(100, 200, "ZDC", "MTR")
            .await
            .unwrap()
    );
    assert!(
        client
            .controller
            .remove_global_role(100, 200, "DIV_STAFF")
            .await
            .unwrap()
    );

    let requests = spy.requests();
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].url, format!("{BASE}/controller/100/role/facility"));
    assert_eq!(form_value(&requests[0], "admin_cid"), Some("200"));
    assert_eq!(form_value(&requests[0], "facility"), Some("ZDC"));
    assert_eq!(form_value(&requests[0], "role"), Some("MTR"));

    assert_eq!(requests[1].method, HttpMethod::Delete);
    assert_eq!(requests[1].url, format!("{BASE}/controller/100/role/global"));
    assert_eq!(form_value(&requests[1], "role"), Some("DIV_STAFF"));
    assert_eq!(form_value(&requests[1], "facility"), None);
}

#[tokio::test]
async fn test_controller_put_mutations() {
    let spy = SpyTransport::new(200, "");
    let client = client_with(&spy);

    client.controller.update_rating(100, 200, 5).await.unwrap();
    client
        .controller
        .set_flag(100, 200, "NO_PROMOTE", false)
        .await
        .unwrap();
    client
        .controller
        .roster_remove(100, 200, "ZDC", "inactivity")
        .await
        .unwrap();

    let requests = spy.requests();
    assert_eq!(requests[0].method, HttpMethod::Put);
    assert_eq!(requests[0].url, format!("{BASE}/controller/100/rating"));
    assert_eq!(form_value(&requests[0], "rating"), Some("5"));

    assert_eq!(requests[1].method, HttpMethod::Put);
    assert_eq!(requests[1].url, format!("{BASE}/controller/100/flag"));
    assert_eq!(form_value(&requests[1], "flag"), Some("NO_PROMOTE"));
    assert_eq!(form_value(&requests[1], "value"), Some("false"));

    assert_eq!(requests[2].method, HttpMethod::Delete);
    assert_eq!(requests[2].url, format!("{BASE}/controller/100/facility"));
    assert_eq!(form_value(&requests[2], "reason"), Some("inactivity"));
}

#[tokio::test]
async fn test_visitor_reason_is_omitted_when_absent() {
    let spy = SpyTransport::new(200, "");
    let client = client_with(&spy);

    client.facility.add_visitor("ZDC", 100, None).await.unwrap();
    client
        .facility
        .remove_controller("ZDC", 100, Some("left"))
        .await
        .unwrap();

    let requests = spy.requests();
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].url, format!("{BASE}/facility/ZDC/roster"));
    assert_eq!(form_value(&requests[0], "cid"), Some("100"));
    assert_eq!(form_value(&requests[0], "reason"), None);

    assert_eq!(requests[1].method, HttpMethod::Delete);
    assert_eq!(form_value(&requests[1], "reason"), Some("left"));
}

#[tokio::test]
async fn test_news_update_form_body() {
    let spy = SpyTransport::new(200, "");
    let client = client_with(&spy);

    client
        .news
        .update_news_post(42, "ZDC", 100, "Title", "Body", "https://img.example/a.png", true)
        .await
        .unwrap();

    let request = &spy.requests()[0];
    assert_eq!(request.method, HttpMethod::Put);
    assert_eq!(request.url, format!("{BASE}/news/42"));
    assert_eq!(form_value(request, "author_cid"), Some("100"));
    assert_eq!(form_value(request, "publish"), Some("true"));
    assert_eq!(
        form_value(request, "banner_image_url"),
        Some("https://img.example/a.png")
    );
}

// ── Pending contracts ───────────────────────────────────────────────

#[tokio::test]
async fn test_pending_operations_report_unimplemented() {
    let spy = SpyTransport::new(200, "");
    let client = client_with(&spy);
    let expiry = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    let results = [
        client.request.create_transfer(1, 2, "ZDC", "r").await.map(|_| ()),
        client.request.update_transfer(1, 2, true, None).await.map(|_| ()),
        client.request.create_visit_request(1, 2, "ZDC", "r").await.map(|_| ()),
        client.request.update_visit_request(1, 2, false, Some("no")).await.map(|_| ()),
        client.solo.all().await.map(|_| ()),
        client.solo.all_facility("ZDC").await.map(|_| ()),
        client.solo.create(1, "ZDC", "DCA_TWR", expiry, 2).await.map(|_| ()),
        client.solo.delete(7).await.map(|_| ()),
    ];

    for result in results {
        assert!(
            matches!(result, Err(Error::Unimplemented { .. })),
            "got: {result:?}"
        );
    }
    assert_eq!(spy.call_count(), 0);
}
