use async_trait::async_trait;
use mockito::Matcher;
use roxios::reqwest::StatusCode;
use roxios::reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use roxios::{
    Client, Config, Error, FormData, JsonPayload, Request, RequestConfig, Response, Transport,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Transport double that records the outgoing request and answers with a
/// canned response.
struct MockTransport {
    last: Mutex<Option<Request>>,
    status: StatusCode,
    body: Vec<u8>,
}

impl MockTransport {
    fn new(status: StatusCode, body: &[u8]) -> Arc<Self> {
        Arc::new(Self {
            last: Mutex::new(None),
            status,
            body: body.to_vec(),
        })
    }

    fn last_request(&self) -> Request {
        self.last.lock().unwrap().clone().expect("a request was performed")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn perform(&self, request: Request) -> Result<Response, Error> {
        *self.last.lock().unwrap() = Some(request);
        Ok(Response::new(self.status, HeaderMap::new(), self.body.clone()))
    }

    fn set_timeout(&self, _timeout: Duration) {}
}

struct FailingTransport;

#[async_trait]
impl Transport for FailingTransport {
    async fn perform(&self, _request: Request) -> Result<Response, Error> {
        Err(Error::Transport("connection refused".into()))
    }

    fn set_timeout(&self, _timeout: Duration) {}
}

fn client_with(transport: Arc<MockTransport>, base_url: &str) -> Client {
    Client::new(Config {
        base_url: base_url.to_string(),
        headers: HeaderMap::new(),
        transport: Some(transport),
    })
}

#[tokio::test]
async fn default_and_per_call_headers_merge_additively() {
    let transport = MockTransport::new(StatusCode::OK, b"");
    let mut client = client_with(Arc::clone(&transport), "http://e.com");
    client.set_header(
        HeaderName::from_static("x-tag"),
        HeaderValue::from_static("1"),
    );

    let config = RequestConfig::new().header(
        HeaderName::from_static("x-tag"),
        HeaderValue::from_static("2"),
    );
    client.get("/json", Some(config)).await.unwrap();

    let request = transport.last_request();
    let values: Vec<_> = request.headers.get_all("x-tag").iter().collect();
    assert_eq!(values, vec!["1", "2"]);
}

#[tokio::test]
async fn base_url_and_query_params_shape_the_request_url() {
    let transport = MockTransport::new(StatusCode::OK, b"");
    let client = client_with(Arc::clone(&transport), "http://e.com/api/");

    client
        .get("/json", Some(RequestConfig::new().query("a", "1")))
        .await
        .unwrap();

    let request = transport.last_request();
    assert_eq!(request.url.as_str(), "http://e.com/api/json?a=1");
}

#[tokio::test]
async fn non_2xx_response_is_not_an_error() {
    let transport = MockTransport::new(StatusCode::NOT_FOUND, b"missing");
    let client = client_with(transport, "http://e.com");

    let mut response = client.get("/nowhere", None).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.read_body().await.unwrap(), b"missing");
}

#[tokio::test]
async fn json_payload_sets_body_and_content_type() {
    #[derive(Serialize)]
    struct Guess {
        x: i32,
        y: i32,
    }

    let transport = MockTransport::new(StatusCode::OK, b"");
    let client = client_with(Arc::clone(&transport), "http://e.com");

    let payload = JsonPayload::new(Guess { x: 3, y: 4 });
    client.post("/guess", Some(&payload), None).await.unwrap();

    let request = transport.last_request();
    assert_eq!(request.method, roxios::reqwest::Method::POST);
    assert_eq!(request.headers.get("content-type").unwrap(), "application/json");
    assert_eq!(request.body, b"{\"x\":3,\"y\":4}");
}

#[tokio::test]
async fn transport_errors_pass_through_unwrapped() {
    let client = Client::new(Config {
        base_url: "http://e.com".to_string(),
        headers: HeaderMap::new(),
        transport: Some(Arc::new(FailingTransport)),
    });
    let err = client.get("/json", None).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn empty_method_fails_before_the_transport_is_called() {
    let transport = MockTransport::new(StatusCode::OK, b"");
    let client = client_with(Arc::clone(&transport), "http://e.com");

    let err = client.request("", "/json", None, None).await.unwrap_err();
    assert!(matches!(err, Error::EmptyMethod));
    assert!(transport.last.lock().unwrap().is_none());
}

#[derive(Deserialize, Debug, PartialEq)]
struct Abc {
    a: i32,
    b: i32,
    c: i32,
}

#[tokio::test]
async fn get_json_through_default_transport() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/json")
        .match_query(Matcher::UrlEncoded("a".into(), "1".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"a":1,"b":2,"c":3}"#)
        .create_async()
        .await;

    let client = Client::new(Config {
        base_url: server.url(),
        ..Config::default()
    });
    let response = client
        .get("/json", Some(RequestConfig::new().query("a", "1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let decoded = response.json::<Abc>().await.unwrap();
    assert_eq!(*decoded.value(), Abc { a: 1, b: 2, c: 3 });
}

#[tokio::test]
async fn post_form_data_through_default_transport() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/form-data")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="a""#.to_string()),
            Matcher::Regex(r#"name="b""#.to_string()),
        ]))
        .with_status(200)
        .create_async()
        .await;

    let client = Client::new(Config {
        base_url: server.url(),
        ..Config::default()
    });
    let mut form = FormData::new();
    form.add_text("a", "1");
    form.add_text("a", "2");
    form.add_text("b", "2");
    let response = client.post("/form-data", Some(&form), None).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    mock.assert_async().await;
}

#[tokio::test]
async fn post_json_through_default_transport_echoes_request() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/echo")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(serde_json::json!({"a": 1, "b": 2, "c": 3})))
        .with_status(201)
        .with_body(r#"{"a":1,"b":2,"c":3}"#)
        .create_async()
        .await;

    let client = Client::new(Config {
        base_url: server.url(),
        ..Config::default()
    });
    let payload = JsonPayload::new(serde_json::json!({"a": 1, "b": 2, "c": 3}));
    let response = client.post("/echo", Some(&payload), None).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let decoded = response.json::<Abc>().await.unwrap();
    assert_eq!(*decoded.value(), Abc { a: 1, b: 2, c: 3 });
}

#[tokio::test]
async fn default_transport_accepts_https_urls() {
    // Nothing listens on this port: with a TLS backend compiled in, the
    // exchange fails at connect time rather than rejecting the scheme.
    let client = Client::new(Config {
        base_url: "https://127.0.0.1:1".to_string(),
        ..Config::default()
    });
    let err = client.get("/", None).await.unwrap_err();

    let mut chain = String::new();
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(&err);
    while let Some(e) = source {
        chain.push_str(&e.to_string());
        chain.push_str("; ");
        source = e.source();
    }
    assert!(
        !chain.contains("scheme is not http"),
        "https was rejected by the default transport: {chain}"
    );
    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn default_transports_are_per_client() {
    let a = Client::default();
    let b = Client::default();
    assert!(
        !Arc::ptr_eq(&a.transport(), &b.transport()),
        "clients built without an explicit transport must not share one"
    );
}

#[tokio::test]
async fn timeout_on_one_default_client_leaves_others_untouched() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/ok")
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let impatient = Client::default();
    impatient.set_request_timeout(Duration::from_millis(1));

    let client = Client::new(Config {
        base_url: server.url(),
        ..Config::default()
    });
    let response = client.get("/ok", None).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn module_level_get_uses_the_shared_default_client() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/ping")
        .with_status(200)
        .with_body("pong")
        .create_async()
        .await;

    let url = format!("{}/ping", server.url());
    let mut response = roxios::get(&url, None).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.read_body().await.unwrap(), b"pong");
}
